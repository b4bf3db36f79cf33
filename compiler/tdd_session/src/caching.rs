//! A builder whose result lives until the end of the session.

use std::sync::Arc;

use parking_lot::Mutex;
use tdd_ir::Mapping;
use tdd_loader::Engine;

use crate::{BuildError, LocalDataBuilder, SessionEvent, SessionListener};

/// The uncached part of a [`CachingLocalDataBuilder`].
pub trait BuildMapping: Send + Sync {
    /// `None` stands for no data.
    fn build_mapping(&self, engine: &dyn Engine) -> Result<Option<Mapping>, BuildError>;
}

/// Runs `B` at most once per session.
///
/// The lock is held while building, so concurrent callers wait for the
/// first build instead of starting their own. A failed build caches nothing.
pub struct CachingLocalDataBuilder<B> {
    inner: B,
    cached: Mutex<Option<Arc<Mapping>>>,
}

impl<B: BuildMapping> CachingLocalDataBuilder<B> {
    pub fn new(inner: B) -> Self {
        CachingLocalDataBuilder {
            inner,
            cached: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn is_cached(&self) -> bool {
        self.cached.lock().is_some()
    }

    /// Forget the cached result.
    pub fn invalidate(&self) {
        if self.cached.lock().take().is_some() {
            tracing::debug!("local data cache cleared");
        }
    }
}

impl<B: BuildMapping> LocalDataBuilder for CachingLocalDataBuilder<B> {
    fn build(&self, engine: &dyn Engine) -> Result<Arc<Mapping>, BuildError> {
        let mut cached = self.cached.lock();
        if let Some(result) = &*cached {
            tracing::trace!("local data cache hit");
            return Ok(Arc::clone(result));
        }
        tracing::debug!("building local data");
        let result = Arc::new(self.inner.build_mapping(engine)?.unwrap_or_default());
        *cached = Some(Arc::clone(&result));
        Ok(result)
    }
}

impl<B: BuildMapping> SessionListener for CachingLocalDataBuilder<B> {
    fn on_session_event(&self, event: &SessionEvent) {
        if let SessionEvent::End { .. } = event {
            self.invalidate();
        }
    }
}

#[cfg(test)]
mod tests;
