//! Local data built once per processing session.
//!
//! A host drives a session with [`SessionEvent`]s. Builders that cache their
//! result listen to those events and drop the cache when the session ends,
//! so every session sees freshly built data exactly once.

mod caching;
mod error;
mod tdd_hash;

use std::sync::Arc;

use tdd_ir::Mapping;
use tdd_loader::Engine;

pub use caching::{BuildMapping, CachingLocalDataBuilder};
pub use error::BuildError;
pub use tdd_hash::TddHashLocalDataBuilder;

/// Session boundaries reported by the host.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SessionEvent {
    Begin,
    /// `error` is the message of the failure that ended the session, if any.
    End { error: Option<String> },
}

/// Receives session boundaries.
pub trait SessionListener {
    fn on_session_event(&self, event: &SessionEvent);
}

/// Produces the local data of a source file.
pub trait LocalDataBuilder: Send + Sync {
    fn build(&self, engine: &dyn Engine) -> Result<Arc<Mapping>, BuildError>;
}
