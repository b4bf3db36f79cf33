use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use tdd_ir::{Mapping, Value};
use tdd_loader::{Engine, StandaloneEngine};

use super::{BuildMapping, CachingLocalDataBuilder};
use crate::{BuildError, LocalDataBuilder, SessionEvent, SessionListener};

/// Counts builds; the result carries the build number.
#[derive(Default)]
struct Counting {
    builds: AtomicUsize,
    empty: bool,
    fail: bool,
}

impl BuildMapping for Counting {
    fn build_mapping(&self, _engine: &dyn Engine) -> Result<Option<Mapping>, BuildError> {
        let n = self.builds.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(BuildError::Custom("broken".into()));
        }
        if self.empty {
            return Ok(None);
        }
        Ok(Some(Mapping::from_iter([("build", i64::try_from(n).unwrap())])))
    }
}

#[test]
fn test_builds_once_per_session() {
    let engine = StandaloneEngine::new();
    let builder = CachingLocalDataBuilder::new(Counting::default());

    let first = builder.build(&engine).unwrap();
    let second = builder.build(&engine).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.get("build"), Some(&Value::from(1)));
    assert_eq!(builder.inner().builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_session_end_invalidates() {
    let engine = StandaloneEngine::new();
    let builder = CachingLocalDataBuilder::new(Counting::default());

    builder.build(&engine).unwrap();
    builder.on_session_event(&SessionEvent::Begin);
    assert!(builder.is_cached());

    builder.on_session_event(&SessionEvent::End {
        error: Some("template failed".to_owned()),
    });
    assert!(!builder.is_cached());

    let rebuilt = builder.build(&engine).unwrap();
    assert_eq!(rebuilt.get("build"), Some(&Value::from(2)));
}

#[test]
fn test_no_data_is_an_empty_mapping() {
    let engine = StandaloneEngine::new();
    let builder = CachingLocalDataBuilder::new(Counting {
        empty: true,
        ..Counting::default()
    });
    assert!(builder.build(&engine).unwrap().is_empty());
    builder.build(&engine).unwrap();
    assert_eq!(builder.inner().builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failure_is_not_cached() {
    let engine = StandaloneEngine::new();
    let builder = CachingLocalDataBuilder::new(Counting {
        fail: true,
        ..Counting::default()
    });
    let err = builder.build(&engine).unwrap_err();
    assert_eq!(err.to_string(), "Failed to build local data");
    assert!(!builder.is_cached());
    builder.build(&engine).unwrap_err();
    assert_eq!(builder.inner().builds.load(Ordering::SeqCst), 2);
}

#[test]
fn test_concurrent_callers_share_one_build() {
    let engine = StandaloneEngine::new();
    let builder = CachingLocalDataBuilder::new(Counting::default());

    let results: Vec<Arc<Mapping>> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| builder.build(&engine).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(builder.inner().builds.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
}
