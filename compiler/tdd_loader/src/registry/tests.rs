use pretty_assertions::assert_eq;
use tdd_ir::Value;

use super::{is_bare_name, LoaderFactory, LoaderRegistry};
use crate::{Capability, DataLoader, Engine, LoaderError, ResolveError, StandaloneEngine};

#[derive(Default)]
struct Fixed;

impl DataLoader for Fixed {
    fn load(&self, _engine: &dyn Engine, args: &[Value]) -> Result<Value, LoaderError> {
        Ok(Value::from(format!("fixed/{}", args.len())))
    }
}

fn resolve_err(engine: &StandaloneEngine, name: &str) -> ResolveError {
    match engine.registry().resolve(name, engine) {
        Ok(_) => panic!("{name} resolved"),
        Err(err) => err,
    }
}

#[test]
fn test_builtin_names() {
    assert_eq!(
        LoaderRegistry::new().builtin_names(),
        ["csv", "json", "now", "properties", "slicedText", "tdd", "tddSequence", "text"]
    );
}

#[test]
fn test_builtins_resolve() {
    let engine = StandaloneEngine::new();
    for name in engine.registry().builtin_names() {
        assert!(engine.registry().resolve(name, &engine).is_ok(), "{name}");
    }
    let now = engine.registry().resolve("now", &engine).unwrap();
    assert!(matches!(now.load(&engine, &[]).unwrap(), Value::Str(_)));
}

#[test]
fn test_unknown_bare_name() {
    let err = resolve_err(&StandaloneEngine::new(), "nosuch");
    assert_eq!(err.to_string(), "Unknown data loader: nosuch");
}

#[test]
fn test_scripting_and_transform_names_are_not_loaders() {
    let engine = StandaloneEngine::new();
    for name in ["eval", "htmlUtils", "xhtmlUtils"] {
        let err = resolve_err(&engine, name);
        assert!(matches!(err, ResolveError::UnknownLoader { .. }), "{name}: {err:?}");
    }
}

#[test]
fn test_qualified_name_not_registered() {
    let err = resolve_err(&StandaloneEngine::new(), "my::Loader");
    assert!(matches!(err, ResolveError::TypeNotFound { ref id } if id == "my::Loader"));
}

#[test]
fn test_capability_is_checked_before_type_lookup() {
    let err = resolve_err(&StandaloneEngine::new(), "xml");
    assert!(matches!(err, ResolveError::CapabilityUnavailable { .. }));
    assert_eq!(err.to_string(), "Can't get xml data loader");
    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(
        source.as_deref(),
        Some("XML support is not available: the standalone engine was built without it")
    );

    let engine = StandaloneEngine::builder().capability(Capability::Xml).build();
    let err = resolve_err(&engine, "xml");
    assert!(matches!(err, ResolveError::TypeNotFound { ref id } if id == "tdd::loaders::Xml"));
}

#[test]
fn test_on_demand_loader_registered_by_host() {
    let engine = StandaloneEngine::builder()
        .capability(Capability::Xml)
        .register_loader("tdd::loaders::Xml", LoaderFactory::of::<Fixed>())
        .build();
    let loader = engine.registry().resolve("xml", &engine).unwrap();
    assert_eq!(
        loader.load(&engine, &[Value::from("a.xml")]).unwrap(),
        Value::from("fixed/1")
    );
}

#[test]
fn test_registered_type_must_be_a_factory() {
    let engine = StandaloneEngine::builder()
        .register_type("my::NotALoader", Box::new(String::from("nope")))
        .build();
    let err = resolve_err(&engine, "my::NotALoader");
    assert!(matches!(err, ResolveError::NotALoader { .. }));
}

#[test]
fn test_instantiation_failure() {
    let engine = StandaloneEngine::builder()
        .register_loader(
            "my.Broken",
            LoaderFactory::new(|| Err("no config".into())),
        )
        .build();
    let err = resolve_err(&engine, "my.Broken");
    assert_eq!(err.to_string(), "Failed to create an instance of my.Broken");
    assert!(matches!(err, ResolveError::InstantiationFailed { .. }));
}

#[test]
fn test_builtin_wins_over_registered_type() {
    let engine = StandaloneEngine::builder()
        .register_loader("csv", LoaderFactory::of::<Fixed>())
        .build();
    let csv = engine.registry().resolve("csv", &engine).unwrap();
    assert!(csv.load(&engine, &[]).is_err());
}

#[test]
fn test_bare_names() {
    assert!(is_bare_name("csv"));
    assert!(!is_bare_name("Csv"));
    assert!(!is_bare_name("my.csv"));
    assert!(!is_bare_name("my::csv"));
    assert!(!is_bare_name(""));
}
