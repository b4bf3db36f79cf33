//! TDD: literal data with deferred function calls.
//!
//! ```text
//! title: "Big Joe", sizes: [11, 22, 33]
//! prices: csv(data/prices.csv, {separator: ","})
//! banner: get(site, name)
//! ```
//!
//! This crate bundles the TDD crates behind one dependency:
//!
//! - [`tdd_parse`] turns text into a span-carrying expression tree
//! - [`tdd_eval`] evaluates the tree through an [`EvaluationEnvironment`]
//! - [`tdd_loader`] resolves calls to data loaders ([`DataLoaderEnvironment`])
//! - [`tdd_session`] caches local data for a processing session
//!
//! The functions here parse and evaluate in one step.
//!
//! # Tracing
//!
//! Parsing, evaluation, loader resolution and cache transitions emit
//! `tracing` events. Call [`init_tracing`] and set `RUST_LOG` (for example
//! `RUST_LOG=tdd_loader=debug`) to see them.

use std::sync::Once;

pub use tdd_diagnostic::emitter::{ColorMode, TerminalEmitter};
pub use tdd_diagnostic::{Diagnostic, SourceLocation, ToDiagnostic, Verbosity};
pub use tdd_eval::{
    CallSite, EvalError, EvalErrorKind, EvaluationEnvironment, Evaluator, Event, FrameId,
    HookError, Notification, SimpleEnvironment,
};
pub use tdd_ir::{Fragment, FragmentError, FunctionCall, Mapping, Number, Span, Value};
pub use tdd_loader::{
    Capability, CapabilityError, DataLoader, DataLoaderEnvironment, Engine, LoaderError,
    LoaderFactory, LoaderRegistry, LookupError, ResolveError, StandaloneEngine,
    StandaloneEngineBuilder,
};
pub use tdd_parse::{ParseError, ParseErrorKind, ParseOptions, Parsed, MAX_NESTING};
pub use tdd_session::{
    BuildError, BuildMapping, CachingLocalDataBuilder, LocalDataBuilder, SessionEvent,
    SessionListener, TddHashLocalDataBuilder,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber that prints to stderr.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Parse `source` as one expression and evaluate it.
pub fn eval(
    source: &Fragment,
    options: ParseOptions,
    env: &mut dyn EvaluationEnvironment,
) -> Result<Value, EvalError> {
    let parsed = tdd_parse::parse_expression(source, options)?;
    tdd_eval::eval(&parsed, env)
}

/// Parse `source` as the inside of a hash (`a: 1, b: 2`) and evaluate it.
pub fn eval_as_hash(
    source: &Fragment,
    options: ParseOptions,
    env: &mut dyn EvaluationEnvironment,
) -> Result<Mapping, EvalError> {
    let parsed = tdd_parse::parse_hash_body(source, options)?;
    tdd_eval::eval_as_hash(&parsed, env)
}

/// Parse `source` as the inside of a sequence (`1, 2, 3`) and evaluate it.
pub fn eval_as_sequence(
    source: &Fragment,
    options: ParseOptions,
    env: &mut dyn EvaluationEnvironment,
) -> Result<Vec<Value>, EvalError> {
    let parsed = tdd_parse::parse_sequence_body(source, options)?;
    tdd_eval::eval_as_sequence(&parsed, env)
}

/// Evaluate a hash body with every call resolved through `engine`'s loaders.
pub fn load_hash(source: &Fragment, engine: &dyn Engine) -> Result<Mapping, EvalError> {
    eval_as_hash(
        source,
        ParseOptions::default(),
        &mut DataLoaderEnvironment::new(engine),
    )
}
