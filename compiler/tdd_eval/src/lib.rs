//! Evaluation of parsed TDD.
//!
//! Walks a [`Parsed`] tree and builds a [`Value`]. Everything that is not
//! plain data is delegated to an [`EvaluationEnvironment`]:
//! - function calls, through [`EvaluationEnvironment::eval_function_call`]
//! - structural events (entering a hash, a key, a call's parameters...),
//!   through [`EvaluationEnvironment::notify`]
//!
//! Events come in enter/leave pairs. A leave is emitted even when the body
//! failed, except when the enter itself failed.
//!
//! The answer to an `EnterHashKey` event decides what happens to the value:
//! evaluate it, skip it, or bind its raw source as a fragment.

mod environment;
mod error;
mod evaluator;

use tdd_ir::{Mapping, Value};
use tdd_parse::Parsed;

pub use environment::{
    CallSite, EvaluationEnvironment, Event, HookError, Notification, SimpleEnvironment,
};
pub use error::{EvalError, EvalErrorKind};
pub use evaluator::{Evaluator, FrameId};

/// Evaluate `parsed` with `env`.
#[tracing::instrument(level = "debug", skip_all, fields(file = parsed.file_name().map(|f| &**f)))]
pub fn eval(parsed: &Parsed, env: &mut dyn EvaluationEnvironment) -> Result<Value, EvalError> {
    Evaluator::new(parsed).run(env)
}

/// Evaluate `parsed`, which must produce a hash.
pub fn eval_as_hash(
    parsed: &Parsed,
    env: &mut dyn EvaluationEnvironment,
) -> Result<Mapping, EvalError> {
    match eval(parsed, env)? {
        Value::Mapping(map) => Ok(map),
        other => Err(not_a(parsed, "hash", &other)),
    }
}

/// Evaluate `parsed`, which must produce a sequence.
pub fn eval_as_sequence(
    parsed: &Parsed,
    env: &mut dyn EvaluationEnvironment,
) -> Result<Vec<Value>, EvalError> {
    match eval(parsed, env)? {
        Value::Sequence(items) => Ok(items),
        other => Err(not_a(parsed, "sequence", &other)),
    }
}

fn not_a(parsed: &Parsed, expected: &str, got: &Value) -> EvalError {
    let start = parsed.expr(parsed.root()).span.start;
    EvalError::semantic(
        format!(
            "The expression should evaluate to a {expected}, but it evaluates to a(n) {}.",
            got.type_name()
        ),
        parsed.location(start),
    )
}

#[cfg(test)]
mod tests;
