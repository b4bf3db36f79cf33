use tdd_eval::{EvalError, HookError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("Fragment doesn't evaluate to Map but to {type_name}.")]
    NotAMapping { type_name: &'static str },

    /// A failure of a host-provided builder.
    #[error("Failed to build local data")]
    Custom(#[source] HookError),
}
