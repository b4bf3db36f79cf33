//! Errors of loader resolution and loader execution.

use std::io;
use std::path::PathBuf;

use tdd_eval::{EvalError, HookError};
use thiserror::Error;

use crate::CapabilityError;

/// A loader name that cannot be turned into a loader.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Unknown data loader: {name}")]
    UnknownLoader { name: String },

    /// The loader needs a host capability that is missing. Reported before
    /// the loader type is looked up.
    #[error("Can't get {name} data loader")]
    CapabilityUnavailable {
        name: String,
        #[source]
        source: CapabilityError,
    },

    #[error("Data loader type not found: {id}")]
    TypeNotFound { id: String },

    #[error("The type registered as {id} is not a data loader factory")]
    NotALoader { id: String },

    #[error("Failed to create an instance of {id}")]
    InstantiationFailed {
        id: String,
        #[source]
        source: HookError,
    },
}

/// A loader that failed to produce its value.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Wrong number, type or value of arguments or options.
    #[error("{0}")]
    Arguments(String),

    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("The content is not valid {encoding}")]
    Decode { encoding: String },

    /// The file was read but its content is malformed.
    #[error("{message}")]
    Format { message: String },

    #[error("Failed to parse JSON in {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse CSV in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A TDD file loaded by `tdd` or `tddSequence` failed.
    #[error(transparent)]
    Eval(Box<EvalError>),
}

impl LoaderError {
    pub(crate) fn arguments(message: impl Into<String>) -> Self {
        LoaderError::Arguments(message.into())
    }

    pub(crate) fn format(message: impl Into<String>) -> Self {
        LoaderError::Format {
            message: message.into(),
        }
    }
}

impl From<EvalError> for LoaderError {
    fn from(err: EvalError) -> Self {
        LoaderError::Eval(Box::new(err))
    }
}
