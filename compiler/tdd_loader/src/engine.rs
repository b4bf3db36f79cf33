//! The host as seen by data loaders.

use std::fmt;
use std::path::Path;

use tdd_ir::Value;
use thiserror::Error;

use crate::LoaderRegistry;

/// Optional host features that some loaders depend on.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Capability {
    Xml,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Xml => f.write_str("XML"),
        }
    }
}

/// A capability the host cannot provide.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("{capability} support is not available: {reason}")]
pub struct CapabilityError {
    pub capability: Capability,
    pub reason: String,
}

/// Services a host offers to loaders and to the `get` function.
pub trait Engine {
    /// A top-level variable of the host's data model.
    fn get_data(&self, name: &str) -> Option<&Value>;

    fn check_capability(&self, capability: Capability) -> Result<(), CapabilityError>;

    /// Base directory for relative loader paths.
    fn data_root(&self) -> &Path;

    /// Encoding of data files that don't name one.
    fn source_encoding(&self) -> &str;

    fn registry(&self) -> &LoaderRegistry;
}
