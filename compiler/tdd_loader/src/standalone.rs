//! An [`Engine`] for using TDD outside of a page-generation host.

use std::any::Any;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use tdd_ir::{Mapping, Value};

use crate::{Capability, CapabilityError, Engine, LoaderFactory, LoaderRegistry};

/// A self-contained engine: a data root, a default encoding, a set of
/// enabled capabilities and a fixed data model.
#[derive(Debug)]
pub struct StandaloneEngine {
    data_root: PathBuf,
    source_encoding: String,
    capabilities: FxHashSet<Capability>,
    data: Mapping,
    registry: LoaderRegistry,
}

impl StandaloneEngine {
    /// An engine rooted at the current directory, reading UTF-8.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> StandaloneEngineBuilder {
        StandaloneEngineBuilder::new()
    }

    /// The top-level variables visible to `get`.
    pub fn data(&self) -> &Mapping {
        &self.data
    }
}

impl Default for StandaloneEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for StandaloneEngine {
    fn get_data(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    fn check_capability(&self, capability: Capability) -> Result<(), CapabilityError> {
        if self.capabilities.contains(&capability) {
            Ok(())
        } else {
            Err(CapabilityError {
                capability,
                reason: "the standalone engine was built without it".to_owned(),
            })
        }
    }

    fn data_root(&self) -> &Path {
        &self.data_root
    }

    fn source_encoding(&self) -> &str {
        &self.source_encoding
    }

    fn registry(&self) -> &LoaderRegistry {
        &self.registry
    }
}

/// Builder for [`StandaloneEngine`].
#[derive(Debug)]
pub struct StandaloneEngineBuilder {
    data_root: PathBuf,
    source_encoding: String,
    capabilities: FxHashSet<Capability>,
    data: Mapping,
    registry: LoaderRegistry,
}

impl StandaloneEngineBuilder {
    pub fn new() -> Self {
        StandaloneEngineBuilder {
            data_root: PathBuf::from("."),
            source_encoding: "UTF-8".to_owned(),
            capabilities: FxHashSet::default(),
            data: Mapping::new(),
            registry: LoaderRegistry::new(),
        }
    }

    /// Directory that relative data file names are resolved against.
    #[must_use]
    pub fn data_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.data_root = root.into();
        self
    }

    #[must_use]
    pub fn source_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.source_encoding = encoding.into();
        self
    }

    #[must_use]
    pub fn capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    /// Add a top-level variable.
    #[must_use]
    pub fn data(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    /// Add every entry of `data` as a top-level variable.
    #[must_use]
    pub fn data_mapping(mut self, data: Mapping) -> Self {
        self.data.merge(data);
        self
    }

    #[must_use]
    pub fn register_loader(mut self, id: impl Into<String>, factory: LoaderFactory) -> Self {
        self.registry.register_loader(id, factory);
        self
    }

    #[must_use]
    pub fn register_type(mut self, id: impl Into<String>, ty: Box<dyn Any + Send + Sync>) -> Self {
        self.registry.register_type(id, ty);
        self
    }

    pub fn build(self) -> StandaloneEngine {
        tracing::debug!(
            data_root = %self.data_root.display(),
            encoding = %self.source_encoding,
            "standalone engine"
        );
        StandaloneEngine {
            data_root: self.data_root,
            source_encoding: self.source_encoding,
            capabilities: self.capabilities,
            data: self.data,
            registry: self.registry,
        }
    }
}

impl Default for StandaloneEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
