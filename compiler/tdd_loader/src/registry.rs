//! Loader name resolution.
//!
//! A call name is resolved in this order:
//! 1. the built-in table (`tdd`, `csv`, `now`, ...), which always wins
//! 2. the on-demand table, which maps short names to qualified type ids and
//!    may require a host [`Capability`] (checked before anything else)
//! 3. a name that starts lowercase and has no `.` or `::` is unknown
//! 4. any other name is a qualified type id, looked up in the extension
//!    registry filled by [`LoaderRegistry::register_type`]

use std::any::Any;
use std::fmt;

use rustc_hash::FxHashMap;
use tdd_eval::HookError;

use crate::loaders;
use crate::{Capability, DataLoader, Engine, ResolveError};

type Instantiate = dyn Fn() -> Result<Box<dyn DataLoader>, HookError> + Send + Sync;

/// Creates loader instances for a qualified type id.
///
/// This is the type the extension registry expects. Anything else stored
/// under an id makes resolution fail with [`ResolveError::NotALoader`].
pub struct LoaderFactory(Box<Instantiate>);

impl LoaderFactory {
    pub fn new<F>(instantiate: F) -> Self
    where
        F: Fn() -> Result<Box<dyn DataLoader>, HookError> + Send + Sync + 'static,
    {
        LoaderFactory(Box::new(instantiate))
    }

    /// A factory for a loader that needs no setup.
    pub fn of<L>() -> Self
    where
        L: DataLoader + Default + 'static,
    {
        LoaderFactory::new(|| Ok(Box::new(L::default())))
    }

    fn instantiate(&self) -> Result<Box<dyn DataLoader>, HookError> {
        (self.0)()
    }
}

impl fmt::Debug for LoaderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoaderFactory")
    }
}

/// A short name bound to a qualified type id.
#[derive(Copy, Clone, Debug)]
struct OnDemand {
    id: &'static str,
    capability: Option<Capability>,
}

/// Name to loader resolution tables.
pub struct LoaderRegistry {
    builtins: FxHashMap<&'static str, fn() -> Box<dyn DataLoader>>,
    on_demand: FxHashMap<&'static str, OnDemand>,
    types: FxHashMap<String, Box<dyn Any + Send + Sync>>,
}

impl LoaderRegistry {
    /// A registry with the built-in and on-demand tables filled and no
    /// extension types.
    pub fn new() -> Self {
        let mut registry = LoaderRegistry {
            builtins: FxHashMap::default(),
            on_demand: FxHashMap::default(),
            types: FxHashMap::default(),
        };
        register_builtins(&mut registry);
        register_on_demand(&mut registry);
        registry
    }

    /// Register an extension type under a qualified id. Loader types are
    /// registered as a [`LoaderFactory`].
    pub fn register_type(&mut self, id: impl Into<String>, ty: Box<dyn Any + Send + Sync>) {
        self.types.insert(id.into(), ty);
    }

    /// Register `factory` under a qualified id.
    pub fn register_loader(&mut self, id: impl Into<String>, factory: LoaderFactory) {
        self.register_type(id, Box::new(factory));
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    /// The built-in loader names, sorted.
    pub fn builtin_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.builtins.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Turn a call name into a loader instance.
    pub fn resolve(
        &self,
        name: &str,
        engine: &dyn Engine,
    ) -> Result<Box<dyn DataLoader>, ResolveError> {
        if let Some(create) = self.builtins.get(name) {
            tracing::trace!(name, "built-in loader");
            return Ok(create());
        }

        let id = match self.on_demand.get(name) {
            Some(entry) => {
                if let Some(capability) = entry.capability {
                    engine.check_capability(capability).map_err(|source| {
                        ResolveError::CapabilityUnavailable {
                            name: name.to_owned(),
                            source,
                        }
                    })?;
                }
                entry.id
            }
            None if is_bare_name(name) => {
                return Err(ResolveError::UnknownLoader {
                    name: name.to_owned(),
                });
            }
            None => name,
        };

        tracing::debug!(name, id, "resolving loader type");
        let Some(ty) = self.types.get(id) else {
            return Err(ResolveError::TypeNotFound { id: id.to_owned() });
        };
        let Some(factory) = ty.downcast_ref::<LoaderFactory>() else {
            return Err(ResolveError::NotALoader { id: id.to_owned() });
        };
        factory
            .instantiate()
            .map_err(|source| ResolveError::InstantiationFailed {
                id: id.to_owned(),
                source,
            })
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.types.keys().collect();
        types.sort_unstable();
        f.debug_struct("LoaderRegistry")
            .field("builtins", &self.builtin_names())
            .field("types", &types)
            .finish_non_exhaustive()
    }
}

/// Lowercase first character and not qualified.
fn is_bare_name(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_lowercase)
        && !name.contains('.')
        && !name.contains("::")
}

fn register_builtins(registry: &mut LoaderRegistry) {
    let builtins: [(&'static str, fn() -> Box<dyn DataLoader>); 8] = [
        ("tdd", || Box::new(loaders::TddLoader)),
        ("tddSequence", || Box::new(loaders::TddSequenceLoader)),
        ("text", || Box::new(loaders::TextLoader)),
        ("slicedText", || Box::new(loaders::SlicedTextLoader)),
        ("properties", || Box::new(loaders::PropertiesLoader)),
        ("json", || Box::new(loaders::JsonLoader)),
        ("csv", || Box::new(loaders::CsvLoader)),
        ("now", || Box::new(loaders::NowLoader)),
    ];
    registry.builtins.extend(builtins);
}

/// Loaders that need a host integration to exist.
fn register_on_demand(registry: &mut LoaderRegistry) {
    let entries = [
        ("xml", "tdd::loaders::Xml", Some(Capability::Xml)),
        ("xmlInfoset", "tdd::loaders::XmlInfoset", Some(Capability::Xml)),
        ("antProperty", "tdd::loaders::AntProperty", None),
        ("antProperties", "tdd::loaders::AntProperties", None),
        ("antTask", "tdd::loaders::AntTask", None),
        ("antProject", "tdd::loaders::AntProject", None),
    ];
    for (name, id, capability) in entries {
        registry.on_demand.insert(name, OnDemand { id, capability });
    }
}

#[cfg(test)]
mod tests;
