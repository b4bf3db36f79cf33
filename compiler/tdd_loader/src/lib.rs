//! Data loaders for TDD.
//!
//! A call such as `csv("prices.csv", {separator: ","})` in TDD evaluated with
//! a [`DataLoaderEnvironment`] is resolved to a [`DataLoader`] through the
//! engine's [`LoaderRegistry`], then invoked with the evaluated parameters.
//!
//! Built-in loaders:
//!
//! | name | result |
//! |------|--------|
//! | `tdd(path[, encoding])` | the file evaluated as a hash body |
//! | `tddSequence(path[, encoding])` | the file evaluated as a sequence body |
//! | `text(path[, encoding])` | the file as a string |
//! | `slicedText(path[, options])` | the file split into a sequence of strings |
//! | `properties(path)` | a Java properties file as a hash |
//! | `json(path[, charset])` | a JSON document |
//! | `csv(path[, options])` | a sequence of row hashes |
//! | `now([options])` | the current date and time as a string |
//!
//! The special `get(name, subName, ...)` function reads back values of the
//! hashes being built, falling back to the engine's data.

mod encoding;
mod engine;
mod environment;
mod error;
mod loaders;
mod registry;
mod standalone;

use tdd_ir::Value;

pub use encoding::{decode, detect_encoding, load_tdd, strip_bom, Encoding};
pub use engine::{Capability, CapabilityError, Engine};
pub use environment::{DataLoaderEnvironment, LookupError};
pub use error::{LoaderError, ResolveError};
pub use loaders::{
    CsvLoader, JsonLoader, NowLoader, PropertiesLoader, SlicedTextLoader, TddLoader,
    TddSequenceLoader, TextLoader,
};
pub use registry::{LoaderFactory, LoaderRegistry};
pub use standalone::{StandaloneEngine, StandaloneEngineBuilder};

/// A function callable from TDD that produces data.
pub trait DataLoader {
    /// `args` are the evaluated call parameters.
    fn load(&self, engine: &dyn Engine, args: &[Value]) -> Result<Value, LoaderError>;
}
