//! The built-in data loaders.

mod csv;
mod file;
mod json;
mod now;
mod options;
mod properties;
mod tdd;
mod text;

pub use self::csv::CsvLoader;
pub use self::json::JsonLoader;
pub use self::now::NowLoader;
pub use self::properties::PropertiesLoader;
pub use self::tdd::{TddLoader, TddSequenceLoader};
pub use self::text::{SlicedTextLoader, TextLoader};
