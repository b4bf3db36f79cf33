//! TDD IR - the value model of the TDD data language.
//!
//! This crate holds everything the other TDD crates agree on:
//! - [`Span`] for byte ranges in source text
//! - [`Fragment`] for an immutable view into a source text
//! - [`Value`], the result of parsing or evaluating TDD
//! - [`Mapping`], an ordered map with unique string keys
//! - [`FunctionCall`], a call left unresolved by the evaluation environment
//!
//! Values are plain owned trees. They are created once per evaluation and are
//! read-only afterwards, so they can be shared freely (`Clone`, `Send`, `Sync`).

mod dump;
mod fragment;
mod mapping;
mod span;
mod value;

pub use fragment::{Fragment, FragmentError};
pub use mapping::Mapping;
pub use span::{Span, SpanError};
pub use value::{FunctionCall, Number, Value};
