//! Argument and option checking shared by the built-in loaders.

use tdd_ir::{Mapping, Value};

use crate::LoaderError;

/// Fail unless `min..=max` arguments were passed.
pub(crate) fn check_arg_count(
    args: &[Value],
    min: usize,
    max: usize,
    usage: &str,
) -> Result<(), LoaderError> {
    if (min..=max).contains(&args.len()) {
        Ok(())
    } else {
        Err(LoaderError::arguments(usage))
    }
}

/// The string argument at `index`, named `what` in messages.
pub(crate) fn string_arg<'a>(
    args: &'a [Value],
    index: usize,
    what: &str,
) -> Result<&'a str, LoaderError> {
    args.get(index).and_then(Value::as_str).ok_or_else(|| {
        LoaderError::arguments(format!(
            "The {} argument ({what}) must be a string.",
            ordinal(index + 1)
        ))
    })
}

/// The optional hash of options at `index`.
pub(crate) fn options_arg(args: &[Value], index: usize) -> Result<Option<&Mapping>, LoaderError> {
    match args.get(index) {
        None => Ok(None),
        Some(Value::Mapping(options)) => Ok(Some(options)),
        Some(_) => Err(LoaderError::arguments(format!(
            "The {} argument (options) must be a hash.",
            ordinal(index + 1)
        ))),
    }
}

pub(crate) fn string_option<'a>(name: &str, value: &'a Value) -> Result<&'a str, LoaderError> {
    value.as_str().ok_or_else(|| {
        LoaderError::arguments(format!(
            "The value of the \"{name}\" option must be a string."
        ))
    })
}

pub(crate) fn bool_option(name: &str, value: &Value) -> Result<bool, LoaderError> {
    value.as_bool().ok_or_else(|| {
        LoaderError::arguments(format!(
            "The value of the \"{name}\" option must be a boolean."
        ))
    })
}

/// A single character, or `tab`.
pub(crate) fn char_option(name: &str, value: &Value) -> Result<char, LoaderError> {
    let Some(s) = value.as_str() else {
        return Err(LoaderError::arguments(format!(
            "The value of the \"{name}\" option must be a character."
        )));
    };
    if s.eq_ignore_ascii_case("tab") {
        return Ok('\t');
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(LoaderError::arguments(format!(
            "The value of the \"{name}\" option must be 1 character long or tab."
        ))),
    }
}

/// A sequence of strings; with `allow_single`, also one bare string.
pub(crate) fn string_list_option(
    name: &str,
    value: &Value,
    allow_single: bool,
) -> Result<Vec<String>, LoaderError> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(str::to_owned).ok_or_else(|| {
                    LoaderError::arguments(format!(
                        "The value of the \"{name}\" option must be a sequence of strings, \
                         but the item at index {i} is not a string."
                    ))
                })
            })
            .collect(),
        Value::Str(s) if allow_single => Ok(vec![s.clone()]),
        _ if allow_single => Err(LoaderError::arguments(format!(
            "The value of the \"{name}\" option must be a sequence of strings or a single \
             string, but it is neither."
        ))),
        _ => Err(LoaderError::arguments(format!(
            "The value of the \"{name}\" option must be a sequence of strings, but it is \
             not even a sequence."
        ))),
    }
}

pub(crate) fn unknown_option(name: &str, supported: &str) -> LoaderError {
    LoaderError::arguments(format!(
        "Unknown option: \"{name}\". The supported options are: {supported}"
    ))
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
