//! `json(path[, encoding])`.

use rust_decimal::Decimal;
use tdd_ir::{Mapping, Number, Value};

use super::file::DataFile;
use super::options::{check_arg_count, string_arg};
use crate::{DataLoader, Engine, LoaderError};

#[derive(Copy, Clone, Default, Debug)]
pub struct JsonLoader;

impl DataLoader for JsonLoader {
    fn load(&self, engine: &dyn Engine, args: &[Value]) -> Result<Value, LoaderError> {
        check_arg_count(
            args,
            1,
            2,
            "json data loader needs 1 or 2 arguments: json(filename) or json(filename, charset)",
        )?;
        let encoding = if args.len() > 1 {
            string_arg(args, 1, "charset")?
        } else {
            engine.source_encoding()
        };
        let file = DataFile::read(engine, args)?;
        let json: serde_json::Value =
            serde_json::from_str(&file.text(encoding)?).map_err(|source| LoaderError::Json {
                path: file.path.clone(),
                source,
            })?;
        from_json(json, "")
    }
}

/// Convert parsed JSON. Object members that are `null` are left out; a
/// `null` anywhere else has no TDD counterpart.
pub(crate) fn from_json(json: serde_json::Value, pointer: &str) -> Result<Value, LoaderError> {
    Ok(match json {
        serde_json::Value::Null => {
            let at = if pointer.is_empty() { "/" } else { pointer };
            return Err(LoaderError::format(format!(
                "JSON null at {at} can't be represented as TDD data."
            )));
        }
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(number(&n)?),
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Array(items) => Value::Sequence(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| from_json(item, &format!("{pointer}/{i}")))
                .collect::<Result<_, _>>()?,
        ),
        serde_json::Value::Object(members) => {
            let mut map = Mapping::new();
            for (key, value) in members {
                if value.is_null() {
                    continue;
                }
                let value = from_json(value, &format!("{pointer}/{key}"))?;
                map.insert(key, value);
            }
            Value::Mapping(map)
        }
    })
}

fn number(n: &serde_json::Number) -> Result<Number, LoaderError> {
    if let Some(i) = n.as_i64() {
        return Ok(Number::Int(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Number::from(Decimal::from(u)));
    }
    let text = n.to_string();
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Number::from)
        .map_err(|_| LoaderError::format(format!("JSON number {text} is out of range.")))
}
