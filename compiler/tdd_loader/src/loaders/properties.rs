//! `properties(path)`: Java-style `.properties` files.

use tdd_ir::{Mapping, Value};

use super::file::DataFile;
use super::options::check_arg_count;
use crate::{DataLoader, Engine, LoaderError};

#[derive(Copy, Clone, Default, Debug)]
pub struct PropertiesLoader;

impl DataLoader for PropertiesLoader {
    fn load(&self, engine: &dyn Engine, args: &[Value]) -> Result<Value, LoaderError> {
        check_arg_count(
            args,
            1,
            1,
            "Properties data loader needs exactly 1 argument: properties(filename)",
        )?;
        let file = DataFile::read(engine, args)?;
        Ok(Value::Mapping(parse_properties(&file.text("ISO-8859-1")?)?))
    }
}

/// Parse `.properties` text into string entries, in file order.
///
/// Keys end at the first unescaped `=`, `:` or whitespace. Lines starting
/// with `#` or `!` are comments, and a line ending in an odd number of
/// backslashes continues on the next line.
pub(crate) fn parse_properties(text: &str) -> Result<Mapping, LoaderError> {
    let mut map = Mapping::new();
    for line in logical_lines(text) {
        let chars: Vec<char> = line.chars().collect();
        let (key, value) = split_entry(&chars);
        map.insert(unescape(key)?, unescape(value)?);
    }
    Ok(map)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{0C}')
}

fn logical_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;
    for line in normalized.split('\n') {
        let line = line.trim_start_matches(is_blank);
        if !continuing && (line.is_empty() || line.starts_with(['#', '!'])) {
            continue;
        }
        let backslashes = line.chars().rev().take_while(|&c| c == '\\').count();
        if backslashes % 2 == 1 {
            current.push_str(&line[..line.len() - 1]);
            continuing = true;
        } else {
            current.push_str(line);
            lines.push(std::mem::take(&mut current));
            continuing = false;
        }
    }
    if continuing {
        lines.push(current);
    }
    lines
}

fn split_entry(chars: &[char]) -> (&[char], &[char]) {
    let mut i = 0;
    let mut escaped = false;
    while let Some(&c) = chars.get(i) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            break;
        }
        i += 1;
    }
    let key = &chars[..i];

    let skip_blanks = |mut i: usize| {
        while chars.get(i).copied().is_some_and(is_blank) {
            i += 1;
        }
        i
    };
    let mut i = skip_blanks(i);
    if matches!(chars.get(i), Some('=' | ':')) {
        i = skip_blanks(i + 1);
    }
    (key, &chars[i..])
}

fn unescape(raw: &[char]) -> Result<String, LoaderError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.iter().copied();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{0C}'),
            Some('u') => {
                let unit = hex_unit(&mut chars)?;
                if (0xD800..0xDC00).contains(&unit) {
                    let low = match (chars.next(), chars.next()) {
                        (Some('\\'), Some('u')) => hex_unit(&mut chars)?,
                        _ => return Err(malformed()),
                    };
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(malformed());
                    }
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(code).ok_or_else(malformed)?);
                } else {
                    out.push(char::from_u32(unit).ok_or_else(malformed)?);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn hex_unit(chars: &mut impl Iterator<Item = char>) -> Result<u32, LoaderError> {
    let mut unit = 0;
    for _ in 0..4 {
        let digit = chars.next().and_then(|c| c.to_digit(16)).ok_or_else(malformed)?;
        unit = unit * 16 + digit;
    }
    Ok(unit)
}

fn malformed() -> LoaderError {
    LoaderError::format("Malformed \\uxxxx encoding in properties file.")
}
