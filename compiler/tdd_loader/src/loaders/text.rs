//! `text` and `slicedText`.

use tdd_ir::Value;
use tdd_lexer::chars::is_whitespace;

use super::file::DataFile;
use super::options::{
    bool_option, check_arg_count, options_arg, string_arg, string_option, unknown_option,
};
use crate::{DataLoader, Engine, LoaderError};

/// `text(path[, encoding])`: the whole file as one string.
#[derive(Copy, Clone, Default, Debug)]
pub struct TextLoader;

impl DataLoader for TextLoader {
    fn load(&self, engine: &dyn Engine, args: &[Value]) -> Result<Value, LoaderError> {
        check_arg_count(
            args,
            1,
            2,
            "text data loader needs 1 or 2 arguments: text(filename) or text(filename, encoding)",
        )?;
        let encoding = if args.len() > 1 {
            string_arg(args, 1, "encoding")?
        } else {
            engine.source_encoding()
        };
        let file = DataFile::read(engine, args)?;
        Ok(Value::Str(file.text(encoding)?))
    }
}

/// `slicedText(path[, options])`: the file cut into a sequence of strings.
///
/// Options: `separator` (default a line break), `encoding`, `trim`,
/// `dropEmptyLastItem` (default `true`).
#[derive(Copy, Clone, Default, Debug)]
pub struct SlicedTextLoader;

impl DataLoader for SlicedTextLoader {
    fn load(&self, engine: &dyn Engine, args: &[Value]) -> Result<Value, LoaderError> {
        check_arg_count(
            args,
            1,
            2,
            "slicedText data loader needs 1 or 2 arguments: slicedText(filename) or \
             slicedText(filename, options)",
        )?;
        let mut slicer = Slicer::default();
        let mut encoding = engine.source_encoding();
        for (name, value) in options_arg(args, 1)?.into_iter().flatten() {
            match name.as_str() {
                "separator" => {
                    let separator = normalize_line_breaks(string_option(name, value)?);
                    if separator.is_empty() {
                        return Err(LoaderError::arguments(format!(
                            "The value of the \"{name}\" option can't be 0 length string."
                        )));
                    }
                    slicer.separator = separator;
                }
                "encoding" => encoding = string_option(name, value)?,
                "trim" => slicer.trim = bool_option(name, value)?,
                "dropEmptyLastItem" => slicer.drop_empty_last_item = bool_option(name, value)?,
                _ => {
                    return Err(unknown_option(
                        name,
                        "encoding, separator, trim, dropEmptyLastItem",
                    ))
                }
            }
        }
        let file = DataFile::read(engine, args)?;
        let items = slicer.slice(&file.text(encoding)?);
        Ok(Value::Sequence(items.into_iter().map(Value::Str).collect()))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Slicer {
    pub separator: String,
    pub trim: bool,
    pub drop_empty_last_item: bool,
}

impl Default for Slicer {
    fn default() -> Self {
        Slicer {
            separator: "\n".to_owned(),
            trim: false,
            drop_empty_last_item: true,
        }
    }
}

impl Slicer {
    /// Cut `text` at every occurrence of the separator. The end of the text
    /// ends the last item.
    pub(crate) fn slice(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let separator: Vec<char> = self.separator.chars().collect();
        let mut items = Vec::new();
        let mut begin = 0;
        let mut end = 0;
        loop {
            if end == chars.len() {
                items.push(self.item(&chars[begin..end]));
                break;
            }
            match separator_end(&chars, end, &separator) {
                Some(next) => {
                    items.push(self.item(&chars[begin..end]));
                    begin = next;
                    end = next;
                }
                None => end += 1,
            }
        }
        if self.drop_empty_last_item && items.last().is_some_and(String::is_empty) {
            items.pop();
        }
        items
    }

    fn item(&self, chars: &[char]) -> String {
        let item: String = chars.iter().collect();
        if self.trim {
            item.trim_matches(is_whitespace).to_owned()
        } else {
            item
        }
    }
}

/// Where a separator starting at `at` ends, if one starts there.
///
/// A line break in the separator matches any line break, and spaces or tabs
/// in front of a line break that is not the first separator character.
fn separator_end(text: &[char], at: usize, separator: &[char]) -> Option<usize> {
    let mut ti = at;
    let mut si = 0;
    while let Some(&expected) = separator.get(si) {
        let c = *text.get(ti)?;
        if expected == '\n' {
            match c {
                '\n' => {
                    si += 1;
                    ti += 1;
                }
                '\r' => {
                    si += 1;
                    ti += 1;
                    if text.get(ti) == Some(&'\n') {
                        ti += 1;
                    }
                }
                ' ' | '\t' if si != 0 => ti += 1,
                _ => return None,
            }
        } else if expected == c {
            si += 1;
            ti += 1;
        } else {
            return None;
        }
    }
    Some(ti)
}

fn normalize_line_breaks(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests;
