//! `csv(path[, options])`: a sequence of row hashes.
//!
//! Header cells may carry a type after a colon (`price:n`, `active:b`);
//! typed cells are converted, and empty typed cells are left out of the row.

use tdd_ir::{Mapping, Number, Value};

use super::file::DataFile;
use super::options::{
    bool_option, char_option, check_arg_count, options_arg, string_list_option, string_option,
    unknown_option,
};
use crate::{DataLoader, Engine, LoaderError};

const SUPPORTED_OPTIONS: &str = "encoding, separator, headers, replaceHeaders, normalizeHeaders, \
                                 trimCells, emptyValue, groupingSeparator, decimalSeparator, \
                                 altTrue, altFalse";

#[derive(Copy, Clone, Default, Debug)]
pub struct CsvLoader;

impl DataLoader for CsvLoader {
    fn load(&self, engine: &dyn Engine, args: &[Value]) -> Result<Value, LoaderError> {
        check_arg_count(
            args,
            1,
            2,
            "csv data loader needs 1 or 2 arguments: csv(filename) or csv(filename, options)",
        )?;
        let mut table = CsvTable::default();
        let mut encoding = engine.source_encoding();
        let mut header_option_used = false;
        for (name, value) in options_arg(args, 1)?.into_iter().flatten() {
            match name.as_str() {
                "headers" | "replaceHeaders" => {
                    if header_option_used {
                        return Err(LoaderError::arguments(
                            "Only one of the \"headers\" and \"replaceHeaders\" options can be \
                             used at once.",
                        ));
                    }
                    header_option_used = true;
                    table.headers = Some(string_list_option(name, value, false)?);
                    table.file_has_header_row = name == "replaceHeaders";
                }
                "normalizeHeaders" => table.normalize_headers = bool_option(name, value)?,
                "trimCells" => table.trim_cells = bool_option(name, value)?,
                "emptyValue" => table.empty_values = string_list_option(name, value, true)?,
                "separator" => {
                    let separator = char_option(name, value)?;
                    table.separator = u8::try_from(separator)
                        .ok()
                        .filter(u8::is_ascii)
                        .ok_or_else(|| {
                            LoaderError::arguments(format!(
                                "The value of the \"{name}\" option must be an ASCII character."
                            ))
                        })?;
                }
                "groupingSeparator" => table.grouping_separator = Some(char_option(name, value)?),
                "decimalSeparator" => table.decimal_separator = Some(char_option(name, value)?),
                "altTrue" => table.alt_true = Some(string_option(name, value)?.to_lowercase()),
                "altFalse" => table.alt_false = Some(string_option(name, value)?.to_lowercase()),
                "encoding" => encoding = string_option(name, value)?,
                _ => return Err(unknown_option(name, SUPPORTED_OPTIONS)),
            }
        }
        let file = DataFile::read(engine, args)?;
        let rows = table
            .parse(&file.text(encoding)?)
            .map_err(|err| match err {
                CsvError::Csv(source) => LoaderError::Csv {
                    path: file.path.clone(),
                    source,
                },
                CsvError::Loader(err) => err,
            })?;
        Ok(Value::Sequence(rows))
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum CellType {
    Str,
    Number,
    Boolean,
}

#[derive(Clone, Debug)]
struct Column {
    name: String,
    ty: CellType,
}

pub(crate) enum CsvError {
    Csv(csv::Error),
    Loader(LoaderError),
}

impl From<LoaderError> for CsvError {
    fn from(err: LoaderError) -> Self {
        CsvError::Loader(err)
    }
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        CsvError::Csv(err)
    }
}

/// Parsing options of one `csv` call.
#[derive(Clone, Debug)]
pub(crate) struct CsvTable {
    pub separator: u8,
    /// Headers given instead of (or replacing) the file's header row.
    pub headers: Option<Vec<String>>,
    pub file_has_header_row: bool,
    pub normalize_headers: bool,
    pub trim_cells: bool,
    pub empty_values: Vec<String>,
    pub grouping_separator: Option<char>,
    pub decimal_separator: Option<char>,
    pub alt_true: Option<String>,
    pub alt_false: Option<String>,
}

impl Default for CsvTable {
    fn default() -> Self {
        CsvTable {
            separator: b';',
            headers: None,
            file_has_header_row: true,
            normalize_headers: false,
            trim_cells: false,
            empty_values: Vec::new(),
            grouping_separator: None,
            decimal_separator: None,
            alt_true: None,
            alt_false: None,
        }
    }
}

impl CsvTable {
    pub(crate) fn parse(&self, text: &str) -> Result<Vec<Value>, CsvError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.separator)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        let mut records = reader.records();

        let header_cells: Vec<String> = match &self.headers {
            Some(headers) => {
                if self.file_has_header_row {
                    records.next().transpose()?;
                }
                headers.clone()
            }
            None => match records.next().transpose()? {
                Some(record) => record.iter().map(str::to_owned).collect(),
                None => return Ok(Vec::new()),
            },
        };
        let columns = header_cells
            .iter()
            .map(|cell| self.column(cell))
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            // Row numbers count the header row, starting from 1.
            let row_number = rows.len() + 2;
            if record.len() > columns.len() {
                return Err(LoaderError::format(format!(
                    "Row {row_number} contains more columns than the number of header cells."
                ))
                .into());
            }
            let mut row = Mapping::new();
            for (column, cell) in columns.iter().zip(record.iter()) {
                if let Some(value) = self.cell(column, cell, row_number)? {
                    row.insert(column.name.clone(), value);
                }
            }
            rows.push(Value::Mapping(row));
        }
        Ok(rows)
    }

    fn column(&self, cell: &str) -> Result<Column, LoaderError> {
        let mut cell = cell.to_owned();
        if self.normalize_headers {
            if let (Some(open), Some(close)) = (cell.find('('), cell.rfind(')')) {
                if open < close {
                    cell.replace_range(open..=close, "");
                }
            }
        }
        let (name, ty) = match cell.rfind(':') {
            None => (cell.trim(), CellType::Str),
            Some(colon) => {
                let ty = cell[colon + 1..].trim().to_lowercase();
                let ty = match ty.as_str() {
                    "s" | "string" => CellType::Str,
                    "n" | "number" => CellType::Number,
                    "b" | "boolean" => CellType::Boolean,
                    "d" | "date" | "t" | "time" | "dt" | "datetime" => {
                        return Err(LoaderError::format(format!(
                            "Date and time column types are not supported: \"{ty}\""
                        )));
                    }
                    _ => {
                        return Err(LoaderError::format(format!(
                            "Unknown data type in a header: \"{ty}\""
                        )));
                    }
                };
                (cell[..colon].trim(), ty)
            }
        };
        let name = if self.normalize_headers {
            normalize_header(name)
        } else {
            name.to_owned()
        };
        Ok(Column { name, ty })
    }

    fn cell(&self, column: &Column, raw: &str, row: usize) -> Result<Option<Value>, LoaderError> {
        let mut text = if self.trim_cells { raw.trim() } else { raw };
        if self.empty_values.iter().any(|empty| empty == text) {
            text = "";
        }
        match column.ty {
            CellType::Str => Ok(Some(Value::Str(text.to_owned()))),
            CellType::Number => {
                let fixed = self.fix_number(text);
                if fixed.is_empty() {
                    return Ok(None);
                }
                Number::parse(&fixed).map(|n| Some(Value::Number(n))).ok_or_else(|| {
                    LoaderError::format(format!(
                        "Row {row}, column \"{}\": {text:?} is not a valid number.",
                        column.name
                    ))
                })
            }
            CellType::Boolean => {
                let fixed = self.fix_boolean(text);
                match fixed.as_str() {
                    "" => Ok(None),
                    "true" => Ok(Some(Value::Bool(true))),
                    "false" => Ok(Some(Value::Bool(false))),
                    _ => Err(LoaderError::format(format!(
                        "Row {row}, column \"{}\": {text:?} is not a valid boolean.",
                        column.name
                    ))),
                }
            }
        }
    }

    fn fix_number(&self, text: &str) -> String {
        text.trim()
            .chars()
            .filter(|&c| Some(c) != self.grouping_separator)
            .map(|c| if Some(c) == self.decimal_separator { '.' } else { c })
            .collect()
    }

    fn fix_boolean(&self, text: &str) -> String {
        let text = text.trim().to_lowercase();
        if self.alt_true.as_deref() == Some(text.as_str()) {
            "true".to_owned()
        } else if self.alt_false.as_deref() == Some(text.as_str()) {
            "false".to_owned()
        } else {
            text
        }
    }
}

/// Lowercase, with runs of ` - , ; :` turned into one `_`.
fn normalize_header(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        let c = if matches!(c, ' ' | '-' | ',' | ';' | ':') { '_' } else { c };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests;
