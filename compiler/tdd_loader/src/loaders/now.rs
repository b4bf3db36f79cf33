//! `now([options])`: the current date and time as a string.

use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use tdd_ir::Value;

use super::options::{check_arg_count, string_option, unknown_option};
use crate::{DataLoader, Engine, LoaderError};

#[derive(Copy, Clone, Default, Debug)]
pub struct NowLoader;

impl DataLoader for NowLoader {
    fn load(&self, _engine: &dyn Engine, args: &[Value]) -> Result<Value, LoaderError> {
        check_arg_count(args, 0, 1, "now data loader needs 0 or 1 arguments.")?;
        let format = match args.first() {
            None => NowFormat::default(),
            Some(Value::Mapping(options)) => {
                let mut format = NowFormat::default();
                for (name, value) in options {
                    format.set_option(name, value)?;
                }
                format
            }
            Some(_) => {
                return Err(LoaderError::arguments(
                    "The argument of now data loader must be a hash.",
                ));
            }
        };
        let pattern = format.pattern()?;
        let now = match format.zone {
            Some(zone) => Utc::now().with_timezone(&zone),
            None => {
                let now = Local::now();
                now.with_timezone(now.offset())
            }
        };
        Ok(Value::Str(render(&now, &pattern)))
    }
}

/// Preset length of the date or time part.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Style {
    Short,
    Medium,
    Long,
}

impl Style {
    fn parse(option: &str, value: &str) -> Result<Style, LoaderError> {
        match value.to_ascii_lowercase().as_str() {
            "short" => Ok(Style::Short),
            "medium" | "default" => Ok(Style::Medium),
            "long" => Ok(Style::Long),
            _ => Err(LoaderError::arguments(format!(
                "Illegal value for the {option} option: {value:?}. Use one of \"short\", \
                 \"medium\", \"long\" or \"default\"."
            ))),
        }
    }

    fn date_pattern(self) -> &'static str {
        match self {
            Style::Short => "%-m/%-d/%y",
            Style::Medium => "%b %-d, %Y",
            Style::Long => "%B %-d, %Y",
        }
    }

    fn time_pattern(self) -> &'static str {
        match self {
            Style::Short => "%-I:%M %p",
            Style::Medium => "%-I:%M:%S %p",
            Style::Long => "%-I:%M:%S %p %Z",
        }
    }
}

/// The options of one `now` call.
#[derive(Clone, Default, Debug)]
pub(crate) struct NowFormat {
    pub pattern: Option<String>,
    pub date: Option<Style>,
    pub time: Option<Style>,
    /// `None` is the local zone.
    pub zone: Option<FixedOffset>,
}

impl NowFormat {
    fn set_option(&mut self, name: &str, value: &Value) -> Result<(), LoaderError> {
        match name {
            "pattern" => self.pattern = Some(string_option(name, value)?.to_owned()),
            "date" => self.date = Some(Style::parse(name, string_option(name, value)?)?),
            "time" => self.time = Some(Style::parse(name, string_option(name, value)?)?),
            "zone" => self.zone = Some(parse_zone(string_option(name, value)?)?),
            _ => return Err(unknown_option(name, "pattern, date, time, zone")),
        }
        Ok(())
    }

    /// The strftime pattern these options stand for.
    pub(crate) fn pattern(&self) -> Result<String, LoaderError> {
        if let Some(pattern) = &self.pattern {
            if self.date.is_some() || self.time.is_some() {
                return Err(LoaderError::arguments(
                    "The \"pattern\" option can't be used together with the \"date\" or \
                     \"time\" options.",
                ));
            }
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(LoaderError::arguments(format!(
                    "Invalid date-time pattern: {pattern:?}"
                )));
            }
            return Ok(pattern.clone());
        }
        Ok(match (self.date, self.time) {
            (None, None) => format!(
                "{} {}",
                Style::Short.date_pattern(),
                Style::Short.time_pattern()
            ),
            (Some(date), None) => date.date_pattern().to_owned(),
            (None, Some(time)) => time.time_pattern().to_owned(),
            (Some(date), Some(time)) => {
                format!("{} {}", date.date_pattern(), time.time_pattern())
            }
        })
    }
}

/// `UTC`, `GMT` or an offset such as `+02:00`.
fn parse_zone(zone: &str) -> Result<FixedOffset, LoaderError> {
    if zone.eq_ignore_ascii_case("utc") || zone.eq_ignore_ascii_case("gmt") {
        return Ok(Utc.fix());
    }
    FixedOffset::from_str(zone).map_err(|_| {
        LoaderError::arguments(format!(
            "Unknown time zone: {zone:?}. Use \"UTC\", \"GMT\" or an offset like \"+02:00\"."
        ))
    })
}

pub(crate) fn render(at: &DateTime<FixedOffset>, pattern: &str) -> String {
    at.format_with_items(StrftimeItems::new(pattern)).to_string()
}
