//! Flag-library integration
//!
//! [`FlagValue`] is the whole contract a flag parser needs from a value: set it
//! from text, render it back, and name its type. [`YmdValueParser`] adapts
//! [`YmdFlag`] to clap, so a field typed `YmdFlag` works with the derive API.

use std::ffi::OsStr;
use std::fmt;

use clap::builder::{TypedValueParser, ValueParserFactory};
use clap::{Arg, Command};

use crate::error::Result;
use crate::flag::YmdFlag;
use crate::location::Location;

/// A value that can be registered as a command-line flag
pub trait FlagValue: fmt::Display {
    /// Replace the value with one parsed from `value`
    fn set(&mut self, value: &str) -> Result<()>;

    /// Type tag for help output
    fn type_name(&self) -> &'static str;
}

impl FlagValue for YmdFlag {
    fn set(&mut self, value: &str) -> Result<()> {
        YmdFlag::set(self, value)
    }

    fn type_name(&self) -> &'static str {
        YmdFlag::TYPE_NAME
    }
}

/// clap value parser producing [`YmdFlag`]s
///
/// Parsed flags carry the parser's location, if it has one.
#[derive(Debug, Clone, Copy, Default)]
pub struct YmdValueParser {
    location: Option<Location>,
}

impl YmdValueParser {
    /// A parser whose flags carry no location
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser whose flags are bound to `location`
    pub fn with_location(location: Location) -> Self {
        Self {
            location: Some(location),
        }
    }
}

impl TypedValueParser for YmdValueParser {
    type Value = YmdFlag;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> std::result::Result<YmdFlag, clap::Error> {
        let text = value
            .to_str()
            .ok_or_else(|| clap::Error::new(clap::error::ErrorKind::InvalidUtf8).with_cmd(cmd))?;

        let mut flag = match self.location {
            Some(location) => YmdFlag::with_location(location),
            None => YmdFlag::default(),
        };
        flag.set(text).map_err(|err| {
            let arg = arg
                .map(|a| a.to_string())
                .unwrap_or_else(|| "...".to_string());
            clap::Error::raw(
                clap::error::ErrorKind::ValueValidation,
                format!("invalid value '{}' for '{}': {}\n", text, arg, err),
            )
            .with_cmd(cmd)
        })?;
        Ok(flag)
    }
}

impl ValueParserFactory for YmdFlag {
    type Parser = YmdValueParser;

    fn value_parser() -> Self::Parser {
        YmdValueParser::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn command(parser: YmdValueParser) -> Command {
        Command::new("test").arg(
            Arg::new("date")
                .long("date")
                .value_name("YYYYMMDD")
                .value_parser(parser),
        )
    }

    #[test]
    fn test_flag_value_contract() {
        let mut flag = YmdFlag::default();
        let value: &mut dyn FlagValue = &mut flag;
        assert_eq!(value.type_name(), "YMDFlag");
        assert_eq!(value.to_string(), "");

        value.set("20230704").unwrap();
        assert_eq!(value.to_string(), "20230704");

        assert!(value.set("July 4th").is_err());
        assert_eq!(value.to_string(), "20230704");
    }

    #[test]
    fn test_parse_valid() {
        let matches = command(YmdValueParser::new())
            .try_get_matches_from(["test", "--date", "20220102"])
            .unwrap();
        let flag = matches.get_one::<YmdFlag>("date").unwrap();
        assert_eq!(flag.ymd(), 20220102);
        assert_eq!(flag.location(), None);
    }

    #[test]
    fn test_parse_binds_location() {
        let tokyo = Location::Zone(Tz::Asia__Tokyo);
        let matches = command(YmdValueParser::with_location(tokyo))
            .try_get_matches_from(["test", "--date", "20220102"])
            .unwrap();
        let flag = matches.get_one::<YmdFlag>("date").unwrap();
        assert_eq!(flag.location(), Some(&tokyo));
        assert_eq!(flag.datetime_no_check().to_rfc3339(), "2022-01-02T00:00:00+09:00");
    }

    #[test]
    fn test_parse_empty_is_unset() {
        let matches = command(YmdValueParser::new())
            .try_get_matches_from(["test", "--date", ""])
            .unwrap();
        assert!(matches.get_one::<YmdFlag>("date").unwrap().is_unset());
    }

    #[test]
    fn test_parse_invalid() {
        let err = command(YmdValueParser::new())
            .try_get_matches_from(["test", "--date", "2022-01-02"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("YYYYMMDD"));

        let err = command(YmdValueParser::new())
            .try_get_matches_from(["test", "--date", "20230229"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("unnormalized"));
    }

    #[test]
    fn test_value_parser_factory() {
        let cmd = Command::new("test").arg(
            Arg::new("date")
                .long("date")
                .value_parser(clap::value_parser!(YmdFlag)),
        );
        let matches = cmd
            .try_get_matches_from(["test", "--date", "20240229"])
            .unwrap();
        assert_eq!(matches.get_one::<YmdFlag>("date").unwrap().ymd(), 20240229);
    }
}
