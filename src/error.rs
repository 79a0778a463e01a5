//! Error types for the ymdflag library

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the ymdflag library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Encoded value below zero
    #[error("yyyymmdd is negative: {0}")]
    Negative(i64),

    /// Encoded value wider than 8 digits
    #[error("yyyymmdd is more than 8 digits: {0}")]
    TooManyDigits(i64),

    /// Digits do not form a real calendar date
    #[error("yyyymmdd is bad or unnormalized: {0}")]
    InvalidDate(i64),

    /// Text is neither empty nor 8 ASCII digits
    #[error("expected string of format YYYYMMDD, got {0:?}")]
    Format(String),

    /// Text had the right shape but failed validation
    #[error("invalid date {input:?}: {source}")]
    Parse {
        input: String,
        #[source]
        source: Box<Error>,
    },

    /// Unknown time zone name
    #[error("unknown time zone {name:?}: {reason}")]
    Timezone { name: String, reason: String },

    /// A real date was required but the value is unset
    #[error("date is unset")]
    Unset,
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Negative or more than 8 digits
    Range,
    /// Not a real date under strict rules
    Calendar,
    /// Malformed text
    Format,
    /// Time zone lookup failed
    Timezone,
    /// No date present
    Unset,
}

impl Error {
    /// Classify this error. Parse errors report the kind of the validation
    /// failure they wrap.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Negative(_) | Error::TooManyDigits(_) => ErrorKind::Range,
            Error::InvalidDate(_) => ErrorKind::Calendar,
            Error::Format(_) => ErrorKind::Format,
            Error::Parse { source, .. } => source.kind(),
            Error::Timezone { .. } => ErrorKind::Timezone,
            Error::Unset => ErrorKind::Unset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(Error::Negative(-1).kind(), ErrorKind::Range);
        assert_eq!(Error::TooManyDigits(123456789).kind(), ErrorKind::Range);
        assert_eq!(Error::InvalidDate(20221301).kind(), ErrorKind::Calendar);
        assert_eq!(Error::Format("x".to_string()).kind(), ErrorKind::Format);
        let err = Error::Timezone {
            name: "Mars/Olympus".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Timezone);
        assert_eq!(Error::Unset.kind(), ErrorKind::Unset);
    }

    #[test]
    fn test_parse_kind_follows_source() {
        let err = Error::Parse {
            input: "20230229".to_string(),
            source: Box::new(Error::InvalidDate(20230229)),
        };
        assert_eq!(err.kind(), ErrorKind::Calendar);
        assert!(err.to_string().contains("20230229"));
        assert!(err.to_string().contains("unnormalized"));
    }
}
