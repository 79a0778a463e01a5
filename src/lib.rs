//! YMD Flag Library
//!
//! `YYYYMMDD` dates as typed command-line flag values.
//! This library provides:
//! - Strict validation and parsing of 8-digit dates
//! - A `YmdFlag` value whose zero state means "today, when asked"
//! - Time zone aware defaulting with an injectable clock
//! - A clap value parser so `YmdFlag` fields work with `#[derive(Parser)]`
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use ymdflag::YmdFlag;
//!
//! #[derive(Parser)]
//! struct Args {
//!     /// YYYYMMDD date; defaults to today in local time
//!     #[arg(long, default_value = "")]
//!     date: YmdFlag,
//! }
//!
//! let mut args = Args::parse();
//! println!("date: {}", args.date.as_datetime());
//! ```

pub mod clock;
pub mod error;
pub mod flag;
pub mod location;
pub mod value;
pub mod ymd;

// Re-export commonly used items
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, ErrorKind, Result};
pub use flag::YmdFlag;
pub use location::Location;
pub use value::{FlagValue, YmdValueParser};
