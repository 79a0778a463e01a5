//! The `YmdFlag` value type
//!
//! A `YmdFlag` holds a `YYYYMMDD` date and an optional [`Location`]. Zero means
//! "unset": nothing was given on the command line, and the date should become
//! today when someone asks for it. That lazy step is explicit: the pure
//! accessors never read the clock, and the `resolve_*`/`as_*` methods do.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::location::Location;
use crate::ymd::{
    date_to_ymd, datetime_to_ymd, decompose, format_dir_path, format_ymd, parse_ymd,
    validate_ymd, ymd_to_date, ymd_to_datetime,
};

/// A `YYYYMMDD` date for command-line flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct YmdFlag {
    yyyymmdd: u32,
    location: Option<Location>,
}

impl YmdFlag {
    /// Type tag shown in help output
    pub const TYPE_NAME: &'static str = "YMDFlag";

    /// Create from a calendar date; `None` gives an unset flag.
    ///
    /// Fails only for years outside `0..=9999`.
    pub fn from_date(date: Option<NaiveDate>, location: Option<Location>) -> Result<Self> {
        let yyyymmdd = match date {
            Some(date) => date_to_ymd(date)?,
            None => 0,
        };
        Ok(Self { yyyymmdd, location })
    }

    /// Create from the date of `dt` in its own zone, bound to that zone
    pub fn from_datetime(dt: &DateTime<Tz>) -> Result<Self> {
        Ok(Self {
            yyyymmdd: datetime_to_ymd(dt)?,
            location: Some(Location::Zone(dt.timezone())),
        })
    }

    /// Create from an integer such as `20230704`. `0` is accepted as unset.
    pub fn from_int(yyyymmdd: i64, location: Option<Location>) -> Result<Self> {
        validate_ymd(yyyymmdd)?;
        Ok(Self {
            yyyymmdd: yyyymmdd as u32,
            location,
        })
    }

    /// An unset flag bound to `location`, ready to be filled by a parser
    pub fn with_location(location: Location) -> Self {
        Self {
            yyyymmdd: 0,
            location: Some(location),
        }
    }

    /// True when no date has been given or resolved. The location is ignored.
    pub fn is_unset(&self) -> bool {
        self.yyyymmdd == 0
    }

    /// The raw `YYYYMMDD` value, `0` when unset
    pub fn ymd(&self) -> u32 {
        self.yyyymmdd
    }

    /// `(year, month, day)`, all zero when unset
    pub fn year_month_day(&self) -> (i32, u32, u32) {
        decompose(self.yyyymmdd)
    }

    /// The bound location, `None` when "today" and midnight use the default
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Bind a location; affects later resolving and datetime conversion
    pub fn set_location(&mut self, location: Option<Location>) {
        self.location = location;
    }

    /// Parse `value` and store it. `""` makes the flag unset.
    ///
    /// The bound location is kept. On error the flag is left unchanged.
    pub fn set(&mut self, value: &str) -> Result<()> {
        self.yyyymmdd = parse_ymd(value)?;
        Ok(())
    }

    /// Forget the date so the next resolve reads the clock again
    pub fn reset(&mut self) {
        self.yyyymmdd = 0;
    }

    /// If unset, store today's date according to `clock`.
    ///
    /// "Today" is taken in the bound location, or in `default_location` when
    /// none is bound. A set flag is left alone. Fails, leaving the flag unset,
    /// when the clock's date has no 8-digit encoding.
    pub fn resolve_with(&mut self, clock: &dyn Clock, default_location: &Location) -> Result<()> {
        if self.yyyymmdd != 0 {
            return Ok(());
        }
        let location = self.location.unwrap_or(*default_location);
        self.store_today(clock, &location)
    }

    /// [`resolve_with`](Self::resolve_with) using the system clock, defaulting
    /// to process local time
    pub fn resolve_or_today(&mut self) {
        self.resolve_or_today_in(None);
    }

    /// Like [`resolve_or_today`](Self::resolve_or_today), but an explicit
    /// `location` wins over the bound one
    pub fn resolve_or_today_in(&mut self, location: Option<&Location>) {
        if self.yyyymmdd != 0 {
            return;
        }
        let location = location
            .or(self.location.as_ref())
            .copied()
            .unwrap_or_default();
        // the system clock stays within 0000..=9999
        if let Err(err) = self.store_today(&SystemClock, &location) {
            warn!(%location, %err, "system clock date cannot be encoded");
        }
    }

    fn store_today(&mut self, clock: &dyn Clock, location: &Location) -> Result<()> {
        let yyyymmdd = date_to_ymd(location.today(clock))?;
        debug!(%location, yyyymmdd, "resolved unset date to today");
        self.yyyymmdd = yyyymmdd;
        Ok(())
    }

    /// The `YYYYMMDD` value, resolving to today first
    pub fn as_ymd(&mut self) -> u32 {
        self.resolve_or_today();
        self.yyyymmdd
    }

    /// `"YYYYMMDD"`, or `""` when unset. Never resolves.
    pub fn ymd_string(&self) -> String {
        format_ymd(self.yyyymmdd)
    }

    /// Midnight of the date in the bound location, resolving to today first
    pub fn as_datetime(&mut self) -> DateTime<FixedOffset> {
        self.as_datetime_in(None)
    }

    /// Midnight of the date in `location`, resolving to today in that same
    /// location first. An explicit `location` wins over the bound one.
    pub fn as_datetime_in(&mut self, location: Option<&Location>) -> DateTime<FixedOffset> {
        self.resolve_or_today_in(location);
        self.datetime_in(location)
    }

    /// Midnight of the date in the bound location (local time if none).
    ///
    /// Never resolves. An unset flag gives the Unix epoch, so only call this
    /// on a flag known to be set.
    pub fn datetime_no_check(&self) -> DateTime<FixedOffset> {
        self.datetime_in(None)
    }

    /// Midnight of the date in `location`, falling back to the bound location
    /// and then local time. Never resolves; an unset flag gives the Unix epoch.
    pub fn datetime_in(&self, location: Option<&Location>) -> DateTime<FixedOffset> {
        ymd_to_datetime(self.yyyymmdd, location.or(self.location.as_ref()))
    }

    /// The calendar date, `None` when unset
    pub fn date(&self) -> Option<NaiveDate> {
        ymd_to_date(self.yyyymmdd)
    }

    /// The calendar date, or [`Error::Unset`]
    pub fn try_date(&self) -> Result<NaiveDate> {
        self.date().ok_or(Error::Unset)
    }

    /// `"YYYY{sep}MM{sep}DD"`, or `""` when unset. Never resolves.
    pub fn as_dir_path(&self, separator: char) -> String {
        format_dir_path(self.yyyymmdd, separator)
    }

    /// [`as_dir_path`](Self::as_dir_path) with the host path separator
    pub fn as_os_dir_path(&self) -> String {
        self.as_dir_path(std::path::MAIN_SEPARATOR)
    }
}

impl fmt::Display for YmdFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ymd_string())
    }
}

impl FromStr for YmdFlag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut flag = YmdFlag::default();
        flag.set(s)?;
        Ok(flag)
    }
}

impl TryFrom<i64> for YmdFlag {
    type Error = Error;

    fn try_from(yyyymmdd: i64) -> Result<Self> {
        YmdFlag::from_int(yyyymmdd, None)
    }
}
