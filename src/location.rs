//! Time zone handles
//!
//! A [`Location`] says which zone "today" and "midnight" are computed in.
//! Named zones are `Copy` handles into the compiled-in `chrono-tz` table, so
//! flags holding one never copy zone data.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::clock::Clock;
use crate::error::{Error, Result};

/// Where a date is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Location {
    /// The process time zone
    #[default]
    Local,
    /// A named IANA zone
    Zone(Tz),
}

impl Location {
    /// Coordinated Universal Time
    pub const UTC: Location = Location::Zone(Tz::UTC);

    /// Look up a location by name.
    ///
    /// - `""` and `"UTC"` → UTC
    /// - `"Local"` → the process time zone
    /// - anything else → the IANA zone of that name, e.g. `"Antarctica/Syowa"`
    pub fn load(name: &str) -> Result<Location> {
        match name {
            "" | "UTC" => Ok(Location::UTC),
            "Local" => Ok(Location::Local),
            _ => name
                .parse::<Tz>()
                .map(Location::Zone)
                .map_err(|err| Error::Timezone {
                    name: name.to_string(),
                    reason: err.to_string(),
                }),
        }
    }

    /// The location's name as accepted by [`Location::load`]
    pub fn name(&self) -> &'static str {
        match self {
            Location::Local => "Local",
            Location::Zone(tz) => tz.name(),
        }
    }

    /// Today's date at the clock's current instant, as seen in this location
    pub fn today(&self, clock: &dyn Clock) -> NaiveDate {
        let now = clock.now();
        match self {
            Location::Local => now.with_timezone(&Local).date_naive(),
            Location::Zone(tz) => now.with_timezone(tz).date_naive(),
        }
    }

    /// Midnight at the start of `date` in this location
    pub fn midnight(&self, date: NaiveDate) -> DateTime<FixedOffset> {
        match self {
            Location::Local => midnight_in(&Local, date),
            Location::Zone(tz) => midnight_in(tz, date),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Location::load(s)
    }
}

impl From<Tz> for Location {
    fn from(tz: Tz) -> Self {
        Location::Zone(tz)
    }
}

/// Start of `date` in `zone`.
///
/// An ambiguous midnight resolves to the earlier instant. A midnight skipped by
/// a DST jump resolves to the first wall time after the gap.
fn midnight_in<Z: TimeZone>(zone: &Z, date: NaiveDate) -> DateTime<FixedOffset> {
    let naive = date.and_time(NaiveTime::MIN);
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.fixed_offset(),
        LocalResult::Ambiguous(earliest, _) => earliest.fixed_offset(),
        LocalResult::None => {
            // offset a day earlier is the one in force before the gap
            let before = zone
                .offset_from_utc_datetime(&(naive - Duration::days(1)))
                .fix();
            let gap_start = naive - Duration::seconds(i64::from(before.local_minus_utc()));
            zone.from_utc_datetime(&gap_start).fixed_offset()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Datelike, Timelike, Utc};

    #[test]
    fn test_load_names() {
        assert_eq!(Location::load("").unwrap(), Location::UTC);
        assert_eq!(Location::load("UTC").unwrap(), Location::UTC);
        assert_eq!(Location::load("Local").unwrap(), Location::Local);
        assert_eq!(
            Location::load("Asia/Tokyo").unwrap(),
            Location::Zone(Tz::Asia__Tokyo)
        );
        assert!(Location::load("Antarctica/Syowa").is_ok());
    }

    #[test]
    fn test_load_unknown() {
        let err = Location::load("Mars/Olympus_Mons").unwrap_err();
        match &err {
            Error::Timezone { name, reason } => {
                assert_eq!(name, "Mars/Olympus_Mons");
                assert!(!reason.is_empty(), "lookup failure reason should be kept");
            }
            other => panic!("Expected Timezone error, got {:?}", other),
        }
        assert!(err.to_string().contains("Mars/Olympus_Mons"));
    }

    #[test]
    fn test_display_round_trips() {
        for name in ["Local", "UTC", "America/New_York", "Asia/Tokyo"] {
            let location: Location = name.parse().unwrap();
            assert_eq!(location.to_string(), name);
        }
    }

    #[test]
    fn test_today_depends_on_zone() {
        // 2023-07-04 23:30 UTC is already July 5th in Tokyo
        let clock = FixedClock(Utc.with_ymd_and_hms(2023, 7, 4, 23, 30, 0).unwrap());

        let utc = Location::UTC.today(&clock);
        assert_eq!(utc, NaiveDate::from_ymd_opt(2023, 7, 4).unwrap());

        let tokyo = Location::Zone(Tz::Asia__Tokyo).today(&clock);
        assert_eq!(tokyo, NaiveDate::from_ymd_opt(2023, 7, 5).unwrap());

        let honolulu = Location::Zone(Tz::Pacific__Honolulu).today(&clock);
        assert_eq!(honolulu, NaiveDate::from_ymd_opt(2023, 7, 4).unwrap());
    }

    #[test]
    fn test_midnight() {
        let date = NaiveDate::from_ymd_opt(2022, 1, 2).unwrap();

        let utc = Location::UTC.midnight(date);
        assert_eq!(utc.to_rfc3339(), "2022-01-02T00:00:00+00:00");

        let new_york = Location::Zone(Tz::America__New_York).midnight(date);
        assert_eq!(new_york.to_rfc3339(), "2022-01-02T00:00:00-05:00");

        let local = Location::Local.midnight(date);
        assert_eq!(local.date_naive(), date);
        assert_eq!(local.hour(), 0);
    }

    #[test]
    fn test_midnight_in_dst_gap() {
        // Chile sprang forward at 00:00 on 2022-09-11
        let date = NaiveDate::from_ymd_opt(2022, 9, 11).unwrap();
        let santiago = Location::Zone(Tz::America__Santiago).midnight(date);

        assert_eq!(santiago.day(), 11);
        assert_eq!(santiago.hour(), 1);
        assert_eq!(santiago.offset().local_minus_utc(), -3 * 3600);
    }
}
