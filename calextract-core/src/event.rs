//! Normalized event model.
//!
//! Calendar sources convert whatever they read into these types, and the
//! encoders in [`crate::export`] work exclusively with them.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

/// A calendar event for one export batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Stable identifier from the source store (`UID`)
    pub id: String,
    /// May be empty, but is always exported
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub location: Option<String>,
    pub notes: Option<String>,
    /// Creation timestamp (`DTSTAMP` in ICS output)
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp (`LAST-MODIFIED`)
    pub last_modified_at: Option<DateTime<Utc>>,
    /// Name of the calendar the event belongs to
    pub calendar_name: String,
}

impl Event {
    /// Whether the event overlaps the closed interval `[from, to]`.
    ///
    /// The event's end is exclusive; a zero-length event counts when its
    /// start falls inside the interval.
    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.start <= to && (self.end > from || self.start >= from)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.calendar_name)
    }
}

/// The zone events are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// The system's local zone
    #[default]
    Local,
    /// An IANA zone from the tz database
    Named(Tz),
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

impl Zone {
    /// Convert an instant to wall-clock time in this zone.
    pub fn localize(&self, instant: &DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Zone::Local => instant.with_timezone(&Local).fixed_offset(),
            Zone::Named(tz) => instant.with_timezone(tz).fixed_offset(),
            Zone::Fixed(offset) => instant.with_timezone(offset),
        }
    }

    /// Interpret a wall-clock time in this zone as an instant.
    ///
    /// Ambiguous times resolve to the earlier instant; times inside a DST gap
    /// are moved forward by an hour.
    pub fn resolve(&self, naive: NaiveDateTime) -> DateTime<Utc> {
        match self {
            Zone::Local => resolve_in(&Local, naive),
            Zone::Named(tz) => resolve_in(tz, naive),
            Zone::Fixed(offset) => resolve_in(offset, naive),
        }
    }

    /// Local midnight at the start of `date`.
    pub fn midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        self.resolve(date.and_time(chrono::NaiveTime::MIN))
    }
}

fn resolve_in<T: TimeZone>(tz: &T, naive: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adelaide_summer() -> Zone {
        Zone::Fixed(FixedOffset::east_opt(10 * 3600 + 1800).unwrap())
    }

    #[test]
    fn test_localize_fixed_offset() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 19, 22, 30, 0).unwrap();
        let local = adelaide_summer().localize(&instant);
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2025-03-20 09:00");
    }

    #[test]
    fn test_midnight_is_local() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        assert_eq!(
            adelaide_summer().midnight(date),
            Utc.with_ymd_and_hms(2025, 3, 19, 13, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_resolve_skips_dst_gap() {
        // Clocks in Adelaide jump from 02:00 to 03:00 on 2025-10-05
        let zone = Zone::Named(chrono_tz::Australia::Adelaide);
        let gap = NaiveDate::from_ymd_opt(2025, 10, 5)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let resolved = zone.resolve(gap);
        assert_eq!(
            zone.localize(&resolved).format("%H:%M").to_string(),
            "03:30"
        );
    }

    #[test]
    fn test_overlaps() {
        let day_start = Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap();
        let day_end = Utc.with_ymd_and_hms(2025, 3, 20, 23, 59, 59).unwrap();
        let event = Event {
            id: "E1".to_string(),
            title: "Late".to_string(),
            start: Utc.with_ymd_and_hms(2025, 3, 19, 23, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 3, 20, 1, 0, 0).unwrap(),
            all_day: false,
            location: None,
            notes: None,
            created_at: None,
            last_modified_at: None,
            calendar_name: "Work".to_string(),
        };
        assert!(event.overlaps(day_start, day_end));

        let mut before = event.clone();
        before.end = Utc.with_ymd_and_hms(2025, 3, 19, 23, 30, 0).unwrap();
        assert!(!before.overlaps(day_start, day_end));

        let mut ends_at_midnight = event.clone();
        ends_at_midnight.end = day_start;
        assert!(!ends_at_midnight.overlaps(day_start, day_end));

        let mut instant = event.clone();
        instant.start = day_start;
        instant.end = day_start;
        assert!(instant.overlaps(day_start, day_end));
    }
}
