//! Fixed date/time layouts used by the encoders.
//!
//! Every layout is zero-padded numerics only, so output never depends on the
//! process locale.

use chrono::{DateTime, Utc};

use crate::event::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `YYYYMMDD`, local
    DateOnly,
    /// `YYYYMMDDTHHmmss`, local wall clock (paired with a `TZID` label)
    LocalDateTime,
    /// `YYYYMMDDTHHmmssZ`, UTC
    UtcStamp,
    /// `YYYY-MM-DDTHH:mm:ss±HH:MM`, local
    IsoOffset,
}

impl Layout {
    fn pattern(self) -> &'static str {
        match self {
            Layout::DateOnly => "%Y%m%d",
            Layout::LocalDateTime => "%Y%m%dT%H%M%S",
            Layout::UtcStamp => "%Y%m%dT%H%M%SZ",
            Layout::IsoOffset => "%Y-%m-%dT%H:%M:%S%:z",
        }
    }
}

/// Render `instant` in `layout`; local layouts use `zone`.
pub fn format(instant: &DateTime<Utc>, layout: Layout, zone: &Zone) -> String {
    match layout {
        Layout::UtcStamp => instant.format(layout.pattern()).to_string(),
        _ => zone.localize(instant).format(layout.pattern()).to_string(),
    }
}

pub fn date_only(instant: &DateTime<Utc>, zone: &Zone) -> String {
    format(instant, Layout::DateOnly, zone)
}

pub fn local_date_time(instant: &DateTime<Utc>, zone: &Zone) -> String {
    format(instant, Layout::LocalDateTime, zone)
}

pub fn utc_stamp(instant: &DateTime<Utc>) -> String {
    format(instant, Layout::UtcStamp, &Zone::Local)
}

pub fn iso_offset(instant: &DateTime<Utc>, zone: &Zone) -> String {
    format(instant, Layout::IsoOffset, zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn zone() -> Zone {
        Zone::Fixed(FixedOffset::east_opt(9 * 3600 + 1800).unwrap())
    }

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 9, 23, 5, 7).unwrap()
    }

    #[test]
    fn test_local_layouts_use_zone() {
        assert_eq!(date_only(&instant(), &zone()), "20250610");
        assert_eq!(local_date_time(&instant(), &zone()), "20250610T083507");
        assert_eq!(iso_offset(&instant(), &zone()), "2025-06-10T08:35:07+09:30");
    }

    #[test]
    fn test_utc_stamp_ignores_zone() {
        assert_eq!(utc_stamp(&instant()), "20250609T230507Z");
        assert_eq!(format(&instant(), Layout::UtcStamp, &zone()), "20250609T230507Z");
    }

    #[test]
    fn test_negative_offset() {
        let zone = Zone::Fixed(FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(iso_offset(&instant(), &zone), "2025-06-09T18:05:07-05:00");
    }
}
