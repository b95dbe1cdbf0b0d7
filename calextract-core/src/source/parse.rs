//! ICS parsing using the icalendar crate's parser.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{CalExtractError, CalExtractResult};
use crate::event::{Event, Zone};

/// Parse every VEVENT in `content`. Floating times are read in `zone`.
pub fn parse_events(content: &str, calendar_name: &str, zone: &Zone) -> CalExtractResult<Vec<Event>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| CalExtractError::IcsParse(e.to_string()))?;

    Ok(calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(|vevent| parse_vevent(vevent, calendar_name, zone))
        .collect())
}

fn parse_vevent(vevent: &Component, calendar_name: &str, zone: &Zone) -> Option<Event> {
    let Some(uid) = vevent.find_prop("UID").map(|p| p.val.to_string()) else {
        tracing::warn!(calendar = calendar_name, "Skipping event without UID");
        return None;
    };

    let Some(start) = vevent
        .find_prop("DTSTART")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
    else {
        tracing::warn!(calendar = calendar_name, uid = %uid, "Skipping event without a valid DTSTART");
        return None;
    };
    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok());

    let (start, end, all_day) = match start {
        DatePerhapsTime::Date(start_date) => {
            let (start, end) = all_day_bounds(start_date, end, zone);
            (start, end, true)
        }
        DatePerhapsTime::DateTime(start) => {
            let start = to_instant(start, zone);
            let end = match end {
                Some(DatePerhapsTime::Date(d)) => zone.midnight(d),
                Some(DatePerhapsTime::DateTime(dt)) => to_instant(dt, zone),
                None => start,
            };
            (start, end, false)
        }
    };

    // TEXT values arrive already unescaped by the parser
    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_default();
    let location = vevent.find_prop("LOCATION").map(|p| p.val.to_string());
    let notes = vevent.find_prop("DESCRIPTION").map(|p| p.val.to_string());
    let created_at = vevent
        .find_prop("CREATED")
        .and_then(|p| parse_utc_stamp(p.val.as_ref()));
    let last_modified_at = vevent
        .find_prop("LAST-MODIFIED")
        .and_then(|p| parse_utc_stamp(p.val.as_ref()));

    Some(Event {
        id: uid,
        title,
        start,
        end,
        all_day,
        location,
        notes,
        created_at,
        last_modified_at,
        calendar_name: calendar_name.to_string(),
    })
}

/// An all-day event runs from local midnight of its first date to one second
/// before local midnight of its exclusive end date.
fn all_day_bounds(
    start_date: NaiveDate,
    end: Option<DatePerhapsTime>,
    zone: &Zone,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let end_date = match end {
        Some(DatePerhapsTime::Date(d)) if d > start_date => d,
        _ => start_date.succ_opt().unwrap_or(start_date),
    };

    (
        zone.midnight(start_date),
        zone.midnight(end_date) - TimeDelta::seconds(1),
    )
}

fn to_instant(dt: CalendarDateTime, zone: &Zone) -> DateTime<Utc> {
    match dt {
        CalendarDateTime::Utc(dt) => dt,
        CalendarDateTime::Floating(naive) => zone.resolve(naive),
        CalendarDateTime::WithTimezone { date_time, tzid } => match tzid.parse::<Tz>() {
            Ok(tz) => Zone::Named(tz).resolve(date_time),
            Err(_) => {
                tracing::debug!(tzid = %tzid, "Unknown TZID, reading time in export zone");
                zone.resolve(date_time)
            }
        },
    }
}

/// Parse `YYYYMMDDTHHMMSSZ`
fn parse_utc_stamp(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s.trim().trim_end_matches('Z'), "%Y%m%dT%H%M%S")
        .ok()
        .map(|dt| dt.and_utc())
}
