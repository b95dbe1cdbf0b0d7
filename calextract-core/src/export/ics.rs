//! iCalendar (RFC 5545) output.
//!
//! Properties are written in a fixed order so that exports of the same batch
//! diff cleanly. TEXT values are escaped and long content lines are folded.

use chrono::TimeDelta;

use super::{AllDayEnd, Encoder, ExportContext};
use crate::datetime::{date_only, local_date_time, utc_stamp};
use crate::error::CalExtractResult;
use crate::event::Event;

/// Maximum content line length in octets, excluding the CRLF.
const MAX_LINE_OCTETS: usize = 75;

pub struct IcsEncoder;

impl Encoder for IcsEncoder {
    fn encode(&self, events: &[Event], ctx: &ExportContext) -> CalExtractResult<String> {
        let mut lines = ContentLines::default();

        lines.push("BEGIN:VCALENDAR");
        lines.push("VERSION:2.0");

        for event in events {
            write_event(&mut lines, event, ctx);
        }

        lines.push("END:VCALENDAR");

        Ok(lines.finish())
    }
}

fn write_event(lines: &mut ContentLines, event: &Event, ctx: &ExportContext) {
    lines.push("BEGIN:VEVENT");

    if event.all_day {
        lines.property("DTSTART;VALUE=DATE", &date_only(&event.start, &ctx.zone));
        lines.property("DTEND;VALUE=DATE", &all_day_end(event, ctx));
    } else {
        let start = format!("DTSTART;TZID={}", ctx.tzid);
        let end = format!("DTEND;TZID={}", ctx.tzid);
        lines.property(&start, &local_date_time(&event.start, &ctx.zone));
        lines.property(&end, &local_date_time(&event.end, &ctx.zone));
    }

    // DTSTAMP is required; fall back to the export clock
    let stamp = event.created_at.unwrap_or(ctx.now);
    lines.property("DTSTAMP", &utc_stamp(&stamp));

    if let Some(modified) = event.last_modified_at {
        lines.property("LAST-MODIFIED", &utc_stamp(&modified));
    }

    lines.property("UID", &event.id);

    if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
        lines.property("LOCATION", &escape_text(location));
    }

    lines.property("SEQUENCE", "0");
    lines.property("SUMMARY", &escape_text(&event.title));

    if let Some(ref notes) = event.notes {
        lines.property("DESCRIPTION", &escape_text(notes));
    }

    lines.push("END:VEVENT");
}

/// Exclusive end date for an all-day event.
fn all_day_end(event: &Event, ctx: &ExportContext) -> String {
    match ctx.all_day_end {
        AllDayEnd::ExportClock => date_only(&(ctx.now + TimeDelta::hours(24)), &ctx.zone),
        AllDayEnd::EventStart => {
            let start_date = ctx.zone.localize(&event.start).date_naive();
            start_date
                .succ_opt()
                .unwrap_or(start_date)
                .format("%Y%m%d")
                .to_string()
        }
    }
}

/// Escape a TEXT value (RFC 5545 §3.3.11).
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    escaped.push_str("\\n");
                }
            }
            _ => escaped.push(c),
        }
    }

    escaped
}

/// CRLF-terminated content lines, folded at 75 octets.
#[derive(Default)]
struct ContentLines {
    buf: String,
}

impl ContentLines {
    fn property(&mut self, name: &str, value: &str) {
        self.push(&format!("{}:{}", name, value));
    }

    fn push(&mut self, line: &str) {
        let mut remaining = line;
        let mut limit = MAX_LINE_OCTETS;

        while remaining.len() > limit {
            let mut cut = limit;
            while !remaining.is_char_boundary(cut) {
                cut -= 1;
            }
            self.buf.push_str(&remaining[..cut]);
            self.buf.push_str("\r\n ");
            remaining = &remaining[cut..];
            // Continuation lines spend one octet on the leading space
            limit = MAX_LINE_OCTETS - 1;
        }

        self.buf.push_str(remaining);
        self.buf.push_str("\r\n");
    }

    fn finish(self) -> String {
        self.buf
    }
}
