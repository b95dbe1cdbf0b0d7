//! JSON array output.

use serde::Serialize;

use super::{Encoder, ExportContext};
use crate::datetime::iso_offset;
use crate::error::{CalExtractError, CalExtractResult};
use crate::event::Event;

/// Field order here is the key order in the output.
#[derive(Serialize)]
struct JsonEvent<'a> {
    eventid: &'a str,
    #[serde(rename = "allDay")]
    all_day: bool,
    #[serde(rename = "startDate")]
    start_date: String,
    #[serde(rename = "endDate")]
    end_date: String,
    title: String,
}

impl<'a> JsonEvent<'a> {
    fn new(event: &'a Event, ctx: &ExportContext) -> Self {
        JsonEvent {
            eventid: &event.id,
            all_day: event.all_day,
            start_date: iso_offset(&event.start, &ctx.zone),
            end_date: iso_offset(&event.end, &ctx.zone),
            // Single quotes are removed, not escaped
            title: event.title.replace('\'', ""),
        }
    }
}

pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn encode(&self, events: &[Event], ctx: &ExportContext) -> CalExtractResult<String> {
        let json_events: Vec<JsonEvent> = events.iter().map(|e| JsonEvent::new(e, ctx)).collect();

        serde_json::to_string(&json_events).map_err(|e| CalExtractError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::testing::{make_all_day_event, make_test_context, make_test_event};

    #[test]
    fn test_single_quotes_are_stripped() {
        let mut event = make_test_event();
        event.title = "O'Brien's meeting".to_string();
        let json = JsonEncoder.encode(&[event], &make_test_context()).unwrap();

        assert!(json.contains(r#""title":"OBriens meeting""#), "JSON: {}", json);
    }

    #[test]
    fn test_key_order_and_layout() {
        let json = JsonEncoder
            .encode(&[make_test_event()], &make_test_context())
            .unwrap();

        assert_eq!(
            json,
            r#"[{"eventid":"E1","allDay":false,"startDate":"2025-06-10T09:00:00+09:30","endDate":"2025-06-10T09:30:00+09:30","title":"Standup"}]"#
        );
    }

    #[test]
    fn test_double_quotes_and_control_characters_are_escaped() {
        let mut event = make_all_day_event();
        event.title = "Say \"hi\"\n\tnow".to_string();
        let json = JsonEncoder.encode(&[event], &make_test_context()).unwrap();

        assert!(json.contains(r#""title":"Say \"hi\"\n\tnow""#), "JSON: {}", json);

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["title"], "Say \"hi\"\n\tnow");
        assert_eq!(parsed[0]["allDay"], true);
    }
}
