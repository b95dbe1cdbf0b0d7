//! Human-readable dump. Lossy, no escaping.

use super::{Encoder, ExportContext};
use crate::error::CalExtractResult;
use crate::event::Event;

const SEPARATOR: &str = "-------------";

pub struct TextEncoder;

impl Encoder for TextEncoder {
    fn encode(&self, events: &[Event], _ctx: &ExportContext) -> CalExtractResult<String> {
        let mut lines = vec![SEPARATOR.to_string()];

        for event in events {
            lines.push(format!("Title  {}", event.title));
            lines.push(format!("Start: {}", event.start));
            lines.push(format!("End: {}", event.end));
            lines.push(format!("All Day: {}", event.all_day));
            lines.push(format!("Calender: {}", event.calendar_name));
            lines.push(SEPARATOR.to_string());
        }

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::testing::{make_all_day_event, make_test_context, make_test_event};

    #[test]
    fn test_all_day_standup() {
        let output = TextEncoder
            .encode(&[make_all_day_event()], &make_test_context())
            .unwrap();

        assert!(output.contains("Title  Standup"), "Output:\n{}", output);
        assert!(output.contains("Calender: Work"), "Output:\n{}", output);
        assert!(output.contains("All Day: true"), "Output:\n{}", output);
    }

    #[test]
    fn test_record_layout() {
        let output = TextEncoder
            .encode(&[make_test_event()], &make_test_context())
            .unwrap();

        assert_eq!(
            output,
            "-------------\n\
             Title  Standup\n\
             Start: 2025-06-09 23:30:00 UTC\n\
             End: 2025-06-10 00:00:00 UTC\n\
             All Day: false\n\
             Calender: Work\n\
             -------------\n"
        );
    }

    #[test]
    fn test_empty_title_is_kept() {
        let mut event = make_test_event();
        event.title = String::new();
        let output = TextEncoder.encode(&[event], &make_test_context()).unwrap();
        assert!(output.lines().any(|l| l == "Title  "));
    }
}
