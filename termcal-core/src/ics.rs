//! ICS serialization of materialized events.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike};

use crate::materialize::Event;

/// Serialize the event set into a VCALENDAR document.
///
/// DTSTART/DTEND are written as floating local timestamps (no Z suffix,
/// no TZID), preserving the wall-clock semantics of the events. Output
/// order follows materialization order.
pub fn build_calendar(events: &[Event], generated_at: DateTime<Utc>) -> String {
    let mut cal = Calendar::new();
    let dtstamp = generated_at.format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.uid);
        ics_event.summary(&event.name);

        // DTSTAMP - required by RFC 5545
        ics_event.add_property("DTSTAMP", &dtstamp);

        // Floating datetimes (no Z, no TZID)
        ics_event.add_property("DTSTART", event.start.format("%Y%m%dT%H%M%S").to_string());
        ics_event.add_property("DTEND", event.end.format("%Y%m%dT%H%M%S").to_string());

        cal.push(ics_event.done());
    }

    strip_ics_bloat(&cal.done().to_string())
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with TERMCAL (we post-process the output)
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:TERMCAL\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn make_test_event() -> Event {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        Event {
            name: "Mathematics".to_string(),
            start: date.and_hms_opt(8, 0, 0).unwrap(),
            end: date.and_hms_opt(8, 45, 0).unwrap(),
            uid: "2025-03-03-1-math@yearcakes.timetable.school.ics".to_string(),
        }
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_build_calendar_emits_floating_times() {
        let ics = build_calendar(&[make_test_event()], generated_at());

        assert!(
            ics.contains("DTSTART:20250303T080000\r\n"),
            "DTSTART must have no Z suffix. ICS:\n{ics}"
        );
        assert!(
            ics.contains("DTEND:20250303T084500\r\n"),
            "DTEND must have no Z suffix. ICS:\n{ics}"
        );
    }

    #[test]
    fn test_build_calendar_keeps_uid_and_summary() {
        let ics = build_calendar(&[make_test_event()], generated_at());
        assert!(ics.contains("UID:2025-03-03-1-math@yearcakes.timetable.school.ics"));
        assert!(ics.contains("SUMMARY:Mathematics"));
        assert!(ics.contains("DTSTAMP:20250301T120000Z"));
    }

    #[test]
    fn test_build_calendar_strips_bloat() {
        let ics = build_calendar(&[make_test_event()], generated_at());
        assert!(ics.contains("PRODID:TERMCAL"), "PRODID should be replaced");
        assert!(!ics.contains("CALSCALE"), "CALSCALE:GREGORIAN should be removed");
    }

    #[test]
    fn test_build_calendar_one_vevent_per_event() {
        let mut second = make_test_event();
        second.uid = "2025-03-03-2-math@yearcakes.timetable.school.ics".to_string();

        let ics = build_calendar(&[make_test_event(), second], generated_at());
        let vevents = ics.matches("BEGIN:VEVENT").count();
        assert_eq!(vevents, 2, "expected 2 VEVENTs. ICS:\n{ics}");
    }

    #[test]
    fn test_empty_event_set_still_yields_a_calendar() {
        let ics = build_calendar(&[], generated_at());
        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.contains("END:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }
}
