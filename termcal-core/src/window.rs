//! Effective date-range computation for one timetable configuration.
//!
//! Combines the configured validity window with the rolling visibility
//! policy (visible weeks anchored on Monday, visible days anchored on
//! today, OR semantics between the two) and the `ignore_past_days`
//! clamp.

use chrono::{Datelike, Duration, NaiveDate};

use crate::overrides::OverrideTable;
use crate::timetable::TimetableConfig;

/// Inclusive calendar-day range, iterable day by day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateSpan { start, end }
    }

    /// Walk every day in the span, inclusive on both ends.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), |d| d.succ_opt())
            .take_while(move |d| *d <= end)
    }
}

/// Compute the effective inclusive range to materialize for one
/// configuration, or `None` to skip it entirely.
pub fn effective_range(
    config: &TimetableConfig,
    today: NaiveDate,
    overrides: &OverrideTable,
) -> Option<DateSpan> {
    let current_week_monday =
        today - Duration::days(today.weekday().num_days_from_monday() as i64);

    let weeks_enabled = config.visible_weeks > 0;
    let days_enabled = config.visible_days > 0;

    // Both visibility policies disabled: nothing to materialize.
    if !weeks_enabled && !days_enabled {
        return None;
    }

    // visible_weeks = 1 is the current week only; the end lands on the
    // Sunday of the last visible week.
    let weeks_end = weeks_enabled
        .then(|| current_week_monday + Duration::days(config.visible_weeks * 7 - 1));
    // visible_days = 1 is today only.
    let days_end = days_enabled.then(|| today + Duration::days(config.visible_days - 1));

    // OR semantics between the two policies: the broader reach wins.
    let calculated_end = match (weeks_end, days_end) {
        (Some(weeks), Some(days)) => weeks.max(days),
        (Some(weeks), None) => weeks,
        (None, Some(days)) => days,
        (None, None) => return None,
    };

    let effective_end = config.end.min(calculated_end);

    let start_anchor = if weeks_enabled { current_week_monday } else { today };
    let mut effective_start = config.start.max(start_anchor);

    if config.ignore_past_days {
        effective_start = effective_start.max(today);
    }

    if effective_start > effective_end {
        // Escape hatch: an override keyed exactly on the configured
        // start date still fires as a degenerate single-day range.
        if overrides.contains(config.start) {
            return Some(DateSpan::new(config.start, config.start));
        }
        return None;
    }

    Some(DateSpan::new(effective_start, effective_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn config(
        start: NaiveDate,
        end: NaiveDate,
        visible_weeks: i64,
        visible_days: i64,
        ignore_past_days: bool,
    ) -> TimetableConfig {
        TimetableConfig {
            label: "test".to_string(),
            entries: Vec::new(),
            start,
            end,
            visible_weeks,
            visible_days,
            ignore_past_days,
        }
    }

    fn no_overrides() -> OverrideTable {
        OverrideTable::default()
    }

    // 2025-03-05 is a Wednesday; its week runs 2025-03-03 (Mon) to
    // 2025-03-09 (Sun).
    const TODAY: (i32, u32, u32) = (2025, 3, 5);

    fn today() -> NaiveDate {
        d(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test]
    fn test_two_visible_weeks_end_on_second_sunday() {
        let cfg = config(d(2025, 2, 20), d(2025, 7, 10), 2, 0, false);
        let span = effective_range(&cfg, today(), &no_overrides()).unwrap();
        assert_eq!(span.start, d(2025, 3, 3), "anchored on the current Monday");
        assert_eq!(span.end, d(2025, 3, 16), "Sunday of the second week");
    }

    #[test]
    fn test_weeks_end_clipped_to_configured_end() {
        let cfg = config(d(2025, 2, 20), d(2025, 3, 10), 2, 0, false);
        let span = effective_range(&cfg, today(), &no_overrides()).unwrap();
        assert_eq!(span.end, d(2025, 3, 10));
    }

    #[test]
    fn test_visible_days_anchor_on_today() {
        let cfg = config(d(2025, 2, 20), d(2025, 7, 10), 0, 5, false);
        let span = effective_range(&cfg, today(), &no_overrides()).unwrap();
        assert_eq!(span.start, today(), "days-only windows start today");
        assert_eq!(span.end, d(2025, 3, 9), "today + 4 more days");
    }

    #[test]
    fn test_single_visible_day_is_today_only() {
        let cfg = config(d(2025, 2, 20), d(2025, 7, 10), 0, 1, false);
        let span = effective_range(&cfg, today(), &no_overrides()).unwrap();
        assert_eq!(span, DateSpan::new(today(), today()));
    }

    #[test]
    fn test_or_semantics_pick_the_broader_end() {
        // 1 week ends 2025-03-09; 10 days end 2025-03-14
        let cfg = config(d(2025, 2, 20), d(2025, 7, 10), 1, 10, false);
        let span = effective_range(&cfg, today(), &no_overrides()).unwrap();
        assert_eq!(span.end, d(2025, 3, 14));
        assert_eq!(span.start, d(2025, 3, 3), "weeks keep the Monday anchor");
    }

    #[test]
    fn test_both_policies_disabled_skips_config() {
        let cfg = config(d(2025, 2, 20), d(2025, 7, 10), 0, 0, false);
        assert_eq!(effective_range(&cfg, today(), &no_overrides()), None);
    }

    #[test]
    fn test_configured_start_in_future_wins_over_anchor() {
        let cfg = config(d(2025, 3, 7), d(2025, 7, 10), 2, 0, false);
        let span = effective_range(&cfg, today(), &no_overrides()).unwrap();
        assert_eq!(span.start, d(2025, 3, 7));
    }

    #[test]
    fn test_ignore_past_days_clamps_start_to_today() {
        let cfg = config(d(2025, 2, 20), d(2025, 7, 10), 2, 0, true);
        let span = effective_range(&cfg, today(), &no_overrides()).unwrap();
        assert_eq!(span.start, today(), "no day before today may remain");
    }

    #[test]
    fn test_without_ignore_past_days_past_week_days_remain() {
        let cfg = config(d(2025, 2, 20), d(2025, 7, 10), 2, 0, false);
        let span = effective_range(&cfg, today(), &no_overrides()).unwrap();
        assert!(span.start < today());
    }

    #[test]
    fn test_config_fully_in_the_past_is_skipped() {
        let cfg = config(d(2025, 1, 6), d(2025, 1, 31), 2, 0, false);
        assert_eq!(effective_range(&cfg, today(), &no_overrides()), None);
    }

    #[test]
    fn test_config_beyond_visible_window_is_skipped() {
        let cfg = config(d(2025, 6, 1), d(2025, 7, 10), 2, 0, false);
        assert_eq!(effective_range(&cfg, today(), &no_overrides()), None);
    }

    #[test]
    fn test_override_on_configured_start_forces_single_day_range() {
        let cfg = config(d(2025, 1, 6), d(2025, 1, 31), 2, 0, false);
        let mut diag = Diagnostics::new();
        let overrides = OverrideTable::from_value(
            json!({"2025-01-06": [{"period": "1", "subject": "math"}]}),
            &mut diag,
        )
        .unwrap();

        let span = effective_range(&cfg, today(), &overrides).unwrap();
        assert_eq!(span, DateSpan::new(d(2025, 1, 6), d(2025, 1, 6)));
    }

    #[test]
    fn test_override_elsewhere_in_past_range_does_not_force_it() {
        let cfg = config(d(2025, 1, 6), d(2025, 1, 31), 2, 0, false);
        let mut diag = Diagnostics::new();
        let overrides = OverrideTable::from_value(
            json!({"2025-01-07": [{"period": "1", "subject": "math"}]}),
            &mut diag,
        )
        .unwrap();
        assert_eq!(effective_range(&cfg, today(), &overrides), None);
    }

    #[test]
    fn test_date_span_walks_every_day_inclusive() {
        let span = DateSpan::new(d(2025, 3, 3), d(2025, 3, 6));
        let days: Vec<NaiveDate> = span.days().collect();
        assert_eq!(
            days,
            vec![d(2025, 3, 3), d(2025, 3, 4), d(2025, 3, 5), d(2025, 3, 6)]
        );
    }
}
