//! Trend windows: the ordered calendar periods a chart covers.

use crate::model::PeriodLabel;

/// Default number of periods in a trend window.
pub const DEFAULT_WINDOW_LENGTH: usize = 12;

/// Where a window ends relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// Ends one period after the anchor, so the window includes one period
    /// with no data yet. Used by the rolling BMI comparison.
    FollowingAnchor,

    /// Ends at the anchor itself. Used by the health trend chart.
    EndingAtAnchor,
}

/// Build `length` consecutive periods, strictly ascending.
///
/// The last period is the anchor (`EndingAtAnchor`) or the period after it
/// (`FollowingAnchor`). Periods beyond the representable years are left out,
/// so a window at the very edge of the calendar comes back shorter.
pub fn build_window(anchor: PeriodLabel, length: usize, mode: WindowMode) -> Vec<PeriodLabel> {
    let end = match mode {
        WindowMode::FollowingAnchor => anchor.checked_shift(1).unwrap_or(anchor),
        WindowMode::EndingAtAnchor => anchor,
    };

    (0..length as i64)
        .rev()
        .filter_map(|back| end.checked_shift(-back))
        .collect()
}

/// Short month names for chart labels.
pub fn chart_labels(window: &[PeriodLabel]) -> Vec<String> {
    window.iter().map(|p| p.short_name().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    fn assert_strictly_ascending(window: &[PeriodLabel]) {
        for pair in window.windows(2) {
            assert!(pair[0] < pair[1], "{} should precede {}", pair[0], pair[1]);
            assert_eq!(pair[0].next(), pair[1]);
        }
    }

    #[test]
    fn test_ending_at_anchor() {
        let anchor = PeriodLabel::new(Month::March, 2024);
        let window = build_window(anchor, 12, WindowMode::EndingAtAnchor);

        assert_eq!(window.len(), 12);
        assert_eq!(window[0], PeriodLabel::new(Month::April, 2023));
        assert_eq!(window[11], anchor);
        assert_strictly_ascending(&window);

        // Year rolls between December and January
        let dec = window.iter().position(|p| p.month == Month::December).unwrap();
        assert_eq!(window[dec].year, 2023);
        assert_eq!(window[dec + 1], PeriodLabel::new(Month::January, 2024));
    }

    #[test]
    fn test_following_anchor() {
        let anchor = PeriodLabel::new(Month::December, 2024);
        let window = build_window(anchor, 12, WindowMode::FollowingAnchor);

        assert_eq!(window.len(), 12);
        assert_eq!(window[0], PeriodLabel::new(Month::February, 2024));
        assert_eq!(window[11], PeriodLabel::new(Month::January, 2025));
        assert!(window.contains(&anchor));
        assert_strictly_ascending(&window);
    }

    #[test]
    fn test_modes_differ_by_one_period() {
        let anchor = PeriodLabel::new(Month::June, 2024);
        let a = build_window(anchor, 6, WindowMode::FollowingAnchor);
        let b = build_window(anchor, 6, WindowMode::EndingAtAnchor);

        assert_eq!(&a[..5], &b[1..]);
        assert_eq!(a[5], PeriodLabel::new(Month::July, 2024));
    }

    #[test]
    fn test_long_window_spans_multiple_years() {
        let anchor = PeriodLabel::new(Month::January, 2024);
        let window = build_window(anchor, 30, WindowMode::EndingAtAnchor);

        assert_eq!(window[0], PeriodLabel::new(Month::August, 2021));
        assert_strictly_ascending(&window);
    }

    #[test]
    fn test_empty_and_single() {
        let anchor = PeriodLabel::new(Month::May, 2024);
        assert!(build_window(anchor, 0, WindowMode::EndingAtAnchor).is_empty());
        assert_eq!(build_window(anchor, 1, WindowMode::EndingAtAnchor), vec![anchor]);
        assert_eq!(
            build_window(anchor, 1, WindowMode::FollowingAnchor),
            vec![PeriodLabel::new(Month::June, 2024)]
        );
    }

    #[test]
    fn test_window_at_calendar_limits_stays_ascending() {
        let last = PeriodLabel::new(Month::December, i32::MAX);
        let window = build_window(last, 12, WindowMode::FollowingAnchor);
        assert_eq!(window.len(), 12);
        assert_eq!(window.last(), Some(&last));
        assert_strictly_ascending(&window);

        let first = PeriodLabel::new(Month::February, i32::MIN);
        let window = build_window(first, 12, WindowMode::EndingAtAnchor);
        assert_eq!(
            window,
            vec![PeriodLabel::new(Month::January, i32::MIN), first]
        );
    }

    #[test]
    fn test_chart_labels() {
        let window = build_window(
            PeriodLabel::new(Month::January, 2025),
            3,
            WindowMode::EndingAtAnchor,
        );
        assert_eq!(chart_labels(&window), vec!["Nov", "Dec", "Jan"]);
    }
}
