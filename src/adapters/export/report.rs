//! Markdown report of the best windows, for sharing outside the terminal.

use crate::domain::DateRange;
use crate::domain::WindowSummary;
use crate::domain::dates::display_date;
use chrono::{DateTime, Utc};

pub fn windows_report(
    range: &DateRange,
    participant_count: usize,
    windows: &[WindowSummary],
    generated_at: DateTime<Utc>,
) -> String {
    let mut md = String::new();

    md.push_str("# Best Trip Windows\n\n");
    md.push_str(&format!(
        "**Range:** {} | **Responses:** {} | **Generated:** {}\n\n",
        range.describe(),
        participant_count,
        generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    md.push_str("---\n\n");

    if windows.is_empty() {
        md.push_str("_The range is too short for a full window._\n");
        return md;
    }

    md.push_str("| # | Window | Yes | Maybe | No | Score |\n");
    md.push_str("|---|---|---|---|---|---|\n");
    for (i, w) in windows.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} – {} | {} | {} | {} | {:.1} |\n",
            i + 1,
            display_date(w.start),
            display_date(w.end),
            w.yes_count,
            w.maybe_count,
            w.no_count,
            w.score
        ));
    }
    md.push('\n');
    md.push_str("Score = 3 × yes + 1 × maybe − 0.5 × no\n");
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn report_lists_windows_in_order() {
        let range = DateRange::default();
        let windows = vec![
            WindowSummary {
                start: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
                end: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
                yes_count: 7,
                maybe_count: 1,
                no_count: 0,
                score: 22.0,
            },
            WindowSummary {
                start: NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
                end: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
                yes_count: 2,
                maybe_count: 0,
                no_count: 3,
                score: 4.5,
            },
        ];
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 0).unwrap();

        let md = windows_report(&range, 2, &windows, at);
        assert!(md.contains("**Responses:** 2"));
        assert!(md.contains("2026-01-02 03:04 UTC"));
        assert!(md.contains("| 1 | Thursday, March 12 – Sunday, March 15 | 7 | 1 | 0 | 22.0 |"));
        assert!(md.contains("| 2 | Friday, March 6 – Monday, March 9 | 2 | 0 | 3 | 4.5 |"));
    }

    #[test]
    fn empty_report_says_so() {
        let range = DateRange::default();
        let md = windows_report(&range, 0, &[], Utc::now());
        assert!(md.contains("too short"));
    }
}
