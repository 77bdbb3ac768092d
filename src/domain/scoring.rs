//! Best-window scorer. Ranks every run of consecutive days by how many
//! participants can make it.
//!
//! Pure and total: no I/O, no shared state, same input -> same output.

use crate::domain::entities::{AvailabilityStatus, ParticipantAvailability, WindowSummary};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Length of a candidate trip window, in days.
pub const WINDOW_DAYS: usize = 4;
/// Number of windows surfaced to the admin.
pub const TOP_WINDOWS: usize = 5;

pub const YES_WEIGHT: f64 = 3.0;
pub const MAYBE_WEIGHT: f64 = 1.0;
/// Applied per explicit "no". Unassessed days are not penalized at all.
pub const NO_PENALTY: f64 = 0.5;

/// Anything that can answer "what did this participant say for `date`?".
/// `None` means unassessed.
pub trait ResponseLookup {
    fn status_on(&self, date: NaiveDate) -> Option<AvailabilityStatus>;
}

impl ResponseLookup for ParticipantAvailability {
    fn status_on(&self, date: NaiveDate) -> Option<AvailabilityStatus> {
        self.responses.get(&date).copied()
    }
}

impl ResponseLookup for BTreeMap<NaiveDate, AvailabilityStatus> {
    fn status_on(&self, date: NaiveDate) -> Option<AvailabilityStatus> {
        self.get(&date).copied()
    }
}

/// Per-window response counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub yes: u32,
    pub maybe: u32,
    pub no: u32,
}

impl Tally {
    pub fn record(&mut self, status: Option<AvailabilityStatus>) {
        match status {
            Some(AvailabilityStatus::Yes) => self.yes += 1,
            Some(AvailabilityStatus::Maybe) => self.maybe += 1,
            Some(AvailabilityStatus::No) => self.no += 1,
            None => {}
        }
    }

    pub fn score(&self) -> f64 {
        f64::from(self.yes) * YES_WEIGHT + f64::from(self.maybe) * MAYBE_WEIGHT
            - f64::from(self.no) * NO_PENALTY
    }
}

/// Top [`TOP_WINDOWS`] windows of [`WINDOW_DAYS`] days, best first.
pub fn best_windows<P: ResponseLookup>(dates: &[NaiveDate], participants: &[P]) -> Vec<WindowSummary> {
    rank_windows(dates, participants, WINDOW_DAYS, TOP_WINDOWS)
}

/// Score every `window_days`-long span of `dates` and return the best `limit`.
///
/// Sorting is stable, so equal scores keep chronological order.
pub fn rank_windows<P: ResponseLookup>(
    dates: &[NaiveDate],
    participants: &[P],
    window_days: usize,
    limit: usize,
) -> Vec<WindowSummary> {
    if window_days == 0 || dates.len() < window_days {
        return Vec::new();
    }

    let mut windows: Vec<WindowSummary> = dates
        .windows(window_days)
        .map(|span| score_window(span, participants))
        .collect();

    windows.sort_by(|a, b| b.score.total_cmp(&a.score));
    windows.truncate(limit);
    windows
}

/// Sum all participant-date pairs inside one span.
fn score_window<P: ResponseLookup>(span: &[NaiveDate], participants: &[P]) -> WindowSummary {
    let mut tally = Tally::default();
    for date in span {
        for p in participants {
            tally.record(p.status_on(*date));
        }
    }
    WindowSummary {
        start: span[0],
        end: span[span.len() - 1],
        yes_count: tally.yes,
        maybe_count: tally.maybe,
        no_count: tally.no,
        score: tally.score(),
    }
}
