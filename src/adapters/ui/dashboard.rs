//! Plain-text rendering for the picker header, confirmation and admin screens.
//!
//! Returns `String`s so the TUI stays a thin prompt loop and the layout is testable.

use crate::domain::dates::{display_date, short_label};
use crate::domain::{
    AssessmentProgress, DateRange, Participant, ParticipantAvailability, ResponseLookup,
    WindowSummary,
};
use chrono::NaiveDate;

pub const MATRIX_LEGEND: &str = "Y = yes   ~ = maybe   N = no   . = no answer";

const UNASSESSED_CELL: char = '.';

pub fn render_picker_header(
    participant: &Participant,
    crew_title: &str,
    progress: &AssessmentProgress,
    range: &DateRange,
) -> String {
    let status = if progress.is_complete() {
        "complete"
    } else {
        "in progress"
    };
    format!(
        "\n{} · {}\nDates: {}\nAnswered {} of {} ({}%, {})\n",
        participant.name,
        crew_title,
        range.describe(),
        progress.assessed,
        progress.total,
        progress.percent(),
        status
    )
}

pub fn render_confirmation(participant: &Participant) -> String {
    format!(
        "\nThank you, {}! Your availability has been saved.\n\
         To change your answers later, choose \"Edit availability\" and enter your resume code:\n\n    {}\n",
        participant.name, participant.id
    )
}

/// Ranked list, 1-based, score to one decimal.
pub fn render_windows(windows: &[WindowSummary]) -> String {
    if windows.is_empty() {
        return "No 4-day window fits in the date range.\n".to_string();
    }
    let mut out = String::new();
    for (i, w) in windows.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} – {}   yes {} · maybe {} · no {} · score {:.1}\n",
            i + 1,
            display_date(w.start),
            display_date(w.end),
            w.yes_count,
            w.maybe_count,
            w.no_count,
            w.score
        ));
    }
    out
}

/// Participant × date grid with a two-line header (weekday, month/day).
pub fn render_matrix(days: &[NaiveDate], participants: &[ParticipantAvailability]) -> String {
    const CELL: usize = 6;
    let name_width = participants
        .iter()
        .map(|p| p.participant.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = String::new();
    out.push_str(&format!("{:<name_width$}", ""));
    for d in days {
        out.push_str(&format!("{:>CELL$}", d.format("%a").to_string()));
    }
    out.push('\n');
    out.push_str(&format!("{:<name_width$}", "Name"));
    for d in days {
        let label = short_label(*d);
        let md = label.split(' ').nth(1).unwrap_or(&label).to_string();
        out.push_str(&format!("{:>CELL$}", md));
    }
    out.push('\n');

    for p in participants {
        out.push_str(&format!("{:<name_width$}", p.participant.name));
        for d in days {
            let cell = p.status_on(*d).map(|s| s.symbol()).unwrap_or(UNASSESSED_CELL);
            out.push_str(&format!("{:>CELL$}", cell));
        }
        out.push('\n');
    }
    if participants.is_empty() {
        out.push_str("(no responses yet)\n");
    }
    out
}

pub fn render_dashboard(
    range: &DateRange,
    days: &[NaiveDate],
    participants: &[ParticipantAvailability],
    windows: &[WindowSummary],
) -> String {
    format!(
        "\n== Admin dashboard ==\n{} participants · {}\n\nBest 4-day windows\n{}\nAvailability\n{}{}\n",
        participants.len(),
        range.describe(),
        render_windows(windows),
        render_matrix(days, participants),
        MATRIX_LEGEND
    )
}
