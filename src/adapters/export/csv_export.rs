//! Availability matrix as CSV (uses the `csv` crate for quoting) and ranked windows as JSON.

use crate::domain::dates::date_key;
use crate::domain::{ParticipantAvailability, ResponseLookup, WindowSummary};
use chrono::NaiveDate;

/// One row per participant, one column per date.
///
/// Format: `Name,<YYYY-MM-DD>...`; cells are `yes` / `maybe` / `no`, empty when unassessed.
pub fn matrix_to_csv(
    days: &[NaiveDate],
    participants: &[ParticipantAvailability],
) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    let mut header = Vec::with_capacity(days.len() + 1);
    header.push("Name".to_string());
    header.extend(days.iter().map(|d| date_key(*d)));
    wtr.write_record(&header)?;

    for p in participants {
        let mut row = Vec::with_capacity(days.len() + 1);
        row.push(p.participant.name.clone());
        row.extend(days.iter().map(|d| {
            p.status_on(*d)
                .map(|s| s.as_str().to_string())
                .unwrap_or_default()
        }));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    let bytes = wtr.into_inner().map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::Other,
            e.to_string(),
        ))
    })?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

/// Pretty-printed JSON array of ranked windows.
pub fn windows_to_json(windows: &[WindowSummary]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AvailabilityStatus, Participant};
    use chrono::Utc;
    use uuid::Uuid;

    fn snapshot(name: &str, answers: &[(NaiveDate, AvailabilityStatus)]) -> ParticipantAvailability {
        let now = Utc::now();
        let mut p = ParticipantAvailability::new(Participant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            submitted_at: now,
            last_updated: now,
        });
        p.responses.extend(answers.iter().copied());
        p
    }

    #[test]
    fn matrix_has_header_and_blank_unassessed_cells() {
        let d1 = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let rows = vec![
            snapshot("Ayana", &[(d1, AvailabilityStatus::Yes), (d2, AvailabilityStatus::Maybe)]),
            snapshot("Sam", &[(d2, AvailabilityStatus::No)]),
        ];

        let csv = matrix_to_csv(&[d1, d2], &rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Name,2026-03-06,2026-03-07");
        assert_eq!(lines[1], "Ayana,yes,maybe");
        assert_eq!(lines[2], "Sam,,no");
    }

    #[test]
    fn matrix_quotes_names_with_commas() {
        let d1 = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
        let rows = vec![snapshot("Johnson, Ayana", &[(d1, AvailabilityStatus::Yes)])];
        let csv = matrix_to_csv(&[d1], &rows).unwrap();
        assert!(csv.contains("\"Johnson, Ayana\",yes"));
    }

    #[test]
    fn windows_json_is_an_array() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
        let windows = vec![WindowSummary {
            start,
            end: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            yes_count: 1,
            maybe_count: 0,
            no_count: 1,
            score: 2.5,
        }];
        let json = windows_to_json(&windows).unwrap();
        let parsed: Vec<WindowSummary> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, windows);
        assert!(json.contains("\"start\": \"2026-03-06\""));
    }
}
