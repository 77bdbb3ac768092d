//! Domain entities. Pure data structures for the core business.
//!
//! No storage/UI types here — adapters map rows and prompts into these.

use crate::domain::dates::{DateRange, date_key};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A person answering the availability form. `id` doubles as the resume code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub submitted_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Admin list order shared by every store: Unicode-lowercased name, then
/// signup time, then id so equal rows still come back in a fixed order.
pub fn sort_participants(participants: &mut [Participant]) {
    participants.sort_by_cached_key(|p| (p.name.to_lowercase(), p.submitted_at, p.id));
}

/// Answer for a single day. "Unassessed" is `Option::None`, never `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Yes,
    Maybe,
    No,
}

impl AvailabilityStatus {
    pub const ALL: [AvailabilityStatus; 3] = [Self::Yes, Self::Maybe, Self::No];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::Maybe => "maybe",
            Self::No => "no",
        }
    }

    /// One-character cell used by the admin matrix.
    pub fn symbol(self) -> char {
        match self {
            Self::Yes => 'Y',
            Self::Maybe => '~',
            Self::No => 'N',
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "maybe" => Ok(Self::Maybe),
            "no" => Ok(Self::No),
            other => Err(format!("unknown availability status '{}'", other)),
        }
    }
}

/// One stored row: (participant, date) -> status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub participant_id: Uuid,
    pub date: NaiveDate,
    pub status: AvailabilityStatus,
}

/// Read-only snapshot of a participant and all of their answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantAvailability {
    pub participant: Participant,
    pub responses: BTreeMap<NaiveDate, AvailabilityStatus>,
}

impl ParticipantAvailability {
    pub fn new(participant: Participant) -> Self {
        Self {
            participant,
            responses: BTreeMap::new(),
        }
    }

    /// Build from stored rows, keeping only those that belong to this participant.
    pub fn from_records(participant: Participant, records: &[AvailabilityRecord]) -> Self {
        let responses = records
            .iter()
            .filter(|r| r.participant_id == participant.id)
            .map(|r| (r.date, r.status))
            .collect();
        Self {
            participant,
            responses,
        }
    }

    pub fn to_records(&self) -> Vec<AvailabilityRecord> {
        self.responses
            .iter()
            .map(|(date, status)| AvailabilityRecord {
                participant_id: self.participant.id,
                date: *date,
                status: *status,
            })
            .collect()
    }
}

/// A ranked candidate window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    #[serde(with = "date_key_serde")]
    pub start: NaiveDate,
    #[serde(with = "date_key_serde")]
    pub end: NaiveDate,
    pub yes_count: u32,
    pub maybe_count: u32,
    pub no_count: u32,
    pub score: f64,
}

/// How far a participant got through the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentProgress {
    pub assessed: usize,
    pub total: usize,
}

impl AssessmentProgress {
    /// Counts only dates that fall inside `range`.
    pub fn of(responses: &BTreeMap<NaiveDate, AvailabilityStatus>, range: &DateRange) -> Self {
        let assessed = responses.keys().filter(|d| range.contains(**d)).count();
        Self {
            assessed,
            total: range.len(),
        }
    }

    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.assessed as f64 / self.total as f64) * 100.0).round() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.assessed == self.total
    }

    pub fn missing(&self) -> usize {
        self.total.saturating_sub(self.assessed)
    }
}

/// Which dates the picker walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    All,
    Available,
    Possible,
    Unassessed,
}

impl DateFilter {
    pub const ALL: [DateFilter; 4] = [Self::All, Self::Available, Self::Possible, Self::Unassessed];

    pub fn apply(
        self,
        days: &[NaiveDate],
        responses: &BTreeMap<NaiveDate, AvailabilityStatus>,
    ) -> Vec<NaiveDate> {
        days.iter()
            .copied()
            .filter(|d| {
                let status = responses.get(d).copied();
                match self {
                    Self::All => true,
                    Self::Available => status == Some(AvailabilityStatus::Yes),
                    Self::Possible => status == Some(AvailabilityStatus::Maybe),
                    Self::Unassessed => status.is_none(),
                }
            })
            .collect()
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::All => "All dates",
            Self::Available => "Dates marked yes",
            Self::Possible => "Dates marked maybe",
            Self::Unassessed => "Unanswered dates",
        };
        f.write_str(label)
    }
}

mod date_key_serde {
    use super::date_key;
    use crate::domain::dates::parse_date_key;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date_key(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse_date_key(&raw).map_err(serde::de::Error::custom)
    }
}
