//! In-process repository. Same semantics as SqliteRepo, nothing touches disk.
//!
//! Used by tests and when `storage = "memory"` is configured (data is lost on exit).

use crate::domain::{AvailabilityRecord, DomainError, Participant, sort_participants};
use crate::ports::{AvailabilityPort, ParticipantPort};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    participants: HashMap<Uuid, Participant>,
    availability: HashMap<Uuid, BTreeMap<NaiveDate, AvailabilityRecord>>,
}

#[derive(Debug, Default)]
pub struct MemoryRepo {
    tables: RwLock<Tables>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ParticipantPort for MemoryRepo {
    async fn create_participant(&self, participant: &Participant) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.participants.contains_key(&participant.id) {
            return Err(DomainError::Repo(format!(
                "participant {} already exists",
                participant.id
            )));
        }
        tables
            .participants
            .insert(participant.id, participant.clone());
        Ok(())
    }

    async fn find_participant(&self, id: Uuid) -> Result<Option<Participant>, DomainError> {
        Ok(self.tables.read().await.participants.get(&id).cloned())
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, DomainError> {
        let tables = self.tables.read().await;
        let mut participants: Vec<Participant> = tables.participants.values().cloned().collect();
        sort_participants(&mut participants);
        Ok(participants)
    }

    async fn touch_participant(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.participants.get_mut(&id) {
            Some(p) => {
                p.last_updated = at;
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("participant {}", id))),
        }
    }
}

#[async_trait::async_trait]
impl AvailabilityPort for MemoryRepo {
    async fn availability_for(
        &self,
        participant_id: Uuid,
    ) -> Result<Vec<AvailabilityRecord>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .availability
            .get(&participant_id)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn list_availability(&self) -> Result<Vec<AvailabilityRecord>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .availability
            .values()
            .flat_map(|rows| rows.values().cloned())
            .collect())
    }

    async fn replace_availability(
        &self,
        participant_id: Uuid,
        records: &[AvailabilityRecord],
    ) -> Result<(), DomainError> {
        if let Some(stray) = records.iter().find(|r| r.participant_id != participant_id) {
            return Err(DomainError::Validation(format!(
                "record for {} passed while replacing {}",
                stray.participant_id, participant_id
            )));
        }
        let rows: BTreeMap<NaiveDate, AvailabilityRecord> =
            records.iter().map(|r| (r.date, r.clone())).collect();
        self.tables
            .write()
            .await
            .availability
            .insert(participant_id, rows);
        info!(
            participant_id = %participant_id,
            count = records.len(),
            "availability replaced (memory)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AvailabilityStatus;

    fn participant(name: &str) -> Participant {
        let now = Utc::now();
        Participant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            submitted_at: now,
            last_updated: now,
        }
    }

    #[tokio::test]
    async fn participants_listed_by_name() {
        let repo = MemoryRepo::new();
        for name in ["zoe", "Adam", "maya"] {
            repo.create_participant(&participant(name)).await.unwrap();
        }
        let names: Vec<String> = repo
            .list_participants()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Adam", "maya", "zoe"]);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let repo = MemoryRepo::new();
        let p = participant("Ayana");
        repo.create_participant(&p).await.unwrap();
        assert!(repo.create_participant(&p).await.is_err());
    }

    #[tokio::test]
    async fn replace_drops_previous_rows() {
        let repo = MemoryRepo::new();
        let p = participant("Ayana");
        repo.create_participant(&p).await.unwrap();
        let d1 = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let rec = |date, status| AvailabilityRecord {
            participant_id: p.id,
            date,
            status,
        };

        repo.replace_availability(p.id, &[rec(d1, AvailabilityStatus::Yes), rec(d2, AvailabilityStatus::No)])
            .await
            .unwrap();
        repo.replace_availability(p.id, &[rec(d2, AvailabilityStatus::Maybe)])
            .await
            .unwrap();

        let rows = repo.availability_for(p.id).await.unwrap();
        assert_eq!(rows, vec![rec(d2, AvailabilityStatus::Maybe)]);
    }

    #[tokio::test]
    async fn replace_rejects_foreign_records() {
        let repo = MemoryRepo::new();
        let p = participant("Ayana");
        let other = AvailabilityRecord {
            participant_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
            status: AvailabilityStatus::Yes,
        };
        let err = repo.replace_availability(p.id, &[other]).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn touch_unknown_participant_is_not_found() {
        let repo = MemoryRepo::new();
        let err = repo
            .touch_participant(Uuid::new_v4(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
