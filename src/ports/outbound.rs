//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters (SQLite, in-memory).

use crate::domain::{AvailabilityRecord, DomainError, Participant};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Participant storage.
#[async_trait::async_trait]
pub trait ParticipantPort: Send + Sync {
    /// Insert a new participant. Fails if the id already exists.
    async fn create_participant(&self, participant: &Participant) -> Result<(), DomainError>;

    /// Look up by id (the resume code). `None` when unknown.
    async fn find_participant(&self, id: Uuid) -> Result<Option<Participant>, DomainError>;

    /// All participants, ordered by name.
    async fn list_participants(&self) -> Result<Vec<Participant>, DomainError>;

    /// Bump `last_updated` after a successful submit.
    async fn touch_participant(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError>;
}

/// Availability storage. One row per (participant, date).
#[async_trait::async_trait]
pub trait AvailabilityPort: Send + Sync {
    /// All rows for one participant, ordered by date.
    async fn availability_for(
        &self,
        participant_id: Uuid,
    ) -> Result<Vec<AvailabilityRecord>, DomainError>;

    /// Every row for every participant.
    async fn list_availability(&self) -> Result<Vec<AvailabilityRecord>, DomainError>;

    /// Drop all of the participant's rows and insert `records` in one step.
    /// Records whose `participant_id` differs are rejected.
    async fn replace_availability(
        &self,
        participant_id: Uuid,
        records: &[AvailabilityRecord],
    ) -> Result<(), DomainError>;
}
