//! Landing screen use case: create a participant from a name, or resume by code.

use crate::domain::{DomainError, Participant};
use crate::ports::ParticipantPort;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct RegistrationService {
    participants: Arc<dyn ParticipantPort>,
}

impl RegistrationService {
    pub fn new(participants: Arc<dyn ParticipantPort>) -> Self {
        Self { participants }
    }

    /// Create and persist a participant. The name is trimmed and must not be blank.
    pub async fn register(&self, name: &str) -> Result<Participant, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Please enter your name".into()));
        }

        let now = Utc::now();
        let participant = Participant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            submitted_at: now,
            last_updated: now,
        };
        self.participants.create_participant(&participant).await?;

        info!(participant_id = %participant.id, name = %participant.name, "participant registered");
        Ok(participant)
    }

    /// Look up a participant by the resume code shown on the confirmation screen.
    pub async fn resume(&self, code: &str) -> Result<Participant, DomainError> {
        let id = Uuid::parse_str(code.trim())
            .map_err(|_| DomainError::Validation(format!("'{}' is not a valid resume code", code.trim())))?;
        self.participants
            .find_participant(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("participant {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryRepo;

    fn service() -> RegistrationService {
        RegistrationService::new(Arc::new(MemoryRepo::new()))
    }

    #[tokio::test]
    async fn register_trims_name() {
        let svc = service();
        let p = svc.register("  Ayana Johnson \n").await.unwrap();
        assert_eq!(p.name, "Ayana Johnson");
        assert_eq!(p.submitted_at, p.last_updated);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let svc = service();
        let err = svc.register("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn resume_round_trips_the_code() {
        let svc = service();
        let p = svc.register("Sam").await.unwrap();
        let found = svc.resume(&format!(" {} ", p.id)).await.unwrap();
        assert_eq!(found, p);
    }

    #[tokio::test]
    async fn resume_errors() {
        let svc = service();
        assert!(matches!(
            svc.resume("not-a-code").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.resume(&Uuid::new_v4().to_string()).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_names_get_distinct_ids() {
        let svc = service();
        let a = svc.register("Sam").await.unwrap();
        let b = svc.register("Sam").await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
