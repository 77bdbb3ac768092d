//! Picker screen use case: load a participant's answers, validate, and save them.
//!
//! - Only dates inside the configured range are kept
//! - Submit requires an answer for every date in the range
//! - Saving replaces all previous answers (no merge), then bumps `last_updated`

use crate::domain::{
    AssessmentProgress, AvailabilityStatus, DateRange, DomainError, Participant,
    ParticipantAvailability,
};
use crate::ports::{AvailabilityPort, ParticipantPort};
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct AvailabilityService {
    participants: Arc<dyn ParticipantPort>,
    availability: Arc<dyn AvailabilityPort>,
    range: DateRange,
}

impl AvailabilityService {
    pub fn new(
        participants: Arc<dyn ParticipantPort>,
        availability: Arc<dyn AvailabilityPort>,
        range: DateRange,
    ) -> Self {
        Self {
            participants,
            availability,
            range,
        }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// Participant plus their stored answers, restricted to the range.
    pub async fn load_draft(&self, id: Uuid) -> Result<ParticipantAvailability, DomainError> {
        let participant = self.find(id).await?;
        let records = self.availability.availability_for(id).await?;
        let mut draft = ParticipantAvailability::from_records(participant, &records);
        draft.responses.retain(|date, _| self.range.contains(*date));
        Ok(draft)
    }

    pub fn progress(&self, draft: &ParticipantAvailability) -> AssessmentProgress {
        AssessmentProgress::of(&draft.responses, &self.range)
    }

    /// Validate and persist a full set of answers. Returns the updated participant.
    pub async fn submit(
        &self,
        id: Uuid,
        responses: &BTreeMap<NaiveDate, AvailabilityStatus>,
    ) -> Result<Participant, DomainError> {
        let mut participant = self.find(id).await?;

        let progress = AssessmentProgress::of(responses, &self.range);
        if !progress.is_complete() {
            warn!(
                participant_id = %id,
                missing = progress.missing(),
                "submit rejected: unanswered dates"
            );
            return Err(DomainError::Incomplete {
                missing: progress.missing(),
            });
        }

        let mut draft = ParticipantAvailability::new(participant.clone());
        draft.responses = responses
            .iter()
            .filter(|(date, _)| self.range.contains(**date))
            .map(|(date, status)| (*date, *status))
            .collect();
        self.availability
            .replace_availability(id, &draft.to_records())
            .await?;

        let now = Utc::now();
        self.participants.touch_participant(id, now).await?;
        participant.last_updated = now;

        info!(
            participant_id = %id,
            answers = draft.responses.len(),
            "availability submitted"
        );
        Ok(participant)
    }

    async fn find(&self, id: Uuid) -> Result<Participant, DomainError> {
        self.participants
            .find_participant(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("participant {}", id)))
    }
}
