//! Core domain layer. No external I/O dependencies.
//!
//! Entities, date handling and the window scorer live here. Dependencies flow inward.

pub mod crew_titles;
pub mod dates;
pub mod entities;
pub mod errors;
pub mod scoring;

pub use dates::DateRange;
pub use entities::{
    AssessmentProgress, AvailabilityRecord, AvailabilityStatus, DateFilter, Participant,
    ParticipantAvailability, WindowSummary, sort_participants,
};
pub use errors::DomainError;
pub use scoring::{ResponseLookup, best_windows, rank_windows};
