//! Admin dashboard use case. Aggregates every response and ranks trip windows.
//!
//! Orchestrates the flow:
//! 1. Check the admin password
//! 2. Load participants (by name) and all availability rows, join them
//! 3. Run the best-window scorer over the configured range
//! 4. Optionally write CSV / JSON / Markdown artifacts

use crate::adapters::export::{matrix_to_csv, windows_report, windows_to_json};
use crate::domain::{
    DateRange, DomainError, ParticipantAvailability, WindowSummary, best_windows,
};
use crate::ports::{AvailabilityPort, ParticipantPort};
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

/// Everything the dashboard screen renders.
#[derive(Debug, Clone)]
pub struct AdminDashboard {
    pub days: Vec<NaiveDate>,
    pub participants: Vec<ParticipantAvailability>,
    pub best_windows: Vec<WindowSummary>,
}

pub struct AdminService {
    participants: Arc<dyn ParticipantPort>,
    availability: Arc<dyn AvailabilityPort>,
    range: DateRange,
    admin_password: String,
    reports_dir: PathBuf,
}

impl AdminService {
    pub fn new(
        participants: Arc<dyn ParticipantPort>,
        availability: Arc<dyn AvailabilityPort>,
        range: DateRange,
        admin_password: String,
        reports_dir: PathBuf,
    ) -> Self {
        Self {
            participants,
            availability,
            range,
            admin_password,
            reports_dir,
        }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn authenticate(&self, password: &str) -> Result<(), DomainError> {
        if password == self.admin_password {
            info!("admin authenticated");
            Ok(())
        } else {
            warn!("admin login rejected");
            Err(DomainError::Auth("Incorrect password".into()))
        }
    }

    /// Participants ordered by name, each joined with their own rows.
    pub async fn snapshot(&self) -> Result<Vec<ParticipantAvailability>, DomainError> {
        let participants = self.participants.list_participants().await?;
        let records = self.availability.list_availability().await?;
        Ok(participants
            .into_iter()
            .map(|p| ParticipantAvailability::from_records(p, &records))
            .collect())
    }

    pub async fn dashboard(&self) -> Result<AdminDashboard, DomainError> {
        let participants = self.snapshot().await?;
        let days = self.range.days();
        let windows = best_windows(&days, &participants);
        info!(
            participants = participants.len(),
            windows = windows.len(),
            "dashboard computed"
        );
        Ok(AdminDashboard {
            days,
            participants,
            best_windows: windows,
        })
    }

    /// Write the availability matrix to `<reports_dir>/availability_<ts>.csv`.
    pub async fn export_matrix_csv(&self) -> Result<PathBuf, DomainError> {
        let dashboard = self.dashboard().await?;
        let csv = matrix_to_csv(&dashboard.days, &dashboard.participants)
            .map_err(|e| DomainError::Export(format!("Failed to generate CSV: {}", e)))?;
        self.write_artifact("availability", "csv", csv).await
    }

    /// Write the ranked windows to `<reports_dir>/best_windows_<ts>.json`.
    pub async fn export_windows_json(&self) -> Result<PathBuf, DomainError> {
        let dashboard = self.dashboard().await?;
        let json = windows_to_json(&dashboard.best_windows)
            .map_err(|e| DomainError::Export(format!("Failed to serialize windows: {}", e)))?;
        self.write_artifact("best_windows", "json", json).await
    }

    /// Write a Markdown summary to `<reports_dir>/best_windows_<ts>.md`.
    pub async fn write_report(&self) -> Result<PathBuf, DomainError> {
        let dashboard = self.dashboard().await?;
        let md = windows_report(
            &self.range,
            dashboard.participants.len(),
            &dashboard.best_windows,
            Utc::now(),
        );
        self.write_artifact("best_windows", "md", md).await
    }

    async fn write_artifact(
        &self,
        stem: &str,
        extension: &str,
        contents: String,
    ) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| DomainError::Export(format!("Failed to create reports dir: {}", e)))?;

        let filename = format!(
            "{}_{}.{}",
            stem,
            Utc::now().format("%Y%m%d_%H%M%S%.3f"),
            extension
        );
        let path = self.reports_dir.join(filename);
        fs::write(&path, contents)
            .await
            .map_err(|e| DomainError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

        info!(path = %path.display(), "export written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryRepo;
    use crate::domain::AvailabilityStatus::{self, Maybe, No, Yes};
    use crate::usecases::{AvailabilityService, RegistrationService};
    use std::collections::BTreeMap;

    struct Fixture {
        registration: RegistrationService,
        availability: AvailabilityService,
        admin: AdminService,
        _reports: tempfile::TempDir,
    }

    fn fixture(start: &str, end: &str) -> Fixture {
        let repo = Arc::new(MemoryRepo::new());
        let range = DateRange::parse(start, end).unwrap();
        let reports = tempfile::tempdir().unwrap();
        Fixture {
            registration: RegistrationService::new(repo.clone()),
            availability: AvailabilityService::new(repo.clone(), repo.clone(), range),
            admin: AdminService::new(
                repo.clone(),
                repo,
                range,
                "letmein".into(),
                reports.path().join("out"),
            ),
            _reports: reports,
        }
    }

    async fn answer(f: &Fixture, name: &str, statuses: &[AvailabilityStatus]) {
        let p = f.registration.register(name).await.unwrap();
        let answers: BTreeMap<_, _> = f
            .availability
            .range()
            .days()
            .into_iter()
            .zip(statuses.iter().copied())
            .collect();
        f.availability.submit(p.id, &answers).await.unwrap();
    }

    #[test]
    fn password_check() {
        let f = fixture("2026-03-06", "2026-03-09");
        assert!(f.admin.authenticate("letmein").is_ok());
        assert!(matches!(
            f.admin.authenticate("admin"),
            Err(DomainError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn dashboard_matches_worked_example() {
        let f = fixture("2026-03-06", "2026-03-09");
        answer(&f, "A", &[Yes, Yes, Yes, Yes]).await;
        answer(&f, "B", &[No, No, Maybe, Maybe]).await;

        let dash = f.admin.dashboard().await.unwrap();
        assert_eq!(dash.days.len(), 4);
        assert_eq!(dash.participants.len(), 2);
        assert_eq!(dash.best_windows.len(), 1);
        let w = &dash.best_windows[0];
        assert_eq!((w.yes_count, w.maybe_count, w.no_count), (4, 2, 2));
        assert_eq!(w.score, 13.0);
    }

    #[tokio::test]
    async fn registered_but_unsubmitted_participants_count_as_unassessed() {
        let f = fixture("2026-03-06", "2026-03-10");
        f.registration.register("Lurker").await.unwrap();

        let dash = f.admin.dashboard().await.unwrap();
        assert_eq!(dash.participants.len(), 1);
        assert!(dash.participants[0].responses.is_empty());
        assert_eq!(dash.best_windows.len(), 2);
        assert!(dash.best_windows.iter().all(|w| w.score == 0.0));
        assert!(dash.best_windows[0].start < dash.best_windows[1].start);
    }

    #[tokio::test]
    async fn snapshot_is_ordered_by_name() {
        let f = fixture("2026-03-06", "2026-03-09");
        answer(&f, "zed", &[Yes; 4]).await;
        answer(&f, "Amy", &[No; 4]).await;

        let names: Vec<String> = f
            .admin
            .snapshot()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.participant.name)
            .collect();
        assert_eq!(names, vec!["Amy", "zed"]);
    }

    #[tokio::test]
    async fn exports_are_written_to_reports_dir() {
        let f = fixture("2026-03-06", "2026-03-09");
        answer(&f, "Ayana", &[Yes, Maybe, No, Yes]).await;

        let name_of = |p: &PathBuf| p.file_name().unwrap().to_string_lossy().into_owned();

        // reports_dir does not exist yet; the first export creates it
        let csv_path = f.admin.export_matrix_csv().await.unwrap();
        assert_eq!(csv_path.parent(), Some(f.admin.reports_dir()));
        assert!(name_of(&csv_path).starts_with("availability_"));
        assert!(name_of(&csv_path).ends_with(".csv"));
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        assert!(csv.starts_with("Name,2026-03-06"));
        assert!(csv.contains("Ayana,yes,maybe,no,yes"));

        let json_path = f.admin.export_windows_json().await.unwrap();
        assert_eq!(json_path.parent(), Some(f.admin.reports_dir()));
        assert!(name_of(&json_path).starts_with("best_windows_"));
        assert!(name_of(&json_path).ends_with(".json"));
        let windows: Vec<WindowSummary> =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].score, 6.5);

        let md_path = f.admin.write_report().await.unwrap();
        assert!(md_path.starts_with(f.admin.reports_dir()));
        assert!(std::fs::read_to_string(md_path).unwrap().contains("6.5"));
    }
}
