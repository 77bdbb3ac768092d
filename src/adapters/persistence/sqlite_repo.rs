//! SQLite-backed repository via libsql. Implements ParticipantPort and AvailabilityPort.
//!
//! Two tables in one database file (data/scheduler.db): `participants` and
//! `availability` keyed by (participant_id, date). Dates are stored as
//! `YYYY-MM-DD` keys and timestamps as RFC 3339 text.

use crate::domain::dates::{date_key, parse_date_key};
use crate::domain::{
    AvailabilityRecord, AvailabilityStatus, DomainError, Participant, sort_participants,
};
use crate::ports::{AvailabilityPort, ParticipantPort};
use chrono::{DateTime, Utc};
use libsql::{Connection, Database, Row, params};
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

pub const DB_FILE_NAME: &str = "scheduler.db";

const PARTICIPANTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS participants (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    submitted_at TEXT NOT NULL,
    last_updated TEXT NOT NULL
)"#;

const AVAILABILITY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS availability (
    participant_id TEXT NOT NULL,
    date TEXT NOT NULL,
    status TEXT NOT NULL CHECK (status IN ('yes', 'maybe', 'no')),
    updated_at TEXT NOT NULL,
    PRIMARY KEY (participant_id, date)
)"#;
const AVAILABILITY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_availability_date ON availability (date)";

fn db_err(e: impl Display) -> DomainError {
    DomainError::Repo(e.to_string())
}

/// SQLite repository. One database file in the given base directory.
pub struct SqliteRepo {
    db: Database,
}

impl SqliteRepo {
    /// Connect to (or create) the SQLite database and ensure the schema exists.
    /// Call this once at startup; the returned repo is safe to share via Arc.
    ///
    /// Sets WAL mode and synchronous=NORMAL.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(db_err)?;
        let db_path = base.join(DB_FILE_NAME);
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(db_err)?;
        let conn = db.connect().map_err(db_err)?;

        // PRAGMA returns a row (new value); use query and consume rows (execute fails when rows are returned).
        for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
            let mut rows = conn
                .query(pragma, ())
                .await
                .map_err(|e| DomainError::Repo(format!("{} failed: {}", pragma, e)))?;
            while rows.next().await.map_err(db_err)?.is_some() {}
        }

        conn.execute(PARTICIPANTS_TABLE, ()).await.map_err(db_err)?;
        conn.execute(AVAILABILITY_TABLE, ()).await.map_err(db_err)?;
        conn.execute(AVAILABILITY_INDEX, ()).await.map_err(db_err)?;

        info!(path = %db_path.display(), "SQLite connected with WAL mode");

        Ok(Self { db })
    }

    fn conn(&self) -> Result<Connection, DomainError> {
        self.db.connect().map_err(db_err)
    }

    fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| DomainError::Repo(format!("bad timestamp '{}': {}", raw, e)))
    }

    fn parse_uuid(raw: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(raw).map_err(|e| DomainError::Repo(format!("bad id '{}': {}", raw, e)))
    }

    fn row_to_participant(row: &Row) -> Result<Participant, DomainError> {
        let id: String = row.get(0).map_err(db_err)?;
        let name: String = row.get(1).map_err(db_err)?;
        let submitted_at: String = row.get(2).map_err(db_err)?;
        let last_updated: String = row.get(3).map_err(db_err)?;
        Ok(Participant {
            id: Self::parse_uuid(&id)?,
            name,
            submitted_at: Self::parse_timestamp(&submitted_at)?,
            last_updated: Self::parse_timestamp(&last_updated)?,
        })
    }

    fn row_to_record(row: &Row) -> Result<AvailabilityRecord, DomainError> {
        let participant_id: String = row.get(0).map_err(db_err)?;
        let date: String = row.get(1).map_err(db_err)?;
        let status: String = row.get(2).map_err(db_err)?;
        Ok(AvailabilityRecord {
            participant_id: Self::parse_uuid(&participant_id)?,
            date: parse_date_key(&date).map_err(db_err)?,
            status: status.parse::<AvailabilityStatus>().map_err(DomainError::Repo)?,
        })
    }

    async fn query_records(
        &self,
        sql: &str,
        participant_id: Option<Uuid>,
    ) -> Result<Vec<AvailabilityRecord>, DomainError> {
        let conn = self.conn()?;
        let mut rows = match participant_id {
            Some(id) => conn.query(sql, params![id.to_string()]).await,
            None => conn.query(sql, ()).await,
        }
        .map_err(db_err)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await.map_err(db_err)? {
            records.push(Self::row_to_record(&row)?);
        }
        Ok(records)
    }
}

#[async_trait::async_trait]
impl ParticipantPort for SqliteRepo {
    async fn create_participant(&self, participant: &Participant) -> Result<(), DomainError> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO participants (id, name, submitted_at, last_updated)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                participant.id.to_string(),
                participant.name.as_str(),
                participant.submitted_at.to_rfc3339(),
                participant.last_updated.to_rfc3339()
            ],
        )
        .await
        .map_err(db_err)?;
        debug!(participant_id = %participant.id, "participant row inserted");
        Ok(())
    }

    async fn find_participant(&self, id: Uuid) -> Result<Option<Participant>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                "SELECT id, name, submitted_at, last_updated FROM participants WHERE id = ?1",
                params![id.to_string()],
            )
            .await
            .map_err(db_err)?;
        match rows.next().await.map_err(db_err)? {
            Some(row) => Ok(Some(Self::row_to_participant(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                r#"
                SELECT id, name, submitted_at, last_updated
                FROM participants
                "#,
                (),
            )
            .await
            .map_err(db_err)?;
        let mut participants = Vec::new();
        while let Some(row) = rows.next().await.map_err(db_err)? {
            participants.push(Self::row_to_participant(&row)?);
        }
        // NOCASE only folds ASCII; order in Rust so both stores agree.
        sort_participants(&mut participants);
        Ok(participants)
    }

    async fn touch_participant(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE participants SET last_updated = ?1 WHERE id = ?2",
                params![at.to_rfc3339(), id.to_string()],
            )
            .await
            .map_err(db_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("participant {}", id)));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AvailabilityPort for SqliteRepo {
    async fn availability_for(
        &self,
        participant_id: Uuid,
    ) -> Result<Vec<AvailabilityRecord>, DomainError> {
        self.query_records(
            "SELECT participant_id, date, status FROM availability WHERE participant_id = ?1 ORDER BY date",
            Some(participant_id),
        )
        .await
    }

    async fn list_availability(&self) -> Result<Vec<AvailabilityRecord>, DomainError> {
        self.query_records(
            "SELECT participant_id, date, status FROM availability ORDER BY participant_id, date",
            None,
        )
        .await
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

        let conn = self.conn()?;
        let tx = conn.transaction().await.map_err(db_err)?;
        tx.execute(
            "DELETE FROM availability WHERE participant_id = ?1",
            params![participant_id.to_string()],
        )
        .await
        .map_err(db_err)?;

        let updated_at = Utc::now().to_rfc3339();
        for r in records {
            tx.execute(
                r#"
                INSERT INTO availability (participant_id, date, status, updated_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![
                    participant_id.to_string(),
                    date_key(r.date),
                    r.status.as_str(),
                    updated_at.as_str()
                ],
            )
            .await
            .map_err(db_err)?;
        }
        tx.commit().await.map_err(db_err)?;

        info!(
            participant_id = %participant_id,
            count = records.len(),
            "availability replaced"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_stored_status_is_a_repo_error() {
        let dir = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();
        {
            // Older schema without the CHECK constraint, holding a value we no longer know.
            let path = dir.path().join(DB_FILE_NAME);
            let db = libsql::Builder::new_local(path.to_string_lossy().as_ref())
                .build()
                .await
                .unwrap();
            let conn = db.connect().unwrap();
            conn.execute(
                "CREATE TABLE availability (participant_id TEXT NOT NULL, date TEXT NOT NULL, \
                 status TEXT NOT NULL, updated_at TEXT NOT NULL, PRIMARY KEY (participant_id, date))",
                (),
            )
            .await
            .unwrap();
            conn.execute(
                "INSERT INTO availability VALUES (?1, '2026-03-06', 'perhaps', '2026-03-01T00:00:00+00:00')",
                params![id.to_string()],
            )
            .await
            .unwrap();
        }

        let repo = SqliteRepo::connect(dir.path()).await.unwrap();
        let err = repo.availability_for(id).await.unwrap_err();
        assert!(matches!(err, DomainError::Repo(ref msg) if msg.contains("perhaps")));
        assert!(matches!(
            repo.list_availability().await,
            Err(DomainError::Repo(_))
        ));
    }

    #[tokio::test]
    async fn list_orders_by_unicode_folded_name() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();
        for name in ["émile", "Zed", "anna"] {
            let now = Utc::now();
            repo.create_participant(&Participant {
                id: Uuid::new_v4(),
                name: name.to_string(),
                submitted_at: now,
                last_updated: now,
            })
            .await
            .unwrap();
        }
        let names: Vec<String> = repo
            .list_participants()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["anna", "Zed", "émile"]);
    }
}
