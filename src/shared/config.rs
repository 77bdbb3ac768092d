//! Application configuration. Admin password, storage, trip date range.
//!
//! Read from `TRIP_*` env vars (after `.env` is loaded) and an optional
//! file named by `TRIP_CONFIG`.

use crate::domain::DateRange;
use crate::domain::DomainError;
use crate::domain::dates::{DEFAULT_RANGE_END, DEFAULT_RANGE_START};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";
pub const DEFAULT_DATA_DIR: &str = "./data";
/// inquire draws on stderr as well, so anything chattier than warn interleaves with prompts.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Backing store for participants and availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Sqlite,
    Memory,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Password for the admin dashboard. Read from TRIP_ADMIN_PASSWORD.
    #[serde(default)]
    pub admin_password: Option<String>,

    /// Directory holding scheduler.db. Read from TRIP_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Where CSV/JSON exports and Markdown reports go. Defaults to `<data_dir>/reports`.
    #[serde(default)]
    pub reports_dir: Option<String>,

    /// First trip day, `YYYY-MM-DD`. Read from TRIP_RANGE_START.
    #[serde(default)]
    pub range_start: Option<String>,

    /// Last trip day (inclusive), `YYYY-MM-DD`. Read from TRIP_RANGE_END.
    #[serde(default)]
    pub range_end: Option<String>,

    /// "sqlite" (default) or "memory". Read from TRIP_STORAGE.
    #[serde(default)]
    pub storage: Option<String>,

    /// tracing filter directive, e.g. "info" or "trip_scheduler=debug". Read from TRIP_LOG.
    /// RUST_LOG takes precedence.
    #[serde(default)]
    pub log: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("TRIP_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        // env wins over the file
        c = c.add_source(config::Environment::with_prefix("TRIP"));
        c.build()?.try_deserialize()
    }

    pub fn admin_password_or_default(&self) -> String {
        self.admin_password
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string())
    }

    pub fn log_filter_or_default(&self) -> String {
        self.log
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_LOG_FILTER)
            .to_string()
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR))
    }

    pub fn reports_dir_or_default(&self) -> PathBuf {
        self.reports_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.data_dir_or_default().join("reports"))
    }

    /// Parsed and validated trip range. Missing bounds fall back to March 6 ..= 22, 2026.
    pub fn date_range(&self) -> Result<DateRange, DomainError> {
        DateRange::parse(
            self.range_start.as_deref().unwrap_or(DEFAULT_RANGE_START),
            self.range_end.as_deref().unwrap_or(DEFAULT_RANGE_END),
        )
    }

    pub fn storage_kind(&self) -> Result<StorageKind, DomainError> {
        match self.storage.as_deref().map(str::trim) {
            None | Some("") => Ok(StorageKind::Sqlite),
            Some(s) if s.eq_ignore_ascii_case("sqlite") => Ok(StorageKind::Sqlite),
            Some(s) if s.eq_ignore_ascii_case("memory") => Ok(StorageKind::Memory),
            Some(other) => Err(DomainError::Config(format!(
                "unknown storage '{}' (expected sqlite or memory)",
                other
            ))),
        }
    }
}
