//! Wiring & DI. Entry point: load config, bootstrap storage, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trip_scheduler::adapters::persistence::{MemoryRepo, SqliteRepo};
use trip_scheduler::adapters::ui::tui::TuiInputPort;
use trip_scheduler::ports::{AvailabilityPort, InputPort, ParticipantPort};
use trip_scheduler::shared::config::{AppConfig, DEFAULT_ADMIN_PASSWORD, StorageKind};
use trip_scheduler::usecases::{AdminService, AvailabilityService, RegistrationService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    // Prompts share stderr with the log; the quiet default keeps them apart.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cfg.log_filter_or_default())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let range = cfg.date_range().map_err(|e| anyhow::anyhow!("{}", e))?;
    let storage = cfg.storage_kind().map_err(|e| anyhow::anyhow!("{}", e))?;
    let admin_password = cfg.admin_password_or_default();
    if admin_password == DEFAULT_ADMIN_PASSWORD {
        warn!("TRIP_ADMIN_PASSWORD not set, using the default admin password");
    }
    info!(
        start = %range.start(),
        end = %range.end(),
        days = range.len(),
        "trip date range"
    );

    // --- Storage: one repo serves both ports ---
    let (participants, availability): (Arc<dyn ParticipantPort>, Arc<dyn AvailabilityPort>) =
        match storage {
            StorageKind::Sqlite => {
                let data_path = cfg.data_dir_or_default();
                let repo = Arc::new(
                    SqliteRepo::connect(&data_path)
                        .await
                        .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
                );
                (
                    Arc::clone(&repo) as Arc<dyn ParticipantPort>,
                    repo as Arc<dyn AvailabilityPort>,
                )
            }
            StorageKind::Memory => {
                warn!("TRIP_STORAGE=memory: responses are lost on exit");
                let repo = Arc::new(MemoryRepo::new());
                (
                    Arc::clone(&repo) as Arc<dyn ParticipantPort>,
                    repo as Arc<dyn AvailabilityPort>,
                )
            }
        };

    // --- Services ---
    let registration = Arc::new(RegistrationService::new(Arc::clone(&participants)));
    let availability_service = Arc::new(AvailabilityService::new(
        Arc::clone(&participants),
        Arc::clone(&availability),
        range,
    ));
    let reports_dir = cfg.reports_dir_or_default();
    info!(path = %reports_dir.display(), "reports directory");
    let admin = Arc::new(AdminService::new(
        participants,
        availability,
        range,
        admin_password,
        reports_dir,
    ));

    trip_scheduler::adapters::ui::init_ui();

    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(registration, availability_service, admin));

    // --- Run (main menu -> Submit / Edit / Admin) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
