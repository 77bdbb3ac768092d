//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Screens: main menu -> name entry -> day-by-day picker -> confirmation,
//! plus the password-gated admin dashboard.

use crate::adapters::ui::dashboard::{
    render_confirmation, render_dashboard, render_picker_header,
};
use crate::adapters::ui::progress::spinner;
use crate::domain::crew_titles::title_for_name;
use crate::domain::dates::display_date;
use crate::domain::{AvailabilityStatus, DateFilter, DomainError, Participant};
use crate::ports::InputPort;
use crate::usecases::{AdminService, AvailabilityService, RegistrationService};
use async_trait::async_trait;
use inquire::error::{CustomUserError, InquireError};
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::validator::Validation;
use inquire::{Confirm, Password, PasswordDisplayMode, Select, Text};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

const CANCELLED: &str = "cancelled";

/// Applies the prompt theme globally. Call once before the first prompt.
pub fn apply_theme() {
    let mut config = RenderConfig::default();
    config.prompt_prefix = Styled::new("?").with_fg(Color::LightCyan);
    config.answered_prompt_prefix = Styled::new("✓").with_fg(Color::LightGreen);
    config.highlighted_option_prefix = Styled::new("›").with_fg(Color::LightCyan);
    inquire::set_global_render_config(config);
}

/// Esc / Ctrl-C inside a flow returns to the main menu.
fn prompt_err(e: InquireError) -> DomainError {
    match e {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            DomainError::Ui(CANCELLED.into())
        }
        other => DomainError::Ui(other.to_string()),
    }
}

fn validate_name(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().is_empty() {
        Ok(Validation::Invalid("Please enter your name".into()))
    } else {
        Ok(Validation::Valid)
    }
}

#[derive(Debug, Clone, Copy)]
enum MenuChoice {
    Submit,
    Resume,
    Admin,
    Exit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 4] = [Self::Submit, Self::Resume, Self::Admin, Self::Exit];
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Submit => "Submit availability",
            Self::Resume => "Edit availability (resume code)",
            Self::Admin => "Admin dashboard",
            Self::Exit => "Exit",
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct StatusChoice(AvailabilityStatus);

impl fmt::Display for StatusChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0 {
            AvailabilityStatus::Yes => "Yes, I can make it",
            AvailabilityStatus::Maybe => "Maybe",
            AvailabilityStatus::No => "No",
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum AdminAction {
    Refresh,
    ExportCsv,
    ExportJson,
    WriteReport,
    Back,
}

impl AdminAction {
    const ALL: [AdminAction; 5] = [
        Self::Refresh,
        Self::ExportCsv,
        Self::ExportJson,
        Self::WriteReport,
        Self::Back,
    ];
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Refresh => "Refresh",
            Self::ExportCsv => "Export availability matrix (CSV)",
            Self::ExportJson => "Export best windows (JSON)",
            Self::WriteReport => "Write Markdown report",
            Self::Back => "Back to main menu",
        })
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    registration: Arc<RegistrationService>,
    availability: Arc<AvailabilityService>,
    admin: Arc<AdminService>,
}

impl TuiInputPort {
    pub fn new(
        registration: Arc<RegistrationService>,
        availability: Arc<AvailabilityService>,
        admin: Arc<AdminService>,
    ) -> Self {
        Self {
            registration,
            availability,
            admin,
        }
    }

    async fn new_submission(&self) -> Result<(), DomainError> {
        let name = Text::new("Your name:")
            .with_validator(validate_name)
            .prompt()
            .map_err(prompt_err)?;
        let participant = self.registration.register(&name).await?;
        self.picker(participant.id).await
    }

    async fn resume_submission(&self) -> Result<(), DomainError> {
        let code = Text::new("Resume code:")
            .with_help_message("Shown on the confirmation screen after your first submit")
            .prompt()
            .map_err(prompt_err)?;
        let participant = self.registration.resume(&code).await?;
        self.picker(participant.id).await
    }

    /// Day-by-day availability picker. Loops until a complete set is submitted or the user leaves.
    async fn picker(&self, id: Uuid) -> Result<(), DomainError> {
        let pb = spinner("Loading your answers...");
        let draft = self.availability.load_draft(id).await;
        pb.finish_and_clear();
        let mut draft = draft?;

        let range = *self.availability.range();
        let days = range.days();
        let crew_title = title_for_name(&draft.participant.name);

        loop {
            let progress = self.availability.progress(&draft);
            println!(
                "{}",
                render_picker_header(&draft.participant, crew_title, &progress, &range)
            );

            let filter = if draft.responses.is_empty() {
                DateFilter::All
            } else {
                Select::new("Which dates do you want to go through?", DateFilter::ALL.to_vec())
                    .prompt()
                    .map_err(prompt_err)?
            };
            let selected = filter.apply(&days, &draft.responses);
            if selected.is_empty() {
                println!("No dates match that filter.");
            }

            for date in selected {
                let label = display_date(date);
                let cursor = draft
                    .responses
                    .get(&date)
                    .and_then(|s| AvailabilityStatus::ALL.iter().position(|x| x == s))
                    .unwrap_or(0);
                let options: Vec<StatusChoice> = AvailabilityStatus::ALL
                    .iter()
                    .copied()
                    .map(StatusChoice)
                    .collect();
                let choice = Select::new(&label, options)
                    .with_starting_cursor(cursor)
                    .prompt()
                    .map_err(prompt_err)?;
                draft.responses.insert(date, choice.0);
            }

            let progress = self.availability.progress(&draft);
            let submit = Confirm::new("Submit your availability now?")
                .with_default(progress.is_complete())
                .prompt()
                .map_err(prompt_err)?;
            if !submit {
                let keep_editing = Confirm::new("Keep editing?")
                    .with_default(true)
                    .prompt()
                    .map_err(prompt_err)?;
                if keep_editing {
                    continue;
                }
                return Ok(());
            }

            let pb = spinner("Saving...");
            let saved = self.availability.submit(id, &draft.responses).await;
            pb.finish_and_clear();
            match saved {
                Ok(participant) => {
                    self.confirmation(&participant);
                    return Ok(());
                }
                Err(DomainError::Incomplete { missing }) => {
                    println!(
                        "Please pick Yes/Maybe/No for all {} dates ({} still unanswered).",
                        progress.total, missing
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn confirmation(&self, participant: &Participant) {
        println!("{}", render_confirmation(participant));
    }

    async fn admin_flow(&self) -> Result<(), DomainError> {
        let password = Password::new("Admin password:")
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()
            .map_err(prompt_err)?;
        self.admin.authenticate(&password)?;

        loop {
            let pb = spinner("Loading responses...");
            let dashboard = self.admin.dashboard().await;
            pb.finish_and_clear();
            let dashboard = dashboard?;

            println!(
                "{}",
                render_dashboard(
                    self.admin.range(),
                    &dashboard.days,
                    &dashboard.participants,
                    &dashboard.best_windows
                )
            );

            let action = Select::new("Admin actions", AdminAction::ALL.to_vec())
                .prompt()
                .map_err(prompt_err)?;
            let written = match action {
                AdminAction::Refresh => continue,
                AdminAction::ExportCsv => self.admin.export_matrix_csv().await?,
                AdminAction::ExportJson => self.admin.export_windows_json().await?,
                AdminAction::WriteReport => self.admin.write_report().await?,
                AdminAction::Back => return Ok(()),
            };
            println!("Saved {}", written.display());
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = match Select::new("What would you like to do?", MenuChoice::ALL.to_vec())
                .prompt()
            {
                Ok(choice) => choice,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    MenuChoice::Exit
                }
                Err(e) => return Err(prompt_err(e)),
            };

            let outcome = match choice {
                MenuChoice::Submit => self.new_submission().await,
                MenuChoice::Resume => self.resume_submission().await,
                MenuChoice::Admin => self.admin_flow().await,
                MenuChoice::Exit => {
                    info!("exiting");
                    return Ok(());
                }
            };

            match outcome {
                Ok(()) => {}
                Err(DomainError::Ui(msg)) if msg == CANCELLED => println!("Cancelled."),
                Err(e @ DomainError::Ui(_)) => return Err(e),
                Err(e) => {
                    error!(error = %e, "flow failed");
                    println!("{}", e);
                }
            }
        }
    }
}
