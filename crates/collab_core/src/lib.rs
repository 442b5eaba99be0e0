//! Core domain logic for the collaboration client: invitations,
//! notifications and deadline reminders.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod selection;
pub mod service;
pub mod time_format;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::invitation::{Answer, Invitation, InvitationId, InvitationStatus};
pub use model::project::{Project, ProjectId};
pub use model::task::{Task, TaskId};
pub use model::user::{Credential, User, UserId};
pub use model::validation::ModelValidationError;
pub use notify::aggregator::{
    build_display_model, compute_close_mutations, format_invitation_row, group_by_answer,
    AnswerLabel, AsInvitation, CloseMutationPlan, InvitationEntry, InvitationRow,
    NotificationDisplayModel, NotificationGroups, StatusColor,
};
pub use notify::deadline::{deadline_rows, format_remaining, select_upcoming, DeadlineRow};
pub use notify::lifecycle::{respond, respond_batch, InvitationAnswerResult, LifecycleError};
pub use repo::directory_repo::{DirectoryRepository, SqliteDirectoryRepository};
pub use repo::error::{PersistenceError, PersistenceResult};
pub use repo::invitation_repo::{InvitationRepository, SqliteInvitationRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use selection::{CollaboratorSelectionSet, SelectionEntry, SelectionError, SelectionSnapshot};
pub use service::invite_service::{InviteOutcome, InviteService, InviteServiceError};
pub use service::notification_service::{
    AnswerOutcome, CloseOutcome, NotificationService, NotificationServiceError,
};
pub use time_format::{
    format_duration, format_timestamp, format_timestamp_in, now, Clock, FixedClock, SystemClock,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
