//! Command-line front end for the collaboration core.
//!
//! # Responsibility
//! - Wire config, logging and the SQLite repositories into the services.
//! - Render the notification panel as plain text.
//!
//! # Invariants
//! - Every subcommand except `ping` works against the configured database.
//! - Failures print one `Error:` line and exit with status 1.

use clap::{Args, Parser, Subcommand, ValueEnum};
use collab_core::db::open_db;
use collab_core::{
    init_from_config, Answer, CoreConfig, DirectoryRepository, InvitationRow,
    NotificationDisplayModel, NotificationService, SqliteDirectoryRepository,
    SqliteInvitationRepository, SqliteTaskRepository, SystemClock, User,
};
use log::info;
use rusqlite::Connection;
use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use uuid::Uuid;

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "collab")]
#[command(about = "Project invitations and deadline reminders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Session {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Username of the acting user
    #[arg(short, long)]
    user: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Reply {
    Accept,
    Refuse,
}

impl From<Reply> for Answer {
    fn from(value: Reply) -> Self {
        match value {
            Reply::Accept => Answer::Accept,
            Reply::Refuse => Answer::Refuse,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check core linkage
    Ping,
    /// Show invitations and upcoming deadlines
    Notifications {
        #[command(flatten)]
        session: Session,

        /// Override the deadline horizon from config
        #[arg(long)]
        horizon_minutes: Option<u32>,
    },
    /// Answer one received invitation
    Answer {
        #[command(flatten)]
        session: Session,

        #[arg(long)]
        invitation: Uuid,

        #[arg(long, value_enum)]
        reply: Reply,
    },
    /// Close the notification panel
    Close {
        #[command(flatten)]
        session: Session,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ping => {
            ping();
            Ok(())
        }
        Commands::Notifications {
            session,
            horizon_minutes,
        } => notifications(session, horizon_minutes),
        Commands::Answer {
            session,
            invitation,
            reply,
        } => answer_invitation(session, invitation, reply.into()),
        Commands::Close { session } => close(session),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn ping() {
    println!("collab_core ping={}", collab_core::ping());
    println!("collab_core version={}", collab_core::core_version());
}

struct Context {
    config: CoreConfig,
    conn: Connection,
}

impl Context {
    fn open(config_path: Option<PathBuf>) -> Result<Self, Box<dyn Error>> {
        let config = match config_path {
            Some(path) => CoreConfig::load(path)?,
            None => CoreConfig::default(),
        };
        init_from_config(&config.logging)?;
        let conn = open_db(&config.database.path)?;
        Ok(Self { config, conn })
    }

    fn user(&self, username: &str) -> Result<User, Box<dyn Error>> {
        SqliteDirectoryRepository::try_new(&self.conn)?
            .find_user_by_username(username)?
            .ok_or_else(|| format!("unknown user `{username}`").into())
    }

    fn notification_service(
        &self,
    ) -> Result<
        NotificationService<SqliteInvitationRepository<'_>, SqliteTaskRepository<'_>, SystemClock>,
        Box<dyn Error>,
    > {
        Ok(NotificationService::new(
            SqliteInvitationRepository::try_new(&self.conn)?,
            SqliteTaskRepository::try_new(&self.conn)?,
            SystemClock,
        ))
    }
}

fn notifications(session: Session, horizon_minutes: Option<u32>) -> CliResult {
    let ctx = Context::open(session.config)?;
    let user = ctx.user(&session.user)?;
    let horizon_ms = match horizon_minutes {
        Some(minutes) => i64::from(minutes) * 60_000,
        None => ctx.config.notifications.deadline_horizon_ms(),
    };

    let model = ctx.notification_service()?.display_model(user.id, horizon_ms)?;
    print!("{}", render(&model));
    Ok(())
}

fn answer_invitation(session: Session, invitation: Uuid, answer: Answer) -> CliResult {
    let ctx = Context::open(session.config)?;
    let user = ctx.user(&session.user)?;

    let outcome = ctx
        .notification_service()?
        .answer(user.id, &HashMap::from([(invitation, answer)]))?;
    if let Some((_, err)) = outcome.failures.into_iter().next() {
        return Err(err.into());
    }

    info!("event=cli_answer module=cli status=ok invitation_id={invitation}");
    println!("{invitation} {}", answer.target_status().as_str());
    Ok(())
}

fn close(session: Session) -> CliResult {
    let ctx = Context::open(session.config)?;
    let user = ctx.user(&session.user)?;

    let outcome = ctx.notification_service()?.close(user.id)?;
    println!(
        "deleted={} marked_read={}",
        outcome.deleted.len(),
        outcome.marked_read.len()
    );
    for (id, err) in &outcome.failures {
        eprintln!("warning: {id}: {err}");
    }
    Ok(())
}

fn render(model: &NotificationDisplayModel) -> String {
    if model.is_empty() {
        return "No notifications.\n".to_string();
    }

    let mut out = String::new();
    for (heading, rows) in [
        ("Accepted", &model.accepted),
        ("Refused", &model.refused),
        ("Waiting", &model.waiting),
    ] {
        if rows.is_empty() {
            continue;
        }
        out.push_str(heading);
        out.push('\n');
        for row in rows {
            out.push_str(&render_row(row));
        }
    }

    if !model.deadlines.is_empty() {
        out.push_str("Deadlines\n");
        for row in &model.deadlines {
            out.push_str(&format!(
                "  {}  {}  ({} left)\n",
                row.end_date, row.task.description, row.remaining
            ));
        }
    }
    out
}

fn render_row(row: &InvitationRow) -> String {
    format!(
        "  {}  {} from {}  [{}]\n",
        row.invitation_id, row.project_title, row.inviter_username, row.answer.text
    )
}
