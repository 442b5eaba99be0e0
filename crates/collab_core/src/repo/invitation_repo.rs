//! Invitation repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Fetch a user's notification view joined with project and inviter.
//! - Persist answers, read flags and deletions one invitation at a time.
//!
//! # Invariants
//! - Fetch order is creation order (`created_at`, then insertion rowid).
//! - The notification view is scoped by role: an invitee sees received
//!   invitations still waiting, an inviter sees answers to sent ones.
//! - Status writes only succeed on rows that are still `waiting`.
//! - The read flag is only ever written to `1`.

use crate::model::invitation::{Invitation, InvitationId, InvitationStatus};
use crate::model::project::{Project, ProjectId};
use crate::model::user::{Credential, User, UserId};
use crate::notify::aggregator::InvitationEntry;
use crate::repo::error::{PersistenceError, PersistenceResult};
use crate::repo::{bool_column, bool_to_int, ensure_schema_ready, uuid_column};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTRY_SELECT_SQL: &str = "SELECT
    i.uuid AS uuid,
    i.project_uuid AS project_uuid,
    i.inviter_uuid AS inviter_uuid,
    i.invitee_uuid AS invitee_uuid,
    i.status AS status,
    i.is_read AS is_read,
    p.title AS project_title,
    p.author_uuid AS project_author_uuid,
    u.username AS inviter_username,
    u.email AS inviter_email,
    u.first_name AS inviter_first_name,
    u.last_name AS inviter_last_name
FROM invitations i
JOIN projects p ON p.uuid = i.project_uuid
JOIN users u ON u.uuid = i.inviter_uuid";

const INVITATION_SELECT_SQL: &str = "SELECT
    uuid,
    project_uuid,
    inviter_uuid,
    invitee_uuid,
    status,
    is_read
FROM invitations";

/// Storage operations the notification flows rely on.
pub trait InvitationRepository {
    /// Persists a new invitation and returns its id.
    fn create_invitation(&self, invitation: &Invitation) -> PersistenceResult<InvitationId>;
    /// Notification view of `user_id`, in creation order: waiting invitations
    /// they received plus accepted/refused invitations they sent.
    fn fetch_invitations_for_user(&self, user_id: UserId)
        -> PersistenceResult<Vec<InvitationEntry>>;
    /// Every invitation `user_id` received, whatever its status.
    fn list_received(&self, user_id: UserId) -> PersistenceResult<Vec<Invitation>>;
    /// All invitations on one project, in creation order.
    fn list_for_project(&self, project_id: ProjectId) -> PersistenceResult<Vec<Invitation>>;
    /// Writes an answer. Fails with `StaleStatus` if the row is no longer waiting.
    fn update_status(&self, id: InvitationId, status: InvitationStatus) -> PersistenceResult<()>;
    fn delete_invitation(&self, id: InvitationId) -> PersistenceResult<()>;
    fn mark_read(&self, id: InvitationId) -> PersistenceResult<()>;
}

/// SQLite-backed invitation repository.
pub struct SqliteInvitationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteInvitationRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> PersistenceResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    fn exists(&self, id: InvitationId) -> PersistenceResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM invitations WHERE uuid = ?1;",
                [id.to_string()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn query_invitations(
        &self,
        filter: &str,
        param: String,
    ) -> PersistenceResult<Vec<Invitation>> {
        let mut stmt = self.conn.prepare(&format!(
            "{INVITATION_SELECT_SQL}
             {filter}
             ORDER BY created_at ASC, rowid ASC;"
        ))?;

        let mut rows = stmt.query([param])?;
        let mut invitations = Vec::new();
        while let Some(row) = rows.next()? {
            invitations.push(parse_invitation_row(row)?);
        }

        Ok(invitations)
    }
}

impl InvitationRepository for SqliteInvitationRepository<'_> {
    fn create_invitation(&self, invitation: &Invitation) -> PersistenceResult<InvitationId> {
        invitation.validate()?;

        self.conn.execute(
            "INSERT INTO invitations (
                uuid,
                project_uuid,
                inviter_uuid,
                invitee_uuid,
                status,
                is_read
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                invitation.id.to_string(),
                invitation.project_id.to_string(),
                invitation.inviter_id.to_string(),
                invitation.invitee_id.to_string(),
                invitation.status.as_str(),
                bool_to_int(invitation.is_read),
            ],
        )?;

        Ok(invitation.id)
    }

    fn fetch_invitations_for_user(
        &self,
        user_id: UserId,
    ) -> PersistenceResult<Vec<InvitationEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE (i.invitee_uuid = ?1 AND i.status = 'waiting')
                OR (i.inviter_uuid = ?1 AND i.status IN ('accepted', 'refused'))
             ORDER BY i.created_at ASC, i.rowid ASC;"
        ))?;

        let mut rows = stmt.query([user_id.to_string()])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }

    fn list_received(&self, user_id: UserId) -> PersistenceResult<Vec<Invitation>> {
        self.query_invitations("WHERE invitee_uuid = ?1", user_id.to_string())
    }

    fn list_for_project(&self, project_id: ProjectId) -> PersistenceResult<Vec<Invitation>> {
        self.query_invitations("WHERE project_uuid = ?1", project_id.to_string())
    }

    fn update_status(&self, id: InvitationId, status: InvitationStatus) -> PersistenceResult<()> {
        if !status.is_terminal() {
            return Err(PersistenceError::InvalidData(format!(
                "invitation {id} cannot be moved back to `{}`",
                status.as_str()
            )));
        }

        let changed = self.conn.execute(
            "UPDATE invitations
             SET status = ?2
             WHERE uuid = ?1
               AND status = 'waiting';",
            params![id.to_string(), status.as_str()],
        )?;

        if changed == 0 {
            if self.exists(id)? {
                return Err(PersistenceError::StaleStatus(id));
            }
            return Err(PersistenceError::NotFound {
                entity: "invitation",
                id,
            });
        }

        Ok(())
    }

    fn delete_invitation(&self, id: InvitationId) -> PersistenceResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM invitations WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(PersistenceError::NotFound {
                entity: "invitation",
                id,
            });
        }

        Ok(())
    }

    fn mark_read(&self, id: InvitationId) -> PersistenceResult<()> {
        let changed = self.conn.execute(
            "UPDATE invitations SET is_read = 1 WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(PersistenceError::NotFound {
                entity: "invitation",
                id,
            });
        }

        Ok(())
    }
}

fn parse_invitation_row(row: &Row<'_>) -> PersistenceResult<Invitation> {
    let status_text: String = row.get("status")?;
    let status = InvitationStatus::parse(&status_text).ok_or_else(|| {
        PersistenceError::InvalidData(format!(
            "invalid invitation status `{status_text}` in invitations.status"
        ))
    })?;

    let invitation = Invitation {
        id: uuid_column(row, "uuid")?,
        project_id: uuid_column(row, "project_uuid")?,
        inviter_id: uuid_column(row, "inviter_uuid")?,
        invitee_id: uuid_column(row, "invitee_uuid")?,
        status,
        is_read: bool_column(row, "is_read")?,
    };
    invitation.validate()?;
    Ok(invitation)
}

fn parse_entry_row(row: &Row<'_>) -> PersistenceResult<InvitationEntry> {
    let invitation = parse_invitation_row(row)?;

    let project = Project {
        id: invitation.project_id,
        title: row.get("project_title")?,
        author_id: uuid_column(row, "project_author_uuid")?,
    };
    let inviter = User {
        id: invitation.inviter_id,
        username: row.get("inviter_username")?,
        email: row.get("inviter_email")?,
        first_name: row.get("inviter_first_name")?,
        last_name: row.get("inviter_last_name")?,
        password: Credential::default(),
    };

    Ok(InvitationEntry {
        invitation,
        project,
        inviter,
    })
}
