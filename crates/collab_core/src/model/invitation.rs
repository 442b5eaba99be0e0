//! Invitation record.
//!
//! # Responsibility
//! - Represent one proposal for a user to collaborate on a project.
//! - Expose the answer state and the monotonic read flag.
//!
//! # Invariants
//! - `status` only moves `Waiting -> Accepted` or `Waiting -> Refused`.
//!   Transitions are owned by `notify::lifecycle`.
//! - `is_read` never goes back to `false` once set.
//! - Inviter and invitee are different users.

use crate::model::project::ProjectId;
use crate::model::user::UserId;
use crate::model::validation::{ensure_not_nil, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type InvitationId = Uuid;

/// Answer state of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Sent, not answered yet. The only non-terminal state.
    Waiting,
    /// Invitee joined the project.
    Accepted,
    /// Invitee declined.
    Refused,
}

impl InvitationStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Waiting)
    }

    /// Stable storage/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Accepted => "accepted",
            Self::Refused => "refused",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "waiting" => Some(Self::Waiting),
            "accepted" => Some(Self::Accepted),
            "refused" => Some(Self::Refused),
            _ => None,
        }
    }
}

/// Answer an invitee gives to a waiting invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Accept,
    Refuse,
}

impl Answer {
    /// Terminal status reached by this answer.
    pub fn target_status(self) -> InvitationStatus {
        match self {
            Self::Accept => InvitationStatus::Accepted,
            Self::Refuse => InvitationStatus::Refused,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: InvitationId,
    pub project_id: ProjectId,
    pub inviter_id: UserId,
    pub invitee_id: UserId,
    pub status: InvitationStatus,
    pub is_read: bool,
}

impl Invitation {
    /// Creates a new unread `Waiting` invitation with a generated id.
    pub fn new(project_id: ProjectId, inviter_id: UserId, invitee_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            inviter_id,
            invitee_id,
            status: InvitationStatus::Waiting,
            is_read: false,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.status == InvitationStatus::Waiting
    }

    /// Sets the read flag. There is intentionally no inverse operation.
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        ensure_not_nil("invitation", self.id)?;
        ensure_not_nil("invitation project", self.project_id)?;
        ensure_not_nil("invitation inviter", self.inviter_id)?;
        ensure_not_nil("invitation invitee", self.invitee_id)?;
        if self.inviter_id == self.invitee_id {
            return Err(ModelValidationError::SelfInvitation(self.inviter_id));
        }
        Ok(())
    }
}
