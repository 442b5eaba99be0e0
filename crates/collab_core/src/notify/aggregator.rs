//! Notification grouping, row formatting and close-mutation planning.
//!
//! # Responsibility
//! - Partition invitations by answer state for display.
//! - Format one display row per invitation.
//! - Compute (never apply) the mutations "close notifications" requires.
//!
//! # Invariants
//! - Grouping is a stable partition: no item is dropped, duplicated or
//!   re-sorted inside its group.
//! - Refused invitations are always planned for deletion and never for
//!   mark-read.
//! - Read accepted/waiting invitations are left untouched.

use crate::model::invitation::{Invitation, InvitationId, InvitationStatus};
use crate::model::project::Project;
use crate::model::task::Task;
use crate::model::user::User;
use crate::notify::deadline::{deadline_rows, DeadlineRow};
use serde::Serialize;

/// Access to the invitation carried by a notification item.
pub trait AsInvitation {
    fn invitation(&self) -> &Invitation;
}

impl AsInvitation for Invitation {
    fn invitation(&self) -> &Invitation {
        self
    }
}

impl<T: AsInvitation + ?Sized> AsInvitation for &T {
    fn invitation(&self) -> &Invitation {
        (**self).invitation()
    }
}

/// One invitation joined with its project and inviter, as fetched from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationEntry {
    pub invitation: Invitation,
    pub project: Project,
    pub inviter: User,
}

impl AsInvitation for InvitationEntry {
    fn invitation(&self) -> &Invitation {
        &self.invitation
    }
}

/// Items partitioned by answer state, each group in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationGroups<T> {
    pub accepted: Vec<T>,
    pub refused: Vec<T>,
    pub waiting: Vec<T>,
}

impl<T> Default for NotificationGroups<T> {
    fn default() -> Self {
        Self {
            accepted: Vec::new(),
            refused: Vec::new(),
            waiting: Vec::new(),
        }
    }
}

impl<T> NotificationGroups<T> {
    pub fn len(&self) -> usize {
        self.accepted.len() + self.refused.len() + self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates accepted, then refused, then waiting items.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.accepted
            .iter()
            .chain(self.refused.iter())
            .chain(self.waiting.iter())
    }
}

/// Semantic color tag attached to an answer label. Rendering is up to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Green,
    Red,
    Grey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerLabel {
    pub text: &'static str,
    pub color: StatusColor,
}

const ACCEPTED_LABEL: AnswerLabel = AnswerLabel {
    text: "Accepted",
    color: StatusColor::Green,
};
const REFUSED_LABEL: AnswerLabel = AnswerLabel {
    text: "Refused",
    color: StatusColor::Red,
};
const WAITING_LABEL: AnswerLabel = AnswerLabel {
    text: "Waiting for answer",
    color: StatusColor::Grey,
};

impl AnswerLabel {
    pub fn for_status(status: InvitationStatus) -> Self {
        match status {
            InvitationStatus::Accepted => ACCEPTED_LABEL,
            InvitationStatus::Refused => REFUSED_LABEL,
            InvitationStatus::Waiting => WAITING_LABEL,
        }
    }
}

/// Display-ready summary of one invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvitationRow {
    pub invitation_id: InvitationId,
    pub inviter_username: String,
    pub answer: AnswerLabel,
    pub project_title: String,
}

/// Persistence mutations required to close the notification panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseMutationPlan {
    pub delete: Vec<InvitationId>,
    pub mark_read: Vec<InvitationId>,
}

impl CloseMutationPlan {
    pub fn is_empty(&self) -> bool {
        self.delete.is_empty() && self.mark_read.is_empty()
    }
}

/// Everything the notification panel renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationDisplayModel {
    pub accepted: Vec<InvitationRow>,
    pub refused: Vec<InvitationRow>,
    pub waiting: Vec<InvitationRow>,
    pub deadlines: Vec<DeadlineRow>,
}

impl NotificationDisplayModel {
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
            && self.refused.is_empty()
            && self.waiting.is_empty()
            && self.deadlines.is_empty()
    }
}

/// Stable partition of `items` by invitation status.
pub fn group_by_answer<T, I>(items: I) -> NotificationGroups<T>
where
    T: AsInvitation,
    I: IntoIterator<Item = T>,
{
    let mut groups = NotificationGroups::default();
    for item in items {
        match item.invitation().status {
            InvitationStatus::Accepted => groups.accepted.push(item),
            InvitationStatus::Refused => groups.refused.push(item),
            InvitationStatus::Waiting => groups.waiting.push(item),
        }
    }
    groups
}

pub fn format_invitation_row(
    invitation: &Invitation,
    project: &Project,
    inviter: &User,
) -> InvitationRow {
    InvitationRow {
        invitation_id: invitation.id,
        inviter_username: inviter.username.clone(),
        answer: AnswerLabel::for_status(invitation.status),
        project_title: project.title.clone(),
    }
}

/// Plans the close-notifications mutations.
///
/// Classification uses each invitation's own status, so items placed in the
/// wrong group by a caller are still handled correctly.
pub fn compute_close_mutations<T: AsInvitation>(
    notifications: &NotificationGroups<T>,
) -> CloseMutationPlan {
    let mut plan = CloseMutationPlan::default();
    for item in notifications.iter() {
        let invitation = item.invitation();
        match invitation.status {
            InvitationStatus::Refused => plan.delete.push(invitation.id),
            InvitationStatus::Accepted | InvitationStatus::Waiting if !invitation.is_read => {
                plan.mark_read.push(invitation.id)
            }
            InvitationStatus::Accepted | InvitationStatus::Waiting => {}
        }
    }
    plan
}

/// Builds the panel model from fetched invitations and tasks.
pub fn build_display_model(
    entries: Vec<InvitationEntry>,
    tasks: &[Task],
    now: i64,
    horizon_ms: i64,
) -> NotificationDisplayModel {
    let groups = group_by_answer(entries);

    NotificationDisplayModel {
        accepted: rows_for(&groups.accepted),
        refused: rows_for(&groups.refused),
        waiting: rows_for(&groups.waiting),
        deadlines: deadline_rows(tasks, now, horizon_ms),
    }
}

fn rows_for(entries: &[InvitationEntry]) -> Vec<InvitationRow> {
    entries
        .iter()
        .map(|entry| format_invitation_row(&entry.invitation, &entry.project, &entry.inviter))
        .collect()
}
