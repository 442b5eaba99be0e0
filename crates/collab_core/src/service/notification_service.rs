//! Notification panel use-cases.
//!
//! # Responsibility
//! - Fetch a user's invitations/tasks and build the panel display model.
//! - Forward answers through the lifecycle and persist each transition.
//! - Plan and apply the close-notifications mutations.
//!
//! # Invariants
//! - Per-item failures never abort sibling writes; nothing is retried.
//! - Only invitations where the user is the invitee can be answered.
//! - `close` only touches rows in the caller's own notification view.
//! - Returned outcomes report exactly what storage confirmed.

use crate::model::invitation::{Answer, Invitation, InvitationId};
use crate::model::user::UserId;
use crate::notify::aggregator::{
    build_display_model, compute_close_mutations, group_by_answer, CloseMutationPlan,
    NotificationDisplayModel,
};
use crate::notify::lifecycle::{respond_batch, LifecycleError};
use crate::repo::error::PersistenceError;
use crate::repo::invitation_repo::InvitationRepository;
use crate::repo::task_repo::TaskRepository;
use crate::time_format::Clock;
use log::{info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum NotificationServiceError {
    /// Answer rejected by the invitation state machine.
    Transition(LifecycleError),
    /// Repository failure.
    Persistence(PersistenceError),
}

impl Display for NotificationServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transition(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NotificationServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transition(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<LifecycleError> for NotificationServiceError {
    fn from(value: LifecycleError) -> Self {
        Self::Transition(value)
    }
}

impl From<PersistenceError> for NotificationServiceError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// Result of [`NotificationService::answer`].
#[derive(Debug, Default)]
pub struct AnswerOutcome {
    /// Invitations whose new status storage confirmed.
    pub persisted: Vec<Invitation>,
    pub failures: Vec<(InvitationId, NotificationServiceError)>,
}

/// Result of [`NotificationService::close`].
#[derive(Debug, Default)]
pub struct CloseOutcome {
    /// Mutations that were attempted.
    pub plan: CloseMutationPlan,
    pub deleted: Vec<InvitationId>,
    pub marked_read: Vec<InvitationId>,
    pub failures: Vec<(InvitationId, PersistenceError)>,
}

impl CloseOutcome {
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Use-case service wrapping the invitation and task repositories.
pub struct NotificationService<I, T, C>
where
    I: InvitationRepository,
    T: TaskRepository,
    C: Clock,
{
    invitations: I,
    tasks: T,
    clock: C,
}

impl<I, T, C> NotificationService<I, T, C>
where
    I: InvitationRepository,
    T: TaskRepository,
    C: Clock,
{
    pub fn new(invitations: I, tasks: T, clock: C) -> Self {
        Self {
            invitations,
            tasks,
            clock,
        }
    }

    /// Builds the notification panel for `user_id`.
    ///
    /// `horizon_ms` selects which tasks count as close to their deadline.
    pub fn display_model(
        &self,
        user_id: UserId,
        horizon_ms: i64,
    ) -> Result<NotificationDisplayModel, NotificationServiceError> {
        let entries = self.invitations.fetch_invitations_for_user(user_id)?;
        let tasks = self.tasks.fetch_tasks_for_user(user_id)?;
        let model = build_display_model(entries, &tasks, self.clock.now_ms(), horizon_ms);

        info!(
            "event=notifications_build module=service status=ok accepted={} refused={} waiting={} deadlines={}",
            model.accepted.len(),
            model.refused.len(),
            model.waiting.len(),
            model.deadlines.len()
        );
        Ok(model)
    }

    /// Applies `answers` to the user's received invitations and persists them.
    ///
    /// # Errors
    /// - Returns `Err` only when the initial fetch fails; per-invitation
    ///   failures are reported in [`AnswerOutcome::failures`].
    pub fn answer(
        &self,
        user_id: UserId,
        answers: &HashMap<InvitationId, Answer>,
    ) -> Result<AnswerOutcome, NotificationServiceError> {
        let received = self.invitations.list_received(user_id)?;
        let batch = respond_batch(&received, answers);
        let mut outcome = AnswerOutcome {
            persisted: Vec::with_capacity(batch.succeeded.len()),
            failures: batch
                .failures
                .into_iter()
                .map(|(id, err)| (id, err.into()))
                .collect(),
        };

        for invitation in batch.succeeded {
            match self
                .invitations
                .update_status(invitation.id, invitation.status)
            {
                Ok(()) => outcome.persisted.push(invitation),
                Err(err) => {
                    warn!(
                        "event=invitation_answer module=service status=error invitation_id={} error={}",
                        invitation.id, err
                    );
                    outcome.failures.push((invitation.id, err.into()));
                }
            }
        }

        info!(
            "event=invitation_answer module=service status=ok persisted={} failed={}",
            outcome.persisted.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }

    /// Closes the notification panel: deletes refused invitations and marks
    /// unread accepted/waiting ones as read.
    ///
    /// Refused rows reach this only through the inviter's view, so an
    /// invitee closing their panel never removes an answer the inviter has
    /// not seen yet.
    ///
    /// # Errors
    /// - Returns `Err` only when the initial fetch fails; per-invitation
    ///   write failures are reported in [`CloseOutcome::failures`].
    pub fn close(&self, user_id: UserId) -> Result<CloseOutcome, NotificationServiceError> {
        let entries = self.invitations.fetch_invitations_for_user(user_id)?;
        let groups = group_by_answer(entries);
        let plan = compute_close_mutations(&groups);

        let mut outcome = CloseOutcome::default();
        for id in &plan.delete {
            match self.invitations.delete_invitation(*id) {
                Ok(()) => outcome.deleted.push(*id),
                Err(err) => outcome.failures.push((*id, err)),
            }
        }
        for id in &plan.mark_read {
            match self.invitations.mark_read(*id) {
                Ok(()) => outcome.marked_read.push(*id),
                Err(err) => outcome.failures.push((*id, err)),
            }
        }

        if outcome.failures.is_empty() {
            info!(
                "event=notifications_close module=service status=ok deleted={} marked_read={}",
                outcome.deleted.len(),
                outcome.marked_read.len()
            );
        } else {
            warn!(
                "event=notifications_close module=service status=partial deleted={} marked_read={} failed={}",
                outcome.deleted.len(),
                outcome.marked_read.len(),
                outcome.failures.len()
            );
        }

        outcome.plan = plan;
        Ok(outcome)
    }
}
