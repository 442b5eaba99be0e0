//! Invite composition and task assignee editing.
//!
//! # Responsibility
//! - Build candidate lists for `CollaboratorSelectionSet` sessions.
//! - Turn a confirmed selection into persisted invitations or assignees.
//!
//! # Invariants
//! - Users with a waiting or accepted invitation on a project are not
//!   invited again.
//! - The current user and the project author are never invite candidates.
//! - One failed invitation write does not stop the others.

use crate::model::invitation::{Invitation, InvitationStatus};
use crate::model::project::{Project, ProjectId};
use crate::model::task::TaskId;
use crate::model::user::{User, UserId};
use crate::repo::directory_repo::DirectoryRepository;
use crate::repo::error::PersistenceError;
use crate::repo::invitation_repo::InvitationRepository;
use crate::repo::task_repo::TaskRepository;
use crate::selection::SelectionSnapshot;
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum InviteServiceError {
    ProjectNotFound(ProjectId),
    TaskNotFound(TaskId),
    Persistence(PersistenceError),
}

impl Display for InviteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InviteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PersistenceError> for InviteServiceError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// Result of [`InviteService::send_invitations`].
#[derive(Debug, Default)]
pub struct InviteOutcome {
    pub created: Vec<Invitation>,
    /// Selected users that already hold a waiting/accepted invitation.
    pub already_invited: Vec<UserId>,
    pub failures: Vec<(UserId, PersistenceError)>,
}

pub struct InviteService<D, I, T>
where
    D: DirectoryRepository,
    I: InvitationRepository,
    T: TaskRepository,
{
    directory: D,
    invitations: I,
    tasks: T,
}

impl<D, I, T> InviteService<D, I, T>
where
    D: DirectoryRepository,
    I: InvitationRepository,
    T: TaskRepository,
{
    pub fn new(directory: D, invitations: I, tasks: T) -> Self {
        Self {
            directory,
            invitations,
            tasks,
        }
    }

    /// Candidates for inviting collaborators to `project_id`, by username.
    ///
    /// Users already holding a waiting/accepted invitation start checked.
    pub fn candidates(
        &self,
        project_id: ProjectId,
        current_user_id: UserId,
    ) -> Result<Vec<(User, bool)>, InviteServiceError> {
        let project = self.require_project(project_id)?;
        let invited = self.active_invitees(project_id)?;

        Ok(self
            .directory
            .list_users()?
            .into_iter()
            .filter(|user| user.id != current_user_id && user.id != project.author_id)
            .map(|user| {
                let checked = invited.contains(&user.id);
                (user, checked)
            })
            .collect())
    }

    /// Creates one waiting invitation per newly selected user.
    pub fn send_invitations(
        &self,
        project_id: ProjectId,
        inviter_id: UserId,
        selection: &SelectionSnapshot,
    ) -> Result<InviteOutcome, InviteServiceError> {
        self.require_project(project_id)?;
        let invited = self.active_invitees(project_id)?;

        let mut outcome = InviteOutcome::default();
        for user in selection.selected() {
            if invited.contains(&user.id) {
                outcome.already_invited.push(user.id);
                continue;
            }

            let invitation = Invitation::new(project_id, inviter_id, user.id);
            match self.invitations.create_invitation(&invitation) {
                Ok(_) => outcome.created.push(invitation),
                Err(err) => {
                    warn!(
                        "event=invitation_create module=service status=error project_id={project_id} invitee_id={} error={err}",
                        user.id
                    );
                    outcome.failures.push((user.id, err));
                }
            }
        }

        info!(
            "event=invitation_create module=service status=ok project_id={project_id} created={} skipped={} failed={}",
            outcome.created.len(),
            outcome.already_invited.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }

    /// Candidates for editing the assignees of `task_id`, by username.
    pub fn assignee_candidates(
        &self,
        task_id: TaskId,
    ) -> Result<Vec<(User, bool)>, InviteServiceError> {
        if self.tasks.get_task(task_id)?.is_none() {
            return Err(InviteServiceError::TaskNotFound(task_id));
        }
        let assigned: HashSet<UserId> = self.tasks.list_assignees(task_id)?.into_iter().collect();

        Ok(self
            .directory
            .list_users()?
            .into_iter()
            .map(|user| {
                let checked = assigned.contains(&user.id);
                (user, checked)
            })
            .collect())
    }

    /// Replaces the task's assignees with the checked users of `selection`.
    pub fn set_task_assignees(
        &self,
        task_id: TaskId,
        selection: &SelectionSnapshot,
    ) -> Result<Vec<UserId>, InviteServiceError> {
        let user_ids: Vec<UserId> = selection.selected().iter().map(|user| user.id).collect();
        match self.tasks.set_assignees(task_id, &user_ids) {
            Ok(()) => {}
            Err(err) if err.is_not_found() => return Err(InviteServiceError::TaskNotFound(task_id)),
            Err(err) => return Err(err.into()),
        }

        info!(
            "event=task_assign module=service status=ok task_id={task_id} assignees={}",
            user_ids.len()
        );
        Ok(user_ids)
    }

    fn require_project(&self, project_id: ProjectId) -> Result<Project, InviteServiceError> {
        self.directory
            .get_project(project_id)?
            .ok_or(InviteServiceError::ProjectNotFound(project_id))
    }

    fn active_invitees(&self, project_id: ProjectId) -> Result<HashSet<UserId>, InviteServiceError> {
        Ok(self
            .invitations
            .list_for_project(project_id)?
            .into_iter()
            .filter(|invitation| invitation.status != InvitationStatus::Refused)
            .map(|invitation| invitation.invitee_id)
            .collect())
    }
}
