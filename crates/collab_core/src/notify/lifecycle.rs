//! Invitation answer state machine.
//!
//! # Responsibility
//! - Apply `Answer`s to invitations as pure value transformations.
//! - Report rejected transitions per item without aborting a batch.
//!
//! # Invariants
//! - `Waiting -> Accepted | Refused` are the only transitions.
//! - Inputs are never mutated; callers persist returned values.
//! - Batch output keeps the input order of `invitations`.

use crate::model::invitation::{Answer, Invitation, InvitationId, InvitationStatus};
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// Answer targeted an invitation that is no longer waiting.
    InvalidTransition {
        invitation_id: InvitationId,
        status: InvitationStatus,
    },
    /// Answer references an invitation that was not supplied.
    UnknownInvitation(InvitationId),
}

impl Display for LifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition {
                invitation_id,
                status,
            } => write!(
                f,
                "invitation {invitation_id} is already {} and cannot be answered",
                status.as_str()
            ),
            Self::UnknownInvitation(id) => write!(f, "unknown invitation: {id}"),
        }
    }
}

impl Error for LifecycleError {}

/// Outcome of [`respond_batch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvitationAnswerResult {
    /// Transitioned invitations, not yet persisted.
    pub succeeded: Vec<Invitation>,
    pub failures: Vec<(InvitationId, LifecycleError)>,
}

impl InvitationAnswerResult {
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Answers one invitation.
///
/// # Errors
/// - `InvalidTransition` when `invitation.status` is not `Waiting`.
pub fn respond(invitation: &Invitation, answer: Answer) -> Result<Invitation, LifecycleError> {
    if invitation.status != InvitationStatus::Waiting {
        return Err(LifecycleError::InvalidTransition {
            invitation_id: invitation.id,
            status: invitation.status,
        });
    }

    let mut answered = invitation.clone();
    answered.status = answer.target_status();
    Ok(answered)
}

/// Answers every invitation that has an entry in `answers`, best-effort.
///
/// Invitations without an answer are skipped. Answers for ids absent from
/// `invitations` are reported as `UnknownInvitation` after the per-item
/// failures, ordered by id.
pub fn respond_batch(
    invitations: &[Invitation],
    answers: &HashMap<InvitationId, Answer>,
) -> InvitationAnswerResult {
    let mut result = InvitationAnswerResult::default();
    let mut seen = BTreeSet::new();

    for invitation in invitations {
        let Some(answer) = answers.get(&invitation.id) else {
            continue;
        };
        seen.insert(invitation.id);
        match respond(invitation, *answer) {
            Ok(answered) => result.succeeded.push(answered),
            Err(err) => result.failures.push((invitation.id, err)),
        }
    }

    let unknown: BTreeSet<InvitationId> = answers
        .keys()
        .filter(|id| !seen.contains(*id))
        .copied()
        .collect();
    for id in unknown {
        result
            .failures
            .push((id, LifecycleError::UnknownInvitation(id)));
    }

    result
}
