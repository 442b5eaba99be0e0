//! Transient collaborator selection used while composing invitations or
//! editing task assignees.
//!
//! # Responsibility
//! - Own the candidate -> checked mapping of one editing session.
//! - Produce an immutable snapshot on confirm; drop everything on cancel.
//!
//! # Invariants
//! - `confirm` and `cancel` both end the session; the set is idle afterwards
//!   and must be re-initialized before reuse.
//! - Nothing here touches persisted state.

use crate::model::user::{User, UserId};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// No editing session is open.
    NotInitialized,
    /// User is not part of the candidate set of the current session.
    UnknownCandidate(UserId),
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "collaborator selection is not initialized"),
            Self::UnknownCandidate(id) => write!(f, "user {id} is not a selection candidate"),
        }
    }
}

impl Error for SelectionError {}

/// One candidate and its checked flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub user: User,
    pub checked: bool,
}

/// Final selection produced by [`CollaboratorSelectionSet::confirm`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    entries: HashMap<UserId, SelectionEntry>,
}

impl SelectionSnapshot {
    pub fn entries(&self) -> &HashMap<UserId, SelectionEntry> {
        &self.entries
    }

    /// Checked flag of one candidate, `None` if the user was not a candidate.
    pub fn checked(&self, user_id: UserId) -> Option<bool> {
        self.entries.get(&user_id).map(|entry| entry.checked)
    }

    pub fn is_selected(&self, user_id: UserId) -> bool {
        self.checked(user_id).unwrap_or(false)
    }

    /// Checked users ordered by username, then id.
    pub fn selected(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self
            .entries
            .values()
            .filter_map(|entry| entry.checked.then_some(&entry.user))
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username).then(a.id.cmp(&b.id)));
        users
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Check/uncheck state for one editing session, keyed by user id.
#[derive(Debug, Default)]
pub struct CollaboratorSelectionSet {
    working: Option<HashMap<UserId, SelectionEntry>>,
}

impl CollaboratorSelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session, replacing any previous working set entirely.
    ///
    /// A user listed twice keeps the last flag given.
    pub fn initialize<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = (User, bool)>,
    {
        let working = candidates
            .into_iter()
            .map(|(user, checked)| (user.id, SelectionEntry { user, checked }))
            .collect();
        self.working = Some(working);
    }

    pub fn is_active(&self) -> bool {
        self.working.is_some()
    }

    /// Sets one candidate's checked flag. Setting the same value twice is a no-op.
    ///
    /// Candidates are matched by id only, so any copy of the user works.
    pub fn toggle(&mut self, user: &User, checked: bool) -> Result<(), SelectionError> {
        let working = self.working.as_mut().ok_or(SelectionError::NotInitialized)?;
        let entry = working
            .get_mut(&user.id)
            .ok_or(SelectionError::UnknownCandidate(user.id))?;
        entry.checked = checked;
        Ok(())
    }

    /// Current checked flag of one candidate, if a session is open.
    pub fn is_checked(&self, user: &User) -> Option<bool> {
        self.working
            .as_ref()?
            .get(&user.id)
            .map(|entry| entry.checked)
    }

    /// Ends the session and returns the final selection.
    pub fn confirm(&mut self) -> Result<SelectionSnapshot, SelectionError> {
        let entries = self.working.take().ok_or(SelectionError::NotInitialized)?;
        Ok(SelectionSnapshot { entries })
    }

    /// Ends the session without producing a selection.
    pub fn cancel(&mut self) -> Result<(), SelectionError> {
        self.working
            .take()
            .map(|_| ())
            .ok_or(SelectionError::NotInitialized)
    }
}
