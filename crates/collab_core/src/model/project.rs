//! Project record.

use crate::model::user::UserId;
use crate::model::validation::{ensure_not_blank, ensure_not_nil, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProjectId = Uuid;

/// A collaborative project. `author_id` is attribution only, not ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub author_id: UserId,
}

impl Project {
    pub fn new(title: impl Into<String>, author_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            author_id,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        ensure_not_nil("project", self.id)?;
        ensure_not_nil("project author", self.author_id)?;
        ensure_not_blank("project", "title", &self.title)
    }
}
