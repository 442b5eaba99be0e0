//! Task record.

use crate::model::project::ProjectId;
use crate::model::validation::{ensure_not_blank, ensure_not_nil, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = Uuid;

/// A unit of work inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub project_id: ProjectId,
    /// Deadline in UTC epoch milliseconds. Rendered in the local zone.
    pub end_date: i64,
}

impl Task {
    pub fn new(description: impl Into<String>, project_id: ProjectId, end_date: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            project_id,
            end_date,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        ensure_not_nil("task", self.id)?;
        ensure_not_nil("task project", self.project_id)?;
        ensure_not_blank("task", "description", &self.description)
    }
}
