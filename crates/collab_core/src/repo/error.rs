//! Persistence error shared by every repository.

use crate::db::DbError;
use crate::model::invitation::InvitationId;
use crate::model::validation::ModelValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Any repository failure: validation, transport, or semantic.
#[derive(Debug)]
pub enum PersistenceError {
    Validation(ModelValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: Uuid },
    /// Invitation was answered elsewhere before this write landed.
    StaleStatus(InvitationId),
    InvalidData(String),
}

impl PersistenceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::StaleStatus(id) => write!(f, "invitation {id} is no longer waiting"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::StaleStatus(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for PersistenceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for PersistenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
