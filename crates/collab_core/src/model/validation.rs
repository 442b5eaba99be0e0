//! Shared validation error for domain records.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
});

/// Validation failures for domain records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Record identifier is the nil UUID.
    NilId { record: &'static str },
    /// Required text field is blank after trim.
    BlankField {
        record: &'static str,
        field: &'static str,
    },
    /// E-mail does not look like `local@domain.tld`.
    InvalidEmail(String),
    /// Inviter and invitee are the same user.
    SelfInvitation(Uuid),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId { record } => write!(f, "{record} id must not be nil"),
            Self::BlankField { record, field } => {
                write!(f, "{record}.{field} must not be blank")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::SelfInvitation(id) => write!(f, "user {id} cannot invite themselves"),
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn ensure_not_nil(record: &'static str, id: Uuid) -> Result<(), ModelValidationError> {
    if id.is_nil() {
        return Err(ModelValidationError::NilId { record });
    }
    Ok(())
}

pub(crate) fn ensure_not_blank(
    record: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::BlankField { record, field });
    }
    Ok(())
}

pub(crate) fn ensure_email(value: &str) -> Result<(), ModelValidationError> {
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(ModelValidationError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_email, ensure_not_blank, ModelValidationError};

    #[test]
    fn email_check_accepts_plain_addresses() {
        ensure_email("ada@example.org").expect("plain address should pass");
        ensure_email(" grace@navy.mil ").expect("surrounding spaces are trimmed");
    }

    #[test]
    fn email_check_rejects_missing_domain() {
        let err = ensure_email("ada@").expect_err("missing domain must fail");
        assert_eq!(err, ModelValidationError::InvalidEmail("ada@".to_string()));
    }

    #[test]
    fn blank_check_reports_record_and_field() {
        let err = ensure_not_blank("project", "title", "   ").expect_err("blank must fail");
        assert_eq!(err.to_string(), "project.title must not be blank");
    }
}
