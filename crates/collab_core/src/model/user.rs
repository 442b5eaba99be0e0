//! User record.
//!
//! # Invariants
//! - `username` is unique in storage and never blank.
//! - The password credential is opaque: core never inspects, logs or
//!   serializes it.

use crate::model::validation::{
    ensure_email, ensure_not_blank, ensure_not_nil, ModelValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use uuid::Uuid;

pub type UserId = Uuid;

/// Opaque password credential (typically a hash produced by the auth layer).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw stored value, for persistence adapters only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// A person who can author projects and send or receive invitations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip)]
    pub password: Credential,
}

impl User {
    /// Creates a user with a generated id and an empty credential.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            password: Credential::default(),
        }
    }

    pub fn with_password(mut self, password: Credential) -> Self {
        self.password = password;
        self
    }

    /// `"First Last"`, falling back to the username when both are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        ensure_not_nil("user", self.id)?;
        ensure_not_blank("user", "username", &self.username)?;
        ensure_email(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::{Credential, User};

    #[test]
    fn debug_output_redacts_credential() {
        let user = User::new("ada", "ada@example.org", "Ada", "Lovelace")
            .with_password(Credential::new("s3cr3t-hash"));
        let rendered = format!("{user:?}");
        assert!(!rendered.contains("s3cr3t-hash"));
        assert!(rendered.contains("Credential(***)"));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let named = User::new("ada", "ada@example.org", "Ada", "Lovelace");
        assert_eq!(named.display_name(), "Ada Lovelace");

        let anonymous = User::new("ghost", "ghost@example.org", " ", "");
        assert_eq!(anonymous.display_name(), "ghost");
    }
}
