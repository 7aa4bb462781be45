//! Form payloads for user create and update.
//!
//! Browsers omit fields freely, so every field is optional here and
//! validation decides what a missing value means.

use serde::{Deserialize, Serialize};

use super::types::{User, UserId};

/// Submitted user form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserForm {
    /// Build a form with both fields set.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    /// The empty template shown by the new-user page.
    pub fn blank() -> Self {
        Self::new("", "")
    }

    /// Submitted name, or `""` when the field was absent.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Submitted email, or `""` when the field was absent.
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self::new(user.name.clone(), user.email.clone())
    }
}

/// Input to `UserRepository::save`.
///
/// `id == None` inserts a new row; `Some(id)` overwrites the row with that id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
}

impl UserDraft {
    /// Build an insert draft from a validated form.
    ///
    /// Surrounding whitespace is stripped, matching what validation treats as
    /// blank.
    pub fn new(form: UserForm) -> Self {
        Self {
            id: None,
            name: form.name().trim().to_string(),
            email: form.email().trim().to_string(),
        }
    }

    /// Target an existing row.
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }
}
