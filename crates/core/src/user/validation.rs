use std::collections::BTreeMap;

use super::requests::UserForm;

/// Message attached to every blank required field.
pub const BLANK_MESSAGE: &str = "Can't be blank";

/// Key used for a storage failure that is not tied to a single field.
pub const DATABASE_ERROR_KEY: &str = "db";

/// Field name → error message, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single top-level storage error.
    pub fn database(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(DATABASE_ERROR_KEY, message);
        errors
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Checks that every required field of a user form is present and non-blank.
///
/// Returns an empty [`ValidationErrors`] when the form can be saved. No format,
/// length or uniqueness checks are made.
///
/// # Examples
///
/// ```
/// use userdesk_core::user::{validate, UserForm, BLANK_MESSAGE};
///
/// let errors = validate(&UserForm::new("", "a@b.com"));
/// assert_eq!(errors.get("name"), Some(BLANK_MESSAGE));
/// assert_eq!(errors.get("email"), None);
///
/// assert!(validate(&UserForm::new("Ann", "ann@x.com")).is_empty());
/// ```
pub fn validate(form: &UserForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if is_blank(form.name()) {
        errors.insert("name", BLANK_MESSAGE);
    }
    if is_blank(form.email()) {
        errors.insert("email", BLANK_MESSAGE);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form_has_no_errors() {
        let errors = validate(&UserForm::new("Ann", "ann@x.com"));
        assert!(errors.is_empty());
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_blank_name_only() {
        let errors = validate(&UserForm::new("", "a@b.com"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Can't be blank"));
    }

    #[test]
    fn test_both_blank() {
        let errors = validate(&UserForm::blank());
        assert_eq!(errors.get("name"), Some(BLANK_MESSAGE));
        assert_eq!(errors.get("email"), Some(BLANK_MESSAGE));
    }

    #[test]
    fn test_absent_fields_are_blank() {
        let errors = validate(&UserForm::default());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_whitespace_is_blank() {
        let errors = validate(&UserForm::new("   ", "x@y.com"));
        assert_eq!(errors.get("name"), Some(BLANK_MESSAGE));
    }

    #[test]
    fn test_no_email_format_check() {
        assert!(validate(&UserForm::new("Ann", "not-an-email")).is_empty());
    }

    #[test]
    fn test_database_error() {
        let errors = ValidationErrors::database("Failed to save user");
        assert_eq!(errors.get(DATABASE_ERROR_KEY), Some("Failed to save user"));
        assert_eq!(errors.len(), 1);
    }
}
