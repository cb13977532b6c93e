//! # Input Collector
//!
//! The single free-text field of the bridge. It tracks the current value, a
//! live `length/1000` counter and the validation error from the last failed
//! submit. Editing the field clears that error.

use super::validation::{validate_message, Message, ValidationError, MAX_MESSAGE_CHARS};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputForm {
    value: String,
    error: Option<ValidationError>,
}

impl InputForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the field content.
    pub fn edit(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.error = None;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current field length in characters (untrimmed).
    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn counter(&self) -> String {
        format!("{}/{}", self.char_count(), MAX_MESSAGE_CHARS)
    }

    /// Validation error shown next to the field, if any.
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self, loading: bool) -> bool {
        !loading && !self.value.trim().is_empty()
    }

    /// Validates the field. A rejection is remembered until the next edit.
    pub fn submit(&mut self) -> Result<Message, ValidationError> {
        validate_message(&self.value).inspect_err(|err| {
            self.error = Some(*err);
        })
    }

    pub fn reset(&mut self) {
        self.value.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_zero() {
        let form = InputForm::new();
        assert_eq!(form.counter(), "0/1000");
    }

    #[test]
    fn counter_tracks_every_edit() {
        let mut form = InputForm::new();
        let mut typed = String::new();
        for ch in "Hello".chars() {
            typed.push(ch);
            form.edit(typed.clone());
            assert_eq!(form.char_count(), typed.chars().count());
        }
        assert_eq!(form.counter(), "5/1000");

        form.edit("  hi  ");
        assert_eq!(form.counter(), "6/1000");
    }

    #[test]
    fn submit_disabled_when_blank_or_loading() {
        let mut form = InputForm::new();
        assert!(!form.can_submit(false));

        form.edit("   ");
        assert!(!form.can_submit(false));

        form.edit("valid message");
        assert!(form.can_submit(false));
        assert!(!form.can_submit(true));
    }

    #[test]
    fn failed_submit_shows_error_until_next_edit() {
        let mut form = InputForm::new();
        form.edit("a".repeat(1001));

        assert_eq!(form.submit(), Err(ValidationError::TooLong));
        assert_eq!(form.error(), Some(ValidationError::TooLong));
        // The rejected value stays in the field.
        assert_eq!(form.char_count(), 1001);

        form.edit("a".repeat(1000));
        assert_eq!(form.error(), None);
    }

    #[test]
    fn empty_submit_is_required_error() {
        let mut form = InputForm::new();
        assert_eq!(form.submit(), Err(ValidationError::Required));
        assert_eq!(form.error(), Some(ValidationError::Required));
    }

    #[test]
    fn valid_submit_returns_trimmed_message() {
        let mut form = InputForm::new();
        form.edit("  Test message  ");
        let message = form.submit().unwrap();
        assert_eq!(message.as_str(), "Test message");
        assert_eq!(form.error(), None);

        form.reset();
        assert_eq!(form.value(), "");
        assert_eq!(form.counter(), "0/1000");
    }
}
