//! Message validation rules shared by the input form and the one-shot `send`
//! command.

use std::fmt;
use thiserror::Error;

/// Upper bound on a message, counted in characters after trimming.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Why a candidate message was rejected. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message required")]
    Required,
    #[error("message too long")]
    TooLong,
}

/// A trimmed message of 1 to `MAX_MESSAGE_CHARS` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trims `candidate` and checks it against the length rules.
pub fn validate_message(candidate: &str) -> Result<Message, ValidationError> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ValidationError::TooLong);
    }
    Ok(Message(trimmed.to_string()))
}
