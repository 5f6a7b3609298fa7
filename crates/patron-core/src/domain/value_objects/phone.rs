//! Phone Value Object
//!
//! Phone number kept in the form the customer record carries it.
//! Audience filters match on the raw string, so no normalization is applied
//! beyond trimming; the original formatting (dashes, spaces, country prefix)
//! is preserved for display and substring search.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phone number value object, raw-preserving
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    /// Create a phone number from user or API input
    pub fn new(value: impl Into<String>) -> Result<Self, PhoneError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'))
        {
            return Err(PhoneError::InvalidCharacters);
        }

        let digit_count = value.chars().filter(|c| c.is_ascii_digit()).count();
        if digit_count < 7 || digit_count > 15 {
            return Err(PhoneError::InvalidLength);
        }

        Ok(Self(value))
    }

    /// Get the phone number exactly as stored
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring match against the raw string, as the segment filter expects
    pub fn contains_fragment(&self, fragment: &str) -> bool {
        self.0.contains(fragment)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    Empty,
    InvalidLength,
    InvalidCharacters,
}

impl std::error::Error for PhoneError {}

impl fmt::Display for PhoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Phone number cannot be empty"),
            Self::InvalidLength => write!(f, "Invalid phone number length"),
            Self::InvalidCharacters => write!(f, "Phone number contains invalid characters"),
        }
    }
}
