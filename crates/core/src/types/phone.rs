//! Algerian mobile phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Mobile prefixes accepted for delivery contact numbers.
pub const MOBILE_PREFIXES: [&str; 3] = ["05", "06", "07"];

/// Maximum digits kept when cleaning raw input.
pub const PHONE_LENGTH: usize = 10;

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneError {
    /// The cleaned input is not exactly ten digits.
    #[error("phone number must be 10 digits")]
    WrongLength,
    /// The number does not start with an accepted mobile prefix.
    #[error("phone number must start with 05, 06 or 07")]
    InvalidPrefix,
}

/// A validated Algerian mobile phone number.
///
/// ## Constraints
///
/// - Exactly 10 digits
/// - Starts with one of the mobile prefixes 05, 06 or 07
///
/// Raw keystrokes go through [`PhoneNumber::clean`] first, which strips
/// everything that is not a digit and truncates to ten characters; the
/// checkout form stores the cleaned string and re-validates on every edit.
///
/// ## Examples
///
/// ```
/// use boutik_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("0512345678").is_ok());
/// assert!(PhoneNumber::parse("051234567").is_err()); // 9 digits
/// assert!(PhoneNumber::parse("0812345678").is_err()); // bad prefix
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Strip non-digit characters and truncate to ten digits.
    ///
    /// This is the keystroke filter: it never fails, and its output is what
    /// the form field displays back to the customer.
    #[must_use]
    pub fn clean(raw: &str) -> String {
        raw.chars()
            .filter(char::is_ascii_digit)
            .take(PHONE_LENGTH)
            .collect()
    }

    /// Parse a `PhoneNumber` from already-cleaned or raw input.
    ///
    /// # Errors
    ///
    /// Returns an error if the cleaned input is not exactly ten digits or
    /// does not start with an accepted mobile prefix.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let cleaned = Self::clean(s);

        if cleaned.len() != PHONE_LENGTH {
            return Err(PhoneError::WrongLength);
        }

        if !MOBILE_PREFIXES.iter().any(|p| cleaned.starts_with(p)) {
            return Err(PhoneError::InvalidPrefix);
        }

        Ok(Self(cleaned))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
