//! Error types for the enigmacrypt library.

use thiserror::Error;

/// Errors produced while configuring or driving an [`EnigmaMachine`](crate::EnigmaMachine).
///
/// Every configuration problem is reported eagerly by the setter that
/// received the bad input. A configured machine never fails while
/// transforming letters of the `A`..`Z` alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// Wrong number of rotors, dials or plugboard pairs, a malformed pair
    /// token, or a letter reused across plugboard pairs.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human readable description of the offending input.
        reason: String,
    },
    /// A rotor or reflector selector outside its fixed set.
    #[error("{selector} selector {value} is out of range (0..={max})")]
    OutOfRange {
        /// Which selector was rejected (`"rotor"` or `"reflector"`).
        selector: &'static str,
        /// The rejected value.
        value: usize,
        /// Largest accepted value.
        max: usize,
    },
    /// A character outside `A`..`Z` was handed to the cipher.
    #[error("character {0:?} is not an uppercase letter A-Z")]
    InvalidCharacter(char),
}

impl EnigmaError {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        EnigmaError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
