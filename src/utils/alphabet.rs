//! Letter to alphabet-index conversion.
//!
//! The cipher components work purely on indices in `0..26`; these helpers
//! are the only place where characters are translated.

use crate::error::EnigmaError;
use crate::wiring::ALPHABET_LEN;

/// Converts an uppercase letter `A`..`Z` to its index `0..26`.
///
/// # Errors
/// Returns [`EnigmaError::InvalidCharacter`] for anything else, including
/// lowercase letters.
pub fn letter_to_index(letter: char) -> Result<usize, EnigmaError> {
    if letter.is_ascii_uppercase() {
        Ok((letter as u8 - b'A') as usize)
    } else {
        Err(EnigmaError::InvalidCharacter(letter))
    }
}

/// Case-insensitive variant of [`letter_to_index`], used when parsing
/// setup strings typed by a person.
pub fn setting_to_index(letter: char) -> Result<usize, EnigmaError> {
    letter_to_index(letter.to_ascii_uppercase())
}

/// Converts an index back to its uppercase letter. The index is reduced
/// modulo 26 first.
pub fn index_to_letter(index: usize) -> char {
    (b'A' + (index % ALPHABET_LEN) as u8) as char
}
