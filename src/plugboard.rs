//! Plugboard: static involutive letter swap applied on entry and exit.

use crate::error::EnigmaError;
use crate::utils::alphabet::{index_to_letter, setting_to_index};
use crate::wiring::ALPHABET_LEN;

/// Maximum number of cables that can be plugged in.
pub const PLUGBOARD_MAX_PAIRS: usize = 10;

/// Identity mapping over the alphabet.
const IDENTITY: [usize; ALPHABET_LEN] = {
    let mut table = [0; ALPHABET_LEN];
    let mut i = 0;
    while i < ALPHABET_LEN {
        table[i] = i;
        i += 1;
    }
    table
};

/// Swaps letters connected by a cable; every other letter maps to itself.
///
/// The mapping is always an involution: whenever `a` is wired to `b`,
/// `b` is wired back to `a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    table: [usize; ALPHABET_LEN],
}

impl Default for Plugboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugboard {
    /// Creates an empty plugboard (identity mapping).
    pub fn new() -> Self {
        Plugboard { table: IDENTITY }
    }

    /// Creates a plugboard wired with `pairs`.
    ///
    /// # Errors
    /// See [`configure`](Self::configure).
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmacrypt::Plugboard;
    ///
    /// let pb = Plugboard::from_pairs(&["AB", "cd"]).unwrap();
    /// assert_eq!(pb.exchange(0), 1);
    /// assert_eq!(pb.exchange(3), 2);
    /// assert_eq!(pb.exchange(4), 4);
    /// ```
    pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self, EnigmaError> {
        let mut plugboard = Self::new();
        plugboard.configure(pairs)?;
        Ok(plugboard)
    }

    /// Parses a whitespace separated setting such as `"SZ GT DV"`.
    ///
    /// An empty or blank setting leaves every letter unplugged.
    pub fn parse_pairs(setting: &str) -> Result<Self, EnigmaError> {
        let pairs: Vec<&str> = setting.split_whitespace().collect();
        Self::from_pairs(&pairs)
    }

    /// Rewires the plugboard from scratch with the given two-letter tokens.
    ///
    /// Letters are case-insensitive. Both directions of every pair are
    /// set explicitly. On error the current wiring is left untouched.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] if more than
    /// [`PLUGBOARD_MAX_PAIRS`] pairs are given, a token is not exactly
    /// two letters, a token pairs a letter with itself, or a letter
    /// appears in more than one pair.
    pub fn configure<S: AsRef<str>>(&mut self, pairs: &[S]) -> Result<(), EnigmaError> {
        if pairs.len() > PLUGBOARD_MAX_PAIRS {
            return Err(EnigmaError::invalid_configuration(format!(
                "at most {} plugboard pairs allowed, got {}",
                PLUGBOARD_MAX_PAIRS,
                pairs.len()
            )));
        }

        let mut table = IDENTITY;
        let mut used = [false; ALPHABET_LEN];
        for token in pairs {
            let token = token.as_ref();
            let (a, b) = parse_pair(token)?;
            if a == b {
                return Err(EnigmaError::invalid_configuration(format!(
                    "plugboard pair {:?} connects a letter to itself",
                    token
                )));
            }
            if used[a] || used[b] {
                return Err(EnigmaError::invalid_configuration(format!(
                    "plugboard pair {:?} reuses a letter already plugged",
                    token
                )));
            }
            used[a] = true;
            used[b] = true;
            table[a] = b;
            table[b] = a;
        }

        self.table = table;
        Ok(())
    }

    /// Returns the partner of `index`, or `index` itself when unplugged.
    pub fn exchange(&self, index: usize) -> usize {
        self.table[index % ALPHABET_LEN]
    }

    /// Returns the plugged pairs in alphabetical order of their first letter.
    pub fn pairs(&self) -> Vec<(char, char)> {
        self.table
            .iter()
            .enumerate()
            .filter(|&(a, &b)| a < b)
            .map(|(a, &b)| (index_to_letter(a), index_to_letter(b)))
            .collect()
    }
}

/// Splits a two-letter token into its alphabet indices.
fn parse_pair(token: &str) -> Result<(usize, usize), EnigmaError> {
    let malformed = || {
        EnigmaError::invalid_configuration(format!(
            "plugboard pair {:?} must be exactly two letters A-Z",
            token
        ))
    };

    let mut chars = token.chars();
    let (Some(first), Some(second), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(malformed());
    };
    let a = setting_to_index(first).map_err(|_| malformed())?;
    let b = setting_to_index(second).map_err(|_| malformed())?;
    Ok((a, b))
}
