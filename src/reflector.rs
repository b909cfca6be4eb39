//! Reflector: fixed involution that sends the signal back through the rotors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EnigmaError;
use crate::wiring::{ALPHABET_LEN, NUM_REFLECTORS, REFLECTOR_WIRINGS};

/// Selects one of the two reflector wirings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReflectorType {
    /// Umkehrwalze B.
    #[default]
    B,
    /// Umkehrwalze C.
    C,
}

impl ReflectorType {
    /// Both reflectors in selector order.
    pub const ALL: [ReflectorType; NUM_REFLECTORS] = [ReflectorType::B, ReflectorType::C];

    /// Selector ordinal: `0` for B, `1` for C.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Looks up a reflector by ordinal.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfRange`] if `index > 1`.
    pub fn from_index(index: usize) -> Result<Self, EnigmaError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(EnigmaError::OutOfRange {
                selector: "reflector",
                value: index,
                max: NUM_REFLECTORS - 1,
            })
    }
}

impl fmt::Display for ReflectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectorType::B => write!(f, "B"),
            ReflectorType::C => write!(f, "C"),
        }
    }
}

impl FromStr for ReflectorType {
    type Err = EnigmaError;

    /// Parses `"B"` or `"C"`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "B" => Ok(ReflectorType::B),
            "C" => Ok(ReflectorType::C),
            other => Err(EnigmaError::invalid_configuration(format!(
                "unknown reflector {:?}, expected B or C",
                other
            ))),
        }
    }
}

/// Stateless reflector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflector {
    kind: ReflectorType,
    wiring: &'static [usize; ALPHABET_LEN],
}

impl Reflector {
    /// Creates the reflector for the given wiring.
    pub fn new(kind: ReflectorType) -> Self {
        Reflector {
            kind,
            wiring: &REFLECTOR_WIRINGS[kind.index()],
        }
    }

    /// Creates a reflector from its selector ordinal (`0` = B, `1` = C).
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfRange`] for any other ordinal.
    pub fn from_index(index: usize) -> Result<Self, EnigmaError> {
        ReflectorType::from_index(index).map(Self::new)
    }

    /// Wiring currently installed.
    pub fn kind(&self) -> ReflectorType {
        self.kind
    }

    /// Maps `index` through the reflector wiring.
    pub fn reflect(&self, index: usize) -> usize {
        self.wiring[index % ALPHABET_LEN]
    }
}
