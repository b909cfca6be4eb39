//! Machine settings loaded from TOML.
//!
//! ```toml
//! rotors = ["I", "II", "IV"]
//! reflector = "B"
//! plugboard = "SZ GT DV KU FO MY EW JN IX LQ"
//! positions = "ABC"
//! ```
//!
//! Every field is optional and falls back to the default machine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enigma::{parse_positions, EnigmaMachine};
use crate::error::EnigmaError;
use crate::plugboard::Plugboard;
use crate::reflector::ReflectorType;
use crate::rotor::RotorType;

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unexpected fields.
    #[error("failed to parse config: {source}")]
    ParseToml {
        #[source]
        source: toml::de::Error,
    },

    /// The settings parsed but describe an impossible machine.
    #[error(transparent)]
    Machine(#[from] EnigmaError),
}

/// Serializable description of a machine setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Rotor labels or ordinals, fastest first.
    pub rotors: Vec<RotorType>,
    pub reflector: ReflectorType,
    /// Whitespace separated plugboard pairs, e.g. `"AB CD"`.
    pub plugboard: String,
    /// Three dial letters, e.g. `"ABC"` or `"A B C"`.
    pub positions: String,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            rotors: vec![RotorType::I, RotorType::II, RotorType::III],
            reflector: ReflectorType::B,
            plugboard: String::new(),
            positions: "AAA".to_string(),
        }
    }
}

impl MachineConfig {
    /// Reads and parses a TOML settings file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML settings.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::ParseToml { source })
    }

    /// Validates the settings and builds a machine at the configured dials.
    ///
    /// # Errors
    /// Returns [`ConfigError::Machine`] wrapping the first problem found.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmacrypt::config::MachineConfig;
    ///
    /// let config = MachineConfig::from_toml_str(r#"
    ///     rotors = ["I", "II", "III"]
    ///     plugboard = "SZ GT DV KU FO MY EW JN IX LQ"
    ///     positions = "ABC"
    /// "#).unwrap();
    /// let mut machine = config.build().unwrap();
    /// assert_eq!(machine.encrypt("HELLO").unwrap(), "PSGHM");
    /// ```
    pub fn build(&self) -> Result<EnigmaMachine, ConfigError> {
        let rotors = <[RotorType; 3]>::try_from(self.rotors.as_slice()).map_err(|_| {
            EnigmaError::InvalidConfiguration {
                reason: format!("expected 3 rotors, got {}", self.rotors.len()),
            }
        })?;
        let plugboard = Plugboard::parse_pairs(&self.plugboard)?;
        let positions = parse_positions(&self.positions)?;
        Ok(EnigmaMachine::with_settings(
            rotors,
            self.reflector,
            plugboard,
            positions,
        ))
    }
}
