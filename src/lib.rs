//! Three-rotor Enigma cipher machine simulator.
//!
//! Reproduces the letter-by-letter substitution of a rotor cipher machine
//! over the 26 letters `A`..`Z`. Every letter passes through a plugboard,
//! three rotors, a reflector, back through the rotors and the plugboard
//! again. The fastest rotor steps before each letter, and slower rotors
//! turn over when the one before them reaches its notch.
//!
//! The cipher is reciprocal: the same machine, started from the same dial
//! positions, turns ciphertext back into plaintext. It is a simulation of
//! a historically broken cipher and offers no protection for real data.
//!
//! # Architecture
//!
//! ```text
//! Plugboard     (static involution, up to 10 pairs)
//!     ↕
//! Rotor × 3     (wiring + inverse + dial + notch, chained fastest → slowest)
//!     ↕
//! Reflector     (static involution, B or C)
//!
//! EnigmaMachine (owns all of the above, drives stepping and the signal path)
//! ```
//!
//! Stepping is a single-step cascade: the historical double step of the
//! middle rotor is not modelled.
//!
//! # Examples
//!
//! ```
//! use enigmacrypt::{EnigmaMachine, Plugboard, ReflectorType, RotorType};
//!
//! let mut machine = EnigmaMachine::with_settings(
//!     [RotorType::I, RotorType::II, RotorType::IV],
//!     ReflectorType::B,
//!     Plugboard::parse_pairs("SZ GT DV KU FO MY EW JN IX LQ").unwrap(),
//!     [0, 1, 2],
//! );
//!
//! let cipher = machine.encrypt("HELLO").unwrap();
//! assert_eq!(cipher, "TJGXN");
//!
//! machine.reset();
//! assert_eq!(machine.decrypt(&cipher).unwrap(), "HELLO");
//! ```
//!
//! Free text goes through the escaping helpers first:
//!
//! ```
//! use enigmacrypt::utils::escape::{escape, unescape};
//! use enigmacrypt::EnigmaMachine;
//!
//! let mut machine = EnigmaMachine::new();
//! let cipher = machine.encrypt(&escape("Hi, 9.")).unwrap();
//! machine.reset();
//! assert_eq!(unescape(&machine.decrypt(&cipher).unwrap()), "HI, 9.");
//! ```

#![deny(clippy::all)]

pub mod config;
pub mod error;
pub mod utils;
pub mod wiring;

mod enigma;
mod plugboard;
mod reflector;
mod rotor;

pub use enigma::{parse_positions, EnigmaMachine, NUM_SLOTS};
pub use error::EnigmaError;
pub use plugboard::{Plugboard, PLUGBOARD_MAX_PAIRS};
pub use reflector::{Reflector, ReflectorType};
pub use rotor::{parse_rotors, Rotor, RotorType};
