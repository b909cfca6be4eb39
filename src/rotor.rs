//! Rotor: a wired wheel with a rotating dial and a turnover notch.
//!
//! Rotors are stored in a [`RotorArena`] and linked to the next, slower
//! rotor by [`RotorId`]. Stepping follows those links, so the chain needs
//! no shared mutable references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::EnigmaError;
use crate::wiring::{ALPHABET_LEN, NUM_ROTORS, ROTOR_NOTCHES, ROTOR_WIRINGS};

/// Selects one of the five rotor wirings.
///
/// Serializes as its Roman label and deserializes from a label or an
/// ordinal, so settings files may write `"III"`, `"2"` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RotorSetting")]
pub enum RotorType {
    I,
    II,
    III,
    IV,
    V,
}

impl RotorType {
    /// All rotors in selector order.
    pub const ALL: [RotorType; NUM_ROTORS] = [
        RotorType::I,
        RotorType::II,
        RotorType::III,
        RotorType::IV,
        RotorType::V,
    ];

    /// Selector ordinal, `0` for I up to `4` for V.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Looks up a rotor by ordinal.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfRange`] if `index > 4`.
    pub fn from_index(index: usize) -> Result<Self, EnigmaError> {
        Self::ALL.get(index).copied().ok_or(EnigmaError::OutOfRange {
            selector: "rotor",
            value: index,
            max: NUM_ROTORS - 1,
        })
    }

    /// Turnover notch of this wiring, as a dial value.
    pub fn notch(self) -> usize {
        ROTOR_NOTCHES[self.index()]
    }
}

impl fmt::Display for RotorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RotorType::I => "I",
            RotorType::II => "II",
            RotorType::III => "III",
            RotorType::IV => "IV",
            RotorType::V => "V",
        };
        f.write_str(label)
    }
}

impl FromStr for RotorType {
    type Err = EnigmaError;

    /// Accepts the Roman label (`I`..`V`, any case) or the ordinal `0`..`4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(ordinal) = s.parse::<usize>() {
            return Self::from_index(ordinal);
        }
        match s.to_ascii_uppercase().as_str() {
            "I" => Ok(RotorType::I),
            "II" => Ok(RotorType::II),
            "III" => Ok(RotorType::III),
            "IV" => Ok(RotorType::IV),
            "V" => Ok(RotorType::V),
            _ => Err(EnigmaError::invalid_configuration(format!(
                "unknown rotor {:?}, expected I-V or 0-4",
                s
            ))),
        }
    }
}

/// Rotor selector as written in a settings file.
#[derive(Deserialize)]
#[serde(untagged)]
enum RotorSetting {
    Ordinal(usize),
    Label(String),
}

impl TryFrom<RotorSetting> for RotorType {
    type Error = EnigmaError;

    fn try_from(setting: RotorSetting) -> Result<Self, Self::Error> {
        match setting {
            RotorSetting::Ordinal(index) => Self::from_index(index),
            RotorSetting::Label(label) => label.parse(),
        }
    }
}

/// Parses three whitespace separated rotor labels such as `"I II IV"`,
/// fastest rotor first.
///
/// # Errors
/// Returns [`EnigmaError::InvalidConfiguration`] unless exactly three
/// labels are given, and whatever [`RotorType::from_str`] reports for a
/// bad label.
pub fn parse_rotors(setting: &str) -> Result<[RotorType; 3], EnigmaError> {
    let labels: Vec<&str> = setting.split_whitespace().collect();
    let [a, b, c] = labels.as_slice() else {
        return Err(EnigmaError::invalid_configuration(format!(
            "expected 3 rotors, got {}",
            labels.len()
        )));
    };
    Ok([a.parse()?, b.parse()?, c.parse()?])
}

/// Unique identifier for a rotor within an arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RotorId(pub usize);

/// A single rotor: forward wiring, its inverse, notch and current dial.
#[derive(Debug, Clone)]
pub struct Rotor {
    kind: RotorType,
    wiring: &'static [usize; ALPHABET_LEN],
    inverse: [usize; ALPHABET_LEN],
    notch: usize,
    dial: usize,
    next: Option<RotorId>,
}

impl Rotor {
    /// Creates a rotor at dial `A` with no successor.
    ///
    /// The inverse wiring is derived once here.
    pub fn new(kind: RotorType) -> Self {
        let wiring = &ROTOR_WIRINGS[kind.index()];
        let mut inverse = [0; ALPHABET_LEN];
        for (i, &out) in wiring.iter().enumerate() {
            inverse[out] = i;
        }
        Rotor {
            kind,
            wiring,
            inverse,
            notch: kind.notch(),
            dial: 0,
            next: None,
        }
    }

    /// Creates a rotor from its selector ordinal.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfRange`] if `index > 4`.
    pub fn from_index(index: usize) -> Result<Self, EnigmaError> {
        RotorType::from_index(index).map(Self::new)
    }

    /// Wiring installed in this rotor.
    pub fn kind(&self) -> RotorType {
        self.kind
    }

    /// Current dial position (`0` = `A`).
    pub fn dial(&self) -> usize {
        self.dial
    }

    /// Sets the dial; out-of-range values are reduced modulo 26.
    pub fn set_dial(&mut self, position: usize) {
        self.dial = position % ALPHABET_LEN;
    }

    /// Turnover notch of this rotor.
    pub fn notch(&self) -> usize {
        self.notch
    }

    /// Whether the dial currently sits on the notch.
    pub fn at_notch(&self) -> bool {
        self.dial == self.notch
    }

    /// Moves the dial one position. Returns `true` when the new position
    /// is the notch, meaning the next rotor must step as well.
    pub fn advance(&mut self) -> bool {
        self.dial = (self.dial + 1) % ALPHABET_LEN;
        self.at_notch()
    }

    /// Entry-to-reflector direction: offset by the dial, then substitute.
    pub fn forward(&self, index: usize) -> usize {
        self.wiring[(index % ALPHABET_LEN + self.dial) % ALPHABET_LEN]
    }

    /// Reflector-to-entry direction, the exact inverse of [`forward`](Self::forward)
    /// for the current dial.
    pub fn reverse(&self, index: usize) -> usize {
        (self.inverse[index % ALPHABET_LEN] + ALPHABET_LEN - self.dial) % ALPHABET_LEN
    }
}

/// Arena owning the rotors of one machine and the stepping chain between them.
#[derive(Debug, Clone, Default)]
pub(crate) struct RotorArena {
    rotors: Vec<Rotor>,
}

impl RotorArena {
    /// Creates an empty arena with room for `capacity` rotors.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        RotorArena {
            rotors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a rotor and returns its id.
    pub(crate) fn push(&mut self, rotor: Rotor) -> RotorId {
        let id = RotorId(self.rotors.len());
        self.rotors.push(rotor);
        id
    }

    /// Makes `next` the rotor that `id` turns over at its notch.
    pub(crate) fn set_next(&mut self, id: RotorId, next: RotorId) {
        self.rotors[id.0].next = Some(next);
    }

    pub(crate) fn get(&self, id: RotorId) -> &Rotor {
        &self.rotors[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: RotorId) -> &mut Rotor {
        &mut self.rotors[id.0]
    }

    /// Steps rotor `id` and cascades along the chain: every rotor whose
    /// dial lands on its notch steps its successor once.
    pub(crate) fn step(&mut self, id: RotorId) {
        let mut current = id;
        loop {
            let rotor = &mut self.rotors[current.0];
            if !rotor.advance() {
                break;
            }
            match rotor.next {
                Some(next) => {
                    trace!(rotor = %rotor.kind, notch = rotor.notch, "turnover");
                    current = next;
                }
                None => break,
            }
        }
    }

    #[allow(dead_code)]
    pub(crate) fn len(&self) -> usize {
        self.rotors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(kinds: [RotorType; 3]) -> (RotorArena, [RotorId; 3]) {
        let mut arena = RotorArena::with_capacity(3);
        let ids = kinds.map(|k| arena.push(Rotor::new(k)));
        arena.set_next(ids[0], ids[1]);
        arena.set_next(ids[1], ids[2]);
        (arena, ids)
    }

    #[test]
    fn test_inverse_matches_wiring() {
        for kind in RotorType::ALL {
            let mut rotor = Rotor::new(kind);
            for dial in 0..ALPHABET_LEN {
                rotor.set_dial(dial);
                for i in 0..ALPHABET_LEN {
                    assert_eq!(rotor.reverse(rotor.forward(i)), i);
                    assert_eq!(rotor.forward(rotor.reverse(i)), i);
                }
            }
        }
    }

    #[test]
    fn test_forward_applies_dial_offset() {
        let mut rotor = Rotor::new(RotorType::I);
        assert_eq!(rotor.forward(0), 4); // A -> E
        rotor.set_dial(1);
        assert_eq!(rotor.forward(0), 10); // B -> K
    }

    #[test]
    fn test_lookups_reduce_large_indices() {
        let mut rotor = Rotor::new(RotorType::III);
        rotor.set_dial(25);
        assert_eq!(rotor.forward(usize::MAX), rotor.forward(usize::MAX % ALPHABET_LEN));
        assert_eq!(rotor.reverse(usize::MAX), rotor.reverse(usize::MAX % ALPHABET_LEN));
        assert_eq!(rotor.forward(26 + 3), rotor.forward(3));
    }

    #[test]
    fn test_set_dial_normalizes() {
        let mut rotor = Rotor::new(RotorType::II);
        rotor.set_dial(27);
        assert_eq!(rotor.dial(), 1);
    }

    #[test]
    fn test_advance_wraps_and_reports_notch() {
        let mut rotor = Rotor::new(RotorType::V);
        rotor.set_dial(24);
        assert!(rotor.advance()); // lands on Z
        assert!(rotor.at_notch());
        assert!(!rotor.advance()); // wraps to A
        assert_eq!(rotor.dial(), 0);
    }

    #[test]
    fn test_step_single_cascade() {
        let (mut arena, ids) = chain([RotorType::I, RotorType::II, RotorType::III]);
        arena.get_mut(ids[0]).set_dial(15);
        arena.step(ids[0]);
        assert_eq!(arena.get(ids[0]).dial(), 16);
        assert_eq!(arena.get(ids[1]).dial(), 1);
        assert_eq!(arena.get(ids[2]).dial(), 0);

        // Leaving the notch does not step the middle rotor again.
        arena.step(ids[0]);
        assert_eq!(arena.get(ids[1]).dial(), 1);
    }

    #[test]
    fn test_step_double_cascade() {
        let (mut arena, ids) = chain([RotorType::I, RotorType::II, RotorType::III]);
        arena.get_mut(ids[0]).set_dial(15);
        arena.get_mut(ids[1]).set_dial(3);
        arena.step(ids[0]);
        assert_eq!(arena.get(ids[0]).dial(), 16);
        assert_eq!(arena.get(ids[1]).dial(), 4);
        assert_eq!(arena.get(ids[2]).dial(), 1);
    }

    #[test]
    fn test_terminal_rotor_stops_cascade() {
        let (mut arena, ids) = chain([RotorType::I, RotorType::II, RotorType::III]);
        arena.get_mut(ids[2]).set_dial(20);
        arena.step(ids[2]);
        assert_eq!(arena.get(ids[2]).dial(), 21);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert!(Rotor::from_index(4).is_ok());
        assert_eq!(
            Rotor::from_index(5).unwrap_err(),
            EnigmaError::OutOfRange {
                selector: "rotor",
                value: 5,
                max: 4
            }
        );
    }

    #[test]
    fn test_parse_labels_and_ordinals() {
        assert_eq!("IV".parse::<RotorType>(), Ok(RotorType::IV));
        assert_eq!("iii".parse::<RotorType>(), Ok(RotorType::III));
        assert_eq!("0".parse::<RotorType>(), Ok(RotorType::I));
        assert_eq!("4".parse::<RotorType>(), Ok(RotorType::V));
        assert!(matches!(
            "5".parse::<RotorType>(),
            Err(EnigmaError::OutOfRange { value: 5, .. })
        ));
        assert!(matches!(
            "VI".parse::<RotorType>(),
            Err(EnigmaError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_parse_rotors() {
        assert_eq!(
            parse_rotors("I II IV"),
            Ok([RotorType::I, RotorType::II, RotorType::IV])
        );
        assert!(matches!(
            parse_rotors("I II"),
            Err(EnigmaError::InvalidConfiguration { .. })
        ));
        assert!(parse_rotors("I II III IV").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for kind in RotorType::ALL {
            assert_eq!(kind.to_string().parse::<RotorType>(), Ok(kind));
        }
    }
}
