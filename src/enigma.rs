//! EnigmaMachine: three-rotor cipher engine.
//!
//! Wires a plugboard, three chained rotors and a reflector into a single
//! reciprocal letter transform. Rotor 1 (the fastest) steps before every
//! letter; slower rotors only move through the notch cascade.

use tracing::debug;

use crate::error::EnigmaError;
use crate::plugboard::Plugboard;
use crate::reflector::{Reflector, ReflectorType};
use crate::rotor::{Rotor, RotorArena, RotorId, RotorType};
use crate::utils::alphabet::{index_to_letter, letter_to_index, setting_to_index};
use crate::wiring::ALPHABET_LEN;

/// Number of rotors in the machine.
pub const NUM_SLOTS: usize = 3;

/// Default rotor order: I, II, III (fastest first).
const DEFAULT_ROTORS: [RotorType; NUM_SLOTS] = [RotorType::I, RotorType::II, RotorType::III];

/// Three-rotor Enigma cipher engine.
///
/// # Signal path
///
/// ```text
/// plugboard -> rotor1 -> rotor2 -> rotor3 -> reflector
///           <- rotor1 <- rotor2 <- rotor3 <-
/// plugboard
/// ```
///
/// Because the path is symmetric and stepping depends only on how many
/// letters were processed, encryption and decryption are the same
/// operation. Decrypting requires the machine to start from the same dial
/// positions as the encrypting one, see [`reset`](Self::reset).
///
/// One instance carries one stream: the dials change on every letter, so
/// concurrent streams need separate machines.
#[derive(Debug, Clone)]
pub struct EnigmaMachine {
    arena: RotorArena,
    rotors: [RotorId; NUM_SLOTS],
    reflector: Reflector,
    plugboard: Plugboard,
    initial_positions: [usize; NUM_SLOTS],
}

impl Default for EnigmaMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl EnigmaMachine {
    /// Creates a machine with rotors I II III, reflector B, an empty
    /// plugboard and all dials at `A`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmacrypt::EnigmaMachine;
    ///
    /// let machine = EnigmaMachine::new();
    /// assert_eq!(machine.positions(), [0, 0, 0]);
    /// ```
    pub fn new() -> Self {
        Self::build(
            DEFAULT_ROTORS,
            ReflectorType::B,
            Plugboard::new(),
            [0; NUM_SLOTS],
        )
    }

    /// Creates a fully configured machine from typed settings.
    ///
    /// Dial positions are reduced modulo 26.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmacrypt::{EnigmaMachine, Plugboard, ReflectorType, RotorType};
    ///
    /// let plugboard = Plugboard::parse_pairs("SZ GT DV KU FO MY EW JN IX LQ").unwrap();
    /// let mut machine = EnigmaMachine::with_settings(
    ///     [RotorType::I, RotorType::II, RotorType::III],
    ///     ReflectorType::B,
    ///     plugboard,
    ///     [0, 1, 2],
    /// );
    /// assert_eq!(machine.encrypt("HELLO").unwrap(), "PSGHM");
    /// ```
    pub fn with_settings(
        rotors: [RotorType; NUM_SLOTS],
        reflector: ReflectorType,
        plugboard: Plugboard,
        positions: [usize; NUM_SLOTS],
    ) -> Self {
        Self::build(rotors, reflector, plugboard, positions)
    }

    /// Creates a machine from raw selectors, as supplied by an external
    /// configuration layer.
    ///
    /// # Errors
    /// See [`configure`](Self::configure). No machine is produced on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmacrypt::{EnigmaError, EnigmaMachine};
    ///
    /// let result = EnigmaMachine::from_selectors(&[0, 1, 5], 0, &["AB"], &[0, 0, 0]);
    /// assert!(matches!(result, Err(EnigmaError::OutOfRange { .. })));
    /// ```
    pub fn from_selectors<S: AsRef<str>>(
        rotors: &[usize],
        reflector: usize,
        pairs: &[S],
        positions: &[usize],
    ) -> Result<Self, EnigmaError> {
        let mut machine = Self::new();
        machine.configure(rotors, reflector, pairs, positions)?;
        Ok(machine)
    }

    /// Internal constructor shared by every public constructor.
    fn build(
        kinds: [RotorType; NUM_SLOTS],
        reflector: ReflectorType,
        plugboard: Plugboard,
        positions: [usize; NUM_SLOTS],
    ) -> Self {
        let (arena, rotors) = Self::chain(kinds);
        let mut machine = EnigmaMachine {
            arena,
            rotors,
            reflector: Reflector::new(reflector),
            plugboard,
            initial_positions: [0; NUM_SLOTS],
        };
        machine.apply_positions(positions);
        debug!(
            rotors = ?kinds,
            reflector = %reflector,
            plug_pairs = machine.plugboard.pairs().len(),
            positions = ?machine.initial_positions,
            "machine configured"
        );
        machine
    }

    /// Builds the rotor chain, fastest first: rotor 1 turns over rotor 2,
    /// rotor 2 turns over rotor 3, rotor 3 is terminal.
    fn chain(kinds: [RotorType; NUM_SLOTS]) -> (RotorArena, [RotorId; NUM_SLOTS]) {
        let mut arena = RotorArena::with_capacity(NUM_SLOTS);
        let ids = kinds.map(|kind| arena.push(Rotor::new(kind)));
        for pair in ids.windows(2) {
            arena.set_next(pair[0], pair[1]);
        }
        (arena, ids)
    }

    /// Replaces the whole configuration in one step.
    ///
    /// - `rotors`: three rotor ordinals (`0` = I .. `4` = V), fastest first.
    ///   Repeats are allowed.
    /// - `reflector`: `0` = B, `1` = C.
    /// - `pairs`: up to ten two-letter plugboard tokens.
    /// - `positions`: three initial dial positions.
    ///
    /// All inputs are validated before anything changes, so on error the
    /// machine keeps its previous configuration and dial state.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidConfiguration`] for a wrong number of rotors
    ///   or positions, or a bad plugboard setting.
    /// - [`EnigmaError::OutOfRange`] for a rotor or reflector ordinal outside
    ///   its set.
    pub fn configure<S: AsRef<str>>(
        &mut self,
        rotors: &[usize],
        reflector: usize,
        pairs: &[S],
        positions: &[usize],
    ) -> Result<(), EnigmaError> {
        let ordinals = exactly_three(rotors, "rotors")?;
        let kinds = [
            RotorType::from_index(ordinals[0])?,
            RotorType::from_index(ordinals[1])?,
            RotorType::from_index(ordinals[2])?,
        ];
        let reflector = ReflectorType::from_index(reflector)?;
        let plugboard = Plugboard::from_pairs(pairs)?;
        let positions = exactly_three(positions, "positions")?;

        *self = Self::build(kinds, reflector, plugboard, positions);
        Ok(())
    }

    /// Installs a new rotor order and re-applies the stored initial positions.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] unless exactly three
    /// rotors are given.
    pub fn set_rotors(&mut self, rotors: &[RotorType]) -> Result<(), EnigmaError> {
        let kinds = exactly_three(rotors, "rotors")?;
        let (arena, ids) = Self::chain(kinds);
        self.arena = arena;
        self.rotors = ids;
        self.apply_positions(self.initial_positions);
        debug!(rotors = ?kinds, "rotors installed");
        Ok(())
    }

    /// Installs a new reflector. Dials are not touched.
    pub fn set_reflector(&mut self, reflector: ReflectorType) {
        self.reflector = Reflector::new(reflector);
        debug!(reflector = %reflector, "reflector installed");
    }

    /// Rewires the plugboard. Dials are not touched.
    ///
    /// # Errors
    /// See [`Plugboard::configure`]. The old wiring is kept on error.
    pub fn set_plugboard<S: AsRef<str>>(&mut self, pairs: &[S]) -> Result<(), EnigmaError> {
        self.plugboard.configure(pairs)?;
        debug!(plug_pairs = self.plugboard.pairs().len(), "plugboard rewired");
        Ok(())
    }

    /// Stores new initial positions and moves the dials there.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] unless exactly three
    /// positions are given.
    pub fn set_positions(&mut self, positions: &[usize]) -> Result<(), EnigmaError> {
        let positions = exactly_three(positions, "positions")?;
        self.apply_positions(positions);
        debug!(positions = ?self.initial_positions, "dials set");
        Ok(())
    }

    /// Moves the dials back to the stored initial positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmacrypt::EnigmaMachine;
    ///
    /// let mut machine = EnigmaMachine::new();
    /// let cipher = machine.encrypt("ATTACKATDAWN").unwrap();
    /// machine.reset();
    /// assert_eq!(machine.decrypt(&cipher).unwrap(), "ATTACKATDAWN");
    /// ```
    pub fn reset(&mut self) {
        self.apply_positions(self.initial_positions);
    }

    fn apply_positions(&mut self, positions: [usize; NUM_SLOTS]) {
        let positions = positions.map(|p| p % ALPHABET_LEN);
        for (&id, &position) in self.rotors.iter().zip(positions.iter()) {
            self.arena.get_mut(id).set_dial(position);
        }
        self.initial_positions = positions;
    }

    /// Current dial of each rotor, fastest first.
    pub fn positions(&self) -> [usize; NUM_SLOTS] {
        self.rotors.map(|id| self.arena.get(id).dial())
    }

    /// Positions restored by [`reset`](Self::reset).
    pub fn initial_positions(&self) -> [usize; NUM_SLOTS] {
        self.initial_positions
    }

    /// Installed rotor wirings, fastest first.
    pub fn rotor_types(&self) -> [RotorType; NUM_SLOTS] {
        self.rotors.map(|id| self.arena.get(id).kind())
    }

    /// Installed reflector wiring.
    pub fn reflector_type(&self) -> ReflectorType {
        self.reflector.kind()
    }

    /// Installed plugboard.
    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    /// Steps the rotors, then sends `index` through the full signal path.
    ///
    /// Total over `0..26`; larger inputs are reduced modulo 26.
    pub fn process_index(&mut self, index: usize) -> usize {
        let [r1, r2, r3] = self.rotors;
        self.arena.step(r1);

        let mut signal = self.plugboard.exchange(index);
        signal = self.arena.get(r1).forward(signal);
        signal = self.arena.get(r2).forward(signal);
        signal = self.arena.get(r3).forward(signal);
        signal = self.reflector.reflect(signal);
        signal = self.arena.get(r3).reverse(signal);
        signal = self.arena.get(r2).reverse(signal);
        signal = self.arena.get(r1).reverse(signal);
        self.plugboard.exchange(signal)
    }

    /// Transforms one letter.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidCharacter`] if `letter` is not in
    /// `A`..`Z`. The rotors do not move in that case.
    pub fn process_char(&mut self, letter: char) -> Result<char, EnigmaError> {
        let index = letter_to_index(letter)?;
        Ok(index_to_letter(self.process_index(index)))
    }

    /// Encrypts `text`, one letter at a time.
    ///
    /// The whole input is checked first: if any character is outside
    /// `A`..`Z` an error is returned and the rotors do not move.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidCharacter`] for the first offending character.
    pub fn encrypt(&mut self, text: &str) -> Result<String, EnigmaError> {
        self.apply(text)
    }

    /// Decrypts `text`. Identical to [`encrypt`](Self::encrypt): the cipher
    /// is reciprocal.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidCharacter`] for the first offending character.
    pub fn decrypt(&mut self, text: &str) -> Result<String, EnigmaError> {
        self.apply(text)
    }

    fn apply(&mut self, text: &str) -> Result<String, EnigmaError> {
        let indices = text
            .chars()
            .map(letter_to_index)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(indices
            .into_iter()
            .map(|index| index_to_letter(self.process_index(index)))
            .collect())
    }
}

/// Parses three dial letters such as `"ABC"` or `"A B C"` (any case).
///
/// # Errors
/// Returns [`EnigmaError::InvalidConfiguration`] unless the setting holds
/// exactly three letters once whitespace is removed.
///
/// # Examples
///
/// ```
/// use enigmacrypt::parse_positions;
///
/// assert_eq!(parse_positions("A B C").unwrap(), [0, 1, 2]);
/// assert!(parse_positions("AB").is_err());
/// ```
pub fn parse_positions(setting: &str) -> Result<[usize; NUM_SLOTS], EnigmaError> {
    let letters: Vec<char> = setting.chars().filter(|c| !c.is_whitespace()).collect();
    let [a, b, c] = letters.as_slice() else {
        return Err(EnigmaError::invalid_configuration(format!(
            "expected 3 dial letters, got {:?}",
            setting
        )));
    };
    let invalid = |_: EnigmaError| {
        EnigmaError::invalid_configuration(format!(
            "dial setting {:?} must only contain letters A-Z",
            setting
        ))
    };
    Ok([
        setting_to_index(*a).map_err(invalid)?,
        setting_to_index(*b).map_err(invalid)?,
        setting_to_index(*c).map_err(invalid)?,
    ])
}

/// Checks that a slice holds exactly one value per rotor slot.
fn exactly_three<T: Copy>(values: &[T], what: &str) -> Result<[T; NUM_SLOTS], EnigmaError> {
    <[T; NUM_SLOTS]>::try_from(values).map_err(|_| {
        EnigmaError::invalid_configuration(format!(
            "expected {} {}, got {}",
            NUM_SLOTS,
            what,
            values.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORIC_PLUGS: [&str; 10] = ["SZ", "GT", "DV", "KU", "FO", "MY", "EW", "JN", "IX", "LQ"];

    fn historic(rotors: [RotorType; 3]) -> EnigmaMachine {
        EnigmaMachine::with_settings(
            rotors,
            ReflectorType::B,
            Plugboard::from_pairs(&HISTORIC_PLUGS).unwrap(),
            [0, 1, 2],
        )
    }

    #[test]
    fn test_default_machine() {
        let machine = EnigmaMachine::new();
        assert_eq!(machine.rotor_types(), DEFAULT_ROTORS);
        assert_eq!(machine.reflector_type(), ReflectorType::B);
        assert_eq!(machine.positions(), [0, 0, 0]);
        assert!(machine.plugboard().pairs().is_empty());
    }

    #[test]
    fn test_hello_golden_value() {
        let mut machine = historic([RotorType::I, RotorType::II, RotorType::III]);
        assert_eq!(machine.encrypt("HELLO").unwrap(), "PSGHM");
        machine.reset();
        assert_eq!(machine.decrypt("PSGHM").unwrap(), "HELLO");
    }

    #[test]
    fn test_hello_golden_value_rotor_iv() {
        let mut machine = historic([RotorType::I, RotorType::II, RotorType::IV]);
        assert_eq!(machine.encrypt("HELLO").unwrap(), "TJGXN");
    }

    #[test]
    fn test_no_letter_maps_to_itself() {
        let mut machine = EnigmaMachine::new();
        let plain = "A".repeat(200);
        let cipher = machine.encrypt(&plain).unwrap();
        assert!(cipher.chars().all(|c| c != 'A'));
    }

    #[test]
    fn test_same_letter_encrypts_differently() {
        let mut machine = EnigmaMachine::new();
        let cipher = machine.encrypt("AAAAA").unwrap();
        let first = cipher.chars().next().unwrap();
        assert!(cipher.chars().any(|c| c != first));
    }

    #[test]
    fn test_first_rotor_steps_every_letter() {
        let mut machine = EnigmaMachine::new();
        machine.process_char('A').unwrap();
        assert_eq!(machine.positions(), [1, 0, 0]);
        machine.encrypt("BCD").unwrap();
        assert_eq!(machine.positions(), [4, 0, 0]);
    }

    #[test]
    fn test_middle_rotor_steps_at_notch() {
        let mut machine = EnigmaMachine::new();
        machine.encrypt(&"A".repeat(15)).unwrap();
        assert_eq!(machine.positions(), [15, 0, 0]);
        machine.process_char('A').unwrap();
        assert_eq!(machine.positions(), [16, 1, 0]);
    }

    #[test]
    fn test_slow_rotor_steps_when_middle_hits_notch() {
        let mut machine = EnigmaMachine::new();
        machine.set_positions(&[15, 3, 0]).unwrap();
        machine.process_char('A').unwrap();
        assert_eq!(machine.positions(), [16, 4, 1]);
    }

    #[test]
    fn test_full_middle_revolution_steps_slow_rotor_once() {
        let mut machine = EnigmaMachine::new();
        machine.encrypt(&"A".repeat(26 * 26)).unwrap();
        assert_eq!(machine.positions(), [0, 0, 1]);
    }

    #[test]
    fn test_invalid_character_leaves_dials() {
        let mut machine = EnigmaMachine::new();
        assert_eq!(
            machine.process_char('a'),
            Err(EnigmaError::InvalidCharacter('a'))
        );
        assert_eq!(
            machine.encrypt("HELLO WORLD"),
            Err(EnigmaError::InvalidCharacter(' '))
        );
        assert_eq!(machine.positions(), [0, 0, 0]);
    }

    #[test]
    fn test_empty_text() {
        let mut machine = EnigmaMachine::new();
        assert_eq!(machine.encrypt("").unwrap(), "");
        assert_eq!(machine.positions(), [0, 0, 0]);
    }

    #[test]
    fn test_configure_validates_cardinality() {
        let mut machine = EnigmaMachine::new();
        let none: [&str; 0] = [];
        assert!(matches!(
            machine.configure(&[0, 1], 0, &none, &[0, 0, 0]),
            Err(EnigmaError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            machine.configure(&[0, 1, 2], 0, &none, &[0, 0]),
            Err(EnigmaError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_configure_rejects_out_of_range_selectors() {
        let mut machine = EnigmaMachine::new();
        let none: [&str; 0] = [];
        assert_eq!(
            machine.configure(&[0, 1, 5], 0, &none, &[0, 0, 0]),
            Err(EnigmaError::OutOfRange {
                selector: "rotor",
                value: 5,
                max: 4
            })
        );
        assert_eq!(
            machine.configure(&[0, 1, 2], 2, &none, &[0, 0, 0]),
            Err(EnigmaError::OutOfRange {
                selector: "reflector",
                value: 2,
                max: 1
            })
        );
    }

    #[test]
    fn test_failed_configure_keeps_state() {
        let mut machine = historic([RotorType::I, RotorType::II, RotorType::III]);
        machine.encrypt("HE").unwrap();
        let before = machine.positions();

        let eleven = [
            "AB", "CD", "EF", "GH", "IJ", "KL", "MN", "OP", "QR", "ST", "UV",
        ];
        assert!(machine.configure(&[4, 4, 4], 1, &eleven, &[5, 5, 5]).is_err());

        assert_eq!(machine.positions(), before);
        assert_eq!(machine.rotor_types(), DEFAULT_ROTORS);
        assert_eq!(machine.encrypt("LLO").unwrap(), "GHM");
    }

    #[test]
    fn test_configure_allows_duplicate_rotors() {
        let mut machine = EnigmaMachine::new();
        machine.configure(&[2, 2, 2], 1, &["AZ"], &[3, 4, 5]).unwrap();
        assert_eq!(machine.rotor_types(), [RotorType::III; 3]);
        assert_eq!(machine.reflector_type(), ReflectorType::C);
        assert_eq!(machine.positions(), [3, 4, 5]);
        let cipher = machine.encrypt("DUPLICATE").unwrap();
        machine.reset();
        assert_eq!(machine.decrypt(&cipher).unwrap(), "DUPLICATE");
    }

    #[test]
    fn test_set_rotors_keeps_initial_positions() {
        let mut machine = EnigmaMachine::new();
        machine.set_positions(&[7, 8, 9]).unwrap();
        machine.encrypt("ABC").unwrap();
        machine
            .set_rotors(&[RotorType::V, RotorType::IV, RotorType::III])
            .unwrap();
        assert_eq!(machine.positions(), [7, 8, 9]);
        assert!(machine.set_rotors(&[RotorType::V]).is_err());
    }

    #[test]
    fn test_set_positions_normalizes() {
        let mut machine = EnigmaMachine::new();
        machine.set_positions(&[26, 27, 51]).unwrap();
        assert_eq!(machine.positions(), [0, 1, 25]);
        assert_eq!(machine.initial_positions(), [0, 1, 25]);
    }

    #[test]
    fn test_parse_positions() {
        assert_eq!(parse_positions("abc"), Ok([0, 1, 2]));
        assert_eq!(parse_positions(" Z Z Z "), Ok([25, 25, 25]));
        assert!(parse_positions("ABCD").is_err());
        assert!(parse_positions("A1C").is_err());
    }
}
