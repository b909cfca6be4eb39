//! Fixed wiring tables for the rotors and reflectors.
//!
//! All tables map an alphabet index (`0` = `A` .. `25` = `Z`) to another
//! alphabet index. They are compile-time constants and never mutated.

/// Number of letters handled by the machine.
pub const ALPHABET_LEN: usize = 26;

/// Number of available rotor wirings (I to V).
pub const NUM_ROTORS: usize = 5;

/// Number of available reflector wirings (B and C).
pub const NUM_REFLECTORS: usize = 2;

/// Forward wiring of rotors I, II, III, IV and V.
#[rustfmt::skip]
pub const ROTOR_WIRINGS: [[usize; ALPHABET_LEN]; NUM_ROTORS] = [
    // I
    [4, 10, 12, 5, 11, 6, 3, 16, 21, 25, 13, 19, 14, 22, 24, 7, 23, 20, 18, 15, 0, 8, 1, 17, 2, 9],
    // II
    [0, 9, 3, 10, 18, 8, 17, 20, 23, 1, 11, 7, 22, 19, 12, 2, 16, 6, 25, 13, 15, 24, 5, 21, 14, 4],
    // III
    [1, 3, 5, 7, 9, 11, 2, 15, 17, 19, 23, 21, 25, 13, 24, 4, 8, 22, 6, 0, 10, 12, 20, 18, 16, 14],
    // IV
    [4, 18, 14, 21, 15, 25, 9, 0, 24, 16, 20, 8, 17, 7, 23, 11, 13, 5, 19, 6, 10, 3, 2, 12, 22, 1],
    // V
    [21, 25, 1, 17, 6, 8, 19, 24, 20, 15, 18, 3, 13, 7, 11, 23, 0, 22, 12, 14, 5, 9, 2, 10, 4, 16],
];

/// Dial value at which each rotor turns over the next one.
///
/// I: Q, II: E, III: V, IV: J, V: Z.
pub const ROTOR_NOTCHES: [usize; NUM_ROTORS] = [16, 4, 21, 9, 25];

/// Wiring of reflectors B and C. Both are fixed-point-free involutions.
#[rustfmt::skip]
pub const REFLECTOR_WIRINGS: [[usize; ALPHABET_LEN]; NUM_REFLECTORS] = [
    // B: AY BR CU DH EQ FS GL IP JX KN MO TZ VW
    [24, 17, 20, 7, 16, 18, 11, 3, 15, 23, 13, 6, 14, 10, 12, 8, 4, 1, 5, 25, 2, 22, 21, 9, 0, 19],
    // C: AF BV CP DJ EI GO HY KR LZ MX NW QT SU
    [5, 21, 15, 9, 8, 0, 14, 24, 4, 3, 17, 25, 23, 22, 6, 2, 19, 10, 20, 16, 18, 1, 13, 12, 7, 11],
];
