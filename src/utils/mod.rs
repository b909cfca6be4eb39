//! Helpers around the cipher core: letter/index conversion and the
//! punctuation escaping used to carry free text through the machine.

pub mod alphabet;
pub mod escape;
