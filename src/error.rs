//! Error types for the enigma library.

use std::fmt;

/// Errors produced by the enigma library.
///
/// All variants are configuration or usage errors detected eagerly at
/// construction time; there are no transient failures in this domain.
/// Symbols outside the alphabet inside a *message* are not errors — they
/// pass through conversion unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnigmaError {
    /// Alphabet constructed from an empty symbol sequence.
    EmptyAlphabet,
    /// A symbol occurs more than once in an alphabet.
    DuplicateInAlphabet(char),
    /// Symbol lookup outside the alphabet.
    NotInAlphabet(char),
    /// Cycle notation with unbalanced parentheses, an empty group, or
    /// symbols outside any group.
    MalformedCycles,
    /// A symbol appears in more than one permutation cycle.
    DuplicateInCycle(char),
    /// A reflector permutation leaves some symbol unmapped or fixed.
    ReflectorNotDerangement,
    /// A rotor name not present in the catalog.
    UnknownRotor(String),
    /// The same rotor name used twice in one catalog or machine.
    DuplicateRotorName(String),
    /// Slot 0 of a machine must hold a reflecting rotor.
    MissingReflector,
    /// More moving rotors inserted than the machine has pawls.
    TooManyMovingRotors,
    /// Number of rotor names does not match the machine's slot count.
    WrongRotorCount,
    /// Settings or ring string with the wrong length or a symbol outside
    /// the alphabet, or applied before rotors were inserted.
    InvalidSetting,
    /// Machine built with fewer than 2 rotors or with pawls outside
    /// `0..num_rotors`.
    InvalidGeometry,
    /// Configuration alphabet line is empty or contains whitespace.
    InvalidAlphabet,
    /// Configuration text ends before the alphabet and counts lines.
    ConfigTruncated,
    /// Rotor/pawl counts line is unparsable.
    BadCounts,
    /// A rotor description line is malformed.
    BadRotorDescription,
    /// A message line arrived before any `*` settings header.
    MissingHeader,
}

impl fmt::Display for EnigmaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnigmaError::EmptyAlphabet => {
                write!(f, "Alphabet must contain at least one symbol")
            }
            EnigmaError::DuplicateInAlphabet(c) => {
                write!(f, "Symbol '{}' is duplicated in the alphabet", c)
            }
            EnigmaError::NotInAlphabet(c) => {
                write!(f, "Symbol '{}' is not in the alphabet", c)
            }
            EnigmaError::MalformedCycles => {
                write!(f, "Cycle notation is malformed")
            }
            EnigmaError::DuplicateInCycle(c) => {
                write!(f, "Symbol '{}' appears in more than one cycle", c)
            }
            EnigmaError::ReflectorNotDerangement => {
                write!(
                    f,
                    "Reflector permutation must map every symbol to a different symbol"
                )
            }
            EnigmaError::UnknownRotor(name) => {
                write!(f, "No rotor named '{}' in the catalog", name)
            }
            EnigmaError::DuplicateRotorName(name) => {
                write!(f, "Rotor name '{}' is used more than once", name)
            }
            EnigmaError::MissingReflector => {
                write!(f, "First rotor slot must hold a reflector")
            }
            EnigmaError::TooManyMovingRotors => {
                write!(f, "More moving rotors than pawls")
            }
            EnigmaError::WrongRotorCount => {
                write!(f, "Number of rotor names does not match the slot count")
            }
            EnigmaError::InvalidSetting => {
                write!(f, "Setting string has the wrong length or a bad symbol")
            }
            EnigmaError::InvalidGeometry => {
                write!(
                    f,
                    "Machine needs more than one rotor and fewer pawls than rotors"
                )
            }
            EnigmaError::InvalidAlphabet => {
                write!(
                    f,
                    "Configuration alphabet line is empty or contains whitespace"
                )
            }
            EnigmaError::ConfigTruncated => {
                write!(f, "Configuration text is truncated")
            }
            EnigmaError::BadCounts => {
                write!(f, "Rotor and pawl counts line is unparsable")
            }
            EnigmaError::BadRotorDescription => {
                write!(f, "Rotor description line is malformed")
            }
            EnigmaError::MissingHeader => {
                write!(f, "Message line before any settings header")
            }
        }
    }
}

impl std::error::Error for EnigmaError {}
