//! Configuration-text parsing.
//!
//! A configuration describes one machine model: its alphabet, its slot
//! and pawl counts, and the catalog of available rotors. The format is
//! line oriented:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//! 5 3
//! I   MQ  (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//! II  ME  (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
//! Beta N  (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B   R   (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN)
//!         (MO) (TZ) (VW)
//! ```
//!
//! Line 1 is the alphabet, line 2 the rotor and pawl counts. Every
//! further non-blank line describes a rotor: name, a type token (`M`
//! plus its notch symbols, `N` for fixed, `R` for reflector), and the
//! wiring cycles. A line starting with `(` continues the previous
//! rotor's cycles.

use crate::alphabet::Alphabet;
use crate::catalog::Catalog;
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// A parsed machine description: alphabet, geometry, and rotor catalog.
///
/// # Examples
///
/// ```
/// use enigma::MachineConfig;
///
/// let config = MachineConfig::parse(
///     "ABCD\n\
///      2 1\n\
///      R1 R (AB) (CD)\n\
///      M1 MA (ABCD)\n",
/// ).unwrap();
/// assert_eq!(config.num_rotors(), 2);
/// assert_eq!(config.num_pawls(), 1);
/// assert_eq!(config.catalog().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MachineConfig {
    alphabet: Alphabet,
    num_rotors: usize,
    num_pawls: usize,
    catalog: Catalog,
}

impl MachineConfig {
    /// Parses a configuration from its textual form.
    ///
    /// # Errors
    /// - [`EnigmaError::ConfigTruncated`] if the alphabet or counts line
    ///   is missing.
    /// - [`EnigmaError::InvalidAlphabet`] if the alphabet line is empty
    ///   or contains whitespace.
    /// - [`EnigmaError::BadCounts`] if the counts line is unparsable.
    /// - [`EnigmaError::InvalidGeometry`] for counts violating
    ///   `num_rotors > 1`, `num_pawls < num_rotors`.
    /// - [`EnigmaError::BadRotorDescription`] for a malformed rotor line,
    ///   plus every construction error of the underlying components.
    pub fn parse(text: &str) -> Result<Self, EnigmaError> {
        let mut lines = text.lines();

        let alpha_line = lines.next().ok_or(EnigmaError::ConfigTruncated)?.trim();
        if alpha_line.is_empty() || alpha_line.chars().any(char::is_whitespace) {
            return Err(EnigmaError::InvalidAlphabet);
        }
        let alphabet = Alphabet::new(alpha_line)?;

        let counts_line = lines.next().ok_or(EnigmaError::ConfigTruncated)?;
        let mut counts = counts_line.split_whitespace();
        let num_rotors: usize = counts
            .next()
            .and_then(|tok| tok.parse().ok())
            .ok_or(EnigmaError::BadCounts)?;
        let num_pawls: usize = counts
            .next()
            .and_then(|tok| tok.parse().ok())
            .ok_or(EnigmaError::BadCounts)?;
        if num_rotors < 2 || num_pawls >= num_rotors {
            return Err(EnigmaError::InvalidGeometry);
        }

        let mut catalog = Catalog::new();
        let mut pending: Option<String> = None;
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('(') {
                // Continuation of the previous rotor's cycles.
                match pending.as_mut() {
                    Some(description) => {
                        description.push(' ');
                        description.push_str(line);
                    }
                    None => return Err(EnigmaError::BadRotorDescription),
                }
            } else {
                if let Some(description) = pending.take() {
                    catalog.add(parse_rotor(&description, &alphabet)?)?;
                }
                pending = Some(line.to_string());
            }
        }
        if let Some(description) = pending {
            catalog.add(parse_rotor(&description, &alphabet)?)?;
        }

        Ok(MachineConfig {
            alphabet,
            num_rotors,
            num_pawls,
            catalog,
        })
    }

    /// Returns the configured alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls.
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns the rotor catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Builds a fresh machine for one session. The catalog is cloned, so
    /// concurrently running sessions never share rotor state.
    ///
    /// # Errors
    /// Propagates [`Machine::new`] errors; cannot fail for a config this
    /// parser produced.
    pub fn build_machine(&self) -> Result<Machine, EnigmaError> {
        Machine::new(
            self.alphabet.clone(),
            self.num_rotors,
            self.num_pawls,
            self.catalog.clone(),
        )
    }
}

/// Parses one complete rotor description: `NAME TYPE cycles...`.
fn parse_rotor(description: &str, alphabet: &Alphabet) -> Result<Rotor, EnigmaError> {
    let open = description
        .find('(')
        .ok_or(EnigmaError::BadRotorDescription)?;
    let (head, cycles) = description.split_at(open);

    let mut tokens = head.split_whitespace();
    let name = tokens.next().ok_or(EnigmaError::BadRotorDescription)?;
    let type_token = tokens.next().ok_or(EnigmaError::BadRotorDescription)?;
    if tokens.next().is_some() {
        return Err(EnigmaError::BadRotorDescription);
    }

    let perm = Permutation::new(cycles, alphabet.clone())?;
    let mut type_chars = type_token.chars();
    match type_chars.next() {
        Some('M') => Rotor::moving(name, perm, type_chars.as_str()),
        Some('N') if type_chars.next().is_none() => Ok(Rotor::fixed(name, perm)),
        Some('R') if type_chars.next().is_none() => Rotor::reflector(name, perm),
        _ => Err(EnigmaError::BadRotorDescription),
    }
}
