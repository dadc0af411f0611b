//! Rotor: a permutation plus rotational state.
//!
//! A rotor wraps an immutable [`Permutation`] together with a mutable
//! angular position and ring offset. The three variants — reflector,
//! fixed, and moving — share the signal-path math and differ only in
//! stepping behavior, dispatched on the [`RotorKind`] tag.

use crate::error::EnigmaError;
use crate::permutation::Permutation;

/// Variant tag deciding a rotor's stepping behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Sits in slot 0, never advances, applied once at the turnaround.
    Reflector,
    /// Holds a settable position but never advances on its own.
    Fixed,
    /// Advances under pawl drive; carries the notch symbols that trip
    /// its left neighbor.
    Moving { notches: Vec<char> },
}

/// One rotor: a named permutation with a current position and ring offset.
///
/// Catalog templates are cloned into a machine per session; `position`
/// and `ring` are session-local state driven by that machine.
///
/// # Examples
///
/// ```
/// use enigma::{Alphabet, Permutation, Rotor};
///
/// let perm = Permutation::new("(ABC)", Alphabet::default()).unwrap();
/// let mut rotor = Rotor::moving("I", perm, "Q").unwrap();
/// assert!(rotor.rotates());
/// assert_eq!(rotor.setting(), 'A');
/// rotor.advance();
/// assert_eq!(rotor.setting(), 'B');
/// ```
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    perm: Permutation,
    kind: RotorKind,
    position: usize,
    ring: usize,
}

impl Rotor {
    /// Creates a moving rotor with the given notch symbols.
    ///
    /// # Parameters
    /// - `name`: Catalog name, used for lookup and uniqueness checks.
    /// - `perm`: The rotor wiring in its zero position.
    /// - `notches`: Symbols at which this rotor trips its left neighbor.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NotInAlphabet`] if any notch symbol is not
    /// in the permutation's alphabet.
    pub fn moving(name: &str, perm: Permutation, notches: &str) -> Result<Self, EnigmaError> {
        for ch in notches.chars() {
            if !perm.alphabet().contains(ch) {
                return Err(EnigmaError::NotInAlphabet(ch));
            }
        }
        Ok(Rotor {
            name: name.to_string(),
            perm,
            kind: RotorKind::Moving {
                notches: notches.chars().collect(),
            },
            position: 0,
            ring: 0,
        })
    }

    /// Creates a non-rotating rotor with a settable position.
    pub fn fixed(name: &str, perm: Permutation) -> Self {
        Rotor {
            name: name.to_string(),
            perm,
            kind: RotorKind::Fixed,
            position: 0,
            ring: 0,
        }
    }

    /// Creates a reflector.
    ///
    /// # Errors
    /// Returns [`EnigmaError::ReflectorNotDerangement`] unless the
    /// permutation covers every symbol and maps each away from itself.
    pub fn reflector(name: &str, perm: Permutation) -> Result<Self, EnigmaError> {
        if !perm.derangement() {
            return Err(EnigmaError::ReflectorNotDerangement);
        }
        Ok(Rotor {
            name: name.to_string(),
            perm,
            kind: RotorKind::Reflector,
            position: 0,
            ring: 0,
        })
    }

    /// Returns this rotor's catalog name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the wiring permutation.
    pub fn permutation(&self) -> &Permutation {
        &self.perm
    }

    /// Returns true if this rotor advances under pawl drive.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Returns true if this rotor is a reflector.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Returns the notch symbols (empty for non-moving variants).
    pub fn notches(&self) -> &[char] {
        match &self.kind {
            RotorKind::Moving { notches } => notches,
            _ => &[],
        }
    }

    /// Returns the symbol currently showing at this rotor's position.
    pub fn setting(&self) -> char {
        self.perm.alphabet().to_char(self.position as i32)
    }

    /// Sets the rotor position to the given symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NotInAlphabet`] if `ch` is not a member.
    pub fn set_position(&mut self, ch: char) -> Result<(), EnigmaError> {
        self.position = self.perm.alphabet().to_int(ch)?;
        Ok(())
    }

    /// Sets the ring offset to the given symbol.
    ///
    /// Legal on every variant; a reflector simply never has the offset
    /// applied because the machine routes slot 0 through a direct permute.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NotInAlphabet`] if `ch` is not a member.
    pub fn set_ring(&mut self, ch: char) -> Result<(), EnigmaError> {
        self.ring = self.perm.alphabet().to_int(ch)?;
        Ok(())
    }

    /// Returns position and ring to the alphabet's first symbol.
    pub(crate) fn reset(&mut self) {
        self.position = 0;
        self.ring = 0;
    }

    /// Effective offset between the entry face and the wiring:
    /// `position - ring`, wrapped into `[0, size)`.
    fn offset(&self) -> usize {
        let n = self.perm.size();
        (self.position + n - self.ring) % n
    }

    /// Translates a signal entering the right face through to the left.
    ///
    /// Shifts the contact by the current offset, applies the wiring, and
    /// shifts back.
    ///
    /// # Parameters
    /// - `p`: Contact index in `[0, size)`.
    pub fn convert_forward(&self, p: usize) -> usize {
        let n = self.perm.size();
        let offset = self.offset();
        let mapped = self.perm.permute(((p + offset) % n) as i32);
        (mapped + n - offset) % n
    }

    /// Translates a signal entering the left face through to the right.
    ///
    /// Symmetric to [`convert_forward`](Self::convert_forward), using the
    /// inverse wiring.
    ///
    /// # Parameters
    /// - `p`: Contact index in `[0, size)`.
    pub fn convert_backward(&self, p: usize) -> usize {
        let n = self.perm.size();
        let offset = self.offset();
        let mapped = self.perm.invert(((p + offset) % n) as i32);
        (mapped + n - offset) % n
    }

    /// Returns true iff a moving rotor currently shows a notch symbol.
    ///
    /// Always false for fixed rotors and reflectors.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&self.setting()),
            _ => false,
        }
    }

    /// Steps a moving rotor to the next position, wrapping at the end of
    /// the alphabet. No-op for fixed rotors and reflectors.
    pub fn advance(&mut self) {
        if self.rotates() {
            self.position = (self.position + 1) % self.perm.size();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    const ROTOR_I: &str = "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)";
    const UKW_B: &str = "(AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)";

    fn rotor_i() -> Rotor {
        let perm = Permutation::new(ROTOR_I, Alphabet::default()).unwrap();
        Rotor::moving("I", perm, "Q").unwrap()
    }

    #[test]
    fn test_forward_at_zero_matches_wiring() {
        let rotor = rotor_i();
        // Position A, ring A: the wiring applies directly. A -> E.
        assert_eq!(rotor.convert_forward(0), 4);
    }

    #[test]
    fn test_forward_with_position_offset() {
        let mut rotor = rotor_i();
        rotor.set_position('B').unwrap();
        // Offset 1: contact 0 enters at B, wiring sends B -> K (10),
        // leaving at contact 9.
        assert_eq!(rotor.convert_forward(0), 9);
    }

    #[test]
    fn test_ring_cancels_equal_position() {
        let mut rotor = rotor_i();
        rotor.set_position('B').unwrap();
        rotor.set_ring('B').unwrap();
        assert_eq!(rotor.convert_forward(0), 4);
    }

    #[test]
    fn test_backward_inverts_forward() {
        let mut rotor = rotor_i();
        rotor.set_position('M').unwrap();
        rotor.set_ring('C').unwrap();
        for p in 0..26 {
            assert_eq!(rotor.convert_backward(rotor.convert_forward(p)), p);
        }
    }

    #[test]
    fn test_advance_wraps() {
        let mut rotor = rotor_i();
        rotor.set_position('Z').unwrap();
        rotor.advance();
        assert_eq!(rotor.setting(), 'A');
    }

    #[test]
    fn test_at_notch() {
        let mut rotor = rotor_i();
        assert!(!rotor.at_notch());
        rotor.set_position('Q').unwrap();
        assert!(rotor.at_notch());
    }

    #[test]
    fn test_multiple_notches() {
        let perm = Permutation::new("", Alphabet::default()).unwrap();
        let mut rotor = Rotor::moving("VI", perm, "ZM").unwrap();
        rotor.set_position('M').unwrap();
        assert!(rotor.at_notch());
        rotor.set_position('Z').unwrap();
        assert!(rotor.at_notch());
        rotor.set_position('A').unwrap();
        assert!(!rotor.at_notch());
    }

    #[test]
    fn test_fixed_never_advances() {
        let perm = Permutation::new("(ABC)", Alphabet::default()).unwrap();
        let mut rotor = Rotor::fixed("Beta", perm);
        rotor.set_position('C').unwrap();
        rotor.advance();
        assert_eq!(rotor.setting(), 'C');
        assert!(!rotor.at_notch());
        assert!(!rotor.rotates());
        assert!(!rotor.reflecting());
    }

    #[test]
    fn test_reflector_never_advances_and_accepts_ring() {
        let perm = Permutation::new(UKW_B, Alphabet::default()).unwrap();
        let mut rotor = Rotor::reflector("B", perm).unwrap();
        rotor.advance();
        assert_eq!(rotor.setting(), 'A');
        // Must not fail even though the machine never routes it here.
        rotor.set_ring('C').unwrap();
        assert!(rotor.reflecting());
        assert!(!rotor.rotates());
    }

    #[test]
    fn test_reflector_requires_derangement() {
        let perm = Permutation::new("(AB)", Alphabet::default()).unwrap();
        assert_eq!(
            Rotor::reflector("bad", perm).unwrap_err(),
            EnigmaError::ReflectorNotDerangement
        );
    }

    #[test]
    fn test_moving_notch_outside_alphabet() {
        let perm = Permutation::new("", Alphabet::new("ABC").unwrap()).unwrap();
        assert_eq!(
            Rotor::moving("I", perm, "Q").unwrap_err(),
            EnigmaError::NotInAlphabet('Q')
        );
    }

    #[test]
    fn test_reset_clears_session_state() {
        let mut rotor = rotor_i();
        rotor.set_position('K').unwrap();
        rotor.set_ring('D').unwrap();
        rotor.reset();
        assert_eq!(rotor.setting(), 'A');
        assert_eq!(rotor.convert_forward(0), 4);
    }

    #[test]
    fn test_notches_accessor() {
        let rotor = rotor_i();
        assert_eq!(rotor.notches(), &['Q']);
        let perm = Permutation::new(UKW_B, Alphabet::default()).unwrap();
        let reflector = Rotor::reflector("B", perm).unwrap();
        assert!(reflector.notches().is_empty());
    }
}
