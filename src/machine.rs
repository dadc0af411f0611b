//! Machine: the complete rotor cipher machine.
//!
//! Owns an ordered stack of rotors (slot 0 the reflector, the last slot
//! the fastest rotor) plus a plugboard permutation, and implements the
//! odometer stepping rule and the dual-pass signal path:
//!
//! ```text
//! keyboard ──> plugboard ──> fast ... slow rotors ──> reflector
//!                                                         │
//! lampboard <── plugboard <── fast ... slow rotors <──────┘
//! ```
//!
//! Rotor state advances before every symbol, so conversion is stateful:
//! successive calls continue stepping from where the prior call left off.

use crate::alphabet::Alphabet;
use crate::catalog::Catalog;
use crate::error::EnigmaError;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// Snapshot of one symbol conversion, handed to the trace hook.
///
/// Captured after the rotors have advanced for the symbol, so `settings`
/// shows the positions the signal actually passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTrace {
    /// Position symbols of slots 1.. (the reflector is omitted).
    pub settings: Vec<char>,
    /// The symbol entering the machine.
    pub input: char,
    /// The symbol after the first plugboard pass.
    pub plugged: char,
    /// The symbol leaving the machine.
    pub output: char,
}

/// Per-symbol observer invoked by [`Machine::convert`].
pub type TraceHook = Box<dyn FnMut(&StepTrace)>;

/// A complete rotor cipher machine.
///
/// # Examples
///
/// Historical Enigma I wirings, rotors B-I-II-III at `AAA`:
///
/// ```
/// use enigma::{Alphabet, Catalog, Machine, Permutation, Rotor};
///
/// let alpha = Alphabet::default();
/// let mut catalog = Catalog::new();
/// catalog.add(Rotor::reflector("B", Permutation::new(
///     "(AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)",
///     alpha.clone()).unwrap()).unwrap()).unwrap();
/// catalog.add(Rotor::moving("I", Permutation::new(
///     "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)",
///     alpha.clone()).unwrap(), "Q").unwrap()).unwrap();
/// catalog.add(Rotor::moving("II", Permutation::new(
///     "(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)",
///     alpha.clone()).unwrap(), "E").unwrap()).unwrap();
/// catalog.add(Rotor::moving("III", Permutation::new(
///     "(ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)",
///     alpha.clone()).unwrap(), "V").unwrap()).unwrap();
///
/// let mut machine = Machine::new(alpha, 4, 3, catalog).unwrap();
/// machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
/// machine.set_rotors("AAA").unwrap();
/// assert_eq!(machine.convert_message("AAAAA"), "BDZGO");
/// ```
pub struct Machine {
    alphabet: Alphabet,
    num_rotors: usize,
    num_pawls: usize,
    catalog: Catalog,
    slots: Vec<Rotor>,
    plugboard: Permutation,
    tracer: Option<TraceHook>,
}

impl std::fmt::Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("alphabet", &self.alphabet)
            .field("num_rotors", &self.num_rotors)
            .field("num_pawls", &self.num_pawls)
            .field("catalog", &self.catalog)
            .field("slots", &self.slots)
            .field("plugboard", &self.plugboard)
            .field("tracer", &self.tracer.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

impl Machine {
    /// Creates a machine with `num_rotors` slots, at most `num_pawls`
    /// moving rotors, and the given template catalog.
    ///
    /// The plugboard starts as the identity permutation; rotors are
    /// bound to slots by [`insert_rotors`](Self::insert_rotors).
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidGeometry`] unless `num_rotors > 1`
    /// and `num_pawls < num_rotors`.
    pub fn new(
        alphabet: Alphabet,
        num_rotors: usize,
        num_pawls: usize,
        catalog: Catalog,
    ) -> Result<Self, EnigmaError> {
        if num_rotors < 2 || num_pawls >= num_rotors {
            return Err(EnigmaError::InvalidGeometry);
        }
        let plugboard = Permutation::new("", alphabet.clone())?;
        Ok(Machine {
            alphabet,
            num_rotors,
            num_pawls,
            catalog,
            slots: Vec::new(),
            plugboard,
            tracer: None,
        })
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls, and thus the maximum number of
    /// moving rotors.
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns the common alphabet of this machine.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the rotor in slot `k`, where slot 0 is the reflector and
    /// slot `num_rotors - 1` the fastest rotor. None until rotors have
    /// been inserted.
    pub fn rotor(&self, k: usize) -> Option<&Rotor> {
        self.slots.get(k)
    }

    /// Returns the current plugboard permutation.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Binds the named catalog rotors to the machine's slots, fastest
    /// rotor last. Each slot receives a fresh clone of the template with
    /// position and ring reset to the alphabet's first symbol.
    ///
    /// # Errors
    /// - [`EnigmaError::WrongRotorCount`] unless exactly
    ///   [`num_rotors`](Self::num_rotors) names are given.
    /// - [`EnigmaError::DuplicateRotorName`] if a name repeats.
    /// - [`EnigmaError::UnknownRotor`] if a name is not in the catalog.
    /// - [`EnigmaError::MissingReflector`] if the first name does not
    ///   refer to a reflecting rotor.
    /// - [`EnigmaError::TooManyMovingRotors`] if more moving rotors are
    ///   named than the machine has pawls.
    pub fn insert_rotors(&mut self, names: &[&str]) -> Result<(), EnigmaError> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::WrongRotorCount);
        }
        let mut slots: Vec<Rotor> = Vec::with_capacity(names.len());
        let mut moving = 0;
        for (slot, &name) in names.iter().enumerate() {
            if slots.iter().any(|r| r.name() == name) {
                return Err(EnigmaError::DuplicateRotorName(name.to_string()));
            }
            let template = self
                .catalog
                .get(name)
                .ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))?;
            if slot == 0 && !template.reflecting() {
                return Err(EnigmaError::MissingReflector);
            }
            if template.rotates() {
                moving += 1;
            }
            let mut rotor = template.clone();
            rotor.reset();
            slots.push(rotor);
        }
        if moving > self.num_pawls {
            return Err(EnigmaError::TooManyMovingRotors);
        }
        self.slots = slots;
        Ok(())
    }

    /// Sets the rotor positions from `setting`, whose symbols apply to
    /// slots 1.. in order (the reflector is never set this way).
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSetting`] if the length is not
    /// `num_rotors - 1`, a symbol is outside the alphabet, or rotors
    /// have not been inserted yet.
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), EnigmaError> {
        self.apply_to_slots(setting, |rotor, ch| rotor.set_position(ch))
    }

    /// Sets the ring offsets from `rings`, same shape as
    /// [`set_rotors`](Self::set_rotors).
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSetting`] under the same conditions
    /// as [`set_rotors`](Self::set_rotors).
    pub fn set_rings(&mut self, rings: &str) -> Result<(), EnigmaError> {
        self.apply_to_slots(rings, |rotor, ch| rotor.set_ring(ch))
    }

    /// Shared validation and application for settings and ring strings.
    fn apply_to_slots<F>(&mut self, symbols: &str, mut apply: F) -> Result<(), EnigmaError>
    where
        F: FnMut(&mut Rotor, char) -> Result<(), EnigmaError>,
    {
        if self.slots.len() != self.num_rotors {
            return Err(EnigmaError::InvalidSetting);
        }
        if symbols.chars().count() != self.num_rotors - 1 {
            return Err(EnigmaError::InvalidSetting);
        }
        for ch in symbols.chars() {
            if !self.alphabet.contains(ch) {
                return Err(EnigmaError::InvalidSetting);
            }
        }
        for (i, ch) in symbols.chars().enumerate() {
            apply(&mut self.slots[i + 1], ch)?;
        }
        Ok(())
    }

    /// Replaces the plugboard permutation.
    ///
    /// A plugboard need not be a derangement: unplugged symbols map to
    /// themselves. Its cycles are pairs or fixed points, so applying the
    /// forward mapping twice round-trips — which is exactly how the
    /// signal path uses it.
    pub fn set_plugboard(&mut self, plugboard: Permutation) {
        self.plugboard = plugboard;
    }

    /// Installs a per-symbol observer, called once per
    /// [`convert`](Self::convert) with the [`StepTrace`] snapshot.
    pub fn set_tracer(&mut self, tracer: TraceHook) {
        self.tracer = Some(tracer);
    }

    /// Removes the observer installed by [`set_tracer`](Self::set_tracer).
    pub fn clear_tracer(&mut self) {
        self.tracer = None;
    }

    // ──────── Conversion ────────

    /// Converts the symbol index `c`, advancing the machine first.
    ///
    /// The signal path is: plugboard, forward through the rotor stack
    /// from the fastest slot to slot 1, one direct permute through the
    /// reflector, backward from slot 1 to the fastest slot, plugboard
    /// again.
    ///
    /// # Parameters
    /// - `c`: Any integer; reduced to a symbol index modulo the alphabet
    ///   size by the first plugboard pass.
    ///
    /// # Panics
    /// Panics if rotors have not been inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{Alphabet, Catalog, Machine, Permutation, Rotor};
    ///
    /// let alpha = Alphabet::default();
    /// let mut catalog = Catalog::new();
    /// catalog.add(Rotor::reflector("B", Permutation::new(
    ///     "(AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)",
    ///     alpha.clone()).unwrap()).unwrap()).unwrap();
    /// catalog.add(Rotor::moving("I", Permutation::new(
    ///     "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)",
    ///     alpha.clone()).unwrap(), "Q").unwrap()).unwrap();
    ///
    /// let mut machine = Machine::new(alpha.clone(), 2, 1, catalog.clone()).unwrap();
    /// machine.insert_rotors(&["B", "I"]).unwrap();
    /// machine.set_rotors("A").unwrap();
    /// let out = machine.convert(0);
    ///
    /// // A fresh machine in the same configuration decrypts it back.
    /// let mut fresh = Machine::new(alpha, 2, 1, catalog).unwrap();
    /// fresh.insert_rotors(&["B", "I"]).unwrap();
    /// fresh.set_rotors("A").unwrap();
    /// assert_eq!(fresh.convert(out as i32), 0);
    /// ```
    pub fn convert(&mut self, c: i32) -> usize {
        assert!(!self.slots.is_empty(), "no rotors inserted");
        self.advance_rotors();

        let input = self.alphabet.to_char(c);
        let mut signal = self.plugboard.permute(c);
        let plugged = self.alphabet.to_char(signal as i32);

        for rotor in self.slots[1..].iter().rev() {
            signal = rotor.convert_forward(signal);
        }
        signal = self.slots[0].permutation().permute(signal as i32);
        for rotor in self.slots[1..].iter() {
            signal = rotor.convert_backward(signal);
        }
        signal = self.plugboard.permute(signal as i32);

        if self.tracer.is_some() {
            let trace = StepTrace {
                settings: self.slots[1..].iter().map(|r| r.setting()).collect(),
                input,
                plugged,
                output: self.alphabet.to_char(signal as i32),
            };
            if let Some(tracer) = self.tracer.as_mut() {
                tracer(&trace);
            }
        }
        signal
    }

    /// Converts a whole message, preserving symbols the alphabet does
    /// not contain (spaces, punctuation) unchanged.
    ///
    /// Stateful: rotor positions evolve across calls, so feeding
    /// successive lines continues the same key stream.
    ///
    /// # Panics
    /// Panics if rotors have not been inserted.
    pub fn convert_message(&mut self, msg: &str) -> String {
        let mut result = String::with_capacity(msg.len());
        for ch in msg.chars() {
            match self.alphabet.to_int(ch) {
                Ok(index) => {
                    let converted = self.convert(index as i32);
                    result.push(self.alphabet.to_char(converted as i32));
                }
                Err(_) => result.push(ch),
            }
        }
        result
    }

    // ──────── Stepping ────────

    /// Advances the rotor stack one tick (odometer with double-step).
    ///
    /// Two-phase: first mark every rotor that will move, then advance
    /// each marked rotor exactly once. The fastest rotor always moves.
    /// Scanning the adjacent pairs inside the pawl-driven range, a rotor
    /// at its notch carries both itself and its left neighbor. Slot 0
    /// and rotors left of the driven range never move.
    fn advance_rotors(&mut self) {
        let len = self.slots.len();
        let mut marks = vec![false; len];
        marks[len - 1] = true;

        let leftmost_driven = len - self.num_pawls;
        for i in (leftmost_driven..=len - 2).rev() {
            if self.slots[i + 1].at_notch() {
                marks[i + 1] = true;
                marks[i] = true;
            }
        }

        for (i, marked) in marks.iter().enumerate() {
            if *marked {
                self.slots[i].advance();
            }
        }
    }
}
