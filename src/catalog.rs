//! Catalog: the registry of available rotor templates.
//!
//! Read-only after configuration load. Machines clone rotors out of the
//! catalog per session, so two concurrently configured machines never
//! share mutable rotor state.

use crate::error::EnigmaError;
use crate::rotor::Rotor;

/// A collection of rotor templates, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rotors: Vec<Rotor>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog { rotors: Vec::new() }
    }

    /// Adds a rotor template.
    ///
    /// # Errors
    /// Returns [`EnigmaError::DuplicateRotorName`] if a template with the
    /// same name is already present.
    pub fn add(&mut self, rotor: Rotor) -> Result<(), EnigmaError> {
        if self.get(rotor.name()).is_some() {
            return Err(EnigmaError::DuplicateRotorName(rotor.name().to_string()));
        }
        self.rotors.push(rotor);
        Ok(())
    }

    /// Looks up a template by name.
    pub fn get(&self, name: &str) -> Option<&Rotor> {
        self.rotors.iter().find(|r| r.name() == name)
    }

    /// Returns the number of templates.
    pub fn len(&self) -> usize {
        self.rotors.len()
    }

    /// Returns true if the catalog holds no templates.
    pub fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }
}
