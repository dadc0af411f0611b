//! Rotor cipher machine simulator.
//!
//! Simulates an Enigma-class electromechanical cipher machine: a stack
//! of substitution rotors plus a plugboard, encrypting and decrypting
//! alphabetic text symbol-by-symbol with the historical 1940s stepping
//! rules (pawl-driven odometer advance with the double-step anomaly).
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbol <-> index bijection, rotatable)
//!     ↑ built over
//! Permutation  (bijection from disjoint cycles, forward + inverse)
//!     ↑ wrapped with rotational state
//! Rotor        (Reflector / Fixed / Moving, position + ring offset)
//!     ↑ slotted, slot 0 = reflector, last slot = fastest
//! Machine      (odometer stepping + dual-pass signal path + plugboard)
//! ```
//!
//! Machine configuration (catalog parsing, settings headers, grouped
//! batch output) lives in [`config`] and [`session`]; the engine itself
//! never performs I/O and never logs — per-symbol visibility is offered
//! through [`Machine::set_tracer`].
//!
//! # Examples
//!
//! Encrypt and decrypt a message with historical Enigma I wirings:
//!
//! ```
//! use enigma::{MachineConfig, Session};
//!
//! let config = MachineConfig::parse(
//!     "ABCDEFGHIJKLMNOPQRSTUVWXYZ\n\
//!      4 3\n\
//!      I   MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)\n\
//!      II  ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)\n\
//!      III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)\n\
//!      B   R  (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)\n",
//! ).unwrap();
//!
//! let mut encoder = Session::new(&config).unwrap();
//! encoder.process_line("* B I II III AAA").unwrap();
//! let cipher = encoder.process_line("AAAAA").unwrap().unwrap();
//! assert_eq!(cipher, "BDZGO");
//!
//! let mut decoder = Session::new(&config).unwrap();
//! decoder.process_line("* B I II III AAA").unwrap();
//! assert_eq!(decoder.process_line(&cipher).unwrap().unwrap(), "AAAAA");
//! ```

#![deny(clippy::all)]

pub mod error;

pub mod alphabet;
pub mod catalog;
pub mod config;
pub mod machine;
pub mod permutation;
pub mod rotor;
pub mod session;

pub use alphabet::Alphabet;
pub use catalog::Catalog;
pub use config::MachineConfig;
pub use error::EnigmaError;
pub use machine::{Machine, StepTrace, TraceHook};
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorKind};
pub use session::Session;
