//! Message-group batch processing.
//!
//! A session drives one machine over a stream of input lines. Lines
//! beginning with `*` are settings headers that reconfigure the machine:
//!
//! ```text
//! * B Beta I II III AAAA (AB) (CD)
//! ```
//!
//! names every slot (reflector first), gives the position setting, an
//! optional ring setting, and an optional plugboard in cycle notation.
//! Every other non-blank line is converted through the machine — rotor
//! state persists from line to line — and emitted in five-symbol blocks.
//! Blank lines pass through as blank output lines.

use crate::config::MachineConfig;
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;

/// Number of symbols per output block.
const GROUP_WIDTH: usize = 5;

/// One batch-processing session over a configured machine model.
///
/// # Examples
///
/// ```
/// use enigma::{MachineConfig, Session};
///
/// let config = MachineConfig::parse(
///     "ABCDEFGHIJKLMNOPQRSTUVWXYZ\n\
///      4 3\n\
///      I   MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)\n\
///      II  ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)\n\
///      III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)\n\
///      B   R  (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)\n",
/// ).unwrap();
///
/// let mut session = Session::new(&config).unwrap();
/// assert_eq!(session.process_line("* B I II III AAA").unwrap(), None);
/// assert_eq!(
///     session.process_line("AAAAA").unwrap(),
///     Some("BDZGO".to_string()),
/// );
/// ```
pub struct Session {
    machine: Machine,
    configured: bool,
}

impl Session {
    /// Creates a session with a fresh machine built from `config`.
    ///
    /// # Errors
    /// Propagates machine construction errors.
    pub fn new(config: &MachineConfig) -> Result<Self, EnigmaError> {
        Ok(Session {
            machine: config.build_machine()?,
            configured: false,
        })
    }

    /// Returns the session's machine, e.g. to install a trace hook.
    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    /// Processes one input line.
    ///
    /// Returns `None` for a settings header (which produces no output),
    /// `Some` with the rendered output line otherwise: empty for a blank
    /// input line, the grouped ciphertext for a message line.
    ///
    /// # Errors
    /// - Header lines propagate every machine configuration error.
    /// - [`EnigmaError::MissingHeader`] for a message line before the
    ///   first header.
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>, EnigmaError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Some(String::new()));
        }
        if let Some(header) = line.strip_prefix('*') {
            self.apply_header(header)?;
            return Ok(None);
        }
        if !self.configured {
            return Err(EnigmaError::MissingHeader);
        }
        let converted = self.machine.convert_message(line);
        Ok(Some(group_output(&converted)))
    }

    /// Applies a settings header (already stripped of its `*`).
    ///
    /// Token layout: `num_rotors` rotor names, the position setting, an
    /// optional ring setting, then an optional plugboard cycle spec
    /// (recognized by its opening parenthesis).
    fn apply_header(&mut self, header: &str) -> Result<(), EnigmaError> {
        let header = header.trim();
        let (head, plug) = match header.find('(') {
            Some(i) => (header[..i].trim(), &header[i..]),
            None => (header, ""),
        };

        let tokens: Vec<&str> = head.split_whitespace().collect();
        let num_rotors = self.machine.num_rotors();
        if tokens.len() < num_rotors + 1 || tokens.len() > num_rotors + 2 {
            return Err(EnigmaError::InvalidSetting);
        }

        self.machine.insert_rotors(&tokens[..num_rotors])?;
        self.machine.set_rotors(tokens[num_rotors])?;
        if let Some(&rings) = tokens.get(num_rotors + 1) {
            self.machine.set_rings(rings)?;
        }

        let plugboard = Permutation::new(plug, self.machine.alphabet().clone())?;
        self.machine.set_plugboard(plugboard);
        self.configured = true;
        Ok(())
    }
}

/// Regroups a converted message into five-symbol blocks.
///
/// Whitespace is stripped first; every other symbol (including
/// passed-through punctuation) counts toward the block width.
///
/// # Examples
///
/// ```
/// use enigma::session::group_output;
///
/// assert_eq!(group_output("WMHRMKMDUU"), "WMHRM KMDUU");
/// assert_eq!(group_output("AB CDE FG"), "ABCDE FG");
/// ```
pub fn group_output(msg: &str) -> String {
    let mut out = String::with_capacity(msg.len() + msg.len() / GROUP_WIDTH);
    let mut count = 0;
    for ch in msg.chars() {
        if ch.is_whitespace() {
            continue;
        }
        if count > 0 && count % GROUP_WIDTH == 0 {
            out.push(' ');
        }
        out.push(ch);
        count += 1;
    }
    out
}

/// Runs a whole input through a fresh session, one output line per
/// produced line (headers produce none).
///
/// # Errors
/// Propagates the first error any line raises.
pub fn run(config: &MachineConfig, input: &str) -> Result<String, EnigmaError> {
    let mut session = Session::new(config)?;
    let mut output = String::new();
    for line in input.lines() {
        if let Some(rendered) = session.process_line(line)? {
            output.push_str(&rendered);
            output.push('\n');
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "\
ABCDEFGHIJKLMNOPQRSTUVWXYZ
5 3
I    MQ   (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
II   ME   (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
III  MV   (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
B    R    (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)
";

    fn config() -> MachineConfig {
        MachineConfig::parse(CONFIG).unwrap()
    }

    #[test]
    fn test_group_output() {
        assert_eq!(group_output(""), "");
        assert_eq!(group_output("ABC"), "ABC");
        assert_eq!(group_output("ABCDE"), "ABCDE");
        assert_eq!(group_output("ABCDEF"), "ABCDE F");
        assert_eq!(group_output("GUCNI DJZQG"), "GUCNI DJZQG");
        assert_eq!(group_output("WMHRMK MDUU"), "WMHRM KMDUU");
    }

    #[test]
    fn test_header_then_message() {
        let mut session = Session::new(&config()).unwrap();
        assert_eq!(
            session.process_line("* B Beta I II III AAAA").unwrap(),
            None
        );
        assert_eq!(
            session.process_line("HELLO WORLD").unwrap(),
            Some("GUCNI DJZQG".to_string())
        );
        // State persists into the next line.
        assert_eq!(
            session.process_line("SECOND LINE").unwrap(),
            Some("WMHRM KMDUU".to_string())
        );
    }

    #[test]
    fn test_message_before_header() {
        let mut session = Session::new(&config()).unwrap();
        assert_eq!(
            session.process_line("HELLO").unwrap_err(),
            EnigmaError::MissingHeader
        );
    }

    #[test]
    fn test_blank_lines_pass_through() {
        let mut session = Session::new(&config()).unwrap();
        assert_eq!(session.process_line("").unwrap(), Some(String::new()));
        assert_eq!(session.process_line("   ").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_header_with_plugboard_and_rings() {
        let mut session = Session::new(&config()).unwrap();
        session
            .process_line("* B Beta I II III AAAA BBBB (AB) (CD)")
            .unwrap();
        let cipher = session.process_line("PLUGGED").unwrap().unwrap();

        let mut fresh = Session::new(&config()).unwrap();
        fresh
            .process_line("* B Beta I II III AAAA BBBB (AB) (CD)")
            .unwrap();
        assert_eq!(
            fresh.process_line(&cipher).unwrap().unwrap(),
            "PLUGG ED"
        );
    }

    #[test]
    fn test_header_resets_rotor_state() {
        let mut session = Session::new(&config()).unwrap();
        session.process_line("* B Beta I II III AAAA").unwrap();
        let first = session.process_line("AAAAA").unwrap();
        session.process_line("* B Beta I II III AAAA").unwrap();
        let second = session.process_line("AAAAA").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_header_errors_propagate() {
        let mut session = Session::new(&config()).unwrap();
        assert_eq!(
            session.process_line("* I B Beta II III AAAA").unwrap_err(),
            EnigmaError::MissingReflector
        );
        assert_eq!(
            session.process_line("* B Beta I II III AAA").unwrap_err(),
            EnigmaError::InvalidSetting
        );
        assert_eq!(
            session.process_line("* B Beta I II AAAA").unwrap_err(),
            EnigmaError::InvalidSetting
        );
    }

    #[test]
    fn test_run_end_to_end() {
        let input = "\
* B Beta I II III AAAA
HELLO WORLD

SECOND LINE
";
        let output = run(&config(), input).unwrap();
        assert_eq!(output, "GUCNI DJZQG\n\nWMHRM KMDUU\n");
    }

    #[test]
    fn test_run_self_inverse() {
        let input = "* B Beta I II III AAAA (AB)\nATTACK AT DAWN\n";
        let cipher = run(&config(), input).unwrap();
        let reply = format!("* B Beta I II III AAAA (AB)\n{}", cipher);
        let plain = run(&config(), &reply).unwrap();
        assert_eq!(plain.trim_end(), "ATTAC KATDA WN");
    }
}
