//! End-to-end tests through the configuration and session layers.
//!
//! Each scenario feeds configuration text and a message-group input
//! through the same path the command-line front end uses: parse the
//! config, open a session, process lines, compare the grouped output.

use enigma::session::{group_output, run};
use enigma::{EnigmaError, MachineConfig, Session};

const CONFIG: &str = "\
ABCDEFGHIJKLMNOPQRSTUVWXYZ
5 3
I    MQ   (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
II   ME   (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
III  MV   (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
B    R    (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN)
          (MO) (TZ) (VW)
";

fn config() -> MachineConfig {
    MachineConfig::parse(CONFIG).unwrap()
}

#[test]
fn full_pipeline_frozen_output() {
    let input = "\
* B Beta I II III AAAA
HELLO WORLD

SECOND LINE
";
    let output = run(&config(), input).unwrap();
    assert_eq!(output, "GUCNI DJZQG\n\nWMHRM KMDUU\n");
}

#[test]
fn pipeline_round_trip() {
    let header = "* B Beta I II III NEVA (QW) (ER) (TY)";
    let plaintext = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG";

    let cipher = run(&config(), &format!("{header}\n{plaintext}\n")).unwrap();
    let plain = run(&config(), &format!("{header}\n{cipher}")).unwrap();
    assert_eq!(plain, group_output(plaintext) + "\n");
}

#[test]
fn header_mid_stream_rekeys_the_machine() {
    let input = "\
* B Beta I II III AAAA
AAAAA
* B Beta I II III AAAA
AAAAA
";
    let output = run(&config(), input).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], lines[1]);
}

#[test]
fn rotor_order_matters() {
    let a = run(&config(), "* B Beta I II III AAAA\nAAAAA\n").unwrap();
    let b = run(&config(), "* B Beta I III II AAAA\nAAAAA\n").unwrap();
    assert_ne!(a, b);
}

#[test]
fn ring_token_changes_output() {
    let without = run(&config(), "* B Beta I II III AAAA\nAAAAA\n").unwrap();
    let with = run(&config(), "* B Beta I II III AAAA BBBB\nAAAAA\n").unwrap();
    assert_ne!(without, with);
}

#[test]
fn sessions_do_not_share_rotor_state() {
    let config = config();
    let mut first = Session::new(&config).unwrap();
    let mut second = Session::new(&config).unwrap();
    first.process_line("* B Beta I II III AAAA").unwrap();
    second.process_line("* B Beta I II III AAAA").unwrap();

    // Driving one session must not disturb the other.
    first.process_line("AAAAAAAAAA").unwrap();
    let isolated = second.process_line("AAAAA").unwrap().unwrap();

    let mut fresh = Session::new(&config).unwrap();
    fresh.process_line("* B Beta I II III AAAA").unwrap();
    assert_eq!(fresh.process_line("AAAAA").unwrap().unwrap(), isolated);
}

#[test]
fn message_before_header_is_rejected() {
    assert_eq!(
        run(&config(), "HELLO\n").unwrap_err(),
        EnigmaError::MissingHeader
    );
}

#[test]
fn header_with_unknown_rotor_is_rejected() {
    assert_eq!(
        run(&config(), "* B Beta I II VIII AAAA\nHELLO\n").unwrap_err(),
        EnigmaError::UnknownRotor("VIII".to_string())
    );
}

#[test]
fn bad_setting_length_is_rejected() {
    assert_eq!(
        run(&config(), "* B Beta I II III AAA\nHELLO\n").unwrap_err(),
        EnigmaError::InvalidSetting
    );
}

#[test]
fn malformed_plugboard_is_rejected() {
    assert_eq!(
        run(&config(), "* B Beta I II III AAAA (AB\nHELLO\n").unwrap_err(),
        EnigmaError::MalformedCycles
    );
}

#[test]
fn config_errors_surface_before_any_processing() {
    let truncated = "ABCDEFGHIJKLMNOPQRSTUVWXYZ\n";
    assert_eq!(
        MachineConfig::parse(truncated).unwrap_err(),
        EnigmaError::ConfigTruncated
    );
}
