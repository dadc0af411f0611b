//! Command-line front end for the rotor cipher machine simulator.
//!
//! ```bash
//! enigma [--verbose] CONFIG [INPUT [OUTPUT]]
//! ```
//!
//! Reads a machine configuration, processes message-group input line by
//! line (from INPUT or stdin), and writes grouped output (to OUTPUT or
//! stdout). With `--verbose`, each converted symbol emits one debug line
//! showing the rotor positions and the signal path.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use enigma::{MachineConfig, Session};

#[derive(Parser, Debug)]
#[command(name = "enigma")]
#[command(about = "Rotor cipher machine simulator")]
struct Args {
    /// Emit per-symbol rotor positions and signal path to stderr
    #[arg(long)]
    verbose: bool,

    /// Machine configuration file
    config: PathBuf,

    /// Message input file (stdin when absent)
    input: Option<PathBuf>,

    /// Output file (stdout when absent)
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(io::stderr)
            .init();
    }

    let config_text = fs::read_to_string(&args.config)
        .with_context(|| format!("could not open {}", args.config.display()))?;
    let config = MachineConfig::parse(&config_text)
        .with_context(|| format!("bad configuration in {}", args.config.display()))?;

    let input = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not open {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("could not read stdin")?;
            buffer
        }
    };

    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut session = Session::new(&config)?;
    if args.verbose {
        session.machine_mut().set_tracer(Box::new(|trace| {
            let settings: String = trace.settings.iter().collect();
            debug!(
                "[{}] {} -> {} -> {}",
                settings, trace.input, trace.plugged, trace.output
            );
        }));
    }

    for line in input.lines() {
        if let Some(rendered) = session.process_line(line)? {
            writeln!(output, "{rendered}").context("could not write output")?;
        }
    }
    output.flush().context("could not write output")?;
    Ok(())
}
