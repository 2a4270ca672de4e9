//! Command-line surface.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "tbgen",
    about = "Generate random nearest-point VHDL test benches",
    long_about = "Generates a number of random VHDL test benches and writes them into the specified directory. \
The directory must exist. If no directory is specified, the current working directory is assumed.",
    override_usage = "tbgen [opts] [<dir>]",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Exactly X random cases will be generated (default 20).
    #[arg(long = "random-cases", value_name = "X")]
    pub random_cases: Option<u32>,

    /// Architecture name for the test benches (no quotes). Must match the
    /// architecture of the component in your VHDL design file (default 'bhv').
    #[arg(long = "arch-name", value_name = "T")]
    pub arch_name: Option<String>,

    /// Seed for the random generator (default: derived from the clock).
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Place exactly N points at the minimum distance in every case (1..=8).
    #[arg(long = "near-count", value_name = "N", value_parser = clap::value_parser!(u8).range(1..=8))]
    pub near_count: Option<u8>,

    /// Also write every case to a manifest (.json, .jsonl or .cbor).
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Re-check the expected outputs stored in a manifest; generates nothing.
    #[arg(long = "verify-manifest", value_name = "FILE")]
    pub verify_manifest: Option<PathBuf>,

    /// TOML profile with defaults for the options above.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory (must exist).
    #[arg(value_name = "dir")]
    pub dir: Option<PathBuf>,
}

/// Parse `args` (program name first).
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Process exit code for a parse outcome: 0 for `--help`/`--version`, 1 otherwise.
#[must_use]
pub fn exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Message to print for a parse failure.
#[must_use]
pub fn diagnostic(err: &clap::Error) -> String {
    let offending = match err.kind() {
        ErrorKind::UnknownArgument => err.get(ContextKind::InvalidArg),
        _ => None,
    };
    match offending {
        Some(ContextValue::String(arg)) => {
            format!("unrecognized option: {arg}. Use --help for options\n")
        }
        _ => err.render().to_string(),
    }
}
