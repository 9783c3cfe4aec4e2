//! # Tonk CLI Library
//!
//! Command-line interface for the Tonk rules engine. Exposes subcommands for
//! playing interactively, simulating AI-vs-AI rounds, and analyzing recorded
//! round histories.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses
//! command-line arguments and executes the appropriate subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["tonk", "sim", "--rounds", "10", "--seed", "42"];
//! let code = tonk_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play Tonk interactively against AI opponents
//! - `sim`: Run AI-vs-AI rounds and record JSONL round histories
//! - `stats`: Aggregate statistics from JSONL round history files
//! - `deal`: Deal a single round face-up for inspection
//! - `cfg`: Display current configuration settings
//! - `rng`: Verify RNG determinism

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{Commands, TonkCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_rng_command,
    handle_sim_command, handle_stats_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate
/// subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["tonk", "deal", "--seed", "42"];
/// let code = tonk_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "sim", "stats", "deal", "cfg", "rng"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = TonkCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Tonk CLI").is_err()
                        || writeln!(err, "Usage: tonk <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    if writeln!(err, "\nFor full help, run: tonk --help").is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => match cli.cmd {
            Commands::Cfg => match handle_cfg_command(out, err) {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            },
            Commands::Play {
                players,
                seed,
                ante,
                rounds,
                ai,
            } => {
                // Use stdin for real input (supports both TTY and piped stdin)
                let stdin = std::io::stdin();
                let mut stdin_lock = stdin.lock();
                match handle_play_command(
                    players,
                    seed,
                    ante,
                    rounds,
                    ai,
                    out,
                    err,
                    &mut stdin_lock,
                ) {
                    Ok(()) => exit_code::SUCCESS,
                    Err(e) => {
                        if writeln!(err, "Error: {}", e).is_err() {
                            return exit_code::ERROR;
                        }
                        exit_code::ERROR
                    }
                }
            }
            Commands::Sim {
                rounds,
                players,
                seed,
                ante,
                output,
            } => match handle_sim_command(rounds, players, seed, ante, output, out, err) {
                Ok(()) => exit_code::SUCCESS,
                Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            },
            Commands::Stats { input } => match handle_stats_command(input, out, err) {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            },
            Commands::Deal { seed, players } => match handle_deal_command(seed, players, out) {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            },
            Commands::Rng { seed } => match handle_rng_command(seed, out) {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            },
        },
    }
}
