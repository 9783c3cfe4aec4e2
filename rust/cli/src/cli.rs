//! Command-line argument definitions for the Tonk CLI.
//!
//! This module holds the clap derive types that define the CLI surface.
//! Parsing and dispatch live in [`crate::run`].

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `tonk` binary.
#[derive(Parser, Debug)]
#[command(name = "tonk", version, about = "Tonk card game: play, simulate, analyze")]
pub struct TonkCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// All `tonk` subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play interactively: you are seat 0, the rest are AI opponents
    Play {
        /// Number of seats at the table (2-6)
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=6))]
        players: Option<u8>,
        /// RNG seed for reproducible deals
        #[arg(long)]
        seed: Option<u64>,
        /// Chips each seat antes into the pot per round
        #[arg(long)]
        ante: Option<u32>,
        /// Maximum number of rounds to play (default: until the match ends)
        #[arg(long)]
        rounds: Option<u32>,
        /// AI policy for computer seats (standard|easy)
        #[arg(long)]
        ai: Option<String>,
    },
    /// Run AI-vs-AI rounds and optionally record them as JSONL
    Sim {
        /// Number of rounds to simulate
        #[arg(long)]
        rounds: u64,
        /// Number of seats at the table (2-6)
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=6))]
        players: Option<u8>,
        /// Base RNG seed (round i uses seed + i)
        #[arg(long)]
        seed: Option<u64>,
        /// Ante per seat per round
        #[arg(long)]
        ante: Option<u32>,
        /// Path to write round records (JSONL)
        #[arg(long)]
        output: Option<String>,
    },
    /// Aggregate statistics from JSONL round history files
    Stats {
        /// JSONL file (or directory of .jsonl / .jsonl.zst files)
        #[arg(long)]
        input: String,
    },
    /// Deal one round and show every hand (for inspection)
    Deal {
        /// RNG seed for deterministic dealing
        #[arg(long)]
        seed: Option<u64>,
        /// Number of seats at the table (2-6)
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=6))]
        players: Option<u8>,
    },
    /// Display current configuration settings and their sources
    Cfg,
    /// Verify RNG determinism by printing a sample
    Rng {
        /// Seed for the sample (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_subcommands() {
        let commands = vec![
            vec!["tonk", "play"],
            vec!["tonk", "play", "--players", "4", "--seed", "7"],
            vec!["tonk", "sim", "--rounds", "10"],
            vec!["tonk", "stats", "--input", "rounds.jsonl"],
            vec!["tonk", "deal", "--seed", "42"],
            vec!["tonk", "cfg"],
            vec!["tonk", "rng", "--seed", "1"],
        ];
        for args in commands {
            assert!(
                TonkCli::try_parse_from(&args).is_ok(),
                "failed to parse: {:?}",
                args
            );
        }
    }

    #[test]
    fn rejects_out_of_range_player_counts() {
        assert!(TonkCli::try_parse_from(["tonk", "play", "--players", "1"]).is_err());
        assert!(TonkCli::try_parse_from(["tonk", "play", "--players", "7"]).is_err());
        assert!(TonkCli::try_parse_from(["tonk", "deal", "--players", "0"]).is_err());
    }

    #[test]
    fn sim_requires_rounds() {
        assert!(TonkCli::try_parse_from(["tonk", "sim"]).is_err());
        assert!(TonkCli::try_parse_from(["tonk", "sim", "--rounds", "5"]).is_ok());
    }
}
