//! Random number generator verification command.
//!
//! The `rng` command generates a sample from the ChaCha20 generator used for
//! shuffling, so determinism can be checked from the shell: the same seed
//! must always print the same five values.

use crate::error::CliError;
use rand::{RngCore, SeedableRng};
use std::io::Write;

/// Handle the rng command.
///
/// Seeds a ChaCha20 RNG with the given seed (or a random one) and prints a
/// sample of five values.
pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(s);
    let mut vals = vec![];
    for _ in 0..5 {
        vals.push(rng.next_u64());
    }
    writeln!(out, "RNG sample: {:?}", vals)?;
    Ok(())
}
