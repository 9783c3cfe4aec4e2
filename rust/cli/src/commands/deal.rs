//! Deal command handler for single round dealing and display.
//!
//! Deals one round face-up: every seat's hand with its point total, the
//! seeded discard, and the stock count. Supports optional seeding for
//! deterministic dealing.

use crate::error::CliError;
use crate::formatters::format_hand;
use tonk_engine::game::{DEFAULT_ANTE, Game, Phase};
use std::io::Write;

/// Handle the deal command.
///
/// Deals one round and shows every hand for inspection. If the deal ends the
/// round immediately (a dealt hand worth 49-50 points), the automatic win is
/// reported as well.
pub fn handle_deal_command(
    seed: Option<u64>,
    players: Option<u8>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let base_seed = seed.unwrap_or_else(rand::random);
    let players = players.unwrap_or(2) as usize;

    let mut game = Game::new(players, base_seed, DEFAULT_ANTE)?;
    game.deal()?;

    for player in game.players() {
        writeln!(
            out,
            "Seat {}: {} ({} pts)",
            player.id(),
            format_hand(player.hand()),
            player.points()
        )?;
    }
    match game.top_discard() {
        Some(card) => writeln!(out, "Discard: {}", crate::formatters::format_card(&card))?,
        None => writeln!(out, "Discard: (empty)")?,
    }
    writeln!(out, "Stock: {} cards", game.deck_count())?;

    if game.phase() == Phase::GameOver
        && let Some(winner) = game.winner()
    {
        writeln!(out, "Initial tonk: seat {} wins", winner)?;
    }
    Ok(())
}
