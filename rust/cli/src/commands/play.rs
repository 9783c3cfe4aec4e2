//! # Play Command
//!
//! Interactive Tonk gameplay: the user holds seat 0 and every other seat is
//! driven by an AI policy.
//!
//! The turn protocol follows the engine's phases. At the start of a turn the
//! user may knock or draw; after drawing they may lay spreads, hit table
//! spreads, raise the pot, and finally discard to end the turn. Game
//! notifications (draws, spreads, knocks, round results) are printed as the
//! engine emits them.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_card, format_hand, format_spread};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_turn_command};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tonk_ai::{create_policy, pick_name, run_turn};
use tonk_engine::errors::GameError;
use tonk_engine::events::{DrawSource, GameEvent};
use tonk_engine::game::{Game, Phase};
use tonk_engine::player::TurnAction;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const HUMAN_SEAT: usize = 0;

/// Handle the play command: interactive Tonk gameplay.
///
/// # Arguments
///
/// * `players` - Number of seats (2-6; default from config)
/// * `seed` - RNG seed for reproducibility (default: random)
/// * `ante` - Chips each seat antes per round (default from config)
/// * `rounds` - Maximum rounds to play (default: until the match ends)
/// * `ai` - Policy kind for AI seats ("standard" or "easy")
/// * `out` - Output stream for game display
/// * `err` - Error stream for warnings and errors
/// * `stdin` - Input stream for player actions
pub fn handle_play_command(
    players: Option<u8>,
    seed: Option<u64>,
    ante: Option<u32>,
    rounds: Option<u32>,
    ai: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = match config::load_with_sources() {
        Ok(resolved) => resolved.config,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let players = players.map(usize::from).unwrap_or(cfg.players as usize);
    let ante = ante.unwrap_or(cfg.ante);
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let ai_kind = ai.unwrap_or(cfg.ai);
    if ai_kind != "standard" && ai_kind != "easy" {
        ui::write_error(err, &format!("Unknown AI policy '{}'", ai_kind))?;
        return Err(CliError::InvalidInput(format!(
            "Unknown AI policy '{}'",
            ai_kind
        )));
    }
    if let Some(0) = rounds {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    writeln!(
        out,
        "play: players={} ante={} seed={} ai={}",
        players, ante, seed, ai_kind
    )?;

    let mut game = Game::new(players, seed, ante)?;
    game.players_mut()[HUMAN_SEAT].set_name("You");
    let mut name_rng = ChaCha20Rng::seed_from_u64(seed);
    for seat in 1..players {
        let name = pick_name(&mut name_rng);
        game.players_mut()[seat].set_name(name);
    }

    // Events land in a shared buffer; the loop drains it to `out` after each
    // engine call so notifications interleave correctly with prompts.
    let feed: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&feed);
    game.subscribe(move |event| {
        sink.borrow_mut().push(describe_event(event));
    });

    let policy = create_policy(&ai_kind);
    let mut rounds_played = 0u32;
    let mut quit_requested = false;

    game.deal()?;
    drain_feed(&feed, out)?;

    loop {
        if game.phase() == Phase::GameOver {
            rounds_played += 1;
            writeln!(out, "Scores: {:?}", game.match_scores())?;
            for player in game.players() {
                writeln!(
                    out,
                    "  Seat {} ({}): {} chips",
                    player.id(),
                    player.name(),
                    player.chips()
                )?;
            }
            if game.is_match_over() {
                if let Some(winner) = game.match_winner() {
                    writeln!(
                        out,
                        "Match over: seat {} ({}) wins",
                        winner,
                        game.players()[winner].name()
                    )?;
                }
                break;
            }
            if quit_requested || rounds.is_some_and(|limit| rounds_played >= limit) {
                break;
            }
            if !begin_next_round(&mut game, out)? {
                break;
            }
            drain_feed(&feed, out)?;
            continue;
        }

        if quit_requested {
            break;
        }

        let seat = game.current_player();
        if seat == HUMAN_SEAT {
            quit_requested = !human_turn(&mut game, stdin, out, err)?;
        } else {
            run_turn(&mut game, policy.as_ref(), seat)?;
        }
        drain_feed(&feed, out)?;
    }

    writeln!(out, "Rounds played: {}", rounds_played)?;
    Ok(())
}

/// Starts the next round, announcing the match result instead of failing
/// when fewer than two seats can still fund an ante (reachable after all-in
/// raises). Returns `Ok(false)` when the match is over.
fn begin_next_round(game: &mut Game, out: &mut dyn Write) -> Result<bool, CliError> {
    match game.start_next_round() {
        Ok(()) => Ok(true),
        Err(GameError::MatchOver) => {
            let solvent = game
                .players()
                .iter()
                .find(|p| !p.is_eliminated() && p.chips() > 0);
            match solvent {
                Some(p) => writeln!(
                    out,
                    "Match over: seat {} ({}) has all the chips",
                    p.id(),
                    p.name()
                )?,
                None => writeln!(out, "Match over: no seat can fund another round")?,
            }
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Run the human seat's turn. Returns `Ok(false)` when the user quit.
fn human_turn(
    game: &mut Game,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<bool, CliError> {
    show_table(game, out)?;

    loop {
        if game.phase() == Phase::GameOver || game.current_player() != HUMAN_SEAT {
            return Ok(true);
        }

        let prompt = match game.phase() {
            Phase::StartOfTurn => "Action (knock/draw/take/q): ",
            Phase::Draw => "Action (draw/take/q): ",
            _ => "Action (lay/hit/discard/raise/q): ",
        };
        write!(out, "{}", prompt)?;
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            return Ok(false); // EOF quits the session
        };
        match parse_turn_command(&line) {
            ParseResult::Quit => return Ok(false),
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
            }
            ParseResult::Command(action) => {
                if let Err(e) = apply_human_action(game, action, out) {
                    ui::write_error(err, &e.to_string())?;
                }
            }
        }
    }
}

fn apply_human_action(
    game: &mut Game,
    action: TurnAction,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match action {
        TurnAction::Knock => {
            game.knock()?;
        }
        TurnAction::DrawStock => {
            if game.phase() == Phase::StartOfTurn {
                game.proceed_to_draw()?;
            }
            match game.draw_from_deck()? {
                Some(card) => writeln!(out, "You drew {}", format_card(&card))?,
                None => writeln!(out, "Stock is empty; the round ends.")?,
            }
        }
        TurnAction::DrawDiscard => {
            if game.phase() == Phase::StartOfTurn {
                game.proceed_to_draw()?;
            }
            let card = game.draw_from_discard()?;
            writeln!(out, "You took {}", format_card(&card))?;
        }
        TurnAction::Lay { cards } => {
            game.lay_spread(&cards)?;
        }
        TurnAction::Hit { card, spread } => {
            game.hit_spread(card, spread)?;
        }
        TurnAction::Discard { card } => {
            game.discard(card)?;
        }
        TurnAction::Raise { amount } => {
            let paid = game.raise_bet(amount)?;
            if paid < amount {
                writeln!(out, "All in for {}", paid)?;
            }
        }
    }
    Ok(())
}

fn show_table(game: &Game, out: &mut dyn Write) -> Result<(), CliError> {
    let hand = game.players()[HUMAN_SEAT].hand();
    writeln!(
        out,
        "Your hand: {} ({} pts)",
        format_hand(hand),
        game.players()[HUMAN_SEAT].points()
    )?;
    match game.top_discard() {
        Some(card) => writeln!(out, "Discard: {}", format_card(&card))?,
        None => writeln!(out, "Discard: (empty)")?,
    }
    writeln!(out, "Stock: {}  Pot: {}", game.deck_count(), game.pot())?;
    for (i, spread) in game.spreads().iter().enumerate() {
        writeln!(out, "  [{}] {}", i, format_spread(spread))?;
    }
    Ok(())
}

fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::RoundStarted { round, ante, pot } => {
            format!("Round {} started (ante {}, pot {})", round, ante, pot)
        }
        GameEvent::CardsDealt { player_id, count } => {
            format!("Seat {} dealt {} cards", player_id, count)
        }
        GameEvent::InitialTonk { player_id, points } => {
            format!("Initial tonk! Seat {} dealt {} points", player_id, points)
        }
        GameEvent::Redeal { attempt } => format!("Redeal (attempt {})", attempt),
        GameEvent::TurnStarted { player_id } => format!("Seat {} to act", player_id),
        GameEvent::CardDrawn {
            player_id, source, ..
        } => {
            let from = match source {
                DrawSource::Stock => "stock",
                DrawSource::Discard => "discard pile",
            };
            format!("Seat {} drew from the {}", player_id, from)
        }
        GameEvent::SpreadLaid {
            player_id, cards, ..
        } => format!("Seat {} laid {}", player_id, format_hand(cards)),
        GameEvent::SpreadHit {
            player_id,
            spread_index,
            card,
        } => format!(
            "Seat {} hit spread {} with {}",
            player_id,
            spread_index,
            format_card(card)
        ),
        GameEvent::CardDiscarded { player_id, card } => {
            format!("Seat {} discarded {}", player_id, format_card(card))
        }
        GameEvent::KnockResolved {
            knocker,
            winner,
            caught,
        } => {
            if *caught {
                format!("Seat {} knocked and was caught by seat {}", knocker, winner)
            } else {
                format!("Seat {} knocked and wins", knocker)
            }
        }
        GameEvent::BetRaised {
            player_id,
            amount,
            pot,
        } => format!("Seat {} raised {} (pot {})", player_id, amount, pot),
        GameEvent::TurnEnded { player_id } => format!("Seat {} ended their turn", player_id),
        GameEvent::RoundOver {
            winner,
            condition,
            pot,
        } => format!(
            "Round over: seat {} wins {} chips ({:?})",
            winner, pot, condition
        ),
        GameEvent::MatchOver { winner, scores } => {
            format!("Match over: seat {} wins (scores {:?})", winner, scores)
        }
    }
}

fn drain_feed(feed: &Rc<RefCell<Vec<String>>>, out: &mut dyn Write) -> Result<(), CliError> {
    for line in feed.borrow_mut().drain(..) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
