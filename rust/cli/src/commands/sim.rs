//! Simulation command handler for large-scale round generation.
//!
//! Runs AI-vs-AI rounds and optionally records each one as a JSONL
//! [`RoundRecord`]. Every round starts a fresh game from `seed + i`, so a
//! recorded file can be regenerated exactly from its seeds.
//!
//! # Environment Variables
//!
//! - `TONK_SIM_BREAK_AFTER`: stop after N rounds (for testing the
//!   interrupted-save path)

use crate::config;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use tonk_ai::{create_policy, run_turn};
use tonk_engine::events::{DrawSource, GameEvent};
use tonk_engine::game::{Game, Phase, WinCondition};
use tonk_engine::logger::{ActionRecord, RoundLogger, RoundRecord};
use tonk_engine::player::TurnAction;

/// Upper bound on turns per simulated round. A round normally ends well
/// before this: every stock draw shrinks a 41-card pile, and discard draws
/// are taken only when they improve a hand.
const TURN_LIMIT: usize = 1000;

/// Handle the sim command: run AI-vs-AI rounds.
///
/// # Arguments
///
/// * `rounds` - Number of rounds to simulate (must be >= 1)
/// * `players` - Seats at the table (2-6; default from config)
/// * `seed` - Base RNG seed; round i uses `seed + i`
/// * `ante` - Ante per seat per round (default from config)
/// * `output` - Path for JSONL round records (omit to simulate without recording)
/// * `out` - Output stream for progress messages
/// * `err` - Output stream for error messages
pub fn handle_sim_command(
    rounds: u64,
    players: Option<u8>,
    seed: Option<u64>,
    ante: Option<u32>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let total = rounds as usize;
    if total == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    let cfg = match config::load_with_sources() {
        Ok(resolved) => resolved.config,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };
    let players = players.map(usize::from).unwrap_or(cfg.players as usize);
    let ante = ante.unwrap_or(cfg.ante);
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let policy = create_policy(&cfg.ai);

    let mut logger = match output.as_deref() {
        Some(path) => {
            if let Err(e) = ensure_parent_dir(Path::new(path)) {
                ui::write_error(err, &e)?;
                return Err(CliError::InvalidInput(e));
            }
            match RoundLogger::create(path) {
                Ok(l) => Some(l),
                Err(e) => {
                    ui::write_error(err, &format!("Failed to open {}: {}", path, e))?;
                    return Err(CliError::Io(e));
                }
            }
        }
        None => None,
    };

    let break_after = std::env::var("TONK_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());

    let mut completed = 0usize;
    for i in 0..total {
        let round_seed = base_seed.wrapping_add(i as u64);
        let (actions, outcome, scores, top_discard) =
            simulate_round(players, round_seed, ante, policy.as_ref())?;

        if let Some(logger) = logger.as_mut() {
            let record = RoundRecord {
                round_id: logger.next_id(),
                seed: Some(round_seed),
                actions,
                winner: outcome.map(|(winner, _, _)| winner),
                condition: outcome.map(|(_, condition, _)| condition),
                scores,
                pot: outcome.map(|(_, _, pot)| pot).unwrap_or(0),
                top_discard,
                ts: None,
                meta: None,
            };
            if let Err(e) = logger.write(&record) {
                ui::write_error(err, &format!("Failed to write round record: {}", e))?;
                return Err(CliError::Io(e));
            }
        }

        completed += 1;

        if let Some(b) = break_after
            && completed == b
        {
            writeln!(out, "Interrupted: saved {}/{}", completed, total)?;
            return Err(CliError::Interrupted(format!(
                "Interrupted: saved {}/{}",
                completed, total
            )));
        }
    }

    writeln!(out, "Simulated: {} rounds", completed)?;
    Ok(())
}

type RoundOutcome = (
    Vec<ActionRecord>,
    Option<(usize, WinCondition, u32)>,
    Vec<u32>,
    Option<tonk_engine::cards::Card>,
);

/// Play one full round with every seat on the same policy, collecting the
/// action log and outcome from the engine's event stream.
fn simulate_round(
    players: usize,
    seed: u64,
    ante: u32,
    policy: &dyn tonk_ai::DecisionPolicy,
) -> Result<RoundOutcome, CliError> {
    let mut game = Game::new(players, seed, ante)?;

    let actions: Rc<RefCell<Vec<ActionRecord>>> = Rc::new(RefCell::new(Vec::new()));
    let outcome: Rc<RefCell<Option<(usize, WinCondition, u32)>>> = Rc::new(RefCell::new(None));
    let actions_sink = Rc::clone(&actions);
    let outcome_sink = Rc::clone(&outcome);
    game.subscribe(move |event| {
        if let Some(record) = action_from_event(event) {
            actions_sink.borrow_mut().push(record);
        }
        if let GameEvent::RoundOver {
            winner,
            condition,
            pot,
        } = event
        {
            *outcome_sink.borrow_mut() = Some((*winner, *condition, *pot));
        }
    });

    game.deal()?;
    for _ in 0..TURN_LIMIT {
        if game.phase() == Phase::GameOver {
            break;
        }
        let seat = game.current_player();
        run_turn(&mut game, policy, seat)?;
    }

    let scores = game.match_scores().to_vec();
    let top_discard = game.top_discard();
    let actions = actions.borrow_mut().drain(..).collect();
    let outcome = *outcome.borrow();
    Ok((actions, outcome, scores, top_discard))
}

fn action_from_event(event: &GameEvent) -> Option<ActionRecord> {
    match event {
        GameEvent::CardDrawn {
            player_id, source, ..
        } => Some(ActionRecord {
            player_id: *player_id,
            action: match source {
                DrawSource::Stock => TurnAction::DrawStock,
                DrawSource::Discard => TurnAction::DrawDiscard,
            },
        }),
        GameEvent::SpreadLaid {
            player_id, cards, ..
        } => Some(ActionRecord {
            player_id: *player_id,
            action: TurnAction::Lay {
                cards: cards.clone(),
            },
        }),
        GameEvent::SpreadHit {
            player_id,
            spread_index,
            card,
        } => Some(ActionRecord {
            player_id: *player_id,
            action: TurnAction::Hit {
                card: *card,
                spread: *spread_index,
            },
        }),
        GameEvent::CardDiscarded { player_id, card } => Some(ActionRecord {
            player_id: *player_id,
            action: TurnAction::Discard { card: *card },
        }),
        GameEvent::KnockResolved { knocker, .. } => Some(ActionRecord {
            player_id: *knocker,
            action: TurnAction::Knock,
        }),
        GameEvent::BetRaised {
            player_id, amount, ..
        } => Some(ActionRecord {
            player_id: *player_id,
            action: TurnAction::Raise { amount: *amount },
        }),
        _ => None,
    }
}
