//! # tonk-ai: AI Opponent System for Tonk
//!
//! Rule-based opponents for Tonk gameplay. A policy is a read-only decision
//! capability composed with a plain engine [`tonk_engine::player::Player`]:
//! it sees only its own hand and public information (discard top, the shared
//! spread pool), never other hands or the stock order.
//!
//! ## Core Components
//!
//! - [`DecisionPolicy`] - Trait defining the draw/lay/hit/discard/knock decisions
//! - [`heuristic`] - The rule-based policy implementation
//! - [`create_policy`] - Factory function for policies by name
//! - [`run_turn`] - Drives one complete AI turn through the game engine
//!
//! ## Quick Start
//!
//! ```rust
//! use tonk_ai::{create_policy, run_turn};
//! use tonk_engine::game::{Game, Phase, DEFAULT_ANTE};
//!
//! let policy = create_policy("standard");
//! let mut game = Game::new(2, 42, DEFAULT_ANTE).expect("two seats");
//! game.deal().expect("deal");
//!
//! if game.phase() == Phase::StartOfTurn {
//!     let seat = game.current_player();
//!     run_turn(&mut game, policy.as_ref(), seat).expect("turn runs");
//! }
//! ```

use rand::seq::IndexedRandom;
use tonk_engine::cards::Card;
use tonk_engine::errors::GameError;
use tonk_engine::events::DrawSource;
use tonk_engine::game::{Game, Phase};
use tonk_engine::spread::{Spread, SpreadCandidate};

pub mod heuristic;

/// One playable hit: a hand card and the table spread it extends.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct HitPlay {
    pub card: Card,
    pub spread_index: usize,
}

/// Decision capability for a computer-controlled seat.
///
/// Every method is a pure function of the seat's own hand plus publicly
/// visible state; implementations must be deterministic so simulations are
/// reproducible. A human-controlled seat simply has no policy — the host
/// supplies decisions directly.
pub trait DecisionPolicy {
    /// Choose where to draw from, given the visible discard top.
    fn decide_draw(&self, hand: &[Card], discard_top: Option<Card>) -> DrawSource;

    /// The single best spread to lay right now, if any.
    fn find_best_spread(&self, hand: &[Card]) -> Option<SpreadCandidate>;

    /// Greedy lay plan: best candidate, consume its cards, repeat.
    fn find_all_spreads_to_lay(&self, hand: &[Card]) -> Vec<SpreadCandidate>;

    /// Every legal hit against the table, ordered by descending card value
    /// (shed expensive cards first).
    fn find_hit_opportunities(&self, hand: &[Card], spreads: &[Spread]) -> Vec<HitPlay>;

    /// Which card to throw away. `None` only for an empty hand.
    fn decide_discard(&self, hand: &[Card]) -> Option<Card>;

    /// Whether to knock instead of playing the turn out.
    fn should_knock(&self, hand: &[Card]) -> bool;

    /// Identifier for this policy.
    fn name(&self) -> &str;
}

/// Factory for policies by kind string.
///
/// Supported kinds: `"standard"` (full heuristics) and `"easy"`
/// (conservative: stock-only draws, simple discards).
///
/// # Panics
///
/// Panics on an unknown kind.
pub fn create_policy(kind: &str) -> Box<dyn DecisionPolicy> {
    match kind {
        "standard" => Box::new(heuristic::HeuristicPolicy::new(
            heuristic::Difficulty::Standard,
        )),
        "easy" => Box::new(heuristic::HeuristicPolicy::new(heuristic::Difficulty::Easy)),
        _ => panic!("Unknown policy kind: {}", kind),
    }
}

/// Display names for AI seats, drawn through the host's RNG.
pub const AI_NAMES: &[&str] = &[
    "Ace", "Dealer", "Lucky", "Shark", "Maverick", "Rounder", "Hustler", "Duke",
];

pub fn pick_name<R: rand::Rng + ?Sized>(rng: &mut R) -> &'static str {
    AI_NAMES.choose(rng).copied().unwrap_or("Dealer")
}

/// Drives one complete turn for `seat` through the engine.
///
/// Choreography: knock check first (ends the round immediately if taken),
/// else draw, then lay every available spread, then hit every available
/// spread — recomputing opportunities from the live hand before each hit,
/// since prior plays may have consumed a card — then discard exactly one
/// card. The round-over state is re-checked between every step; a host may
/// pause between steps for presentation without affecting game state.
pub fn run_turn(game: &mut Game, policy: &dyn DecisionPolicy, seat: usize) -> Result<(), GameError> {
    game.ensure_turn(seat)?;

    let hand = game.players()[seat].hand().to_vec();
    if policy.should_knock(&hand) {
        game.knock()?;
        return Ok(());
    }

    game.proceed_to_draw()?;
    let choice = match game.top_discard() {
        Some(top) => policy.decide_draw(&hand, Some(top)),
        None => DrawSource::Stock,
    };
    match choice {
        DrawSource::Discard => {
            game.draw_from_discard()?;
        }
        DrawSource::Stock => {
            // None means the stock ran out and the round is already over
            if game.draw_from_deck()?.is_none() {
                return Ok(());
            }
        }
    }

    loop {
        if game.phase() == Phase::GameOver {
            return Ok(());
        }
        let hand = game.players()[seat].hand().to_vec();
        let Some(candidate) = policy.find_best_spread(&hand) else {
            break;
        };
        game.lay_spread(&candidate.cards)?;
    }

    loop {
        if game.phase() == Phase::GameOver {
            return Ok(());
        }
        let hand = game.players()[seat].hand().to_vec();
        let hits = policy.find_hit_opportunities(&hand, game.spreads());
        let Some(hit) = hits.first() else {
            break;
        };
        game.hit_spread(hit.card, hit.spread_index)?;
    }

    if game.phase() == Phase::GameOver {
        return Ok(());
    }
    let hand = game.players()[seat].hand().to_vec();
    if let Some(card) = policy.decide_discard(&hand) {
        game.discard(card)?;
    }
    Ok(())
}
