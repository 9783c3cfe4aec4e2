use thiserror::Error;

use crate::cards::Card;
use crate::game::Phase;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid player count: {count} (expected 2-6)")]
    InvalidPlayerCount { count: usize },
    #[error("operation not allowed in {phase:?} phase")]
    WrongPhase { phase: Phase },
    #[error("it's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("cards do not form a valid book or run")]
    InvalidSpread,
    #[error("duplicate card in request")]
    DuplicateCard,
    #[error("card {card:?} is not in the player's hand")]
    CardNotHeld { card: Card },
    #[error("no spread at index {index}")]
    SpreadNotFound { index: usize },
    #[error("card {card:?} cannot extend that spread")]
    CannotHit { card: Card },
    #[error("discard pile is empty")]
    EmptyDiscard,
    #[error("draw pile exhausted")]
    StockExhausted,
    #[error("round is not over")]
    RoundNotOver,
    #[error("match is over")]
    MatchOver,
}
