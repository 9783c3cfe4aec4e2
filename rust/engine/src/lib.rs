//! # tonk-engine: Tonk Rules Engine Core
//!
//! A deterministic rules engine and turn/phase state machine for Tonk, a
//! rummy-style card game. Provides deck and hand modeling, book/run spread
//! validation and enumeration, knock/tonk resolution, round and match
//! scoring, chip accounting, and synchronous event notification — with
//! reproducible RNG for replay and testing.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Draw and discard piles with deterministic ChaCha20 shuffling
//! - [`spread`] - Book/run validation, mutation rules, and candidate enumeration
//! - [`player`] - Hands, chip ledgers, and the TurnAction vocabulary
//! - [`game`] - The central state machine: dealing, turns, knocks, scoring
//! - [`events`] - Tagged GameEvent variants and the synchronous EventBus
//! - [`logger`] - RoundRecord serialization and JSONL round histories
//! - [`errors`] - Error types for rejected operations
//!
//! ## Quick Start
//!
//! ```rust
//! use tonk_engine::cards::{Card, Rank, Suit};
//! use tonk_engine::spread::{validate, SpreadType};
//!
//! let book = [
//!     Card::new(Suit::Spades, Rank::Seven),
//!     Card::new(Suit::Hearts, Rank::Seven),
//!     Card::new(Suit::Diamonds, Rank::Seven),
//! ];
//! assert_eq!(validate(&book), Some(SpreadType::Book));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All outcomes are reproducible from a seed:
//!
//! ```rust
//! use tonk_engine::deck::Deck;
//!
//! let mut d1 = Deck::new_with_seed(42);
//! let mut d2 = Deck::new_with_seed(42);
//! d1.shuffle();
//! d2.shuffle();
//! assert_eq!(d1.draw(), d2.draw());
//! ```
//!
//! ## Driving a Game
//!
//! ```rust
//! use tonk_engine::game::{Game, Phase, DEFAULT_ANTE};
//!
//! let mut game = Game::new(2, 7, DEFAULT_ANTE).expect("two seats");
//! game.deal().expect("deal");
//! if game.phase() == Phase::StartOfTurn {
//!     game.proceed_to_draw().expect("draw phase");
//!     game.draw_from_deck().expect("stock has cards");
//! }
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod events;
pub mod game;
pub mod logger;
pub mod player;
pub mod spread;
