use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};

/// Draw pile plus discard pile for one round of Tonk.
///
/// The top of each pile is the end of its vector. There is no
/// reshuffle-on-empty: once the draw pile runs out the round ends, so
/// [`Deck::draw`] returning `None` is a game-ending signal rather than an
/// error.
#[derive(Debug, Serialize, Deserialize)]
pub struct Deck {
    draw: Vec<Card>,
    discard: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            draw: full_deck(),
            discard: Vec::new(),
            rng,
        }
    }

    /// Builds a deck with explicit pile contents; the last element of each
    /// vector is the top of that pile. Used by simulations and tests that
    /// need a predetermined deal.
    pub fn from_piles(draw: Vec<Card>, discard: Vec<Card>, seed: u64) -> Self {
        Self {
            draw,
            discard,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Rebuilds the full 52-card draw pile, clears the discard pile, and
    /// applies a uniform Fisher-Yates permutation.
    pub fn shuffle(&mut self) {
        self.draw = full_deck();
        self.draw.shuffle(&mut self.rng);
        self.discard.clear();
    }

    /// Removes and returns the top card of the draw pile, or `None` when the
    /// stock is exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        self.draw.pop()
    }

    /// Places a card on top of the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    /// Removes and returns the top card of the discard pile, if any.
    pub fn draw_from_discard(&mut self) -> Option<Card> {
        self.discard.pop()
    }

    /// Peeks at the top of the discard pile without mutating it.
    pub fn top_discard(&self) -> Option<Card> {
        self.discard.last().copied()
    }

    pub fn remaining(&self) -> usize {
        self.draw.len()
    }

    pub fn discard_count(&self) -> usize {
        self.discard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }

    pub fn draw_pile(&self) -> &[Card] {
        &self.draw
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }
}
