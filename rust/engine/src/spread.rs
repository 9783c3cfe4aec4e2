use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cards::{Card, Suit};
use crate::errors::GameError;

/// Maximum size of a book: one card per suit.
pub const MAX_BOOK_SIZE: usize = 4;

/// Minimum number of cards in any spread.
pub const MIN_SPREAD_SIZE: usize = 3;

/// The two kinds of spread recognized by Tonk.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadType {
    /// 3-4 cards sharing a rank.
    Book,
    /// 3 or more same-suit cards with contiguous rank order.
    Run,
}

/// Classifies a set of cards as a book, a run, or neither.
///
/// At most one rule can hold for a given set: a book needs a uniform rank
/// while a run needs rank variation, so the two are mutually exclusive.
/// Runs reject any gap and never wrap from King back to Ace.
pub fn validate(cards: &[Card]) -> Option<SpreadType> {
    if cards.len() < MIN_SPREAD_SIZE {
        return None;
    }
    if cards.len() <= MAX_BOOK_SIZE && cards.iter().all(|c| c.rank == cards[0].rank) {
        return Some(SpreadType::Book);
    }
    if cards.iter().all(|c| c.suit == cards[0].suit) {
        let mut idx: Vec<u8> = cards.iter().map(|c| c.index()).collect();
        idx.sort_unstable();
        if idx.windows(2).all(|w| w[1] == w[0] + 1) {
            return Some(SpreadType::Run);
        }
    }
    None
}

/// A candidate spread discovered in a hand but not yet laid.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SpreadCandidate {
    pub kind: SpreadType,
    pub cards: Vec<Card>,
}

impl SpreadCandidate {
    pub fn points(&self) -> u32 {
        self.cards.iter().map(|c| c.value()).sum()
    }
}

/// A spread laid on the table.
///
/// Once laid, a spread only ever grows by one legal card at a time; cards
/// are never removed and the kind never changes. Run cards are kept sorted
/// ascending by rank so extension order is part of the serialized state.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    kind: SpreadType,
    owner: usize,
    cards: Vec<Card>,
}

impl Spread {
    /// Validates `cards` and creates the spread, owned by seat `owner`.
    pub fn new(owner: usize, cards: &[Card]) -> Result<Spread, GameError> {
        let kind = validate(cards).ok_or(GameError::InvalidSpread)?;
        let mut cards = cards.to_vec();
        if kind == SpreadType::Run {
            cards.sort_by_key(|c| c.index());
        }
        Ok(Spread { kind, owner, cards })
    }

    pub fn kind(&self) -> SpreadType {
        self.kind
    }

    pub fn owner(&self) -> usize {
        self.owner
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn points(&self) -> u32 {
        self.cards.iter().map(|c| c.value()).sum()
    }

    /// Whether `card` may legally extend this spread: a book accepts a
    /// matching rank while below four cards; a run accepts a same-suit card
    /// adjacent to either open end, never a mid-sequence insertion.
    pub fn can_add(&self, card: Card) -> bool {
        match self.kind {
            SpreadType::Book => {
                self.cards.len() < MAX_BOOK_SIZE && card.rank == self.cards[0].rank
            }
            SpreadType::Run => {
                if card.suit != self.cards[0].suit {
                    return false;
                }
                let low = self.cards[0].index();
                let high = self.cards[self.cards.len() - 1].index();
                card.index() + 1 == low || card.index() == high + 1
            }
        }
    }

    /// Appends `card` if legal, keeping run order ascending.
    pub fn add(&mut self, card: Card) -> Result<(), GameError> {
        if !self.can_add(card) {
            return Err(GameError::CannotHit { card });
        }
        match self.kind {
            SpreadType::Book => self.cards.push(card),
            SpreadType::Run => {
                if card.index() < self.cards[0].index() {
                    self.cards.insert(0, card);
                } else {
                    self.cards.push(card);
                }
            }
        }
        Ok(())
    }
}

/// Enumerates every candidate spread latent in `hand`.
///
/// Rank groups of three or more become book candidates (truncated at four
/// cards); each suit group is sorted by rank index and scanned once left to
/// right, emitting every maximal consecutive run of length three or more.
/// Candidates may overlap: committing one consumes its cards and invalidates
/// overlapping candidates on the next enumeration.
pub fn find_possible_spreads(hand: &[Card]) -> Vec<SpreadCandidate> {
    let mut out = Vec::new();

    let mut by_rank: BTreeMap<u8, Vec<Card>> = BTreeMap::new();
    for &c in hand {
        by_rank.entry(c.index()).or_default().push(c);
    }
    for group in by_rank.values() {
        if group.len() >= MIN_SPREAD_SIZE {
            out.push(SpreadCandidate {
                kind: SpreadType::Book,
                cards: group[..group.len().min(MAX_BOOK_SIZE)].to_vec(),
            });
        }
    }

    let mut by_suit: BTreeMap<Suit, Vec<Card>> = BTreeMap::new();
    for &c in hand {
        by_suit.entry(c.suit).or_default().push(c);
    }
    for group in by_suit.values_mut() {
        group.sort_by_key(|c| c.index());
        group.dedup_by_key(|c| c.index());
        let mut acc: Vec<Card> = Vec::new();
        for &c in group.iter() {
            match acc.last() {
                Some(prev) if c.index() == prev.index() + 1 => acc.push(c),
                _ => {
                    flush_run(&mut out, &acc);
                    acc.clear();
                    acc.push(c);
                }
            }
        }
        flush_run(&mut out, &acc);
    }

    out
}

fn flush_run(out: &mut Vec<SpreadCandidate>, acc: &[Card]) {
    if acc.len() >= MIN_SPREAD_SIZE {
        out.push(SpreadCandidate {
            kind: SpreadType::Run,
            cards: acc.to_vec(),
        });
    }
}
