use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Default chip stack each seat starts a match with.
pub const STARTING_CHIPS: u32 = 100;

/// One action a player can take on their turn.
///
/// This is the textual-protocol and logging representation of a move; the
/// engine itself is driven through the corresponding [`crate::game::Game`]
/// operations.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnAction {
    /// Draw the top card of the stock.
    DrawStock,
    /// Draw the top card of the discard pile.
    DrawDiscard,
    /// Lay a new spread from the hand.
    Lay { cards: Vec<Card> },
    /// Add one card to an existing table spread.
    Hit { card: Card, spread: usize },
    /// Discard one card, ending the turn.
    Discard { card: Card },
    /// Claim lowest points before drawing.
    Knock,
    /// Add chips to the pot.
    Raise { amount: u32 },
}

/// A seat at the table: hand, chips, and betting ledger.
///
/// The hand order is presentation-only; every rule matches cards by value
/// (suit plus rank), never by slot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: usize,
    name: String,
    hand: Vec<Card>,
    chips: u32,
    current_bet: u32,
    eliminated: bool,
}

impl Player {
    pub fn new(id: usize, name: impl Into<String>, chips: u32) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            chips,
            current_bet: 0,
            eliminated: false,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn chips(&self) -> u32 {
        self.chips
    }

    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    pub fn set_eliminated(&mut self, eliminated: bool) {
        self.eliminated = eliminated;
    }

    /// Sum of hand card values; derived, never stored.
    pub fn points(&self) -> u32 {
        self.hand.iter().map(|c| c.value()).sum()
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub fn has_card(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }

    /// Removes one card matching `card` by value. Returns false, with no
    /// effect, when the card is absent; callers must check.
    pub fn remove_card(&mut self, card: Card) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(i) => {
                self.hand.remove(i);
                true
            }
            None => false,
        }
    }

    /// Removes every card in `cards`, all or nothing. Returns false and
    /// leaves the hand untouched if any card is absent.
    pub fn remove_cards(&mut self, cards: &[Card]) -> bool {
        let mut remaining = self.hand.clone();
        for &card in cards {
            match remaining.iter().position(|&c| c == card) {
                Some(i) => {
                    remaining.remove(i);
                }
                None => return false,
            }
        }
        self.hand = remaining;
        true
    }

    /// Moves a card within the hand for display purposes only; points,
    /// spreads, and legality are unaffected by hand order.
    pub fn reorder_card(&mut self, from: usize, to: usize) {
        if from < self.hand.len() && to < self.hand.len() && from != to {
            let card = self.hand.remove(from);
            self.hand.insert(to, card);
        }
    }

    /// Deducts up to `amount` chips, clamped to the available stack (all-in
    /// semantics). Returns the amount actually deducted.
    pub fn bet(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.current_bet += paid;
        paid
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    /// Clears per-round state; chips persist across rounds.
    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.current_bet = 0;
    }
}
