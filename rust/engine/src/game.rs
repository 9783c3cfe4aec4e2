use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{DrawSource, EventBus, GameEvent, SubscriberId};
use crate::player::{Player, STARTING_CHIPS};
use crate::spread::Spread;

/// Cards dealt to each seat, regardless of player count.
pub const HAND_SIZE: usize = 5;

/// Inclusive band of opening-hand totals that win the round outright.
pub const INITIAL_TONK_MIN: u32 = 49;
pub const INITIAL_TONK_MAX: u32 = 50;

/// Cumulative score at which the match ends; the match winner is the seat
/// with the *lowest* cumulative score at that point.
pub const MATCH_SCORE_LIMIT: u32 = 100;

/// Ante posted by every active seat before each deal.
pub const DEFAULT_ANTE: u32 = 5;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

/// Phase of the turn state machine.
///
/// `PreGame -> StartOfTurn <-> Draw -> Action -> (next seat or) GameOver`.
/// The initial-tonk check runs inside the deal and either enters
/// `StartOfTurn` or short-circuits to `GameOver`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PreGame,
    StartOfTurn,
    Draw,
    Action,
    GameOver,
}

/// How a round ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// Hand emptied through spreads, hits, or the final discard.
    Tonk,
    /// Opening hand totaled 49-50.
    InitialTonk,
    /// Knocker held strictly the lowest points.
    Knock,
    /// Knocker was caught; the true-minimum opponent wins.
    Caught,
    /// Stock ran out; lowest points wins.
    StockEmpty,
}

/// The single source of truth for one match of Tonk.
///
/// Owns the deck, the seats, the shared spread pool, and the turn/phase
/// state machine; every mutation of those flows through the operations
/// here. Strictly turn-sequential: exactly one seat acts at a time and the
/// current-seat pointer only advances when a turn ends.
#[derive(Debug, Serialize, Deserialize)]
pub struct Game {
    deck: Deck,
    players: Vec<Player>,
    /// Shared pool: any player may hit any spread, including opponents'.
    spreads: Vec<Spread>,
    current: usize,
    phase: Phase,
    winner: Option<usize>,
    win_condition: Option<WinCondition>,
    match_scores: Vec<u32>,
    round: u32,
    pot: u32,
    highest_bet: u32,
    ante: u32,
    #[serde(skip)]
    bus: EventBus,
}

impl Game {
    /// Creates a match with a freshly shuffled deck. Call [`Game::deal`] to
    /// enter the first round.
    pub fn new(player_count: usize, seed: u64, ante: u32) -> Result<Game, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(GameError::InvalidPlayerCount {
                count: player_count,
            });
        }
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        Ok(Self::assemble(player_count, deck, ante))
    }

    /// Creates a match over an explicit deck, dealt exactly as given. Used
    /// by simulations and tests that need a predetermined deal.
    pub fn with_deck(player_count: usize, deck: Deck, ante: u32) -> Result<Game, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(GameError::InvalidPlayerCount {
                count: player_count,
            });
        }
        Ok(Self::assemble(player_count, deck, ante))
    }

    fn assemble(player_count: usize, deck: Deck, ante: u32) -> Game {
        let players = (0..player_count)
            .map(|i| Player::new(i, format!("Player {}", i + 1), STARTING_CHIPS))
            .collect();
        Game {
            deck,
            players,
            spreads: Vec::new(),
            current: 0,
            phase: Phase::PreGame,
            winner: None,
            win_condition: None,
            match_scores: vec![0; player_count],
            round: 1,
            pot: 0,
            highest_bet: 0,
            ante,
            bus: EventBus::new(),
        }
    }

    /// Collects antes, deals five cards per seat round-robin, flips the seed
    /// discard, and runs the initial-tonk check.
    ///
    /// Tied initial tonks void the deal: hands reset, the deck is rebuilt
    /// and reshuffled, antes are recollected, and the deal repeats. The loop
    /// is probability-bounded; each pass is surfaced as a `Redeal` event so
    /// pathological seeds are observable.
    pub fn deal(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::PreGame)?;
        let ev = GameEvent::RoundStarted {
            round: self.round,
            ante: self.ante,
            pot: self.pot,
        };
        self.bus.emit(&ev);

        let mut attempt: u32 = 0;
        loop {
            let seats = self.active_seats();
            for &i in &seats {
                let paid = self.players[i].bet(self.ante);
                self.pot += paid;
            }
            for _ in 0..HAND_SIZE {
                for &i in &seats {
                    let card = self.deck.draw().ok_or(GameError::StockExhausted)?;
                    self.players[i].add_card(card);
                }
            }
            let seed = self.deck.draw().ok_or(GameError::StockExhausted)?;
            self.deck.discard(seed);
            for &i in &seats {
                let ev = GameEvent::CardsDealt {
                    player_id: i,
                    count: HAND_SIZE,
                };
                self.bus.emit(&ev);
            }

            let hot: Vec<usize> = seats
                .iter()
                .copied()
                .filter(|&i| {
                    (INITIAL_TONK_MIN..=INITIAL_TONK_MAX).contains(&self.players[i].points())
                })
                .collect();
            match hot.len() {
                0 => {
                    self.current = seats[0];
                    self.phase = Phase::StartOfTurn;
                    let ev = GameEvent::TurnStarted {
                        player_id: self.current,
                    };
                    self.bus.emit(&ev);
                    return Ok(());
                }
                1 => {
                    let ev = GameEvent::InitialTonk {
                        player_id: hot[0],
                        points: self.players[hot[0]].points(),
                    };
                    self.bus.emit(&ev);
                    self.finish_round(hot[0], WinCondition::InitialTonk);
                    return Ok(());
                }
                _ => {
                    attempt += 1;
                    for &i in &seats {
                        self.players[i].reset_for_round();
                    }
                    self.deck.shuffle();
                    let ev = GameEvent::Redeal { attempt };
                    self.bus.emit(&ev);
                }
            }
        }
    }

    /// Moves the current player from `StartOfTurn` to `Draw`. Pre-draw lays,
    /// hits, and knocks are no longer available after this.
    pub fn proceed_to_draw(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::StartOfTurn)?;
        self.phase = Phase::Draw;
        Ok(())
    }

    /// Draws the top stock card into the current hand.
    ///
    /// Returns `Ok(None)` when the stock is exhausted: the round ends
    /// immediately as `StockEmpty` with the lowest-points seat winning
    /// (first in seat order on ties), and no discard is owed.
    pub fn draw_from_deck(&mut self) -> Result<Option<Card>, GameError> {
        self.expect_phase(Phase::Draw)?;
        match self.deck.draw() {
            Some(card) => {
                self.players[self.current].add_card(card);
                self.phase = Phase::Action;
                let ev = GameEvent::CardDrawn {
                    player_id: self.current,
                    source: DrawSource::Stock,
                    card,
                };
                self.bus.emit(&ev);
                Ok(Some(card))
            }
            None => {
                let winner = self.lowest_points_seat();
                self.finish_round(winner, WinCondition::StockEmpty);
                Ok(None)
            }
        }
    }

    /// Takes the visible top of the discard pile into the current hand.
    pub fn draw_from_discard(&mut self) -> Result<Card, GameError> {
        self.expect_phase(Phase::Draw)?;
        let card = self.deck.draw_from_discard().ok_or(GameError::EmptyDiscard)?;
        self.players[self.current].add_card(card);
        self.phase = Phase::Action;
        let ev = GameEvent::CardDrawn {
            player_id: self.current,
            source: DrawSource::Discard,
            card,
        };
        self.bus.emit(&ev);
        Ok(card)
    }

    /// Lays a validated spread from the current hand onto the table,
    /// returning its index in the shared pool. Emptying the hand ends the
    /// round as `Tonk` immediately, before any discard.
    pub fn lay_spread(&mut self, cards: &[Card]) -> Result<usize, GameError> {
        self.expect_turn_phase()?;
        for (i, card) in cards.iter().enumerate() {
            if cards[i + 1..].contains(card) {
                return Err(GameError::DuplicateCard);
            }
        }
        let spread = Spread::new(self.current, cards)?;
        for &card in cards {
            if !self.players[self.current].has_card(card) {
                return Err(GameError::CardNotHeld { card });
            }
        }
        self.players[self.current].remove_cards(cards);
        let index = self.spreads.len();
        let ev = GameEvent::SpreadLaid {
            player_id: self.current,
            spread_index: index,
            kind: spread.kind(),
            cards: spread.cards().to_vec(),
        };
        self.spreads.push(spread);
        self.bus.emit(&ev);
        if self.players[self.current].hand().is_empty() {
            self.finish_round(self.current, WinCondition::Tonk);
        }
        Ok(index)
    }

    /// Adds one hand card to an existing table spread (own or an
    /// opponent's). Emptying the hand ends the round as `Tonk`.
    pub fn hit_spread(&mut self, card: Card, spread_index: usize) -> Result<(), GameError> {
        self.expect_turn_phase()?;
        let spread = self
            .spreads
            .get(spread_index)
            .ok_or(GameError::SpreadNotFound {
                index: spread_index,
            })?;
        if !spread.can_add(card) {
            return Err(GameError::CannotHit { card });
        }
        if !self.players[self.current].remove_card(card) {
            return Err(GameError::CardNotHeld { card });
        }
        self.spreads[spread_index].add(card)?;
        let ev = GameEvent::SpreadHit {
            player_id: self.current,
            spread_index,
            card,
        };
        self.bus.emit(&ev);
        if self.players[self.current].hand().is_empty() {
            self.finish_round(self.current, WinCondition::Tonk);
        }
        Ok(())
    }

    /// Discards exactly one card, ending the turn. Discarding the last card
    /// ends the round as `Tonk`.
    pub fn discard(&mut self, card: Card) -> Result<(), GameError> {
        self.expect_phase(Phase::Action)?;
        if !self.players[self.current].remove_card(card) {
            return Err(GameError::CardNotHeld { card });
        }
        self.deck.discard(card);
        let ev = GameEvent::CardDiscarded {
            player_id: self.current,
            card,
        };
        self.bus.emit(&ev);
        if self.players[self.current].hand().is_empty() {
            self.finish_round(self.current, WinCondition::Tonk);
        } else {
            self.end_turn();
        }
        Ok(())
    }

    /// Claims lowest points before drawing. Legal at any total; being wrong
    /// is the risk. The knocker must be *strictly* below the minimum of all
    /// other seats; ties resolve against the knocker (`Caught`), with the
    /// true-minimum opponent declared winner.
    pub fn knock(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::StartOfTurn)?;
        let knocker = self.current;
        let knocker_points = self.players[knocker].points();
        let mut best: Option<(usize, u32)> = None;
        for &i in &self.active_seats() {
            if i == knocker {
                continue;
            }
            let p = self.players[i].points();
            if best.map_or(true, |(_, bp)| p < bp) {
                best = Some((i, p));
            }
        }
        let Some((low_seat, low_points)) = best else {
            // no opponents left; the claim stands unopposed
            self.finish_round(knocker, WinCondition::Knock);
            return Ok(());
        };
        if knocker_points < low_points {
            let ev = GameEvent::KnockResolved {
                knocker,
                winner: knocker,
                caught: false,
            };
            self.bus.emit(&ev);
            self.finish_round(knocker, WinCondition::Knock);
        } else {
            let ev = GameEvent::KnockResolved {
                knocker,
                winner: low_seat,
                caught: true,
            };
            self.bus.emit(&ev);
            self.finish_round(low_seat, WinCondition::Caught);
        }
        Ok(())
    }

    /// Adds chips from the current player to the pot. Clamped to the
    /// available stack; returns the amount actually staked. Betting is chip
    /// accounting only and never affects move legality.
    pub fn raise_bet(&mut self, amount: u32) -> Result<u32, GameError> {
        self.expect_phase(Phase::Action)?;
        let paid = self.players[self.current].bet(amount);
        self.pot += paid;
        self.highest_bet = self.highest_bet.max(self.players[self.current].current_bet());
        if paid > 0 {
            let ev = GameEvent::BetRaised {
                player_id: self.current,
                amount: paid,
                pot: self.pot,
            };
            self.bus.emit(&ev);
        }
        Ok(paid)
    }

    /// Re-enters dealing after `GameOver`. The sole recovery path for a
    /// finished round; fails once the match is decided.
    pub fn start_next_round(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::GameOver {
            return Err(GameError::RoundNotOver);
        }
        if self.is_match_over() {
            return Err(GameError::MatchOver);
        }
        let solvent = self
            .players
            .iter()
            .filter(|p| !p.is_eliminated() && p.chips() > 0)
            .count();
        if solvent < MIN_PLAYERS {
            return Err(GameError::MatchOver);
        }
        self.round += 1;
        self.spreads.clear();
        self.winner = None;
        self.win_condition = None;
        self.highest_bet = 0;
        for p in &mut self.players {
            p.reset_for_round();
            if p.chips() == 0 {
                p.set_eliminated(true);
            }
        }
        self.deck.shuffle();
        self.phase = Phase::PreGame;
        self.deal()
    }

    /// Verifies that `player_id` is the seat allowed to act right now.
    /// Hosts driving multiple seats call this before issuing operations.
    pub fn ensure_turn(&self, player_id: usize) -> Result<(), GameError> {
        match self.phase {
            Phase::PreGame | Phase::GameOver => Err(GameError::WrongPhase { phase: self.phase }),
            _ if player_id != self.current => Err(GameError::NotPlayersTurn {
                expected: self.current,
                actual: player_id,
            }),
            _ => Ok(()),
        }
    }

    // ---- read accessors ----

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_player(&self) -> usize {
        self.current
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn spreads(&self) -> &[Spread] {
        &self.spreads
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Current hand totals, per seat.
    pub fn scores(&self) -> Vec<u32> {
        self.players.iter().map(|p| p.points()).collect()
    }

    /// Cumulative match scores, per seat. Accumulating points is bad.
    pub fn match_scores(&self) -> &[u32] {
        &self.match_scores
    }

    pub fn top_discard(&self) -> Option<Card> {
        self.deck.top_discard()
    }

    pub fn deck_count(&self) -> usize {
        self.deck.remaining()
    }

    pub fn is_stock_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn highest_bet(&self) -> u32 {
        self.highest_bet
    }

    pub fn ante(&self) -> u32 {
        self.ante
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn win_condition(&self) -> Option<WinCondition> {
        self.win_condition
    }

    pub fn is_match_over(&self) -> bool {
        self.match_scores.iter().any(|&s| s >= MATCH_SCORE_LIMIT)
    }

    /// The lowest cumulative score once any seat crosses the limit.
    pub fn match_winner(&self) -> Option<usize> {
        if !self.is_match_over() {
            return None;
        }
        self.match_scores
            .iter()
            .enumerate()
            .min_by_key(|(_, &s)| s)
            .map(|(i, _)| i)
    }

    // ---- events ----

    pub fn subscribe(&mut self, callback: impl FnMut(&GameEvent) + 'static) -> SubscriberId {
        self.bus.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.bus.unsubscribe(id);
    }

    // ---- snapshots ----

    /// Serializes the full round state, including discard-pile order and
    /// per-spread card order (order affects run-extension legality).
    /// Subscribers are not part of the snapshot.
    pub fn snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn restore(snapshot: &str) -> serde_json::Result<Game> {
        serde_json::from_str(snapshot)
    }

    // ---- internals ----

    fn expect_phase(&self, phase: Phase) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::WrongPhase { phase: self.phase })
        }
    }

    fn expect_turn_phase(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::StartOfTurn | Phase::Action => Ok(()),
            _ => Err(GameError::WrongPhase { phase: self.phase }),
        }
    }

    fn active_seats(&self) -> Vec<usize> {
        self.players
            .iter()
            .filter(|p| !p.is_eliminated())
            .map(|p| p.id())
            .collect()
    }

    fn next_active_seat(&self, from: usize) -> usize {
        let n = self.players.len();
        let mut i = (from + 1) % n;
        while self.players[i].is_eliminated() && i != from {
            i = (i + 1) % n;
        }
        i
    }

    fn end_turn(&mut self) {
        let ev = GameEvent::TurnEnded {
            player_id: self.current,
        };
        self.bus.emit(&ev);
        self.current = self.next_active_seat(self.current);
        self.phase = Phase::StartOfTurn;
        let ev = GameEvent::TurnStarted {
            player_id: self.current,
        };
        self.bus.emit(&ev);
    }

    /// First seat, in seat order, holding the minimum hand total.
    fn lowest_points_seat(&self) -> usize {
        let mut best = self.current;
        let mut best_points = u32::MAX;
        for &i in &self.active_seats() {
            let p = self.players[i].points();
            if p < best_points {
                best = i;
                best_points = p;
            }
        }
        best
    }

    fn finish_round(&mut self, winner: usize, condition: WinCondition) {
        for i in 0..self.players.len() {
            if i != winner {
                self.match_scores[i] += self.players[i].points();
            }
        }
        let pot = std::mem::take(&mut self.pot);
        self.players[winner].add_chips(pot);
        self.highest_bet = 0;
        self.winner = Some(winner);
        self.win_condition = Some(condition);
        self.phase = Phase::GameOver;
        let ev = GameEvent::RoundOver {
            winner,
            condition,
            pot,
        };
        self.bus.emit(&ev);
        if self.is_match_over() {
            if let Some(w) = self.match_winner() {
                let ev = GameEvent::MatchOver {
                    winner: w,
                    scores: self.match_scores.clone(),
                };
                self.bus.emit(&ev);
            }
        }
    }
}
