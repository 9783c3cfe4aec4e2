//! Rule-based decision policy for Tonk.
//!
//! Implements the draw, lay, hit, discard, and knock heuristics over the
//! seat's own hand and public table state. All decisions are deterministic;
//! greedy point-maximization is a deliberate simplification, not a global
//! optimum. Ties between equal-point candidates prefer runs over books,
//! then the lowest starting rank.

use tonk_engine::cards::Card;
use tonk_engine::events::DrawSource;
use tonk_engine::spread::{find_possible_spreads, Spread, SpreadCandidate, SpreadType};

use crate::{DecisionPolicy, HitPlay};

/// Policy strength tag.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Difficulty {
    /// Stock-only draws, value-only discards, knocks only at rock bottom.
    Easy,
    /// Full heuristics.
    Standard,
}

/// The rule-based opponent.
#[derive(Debug, Clone)]
pub struct HeuristicPolicy {
    difficulty: Difficulty,
}

impl HeuristicPolicy {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Whether `candidate` completes or nearly completes a group with cards
    /// already held: two hand cards share its rank, or two same-suit hand
    /// cards fit with it inside a two-rank span. The span test is symmetric,
    /// so holding {3,5} and seeing a 4 registers on both sides.
    fn near_completes_group(hand: &[Card], candidate: Card) -> bool {
        let rank_mates = hand.iter().filter(|c| c.rank == candidate.rank).count();
        if rank_mates >= 2 {
            return true;
        }
        let suited: Vec<u8> = hand
            .iter()
            .filter(|c| c.suit == candidate.suit)
            .map(|c| c.index())
            .collect();
        for i in 0..suited.len() {
            for j in i + 1..suited.len() {
                let lo = suited[i].min(suited[j]).min(candidate.index());
                let hi = suited[i].max(suited[j]).max(candidate.index());
                if hi - lo <= 2 {
                    return true;
                }
            }
        }
        false
    }

    fn best_candidate(hand: &[Card]) -> Option<SpreadCandidate> {
        find_possible_spreads(hand).into_iter().max_by(|a, b| {
            a.points()
                .cmp(&b.points())
                .then_with(|| kind_preference(a.kind).cmp(&kind_preference(b.kind)))
                .then_with(|| starting_rank(b).cmp(&starting_rank(a)))
        })
    }

    /// A card is protected when it belongs to some two-card precursor of a
    /// book (a rank mate in hand) or a run (a same-suit card within two
    /// rank steps).
    fn is_protected(hand: &[Card], card: Card) -> bool {
        let rank_mates = hand.iter().filter(|c| c.rank == card.rank).count();
        if rank_mates >= 2 {
            return true;
        }
        hand.iter().any(|c| {
            *c != card && c.suit == card.suit && c.index().abs_diff(card.index()) <= 2
        })
    }
}

fn kind_preference(kind: SpreadType) -> u8 {
    match kind {
        SpreadType::Book => 0,
        SpreadType::Run => 1,
    }
}

fn starting_rank(candidate: &SpreadCandidate) -> u8 {
    candidate.cards.iter().map(|c| c.index()).min().unwrap_or(0)
}

impl DecisionPolicy for HeuristicPolicy {
    fn decide_draw(&self, hand: &[Card], discard_top: Option<Card>) -> DrawSource {
        if self.difficulty == Difficulty::Easy {
            return DrawSource::Stock;
        }
        let Some(top) = discard_top else {
            return DrawSource::Stock;
        };
        let current = find_possible_spreads(hand).len();
        let mut with_top = hand.to_vec();
        with_top.push(top);
        if find_possible_spreads(&with_top).len() > current {
            return DrawSource::Discard;
        }
        if Self::near_completes_group(hand, top) {
            return DrawSource::Discard;
        }
        if top.value() <= 3 && hand.iter().any(|c| c.rank == top.rank) {
            return DrawSource::Discard;
        }
        DrawSource::Stock
    }

    fn find_best_spread(&self, hand: &[Card]) -> Option<SpreadCandidate> {
        Self::best_candidate(hand)
    }

    fn find_all_spreads_to_lay(&self, hand: &[Card]) -> Vec<SpreadCandidate> {
        let mut remaining = hand.to_vec();
        let mut plan = Vec::new();
        while let Some(candidate) = Self::best_candidate(&remaining) {
            for card in &candidate.cards {
                if let Some(i) = remaining.iter().position(|c| c == card) {
                    remaining.remove(i);
                }
            }
            plan.push(candidate);
        }
        plan
    }

    fn find_hit_opportunities(&self, hand: &[Card], spreads: &[Spread]) -> Vec<HitPlay> {
        let mut hits = Vec::new();
        for &card in hand {
            for (spread_index, spread) in spreads.iter().enumerate() {
                if spread.can_add(card) {
                    hits.push(HitPlay { card, spread_index });
                }
            }
        }
        hits.sort_by(|a, b| b.card.value().cmp(&a.card.value()));
        hits
    }

    fn decide_discard(&self, hand: &[Card]) -> Option<Card> {
        if hand.is_empty() {
            return None;
        }
        if self.difficulty == Difficulty::Easy {
            return hand.iter().copied().max_by_key(|c| c.value());
        }
        let unprotected = hand
            .iter()
            .copied()
            .filter(|&c| !Self::is_protected(hand, c))
            .max_by_key(|c| c.value());
        match unprotected {
            Some(card) => Some(card),
            // everything contributes somewhere; shed the most expensive card
            None => hand.iter().copied().max_by_key(|c| c.value()),
        }
    }

    fn should_knock(&self, hand: &[Card]) -> bool {
        let points: u32 = hand.iter().map(|c| c.value()).sum();
        if points <= 3 {
            return true;
        }
        if self.difficulty == Difficulty::Easy {
            return false;
        }
        if (4..=5).contains(&points) {
            return find_possible_spreads(hand).is_empty() || hand.len() <= 2;
        }
        false
    }

    fn name(&self) -> &str {
        match self.difficulty {
            Difficulty::Easy => "EasyAI",
            Difficulty::Standard => "HeuristicAI",
        }
    }
}
