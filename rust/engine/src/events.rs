use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::Card;
use crate::game::WinCondition;
use crate::spread::SpreadType;

/// Where a drawn card came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawSource {
    Stock,
    Discard,
}

/// One notification emitted by the game, carrying the affected
/// player/card/spread. Subscribers (UI, logger, test harness) receive these
/// synchronously, in registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStarted {
        round: u32,
        ante: u32,
        pot: u32,
    },
    CardsDealt {
        player_id: usize,
        count: usize,
    },
    InitialTonk {
        player_id: usize,
        points: u32,
    },
    Redeal {
        attempt: u32,
    },
    TurnStarted {
        player_id: usize,
    },
    CardDrawn {
        player_id: usize,
        source: DrawSource,
        card: Card,
    },
    SpreadLaid {
        player_id: usize,
        spread_index: usize,
        kind: SpreadType,
        cards: Vec<Card>,
    },
    SpreadHit {
        player_id: usize,
        spread_index: usize,
        card: Card,
    },
    CardDiscarded {
        player_id: usize,
        card: Card,
    },
    KnockResolved {
        knocker: usize,
        winner: usize,
        caught: bool,
    },
    BetRaised {
        player_id: usize,
        amount: u32,
        pot: u32,
    },
    TurnEnded {
        player_id: usize,
    },
    RoundOver {
        winner: usize,
        condition: WinCondition,
        pot: u32,
    },
    MatchOver {
        winner: usize,
        scores: Vec<u32>,
    },
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
pub type SubscriberId = usize;

type Callback = Box<dyn FnMut(&GameEvent)>;

/// Synchronous observer registry.
///
/// Delivery happens inline on the emitting thread, in registration order;
/// the core is single-threaded so there is no queueing or backpressure.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriberId, Callback)>,
    next_id: SubscriberId,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&GameEvent) + 'static) -> SubscriberId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn emit(&mut self, event: &GameEvent) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
