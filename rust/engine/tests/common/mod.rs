//! Shared helpers for rigging deterministic deals.

use tonk_engine::cards::{Card, Rank, Suit};
use tonk_engine::deck::Deck;
use tonk_engine::game::{Game, HAND_SIZE};

pub fn c(rank: u8, suit: Suit) -> Card {
    Card::new(suit, Rank::from_u8(rank))
}

/// Build a game whose deal is fully predetermined.
///
/// `hands[i]` becomes seat i's five-card hand, `seed_discard` the flipped
/// card, and `stock` the remaining draw pile in draw order (`stock[0]` is
/// drawn first). The deal is round-robin one card at a time, so the dealt
/// sequence interleaves the hands column by column.
#[allow(dead_code)]
pub fn rigged_game(hands: &[Vec<Card>], seed_discard: Card, stock: &[Card], ante: u32) -> Game {
    let players = hands.len();
    let mut draw_order: Vec<Card> = Vec::new();
    for k in 0..HAND_SIZE {
        for hand in hands {
            assert_eq!(hand.len(), HAND_SIZE, "each rigged hand must have 5 cards");
            draw_order.push(hand[k]);
        }
    }
    draw_order.push(seed_discard);
    draw_order.extend_from_slice(stock);

    // the draw pile pops from the end, so reverse into stacking order
    draw_order.reverse();
    let deck = Deck::from_piles(draw_order, Vec::new(), 0);
    let mut game = Game::with_deck(players, deck, ante).expect("valid player count");
    game.deal().expect("rigged deal");
    game
}
