//! Card, hand, and spread formatters for terminal display.
//!
//! Pure functions for rendering game elements. Unicode suit symbols are used
//! where the terminal supports them, with a single-letter ASCII fallback.
//!
//! ## Example
//!
//! ```rust
//! use tonk_engine::cards::{Card, Rank, Suit};
//! use tonk_cli::formatters::{format_card, format_hand};
//!
//! let ace_spades = Card { rank: Rank::Ace, suit: Suit::Spades };
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//!
//! let hand = vec![ace_spades];
//! assert!(format_hand(&hand).starts_with("[A"));
//! ```

use tonk_engine::cards::{Card, Rank, Suit};
use tonk_engine::spread::{Spread, SpreadType};

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM), or VS Code (VSCODE_INJECTION). On Unix-like systems,
/// assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// Format a Suit using Unicode symbols (♥ ♦ ♣ ♠) or ASCII fallback (h d c s).
pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Format a Rank as A, 2-10, J, Q, K.
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Ace => "A",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
    }
    .to_string()
}

/// Format a Card as rank followed by suit, e.g. "A♠" or "10♥".
pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Format a list of cards in bracket notation, e.g. "[A♠ K♥ Q♦]".
pub fn format_hand(cards: &[Card]) -> String {
    if cards.is_empty() {
        "[]".to_string()
    } else {
        let formatted: Vec<String> = cards.iter().map(format_card).collect();
        format!("[{}]", formatted.join(" "))
    }
}

/// Format a table spread with its kind and owner, e.g.
/// "run [5♠ 6♠ 7♠] (seat 1)".
pub fn format_spread(spread: &Spread) -> String {
    let kind = match spread.kind() {
        SpreadType::Book => "book",
        SpreadType::Run => "run",
    };
    format!(
        "{} {} (seat {})",
        kind,
        format_hand(spread.cards()),
        spread.owner()
    )
}
