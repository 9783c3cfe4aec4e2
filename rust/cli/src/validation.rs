//! Input parsing and validation for interactive commands.
//!
//! Parses the textual turn protocol used by `tonk play`:
//! cards are written rank-then-suit ("7h", "10s", "kd"; "t" is accepted for
//! ten), and turn commands map onto [`TurnAction`].

use tonk_engine::cards::{Card, Rank, Suit};
use tonk_engine::player::TurnAction;

/// Result type for parsing user input into turn actions.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid turn action parsed from input
    Command(TurnAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a card token like "7h", "kd", "10s", or "ts" (case-insensitive).
///
/// The last character is the suit letter; everything before it is the rank
/// ("a", "2".."10", "t", "j", "q", "k").
pub fn parse_card(token: &str) -> Result<Card, String> {
    let token = token.trim().to_lowercase();
    if token.len() < 2 {
        return Err(format!("Invalid card '{}': expected rank then suit (e.g. 7h, 10s, kd)", token));
    }
    let (rank_part, suit_part) = token.split_at(token.len() - 1);
    let suit = match suit_part {
        "c" => Suit::Clubs,
        "d" => Suit::Diamonds,
        "h" => Suit::Hearts,
        "s" => Suit::Spades,
        other => return Err(format!("Invalid suit '{}': expected c, d, h, or s", other)),
    };
    let rank = match rank_part {
        "a" => Rank::Ace,
        "2" => Rank::Two,
        "3" => Rank::Three,
        "4" => Rank::Four,
        "5" => Rank::Five,
        "6" => Rank::Six,
        "7" => Rank::Seven,
        "8" => Rank::Eight,
        "9" => Rank::Nine,
        "10" | "t" => Rank::Ten,
        "j" => Rank::Jack,
        "q" => Rank::Queen,
        "k" => Rank::King,
        other => return Err(format!("Invalid rank '{}'", other)),
    };
    Ok(Card::new(suit, rank))
}

/// Parse user input into a turn action or special commands.
///
/// Accepted forms (case-insensitive):
/// - "draw" or "d" → draw from the stock
/// - "take" or "t" → draw from the discard pile
/// - "lay C1 C2 C3 ..." → lay a spread from hand
/// - "hit C N" → add card C to table spread number N
/// - "discard C" or "x C" → discard C, ending the turn
/// - "knock" or "k" → knock (start of turn only)
/// - "raise N" → add N chips to the pot
/// - "q" or "quit" → quit
///
/// # Example
///
/// ```rust
/// use tonk_cli::validation::{parse_turn_command, ParseResult};
/// use tonk_engine::player::TurnAction;
///
/// assert_eq!(parse_turn_command("draw"), ParseResult::Command(TurnAction::DrawStock));
/// assert_eq!(parse_turn_command("q"), ParseResult::Quit);
/// match parse_turn_command("flip") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_turn_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    if parts[0] == "q" || parts[0] == "quit" {
        return ParseResult::Quit;
    }

    match parts[0] {
        "draw" | "d" => ParseResult::Command(TurnAction::DrawStock),
        "take" | "t" => ParseResult::Command(TurnAction::DrawDiscard),
        "knock" | "k" => ParseResult::Command(TurnAction::Knock),
        "lay" => {
            if parts.len() < 4 {
                return ParseResult::Invalid(
                    "Lay requires at least 3 cards (e.g. 'lay 7h 7d 7s')".to_string(),
                );
            }
            let mut cards = Vec::new();
            for token in &parts[1..] {
                match parse_card(token) {
                    Ok(card) => cards.push(card),
                    Err(msg) => return ParseResult::Invalid(msg),
                }
            }
            ParseResult::Command(TurnAction::Lay { cards })
        }
        "hit" => {
            if parts.len() < 3 {
                return ParseResult::Invalid(
                    "Hit requires a card and a spread number (e.g. 'hit 8s 1')".to_string(),
                );
            }
            let card = match parse_card(parts[1]) {
                Ok(card) => card,
                Err(msg) => return ParseResult::Invalid(msg),
            };
            match parts[2].parse::<usize>() {
                Ok(spread) => ParseResult::Command(TurnAction::Hit { card, spread }),
                Err(_) => ParseResult::Invalid("Invalid spread number".to_string()),
            }
        }
        "discard" | "x" => {
            if parts.len() < 2 {
                return ParseResult::Invalid(
                    "Discard requires a card (e.g. 'discard kd')".to_string(),
                );
            }
            match parse_card(parts[1]) {
                Ok(card) => ParseResult::Command(TurnAction::Discard { card }),
                Err(msg) => ParseResult::Invalid(msg),
            }
        }
        "raise" => {
            if parts.len() < 2 {
                return ParseResult::Invalid(
                    "Raise requires an amount (e.g. 'raise 10')".to_string(),
                );
            }
            match parts[1].parse::<u32>() {
                Ok(amount) if amount > 0 => ParseResult::Command(TurnAction::Raise { amount }),
                Ok(_) => ParseResult::Invalid("Raise amount must be positive".to_string()),
                Err(_) => ParseResult::Invalid("Invalid raise amount".to_string()),
            }
        }
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: draw, take, lay <cards>, hit <card> <spread>, discard <card>, knock, raise <amount>, q",
            parts[0]
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_cards() {
        assert_eq!(parse_card("7h"), Ok(Card::new(Suit::Hearts, Rank::Seven)));
        assert_eq!(parse_card("KD"), Ok(Card::new(Suit::Diamonds, Rank::King)));
        assert_eq!(parse_card("as"), Ok(Card::new(Suit::Spades, Rank::Ace)));
    }

    #[test]
    fn parses_tens_both_ways() {
        assert_eq!(parse_card("10s"), Ok(Card::new(Suit::Spades, Rank::Ten)));
        assert_eq!(parse_card("tc"), Ok(Card::new(Suit::Clubs, Rank::Ten)));
    }

    #[test]
    fn rejects_malformed_cards() {
        assert!(parse_card("").is_err());
        assert!(parse_card("7").is_err());
        assert!(parse_card("7x").is_err());
        assert!(parse_card("11h").is_err());
    }

    #[test]
    fn parses_draw_and_take() {
        assert_eq!(
            parse_turn_command("draw"),
            ParseResult::Command(TurnAction::DrawStock)
        );
        assert_eq!(
            parse_turn_command("t"),
            ParseResult::Command(TurnAction::DrawDiscard)
        );
    }

    #[test]
    fn parses_lay_with_cards() {
        let result = parse_turn_command("lay 7h 7d 7s");
        match result {
            ParseResult::Command(TurnAction::Lay { cards }) => {
                assert_eq!(cards.len(), 3);
                assert_eq!(cards[0], Card::new(Suit::Hearts, Rank::Seven));
            }
            other => panic!("Expected Lay, got {:?}", other),
        }
    }

    #[test]
    fn lay_requires_three_cards() {
        assert!(matches!(
            parse_turn_command("lay 7h 7d"),
            ParseResult::Invalid(_)
        ));
    }

    #[test]
    fn parses_hit() {
        assert_eq!(
            parse_turn_command("hit 8s 1"),
            ParseResult::Command(TurnAction::Hit {
                card: Card::new(Suit::Spades, Rank::Eight),
                spread: 1
            })
        );
    }

    #[test]
    fn parses_discard() {
        assert_eq!(
            parse_turn_command("discard kd"),
            ParseResult::Command(TurnAction::Discard {
                card: Card::new(Suit::Diamonds, Rank::King)
            })
        );
        assert_eq!(
            parse_turn_command("x 2c"),
            ParseResult::Command(TurnAction::Discard {
                card: Card::new(Suit::Clubs, Rank::Two)
            })
        );
    }

    #[test]
    fn parses_knock_and_raise() {
        assert_eq!(
            parse_turn_command("knock"),
            ParseResult::Command(TurnAction::Knock)
        );
        assert_eq!(
            parse_turn_command("raise 10"),
            ParseResult::Command(TurnAction::Raise { amount: 10 })
        );
        assert!(matches!(
            parse_turn_command("raise 0"),
            ParseResult::Invalid(_)
        ));
    }

    #[test]
    fn parses_quit() {
        assert_eq!(parse_turn_command("q"), ParseResult::Quit);
        assert_eq!(parse_turn_command("quit"), ParseResult::Quit);
    }

    #[test]
    fn rejects_unknown_commands() {
        match parse_turn_command("shuffle") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }
}
