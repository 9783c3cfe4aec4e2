mod common;

use common::{c, rigged_game};
use tonk_engine::cards::Suit;
use tonk_engine::errors::GameError;
use tonk_engine::game::{Phase, WinCondition};
use tonk_engine::player::STARTING_CHIPS;

#[test]
fn full_turn_rotates_to_the_next_seat() {
    let hands = vec![
        vec![
            c(2, Suit::Clubs),
            c(4, Suit::Clubs),
            c(6, Suit::Clubs),
            c(8, Suit::Clubs),
            c(10, Suit::Clubs),
        ],
        vec![
            c(2, Suit::Hearts),
            c(4, Suit::Hearts),
            c(6, Suit::Hearts),
            c(8, Suit::Hearts),
            c(10, Suit::Hearts),
        ],
    ];
    let stock = [c(13, Suit::Spades), c(13, Suit::Hearts)];
    let mut game = rigged_game(&hands, c(9, Suit::Spades), &stock, 5);

    assert_eq!(game.current_player(), 0);
    game.proceed_to_draw().expect("to draw");
    let drawn = game
        .draw_from_deck()
        .expect("draw")
        .expect("stock not empty");
    assert_eq!(drawn, c(13, Suit::Spades));
    assert_eq!(game.phase(), Phase::Action);

    game.discard(drawn).expect("discard");
    assert_eq!(game.current_player(), 1);
    assert_eq!(game.phase(), Phase::StartOfTurn);
    assert_eq!(game.top_discard(), Some(drawn));
}

#[test]
fn knock_with_strictly_lowest_points_wins() {
    let hands = vec![
        // 1+1+1+1+2 = 6
        vec![
            c(1, Suit::Clubs),
            c(1, Suit::Diamonds),
            c(1, Suit::Hearts),
            c(1, Suit::Spades),
            c(2, Suit::Spades),
        ],
        // 10+10+10+10+2 = 42
        vec![
            c(13, Suit::Clubs),
            c(13, Suit::Diamonds),
            c(13, Suit::Hearts),
            c(12, Suit::Clubs),
            c(2, Suit::Diamonds),
        ],
    ];
    let mut game = rigged_game(&hands, c(7, Suit::Diamonds), &[], 5);

    game.knock().expect("knock");
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(0));
    assert_eq!(game.win_condition(), Some(WinCondition::Knock));
    assert_eq!(game.players()[0].chips(), STARTING_CHIPS - 5 + 10);
    assert_eq!(game.match_scores(), &[0, 42]);
}

#[test]
fn knock_without_lowest_points_is_caught() {
    let hands = vec![
        // 2+2+2+3+3 = 12
        vec![
            c(2, Suit::Clubs),
            c(2, Suit::Diamonds),
            c(2, Suit::Hearts),
            c(3, Suit::Clubs),
            c(3, Suit::Diamonds),
        ],
        // 1+1+1+1+2 = 6
        vec![
            c(1, Suit::Clubs),
            c(1, Suit::Diamonds),
            c(1, Suit::Hearts),
            c(1, Suit::Spades),
            c(2, Suit::Spades),
        ],
    ];
    let mut game = rigged_game(&hands, c(7, Suit::Diamonds), &[], 5);

    game.knock().expect("knock");
    assert_eq!(game.winner(), Some(1));
    assert_eq!(game.win_condition(), Some(WinCondition::Caught));
    // the caught knocker accumulates their own hand
    assert_eq!(game.match_scores(), &[12, 0]);
}

#[test]
fn knock_tie_resolves_against_the_knocker() {
    let hands = vec![
        vec![
            c(1, Suit::Clubs),
            c(2, Suit::Clubs),
            c(3, Suit::Clubs),
            c(4, Suit::Clubs),
            c(5, Suit::Clubs),
        ],
        vec![
            c(1, Suit::Hearts),
            c(2, Suit::Hearts),
            c(3, Suit::Hearts),
            c(4, Suit::Hearts),
            c(5, Suit::Hearts),
        ],
    ];
    let mut game = rigged_game(&hands, c(7, Suit::Diamonds), &[], 5);

    game.knock().expect("knock at 15 vs 15");
    assert_eq!(game.winner(), Some(1));
    assert_eq!(game.win_condition(), Some(WinCondition::Caught));
}

#[test]
fn empty_stock_ends_the_round_for_the_lowest_hand() {
    let hands = vec![
        // 42 points
        vec![
            c(13, Suit::Clubs),
            c(13, Suit::Diamonds),
            c(13, Suit::Hearts),
            c(12, Suit::Clubs),
            c(2, Suit::Diamonds),
        ],
        // 6 points
        vec![
            c(1, Suit::Clubs),
            c(1, Suit::Diamonds),
            c(1, Suit::Hearts),
            c(1, Suit::Spades),
            c(2, Suit::Spades),
        ],
    ];
    // exactly one stock card: seat 0 consumes it, seat 1 hits the bottom
    let stock = [c(9, Suit::Spades)];
    let mut game = rigged_game(&hands, c(7, Suit::Diamonds), &stock, 5);

    game.proceed_to_draw().expect("to draw");
    let drawn = game.draw_from_deck().expect("draw").expect("one card left");
    game.discard(drawn).expect("discard");

    assert_eq!(game.current_player(), 1);
    game.proceed_to_draw().expect("to draw");
    let result = game.draw_from_deck().expect("empty stock is not an error");
    assert_eq!(result, None);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(1));
    assert_eq!(game.win_condition(), Some(WinCondition::StockEmpty));
    assert_eq!(game.match_scores(), &[42, 0]);
}

#[test]
fn laying_out_the_whole_hand_is_a_tonk() {
    let hands = vec![
        // 7-7-7 book plus two eights; the drawn 8d completes a second book
        vec![
            c(7, Suit::Clubs),
            c(7, Suit::Diamonds),
            c(7, Suit::Hearts),
            c(8, Suit::Spades),
            c(8, Suit::Hearts),
        ],
        vec![
            c(1, Suit::Clubs),
            c(2, Suit::Clubs),
            c(9, Suit::Spades),
            c(10, Suit::Spades),
            c(11, Suit::Diamonds),
        ],
    ];
    let stock = [c(8, Suit::Diamonds)];
    let mut game = rigged_game(&hands, c(4, Suit::Diamonds), &stock, 5);

    game.proceed_to_draw().expect("to draw");
    game.draw_from_deck().expect("draw").expect("stock");

    game.lay_spread(&[c(7, Suit::Clubs), c(7, Suit::Diamonds), c(7, Suit::Hearts)])
        .expect("book of sevens");
    assert_eq!(game.phase(), Phase::Action, "hand not yet empty");

    game.lay_spread(&[c(8, Suit::Spades), c(8, Suit::Hearts), c(8, Suit::Diamonds)])
        .expect("book of eights");
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(0));
    assert_eq!(game.win_condition(), Some(WinCondition::Tonk));
    assert_eq!(game.spreads().len(), 2);
}

#[test]
fn discarding_the_last_card_is_a_tonk() {
    let hands = vec![
        vec![
            c(3, Suit::Hearts),
            c(4, Suit::Hearts),
            c(5, Suit::Hearts),
            c(6, Suit::Hearts),
            c(7, Suit::Hearts),
        ],
        vec![
            c(13, Suit::Clubs),
            c(12, Suit::Diamonds),
            c(11, Suit::Spades),
            c(9, Suit::Clubs),
            c(2, Suit::Spades),
        ],
    ];
    let stock = [c(2, Suit::Clubs)];
    let mut game = rigged_game(&hands, c(10, Suit::Diamonds), &stock, 5);

    game.proceed_to_draw().expect("to draw");
    game.draw_from_deck().expect("draw").expect("stock");

    let idx = game
        .lay_spread(&[
            c(3, Suit::Hearts),
            c(4, Suit::Hearts),
            c(5, Suit::Hearts),
            c(6, Suit::Hearts),
        ])
        .expect("four-card run");
    game.hit_spread(c(7, Suit::Hearts), idx).expect("extend own run");
    assert_eq!(game.phase(), Phase::Action, "one card left");

    game.discard(c(2, Suit::Clubs)).expect("final discard");
    assert_eq!(game.winner(), Some(0));
    assert_eq!(game.win_condition(), Some(WinCondition::Tonk));
}

#[test]
fn hitting_an_opponents_spread_is_allowed() {
    let hands = vec![
        // 7+7+7+10+10 = 41
        vec![
            c(7, Suit::Clubs),
            c(7, Suit::Diamonds),
            c(7, Suit::Hearts),
            c(13, Suit::Clubs),
            c(12, Suit::Diamonds),
        ],
        // 7+1+2+3+9 = 22
        vec![
            c(7, Suit::Spades),
            c(1, Suit::Clubs),
            c(2, Suit::Diamonds),
            c(3, Suit::Diamonds),
            c(9, Suit::Hearts),
        ],
    ];
    let stock = [c(2, Suit::Spades), c(5, Suit::Diamonds)];
    let mut game = rigged_game(&hands, c(4, Suit::Diamonds), &stock, 5);

    game.proceed_to_draw().expect("to draw");
    game.draw_from_deck().expect("draw").expect("stock");
    let idx = game
        .lay_spread(&[c(7, Suit::Clubs), c(7, Suit::Diamonds), c(7, Suit::Hearts)])
        .expect("book of sevens");
    game.discard(c(2, Suit::Spades)).expect("discard");

    assert_eq!(game.current_player(), 1);
    game.proceed_to_draw().expect("to draw");
    game.draw_from_deck().expect("draw").expect("stock");
    game.hit_spread(c(7, Suit::Spades), idx)
        .expect("hit the opponent's book");
    assert_eq!(game.spreads()[idx].cards().len(), 4);
    assert_eq!(game.players()[1].hand().len(), 5);
}

#[test]
fn draw_from_discard_takes_the_visible_card() {
    let hands = vec![
        vec![
            c(2, Suit::Clubs),
            c(4, Suit::Clubs),
            c(6, Suit::Clubs),
            c(8, Suit::Clubs),
            c(10, Suit::Clubs),
        ],
        vec![
            c(2, Suit::Hearts),
            c(4, Suit::Hearts),
            c(6, Suit::Hearts),
            c(8, Suit::Hearts),
            c(10, Suit::Hearts),
        ],
    ];
    let seed = c(9, Suit::Spades);
    let mut game = rigged_game(&hands, seed, &[c(13, Suit::Spades)], 5);

    game.proceed_to_draw().expect("to draw");
    let taken = game.draw_from_discard().expect("seed discard visible");
    assert_eq!(taken, seed);
    assert!(game.players()[0].has_card(seed));
    assert_eq!(game.top_discard(), None);
}

#[test]
fn phase_violations_are_rejected() {
    let hands = vec![
        vec![
            c(2, Suit::Clubs),
            c(4, Suit::Clubs),
            c(6, Suit::Clubs),
            c(8, Suit::Clubs),
            c(10, Suit::Clubs),
        ],
        vec![
            c(2, Suit::Hearts),
            c(4, Suit::Hearts),
            c(6, Suit::Hearts),
            c(8, Suit::Hearts),
            c(10, Suit::Hearts),
        ],
    ];
    let stock = [c(13, Suit::Spades)];
    let mut game = rigged_game(&hands, c(9, Suit::Spades), &stock, 5);

    // no discard before drawing
    assert!(matches!(
        game.discard(c(2, Suit::Clubs)),
        Err(GameError::WrongPhase { .. })
    ));
    // no drawing before proceed_to_draw
    assert!(matches!(
        game.draw_from_deck(),
        Err(GameError::WrongPhase { .. })
    ));

    game.proceed_to_draw().expect("to draw");
    game.draw_from_deck().expect("draw").expect("stock");
    // knocking is a pre-draw claim only
    assert!(matches!(game.knock(), Err(GameError::WrongPhase { .. })));
}

#[test]
fn ensure_turn_guards_the_acting_seat() {
    let hands = vec![
        vec![
            c(2, Suit::Clubs),
            c(4, Suit::Clubs),
            c(6, Suit::Clubs),
            c(8, Suit::Clubs),
            c(10, Suit::Clubs),
        ],
        vec![
            c(2, Suit::Hearts),
            c(4, Suit::Hearts),
            c(6, Suit::Hearts),
            c(8, Suit::Hearts),
            c(10, Suit::Hearts),
        ],
    ];
    let game = rigged_game(&hands, c(9, Suit::Spades), &[], 5);

    assert!(game.ensure_turn(0).is_ok());
    assert_eq!(
        game.ensure_turn(1).unwrap_err(),
        GameError::NotPlayersTurn {
            expected: 0,
            actual: 1
        }
    );
}

#[test]
fn spreads_may_be_laid_before_drawing() {
    let hands = vec![
        vec![
            c(7, Suit::Clubs),
            c(7, Suit::Diamonds),
            c(7, Suit::Hearts),
            c(13, Suit::Clubs),
            c(12, Suit::Diamonds),
        ],
        vec![
            c(2, Suit::Hearts),
            c(4, Suit::Hearts),
            c(6, Suit::Hearts),
            c(8, Suit::Hearts),
            c(10, Suit::Hearts),
        ],
    ];
    let stock = [c(2, Suit::Spades)];
    let mut game = rigged_game(&hands, c(9, Suit::Spades), &stock, 5);

    assert_eq!(game.phase(), Phase::StartOfTurn);
    game.lay_spread(&[c(7, Suit::Clubs), c(7, Suit::Diamonds), c(7, Suit::Hearts)])
        .expect("pre-draw lay");
    assert_eq!(game.phase(), Phase::StartOfTurn, "laying does not draw");
    assert_eq!(game.players()[0].hand().len(), 2);
}

#[test]
fn duplicate_cards_in_a_lay_request_are_rejected() {
    let hands = vec![
        vec![
            c(7, Suit::Clubs),
            c(7, Suit::Diamonds),
            c(7, Suit::Hearts),
            c(13, Suit::Clubs),
            c(12, Suit::Diamonds),
        ],
        vec![
            c(2, Suit::Hearts),
            c(4, Suit::Hearts),
            c(6, Suit::Hearts),
            c(8, Suit::Hearts),
            c(10, Suit::Hearts),
        ],
    ];
    let mut game = rigged_game(&hands, c(9, Suit::Spades), &[], 5);

    let err = game
        .lay_spread(&[c(7, Suit::Clubs), c(7, Suit::Clubs), c(7, Suit::Clubs)])
        .unwrap_err();
    assert_eq!(err, GameError::DuplicateCard);
}

#[test]
fn hitting_reports_missing_spreads_and_illegal_cards() {
    let hands = vec![
        vec![
            c(7, Suit::Clubs),
            c(7, Suit::Diamonds),
            c(7, Suit::Hearts),
            c(13, Suit::Clubs),
            c(12, Suit::Diamonds),
        ],
        vec![
            c(2, Suit::Hearts),
            c(4, Suit::Hearts),
            c(6, Suit::Hearts),
            c(8, Suit::Hearts),
            c(10, Suit::Hearts),
        ],
    ];
    let mut game = rigged_game(&hands, c(9, Suit::Spades), &[], 5);

    assert_eq!(
        game.hit_spread(c(13, Suit::Clubs), 0).unwrap_err(),
        GameError::SpreadNotFound { index: 0 }
    );

    let idx = game
        .lay_spread(&[c(7, Suit::Clubs), c(7, Suit::Diamonds), c(7, Suit::Hearts)])
        .expect("book of sevens");
    assert_eq!(
        game.hit_spread(c(13, Suit::Clubs), idx).unwrap_err(),
        GameError::CannotHit {
            card: c(13, Suit::Clubs)
        }
    );
}

#[test]
fn laying_cards_not_in_hand_fails() {
    let hands = vec![
        vec![
            c(7, Suit::Clubs),
            c(7, Suit::Diamonds),
            c(2, Suit::Clubs),
            c(4, Suit::Clubs),
            c(10, Suit::Clubs),
        ],
        vec![
            c(2, Suit::Hearts),
            c(4, Suit::Hearts),
            c(6, Suit::Hearts),
            c(8, Suit::Hearts),
            c(10, Suit::Hearts),
        ],
    ];
    let mut game = rigged_game(&hands, c(9, Suit::Spades), &[], 5);

    // 7h would complete the book but seat 0 does not hold it
    let err = game
        .lay_spread(&[c(7, Suit::Clubs), c(7, Suit::Diamonds), c(7, Suit::Hearts)])
        .unwrap_err();
    assert_eq!(
        err,
        GameError::CardNotHeld {
            card: c(7, Suit::Hearts)
        }
    );
    assert_eq!(game.players()[0].hand().len(), 5, "hand untouched");
}
