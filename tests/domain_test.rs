//! Интеграционные тесты для доменной модели (crate::domain).

use std::time::Instant;

use poker_table::domain::*;
use poker_table::engine::actions::Move;

/// Chips: арифметика без ухода в минус и деление банка.
#[test]
fn chips_arithmetic_and_split() {
    assert_eq!(Chips(10) + Chips(5), Chips(15));
    assert_eq!(Chips(3) - Chips(5), Chips::ZERO);
    assert_eq!(Chips(7).times(2), Chips(14));
    assert_eq!(Chips(25).split_even(2), (Chips(12), Chips(1)));
    assert_eq!(Chips(30).split_even(3), (Chips(10), Chips::ZERO));
    assert_eq!(Chips(9).split_even(0), (Chips::ZERO, Chips(9)));
    assert_eq!(vec![Chips(1), Chips(2), Chips(3)].into_iter().sum::<Chips>(), Chips(6));
}

/// Колода: 52 разные карты, курсор не выдаёт карту дважды.
#[test]
fn deck_deals_each_card_once() {
    let mut deck = Deck::standard_52();
    assert_eq!(deck.len(), 52);

    let mut seen = std::collections::HashSet::new();
    while let Some(card) = deck.deal() {
        assert!(seen.insert(card));
    }
    assert_eq!(seen.len(), 52);
    assert!(deck.is_empty());
    assert_eq!(deck.dealt(), 52);

    deck.reset();
    assert_eq!(deck.remaining(), 52);
    assert_eq!(deck.deal(), Some(Card::new(Rank::Two, Suit::Clubs)));
}

/// Парсинг и печать карт.
#[test]
fn card_parse_and_display() {
    let c: Card = "Td".parse().unwrap();
    assert_eq!(c, Card::new(Rank::Ten, Suit::Diamonds));
    assert_eq!(c.to_string(), "Td");
    assert!("1x".parse::<Card>().is_err());
    assert!("Ahh".parse::<Card>().is_err());

    // Порядок для bring-in: ранг, затем масть.
    assert!(Card::new(Rank::Two, Suit::Spades) < Card::new(Rank::Three, Suit::Clubs));
    assert!(Card::new(Rank::Two, Suit::Clubs) < Card::new(Rank::Two, Suit::Diamonds));
}

/// Seat::commit снимает не больше стека.
#[test]
fn seat_commit_caps_at_purse() {
    let mut seat = Seat::new(1, "Alice".into(), Chips(30), false, Instant::now());
    assert_eq!(seat.status, SeatStatus::Waiting);
    assert!(!seat.can_act());

    seat.status = SeatStatus::Playing;
    assert!(seat.can_act());
    assert_eq!(seat.commit(Chips(20)), Chips(20));
    assert_eq!(seat.commit(Chips(20)), Chips(10));
    assert_eq!(seat.purse, Chips::ZERO);
    assert_eq!(seat.committed, Chips(30));
    assert!(seat.is_contender());
    assert!(!seat.can_act(), "олл-ин остаётся в раздаче, но не ходит");
}

#[test]
fn seat_up_cards_filter() {
    let mut seat = Seat::new(1, "Alice".into(), Chips(30), false, Instant::now());
    let down = Card::new(Rank::Ace, Suit::Spades);
    let up = Card::new(Rank::King, Suit::Hearts);
    seat.cards = vec![HeldCard::down(down), HeldCard::up(up)];

    assert_eq!(seat.up_cards(), vec![up]);
    assert_eq!(seat.all_cards(), vec![down, up]);

    seat.reset_for_hand();
    assert!(seat.cards.is_empty());
}

/// Варианты как данные.
#[test]
fn variant_presets() {
    let stud = VariantConfig::five_card_stud();
    assert_eq!(stud.final_round(), 4);
    assert_eq!(stud.street_name(1), "Second street");
    assert_eq!(stud.street_name(4), "Fifth street");
    assert_eq!(stud.street_name(5), "Showdown");
    assert_eq!(stud.street_name(0), "");
    assert_eq!(stud.bet_unit(2), Chips(5));
    assert_eq!(stud.bet_unit(3), Chips(10));
    assert_eq!(stud.min_purse_to_play(), Chips(3));
    assert_eq!(stud.bring_in(), Some(Chips(2)));
    assert_eq!(stud.max_raises(), Some(3));

    let holdem = VariantConfig::texas_holdem();
    assert_eq!(holdem.final_round(), 4);
    assert_eq!(holdem.street_name(2), "Flop");
    assert_eq!(holdem.street(2).unwrap().board, 3);
    assert_eq!(holdem.min_purse_to_play(), Chips(10));
    assert_eq!(holdem.bring_in(), None);
    assert_eq!(holdem.max_raises(), None);
}

/// Подсчёты стола.
#[test]
fn table_counts() {
    let mut table = Table::new(1, "T".into(), TableConfig::texas_holdem());
    assert_eq!(table.phase, Phase::NoGame);
    assert_eq!(table.last_result, WAITING_MESSAGE);

    let now = Instant::now();
    for (i, status) in [SeatStatus::Playing, SeatStatus::Folded, SeatStatus::Left]
        .into_iter()
        .enumerate()
    {
        let mut seat = Seat::new(i as u64 + 1, format!("P{i}"), Chips(100), false, now);
        seat.status = status;
        table.seats.push(seat);
    }
    table.pot = Chips(50);

    assert_eq!(table.contender_count(), 1);
    assert_eq!(table.eligible_count(), 2);
    assert_eq!(table.chips_in_play(), Chips(350));
    assert_eq!(table.seat_index_by_name("p1"), Some(1));
    assert!(!table.is_full());
}

/// Метки ходов для протокола.
#[test]
fn move_labels_round_trip_through_parser() {
    assert_eq!(Move::Call(Chips(5)).label(), "CALL 5");
    assert_eq!(Move::PostForced(Chips(2)).label(), "POST 2");
    assert_eq!(Move::AllIn.label(), "ALLIN");
    assert_eq!(Move::AllIn.to_string(), "All-in");
    assert_eq!(Move::parse_label("raise 10"), Some(Move::Raise(Chips(10))));
    assert_eq!(Move::parse_label("CHECK"), Some(Move::Check));
    assert_eq!(Move::parse_label("CALL"), None);
    assert_eq!(Move::parse_label("FOLD 3"), None);
    assert_eq!(Move::AllIn.chips(Chips(42)), Chips(42));
}
