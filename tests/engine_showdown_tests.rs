use std::sync::Arc;
use std::time::Instant;

use poker_table::config::EngineConfig;
use poker_table::domain::{
    card::{Card, HeldCard},
    chips::Chips,
    hand::Phase,
    player::{Seat, SeatStatus},
    table::{Table, TableConfig},
};
use poker_table::engine::{
    game_loop::{Session, TickOutcome},
    hand_history::{HandEventKind, HandHistory},
    settlement::{settle, ABORTED_MESSAGE},
};
use poker_table::eval::StandardEvaluator;
use poker_table::time_ctrl::ManualClock;

fn cards(spec: &str) -> Vec<Card> {
    spec.split_whitespace()
        .map(|s| s.parse::<Card>().unwrap())
        .collect()
}

fn seat(id: u64, name: &str, purse: u64, hole: &str) -> Seat {
    let mut s = Seat::new(id, name.to_string(), Chips(purse), false, Instant::now());
    s.status = SeatStatus::Playing;
    s.cards = cards(hole).into_iter().map(HeldCard::down).collect();
    s
}

fn showdown_table(seats: Vec<Seat>, board: &str, pot: u64) -> Table {
    let mut table = Table::new(1, "SD".to_string(), TableConfig::texas_holdem());
    table.seats = seats;
    table.board = cards(board);
    table.pot = Chips(pot);
    table.phase = Phase::Betting;
    table.round = 4;
    table.hands_played = 1;
    table
}

//
// Разбор банка
//
#[test]
fn best_hand_takes_whole_pot() {
    let mut table = showdown_table(
        vec![
            seat(1, "Alice", 100, "Ah Ad"),
            seat(2, "Bob", 100, "Kc Qc"),
        ],
        "2s 7d 9h Jc 3s",
        40,
    );
    let mut history = HandHistory::new();

    let report = settle(&mut table, &StandardEvaluator, &mut history);

    assert_eq!(report.winners, vec![1]);
    assert_eq!(report.share, Chips(40));
    assert_eq!(report.remainder, Chips::ZERO);
    assert_eq!(report.result, "Alice won with Pair of Aces");
    assert_eq!(table.seats[0].purse, Chips(140));
    assert_eq!(table.seats[1].purse, Chips(100));
    assert_eq!(table.pot, Chips::ZERO);
    assert_eq!(table.last_result, report.result);

    let reveals = history
        .events
        .iter()
        .filter(|e| matches!(e.kind, HandEventKind::ShowdownReveal { .. }))
        .count();
    assert_eq!(reveals, 2);
}

#[test]
fn tie_splits_and_discards_remainder() {
    // Роял-флеш на борде: у всех одинаковая рука.
    let mut table = showdown_table(
        vec![
            seat(1, "Alice", 100, "2c 3d"),
            seat(2, "Bob", 100, "4c 5d"),
        ],
        "As Ks Qs Js Ts",
        25,
    );
    let mut history = HandHistory::new();

    let report = settle(&mut table, &StandardEvaluator, &mut history);

    assert_eq!(report.winners, vec![1, 2]);
    assert_eq!(report.share, Chips(12));
    assert_eq!(report.remainder, Chips(1));
    assert_eq!(report.result, "Alice and Bob won with Royal Flush");
    assert_eq!(table.seats[0].purse, Chips(112));
    assert_eq!(table.seats[1].purse, Chips(112));

    assert!(history
        .events
        .iter()
        .any(|e| e.kind == HandEventKind::RemainderDiscarded { amount: Chips(1) }));
}

#[test]
fn folded_seats_never_win() {
    let mut folded = seat(1, "Alice", 100, "As Ah");
    folded.status = SeatStatus::Folded;
    let mut table = showdown_table(
        vec![folded, seat(2, "Bob", 100, "2c 7d"), seat(3, "Carol", 100, "3c 8d")],
        "Ad Ac Kh Qs 4d",
        30,
    );
    let mut history = HandHistory::new();

    let report = settle(&mut table, &StandardEvaluator, &mut history);

    assert!(!report.winners.contains(&1));
    assert_eq!(table.seats[0].purse, Chips(100));
}

#[test]
fn single_contender_wins_by_default() {
    let mut folded = seat(1, "Alice", 100, "As Ah");
    folded.status = SeatStatus::Folded;
    let mut table = showdown_table(vec![folded, seat(2, "Bob", 90, "2c 7d")], "", 30);
    let mut history = HandHistory::new();

    let report = settle(&mut table, &StandardEvaluator, &mut history);

    assert!(report.won_by_default);
    assert!(table.won_by_default);
    assert_eq!(report.result, "Bob won by default");
    assert_eq!(table.seats[1].purse, Chips(120));
}

#[test]
fn no_contenders_aborts_hand() {
    let mut a = seat(1, "Alice", 100, "As Ah");
    a.status = SeatStatus::Left;
    let mut b = seat(2, "Bob", 100, "2c 7d");
    b.status = SeatStatus::Folded;
    let mut table = showdown_table(vec![a, b], "", 30);
    let mut history = HandHistory::new();

    let report = settle(&mut table, &StandardEvaluator, &mut history);

    assert!(report.winners.is_empty());
    assert_eq!(report.remainder, Chips(30));
    assert_eq!(report.result, ABORTED_MESSAGE);
    assert_eq!(table.seats[0].purse, Chips(100));
    assert_eq!(table.seats[1].purse, Chips(100));
    assert!(history
        .events
        .iter()
        .any(|e| e.kind == HandEventKind::HandAborted { pot: Chips(30) }));
}

//
// Сохранение фишек на полной раздаче ботов
//
fn run_bot_hands(config: EngineConfig, hands: u64) {
    let clock = Arc::new(ManualClock::new());
    let mut s = Session::from_config(1, "CONSERVE", &config, clock.clone()).unwrap();

    let mut played = 0;
    let mut total_in_hand = None;
    for _ in 0..100_000 {
        let outcome = s.tick();
        let t = s.table();

        if outcome == TickOutcome::HandStarted {
            total_in_hand = Some(t.chips_in_play());
        }

        if let Some(idx) = t.active {
            assert_eq!(t.phase, Phase::Betting);
            assert_eq!(t.seats[idx].status, SeatStatus::Playing, "ходит только участник");
        }

        if t.phase == Phase::Betting {
            assert_eq!(Some(t.chips_in_play()), total_in_hand, "фишки не появляются и не исчезают");
        }

        if t.phase == Phase::HandComplete && total_in_hand.is_some() {
            let report = s.last_settlement().unwrap();
            let purses: Chips = t.seats.iter().map(|seat| seat.purse).sum();
            assert_eq!(Some(purses + report.remainder), total_in_hand);
            assert_eq!(report.remainder, report.pot.split_even(report.winners.len().max(1)).1);
            total_in_hand = None;
            played += 1;
            if played == hands {
                return;
            }
        }

        clock.advance_secs(1);
    }
    panic!("сыграно только {played} раздач из {hands}");
}

#[test]
fn chips_are_conserved_in_holdem_bot_games() {
    let mut config = EngineConfig::texas_holdem();
    config.bots.count = 4;
    config.seed = Some(7);
    run_bot_hands(config, 20);
}

#[test]
fn chips_are_conserved_in_stud_bot_games() {
    let mut config = EngineConfig::five_card_stud();
    config.bots.count = 5;
    config.seed = Some(11);
    run_bot_hands(config, 20);
}
