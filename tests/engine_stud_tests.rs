use std::sync::Arc;

use poker_table::domain::{
    card::Card, chips::Chips, hand::Phase, table::TableConfig, PlayerId,
};
use poker_table::engine::{
    actions::Move,
    game_loop::{Session, TickOutcome},
    hand_history::HandEventKind,
    RandomSource,
};
use poker_table::time_ctrl::ManualClock;

struct StackedRng {
    top: Vec<Card>,
}

impl RandomSource for StackedRng {
    fn shuffle_cards(&mut self, deck: &mut [Card]) {
        let mut ordered = self.top.clone();
        ordered.extend(deck.iter().copied().filter(|c| !self.top.contains(c)));
        deck.copy_from_slice(&ordered);
    }

    fn below(&mut self, _upper: u32) -> u32 {
        0
    }
}

fn cards(spec: &str) -> Vec<Card> {
    spec.split_whitespace()
        .map(|s| s.parse::<Card>().unwrap())
        .collect()
}

/// Порядок раздачи в стаде: закрытые A, B; открытые A, B; дальше по одной открытой.
fn stud_session(deck: &str) -> (Session, Arc<ManualClock>, PlayerId, PlayerId) {
    let clock = Arc::new(ManualClock::new());
    let mut s = Session::new(2, "STUD", TableConfig::five_card_stud())
        .with_rng(StackedRng { top: cards(deck) })
        .with_clock(clock.clone());
    let a = s.join("Alice", false).unwrap();
    let b = s.join("Bob", false).unwrap();
    (s, clock, a, b)
}

#[test]
fn antes_and_lowest_up_card_brings_in() {
    // Alice: Ah / Kd, Bob: 9s / 3c.
    let (mut s, _clock, a, b) = stud_session("Ah 9s Kd 3c 8h 3d 2s Jc 4d 5h");
    assert_eq!(s.tick(), TickOutcome::HandStarted);

    let t = s.table();
    assert_eq!(t.pot, Chips(2), "анте по 1 с каждого");
    assert_eq!(t.seat(a).unwrap().purse, Chips(199));
    assert_eq!(t.seat(a).unwrap().up_cards(), cards("Kd"));
    assert_eq!(t.seat(b).unwrap().up_cards(), cards("3c"));
    assert_eq!(t.active_seat().unwrap().player_id, b);
    assert!(t.board.is_empty());

    assert_eq!(
        s.legal_moves(b),
        vec![Move::PostForced(Chips(2)), Move::Bet(Chips(5)), Move::AllIn]
    );
    assert!(s.history().events.iter().any(|e| matches!(
        &e.kind,
        HandEventKind::AntesPosted { antes } if antes.len() == 2
    )));
}

#[test]
fn suit_breaks_bring_in_tie() {
    // Обе открытые - тройки; трефы младше бубен.
    let (mut s, _clock, a, _b) = stud_session("Ah 9s 3c 3d");
    s.tick();
    assert_eq!(s.table().active_seat().unwrap().player_id, a);
}

#[test]
fn best_visible_hand_acts_first_on_later_streets() {
    let (mut s, _clock, a, b) = stud_session("Ah 9s Kd 3c 8h 3d 2s Jc 4d 5h");
    s.tick();

    s.apply_move(b, Move::PostForced(Chips(2))).unwrap();
    assert_eq!(s.table().pot, Chips(4));
    assert_eq!(
        s.legal_moves(a),
        vec![Move::Fold, Move::Call(Chips(2)), Move::Bet(Chips(5)), Move::AllIn]
    );
    s.apply_move(a, Move::Call(Chips(2))).unwrap();

    // Третья улица: у Bob открыта пара троек, он ходит первым.
    let t = s.table();
    assert_eq!(t.round, 2);
    assert_eq!(t.pot, Chips(6));
    assert_eq!(t.seat(b).unwrap().up_cards(), cards("3c 3d"));
    assert_eq!(t.active_seat().unwrap().player_id, b);
    assert_eq!(
        s.legal_moves(b),
        vec![Move::Fold, Move::Check, Move::Bet(Chips(5)), Move::AllIn]
    );
}

#[test]
fn completing_the_bring_in_reopens_action() {
    let (mut s, _clock, a, b) = stud_session("Ah 9s Kd 3c 8h 3d 2s Jc 4d 5h");
    s.tick();

    s.apply_move(b, Move::PostForced(Chips(2))).unwrap();
    s.apply_move(a, Move::Bet(Chips(5))).unwrap();
    assert_eq!(s.betting().current_bet, Chips(5));
    assert_eq!(s.table().active_seat().unwrap().player_id, b);
    assert!(s.legal_moves(b).contains(&Move::Call(Chips(3))));

    s.apply_move(b, Move::Call(Chips(3))).unwrap();
    assert_eq!(s.table().round, 2);
    assert_eq!(s.table().pot, Chips(12));
}

#[test]
fn stud_hand_plays_to_showdown() {
    // Alice: Ah Kd 8h 2s 4d, Bob: 9s 3c 3d Jc 5h.
    let (mut s, _clock, a, b) = stud_session("Ah 9s Kd 3c 8h 3d 2s Jc 4d 5h");
    s.tick();
    s.apply_move(b, Move::PostForced(Chips(2))).unwrap();
    s.apply_move(a, Move::Call(Chips(2))).unwrap();

    for _round in 2..=4 {
        let first = s.table().active_seat().unwrap().player_id;
        let second = if first == a { b } else { a };
        s.apply_move(first, Move::Check).unwrap();
        s.apply_move(second, Move::Check).unwrap();
    }

    let t = s.table();
    assert_eq!(t.phase, Phase::HandComplete);
    assert_eq!(t.last_result, "Bob won with Pair of Threes");
    assert_eq!(t.seat(b).unwrap().purse, Chips(197 + 6));
    assert_eq!(t.seat(a).unwrap().purse, Chips(197));
    assert_eq!(t.seat(a).unwrap().cards.len(), 5);
}
