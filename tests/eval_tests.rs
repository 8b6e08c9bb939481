use poker_table::domain::card::{Card, Rank};
use poker_table::eval::{
    describe_hand, describe_hand_detailed, evaluate_best_hand, evaluate_cards, hand_category,
    HandCategory, HandEvaluator, StandardEvaluator,
};

fn cards(spec: &str) -> Vec<Card> {
    spec.split_whitespace()
        .map(|s| s.parse::<Card>().unwrap())
        .collect()
}

fn category(spec: &str) -> HandCategory {
    hand_category(evaluate_cards(&cards(spec)))
}

//
// Категории полных рук
//
#[test]
fn five_card_categories() {
    assert_eq!(category("2c 5d 9h Js Kc"), HandCategory::HighCard);
    assert_eq!(category("2c 2d 9h Js Kc"), HandCategory::OnePair);
    assert_eq!(category("2c 2d 9h 9s Kc"), HandCategory::TwoPair);
    assert_eq!(category("2c 2d 2h 9s Kc"), HandCategory::ThreeOfAKind);
    assert_eq!(category("5c 6d 7h 8s 9c"), HandCategory::Straight);
    assert_eq!(category("2h 5h 9h Jh Kh"), HandCategory::Flush);
    assert_eq!(category("2c 2d 2h 9s 9c"), HandCategory::FullHouse);
    assert_eq!(category("2c 2d 2h 2s 9c"), HandCategory::FourOfAKind);
    assert_eq!(category("5h 6h 7h 8h 9h"), HandCategory::StraightFlush);
}

#[test]
fn wheel_is_lowest_straight() {
    let wheel = evaluate_cards(&cards("Ac 2d 3h 4s 5c"));
    let six_high = evaluate_cards(&cards("2d 3h 4s 5c 6d"));
    assert_eq!(wheel.category(), HandCategory::Straight);
    assert!(six_high > wheel);
    assert_eq!(wheel.ranks()[0], Rank::Five);
}

#[test]
fn best_five_of_seven() {
    let rank = evaluate_best_hand(&cards("Ah Kh"), &cards("Qh Jh Th 2c 2d"));
    assert_eq!(rank.category(), HandCategory::StraightFlush);

    let rank = evaluate_best_hand(&cards("2c 7d"), &cards("Ks Kd 9h 4s 3c"));
    assert_eq!(rank.category(), HandCategory::OnePair);
}

#[test]
fn kickers_decide_within_category() {
    let aces_king = evaluate_cards(&cards("Ac Ad Kh 7s 2c"));
    let aces_queen = evaluate_cards(&cards("Ah As Qh 7d 2d"));
    assert!(aces_king > aces_queen);

    // Масти не влияют на силу.
    let a = evaluate_cards(&cards("Ac Ad Kh 7s 2c"));
    let b = evaluate_cards(&cards("Ah As Kd 7c 2d"));
    assert_eq!(a, b);
}

//
// Неполные руки (открытые карты стада)
//
#[test]
fn partial_hands_rank_pairs_and_high_cards() {
    assert_eq!(evaluate_cards(&[]).0, 0);
    assert_eq!(category("Kd"), HandCategory::HighCard);
    assert_eq!(category("3c 3d"), HandCategory::OnePair);
    assert_eq!(category("3c 3d 9h 9s"), HandCategory::TwoPair);
    assert_eq!(category("3c 3d 3h"), HandCategory::ThreeOfAKind);
    // Четыре карты одной масти - ещё не флеш.
    assert_eq!(category("2h 5h 9h Jh"), HandCategory::HighCard);

    let pair = evaluate_cards(&cards("3c 3d"));
    let ace_king = evaluate_cards(&cards("Ac Kd"));
    assert!(pair > ace_king);
}

#[test]
fn descriptions() {
    let full = evaluate_cards(&cards("Kh Kd Ks 9c 9d"));
    assert_eq!(describe_hand(full), "Full House");
    assert_eq!(describe_hand_detailed(full), "Full House, Kings full of Nines");

    let pair = evaluate_cards(&cards("Kc Kd 2h 9s 7c"));
    assert_eq!(describe_hand(pair), "Pair");
    assert_eq!(describe_hand_detailed(pair), "Pair of Kings");

    let detailed = |spec: &str| describe_hand_detailed(evaluate_cards(&cards(spec)));
    assert_eq!(detailed("Kc Kd 9h 9s 2c"), "Two Pair, Kings over Nines");
    assert_eq!(detailed("7c 7d 7h Js 2c"), "Three of a Kind, Sevens");
    assert_eq!(detailed("2h 5h 9h Jh Ah"), "Flush, Ace high");
    assert_eq!(detailed("5c 6d 7h 8s 9c"), "Straight, Nine high");
    assert_eq!(detailed("Ac 2d 3h 4s 5c"), "Straight, Five high");
    assert_eq!(detailed("5h 6h 7h 8h 9h"), "Straight Flush, Nine high");
    assert_eq!(detailed("Ts Js Qs Ks As"), "Royal Flush");
    assert_eq!(detailed("2c 5d 9h Js Kc"), "High Card, King high");
}

#[test]
fn standard_evaluator_matches_free_function() {
    let hand = cards("As Ks Qs Js Ts 2c 3d");
    assert_eq!(StandardEvaluator.rank(&hand), evaluate_cards(&hand));
}
