use crate::domain::card::{Card, Rank, Suit};
use crate::domain::hand::HandRank;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Оценщик силы руки. Движку он нужен как "чёрный ящик":
/// больше `HandRank` - сильнее рука; масти на шоудауне не важны.
pub trait HandEvaluator: Send {
    fn rank(&self, cards: &[Card]) -> HandRank;
}

/// Стандартный оценщик: лучшая 5-карточная комбинация из 5–7 карт,
/// для неполных рук (1–4 открытые карты в стаде) - только пары/сеты/каре.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn rank(&self, cards: &[Card]) -> HandRank {
        evaluate_cards(cards)
    }
}

/// Главная функция: вычислить лучшую руку из hole + board.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> HandRank {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate_cards(&all_cards)
}

/// Оценка произвольного набора карт.
///
/// - 0 карт - нулевой ранг;
/// - 1–4 карты - частичная рука без стритов и флешей;
/// - 5 и больше - лучшая из всех 5-карточных комбинаций.
pub fn evaluate_cards(cards: &[Card]) -> HandRank {
    match cards.len() {
        0 => HandRank(0),
        1..=4 => evaluate_partial_hand(cards),
        _ => best_of_all_5card_combinations(cards),
    }
}

/// Перебираем все комбинации 5 карт из N и выбираем лучшую.
fn best_of_all_5card_combinations(cards: &[Card]) -> HandRank {
    let n = cards.len();
    let mut best = HandRank(0);

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let r = evaluate_5card_hand(&five);
                        if r > best {
                            best = r;
                        }
                    }
                }
            }
        }
    }

    best
}

/// (rank, count), отсортированные по количеству, затем по рангу (desc).
fn rank_groups(cards: &[Card]) -> Vec<(Rank, u8)> {
    let mut rank_counts = [0u8; 15];
    for card in cards {
        rank_counts[card.rank.value() as usize] += 1;
    }

    let mut groups: Vec<(Rank, u8)> = (2u8..=14)
        .rev()
        .filter(|&v| rank_counts[v as usize] > 0)
        .filter_map(|v| Rank::from_value(v).map(|r| (r, rank_counts[v as usize])))
        .collect();

    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    groups
}

/// Дополнить ранги до 5 двойками (они не влияют на сравнение внутри категории).
fn pad_ranks(ranks: &[Rank]) -> [Rank; 5] {
    let mut out = [Rank::Two; 5];
    for (slot, r) in out.iter_mut().zip(ranks.iter()) {
        *slot = *r;
    }
    out
}

/// Неполная рука: 1–4 карты. Стриты и флеши невозможны.
fn evaluate_partial_hand(cards: &[Card]) -> HandRank {
    let groups = rank_groups(cards);
    let pattern: Vec<u8> = groups.iter().map(|g| g.1).collect();
    let ranks: Vec<Rank> = groups.iter().map(|g| g.0).collect();

    let category = match pattern.as_slice() {
        [4, ..] => HandCategory::FourOfAKind,
        [3, ..] => HandCategory::ThreeOfAKind,
        [2, 2, ..] => HandCategory::TwoPair,
        [2, ..] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    HandRank::from_category_and_ranks(category, pad_ranks(&ranks))
}

/// Оценка строго 5-карточной комбинации.
fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let mut suit_counts = [0u8; 4];
    let mut rank_mask: RankMask = 0;

    for card in cards.iter() {
        let suit_idx = match card.suit {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        };
        suit_counts[suit_idx] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = suit_counts.iter().any(|&c| c == 5);
    let straight_high_rank = detect_straight(rank_mask);

    let groups = rank_groups(cards);
    let pattern: Vec<u8> = groups.iter().map(|g| g.1).collect();
    let ranks: Vec<Rank> = groups.iter().map(|g| g.0).collect();

    if is_flush {
        if let Some(high) = straight_high_rank {
            return HandRank::from_category_and_ranks(
                HandCategory::StraightFlush,
                straight_rank_array(high),
            );
        }
    }

    let category = match pattern.as_slice() {
        [4, 1] => HandCategory::FourOfAKind,
        [3, 2] => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        _ if straight_high_rank.is_some() => HandCategory::Straight,
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    match (category, straight_high_rank) {
        (HandCategory::Straight, Some(high)) => {
            HandRank::from_category_and_ranks(category, straight_rank_array(high))
        }
        _ => HandRank::from_category_and_ranks(category, pad_ranks(&ranks)),
    }
}

/// Построить массив рангов [r0..r4] для стрита с заданной старшей картой.
fn straight_rank_array(high: Rank) -> [Rank; 5] {
    if high == Rank::Five {
        // wheel: A2345, туз тут младший
        return [Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace];
    }
    let top = high.value();
    let mut out = [Rank::Two; 5];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = Rank::from_value(top.saturating_sub(i as u8)).unwrap_or(Rank::Two);
    }
    out
}
