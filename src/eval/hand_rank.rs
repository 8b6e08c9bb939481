use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandRank {
    /// Собрать HandRank из категории и 5 рангов (от старшего к младшему).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Rank: 2..14 (2..A) влазит в 4 бита.
    pub fn from_category_and_ranks(category: HandCategory, ranks: [Rank; 5]) -> Self {
        let cat_bits = (category as u32) & 0x0F;
        let r0 = rank_to_nibble(ranks[0]);
        let r1 = rank_to_nibble(ranks[1]);
        let r2 = rank_to_nibble(ranks[2]);
        let r3 = rank_to_nibble(ranks[3]);
        let r4 = rank_to_nibble(ranks[4]);

        let value = (cat_bits << 20)
            | ((r0 as u32) << 16)
            | ((r1 as u32) << 12)
            | ((r2 as u32) << 8)
            | ((r3 as u32) << 4)
            | (r4 as u32);

        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        match (self.0 >> 20) & 0x0F {
            0 => HandCategory::HighCard,
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }

    /// Достать 5 рангов (от старшего к младшему) из HandRank.
    pub fn ranks(&self) -> [Rank; 5] {
        let r0 = ((self.0 >> 16) & 0x0F) as u8;
        let r1 = ((self.0 >> 12) & 0x0F) as u8;
        let r2 = ((self.0 >> 8) & 0x0F) as u8;
        let r3 = ((self.0 >> 4) & 0x0F) as u8;
        let r4 = (self.0 & 0x0F) as u8;

        [
            nibble_to_rank(r0),
            nibble_to_rank(r1),
            nibble_to_rank(r2),
            nibble_to_rank(r3),
            nibble_to_rank(r4),
        ]
    }
}

fn rank_to_nibble(rank: Rank) -> u8 {
    // Rank::Two = 2, ..., Ace = 14 - всё помещается в 4 бита.
    rank.value()
}

fn nibble_to_rank(n: u8) -> Rank {
    Rank::from_value(n).unwrap_or(Rank::Two)
}

impl HandCategory {
    /// Название категории для текста результата ("Two Pair", "Flush").
    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

/// Удобная функция – получить категорию из HandRank.
pub fn hand_category(rank: HandRank) -> HandCategory {
    rank.category()
}

/// Человеческое описание руки по категории.
pub fn describe_hand(rank: HandRank) -> String {
    rank.category().name().to_string()
}

/// Описание с рангами комбинации для текста результата:
/// "Pair of Kings", "Two Pair, Kings over Nines", "Full House, Kings full of Nines",
/// "Flush, Ace high".
pub fn describe_hand_detailed(rank: HandRank) -> String {
    let [first, second, ..] = rank.ranks();
    let category = rank.category();
    match category {
        HandCategory::OnePair => format!("Pair of {}", first.plural_name()),
        HandCategory::TwoPair => format!(
            "Two Pair, {} over {}",
            first.plural_name(),
            second.plural_name()
        ),
        HandCategory::ThreeOfAKind | HandCategory::FourOfAKind => {
            format!("{}, {}", category.name(), first.plural_name())
        }
        HandCategory::FullHouse => format!(
            "Full House, {} full of {}",
            first.plural_name(),
            second.plural_name()
        ),
        HandCategory::StraightFlush if first == Rank::Ace => "Royal Flush".to_string(),
        HandCategory::HighCard
        | HandCategory::Straight
        | HandCategory::Flush
        | HandCategory::StraightFlush => format!("{}, {} high", category.name(), first.name()),
    }
}
