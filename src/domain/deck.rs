use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Колода карт с курсором раздачи.
///
/// Перемешивание делает engine (через `RandomSource`), НЕ здесь.
/// Карты не удаляются из вектора: курсор только растёт, поэтому
/// за одну раздачу одна и та же карта не может выйти дважды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards, cursor: 0 }
    }

    /// Вернуть все карты обратно и поставить курсор в начало.
    /// Порядок после вызова - стандартный, перемешивание отдельно.
    pub fn reset(&mut self) {
        *self = Deck::standard_52();
    }

    /// Сколько карт уже роздано в этой раздаче.
    pub fn dealt(&self) -> usize {
        self.cursor
    }

    /// Сколько карт ещё можно раздать.
    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Выдать следующую карту и сдвинуть курсор.
    pub fn deal(&mut self) -> Option<Card> {
        let card = self.cards.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::standard_52()
    }
}
