use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, HeldCard};
use crate::domain::chips::Chips;
use crate::domain::{PlayerId, TableId};
use crate::engine::actions::Move;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted { table_id: TableId, hand_no: u64 },

    /// Анте со всех участников (стад).
    AntesPosted { antes: Vec<(PlayerId, Chips)> },

    /// Кнопка и блайнды (холдем).
    BlindsPosted {
        dealer: PlayerId,
        small_blind: (PlayerId, Chips),
        big_blind: (PlayerId, Chips),
    },

    /// Игрок получил карты.
    CardsDealt { player_id: PlayerId, cards: Vec<HeldCard> },

    /// Открыты общие карты.
    BoardDealt { round: u8, cards: Vec<Card> },

    /// Началась новая улица.
    StreetOpened { round: u8, name: String },

    /// Ход игрока. `forced` - ход сделан движком (бот или таймаут).
    MoveApplied {
        player_id: PlayerId,
        mv: Move,
        forced: bool,
        purse_after: Chips,
        pot_after: Chips,
    },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        player_id: PlayerId,
        cards: Vec<Card>,
        rank_value: u32,
    },

    /// Выплата банка.
    PotAwarded { player_id: PlayerId, amount: Chips },

    /// Остаток от деления банка, который никому не достался.
    RemainderDiscarded { amount: Chips },

    /// Претендентов не осталось, банк не разыгран.
    HandAborted { pot: Chips },

    /// Раздача завершена.
    HandFinished { hand_no: u64, result: String },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// История текущей (или последней) раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    /// Все ходы раздачи по порядку.
    pub fn moves(&self) -> Vec<(PlayerId, Move)> {
        self.events
            .iter()
            .filter_map(|e| match &e.kind {
                HandEventKind::MoveApplied { player_id, mv, .. } => Some((*player_id, *mv)),
                _ => None,
            })
            .collect()
    }

    /// Сколько раз открывалась новая улица.
    pub fn streets_opened(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, HandEventKind::StreetOpened { .. }))
            .count()
    }
}
