use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, HeldCard};
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Метка хода, которой помечается ушедший игрок.
pub const LEFT_LABEL: &str = "LEFT";

/// Статус места в контексте стола/раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SeatStatus {
    /// Сидит за столом, но в текущей раздаче не участвует
    /// (подсел посреди раздачи или не хватило фишек на анте/блайнд).
    Waiting,
    /// Участвует в раздаче.
    Playing,
    /// Сбросил карты в этой раздаче.
    Folded,
    /// Ушёл (явно или по таймауту активности). Удаляется перед следующей раздачей.
    Left,
}

/// Место за столом: игрок и всё, что к нему относится в текущей раздаче.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    pub player_id: PlayerId,
    pub name: String,
    pub status: SeatStatus,
    /// Стек игрока.
    pub purse: Chips,
    /// Сколько поставлено в текущем раунде торговли.
    pub committed: Chips,
    /// Метка последнего хода в этом раунде ("CALL 5", "POST 10", ...).
    /// `None` - в этом раунде ещё не ходил.
    pub last_move: Option<String>,
    /// Карты игрока в порядке раздачи.
    pub cards: Vec<HeldCard>,
    pub is_bot: bool,
    /// Когда клиент этого места последний раз выходил на связь.
    pub last_seen: Instant,
}

impl Seat {
    pub fn new(player_id: PlayerId, name: String, purse: Chips, is_bot: bool, now: Instant) -> Self {
        Self {
            player_id,
            name,
            status: SeatStatus::Waiting,
            purse,
            committed: Chips::ZERO,
            last_move: None,
            cards: Vec::new(),
            is_bot,
            last_seen: now,
        }
    }

    /// Участник раздачи, претендующий на банк.
    pub fn is_contender(&self) -> bool {
        self.status == SeatStatus::Playing
    }

    /// Может ли место сделать ход прямо сейчас (в раздаче и есть фишки).
    pub fn can_act(&self) -> bool {
        self.status == SeatStatus::Playing && !self.purse.is_zero()
    }

    pub fn has_acted(&self) -> bool {
        self.last_move.is_some()
    }

    /// Снять фишки со стека в текущую ставку. Возвращает реально снятое.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.purse);
        self.purse -= real;
        self.committed += real;
        real
    }

    /// Открытые карты места (видны всем).
    pub fn up_cards(&self) -> Vec<Card> {
        self.cards.iter().filter(|c| c.face_up).map(|c| c.card).collect()
    }

    /// Все карты места, без учёта видимости.
    pub fn all_cards(&self) -> Vec<Card> {
        self.cards.iter().map(|c| c.card).collect()
    }

    /// Очистить всё, что относится к прошлой раздаче.
    pub fn reset_for_hand(&mut self) {
        self.committed = Chips::ZERO;
        self.last_move = None;
        self.cards.clear();
    }
}
