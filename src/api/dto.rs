use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Phase;
use crate::domain::player::SeatStatus;
use crate::domain::TableId;
use crate::engine::actions::Move;

/// Карта глазами конкретного зрителя.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CardView {
    /// Рубашкой вверх.
    Hidden,
    Shown(Card),
}

/// Место за столом глазами зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub name: String,
    pub status: SeatStatus,
    pub purse: Chips,
    /// Ставка в текущем раунде.
    pub committed: Chips,
    pub last_move: Option<String>,
    pub is_bot: bool,
    pub cards: Vec<CardView>,
}

/// Кнопка хода для клиента.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalMoveView {
    pub mv: Move,
    /// Протокольный код: `CALL 5`.
    pub code: String,
    /// Подпись на кнопке: `Call 5`.
    pub name: String,
}

impl From<Move> for LegalMoveView {
    fn from(mv: Move) -> Self {
        Self {
            mv,
            code: mv.label(),
            name: mv.to_string(),
        }
    }
}

/// Всё, что клиент получает на один опрос.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewerState {
    pub table_id: TableId,
    pub round: u8,
    /// Название улицы ("Flop", "Third street", ...).
    pub street: String,
    pub phase: Phase,
    pub pot: Chips,
    pub current_bet: Chips,
    /// Индекс активного места относительно зрителя, -1 - никто не ходит.
    pub active_seat: i32,
    /// Сколько секунд осталось на ход. Не ноль только для активного зрителя.
    pub move_time_secs: u64,
    /// Зритель не сидит за столом.
    pub spectating: bool,
    /// Места начиная со зрителя (или с места 0 для наблюдателя).
    pub seats: Vec<SeatView>,
    pub board: Vec<Card>,
    pub legal_moves: Vec<LegalMoveView>,
    pub last_result: String,
    pub hands_played: u64,
    /// Хеш содержимого, чтобы клиент мог не перерисовывать то же самое.
    pub hash: String,
}

impl ViewerState {
    /// SHA-256 (hex) от JSON-представления с пустым полем `hash`.
    pub fn content_hash(&self) -> String {
        let mut unhashed = self.clone();
        unhashed.hash.clear();
        // Сериализация простых структур без map-ключей не падает.
        let bytes = serde_json::to_vec(&unhashed).unwrap_or_default();
        hex::encode(Sha256::digest(&bytes))
    }

    /// Проставить `hash`.
    pub fn with_hash(mut self) -> Self {
        self.hash = self.content_hash();
        self
    }
}
