use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Phase;
use crate::domain::player::{Seat, SeatStatus};
use crate::domain::variant::VariantConfig;
use crate::domain::{PlayerId, TableId};
use crate::time_ctrl::TimeRules;

/// Индекс места в списке мест стола.
pub type SeatIndex = usize;

/// Жёсткий предел мест за одним столом.
pub const MAX_SEATS: u8 = 8;

/// Текст результата, пока за столом не набралось двое.
pub const WAITING_MESSAGE: &str = "Waiting for more players";

/// Конфиг стола: вариант, стеки, тайминги.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    /// Максимальное количество мест за столом (2–8).
    pub max_seats: u8,
    /// Стек нового игрока и бота после докупки.
    pub starting_purse: Chips,
    pub variant: VariantConfig,
    pub time: TimeRules,
    /// Бот со стеком меньше этого к началу раздачи получает новый стек.
    pub bot_rebuy_below: Chips,
}

impl TableConfig {
    pub fn texas_holdem() -> Self {
        Self {
            max_seats: MAX_SEATS,
            starting_purse: Chips(1000),
            variant: VariantConfig::texas_holdem(),
            time: TimeRules::standard(),
            bot_rebuy_below: Chips(25),
        }
    }

    pub fn five_card_stud() -> Self {
        Self {
            max_seats: MAX_SEATS,
            starting_purse: Chips(200),
            variant: VariantConfig::five_card_stud(),
            time: TimeRules::standard(),
            bot_rebuy_below: Chips(25),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig::texas_holdem()
    }
}

/// Авторитетное состояние одного стола.
///
/// Места хранятся плотным списком в порядке посадки; "по часовой" -
/// это порядок индексов с переходом через конец списка.
#[derive(Clone, Debug)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub config: TableConfig,
    pub seats: Vec<Seat>,
    /// Общие карты (для стада всегда пусто).
    pub board: Vec<Card>,
    /// Все фишки, внесённые в текущей раздаче, включая ставки текущего раунда.
    pub pot: Chips,
    /// Номер раунда торговли (1-based), 0 - раздача не идёт.
    pub round: u8,
    pub phase: Phase,
    /// Чей ход (индекс места).
    pub active: Option<SeatIndex>,
    /// Дилер прошлой/текущей раздачи (холдем).
    pub dealer_button: Option<PlayerId>,
    pub last_result: String,
    /// Последняя раздача закончилась без вскрытия.
    pub won_by_default: bool,
    pub hands_played: u64,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(id: TableId, name: String, config: TableConfig) -> Self {
        Self {
            id,
            name,
            config,
            seats: Vec::new(),
            board: Vec::new(),
            pot: Chips::ZERO,
            round: 0,
            phase: Phase::NoGame,
            active: None,
            dealer_button: None,
            last_result: WAITING_MESSAGE.to_string(),
            won_by_default: false,
            hands_played: 0,
        }
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_seats
    }

    pub fn seated_count(&self) -> usize {
        self.seats.len()
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() >= self.config.max_seats as usize
    }

    pub fn seat_index(&self, player_id: PlayerId) -> Option<SeatIndex> {
        self.seats.iter().position(|s| s.player_id == player_id)
    }

    pub fn seat(&self, player_id: PlayerId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.player_id == player_id)
    }

    /// Поиск по имени без учёта регистра.
    pub fn seat_index_by_name(&self, name: &str) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn active_seat(&self) -> Option<&Seat> {
        self.active.and_then(|idx| self.seats.get(idx))
    }

    /// Места, которые ещё претендуют на банк.
    pub fn contender_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_contender()).count()
    }

    /// Претенденты, которые ещё могут ставить (не в олл-ине).
    pub fn actionable_count(&self) -> usize {
        self.seats.iter().filter(|s| s.can_act()).count()
    }

    /// Места, которые могут участвовать в игре (не ушли).
    pub fn eligible_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.status != SeatStatus::Left)
            .count()
    }

    /// Сумма всех фишек за столом: стеки + банк.
    pub fn chips_in_play(&self) -> Chips {
        self.seats.iter().map(|s| s.purse).sum::<Chips>() + self.pot
    }
}
