use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Фаза стола.
///
/// `NoGame -> Dealing -> Betting -> Showdown -> HandComplete -> (NoGame | Dealing)`.
/// `Dealing` и `Showdown` проходятся внутри одного вызова движка,
/// снаружи их обычно не видно.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Меньше двух игроков - ждём.
    NoGame,
    Dealing,
    /// Идёт торговля на улице `Table::round`.
    Betting,
    Showdown,
    /// Раздача завершена, ждём паузу перед следующей.
    HandComplete,
}

impl Phase {
    pub fn hand_in_progress(self) -> bool {
        matches!(self, Phase::Dealing | Phase::Betting | Phase::Showdown)
    }
}

/// Ранг руки. Чем больше значение, тем сильнее рука.
/// Кодирование - в `eval::hand_rank`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Итог расчёта банка по завершённой раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementReport {
    /// Размер разыгранного банка.
    pub pot: Chips,
    /// Победители (пусто, если раздача прервана).
    pub winners: Vec<PlayerId>,
    /// Сколько получил каждый победитель.
    pub share: Chips,
    /// Нераспределённый остаток от целочисленного деления (уходит столу).
    pub remainder: Chips,
    /// Выиграл ли единственный оставшийся без вскрытия.
    pub won_by_default: bool,
    /// Текст результата для клиентов.
    pub result: String,
}
