//! Движок стола: торговля, переход улиц, боты, расчёт банка.
//!
//! Высокоуровневый объект: `Session` (один стол).
//! Основные операции:
//!   - `Session::tick` – продвинуть стол (вызывается на каждый опрос клиента)
//!   - `Session::apply_move` – применить ход игрока
//!   - `Session::legal_moves` – допустимые ходы места
//!   - `api::project_for` – вид стола для конкретного зрителя

pub mod actions;
pub mod betting;
pub mod bot;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod settlement;
pub mod table_manager;
pub mod validation;

pub use actions::Move;
pub use betting::BettingState;
pub use bot::{AutomatedPolicy, BaselinePolicy, DecisionContext, PolicyTuning};
pub use errors::EngineError;
pub use game_loop::{Session, TickOutcome};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use settlement::settle;
pub use table_manager::{ManagerError, SessionHandle, TableManager, TableSummary};
pub use validation::legal_moves;

use crate::domain::Card;

/// RNG интерфейс для engine: перемешивание колоды и случайные решения ботов.
/// Реализации - в infra (обёртки над `rand`); в тестах - детерминированные фейки.
pub trait RandomSource: Send {
    fn shuffle_cards(&mut self, cards: &mut [Card]);

    /// Равномерное число в `[0, upper)`. Для `upper == 0` - всегда 0.
    fn below(&mut self, upper: u32) -> u32;
}
