use crate::domain::PlayerId;
use crate::engine::actions::Move;

use thiserror::Error;

/// Ошибки движка. Любая ошибка означает, что состояние стола не изменилось.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Игрок {0} не найден за столом")]
    PlayerNotAtTable(PlayerId),

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Сейчас не ход игрока с id={0}")]
    NotPlayersTurn(PlayerId),

    #[error("Игрок {0} не участвует в раздаче")]
    SeatNotPlaying(PlayerId),

    #[error("Недопустимый ход {0:?} в текущем состоянии раздачи")]
    IllegalMove(Move),

    #[error("За столом нет свободных мест (максимум {0})")]
    TableFull(u8),

    #[error("Имя {0:?} уже занято")]
    DuplicateName(String),

    #[error("Пустое имя игрока")]
    InvalidName,
}
