use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Chips;

/// Ход игрока.
///
/// Сумма в `PostForced/Bet/Call/Raise` - это сколько фишек игрок
/// добавляет из стека этим ходом (а не итоговая ставка).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Fold,
    Check,
    /// Обязательная ставка (bring-in в стаде).
    PostForced(Chips),
    /// Открывающая ставка (или "добивание" bring-in до полной ставки).
    Bet(Chips),
    Call(Chips),
    Raise(Chips),
    /// Весь оставшийся стек.
    AllIn,
}

impl Move {
    /// Сколько фишек ход снимает со стека при заданном стеке.
    pub fn chips(&self, purse: Chips) -> Chips {
        match *self {
            Move::Fold | Move::Check => Chips::ZERO,
            Move::PostForced(a) | Move::Bet(a) | Move::Call(a) | Move::Raise(a) => a,
            Move::AllIn => purse,
        }
    }

    /// Метка для протокола и поля "последний ход": `CALL 5`, `FOLD`.
    pub fn label(&self) -> String {
        match self {
            Move::Fold => "FOLD".to_string(),
            Move::Check => "CHECK".to_string(),
            Move::PostForced(a) => format!("POST {a}"),
            Move::Bet(a) => format!("BET {a}"),
            Move::Call(a) => format!("CALL {a}"),
            Move::Raise(a) => format!("RAISE {a}"),
            Move::AllIn => "ALLIN".to_string(),
        }
    }

    /// Обратное к `label`.
    pub fn parse_label(label: &str) -> Option<Move> {
        let mut parts = label.split_whitespace();
        let code = parts.next()?.to_ascii_uppercase();
        let amount = parts.next().and_then(|a| a.parse::<u64>().ok()).map(Chips);
        if parts.next().is_some() {
            return None;
        }
        match (code.as_str(), amount) {
            ("FOLD", None) => Some(Move::Fold),
            ("CHECK", None) => Some(Move::Check),
            ("ALLIN", None) => Some(Move::AllIn),
            ("POST", Some(a)) => Some(Move::PostForced(a)),
            ("BET", Some(a)) => Some(Move::Bet(a)),
            ("CALL", Some(a)) => Some(Move::Call(a)),
            ("RAISE", Some(a)) => Some(Move::Raise(a)),
            _ => None,
        }
    }

    pub fn is_aggressive(&self) -> bool {
        matches!(self, Move::Bet(_) | Move::Raise(_))
    }
}

impl fmt::Display for Move {
    /// Человеческое название для кнопки: `Call 5`, `All-in`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Fold => write!(f, "Fold"),
            Move::Check => write!(f, "Check"),
            Move::PostForced(a) => write!(f, "Post {a}"),
            Move::Bet(a) => write!(f, "Bet {a}"),
            Move::Call(a) => write!(f, "Call {a}"),
            Move::Raise(a) => write!(f, "Raise {a}"),
            Move::AllIn => write!(f, "All-in"),
        }
    }
}
