use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Текущая целевая ставка, до которой должны дотянуться игроки.
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза (без лимита).
    pub min_raise: Chips,
    /// Сколько рейзов уже было на этой улице (для кэпа в лимите).
    pub raise_count: u8,
    /// Была ли на улице "настоящая" ставка. Блайнды и bring-in не считаются.
    pub opened: bool,
}

impl BettingState {
    /// Чистый раунд: ставок нет.
    pub fn new(min_raise: Chips) -> Self {
        Self {
            current_bet: Chips::ZERO,
            min_raise,
            raise_count: 0,
            opened: false,
        }
    }

    /// Обязательная ставка (блайнд, bring-in): поднимает планку, но не открывает торговлю.
    pub fn on_forced(&mut self, committed: Chips) {
        if committed > self.current_bet {
            self.current_bet = committed;
        }
    }

    /// Игрок поднял ставку до `new_bet` (bet, raise или олл-ин сверху).
    pub fn on_raise(&mut self, new_bet: Chips) {
        if new_bet <= self.current_bet {
            return;
        }
        let raise_size = new_bet - self.current_bet;
        if self.opened {
            self.raise_count = self.raise_count.saturating_add(1);
        }
        if raise_size >= self.min_raise {
            self.min_raise = raise_size;
        }
        self.current_bet = new_bet;
        self.opened = true;
    }

    /// Сколько не хватает до текущей ставки.
    pub fn to_call(&self, committed: Chips) -> Chips {
        self.current_bet.saturating_sub(committed)
    }
}
