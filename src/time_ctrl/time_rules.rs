// src/time_ctrl/time_rules.rs
//! Конфигурация тайминга стола.
//!
//! Здесь описываем только "правила", без состояния и без привязки к конкретному столу.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Правила тайминга для одного стола. Все значения в секундах.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeRules {
    /// Время на ход бота.
    pub bot_action_secs: u64,
    /// Время на ход человека.
    pub human_action_secs: u64,
    /// Добавка первому ходящему новой улицы/раздачи.
    pub new_round_buffer_secs: u64,
    /// Пауза между концом раздачи и началом следующей.
    pub end_of_hand_secs: u64,
    /// Сколько можно не выходить на связь, прежде чем место пометят ушедшим.
    pub liveness_timeout_secs: u64,
    /// Запас, который вычитается из показываемого клиенту таймера.
    pub display_grace_secs: u64,
}

impl TimeRules {
    /// Строгий конструктор.
    pub const fn new(
        bot_action_secs: u64,
        human_action_secs: u64,
        new_round_buffer_secs: u64,
        end_of_hand_secs: u64,
        liveness_timeout_secs: u64,
        display_grace_secs: u64,
    ) -> Self {
        Self {
            bot_action_secs,
            human_action_secs,
            new_round_buffer_secs,
            end_of_hand_secs,
            liveness_timeout_secs,
            display_grace_secs,
        }
    }

    /// Стандартный профиль: бот 3 с, человек 39 с, пауза после раздачи 12 с,
    /// пропажа со связи 5 минут.
    pub const fn standard() -> Self {
        Self::new(3, 39, 1, 12, 5 * 60, 4)
    }

    /// Лимит на ход для места.
    pub fn action_limit(&self, is_bot: bool, new_round: bool) -> Duration {
        let base = if is_bot {
            self.bot_action_secs
        } else {
            self.human_action_secs
        };
        let buffer = if new_round {
            self.new_round_buffer_secs
        } else {
            0
        };
        Duration::from_secs(base + buffer)
    }

    pub fn end_of_hand(&self) -> Duration {
        Duration::from_secs(self.end_of_hand_secs)
    }

    pub fn liveness_timeout(&self) -> Duration {
        Duration::from_secs(self.liveness_timeout_secs)
    }

    pub fn display_grace(&self) -> Duration {
        Duration::from_secs(self.display_grace_secs)
    }
}

impl Default for TimeRules {
    fn default() -> Self {
        TimeRules::standard()
    }
}
