//! Конфигурация движка: стол, боты, политика ботов, seed.
//!
//! Грузится из JSON; любые отсутствующие поля берутся по умолчанию.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::table::{TableConfig, MAX_SEATS};
use crate::domain::variant::{BetStructure, ForcedBets};
use crate::engine::bot::PolicyTuning;

/// Стандартные имена ботов.
pub const DEFAULT_BOT_NAMES: [&str; 8] = ["Clyd", "Jim", "Kirk", "Hulk", "Fry", "Meg", "Grif", "GPT"];

/// Ошибки загрузки/проверки конфига.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось прочитать конфиг: {0}")]
    Io(#[from] std::io::Error),

    #[error("Некорректный JSON конфига: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Некорректный конфиг: {0}")]
    Invalid(String),
}

/// Боты, которых стол сажает сам.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BotConfig {
    /// Сколько ботов посадить при создании стола.
    pub count: u8,
    pub names: Vec<String>,
    /// Суффикс к имени бота, чтобы люди не заняли его имя.
    pub suffix: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            count: 0,
            names: DEFAULT_BOT_NAMES.iter().map(|n| n.to_string()).collect(),
            suffix: " BOT".to_string(),
        }
    }
}

impl BotConfig {
    /// Полные имена ботов в порядке посадки.
    pub fn full_names(&self) -> Vec<String> {
        self.names
            .iter()
            .map(|n| format!("{n}{}", self.suffix))
            .collect()
    }
}

/// Полный конфиг одного стола.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub table: TableConfig,
    pub bots: BotConfig,
    pub policy: PolicyTuning,
    /// Seed для воспроизводимых раздач. Без него - системный RNG.
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn texas_holdem() -> Self {
        Self {
            table: TableConfig::texas_holdem(),
            ..Self::default()
        }
    }

    pub fn five_card_stud() -> Self {
        Self {
            table: TableConfig::five_card_stud(),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Проверка согласованности значений.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.table;
        if t.max_seats < 2 || t.max_seats > MAX_SEATS {
            return Err(ConfigError::Invalid(format!(
                "max_seats должно быть от 2 до {MAX_SEATS}, получено {}",
                t.max_seats
            )));
        }
        if t.variant.streets.is_empty() {
            return Err(ConfigError::Invalid("у варианта нет ни одной улицы".into()));
        }
        let unit_is_zero = match t.variant.structure {
            BetStructure::FixedLimit { low, high, .. } => low.is_zero() || high.is_zero(),
            BetStructure::NoLimit { min_bet } => min_bet.is_zero(),
        };
        if unit_is_zero {
            return Err(ConfigError::Invalid("нулевой размер ставки".into()));
        }
        if let ForcedBets::Blinds { small, big } = t.variant.forced {
            if small > big {
                return Err(ConfigError::Invalid("малый блайнд больше большого".into()));
            }
        }
        if self.bots.count > t.max_seats {
            return Err(ConfigError::Invalid(format!(
                "ботов ({}) больше, чем мест ({})",
                self.bots.count, t.max_seats
            )));
        }
        if (self.bots.count as usize) > self.bots.names.len() {
            return Err(ConfigError::Invalid("не хватает имён для ботов".into()));
        }
        Ok(())
    }
}
