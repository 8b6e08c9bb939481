//! Описание вариантов покера как данных.
//!
//! Движок один на все варианты; отличаются только обязательные ставки,
//! структура лимитов и то, что раздаётся на каждой улице.

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Семейство варианта. Влияет на выбор первого ходящего.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum VariantKind {
    /// Стад: у каждого свои открытые/закрытые карты, борда нет.
    Stud,
    /// Холдем: закрытые карты + общий борд, есть дилерская кнопка.
    HoldEm,
}

/// Обязательные ставки в начале раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ForcedBets {
    /// Малый и большой блайнды (холдем).
    Blinds { small: Chips, big: Chips },
    /// Анте со всех + bring-in от игрока с младшей открытой картой (стад).
    AnteBringIn { ante: Chips, bring_in: Chips },
}

/// Структура ставок.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BetStructure {
    /// Фиксированный лимит: ставка/рейз ровно на `low` до раунда
    /// `high_from_round`, дальше на `high`; не больше `max_raises` рейзов за улицу.
    FixedLimit {
        low: Chips,
        high: Chips,
        high_from_round: u8,
        max_raises: u8,
    },
    /// Без лимита: меню из одинарного и двойного минимального размера + олл-ин.
    NoLimit { min_bet: Chips },
}

/// Что раздаётся перед раундом торговли.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreetDeal {
    pub name: String,
    /// Закрытых карт каждому игроку.
    pub down: u8,
    /// Открытых карт каждому игроку.
    pub up: u8,
    /// Общих карт на борд.
    pub board: u8,
}

impl StreetDeal {
    pub fn new(name: &str, down: u8, up: u8, board: u8) -> Self {
        Self {
            name: name.to_string(),
            down,
            up,
            board,
        }
    }
}

/// Полная конфигурация варианта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantConfig {
    pub kind: VariantKind,
    pub forced: ForcedBets,
    pub structure: BetStructure,
    /// По одной записи на раунд торговли. Раунды нумеруются с 1.
    pub streets: Vec<StreetDeal>,
}

impl VariantConfig {
    /// Пятикарточный стад: анте 1, bring-in 2, лимит 5/10, до 3 рейзов.
    pub fn five_card_stud() -> Self {
        Self {
            kind: VariantKind::Stud,
            forced: ForcedBets::AnteBringIn {
                ante: Chips(1),
                bring_in: Chips(2),
            },
            structure: BetStructure::FixedLimit {
                low: Chips(5),
                high: Chips(10),
                high_from_round: 3,
                max_raises: 3,
            },
            streets: vec![
                StreetDeal::new("Second street", 1, 1, 0),
                StreetDeal::new("Third street", 0, 1, 0),
                StreetDeal::new("Fourth street", 0, 1, 0),
                StreetDeal::new("Fifth street", 0, 1, 0),
            ],
        }
    }

    /// Техасский холдем: блайнды 5/10.
    pub fn texas_holdem() -> Self {
        Self {
            kind: VariantKind::HoldEm,
            forced: ForcedBets::Blinds {
                small: Chips(5),
                big: Chips(10),
            },
            structure: BetStructure::NoLimit { min_bet: Chips(10) },
            streets: vec![
                StreetDeal::new("Pre-flop", 2, 0, 0),
                StreetDeal::new("Flop", 0, 0, 3),
                StreetDeal::new("Turn", 0, 0, 1),
                StreetDeal::new("River", 0, 0, 1),
            ],
        }
    }

    /// Количество раундов торговли.
    pub fn final_round(&self) -> u8 {
        self.streets.len() as u8
    }

    /// Раздача для раунда `round` (1-based).
    pub fn street(&self, round: u8) -> Option<&StreetDeal> {
        (round as usize)
            .checked_sub(1)
            .and_then(|idx| self.streets.get(idx))
    }

    /// Название улицы для клиентов.
    pub fn street_name(&self, round: u8) -> &str {
        match self.street(round) {
            Some(s) => &s.name,
            None if round == 0 => "",
            None => "Showdown",
        }
    }

    /// Минимальный стек, с которым место может сесть в раздачу.
    pub fn min_purse_to_play(&self) -> Chips {
        match self.forced {
            ForcedBets::Blinds { big, .. } => big,
            ForcedBets::AnteBringIn { ante, bring_in } => ante + bring_in,
        }
    }

    /// Размер ставки/шага рейза в этом раунде.
    pub fn bet_unit(&self, round: u8) -> Chips {
        match self.structure {
            BetStructure::FixedLimit {
                low,
                high,
                high_from_round,
                ..
            } => {
                if round >= high_from_round {
                    high
                } else {
                    low
                }
            }
            BetStructure::NoLimit { min_bet } => min_bet,
        }
    }

    pub fn bring_in(&self) -> Option<Chips> {
        match self.forced {
            ForcedBets::AnteBringIn { bring_in, .. } => Some(bring_in),
            ForcedBets::Blinds { .. } => None,
        }
    }

    pub fn max_raises(&self) -> Option<u8> {
        match self.structure {
            BetStructure::FixedLimit { max_raises, .. } => Some(max_raises),
            BetStructure::NoLimit { .. } => None,
        }
    }
}

impl Default for VariantConfig {
    fn default() -> Self {
        VariantConfig::texas_holdem()
    }
}
