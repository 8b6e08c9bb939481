//! Решения за ботов.
//!
//! Политика получает только то, что бот и так видит (свои карты, борд, ставки),
//! и список допустимых ходов. Случайность - только через `RandomSource`,
//! поэтому с фейковым RNG решения полностью воспроизводимы.

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};
use crate::domain::chips::Chips;
use crate::domain::hand::HandRank;
use crate::engine::actions::Move;
use crate::engine::RandomSource;
use crate::eval::HandCategory;

/// Что видит бот в момент решения.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecisionContext {
    /// Номер улицы (1-based).
    pub round: u8,
    pub current_bet: Chips,
    pub to_call: Chips,
    pub purse: Chips,
    /// Собственные карты бота (и закрытые, и открытые).
    pub cards: Vec<Card>,
    pub board: Vec<Card>,
    /// Сила `cards + board` по оценщику стола.
    pub strength: HandRank,
}

/// Подключаемая политика бота. Обязана вернуть один из `legal`.
pub trait AutomatedPolicy: Send {
    fn decide(&self, ctx: &DecisionContext, legal: &[Move], rng: &mut dyn RandomSource) -> Move;
}

/// Настройки базовой политики.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PolicyTuning {
    /// Выше этой текущей ставки бот больше не повышает.
    pub raise_cap: Chips,
    /// С парой бот сбрасывает с шансом 1 из N.
    pub pair_fold_one_in: u32,
    /// Сколько первых улиц бот играет "спекулятивно" со слабой рукой.
    pub speculative_rounds: u8,
    /// Шанс (в процентах) продолжить спекулятивную руку.
    pub speculative_continue_pct: u32,
    /// Шанс (в процентах) повысить со спекулятивной рукой.
    pub speculative_raise_pct: u32,
}

impl Default for PolicyTuning {
    fn default() -> Self {
        Self {
            raise_cap: Chips(20),
            pair_fold_one_in: 20,
            speculative_rounds: 2,
            speculative_continue_pct: 66,
            speculative_raise_pct: 33,
        }
    }
}

/// Базовый бот:
/// - никогда не сбрасывает, если можно чекнуть;
/// - сет и сильнее – повышает, пока ставка ниже кэпа;
/// - две пары – всегда продолжает, пара – почти всегда;
/// - слабая, но перспективная рука на ранних улицах – иногда продолжает;
/// - иначе чек/фолд.
#[derive(Clone, Debug, Default)]
pub struct BaselinePolicy {
    pub tuning: PolicyTuning,
}

impl BaselinePolicy {
    pub fn new(tuning: PolicyTuning) -> Self {
        Self { tuning }
    }
}

impl AutomatedPolicy for BaselinePolicy {
    fn decide(&self, ctx: &DecisionContext, legal: &[Move], rng: &mut dyn RandomSource) -> Move {
        let t = &self.tuning;
        let fallback = passive_move(legal);
        let keep_going = continue_move(legal).unwrap_or(fallback);
        let below_cap = ctx.current_bet < t.raise_cap;
        let category = ctx.strength.category();

        if category >= HandCategory::ThreeOfAKind {
            return match aggressive_move(legal) {
                Some(mv) if below_cap => mv,
                _ => keep_going,
            };
        }
        if category >= HandCategory::TwoPair {
            return keep_going;
        }
        if category == HandCategory::OnePair && rng.below(t.pair_fold_one_in) != 0 {
            return keep_going;
        }

        if ctx.round <= t.speculative_rounds
            && is_speculative(&ctx.cards)
            && roll(rng, t.speculative_continue_pct)
        {
            if below_cap && roll(rng, t.speculative_raise_pct) {
                if let Some(mv) = aggressive_move(legal) {
                    return mv;
                }
            }
            return keep_going;
        }

        fallback
    }
}

fn roll(rng: &mut dyn RandomSource, pct: u32) -> bool {
    rng.below(100) < pct
}

/// Пассивный ход: чек, иначе фолд, иначе первый допустимый (bring-in).
pub fn passive_move(legal: &[Move]) -> Move {
    legal
        .iter()
        .find(|m| matches!(m, Move::Check))
        .or_else(|| legal.iter().find(|m| matches!(m, Move::Fold)))
        .or_else(|| legal.first())
        .copied()
        .unwrap_or(Move::Fold)
}

/// Продолжить без агрессии: чек, колл или обязательная ставка.
fn continue_move(legal: &[Move]) -> Option<Move> {
    legal
        .iter()
        .find(|m| matches!(m, Move::Check))
        .or_else(|| {
            legal
                .iter()
                .find(|m| matches!(m, Move::Call(_) | Move::PostForced(_)))
        })
        .copied()
}

/// Самый маленький бет/рейз из меню.
fn aggressive_move(legal: &[Move]) -> Option<Move> {
    legal.iter().find(|m| m.is_aggressive()).copied()
}

/// Есть ли у слабой руки перспектива: больше двух карт, пара,
/// связанные карты или старшая карта от десятки.
fn is_speculative(cards: &[Card]) -> bool {
    if cards.len() > 2 {
        return true;
    }
    match cards {
        [a, b] => {
            let gap = (a.rank.value() as i8 - b.rank.value() as i8).abs();
            gap < 3 || a.rank >= Rank::Ten || b.rank >= Rank::Ten
        }
        [a] => a.rank >= Rank::Ten,
        _ => false,
    }
}
