//! Модуль оценки силы покерных рук (холдем и стад).
//!
//! Движок видит только трейт `HandEvaluator`; стандартная реализация -
//! `StandardEvaluator` (лучшая пятёрка из 5–7 карт, частичные руки из 1–4).

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate_best_hand, evaluate_cards, HandEvaluator, StandardEvaluator};
pub use hand_rank::{describe_hand, describe_hand_detailed, hand_category, HandCategory};
