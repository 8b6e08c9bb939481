// src/time_ctrl/mod.rs
//! Контроль времени: правила, источник времени, дедлайн текущего хода.
//!
//! Фонового таймера нет. Каждый `tick` сравнивает `Clock::now()`
//! с дедлайном из `TurnClock` и решает, пора ли делать ход за игрока.

pub mod clock;
pub mod time_rules;

pub use clock::{Clock, ManualClock, SystemClock, TurnClock};
pub use time_rules::TimeRules;
