// src/time_ctrl/clock.rs
//! Источник времени и таймер текущего хода.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Источник "текущего момента". Движок никогда не спит -
/// только сравнивает `now()` с дедлайнами.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Реальные часы.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Ручные часы для тестов и симуляций: время идёт только по `advance`.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        ManualClock::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Единственный дедлайн стола: до какого момента ждём хода
/// (или, после раздачи, до какого момента держим паузу).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnClock {
    deadline: Option<Instant>,
}

impl TurnClock {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Завести таймер на `limit` от текущего момента.
    pub fn arm(&mut self, now: Instant, limit: Duration) {
        self.deadline = Some(now + limit);
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Истёк ли дедлайн. Без дедлайна - считаем истёкшим.
    pub fn expired(&self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) => now >= deadline,
            None => true,
        }
    }

    /// Сколько целых секунд осталось, за вычетом `grace`.
    pub fn remaining_secs(&self, now: Instant, grace: Duration) -> u64 {
        match self.deadline {
            Some(deadline) => deadline
                .saturating_duration_since(now)
                .saturating_sub(grace)
                .as_secs(),
            None => 0,
        }
    }
}
