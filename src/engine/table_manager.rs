// src/engine/table_manager.rs

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::api::dto::ViewerState;
use crate::api::queries::project_for;
use crate::config::EngineConfig;
use crate::domain::hand::Phase;
use crate::domain::{PlayerId, TableId};
use crate::engine::actions::Move;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{Session, TickOutcome};
use crate::infra::{IdGenerator, RngSeed};
use crate::time_ctrl::{Clock, SystemClock};

const LOG_TARGET: &str = "poker_table::engine::table_manager";

/// Ошибки уровня менеджера столов (над сессией одного стола).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManagerError {
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Сессия под замком. Каждая операция держит замок целиком,
/// поэтому два изменения одного стола никогда не перемешиваются.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn tick(&self) -> TickOutcome {
        self.inner.lock().tick()
    }

    pub fn apply_move(&self, player: PlayerId, mv: Move) -> Result<(), EngineError> {
        self.inner.lock().apply_move(player, mv)
    }

    pub fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        self.inner.lock().legal_moves(player)
    }

    pub fn project_for(&self, viewer: Option<PlayerId>) -> ViewerState {
        project_for(&self.inner.lock(), viewer)
    }

    pub fn join(&self, name: &str, is_bot: bool) -> Result<PlayerId, EngineError> {
        self.inner.lock().join(name, is_bot)
    }

    pub fn leave(&self, player: PlayerId) -> Result<(), EngineError> {
        self.inner.lock().leave(player)
    }

    pub fn touch(&self, player: PlayerId) -> Result<(), EngineError> {
        self.inner.lock().touch(player)
    }

    /// Обычный опрос клиента: отметиться, продвинуть стол, получить вид.
    /// Всё под одним замком.
    pub fn poll(&self, viewer: Option<PlayerId>) -> ViewerState {
        let mut session = self.inner.lock();
        if let Some(pid) = viewer {
            // Наблюдатель с устаревшим id просто получает вид без места.
            if let Err(err) = session.touch(pid) {
                debug!(target: LOG_TARGET, player_id = pid, %err, "poll from unknown player");
            }
        }
        session.tick();
        project_for(&session, viewer)
    }

    /// Выполнить произвольное чтение/изменение под замком.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

/// Краткая информация о столе для лобби.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSummary {
    pub id: TableId,
    pub name: String,
    pub players: usize,
    pub max_seats: u8,
    pub phase: Phase,
}

/// Менеджер столов:
/// - хранит сессии по TableId;
/// - выдаёт `SessionHandle`, через которые идёт вся работа со столом;
/// - раздаёт каждому столу свой seed, если задан базовый.
pub struct TableManager {
    sessions: RwLock<HashMap<TableId, SessionHandle>>,
    ids: IdGenerator,
    base_seed: Option<RngSeed>,
    clock: Arc<dyn Clock>,
}

impl TableManager {
    /// Пустой менеджер с системными часами и системным RNG.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ids: IdGenerator::new(),
            base_seed: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Воспроизводимые столы: seed каждого выводится из базового.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(RngSeed::from_u64(seed));
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Создать стол по конфигу (сразу с ботами из конфига).
    pub fn create_table(&self, name: &str, config: &EngineConfig) -> Result<TableId, ManagerError> {
        let id = self.ids.next_table_id();
        let mut session = Session::from_config(id, name, config, self.clock.clone())?;
        if config.seed.is_none() {
            if let Some(base) = &self.base_seed {
                session = session.with_rng(base.derive(id, 0).to_rng());
            }
        }

        self.sessions.write().insert(id, SessionHandle::new(session));
        info!(target: LOG_TARGET, table_id = id, name, "table created");
        Ok(id)
    }

    pub fn get(&self, table_id: TableId) -> Result<SessionHandle, ManagerError> {
        self.sessions
            .read()
            .get(&table_id)
            .cloned()
            .ok_or(ManagerError::TableNotFound(table_id))
    }

    pub fn remove(&self, table_id: TableId) -> Result<(), ManagerError> {
        match self.sessions.write().remove(&table_id) {
            Some(_) => {
                info!(target: LOG_TARGET, table_id, "table removed");
                Ok(())
            }
            None => Err(ManagerError::TableNotFound(table_id)),
        }
    }

    /// Список столов, отсортированный по id.
    pub fn list(&self) -> Vec<TableSummary> {
        let mut summaries: Vec<TableSummary> = self
            .sessions
            .read()
            .values()
            .map(|handle| {
                handle.with_session(|s| {
                    let table = s.table();
                    TableSummary {
                        id: table.id,
                        name: table.name.clone(),
                        players: table.seated_count(),
                        max_seats: table.max_seats(),
                        phase: table.phase,
                    }
                })
            })
            .collect();
        summaries.sort_by_key(|s| s.id);
        summaries
    }

    /// Продвинуть все столы (для симуляций без клиентов).
    pub fn tick_all(&self) -> Vec<(TableId, TickOutcome)> {
        let handles: Vec<(TableId, SessionHandle)> = self
            .sessions
            .read()
            .iter()
            .map(|(id, h)| (*id, h.clone()))
            .collect();
        let mut out: Vec<_> = handles.into_iter().map(|(id, h)| (id, h.tick())).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }
}

impl Default for TableManager {
    fn default() -> Self {
        TableManager::new()
    }
}
