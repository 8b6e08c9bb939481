//! Серверный движок пошагового покера (стад и холдем) с опросом клиентов.
//!
//! Один стол - одна `Session`. Стол двигается только вызовами
//! `tick` / `apply_move`; клиенты видят его через `api::project_for`.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod time_ctrl;

pub use api::{project_for, ViewerState};
pub use config::{ConfigError, EngineConfig};
pub use engine::{EngineError, Move, Session, SessionHandle, TableManager, TickOutcome};
