//! Внешний API стола: то, что уходит клиентам.
//!
//! - DTO (dto.rs) - вид стола для конкретного зрителя;
//! - запросы (queries.rs) - только чтение, проекция `Session` в DTO.

pub mod dto;
pub mod queries;

pub use dto::*;
pub use queries::*;
