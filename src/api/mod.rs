//! Внешний API движка дотенко.
//!
//! Здесь описываются:
//! - команды (commands.rs) - всё, что меняет состояние (создать партию, начать раунд, ход игрока);
//! - запросы (queries.rs) - только чтение;
//! - DTO (dto.rs) - удобные структуры для фронта;
//! - ошибки (errors.rs) - то, что видит клиент;
//! - service.rs - диспетчер команд и запросов поверх `MatchManager`.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;
pub mod service;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
pub use service::DotenkoService;
