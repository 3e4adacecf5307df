//! Движок дотенко на Linera.
//!
//! Здесь описываем ABI (Operation / Message / Query / Response).
//! Вся игровая логика живёт в `domain` / `eval` / `engine`, хранения состояния нет.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

use crate::api::{Command, Query, QueryResponse};

/// Операции (внешние команды), которые модуль принимает.
///
/// Одна операция = одна команда из api::Command.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DotenkoOperation {
    Command(Command),
}

/// Сообщения между приложениями Linera. Пока не нужны.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DotenkoMessage {}

/// Запросы к сервису (read-only).
pub type DotenkoQuery = Query;

/// Ответы на запросы.
pub type DotenkoResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct DotenkoAbi;

impl ContractAbi for DotenkoAbi {
    type Operation = DotenkoOperation;
    type Response = ();
}

impl ServiceAbi for DotenkoAbi {
    type Query = DotenkoQuery;
    type QueryResponse = DotenkoResponse;
}
