use serde::{Deserialize, Serialize};

use crate::domain::settings::SettingsError;
use crate::domain::MatchId;
use crate::engine::{EngineError, ManagerError};

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Партия не найдена.
    MatchNotFound(MatchId),

    /// Настройки партии вне допустимых значений.
    InvalidSettings(String),

    /// Команда не может быть выполнена в текущем состоянии.
    InvalidCommand(String),

    /// Ошибка движка (объявление, ход).
    EngineError(String),

    /// Внутренняя ошибка сервера.
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Internal(msg) => ApiError::Internal(msg.to_string()),
            other => ApiError::EngineError(other.to_string()),
        }
    }
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        ApiError::InvalidSettings(err.to_string())
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::MatchNotFound(id) => ApiError::MatchNotFound(id),
            ManagerError::Settings(e) => e.into(),
            ManagerError::Engine(e) => e.into(),
            other @ (ManagerError::NoActiveRound(_)
            | ManagerError::RoundInProgress(_)
            | ManagerError::MatchFinished(_)) => ApiError::InvalidCommand(other.to_string()),
        }
    }
}
