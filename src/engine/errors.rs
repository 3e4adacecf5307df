use crate::domain::{PlayerId, RoundId};

use thiserror::Error;

/// Ошибки движка дотенко.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Пустая рука у игрока {0}")]
    InvalidHand(PlayerId),

    #[error("Поле не задано для этого объявления")]
    InvalidField,

    #[error("Для revenge не передано целевое число")]
    MissingTarget,

    #[error("Курс должен быть положительным")]
    InvalidRate,

    #[error("Объявление не прошло: цель {target}, лучшая сумма руки {best}")]
    InvalidDeclaration { target: i32, best: i32 },

    #[error("Недопустимый состав игроков: {0} (нужно 2–4 разных игрока)")]
    InvalidPlayerCount(usize),

    #[error("Игрок {0} не участвует в раунде")]
    UnknownPlayer(PlayerId),

    #[error("Сейчас не ход игрока с id={0}")]
    NotPlayersTurn(PlayerId),

    #[error("Недопустимое действие в текущей фазе раунда")]
    IllegalAction,

    #[error("Эти карты нельзя выложить на текущее поле")]
    IllegalPlay,

    #[error("У игрока {0} нет этих карт")]
    CardsNotInHand(PlayerId),

    #[error("В колоде не хватает карт для раздачи")]
    DeckExhausted,

    #[error("Раунд {0} уже завершён")]
    RoundAlreadyFinished(RoundId),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    /// Структурные ошибки - признак бага в снапшоте у вызывающего кода.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidHand(_)
                | EngineError::InvalidField
                | EngineError::MissingTarget
                | EngineError::InvalidRate
        )
    }
}
