use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::bonus::BonusModifier;

/// Настройки партии. Передаются вызывающим кодом явно, глобального состояния нет.
///
/// `None` у лимитов означает «без ограничения».
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    /// Сколько раундов в партии.
    pub rounds: u32,
    /// Сколько джокеров в колоде.
    pub joker_count: u8,
    /// Курс: сколько очков стоит единица итогового числа.
    pub game_rate: u32,
    /// Максимум очков, который можно получить за один раунд.
    pub score_limit: Option<u64>,
    /// После скольких одинаковых карт подряд курс удваивается.
    pub stack_rate_up: Option<u8>,
    /// После скольких проходов колоды партия заканчивается.
    pub deck_cycle: Option<u32>,
    /// Бонусные правила, действующие в каждом раунде.
    pub modifiers: Vec<BonusModifier>,
}

impl GameSettings {
    pub const ROUNDS_OPTIONS: [u32; 6] = [1, 2, 3, 5, 10, 20];
    pub const JOKER_COUNT_OPTIONS: [u8; 5] = [0, 1, 2, 3, 4];
    pub const GAME_RATE_OPTIONS: [u32; 5] = [1, 5, 10, 50, 100];
    pub const SCORE_LIMIT_OPTIONS: [u64; 4] = [1000, 3000, 5000, 100_000];
    pub const STACK_RATE_UP_OPTIONS: [u8; 2] = [3, 4];
    pub const DECK_CYCLE_OPTIONS: [u32; 6] = [1, 2, 3, 4, 5, 10];

    /// Полная проверка настроек по таблицам допустимых значений.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check("rounds", self.rounds, &Self::ROUNDS_OPTIONS)?;
        check("joker_count", self.joker_count, &Self::JOKER_COUNT_OPTIONS)?;
        check("game_rate", self.game_rate, &Self::GAME_RATE_OPTIONS)?;
        if let Some(limit) = self.score_limit {
            check("score_limit", limit, &Self::SCORE_LIMIT_OPTIONS)?;
        }
        if let Some(n) = self.stack_rate_up {
            check("stack_rate_up", n, &Self::STACK_RATE_UP_OPTIONS)?;
        }
        if let Some(cycles) = self.deck_cycle {
            check("deck_cycle", cycles, &Self::DECK_CYCLE_OPTIONS)?;
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rounds: 10,
            joker_count: 2,
            game_rate: 10,
            score_limit: None,
            stack_rate_up: None,
            deck_cycle: None,
            modifiers: vec![
                BonusModifier::DoublePoints,
                BonusModifier::DiamondThreeThirty,
                BonusModifier::WinLoseInversion,
            ],
        }
    }
}

fn check<T>(name: &'static str, value: T, options: &[T]) -> Result<(), SettingsError>
where
    T: PartialEq + std::fmt::Display,
{
    if options.contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::InvalidSetting {
            name,
            value: value.to_string(),
        })
    }
}

/// Ошибки конфигурации партии.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Недопустимое значение настройки {name}: {value}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("Недопустимое число игроков: {0}")]
    InvalidPlayerCount(usize),
}
