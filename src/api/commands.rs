use serde::{Deserialize, Serialize};

use crate::domain::bonus::BonusModifier;
use crate::domain::field::FieldState;
use crate::domain::hand::{Declaration, Hand};
use crate::domain::settings::GameSettings;
use crate::domain::{MatchId, PlayerId};
use crate::engine::actions::PlayerAction;

use super::errors::ApiError;

/// Команда верхнего уровня.
///
/// Эти команды превращаются в операции (`DotenkoOperation`),
/// которые Linera экспонирует наружу.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Создать новую партию.
    CreateMatch(CreateMatchCommand),

    /// Начать следующий раунд партии.
    StartRound { match_id: MatchId },

    /// Действие игрока в текущем раунде.
    PlayerAction(PlayerActionCommand),

    /// Таймер окна объявлений истёк.
    CloseWindow { match_id: MatchId },

    /// Проверить объявление по готовому снапшоту стола, без партии.
    EvaluateDeclaration(EvaluateDeclarationCommand),
}

/// Команда создания партии.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateMatchCommand {
    /// Если не задан, id выдаёт `IdGenerator`.
    #[serde(default)]
    pub match_id: Option<MatchId>,
    #[serde(default)]
    pub settings: GameSettings,
    /// Порядок мест, 2–4 игрока.
    pub players: Vec<PlayerId>,
}

/// Действие игрока в раунде.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerActionCommand {
    pub match_id: MatchId,
    pub action: PlayerAction,
}

/// Снапшот стола для чистой проверки объявления.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvaluateDeclarationCommand {
    pub field: FieldState,
    pub hand: Hand,
    pub declaration: Declaration,
    #[serde(default)]
    pub modifiers: Vec<BonusModifier>,
    pub rate: u32,
}

/// Разобрать команду из JSON.
pub fn parse_command(json: &str) -> Result<Command, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::BadRequest(e.to_string()))
}
