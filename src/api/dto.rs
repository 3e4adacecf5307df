use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::hand::{RoundOutcome, RoundSummary};
use crate::domain::points::Points;
use crate::domain::{MatchId, PlayerId, RoundId};
use crate::engine::{MatchStatus, RoundPhase, RoundStatus};

/// Очки игрока в партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerScoreDto {
    pub player_id: PlayerId,
    pub display_name: String,
    pub seat_index: u8,
    pub score: Points,
}

/// Рука игрока в раунде. Карты видны только "герою".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandDto {
    pub player_id: PlayerId,
    pub card_count: u8,
    pub cards: Option<Vec<Card>>,
}

/// DTO текущего раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundViewDto {
    pub round_id: RoundId,
    pub phase: RoundPhase,
    pub current_player: PlayerId,
    pub field: Vec<Card>,
    /// Сумма карт на поле (джокер на поле = 0).
    pub field_total: Option<i32>,
    /// Значение стартовой карты (для shotenko).
    pub initial_value: Option<i32>,
    pub rate: u32,
    pub deck_remaining: u32,
    pub deck_cycles: u32,
    pub hands: Vec<PlayerHandDto>,
}

/// DTO партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchViewDto {
    pub match_id: MatchId,
    pub status: MatchStatus,
    pub rounds_played: u32,
    pub rounds_total: u32,
    pub deck_cycles: u32,
    pub players: Vec<PlayerScoreDto>,
    /// Есть ли незавершённый раунд.
    pub round_in_progress: bool,
    pub round: Option<RoundViewDto>,
    /// Итог последнего сыгранного раунда.
    pub last_result: Option<RoundSummary>,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,
    MatchCreated { match_id: MatchId },
    RoundStarted { match_id: MatchId, round_id: RoundId },
    /// Статус раунда после действия или закрытия окна.
    Round(RoundStatus),
    /// Результат чистой проверки объявления.
    Outcome(RoundOutcome),
}
