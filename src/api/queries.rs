use serde::{Deserialize, Serialize};

use crate::domain::{MatchId, PlayerId};

use super::dto::{MatchViewDto, PlayerScoreDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Состояние партии. `viewer` видит свои карты, остальные скрыты.
    GetMatch {
        match_id: MatchId,
        #[serde(default)]
        viewer: Option<PlayerId>,
    },

    /// Список партий (для лобби).
    ListMatches,

    /// Таблица очков, от лидера к последнему.
    GetStandings { match_id: MatchId },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Match(MatchViewDto),
    Matches(Vec<MatchViewDto>),
    Standings(Vec<PlayerScoreDto>),
}
