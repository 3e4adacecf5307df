use crate::api::dto::{MatchViewDto, PlayerHandDto, PlayerScoreDto, RoundViewDto};
use crate::domain::PlayerId;
use crate::engine::{Match, RoundEngine};

/// Утилита: получить отображаемое имя игрока.
///
/// Имена живут вне движка (лобби, профиль), поэтому сигнатура открыта
/// для разных реализаций.
pub trait PlayerNameResolver {
    fn resolve_name(&self, player_id: PlayerId) -> String;
}

/// Простая реализация: отображаемое имя = "Player {id}".
pub struct DefaultNameResolver;

impl PlayerNameResolver for DefaultNameResolver {
    fn resolve_name(&self, player_id: PlayerId) -> String {
        format!("Player {}", player_id)
    }
}

/// Match -> MatchViewDto. Карты в руках видны только тем, для кого `is_hero` = true.
pub fn map_match_to_dto(
    m: &Match,
    name_resolver: &impl PlayerNameResolver,
    is_hero: impl Fn(PlayerId) -> bool,
) -> MatchViewDto {
    let players = m
        .players
        .iter()
        .enumerate()
        .map(|(idx, &pid)| PlayerScoreDto {
            player_id: pid,
            display_name: name_resolver.resolve_name(pid),
            seat_index: u8::try_from(idx).unwrap_or(u8::MAX),
            score: m.score_of(pid),
        })
        .collect();

    MatchViewDto {
        match_id: m.id,
        status: m.status,
        rounds_played: m.rounds_played,
        rounds_total: m.settings.rounds,
        deck_cycles: m.deck_cycles,
        players,
        round_in_progress: m.has_active_round(),
        round: m.round.as_ref().map(|r| map_round_to_dto(r, &is_hero)),
        last_result: m.results.last().cloned(),
    }
}

/// RoundEngine -> RoundViewDto.
pub fn map_round_to_dto(engine: &RoundEngine, is_hero: impl Fn(PlayerId) -> bool) -> RoundViewDto {
    let hands = engine
        .players
        .iter()
        .filter_map(|&pid| engine.hand(pid).map(|h| (pid, h)))
        .map(|(pid, hand)| PlayerHandDto {
            player_id: pid,
            card_count: u8::try_from(hand.len()).unwrap_or(u8::MAX),
            cards: if is_hero(pid) {
                Some(hand.cards.clone())
            } else {
                None
            },
        })
        .collect();

    RoundViewDto {
        round_id: engine.round_id,
        phase: engine.phase,
        current_player: engine.current_player(),
        field: engine.field.cards.clone(),
        field_total: engine.field.current_total(),
        initial_value: engine.field.initial_value,
        rate: engine.rate,
        deck_remaining: u32::try_from(engine.deck.len()).unwrap_or(u32::MAX),
        deck_cycles: engine.deck_cycles,
        hands,
    }
}

/// Таблица очков в виде DTO, от лидера к последнему.
pub fn map_standings(m: &Match, name_resolver: &impl PlayerNameResolver) -> Vec<PlayerScoreDto> {
    let mut rows: Vec<PlayerScoreDto> = map_match_to_dto(m, name_resolver, |_| false).players;
    rows.sort_by(|a, b| b.score.cmp(&a.score).then(a.player_id.cmp(&b.player_id)));
    rows
}
