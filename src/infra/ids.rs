use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{MatchId, PlayerId, RoundId};

/// Монотонные счётчики для ID партий, раундов и игроков.
///
/// В контракте ID обычно приходят снаружи (клиент передаёт match_id),
/// а раунды нумеруются здесь, сквозной нумерацией по всем партиям.
#[derive(Debug)]
pub struct IdGenerator {
    match_counter: AtomicU64,
    round_counter: AtomicU64,
    player_counter: AtomicU64,
}

impl IdGenerator {
    /// Все счётчики начинаются с 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            match_counter: AtomicU64::new(first),
            round_counter: AtomicU64::new(first),
            player_counter: AtomicU64::new(first),
        }
    }

    #[inline]
    pub fn next_match_id(&self) -> MatchId {
        self.match_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_round_id(&self) -> RoundId {
        self.round_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        self.player_counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Сдвинуть счётчик партий, если id выдан снаружи.
    /// Следующий `next_match_id` не вернёт уже занятый id.
    pub fn observe_match_id(&self, id: MatchId) {
        self.match_counter.fetch_max(id.saturating_add(1), Ordering::Relaxed);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
