// src/engine/match_manager.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::deck::Deck;
use crate::domain::hand::RoundSummary;
use crate::domain::points::Points;
use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::settings::{GameSettings, SettingsError};
use crate::domain::{MatchId, PlayerId, RoundId};
use crate::engine::game_loop::{self, RoundEngine, RoundStatus};
use crate::engine::{EngineError, PlayerAction, RandomSource};

/// Ошибки уровня менеджера партий (над движком одного раунда).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManagerError {
    #[error("Партия {0} не найдена")]
    MatchNotFound(MatchId),

    #[error("В партии {0} нет активного раунда")]
    NoActiveRound(MatchId),

    #[error("В партии {0} раунд ещё идёт")]
    RoundInProgress(MatchId),

    #[error("Партия {0} уже завершена")]
    MatchFinished(MatchId),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Проброшенная ошибка из движка раунда.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Статус партии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchStatus {
    /// Партия создана, раунды ещё не начинались.
    Waiting,
    Playing,
    Finished,
}

/// Одна партия: настройки, игроки, накопленные очки и текущий раунд.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub id: MatchId,
    pub settings: GameSettings,
    /// Порядок мест. Первый ходящий сдвигается каждый раунд.
    pub players: Vec<PlayerId>,
    pub scores: BTreeMap<PlayerId, Points>,
    pub rounds_played: u32,
    /// Проходы колоды, накопленные за всю партию.
    pub deck_cycles: u32,
    pub status: MatchStatus,
    /// Активный (или только что завершённый) раунд.
    pub round: Option<RoundEngine>,
    pub results: Vec<RoundSummary>,
}

impl Match {
    /// Создать партию с проверкой настроек и состава.
    pub fn new(
        id: MatchId,
        settings: GameSettings,
        players: Vec<PlayerId>,
    ) -> Result<Self, ManagerError> {
        settings.validate()?;

        let mut unique = players.clone();
        unique.sort_unstable();
        unique.dedup();
        if unique.len() != players.len() || !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(SettingsError::InvalidPlayerCount(players.len()).into());
        }

        let scores = players.iter().map(|&p| (p, Points::ZERO)).collect();
        Ok(Self {
            id,
            settings,
            players,
            scores,
            rounds_played: 0,
            deck_cycles: 0,
            status: MatchStatus::Waiting,
            round: None,
            results: Vec::new(),
        })
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn score_of(&self, player_id: PlayerId) -> Points {
        self.scores.get(&player_id).copied().unwrap_or(Points::ZERO)
    }

    /// Идёт ли сейчас раунд (не завершённый).
    pub fn has_active_round(&self) -> bool {
        self.round.as_ref().is_some_and(|r| !r.is_finished())
    }

    /// Порядок хода в следующем раунде: первый игрок сдвигается по кругу.
    fn seating_for_next_round(&self) -> Vec<PlayerId> {
        let shift = self.rounds_played as usize % self.players.len();
        let mut order = self.players.clone();
        order.rotate_left(shift);
        order
    }

    /// Сколько проходов колоды осталось до конца партии.
    fn remaining_deck_cycles(&self) -> Option<u32> {
        self.settings
            .deck_cycle
            .map(|limit| limit.saturating_sub(self.deck_cycles))
    }

    fn begin_round(&mut self, mut engine: RoundEngine) {
        engine.deck_cycle_limit = self.remaining_deck_cycles();
        self.round = Some(engine);
        self.status = MatchStatus::Playing;
    }

    /// Зафиксировать итог раунда: либо все изменения очков, либо ни одного.
    /// Раунд без победителя очки не меняет, но считается сыгранным.
    fn commit(&mut self, summary: &RoundSummary) -> Result<(), ManagerError> {
        let mut next = self.scores.clone();
        let deltas = summary.outcome.iter().flat_map(|o| o.point_delta.iter());
        for (pid, delta) in deltas {
            let score = next
                .get_mut(pid)
                .ok_or(EngineError::UnknownPlayer(*pid))?;
            *score += *delta;
        }
        self.scores = next;
        self.rounds_played += 1;
        self.deck_cycles += summary.deck_cycles;
        self.results.push(summary.clone());

        let cycles_exhausted = self.remaining_deck_cycles() == Some(0);
        if self.rounds_played >= self.settings.rounds || cycles_exhausted {
            self.status = MatchStatus::Finished;
            info!(
                match_id = self.id,
                rounds_played = self.rounds_played,
                deck_cycles = self.deck_cycles,
                "Match finished"
            );
        }
        Ok(())
    }
}

/// Менеджер партий:
/// - хранит несколько партий по MatchId;
/// - для каждой партии может быть активный RoundEngine (текущий раунд);
/// - даёт методы start_next_round/apply_action поверх game_loop.
#[derive(Debug, Default)]
pub struct MatchManager {
    matches: BTreeMap<MatchId, Match>,
}

impl MatchManager {
    /// Создать пустой менеджер.
    pub fn new() -> Self {
        Self::default()
    }

    /// Создать партию под переданным id. Если такая уже была - заменяем.
    pub fn create_match(
        &mut self,
        id: MatchId,
        settings: GameSettings,
        players: Vec<PlayerId>,
    ) -> Result<(), ManagerError> {
        let m = Match::new(id, settings, players)?;
        self.matches.insert(id, m);
        Ok(())
    }

    pub fn has_match(&self, id: MatchId) -> bool {
        self.matches.contains_key(&id)
    }

    /// Получить партию (read-only).
    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(&id)
    }

    pub fn match_ids(&self) -> Vec<MatchId> {
        self.matches.keys().copied().collect()
    }

    /// Получить RoundEngine (read-only) для партии.
    pub fn round(&self, id: MatchId) -> Option<&RoundEngine> {
        self.matches.get(&id).and_then(|m| m.round.as_ref())
    }

    /// Запустить следующий раунд.
    ///
    /// round_id генерируется снаружи (IdGenerator), менеджер только хранит RoundEngine.
    pub fn start_next_round<R: RandomSource>(
        &mut self,
        id: MatchId,
        rng: &mut R,
        round_id: RoundId,
    ) -> Result<(), ManagerError> {
        let m = self.ready_for_round(id)?;
        let order = m.seating_for_next_round();
        let engine = game_loop::start_round(&order, &m.settings, rng, round_id)?;
        m.begin_round(engine);
        Ok(())
    }

    /// Следующий раунд по заранее разложенной колоде (реплей).
    pub fn start_next_round_with_deck(
        &mut self,
        id: MatchId,
        deck: Deck,
        round_id: RoundId,
    ) -> Result<(), ManagerError> {
        let m = self.ready_for_round(id)?;
        let order = m.seating_for_next_round();
        let engine = game_loop::start_round_with_deck(&order, &m.settings, deck, round_id)?;
        m.begin_round(engine);
        Ok(())
    }

    fn ready_for_round(&mut self, id: MatchId) -> Result<&mut Match, ManagerError> {
        let m = self
            .matches
            .get_mut(&id)
            .ok_or(ManagerError::MatchNotFound(id))?;
        if m.is_finished() {
            return Err(ManagerError::MatchFinished(id));
        }
        if m.has_active_round() {
            return Err(ManagerError::RoundInProgress(id));
        }
        Ok(m)
    }

    /// Применить действие игрока в текущем раунде партии.
    ///
    /// Если раунд завершился, очки коммитятся в партию атомарно.
    pub fn apply_action<R: RandomSource>(
        &mut self,
        id: MatchId,
        action: PlayerAction,
        rng: &mut R,
    ) -> Result<RoundStatus, ManagerError> {
        let m = self
            .matches
            .get_mut(&id)
            .ok_or(ManagerError::MatchNotFound(id))?;
        let engine = m
            .round
            .as_mut()
            .filter(|r| !r.is_finished())
            .ok_or(ManagerError::NoActiveRound(id))?;

        let status = match game_loop::apply_action(engine, action, rng) {
            Ok(status) => status,
            Err(err) => {
                if err.is_structural() {
                    warn!(match_id = id, error = %err, "Round snapshot rejected");
                }
                return Err(err.into());
            }
        };

        if let RoundStatus::Finished(summary, _) = &status {
            m.commit(summary)?;
        }
        Ok(status)
    }

    /// Закрыть окно объявлений текущего раунда (таймер вызывающего кода).
    pub fn close_declaration_window(&mut self, id: MatchId) -> Result<RoundStatus, ManagerError> {
        let m = self
            .matches
            .get_mut(&id)
            .ok_or(ManagerError::MatchNotFound(id))?;
        let engine = m
            .round
            .as_mut()
            .filter(|r| !r.is_finished())
            .ok_or(ManagerError::NoActiveRound(id))?;
        Ok(game_loop::close_declaration_window(engine)?)
    }

    /// Таблица очков, от лидера к последнему.
    pub fn standings(&self, id: MatchId) -> Result<Vec<(PlayerId, Points)>, ManagerError> {
        let m = self.get(id).ok_or(ManagerError::MatchNotFound(id))?;
        let mut rows: Vec<(PlayerId, Points)> = m.scores.iter().map(|(&p, &s)| (p, s)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        Ok(rows)
    }
}
