use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::bonus::BonusModifier;
use crate::domain::card::{Card, Rank};
use crate::domain::deck::Deck;
use crate::domain::field::FieldState;
use crate::domain::hand::{Declaration, DotenkoKind, Hand, RoundOutcome, RoundSummary};
use crate::domain::rules::{INITIAL_HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS, UPRATE_MULTIPLIER};
use crate::domain::settings::GameSettings;
use crate::domain::{PlayerId, RoundId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::history::{RoundEventKind, RoundHistory};
use crate::engine::resolver::evaluate_declaration;
use crate::engine::scoring::apply_score_limit;
use crate::engine::validation::{validate_play, PlayKind};
use crate::engine::RandomSource;

/// Фаза раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundPhase {
    /// Текущий игрок должен выложить карты или взять из колоды.
    AwaitingPlay,
    /// На поле новые карты: любой игрок может объявить.
    AwaitingDeclarationWindow,
    /// Раунд закончен: объявление прошло или тянуть больше нечего.
    Resolved,
}

/// Статус раунда для внешнего кода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RoundStatus {
    Ongoing(RoundPhase),
    /// Объявление не прошло; окно объявлений остаётся открытым.
    DeclarationFailed(RoundOutcome),
    /// Окно закрыто без победителя, ход перешёл к следующему игроку.
    Passed,
    Finished(RoundSummary, RoundHistory),
}

/// Подряд идущие одинаковые карты на поле (для повышения курса).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
struct StackRun {
    rank: Option<Rank>,
    count: u32,
}

/// Внутреннее состояние раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundEngine {
    pub round_id: RoundId,
    /// Порядок хода.
    pub players: Vec<PlayerId>,
    pub hands: BTreeMap<PlayerId, Hand>,
    pub deck: Deck,
    /// Снятые с поля карты.
    pub discard: Vec<Card>,
    pub field: FieldState,
    pub phase: RoundPhase,
    /// Индекс в `players` того, кто ходит следующим.
    pub current_turn: usize,
    /// Текущий курс раунда (с учётом повышений).
    pub rate: u32,
    pub modifiers: Vec<BonusModifier>,
    pub score_limit: Option<u64>,
    pub stack_rate_up: Option<u8>,
    /// Сколько раз сброс возвращался в колоду.
    pub deck_cycles: u32,
    /// Сколько раз колоду ещё можно пополнить сбросом (`None` - без лимита).
    pub deck_cycle_limit: Option<u32>,
    /// История раунда.
    pub history: RoundHistory,
    stack_run: StackRun,
    has_drawn: bool,
    window_passes: BTreeSet<PlayerId>,
    outcome: Option<RoundOutcome>,
}

impl RoundEngine {
    pub fn current_player(&self) -> PlayerId {
        self.players[self.current_turn % self.players.len()]
    }

    pub fn hand(&self, player_id: PlayerId) -> Option<&Hand> {
        self.hands.get(&player_id)
    }

    pub fn is_finished(&self) -> bool {
        self.phase == RoundPhase::Resolved
    }

    /// Итог раунда (есть только после успешного объявления).
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    /// Кто сейчас может объявлять: все, кроме владельцев карт на поле.
    /// Если поле принадлежит всем (стартовая карта), объявлять могут все.
    fn eligible_declarers(&self) -> Vec<PlayerId> {
        let others: Vec<PlayerId> = self
            .players
            .iter()
            .copied()
            .filter(|p| !self.field.played_by.contains(p))
            .collect();
        if others.is_empty() {
            self.players.clone()
        } else {
            others
        }
    }
}

/// Старт нового раунда:
/// - тасует колоду с нужным числом джокеров;
/// - раздаёт по 2 карты;
/// - открывает стартовую карту поля и фиксирует начальное значение;
/// - сразу открывает окно объявлений (shotenko возможен с первой секунды).
pub fn start_round<R: RandomSource>(
    players: &[PlayerId],
    settings: &GameSettings,
    rng: &mut R,
    round_id: RoundId,
) -> Result<RoundEngine, EngineError> {
    let mut deck = Deck::with_jokers(settings.joker_count);
    rng.shuffle(&mut deck.cards);
    start_round_with_deck(players, settings, deck, round_id)
}

/// То же, что `start_round`, но с уже подготовленной колодой (карты берутся с конца).
/// Удобно для реплеев и тестов.
pub fn start_round_with_deck(
    players: &[PlayerId],
    settings: &GameSettings,
    mut deck: Deck,
    round_id: RoundId,
) -> Result<RoundEngine, EngineError> {
    let unique: BTreeSet<PlayerId> = players.iter().copied().collect();
    if unique.len() != players.len() || !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(EngineError::InvalidPlayerCount(players.len()));
    }

    let mut history = RoundHistory::new();
    history.push(RoundEventKind::RoundStarted {
        round_id,
        players: players.to_vec(),
    });

    // Раздаём по кругу, по одной карте.
    let mut hands: BTreeMap<PlayerId, Hand> =
        players.iter().map(|&p| (p, Hand::new())).collect();
    for _ in 0..INITIAL_HAND_SIZE {
        for pid in players {
            let card = deck.draw_one().ok_or(EngineError::DeckExhausted)?;
            if let Some(hand) = hands.get_mut(pid) {
                hand.push(card);
            }
        }
    }
    for (&player_id, hand) in &hands {
        history.push(RoundEventKind::CardsDealt {
            player_id,
            cards: hand.cards.clone(),
        });
    }

    let opening = deck.draw_one().ok_or(EngineError::DeckExhausted)?;
    let field = FieldState::opening(vec![opening], players.to_vec());
    let initial_value = field
        .initial_value
        .ok_or(EngineError::Internal("opening field without initial value"))?;
    history.push(RoundEventKind::FieldOpened {
        cards: field.cards.clone(),
        initial_value,
    });

    info!(round_id, players = players.len(), initial_value, "Round started");

    Ok(RoundEngine {
        round_id,
        players: players.to_vec(),
        hands,
        deck,
        discard: Vec::new(),
        field,
        phase: RoundPhase::AwaitingDeclarationWindow,
        current_turn: 0,
        rate: settings.game_rate,
        modifiers: settings.modifiers.clone(),
        score_limit: settings.score_limit,
        stack_rate_up: settings.stack_rate_up,
        deck_cycles: 0,
        deck_cycle_limit: settings.deck_cycle,
        history,
        stack_run: StackRun {
            rank: (!opening.is_joker()).then_some(opening.rank),
            count: 1,
        },
        has_drawn: false,
        window_passes: BTreeSet::new(),
        outcome: None,
    })
}

/// Применить действие игрока. Возвращает статус раунда.
pub fn apply_action<R: RandomSource>(
    engine: &mut RoundEngine,
    action: PlayerAction,
    rng: &mut R,
) -> Result<RoundStatus, EngineError> {
    if engine.is_finished() {
        return Err(EngineError::RoundAlreadyFinished(engine.round_id));
    }
    if !engine.hands.contains_key(&action.player_id) {
        return Err(EngineError::UnknownPlayer(action.player_id));
    }

    let player_id = action.player_id;
    match (engine.phase, action.kind) {
        // Цель revenge задаёт координатор (challenge zone) через `evaluate_declaration`,
        // из действия игрока она не принимается.
        (_, PlayerActionKind::Declare { kind: DotenkoKind::Revenge }) => {
            Err(EngineError::IllegalAction)
        }
        (RoundPhase::AwaitingDeclarationWindow, PlayerActionKind::Declare { kind }) => declare(
            engine,
            Declaration {
                player_id,
                kind,
                target: None,
            },
        ),
        (RoundPhase::AwaitingDeclarationWindow, PlayerActionKind::Pass) => {
            engine.window_passes.insert(player_id);
            engine.history.push(RoundEventKind::Passed { player_id });
            let everyone_passed = engine
                .eligible_declarers()
                .iter()
                .all(|p| engine.window_passes.contains(p));
            if everyone_passed {
                close_declaration_window(engine)
            } else {
                Ok(RoundStatus::Ongoing(engine.phase))
            }
        }
        (RoundPhase::AwaitingDeclarationWindow, kind @ (PlayerActionKind::Play(_) | PlayerActionKind::Draw)) => {
            // Ход следующего игрока сам закрывает окно, но только если сам ход возможен.
            ensure_turn(engine, player_id)?;
            precheck_turn(engine, player_id, &kind)?;
            close_declaration_window(engine)?;
            take_turn(engine, player_id, kind, rng)
        }
        (RoundPhase::AwaitingPlay, PlayerActionKind::Declare { .. }) => Err(EngineError::IllegalAction),
        (RoundPhase::AwaitingPlay, kind) => {
            ensure_turn(engine, player_id)?;
            take_turn(engine, player_id, kind, rng)
        }
        (RoundPhase::Resolved, _) => Err(EngineError::RoundAlreadyFinished(engine.round_id)),
    }
}

/// Закрыть окно объявлений (все отказались или вышел таймер у вызывающего кода).
pub fn close_declaration_window(engine: &mut RoundEngine) -> Result<RoundStatus, EngineError> {
    if engine.phase != RoundPhase::AwaitingDeclarationWindow {
        return Err(EngineError::IllegalAction);
    }
    engine.phase = RoundPhase::AwaitingPlay;
    engine.window_passes.clear();
    engine.history.push(RoundEventKind::WindowClosed);
    Ok(RoundStatus::Passed)
}

fn ensure_turn(engine: &RoundEngine, player_id: PlayerId) -> Result<(), EngineError> {
    if engine.current_player() == player_id {
        Ok(())
    } else {
        Err(EngineError::NotPlayersTurn(player_id))
    }
}

/// Проверка хода без изменения состояния.
fn precheck_turn(
    engine: &RoundEngine,
    player_id: PlayerId,
    kind: &PlayerActionKind,
) -> Result<(), EngineError> {
    match kind {
        PlayerActionKind::Play(cards) => {
            validate_play(&engine.field, cards)?;
            let mut probe = engine
                .hands
                .get(&player_id)
                .cloned()
                .ok_or(EngineError::UnknownPlayer(player_id))?;
            if !probe.take_cards(cards) {
                return Err(EngineError::CardsNotInHand(player_id));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Ход текущего игрока в фазе AwaitingPlay.
fn take_turn<R: RandomSource>(
    engine: &mut RoundEngine,
    player_id: PlayerId,
    kind: PlayerActionKind,
    rng: &mut R,
) -> Result<RoundStatus, EngineError> {
    match kind {
        PlayerActionKind::Play(cards) => play_cards(engine, player_id, cards),
        PlayerActionKind::Draw => {
            if engine.has_drawn {
                return Err(EngineError::IllegalAction);
            }
            let Some(card) = draw_card(engine, rng) else {
                return Ok(finish_without_winner(engine, player_id));
            };
            engine
                .hands
                .get_mut(&player_id)
                .ok_or(EngineError::UnknownPlayer(player_id))?
                .push(card);
            engine.has_drawn = true;
            engine.history.push(RoundEventKind::CardDrawn { player_id });
            Ok(RoundStatus::Ongoing(engine.phase))
        }
        PlayerActionKind::Pass => {
            if !engine.has_drawn {
                return Err(EngineError::IllegalAction);
            }
            engine.has_drawn = false;
            engine.current_turn = (engine.current_turn + 1) % engine.players.len();
            engine.history.push(RoundEventKind::Passed { player_id });
            Ok(RoundStatus::Ongoing(engine.phase))
        }
        PlayerActionKind::Declare { .. } => Err(EngineError::IllegalAction),
    }
}

fn play_cards(
    engine: &mut RoundEngine,
    player_id: PlayerId,
    cards: Vec<Card>,
) -> Result<RoundStatus, EngineError> {
    let play = validate_play(&engine.field, &cards)?;

    let hand = engine
        .hands
        .get_mut(&player_id)
        .ok_or(EngineError::UnknownPlayer(player_id))?;
    if !hand.take_cards(&cards) {
        return Err(EngineError::CardsNotInHand(player_id));
    }

    track_stack(engine, play, &cards);

    let removed = engine.field.place(cards.clone(), player_id);
    engine.discard.extend(removed);
    let field_total = engine.field.current_total().unwrap_or_default();

    debug!(player_id, ?play, field_total, "Cards played");
    engine.history.push(RoundEventKind::CardsPlayed {
        player_id,
        cards,
        play,
        field_total,
    });

    engine.has_drawn = false;
    engine.window_passes.clear();
    engine.current_turn = (engine.current_turn + 1) % engine.players.len();
    engine.phase = RoundPhase::AwaitingDeclarationWindow;
    Ok(RoundStatus::Ongoing(engine.phase))
}

/// Повышение курса: `stack_rate_up` одинаковых карт подряд - курс ×2.
fn track_stack(engine: &mut RoundEngine, play: PlayKind, cards: &[Card]) {
    // Сумма и джокер стопку не продолжают и новую не начинают.
    let rank = match play {
        PlayKind::Sum | PlayKind::Joker => None,
        _ => cards.first().map(|c| c.rank),
    };
    let count = cards.len() as u32;

    match rank {
        Some(r) if play == PlayKind::SameNumber && engine.stack_run.rank == Some(r) => {
            engine.stack_run.count += count;
        }
        _ => engine.stack_run = StackRun { rank, count },
    }

    if let Some(threshold) = engine.stack_rate_up {
        if engine.stack_run.rank.is_some() && engine.stack_run.count >= u32::from(threshold) {
            engine.rate = engine.rate.saturating_mul(UPRATE_MULTIPLIER);
            engine.stack_run.count = 0;
            engine.history.push(RoundEventKind::RateUp { rate: engine.rate });
        }
    }
}

/// Взять верхнюю карту. Пустая колода пополняется перетасованным сбросом.
/// `None`: тянуть нечего (сброс пуст или лимит проходов колоды исчерпан).
fn draw_card<R: RandomSource>(engine: &mut RoundEngine, rng: &mut R) -> Option<Card> {
    if engine.deck.is_empty() {
        let limit_reached = engine
            .deck_cycle_limit
            .is_some_and(|limit| engine.deck_cycles >= limit);
        if engine.discard.is_empty() || limit_reached {
            return None;
        }
        let recycled = std::mem::take(&mut engine.discard);
        engine.deck.refill(recycled);
        rng.shuffle(&mut engine.deck.cards);
        engine.deck_cycles += 1;
        engine.history.push(RoundEventKind::DeckRecycled {
            cycle: engine.deck_cycles,
        });
    }
    engine.deck.draw_one()
}

/// Колода кончилась: раунд завершается без победителя, очки не меняются.
fn finish_without_winner(engine: &mut RoundEngine, player_id: PlayerId) -> RoundStatus {
    engine.history.push(RoundEventKind::DeckExhausted {
        player_id,
        deck_cycles: engine.deck_cycles,
    });
    engine.history.push(RoundEventKind::RoundFinished {
        round_id: engine.round_id,
    });
    engine.phase = RoundPhase::Resolved;

    info!(
        round_id = engine.round_id,
        deck_cycles = engine.deck_cycles,
        "Round ended without a winner"
    );
    RoundStatus::Finished(summarize(engine, None), engine.history.clone())
}

fn summarize(engine: &RoundEngine, outcome: Option<RoundOutcome>) -> RoundSummary {
    RoundSummary {
        round_id: engine.round_id,
        outcome,
        rate: engine.rate,
        deck_cycles: engine.deck_cycles,
        final_hands: engine
            .hands
            .iter()
            .map(|(&pid, hand)| (pid, hand.cards.clone()))
            .collect(),
    }
}

fn declare(engine: &mut RoundEngine, declaration: Declaration) -> Result<RoundStatus, EngineError> {
    let player_id = declaration.player_id;

    // Нельзя объявлять dotenko на собственные карты.
    let own_field = engine.field.played_by.iter().all(|&p| p == player_id);
    if declaration.kind != DotenkoKind::Shotenko && own_field {
        return Err(EngineError::IllegalAction);
    }

    let hand = engine
        .hands
        .get(&player_id)
        .ok_or(EngineError::UnknownPlayer(player_id))?;
    let mut outcome = evaluate_declaration(
        &engine.field,
        hand,
        &declaration,
        &engine.modifiers,
        engine.rate,
    )?;

    if !outcome.valid {
        engine.history.push(RoundEventKind::DeclarationFailed {
            player_id,
            kind: declaration.kind,
            target: outcome.table_total,
            hand_value: outcome.hand_value,
        });
        return Ok(RoundStatus::DeclarationFailed(outcome));
    }

    if let Some(limit) = engine.score_limit {
        apply_score_limit(&mut outcome, limit);
    }

    engine.history.push(RoundEventKind::DeclarationSucceeded {
        player_id,
        kind: declaration.kind,
        table_total: outcome.table_total,
    });
    for (&pid, &delta) in &outcome.point_delta {
        engine.history.push(RoundEventKind::PointsTransferred {
            player_id: pid,
            delta,
        });
    }
    engine.history.push(RoundEventKind::RoundFinished {
        round_id: engine.round_id,
    });
    engine.phase = RoundPhase::Resolved;
    engine.outcome = Some(outcome.clone());

    info!(
        round_id = engine.round_id,
        player_id,
        kind = ?declaration.kind,
        table_total = outcome.table_total,
        rate = engine.rate,
        "Round resolved"
    );

    Ok(RoundStatus::Finished(
        summarize(engine, Some(outcome)),
        engine.history.clone(),
    ))
}
