use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::hand::DotenkoKind;
use crate::domain::PlayerId;

/// Тип действия игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum PlayerActionKind {
    /// Выложить карты на поле.
    Play(Vec<Card>),
    /// Взять карту из колоды.
    Draw,
    /// Пропустить: после добора - передать ход, в окне объявлений - отказаться.
    Pass,
    /// Объявить победу. Цель берётся со стола, игрок её не задаёт.
    Declare { kind: DotenkoKind },
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// Само действие.
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(player_id: PlayerId, kind: PlayerActionKind) -> Self {
        Self { player_id, kind }
    }

    pub fn play(player_id: PlayerId, cards: Vec<Card>) -> Self {
        Self::new(player_id, PlayerActionKind::Play(cards))
    }

    pub fn draw(player_id: PlayerId) -> Self {
        Self::new(player_id, PlayerActionKind::Draw)
    }

    pub fn pass(player_id: PlayerId) -> Self {
        Self::new(player_id, PlayerActionKind::Pass)
    }

    pub fn declare(player_id: PlayerId, kind: DotenkoKind) -> Self {
        Self::new(player_id, PlayerActionKind::Declare { kind })
    }
}
