use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::hand::DotenkoKind;
use crate::domain::points::Points;
use crate::domain::{PlayerId, RoundId};
use crate::engine::validation::PlayKind;

/// Тип события в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RoundEventKind {
    /// Новый раунд начался.
    RoundStarted {
        round_id: RoundId,
        players: Vec<PlayerId>,
    },

    /// Игрок получил стартовые карты.
    CardsDealt { player_id: PlayerId, cards: Vec<Card> },

    /// Открыта стартовая карта поля.
    FieldOpened { cards: Vec<Card>, initial_value: i32 },

    /// Игрок выложил карты.
    CardsPlayed {
        player_id: PlayerId,
        cards: Vec<Card>,
        play: PlayKind,
        field_total: i32,
    },

    /// Игрок взял карту из колоды.
    CardDrawn { player_id: PlayerId },

    /// Сброс перетасован обратно в колоду.
    DeckRecycled { cycle: u32 },

    /// Игроку нечего тянуть: раунд закончен без победителя.
    DeckExhausted { player_id: PlayerId, deck_cycles: u32 },

    /// Курс раунда вырос из-за стопки одинаковых карт.
    RateUp { rate: u32 },

    /// Игрок отказался (в окне объявлений или после добора).
    Passed { player_id: PlayerId },

    /// Окно объявлений закрыто без победителя.
    WindowClosed,

    /// Объявление не прошло.
    DeclarationFailed {
        player_id: PlayerId,
        kind: DotenkoKind,
        target: i32,
        hand_value: i32,
    },

    /// Объявление прошло.
    DeclarationSucceeded {
        player_id: PlayerId,
        kind: DotenkoKind,
        table_total: i32,
    },

    /// Начисление/списание очков.
    PointsTransferred { player_id: PlayerId, delta: Points },

    /// Раунд завершён.
    RoundFinished { round_id: RoundId },
}

/// Событие в раунде с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundEvent {
    pub index: u32,
    pub kind: RoundEventKind,
}

/// Полная история раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RoundHistory {
    pub events: Vec<RoundEvent>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: RoundEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(RoundEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
