use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::points::Points;
use crate::domain::{PlayerId, RoundId};

/// Карты на руках одного игрока.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn jokers(&self) -> usize {
        self.cards.iter().filter(|c| c.is_joker()).count()
    }

    /// Убрать карты из руки (по одному экземпляру на каждую).
    ///
    /// Если хотя бы одной карты нет, рука не меняется и возвращается `false`.
    pub fn take_cards(&mut self, to_take: &[Card]) -> bool {
        let mut remaining = self.cards.clone();
        for card in to_take {
            match remaining.iter().position(|c| c == card) {
                Some(idx) => {
                    remaining.remove(idx);
                }
                None => return false,
            }
        }
        self.cards = remaining;
        true
    }
}

/// Вид объявления.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DotenkoKind {
    /// Сумма руки совпала с текущим значением поля.
    Dotenko,
    /// Сумма руки совпала с начальным значением поля (на старте раунда).
    Shotenko,
    /// Объявление из challenge zone против цели, которую задаёт вызывающий код.
    Revenge,
}

/// Заявка игрока на победу в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Declaration {
    pub player_id: PlayerId,
    pub kind: DotenkoKind,
    /// Цель для `Revenge`. Для остальных видов игнорируется.
    pub target: Option<i32>,
}

impl Declaration {
    pub fn dotenko(player_id: PlayerId) -> Self {
        Self {
            player_id,
            kind: DotenkoKind::Dotenko,
            target: None,
        }
    }

    pub fn shotenko(player_id: PlayerId) -> Self {
        Self {
            player_id,
            kind: DotenkoKind::Shotenko,
            target: None,
        }
    }

    pub fn revenge(player_id: PlayerId, target: i32) -> Self {
        Self {
            player_id,
            kind: DotenkoKind::Revenge,
            target: Some(target),
        }
    }
}

/// Результат проверки объявления.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundOutcome {
    pub valid: bool,
    /// Итоговое число стола (цель объявления).
    pub table_total: i32,
    /// Лучшая сумма руки после подбора значений джокеров.
    pub hand_value: i32,
    pub declared_by: PlayerId,
    pub kind: DotenkoKind,
    /// Значения джокеров в порядке их появления в руке.
    pub joker_values: Vec<i8>,
    /// Бонусный множитель очков (1 или 2).
    pub multiplier: i64,
    /// Сработал ли разворот выигрыша (♠3 / ♣3).
    pub inverted: bool,
    /// Изменение очков по игрокам. Пусто, если объявление не прошло.
    pub point_delta: BTreeMap<PlayerId, Points>,
}

impl RoundOutcome {
    /// Изменение очков конкретного игрока (0, если его нет в списке).
    pub fn delta_for(&self, player_id: PlayerId) -> Points {
        self.point_delta
            .get(&player_id)
            .copied()
            .unwrap_or(Points::ZERO)
    }

    /// Сумма всех изменений. Для корректного исхода всегда 0.
    pub fn delta_sum(&self) -> Points {
        self.point_delta.values().copied().sum()
    }
}

/// Краткое описание завершённого раунда. Удобно для истории/реплеера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSummary {
    pub round_id: RoundId,
    /// Итог объявления. `None` - раунд закончился без победителя (тянуть нечего).
    pub outcome: Option<RoundOutcome>,
    /// Курс раунда с учётом повышений.
    pub rate: u32,
    /// Сколько раз колода была пройдена за раунд.
    pub deck_cycles: u32,
    /// Карты на руках у всех на момент завершения.
    pub final_hands: BTreeMap<PlayerId, Vec<Card>>,
}

impl RoundSummary {
    pub fn has_winner(&self) -> bool {
        self.outcome.is_some()
    }

    /// Изменение очков игрока за раунд (0 для раунда без победителя).
    pub fn delta_for(&self, player_id: PlayerId) -> Points {
        self.outcome
            .as_ref()
            .map_or(Points::ZERO, |o| o.delta_for(player_id))
    }
}
