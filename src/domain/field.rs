use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Suit};
use crate::domain::rules::FIELD_JOKER_VALUE;
use crate::domain::PlayerId;

/// Состояние поля (центр стола).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldState {
    /// Последний выложенный набор карт (одна или несколько).
    pub cards: Vec<Card>,
    /// Кто выложил текущий набор. Эти игроки платят за dotenko.
    pub played_by: Vec<PlayerId>,
    /// Значение поля на старте раунда (для shotenko).
    pub initial_value: Option<i32>,
    /// Кто платит за shotenko.
    pub initial_played_by: Vec<PlayerId>,
    /// Флаг революции. Движок его только переносит, не вычисляет.
    pub revolution: bool,
}

impl FieldState {
    /// Поле с начальной картой раунда: значение фиксируется как `initial_value`.
    pub fn opening(cards: Vec<Card>, players: Vec<PlayerId>) -> Self {
        let initial_value = Some(field_total(&cards));
        Self {
            cards,
            played_by: players.clone(),
            initial_value,
            initial_played_by: players,
            revolution: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Текущее значение поля. `None`, если поле пустое.
    pub fn current_total(&self) -> Option<i32> {
        if self.cards.is_empty() {
            None
        } else {
            Some(field_total(&self.cards))
        }
    }

    /// Верхняя карта - последняя в наборе.
    pub fn top_card(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn top_suit(&self) -> Option<Suit> {
        self.top_card().and_then(|c| c.suit)
    }

    /// Положить новый набор. Возвращает снятые с поля карты (в сброс).
    pub fn place(&mut self, cards: Vec<Card>, player_id: PlayerId) -> Vec<Card> {
        self.played_by = vec![player_id];
        std::mem::replace(&mut self.cards, cards)
    }
}

/// Сумма карт на поле. Джокер на поле считается как 0.
fn field_total(cards: &[Card]) -> i32 {
    cards
        .iter()
        .map(|c| c.rank.value().unwrap_or(FIELD_JOKER_VALUE))
        .sum()
}
