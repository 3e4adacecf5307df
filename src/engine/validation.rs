use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::field::FieldState;
use crate::engine::errors::EngineError;
use crate::eval::resolve_hand;

/// Каким способом карты легли на поле.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayKind {
    /// Одна или несколько карт того же числа, что и верхняя карта поля.
    SameNumber,
    /// Одна карта той же масти.
    SameSuit,
    /// Набор одного числа, в котором хотя бы одна карта - масти поля.
    SuitAndNumber,
    /// Сумма двух и более карт равна значению поля.
    Sum,
    /// Одиночный джокер - подходит к любой карте.
    Joker,
}

/// Проверка, можно ли выложить эти карты на текущее поле.
pub fn validate_play(field: &FieldState, cards: &[Card]) -> Result<PlayKind, EngineError> {
    if cards.is_empty() {
        return Err(EngineError::IllegalPlay);
    }
    let top = field.top_card().ok_or(EngineError::InvalidField)?;

    if let [single] = cards {
        if single.is_joker() {
            return Ok(PlayKind::Joker);
        }
    }

    let jokers = cards.iter().filter(|c| c.is_joker()).count();

    if jokers == 0 && all_same_rank(cards) {
        if cards[0].rank == top.rank {
            return Ok(PlayKind::SameNumber);
        }
        // Джокер на поле принимает любую масть.
        let suit_matches = |c: &Card| top.is_joker() || c.suit == field.top_suit();
        if cards.len() == 1 && suit_matches(&cards[0]) {
            return Ok(PlayKind::SameSuit);
        }
        if cards.len() > 1 && cards.iter().any(suit_matches) {
            return Ok(PlayKind::SuitAndNumber);
        }
    }

    if cards.len() >= 2 {
        if let Some(total) = field.current_total() {
            // Сумма считается по обычным числам, без бонусов раунда.
            if resolve_hand(cards, total, &[]).hand_value == total {
                return Ok(PlayKind::Sum);
            }
        }
    }

    Err(EngineError::IllegalPlay)
}

fn all_same_rank(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| w[0].rank == w[1].rank)
}
