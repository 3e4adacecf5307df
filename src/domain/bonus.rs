use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Бонусные правила, которые могут быть включены на раунд.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BonusModifier {
    /// A, 2 или джокер в руке объявившего - очки ×2.
    DoublePoints,
    /// ♦3 считается как 30.
    DiamondThreeThirty,
    /// ♠3 или ♣3 в руке объявившего - победитель и проигравший меняются местами.
    WinLoseInversion,
}

impl BonusModifier {
    /// Карта, которая включает этот бонус.
    pub fn triggered_by(self, card: &Card) -> bool {
        match self {
            BonusModifier::DoublePoints => {
                matches!(card.rank, Rank::Ace | Rank::Two | Rank::Joker)
            }
            BonusModifier::DiamondThreeThirty => card.is(Rank::Three, Suit::Diamonds),
            BonusModifier::WinLoseInversion => {
                card.is(Rank::Three, Suit::Spades) || card.is(Rank::Three, Suit::Clubs)
            }
        }
    }
}

/// Набор активных бонусов. Повторы не имеют эффекта.
pub fn is_active(modifiers: &[BonusModifier], modifier: BonusModifier) -> bool {
    modifiers.contains(&modifier)
}

/// Активен ли бонус и есть ли в картах хотя бы одна карта, которая его включает.
pub fn triggered(modifiers: &[BonusModifier], modifier: BonusModifier, cards: &[Card]) -> bool {
    is_active(modifiers, modifier) && cards.iter().any(|c| modifier.triggered_by(c))
}
