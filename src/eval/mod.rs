//! Модуль подсчёта руки дотенко.
//!
//! Основные функции:
//!   `card_value(card, modifiers) -> Option<i32>` - число карты (джокер = None)
//!   `resolve_hand(cards, target, modifiers) -> JokerResolution` - лучшая сумма руки

pub mod card_value;
pub mod joker;

pub use card_value::{card_value, fixed_sum};
pub use joker::{resolve_hand, resolve_jokers, JokerResolution};
