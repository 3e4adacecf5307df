//! Доменная модель дотенко: карты, колода, руки, поле, очки, настройки, бонусы.

pub mod bonus;
pub mod card;
pub mod deck;
pub mod field;
pub mod hand;
pub mod points;
pub mod rules;
pub mod settings;

// Базовые идентификаторы.
pub type PlayerId = u64;
pub type MatchId = u64;
pub type RoundId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use bonus::*;
pub use card::*;
pub use deck::*;
pub use field::*;
pub use hand::*;
pub use points::*;
pub use settings::*;
