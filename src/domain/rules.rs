//! Константы правил дотенко.

/// Сколько карт раздаётся каждому игроку на старте раунда.
pub const INITIAL_HAND_SIZE: usize = 2;

/// Возможные значения джокера в порядке предпочтения при равенстве:
/// сначала 0, потом +1, потом -1.
pub const JOKER_VALUES_BY_PREFERENCE: [i32; 3] = [0, 1, -1];

/// Джокер, лежащий на поле, в сумму поля входит как 0.
pub const FIELD_JOKER_VALUE: i32 = 0;

/// Значение ♦3 при активном бонусе.
pub const DIAMOND_THREE_VALUE: i32 = 30;

/// Множитель очков для бонуса {A, 2, Joker}.
pub const BONUS_POINT_MULTIPLIER: i64 = 2;

/// Множитель курса при повышении (стопка одинаковых карт).
pub const UPRATE_MULTIPLIER: u32 = 2;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
