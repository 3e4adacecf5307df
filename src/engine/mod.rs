//! Движок дотенко: проверка объявлений, очки, выкладка карт, раунд, партия.
//!
//! Главная чистая функция: `evaluate_declaration`.
//! Поверх неё:
//!   - `start_round` / `apply_action` – конечный автомат одного раунда
//!   - `MatchManager` – последовательность раундов и накопленные очки

pub mod actions;
pub mod errors;
pub mod game_loop;
pub mod history;
pub mod match_manager;
pub mod resolver;
pub mod scoring;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use errors::EngineError;
pub use game_loop::{
    apply_action, close_declaration_window, start_round, start_round_with_deck, RoundEngine,
    RoundPhase, RoundStatus,
};
pub use history::{RoundEvent, RoundEventKind, RoundHistory};
pub use match_manager::{ManagerError, Match, MatchManager, MatchStatus};
pub use resolver::evaluate_declaration;
pub use validation::{validate_play, PlayKind};

/// RNG интерфейс для engine.
/// Реализации - в infra (обёртка над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
