use tracing::debug;

use crate::engine::resolver::evaluate_declaration;
use crate::engine::{ManagerError, MatchManager, RandomSource};
use crate::infra::ids::IdGenerator;
use crate::infra::mapping::{map_match_to_dto, map_standings, DefaultNameResolver};

use super::commands::{Command, CreateMatchCommand, EvaluateDeclarationCommand, PlayerActionCommand};
use super::dto::CommandResponse;
use super::errors::ApiError;
use super::queries::{Query, QueryResponse};

/// Диспетчер команд и запросов поверх in-memory `MatchManager`.
///
/// Off-chain аналог contract/service: одна команда = одна мутация,
/// запросы только читают.
pub struct DotenkoService<R: RandomSource> {
    manager: MatchManager,
    ids: IdGenerator,
    rng: R,
}

impl<R: RandomSource> DotenkoService<R> {
    pub fn new(rng: R) -> Self {
        Self {
            manager: MatchManager::new(),
            ids: IdGenerator::new(),
            rng,
        }
    }

    pub fn manager(&self) -> &MatchManager {
        &self.manager
    }

    /// Выполнить команду.
    pub fn execute(&mut self, command: Command) -> Result<CommandResponse, ApiError> {
        match command {
            Command::CreateMatch(CreateMatchCommand {
                match_id,
                settings,
                players,
            }) => {
                let match_id = match match_id {
                    Some(id) => {
                        self.ids.observe_match_id(id);
                        id
                    }
                    None => self.ids.next_match_id(),
                };
                if self.manager.has_match(match_id) {
                    return Err(ApiError::InvalidCommand(format!(
                        "Партия {match_id} уже существует"
                    )));
                }
                self.manager.create_match(match_id, settings, players)?;
                debug!(match_id, "Match created");
                Ok(CommandResponse::MatchCreated { match_id })
            }
            Command::StartRound { match_id } => {
                let round_id = self.ids.next_round_id();
                self.manager
                    .start_next_round(match_id, &mut self.rng, round_id)?;
                Ok(CommandResponse::RoundStarted { match_id, round_id })
            }
            Command::PlayerAction(PlayerActionCommand { match_id, action }) => {
                let status = self.manager.apply_action(match_id, action, &mut self.rng)?;
                Ok(CommandResponse::Round(status))
            }
            Command::CloseWindow { match_id } => {
                let status = self.manager.close_declaration_window(match_id)?;
                Ok(CommandResponse::Round(status))
            }
            Command::EvaluateDeclaration(EvaluateDeclarationCommand {
                field,
                hand,
                declaration,
                modifiers,
                rate,
            }) => {
                let outcome = evaluate_declaration(&field, &hand, &declaration, &modifiers, rate)?;
                Ok(CommandResponse::Outcome(outcome))
            }
        }
    }

    /// Выполнить запрос только на чтение.
    pub fn query(&self, query: Query) -> Result<QueryResponse, ApiError> {
        let names = DefaultNameResolver;
        match query {
            Query::GetMatch { match_id, viewer } => {
                let m = self
                    .manager
                    .get(match_id)
                    .ok_or(ManagerError::MatchNotFound(match_id))?;
                Ok(QueryResponse::Match(map_match_to_dto(m, &names, |pid| {
                    viewer == Some(pid)
                })))
            }
            Query::ListMatches => {
                let views = self
                    .manager
                    .match_ids()
                    .into_iter()
                    .filter_map(|id| self.manager.get(id))
                    .map(|m| map_match_to_dto(m, &names, |_| false))
                    .collect();
                Ok(QueryResponse::Matches(views))
            }
            Query::GetStandings { match_id } => {
                let m = self
                    .manager
                    .get(match_id)
                    .ok_or(ManagerError::MatchNotFound(match_id))?;
                Ok(QueryResponse::Standings(map_standings(m, &names)))
            }
        }
    }
}
