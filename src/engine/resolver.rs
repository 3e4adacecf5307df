use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::bonus::BonusModifier;
use crate::domain::field::FieldState;
use crate::domain::hand::{Declaration, DotenkoKind, Hand, RoundOutcome};
use crate::domain::PlayerId;
use crate::engine::errors::EngineError;
use crate::engine::scoring::{base_points, bonus_multiplier, distribute, has_inversion};
use crate::eval::resolve_hand;

/// Проверить объявление против снапшота стола.
///
/// Чистая функция: ничего не меняет, одинаковый вход даёт одинаковый `RoundOutcome`.
/// Непрошедшее объявление - это `Ok` с `valid == false` и без изменений очков;
/// `Err` означает битый снапшот у вызывающего кода.
pub fn evaluate_declaration(
    field: &FieldState,
    hand: &Hand,
    declaration: &Declaration,
    modifiers: &[BonusModifier],
    rate: u32,
) -> Result<RoundOutcome, EngineError> {
    let checked = check_inputs(field, hand, declaration, rate);
    let (target, losers) = match checked {
        Ok(v) => v,
        Err(err) => {
            warn!(
                player_id = declaration.player_id,
                kind = ?declaration.kind,
                error = %err,
                "Rejected malformed declaration snapshot"
            );
            return Err(err);
        }
    };

    let resolution = resolve_hand(&hand.cards, target, modifiers);
    let valid = resolution.hand_value == target;

    debug!(
        player_id = declaration.player_id,
        kind = ?declaration.kind,
        target,
        hand_value = resolution.hand_value,
        jokers = ?resolution.values,
        valid,
        "Evaluated declaration"
    );

    if !valid {
        return Ok(RoundOutcome {
            valid,
            table_total: target,
            hand_value: resolution.hand_value,
            declared_by: declaration.player_id,
            kind: declaration.kind,
            joker_values: resolution.values,
            multiplier: 1,
            inverted: false,
            point_delta: BTreeMap::new(),
        });
    }

    let multiplier = bonus_multiplier(&hand.cards, modifiers);
    let inverted = has_inversion(&hand.cards, modifiers);
    let per_loser = base_points(target, rate) * multiplier;
    let point_delta = distribute(declaration.player_id, losers, per_loser, inverted);

    Ok(RoundOutcome {
        valid,
        table_total: target,
        hand_value: resolution.hand_value,
        declared_by: declaration.player_id,
        kind: declaration.kind,
        joker_values: resolution.values,
        multiplier,
        inverted,
        point_delta,
    })
}

/// Структурная проверка входа: цель объявления и кто платит.
fn check_inputs<'a>(
    field: &'a FieldState,
    hand: &Hand,
    declaration: &Declaration,
    rate: u32,
) -> Result<(i32, &'a [PlayerId]), EngineError> {
    if hand.is_empty() {
        return Err(EngineError::InvalidHand(declaration.player_id));
    }
    if rate == 0 {
        return Err(EngineError::InvalidRate);
    }

    match declaration.kind {
        DotenkoKind::Dotenko => {
            let total = field.current_total().ok_or(EngineError::InvalidField)?;
            Ok((total, &field.played_by))
        }
        DotenkoKind::Shotenko => {
            let initial = field.initial_value.ok_or(EngineError::InvalidField)?;
            Ok((initial, &field.initial_played_by))
        }
        DotenkoKind::Revenge => {
            let target = declaration.target.ok_or(EngineError::MissingTarget)?;
            Ok((target, &field.played_by))
        }
    }
}

impl RoundOutcome {
    /// Превратить непрошедшее объявление в `EngineError::InvalidDeclaration`.
    pub fn ensure_valid(self) -> Result<RoundOutcome, EngineError> {
        if self.valid {
            Ok(self)
        } else {
            Err(EngineError::InvalidDeclaration {
                target: self.table_total,
                best: self.hand_value,
            })
        }
    }
}
