use std::collections::BTreeMap;

use crate::domain::bonus::{triggered, BonusModifier};
use crate::domain::card::Card;
use crate::domain::hand::RoundOutcome;
use crate::domain::points::Points;
use crate::domain::rules::BONUS_POINT_MULTIPLIER;
use crate::domain::PlayerId;

/// Базовые очки: итоговое число × курс.
pub fn base_points(table_total: i32, rate: u32) -> Points {
    Points(i64::from(table_total).saturating_mul(i64::from(rate)))
}

/// Множитель бонуса {A, 2, Joker}: 2, если бонус активен и такая карта есть в руке.
pub fn bonus_multiplier(hand: &[Card], modifiers: &[BonusModifier]) -> i64 {
    if triggered(modifiers, BonusModifier::DoublePoints, hand) {
        BONUS_POINT_MULTIPLIER
    } else {
        1
    }
}

/// Разворот выигрыша: бонус активен и в руке есть ♠3 или ♣3.
pub fn has_inversion(hand: &[Card], modifiers: &[BonusModifier]) -> bool {
    triggered(modifiers, BonusModifier::WinLoseInversion, hand)
}

/// Раздать очки: каждый проигравший платит `per_loser`, объявивший получает всё.
/// При развороте знаки меняются. Объявивший среди проигравших не считается.
pub fn distribute(
    declarer: PlayerId,
    losers: &[PlayerId],
    per_loser: Points,
    inverted: bool,
) -> BTreeMap<PlayerId, Points> {
    let mut losers: Vec<PlayerId> = losers.iter().copied().filter(|&p| p != declarer).collect();
    losers.sort_unstable();
    losers.dedup();

    let sign = if inverted { -1 } else { 1 };
    let mut delta = BTreeMap::new();
    delta.insert(declarer, per_loser * (sign * losers.len() as i64));
    for loser in losers {
        delta.insert(loser, per_loser * -sign);
    }
    delta
}

/// Лимит очков за раунд: выигрыш объявившего (или его проигрыш при развороте)
/// не больше `limit`. Срезанная сумма делится между остальными поровну, остаток
/// по одному очку уходит первым по id. Сумма остаётся нулевой.
pub fn apply_score_limit(outcome: &mut RoundOutcome, limit: u64) {
    if !outcome.valid {
        return;
    }
    let declarer = outcome.declared_by;
    let total = outcome.delta_for(declarer);
    let capped = total.clamp_abs(limit);
    if capped == total {
        return;
    }

    let others: Vec<PlayerId> = outcome
        .point_delta
        .keys()
        .copied()
        .filter(|&p| p != declarer)
        .collect();
    let count = others.len() as i64;
    if count == 0 {
        return;
    }
    let magnitude = capped.0.abs();
    let sign = capped.0.signum();
    let (share, remainder) = (magnitude / count, magnitude % count);
    for (idx, pid) in others.into_iter().enumerate() {
        let extra = i64::from((idx as i64) < remainder);
        outcome.point_delta.insert(pid, Points(-sign * (share + extra)));
    }
    outcome.point_delta.insert(declarer, capped);
}
