use serde::{Deserialize, Serialize};

use crate::domain::bonus::BonusModifier;
use crate::domain::card::Card;
use crate::domain::rules::JOKER_VALUES_BY_PREFERENCE;

use super::card_value::fixed_sum;

/// До этого числа джокеров перебираем все 3^k вариантов честно.
/// Дальше берём эквивалентный жадный выбор (перебор становится слишком дорогим).
const MAX_EXHAUSTIVE_JOKERS: usize = 12;

/// Подобранные значения джокеров и итоговая сумма руки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JokerResolution {
    /// Значение каждого джокера в порядке появления в руке.
    pub values: Vec<i8>,
    /// Сумма руки с этими значениями.
    pub hand_value: i32,
}

impl JokerResolution {
    pub fn distance_to(&self, target: i32) -> i64 {
        (i64::from(self.hand_value) - i64::from(target)).abs()
    }
}

/// Главная функция: лучшая сумма руки относительно цели.
///
/// Числовые карты считаются через `card_value` (с бонусами), каждому джокеру
/// подбирается -1, 0 или +1 так, чтобы сумма была как можно ближе к `target`.
pub fn resolve_hand(cards: &[Card], target: i32, modifiers: &[BonusModifier]) -> JokerResolution {
    let jokers = cards.iter().filter(|c| c.is_joker()).count();
    resolve_jokers(fixed_sum(cards, modifiers), jokers, target)
}

/// Подбор значений для `jokers` джокеров при сумме остальных карт `fixed`.
///
/// Из всех наборов с минимальным |сумма - target| выбирается первый
/// в лексикографическом порядке предпочтений (0, +1, -1) по порядку джокеров.
pub fn resolve_jokers(fixed: i32, jokers: usize, target: i32) -> JokerResolution {
    let values = if jokers <= MAX_EXHAUSTIVE_JOKERS {
        exhaustive_assignment(fixed, jokers, target)
    } else {
        greedy_assignment(fixed, jokers, target)
    };
    let hand_value = fixed + values.iter().map(|&v| i32::from(v)).sum::<i32>();
    JokerResolution { values, hand_value }
}

/// Полный перебор: «одометр» по индексам в `JOKER_VALUES_BY_PREFERENCE`,
/// первый джокер - старший разряд. Побеждает первый набор с лучшей дистанцией.
fn exhaustive_assignment(fixed: i32, jokers: usize, target: i32) -> Vec<i8> {
    let mut digits = vec![0usize; jokers];
    let mut best: Option<(i64, Vec<usize>)> = None;

    loop {
        let sum = fixed + digits.iter().map(|&d| JOKER_VALUES_BY_PREFERENCE[d]).sum::<i32>();
        let dist = (i64::from(sum) - i64::from(target)).abs();
        if best.as_ref().map_or(true, |(best_dist, _)| dist < *best_dist) {
            best = Some((dist, digits.clone()));
            if dist == 0 {
                break;
            }
        }

        // Следующая комбинация. Когда перенос ушёл за старший разряд - всё перебрали.
        let mut pos = jokers;
        loop {
            if pos == 0 {
                return to_values(best.map(|(_, d)| d).unwrap_or_default());
            }
            pos -= 1;
            digits[pos] += 1;
            if digits[pos] < JOKER_VALUES_BY_PREFERENCE.len() {
                break;
            }
            digits[pos] = 0;
        }
    }

    to_values(best.map(|(_, d)| d).unwrap_or_default())
}

/// Тот же результат без перебора: лучшая добавка единственна
/// (clamp(target - fixed, -k, k)), а набор собираем слева направо,
/// беря самое предпочтительное значение, после которого остаток ещё достижим.
fn greedy_assignment(fixed: i32, jokers: usize, target: i32) -> Vec<i8> {
    let k = i64::try_from(jokers).unwrap_or(i64::MAX);
    let mut needed = (i64::from(target) - i64::from(fixed)).clamp(-k, k);
    let mut values = Vec::with_capacity(jokers);

    for i in 0..jokers {
        let remaining = k - i as i64 - 1;
        for &v in JOKER_VALUES_BY_PREFERENCE.iter() {
            let rest = needed - i64::from(v);
            if rest.abs() <= remaining {
                values.push(v as i8);
                needed = rest;
                break;
            }
        }
    }

    values
}

fn to_values(digits: Vec<usize>) -> Vec<i8> {
    digits
        .into_iter()
        .map(|d| JOKER_VALUES_BY_PREFERENCE[d] as i8)
        .collect()
}
