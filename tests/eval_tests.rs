//! Тесты подсчёта руки: числа карт, подбор джокеров, свойства резолвера.

use dotenko_engine::domain::bonus::BonusModifier;
use dotenko_engine::domain::card::{Card, Rank, Suit};
use dotenko_engine::eval::{card_value, fixed_sum, resolve_hand, resolve_jokers};
use proptest::prelude::*;

fn c(s: &str) -> Card {
    s.parse().unwrap()
}

#[test]
fn plain_cards_sum_without_jokers() {
    let res = resolve_hand(&[c("3s"), c("7h")], 10, &[]);
    assert_eq!(res.hand_value, 10);
    assert!(res.values.is_empty());
    assert_eq!(res.distance_to(10), 0);
}

#[test]
fn face_cards_count_as_numbers() {
    assert_eq!(fixed_sum(&[c("Jh"), c("Qs"), c("Kd")], &[]), 36);
    assert_eq!(card_value(&c("Ac"), &[]), Some(1));
}

/// Один джокер: 0, если уже совпадает; иначе ±1 в сторону цели.
#[test]
fn single_joker_moves_toward_target() {
    let at = resolve_hand(&[Card::joker(), c("9c")], 9, &[]);
    assert_eq!(at.values, vec![0]);
    assert_eq!(at.hand_value, 9);

    let up = resolve_hand(&[c("3s"), Card::joker()], 10, &[]);
    assert_eq!(up.values, vec![1]);
    assert_eq!(up.hand_value, 4);

    let down = resolve_hand(&[c("9c"), Card::joker()], 8, &[]);
    assert_eq!(down.values, vec![-1]);
    assert_eq!(down.hand_value, 8);
}

/// При равной дистанции побеждает порядок предпочтений 0, +1, -1,
/// первый джокер в руке решает первым.
#[test]
fn tie_break_prefers_zero_then_plus_one() {
    // fixed = 5, цель 6: (0, +1) раньше (+1, 0).
    let res = resolve_jokers(5, 2, 6);
    assert_eq!(res.values, vec![0, 1]);

    // fixed = 5, цель 5: (0, 0), а не (+1, -1).
    let res = resolve_jokers(5, 2, 5);
    assert_eq!(res.values, vec![0, 0]);

    // fixed = 5, цель 3: только (-1, -1).
    let res = resolve_jokers(5, 2, 3);
    assert_eq!(res.values, vec![-1, -1]);
}

#[test]
fn diamond_three_counts_thirty_in_hand() {
    let mods = [BonusModifier::DiamondThreeThirty];
    let res = resolve_hand(&[c("3d")], 30, &mods);
    assert_eq!(res.hand_value, 30);

    let res = resolve_hand(&[c("3d"), Card::joker()], 31, &mods);
    assert_eq!(res.hand_value, 31);
    assert_eq!(res.values, vec![1]);

    // Без бонуса ♦3 - обычная тройка.
    assert_eq!(resolve_hand(&[c("3d")], 30, &[]).hand_value, 3);
}

#[test]
fn only_jokers_hand() {
    let res = resolve_hand(&[Card::joker(), Card::joker(), Card::joker()], 2, &[]);
    assert_eq!(res.hand_value, 2);
    assert_eq!(res.values, vec![0, 1, 1]);

    let res = resolve_hand(&[Card::joker()], 13, &[]);
    assert_eq!(res.hand_value, 1);
}

fn any_numbered_card() -> impl Strategy<Value = Card> {
    (1i32..=13, 0usize..4).prop_map(|(v, s)| {
        let rank = Rank::from_value(v).unwrap_or(Rank::Ace);
        Card::new(rank, Suit::ALL[s])
    })
}

fn any_card() -> impl Strategy<Value = Card> {
    prop_oneof![
        8 => any_numbered_card(),
        1 => Just(Card::joker()),
    ]
}

proptest! {
    /// Без джокеров сумма руки не зависит от цели и порядка карт.
    #[test]
    fn no_joker_sum_is_order_independent(
        mut cards in proptest::collection::vec(any_numbered_card(), 1..8),
        t1 in -10i32..120,
        t2 in -10i32..120,
    ) {
        let a = resolve_hand(&cards, t1, &[]).hand_value;
        cards.reverse();
        let b = resolve_hand(&cards, t2, &[]).hand_value;
        prop_assert_eq!(a, b);
        let plain: i32 = cards.iter().filter_map(|c| c.rank.value()).sum();
        prop_assert_eq!(a, plain);
    }

    /// Каждый джокер даёт -1, 0 или +1, и сумма руки не дальше от цели,
    /// чем при любом другом допустимом наборе.
    #[test]
    fn joker_values_are_bounded_and_optimal(
        cards in proptest::collection::vec(any_card(), 1..7),
        target in -5i32..80,
    ) {
        let res = resolve_hand(&cards, target, &[]);
        let jokers = cards.iter().filter(|c| c.is_joker()).count();
        prop_assert_eq!(res.values.len(), jokers);
        prop_assert!(res.values.iter().all(|v| (-1..=1).contains(v)));

        let fixed = fixed_sum(&cards, &[]);
        prop_assert_eq!(res.hand_value, fixed + res.values.iter().map(|&v| i32::from(v)).sum::<i32>());

        let k = jokers as i32;
        let best = (target - fixed).clamp(-k, k);
        prop_assert_eq!(res.distance_to(target), i64::from((target - fixed - best).abs()));
    }

    /// Детерминированность: одинаковый вход - одинаковый результат.
    #[test]
    fn resolution_is_deterministic(
        cards in proptest::collection::vec(any_card(), 1..7),
        target in -5i32..80,
    ) {
        prop_assert_eq!(resolve_hand(&cards, target, &[]), resolve_hand(&cards, target, &[]));
    }
}
