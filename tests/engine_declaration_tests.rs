//! Тесты проверки объявлений (engine::resolver) и подсчёта очков.

use dotenko_engine::domain::bonus::BonusModifier;
use dotenko_engine::domain::card::{parse_cards, Card};
use dotenko_engine::domain::field::FieldState;
use dotenko_engine::domain::hand::{Declaration, DotenkoKind, Hand};
use dotenko_engine::domain::points::Points;
use dotenko_engine::engine::scoring::apply_score_limit;
use dotenko_engine::engine::{evaluate_declaration, EngineError};

const DECLARER: u64 = 1;
const OPPONENT: u64 = 2;

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn hand(s: &str) -> Hand {
    Hand::from_cards(cards(s))
}

/// Поле, которое только что выложил `owner`.
fn field_by(s: &str, owner: u64) -> FieldState {
    let mut field = FieldState::opening(cards("5h"), vec![DECLARER, OPPONENT, 3]);
    field.place(cards(s), owner);
    field
}

#[test]
fn exact_sum_is_valid_dotenko() {
    let field = field_by("Th", OPPONENT);
    let out = evaluate_declaration(
        &field,
        &hand("3s 7h"),
        &Declaration::dotenko(DECLARER),
        &[],
        10,
    )
    .unwrap();

    assert!(out.valid);
    assert_eq!(out.kind, DotenkoKind::Dotenko);
    assert_eq!(out.table_total, 10);
    assert_eq!(out.hand_value, 10);
    assert_eq!(out.declared_by, DECLARER);
    assert_eq!(out.delta_for(DECLARER), Points(100));
    assert_eq!(out.delta_for(OPPONENT), Points(-100));
}

#[test]
fn joker_out_of_reach_is_invalid() {
    let field = field_by("Th", OPPONENT);
    let out = evaluate_declaration(
        &field,
        &hand("3s JK"),
        &Declaration::dotenko(DECLARER),
        &[],
        10,
    )
    .unwrap();

    assert!(!out.valid);
    assert_eq!(out.joker_values, vec![1]);
    assert_eq!(out.hand_value, 4);
    assert!(out.point_delta.is_empty());

    assert_eq!(
        out.ensure_valid(),
        Err(EngineError::InvalidDeclaration { target: 10, best: 4 })
    );
}

#[test]
fn joker_stays_zero_when_already_matching() {
    let field = field_by("9s", OPPONENT);
    let out = evaluate_declaration(
        &field,
        &hand("JK 9c"),
        &Declaration::dotenko(DECLARER),
        &[],
        1,
    )
    .unwrap();
    assert!(out.valid);
    assert_eq!(out.joker_values, vec![0]);
    assert_eq!(out.hand_value, 9);
}

#[test]
fn diamond_three_thirty_hits_thirty_field() {
    // Поле считается без бонусов: K + K + 4 = 30.
    let field = field_by("Kh Kd 4c", OPPONENT);
    let mods = [BonusModifier::DiamondThreeThirty];
    let out = evaluate_declaration(&field, &hand("3d"), &Declaration::dotenko(DECLARER), &mods, 1)
        .unwrap();
    assert!(out.valid);
    assert_eq!(out.table_total, 30);

    let no_bonus =
        evaluate_declaration(&field, &hand("3d"), &Declaration::dotenko(DECLARER), &[], 1).unwrap();
    assert!(!no_bonus.valid);
}

#[test]
fn diamond_three_thirty_on_revenge_target() {
    let field = field_by("2h", OPPONENT);
    let mods = [BonusModifier::DiamondThreeThirty];
    let out = evaluate_declaration(
        &field,
        &hand("3d"),
        &Declaration::revenge(DECLARER, 30),
        &mods,
        1,
    )
    .unwrap();
    assert!(out.valid);
    assert_eq!(out.kind, DotenkoKind::Revenge);
    assert_eq!(out.table_total, 30);
}

#[test]
fn double_points_with_ace() {
    // Один проигравший: объявивший получает ровно 15 * 10 * 2.
    let mut field = FieldState::opening(cards("5h"), vec![DECLARER, OPPONENT]);
    field.place(cards("Kd 2s"), OPPONENT);
    let mods = [BonusModifier::DoublePoints];
    let out = evaluate_declaration(
        &field,
        &hand("Ah 7c 7d"),
        &Declaration::dotenko(DECLARER),
        &mods,
        10,
    )
    .unwrap();
    assert!(out.valid);
    assert_eq!(out.table_total, 15);
    assert_eq!(out.multiplier, 2);
    assert_eq!(out.delta_for(DECLARER), Points(300));
    assert_eq!(out.delta_for(OPPONENT), Points(-300));
}

#[test]
fn double_points_needs_modifier_and_card() {
    let field = field_by("Th", OPPONENT);
    let mods = [BonusModifier::DoublePoints];
    let out = evaluate_declaration(&field, &hand("4s 6h"), &Declaration::dotenko(DECLARER), &mods, 10)
        .unwrap();
    assert_eq!(out.multiplier, 1);

    let out = evaluate_declaration(&field, &hand("2s 8h"), &Declaration::dotenko(DECLARER), &[], 10)
        .unwrap();
    assert_eq!(out.multiplier, 1);
}

#[test]
fn empty_hand_is_error() {
    let field = field_by("Th", OPPONENT);
    let err = evaluate_declaration(&field, &Hand::new(), &Declaration::dotenko(DECLARER), &[], 10)
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidHand(DECLARER));
    assert!(err.is_structural());
}

#[test]
fn structural_input_errors() {
    let field = field_by("Th", OPPONENT);

    let missing_target = Declaration {
        player_id: DECLARER,
        kind: DotenkoKind::Revenge,
        target: None,
    };
    assert_eq!(
        evaluate_declaration(&field, &hand("Th"), &missing_target, &[], 10),
        Err(EngineError::MissingTarget)
    );

    assert_eq!(
        evaluate_declaration(&field, &hand("Th"), &Declaration::dotenko(DECLARER), &[], 0),
        Err(EngineError::InvalidRate)
    );

    let empty = FieldState::default();
    assert_eq!(
        evaluate_declaration(&empty, &hand("Th"), &Declaration::dotenko(DECLARER), &[], 10),
        Err(EngineError::InvalidField)
    );
    assert_eq!(
        evaluate_declaration(&empty, &hand("Th"), &Declaration::shotenko(DECLARER), &[], 10),
        Err(EngineError::InvalidField)
    );
}

#[test]
fn evaluation_is_idempotent() {
    let field = field_by("Th", OPPONENT);
    let h = hand("3s JK 6c");
    let d = Declaration::dotenko(DECLARER);
    let mods = [BonusModifier::DoublePoints, BonusModifier::WinLoseInversion];
    let a = evaluate_declaration(&field, &h, &d, &mods, 10);
    let b = evaluate_declaration(&field, &h, &d, &mods, 10);
    assert_eq!(a, b);
}

/// shotenko: цель - стартовое значение, платят все, кроме объявившего.
#[test]
fn shotenko_uses_initial_value_and_everyone_pays() {
    let field = field_by("Th", OPPONENT);
    let out = evaluate_declaration(&field, &hand("2c 3h"), &Declaration::shotenko(DECLARER), &[], 10)
        .unwrap();
    assert!(out.valid);
    assert_eq!(out.table_total, 5);
    assert_eq!(out.delta_for(DECLARER), Points(100));
    assert_eq!(out.delta_for(OPPONENT), Points(-50));
    assert_eq!(out.delta_for(3), Points(-50));
    assert!(out.delta_sum().is_zero());
}

/// Разворот: ♠3 в руке - объявивший платит.
#[test]
fn inversion_swaps_winner_and_loser() {
    let field = field_by("Th", OPPONENT);
    let mods = [BonusModifier::WinLoseInversion];
    let out = evaluate_declaration(&field, &hand("3s 7h"), &Declaration::dotenko(DECLARER), &mods, 10)
        .unwrap();
    assert!(out.valid);
    assert!(out.inverted);
    assert_eq!(out.delta_for(DECLARER), Points(-100));
    assert_eq!(out.delta_for(OPPONENT), Points(100));

    // ♦3 разворот не включает.
    let out = evaluate_declaration(&field, &hand("3d 7h"), &Declaration::dotenko(DECLARER), &mods, 10)
        .unwrap();
    assert!(!out.inverted);
}

#[test]
fn revenge_charges_field_owner() {
    let field = field_by("Th", OPPONENT);
    let out = evaluate_declaration(&field, &hand("Qs"), &Declaration::revenge(DECLARER, 12), &[], 5)
        .unwrap();
    assert!(out.valid);
    assert_eq!(out.delta_for(DECLARER), Points(60));
    assert_eq!(out.delta_for(OPPONENT), Points(-60));
    assert_eq!(out.delta_for(3), Points::ZERO);
}

/// Объявление на свои же карты не даёт очков.
#[test]
fn own_field_yields_zero_delta() {
    let field = field_by("Th", DECLARER);
    let out = evaluate_declaration(&field, &hand("Td"), &Declaration::dotenko(DECLARER), &[], 10)
        .unwrap();
    assert!(out.valid);
    assert_eq!(out.delta_for(DECLARER), Points::ZERO);
    assert!(out.delta_sum().is_zero());
}

#[test]
fn score_limit_caps_round_gain_and_keeps_zero_sum() {
    let field = field_by("Kh", OPPONENT);
    let shot = FieldState::opening(cards("Kc"), vec![DECLARER, OPPONENT, 3]);

    // 13 * 100 * 2 = 2600 с каждого из двух.
    let mods = [BonusModifier::DoublePoints];
    let mut out =
        evaluate_declaration(&shot, &hand("Ac Qh"), &Declaration::shotenko(DECLARER), &mods, 100)
            .unwrap();
    assert_eq!(out.delta_for(DECLARER), Points(5200));

    // Лимит ограничивает весь выигрыш за раунд, а не платёж каждого.
    apply_score_limit(&mut out, 1000);
    assert_eq!(out.delta_for(DECLARER), Points(1000));
    assert_eq!(out.delta_for(OPPONENT), Points(-500));
    assert_eq!(out.delta_for(3), Points(-500));
    assert!(out.delta_sum().is_zero());

    // Лимит выше платежа ничего не меняет.
    let mut small =
        evaluate_declaration(&field, &hand("Kd"), &Declaration::dotenko(DECLARER), &[], 10)
            .unwrap();
    let before = small.clone();
    apply_score_limit(&mut small, 3000);
    assert_eq!(small, before);
}

#[test]
fn valid_outcomes_are_zero_sum_for_all_modifier_sets() {
    let field = field_by("3h 4h", OPPONENT);
    let hands = ["3s 4c", "Ac 6d", "JK 7s", "2d 5c", "3c JK 3h"];
    let all = [
        BonusModifier::DoublePoints,
        BonusModifier::DiamondThreeThirty,
        BonusModifier::WinLoseInversion,
    ];
    for h in hands {
        for mask in 0..8usize {
            let mods: Vec<BonusModifier> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .map(|(_, m)| *m)
                .collect();
            let out = evaluate_declaration(&field, &hand(h), &Declaration::dotenko(DECLARER), &mods, 50)
                .unwrap();
            assert!(out.delta_sum().is_zero(), "hand {h}, mods {mods:?}");
            if !out.valid {
                assert!(out.point_delta.is_empty());
            }
        }
    }
}
