//! Интеграционные тесты для доменной модели (crate::domain).

use dotenko_engine::domain::*;

fn c(s: &str) -> Card {
    s.parse().unwrap()
}

/// Текстовый формат карт: парсинг и вывод.
#[test]
fn card_parse_and_display() {
    let ace = c("Ah");
    assert_eq!(ace.rank, Rank::Ace);
    assert_eq!(ace.suit, Some(Suit::Hearts));
    assert_eq!(ace.to_string(), "Ah");

    // '1' тоже туз.
    assert_eq!(c("1s"), Card::new(Rank::Ace, Suit::Spades));
    assert_eq!(c("td"), Card::new(Rank::Ten, Suit::Diamonds));

    let joker = c("JK");
    assert!(joker.is_joker());
    assert_eq!(joker.suit, None);
    assert_eq!(joker.to_string(), "JK");

    assert!("Xh".parse::<Card>().is_err());
    assert!("Ahh".parse::<Card>().is_err());
    assert!("A".parse::<Card>().is_err());
}

/// Джокер теряет масть даже через Card::new.
#[test]
fn joker_has_no_suit() {
    let j = Card::new(Rank::Joker, Suit::Spades);
    assert_eq!(j, Card::joker());
    assert_eq!(j.rank.value(), None);
}

#[test]
fn rank_values_round_trip() {
    for (i, rank) in Rank::NUMBERED.iter().enumerate() {
        let v = i as i32 + 1;
        assert_eq!(rank.value(), Some(v));
        assert_eq!(Rank::from_value(v), Some(*rank));
    }
    assert_eq!(Rank::from_value(0), None);
    assert_eq!(Rank::from_value(14), None);
}

#[test]
fn parse_cards_list() {
    let cards = parse_cards("3s 7h JK").unwrap();
    assert_eq!(cards, vec![c("3s"), c("7h"), Card::joker()]);
    assert!(parse_cards("3s ZZ").is_err());
    assert!(parse_cards("").unwrap().is_empty());
}

/// Колода: 52 уникальные карты + джокеры, раздача с конца.
#[test]
fn deck_with_jokers_and_draw() {
    let mut deck = Deck::with_jokers(2);
    assert_eq!(deck.len(), 54);

    let numbered: std::collections::HashSet<Card> =
        deck.cards.iter().copied().filter(|c| !c.is_joker()).collect();
    assert_eq!(numbered.len(), 52);

    // Джокеры лежат сверху.
    assert_eq!(deck.draw_one(), Some(Card::joker()));
    let two = deck.draw_n(2);
    assert_eq!(two.len(), 2);
    assert!(two[0].is_joker());
    assert_eq!(two[1], c("Kc"));
    assert_eq!(deck.len(), 51);

    let mut small = Deck::from_cards(vec![c("2h")]);
    assert_eq!(small.draw_n(5), vec![c("2h")]);
    assert!(small.is_empty());
    assert_eq!(small.draw_one(), None);
}

/// Сброс подкладывается под низ колоды.
#[test]
fn deck_refill_goes_to_bottom() {
    let mut deck = Deck::from_cards(vec![c("5h")]);
    deck.refill(vec![c("9s"), c("Td")]);
    assert_eq!(deck.len(), 3);
    assert_eq!(deck.draw_one(), Some(c("5h")));
    assert_eq!(deck.draw_one(), Some(c("Td")));
}

/// take_cards: всё или ничего.
#[test]
fn hand_take_cards_is_all_or_nothing() {
    let mut hand = Hand::from_cards(vec![c("3s"), c("3h"), Card::joker()]);
    assert_eq!(hand.jokers(), 1);

    assert!(!hand.take_cards(&[c("3s"), c("4d")]));
    assert_eq!(hand.len(), 3);

    // Одну и ту же карту дважды взять нельзя.
    assert!(!hand.take_cards(&[c("3s"), c("3s")]));
    assert_eq!(hand.len(), 3);

    assert!(hand.take_cards(&[c("3h"), Card::joker()]));
    assert_eq!(hand.cards, vec![c("3s")]);
    assert!(hand.contains(&c("3s")));
}

/// Поле: начальное значение, сумма, джокер = 0, смена владельца.
#[test]
fn field_opening_and_place() {
    let mut field = FieldState::opening(vec![c("9d")], vec![1, 2, 3]);
    assert_eq!(field.initial_value, Some(9));
    assert_eq!(field.current_total(), Some(9));
    assert_eq!(field.played_by, vec![1, 2, 3]);
    assert_eq!(field.initial_played_by, vec![1, 2, 3]);
    assert_eq!(field.top_suit(), Some(Suit::Diamonds));

    let removed = field.place(vec![c("4d"), Card::joker()], 2);
    assert_eq!(removed, vec![c("9d")]);
    assert_eq!(field.current_total(), Some(4));
    assert_eq!(field.played_by, vec![2]);
    // shotenko всё ещё смотрит на стартовое поле.
    assert_eq!(field.initial_value, Some(9));
    assert_eq!(field.initial_played_by, vec![1, 2, 3]);
    assert_eq!(field.top_card(), Some(&Card::joker()));
    assert_eq!(field.top_suit(), None);

    assert_eq!(FieldState::default().current_total(), None);
    assert!(FieldState::default().is_empty());
}

#[test]
fn points_arithmetic_and_limit() {
    let p = Points::new(300) + Points(-100);
    assert_eq!(p, Points(200));
    assert_eq!(-p, Points(-200));
    assert_eq!(p * 3, Points(600));
    assert_eq!(Points(5000).clamp_abs(3000), Points(3000));
    assert_eq!(Points(-5000).clamp_abs(3000), Points(-3000));
    assert_eq!(Points(12).to_string(), "+12");
    assert_eq!(Points(-12).to_string(), "-12");
    assert_eq!(Points::ZERO.to_string(), "0");
    let total: Points = vec![Points(1), Points(2), Points(-3)].into_iter().sum();
    assert!(total.is_zero());
}

/// Бонусные карты.
#[test]
fn bonus_triggers() {
    use BonusModifier::*;
    assert!(DoublePoints.triggered_by(&c("Ah")));
    assert!(DoublePoints.triggered_by(&c("2c")));
    assert!(DoublePoints.triggered_by(&Card::joker()));
    assert!(!DoublePoints.triggered_by(&c("3c")));

    assert!(DiamondThreeThirty.triggered_by(&c("3d")));
    assert!(!DiamondThreeThirty.triggered_by(&c("3h")));

    assert!(WinLoseInversion.triggered_by(&c("3s")));
    assert!(WinLoseInversion.triggered_by(&c("3c")));
    assert!(!WinLoseInversion.triggered_by(&c("3d")));

    let hand = [c("3s"), c("7h")];
    assert!(triggered(&[WinLoseInversion], WinLoseInversion, &hand));
    assert!(!triggered(&[DoublePoints], WinLoseInversion, &hand));
}

#[test]
fn settings_defaults_are_valid() {
    let s = GameSettings::default();
    assert_eq!(s.validate(), Ok(()));
    assert_eq!(s.rounds, 10);
    assert_eq!(s.joker_count, 2);
    assert_eq!(s.modifiers.len(), 3);
}

#[test]
fn settings_reject_values_outside_options() {
    let bad_rate = GameSettings {
        game_rate: 7,
        ..GameSettings::default()
    };
    assert_eq!(
        bad_rate.validate(),
        Err(SettingsError::InvalidSetting {
            name: "game_rate",
            value: "7".into()
        })
    );

    let bad_jokers = GameSettings {
        joker_count: 5,
        ..GameSettings::default()
    };
    assert!(bad_jokers.validate().is_err());

    let bad_limit = GameSettings {
        score_limit: Some(42),
        ..GameSettings::default()
    };
    assert!(bad_limit.validate().is_err());

    let ok_limits = GameSettings {
        score_limit: Some(3000),
        stack_rate_up: Some(4),
        deck_cycle: Some(2),
        ..GameSettings::default()
    };
    assert_eq!(ok_limits.validate(), Ok(()));
}

#[test]
fn settings_serde_json() {
    let json = r#"{
        "rounds": 3,
        "joker_count": 0,
        "game_rate": 100,
        "score_limit": 5000,
        "stack_rate_up": null,
        "deck_cycle": 1,
        "modifiers": ["DoublePoints"]
    }"#;
    let s: GameSettings = serde_json::from_str(json).unwrap();
    assert_eq!(s.rounds, 3);
    assert_eq!(s.score_limit, Some(5000));
    assert_eq!(s.modifiers, vec![BonusModifier::DoublePoints]);
    assert_eq!(s.validate(), Ok(()));
}
