use crate::domain::bonus::BonusModifier;
use crate::domain::card::Card;
use crate::domain::rules::DIAMOND_THREE_VALUE;

/// Число карты в руке с учётом бонусов.
///
/// Джокер своего числа не имеет (`None`), его подбирает `joker::resolve_jokers`.
/// ♦3 при `DiamondThreeThirty` даёт 30; ♠3/♣3 всегда дают 3.
pub fn card_value(card: &Card, modifiers: &[BonusModifier]) -> Option<i32> {
    let base = card.rank.value()?;
    let diamond_three = BonusModifier::DiamondThreeThirty;
    if modifiers.contains(&diamond_three) && diamond_three.triggered_by(card) {
        Some(DIAMOND_THREE_VALUE)
    } else {
        Some(base)
    }
}

/// Сумма всех не-джокерных карт.
pub fn fixed_sum(cards: &[Card], modifiers: &[BonusModifier]) -> i32 {
    cards.iter().filter_map(|c| card_value(c, modifiers)).sum()
}
