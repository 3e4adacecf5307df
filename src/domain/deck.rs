use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Колода карт. В домене - просто упорядоченный список карт.
/// Перемешивание делает engine (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартные 52 карты + `joker_count` джокеров в порядке:
    /// Spades A..K, Hearts A..K, Diamonds A..K, Clubs A..K, затем джокеры.
    pub fn with_jokers(joker_count: u8) -> Self {
        let mut cards = Vec::with_capacity(52 + joker_count as usize);
        for suit in Suit::ALL {
            for rank in Rank::NUMBERED {
                cards.push(Card::new(rank, suit));
            }
        }
        cards.extend((0..joker_count).map(|_| Card::joker()));
        Deck { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху колоды.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Взять n карт сверху.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let mut taken = Vec::with_capacity(n);
        for _ in 0..n {
            if let Some(card) = self.cards.pop() {
                taken.push(card);
            } else {
                break;
            }
        }
        taken
    }

    /// Подложить карты под низ колоды (сброс после перетасовки).
    pub fn refill(&mut self, cards: Vec<Card>) {
        let mut refilled = cards;
        refilled.append(&mut self.cards);
        self.cards = refilled;
    }
}
