use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Масть карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
}

/// Ранг карты. Туз = 1, король = 13, джокер отдельно (без числа).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Joker = 0,
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// Все числовые ранги A..K (без джокера).
    pub const NUMBERED: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Числовое значение ранга (A=1..K=13). У джокера своего числа нет.
    pub fn value(self) -> Option<i32> {
        match self {
            Rank::Joker => None,
            r => Some(r as i32),
        }
    }

    /// Обратное преобразование 1..=13 -> Rank.
    pub fn from_value(v: i32) -> Option<Rank> {
        if (1..=13).contains(&v) {
            Some(Rank::NUMBERED[(v - 1) as usize])
        } else {
            None
        }
    }
}

/// Карта колоды дотенко. У джокера масти нет (`suit == None`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Option<Suit>,
}

impl Card {
    /// Обычная карта. Для `Rank::Joker` масть отбрасывается.
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        if matches!(rank, Rank::Joker) {
            Self::joker()
        } else {
            Self {
                rank,
                suit: Some(suit),
            }
        }
    }

    pub const fn joker() -> Self {
        Self {
            rank: Rank::Joker,
            suit: None,
        }
    }

    pub fn is_joker(&self) -> bool {
        self.rank == Rank::Joker
    }

    /// Ровно эта карта (ранг + масть)? Удобно для бонусных карт вроде ♦3.
    pub fn is(&self, rank: Rank, suit: Suit) -> bool {
        self.rank == rank && self.suit == Some(suit)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rank::Joker => "JK",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "T",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `3s`; джокер - `JK`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(suit) if !self.is_joker() => write!(f, "{}{}", self.rank, suit),
            _ => write!(f, "{}", Rank::Joker),
        }
    }
}

/// Парсинг строки вида "Ah", "Td", "3s" или "JK".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("JK") {
            return Ok(Card::joker());
        }

        let mut chars = s.chars();
        let (r_ch, s_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => return Err("Card string must have length 2".into()),
        };

        let rank = match r_ch {
            'A' | 'a' | '1' => Rank::Ace,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' | 't' => Rank::Ten,
            'J' | 'j' => Rank::Jack,
            'Q' | 'q' => Rank::Queen,
            'K' | 'k' => Rank::King,
            _ => return Err(format!("Invalid rank: {r_ch}")),
        };

        let suit = match s_ch {
            'c' | 'C' => Suit::Clubs,
            'd' | 'D' => Suit::Diamonds,
            'h' | 'H' => Suit::Hearts,
            's' | 'S' => Suit::Spades,
            _ => return Err(format!("Invalid suit: {s_ch}")),
        };

        Ok(Card::new(rank, suit))
    }
}

/// Разобрать список карт через пробел: "3s 7h JK".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, String> {
    s.split_whitespace().map(str::parse).collect()
}
