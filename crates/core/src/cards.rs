use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
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
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
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
        Rank::Ace,
    ];

    /// Numeric value used by sequence, sum and grouping rules. Ace is high.
    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    pub fn is_face(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    pub fn short(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn is_face(&self) -> bool {
        self.rank.is_face()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.short(), self.suit.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("empty card token")]
    Empty,
    #[error("unknown rank in card token '{0}'")]
    UnknownRank(String),
    #[error("unknown suit in card token '{0}'")]
    UnknownSuit(String),
}

/// Accepts `As`, `10h`, `Td`, `K♣`, `queen hearts`, `seven_of_clubs`.
impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let token = normalize(value);
        if token.is_empty() {
            return Err(CardParseError::Empty);
        }
        let words: Vec<&str> = token
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|word| !word.is_empty() && *word != "of")
            .collect();
        let (rank_part, suit_part) = match words.as_slice() {
            [rank, suit] => (*rank, *suit),
            [single] => split_compact(single)
                .ok_or_else(|| CardParseError::UnknownSuit(token.clone()))?,
            _ => return Err(CardParseError::UnknownRank(token.clone())),
        };
        let rank =
            rank_from_str(rank_part).ok_or_else(|| CardParseError::UnknownRank(token.clone()))?;
        let suit =
            suit_from_str(suit_part).ok_or_else(|| CardParseError::UnknownSuit(token.clone()))?;
        Ok(Card::new(suit, rank))
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

// Compact tokens carry the suit as their last character.
fn split_compact(token: &str) -> Option<(&str, &str)> {
    let (idx, _) = token.char_indices().last()?;
    if idx == 0 {
        return None;
    }
    Some((&token[..idx], &token[idx..]))
}

pub fn suit_from_str(value: &str) -> Option<Suit> {
    match normalize(value).as_str() {
        "spades" | "spade" | "s" | "♠" => Some(Suit::Spades),
        "hearts" | "heart" | "h" | "♥" => Some(Suit::Hearts),
        "clubs" | "club" | "c" | "♣" => Some(Suit::Clubs),
        "diamonds" | "diamond" | "d" | "♦" => Some(Suit::Diamonds),
        _ => None,
    }
}

pub fn rank_from_str(value: &str) -> Option<Rank> {
    match normalize(value).as_str() {
        "two" | "2" => Some(Rank::Two),
        "three" | "3" => Some(Rank::Three),
        "four" | "4" => Some(Rank::Four),
        "five" | "5" => Some(Rank::Five),
        "six" | "6" => Some(Rank::Six),
        "seven" | "7" => Some(Rank::Seven),
        "eight" | "8" => Some(Rank::Eight),
        "nine" | "9" => Some(Rank::Nine),
        "ten" | "10" | "t" => Some(Rank::Ten),
        "jack" | "j" => Some(Rank::Jack),
        "queen" | "q" => Some(Rank::Queen),
        "king" | "k" => Some(Rank::King),
        "ace" | "a" => Some(Rank::Ace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_and_long_tokens() {
        assert_eq!("As".parse(), Ok(Card::new(Suit::Spades, Rank::Ace)));
        assert_eq!("10h".parse(), Ok(Card::new(Suit::Hearts, Rank::Ten)));
        assert_eq!("K♣".parse(), Ok(Card::new(Suit::Clubs, Rank::King)));
        assert_eq!(
            "queen of diamonds".parse(),
            Ok(Card::new(Suit::Diamonds, Rank::Queen))
        );
        assert_eq!("seven_hearts".parse(), Ok(Card::new(Suit::Hearts, Rank::Seven)));
    }

    #[test]
    fn rejects_bad_tokens() {
        assert_eq!("".parse::<Card>(), Err(CardParseError::Empty));
        assert!(matches!("1s".parse::<Card>(), Err(CardParseError::UnknownRank(_))));
        assert!(matches!("Ax".parse::<Card>(), Err(CardParseError::UnknownSuit(_))));
        assert!(matches!("s".parse::<Card>(), Err(CardParseError::UnknownSuit(_))));
    }

    #[test]
    fn ace_is_high_and_not_a_face_card() {
        assert_eq!(Rank::Ace.value(), 14);
        assert!(!Rank::Ace.is_face());
        assert!(Rank::Jack.is_face() && Rank::Queen.is_face() && Rank::King.is_face());
    }
}
