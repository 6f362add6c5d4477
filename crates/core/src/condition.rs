use crate::{Line, GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A rule attached to one row or column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    AllHearts,
    ThreeQueens,
    AscendingSequence,
    FourSevens,
    AllFaceCards,
    ThreeOfAKind,
    Flush,
    Straight,
    Pair,
    AllSameSuit,
    Descending,
    SumEquals,
    PokerHand,
    AllSameRank,
    RoyalCourt,
}

impl ConditionKind {
    pub const ALL: [ConditionKind; 15] = [
        ConditionKind::AllHearts,
        ConditionKind::ThreeQueens,
        ConditionKind::AscendingSequence,
        ConditionKind::FourSevens,
        ConditionKind::AllFaceCards,
        ConditionKind::ThreeOfAKind,
        ConditionKind::Flush,
        ConditionKind::Straight,
        ConditionKind::Pair,
        ConditionKind::AllSameSuit,
        ConditionKind::Descending,
        ConditionKind::SumEquals,
        ConditionKind::PokerHand,
        ConditionKind::AllSameRank,
        ConditionKind::RoyalCourt,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ConditionKind::AllHearts => "all_hearts",
            ConditionKind::ThreeQueens => "three_queens",
            ConditionKind::AscendingSequence => "ascending_sequence",
            ConditionKind::FourSevens => "four_sevens",
            ConditionKind::AllFaceCards => "all_face_cards",
            ConditionKind::ThreeOfAKind => "three_of_a_kind",
            ConditionKind::Flush => "flush",
            ConditionKind::Straight => "straight",
            ConditionKind::Pair => "pair",
            ConditionKind::AllSameSuit => "all_same_suit",
            ConditionKind::Descending => "descending",
            ConditionKind::SumEquals => "sum_equals",
            ConditionKind::PokerHand => "poker_hand",
            ConditionKind::AllSameRank => "all_same_rank",
            ConditionKind::RoyalCourt => "royal_court",
        }
    }

    /// Short text shown next to a row or column.
    ///
    /// `SumEquals` renders the default target; use
    /// [`crate::format_condition`] to render a configured one.
    pub fn label(self) -> &'static str {
        match self {
            ConditionKind::AllHearts => "All ♥",
            ConditionKind::ThreeQueens => "3 Queens",
            ConditionKind::AscendingSequence => "Low to high",
            ConditionKind::FourSevens => "4 Sevens",
            ConditionKind::AllFaceCards => "All face cards",
            ConditionKind::ThreeOfAKind => "3 of a kind",
            ConditionKind::Flush => "Flush",
            ConditionKind::Straight => "Straight",
            ConditionKind::Pair => "Pair",
            ConditionKind::AllSameSuit => "All same suit",
            ConditionKind::Descending => "High to Low",
            ConditionKind::SumEquals => "Sum=15",
            ConditionKind::PokerHand => "3 of a kind",
            ConditionKind::AllSameRank => "All same rank",
            ConditionKind::RoyalCourt => "Royal Court",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One condition per row and per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineConditions {
    pub rows: [ConditionKind; GRID_SIZE],
    pub columns: [ConditionKind; GRID_SIZE],
}

impl LineConditions {
    pub fn new(rows: [ConditionKind; GRID_SIZE], columns: [ConditionKind; GRID_SIZE]) -> Self {
        Self { rows, columns }
    }

    pub fn get(&self, line: Line) -> Option<ConditionKind> {
        match line {
            Line::Row(idx) => self.rows.get(idx).copied(),
            Line::Column(idx) => self.columns.get(idx).copied(),
        }
    }

    /// Every line with its condition, rows first.
    pub fn iter(&self) -> impl Iterator<Item = (Line, ConditionKind)> + '_ {
        Line::ALL
            .into_iter()
            .filter_map(move |line| self.get(line).map(|kind| (line, kind)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown condition '{0}'")]
pub struct ConditionParseError(pub String);

/// Accepts the snake_case id (`three_of_a_kind`) or the camelCase name
/// (`threeOfAKind`), case-insensitively.
impl FromStr for ConditionKind {
    type Err = ConditionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key: String = value
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        ConditionKind::ALL
            .into_iter()
            .find(|kind| kind.id().replace('_', "") == key)
            .ok_or_else(|| ConditionParseError(value.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_camel_case_names() {
        assert_eq!("pair".parse(), Ok(ConditionKind::Pair));
        assert_eq!("three_of_a_kind".parse(), Ok(ConditionKind::ThreeOfAKind));
        assert_eq!("threeOfAKind".parse(), Ok(ConditionKind::ThreeOfAKind));
        assert_eq!(" Royal-Court ".parse(), Ok(ConditionKind::RoyalCourt));
        assert_eq!(
            "full_house".parse::<ConditionKind>(),
            Err(ConditionParseError("full_house".to_string()))
        );
    }

    #[test]
    fn poker_hand_shares_the_three_of_a_kind_label() {
        assert_eq!(
            ConditionKind::PokerHand.label(),
            ConditionKind::ThreeOfAKind.label()
        );
    }
}
