use crate::{satisfies_with_rules, Card, EvalRules, Grid, Line, LineConditions, Pos, GRID_CELLS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssue {
    DuplicateCard(Card),
    EmptyCell(Pos),
    CardCount { expected: usize, found: usize },
    Unsatisfied(Line),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::DuplicateCard(card) => write!(f, "duplicate card {card}"),
            ValidationIssue::EmptyCell(pos) => write!(f, "empty cell at {pos}"),
            ValidationIssue::CardCount { expected, found } => {
                write!(f, "expected {expected} cards, found {found}")
            }
            ValidationIssue::Unsatisfied(line) => {
                write!(f, "{line} does not satisfy its condition in the solution")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// First card that appears more than once, in row-major order.
pub fn find_duplicate(grid: &Grid) -> Option<Card> {
    let mut seen = HashSet::new();
    grid.cards().find(|card| !seen.insert(*card))
}

/// Checks an authored solution: full grid, distinct cards, and every line
/// satisfying its declared condition.
pub fn validate_puzzle(
    solution: &Grid,
    conditions: &LineConditions,
    rules: EvalRules,
) -> ValidationReport {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    for card in solution.cards() {
        if !seen.insert(card) {
            issues.push(ValidationIssue::DuplicateCard(card));
        }
    }

    for (row, cells) in solution.rows().iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if cell.is_none() {
                issues.push(ValidationIssue::EmptyCell(Pos::new(row, col)));
            }
        }
    }

    let found = solution.card_count();
    if found != GRID_CELLS {
        issues.push(ValidationIssue::CardCount {
            expected: GRID_CELLS,
            found,
        });
    }

    for (line, kind) in conditions.iter() {
        if !satisfies_with_rules(&solution.line(line), kind, rules) {
            issues.push(ValidationIssue::Unsatisfied(line));
        }
    }

    ValidationReport { issues }
}
