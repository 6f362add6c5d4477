//! Puzzle state: the authored solution, the shuffled starting layout and the
//! player's current arrangement, plus the ten line conditions.

use crate::{
    find_duplicate, format_condition, satisfies_with_rules, search_layout, validate_puzzle,
    witness_with_rules, Card, ConditionKind, EvalRules, EventBus, Grid, GridError, Line,
    LineConditions, Pos, PuzzleEvent, RngState, SearchConfig, SearchOutcome, GRID_SIZE,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleFixture {
    pub name: String,
    /// Authored solved arrangement.
    pub layout: Grid,
    pub conditions: LineConditions,
    #[serde(default)]
    pub rules: EvalRules,
}

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("puzzle setup contains duplicate card {0}")]
    DuplicateCard(Card),
    #[error("replacement grid does not hold the puzzle's cards")]
    CardsChanged,
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

/// Evaluation of one line against its condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStatus {
    pub line: Line,
    pub condition: ConditionKind,
    pub satisfied: bool,
    /// Cell indices within the line to highlight.
    pub witness: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionReport {
    pub rows: Vec<usize>,
    pub columns: Vec<usize>,
}

impl ConditionReport {
    pub fn total(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    pub fn is_solved(&self) -> bool {
        self.rows.len() == GRID_SIZE && self.columns.len() == GRID_SIZE
    }
}

#[derive(Debug)]
pub struct Puzzle {
    name: String,
    current: Grid,
    solution: Grid,
    initial: Grid,
    conditions: LineConditions,
    rules: EvalRules,
    events: EventBus,
}

impl Puzzle {
    /// Builds the puzzle in its solved arrangement. Duplicate cards are a
    /// setup error and abort construction; other validation findings are
    /// only logged.
    pub fn new(fixture: PuzzleFixture) -> Result<Self, PuzzleError> {
        if let Some(card) = find_duplicate(&fixture.layout) {
            error!(%card, puzzle = %fixture.name, "duplicate card in puzzle setup");
            return Err(PuzzleError::DuplicateCard(card));
        }

        let report = validate_puzzle(&fixture.layout, &fixture.conditions, fixture.rules);
        if report.is_valid() {
            info!(puzzle = %fixture.name, "puzzle validation successful");
        } else {
            for issue in &report.issues {
                warn!(puzzle = %fixture.name, %issue, "puzzle validation issue");
            }
        }

        Ok(Self {
            name: fixture.name,
            current: fixture.layout,
            solution: fixture.layout,
            initial: fixture.layout,
            conditions: fixture.conditions,
            rules: fixture.rules,
            events: EventBus::default(),
        })
    }

    /// Builds the puzzle and shuffles it into a starting layout.
    pub fn with_shuffle(
        fixture: PuzzleFixture,
        config: SearchConfig,
        rng: &mut RngState,
    ) -> Result<Self, PuzzleError> {
        let mut puzzle = Self::new(fixture)?;
        puzzle.shuffle_with(config, rng);
        Ok(puzzle)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn solution(&self) -> &Grid {
        &self.solution
    }

    pub fn initial(&self) -> &Grid {
        &self.initial
    }

    pub fn conditions(&self) -> &LineConditions {
        &self.conditions
    }

    pub fn rules(&self) -> EvalRules {
        self.rules
    }

    pub fn reset_to_initial_state(&mut self) {
        debug!(puzzle = %self.name, "resetting to initial state");
        self.current = self.initial;
        self.events.push(PuzzleEvent::Reset);
        self.note_if_solved();
    }

    pub fn shuffle_initial_state(&mut self, rng: &mut RngState) -> SearchOutcome {
        self.shuffle_with(SearchConfig::default(), rng)
    }

    /// Runs the layout search over the current cards and installs the result
    /// as both the starting and the current arrangement.
    pub fn shuffle_with(&mut self, config: SearchConfig, rng: &mut RngState) -> SearchOutcome {
        let cards: Vec<Card> = self.current.cards().collect();
        debug!(puzzle = %self.name, cards = cards.len(), "shuffling initial state");
        let outcome = search_layout(&cards, &self.conditions, self.rules, config, rng);
        self.initial = outcome.grid;
        self.current = outcome.grid;
        self.events.push(PuzzleEvent::Shuffled {
            satisfied: outcome.satisfied,
            trial: outcome.trial,
            seed: rng.seed(),
        });
        outcome
    }

    pub fn swap_cells(&mut self, from: Pos, to: Pos) -> Result<(), PuzzleError> {
        let mut next = self.current;
        next.swap(from, to)?;
        self.current = next;
        self.events.push(PuzzleEvent::CellsSwapped { from, to });
        self.note_if_solved();
        Ok(())
    }

    /// Replaces the current arrangement wholesale. The new grid must hold
    /// exactly the puzzle's cards.
    pub fn set_current(&mut self, grid: Grid) -> Result<(), PuzzleError> {
        if grid.sorted_cards() != self.solution.sorted_cards() {
            return Err(PuzzleError::CardsChanged);
        }
        self.current = grid;
        self.events.push(PuzzleEvent::GridReplaced);
        self.note_if_solved();
        Ok(())
    }

    pub fn is_condition_satisfied(
        &self,
        cells: &[Option<Card>],
        condition: ConditionKind,
    ) -> bool {
        satisfies_with_rules(cells, condition, self.rules)
    }

    pub fn satisfying_cards(
        &self,
        condition: ConditionKind,
        cells: &[Option<Card>],
    ) -> Vec<usize> {
        witness_with_rules(cells, condition, self.rules)
    }

    pub fn format_condition(&self, condition: ConditionKind) -> String {
        format_condition(condition, self.rules)
    }

    pub fn line_status(&self, line: Line) -> Option<LineStatus> {
        let condition = self.conditions.get(line)?;
        let cells = self.current.line(line);
        Some(LineStatus {
            line,
            condition,
            satisfied: self.is_condition_satisfied(&cells, condition),
            witness: self.satisfying_cards(condition, &cells),
        })
    }

    /// Status of every row, then every column.
    pub fn statuses(&self) -> Vec<LineStatus> {
        Line::ALL
            .into_iter()
            .filter_map(|line| self.line_status(line))
            .collect()
    }

    pub fn check_all_conditions(&self) -> ConditionReport {
        let mut report = ConditionReport::default();
        for (line, condition) in self.conditions.iter() {
            let cells = self.current.line(line);
            if !self.is_condition_satisfied(&cells, condition) {
                continue;
            }
            debug!(%line, condition = condition.id(), "condition satisfied");
            match line {
                Line::Row(idx) => report.rows.push(idx),
                Line::Column(idx) => report.columns.push(idx),
            }
        }
        report
    }

    pub fn is_solved(&self) -> bool {
        self.check_all_conditions().is_solved()
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = PuzzleEvent> + '_ {
        self.events.drain()
    }

    fn note_if_solved(&mut self) {
        if self.is_solved() {
            info!(puzzle = %self.name, "puzzle solved");
            self.events.push(PuzzleEvent::Solved);
        }
    }
}
