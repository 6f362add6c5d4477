//! Best-of-N shuffle that looks for a starting layout with as few conditions
//! already satisfied as possible.

use crate::{
    satisfies_with_rules, Card, EvalRules, Grid, Line, LineConditions, RngState, SearchConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub grid: Grid,
    /// Conditions the chosen layout already satisfies.
    pub satisfied: usize,
    /// Zero-based trial that produced the layout.
    pub trial: usize,
    pub trials_run: usize,
}

pub fn satisfied_lines(grid: &Grid, conditions: &LineConditions, rules: EvalRules) -> Vec<Line> {
    conditions
        .iter()
        .filter(|(line, kind)| satisfies_with_rules(&grid.line(*line), *kind, rules))
        .map(|(line, _)| line)
        .collect()
}

pub fn count_satisfied(grid: &Grid, conditions: &LineConditions, rules: EvalRules) -> usize {
    conditions
        .iter()
        .filter(|(line, kind)| satisfies_with_rules(&grid.line(*line), *kind, rules))
        .count()
}

/// Default-configured search returning only the layout.
pub fn search(cards: &[Card], conditions: &LineConditions, rng: &mut RngState) -> Grid {
    search_layout(
        cards,
        conditions,
        EvalRules::default(),
        SearchConfig::default(),
        rng,
    )
    .grid
}

/// Shuffles `cards` into the grid `config.trials` times and keeps the first
/// layout with the lowest satisfied count. Never fails: with zero trials the
/// result is a single random placement.
pub fn search_layout(
    cards: &[Card],
    conditions: &LineConditions,
    rules: EvalRules,
    config: SearchConfig,
    rng: &mut RngState,
) -> SearchOutcome {
    let mut deck = cards.to_vec();
    let mut best: Option<SearchOutcome> = None;
    let mut trials_run = 0;

    for trial in 0..config.trials {
        rng.shuffle(&mut deck);
        let grid = Grid::from_row_major(&deck);
        let satisfied = count_satisfied(&grid, conditions, rules);
        trials_run += 1;
        trace!(trial, satisfied, "layout trial");

        // Strictly fewer: ties keep the earlier layout.
        if best.map_or(true, |current| satisfied < current.satisfied) {
            debug!(trial, satisfied, "new best layout");
            best = Some(SearchOutcome {
                grid,
                satisfied,
                trial,
                trials_run,
            });
        }

        if let (Some(limit), Some(current)) = (config.stop_at, best) {
            if current.satisfied <= limit {
                debug!(trial, limit, "stopping early");
                break;
            }
        }
    }

    let outcome = match best {
        Some(found) => SearchOutcome {
            trials_run,
            ..found
        },
        None => {
            debug!("no trials ran, falling back to one random placement");
            rng.shuffle(&mut deck);
            let grid = Grid::from_row_major(&deck);
            SearchOutcome {
                grid,
                satisfied: count_satisfied(&grid, conditions, rules),
                trial: 0,
                trials_run,
            }
        }
    };
    debug!(
        satisfied = outcome.satisfied,
        trial = outcome.trial,
        trials_run = outcome.trials_run,
        seed = rng.seed(),
        "layout search finished"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConditionKind, Rank, Suit};

    fn deck(count: usize) -> Vec<Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(suit, rank)))
            .take(count)
            .collect()
    }

    fn all(kind: ConditionKind) -> LineConditions {
        LineConditions::new([kind; 5], [kind; 5])
    }

    #[test]
    fn zero_trials_falls_back_to_random_placement() {
        let cards = deck(25);
        let config = SearchConfig {
            trials: 0,
            stop_at: None,
        };
        let mut rng = RngState::from_seed(3);
        let outcome = search_layout(
            &cards,
            &all(ConditionKind::Pair),
            EvalRules::default(),
            config,
            &mut rng,
        );
        assert_eq!(outcome.trials_run, 0);
        assert_eq!(outcome.grid.card_count(), 25);
    }

    #[test]
    fn stop_at_ends_the_loop_early() {
        // No line of 25 distinct cards can hold four sevens.
        let cards = deck(25);
        let config = SearchConfig {
            trials: 100,
            stop_at: Some(0),
        };
        let mut rng = RngState::from_seed(11);
        let outcome = search_layout(
            &cards,
            &all(ConditionKind::FourSevens),
            EvalRules::default(),
            config,
            &mut rng,
        );
        assert_eq!(outcome.satisfied, 0);
        assert_eq!(outcome.trial, 0);
        assert_eq!(outcome.trials_run, 1);
    }

    #[test]
    fn always_true_conditions_score_every_line() {
        let cards = deck(25);
        let mut rng = RngState::from_seed(5);
        let outcome = search_layout(
            &cards,
            &all(ConditionKind::Descending),
            EvalRules::default(),
            SearchConfig::default(),
            &mut rng,
        );
        assert_eq!(outcome.satisfied, 10);
        // Every trial ties, so the first one is kept.
        assert_eq!(outcome.trial, 0);
        assert_eq!(outcome.trials_run, 100);
    }
}
