//! Condition evaluation for a single row or column.
//!
//! Both entry points take the raw cells of a line, including empty slots.
//! Rules are applied to the present cards only; witness indices always refer
//! back to positions in the original cell slice.

use crate::{Card, ConditionKind, EvalRules, Rank, Suit, GRID_SIZE};
use std::collections::HashMap;
use tracing::trace;

pub fn satisfies(cells: &[Option<Card>], kind: ConditionKind) -> bool {
    satisfies_with_rules(cells, kind, EvalRules::default())
}

pub fn satisfies_with_rules(
    cells: &[Option<Card>],
    kind: ConditionKind,
    rules: EvalRules,
) -> bool {
    let valid: Vec<Card> = cells.iter().flatten().copied().collect();

    let result = match kind {
        ConditionKind::AllHearts => valid.iter().all(|card| card.suit == Suit::Hearts),
        ConditionKind::ThreeQueens => count_rank(&valid, Rank::Queen) == 3,
        ConditionKind::AscendingSequence | ConditionKind::Straight => is_contiguous_run(&valid),
        ConditionKind::FourSevens => count_rank(&valid, Rank::Seven) == 4,
        ConditionKind::AllFaceCards => valid.iter().all(Card::is_face),
        ConditionKind::ThreeOfAKind | ConditionKind::PokerHand => {
            repeated_value(&valid, 3).is_some()
        }
        ConditionKind::Flush => all_match_first(&valid, |card| card.suit),
        ConditionKind::Pair => repeated_value(&valid, 2).is_some(),
        ConditionKind::AllSameSuit => {
            valid.len() == GRID_SIZE && max_suit_count(&valid) == GRID_SIZE
        }
        ConditionKind::Descending => !rules.strict_descending || is_contiguous_run(&valid),
        ConditionKind::SumEquals => value_sum(&valid) == rules.sum_target,
        ConditionKind::AllSameRank => all_match_first(&valid, |card| card.rank),
        ConditionKind::RoyalCourt => royal_court(cells).is_some(),
    };

    trace!(condition = kind.id(), cards = valid.len(), result, "condition evaluated");
    result
}

pub fn witness(cells: &[Option<Card>], kind: ConditionKind) -> Vec<usize> {
    witness_with_rules(cells, kind, EvalRules::default())
}

/// Indices of the cells cited as evidence for `kind`, ascending.
///
/// Empty whenever the condition does not hold. A holding `SumEquals` over
/// fewer than five cards, and a default-rules `Descending` over cards that
/// are not a run, also yield no witness.
pub fn witness_with_rules(
    cells: &[Option<Card>],
    kind: ConditionKind,
    rules: EvalRules,
) -> Vec<usize> {
    if !satisfies_with_rules(cells, kind, rules) {
        return Vec::new();
    }
    let valid: Vec<Card> = cells.iter().flatten().copied().collect();

    match kind {
        ConditionKind::AllHearts => indices_where(cells, |card| card.suit == Suit::Hearts),
        ConditionKind::ThreeQueens => indices_where(cells, |card| card.rank == Rank::Queen),
        ConditionKind::FourSevens => indices_where(cells, |card| card.rank == Rank::Seven),
        ConditionKind::AllFaceCards => indices_where(cells, Card::is_face),
        ConditionKind::AscendingSequence | ConditionKind::Straight => {
            indices_where(cells, |_| true)
        }
        ConditionKind::Descending => {
            if is_contiguous_run(&valid) {
                indices_where(cells, |_| true)
            } else {
                Vec::new()
            }
        }
        ConditionKind::ThreeOfAKind | ConditionKind::PokerHand => first_of_value(cells, 3),
        ConditionKind::Pair => first_of_value(cells, 2),
        ConditionKind::Flush | ConditionKind::AllSameSuit => match valid.first() {
            Some(first) => indices_where(cells, |card| card.suit == first.suit),
            None => Vec::new(),
        },
        ConditionKind::AllSameRank => match valid.first() {
            Some(first) => indices_where(cells, |card| card.rank == first.rank),
            None => Vec::new(),
        },
        ConditionKind::SumEquals => sum_combination(cells, GRID_SIZE, rules.sum_target),
        ConditionKind::RoyalCourt => royal_court(cells)
            .map(|found| {
                let mut indices = found.to_vec();
                indices.sort_unstable();
                indices
            })
            .unwrap_or_default(),
    }
}

/// Display text for a condition, rendering the configured sum target.
pub fn format_condition(kind: ConditionKind, rules: EvalRules) -> String {
    match kind {
        ConditionKind::SumEquals => format!("Sum={}", rules.sum_target),
        other => other.label().to_string(),
    }
}

fn count_rank(cards: &[Card], rank: Rank) -> usize {
    cards.iter().filter(|card| card.rank == rank).count()
}

fn value_sum(cards: &[Card]) -> u32 {
    cards.iter().map(|card| u32::from(card.value())).sum()
}

fn all_match_first<T: PartialEq>(cards: &[Card], key: impl Fn(&Card) -> T) -> bool {
    match cards.first() {
        Some(first) => {
            let target = key(first);
            cards.iter().all(|card| key(card) == target)
        }
        None => true,
    }
}

fn max_suit_count(cards: &[Card]) -> usize {
    let mut counts: HashMap<Suit, usize> = HashMap::new();
    for card in cards {
        *counts.entry(card.suit).or_insert(0) += 1;
    }
    counts.values().copied().max().unwrap_or(0)
}

// Sorted values must read min, min+1, ..., min+n-1; duplicates break the run.
fn is_contiguous_run(cards: &[Card]) -> bool {
    let mut values: Vec<u8> = cards.iter().map(Card::value).collect();
    values.sort_unstable();
    values.windows(2).all(|w| w[1] == w[0] + 1)
}

/// First rank value, in scan order, that appears at least `count` times.
fn repeated_value(cards: &[Card], count: usize) -> Option<u8> {
    let mut counts: HashMap<u8, usize> = HashMap::new();
    for card in cards {
        *counts.entry(card.value()).or_insert(0) += 1;
    }
    cards
        .iter()
        .map(Card::value)
        .find(|value| counts.get(value).copied().unwrap_or(0) >= count)
}

fn first_of_value(cells: &[Option<Card>], count: usize) -> Vec<usize> {
    let valid: Vec<Card> = cells.iter().flatten().copied().collect();
    let Some(target) = repeated_value(&valid, count) else {
        return Vec::new();
    };
    cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_some_and(|card| card.value() == target))
        .map(|(idx, _)| idx)
        .take(count)
        .collect()
}

fn indices_where(cells: &[Option<Card>], pred: impl Fn(&Card) -> bool) -> Vec<usize> {
    cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.as_ref().is_some_and(&pred))
        .map(|(idx, _)| idx)
        .collect()
}

/// Positions of the first king, queen and jack in scan order.
fn royal_court(cells: &[Option<Card>]) -> Option<[usize; 3]> {
    let mut king = None;
    let mut queen = None;
    let mut jack = None;
    for (idx, cell) in cells.iter().enumerate() {
        let Some(card) = cell else { continue };
        match card.rank {
            Rank::King if king.is_none() => king = Some(idx),
            Rank::Queen if queen.is_none() => queen = Some(idx),
            Rank::Jack if jack.is_none() => jack = Some(idx),
            _ => {}
        }
    }
    Some([king?, queen?, jack?])
}

/// First `size`-card combination, in ascending index order, whose values
/// sum to `target`.
fn sum_combination(cells: &[Option<Card>], size: usize, target: u32) -> Vec<usize> {
    let present: Vec<(usize, u32)> = cells
        .iter()
        .enumerate()
        .filter_map(|(idx, cell)| cell.map(|card| (idx, u32::from(card.value()))))
        .collect();
    let mut picked = Vec::with_capacity(size);
    if pick_combination(&present, 0, size, target, &mut picked) {
        picked
    } else {
        Vec::new()
    }
}

fn pick_combination(
    present: &[(usize, u32)],
    start: usize,
    remaining: usize,
    target: u32,
    picked: &mut Vec<usize>,
) -> bool {
    if remaining == 0 {
        return target == 0;
    }
    for pos in start..present.len() {
        let (idx, value) = present[pos];
        if value > target {
            continue;
        }
        picked.push(idx);
        if pick_combination(present, pos + 1, remaining - 1, target - value, picked) {
            return true;
        }
        picked.pop();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(specs: &[(Suit, Rank)]) -> Vec<Option<Card>> {
        specs
            .iter()
            .map(|(suit, rank)| Some(Card::new(*suit, *rank)))
            .collect()
    }

    #[test]
    fn royal_court_claims_each_rank_once() {
        let cells = line(&[
            (Suit::Spades, Rank::Jack),
            (Suit::Hearts, Rank::Jack),
            (Suit::Clubs, Rank::Queen),
            (Suit::Diamonds, Rank::King),
            (Suit::Spades, Rank::King),
        ]);
        assert_eq!(royal_court(&cells), Some([3, 2, 0]));
        assert_eq!(witness(&cells, ConditionKind::RoyalCourt), vec![0, 2, 3]);
    }

    #[test]
    fn sum_combination_skips_empty_cells() {
        let mut cells = line(&[
            (Suit::Spades, Rank::Two),
            (Suit::Hearts, Rank::Three),
            (Suit::Clubs, Rank::Three),
            (Suit::Diamonds, Rank::Three),
            (Suit::Spades, Rank::Four),
        ]);
        assert_eq!(sum_combination(&cells, 5, 15), vec![0, 1, 2, 3, 4]);
        cells[2] = None;
        assert!(sum_combination(&cells, 5, 12).is_empty());
    }

    #[test]
    fn contiguous_run_rejects_duplicates() {
        let cards = [
            Card::new(Suit::Spades, Rank::Three),
            Card::new(Suit::Hearts, Rank::Three),
            Card::new(Suit::Clubs, Rank::Four),
        ];
        assert!(!is_contiguous_run(&cards));
        assert!(is_contiguous_run(&cards[1..]));
        assert!(is_contiguous_run(&[]));
    }

    #[test]
    fn sum_target_label_follows_rules() {
        let rules = EvalRules {
            sum_target: 21,
            ..EvalRules::default()
        };
        assert_eq!(format_condition(ConditionKind::SumEquals, rules), "Sum=21");
        assert_eq!(
            format_condition(ConditionKind::SumEquals, EvalRules::default()),
            "Sum=15"
        );
        assert_eq!(format_condition(ConditionKind::Pair, rules), "Pair");
    }
}
