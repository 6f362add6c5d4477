use crate::Card;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const GRID_SIZE: usize = 5;
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;

pub type Cells = [Option<Card>; GRID_SIZE];

/// A row or a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    Row(usize),
    Column(usize),
}

impl Line {
    /// Rows 0..5 followed by columns 0..5.
    pub const ALL: [Line; 2 * GRID_SIZE] = [
        Line::Row(0),
        Line::Row(1),
        Line::Row(2),
        Line::Row(3),
        Line::Row(4),
        Line::Column(0),
        Line::Column(1),
        Line::Column(2),
        Line::Column(3),
        Line::Column(4),
    ];

    pub fn index(self) -> usize {
        match self {
            Line::Row(idx) | Line::Column(idx) => idx,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(idx) => write!(f, "row {idx}"),
            Line::Column(idx) => write!(f, "column {idx}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position {0} is outside the grid")]
    OutOfBounds(Pos),
}

/// 5×5 card layout. Cells may be empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: [Cells; GRID_SIZE],
}

impl Grid {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(cells: [Cells; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// Fills cells row-major; cells past the end of `cards` stay empty and
    /// cards past the 25th are ignored.
    pub fn from_row_major(cards: &[Card]) -> Self {
        let mut grid = Self::empty();
        for (idx, card) in cards.iter().take(GRID_CELLS).enumerate() {
            grid.cells[idx / GRID_SIZE][idx % GRID_SIZE] = Some(*card);
        }
        grid
    }

    pub fn rows(&self) -> &[Cells; GRID_SIZE] {
        &self.cells
    }

    pub fn row(&self, row: usize) -> Cells {
        self.cells.get(row).copied().unwrap_or([None; GRID_SIZE])
    }

    pub fn column(&self, col: usize) -> Cells {
        let mut out = [None; GRID_SIZE];
        for (row, cells) in self.cells.iter().enumerate() {
            out[row] = cells.get(col).copied().flatten();
        }
        out
    }

    pub fn line(&self, line: Line) -> Cells {
        match line {
            Line::Row(idx) => self.row(idx),
            Line::Column(idx) => self.column(idx),
        }
    }

    pub fn get(&self, pos: Pos) -> Option<Card> {
        self.cells
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .copied()
            .flatten()
    }

    pub fn set(&mut self, pos: Pos, card: Option<Card>) -> Result<Option<Card>, GridError> {
        let slot = self.slot_mut(pos)?;
        Ok(std::mem::replace(slot, card))
    }

    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<(), GridError> {
        let first = *self.slot_mut(a)?;
        let second = std::mem::replace(self.slot_mut(b)?, first);
        *self.slot_mut(a)? = second;
        Ok(())
    }

    /// Present cards in row-major order.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cells.iter().flat_map(|row| row.iter().flatten().copied())
    }

    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    /// Present cards in a canonical order, for multiset comparison.
    pub fn sorted_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.cards().collect();
        cards.sort_by_key(|card| (card.suit, card.rank));
        cards
    }

    fn slot_mut(&mut self, pos: Pos) -> Result<&mut Option<Card>, GridError> {
        self.cells
            .get_mut(pos.row)
            .and_then(|row| row.get_mut(pos.col))
            .ok_or(GridError::OutOfBounds(pos))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let labels: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(card) => format!("{:>3}", card.to_string()),
                    None => "  .".to_string(),
                })
                .collect();
            writeln!(f, "{}", labels.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};

    fn sample_cards(count: usize) -> Vec<Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(suit, rank)))
            .take(count)
            .collect()
    }

    #[test]
    fn row_major_placement_and_columns() {
        let cards = sample_cards(25);
        let grid = Grid::from_row_major(&cards);
        assert_eq!(grid.row(1)[0], Some(cards[5]));
        assert_eq!(grid.column(2)[3], Some(cards[17]));
        assert_eq!(grid.line(Line::Column(4))[4], Some(cards[24]));
        assert_eq!(grid.card_count(), 25);
    }

    #[test]
    fn short_card_lists_leave_trailing_cells_empty() {
        let grid = Grid::from_row_major(&sample_cards(7));
        assert_eq!(grid.card_count(), 7);
        assert_eq!(grid.get(Pos::new(1, 1)), Some(sample_cards(7)[6]));
        assert_eq!(grid.get(Pos::new(1, 2)), None);
    }

    #[test]
    fn swap_exchanges_cells_and_rejects_out_of_bounds() {
        let cards = sample_cards(25);
        let mut grid = Grid::from_row_major(&cards);
        grid.swap(Pos::new(0, 0), Pos::new(4, 4)).expect("swap");
        assert_eq!(grid.get(Pos::new(0, 0)), Some(cards[24]));
        assert_eq!(grid.get(Pos::new(4, 4)), Some(cards[0]));
        assert_eq!(
            grid.swap(Pos::new(0, 0), Pos::new(5, 0)),
            Err(GridError::OutOfBounds(Pos::new(5, 0)))
        );
        assert_eq!(grid.get(Pos::new(0, 0)), Some(cards[24]));
    }

    #[test]
    fn out_of_range_lines_are_empty() {
        let grid = Grid::from_row_major(&sample_cards(25));
        assert_eq!(grid.row(9), [None; GRID_SIZE]);
        assert_eq!(grid.column(9), [None; GRID_SIZE]);
    }
}
