use crate::Pos;
use serde::{Deserialize, Serialize};

/// State changes a presentation layer reacts to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PuzzleEvent {
    Shuffled {
        satisfied: usize,
        trial: usize,
        seed: u64,
    },
    Reset,
    CellsSwapped { from: Pos, to: Pos },
    GridReplaced,
    Solved,
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<PuzzleEvent>,
}

impl EventBus {
    pub fn push(&mut self, event: PuzzleEvent) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = PuzzleEvent> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
