//! Core puzzle logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod condition;
pub mod config;
pub mod eval;
pub mod events;
pub mod grid;
pub mod puzzle;
pub mod rng;
pub mod search;
pub mod validate;

pub use cards::*;
pub use condition::*;
pub use config::*;
pub use eval::*;
pub use events::*;
pub use grid::*;
pub use puzzle::*;
pub use rng::*;
pub use search::*;
pub use validate::*;
