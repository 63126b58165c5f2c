//! Core domain types for Word Hunt
//!
//! Grid, path selection and the word queue. Everything here is synchronous,
//! free of I/O, and owned by a single session.

mod grid;
mod path;
mod queue;
mod score;

pub use grid::{Coord, Grid, GridError};
pub use path::PathSelector;
pub use queue::{MIN_WORD_LEN, WordQueue, merge_unique, split_words};
pub use score::{points_for, total_points};
