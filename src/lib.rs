//! Word Hunt
//!
//! Terminal client for the daily Word Hunt puzzle: trace words through
//! adjacent letters on the grid, queue them, and submit the batch for scoring.
//!
//! # Quick Start
//!
//! ```rust
//! use word_hunt::core::Grid;
//! use word_hunt::api::DailyPuzzle;
//! use word_hunt::session::{Command, Session};
//! use word_hunt::core::Coord;
//!
//! let grid = Grid::new(vec![
//!     vec!['C', 'A', 'T'],
//!     vec!['X', 'X', 'X'],
//!     vec!['X', 'X', 'X'],
//! ]).unwrap();
//! let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//!
//! let mut session = Session::new();
//! session.load(DailyPuzzle { date, seed: 1, grid });
//! for col in 0..3 {
//!     session.apply(Command::SelectCell(Coord::new(0, col)));
//! }
//! assert_eq!(session.current_word().as_deref(), Some("CAT"));
//! session.apply(Command::Confirm);
//! assert_eq!(session.queue().len(), 1);
//! ```

// Core domain types
pub mod core;

// Puzzle session state machine
pub mod session;

// Scoring API client
pub mod api;

// Configuration
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
