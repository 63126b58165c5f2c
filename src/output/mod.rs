//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_leaderboard, print_player_score, print_puzzle, print_submission_preview,
    print_submit_outcome,
};
