//! Command implementations

pub mod fetch;
pub mod simple;
mod spinner;
pub mod submit;

pub use fetch::{fetch_daily, fetch_leaderboard, fetch_me};
pub use simple::{LineCommand, SimpleGame, parse_line, run_simple};
pub use submit::{SubmitReport, submit_words, suspicious_words};
