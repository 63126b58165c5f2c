//! Word Hunt scoring API
//!
//! The server owns puzzles, dictionary and scores; this module only consumes
//! its endpoints. [`ScoringApi`] is the seam the session and front-ends are
//! written against; [`HttpApi`] is the real implementation.

mod client;
pub mod error;
#[cfg(test)]
pub mod mock;
pub mod types;

use async_trait::async_trait;
use chrono::NaiveDate;

pub use client::HttpApi;
pub use error::{ApiError, Result};
pub use types::{
    DailyPuzzle, DailyResponse, GridRow, Leaderboard, PlayerScore, ScoreRow, SubmissionResult,
    SubmitRequest,
};

/// Endpoints of the word hunt service.
#[async_trait]
pub trait ScoringApi: Send + Sync {
    /// `GET /daily?date&size`
    async fn daily(&self, date: NaiveDate, size: usize) -> Result<DailyPuzzle>;

    /// `GET /leaderboard?date&limit`
    async fn leaderboard(&self, date: NaiveDate, limit: usize) -> Result<Leaderboard>;

    /// `GET /me?date&username`
    async fn me(&self, date: NaiveDate, username: &str) -> Result<PlayerScore>;

    /// `POST /submit?date`
    async fn submit(&self, date: NaiveDate, request: &SubmitRequest) -> Result<SubmissionResult>;
}
