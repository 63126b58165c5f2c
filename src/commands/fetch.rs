//! One-shot reads: daily puzzle, leaderboard and personal score

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::spinner::with_spinner;
use crate::api::{ApiError, DailyPuzzle, Leaderboard, PlayerScore, ScoringApi};

/// Fetch the puzzle for `date`
///
/// # Errors
///
/// Returns an error if the request fails or the grid is malformed.
pub async fn fetch_daily<A>(api: &A, date: NaiveDate, size: usize) -> Result<DailyPuzzle>
where
    A: ScoringApi + ?Sized,
{
    with_spinner(format!("Loading {date} puzzle..."), api.daily(date, size))
        .await
        .with_context(|| format!("Failed to load the {date} puzzle"))
}

/// Fetch the top scores for `date`
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn fetch_leaderboard<A>(api: &A, date: NaiveDate, limit: usize) -> Result<Leaderboard>
where
    A: ScoringApi + ?Sized,
{
    with_spinner("Loading leaderboard...", api.leaderboard(date, limit))
        .await
        .context("Failed to load leaderboard")
}

/// Fetch the player's score for `date`
///
/// `Ok(None)` means the server does not know the player (404 or 401).
///
/// # Errors
///
/// Returns an error for transport, status or decode failures.
pub async fn fetch_me<A>(api: &A, date: NaiveDate, username: &str) -> Result<Option<PlayerScore>>
where
    A: ScoringApi + ?Sized,
{
    match with_spinner("Loading your score...", api.me(date, username)).await {
        Ok(me) => Ok(Some(me)),
        Err(ApiError::NotFound | ApiError::Unauthenticated) => Ok(None),
        Err(e) => Err(e).context("Failed to load your score"),
    }
}
