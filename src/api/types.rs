//! Wire types for the Word Hunt HTTP API (camelCase JSON).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{Grid, GridError};

/// One grid row as sent by the server
///
/// Depending on the serializer a row arrives either as an array of
/// single-letter strings or packed into one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridRow {
    Cells(Vec<String>),
    Packed(String),
}

impl GridRow {
    fn into_cells(self) -> Vec<String> {
        match self {
            Self::Cells(cells) => cells,
            Self::Packed(text) => text.chars().map(String::from).collect(),
        }
    }
}

/// `GET /daily` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResponse {
    pub seed: i64,
    #[serde(default)]
    pub size: Option<usize>,
    pub grid: Vec<GridRow>,
}

/// A validated daily puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPuzzle {
    pub date: NaiveDate,
    pub seed: i64,
    pub grid: Grid,
}

impl DailyPuzzle {
    /// Validate a raw response into a puzzle for `date`
    ///
    /// # Errors
    /// Returns `GridError` if the grid is empty, ragged or has multi-letter cells.
    pub fn from_response(date: NaiveDate, response: DailyResponse) -> Result<Self, GridError> {
        let rows: Vec<Vec<String>> = response.grid.into_iter().map(GridRow::into_cells).collect();
        Ok(Self {
            date,
            seed: response.seed,
            grid: Grid::from_cells(&rows)?,
        })
    }
}

/// Leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRow {
    pub username: String,
    pub score: i64,
    pub words_found: i64,
}

/// `GET /leaderboard` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub top: Vec<ScoreRow>,
}

/// `GET /me` response
///
/// Score fields are absent when the player has not submitted for the date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub words_found: Option<i64>,
    #[serde(default)]
    pub words: Option<Vec<String>>,
}

impl PlayerScore {
    #[must_use]
    pub const fn has_submitted(&self) -> bool {
        self.score.is_some()
    }
}

/// `POST /submit` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub username: String,
    pub words: Vec<String>,
}

/// `POST /submit` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub accepted: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub score: i64,
    pub words_found: i64,
    #[serde(default)]
    pub words: Option<Vec<String>>,
}
