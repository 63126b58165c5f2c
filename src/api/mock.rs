//! In-memory scoring API for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::{ApiError, Result};
use super::types::{DailyPuzzle, Leaderboard, PlayerScore, ScoreRow, SubmissionResult, SubmitRequest};
use super::ScoringApi;
use crate::core::Grid;

/// Scripted reply for the next submit call
#[derive(Debug, Clone)]
pub enum MockReply {
    Result(SubmissionResult),
    Unauthenticated,
    Garbled,
}

/// Mock scoring API that serves one grid and replays scripted submit replies.
#[derive(Clone)]
pub struct MockApi {
    grid: Grid,
    daily_errors: Arc<Mutex<VecDeque<ApiError>>>,
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    submitted: Arc<Mutex<Vec<SubmitRequest>>>,
}

impl MockApi {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            daily_errors: Arc::new(Mutex::new(VecDeque::new())),
            replies: Arc::new(Mutex::new(VecDeque::new())),
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make the next `daily` call fail with `error`
    pub fn fail_next_daily(&self, error: ApiError) {
        self.daily_errors.lock().unwrap().push_back(error);
    }

    pub fn push_reply(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn accept(&self, score: i64, words_found: i64) {
        self.push_reply(MockReply::Result(SubmissionResult {
            accepted: true,
            message: Some("OK".to_string()),
            score,
            words_found,
            words: None,
        }));
    }

    pub fn reject(&self, message: &str) {
        self.push_reply(MockReply::Result(SubmissionResult {
            accepted: false,
            message: Some(message.to_string()),
            score: 0,
            words_found: 0,
            words: None,
        }));
    }

    pub fn submitted(&self) -> Vec<SubmitRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

pub fn garbled_error() -> ApiError {
    ApiError::Decode(serde_json::from_str::<SubmissionResult>("<html>").unwrap_err())
}

#[async_trait]
impl ScoringApi for MockApi {
    async fn daily(&self, date: NaiveDate, _size: usize) -> Result<DailyPuzzle> {
        if let Some(error) = self.daily_errors.lock().unwrap().pop_front() {
            return Err(error);
        }
        Ok(DailyPuzzle {
            date,
            seed: 42,
            grid: self.grid.clone(),
        })
    }

    async fn leaderboard(&self, date: NaiveDate, _limit: usize) -> Result<Leaderboard> {
        Ok(Leaderboard {
            date: Some(date),
            top: vec![ScoreRow {
                username: "ana".to_string(),
                score: 5,
                words_found: 4,
            }],
        })
    }

    async fn me(&self, _date: NaiveDate, _username: &str) -> Result<PlayerScore> {
        Err(ApiError::NotFound)
    }

    async fn submit(&self, _date: NaiveDate, request: &SubmitRequest) -> Result<SubmissionResult> {
        self.submitted.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(MockReply::Result(result)) => Ok(result),
            Some(MockReply::Unauthenticated) => Err(ApiError::Unauthenticated),
            Some(MockReply::Garbled) | None => Err(garbled_error()),
        }
    }
}
