//! Submission coordination
//!
//! At most one submission may be in flight. Replies are reconciled by token:
//! a reply for a submission that was superseded (new puzzle, new date) is
//! reported as [`SubmitOutcome::Stale`] and changes nothing.

use chrono::NaiveDate;
use thiserror::Error;

use super::token::{RequestToken, TokenGate};
use crate::api::{ApiError, SubmissionResult, SubmitRequest};

/// A submission that has been sent (or is about to be)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub token: RequestToken,
    pub date: NaiveDate,
    pub request: SubmitRequest,
}

/// Why a submit action was refused before reaching the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("A submission is already in progress")]
    InFlight,

    #[error("Nothing to submit")]
    NothingToSubmit,

    #[error("No puzzle loaded")]
    NoPuzzle,
}

/// Result of reconciling a submission reply with local state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(SubmissionResult),
    Rejected(SubmissionResult),
    Unauthenticated,
    Failed,
    /// Reply arrived after the session moved on; ignored
    Stale,
}

impl SubmitOutcome {
    /// Message to show the player, if any
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Accepted(result) => Some(format!(
                "Accepted • Score {} • Words {}",
                result.score, result.words_found
            )),
            Self::Rejected(result) => {
                let reason = result
                    .message
                    .as_deref()
                    .filter(|m| !m.is_empty())
                    .map(|m| format!(" • {m}"))
                    .unwrap_or_default();
                Some(format!(
                    "Rejected{reason} • Score {} • Words {}",
                    result.score, result.words_found
                ))
            }
            Self::Unauthenticated => Some("Please sign in to submit.".to_string()),
            Self::Failed => Some("Submit failed".to_string()),
            Self::Stale => None,
        }
    }

    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// In-flight guard and reply reconciliation for submissions
#[derive(Debug, Default)]
pub struct SubmissionCoordinator {
    gate: TokenGate,
}

impl SubmissionCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.gate.is_pending()
    }

    /// Reserve the single submission slot
    ///
    /// # Errors
    /// `InFlight` if a submission is outstanding, `NothingToSubmit` if
    /// `words` is empty.
    pub fn begin(
        &mut self,
        date: NaiveDate,
        username: String,
        words: Vec<String>,
    ) -> Result<PendingSubmission, SubmitBlocked> {
        if self.in_flight() {
            return Err(SubmitBlocked::InFlight);
        }
        if words.is_empty() {
            return Err(SubmitBlocked::NothingToSubmit);
        }

        let token = self.gate.issue();
        tracing::info!(
            "Submitting {} words for {} on {} ({})",
            words.len(),
            username,
            date,
            token
        );

        Ok(PendingSubmission {
            token,
            date,
            request: SubmitRequest { username, words },
        })
    }

    /// Classify a reply, releasing the slot if the token is current
    pub fn reconcile(
        &mut self,
        token: RequestToken,
        reply: Result<SubmissionResult, ApiError>,
    ) -> SubmitOutcome {
        if !self.gate.settle(token) {
            tracing::warn!("Discarding stale submission reply {}", token);
            return SubmitOutcome::Stale;
        }

        match reply {
            Ok(result) if result.accepted => SubmitOutcome::Accepted(result),
            Ok(result) => SubmitOutcome::Rejected(result),
            Err(ApiError::Unauthenticated) => SubmitOutcome::Unauthenticated,
            Err(e) => {
                tracing::warn!("Submission {} failed: {}", token, e);
                SubmitOutcome::Failed
            }
        }
    }

    /// Abandon the outstanding submission, if any
    pub fn invalidate(&mut self) {
        self.gate.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::garbled_error;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    fn result(accepted: bool) -> SubmissionResult {
        SubmissionResult {
            accepted,
            message: if accepted {
                Some("OK".to_string())
            } else {
                Some("Already submitted today.".to_string())
            },
            score: 3,
            words_found: 2,
            words: None,
        }
    }

    #[test]
    fn second_begin_is_blocked_while_in_flight() {
        let mut coordinator = SubmissionCoordinator::new();
        let pending = coordinator
            .begin(date(), "guest".to_string(), words(&["CAT"]))
            .unwrap();
        assert!(coordinator.in_flight());

        let second = coordinator.begin(date(), "guest".to_string(), words(&["TEA"]));
        assert_eq!(second, Err(SubmitBlocked::InFlight));

        coordinator.reconcile(pending.token, Ok(result(true)));
        assert!(!coordinator.in_flight());
    }

    #[test]
    fn empty_word_list_is_blocked() {
        let mut coordinator = SubmissionCoordinator::new();
        let blocked = coordinator.begin(date(), "guest".to_string(), Vec::new());
        assert_eq!(blocked, Err(SubmitBlocked::NothingToSubmit));
        assert!(!coordinator.in_flight());
    }

    #[test]
    fn replies_are_classified() {
        let mut coordinator = SubmissionCoordinator::new();

        let t = coordinator.begin(date(), "a".into(), words(&["CAT"])).unwrap().token;
        assert!(coordinator.reconcile(t, Ok(result(true))).is_accepted());

        let t = coordinator.begin(date(), "a".into(), words(&["CAT"])).unwrap().token;
        assert!(matches!(
            coordinator.reconcile(t, Ok(result(false))),
            SubmitOutcome::Rejected(_)
        ));

        let t = coordinator.begin(date(), "a".into(), words(&["CAT"])).unwrap().token;
        assert_eq!(
            coordinator.reconcile(t, Err(ApiError::Unauthenticated)),
            SubmitOutcome::Unauthenticated
        );

        let t = coordinator.begin(date(), "a".into(), words(&["CAT"])).unwrap().token;
        assert_eq!(coordinator.reconcile(t, Err(garbled_error())), SubmitOutcome::Failed);
    }

    #[test]
    fn invalidated_reply_is_stale() {
        let mut coordinator = SubmissionCoordinator::new();
        let pending = coordinator
            .begin(date(), "guest".to_string(), words(&["CAT"]))
            .unwrap();
        coordinator.invalidate();

        assert_eq!(
            coordinator.reconcile(pending.token, Ok(result(true))),
            SubmitOutcome::Stale
        );
        assert!(!coordinator.in_flight());
    }

    #[test]
    fn user_messages() {
        assert_eq!(
            SubmitOutcome::Accepted(result(true)).user_message().as_deref(),
            Some("Accepted • Score 3 • Words 2")
        );
        assert_eq!(
            SubmitOutcome::Rejected(result(false)).user_message().as_deref(),
            Some("Rejected • Already submitted today. • Score 3 • Words 2")
        );
        assert_eq!(
            SubmitOutcome::Unauthenticated.user_message().as_deref(),
            Some("Please sign in to submit.")
        );
        assert_eq!(SubmitOutcome::Failed.user_message().as_deref(), Some("Submit failed"));
        assert_eq!(SubmitOutcome::Stale.user_message(), None);
    }
}
