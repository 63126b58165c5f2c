//! Puzzle session state machine
//!
//! A [`Session`] owns the current puzzle, the in-progress path, the word
//! queue and the submission guard. Front-ends turn user actions into
//! [`Command`]s; every state change is reported as a [`SessionEvent`] so
//! renderers can react without touching state.
//!
//! Path: `Idle` (empty) ⇄ `Building` (non-empty).
//! Queue: `Empty` ⇄ `Populated`.
//! Loading a new puzzle resets path, queue and any in-flight submission.

mod submit;
mod token;

use chrono::NaiveDate;

pub use submit::{PendingSubmission, SubmissionCoordinator, SubmitBlocked, SubmitOutcome};
pub use token::{RequestToken, TokenGate};

use crate::api::{ApiError, DailyPuzzle, ScoringApi, SubmissionResult};
use crate::config::normalize_username;
use crate::core::{Coord, Grid, PathSelector, WordQueue, merge_unique};

/// A discrete user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectCell(Coord),
    Undo,
    Clear,
    Confirm,
    RemoveWord(usize),
}

/// State-change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    PuzzleLoaded { date: NaiveDate, size: usize },
    CellSelected(Coord),
    SelectionRejected(Coord),
    CellReleased(Coord),
    WordQueued(String),
    WordTooShort(String),
    WordRemoved { index: usize, word: String },
    QueueCleared,
    Celebrate,
}

#[derive(Debug, Default)]
pub struct Session {
    puzzle: Option<DailyPuzzle>,
    path: PathSelector,
    queue: WordQueue,
    loads: TokenGate,
    submissions: SubmissionCoordinator,
    events: Vec<SessionEvent>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn puzzle(&self) -> Option<&DailyPuzzle> {
        self.puzzle.as_ref()
    }

    #[must_use]
    pub fn grid(&self) -> Option<&Grid> {
        self.puzzle.as_ref().map(|p| &p.grid)
    }

    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.puzzle.as_ref().map(|p| p.date)
    }

    #[must_use]
    pub const fn path(&self) -> &PathSelector {
        &self.path
    }

    #[must_use]
    pub const fn queue(&self) -> &WordQueue {
        &self.queue
    }

    /// Letters of the path being built; `None` when the path is empty
    #[must_use]
    pub fn current_word(&self) -> Option<String> {
        self.grid().and_then(|g| self.path.current_word(g))
    }

    #[must_use]
    pub const fn submit_in_flight(&self) -> bool {
        self.submissions.in_flight()
    }

    /// Drain pending notifications
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ---------------------------------------------------------------------
    // Puzzle loading
    // ---------------------------------------------------------------------

    /// Start a daily fetch. Any earlier outstanding fetch becomes stale.
    pub fn begin_load(&mut self) -> RequestToken {
        self.loads.issue()
    }

    /// Apply a fetched puzzle if `token` is still current
    pub fn finish_load(&mut self, token: RequestToken, puzzle: DailyPuzzle) -> bool {
        if !self.loads.settle(token) {
            tracing::warn!("Discarding stale puzzle for {} ({})", puzzle.date, token);
            return false;
        }
        self.load(puzzle);
        true
    }

    /// Settle a failed fetch so it no longer counts as outstanding
    pub fn fail_load(&mut self, token: RequestToken) -> bool {
        self.loads.settle(token)
    }

    /// Replace the puzzle, resetting path, queue and in-flight submission
    pub fn load(&mut self, puzzle: DailyPuzzle) {
        self.path.clear();
        self.queue.clear_all();
        self.submissions.invalidate();
        self.events.push(SessionEvent::PuzzleLoaded {
            date: puzzle.date,
            size: puzzle.grid.size(),
        });
        self.puzzle = Some(puzzle);
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    /// Apply a command and return the events it produced
    pub fn apply(&mut self, command: Command) -> Vec<SessionEvent> {
        match command {
            Command::SelectCell(coord) => self.select(coord),
            Command::Undo => {
                if let Some(coord) = self.path.undo_last() {
                    self.events.push(SessionEvent::CellReleased(coord));
                }
            }
            Command::Clear => self.clear_path(),
            Command::Confirm => self.confirm(),
            Command::RemoveWord(index) => {
                if let Some(word) = self.queue.remove(index) {
                    self.events.push(SessionEvent::WordRemoved { index, word });
                }
            }
        }
        self.take_events()
    }

    fn select(&mut self, coord: Coord) {
        let accepted = match &self.puzzle {
            Some(puzzle) => self.path.try_select(&puzzle.grid, coord),
            None => false,
        };
        self.events.push(if accepted {
            SessionEvent::CellSelected(coord)
        } else {
            SessionEvent::SelectionRejected(coord)
        });
    }

    fn clear_path(&mut self) {
        // One event per removed cell so each release can be animated
        while let Some(coord) = self.path.undo_last() {
            self.events.push(SessionEvent::CellReleased(coord));
        }
    }

    fn confirm(&mut self) {
        let word = self.current_word().unwrap_or_default();
        if self.queue.confirm(&word) {
            self.events.push(SessionEvent::WordQueued(word));
            self.clear_path();
        } else {
            self.events.push(SessionEvent::WordTooShort(word));
        }
    }

    // ---------------------------------------------------------------------
    // Submission
    // ---------------------------------------------------------------------

    /// Words that a submit with `extra` would send: queue first, then extra
    /// words (whitespace-split), exact duplicates removed
    #[must_use]
    pub fn submission_words<S: AsRef<str>>(&self, extra: &[S]) -> Vec<String> {
        let queued = self.queue.drain_for_submission();
        let typed = extra.iter().flat_map(|s| s.as_ref().split_whitespace());
        merge_unique(queued.iter().map(String::as_str).chain(typed))
    }

    /// Reserve the submission slot and build the request
    ///
    /// # Errors
    /// Returns `SubmitBlocked` if no puzzle is loaded, a submission is
    /// already outstanding, or there are no words to send.
    pub fn begin_submit<S: AsRef<str>>(
        &mut self,
        username: &str,
        extra: &[S],
    ) -> Result<PendingSubmission, SubmitBlocked> {
        let date = self.date().ok_or(SubmitBlocked::NoPuzzle)?;
        let words = self.submission_words(extra);
        self.submissions
            .begin(date, normalize_username(username), words)
    }

    /// Reconcile a submission reply with local state
    ///
    /// Only an accepted, current reply mutates state (the queue is cleared).
    pub fn finish_submit(
        &mut self,
        token: RequestToken,
        reply: Result<SubmissionResult, ApiError>,
    ) -> SubmitOutcome {
        let outcome = self.submissions.reconcile(token, reply);
        if outcome.is_accepted() {
            self.queue.clear_all();
            self.events.push(SessionEvent::QueueCleared);
            self.events.push(SessionEvent::Celebrate);
        }
        outcome
    }

    /// Submit in one step: begin, call the API once, reconcile
    ///
    /// # Errors
    /// Returns `SubmitBlocked` if the submit was refused before any request.
    pub async fn submit<A, S>(
        &mut self,
        api: &A,
        username: &str,
        extra: &[S],
    ) -> Result<SubmitOutcome, SubmitBlocked>
    where
        A: ScoringApi + ?Sized,
        S: AsRef<str>,
    {
        let pending = self.begin_submit(username, extra)?;
        let reply = api.submit(pending.date, &pending.request).await;
        Ok(self.finish_submit(pending.token, reply))
    }
}
