//! One-shot submission of a word list

use anyhow::Result;

use super::spinner::with_spinner;
use crate::api::{DailyPuzzle, ScoringApi};
use crate::core::{MIN_WORD_LEN, split_words};
use crate::session::{Session, SubmitOutcome};

/// What was sent and how the server answered
#[derive(Debug, Clone)]
pub struct SubmitReport {
    pub words: Vec<String>,
    /// Words that cannot be traced on the grid or are too short; sent anyway
    pub suspicious: Vec<String>,
    pub outcome: SubmitOutcome,
}

/// Words from `inputs` that the server will almost certainly not count
#[must_use]
pub fn suspicious_words(puzzle: &DailyPuzzle, words: &[String]) -> Vec<String> {
    words
        .iter()
        .filter(|w| w.chars().count() < MIN_WORD_LEN || !puzzle.grid.traces(w))
        .cloned()
        .collect()
}

/// Submit `inputs` (each may hold several whitespace-separated words)
///
/// # Errors
///
/// Returns an error if there is nothing to submit. Server-side failures are
/// reported through [`SubmitReport::outcome`].
pub async fn submit_words<A>(
    api: &A,
    puzzle: DailyPuzzle,
    username: &str,
    inputs: &[String],
) -> Result<SubmitReport>
where
    A: ScoringApi + ?Sized,
{
    let extra: Vec<String> = inputs.iter().flat_map(|s| split_words(s)).collect();

    let mut session = Session::new();
    session.load(puzzle);
    let words = session.submission_words(&extra);
    let suspicious = session
        .puzzle()
        .map(|p| suspicious_words(p, &words))
        .unwrap_or_default();

    tracing::info!("Submitting {} words as {}", words.len(), username);
    let outcome = with_spinner("Submitting...", session.submit(api, username, &extra)).await?;

    Ok(SubmitReport {
        words,
        suspicious,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::core::Grid;
    use crate::session::SubmitBlocked;
    use chrono::NaiveDate;

    fn puzzle() -> DailyPuzzle {
        DailyPuzzle {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            seed: 7,
            grid: Grid::new(vec![
                vec!['C', 'A', 'T'],
                vec!['X', 'X', 'X'],
                vec!['X', 'X', 'X'],
            ])
            .unwrap(),
        }
    }

    fn inputs(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn sends_deduplicated_words() {
        let api = MockApi::new(puzzle().grid);
        api.accept(2, 2);

        let report = submit_words(&api, puzzle(), "ana", &inputs(&["cat tax", "cat"]))
            .await
            .unwrap();

        assert!(report.outcome.is_accepted());
        assert_eq!(report.words, vec!["cat", "tax"]);
        assert_eq!(api.submitted()[0].words, vec!["cat", "tax"]);
        assert_eq!(api.submitted()[0].username, "ana");
    }

    #[tokio::test]
    async fn flags_words_not_on_grid() {
        let api = MockApi::new(puzzle().grid);
        api.reject("no valid words");

        let report = submit_words(&api, puzzle(), "ana", &inputs(&["CAT", "DOG", "AT"]))
            .await
            .unwrap();

        assert_eq!(report.suspicious, vec!["DOG", "AT"]);
        assert!(matches!(report.outcome, SubmitOutcome::Rejected(_)));
    }

    #[tokio::test]
    async fn empty_input_is_refused() {
        let api = MockApi::new(puzzle().grid);
        let err = submit_words(&api, puzzle(), "ana", &inputs(&["   "]))
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<SubmitBlocked>(),
            Some(&SubmitBlocked::NothingToSubmit)
        );
        assert!(api.submitted().is_empty());
    }
}
