//! Confirmed words waiting for submission

use rustc_hash::FxHashSet;

/// Shortest word accepted into the queue, in characters
pub const MIN_WORD_LEN: usize = 3;

/// Staging list of confirmed words
///
/// Duplicates may sit in the queue; they are collapsed by
/// [`WordQueue::drain_for_submission`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordQueue {
    words: Vec<String>,
}

impl WordQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a word if it meets the minimum length
    ///
    /// # Examples
    /// ```
    /// use word_hunt::core::WordQueue;
    ///
    /// let mut queue = WordQueue::new();
    /// assert!(!queue.confirm("AB"));
    /// assert!(queue.confirm("CAT"));
    /// assert_eq!(queue.len(), 1);
    /// ```
    pub fn confirm(&mut self, word: &str) -> bool {
        if word.chars().count() < MIN_WORD_LEN {
            return false;
        }
        self.words.push(word.to_string());
        true
    }

    /// Remove the word at `index`; out-of-range is a no-op
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.words.len() {
            Some(self.words.remove(index))
        } else {
            None
        }
    }

    /// Distinct words in first-seen order. Does not clear the queue.
    #[must_use]
    pub fn drain_for_submission(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        self.words
            .iter()
            .filter(|w| seen.insert(w.as_str()))
            .cloned()
            .collect()
    }

    pub fn clear_all(&mut self) {
        self.words.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Merge word lists in order, keeping the first occurrence of each exact string
#[must_use]
pub fn merge_unique<I, S>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = FxHashSet::default();
    let mut merged = Vec::new();
    for word in lists {
        let word = word.as_ref();
        if seen.insert(word.to_string()) {
            merged.push(word.to_string());
        }
    }
    merged
}

/// Split freeform text into words on whitespace, dropping blanks
#[must_use]
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
