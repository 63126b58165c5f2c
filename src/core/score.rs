//! Word point values
//!
//! Mirrors the server's length-based scoring so the client can preview how
//! much a queued word is worth. The server stays authoritative.

/// Points awarded for a word of this length
///
/// # Examples
/// ```
/// use word_hunt::core::points_for;
///
/// assert_eq!(points_for("CAT"), 1);
/// assert_eq!(points_for("STONE"), 2);
/// assert_eq!(points_for("STARTERS"), 11);
/// ```
#[must_use]
pub fn points_for(word: &str) -> u32 {
    match word.chars().count() {
        0..=2 => 0,
        3 | 4 => 1,
        5 => 2,
        6 => 3,
        7 => 5,
        _ => 11,
    }
}

/// Total preview points for a set of words
#[must_use]
pub fn total_points<S: AsRef<str>>(words: &[S]) -> u32 {
    words.iter().map(|w| points_for(w.as_ref())).sum()
}
