//! Formatting utilities for terminal output

use crate::core::{Coord, Grid};

/// Shown in place of the current word when no cell is selected
pub const EMPTY_WORD: &str = "—";

/// Current word, or the empty marker
#[must_use]
pub fn word_or_sentinel(word: Option<&str>) -> String {
    match word {
        Some(w) if !w.is_empty() => w.to_string(),
        _ => EMPTY_WORD.to_string(),
    }
}

/// Render the grid as text, bracketing cells that are on `path`
///
/// The most recent path cell is marked with angle brackets.
#[must_use]
pub fn grid_lines(grid: &Grid, path: &[Coord]) -> Vec<String> {
    let last = path.last().copied();
    (0..grid.size())
        .map(|row| {
            (0..grid.size())
                .map(|col| {
                    let coord = Coord::new(row, col);
                    let letter = grid.letter(coord).unwrap_or(' ');
                    if Some(coord) == last {
                        format!("<{letter}>")
                    } else if path.contains(&coord) {
                        format!("[{letter}]")
                    } else {
                        format!(" {letter} ")
                    }
                })
                .collect::<String>()
        })
        .collect()
}

/// Numbered word chips: `1:CAT  2:TEA`
#[must_use]
pub fn word_chips<'a, I>(words: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    words
        .into_iter()
        .enumerate()
        .map(|(i, w)| format!("{}:{w}", i + 1))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar for a leaderboard score relative to the top score
#[must_use]
pub fn score_bar(score: i64, top: i64, width: usize) -> String {
    create_progress_bar(score as f64, top as f64, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat_grid() -> Grid {
        Grid::new(vec![vec!['C', 'A'], vec!['T', 'S']]).unwrap()
    }

    #[test]
    fn sentinel_for_empty_word() {
        assert_eq!(word_or_sentinel(None), "—");
        assert_eq!(word_or_sentinel(Some("")), "—");
        assert_eq!(word_or_sentinel(Some("CAT")), "CAT");
    }

    #[test]
    fn grid_lines_without_path() {
        assert_eq!(grid_lines(&cat_grid(), &[]), vec![" C  A ", " T  S "]);
    }

    #[test]
    fn grid_lines_mark_path_and_head() {
        let path = [Coord::new(0, 0), Coord::new(1, 1)];
        assert_eq!(grid_lines(&cat_grid(), &path), vec!["[C] A ", " T <S>"]);
    }

    #[test]
    fn chips_are_numbered_from_one() {
        assert_eq!(word_chips(["CAT", "TEA"]), "1:CAT  2:TEA");
        assert_eq!(word_chips(Vec::<&str>::new()), "");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn score_bar_with_zero_top() {
        assert_eq!(score_bar(0, 0, 4), "░░░░");
    }
}
