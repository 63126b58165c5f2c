//! In-progress word path
//!
//! The selector tracks the ordered cells picked for the word currently being
//! built. A new cell is accepted only if it is on the grid, not already in the
//! path, and (after the first pick) adjacent to the last cell.

use super::{Coord, Grid};

/// Ordered, non-repeating chain of adjacent cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSelector {
    cells: Vec<Coord>,
}

impl PathSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to extend the path with `coord`
    ///
    /// Returns `false` and leaves the path unchanged when the cell is off the
    /// grid, already selected, or not adjacent to the last selected cell.
    ///
    /// # Examples
    /// ```
    /// use word_hunt::core::{Coord, Grid, PathSelector};
    ///
    /// let grid = Grid::new(vec![vec!['A'; 3]; 3]).unwrap();
    /// let mut path = PathSelector::new();
    /// assert!(path.try_select(&grid, Coord::new(0, 0)));
    /// assert!(!path.try_select(&grid, Coord::new(0, 0))); // no reuse
    /// assert!(!path.try_select(&grid, Coord::new(2, 2))); // too far
    /// ```
    pub fn try_select(&mut self, grid: &Grid, coord: Coord) -> bool {
        if !self.can_select(grid, coord) {
            return false;
        }
        self.cells.push(coord);
        true
    }

    /// Check legality without mutating
    #[must_use]
    pub fn can_select(&self, grid: &Grid, coord: Coord) -> bool {
        if !grid.contains(coord) || self.contains(coord) {
            return false;
        }
        self.cells.last().is_none_or(|&last| last.is_adjacent(coord))
    }

    /// Remove the most recent cell; `None` on an empty path
    pub fn undo_last(&mut self) -> Option<Coord> {
        self.cells.pop()
    }

    /// Undo repeatedly until empty, returning each removed cell in removal order
    pub fn clear(&mut self) -> Vec<Coord> {
        let mut removed = Vec::with_capacity(self.cells.len());
        while let Some(coord) = self.undo_last() {
            removed.push(coord);
        }
        removed
    }

    /// Letters along the path, or `None` for an empty path
    #[must_use]
    pub fn current_word(&self, grid: &Grid) -> Option<String> {
        if self.cells.is_empty() {
            None
        } else {
            Some(grid.spell(&self.cells))
        }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    #[inline]
    #[must_use]
    pub fn coords(&self) -> &[Coord] {
        &self.cells
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat_grid() -> Grid {
        Grid::new(vec![
            vec!['C', 'A', 'T'],
            vec!['X', 'X', 'X'],
            vec!['X', 'X', 'X'],
        ])
        .unwrap()
    }

    fn all_coords(size: usize) -> impl Iterator<Item = Coord> {
        (0..size).flat_map(move |r| (0..size).map(move |c| Coord::new(r, c)))
    }

    #[test]
    fn first_pick_has_no_adjacency_constraint() {
        let grid = cat_grid();
        for coord in all_coords(3) {
            let mut path = PathSelector::new();
            assert!(path.try_select(&grid, coord));
            assert_eq!(path.coords(), &[coord]);
        }
    }

    #[test]
    fn selecting_a_used_cell_is_always_rejected() {
        let grid = cat_grid();
        let mut path = PathSelector::new();
        path.try_select(&grid, Coord::new(0, 0));
        path.try_select(&grid, Coord::new(1, 1));
        path.try_select(&grid, Coord::new(0, 1));

        let before = path.clone();
        for &used in before.coords() {
            assert!(!path.try_select(&grid, used));
            assert_eq!(path, before);
        }
    }

    #[test]
    fn extension_succeeds_iff_adjacent_and_unused() {
        let grid = Grid::new(vec![vec!['E'; 5]; 5]).unwrap();
        let mut base = PathSelector::new();
        base.try_select(&grid, Coord::new(2, 2));
        base.try_select(&grid, Coord::new(2, 3));

        for coord in all_coords(5) {
            let mut path = base.clone();
            let expected = coord.distance(Coord::new(2, 3)) <= 1 && !base.contains(coord);
            assert_eq!(path.try_select(&grid, coord), expected, "coord {coord}");
            if !expected {
                assert_eq!(path, base);
            }
        }
    }

    #[test]
    fn off_grid_cells_are_rejected() {
        let grid = cat_grid();
        let mut path = PathSelector::new();
        assert!(!path.try_select(&grid, Coord::new(3, 0)));
        assert!(!path.try_select(&grid, Coord::new(0, 7)));
        assert!(path.is_empty());
    }

    #[test]
    fn spells_cat_along_top_row() {
        let grid = cat_grid();
        let mut path = PathSelector::new();
        assert!(path.try_select(&grid, Coord::new(0, 0)));
        assert!(path.try_select(&grid, Coord::new(0, 1)));
        assert!(path.try_select(&grid, Coord::new(0, 2)));
        assert_eq!(path.current_word(&grid).as_deref(), Some("CAT"));
    }

    #[test]
    fn distance_two_pick_is_rejected() {
        let grid = cat_grid();
        let mut path = PathSelector::new();
        path.try_select(&grid, Coord::new(0, 0));
        assert!(!path.try_select(&grid, Coord::new(1, 2)));
        assert_eq!(path.coords(), &[Coord::new(0, 0)]);
    }

    #[test]
    fn empty_path_has_no_word() {
        let grid = cat_grid();
        let path = PathSelector::new();
        assert_eq!(path.current_word(&grid), None);
    }

    #[test]
    fn undo_on_empty_path_is_noop() {
        let mut path = PathSelector::new();
        assert_eq!(path.undo_last(), None);
        assert!(path.is_empty());
    }

    #[test]
    fn undo_removes_last_and_allows_reselect() {
        let grid = cat_grid();
        let mut path = PathSelector::new();
        path.try_select(&grid, Coord::new(0, 0));
        path.try_select(&grid, Coord::new(0, 1));

        assert_eq!(path.undo_last(), Some(Coord::new(0, 1)));
        assert_eq!(path.current_word(&grid).as_deref(), Some("C"));
        assert!(path.try_select(&grid, Coord::new(0, 1)));
    }

    #[test]
    fn clear_reports_each_removal_newest_first() {
        let grid = cat_grid();
        let mut path = PathSelector::new();
        for col in 0..3 {
            path.try_select(&grid, Coord::new(0, col));
        }

        let removed = path.clear();
        assert_eq!(
            removed,
            vec![Coord::new(0, 2), Coord::new(0, 1), Coord::new(0, 0)]
        );
        assert!(path.is_empty());
        assert!(path.clear().is_empty());
    }
}
