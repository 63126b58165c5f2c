//! Puzzle grid representation
//!
//! A Grid is an N×N board of single letters. It is immutable once built and
//! replaced wholesale whenever a new daily puzzle is fetched.

use std::fmt;

/// A cell position on the grid (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Chebyshev distance: the larger of the row and column differences
    #[inline]
    #[must_use]
    pub const fn distance(self, other: Self) -> usize {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        if dr > dc { dr } else { dc }
    }

    /// True when `other` is one of the 8 neighbours of this cell
    #[inline]
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.distance(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Error type for malformed grids
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    Empty,
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    InvalidCell {
        row: usize,
        col: usize,
        cell: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Grid has no rows"),
            Self::NotSquare {
                row,
                expected,
                found,
            } => {
                write!(f, "Row {row} has {found} cells, expected {expected}")
            }
            Self::InvalidCell { row, col, cell } => {
                write!(
                    f,
                    "Cell ({row},{col}) must be a single character, got {cell:?}"
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Square letter grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Build a grid from rows of characters
    ///
    /// # Errors
    /// Returns `GridError` if there are no rows or the rows do not form a square.
    ///
    /// # Examples
    /// ```
    /// use word_hunt::core::{Coord, Grid};
    ///
    /// let grid = Grid::new(vec![vec!['C', 'A'], vec!['T', 'S']]).unwrap();
    /// assert_eq!(grid.size(), 2);
    /// assert_eq!(grid.letter(Coord::new(1, 0)), Some('T'));
    /// ```
    pub fn new(rows: Vec<Vec<char>>) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(GridError::NotSquare {
                    row: i,
                    expected: size,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self { size, cells })
    }

    /// Build a grid from rows of single-character strings, as served by the API
    ///
    /// # Errors
    /// Returns `GridError` if a cell is not exactly one character or the
    /// rows do not form a square.
    pub fn from_cells<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self, GridError> {
        let mut parsed = Vec::with_capacity(rows.len());
        for (r, row) in rows.iter().enumerate() {
            let mut letters = Vec::with_capacity(row.len());
            for (c, cell) in row.iter().enumerate() {
                let cell = cell.as_ref();
                let mut chars = cell.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => letters.push(ch),
                    _ => {
                        return Err(GridError::InvalidCell {
                            row: r,
                            col: c,
                            cell: cell.to_string(),
                        });
                    }
                }
            }
            parsed.push(letters);
        }
        Self::new(parsed)
    }

    /// Side length N of the N×N grid
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Check whether a coordinate lies on the grid
    #[inline]
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Letter at a coordinate, or `None` when off the grid
    #[inline]
    #[must_use]
    pub fn letter(&self, coord: Coord) -> Option<char> {
        if self.contains(coord) {
            Some(self.cells[coord.row * self.size + coord.col])
        } else {
            None
        }
    }

    /// Iterate rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.size)
    }

    /// Concatenate the letters along a path of coordinates
    ///
    /// Off-grid coordinates are skipped.
    #[must_use]
    pub fn spell(&self, path: &[Coord]) -> String {
        path.iter().filter_map(|&c| self.letter(c)).collect()
    }

    /// Check whether `word` can be traced on the grid
    ///
    /// A trace is a chain of 8-directionally adjacent cells that never visits
    /// the same cell twice. Comparison is case-insensitive.
    ///
    /// # Examples
    /// ```
    /// use word_hunt::core::Grid;
    ///
    /// let grid = Grid::new(vec![
    ///     vec!['C', 'A', 'T'],
    ///     vec!['X', 'X', 'X'],
    ///     vec!['X', 'X', 'X'],
    /// ]).unwrap();
    /// assert!(grid.traces("cat"));
    /// assert!(!grid.traces("act"));
    /// ```
    #[must_use]
    pub fn traces(&self, word: &str) -> bool {
        let target: Vec<char> = word.chars().flat_map(char::to_uppercase).collect();
        if target.is_empty() {
            return false;
        }

        let mut visited = vec![false; self.cells.len()];
        (0..self.size).any(|row| {
            (0..self.size).any(|col| self.trace_from(Coord::new(row, col), &target, &mut visited))
        })
    }

    fn trace_from(&self, at: Coord, rest: &[char], visited: &mut [bool]) -> bool {
        let idx = at.row * self.size + at.col;
        if visited[idx] || !self.cells[idx].to_uppercase().eq(rest[..1].iter().copied()) {
            return false;
        }
        if rest.len() == 1 {
            return true;
        }

        visited[idx] = true;
        let found = self
            .neighbours(at)
            .any(|next| self.trace_from(next, &rest[1..], visited));
        visited[idx] = false;
        found
    }

    /// All on-grid neighbours of a coordinate
    pub fn neighbours(&self, at: Coord) -> impl Iterator<Item = Coord> + '_ {
        let rows = at.row.saturating_sub(1)..=(at.row + 1).min(self.size - 1);
        rows.flat_map(move |row| {
            let cols = at.col.saturating_sub(1)..=(at.col + 1).min(self.size - 1);
            cols.map(move |col| Coord::new(row, col))
        })
        .filter(move |&c| c != at)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(char::to_string).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
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

    #[test]
    fn coord_distance_is_chebyshev() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.distance(Coord::new(1, 1)), 1);
        assert_eq!(origin.distance(Coord::new(1, 2)), 2);
        assert_eq!(origin.distance(Coord::new(0, 0)), 0);
        assert_eq!(Coord::new(3, 1).distance(Coord::new(0, 2)), 3);
    }

    #[test]
    fn coord_adjacency_covers_eight_directions() {
        let centre = Coord::new(1, 1);
        let adjacent = (0..3)
            .flat_map(|r| (0..3).map(move |c| Coord::new(r, c)))
            .filter(|&c| centre.is_adjacent(c))
            .count();
        assert_eq!(adjacent, 8);
        assert!(!centre.is_adjacent(centre));
    }

    #[test]
    fn grid_creation_valid() {
        let grid = cat_grid();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.letter(Coord::new(0, 2)), Some('T'));
        assert_eq!(grid.letter(Coord::new(3, 0)), None);
    }

    #[test]
    fn grid_creation_rejects_empty() {
        assert_eq!(Grid::new(Vec::new()), Err(GridError::Empty));
    }

    #[test]
    fn grid_creation_rejects_ragged_rows() {
        let result = Grid::new(vec![vec!['A', 'B'], vec!['C']]);
        assert_eq!(
            result,
            Err(GridError::NotSquare {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn grid_from_cells_parses_strings() {
        let grid = Grid::from_cells(&[vec!["C", "A"], vec!["T", "S"]]).unwrap();
        assert_eq!(grid.spell(&[Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 0)]), "CAT");
    }

    #[test]
    fn grid_from_cells_rejects_multi_char_cells() {
        let result = Grid::from_cells(&[vec!["QU", "A"], vec!["T", "S"]]);
        assert!(matches!(
            result,
            Err(GridError::InvalidCell { row: 0, col: 0, .. })
        ));
        assert!(Grid::from_cells(&[vec![""]]).is_err());
    }

    #[test]
    fn grid_traces_along_adjacent_cells() {
        let grid = cat_grid();
        assert!(grid.traces("CAT"));
        assert!(grid.traces("tac"));
        assert!(grid.traces("AX"));
        assert!(!grid.traces("CT")); // Not adjacent
        assert!(!grid.traces(""));
    }

    #[test]
    fn grid_traces_never_reuses_cells() {
        let grid = Grid::new(vec![vec!['A', 'B'], vec!['Z', 'Z']]).unwrap();
        assert!(grid.traces("AB"));
        assert!(!grid.traces("ABA"));
        assert!(grid.traces("ZZ"));
        assert!(!grid.traces("ZZZ"));
    }

    #[test]
    fn grid_neighbours_clip_at_edges() {
        let grid = cat_grid();
        assert_eq!(grid.neighbours(Coord::new(0, 0)).count(), 3);
        assert_eq!(grid.neighbours(Coord::new(1, 1)).count(), 8);
        assert_eq!(grid.neighbours(Coord::new(2, 1)).count(), 5);
    }

    #[test]
    fn grid_display() {
        let grid = Grid::new(vec![vec!['A', 'B'], vec!['C', 'D']]).unwrap();
        assert_eq!(format!("{grid}"), "A B\nC D");
    }
}
