//! Grid coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row/column position on a square grid, row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the position lies on a grid of `size` x `size` cells
    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Orthogonal neighbours (up, down, left, right) that exist on the grid
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = GridPos> {
        const OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

        OFFSETS.into_iter().filter_map(move |(dr, dc)| {
            let row = self.row.checked_add_signed(dr)?;
            let col = self.col.checked_add_signed(dc)?;
            let pos = GridPos::new(row, col);
            pos.in_bounds(size).then_some(pos)
        })
    }
}

impl From<(usize, usize)> for GridPos {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_has_two_neighbors() {
        let corner: Vec<_> = GridPos::new(0, 0).neighbors(3).collect();
        assert_eq!(corner, vec![GridPos::new(1, 0), GridPos::new(0, 1)]);

        let far: Vec<_> = GridPos::new(2, 2).neighbors(3).collect();
        assert_eq!(far, vec![GridPos::new(1, 2), GridPos::new(2, 1)]);
    }

    #[test]
    fn test_center_has_four_neighbors() {
        assert_eq!(GridPos::new(1, 1).neighbors(3).count(), 4);
    }

    #[test]
    fn test_in_bounds() {
        assert!(GridPos::new(11, 11).in_bounds(12));
        assert!(!GridPos::new(12, 0).in_bounds(12));
        assert!(!GridPos::new(30, 20).in_bounds(12));
    }
}
