//! # Game Module
//!
//! Session state, entities, visibility and the navigation state machine.
//!
//! This module contains the building blocks of a single dungeon run:
//! - Coarse and fine grid coordinates
//! - The entity layer and the trap/encounter records it points at
//! - Fog-of-war visibility and proximity checks
//! - The turn-by-turn navigation state machine

pub mod entities;
pub mod navigation;
pub mod state;
pub mod visibility;

pub use entities::*;
pub use navigation::*;
pub use state::*;
pub use visibility::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell of the coarse room grid.
///
/// # Examples
///
/// ```
/// use delve::CoarsePos;
///
/// let pos = CoarsePos::new(2, 1);
/// assert_eq!(pos.to_fine(3).row, 7);
/// assert_eq!(pos.to_fine(3).to_coarse(3), pos);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CoarsePos {
    pub row: usize,
    pub col: usize,
}

impl CoarsePos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Centre of this cell on a fine grid of the given density.
    pub fn to_fine(self, density: usize) -> FinePos {
        FinePos::new(density * self.row + 1, density * self.col + 1)
    }

    /// The neighbouring cell in `direction`, if it lies inside a `rows x cols` grid.
    pub fn step(self, direction: Direction, rows: usize, cols: usize) -> Option<CoarsePos> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Self::new(row, self.col)),
            Direction::Down => (self.row + 1 < rows).then(|| Self::new(self.row + 1, self.col)),
            Direction::Left => self.col.checked_sub(1).map(|col| Self::new(self.row, col)),
            Direction::Right => (self.col + 1 < cols).then(|| Self::new(self.row, self.col + 1)),
        }
    }

    /// Whether the two cells share a row or a column.
    pub fn is_aligned_with(self, other: CoarsePos) -> bool {
        self.row == other.row || self.col == other.col
    }
}

impl fmt::Display for CoarsePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A cell of the fine grid that point entities occupy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FinePos {
    pub row: usize,
    pub col: usize,
}

impl FinePos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The coarse cell containing this fine cell.
    pub fn to_coarse(self, density: usize) -> CoarsePos {
        CoarsePos::new(self.row / density, self.col / density)
    }
}

/// Movement directions on the coarse grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all 4 directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }

    /// Map glyph for a party facing this way.
    pub fn glyph(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fine_round_trip_for_every_density() {
        for density in 1..=5 {
            for row in 0..4 {
                for col in 0..4 {
                    let pos = CoarsePos::new(row, col);
                    assert_eq!(pos.to_fine(density).to_coarse(density), pos);
                }
            }
        }
    }

    #[test]
    fn test_fine_centre_offsets() {
        assert_eq!(CoarsePos::new(0, 0).to_fine(3), FinePos::new(1, 1));
        assert_eq!(CoarsePos::new(1, 2).to_fine(3), FinePos::new(4, 7));
    }

    #[test]
    fn test_step_respects_grid_edges() {
        let corner = CoarsePos::new(0, 0);
        assert_eq!(corner.step(Direction::Up, 3, 3), None);
        assert_eq!(corner.step(Direction::Left, 3, 3), None);
        assert_eq!(corner.step(Direction::Down, 3, 3), Some(CoarsePos::new(1, 0)));
        assert_eq!(corner.step(Direction::Right, 3, 3), Some(CoarsePos::new(0, 1)));

        let far = CoarsePos::new(2, 2);
        assert_eq!(far.step(Direction::Down, 3, 3), None);
        assert_eq!(far.step(Direction::Right, 3, 3), None);
    }

    #[test]
    fn test_alignment() {
        let a = CoarsePos::new(1, 1);
        assert!(a.is_aligned_with(CoarsePos::new(1, 4)));
        assert!(a.is_aligned_with(CoarsePos::new(3, 1)));
        assert!(!a.is_aligned_with(CoarsePos::new(2, 2)));
    }

    #[test]
    fn test_direction_glyphs() {
        let glyphs: Vec<char> = Direction::all().into_iter().map(Direction::glyph).collect();
        assert_eq!(glyphs, vec!['^', 'v', '<', '>']);
        assert_eq!(Direction::Right.glyph(), '>');
        assert_eq!(Direction::Up.to_string(), "up");
    }
}
