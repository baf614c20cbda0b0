//! Crossword slots.

use std::fmt;

use crate::Overlap;

/// The direction a slot runs in.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Direction {
    Across,
    Down,
}

/// A crossword slot: its start cell, direction and length.
///
/// Two variables are equal when they describe the same slot.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Variable {
            row,
            col,
            direction,
            length,
        }
    }

    pub fn across(row: usize, col: usize, length: usize) -> Self {
        Self::new(row, col, Direction::Across, length)
    }

    pub fn down(row: usize, col: usize, length: usize) -> Self {
        Self::new(row, col, Direction::Down, length)
    }

    /// Get an iterator over the grid cells covered by the slot, as
    /// (row, col) pairs in word order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |k| match self.direction {
            Direction::Across => (self.row, self.col + k),
            Direction::Down => (self.row + k, self.col),
        })
    }

    /// Find the cell shared with another slot.
    ///
    /// Returns the index of the shared cell within each word, or None
    /// unless the slots share exactly one cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_solver::Variable;
    ///
    /// let across = Variable::across(1, 0, 4);
    /// let down = Variable::down(0, 2, 3);
    /// assert_eq!(across.crossing(&down), Some((2, 1)));
    /// ```
    pub fn crossing(&self, other: &Variable) -> Option<Overlap> {
        let mut shared = self.cells().enumerate().filter_map(|(i, cell)| {
            other
                .cells()
                .position(|other_cell| other_cell == cell)
                .map(|j| (i, j))
        });

        let first = shared.next()?;
        match shared.next() {
            None => Some(first),
            Some(_) => None,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "({}, {}) {} : {}", self.row, self.col, dir, self.length)
    }
}
