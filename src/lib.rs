//! This crate fills crossword grids.
//! Each slot is a variable whose candidates are words, and the
//! crossings between slots are expressed as letter constraints.

mod arc;
mod assignment;
mod config;
mod consistency;
mod crossword;
mod domain;
mod error;
mod order;
mod search;
mod variable;

use std::ops;

pub use assignment::Assignment;
pub use config::SearchConfig;
pub use crossword::Crossword;
pub use domain::{Domain, DomainStore, Snapshot};
pub use error::Error;
pub use search::CrosswordSearch;
pub use variable::{Direction, Variable};

/// A crossword variable token.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VarToken(usize);

impl VarToken {
    /// The position of the variable in its puzzle.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The shared cell of two crossing variables, as (index in x, index in y).
pub type Overlap = (usize, usize);

/// A result during a crossword solution search (Err = contradiction).
pub type PsResult<T> = Result<T, Error>;

/// A dictionary mapping crossword variables to the chosen word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    words: Vec<String>,
}

impl Solution {
    /// Get the word chosen for a variable, or None if the token does
    /// not belong to the solved puzzle.
    pub fn get(&self, var: VarToken) -> Option<&str> {
        self.words.get(var.0).map(String::as_str)
    }

    /// Iterate over every variable and its word, in token order.
    pub fn iter(&self) -> impl Iterator<Item = (VarToken, &str)> + '_ {
        self.words
            .iter()
            .enumerate()
            .map(|(idx, word)| (VarToken(idx), word.as_str()))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl ops::Index<VarToken> for Solution {
    type Output = str;
    fn index(&self, var: VarToken) -> &str {
        let VarToken(idx) = var;
        &self.words[idx]
    }
}

/// The character at `pos` in `word`, counting in chars rather than bytes.
pub(crate) fn letter_at(word: &str, pos: usize) -> Option<char> {
    word.chars().nth(pos)
}

/// The length of `word` in chars.
pub(crate) fn word_len(word: &str) -> usize {
    word.chars().count()
}
