//! Checking an assignment against every constraint.

use std::collections::HashSet;

use crate::{letter_at, word_len, Assignment, Crossword};

/// Check that a (possibly partial) assignment breaks no constraint:
/// no word is used twice, every word fits its slot, and every pair of
/// assigned crossing slots agrees on the shared letter.
pub(crate) fn is_consistent(crossword: &Crossword, assignment: &Assignment) -> bool {
    let mut seen = HashSet::with_capacity(assignment.num_assigned());
    if !assignment.iter().all(|(_, word)| seen.insert(word)) {
        return false;
    }

    for (var, word) in assignment.iter() {
        if word_len(word) != crossword.variable(var).length {
            return false;
        }

        for neighbor in crossword.neighbors(var) {
            let other = match assignment.get(neighbor) {
                Some(other) => other,
                None => continue,
            };
            let (i, j) = match crossword.overlap(var, neighbor) {
                Some(overlap) => overlap,
                None => continue,
            };
            if letter_at(word, i) != letter_at(other, j) {
                return false;
            }
        }
    }

    true
}
