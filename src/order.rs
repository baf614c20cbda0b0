//! Choosing which slot to fill next, and which words to try first.

use std::cmp::Reverse;

use crate::domain::DomainStore;
use crate::{letter_at, Assignment, Crossword, VarToken};

/// Pick the unassigned variable with the fewest remaining candidates,
/// breaking ties by the most crossings and then by the lowest token.
///
/// Returns None if every variable is assigned.
pub(crate) fn select_unassigned_variable(
    crossword: &Crossword,
    domains: &DomainStore,
    assignment: &Assignment,
) -> Option<VarToken> {
    crossword
        .vars()
        .filter(|&var| !assignment.is_assigned(var))
        .min_by_key(|&var| (domains.get(var).len(), Reverse(crossword.degree(var))))
}

/// List the candidates of `var`, least constraining first.
///
/// A word's cost is the number of words it would rule out across all
/// unassigned neighbors.  Words of equal cost keep their sorted order.
pub(crate) fn order_domain_values(
    crossword: &Crossword,
    domains: &DomainStore,
    assignment: &Assignment,
    var: VarToken,
) -> Vec<String> {
    let neighbors: Vec<_> = crossword
        .neighbors(var)
        .filter(|&n| !assignment.is_assigned(n))
        .filter_map(|n| crossword.overlap(var, n).map(|overlap| (n, overlap)))
        .collect();

    let mut scored: Vec<(usize, &str)> = domains
        .get(var)
        .iter()
        .map(|word| {
            let eliminated = neighbors
                .iter()
                .map(|&(n, (i, j))| {
                    let letter = letter_at(word, i);
                    domains
                        .get(n)
                        .iter()
                        .filter(|other| letter_at(other, j) != letter)
                        .count()
                })
                .sum();
            (eliminated, word)
        })
        .collect();

    scored.sort_by_key(|&(eliminated, _)| eliminated);
    scored.into_iter().map(|(_, word)| word.to_string()).collect()
}
