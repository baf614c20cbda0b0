//! The backtracking search over partial assignments.

use log::trace;
use std::fmt;
use std::ops;

use crate::arc;
use crate::consistency::is_consistent;
use crate::domain::{Domain, DomainStore};
use crate::order::{order_domain_values, select_unassigned_variable};
use crate::{Assignment, Crossword, Error, PsResult, Solution, VarToken};

/// Intermediate crossword search state.
#[derive(Clone)]
pub struct CrosswordSearch<'a> {
    crossword: &'a Crossword,
    domains: DomainStore,
    assignment: Assignment,
}

impl<'a> CrosswordSearch<'a> {
    /// Allocate a new crossword searcher.
    pub(crate) fn new(crossword: &'a Crossword) -> Self {
        CrosswordSearch {
            crossword,
            domains: DomainStore::new(crossword.initial_domains()),
            assignment: Assignment::new(crossword.num_vars()),
        }
    }

    pub fn domains(&self) -> &DomainStore {
        &self.domains
    }

    /// Get the remaining candidates of a variable.
    pub fn domain(&self, var: VarToken) -> &Domain {
        self.domains.get(var)
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Check if the variable has been assigned a word.
    pub fn is_assigned(&self, var: VarToken) -> bool {
        self.assignment.is_assigned(var)
    }

    /// Get the word assigned to a variable, or None.
    pub fn get_assigned(&self, var: VarToken) -> Option<&str> {
        self.assignment.get(var)
    }

    /// Enforce node consistency and then arc consistency across the
    /// whole crossword.
    pub(crate) fn constrain(&mut self) -> PsResult<()> {
        let removed = self.domains.enforce_node_consistency(self.crossword.variables());
        trace!("node consistency removed {} words", removed);
        if self.domains.any_empty() {
            return Err(Error::Contradiction);
        }

        arc::ac3(self.crossword, &mut self.domains, arc::all_arcs(self.crossword))
    }

    /// Search for a complete assignment from the current state.
    pub(crate) fn solve(&mut self) -> PsResult<Option<Solution>> {
        if !self.backtrack()? {
            return Ok(None);
        }

        debug_assert!(is_consistent(self.crossword, &self.assignment));
        Ok(self
            .assignment
            .clone()
            .into_words()
            .map(|words| Solution { words }))
    }

    /// Extend the assignment until it is complete.
    ///
    /// Returns false if no extension works, in which case the domains
    /// and assignment are left exactly as they were found.
    fn backtrack(&mut self) -> PsResult<bool> {
        let var = match select_unassigned_variable(self.crossword, &self.domains, &self.assignment) {
            Some(var) => var,
            None => return Ok(true),
        };

        let words = order_domain_values(self.crossword, &self.domains, &self.assignment, var);
        for word in words {
            self.crossword.count_guess()?;
            trace!("try {:?} = {}", var, word);

            self.assignment.assign(var, word.clone());
            if !is_consistent(self.crossword, &self.assignment) {
                self.assignment.unassign(var);
                continue;
            }

            let snapshot = self.domains.snapshot();
            let forced = match self.infer(var, &word) {
                Ok(forced) => forced,
                Err(_) => {
                    self.domains.restore(snapshot);
                    self.assignment.unassign(var);
                    continue;
                }
            };

            if self.backtrack()? {
                return Ok(true);
            }

            trace!("backtrack from {:?} = {}", var, word);
            for &other in forced.iter() {
                self.assignment.unassign(other);
            }
            self.assignment.unassign(var);
            self.domains.restore(snapshot);
        }

        Ok(false)
    }

    /// Propagate the assignment of `word` to `var` into its neighbors'
    /// domains, then assign every neighbor left with a single word.
    ///
    /// Returns the forced variables.  On a contradiction the forced
    /// assignments are already undone, but the domains are not.
    fn infer(&mut self, var: VarToken, word: &str) -> PsResult<Vec<VarToken>> {
        if !self.domains.narrow_to(var, word) {
            return Err(Error::Contradiction);
        }
        arc::ac3(self.crossword, &mut self.domains, arc::inference_arcs(self.crossword, var))?;

        let mut forced = Vec::new();
        for neighbor in self.crossword.neighbors(var) {
            if self.assignment.is_assigned(neighbor) {
                continue;
            }
            if let Some(only) = self.domains.get(neighbor).single() {
                trace!("forced {:?} = {}", neighbor, only);
                self.assignment.assign(neighbor, only.to_string());
                forced.push(neighbor);
            }
        }

        if !forced.is_empty() && !is_consistent(self.crossword, &self.assignment) {
            for &other in forced.iter() {
                self.assignment.unassign(other);
            }
            return Err(Error::Contradiction);
        }

        Ok(forced)
    }
}

impl fmt::Debug for CrosswordSearch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "CrosswordSearch={{")?;
        for (var, domain) in self.domains.iter() {
            writeln!(f)?;

            match self.assignment.get(var) {
                Some(word) => {
                    write!(f, "  var {}: {}", var.index(), word)?;
                }
                None => {
                    write!(f, "  var {}:", var.index())?;
                    for word in domain.iter() {
                        write!(f, " {}", word)?;
                    }
                }
            }
        }
        write!(f, "}}")?;
        Ok(())
    }
}

impl ops::Index<VarToken> for CrosswordSearch<'_> {
    type Output = str;

    /// Get the word assigned to a variable.
    ///
    /// # Panics
    ///
    /// Panics if the variable has not been assigned.
    fn index(&self, var: VarToken) -> &str {
        match self.assignment.get(var) {
            Some(word) => word,
            None => panic!("unassigned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Variable;

    #[test]
    fn test_step_propagates_without_guessing() {
        let mut sys = Crossword::new();
        let x = sys.new_var(Variable::across(1, 0, 2), &["TO", "AM", "CAT"]);
        let y = sys.new_var(Variable::down(1, 1, 2), &["OK", "NO"]);
        sys.set_overlap(x, y, (1, 0)).unwrap();

        let search = sys.step().expect("consistent");
        assert_eq!(search.domain(x).single(), Some("TO"));
        assert_eq!(search.domain(y).single(), Some("OK"));
        assert!(!search.is_assigned(x));
        assert_eq!(sys.num_guesses(), 0);
    }

    #[test]
    fn test_failed_branch_restores_state() {
        // Three disjoint slots sharing two words: arc consistent, but
        // unsatisfiable because words may not repeat.
        let mut sys = Crossword::new();
        sys.new_vars(
            vec![
                Variable::across(0, 0, 3),
                Variable::across(2, 0, 3),
                Variable::across(4, 0, 3),
            ],
            &["CAT", "DOG"],
        );

        let mut search = sys.step().expect("arc consistent");
        let domains = search.domains().clone();
        let assignment = search.assignment().clone();

        assert_eq!(search.backtrack(), Ok(false));
        assert_eq!(search.domains(), &domains);
        assert_eq!(search.assignment(), &assignment);
        assert!(sys.num_guesses() > 0);
    }

    #[test]
    fn test_failed_subtree_restores_pruned_domains() {
        // a crosses b and c.  Choosing a = "BOO" forces both b and c
        // to "TOE", which breaks uniqueness.
        let mut sys = Crossword::new();
        let a = sys.new_var(Variable::across(1, 0, 3), &["BAT", "BOO"]);
        let b = sys.new_var(Variable::down(0, 1, 3), &["MAN", "TOE"]);
        let c = sys.new_var(Variable::down(0, 2, 3), &["STY", "TOE"]);
        sys.connect_crossings();

        let mut search = sys.step().expect("arc consistent");
        let domains = search.domains().clone();

        search.assignment.assign(a, "BOO".to_string());
        let snapshot = search.domains.snapshot();
        assert_eq!(search.infer(a, "BOO"), Err(Error::Contradiction));
        assert!(!search.is_assigned(b));
        assert!(!search.is_assigned(c));
        assert_eq!(search.domain(b).single(), Some("TOE"));

        search.domains.restore(snapshot);
        search.assignment.unassign(a);
        assert_eq!(search.domains(), &domains);

        assert_eq!(search.backtrack(), Ok(true));
        assert_eq!(&search[a], "BAT");
        assert_eq!(&search[b], "MAN");
        assert_eq!(&search[c], "STY");
        assert!(is_consistent(&sys, search.assignment()));
    }

    #[test]
    fn test_debug_output() {
        let mut sys = Crossword::new();
        sys.new_var(Variable::across(0, 0, 2), &["TO", "OK"]);
        let search = sys.step().expect("consistent");
        assert_eq!(format!("{:?}", search), "CrosswordSearch={\n  var 0: OK TO}");
    }
}
