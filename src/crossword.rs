//! The crossword's slots and crossings.

use bit_set::BitSet;
use log::debug;
use std::cell::Cell;
use std::collections::HashMap;

use crate::config::SearchConfig;
use crate::domain::Domain;
use crate::search::CrosswordSearch;
use crate::{Error, Overlap, PsResult, Solution, VarToken, Variable};

/// The crossword to be filled.
pub struct Crossword {
    // The slot geometry of each variable.
    variables: Vec<Variable>,

    // The initial list of candidate words for each variable.
    candidates: Vec<Domain>,

    // The shared cell of each crossing pair, stored for both (x, y)
    // and (y, x).  Pairs that do not cross have no entry.
    overlaps: HashMap<(VarToken, VarToken), Overlap>,

    // The variables that cross each variable.
    neighbors: Vec<BitSet>,

    config: SearchConfig,

    // The number of guesses taken by the last search.
    num_guesses: Cell<u32>,
}

impl Crossword {
    /// Allocate a new crossword.
    ///
    /// # Examples
    ///
    /// ```
    /// crossword_solver::Crossword::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Crossword {
            variables: Vec::new(),
            candidates: Vec::new(),
            overlaps: HashMap::new(),
            neighbors: Vec::new(),
            config,
            num_guesses: Cell::new(0),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Add a slot along with its candidate words.
    ///
    /// Candidates of the wrong length are allowed; they are pruned
    /// before the search starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_solver::{Crossword, Variable};
    ///
    /// let mut crossword = Crossword::new();
    /// crossword.new_var(Variable::across(0, 0, 3), &["CAT", "DOG"]);
    /// ```
    pub fn new_var<C: Into<Domain>>(&mut self, variable: Variable, candidates: C) -> VarToken {
        let var = VarToken(self.variables.len());
        self.variables.push(variable);
        self.candidates.push(candidates.into());
        self.neighbors.push(BitSet::new());
        var
    }

    /// Add several slots, each starting with the same candidate words.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_solver::{Crossword, Variable};
    ///
    /// let mut crossword = Crossword::new();
    /// let vars = crossword.new_vars(
    ///     vec![Variable::across(0, 0, 3), Variable::down(0, 0, 3)],
    ///     &["CAT", "COW", "TOW"],
    /// );
    /// assert_eq!(vars.len(), 2);
    /// ```
    pub fn new_vars<I, C>(&mut self, variables: I, candidates: C) -> Vec<VarToken>
    where
        I: IntoIterator<Item = Variable>,
        C: Into<Domain>,
    {
        let candidates = candidates.into();
        variables
            .into_iter()
            .map(|variable| self.new_var(variable, candidates.clone()))
            .collect()
    }

    /// Record that two variables share a cell, at index `x_pos` of x's
    /// word and `y_pos` of y's word.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_solver::{Crossword, Variable};
    ///
    /// let mut crossword = Crossword::new();
    /// let x = crossword.new_var(Variable::across(1, 0, 2), &["TO", "AM"]);
    /// let y = crossword.new_var(Variable::down(1, 1, 2), &["OK", "NO"]);
    /// crossword.set_overlap(x, y, (1, 0)).unwrap();
    /// assert_eq!(crossword.overlap(y, x), Some((0, 1)));
    /// ```
    pub fn set_overlap(&mut self, x: VarToken, y: VarToken, (x_pos, y_pos): Overlap) -> PsResult<()> {
        let x_var = self.variables.get(x.0).ok_or(Error::UnknownVariable(x))?;
        let y_var = self.variables.get(y.0).ok_or(Error::UnknownVariable(y))?;

        if x == y {
            return Err(Error::SelfOverlap(x));
        }
        if x_pos >= x_var.length || y_pos >= y_var.length {
            return Err(Error::OverlapOutOfRange { x, y, x_pos, y_pos });
        }

        self.insert_overlap(x, y, (x_pos, y_pos));
        Ok(())
    }

    /// Derive the overlaps from the slot geometry.  Two slots cross
    /// when they share exactly one cell.
    ///
    /// Returns the number of crossing pairs found.
    pub fn connect_crossings(&mut self) -> usize {
        let mut count = 0;
        for i in 0..self.variables.len() {
            for j in (i + 1)..self.variables.len() {
                if let Some(overlap) = self.variables[i].crossing(&self.variables[j]) {
                    self.insert_overlap(VarToken(i), VarToken(j), overlap);
                    count += 1;
                }
            }
        }

        debug!("connected {} crossings", count);
        count
    }

    fn insert_overlap(&mut self, x: VarToken, y: VarToken, (x_pos, y_pos): Overlap) {
        self.overlaps.insert((x, y), (x_pos, y_pos));
        self.overlaps.insert((y, x), (y_pos, x_pos));
        self.neighbors[x.0].insert(y.0);
        self.neighbors[y.0].insert(x.0);
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    pub fn variable(&self, var: VarToken) -> &Variable {
        &self.variables[var.0]
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Get an iterator over all variable tokens.
    pub fn vars(&self) -> impl Iterator<Item = VarToken> {
        (0..self.variables.len()).map(VarToken)
    }

    /// The shared cell of x and y, as (index in x, index in y).
    pub fn overlap(&self, x: VarToken, y: VarToken) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Get an iterator over the variables crossing `var`.
    pub fn neighbors(&self, var: VarToken) -> impl Iterator<Item = VarToken> + '_ {
        self.neighbors[var.0].iter().map(VarToken)
    }

    /// The number of variables crossing `var`.
    pub fn degree(&self, var: VarToken) -> usize {
        self.neighbors[var.0].len()
    }

    /// The initial candidates of a variable, before any pruning.
    pub fn candidates(&self, var: VarToken) -> &Domain {
        &self.candidates[var.0]
    }

    pub(crate) fn initial_domains(&self) -> Vec<Domain> {
        self.candidates.clone()
    }

    /// Check the slots for problems the search cannot recover from.
    pub fn validate(&self) -> PsResult<()> {
        for (idx, variable) in self.variables.iter().enumerate() {
            if variable.length == 0 {
                return Err(Error::ZeroLength(VarToken(idx)));
            }
        }
        Ok(())
    }

    /// Find a solution to the crossword.
    ///
    /// Returns Ok(None) if no assignment satisfies the crossings and
    /// uses every word at most once.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_solver::{Crossword, Variable};
    ///
    /// let mut crossword = Crossword::new();
    /// crossword.new_var(Variable::across(0, 0, 3), &["CAT", "DOG"]);
    /// crossword.new_var(Variable::across(2, 0, 5), &["HOUSE", "MOUSE"]);
    ///
    /// let solution = crossword.solve().unwrap();
    /// assert!(solution.is_some());
    /// ```
    pub fn solve(&self) -> PsResult<Option<Solution>> {
        self.validate()?;
        self.num_guesses.set(0);
        debug!("solving crossword with {} variables", self.num_vars());

        let mut search = CrosswordSearch::new(self);
        if search.constrain().is_err() {
            debug!("no solution: propagation emptied a domain");
            return Ok(None);
        }

        let solution = search.solve()?;
        debug!(
            "search {} after {} guesses",
            if solution.is_some() { "succeeded" } else { "failed" },
            self.num_guesses()
        );
        Ok(solution)
    }

    /// Take any obvious non-choices, using node and arc consistency to
    /// eliminate candidates.  Stops when it must start guessing.
    /// Primarily for testing.
    ///
    /// Returns the intermediate search state, or None if a
    /// contradiction was found.
    pub fn step(&self) -> Option<CrosswordSearch<'_>> {
        let mut search = CrosswordSearch::new(self);
        search.constrain().ok()?;
        Some(search)
    }

    /// Get the number of guesses taken to solve the last crossword.
    pub fn num_guesses(&self) -> u32 {
        self.num_guesses.get()
    }

    /// Count one trial assignment against the guess limit.
    pub(crate) fn count_guess(&self) -> PsResult<()> {
        let num_guesses = self.num_guesses.get();
        if let Some(limit) = self.config.guess_limit {
            if num_guesses >= limit {
                return Err(Error::GuessLimit(limit));
            }
        }
        self.num_guesses.set(num_guesses + 1);
        Ok(())
    }
}

impl Default for Crossword {
    fn default() -> Self {
        Self::new()
    }
}
