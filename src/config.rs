//! Search limits.

/// Options for the solution search.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchConfig {
    /// Give up after this many trial assignments.  None searches until
    /// the puzzle is solved or proven unsolvable.
    pub guess_limit: Option<u32>,
}

impl SearchConfig {
    /// # Examples
    ///
    /// ```
    /// use crossword_solver::SearchConfig;
    ///
    /// let config = SearchConfig::default().with_guess_limit(10_000);
    /// assert_eq!(config.guess_limit, Some(10_000));
    /// ```
    pub fn with_guess_limit(mut self, limit: u32) -> Self {
        self.guess_limit = Some(limit);
        self
    }
}
