//! Partial assignments built during the search.

use crate::VarToken;

/// A partial mapping from variables to their chosen words.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Assignment {
    words: Vec<Option<String>>,
    num_assigned: usize,
}

impl Assignment {
    /// Allocate an empty assignment for a puzzle of `num_vars` variables.
    pub fn new(num_vars: usize) -> Self {
        Assignment {
            words: vec![None; num_vars],
            num_assigned: 0,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.words.len()
    }

    pub fn num_assigned(&self) -> usize {
        self.num_assigned
    }

    /// Check if every variable has been assigned a word.
    pub fn is_complete(&self) -> bool {
        self.num_assigned == self.words.len()
    }

    pub fn is_assigned(&self, var: VarToken) -> bool {
        self.words[var.index()].is_some()
    }

    /// Get the word assigned to a variable, or None.
    pub fn get(&self, var: VarToken) -> Option<&str> {
        self.words[var.index()].as_deref()
    }

    /// Set a variable's word, replacing any earlier one.
    pub fn assign(&mut self, var: VarToken, word: String) {
        if self.words[var.index()].replace(word).is_none() {
            self.num_assigned += 1;
        }
    }

    /// Clear a variable's word, returning it.
    pub fn unassign(&mut self, var: VarToken) -> Option<String> {
        let word = self.words[var.index()].take();
        if word.is_some() {
            self.num_assigned -= 1;
        }
        word
    }

    /// Get an iterator over the assigned variables and their words.
    pub fn iter(&self) -> impl Iterator<Item = (VarToken, &str)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(idx, word)| word.as_deref().map(|w| (VarToken(idx), w)))
    }

    /// Take the words of a complete assignment.
    pub(crate) fn into_words(self) -> Option<Vec<String>> {
        self.words.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_unassign() {
        let mut assignment = Assignment::new(2);
        assert!(!assignment.is_complete());

        assignment.assign(VarToken(1), "DOG".to_string());
        assignment.assign(VarToken(1), "CAT".to_string());
        assert_eq!(assignment.num_assigned(), 1);
        assert_eq!(assignment.get(VarToken(1)), Some("CAT"));

        assignment.assign(VarToken(0), "TO".to_string());
        assert!(assignment.is_complete());

        assert_eq!(assignment.unassign(VarToken(0)), Some("TO".to_string()));
        assert_eq!(assignment.unassign(VarToken(0)), None);
        assert_eq!(assignment.num_assigned(), 1);
        assert_eq!(
            assignment.iter().collect::<Vec<_>>(),
            vec![(VarToken(1), "CAT")]
        );
    }

    #[test]
    fn test_into_words() {
        let mut assignment = Assignment::new(2);
        assignment.assign(VarToken(0), "TO".to_string());
        assert_eq!(assignment.clone().into_words(), None);

        assignment.assign(VarToken(1), "OK".to_string());
        assert_eq!(
            assignment.into_words(),
            Some(vec!["TO".to_string(), "OK".to_string()])
        );
    }
}
