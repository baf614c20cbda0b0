//! The candidate words of each variable.

use std::collections::BTreeSet;
use std::iter::FromIterator;
use std::rc::Rc;

use crate::{word_len, VarToken, Variable};

/// A collection of candidate words.
///
/// The set is shared between clones and copied on the first write, so
/// cloning a domain (or a whole store) is cheap.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Domain {
    words: Rc<BTreeSet<String>>,
}

/// The domains of every variable in a crossword.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DomainStore {
    domains: Vec<Domain>,
}

/// A saved copy of a domain store, to be restored on backtrack.
#[derive(Clone, Debug)]
pub struct Snapshot {
    domains: Vec<Domain>,
}

/*--------------------------------------------------------------*/

impl<'a> From<&'a [&'a str]> for Domain {
    fn from(words: &'a [&'a str]) -> Self {
        words.iter().copied().collect()
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for Domain {
    fn from(words: &'a [&'a str; N]) -> Self {
        words.iter().copied().collect()
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Domain {
    fn from(words: [&'a str; N]) -> Self {
        words.into_iter().collect()
    }
}

impl From<Vec<String>> for Domain {
    fn from(words: Vec<String>) -> Self {
        words.into_iter().collect()
    }
}

impl From<BTreeSet<String>> for Domain {
    fn from(words: BTreeSet<String>) -> Self {
        Domain {
            words: Rc::new(words),
        }
    }
}

impl<'a> FromIterator<&'a str> for Domain {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(String::from).collect()
    }
}

impl FromIterator<String> for Domain {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Domain {
            words: Rc::new(iter.into_iter().collect()),
        }
    }
}

impl Domain {
    /// Count the number of candidates.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Get an iterator over the candidates, in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    /// The remaining candidate, if there is exactly one.
    pub fn single(&self) -> Option<&str> {
        if self.words.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Keep only the candidates matching the predicate.
    ///
    /// Returns the number of candidates removed.  The shared set is
    /// only copied when something is actually removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let discard = self.words.iter().filter(|w| !keep(w)).count();
        if discard > 0 {
            let set = Rc::make_mut(&mut self.words);
            set.retain(|w| keep(w));
        }
        discard
    }

    /// Whether both domains share the same underlying set.
    #[cfg(test)]
    fn ptr_eq(&self, other: &Domain) -> bool {
        Rc::ptr_eq(&self.words, &other.words)
    }
}

/*--------------------------------------------------------------*/

impl DomainStore {
    pub fn new(domains: Vec<Domain>) -> Self {
        DomainStore { domains }
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Get the candidates of a variable.
    pub fn get(&self, var: VarToken) -> &Domain {
        &self.domains[var.index()]
    }

    pub(crate) fn get_mut(&mut self, var: VarToken) -> &mut Domain {
        &mut self.domains[var.index()]
    }

    /// Get an iterator over every variable and its candidates.
    pub fn iter(&self) -> impl Iterator<Item = (VarToken, &Domain)> + '_ {
        self.domains
            .iter()
            .enumerate()
            .map(|(idx, domain)| (VarToken(idx), domain))
    }

    /// Check if any variable has run out of candidates.
    pub fn any_empty(&self) -> bool {
        self.domains.iter().any(Domain::is_empty)
    }

    /// Reduce a variable's candidates to a single word.
    ///
    /// Returns false, leaving the domain untouched, if the word was not
    /// a candidate.
    pub(crate) fn narrow_to(&mut self, var: VarToken, word: &str) -> bool {
        let domain = self.get_mut(var);
        if !domain.contains(word) {
            return false;
        }
        domain.retain(|w| w == word);
        true
    }

    /// Remove every candidate whose length differs from its variable's
    /// length.
    ///
    /// Returns the total number of candidates removed.
    pub fn enforce_node_consistency(&mut self, variables: &[Variable]) -> usize {
        debug_assert_eq!(variables.len(), self.domains.len());

        let mut removed = 0;
        for (domain, variable) in self.domains.iter_mut().zip(variables) {
            removed += domain.retain(|w| word_len(w) == variable.length);
        }
        removed
    }

    /// Save the current domains.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            domains: self.domains.clone(),
        }
    }

    /// Return every domain to the state saved in the snapshot.
    pub fn restore(&mut self, snapshot: Snapshot) {
        debug_assert_eq!(snapshot.domains.len(), self.domains.len());
        self.domains = snapshot.domains;
    }
}
