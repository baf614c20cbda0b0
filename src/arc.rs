//! Arc consistency (AC-3) over the crossing constraints.

use bit_set::BitSet;
use log::{debug, trace};
use std::collections::VecDeque;

use crate::domain::DomainStore;
use crate::{letter_at, Crossword, Error, PsResult, VarToken};

/// A directed constraint: prune the first variable against the second.
pub(crate) type Arc = (VarToken, VarToken);

/// Every arc of the crossword, in token order.
pub(crate) fn all_arcs(crossword: &Crossword) -> Vec<Arc> {
    crossword
        .vars()
        .flat_map(|x| crossword.neighbors(x).map(move |y| (x, y)))
        .collect()
}

/// The arcs to re-check after `var` has been assigned: each neighbor
/// against `var`.
pub(crate) fn inference_arcs(crossword: &Crossword, var: VarToken) -> Vec<Arc> {
    crossword.neighbors(var).map(|z| (z, var)).collect()
}

/// Make x arc consistent with y, removing every word of x that no word
/// of y agrees with at their shared cell.
///
/// Returns true if x's domain was changed.
pub(crate) fn revise(crossword: &Crossword, domains: &mut DomainStore, x: VarToken, y: VarToken) -> bool {
    let (x_pos, y_pos) = match crossword.overlap(x, y) {
        Some(overlap) => overlap,
        None => return false,
    };

    // The letters y can still place in the shared cell.
    let supported: Vec<char> = {
        let mut letters: Vec<char> = domains
            .get(y)
            .iter()
            .filter_map(|w| letter_at(w, y_pos))
            .collect();
        letters.sort_unstable();
        letters.dedup();
        letters
    };

    let removed = domains.get_mut(x).retain(|w| {
        letter_at(w, x_pos).map_or(false, |c| supported.binary_search(&c).is_ok())
    });

    if removed > 0 {
        trace!("revise {:?} against {:?}: removed {} words", x, y, removed);
    }
    removed > 0
}

/// Enforce arc consistency, starting from the given arcs.
///
/// Whenever a domain shrinks, the arcs pointing at it are queued again.
/// Fails with a contradiction as soon as any domain is emptied.
pub(crate) fn ac3<I>(crossword: &Crossword, domains: &mut DomainStore, arcs: I) -> PsResult<()>
where
    I: IntoIterator<Item = Arc>,
{
    let num_vars = crossword.num_vars();
    let arc_index = |(x, y): Arc| x.index() * num_vars + y.index();

    let mut queue = VecDeque::new();
    let mut queued = BitSet::new();
    for arc in arcs {
        if queued.insert(arc_index(arc)) {
            queue.push_back(arc);
        }
    }

    let mut revisions = 0;
    while let Some(arc) = queue.pop_front() {
        queued.remove(arc_index(arc));
        let (x, y) = arc;

        if !revise(crossword, domains, x, y) {
            continue;
        }

        revisions += 1;
        if domains.get(x).is_empty() {
            debug!("arc consistency emptied {:?} after {} revisions", x, revisions);
            return Err(Error::Contradiction);
        }

        for z in crossword.neighbors(x).filter(|&z| z != y) {
            if queued.insert(arc_index((z, x))) {
                queue.push_back((z, x));
            }
        }
    }

    debug!("arc consistency reached after {} revisions", revisions);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Domain, Variable};

    fn two_slots(xs: &[&str], ys: &[&str]) -> (Crossword, VarToken, VarToken) {
        let mut sys = Crossword::new();
        let x = sys.new_var(Variable::across(1, 0, 2), xs);
        let y = sys.new_var(Variable::down(1, 1, 2), ys);
        sys.set_overlap(x, y, (1, 0)).unwrap();
        (sys, x, y)
    }

    fn words(domains: &DomainStore, var: VarToken) -> Vec<&str> {
        domains.get(var).iter().collect()
    }

    #[test]
    fn test_revise_without_overlap() {
        let mut sys = Crossword::new();
        let x = sys.new_var(Variable::across(0, 0, 3), &["CAT", "DOG"]);
        let y = sys.new_var(Variable::across(2, 0, 5), &["HOUSE"]);
        let mut domains = DomainStore::new(sys.initial_domains());

        assert!(!revise(&sys, &mut domains, x, y));
        assert_eq!(words(&domains, x), vec!["CAT", "DOG"]);
    }

    #[test]
    fn test_revise_is_sound() {
        let (sys, x, y) = two_slots(&["TO", "AM"], &["OK", "NO"]);
        let mut domains = DomainStore::new(sys.initial_domains());

        assert!(revise(&sys, &mut domains, x, y));
        assert_eq!(words(&domains, x), vec!["TO"]);
        assert!(!revise(&sys, &mut domains, x, y));

        // Every remaining word of x has support in y.
        let (x_pos, y_pos) = sys.overlap(x, y).unwrap();
        for wx in domains.get(x).iter() {
            assert!(domains
                .get(y)
                .iter()
                .any(|wy| letter_at(wx, x_pos) == letter_at(wy, y_pos)));
        }
    }

    #[test]
    fn test_ac3_prunes_both_sides() {
        let (sys, x, y) = two_slots(&["TO", "AM"], &["OK", "NO"]);
        let mut domains = DomainStore::new(sys.initial_domains());

        ac3(&sys, &mut domains, all_arcs(&sys)).unwrap();
        assert_eq!(words(&domains, x), vec!["TO"]);
        assert_eq!(words(&domains, y), vec!["OK"]);
    }

    #[test]
    fn test_ac3_contradiction() {
        let (sys, _, _) = two_slots(&["AB", "CD"], &["XY", "ZW"]);
        let mut domains = DomainStore::new(sys.initial_domains());

        assert_eq!(ac3(&sys, &mut domains, all_arcs(&sys)), Err(Error::Contradiction));
    }

    #[test]
    fn test_ac3_requeues_neighbors() {
        // z crosses x; x crosses y.  Pruning x against y must in turn
        // prune z against x.
        let mut sys = Crossword::new();
        let x = sys.new_var(Variable::across(1, 0, 3), &["CAT", "COT"]);
        let y = sys.new_var(Variable::down(0, 1, 3), &["BAD"]);
        let z = sys.new_var(Variable::down(0, 2, 3), &["STY", "SOX"]);
        sys.set_overlap(x, y, (1, 1)).unwrap();
        sys.set_overlap(x, z, (2, 1)).unwrap();

        let mut domains = DomainStore::new(sys.initial_domains());
        ac3(&sys, &mut domains, vec![(x, y)]).unwrap();
        assert_eq!(words(&domains, x), vec!["CAT"]);
        assert_eq!(words(&domains, z), vec!["STY"]);
    }

    #[test]
    fn test_ac3_domains_only_shrink() {
        let mut sys = Crossword::new();
        let words = Domain::from(&["CAT", "CAR", "ART", "RAT", "TAR", "TOWN", "TORN", "RAW"]);
        sys.new_vars(
            vec![
                Variable::across(0, 0, 3),
                Variable::down(0, 0, 3),
                Variable::down(0, 2, 4),
                Variable::across(2, 0, 3),
            ],
            words,
        );
        sys.connect_crossings();

        let mut domains = DomainStore::new(sys.initial_domains());
        domains.enforce_node_consistency(sys.variables());
        let before = domains.clone();

        ac3(&sys, &mut domains, all_arcs(&sys)).unwrap();
        for (var, domain) in domains.iter() {
            let old = before.get(var);
            assert!(domain.len() <= old.len());
            assert!(domain.iter().all(|w| old.contains(w)));
        }
    }

    #[test]
    fn test_inference_arcs() {
        let (sys, x, y) = two_slots(&["TO"], &["OK"]);
        assert_eq!(inference_arcs(&sys, x), vec![(y, x)]);
        assert_eq!(all_arcs(&sys), vec![(x, y), (y, x)]);
    }
}
