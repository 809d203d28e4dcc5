//! Moore's DFA minimization.
//!
//! Starts from the accepting / non-accepting split and refines every group by successor signature: the group index of
//! each state's target under each symbol, ascending, with `None` where a transition is missing. Rounds repeat until the
//! number of groups stops changing. Two states survive in one group exactly when no input distinguishes them.

use indexmap::IndexMap;

use crate::dfa::{Dfa, StateId};

/// The result of partition refinement.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Final groups, members in canonical label order.
    pub groups: Vec<Vec<StateId>>,
    /// Number of groups after the initial split and after every round.
    pub history: Vec<usize>,
    group_of: Vec<usize>,
}

impl Partition {
    /// Index of the group a state ended up in.
    pub fn group_of(&self, state: StateId) -> usize {
        self.group_of[state.index()]
    }

    /// The state that stands for the group: `X` if present, then `Y`, then the first member in canonical order.
    /// Members are kept in canonical order, so that is always the first one.
    pub fn representative(&self, group: usize) -> StateId {
        self.groups[group][0]
    }

    /// Number of refinement rounds run, the last one being the round that changed nothing.
    pub fn rounds(&self) -> usize {
        self.history.len() - 1
    }
}

fn index_groups(groups: &[Vec<StateId>], len: usize) -> Vec<usize> {
    let mut group_of = vec![0; len];
    for (i, group) in groups.iter().enumerate() {
        for state in group {
            group_of[state.index()] = i;
        }
    }
    group_of
}

/// Runs Moore partition refinement to its fixpoint.
pub fn refine(dfa: &Dfa) -> Partition {
    let (accepting, rejecting): (Vec<StateId>, Vec<StateId>) = dfa
        .canonical_states()
        .into_iter()
        .partition(|&state| dfa.is_accept(state));

    let mut groups: Vec<Vec<StateId>> = [accepting, rejecting]
        .into_iter()
        .filter(|group| !group.is_empty())
        .collect();
    let mut history = vec![groups.len()];

    loop {
        let group_of = index_groups(&groups, dfa.len());
        let mut next: Vec<Vec<StateId>> = Vec::with_capacity(groups.len());

        for group in &groups {
            if group.len() <= 1 {
                next.push(group.clone());
                continue;
            }

            let mut by_signature: IndexMap<Vec<Option<usize>>, Vec<StateId>> = IndexMap::new();
            for &state in group {
                let signature = dfa
                    .alphabet()
                    .iter()
                    .map(|&symbol| dfa.transition(state, symbol).map(|to| group_of[to.index()]))
                    .collect();
                by_signature.entry(signature).or_default().push(state);
            }
            next.extend(by_signature.into_values());
        }

        history.push(next.len());
        let stable = next.len() == groups.len();
        groups = next;
        if stable {
            break;
        }
    }

    let group_of = index_groups(&groups, dfa.len());
    Partition {
        groups,
        history,
        group_of,
    }
}

/// Builds the minimal DFA: one state per group, named after its representative, transitions rewritten between
/// representatives.
pub fn minimize(dfa: &Dfa) -> Dfa {
    quotient(dfa, &refine(dfa))
}

/// The automaton obtained by collapsing every group of `partition` into its representative.
pub fn quotient(dfa: &Dfa, partition: &Partition) -> Dfa {
    let start_group = partition.group_of(dfa.start());
    let start_rep = partition.representative(start_group);

    let mut minimized = Dfa::new(dfa.label(start_rep).clone(), dfa.is_accept(start_rep));
    for &symbol in dfa.alphabet() {
        minimized.add_symbol(symbol);
    }

    let mut new_state: Vec<Option<StateId>> = vec![None; partition.groups.len()];
    new_state[start_group] = Some(minimized.start());
    for group in 0..partition.groups.len() {
        if new_state[group].is_none() {
            let rep = partition.representative(group);
            new_state[group] = Some(minimized.add_state(dfa.label(rep).clone(), dfa.is_accept(rep)));
        }
    }

    for (group, from) in new_state.iter().enumerate() {
        let Some(from) = *from else { continue };
        let rep = partition.representative(group);
        for (symbol, target) in dfa.transitions(rep) {
            if let Some(to) = new_state[partition.group_of(target)] {
                minimized.add_transition(from, symbol, to);
            }
        }
    }

    minimized
}

// MARK: Tests
#[cfg(test)]
mod test {
    use super::*;
    use crate::label::Label;
    use crate::Simulate;

    /// X -a-> 0, X -b-> 1, 0 and 1 both go to Y on every symbol.
    fn twin_paths() -> Dfa {
        let mut dfa = Dfa::new(Label::Start, false);
        let zero = dfa.add_state(Label::Numbered(0), false);
        let one = dfa.add_state(Label::Numbered(1), false);
        let y = dfa.add_state(Label::Accept(0), true);
        dfa.add_transition(dfa.start(), 'a', zero);
        dfa.add_transition(dfa.start(), 'b', one);
        for from in [zero, one] {
            dfa.add_transition(from, 'a', y);
            dfa.add_transition(from, 'b', y);
        }
        dfa
    }

    #[test]
    fn test_twins_collapse() {
        let dfa = twin_paths();
        let partition = refine(&dfa);

        let zero = dfa.find(&Label::Numbered(0)).unwrap();
        let one = dfa.find(&Label::Numbered(1)).unwrap();
        assert_eq!(partition.group_of(zero), partition.group_of(one));
        assert_eq!(partition.groups.len(), 3);

        let minimized = minimize(&dfa);
        assert_eq!(minimized.len(), 3);
        let labels: Vec<String> = minimized
            .canonical_states()
            .into_iter()
            .map(|s| minimized.label(s).to_string())
            .collect();
        assert_eq!(labels, ["X", "Y", "0"]);

        let rep = minimized.find(&Label::Numbered(0)).unwrap();
        assert_eq!(minimized.transition(minimized.start(), 'a'), Some(rep));
        assert_eq!(minimized.transition(minimized.start(), 'b'), Some(rep));
        for word in ["aa", "ab", "ba", "bb"] {
            assert!(minimized.simulate_str(word));
        }
        assert!(!minimized.simulate_str("a"));
    }

    #[test]
    fn test_missing_transition_distinguishes() {
        // 0 has no 'b' edge, 1 does, so they must stay apart.
        let mut dfa = Dfa::new(Label::Start, false);
        let zero = dfa.add_state(Label::Numbered(0), false);
        let one = dfa.add_state(Label::Numbered(1), false);
        let y = dfa.add_state(Label::Accept(0), true);
        dfa.add_transition(dfa.start(), 'a', zero);
        dfa.add_transition(dfa.start(), 'b', one);
        dfa.add_transition(zero, 'a', y);
        dfa.add_transition(one, 'a', y);
        dfa.add_transition(one, 'b', y);

        let partition = refine(&dfa);
        assert_ne!(partition.group_of(zero), partition.group_of(one));
        assert_eq!(minimize(&dfa).len(), 4);
    }

    #[test]
    fn test_accepting_states_merge_into_y() {
        let mut dfa = Dfa::new(Label::Start, false);
        let y = dfa.add_state(Label::Accept(0), true);
        let y1 = dfa.add_state(Label::Accept(1), true);
        dfa.add_transition(dfa.start(), 'a', y);
        dfa.add_transition(dfa.start(), 'b', y1);

        let minimized = minimize(&dfa);
        assert_eq!(minimized.len(), 2);
        assert!(minimized.find(&Label::Accept(1)).is_none());
        let y = minimized.find(&Label::Accept(0)).unwrap();
        assert_eq!(minimized.transition(minimized.start(), 'b'), Some(y));
    }

    #[test]
    fn test_history_is_monotone() {
        let partition = refine(&twin_paths());
        assert!(partition.history.windows(2).all(|w| w[0] <= w[1]));
        assert!(partition.rounds() <= 4);
        assert_eq!(partition.history.last(), Some(&3));
    }
}
