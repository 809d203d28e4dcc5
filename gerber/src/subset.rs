//! Subset construction: NFA to DFA.
//!
//! 1. The DFA start state is the epsilon closure of the NFA start.
//! 2. Subsets are processed in the order they are discovered. For each symbol, ascending, the target subset is the
//!    epsilon closure of the move. An empty target means no transition.
//! 3. New subsets are named as they are found: `Y`, `Y1`, ... if they hold an accepting NFA state, `0`, `1`, ... otherwise.

use hashbrown::HashMap;
use std::collections::VecDeque;

use crate::dfa::{Dfa, StateId};
use crate::label::{Label, LabelCounter};
use crate::nfa::Nfa;
use crate::state_set::StateSet;
use crate::Error;

/// Convert an NFA to an equivalent DFA.
///
/// The start subset keeps the label `X` even when it holds an accepting NFA state; it is still flagged accepting.
pub fn subset_construction(nfa: &Nfa) -> Result<Dfa, Error> {
    let start = nfa.start().ok_or(Error::MissingStart)?;
    let accepting = nfa.accepting();

    let start_set = nfa.epsilon_closure(&StateSet::singleton(start, nfa.len()));
    let mut dfa = Dfa::new(Label::Start, start_set.intersects(&accepting));
    for &symbol in nfa.alphabet() {
        dfa.add_symbol(symbol);
    }

    let mut state_map: HashMap<StateSet, StateId> = HashMap::new();
    let mut worklist: VecDeque<(StateSet, StateId)> = VecDeque::new();
    let mut counter = LabelCounter::new();

    state_map.insert(start_set.clone(), dfa.start());
    worklist.push_back((start_set, dfa.start()));

    while let Some((current_set, current)) = worklist.pop_front() {
        for &symbol in nfa.alphabet() {
            let target_set = nfa.epsilon_closure(&nfa.move_on(&current_set, symbol));
            if target_set.is_empty() {
                continue;
            }

            let target = match state_map.get(&target_set) {
                Some(&existing) => existing,
                None => {
                    let is_accept = target_set.intersects(&accepting);
                    let new_state = dfa.add_state(counter.next(is_accept), is_accept);
                    state_map.insert(target_set.clone(), new_state);
                    worklist.push_back((target_set, new_state));
                    new_state
                }
            };

            let replaced = dfa.add_transition(current, symbol, target);
            debug_assert!(replaced.is_none(), "subset construction emitted two transitions on one symbol");
        }
    }

    Ok(dfa)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Simulate;

    /// Thompson NFA for `a|b`, built by hand.
    fn a_or_b() -> Nfa {
        let mut nfa = Nfa::new();
        let a_start = nfa.add_state();
        let a_end = nfa.add_state();
        let b_start = nfa.add_state();
        let b_end = nfa.add_state();
        let start = nfa.add_state();
        let end = nfa.add_state();
        nfa.add_transition(a_start, Some('a'), a_end);
        nfa.add_transition(b_start, Some('b'), b_end);
        nfa.add_epsilon(start, a_start);
        nfa.add_epsilon(start, b_start);
        nfa.add_epsilon(a_end, end);
        nfa.add_epsilon(b_end, end);
        nfa.set_start(start);
        nfa.set_accept(end, true);
        nfa
    }

    #[test]
    fn test_subset_construction_union() {
        let dfa = subset_construction(&a_or_b()).unwrap();

        assert_eq!(dfa.len(), 3);
        assert_eq!(dfa.label(dfa.start()), &Label::Start);
        assert!(!dfa.is_accept(dfa.start()));

        let on_a = dfa.transition(dfa.start(), 'a').unwrap();
        let on_b = dfa.transition(dfa.start(), 'b').unwrap();
        assert_eq!(dfa.label(on_a), &Label::Accept(0));
        assert_eq!(dfa.label(on_b), &Label::Accept(1));

        assert!(dfa.simulate_str("a"));
        assert!(dfa.simulate_str("b"));
        assert!(!dfa.simulate_str("c"));
        assert!(!dfa.simulate_str("ab"));
    }

    #[test]
    fn test_accepting_start_keeps_x() {
        // a*
        let mut nfa = Nfa::new();
        let inner_start = nfa.add_state();
        let inner_end = nfa.add_state();
        let start = nfa.add_state();
        let end = nfa.add_state();
        nfa.add_transition(inner_start, Some('a'), inner_end);
        nfa.add_epsilon(start, inner_start);
        nfa.add_epsilon(start, end);
        nfa.add_epsilon(inner_end, inner_start);
        nfa.add_epsilon(inner_end, end);
        nfa.set_start(start);
        nfa.set_accept(end, true);

        let dfa = subset_construction(&nfa).unwrap();
        assert_eq!(dfa.label(dfa.start()), &Label::Start);
        assert!(dfa.is_accept(dfa.start()));
        assert!(dfa.simulate_str(""));
        assert!(dfa.simulate_str("aaaa"));

        let on_a = dfa.transition(dfa.start(), 'a').unwrap();
        assert_eq!(dfa.label(on_a), &Label::Accept(0));
        assert_eq!(dfa.transition(on_a, 'a'), Some(on_a));
    }

    #[test]
    fn test_no_start() {
        assert_eq!(subset_construction(&Nfa::new()).unwrap_err(), Error::MissingStart);
    }
}
