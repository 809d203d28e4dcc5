//! Non-deterministic automata: arena states with epsilon edges, closure, move and breadth first relabelling.

use corrida::{Corrida, Idx};
use smallvec::SmallVec;
use std::collections::{BTreeSet, VecDeque};

use crate::label::{Label, LabelCounter};
use crate::state_set::StateSet;
use crate::{Error, Simulate};

/// Handle of a state inside an `Nfa`.
pub type StateId = Idx<NfaState>;

/// A labelled edge, `None` is an epsilon transition.
pub type Transition = (Option<char>, StateId);

/// Thompson states have at most two outgoing edges, so that is what we keep inline.
const TARGETS_HINT: usize = 2;

/// A state in the NFA, transitions are kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct NfaState {
    transitions: SmallVec<[Transition; TARGETS_HINT]>,
    is_accept: bool,
    label: Option<Label>,
}

impl NfaState {
    /// Creates a new state with no transitions and not accepting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Outgoing transitions in the order they were added.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns if the state is accepting.
    pub fn is_accept(&self) -> bool {
        self.is_accept
    }

    /// The display label, None until the state is labelled.
    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }
}

/// A non-deterministic finite automaton with epsilon transitions.
#[derive(Debug, Default)]
pub struct Nfa {
    states: Corrida<NfaState>,
    start: Option<StateId>,
    alphabet: BTreeSet<char>,
}

impl Nfa {
    /// Creates an NFA with no states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh state.
    pub fn add_state(&mut self) -> StateId {
        self.states.alloc(NfaState::new())
    }

    /// Adds a transition, `None` meaning epsilon. Parallel edges are kept.
    pub fn add_transition(&mut self, from: StateId, symbol: Option<char>, to: StateId) {
        if let Some(symbol) = symbol {
            self.alphabet.insert(symbol);
        }
        self.states[from].transitions.push((symbol, to));
    }

    /// Adds an epsilon transition.
    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.add_transition(from, None, to);
    }

    /// Records a symbol in the alphabet even if no edge uses it.
    pub fn add_symbol(&mut self, symbol: char) {
        self.alphabet.insert(symbol);
    }

    /// Sets the start state.
    pub fn set_start(&mut self, state: StateId) {
        self.start = Some(state);
    }

    /// Sets the state to be accepting or not.
    pub fn set_accept(&mut self, state: StateId, is_accept: bool) {
        self.states[state].is_accept = is_accept;
    }

    /// Sets the display label of a state.
    pub fn set_label(&mut self, state: StateId, label: Label) {
        self.states[state].label = Some(label);
    }

    /// The start state, if one was set.
    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    /// Access to a single state.
    pub fn state(&self, state: StateId) -> &NfaState {
        &self.states[state]
    }

    /// Outgoing transitions of a state in insertion order.
    pub fn transitions(&self, state: StateId) -> &[Transition] {
        &self.states[state].transitions
    }

    /// Returns if the state is accepting.
    pub fn is_accept(&self, state: StateId) -> bool {
        self.states[state].is_accept
    }

    /// The display label of a state.
    pub fn label(&self, state: StateId) -> Option<&Label> {
        self.states[state].label.as_ref()
    }

    /// Non-epsilon symbols in ascending order.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Number of states, reachable or not.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True if the NFA has no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Every state handle in allocation order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + use<> {
        self.states.indices()
    }

    /// The accepting states in allocation order.
    pub fn accepting(&self) -> StateSet {
        let mut set = StateSet::with_capacity(self.len());
        for (id, state) in self.states.iter() {
            if state.is_accept {
                set.insert(id);
            }
        }
        set
    }

    /// An empty set sized for this NFA.
    pub fn empty_set(&self) -> StateSet {
        StateSet::with_capacity(self.len())
    }

    // MARK: Closure
    /// Smallest superset of `states` closed under epsilon transitions.
    /// Iterative with a visited set, so epsilon cycles and deep nesting are fine.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = self.empty_set();
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(state) = stack.pop() {
            if !closure.insert(state) {
                continue;
            }
            for &(symbol, target) in self.transitions(state) {
                if symbol.is_none() && !closure.contains(target) {
                    stack.push(target);
                }
            }
        }

        closure
    }

    /// States reachable from `states` by exactly one transition on `symbol`. No closure is taken.
    pub fn move_on(&self, states: &StateSet, symbol: char) -> StateSet {
        let mut reached = self.empty_set();
        for state in states.iter() {
            for &(on, target) in self.transitions(state) {
                if on == Some(symbol) {
                    reached.insert(target);
                }
            }
        }
        reached
    }

    // MARK: Labels
    /// Gives every reachable state its canonical label: the start becomes `X`, accepting states `Y`, `Y1`, ...
    /// and everything else `0`, `1`, ... in breadth first discovery order from the start.
    /// Unreachable states lose their label and are left out of the text form.
    pub fn relabel(&mut self) -> Result<(), Error> {
        let start = self.start.ok_or(Error::MissingStart)?;
        for id in self.states() {
            self.states[id].label = None;
        }

        let mut counter = LabelCounter::new();
        let mut queue = VecDeque::from([start]);
        self.states[start].label = Some(Label::Start);

        while let Some(state) = queue.pop_front() {
            let targets: SmallVec<[StateId; TARGETS_HINT]> =
                self.transitions(state).iter().map(|&(_, target)| target).collect();
            for target in targets {
                if self.states[target].label.is_some() {
                    continue;
                }
                let label = counter.next(self.states[target].is_accept);
                self.states[target].label = Some(label);
                queue.push_back(target);
            }
        }

        Ok(())
    }

    /// Labelled states sorted by label, the order they are printed in.
    pub fn canonical_states(&self) -> Vec<StateId> {
        let mut labelled: Vec<(&Label, StateId)> = self
            .states
            .iter()
            .filter_map(|(id, state)| state.label.as_ref().map(|label| (label, id)))
            .collect();
        labelled.sort();
        labelled.into_iter().map(|(_, id)| id).collect()
    }
}

impl Simulate for Nfa {
    /// Tracks every active state at once, an NFA with no start accepts nothing.
    fn simulate_iter(&self, input: impl Iterator<Item = char>) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let mut current = self.epsilon_closure(&StateSet::singleton(start, self.len()));

        for symbol in input {
            current = self.epsilon_closure(&self.move_on(&current, symbol));
            if current.is_empty() {
                return false;
            }
        }

        current.iter().any(|state| self.is_accept(state))
    }
}
