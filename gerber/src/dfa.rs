//! Deterministic automata. At most one target per `(state, symbol)`, a missing one rejects.

use std::collections::BTreeSet;
use std::fmt;

use corrida::{Corrida, Idx};
use smallmap::Map;

use crate::label::Label;
use crate::Simulate;

/// Handle of a state inside a `Dfa`.
pub type StateId = Idx<DfaState>;

/// A node in the DFA, contains is_accept, a label and at most one transition per symbol. MARK: State
pub struct DfaState {
    transitions: Map<char, StateId>,
    is_accept: bool,
    label: Label,
}

impl DfaState {
    fn new(label: Label, is_accept: bool) -> Self {
        Self {
            transitions: Map::new(),
            is_accept,
            label,
        }
    }

    /// Returns the next state given the provided symbol, if it exists.
    pub fn get_transition(&self, symbol: char) -> Option<StateId> {
        self.transitions.get(&symbol).copied()
    }

    /// Returns the accept state flag.
    pub fn is_accept(&self) -> bool {
        self.is_accept
    }

    /// The display label.
    pub fn label(&self) -> &Label {
        &self.label
    }
}

// MARK: DFA
/// A deterministic finite automaton. A missing transition means the input is rejected, there is no explicit sink state.
pub struct Dfa {
    states: Corrida<DfaState>,
    start: StateId,
    alphabet: BTreeSet<char>,
}

impl Dfa {
    /// Creates a DFA holding only its start state.
    pub fn new(start_label: Label, start_accepts: bool) -> Self {
        let mut states = Corrida::new();
        let start = states.alloc(DfaState::new(start_label, start_accepts));
        Self {
            states,
            start,
            alphabet: BTreeSet::new(),
        }
    }

    /// Allocates a new state with no transitions.
    pub fn add_state(&mut self, label: Label, is_accept: bool) -> StateId {
        self.states.alloc(DfaState::new(label, is_accept))
    }

    /// Sets the transition for `(from, symbol)`, returning the target it replaced.
    /// Construction code treats a `Some` here as a determinism bug.
    pub fn add_transition(&mut self, from: StateId, symbol: char, to: StateId) -> Option<StateId> {
        self.alphabet.insert(symbol);
        self.states[from].transitions.insert(symbol, to)
    }

    /// Records a symbol in the alphabet even if no edge uses it.
    pub fn add_symbol(&mut self, symbol: char) {
        self.alphabet.insert(symbol);
    }

    /// Updates the accept state flag.
    pub fn set_accept(&mut self, state: StateId, is_accept: bool) {
        self.states[state].is_accept = is_accept;
    }

    /// Target of `(state, symbol)`, None if undefined.
    pub fn transition(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.states[state].get_transition(symbol)
    }

    /// Outgoing transitions of a state by ascending symbol.
    pub fn transitions(&self, state: StateId) -> impl Iterator<Item = (char, StateId)> + '_ {
        self.alphabet
            .iter()
            .filter_map(move |&symbol| self.transition(state, symbol).map(|to| (symbol, to)))
    }

    /// The start state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Access to a single state.
    pub fn state(&self, state: StateId) -> &DfaState {
        &self.states[state]
    }

    /// Returns the accept state flag of a state.
    pub fn is_accept(&self, state: StateId) -> bool {
        self.states[state].is_accept
    }

    /// The display label of a state.
    pub fn label(&self, state: StateId) -> &Label {
        &self.states[state].label
    }

    /// Symbols in ascending order.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false, a DFA owns at least its start state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Every state handle in allocation order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + use<> {
        self.states.indices()
    }

    /// Every state sorted by label, the order used for output and for minimization.
    pub fn canonical_states(&self) -> Vec<StateId> {
        let mut states: Vec<StateId> = self.states().collect();
        states.sort_by(|a, b| self.label(*a).cmp(self.label(*b)).then(a.cmp(b)));
        states
    }

    /// First state carrying the label.
    pub fn find(&self, label: &Label) -> Option<StateId> {
        self.states
            .iter()
            .find(|(_, state)| &state.label == label)
            .map(|(id, _)| id)
    }
}

impl Simulate for Dfa {
    /// Tests the provided input sequence, returning true if the DFA ends at an accept state.
    /// An undefined transition rejects right away.
    fn simulate_iter(&self, input: impl Iterator<Item = char>) -> bool {
        let mut cur = self.start;
        for symbol in input {
            match self.transition(cur, symbol) {
                Some(next) => cur = next,
                None => return false,
            }
        }
        self.is_accept(cur)
    }
}

impl fmt::Debug for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for state in self.canonical_states() {
            let edges: Vec<(char, String)> = self
                .transitions(state)
                .map(|(symbol, to)| (symbol, self.label(to).to_string()))
                .collect();
            map.entry(&format_args!("{}{}", self.label(state), if self.is_accept(state) { "*" } else { "" }), &edges);
        }
        map.finish()
    }
}
