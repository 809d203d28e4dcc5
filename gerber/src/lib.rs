#![warn(missing_docs)]

//! A finite automata library: NFA and DFA values stored in a `corrida` arena, subset construction, Moore minimization,
//! DFA recognition, and a small line oriented text format shared by every stage.
//!
//! Every stage builds a fresh automaton and only borrows its input, so `Nfa -> Dfa -> minimized Dfa -> verdict` is a straight pipeline.

pub mod dfa;
pub mod label;
pub mod minimize;
pub mod nfa;
pub mod recognize;
pub mod state_set;
pub mod subset;
pub mod text;

use std::fmt;

pub use dfa::Dfa;
pub use label::Label;
pub use minimize::{minimize, refine, Partition};
pub use nfa::Nfa;
pub use recognize::{Recognizer, Run, Verdict};
pub use state_set::StateSet;
pub use subset::subset_construction;

/// The character used for epsilon transitions in the text format.
pub const EPSILON_MARKER: char = '~';

/// Anything that can be run over an input and answer accept / reject.
pub trait Simulate {
    /// Runs the automaton over the symbols, returning true if it ends in an accept state.
    fn simulate_iter(&self, input: impl Iterator<Item = char>) -> bool;

    /// Runs the automaton over a slice of symbols.
    fn simulate_slice(&self, input: &[char]) -> bool {
        self.simulate_iter(input.iter().copied())
    }

    /// Runs the automaton over the chars of a string.
    fn simulate_str(&self, input: &str) -> bool {
        self.simulate_iter(input.chars())
    }
}

/// Errors raised while building automata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The NFA was never given a start state.
    MissingStart,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingStart => write!(f, "automaton has no start state"),
        }
    }
}

impl std::error::Error for Error {}
