//! Regex front end for `gerber`: explicit concatenation, shunting-yard postfix, then Thompson construction.
//!
//! Supported syntax is symbols, `|`, postfix `*`, parentheses, and implicit or explicit (`.`) concatenation.

pub mod error;
pub mod regex;
pub mod thompson;

use gerber::{minimize, subset_construction, Dfa, Nfa};

pub use error::{ErrorKind, RegexError};
pub use regex::{Parsed, Spanned, Token};
pub use thompson::build_nfa;

/// Parses a pattern and builds its Thompson NFA, labelled `X`, `Y`, then breadth first integers.
pub fn compile(pattern: &str) -> Result<Nfa, RegexError> {
    build_nfa(&Parsed::new(pattern).postfix)
}

/// Regex to DFA through subset construction.
pub fn create_regex_dfa(pattern: &str) -> Result<Dfa, RegexError> {
    let nfa = compile(pattern)?;
    Ok(subset_construction(&nfa)?)
}

/// Regex to the minimal DFA.
pub fn create_minimal_dfa(pattern: &str) -> Result<Dfa, RegexError> {
    Ok(minimize(&create_regex_dfa(pattern)?))
}
