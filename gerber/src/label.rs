//! Display labels for automaton states.
//!
//! Labels are kept apart from the graph: algorithms work on arena handles and only look at a label to decide where a state
//! is printed, or whether a state read from text is accepting.
//!
//! The derived `Ord` is the one output order used everywhere: `X`, then `Y`, `Y1`, `Y2`, ..., then numbered states ascending,
//! then anything else lexicographically.

use std::fmt;

/// The printable name of a state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// `X`, the unique start state.
    Start,
    /// `Y` for 0, `Y<n>` otherwise. Accepting states, numbered in discovery order.
    Accept(u32),
    /// Plain non-negative integers, intermediate states in discovery order.
    Numbered(u32),
    /// Any other text found in an input file.
    Named(String),
}

impl Label {
    /// Reads a label, never fails. Text that is not in canonical form ends up as `Named`, so `007` stays `007`.
    pub fn parse(text: &str) -> Label {
        if text == "X" {
            return Label::Start;
        }
        if text == "Y" {
            return Label::Accept(0);
        }
        if let Some(n) = text.strip_prefix('Y').and_then(canonical_number) {
            if n > 0 {
                return Label::Accept(n);
            }
        }
        match canonical_number(text) {
            Some(n) => Label::Numbered(n),
            None => Label::Named(text.to_string()),
        }
    }

    /// True for the `Y` family.
    pub fn is_accepting(&self) -> bool {
        matches!(self, Label::Accept(_))
    }

    /// True for `X`.
    pub fn is_start(&self) -> bool {
        matches!(self, Label::Start)
    }
}

/// Parses digits only if printing the number gives back the same text.
fn canonical_number(text: &str) -> Option<u32> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u32 = text.parse().ok()?;
    (n.to_string() == text).then_some(n)
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Start => write!(f, "X"),
            Label::Accept(0) => write!(f, "Y"),
            Label::Accept(n) => write!(f, "Y{n}"),
            Label::Numbered(n) => write!(f, "{n}"),
            Label::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Hands out canonical labels in discovery order.
#[derive(Debug, Default)]
pub struct LabelCounter {
    accepting: u32,
    numbered: u32,
}

impl LabelCounter {
    /// Creates a counter starting at `Y` and `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next label for a newly discovered non-start state.
    pub fn next(&mut self, accepting: bool) -> Label {
        if accepting {
            self.accepting += 1;
            Label::Accept(self.accepting - 1)
        } else {
            self.numbered += 1;
            Label::Numbered(self.numbered - 1)
        }
    }
}
