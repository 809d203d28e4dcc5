//! Runs candidate strings through a DFA, one symbol at a time.

use std::fmt;

use crate::dfa::{Dfa, StateId};

/// Final answer for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Fully consumed and ended in an accepting state.
    Pass,
    /// Hit an undefined transition, or ended in a non-accepting state.
    Error,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Error => write!(f, "error"),
        }
    }
}

/// What happened while running one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Symbols consumed before the run ended, in order.
    pub consumed: Vec<char>,
    /// Position of the symbol that had no transition, if the run stopped early.
    pub halted_at: Option<usize>,
    /// The answer.
    pub verdict: Verdict,
}

impl Run {
    /// True if the candidate was accepted.
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

/// One consumed symbol per line, then `pass` or `error`.
impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.consumed {
            writeln!(f, "{symbol}")?;
        }
        write!(f, "{}", self.verdict)
    }
}

/// Executes a DFA as a state machine. There is no halt state, an undefined transition is the rejection.
pub struct Recognizer<'a> {
    dfa: &'a Dfa,
}

impl<'a> Recognizer<'a> {
    /// Wraps a DFA.
    pub fn new(dfa: &'a Dfa) -> Self {
        Self { dfa }
    }

    /// Runs a single candidate from the start state.
    pub fn run(&self, candidate: &str) -> Run {
        let mut cur: StateId = self.dfa.start();
        let mut consumed = Vec::with_capacity(candidate.len());

        for (position, symbol) in candidate.chars().enumerate() {
            match self.dfa.transition(cur, symbol) {
                Some(next) => {
                    consumed.push(symbol);
                    cur = next;
                }
                None => {
                    return Run {
                        consumed,
                        halted_at: Some(position),
                        verdict: Verdict::Error,
                    };
                }
            }
        }

        let verdict = if self.dfa.is_accept(cur) { Verdict::Pass } else { Verdict::Error };
        Run {
            consumed,
            halted_at: None,
            verdict,
        }
    }

    /// Runs every candidate independently.
    pub fn run_all<'s>(&self, candidates: impl IntoIterator<Item = &'s str>) -> Vec<Run> {
        candidates.into_iter().map(|candidate| self.run(candidate)).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::label::Label;

    fn ab() -> Dfa {
        let mut dfa = Dfa::new(Label::Start, false);
        let zero = dfa.add_state(Label::Numbered(0), false);
        let y = dfa.add_state(Label::Accept(0), true);
        dfa.add_transition(dfa.start(), 'a', zero);
        dfa.add_transition(zero, 'b', y);
        dfa
    }

    #[test]
    fn test_pass() {
        let dfa = ab();
        let run = Recognizer::new(&dfa).run("ab");
        assert!(run.passed());
        assert_eq!(run.to_string(), "a\nb\npass");
    }

    #[test]
    fn test_undefined_transition_stops() {
        let dfa = ab();
        let run = Recognizer::new(&dfa).run("ba");
        assert_eq!(run.verdict, Verdict::Error);
        assert_eq!(run.halted_at, Some(0));
        assert_eq!(run.to_string(), "error");

        let run = Recognizer::new(&dfa).run("abc");
        assert_eq!(run.consumed, ['a', 'b']);
        assert_eq!(run.halted_at, Some(2));
    }

    #[test]
    fn test_consumed_but_not_accepting() {
        let dfa = ab();
        let run = Recognizer::new(&dfa).run("a");
        assert_eq!(run.halted_at, None);
        assert_eq!(run.to_string(), "a\nerror");
    }

    #[test]
    fn test_candidates_are_independent() {
        let dfa = ab();
        let verdicts: Vec<Verdict> = Recognizer::new(&dfa)
            .run_all(["c", "ab", "", "ab"])
            .into_iter()
            .map(|run| run.verdict)
            .collect();
        assert_eq!(verdicts, [Verdict::Error, Verdict::Pass, Verdict::Error, Verdict::Pass]);
    }
}
