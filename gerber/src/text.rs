//! The line oriented text format shared by all stages.
//!
//! A transition token is `SRC-SYMBOL->DST`, SYMBOL being exactly one character (`~` for epsilon, NFA only).
//! Automata are written one state per line: the state label, then its transition tokens separated by spaces.
//! Tokens that do not have this shape are dropped without a diagnostic.

use hashbrown::HashMap;
use std::collections::VecDeque;
use std::fmt;
use std::str::Lines;

use crate::dfa::{self, Dfa};
use crate::label::Label;
use crate::nfa::{self, Nfa};
use crate::EPSILON_MARKER;

/// A parsed transition token, borrowing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<'a> {
    /// Text before the first `-`.
    pub from: &'a str,
    /// The character right after the first `-`.
    pub symbol: char,
    /// Text after the `->`.
    pub to: &'a str,
}

/// Splits `SRC-SYMBOL->DST`. Returns None for anything else, including an empty target.
pub fn parse_transition(token: &str) -> Option<Transition<'_>> {
    let dash = token.find('-')?;
    let rest = &token[dash + 1..];
    let symbol = rest.chars().next()?;
    let to = rest[symbol.len_utf8()..].strip_prefix("->")?;
    if to.is_empty() {
        return None;
    }
    Some(Transition {
        from: &token[..dash],
        symbol,
        to,
    })
}

/// Maps labels to states while reading, creating states on first sight.
struct Interner<S> {
    ids: HashMap<Label, S>,
}

impl<S: Copy> Interner<S> {
    fn new() -> Self {
        Self { ids: HashMap::new() }
    }

    fn get_or_insert_with(&mut self, text: &str, create: impl FnOnce(Label) -> S) -> S {
        let label = Label::parse(text);
        if let Some(&id) = self.ids.get(&label) {
            return id;
        }
        let id = create(label.clone());
        self.ids.insert(label, id);
        id
    }
}

/// Lines up to the first blank one.
fn block<'a, 'b>(lines: &'b mut Lines<'a>) -> impl Iterator<Item = &'a str> + 'b {
    lines.take_while(|line| !line.trim().is_empty())
}

// MARK: NFA
/// Reads an NFA block. The state `X` always exists and is the start, states labelled `Y`, `Y1`, ... are accepting.
pub fn parse_nfa(input: &str) -> Nfa {
    parse_nfa_lines(&mut input.lines())
}

fn parse_nfa_lines(lines: &mut Lines<'_>) -> Nfa {
    let mut nfa = Nfa::new();
    let mut interner: Interner<nfa::StateId> = Interner::new();

    let mut intern = |nfa: &mut Nfa, text: &str| {
        interner.get_or_insert_with(text, |label| {
            let id = nfa.add_state();
            nfa.set_accept(id, label.is_accepting());
            nfa.set_label(id, label);
            id
        })
    };

    let start = intern(&mut nfa, "X");
    nfa.set_start(start);

    for line in block(lines) {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else { continue };
        let from = intern(&mut nfa, head);
        for transition in parts.filter_map(parse_transition) {
            let to = intern(&mut nfa, transition.to);
            let symbol = (transition.symbol != EPSILON_MARKER).then_some(transition.symbol);
            nfa.add_transition(from, symbol, to);
        }
    }

    nfa
}

// MARK: DFA
/// Reads a DFA block. `X` is the start, the `Y` family is accepting, a repeated `(state, symbol)` keeps the last target.
pub fn parse_dfa(input: &str) -> Dfa {
    let mut dfa = Dfa::new(Label::Start, false);
    let mut interner = dfa_interner(&dfa);

    for line in block(&mut input.lines()) {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else { continue };
        let from = intern_dfa(&mut interner, &mut dfa, head);
        for transition in parts.filter_map(parse_transition) {
            let to = intern_dfa(&mut interner, &mut dfa, transition.to);
            dfa.add_transition(from, transition.symbol, to);
        }
    }

    dfa
}

fn dfa_interner(dfa: &Dfa) -> Interner<dfa::StateId> {
    let mut interner = Interner::new();
    interner.ids.insert(Label::Start, dfa.start());
    interner
}

fn intern_dfa(interner: &mut Interner<dfa::StateId>, dfa: &mut Dfa, text: &str) -> dfa::StateId {
    interner.get_or_insert_with(text, |label| {
        let accepting = label.is_accepting();
        dfa.add_state(label, accepting)
    })
}

// MARK: Recognition
/// A DFA together with the strings to run through it.
#[derive(Debug)]
pub struct RecognitionInput {
    /// The automaton from the declaration and transition lines.
    pub dfa: Dfa,
    /// Candidates with their trailing `#` removed.
    pub candidates: Vec<String>,
}

/// Reads whitespace separated tokens, possibly over several lines, up to and including one that ends in `#`.
fn take_declaration<'a>(lines: &mut Lines<'a>, pending: &mut VecDeque<&'a str>) -> Vec<&'a str> {
    let mut declared = Vec::new();
    loop {
        let token = match pending.pop_front() {
            Some(token) => token,
            None => match lines.next() {
                Some(line) => {
                    pending.extend(line.split_whitespace());
                    continue;
                }
                None => break,
            },
        };
        let name = token.strip_suffix('#').unwrap_or(token);
        if !name.is_empty() {
            declared.push(name);
        }
        if name.len() != token.len() {
            break;
        }
    }
    declared
}

/// Reads the recognition format: an alphabet declaration, a state declaration (rest of its line ignored), transition
/// lines up to a blank line, then one candidate per non-blank line.
pub fn parse_recognition(input: &str) -> RecognitionInput {
    let mut lines = input.lines();
    let mut pending = VecDeque::new();

    let mut dfa = Dfa::new(Label::Start, false);
    let mut interner = dfa_interner(&dfa);

    for symbols in take_declaration(&mut lines, &mut pending) {
        symbols.chars().for_each(|symbol| dfa.add_symbol(symbol));
    }
    for state in take_declaration(&mut lines, &mut pending) {
        intern_dfa(&mut interner, &mut dfa, state);
    }

    for line in block(&mut lines) {
        for transition in line.split_whitespace().filter_map(parse_transition) {
            if transition.from.is_empty() {
                continue;
            }
            let from = intern_dfa(&mut interner, &mut dfa, transition.from);
            let to = intern_dfa(&mut interner, &mut dfa, transition.to);
            dfa.add_transition(from, transition.symbol, to);
        }
    }

    let candidates = lines
        .filter_map(|line| line.split_whitespace().next())
        .map(|first| first.strip_suffix('#').unwrap_or(first).to_string())
        .collect();

    RecognitionInput { dfa, candidates }
}

// MARK: Output
impl fmt::Display for Nfa {
    /// Labelled states in canonical order, transitions in insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in self.canonical_states() {
            let Some(from) = self.label(state) else { continue };
            write!(f, "{from}")?;
            for &(symbol, target) in self.transitions(state) {
                let Some(to) = self.label(target) else { continue };
                write!(f, " {from}-{}->{to}", symbol.unwrap_or(EPSILON_MARKER))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Dfa {
    /// States in canonical order, transitions by ascending symbol.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in self.canonical_states() {
            let from = self.label(state);
            write!(f, "{from}")?;
            for (symbol, target) in self.transitions(state) {
                write!(f, " {from}-{symbol}->{}", self.label(target))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// MARK: Tests
#[cfg(test)]
mod test {
    use super::*;
    use crate::{minimize, subset_construction, Recognizer, Simulate};

    #[test]
    fn test_parse_transition() {
        assert_eq!(
            parse_transition("X-a->0"),
            Some(Transition { from: "X", symbol: 'a', to: "0" })
        );
        assert_eq!(parse_transition("Y12-~->Y"), Some(Transition { from: "Y12", symbol: '~', to: "Y" }));
        assert_eq!(parse_transition("0--->1").map(|t| t.symbol), Some('-'));
        assert_eq!(parse_transition("X-a>0"), None);
        assert_eq!(parse_transition("Xa->0"), None);
        assert_eq!(parse_transition("X-ab->0"), None);
        assert_eq!(parse_transition("X-a->"), None);
        assert_eq!(parse_transition("X-"), None);
    }

    const A_OR_B_NFA: &str = "X X-~->0 X-~->1\nY\n0 0-a->2\n1 1-b->3\n2 2-~->Y\n3 3-~->Y\n";

    #[test]
    fn test_nfa_roundtrip_text() {
        let nfa = parse_nfa(A_OR_B_NFA);
        assert_eq!(nfa.len(), 6);
        assert_eq!(nfa.alphabet().iter().collect::<String>(), "ab");
        assert_eq!(nfa.to_string(), A_OR_B_NFA);
        assert!(nfa.simulate_str("a"));
        assert!(!nfa.simulate_str("ab"));
    }

    #[test]
    fn test_nfa_to_dfa_text() {
        let dfa = subset_construction(&parse_nfa(A_OR_B_NFA)).unwrap();
        assert_eq!(dfa.to_string(), "X X-a->Y X-b->Y1\nY\nY1\n");
    }

    #[test]
    fn test_nfa_stops_at_blank_line_and_drops_junk() {
        let nfa = parse_nfa("X X-a->Y garbage X-b>Y\n\nZ Z-c->Y\n");
        assert_eq!(nfa.len(), 2);
        assert_eq!(nfa.alphabet().iter().collect::<String>(), "a");
    }

    #[test]
    fn test_minimize_text() {
        let dfa = parse_dfa("X X-a->0 X-b->1\n0 0-a->Y 0-b->Y\n1 1-a->Y 1-b->Y\nY\n\n");
        assert_eq!(dfa.len(), 4);
        assert_eq!(minimize(&dfa).to_string(), "X X-a->0 X-b->0\nY\n0 0-a->Y 0-b->Y\n");
    }

    #[test]
    fn test_dfa_last_target_wins() {
        let dfa = parse_dfa("X X-a->0 X-a->Y\n");
        assert_eq!(dfa.to_string(), "X X-a->Y\nY\n0\n");
    }

    #[test]
    fn test_recognition_block() {
        let input = "a b #\nX 0 Y #\nX-a->0\n0-b->Y\n\nab#\nba#\n";
        let parsed = parse_recognition(input);
        assert_eq!(parsed.candidates, ["ab", "ba"]);
        assert_eq!(parsed.dfa.len(), 3);

        let recognizer = Recognizer::new(&parsed.dfa);
        let out: Vec<String> = parsed.candidates.iter().map(|c| recognizer.run(c).to_string()).collect();
        assert_eq!(out, ["a\nb\npass", "error"]);
    }

    #[test]
    fn test_block_stops_after_blank_line() {
        let mut lines = "X X-a->Y\nY\n   \nab#\n".lines();
        assert_eq!(block(&mut lines).collect::<Vec<_>>(), ["X X-a->Y", "Y"]);
        assert_eq!(lines.next(), Some("ab#"));
        assert_eq!(block(&mut lines).count(), 0);
    }

    #[test]
    fn test_recognition_declarations_span_lines() {
        let input = "a\nb# X\n0 Y# ignored\nX-a->0 0-b->Y\n\n\n#\nab\n";
        let parsed = parse_recognition(input);
        assert_eq!(parsed.dfa.alphabet().iter().collect::<String>(), "ab");
        assert_eq!(parsed.candidates, ["", "ab"]);
        assert!(parsed.dfa.find(&Label::Named("ignored".into())).is_none());
        assert!(parsed.dfa.simulate_str("ab"));
    }
}
