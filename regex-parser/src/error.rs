use std::fmt;

/// What went wrong while building an automaton from a postfix sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing to build from.
    EmptyPattern,
    /// `|`, `.` or `*` found fewer fragments on the stack than it needs.
    MissingOperand(char),
    /// A `(` or `)` reached the builder.
    UnbalancedParenthesis,
    /// More than one fragment was left once the sequence ran out.
    DanglingFragments(usize),
    /// The automaton library refused the result.
    Automaton(gerber::Error),
}

/// Error from regex compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexError {
    /// Char offset into the pattern where the problem was detected.
    pub position: usize,
    /// The problem.
    pub kind: ErrorKind,
}

impl RegexError {
    pub(crate) fn new(position: usize, kind: ErrorKind) -> Self {
        Self { position, kind }
    }
}

impl fmt::Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "regex error at {}: ", self.position)?;
        match &self.kind {
            ErrorKind::EmptyPattern => write!(f, "empty pattern"),
            ErrorKind::MissingOperand(op) => write!(f, "operator '{op}' is missing an operand"),
            ErrorKind::UnbalancedParenthesis => write!(f, "unbalanced parenthesis"),
            ErrorKind::DanglingFragments(n) => write!(f, "{n} fragments left over, an operator is missing"),
            ErrorKind::Automaton(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RegexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Automaton(err) => Some(err),
            _ => None,
        }
    }
}

impl From<gerber::Error> for RegexError {
    fn from(err: gerber::Error) -> Self {
        Self::new(0, ErrorKind::Automaton(err))
    }
}
