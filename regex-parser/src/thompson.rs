//! Thompson construction over a postfix token sequence.
//!
//! Every operand or operator leaves one fragment on a stack. A fragment is a `(start, end)` pair and nothing leaves it
//! except through `end`. After the whole sequence exactly one fragment must remain; its ends become the start and the
//! only accepting state of the NFA.

use gerber::nfa::StateId;
use gerber::Nfa;
use smallvec::SmallVec;

use crate::error::{ErrorKind, RegexError};
use crate::regex::{Spanned, Token};

#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: StateId,
    end: StateId,
}

const STACK_HINT: usize = 8;

struct Builder {
    nfa: Nfa,
    stack: SmallVec<[Fragment; STACK_HINT]>,
}

impl Builder {
    fn pop(&mut self, at: &Spanned) -> Result<Fragment, RegexError> {
        self.stack
            .pop()
            .ok_or_else(|| RegexError::new(at.position, ErrorKind::MissingOperand(at.token.as_char())))
    }

    fn symbol(&mut self, symbol: char) {
        let start = self.nfa.add_state();
        let end = self.nfa.add_state();
        self.nfa.add_transition(start, Some(symbol), end);
        self.stack.push(Fragment { start, end });
    }

    fn star(&mut self, at: &Spanned) -> Result<(), RegexError> {
        let inner = self.pop(at)?;
        let start = self.nfa.add_state();
        let end = self.nfa.add_state();
        self.nfa.add_epsilon(start, inner.start);
        self.nfa.add_epsilon(start, end);
        self.nfa.add_epsilon(inner.end, inner.start);
        self.nfa.add_epsilon(inner.end, end);
        self.stack.push(Fragment { start, end });
        Ok(())
    }

    fn concat(&mut self, at: &Spanned) -> Result<(), RegexError> {
        let second = self.pop(at)?;
        let first = self.pop(at)?;
        self.nfa.add_epsilon(first.end, second.start);
        self.stack.push(Fragment {
            start: first.start,
            end: second.end,
        });
        Ok(())
    }

    fn union(&mut self, at: &Spanned) -> Result<(), RegexError> {
        let right = self.pop(at)?;
        let left = self.pop(at)?;
        let start = self.nfa.add_state();
        let end = self.nfa.add_state();
        self.nfa.add_epsilon(start, left.start);
        self.nfa.add_epsilon(start, right.start);
        self.nfa.add_epsilon(left.end, end);
        self.nfa.add_epsilon(right.end, end);
        self.stack.push(Fragment { start, end });
        Ok(())
    }
}

/// Builds a labelled NFA from postfix tokens.
///
/// # Errors
///
/// Returns `RegexError` for an empty sequence, an operator short of operands, a parenthesis, or leftover fragments.
pub fn build_nfa(postfix: &[Spanned]) -> Result<Nfa, RegexError> {
    let Some(last) = postfix.last() else {
        return Err(RegexError::new(0, ErrorKind::EmptyPattern));
    };

    let mut builder = Builder {
        nfa: Nfa::new(),
        stack: SmallVec::new(),
    };

    for at in postfix {
        match at.token {
            Token::Symbol(c) => builder.symbol(c),
            Token::Star => builder.star(at)?,
            Token::Concat => builder.concat(at)?,
            Token::Union => builder.union(at)?,
            Token::Open | Token::Close => {
                return Err(RegexError::new(at.position, ErrorKind::UnbalancedParenthesis));
            }
        }
    }

    if builder.stack.len() != 1 {
        return Err(RegexError::new(
            last.position,
            ErrorKind::DanglingFragments(builder.stack.len()),
        ));
    }
    let whole = builder.stack[0];

    let mut nfa = builder.nfa;
    nfa.set_start(whole.start);
    nfa.set_accept(whole.end, true);
    nfa.relabel()?;
    Ok(nfa)
}
