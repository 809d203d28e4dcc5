use std::fmt;

/// One regex character, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Anything that is not an operator.
    Symbol(char),
    /// `|`
    Union,
    /// `*`
    Star,
    /// `.`, explicit concatenation.
    Concat,
    /// `(`
    Open,
    /// `)`
    Close,
}

impl Token {
    /// Classifies a character.
    pub fn from_char(c: char) -> Self {
        match c {
            '|' => Token::Union,
            '*' => Token::Star,
            '.' => Token::Concat,
            '(' => Token::Open,
            ')' => Token::Close,
            c => Token::Symbol(c),
        }
    }

    /// The character the token is written as.
    pub fn as_char(self) -> char {
        match self {
            Token::Symbol(c) => c,
            Token::Union => '|',
            Token::Star => '*',
            Token::Concat => '.',
            Token::Open => '(',
            Token::Close => ')',
        }
    }

    /// Binding strength on the operator stack. `(` is 0 so nothing pops it.
    fn precedence(self) -> u8 {
        match self {
            Token::Star => 3,
            Token::Concat => 2,
            Token::Union => 1,
            _ => 0,
        }
    }

    /// True if a concatenation may follow this token.
    fn closes_operand(self) -> bool {
        matches!(self, Token::Symbol(_) | Token::Star | Token::Close)
    }

    /// True if a concatenation may precede this token.
    fn opens_operand(self) -> bool {
        matches!(self, Token::Symbol(_) | Token::Open)
    }
}

/// A token and the char offset in the pattern it came from.
/// Inserted concatenations take the offset of the token they precede.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned {
    /// The token.
    pub token: Token,
    /// Where in the pattern.
    pub position: usize,
}

/// Splits a pattern into tokens.
pub fn tokenize(pattern: &str) -> Vec<Spanned> {
    pattern
        .chars()
        .enumerate()
        .map(|(position, c)| Spanned {
            token: Token::from_char(c),
            position,
        })
        .collect()
}

/// Makes concatenation explicit: a `.` goes between every symbol, `*` or `)` and a following symbol or `(`.
pub fn insert_concat(tokens: &[Spanned]) -> Vec<Spanned> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    for (i, &cur) in tokens.iter().enumerate() {
        out.push(cur);
        if let Some(&next) = tokens.get(i + 1) {
            if cur.token.closes_operand() && next.token.opens_operand() {
                out.push(Spanned {
                    token: Token::Concat,
                    position: next.position,
                });
            }
        }
    }
    out
}

/// Shunting-yard conversion to postfix. Precedence `*` > `.` > `|`, all left associative.
///
/// Parentheses are not validated: a stray `)` drains the stack and is dropped, a stray `(` ends up in the output.
pub fn to_postfix(tokens: &[Spanned]) -> Vec<Spanned> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Spanned> = Vec::new();

    for &spanned in tokens {
        match spanned.token {
            Token::Symbol(_) => output.push(spanned),
            Token::Open => operators.push(spanned),
            Token::Close => {
                while let Some(top) = operators.pop() {
                    if top.token == Token::Open {
                        break;
                    }
                    output.push(top);
                }
            }
            op => {
                while let Some(&top) = operators.last() {
                    if top.token.precedence() < op.precedence() {
                        break;
                    }
                    output.push(top);
                    operators.pop();
                }
                operators.push(spanned);
            }
        }
    }

    output.extend(operators.into_iter().rev());
    output
}

/// Writes tokens back as text.
pub fn render(tokens: &[Spanned]) -> String {
    tokens.iter().map(|spanned| spanned.token.as_char()).collect()
}

// MARK: Parsed
/// A pattern with both of its rewritten forms.
#[derive(Debug, Clone)]
pub struct Parsed {
    /// The pattern with explicit `.` operators.
    pub explicit: Vec<Spanned>,
    /// The same expression in postfix order.
    pub postfix: Vec<Spanned>,
}

impl Parsed {
    /// Runs both rewrites. Never fails, malformed input is left for the builder to reject.
    pub fn new(pattern: &str) -> Self {
        let explicit = insert_concat(&tokenize(pattern));
        let postfix = to_postfix(&explicit);
        Self { explicit, postfix }
    }

    /// The explicit concatenation form as text.
    pub fn explicit_string(&self) -> String {
        render(&self.explicit)
    }

    /// The postfix form as text.
    pub fn postfix_string(&self) -> String {
        render(&self.postfix)
    }
}

/// The explicit form, then the postfix form, one per line.
impl fmt::Display for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.explicit_string())?;
        write!(f, "{}", self.postfix_string())
    }
}
