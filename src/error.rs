use crate::{func::Function, lex::Token};
use alloc::{string::String, vec::Vec};
use core::fmt;
use derive_more::{Display, From};

///
/// Any failure while processing a line.
///
#[derive(Debug, Clone, PartialEq, Display, From)]
pub enum Error {
    #[display("lexical error: {_0}")]
    Lex(LexError),
    #[display("syntax error: {_0}")]
    Syntax(SyntaxError),
    #[display("evaluation error: {_0}")]
    Eval(EvalError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LexError {
    #[display("unexpected character `{_0}`")]
    UnexpectedChar(char),
}

///
/// A failure to build a tree out of tokens.
///
/// `context` holds the offending token range when diagnostics are enabled,
/// and is empty otherwise.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub context: Vec<Token>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SyntaxErrorKind {
    #[display("unbalanced parentheses")]
    Unbalanced,
    #[display("no tokens")]
    NoTokens,
    #[display("invalid input")]
    InvalidInput,
    #[display("no operators found")]
    NoOperators,
    #[display("operator is missing its left operand")]
    MissingOperand,
    #[display("malformed assignment")]
    Assignment,
    #[display("malformed function definition")]
    Definition,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EvalError {
    #[display("unresolved identifier `{_0}`")]
    Unresolved(String),
    #[display("no overload of `{name}` takes {arity} argument(s)")]
    NoOverload { name: String, arity: usize },
    #[display("`{func}` does not take {arity} argument(s)")]
    Arity { func: Function, arity: usize },
}

impl SyntaxError {
    #[must_use]
    pub fn new(kind: SyntaxErrorKind) -> Self {
        Self {
            kind,
            context: Vec::new(),
        }
    }
}

impl From<SyntaxErrorKind> for SyntaxError {
    fn from(kind: SyntaxErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<SyntaxErrorKind> for Error {
    fn from(kind: SyntaxErrorKind) -> Self {
        Self::Syntax(kind.into())
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some((first, rest)) = self.context.split_first() {
            write!(f, " in `{first}")?;
            for token in rest {
                write!(f, " {token}")?;
            }
            f.write_str("`")?;
        }

        Ok(())
    }
}
