use crate::{error::LexError, func::Function, value::Constant};
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

pub type IResult<'src, O> = nom::IResult<&'src str, O>;

///
/// A syntactic mathematical token.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(Literal),

    Ident(String),
    Builtin(Function),

    Add,
    Sub,
    Mul,
    Div,
    Pow,

    LParen,
    RParen,

    Comma,
    Equals,
}

///
/// A literal inside an expression.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Real(f64),
    Constant(Constant),
}

///
/// Splits source text into [`Token`]s.
///
/// Juxtaposing a word with a preceding operand inserts an implicit
/// [`Token::Mul`], so `2x` lexes as `2 * x` and `(a)b` as `(a) * b`.
///
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    src: &'src str,
    pending: Option<Token>,
    after_operand: bool,
}

impl Token {
    ///
    /// Parse a [`Token`] from an input slice, assuming no preceding whitespace.
    ///
    #[allow(clippy::missing_errors_doc)]
    pub fn parse(src: &str) -> IResult<'_, Self> {
        use nom::{branch::alt, character::complete::one_of, combinator::map};

        alt((
            map(util::real, |f| Token::Literal(Literal::Real(f))),
            map(util::word, Token::from_word),
            map(one_of(",=()*/+-^"), Token::from_symbol),
        ))(src)
    }

    ///
    /// Resolve a word to a built-in function, a constant or an identifier,
    /// in that order.
    ///
    #[must_use]
    pub fn from_word(word: &str) -> Self {
        if let Some(func) = Function::from_name(word) {
            Token::Builtin(func)
        } else if let Some(constant) = Constant::from_name(word) {
            Token::Literal(Literal::Constant(constant))
        } else {
            Token::Ident(word.to_string())
        }
    }

    fn from_symbol(c: char) -> Self {
        match c {
            ',' => Token::Comma,
            '=' => Token::Equals,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '*' => Token::Mul,
            '/' => Token::Div,
            '+' => Token::Add,
            '-' => Token::Sub,
            _ => Token::Pow,
        }
    }

    fn is_word(&self) -> bool {
        matches!(
            self,
            Token::Ident(_)
                | Token::Builtin(_)
                | Token::Literal(Literal::Constant(_))
        )
    }

    fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Literal(_)
                | Token::Ident(_)
                | Token::Builtin(_)
                | Token::RParen
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(Literal::Real(r)) => write!(f, "{r}"),
            Token::Literal(Literal::Constant(c)) => write!(f, "{c}"),
            Token::Ident(name) => f.write_str(name),
            Token::Builtin(func) => write!(f, "{func}"),
            Token::Add => f.write_str("+"),
            Token::Sub => f.write_str("-"),
            Token::Mul => f.write_str("*"),
            Token::Div => f.write_str("/"),
            Token::Pow => f.write_str("^"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Equals => f.write_str("="),
        }
    }
}

impl<'src> Lexer<'src> {
    #[must_use]
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            pending: None,
            after_operand: false,
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tok) = self.pending.take() {
            self.after_operand = tok.ends_operand();
            return Some(Ok(tok));
        }

        let (src, _) =
            nom::bytes::complete::take_while::<_, _, nom::error::Error<_>>(
                char::is_whitespace,
            )(self.src)
            .ok()?;
        let c = src.chars().next()?;

        let Ok((src, tok)) = Token::parse(src) else {
            // nothing past an unknown character is lexed
            self.src = "";
            return Some(Err(LexError::UnexpectedChar(c)));
        };
        self.src = src;

        if self.after_operand && tok.is_word() {
            self.pending = Some(tok);
            self.after_operand = false;
            return Some(Ok(Token::Mul));
        }

        self.after_operand = tok.ends_operand();
        Some(Ok(tok))
    }
}

///
/// Tokenize a whole line.
///
/// # Errors
///
/// Fails on the first character that does not start a token.
///
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(src).collect()
}

mod util {
    use super::IResult;

    ///
    /// Parse an unsigned real number from an input slice, assuming no
    /// preceding whitespace.
    ///
    /// The number must start with a digit; a fractional part and an
    /// exponent are optional. An `e` that is not followed by digits is
    /// left for the next token.
    ///
    pub fn real(src: &str) -> IResult<'_, f64> {
        use nom::{
            character::complete::{char, digit0, digit1, one_of},
            combinator::{map_res, opt, recognize},
            sequence::{pair, tuple},
        };

        map_res(
            recognize(tuple((
                digit1,
                opt(pair(char('.'), digit0)),
                opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
            ))),
            str::parse::<f64>,
        )(src)
    }

    ///
    /// Parse a word: a letter followed by any letters or digits.
    ///
    pub fn word(src: &str) -> IResult<'_, &str> {
        use nom::{
            bytes::complete::{take_while, take_while1},
            combinator::recognize,
            sequence::pair,
        };

        recognize(pair(
            take_while1(char::is_alphabetic),
            take_while(char::is_alphanumeric),
        ))(src)
    }
}
