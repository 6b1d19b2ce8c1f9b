//
// Precedence-driven tree building.
//
// Rather than walking a grammar, every token range is split at its
// loosest-binding operator outside of any parentheses and both halves are
// built recursively.
//

use crate::{
    ast::{
        call::{Builtin, Call},
        expr::Operator,
        Node,
    },
    error::{SyntaxError, SyntaxErrorKind},
    lex::{Literal, Token},
    value::Number,
};
use alloc::{boxed::Box, vec::Vec};

type Result<T> = core::result::Result<T, SyntaxError>;

///
/// Builds expression trees out of tokens.
///
#[derive(Debug, Clone, Copy)]
pub struct Parser<'t> {
    tokens: &'t [Token],
    diagnostics: bool,
}

impl<'t> Parser<'t> {
    #[must_use]
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            diagnostics: false,
        }
    }

    ///
    /// When enabled, errors carry the token range that failed to build.
    ///
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    ///
    /// Build a tree out of all tokens.
    ///
    /// # Errors
    ///
    /// Fails on unbalanced parentheses, empty (sub-)expressions, operators
    /// missing an operand and token runs that are not expressions.
    ///
    pub fn parse(&self) -> Result<Box<dyn Node>> {
        if !is_balanced(self.tokens) {
            return Err(self.error(SyntaxErrorKind::Unbalanced, self.tokens));
        }

        self.build(self.tokens)
    }

    fn build(&self, mut range: &[Token]) -> Result<Box<dyn Node>> {
        while is_enclosed(range) {
            range = &range[1..range.len() - 1];
        }

        match range {
            [] => Err(self.error(SyntaxErrorKind::NoTokens, range)),
            [token] => self.leaf(token, range),
            [Token::Ident(name), args @ ..] if is_enclosed(args) => {
                let args = self.args(&args[1..args.len() - 1])?;
                Ok(Box::new(Call::new(name.clone(), args)))
            }
            [Token::Builtin(func), args @ ..] if is_enclosed(args) => {
                let args = self.args(&args[1..args.len() - 1])?;
                Ok(Box::new(Builtin::new(*func, args)))
            }
            _ => self.operation(range),
        }
    }

    fn leaf(&self, token: &Token, range: &[Token]) -> Result<Box<dyn Node>> {
        match token {
            Token::Literal(Literal::Real(r)) => Ok(Box::new(Number::real(*r))),
            Token::Literal(Literal::Constant(c)) => Ok(Box::new(*c)),
            Token::Ident(name) => Ok(Box::new(Call::new(name.clone(), Vec::new()))),
            _ => Err(self.error(SyntaxErrorKind::InvalidInput, range)),
        }
    }

    ///
    /// Build each comma-separated argument; `()` has no arguments.
    ///
    fn args(&self, inner: &[Token]) -> Result<Vec<Box<dyn Node>>> {
        if inner.is_empty() {
            return Ok(Vec::new());
        }

        split_top_level(inner, &Token::Comma)
            .into_iter()
            .map(|arg| self.build(arg))
            .collect()
    }

    fn operation(&self, range: &[Token]) -> Result<Box<dyn Node>> {
        let Some((at, op)) = split_point(range) else {
            return Err(self.error(SyntaxErrorKind::NoOperators, range));
        };

        let rhs = self.build(&range[at + 1..])?;
        let lhs: Box<dyn Node> = if at > 0 {
            self.build(&range[..at])?
        } else if op.is_sign() {
            Box::new(Number::ZERO)
        } else {
            return Err(self.error(SyntaxErrorKind::MissingOperand, range));
        };

        Ok(op.node(lhs, rhs))
    }

    fn error(&self, kind: SyntaxErrorKind, range: &[Token]) -> SyntaxError {
        SyntaxError {
            kind,
            context: if self.diagnostics {
                range.to_vec()
            } else {
                Vec::new()
            },
        }
    }
}

///
/// Build a tree out of `tokens`, without diagnostics.
///
/// # Errors
///
/// See [`Parser::parse`].
///
pub fn parse(tokens: &[Token]) -> Result<Box<dyn Node>> {
    Parser::new(tokens).parse()
}

///
/// Every `)` closes an earlier `(`, and every `(` is closed.
///
fn is_balanced(tokens: &[Token]) -> bool {
    let mut depth = 0_usize;

    for token in tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }

    depth == 0
}

///
/// Whether the whole range is one parenthesized group, as in `(a)` but not
/// `(a) * (b)`.
///
fn is_enclosed(range: &[Token]) -> bool {
    match range {
        [Token::LParen, inner @ .., Token::RParen] => is_balanced(inner),
        _ => false,
    }
}

///
/// Split a range on every occurrence of `sep` outside of parentheses.
///
fn split_top_level<'t>(range: &'t [Token], sep: &Token) -> Vec<&'t [Token]> {
    let mut parts = Vec::new();
    let (mut depth, mut start) = (0_usize, 0);

    for (i, token) in range.iter().enumerate() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            _ if depth == 0 && token == sep => {
                parts.push(&range[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    parts.push(&range[start..]);
    parts
}

///
/// Find the operator to split at: the loosest precedence tier present at
/// zero depth, and within it the rightmost occurrence.
///
/// Splitting at the rightmost operator makes every operator, `^` included,
/// group from the left: `2^3^2` is `(2^3)^2`.
///
fn split_point(range: &[Token]) -> Option<(usize, Operator)> {
    (0..=2).find_map(|tier| {
        let mut depth = 0_usize;

        for (i, token) in range.iter().enumerate().rev() {
            match token {
                Token::RParen => depth += 1,
                Token::LParen => depth = depth.saturating_sub(1),
                _ if depth == 0 => match Operator::from_token(token) {
                    Some(op) if op.precedence() == tier => return Some((i, op)),
                    _ => {}
                },
                _ => {}
            }
        }

        None
    })
}

#[cfg(test)]
mod test {
    use super::{parse, Parser};
    use crate::{
        ast::{Env, Functions, Node, Tree, Variables},
        error::SyntaxErrorKind,
        lex::tokenize,
        value::Number,
    };
    use alloc::string::{String, ToString};

    fn tree(src: &str) -> String {
        let tokens = tokenize(src).unwrap();
        Tree(&*parse(&tokens).unwrap()).to_string()
    }

    fn eval(src: &str) -> Number {
        let tokens = tokenize(src).unwrap();
        let (variables, functions) = (Variables::new(), Functions::new());

        parse(&tokens)
            .unwrap()
            .eval(&Env::new(&variables, &functions))
            .unwrap()
    }

    fn failure(src: &str) -> SyntaxErrorKind {
        let tokens = tokenize(src).unwrap();

        match parse(&tokens) {
            Ok(_) => panic!("`{src}` should not parse"),
            Err(err) => err.kind,
        }
    }

    ///
    /// Declares a test case comparing the evaluated input against a number.
    ///
    macro_rules! eval_case {
        ($name:ident, $input:expr, $expected:expr $(,)?) => {
            #[test]
            fn $name() {
                assert_eq!(eval($input), $expected);
            }
        };
    }

    eval_case!(precedence, "2+3*4", Number::real(14.0));
    eval_case!(grouping, "(2+3)*4", Number::real(20.0));
    eval_case!(redundant_parens, "((((7))))", Number::real(7.0));
    eval_case!(left_assoc_sub, "10-4-3", Number::real(3.0));
    eval_case!(left_assoc_mixed, "2-3+4", Number::real(3.0));
    eval_case!(left_assoc_div, "64/4/2", Number::real(8.0));
    eval_case!(left_assoc_mul_div, "8/2*4", Number::real(16.0));
    eval_case!(power_chain, "2^3^2", Number::real(64.0));
    eval_case!(power_binds_tightest, "2*3^2", Number::real(18.0));
    eval_case!(leading_minus, "-2^2", Number::real(-4.0));
    eval_case!(leading_plus, "+5", Number::real(5.0));
    eval_case!(nested_calls, "sqrt(sqrt(16) * (4))", Number::real(4.0));
    eval_case!(implicit_mul, "(1+1)i", Number::complex(0.0, 2.0));

    #[test]
    fn power_groups_left() {
        assert_eq!(
            tree("2^3^2"),
            concat!("^\n", "  ^\n", "    2\n", "    3\n", "  2\n"),
        );
    }

    #[test]
    fn call_arguments() {
        assert_eq!(
            tree("f(1, g(2, 3), (4))"),
            concat!("f\n", "  1\n", "  g\n", "    2\n", "    3\n", "  4\n"),
        );
        assert_eq!(tree("f()"), "f\n");
    }

    #[test]
    fn unary_sign() {
        assert_eq!(tree("-x"), concat!("-\n", "  0\n", "  x\n"));
    }

    #[test]
    fn failures() {
        assert_eq!(failure("(2+3"), SyntaxErrorKind::Unbalanced);
        assert_eq!(failure("2+3)"), SyntaxErrorKind::Unbalanced);
        assert_eq!(failure(")("), SyntaxErrorKind::Unbalanced);
        assert_eq!(failure("()"), SyntaxErrorKind::NoTokens);
        assert_eq!(failure("2+"), SyntaxErrorKind::NoTokens);
        assert_eq!(failure("f(1,)"), SyntaxErrorKind::NoTokens);
        assert_eq!(failure("*2"), SyntaxErrorKind::MissingOperand);
        assert_eq!(failure("2 (3)"), SyntaxErrorKind::NoOperators);
        assert_eq!(failure("sin"), SyntaxErrorKind::InvalidInput);
        assert_eq!(failure(","), SyntaxErrorKind::InvalidInput);
    }

    #[test]
    fn diagnostics() {
        let tokens = tokenize("1 + (2 3)").unwrap();

        let err = parse(&tokens).err().unwrap();
        assert!(err.context.is_empty());

        let err = Parser::new(&tokens).with_diagnostics(true).parse().err().unwrap();
        assert_eq!(err.to_string(), "no operators found in `2 3`");
    }
}
