//
// Mathematical operations represented in the AST.
//

use super::Node;
use crate::{lex::Token, value::Number as N};
use alloc::boxed::Box;

macro_rules! binary_op {
    ($vis:vis $name:ident) => {
        $vis struct $name {
            lhs: ::alloc::boxed::Box<dyn Node>,
            rhs: ::alloc::boxed::Box<dyn Node>,
        }

        impl $name {
            pub fn new(
                lhs: ::alloc::boxed::Box<dyn Node>,
                rhs: ::alloc::boxed::Box<dyn Node>,
            ) -> Self {
                Self { lhs, rhs }
            }
        }
    }
}

macro_rules! binary_op_node_impl {
    ($name:ident, $symbol:literal, $op:expr) => {
        impl crate::ast::Node for $name {
            fn eval(
                &self,
                env: &crate::ast::Env<'_>,
            ) -> Result<crate::value::Number, crate::error::EvalError> {
                let lhs = self.lhs.eval(env)?;
                let rhs = self.rhs.eval(env)?;

                #[allow(clippy::redundant_closure_call)]
                let value = $op(lhs, rhs);
                Ok(value)
            }

            fn write_tree(
                &self,
                f: &mut ::core::fmt::Formatter<'_>,
                depth: usize,
            ) -> ::core::fmt::Result {
                crate::ast::write_line(f, depth, $symbol)?;
                self.lhs.write_tree(f, depth + 1)?;
                self.rhs.write_tree(f, depth + 1)
            }
        }
    };
}

binary_op!(pub Add);
binary_op!(pub Sub);
binary_op!(pub Mul);
binary_op!(pub Div);
binary_op!(pub Pow);

binary_op_node_impl!(Add, "+", |a: N, b: N| a + b);
binary_op_node_impl!(Sub, "-", |a: N, b: N| a - b);
binary_op_node_impl!(Mul, "*", |a: N, b: N| a * b);
binary_op_node_impl!(Div, "/", |a: N, b: N| a / b);
binary_op_node_impl!(Pow, "^", |a: N, b: N| a.pow(&b));

///
/// A binary operator, ordered by precedence tier.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    #[must_use]
    pub fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::Add => Some(Operator::Add),
            Token::Sub => Some(Operator::Sub),
            Token::Mul => Some(Operator::Mul),
            Token::Div => Some(Operator::Div),
            Token::Pow => Some(Operator::Pow),
            _ => None,
        }
    }

    ///
    /// Binding strength: `0` for `+ -`, `1` for `* /`, `2` for `^`.
    ///
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 0,
            Operator::Mul | Operator::Div => 1,
            Operator::Pow => 2,
        }
    }

    ///
    /// Whether this operator may open an expression, as in `-x` (`0 - x`).
    ///
    #[must_use]
    pub const fn is_sign(self) -> bool {
        matches!(self, Operator::Add | Operator::Sub)
    }

    #[must_use]
    pub fn node(self, lhs: Box<dyn Node>, rhs: Box<dyn Node>) -> Box<dyn Node> {
        match self {
            Operator::Add => Box::new(Add::new(lhs, rhs)),
            Operator::Sub => Box::new(Sub::new(lhs, rhs)),
            Operator::Mul => Box::new(Mul::new(lhs, rhs)),
            Operator::Div => Box::new(Div::new(lhs, rhs)),
            Operator::Pow => Box::new(Pow::new(lhs, rhs)),
        }
    }
}
