use crate::{error::EvalError, value::Number};
use core::fmt;

pub mod call;
pub mod env;
pub mod expr;

pub use env::{Env, Functions, UserFunction, Variables};

///
/// An evaluatable AST node.
///
/// Nodes own their children. Evaluation never mutates the environment, so
/// evaluating the same tree twice against the same bindings gives the same
/// result.
///
pub trait Node {
    ///
    /// Reduce this node to a number.
    ///
    /// # Errors
    ///
    /// Fails when an identifier cannot be resolved or a function is called
    /// with an unsupported number of arguments.
    ///
    fn eval(&self, env: &Env<'_>) -> Result<Number, EvalError>;

    ///
    /// Write this node and its children, one per line, indented by `depth`.
    ///
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result;
}

///
/// Displays a tree of nodes, indenting two spaces per level.
///
#[derive(Clone, Copy)]
pub struct Tree<'n>(pub &'n dyn Node);

impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_tree(f, 0)
    }
}

pub(crate) fn write_line(
    f: &mut fmt::Formatter<'_>,
    depth: usize,
    label: impl fmt::Display,
) -> fmt::Result {
    writeln!(f, "{:indent$}{label}", "", indent = depth * 2)
}

#[cfg(test)]
mod test {
    use super::{
        call::{Builtin, Call},
        expr::*,
        Env, Functions, Node, Tree, Variables,
    };
    use crate::{
        func::Function,
        value::{Constant, Number},
    };
    use alloc::{boxed::Box, string::ToString, vec};

    #[test]
    fn expr() {
        let expr = Add::new(
            Box::new(Number::real(1.0)),
            Box::new(Mul::new(
                Box::new(Number::complex(2.0, 1.0)),
                Box::new(Number::complex(3.0, 0.5)),
            )),
        );

        let (variables, functions) = (Variables::new(), Functions::new());
        let env = Env::new(&variables, &functions);

        assert_eq!(expr.eval(&env), Ok(Number::complex(6.5, 4.0)));
        assert_eq!(expr.eval(&env), expr.eval(&env));
    }

    #[test]
    fn tree() {
        let expr = Sub::new(
            Box::new(Builtin::new(Function::Sqrt, vec![Box::new(Constant::Pi) as _])),
            Box::new(Pow::new(
                Box::new(Call::new("x".into(), vec![])),
                Box::new(Number::real(2.0)),
            )),
        );

        assert_eq!(
            Tree(&expr).to_string(),
            concat!("-\n", "  sqrt\n", "    pi\n", "  ^\n", "    x\n", "    2\n"),
        );
    }
}
