//
// Function calls and identifiers.
//

use super::{write_line, Env, Node};
use crate::{error::EvalError, func::Function, value::Number};
use alloc::{boxed::Box, string::String, vec::Vec};
use core::fmt;

///
/// A named reference: a variable, or a call to a user-defined function.
///
/// A bare identifier is a call with no arguments. Variables take priority
/// over functions, and overloads are picked by argument count.
///
pub struct Call {
    name: String,
    args: Vec<Box<dyn Node>>,
}

///
/// A call to a built-in function.
///
pub struct Builtin {
    func: Function,
    args: Vec<Box<dyn Node>>,
}

impl Call {
    #[must_use]
    pub fn new(name: String, args: Vec<Box<dyn Node>>) -> Self {
        Self { name, args }
    }
}

impl Builtin {
    #[must_use]
    pub fn new(func: Function, args: Vec<Box<dyn Node>>) -> Self {
        Self { func, args }
    }
}

fn eval_args(args: &[Box<dyn Node>], env: &Env<'_>) -> Result<Vec<Number>, EvalError> {
    args.iter().map(|arg| arg.eval(env)).collect()
}

impl Node for Call {
    fn eval(&self, env: &Env<'_>) -> Result<Number, EvalError> {
        if let Some(value) = env.variable(&self.name) {
            return Ok(value);
        }

        let arity = self.args.len();
        let Some(func) = env.overload(&self.name, arity) else {
            return Err(if env.is_function(&self.name) {
                EvalError::NoOverload {
                    name: self.name.clone(),
                    arity,
                }
            } else {
                EvalError::Unresolved(self.name.clone())
            });
        };

        // arguments are evaluated in the caller's scope
        let args = eval_args(&self.args, env)?;
        env.call(func, &args)
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write_line(f, depth, &self.name)?;
        self.args
            .iter()
            .try_for_each(|arg| arg.write_tree(f, depth + 1))
    }
}

impl Node for Builtin {
    fn eval(&self, env: &Env<'_>) -> Result<Number, EvalError> {
        let args = eval_args(&self.args, env)?;
        self.func.apply(&args)
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write_line(f, depth, self.func)?;
        self.args
            .iter()
            .try_for_each(|arg| arg.write_tree(f, depth + 1))
    }
}

#[cfg(test)]
mod test {
    use super::{Builtin, Call};
    use crate::{
        ast::{expr::Mul, Env, Functions, Node, UserFunction, Variables},
        error::EvalError,
        func::Function,
        value::Number,
    };
    use alloc::{boxed::Box, collections::BTreeMap, string::String, vec, vec::Vec};

    fn ident(name: &str) -> Box<dyn Node> {
        Box::new(Call::new(name.into(), Vec::new()))
    }

    fn square() -> Functions {
        // sq(x) = x * x
        let body = Mul::new(ident("x"), ident("x"));
        let func = UserFunction::new(vec![String::from("x")], Box::new(body));

        Functions::from([("sq".into(), BTreeMap::from([(1, func)]))])
    }

    #[test]
    fn user_function() {
        let variables = Variables::new();
        let functions = square();
        let env = Env::new(&variables, &functions);

        let call = Call::new("sq".into(), vec![Box::new(Number::real(3.0)) as _]);
        assert_eq!(call.eval(&env), Ok(Number::real(9.0)));
    }

    #[test]
    fn variables_take_priority() {
        let variables = Variables::from([("sq".into(), Number::real(-1.0))]);
        let functions = square();
        let env = Env::new(&variables, &functions);

        let call = Call::new("sq".into(), vec![Box::new(Number::real(3.0)) as _]);
        assert_eq!(call.eval(&env), Ok(Number::real(-1.0)));
    }

    #[test]
    fn unresolved() {
        let variables = Variables::new();
        let functions = square();
        let env = Env::new(&variables, &functions);

        assert_eq!(
            ident("y").eval(&env),
            Err(EvalError::Unresolved("y".into())),
        );
        assert_eq!(
            ident("sq").eval(&env),
            Err(EvalError::NoOverload { name: "sq".into(), arity: 0 }),
        );
    }

    #[test]
    fn builtin_propagates_argument_errors() {
        let variables = Variables::new();
        let functions = Functions::new();
        let env = Env::new(&variables, &functions);

        let call = Builtin::new(Function::Sin, vec![ident("y")]);
        assert_eq!(call.eval(&env), Err(EvalError::Unresolved("y".into())));

        let call = Builtin::new(Function::Sqrt, vec![Box::new(Number::real(-4.0)) as _]);
        assert_eq!(call.eval(&env), Ok(Number::complex(0.0, 2.0)));
    }
}
