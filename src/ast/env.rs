//
// Bindings visible during evaluation.
//

use super::Node;
use crate::{error::EvalError, value::Number};
use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};

pub type Variables = BTreeMap<String, Number>;

///
/// User functions by name, then by arity.
///
pub type Functions = BTreeMap<String, BTreeMap<usize, UserFunction>>;

///
/// One overload of a user-defined function.
///
pub struct UserFunction {
    params: Vec<String>,
    body: Box<dyn Node>,
}

///
/// The environment a node is evaluated in.
///
/// Calling a user function pushes a frame binding its parameters on top of
/// the caller's scope, so parameters shadow outer variables and the body
/// still sees everything the caller sees.
///
#[derive(Clone, Copy)]
pub struct Env<'a> {
    scope: Scope<'a>,
    functions: &'a Functions,
}

#[derive(Clone, Copy)]
enum Scope<'a> {
    Global(&'a Variables),
    Frame {
        params: &'a [String],
        args: &'a [Number],
        parent: &'a Scope<'a>,
    },
}

impl UserFunction {
    #[must_use]
    pub fn new(params: Vec<String>, body: Box<dyn Node>) -> Self {
        Self { params, body }
    }

    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    #[must_use]
    pub fn body(&self) -> &dyn Node {
        &*self.body
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl<'a> Env<'a> {
    #[must_use]
    pub fn new(variables: &'a Variables, functions: &'a Functions) -> Self {
        Self {
            scope: Scope::Global(variables),
            functions,
        }
    }

    #[must_use]
    pub fn variable(&self, name: &str) -> Option<Number> {
        self.scope.lookup(name)
    }

    #[must_use]
    pub fn overload(&self, name: &str, arity: usize) -> Option<&'a UserFunction> {
        self.functions.get(name)?.get(&arity)
    }

    #[must_use]
    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    ///
    /// Evaluate `func` with `args` bound to its parameters.
    ///
    /// # Errors
    ///
    /// Propagates any failure from evaluating the function body.
    ///
    pub fn call(&self, func: &UserFunction, args: &[Number]) -> Result<Number, EvalError> {
        let env = Env {
            scope: Scope::Frame {
                params: func.params(),
                args,
                parent: &self.scope,
            },
            functions: self.functions,
        };

        func.body().eval(&env)
    }
}

impl Scope<'_> {
    fn lookup(&self, name: &str) -> Option<Number> {
        match self {
            Scope::Global(variables) => variables.get(name).copied(),
            Scope::Frame {
                params,
                args,
                parent,
            } => params
                .iter()
                .zip(args.iter())
                .find(|(param, _)| *param == name)
                .map(|(_, arg)| *arg)
                .or_else(|| parent.lookup(name)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Env, Functions, UserFunction, Variables};
    use crate::{
        ast::{call::Call, expr::Add},
        value::Number,
    };
    use alloc::{boxed::Box, collections::BTreeMap, string::String, vec};

    #[test]
    fn parameters_shadow_globals() {
        let mut variables = Variables::new();
        variables.insert("x".into(), Number::real(10.0));
        variables.insert("y".into(), Number::real(1.0));

        // f(x) = x + y
        let body = Add::new(
            Box::new(Call::new("x".into(), vec![])),
            Box::new(Call::new("y".into(), vec![])),
        );
        let func = UserFunction::new(vec![String::from("x")], Box::new(body));

        let functions = Functions::new();
        let env = Env::new(&variables, &functions);

        assert_eq!(env.call(&func, &[Number::real(2.0)]), Ok(Number::real(3.0)));
        assert_eq!(env.variable("x"), Some(Number::real(10.0)));
    }

    #[test]
    fn overloads_by_arity() {
        let mut functions = Functions::new();
        functions.insert(
            "f".into(),
            BTreeMap::from([(
                0,
                UserFunction::new(vec![], Box::new(Number::real(1.0))),
            )]),
        );

        let variables = Variables::new();
        let env = Env::new(&variables, &functions);

        assert!(env.overload("f", 0).is_some());
        assert!(env.overload("f", 1).is_none());
        assert!(env.is_function("f"));
        assert!(!env.is_function("g"));
    }
}
