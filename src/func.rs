//
// Built-in functions.
//

use crate::{error::EvalError, value::Number};
use core::fmt;
use num_complex::Complex;

///
/// A built-in function.
///
/// Every function is unary except [`Function::Log`], which also accepts a
/// base as its second argument.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Sqrt,
    Exp,
    Log,
    Round,
    Floor,
    Ceil,
}

impl Function {
    ///
    /// Names the tokenizer resolves to built-in functions.
    ///
    pub const NAMES: &'static [(&'static str, Function)] = &[
        ("sin", Function::Sin),
        ("cos", Function::Cos),
        ("tan", Function::Tan),
        ("asin", Function::Asin),
        ("arcsin", Function::Asin),
        ("acos", Function::Acos),
        ("arccos", Function::Acos),
        ("atan", Function::Atan),
        ("arctan", Function::Atan),
        ("sinh", Function::Sinh),
        ("cosh", Function::Cosh),
        ("tanh", Function::Tanh),
        ("asinh", Function::Asinh),
        ("acosh", Function::Acosh),
        ("atanh", Function::Atanh),
        ("sqrt", Function::Sqrt),
        ("exp", Function::Exp),
        ("log", Function::Log),
        ("round", Function::Round),
        ("floor", Function::Floor),
        ("ceil", Function::Ceil),
    ];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, func)| *func)
    }

    ///
    /// The canonical name of this function.
    ///
    #[must_use]
    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, func)| *func == self)
            .map_or("?", |(name, _)| *name)
    }

    ///
    /// Apply this function to already evaluated arguments.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Arity`] when the function does not take
    /// `args.len()` arguments.
    ///
    pub fn apply(self, args: &[Number]) -> Result<Number, EvalError> {
        let value = match (self, args) {
            (Function::Log, [x]) => x.as_complex().ln(),
            (Function::Log, [x, base]) => {
                x.as_complex().ln() / base.as_complex().ln()
            }
            (_, [x]) => self.unary(x.as_complex()),
            _ => {
                return Err(EvalError::Arity {
                    func: self,
                    arity: args.len(),
                })
            }
        };

        Ok(value.into())
    }

    fn unary(self, z: Complex<f64>) -> Complex<f64> {
        // rounding applies to each component on its own
        let parts = |f: fn(f64) -> f64| Complex::new(f(z.re), f(z.im));

        match self {
            Function::Sin => z.sin(),
            Function::Cos => z.cos(),
            Function::Tan => z.tan(),
            Function::Asin => z.asin(),
            Function::Acos => z.acos(),
            Function::Atan => z.atan(),
            Function::Sinh => z.sinh(),
            Function::Cosh => z.cosh(),
            Function::Tanh => z.tanh(),
            Function::Asinh => z.asinh(),
            Function::Acosh => z.acosh(),
            Function::Atanh => z.atanh(),
            Function::Sqrt => z.sqrt(),
            Function::Exp => z.exp(),
            Function::Log => z.ln(),
            Function::Round => parts(libm::round),
            Function::Floor => parts(libm::floor),
            Function::Ceil => parts(libm::ceil),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
