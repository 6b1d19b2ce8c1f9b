use crate::{
    ast::{self, Env, Node},
    error::EvalError,
};
use core::fmt;
use derive_more::{Add, Div, From, Mul, Sub};
use num_complex::Complex;

///
/// A number.
///
/// Every value the evaluator produces is complex; reals simply carry a zero
/// imaginary part.
///
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(Add, Sub, Mul, Div)]
#[derive(From)]
#[mul(forward)]
#[div(forward)]
pub struct Number(Complex<f64>);

///
/// A named mathematical constant.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
    I,
}

impl Number {
    pub const ZERO: Self = Self::real(0.0);

    #[must_use]
    pub const fn real(f: f64) -> Self {
        Self(Complex::new(f, 0.0))
    }

    #[must_use]
    pub const fn complex(re: f64, im: f64) -> Self {
        Self(Complex::new(re, im))
    }

    #[must_use]
    pub const fn re(&self) -> f64 {
        self.0.re
    }

    #[must_use]
    pub const fn im(&self) -> f64 {
        self.0.im
    }

    #[must_use]
    pub const fn as_complex(&self) -> Complex<f64> {
        self.0
    }

    ///
    /// Raise `self` to the power `rhs`, on the principal branch.
    ///
    /// Powers that stay on the real line are computed with real `pow`,
    /// which keeps integral results such as `2^10` exact.
    ///
    #[must_use]
    pub fn pow(&self, rhs: &Self) -> Self {
        let (base, exp) = (self.0, rhs.0);

        if base.im == 0.0
            && exp.im == 0.0
            && (base.re >= 0.0 || libm::trunc(exp.re) == exp.re)
        {
            return Self::real(libm::pow(base.re, exp.re));
        }

        base.powc(exp).into()
    }
}

///
/// `a` for reals, `bi` for pure imaginaries, `a + bi` / `a - bi` otherwise.
///
/// The imaginary unit is written directly after its coefficient, with no
/// space between them, so `2i` rather than `2 i`.
///
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Complex { re, im } = self.0;

        // normalizes `-0` to `0`
        let re = if re == 0.0 { 0.0 } else { re };

        match (re == 0.0, im == 0.0) {
            (_, true) => write!(f, "{re}"),
            (true, false) => write!(f, "{im}i"),
            (false, false) if im < 0.0 => write!(f, "{re} - {}i", -im),
            (false, false) => write!(f, "{re} + {im}i"),
        }
    }
}

impl Constant {
    ///
    /// Names the tokenizer resolves to constants.
    ///
    pub const NAMES: &'static [(&'static str, Constant)] = &[
        ("pi", Constant::Pi),
        ("π", Constant::Pi),
        ("e", Constant::E),
        ("i", Constant::I),
    ];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, constant)| *constant)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
            Constant::I => "i",
        }
    }

    #[must_use]
    pub const fn value(self) -> Number {
        match self {
            Constant::Pi => Number::real(core::f64::consts::PI),
            Constant::E => Number::real(core::f64::consts::E),
            Constant::I => Number::complex(0.0, 1.0),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Node for Number {
    fn eval(&self, _: &Env<'_>) -> Result<Number, EvalError> {
        Ok(*self)
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        ast::write_line(f, depth, self)
    }
}

impl Node for Constant {
    fn eval(&self, _: &Env<'_>) -> Result<Number, EvalError> {
        Ok(self.value())
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        ast::write_line(f, depth, self)
    }
}

#[cfg(test)]
mod test {
    use super::{Constant, Number};
    use alloc::string::ToString;

    macro_rules! render_case {
        ($name:ident, $value:expr, $expected:literal $(,)?) => {
            #[test]
            fn $name() {
                assert_eq!($value.to_string(), $expected);
            }
        };
    }

    render_case!(render_zero, Number::ZERO, "0");
    render_case!(render_negative_zero, Number::complex(-0.0, 0.0), "0");
    render_case!(render_real, Number::real(2.5), "2.5");
    render_case!(render_imaginary, Number::complex(0.0, -3.0), "-3i");
    render_case!(render_sum, Number::complex(1.0, 2.0), "1 + 2i");
    render_case!(render_difference, Number::complex(1.0, -2.0), "1 - 2i");

    #[test]
    fn arithmetic() {
        let a = Number::complex(2.0, 1.0);
        let b = Number::complex(3.0, 0.5);

        assert_eq!(Number::real(1.0) + a * b, Number::complex(6.5, 4.0));
        assert_eq!(a - a, Number::ZERO);
        assert_eq!(a / Number::real(2.0), Number::complex(1.0, 0.5));
    }

    #[test]
    fn real_powers_are_exact() {
        assert_eq!(Number::real(2.0).pow(&Number::real(10.0)), Number::real(1024.0));
        assert_eq!(Number::real(-2.0).pow(&Number::real(3.0)), Number::real(-8.0));
    }

    #[test]
    fn negative_base_fractional_power_is_complex() {
        let root = Number::real(-4.0).pow(&Number::real(0.5));

        assert!(libm::fabs(root.re()) < 1e-12);
        assert!(libm::fabs(root.im() - 2.0) < 1e-12);
    }

    #[test]
    fn constants() {
        assert_eq!(Constant::from_name("π"), Some(Constant::Pi));
        assert_eq!(Constant::from_name("x"), None);
        assert_eq!(Constant::I.value() * Constant::I.value(), Number::real(-1.0));
    }
}
