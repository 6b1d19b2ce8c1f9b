#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod ast;
pub mod error;
pub mod func;
pub mod lex;
pub mod parse;
pub mod session;
pub mod value;

pub mod prelude {
    pub use crate::ast::{Env, Node, Tree};
    pub use crate::error::{Error, EvalError, LexError, SyntaxError};
    pub use crate::func::Function;
    pub use crate::lex::{tokenize, Lexer, Literal, Token};
    pub use crate::parse::Parser;
    pub use crate::session::Session;
    pub use crate::value::{Constant, Number};
}
