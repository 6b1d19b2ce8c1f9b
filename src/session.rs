use crate::{
    ast::{Env, Functions, Node, UserFunction, Variables},
    error::{Error, SyntaxErrorKind},
    lex::{self, Token},
    parse::Parser,
    value::Number,
};
use alloc::{boxed::Box, string::String, vec::Vec};

///
/// Variable and function bindings that persist across lines.
///
/// Bindings change only when a whole line succeeds; a failing line leaves
/// them untouched.
///
/// Evaluation recurses through user functions without a depth limit, so a
/// definition that never stops calling itself exhausts the stack.
///
#[derive(Default)]
pub struct Session {
    variables: Variables,
    functions: Functions,
    diagnostics: bool,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Attach the failing tokens to syntax errors.
    ///
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    #[must_use]
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    #[must_use]
    pub fn functions(&self) -> &Functions {
        &self.functions
    }

    ///
    /// Process one line of input.
    ///
    /// - `name = expr` evaluates `expr`, binds it to `name` and yields it.
    /// - `name(p1, p2, ...) = expr` defines an overload of `name` for that
    ///   many parameters and yields nothing.
    /// - anything else is evaluated as an expression and yields its value.
    ///
    /// # Errors
    ///
    /// Fails when the line is empty, does not tokenize, is not a well-formed
    /// expression, assignment or definition, or does not evaluate.
    ///
    pub fn process(&mut self, line: &str) -> Result<Option<Number>, Error> {
        let tokens = lex::tokenize(line)?;

        match tokens.iter().position(|t| *t == Token::Equals) {
            None => self.evaluate(&tokens).map(Some),
            Some(1) => self.assign(&tokens).map(Some),
            Some(eq) => self.define(&tokens, eq).map(|()| None),
        }
    }

    ///
    /// Tokenize and build the tree for an expression without evaluating it.
    ///
    /// # Errors
    ///
    /// Fails when the line does not tokenize or does not build a tree.
    ///
    pub fn parse(&self, line: &str) -> Result<Box<dyn Node>, Error> {
        let tokens = lex::tokenize(line)?;
        self.build(&tokens)
    }

    fn build(&self, tokens: &[Token]) -> Result<Box<dyn Node>, Error> {
        Ok(Parser::new(tokens)
            .with_diagnostics(self.diagnostics)
            .parse()?)
    }

    fn evaluate(&self, tokens: &[Token]) -> Result<Number, Error> {
        let root = self.build(tokens)?;
        Ok(root.eval(&Env::new(&self.variables, &self.functions))?)
    }

    fn assign(&mut self, tokens: &[Token]) -> Result<Number, Error> {
        let [Token::Ident(name), Token::Equals, body @ ..] = tokens else {
            return Err(SyntaxErrorKind::Assignment.into());
        };

        let value = self.evaluate(body)?;
        self.variables.insert(name.clone(), value);

        Ok(value)
    }

    fn define(&mut self, tokens: &[Token], eq: usize) -> Result<(), Error> {
        let (head, body) = (&tokens[..eq], &tokens[eq + 1..]);

        let [Token::Ident(name), Token::LParen, params @ .., Token::RParen] = head else {
            return Err(SyntaxErrorKind::Definition.into());
        };
        let params = parameters(params).ok_or(SyntaxErrorKind::Definition)?;

        let func = UserFunction::new(params, self.build(body)?);
        self.functions
            .entry(name.clone())
            .or_default()
            .insert(func.arity(), func);

        Ok(())
    }
}

///
/// Parse `p1 , p2 , ...` into distinct parameter names.
///
fn parameters(tokens: &[Token]) -> Option<Vec<String>> {
    if tokens.is_empty() {
        return Some(Vec::new());
    }

    let mut names: Vec<String> = Vec::new();
    for param in tokens.split(|t| *t == Token::Comma) {
        match param {
            [Token::Ident(name)] if !names.contains(name) => names.push(name.clone()),
            _ => return None,
        }
    }

    Some(names)
}

///
/// Split `src` into statements on `;` outside of parentheses.
///
pub fn statements(src: &str) -> impl Iterator<Item = &str> {
    let mut depth = 0_usize;

    src.split(move |c: char| {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        c == ';' && depth == 0
    })
}

///
/// Whether a statement assigns or defines something, and so is not echoed
/// by batch front-ends.
///
#[must_use]
pub fn is_binding(statement: &str) -> bool {
    statement.contains('=')
}
