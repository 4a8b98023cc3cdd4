use std::rc::Rc;

use indexmap::IndexMap;

use crate::{
    error::{InternalError, SyntaxError},
    interpreter::{
        evaluator::evaluate,
        lexer::tokenize,
        parser::{ParsedExpression, to_postfix},
        registry::{Juxtaposition, Registered, builtin},
        token::{BinaryOperator, Function, UnaryOperator},
        variables::{VariableId, Variables},
    },
};

/// Turns the text of a numeric literal into a value, or `None` if the text
/// is not a valid literal.
pub type LiteralParser = fn(&str) -> Option<bool>;

/// Creates the slot for an identifier the lexer found in no registry.
pub type UnknownIdentifierHandler = fn(&mut Variables, &str) -> VariableId;

/// Parses a numeric literal as a real number; any nonzero value is `true`.
///
/// # Example
/// ```
/// use trtbl::interpreter::context::parse_literal;
///
/// assert_eq!(parse_literal("0"), Some(false));
/// assert_eq!(parse_literal("0.25"), Some(true));
/// assert_eq!(parse_literal("1e"), None);
/// ```
#[must_use]
#[allow(clippy::float_cmp)]
pub fn parse_literal(text: &str) -> Option<bool> {
    text.parse::<f64>().ok().map(|value| value != 0.0)
}

/// Stores the interpreter state.
///
/// This struct owns the operator and function tables, the variable arena and
/// the per-run configuration (literal parser, unknown-identifier handler and
/// juxtaposition operator). It replaces what would otherwise be process-wide
/// registries: one `Context` is created at startup and reused for every
/// expression of a run.
///
/// ## Usage
///
/// Free variables discovered while parsing stay in the arena until
/// [`Context::reset`] is called. [`Context::truth_table`] and
/// [`Context::tabulate`] do this themselves, on success and on failure.
pub struct Context {
    pub(crate) unary_operators:    IndexMap<char, Registered<UnaryOperator>>,
    pub(crate) binary_operators:   IndexMap<String, Registered<Rc<BinaryOperator>>>,
    pub(crate) functions:          IndexMap<String, Registered<Rc<Function>>>,
    /// Named constants and the free variables of the current expression.
    pub variables:                 Variables,
    pub(crate) juxtaposition:      Option<Rc<BinaryOperator>>,
    pub(crate) literal_parser:     LiteralParser,
    pub(crate) unknown_identifier: UnknownIdentifierHandler,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with the built-in boolean operators, functions and
    /// constants, with juxtaposition binding just below `&`.
    #[must_use]
    pub fn new() -> Self {
        let mut context = Self::empty();
        builtin::install(&mut context);
        context.set_juxtaposition(Juxtaposition::Below);
        context
    }

    /// Creates a context with empty registries and juxtaposition disabled.
    #[must_use]
    pub fn empty() -> Self {
        Self { unary_operators:    IndexMap::new(),
               binary_operators:   IndexMap::new(),
               functions:          IndexMap::new(),
               variables:          Variables::new(),
               juxtaposition:      None,
               literal_parser:     parse_literal,
               unknown_identifier: Variables::declare_free, }
    }

    /// Replaces the callback that turns numeric literals into values.
    pub fn set_literal_parser(&mut self, parser: LiteralParser) {
        self.literal_parser = parser;
    }

    /// Replaces the callback that creates slots for unknown identifiers.
    pub fn set_unknown_identifier_handler(&mut self, handler: UnknownIdentifierHandler) {
        self.unknown_identifier = handler;
    }

    /// Lexes and parses an expression into postfix form.
    ///
    /// Free variables met for the first time are added to the arena; call
    /// [`Context::reset`] once the expression is no longer needed.
    ///
    /// # Errors
    /// Returns a `SyntaxError` if the expression is malformed. Variables
    /// created before the failure remain in the arena until reset.
    ///
    /// # Example
    /// ```
    /// use trtbl::interpreter::context::Context;
    ///
    /// let mut context = Context::new();
    /// let parsed = context.parse("a | b & c").unwrap();
    /// assert_eq!(parsed.to_string(), "a b c & |");
    /// ```
    pub fn parse(&mut self, source: &str) -> Result<ParsedExpression, SyntaxError> {
        let tokens = tokenize(source, self)?;
        log::trace!("lexed {} token(s) from '{source}'", tokens.len());
        let parsed = to_postfix(&tokens, self.juxtaposition.as_ref(), &self.variables)?;
        log::debug!("postfix of '{source}': {parsed}");
        Ok(parsed)
    }

    /// Evaluates a parsed expression against the current variable values.
    ///
    /// # Errors
    /// Returns an `InternalError` if the instruction sequence is malformed or
    /// reads an unbound variable.
    pub fn evaluate(&self, parsed: &ParsedExpression) -> Result<bool, InternalError> {
        evaluate(parsed, &self.variables)
    }

    /// Binds the free variables, in first-seen order, to `values`.
    ///
    /// # Errors
    /// Returns `InternalError::AssignmentLength` if the lengths differ.
    pub fn assign(&mut self, values: &[bool]) -> Result<(), InternalError> {
        self.variables.assign(values)
    }

    /// Forgets every free variable, restoring the arena to its constants.
    pub fn reset(&mut self) {
        let count = self.variables.free_count();
        if count > 0 {
            log::trace!("dropping {count} free variable(s)");
        }
        self.variables.reset();
    }
}
