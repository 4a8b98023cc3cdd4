/// Built-in boolean operators, functions and constants.
///
/// Installed into every context created with
/// [`Context::new`](crate::interpreter::context::Context::new).
pub mod builtin;

use std::rc::Rc;

use crate::interpreter::{
    context::Context,
    token::{Arity, Associativity, BinaryFn, BinaryOperator, Function, FunctionFn, UnaryFn,
            UnaryOperator},
};

/// A registry entry together with the text shown by listings.
#[derive(Debug, Clone)]
pub struct Registered<T> {
    /// The operator or function.
    pub item:        T,
    /// Short human readable name.
    pub title:       String,
    /// Usage example or longer description.
    pub description: String,
}

impl<T> Registered<T> {
    fn new(item: T, title: &str, description: &str) -> Self {
        Self { item,
               title: title.to_string(),
               description: description.to_string() }
    }
}

/// Placement of the juxtaposition operator relative to the reference
/// operator [`builtin::JUXTAPOSITION_REFERENCE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Juxtaposition {
    /// Operands written next to each other are a syntax error.
    Disabled,
    /// Binds one level looser than the reference operator.
    #[default]
    Below,
    /// Binds one level tighter than the reference operator.
    Above,
}

impl Juxtaposition {
    /// Selects the placement from the sign of a configuration value.
    ///
    /// # Example
    /// ```
    /// use trtbl::interpreter::registry::Juxtaposition;
    ///
    /// assert_eq!(Juxtaposition::from_sign(-3), Juxtaposition::Below);
    /// assert_eq!(Juxtaposition::from_sign(0), Juxtaposition::Disabled);
    /// assert_eq!(Juxtaposition::from_sign(1), Juxtaposition::Above);
    /// ```
    #[must_use]
    pub const fn from_sign(value: i64) -> Self {
        match value.signum() {
            -1 => Self::Below,
            0 => Self::Disabled,
            _ => Self::Above,
        }
    }

    const fn offset(self) -> Option<i32> {
        match self {
            Self::Disabled => None,
            Self::Below => Some(-1),
            Self::Above => Some(1),
        }
    }
}

impl Context {
    /// Registers a prefix operator, replacing any operator with the same
    /// character.
    pub fn register_unary(&mut self,
                          identifier: char,
                          callback: UnaryFn,
                          precedence: i32,
                          associativity: Associativity,
                          title: &str,
                          description: &str) {
        let op = UnaryOperator { identifier,
                                 callback,
                                 precedence,
                                 associativity };
        self.unary_operators.insert(identifier, Registered::new(op, title, description));
    }

    /// Registers an infix operator, replacing any operator with the same
    /// identifier.
    ///
    /// The identifier must be a non-empty run of symbol characters; an empty
    /// identifier is reserved for the juxtaposition operator.
    pub fn register_binary(&mut self,
                           identifier: &str,
                           callback: BinaryFn,
                           precedence: i32,
                           associativity: Associativity,
                           title: &str,
                           description: &str) {
        debug_assert!(!identifier.is_empty(), "binary operators need an identifier");
        let op = BinaryOperator { identifier: identifier.to_string(),
                                  callback,
                                  precedence,
                                  associativity };
        self.binary_operators
            .insert(identifier.to_string(), Registered::new(Rc::new(op), title, description));
    }

    /// Registers a function, replacing any function with the same name.
    pub fn register_function(&mut self,
                             identifier: &str,
                             callback: FunctionFn,
                             arity: Arity,
                             title: &str,
                             description: &str) {
        let func = Function { identifier: identifier.to_string(),
                              callback,
                              arity };
        self.functions
            .insert(identifier.to_string(), Registered::new(Rc::new(func), title, description));
    }

    /// Registers a named constant.
    ///
    /// Any free variables of an unfinished expression are discarded.
    pub fn register_constant(&mut self,
                             identifier: &str,
                             value: bool,
                             title: &str,
                             description: &str) {
        self.variables.define_constant(identifier, value, title, description);
    }

    /// Configures the juxtaposition operator.
    ///
    /// The synthesized operator reuses the callback of the reference operator,
    /// sits one precedence level below or above it and is left-associative.
    /// If the reference operator is not registered juxtaposition stays
    /// disabled.
    pub fn set_juxtaposition(&mut self, mode: Juxtaposition) {
        self.juxtaposition = mode.offset().and_then(|offset| {
            let Some(reference) = self.binary_operators.get(builtin::JUXTAPOSITION_REFERENCE)
            else {
                log::warn!("juxtaposition needs the '{}' operator, which is not registered",
                           builtin::JUXTAPOSITION_REFERENCE);
                return None;
            };
            Some(Rc::new(BinaryOperator { identifier:    String::new(),
                                          callback:      reference.item.callback,
                                          precedence:    reference.item.precedence + offset,
                                          associativity: Associativity::Left, }))
        });
    }

    /// Returns the juxtaposition operator, if enabled.
    #[must_use]
    pub fn juxtaposition(&self) -> Option<&BinaryOperator> {
        self.juxtaposition.as_deref()
    }

    /// Looks up a prefix operator.
    #[must_use]
    pub fn unary_operator(&self, identifier: char) -> Option<&UnaryOperator> {
        self.unary_operators.get(&identifier).map(|entry| &entry.item)
    }

    /// Looks up an infix operator.
    #[must_use]
    pub fn binary_operator(&self, identifier: &str) -> Option<&Rc<BinaryOperator>> {
        self.binary_operators.get(identifier).map(|entry| &entry.item)
    }

    /// Looks up a function.
    #[must_use]
    pub fn function(&self, identifier: &str) -> Option<&Rc<Function>> {
        self.functions.get(identifier).map(|entry| &entry.item)
    }

    /// Prefix operators in registration order.
    pub fn unary_operators(&self) -> impl Iterator<Item = &Registered<UnaryOperator>> {
        self.unary_operators.values()
    }

    /// Infix operators in registration order.
    pub fn binary_operators(&self) -> impl Iterator<Item = &Registered<Rc<BinaryOperator>>> {
        self.binary_operators.values()
    }

    /// Functions in registration order.
    pub fn functions(&self) -> impl Iterator<Item = &Registered<Rc<Function>>> {
        self.functions.values()
    }
}
