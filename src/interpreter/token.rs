use std::{fmt, rc::Rc};

use crate::interpreter::variables::VariableId;

/// Callback of a unary operator.
pub type UnaryFn = fn(bool) -> bool;
/// Callback of a binary operator; receives the left and right operand.
pub type BinaryFn = fn(bool, bool) -> bool;
/// Callback of a function; receives the arguments in call order.
pub type FunctionFn = fn(&[bool]) -> bool;

/// Tie-breaking rule for operators of equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a op b op c` groups as `(a op b) op c`.
    Left,
    /// `a op b op c` groups as `a op (b op c)`.
    Right,
    /// The result does not depend on the grouping, so the parser may pick
    /// either. This is a promise made at registration and is not checked.
    Any,
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
            Self::Any => write!(f, "Any"),
        }
    }
}

/// A prefix operator such as `!`.
#[derive(Debug, Clone, Copy)]
pub struct UnaryOperator {
    /// The character that spells the operator.
    pub identifier:    char,
    /// Applies the operator.
    pub callback:      UnaryFn,
    /// Binding strength; higher binds tighter.
    pub precedence:    i32,
    /// Tie-breaking rule at equal precedence.
    pub associativity: Associativity,
}

/// An infix operator such as `&` or `==`.
#[derive(Debug, Clone)]
pub struct BinaryOperator {
    /// The text that spells the operator. Empty for the juxtaposition
    /// operator, which has no surface syntax.
    pub identifier:    String,
    /// Applies the operator to the left and right operand.
    pub callback:      BinaryFn,
    /// Binding strength; higher binds tighter.
    pub precedence:    i32,
    /// Tie-breaking rule at equal precedence.
    pub associativity: Associativity,
}

impl BinaryOperator {
    /// Returns `true` for the synthesized juxtaposition operator.
    #[must_use]
    pub fn is_juxtaposition(&self) -> bool {
        self.identifier.is_empty()
    }
}

/// Specifies the allowed number of arguments for a function.
///
/// - `Exact(n)` means the function must receive exactly `n` arguments.
/// - `Between(min, max)` accepts any count in `min..=max`.
/// - `AtLeast(min)` has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// # Example
    /// ```
    /// use trtbl::interpreter::token::Arity;
    ///
    /// assert!(Arity::Exact(2).check(2));
    /// assert!(!Arity::Between(1, 3).check(4));
    /// assert!(Arity::AtLeast(1).check(100));
    /// ```
    #[must_use]
    pub const fn check(&self, n: usize) -> bool {
        match *self {
            Self::Exact(m) => n == m,
            Self::Between(min, max) => n >= min && n <= max,
            Self::AtLeast(min) => n >= min,
        }
    }

    /// The smallest accepted argument count.
    #[must_use]
    pub const fn min(&self) -> usize {
        match *self {
            Self::Exact(n) | Self::Between(n, _) | Self::AtLeast(n) => n,
        }
    }

    /// The largest accepted argument count, or `None` when unbounded.
    #[must_use]
    pub const fn max(&self) -> Option<usize> {
        match *self {
            Self::Exact(n) | Self::Between(_, n) => Some(n),
            Self::AtLeast(_) => None,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::Between(min, max) => write!(f, "{min}..={max}"),
            Self::AtLeast(min) => write!(f, "at least {min}"),
        }
    }
}

/// A named function called as `NAME(arg, ...)`.
#[derive(Debug, Clone)]
pub struct Function {
    /// The function name.
    pub identifier: String,
    /// Applies the function to its arguments in call order.
    pub callback:   FunctionFn,
    /// Accepted argument counts.
    pub arity:      Arity,
}

/// Represents a resolved token of an expression.
///
/// Produced by the lexer after consulting the registries and consumed by the
/// parser. Grouping tokens never make it past the parser.
#[derive(Debug, Clone)]
pub enum Token {
    /// A literal such as `1`, or a named constant such as `true`.
    Value(bool),
    /// A free variable, referenced by its slot in the variable arena.
    Variable(VariableId),
    /// A prefix operator.
    UnaryOperator(UnaryOperator),
    /// An infix operator.
    BinaryOperator(Rc<BinaryOperator>),
    /// A function name together with its opening parenthesis.
    Function(Rc<Function>),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
}

impl Token {
    /// Returns `true` if the token can begin an operand.
    ///
    /// Used by the parser to detect two operands written next to each other.
    #[must_use]
    pub const fn starts_operand(&self) -> bool {
        matches!(self,
                 Self::Value(_)
                 | Self::Variable(_)
                 | Self::UnaryOperator(_)
                 | Self::Function(_)
                 | Self::LeftParen)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", u8::from(*v)),
            Self::Variable(id) => write!(f, "variable #{id}"),
            Self::UnaryOperator(op) => write!(f, "'{}'", op.identifier),
            Self::BinaryOperator(op) => write!(f, "'{}'", op.identifier),
            Self::Function(func) => write!(f, "'{}('", func.identifier),
            Self::LeftParen => write!(f, "'('"),
            Self::RightParen => write!(f, "')'"),
            Self::Comma => write!(f, "','"),
        }
    }
}
