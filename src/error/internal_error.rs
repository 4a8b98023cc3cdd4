use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors the postfix evaluator can raise.
///
/// None of these can occur for an expression obtained from
/// [`Context::parse`](crate::interpreter::context::Context::parse) and
/// evaluated before the context is reset.
pub enum InternalError {
    /// An instruction needed more operands than the stack held.
    #[error("Internal error: Stack underflow at '{instruction}'.")]
    StackUnderflow {
        /// The instruction that underflowed.
        instruction: String,
    },
    /// More than one value remained after the last instruction.
    #[error("Internal error: {count} operands left on the stack.")]
    LeftoverOperands {
        /// The number of values remaining.
        count: usize,
    },
    /// The instruction sequence produced no value.
    #[error("Internal error: Evaluation produced no value.")]
    EmptyStack,
    /// A call carried an argument count outside the function's arity.
    #[error("Internal error: Call of '{function}' with {found} argument(s), expected {expected}.")]
    ArgumentCount {
        /// The function name.
        function: String,
        /// Human readable arity.
        expected: String,
        /// The argument count of the call.
        found:    usize,
    },
    /// A variable was read before a value was assigned to it.
    #[error("Internal error: Variable '{name}' is unbound.")]
    UnboundVariable {
        /// The variable name, or its slot index when the slot no longer
        /// exists.
        name: String,
    },
    /// An assignment did not provide exactly one value per free variable.
    #[error("Internal error: Expected {expected} value(s) for the free variables but got {found}.")]
    AssignmentLength {
        /// The number of free variables.
        expected: usize,
        /// The number of values supplied.
        found:    usize,
    },
}
