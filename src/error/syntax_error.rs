use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant carries the byte column of the offending input so the caller
/// can point at it.
pub enum SyntaxError {
    /// A character that starts no token.
    #[error("Error at column {column}: Unexpected character '{character}'.")]
    UnexpectedCharacter {
        /// The character encountered.
        character: char,
        /// The column where the error occurred.
        column:    usize,
    },
    /// A numeric literal the literal parser rejected.
    #[error("Error at column {column}: Invalid literal '{literal}'.")]
    InvalidLiteral {
        /// The literal as written.
        literal: String,
        /// The column where the error occurred.
        column:  usize,
    },
    /// A symbol that is not a registered operator in its position.
    #[error("Error at column {column}: Unknown operator '{symbol}'.")]
    UnknownOperator {
        /// The remaining symbol run that could not be matched.
        symbol: String,
        /// The column where the error occurred.
        column: usize,
    },
    /// An operator, comma or closing parenthesis appeared where an operand was
    /// required.
    #[error("Error at column {column}: Expected an operand but found {found}.")]
    MissingOperand {
        /// Description of what was found instead.
        found:  String,
        /// The column where the error occurred.
        column: usize,
    },
    /// The expression contains no tokens.
    #[error("Error: Expression is empty.")]
    EmptyExpression,
    /// A parenthesis without a partner.
    #[error("Error at column {column}: Unmatched parenthesis.")]
    UnmatchedParenthesis {
        /// The column of the unmatched parenthesis.
        column: usize,
    },
    /// A comma outside of a function argument list.
    #[error("Error at column {column}: Comma outside of a function call.")]
    UnexpectedComma {
        /// The column where the error occurred.
        column: usize,
    },
    /// A function was called with an argument count outside its bounds.
    #[error("Error at column {column}: Function '{function}' expects {expected} argument(s) but got {found}.")]
    ArgumentCountMismatch {
        /// The function name.
        function: String,
        /// Human readable arity, e.g. `2` or `1..=3`.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// The column of the function name.
        column:   usize,
    },
    /// Two operands follow each other and no juxtaposition operator is
    /// configured.
    #[error("Error at column {column}: Missing operator between operands (juxtaposition is disabled).")]
    JuxtapositionDisabled {
        /// The column of the second operand.
        column: usize,
    },
}
