/// Syntax errors.
///
/// Defines all error types that can occur while lexing and parsing an
/// expression. Syntax errors include unknown symbols, invalid literals,
/// unbalanced parentheses, wrong argument counts and operands placed next to
/// each other while juxtaposition is disabled.
pub mod syntax_error;
/// Internal errors.
///
/// Contains the errors the postfix evaluator raises when the instruction
/// sequence does not reduce to exactly one value. These indicate a defect in
/// the parser or a misuse of the evaluation API, never bad user input.
pub mod internal_error;

pub use internal_error::InternalError;
pub use syntax_error::SyntaxError;
use thiserror::Error;

/// Any failure that can abort the processing of a single expression.
#[derive(Debug, Error)]
pub enum Error {
    /// The expression could not be lexed or parsed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The parsed expression did not evaluate cleanly.
    #[error(transparent)]
    Internal(#[from] InternalError),
    /// Writing the table failed.
    #[error("Error while writing output: {0}.")]
    Io(#[from] std::io::Error),
    /// An input line is not valid UTF-8.
    #[error("Error: Input line {line} is not valid UTF-8.")]
    Encoding {
        /// 1-based number of the line.
        line: usize,
    },
    /// The listing filter is not a valid regular expression.
    #[error("Error in listing pattern: {0}")]
    Pattern(#[from] regex::Error),
}
