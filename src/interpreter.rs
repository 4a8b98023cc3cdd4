/// The context module owns all interpreter state.
///
/// A `Context` holds the operator and function registries, the variable
/// arena and the per-run configuration, and exposes the per-expression entry
/// points `parse`, `evaluate`, `assign` and `reset`.
pub mod context;
/// The evaluator module executes postfix programs.
///
/// The evaluator walks a parsed expression once with an operand stack and
/// produces a single boolean. It is the only source of internal errors.
pub mod evaluator;
/// The lexer module tokenizes expressions.
///
/// The lexer reads the raw expression text and produces a sequence of
/// tokens: literals, constants and variables, operators, function calls and
/// grouping tokens. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Splits the input into lexemes with `logos`.
/// - Resolves identifiers and operator symbols against the registries.
/// - Creates free variables for unknown identifiers.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module converts tokens into postfix order.
///
/// The parser runs the shunting-yard algorithm over the lexer's tokens and
/// produces a postfix program that can be evaluated any number of times.
///
/// # Responsibilities
/// - Orders operators by precedence and associativity.
/// - Handles parentheses, function argument lists and juxtaposition.
/// - Validates argument counts and operand placement.
pub mod parser;
/// Registration of operators, functions and constants.
pub mod registry;
/// The token model shared by the lexer and parser.
pub mod token;
/// Storage for named constants and free variables.
pub mod variables;
