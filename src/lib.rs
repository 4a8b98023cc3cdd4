//! # trtbl
//!
//! trtbl prints the truth table of a boolean expression written in a small
//! infix language. It lexes and parses the expression once into postfix
//! form, discovers the free variables, and evaluates the expression for every
//! assignment of those variables.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    interpreter::context::Context,
    table::{Tabulation, TruthTable, format::TableFormat},
};

/// Processes a sequence of expressions, reporting failures and continuing.
pub mod batch;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing
/// or evaluating an expression, plus the I/O and pattern errors of the
/// front end.
///
/// # Responsibilities
/// - Separates user-facing syntax errors from internal evaluator errors.
/// - Attaches column numbers and detailed messages for context.
/// - Integrates with `std::error::Error` through `thiserror`.
pub mod error;
/// Orchestrates lexing, parsing and evaluation.
///
/// This module ties together the token model, registries, lexer, parser and
/// evaluator, and exposes the interpreter context through which all of them
/// are used.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator and
///   registries.
/// - Provides entry points for parsing and evaluating expressions.
/// - Manages the variable arena shared by successive expressions.
pub mod interpreter;
/// Lists the installed operators, functions and constants.
pub mod listing;
/// Enumerates assignments and builds truth tables.
///
/// This module drives repeated evaluation of a parsed expression over every
/// assignment of its free variables and renders the resulting rows.
pub mod table;

/// Returns the truth table of an expression using the builtin operators.
///
/// A fresh context is created for the call.
///
/// # Errors
/// Returns an error if the expression is malformed.
///
/// # Examples
/// ```
/// use trtbl::truth_table;
///
/// let table = truth_table("!a & b").unwrap();
/// assert_eq!(table.variables, ["a", "b"]);
/// let outputs: Vec<bool> = table.rows.iter().map(|row| row.output).collect();
/// assert_eq!(outputs, [false, true, false, false]);
///
/// // Unbalanced parentheses are rejected.
/// assert!(truth_table("(a | b").is_err());
/// ```
pub fn truth_table(source: &str) -> Result<TruthTable, error::Error> {
    Context::new().truth_table(source)
}

/// Writes the truth table of an expression.
///
/// The header is written first and each row as soon as it is evaluated. The
/// context's free variables are dropped afterwards, also on failure.
///
/// # Errors
/// Returns an error if the expression is malformed, evaluation fails or
/// writing fails.
///
/// # Examples
/// ```
/// use trtbl::{interpreter::context::Context, table::format::TableFormat, write_truth_table};
///
/// let mut out = Vec::new();
/// write_truth_table(&mut Context::new(), "a ^ b", &TableFormat::default(), &mut out).unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(),
///            "a b\n0 0 = 0\n0 1 = 1\n1 0 = 1\n1 1 = 0\n");
/// ```
pub fn write_truth_table<W: Write>(context: &mut Context,
                                   source: &str,
                                   format: &TableFormat,
                                   out: &mut W)
                                   -> Result<(), error::Error> {
    let tabulation = context.tabulate(source)?;
    write_tabulation(tabulation, format, out)
}

/// Writes the header and every row of a prepared tabulation.
pub(crate) fn write_tabulation<W: Write>(tabulation: Tabulation<'_>,
                                         format: &TableFormat,
                                         out: &mut W)
                                         -> Result<(), error::Error> {
    let widths = format.column_widths(tabulation.variables());
    format.write_header(out, tabulation.variables(), &widths)?;

    for row in tabulation {
        format.write_row(out, &row?, &widths)?;
    }

    Ok(())
}
