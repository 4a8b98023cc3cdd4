use std::io::Write;

use regex::Regex;

use crate::{error::Error, interpreter::context::Context};

/// Writes the installed operators, functions and constants whose identifier,
/// title or description fully matches `pattern`.
///
/// Output has four sections (unary operators, binary operators, functions,
/// constants), each followed by a blank line. Unbounded argument counts print
/// as `-`.
///
/// # Errors
/// Returns `Error::Pattern` for an invalid regular expression and
/// `Error::Io` if writing fails.
///
/// # Example
/// ```
/// use trtbl::{interpreter::context::Context, listing::write_listing};
///
/// let mut out = Vec::new();
/// write_listing(&Context::new(), "XNOR", &mut out).unwrap();
///
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("XNOR"));
/// assert!(!text.contains("NAND"));
/// ```
pub fn write_listing<W: Write>(context: &Context, pattern: &str, out: &mut W) -> Result<(), Error> {
    let regex = Regex::new(&format!("^(?:{pattern})$"))?;
    let matches = |identifier: &str, title: &str, description: &str| {
        regex.is_match(identifier) || regex.is_match(title) || regex.is_match(description)
    };

    writeln!(out, "Unary operators")?;
    for entry in context.unary_operators() {
        let op = &entry.item;
        if matches(&op.identifier.to_string(), &entry.title, &entry.description) {
            write_line(out,
                       &format!("  {:<5}{:<5}{:<9}{:<20}{}",
                                op.identifier,
                                op.precedence,
                                op.associativity.to_string(),
                                entry.title,
                                entry.description))?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Binary operators")?;
    for entry in context.binary_operators() {
        let op = &entry.item;
        if matches(&op.identifier, &entry.title, &entry.description) {
            write_line(out,
                       &format!("  {:<6}{:<5}{:<9}{:<25}{}",
                                op.identifier,
                                op.precedence,
                                op.associativity.to_string(),
                                entry.title,
                                entry.description))?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Functions")?;
    for entry in context.functions() {
        let function = &entry.item;
        if matches(&function.identifier, &entry.title, &entry.description) {
            let max = function.arity
                              .max()
                              .map_or_else(|| "-".to_string(), |max| max.to_string());
            write_line(out,
                       &format!("  {:<15}{:<5}{:<5}{:<27}{}",
                                function.identifier,
                                function.arity.min(),
                                max,
                                entry.title,
                                entry.description))?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Constants")?;
    for (name, slot) in context.variables.constants() {
        if matches(name, &slot.title, &slot.description) {
            write_line(out, &format!("  {:<18}{:<31}{}", name, slot.title, slot.description))?;
        }
    }
    writeln!(out)?;

    Ok(())
}

fn write_line<W: Write>(out: &mut W, line: &str) -> std::io::Result<()> {
    writeln!(out, "{}", line.trim_end())
}
