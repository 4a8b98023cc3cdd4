use std::io::{self, Write};

use crate::table::Row;

/// Symbols and separators used to render a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFormat {
    /// Printed for `true`.
    pub true_symbol:      String,
    /// Printed for `false`.
    pub false_symbol:     String,
    /// Printed between input columns.
    pub input_separator:  String,
    /// Printed between the inputs and the result.
    pub output_separator: String,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self { true_symbol:      "1".to_string(),
               false_symbol:     "0".to_string(),
               input_separator:  " ".to_string(),
               output_separator: " = ".to_string(), }
    }
}

impl TableFormat {
    fn symbol(&self, value: bool) -> &str {
        if value { &self.true_symbol } else { &self.false_symbol }
    }

    /// Width of each input column: the longest of the variable name and the
    /// two symbols.
    #[must_use]
    pub fn column_widths(&self, variables: &[String]) -> Vec<usize> {
        let symbol_width = self.true_symbol
                               .chars()
                               .count()
                               .max(self.false_symbol.chars().count());
        variables.iter()
                 .map(|name| name.chars().count().max(symbol_width))
                 .collect()
    }

    /// Writes the line of variable names. Nothing is written for an
    /// expression without free variables.
    ///
    /// Names are separated by as many spaces as the input separator has
    /// characters, so they stay above their columns whatever the separator.
    ///
    /// # Errors
    /// Propagates write failures.
    pub fn write_header<W: Write>(&self,
                                  out: &mut W,
                                  variables: &[String],
                                  widths: &[usize])
                                  -> io::Result<()> {
        if variables.is_empty() {
            return Ok(());
        }
        let cells: Vec<String> = variables.iter()
                                          .zip(widths)
                                          .map(|(name, width)| format!("{name:<width$}"))
                                          .collect();
        let gap = " ".repeat(self.input_separator.chars().count());
        writeln!(out, "{}", cells.join(&gap).trim_end())
    }

    /// Writes one row: the padded inputs, the output separator and the
    /// result. A row without inputs is just the result.
    ///
    /// # Errors
    /// Propagates write failures.
    ///
    /// # Example
    /// ```
    /// use trtbl::table::{Row, format::TableFormat};
    ///
    /// let format = TableFormat::default();
    /// let widths = format.column_widths(&["a".to_string(), "bb".to_string()]);
    /// let mut out = Vec::new();
    ///
    /// format.write_row(&mut out, &Row { inputs: vec![true, false], output: true }, &widths)
    ///       .unwrap();
    /// assert_eq!(String::from_utf8(out).unwrap(), "1 0  = 1\n");
    /// ```
    pub fn write_row<W: Write>(&self, out: &mut W, row: &Row, widths: &[usize]) -> io::Result<()> {
        let result = self.symbol(row.output);
        if row.inputs.is_empty() {
            return writeln!(out, "{result}");
        }
        let cells: Vec<String> = row.inputs
                                    .iter()
                                    .zip(widths)
                                    .map(|(value, width)| format!("{:<width$}", self.symbol(*value)))
                                    .collect();
        writeln!(out,
                 "{}{}{result}",
                 cells.join(&self.input_separator),
                 self.output_separator)
    }
}
