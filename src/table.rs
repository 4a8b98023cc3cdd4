/// Plain-text rendering of truth tables.
///
/// Renders the header of variable names and one line per assignment with
/// configurable symbols for true and false and configurable separators.
pub mod format;

use crate::{
    error::{Error, InternalError, SyntaxError},
    interpreter::{context::Context, parser::ParsedExpression},
};

/// Odometer over every assignment of `n` booleans.
///
/// Starts with all digits `false` and counts in binary with the last digit
/// changing fastest, so the first variable is the most significant column.
/// With `n == 0` it yields exactly one empty assignment.
///
/// # Example
/// ```
/// use trtbl::table::Assignments;
///
/// let all: Vec<Vec<bool>> = Assignments::new(2).collect();
/// assert_eq!(all,
///            [[false, false], [false, true], [true, false], [true, true]]);
/// ```
#[derive(Debug, Clone)]
pub struct Assignments {
    digits: Vec<bool>,
    done:   bool,
}

impl Assignments {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self { digits: vec![false; n],
               done:   false, }
    }

    /// Moves to the next assignment. Returns `false` once every assignment
    /// has been visited.
    ///
    /// Scans from the last digit backwards for the first digit below its
    /// maximum, increments it and resets every digit after it.
    fn advance(&mut self) -> bool {
        let Some(position) = self.digits.iter().rposition(|digit| !digit) else {
            return false;
        };
        self.digits[position] = true;
        self.digits[position + 1..].fill(false);
        true
    }
}

impl Iterator for Assignments {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.digits.clone();
        self.done = !self.advance();
        Some(current)
    }
}

/// One line of a truth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Values of the free variables, in column order.
    pub inputs: Vec<bool>,
    /// Value of the expression for those inputs.
    pub output: bool,
}

/// A complete truth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    /// Free variables in first-seen order.
    pub variables: Vec<String>,
    /// One row per assignment, in binary counting order.
    pub rows:      Vec<Row>,
}

/// Lazily evaluates an expression for every assignment of its free
/// variables.
///
/// Created by [`Context::tabulate`]. Holds the context mutably for its whole
/// lifetime and resets the variable arena when dropped, so the free variables
/// of one expression never leak into the next.
pub struct Tabulation<'a> {
    context:     &'a mut Context,
    parsed:      ParsedExpression,
    variables:   Vec<String>,
    assignments: Assignments,
}

impl Tabulation<'_> {
    /// Free variables in first-seen order.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

impl Iterator for Tabulation<'_> {
    type Item = Result<Row, InternalError>;

    fn next(&mut self) -> Option<Self::Item> {
        let inputs = self.assignments.next()?;
        let output = self.context
                         .assign(&inputs)
                         .and_then(|()| self.context.evaluate(&self.parsed));
        Some(output.map(|output| Row { inputs, output }))
    }
}

impl Drop for Tabulation<'_> {
    fn drop(&mut self) {
        self.context.reset();
    }
}

impl Context {
    /// Parses an expression and prepares the enumeration of its rows.
    ///
    /// # Errors
    /// Returns a `SyntaxError` if the expression is malformed; any variables
    /// created before the failure are dropped.
    pub fn tabulate(&mut self, source: &str) -> Result<Tabulation<'_>, SyntaxError> {
        let parsed = match self.parse(source) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.reset();
                return Err(e);
            },
        };
        let variables: Vec<String> = self.variables.free().map(str::to_string).collect();
        log::debug!("'{source}' has {} free variable(s): {variables:?}", variables.len());

        Ok(Tabulation { assignments: Assignments::new(variables.len()),
                        context: self,
                        parsed,
                        variables })
    }

    /// Computes the full truth table of an expression.
    ///
    /// The context is returned to its pre-expression state afterwards,
    /// whether or not this succeeds.
    ///
    /// # Errors
    /// Returns `Error::Syntax` for malformed input and `Error::Internal` if
    /// evaluation fails.
    ///
    /// # Example
    /// ```
    /// use trtbl::{interpreter::context::Context, table::Row};
    ///
    /// let mut context = Context::new();
    /// let table = context.truth_table("true | x").unwrap();
    ///
    /// assert_eq!(table.variables, ["x"]);
    /// assert_eq!(table.rows,
    ///            [Row { inputs: vec![false], output: true },
    ///             Row { inputs: vec![true], output: true }]);
    /// ```
    pub fn truth_table(&mut self, source: &str) -> Result<TruthTable, Error> {
        let tabulation = self.tabulate(source)?;
        let variables = tabulation.variables().to_vec();
        let rows = tabulation.collect::<Result<Vec<_>, _>>()?;
        Ok(TruthTable { variables, rows })
    }
}
