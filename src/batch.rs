use std::io::{BufRead, Write};

use crate::{
    error::Error,
    interpreter::context::Context,
    table::format::TableFormat,
    write_tabulation,
};

/// Expressions read one per line from a reader.
///
/// Blank lines are skipped and a trailing `\r` is dropped. A line that is not
/// valid UTF-8 yields `Error::Encoding` and reading continues with the next
/// line. A read failure yields `Error::Io` once and ends the iteration.
pub struct ExpressionLines<R> {
    reader: R,
    line:   usize,
    done:   bool,
}

impl<R: BufRead> ExpressionLines<R> {
    pub const fn new(reader: R) -> Self {
        Self { reader,
               line: 0,
               done: false }
    }
}

impl<R: BufRead> Iterator for ExpressionLines<R> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let mut bytes = Vec::new();
            match self.reader.read_until(b'\n', &mut bytes) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    if bytes.last() == Some(&b'\n') {
                        bytes.pop();
                    }
                    if bytes.last() == Some(&b'\r') {
                        bytes.pop();
                    }
                    match String::from_utf8(bytes) {
                        Ok(text) if text.trim().is_empty() => {},
                        Ok(text) => return Some(Ok(text)),
                        Err(_) => return Some(Err(Error::Encoding { line: self.line })),
                    }
                },
                Err(e) => {
                    self.done = true;
                    return Some(Err(Error::Io(e)));
                },
            }
        }
        None
    }
}

/// Counts of a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Expressions attempted, including unreadable input lines.
    pub processed: usize,
    /// Expressions that failed.
    pub failed:    usize,
}

impl BatchSummary {
    /// Returns `true` if every expression produced its table.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Writes the table of every expression in order.
///
/// A failing expression is reported on `err` as `expression: error` and
/// processing continues with the next one. Consecutive tables are separated
/// by a blank line.
///
/// # Example
/// ```
/// use trtbl::{batch::run_batch, interpreter::context::Context, table::format::TableFormat};
///
/// let expressions = ["a", "(b", "!c"].map(|e| Ok(e.to_string()));
/// let (mut out, mut err) = (Vec::new(), Vec::new());
/// let summary =
///     run_batch(&mut Context::new(), expressions, &TableFormat::default(), &mut out, &mut err);
///
/// assert_eq!(summary.failed, 1);
/// assert_eq!(String::from_utf8(out).unwrap(), "a\n0 = 0\n1 = 1\n\nc\n0 = 1\n1 = 0\n");
/// assert!(String::from_utf8(err).unwrap().starts_with("(b: "));
/// ```
pub fn run_batch<I, W, E>(context: &mut Context,
                          expressions: I,
                          format: &TableFormat,
                          out: &mut W,
                          err: &mut E)
                          -> BatchSummary
    where I: IntoIterator<Item = Result<String, Error>>,
          W: Write,
          E: Write
{
    let mut summary = BatchSummary::default();
    let mut written = false;

    for expression in expressions {
        summary.processed += 1;

        let source = match expression {
            Ok(source) => source,
            Err(e) => {
                summary.failed += 1;
                report(err, &e.to_string());
                continue;
            },
        };

        let result = context.tabulate(&source)
                            .map_err(Error::from)
                            .and_then(|tabulation| {
                                if written {
                                    writeln!(out)?;
                                }
                                written = true;
                                write_tabulation(tabulation, format, &mut *out)
                            });
        if let Err(e) = result {
            summary.failed += 1;
            report(err, &format!("{source}: {e}"));
        }
    }

    log::debug!("batch finished: {} processed, {} failed", summary.processed, summary.failed);
    summary
}

fn report<E: Write>(err: &mut E, message: &str) {
    if writeln!(err, "{message}").is_err() {
        log::warn!("failed to report: {message}");
    }
}
