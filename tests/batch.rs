use std::io::Cursor;

use trtbl::{
    batch::{BatchSummary, ExpressionLines, run_batch},
    error::Error,
    interpreter::context::Context,
    table::format::TableFormat,
};

fn run(input: &[u8], extra: &[&str]) -> (BatchSummary, String, String) {
    let expressions = ExpressionLines::new(Cursor::new(input.to_vec()))
        .chain(extra.iter().map(|e| Ok((*e).to_string())));
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let summary =
        run_batch(&mut Context::new(), expressions, &TableFormat::default(), &mut out, &mut err);
    (summary,
     String::from_utf8(out).expect("output is UTF-8"),
     String::from_utf8(err).expect("errors are UTF-8"))
}

#[test]
fn invalid_utf8_line_does_not_stop_the_batch() {
    let (summary, out, err) = run(b"p\n\xff\nq\n", &["r"]);

    assert_eq!(summary, BatchSummary { processed: 4,
                                       failed:    1, });
    assert!(!summary.succeeded());
    assert_eq!(out, "p\n0 = 0\n1 = 1\n\nq\n0 = 0\n1 = 1\n\nr\n0 = 0\n1 = 1\n");
    assert_eq!(err, "Error: Input line 2 is not valid UTF-8.\n");
}

#[test]
fn failing_expression_is_reported_and_skipped() {
    let (summary, out, err) = run(b"a & (b\n\nx ^ y\r\n", &["2x", "!z"]);

    assert_eq!(summary.processed, 4);
    assert_eq!(summary.failed, 2);
    assert_eq!(out,
               "x y\n0 0 = 0\n0 1 = 1\n1 0 = 1\n1 1 = 0\n\nz\n0 = 1\n1 = 0\n");

    let lines: Vec<&str> = err.lines().collect();
    assert_eq!(lines,
               ["a & (b: Error at column 5: Unmatched parenthesis.",
                "2x: Error at column 1: Invalid literal '2x'."]);
}

#[test]
fn variables_do_not_leak_across_the_batch() {
    let (summary, out, _) = run(b"x & y\nx\n", &[]);

    assert!(summary.succeeded());
    assert!(out.ends_with("\n\nx\n0 = 0\n1 = 1\n"));
}

#[test]
fn blank_input_processes_nothing() {
    let (summary, out, err) = run(b"\n  \n\r\n", &[]);

    assert_eq!(summary, BatchSummary::default());
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn lines_are_trimmed_of_line_endings() {
    let lines: Vec<Result<String, Error>> =
        ExpressionLines::new(Cursor::new(b"a | b\r\nc".to_vec())).collect();

    let texts: Vec<&str> = lines.iter().map(|line| line.as_deref().unwrap()).collect();
    assert_eq!(texts, ["a | b", "c"]);
}
