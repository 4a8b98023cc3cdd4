use std::fs;

use trtbl::{interpreter::context::Context, table::format::TableFormat, write_truth_table};
use walkdir::WalkDir;

#[test]
fn table_fixtures_match() {
    let mut count = 0;
    let mut context = Context::new();

    for entry in
        WalkDir::new("tests/tables").into_iter()
                                    .filter_map(Result::ok)
                                    .filter(|e| e.path().extension().is_some_and(|ext| ext == "table"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let (expression, expected) = split_fixture(&content).unwrap_or_else(|| {
                                                                panic!("{path:?} has no '---' line")
                                                            });

        let mut out = Vec::new();
        if let Err(e) = write_truth_table(&mut context, expression, &TableFormat::default(), &mut out)
        {
            panic!("Fixture {path:?} failed:\n{expression}\nError: {e:?}");
        }
        let actual = String::from_utf8(out).expect("output is UTF-8");
        assert_eq!(actual, expected, "table of {expression:?} in {path:?}");
        assert_eq!(context.variables.free_count(), 0, "{path:?} leaked variables");
        count += 1;
    }

    assert!(count > 0, "No table fixtures found in tests/tables");
}

/// Splits a fixture into the expression (first line) and the expected output
/// (everything after the `---` line).
fn split_fixture(content: &str) -> Option<(&str, &str)> {
    let (expression, expected) = content.split_once("\n---\n")?;
    Some((expression.trim(), expected))
}

#[test]
fn custom_symbols_and_separators() {
    let format = TableFormat { true_symbol:      "T".to_string(),
                               false_symbol:     "F".to_string(),
                               input_separator:  " | ".to_string(),
                               output_separator: " -> ".to_string(), };
    let mut out = Vec::new();
    write_truth_table(&mut Context::new(), "x | y", &format, &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(),
               "x   y\nF | F -> F\nF | T -> T\nT | F -> T\nT | T -> T\n");
}

#[test]
fn wide_symbols_widen_columns() {
    let format = TableFormat { true_symbol: "true".to_string(),
                               false_symbol: "false".to_string(),
                               ..TableFormat::default() };
    let mut out = Vec::new();
    write_truth_table(&mut Context::new(), "!p", &format, &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(),
               "p\nfalse = true\ntrue  = false\n");
}

#[test]
fn failed_table_leaves_context_clean() {
    let mut context = Context::new();
    let mut out = Vec::new();

    assert!(write_truth_table(&mut context, "a & (b", &TableFormat::default(), &mut out).is_err());
    assert!(out.is_empty());
    assert_eq!(context.variables.free_count(), 0);

    write_truth_table(&mut context, "b", &TableFormat::default(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "b\n0 = 0\n1 = 1\n");
}

#[test]
fn header_aligns_with_symbol_separator() {
    let format = TableFormat { input_separator: ",".to_string(),
                               ..TableFormat::default() };
    let mut out = Vec::new();
    write_truth_table(&mut Context::new(), "a & bc", &format, &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(),
               "a bc\n0,0  = 0\n0,1  = 0\n1,0  = 0\n1,1  = 1\n");
}
