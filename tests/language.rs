use trtbl::{
    error::{Error, InternalError, SyntaxError},
    interpreter::{
        context::Context,
        parser::{Instruction, ParsedExpression, to_postfix},
        registry::Juxtaposition,
        token::{Arity, Associativity, Token},
        variables::{VariableId, Variables},
    },
    listing::write_listing,
    table::TruthTable,
    truth_table,
};

fn assert_success(src: &str) -> TruthTable {
    truth_table(src).unwrap_or_else(|e| panic!("Expression {src:?} failed: {e}"))
}

fn assert_failure(context: &mut Context, src: &str) -> SyntaxError {
    match context.truth_table(src) {
        Err(Error::Syntax(e)) => e,
        other => panic!("Expression {src:?} should be a syntax error, got {other:?}"),
    }
}

fn outputs(src: &str) -> Vec<bool> {
    assert_success(src).rows.iter().map(|row| row.output).collect()
}

fn postfix(context: &mut Context, src: &str) -> String {
    let parsed = context.parse(src)
                        .unwrap_or_else(|e| panic!("Expression {src:?} failed: {e}"));
    context.reset();
    parsed.to_string()
}

fn bits(n: usize, width: usize) -> Vec<bool> {
    (0..width).rev().map(|shift| (n >> shift) & 1 == 1).collect()
}

#[test]
fn not_and_scenario() {
    let table = assert_success("!a & b");
    assert_eq!(table.variables, ["a", "b"]);

    let rows: Vec<(Vec<bool>, bool)> =
        table.rows.into_iter().map(|row| (row.inputs, row.output)).collect();
    assert_eq!(rows,
               [(vec![false, false], false),
                (vec![false, true], true),
                (vec![true, false], false),
                (vec![true, true], false)]);
}

#[test]
fn constants_are_not_free() {
    let table = assert_success("true | x");
    assert_eq!(table.variables, ["x"]);
    assert_eq!(outputs("true | x"), [true, true]);

    assert_eq!(assert_success("T & H & !F & !low").variables, Vec::<String>::new());
}

#[test]
fn expression_without_free_variables_has_one_row() {
    let table = assert_success("T ^ (F | 1)");
    assert!(table.variables.is_empty());
    assert_eq!(table.rows.len(), 1);
    assert!(table.rows[0].inputs.is_empty());
    assert!(!table.rows[0].output);
}

#[test]
fn constant_expressions_are_deterministic() {
    let mut context = Context::new();
    let first = context.truth_table("NOR(F, 0) == (1 & high)").unwrap();
    context.truth_table("x & y | z").unwrap();
    let second = context.truth_table("NOR(F, 0) == (1 & high)").unwrap();

    assert_eq!(first, second);
    assert!(first.rows[0].output);
}

#[test]
fn enumeration_counts_in_binary() {
    let table = assert_success("a | b | c | d | e");
    assert_eq!(table.variables, ["a", "b", "c", "d", "e"]);
    assert_eq!(table.rows.len(), 32);

    for (n, row) in table.rows.iter().enumerate() {
        assert_eq!(row.inputs, bits(n, 5), "row {n}");
        assert_eq!(row.output, n != 0);
    }
}

#[test]
fn free_variables_keep_first_seen_order() {
    let table = assert_success("zeta & alpha | zeta ^ mid");
    assert_eq!(table.variables, ["zeta", "alpha", "mid"]);
}

#[test]
fn and_binds_tighter_than_or() {
    let mut context = Context::new();
    assert_eq!(postfix(&mut context, "a | b & c"), "a b c & |");
    assert_eq!(postfix(&mut context, "a & b | c"), "a b & c |");
    assert_eq!(postfix(&mut context, "a | b ^ c & d"), "a b c d & ^ |");

    for (n, output) in outputs("a | b & c").into_iter().enumerate() {
        let inputs = bits(n, 3);
        assert_eq!(output, inputs[0] | (inputs[1] & inputs[2]));
    }
}

#[test]
fn comparison_binds_tighter_than_connectives() {
    let mut context = Context::new();
    assert_eq!(postfix(&mut context, "a & b == c"), "a b c == &");
}

#[test]
fn left_associative_ties_group_left() {
    let mut context = Context::new();
    assert_eq!(postfix(&mut context, "a == b != c"), "a b == c !=");
    assert_eq!(postfix(&mut context, "a != b == c"), "a b != c ==");
}

#[test]
fn right_associative_ties_group_right() {
    fn implies(x: bool, y: bool) -> bool {
        !x | y
    }

    let mut context = Context::new();
    context.register_binary("->", implies, 1, Associativity::Right, "Implies", "x -> y");
    assert_eq!(postfix(&mut context, "a -> b -> c"), "a b c -> ->");
    assert_eq!(postfix(&mut context, "!!a"), "a ! !");

    // a -> (b -> c) is false only for a = 1, b = 1, c = 0.
    let table = context.truth_table("a -> b -> c").unwrap();
    let falses: Vec<usize> =
        table.rows.iter().enumerate().filter(|(_, row)| !row.output).map(|(n, _)| n).collect();
    assert_eq!(falses, [6]);
}

#[test]
fn any_associative_connectives_match_both_groupings() {
    for op in ["&", "|", "^"] {
        let flat = outputs(&format!("a {op} b {op} c"));
        assert_eq!(flat, outputs(&format!("(a {op} b) {op} c")), "{op}");
        assert_eq!(flat, outputs(&format!("a {op} (b {op} c)")), "{op}");
    }
}

#[test]
fn prefix_operators_bind_tightest() {
    let mut context = Context::new();
    assert_eq!(postfix(&mut context, "!a & b"), "a ! b &");
    assert_eq!(postfix(&mut context, "~(a | b)"), "a b | ~");
    assert_eq!(outputs("!a == a"), [false, false]);
}

#[test]
fn operator_aliases() {
    assert_eq!(outputs("a * b"), outputs("a & b"));
    assert_eq!(outputs("a + b"), outputs("a | b"));
    assert_eq!(outputs("a / b"), outputs("a ^ b"));
    assert_eq!(outputs("~a"), outputs("!a"));
}

#[test]
fn symbol_runs_split_by_position() {
    assert_eq!(outputs("a&!b"), [false, false, true, false]);
    assert_eq!(outputs("a!=b"), [false, true, true, false]);
    assert_eq!(outputs("!!!a"), [true, false]);
}

#[test]
fn juxtaposition_acts_like_and() {
    assert_eq!(outputs("a b"), outputs("a & b"));
    assert_eq!(outputs("a b c"), outputs("a & b & c"));
    assert_eq!(outputs("a !b"), [false, false, true, false]);
    assert_eq!(outputs("a (b | c)"), outputs("a & (b | c)"));
    assert_eq!(outputs("(a)(b)"), outputs("a & b"));
    assert_eq!(outputs("a NOT(b)"), outputs("a & !b"));
    assert_eq!(outputs("1 a"), outputs("a"));
}

#[test]
fn juxtaposition_precedence_follows_configuration() {
    let mut context = Context::new();

    context.set_juxtaposition(Juxtaposition::Below);
    assert_eq!(postfix(&mut context, "a b & c"), "a b c & ·");
    assert_eq!(postfix(&mut context, "a & b c"), "a b & c ·");
    assert_eq!(postfix(&mut context, "a b | c"), "a b · c |");

    context.set_juxtaposition(Juxtaposition::Above);
    assert_eq!(postfix(&mut context, "a b & c"), "a b · c &");
    assert_eq!(postfix(&mut context, "a & b c"), "a b c · &");
    assert_eq!(postfix(&mut context, "a b == c"), "a b c == ·");

    context.set_juxtaposition(Juxtaposition::from_sign(-7));
    assert_eq!(postfix(&mut context, "a & b c"), "a b & c ·");
}

#[test]
fn juxtaposition_disabled_is_error() {
    let mut context = Context::new();
    context.set_juxtaposition(Juxtaposition::Disabled);

    assert_eq!(assert_failure(&mut context, "a b"),
               SyntaxError::JuxtapositionDisabled { column: 3 });
    assert_eq!(assert_failure(&mut context, "a (b)"),
               SyntaxError::JuxtapositionDisabled { column: 3 });
    assert!(context.truth_table("a & b").is_ok());
}

#[test]
fn juxtaposition_needs_reference_operator() {
    let mut context = Context::empty();
    context.set_juxtaposition(Juxtaposition::Below);
    assert!(context.juxtaposition().is_none());
}

#[test]
fn functions_check_arity() {
    let mut context = Context::new();

    assert_eq!(assert_failure(&mut context, "AND(a)"),
               SyntaxError::ArgumentCountMismatch { function: "AND".to_string(),
                                                    expected: "2".to_string(),
                                                    found:    1,
                                                    column:   1, });
    assert!(matches!(assert_failure(&mut context, "x | AND(a, b, c)"),
                     SyntaxError::ArgumentCountMismatch { found: 3, column: 5, .. }));
    assert!(matches!(assert_failure(&mut context, "NOT()"),
                     SyntaxError::ArgumentCountMismatch { found: 0, .. }));

    assert_eq!(context.truth_table("AND(a, b)").unwrap().rows.len(), 4);
    assert_eq!(context.variables.free_count(), 0);
}

#[test]
fn builtin_functions() {
    assert_eq!(outputs("NOT(a)"), [true, false]);
    assert_eq!(outputs("OR(a, b)"), [false, true, true, true]);
    assert_eq!(outputs("AND(a, b)"), [false, false, false, true]);
    assert_eq!(outputs("XOR(a, b)"), [false, true, true, false]);
    assert_eq!(outputs("NOR(a, b)"), [true, false, false, false]);
    assert_eq!(outputs("NAND(a, b)"), [true, true, true, false]);
    assert_eq!(outputs("XNOR(a, b)"), [true, false, false, true]);
    assert_eq!(outputs("OR(AND(a, b), NOT(a | b))"), outputs("a == b"));
}

#[test]
fn function_name_without_parenthesis_is_a_variable() {
    assert_eq!(assert_success("NOT & a").variables, ["NOT", "a"]);
}

#[test]
fn variadic_functions() {
    fn any(args: &[bool]) -> bool {
        args.iter().any(|arg| *arg)
    }
    fn majority(args: &[bool]) -> bool {
        args.iter().filter(|arg| **arg).count() * 2 > args.len()
    }

    let mut context = Context::new();
    context.register_function("ANY", any, Arity::AtLeast(0), "Any", "ANY(x, ...)");
    context.register_function("MAJ", majority, Arity::Between(3, 5), "Majority", "MAJ(x, y, z)");

    let table = context.truth_table("ANY()").unwrap();
    assert!(!table.rows[0].output);

    let table = context.truth_table("ANY(a, b, c, d)").unwrap();
    assert_eq!(table.rows.iter().filter(|row| !row.output).count(), 1);

    let table = context.truth_table("MAJ(a, b, c)").unwrap();
    let outputs: Vec<bool> = table.rows.iter().map(|row| row.output).collect();
    assert_eq!(outputs, [false, false, false, true, false, true, true, true]);

    assert!(matches!(assert_failure(&mut context, "MAJ(a, b)"),
                     SyntaxError::ArgumentCountMismatch { found: 2, .. }));
}

#[test]
fn numeric_literals() {
    assert_eq!(outputs("0 | 0.0 | .0 | 0e5"), [false]);
    assert_eq!(outputs("2.5"), [true]);
    assert_eq!(outputs("1e-3 & 10"), [true]);

    let mut context = Context::new();
    assert_eq!(assert_failure(&mut context, "2x"),
               SyntaxError::InvalidLiteral { literal: "2x".to_string(),
                                             column:  1, });
    assert!(matches!(assert_failure(&mut context, "a | 1.2.3"),
                     SyntaxError::InvalidLiteral { column: 5, .. }));
}

#[test]
fn custom_literal_parser() {
    fn binary_digits(text: &str) -> Option<bool> {
        match text {
            "0" => Some(false),
            "1" => Some(true),
            _ => None,
        }
    }

    let mut context = Context::new();
    context.set_literal_parser(binary_digits);
    assert!(context.truth_table("1 & 0").is_ok());
    assert!(matches!(assert_failure(&mut context, "2"), SyntaxError::InvalidLiteral { .. }));
}

#[test]
fn custom_unknown_identifier_handler() {
    fn case_insensitive(variables: &mut Variables, name: &str) -> VariableId {
        let upper = name.to_uppercase();
        variables.lookup(&upper).unwrap_or_else(|| variables.declare_free(&upper))
    }

    let mut context = Context::new();
    context.set_unknown_identifier_handler(case_insensitive);
    let table = context.truth_table("a ^ b ^ A").unwrap();
    assert_eq!(table.variables, ["A", "B"]);
}

#[test]
fn state_does_not_leak_between_expressions() {
    let mut context = Context::new();

    let first = context.truth_table("x & y").unwrap();
    assert_eq!(first.variables, ["x", "y"]);

    let second = context.truth_table("x").unwrap();
    assert_eq!(second.variables, ["x"]);
    assert_eq!(second.rows.len(), 2);
    assert_eq!(context.variables.free_count(), 0);
}

#[test]
fn failed_parse_rolls_back_variables() {
    let mut context = Context::new();

    assert!(context.truth_table("p & q & (r").is_err());
    assert_eq!(context.variables.free_count(), 0);
    assert_eq!(context.variables.lookup("p"), None);
    assert!(context.variables.lookup("true").is_some());

    assert_eq!(context.truth_table("r").unwrap().variables, ["r"]);
}

#[test]
fn syntax_errors() {
    let mut context = Context::new();

    assert_eq!(assert_failure(&mut context, ""), SyntaxError::EmptyExpression);
    assert_eq!(assert_failure(&mut context, "   "), SyntaxError::EmptyExpression);
    assert_eq!(assert_failure(&mut context, "(a"),
               SyntaxError::UnmatchedParenthesis { column: 1 });
    assert_eq!(assert_failure(&mut context, "a)"),
               SyntaxError::UnmatchedParenthesis { column: 2 });
    assert_eq!(assert_failure(&mut context, "OR(a, b"),
               SyntaxError::UnmatchedParenthesis { column: 1 });
    assert_eq!(assert_failure(&mut context, "a, b"),
               SyntaxError::UnexpectedComma { column: 2 });
    assert_eq!(assert_failure(&mut context, "(a, b)"),
               SyntaxError::UnexpectedComma { column: 3 });
    assert_eq!(assert_failure(&mut context, "a # b"),
               SyntaxError::UnexpectedCharacter { character: '#',
                                                  column:    3, });
    assert_eq!(assert_failure(&mut context, "a && b"),
               SyntaxError::UnknownOperator { symbol: "&".to_string(),
                                              column: 4, });
    assert_eq!(assert_failure(&mut context, "& a"),
               SyntaxError::UnknownOperator { symbol: "&".to_string(),
                                              column: 1, });
    assert_eq!(assert_failure(&mut context, "a $ b"),
               SyntaxError::UnknownOperator { symbol: "$".to_string(),
                                              column: 3, });
    assert!(matches!(assert_failure(&mut context, "a &"),
                     SyntaxError::MissingOperand { column: 3, .. }));
    assert!(matches!(assert_failure(&mut context, "!"), SyntaxError::MissingOperand { .. }));
    assert!(matches!(assert_failure(&mut context, "()"),
                     SyntaxError::MissingOperand { column: 2, .. }));
    assert!(matches!(assert_failure(&mut context, "NOT(a,)"),
                     SyntaxError::MissingOperand { column: 7, .. }));
    assert!(matches!(assert_failure(&mut context, "OR(a,,b)"),
                     SyntaxError::MissingOperand { column: 6, .. }));

    assert_eq!(context.variables.free_count(), 0);
}

#[test]
fn syntax_error_messages_name_the_column() {
    let e = truth_table("a @ b").unwrap_err();
    assert_eq!(e.to_string(), "Error at column 3: Unknown operator '@'.");
}

#[test]
fn evaluator_reports_malformed_programs() {
    let context = Context::new();
    let and = context.binary_operator("&").unwrap().clone();

    let underflow = ParsedExpression::from_instructions(vec![Instruction::Push(true),
                                                             Instruction::Binary(and)]);
    assert_eq!(context.evaluate(&underflow),
               Err(InternalError::StackUnderflow { instruction: "&".to_string() }));

    let leftover = ParsedExpression::from_instructions(vec![Instruction::Push(true),
                                                            Instruction::Push(false)]);
    assert_eq!(context.evaluate(&leftover),
               Err(InternalError::LeftoverOperands { count: 2 }));

    assert_eq!(context.evaluate(&ParsedExpression::default()),
               Err(InternalError::EmptyStack));

    let not = context.function("NOT").unwrap().clone();
    let call = ParsedExpression::from_instructions(vec![Instruction::Call { function:  not,
                                                                            arguments: 1, }]);
    assert_eq!(context.evaluate(&call),
               Err(InternalError::StackUnderflow { instruction: "NOT/1".to_string() }));

    let not = context.function("NOT").unwrap().clone();
    let bare_call =
        ParsedExpression::from_instructions(vec![Instruction::Call { function:  not,
                                                                     arguments: 0, }]);
    assert_eq!(context.evaluate(&bare_call),
               Err(InternalError::ArgumentCount { function: "NOT".to_string(),
                                                  expected: "1".to_string(),
                                                  found:    0, }));

    let and = context.function("AND").unwrap().clone();
    let extra_argument =
        ParsedExpression::from_instructions(vec![Instruction::Push(true),
                                                 Instruction::Push(true),
                                                 Instruction::Push(false),
                                                 Instruction::Call { function:  and,
                                                                     arguments: 3, }]);
    assert!(matches!(context.evaluate(&extra_argument),
                     Err(InternalError::ArgumentCount { found: 3, .. })));
}

#[test]
fn unbound_variables_are_internal_errors() {
    let mut context = Context::new();
    let parsed = context.parse("a | b").unwrap();

    assert_eq!(context.evaluate(&parsed),
               Err(InternalError::UnboundVariable { name: "a".to_string() }));
    assert_eq!(context.assign(&[true]),
               Err(InternalError::AssignmentLength { expected: 2,
                                                     found:    1, }));

    context.assign(&[false, true]).unwrap();
    assert_eq!(context.evaluate(&parsed), Ok(true));

    context.reset();
    assert!(context.evaluate(&parsed).is_err());
}

#[test]
fn parsed_expression_is_reused_across_assignments() {
    let mut context = Context::new();
    let parsed = context.parse("a ^ b").unwrap();

    let mut results = Vec::new();
    for values in [[false, false], [false, true], [true, false], [true, true]] {
        context.assign(&values).unwrap();
        results.push(context.evaluate(&parsed).unwrap());
    }
    context.reset();

    assert_eq!(results, [false, true, true, false]);
}

#[test]
fn listing_filters_by_full_match() {
    fn any(args: &[bool]) -> bool {
        args.iter().any(|arg| *arg)
    }

    let mut context = Context::new();
    context.register_function("ANY", any, Arity::AtLeast(0), "Any", "ANY(x, ...)");

    let mut out = Vec::new();
    write_listing(&context, "ANY|Xnor|!|H", &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text,
               "Unary operators\n  !    10   Right    Not                 !x\n\nBinary operators\n\n\
                Functions\n  XNOR           2    2    Xnor                       XNOR(x, y)\n  \
                ANY            0    -    Any                        ANY(x, ...)\n\n\
                Constants\n  H                 High                           Boolean value\n\n");
}

#[test]
fn listing_rejects_invalid_pattern() {
    let mut out = Vec::new();
    assert!(matches!(write_listing(&Context::new(), "(", &mut out), Err(Error::Pattern(_))));
}

#[test]
fn operator_in_operand_position_names_the_token() {
    let context = Context::new();
    let or = context.binary_operator("|").unwrap().clone();
    let tokens = [(Token::LeftParen, 1), (Token::BinaryOperator(or), 2)];

    let e = to_postfix(&tokens, None, &context.variables).unwrap_err();
    assert_eq!(e,
               SyntaxError::MissingOperand { found:  "operator '|'".to_string(),
                                             column: 2, });
    assert_eq!(e.to_string(), "Error at column 2: Expected an operand but found operator '|'.");
}
