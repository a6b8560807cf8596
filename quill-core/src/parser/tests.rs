use pretty_assertions::assert_eq;

use crate::{
    lexer::prelude::{LexicalErrorType, TokenKind},
    parser::prelude::{parse_module, ParseErrorType, Parsed, Stmt},
};

fn parse(src: &str) -> Parsed {
    parse_module(src).expect("source should lex cleanly")
}

fn dump(src: &str) -> Vec<String> {
    let parsed = parse(src);

    assert!(!parsed.had_error(), "unexpected parse errors: {:?}", parsed.errors);

    parsed.statements.iter().map(ToString::to_string).collect()
}

#[test]
fn test_precedence_and_associativity() {
    assert_eq!(dump("2+3*4;"), vec!["(expr (PLUS 2 (STAR 3 4)))"]);
    assert_eq!(dump("2**3**2;"), vec!["(expr (STAR_STAR 2 (STAR_STAR 3 2)))"]);
    assert_eq!(dump("10-2-3;"), vec!["(expr (MINUS (MINUS 10 2) 3))"]);
    assert_eq!(dump("8/4/2;"), vec!["(expr (SLASH (SLASH 8 4) 2))"]);
    assert_eq!(dump("-2**2;"), vec!["(expr (STAR_STAR (MINUS 2) 2))"]);
    assert_eq!(dump("(1 + 2) % 3;"), vec!["(expr (PERCENT (group (PLUS 1 2)) 3))"]);
    assert_eq!(dump("!!true;"), vec!["(expr (BANG (BANG true)))"]);
}

#[test]
fn test_logical_and_comparison_levels() {
    assert_eq!(
        dump("a or b and c == d < e + 1;"),
        vec!["(expr (OR a (AND b (EQUAL_EQUAL c (LESS d (PLUS e 1))))))"]
    );
    assert_eq!(
        dump("a != b >= c;"),
        vec!["(expr (BANG_EQUAL a (GREATER_EQUAL b c)))"]
    );
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(dump("a = b = 1;"), vec!["(expr (assign a (assign b 1)))"]);
    assert_eq!(dump("a = b or c;"), vec!["(expr (assign a (OR b c)))"]);
}

#[test]
fn test_increment_forms() {
    assert_eq!(
        dump("x++ + ++y;"),
        vec!["(expr (PLUS (x PLUS_PLUS) (PLUS_PLUS y)))"]
    );
    assert_eq!(dump("--x;"), vec!["(expr (MINUS_MINUS x))"]);
    assert_eq!(dump("-x--;"), vec!["(expr (MINUS (x MINUS_MINUS)))"]);
}

#[test]
fn test_conditional_expression() {
    assert_eq!(
        dump("print if (a) 1 else \"no\";"),
        vec!["(print (if a 1 \"no\"))"]
    );
    assert_eq!(
        dump("x = if (a) if (b) 1 else 2 else 3;"),
        vec!["(expr (assign x (if a (if b 1 2) 3)))"]
    );
}

#[test]
fn test_statements() {
    let input = r#"
        var x;
        var y = 1;
        { print x; }
        if (x) print 1; else print 2;
        if (y) {}
        while (x) { break; }
        for (var i = 0; i < 3; i = i + 1) continue;
        for (;;) break;
        for (x = 0; ; ) { if (x) break; }
    "#;

    assert_eq!(
        dump(input),
        vec![
            "(var x)",
            "(var y 1)",
            "(block (print x))",
            "(if x (print 1) (print 2))",
            "(if y (block))",
            "(while x (block (break)))",
            "(for (var i 0) (LESS i 3) (assign i (PLUS i 1)) (continue))",
            "(for _ _ _ (break))",
            "(for (expr (assign x 0)) _ _ (block (if x (break))))",
        ]
    );
}

#[test]
fn test_invalid_targets() {
    let parsed = parse("1 = 2;\nprint 3;");
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].error, ParseErrorType::InvalidLValue);
    assert_eq!(parsed.errors[0].message(), "Invalid l-value");
    assert_eq!(parsed.statements.len(), 1);

    let parsed = parse("++1;\n(a)--;");
    assert_eq!(parsed.errors.len(), 2);
    assert!(parsed.errors.iter().all(|err| err.error == ParseErrorType::InvalidIncrementTarget));
    assert_eq!(parsed.errors[1].line, 2);
}

#[test]
fn test_loop_control_outside_loop() {
    let parsed = parse("break;\nprint 1;\n{ continue; }");

    assert_eq!(parsed.errors.len(), 2);
    assert_eq!(parsed.errors[0].error, ParseErrorType::OutsideLoop { keyword: TokenKind::Break });
    assert_eq!(parsed.errors[0].line, 1);
    assert_eq!(parsed.errors[0].message(), "'break' outside of a loop");
    assert_eq!(parsed.errors[1].error, ParseErrorType::OutsideLoop { keyword: TokenKind::Continue });
    assert_eq!(parsed.errors[1].line, 3);

    // reported without unwinding, the rest of the program is still parsed
    assert_eq!(parsed.statements.len(), 3);
    assert_eq!(parsed.statements[0], Stmt::Break);
}

#[test]
fn test_loop_depth_is_restored() {
    let parsed = parse("while (true) { if (true) break; }\nbreak;");

    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].line, 2);

    let parsed = parse("for (;;) { for (;;) continue; break; }");
    assert!(!parsed.had_error());
}

#[test]
fn test_panic_mode_reports_each_fault_once() {
    let parsed = parse("print ;\nvar = 3;\nprint 1;");

    assert_eq!(parsed.errors.len(), 2);
    assert_eq!(parsed.errors[0].line, 1);
    assert_eq!(parsed.errors[1].line, 2);
    assert!(matches!(parsed.errors[1].error, ParseErrorType::ExpectedIdent { .. }));
    assert_eq!(
        parsed.statements.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["(print 1)"]
    );

    let parsed = parse("print (1 + ;\nvar x = 2;");
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].message(), "Unexpected token: `;`");
    assert_eq!(parsed.statements.len(), 1);

    let parsed = parse("print 1\nvar y = 2;");
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].message(), "Expected ';' after value");
    assert_eq!(parsed.errors[0].details().1, vec!["Found the keyword `var`".to_string()]);
    assert_eq!(parsed.statements.len(), 1);
}

#[test]
fn test_recovery_inside_blocks() {
    let parsed = parse("while (true) {\n  print ;\n  break;\n}\nprint 1;");

    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].line, 2);
    assert_eq!(parsed.errors[0].message(), "Unexpected token: `;`");
    assert_eq!(
        parsed.statements.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["(while true (block (break)))", "(print 1)"]
    );

    // two faults in one loop body, the later `continue` stays inside the loop
    let parsed = parse("for (;;) {\n  var = 1;\n  { print (2 + ; }\n  continue;\n}");

    assert_eq!(parsed.errors.len(), 2);
    assert!(matches!(parsed.errors[0].error, ParseErrorType::ExpectedIdent { .. }));
    assert_eq!(parsed.errors[0].line, 2);
    assert_eq!(parsed.errors[1].message(), "Unexpected token: `;`");
    assert_eq!(parsed.errors[1].line, 3);
    assert_eq!(
        parsed.statements.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["(for _ _ _ (block (block) (continue)))"]
    );

    // the synchronizer stops at `}` without swallowing it
    let parsed = parse("{ x = ; }\nprint 3;");

    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.statements.len(), 2);
}

#[test]
fn test_unclosed_block() {
    let parsed = parse("{ print 1;");

    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].message(), "Expected '}' after block");
    assert!(parsed.statements.is_empty());
}

#[test]
fn test_lexical_errors_stop_parsing() {
    let errors = parse_module("print @;\nprint \"x").unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].error, LexicalErrorType::UnrecognizedToken { tok: '@' });
    assert_eq!(errors[1].error, LexicalErrorType::UnterminatedString);
}
