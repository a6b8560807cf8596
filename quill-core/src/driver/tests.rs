use std::{
    io::Write,
    path::{Path, PathBuf},
};

use pretty_assertions::assert_eq;

use crate::{
    driver::{ast_lines, read_source, run_file, run_source},
    eval::prelude::Interpreter,
    utils::prelude::Error,
};

fn program(src: &str) -> (Result<(), Error>, String) {
    let mut interpreter = Interpreter::new(Vec::new());
    let result = run_source(&mut interpreter, Path::new("test.ql"), src);

    (result, String::from_utf8(interpreter.into_output()).unwrap())
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("quill-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_program_output() {
    let src = r#"
        var total = 0;
        for (var i = 1; i <= 4; i++) {
            if (i == 3) continue;
            total = total + i;
        }
        print total;
        print "done" + "!";
    "#;

    let (result, output) = program(src);

    assert!(result.is_ok());
    assert_eq!(output, "7\ndone!\n");
}

#[test]
fn test_two_syntax_errors_two_lines() {
    let (result, output) = program("print ;\nprint 1;\nvar = 2;");
    let err = result.unwrap_err();

    assert_eq!(output, "");
    assert_eq!(err.exit_code(), 65);
    assert_eq!(
        err.plain_lines(),
        vec![
            "Error on line 1: Unexpected token: `;`".to_string(),
            "Error on line 3: Expected variable name".to_string(),
        ]
    );
}

#[test]
fn test_lexical_errors_are_reported_before_parsing() {
    let (result, _) = program("print 1;\nprint $;");
    let err = result.unwrap_err();

    assert_eq!(err.exit_code(), 65);
    assert_eq!(err.plain_lines(), vec!["Error on line 2: Unexpected character: '$'.".to_string()]);
}

#[test]
fn test_runtime_error_keeps_earlier_output() {
    let (result, output) = program("print \"a\";\nprint 1 < \"b\";\nprint \"c\";");
    let err = result.unwrap_err();

    assert_eq!(output, "a\n");
    assert_eq!(err.exit_code(), 70);
    assert_eq!(
        err.plain_lines(),
        vec!["Runtime error on line 2: Operands of '<' must be Numbers, got Number and String.".to_string()]
    );
}

#[test]
fn test_repl_lines_share_globals() {
    let mut interpreter = Interpreter::new(Vec::new());

    for line in ["var greeting = \"hi\";", "greeting = greeting + \"!\";", "print greeting;"] {
        run_source(&mut interpreter, Path::new("<repl>"), line).unwrap();
    }

    assert_eq!(String::from_utf8(interpreter.into_output()).unwrap(), "hi!\n");
}

#[test]
fn test_ast_lines() {
    let lines = ast_lines(Path::new("test.ql"), "var x = 1 + 2;\nprint x++;").unwrap();

    assert_eq!(lines, vec!["(var x (PLUS 1 2))", "(print (x PLUS_PLUS))"]);
}

#[test]
fn test_run_file() {
    let path = temp_file("run.ql", "var a = 2;\nprint a ** 10;\n");

    let mut interpreter = Interpreter::new(Vec::new());
    run_file(&mut interpreter, &path).unwrap();
    assert_eq!(String::from_utf8(interpreter.into_output()).unwrap(), "1024\n");

    assert_eq!(read_source(&path).unwrap(), "var a = 2;\nprint a ** 10;\n");
    std::fs::remove_file(path).unwrap();
}

struct BrokenFlush(Vec<u8>);

impl Write for BrokenFlush {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }
}

#[test]
fn test_flush_failure_is_an_io_error() {
    let mut interpreter = Interpreter::new(BrokenFlush(Vec::new()));
    let err = run_source(&mut interpreter, Path::new("test.ql"), "print 1;").unwrap_err();

    assert_eq!(err, Error::StdIo { err: std::io::ErrorKind::BrokenPipe });
    assert_eq!(err.exit_code(), 74);
    assert_eq!(err.plain_lines(), vec!["Error: broken pipe".to_string()]);
    assert_eq!(interpreter.output().0, b"1\n");
}

#[test]
fn test_missing_file() {
    let mut interpreter = Interpreter::new(Vec::new());
    let err = run_file(&mut interpreter, Path::new("/definitely/not/here.ql")).unwrap_err();

    assert_eq!(err, Error::StdIo { err: std::io::ErrorKind::NotFound });
    assert_eq!(err.exit_code(), 74);
}

#[test]
fn test_pretty_diagnostics_point_at_source() {
    let (result, _) = program("var x = 1;\nprint x +;");
    let rendered = result.unwrap_err().pretty_string();

    assert!(rendered.contains("Syntax error"), "{rendered}");
    assert!(rendered.contains("test.ql:2"), "{rendered}");
    assert!(rendered.contains("Unexpected token: `;`"), "{rendered}");
}

#[test]
fn test_pretty_runtime_diagnostic() {
    let (result, _) = program("var x = 1;\nprint y;");
    let rendered = result.unwrap_err().pretty_string();

    assert!(rendered.contains("Runtime error"), "{rendered}");
    assert!(rendered.contains("Undefined variable 'y'."), "{rendered}");
}
