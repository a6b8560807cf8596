use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::RuntimeError,
    lexer::prelude::LexicalError,
    parser::prelude::ParseError,
    utils::prelude::SrcSpan,
};
use super::diagnostic::{Diagnostic, Label, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("lexical analysis failed")]
    Lex {
        path: PathBuf,
        src: String,
        errors: Vec<LexicalError>
    },
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        errors: Vec<ParseError>
    },
    #[error("runtime error: {error}")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("IO operation failed: {err}")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StdIo { err: err.kind() }
    }
}

impl Error {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Lex { .. } | Error::Parse { .. } => 65,
            Error::Runtime { .. } => 70,
            Error::StdIo { .. } => 74,
        }
    }

    /// One `Error on line N: ...` line per reported fault.
    pub fn plain_lines(&self) -> Vec<String> {
        match self {
            Error::Lex { errors, .. } => errors
                .iter()
                .map(|error| format!("Error on line {}: {}", error.line, error.details().0))
                .collect(),
            Error::Parse { errors, .. } => errors
                .iter()
                .map(|error| format!("Error on line {}: {}", error.line, error.message()))
                .collect(),
            Error::Runtime { error, .. } => {
                vec![format!("Runtime error on line {}: {}", error.line, error.error)]
            },
            Error::StdIo { err } => vec![format!("Error: {err}")],
        }
    }

    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();

        match self.pretty(&mut nocolor) {
            Ok(()) => String::from_utf8_lossy(&nocolor.into_inner()).into_owned(),
            Err(_) => self.plain_lines().join("\n"),
        }
    }

    pub fn pretty(&self, buf: &mut Buffer) -> std::io::Result<()> {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf)?;
            writeln!(buf)?;
        }

        Ok(())
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Lex { path, src, errors } => errors
                .iter()
                .map(|error| {
                    let (label, extra) = error.details();

                    located("Lexical error", extra.join("\n"), path, src, label, error.location)
                })
                .collect(),
            Error::Parse { path, src, errors } => errors
                .iter()
                .map(|error| {
                    let (label, extra) = error.details();

                    located("Syntax error", extra.join("\n"), path, src, label, error.span)
                })
                .collect(),
            Error::Runtime { path, src, error } => vec![located(
                "Runtime error",
                String::new(),
                path,
                src,
                error.error.to_string(),
                SrcSpan::of_line(src, error.line)
            )],
            Error::StdIo { err } => vec![Diagnostic {
                title: "Standard IO error".into(),
                text: format!("{err}"),
                location: None,
            }],
        }
    }
}

fn located<'a>(
    title: &str,
    text: String,
    path: &PathBuf,
    src: &'a str,
    label: String,
    span: SrcSpan
) -> Diagnostic<'a> {
    Diagnostic {
        title: title.into(),
        text,
        location: Some(Location {
            src,
            path: path.clone(),
            label: Label {
                text: Some(label),
                span,
            },
        }),
    }
}
