use crate::{lexer::prelude::{Token, TokenKind}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedToken {
        expected: TokenKind,
        after: &'static str,
        found: String,
    },
    ExpectedIdent {
        found: String,
    },
    ExpectedExpression {
        found: String,
    },
    InvalidLValue,
    InvalidIncrementTarget,
    OutsideLoop {
        keyword: TokenKind,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub line: u32,
    pub span: SrcSpan
}

impl ParseError {
    pub fn at(token: &Token, error: ParseErrorType) -> Self {
        Self {
            error,
            line: token.line,
            span: token.location,
        }
    }

    pub fn message(&self) -> String {
        self.details().0
    }

    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedToken { expected, after, found } => {
                let expected = expected.as_literal().unwrap_or(expected.name());

                (format!("Expected '{expected}' {after}"), vec![format!("Found {found}")])
            },
            ParseErrorType::ExpectedIdent { found } => {
                ("Expected variable name".to_string(), vec![format!("Found {found}")])
            },
            ParseErrorType::ExpectedExpression { found } => {
                (format!("Unexpected token: {found}"), vec!["Expected an expression".to_string()])
            },
            ParseErrorType::InvalidLValue => ("Invalid l-value".to_string(), vec![
                "Only a variable can be assigned to".to_string()
            ]),
            ParseErrorType::InvalidIncrementTarget => ("Invalid increment/decrement target".to_string(), vec![
                "`++` and `--` only apply to a variable".to_string()
            ]),
            ParseErrorType::OutsideLoop { keyword } => {
                let keyword = keyword.as_literal().unwrap_or(keyword.name());

                (format!("'{keyword}' outside of a loop"), vec![])
            }
        }
    }
}

pub fn parse_error<T>(token: &Token, error: ParseErrorType) -> Result<T, ParseError> {
    Err(ParseError::at(token, error))
}
