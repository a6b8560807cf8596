use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    UnterminatedString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub line: u32,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (String, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                (format!("Unexpected character: '{tok}'."), vec![])
            },
            LexicalErrorType::UnterminatedString => {
                ("Unterminated string.".to_string(), vec!["Add a closing `\"`".to_string()])
            }
        }
    }
}
