use thiserror::Error;

use crate::environment::prelude::ValueType;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeErrorType {
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { name: String },
    #[error("Operand of '{operator}' must be a Number, got {found}.")]
    NumberOperand { operator: String, found: ValueType },
    #[error("Operands of '{operator}' must be Numbers, got {left} and {right}.")]
    NumberOperands { operator: String, left: ValueType, right: ValueType },
    #[error("Operands of '+' must be two Numbers or two Strings, got {left} and {right}.")]
    AddOperands { left: ValueType, right: ValueType },
    #[error("Invalid increment/decrement target.")]
    InvalidIncrementTarget,
    #[error("Unknown operator '{operator}'.")]
    UnknownOperator { operator: String },
    #[error("Failed to write output: {kind}.")]
    Output { kind: std::io::ErrorKind },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub line: u32,
}

impl RuntimeError {
    pub fn new(error: RuntimeErrorType, line: u32) -> Self {
        Self { error, line }
    }
}
