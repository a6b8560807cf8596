use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::eval::prelude::{RuntimeError, RuntimeErrorType};
use crate::lexer::prelude::Token;

use super::prelude::Value;

/// One scope frame. Lookups fall back to `enclosing` until the global
/// frame, which has none.
#[derive(Default, Debug)]
pub struct Environment {
    pub store: HashMap<String, Value>,
    pub enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Self {
            store: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Declares in this frame only; redeclaring overwrites.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.store.get(&name.lexeme) {
            return Ok(value.clone());
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().get(name),
            None => Err(undefined(name)),
        }
    }

    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if let Some(var) = self.store.get_mut(&name.lexeme) {
            *var = value;

            return Ok(());
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value),
            None => Err(undefined(name)),
        }
    }

    /// Number of frames between this one and the global frame.
    pub fn depth(&self) -> usize {
        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().depth() + 1,
            None => 0,
        }
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError {
        error: RuntimeErrorType::UndefinedVariable { name: name.lexeme.clone() },
        line: name.line,
    }
}
