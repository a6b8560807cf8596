pub mod error;


pub mod prelude {
    pub use super::{
        error::*,
        Flow,
        Interpreter
    };
}

use std::{cell::RefCell, io::Write, rc::Rc};

use crate::{
    environment::prelude::{Environment, Value},
    lexer::prelude::{Token, TokenKind},
    parser::prelude::{Expr, Stmt},
};

use error::{RuntimeError, RuntimeErrorType};

/// How a statement finished. Loops consume `Break` and `Continue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Normal,
    Break,
    Continue,
}

/// Tree-walking evaluator. Holds the current scope frame and the sink
/// `print` writes to; the global frame lives as long as the interpreter.
pub struct Interpreter<W: Write> {
    environment: Rc<RefCell<Environment>>,
    globals: Rc<RefCell<Environment>>,
    out: W,
}

impl Interpreter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));

        Self {
            environment: globals.clone(),
            globals,
            out,
        }
    }

    pub fn globals(&self) -> Rc<RefCell<Environment>> {
        self.globals.clone()
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            let flow = self.execute(statement)?;

            if flow != Flow::Normal {
                log::warn!("`{flow:?}` escaped every loop and was ignored");
            }
        }

        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    pub fn execute(&mut self, statement: &Stmt) -> Result<Flow, RuntimeError> {
        match statement {
            Stmt::Print { keyword, expression } => {
                let value = self.evaluate(expression)?;

                writeln!(self.out, "{value}").map_err(|err| RuntimeError::new(
                    RuntimeErrorType::Output { kind: err.kind() },
                    keyword.line
                ))?;

                Ok(Flow::Normal)
            },
            Stmt::Expression(expression) => {
                self.evaluate(expression)?;

                Ok(Flow::Normal)
            },
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Value::Number(0.0),
                };

                self.environment.borrow_mut().define(name.lexeme.clone(), value);

                Ok(Flow::Normal)
            },
            Stmt::Block(statements) => self.in_new_scope(|interpreter| {
                for statement in statements {
                    let flow = interpreter.execute(statement)?;

                    if flow != Flow::Normal {
                        return Ok(flow);
                    }
                }

                Ok(Flow::Normal)
            }),
            Stmt::If { condition, then_branch, else_branch } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if self.execute(body)? == Flow::Break {
                        break;
                    }
                }

                Ok(Flow::Normal)
            },
            Stmt::For { initializer, condition, increment, body } => self.in_new_scope(|interpreter| {
                if let Some(initializer) = initializer {
                    interpreter.execute(initializer)?;
                }

                loop {
                    if let Some(condition) = condition {
                        if !interpreter.evaluate(condition)?.is_truthy() {
                            break;
                        }
                    }

                    if interpreter.execute(body)? == Flow::Break {
                        break;
                    }

                    if let Some(increment) = increment {
                        interpreter.evaluate(increment)?;
                    }
                }

                Ok(Flow::Normal)
            }),
            Stmt::Break => Ok(Flow::Break),
            Stmt::Continue => Ok(Flow::Continue),
        }
    }

    // The previous frame is restored however `run` finishes.
    fn in_new_scope<T>(
        &mut self,
        run: impl FnOnce(&mut Self) -> Result<T, RuntimeError>
    ) -> Result<T, RuntimeError> {
        let previous = self.environment.clone();

        self.environment = Rc::new(RefCell::new(Environment::with_enclosing(previous.clone())));
        log::trace!("entered scope at depth {}", self.environment.borrow().depth());

        let result = run(self);

        self.environment = previous;
        log::trace!("left scope");

        result
    }

    pub fn evaluate(&mut self, expression: &Expr) -> Result<Value, RuntimeError> {
        match expression {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Var(name) => self.environment.borrow().get(name),
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.environment.borrow_mut().assign(name, value.clone())?;

                Ok(value)
            },
            Expr::Grouping(expression) => self.evaluate(expression),
            Expr::Unary { operator, operand, postfix } => match operator.kind {
                TokenKind::Bang => Ok(Value::Boolean(!self.evaluate(operand)?.is_truthy())),
                TokenKind::Minus => match self.evaluate(operand)? {
                    Value::Number(value) => Ok(Value::Number(-value)),
                    other => Err(RuntimeError::new(
                        RuntimeErrorType::NumberOperand {
                            operator: operator.lexeme.clone(),
                            found: other._type()
                        },
                        operator.line
                    )),
                },
                TokenKind::PlusPlus | TokenKind::MinusMinus => self.increment(operator, operand, *postfix),
                _ => Err(unknown_operator(operator)),
            },
            Expr::Binary { operator, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;

                eval_infix(operator, left, right)
            },
            Expr::Logical { operator, left, right } => {
                let left = self.evaluate(left)?;

                let decided = match operator.kind {
                    TokenKind::Or => left.is_truthy(),
                    TokenKind::And => !left.is_truthy(),
                    _ => return Err(unknown_operator(operator)),
                };

                if decided {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            },
            Expr::Conditional { condition, then_branch, else_branch } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            }
        }
    }

    // `++x` yields the updated value, `x++` the previous one.
    fn increment(&mut self, operator: &Token, operand: &Expr, postfix: bool) -> Result<Value, RuntimeError> {
        let Expr::Var(name) = operand else {
            return Err(RuntimeError::new(RuntimeErrorType::InvalidIncrementTarget, operator.line));
        };

        let current = match self.environment.borrow().get(name)? {
            Value::Number(value) => value,
            other => return Err(RuntimeError::new(
                RuntimeErrorType::NumberOperand {
                    operator: operator.lexeme.clone(),
                    found: other._type()
                },
                operator.line
            )),
        };

        let updated = match operator.kind {
            TokenKind::PlusPlus => current + 1.0,
            _ => current - 1.0,
        };

        self.environment.borrow_mut().assign(name, Value::Number(updated))?;

        Ok(Value::Number(if postfix { current } else { updated }))
    }
}

fn eval_infix(operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::EqualEqual => return Ok(Value::Boolean(left.is_equal(&right))),
        TokenKind::BangEqual => return Ok(Value::Boolean(!left.is_equal(&right))),
        _ => {}
    }

    match (left, right) {
        (Value::Number(left), Value::Number(right)) => Ok(match operator.kind {
            TokenKind::Plus => Value::Number(left + right),
            TokenKind::Minus => Value::Number(left - right),
            TokenKind::Star => Value::Number(left * right),
            TokenKind::Slash => Value::Number(left / right),
            TokenKind::Percent => Value::Number(left % right),
            TokenKind::StarStar => Value::Number(left.powf(right)),
            TokenKind::Less => Value::Boolean(left < right),
            TokenKind::LessEqual => Value::Boolean(left <= right),
            TokenKind::Greater => Value::Boolean(left > right),
            TokenKind::GreaterEqual => Value::Boolean(left >= right),
            _ => return Err(unknown_operator(operator)),
        }),
        (Value::String(left), Value::String(right)) if operator.kind == TokenKind::Plus => {
            Ok(Value::String(left + &right))
        },
        (left, right) if operator.kind == TokenKind::Plus => Err(RuntimeError::new(
            RuntimeErrorType::AddOperands { left: left._type(), right: right._type() },
            operator.line
        )),
        (left, right) => Err(RuntimeError::new(
            RuntimeErrorType::NumberOperands {
                operator: operator.lexeme.clone(),
                left: left._type(),
                right: right._type()
            },
            operator.line
        )),
    }
}

fn unknown_operator(operator: &Token) -> RuntimeError {
    RuntimeError::new(
        RuntimeErrorType::UnknownOperator { operator: operator.lexeme.clone() },
        operator.line
    )
}
