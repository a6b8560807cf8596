use std::fmt::Display;

use crate::{environment::prelude::Value, lexer::prelude::Token};

// expression -> <literal> | <identifier> | <assign> | "(" <expression> ")"
//             | <unary> | <binary> | <logical> | <conditional>
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Var(Token),
    Assign {
        name: Token,
        value: Box<Expr>,
    },
    Grouping(Box<Expr>),
    Unary {
        operator: Token,
        operand: Box<Expr>,
        postfix: bool,
    },
    Binary {
        operator: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        operator: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    // if (<expression>) <expression> else <expression>
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(operator: Token, left: Expr, right: Expr) -> Self {
        Self::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logical(operator: Token, left: Expr, right: Expr) -> Self {
        Self::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(operator: Token, operand: Expr, postfix: bool) -> Self {
        Self::Unary {
            operator,
            operand: Box::new(operand),
            postfix,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{}", value.repr()),
            Self::Var(name) => write!(f, "{}", name.lexeme),
            Self::Assign { name, value } => write!(f, "(assign {} {value})", name.lexeme),
            Self::Grouping(expression) => write!(f, "(group {expression})"),
            Self::Unary { operator, operand, postfix: false } => {
                write!(f, "({} {operand})", operator.kind.name())
            },
            Self::Unary { operator, operand, postfix: true } => {
                write!(f, "({operand} {})", operator.kind.name())
            },
            Self::Binary { operator, left, right }
            | Self::Logical { operator, left, right } => {
                write!(f, "({} {left} {right})", operator.kind.name())
            },
            Self::Conditional { condition, then_branch, else_branch } => {
                write!(f, "(if {condition} {then_branch} {else_branch})")
            }
        }
    }
}

// statement -> <print> | <expression_stmt> | <var> | <block> | <if>
//            | <while> | <for> | break ; | continue ;
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Print {
        keyword: Token,
        expression: Expr,
    },
    Expression(Expr),
    Var {
        name: Token,
        initializer: Option<Expr>,
    },
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    For {
        initializer: Option<Box<Stmt>>,
        condition: Option<Expr>,
        increment: Option<Expr>,
        body: Box<Stmt>,
    },
    Break,
    Continue,
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Print { expression, .. } => write!(f, "(print {expression})"),
            Self::Expression(expression) => write!(f, "(expr {expression})"),
            Self::Var { name, initializer: Some(initializer) } => {
                write!(f, "(var {} {initializer})", name.lexeme)
            },
            Self::Var { name, initializer: None } => write!(f, "(var {})", name.lexeme),
            Self::Block(statements) => {
                write!(f, "(block")?;
                for statement in statements {
                    write!(f, " {statement}")?;
                }
                write!(f, ")")
            },
            Self::If { condition, then_branch, else_branch } => match else_branch {
                Some(else_branch) => write!(f, "(if {condition} {then_branch} {else_branch})"),
                None => write!(f, "(if {condition} {then_branch})"),
            },
            Self::While { condition, body } => write!(f, "(while {condition} {body})"),
            Self::For { initializer, condition, increment, body } => {
                write!(f, "(for {} {} {} {body})",
                    optional(initializer),
                    optional(condition),
                    optional(increment)
                )
            },
            Self::Break => write!(f, "(break)"),
            Self::Continue => write!(f, "(continue)"),
        }
    }
}

fn optional<T: Display>(part: &Option<T>) -> String {
    match part {
        Some(part) => part.to_string(),
        None => "_".to_string(),
    }
}
