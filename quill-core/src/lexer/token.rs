use std::fmt::Display;

use crate::{environment::prelude::Value, utils::prelude::SrcSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // single characters
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }
    LBracket, // [
    RBracket, // ]
    Comma, // ,
    Semicolon, // ;
    Plus, // +
    Minus, // -
    Star, // *
    Slash, // /
    Percent, // %
    Bang, // !
    Assign, // =
    Less, // <
    Greater, // >

    // two-character operators
    EqualEqual, // ==
    BangEqual, // !=
    LessEqual, // <=
    GreaterEqual, // >=
    StarStar, // **
    PlusPlus, // ++
    MinusMinus, // --
    Arrow, // ->

    // literals
    Ident,
    Number,
    String,

    // keywords
    Var,
    Print,
    True,
    False,
    And,
    Or,
    If,
    Else,
    While,
    For,
    Break,
    Continue,
    Class,
    Fn,
    Return,

    Eof,
}

impl TokenKind {
    pub fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            TokenKind::Var
            | TokenKind::Print
            | TokenKind::True
            | TokenKind::False
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::While
            | TokenKind::For
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::Class
            | TokenKind::Fn
            | TokenKind::Return
        )
    }

    /// Tokens the parser resynchronizes on after a syntax error.
    pub fn starts_declaration(&self) -> bool {
        matches!(
            self,
            TokenKind::Class
            | TokenKind::Fn
            | TokenKind::Var
            | TokenKind::For
            | TokenKind::If
            | TokenKind::While
            | TokenKind::Print
            | TokenKind::Return
        )
    }

    /// Upper-case name used by the AST debug form, e.g. `PLUS`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LParen => "LEFT_PAREN",
            TokenKind::RParen => "RIGHT_PAREN",
            TokenKind::LBrace => "LEFT_BRACE",
            TokenKind::RBrace => "RIGHT_BRACE",
            TokenKind::LBracket => "LEFT_BRACKET",
            TokenKind::RBracket => "RIGHT_BRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Percent => "PERCENT",
            TokenKind::Bang => "BANG",
            TokenKind::Assign => "EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::Greater => "GREATER",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::StarStar => "STAR_STAR",
            TokenKind::PlusPlus => "PLUS_PLUS",
            TokenKind::MinusMinus => "MINUS_MINUS",
            TokenKind::Arrow => "MINUS_GREATER",
            TokenKind::Ident => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Var => "VAR",
            TokenKind::Print => "PRINT",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Break => "BREAK",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Class => "CLASS",
            TokenKind::Fn => "FN",
            TokenKind::Return => "RETURN",
            TokenKind::Eof => "EOF",
        }
    }

    /// Source spelling of fixed tokens; `None` for literals and identifiers.
    pub fn as_literal(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Bang => "!",
            TokenKind::Assign => "=",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::EqualEqual => "==",
            TokenKind::BangEqual => "!=",
            TokenKind::LessEqual => "<=",
            TokenKind::GreaterEqual => ">=",
            TokenKind::StarStar => "**",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Arrow => "->",
            TokenKind::Var => "var",
            TokenKind::Print => "print",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Class => "class",
            TokenKind::Fn => "fn",
            TokenKind::Return => "return",
            TokenKind::Ident
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::Eof => return None,
        })
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Value>,
    pub line: u32,
    pub location: SrcSpan,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, location: SrcSpan) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
            location,
        }
    }

    pub fn with_literal(mut self, literal: Value) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Human description used in "found ..." messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Number => "a Number".to_string(),
            TokenKind::String => "a String".to_string(),
            TokenKind::Ident => format!("identifier `{}`", self.lexeme),
            kind if kind.is_reserved_word() => format!("the keyword `{}`", self.lexeme),
            _ => format!("`{}`", self.lexeme),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.kind.name(), self.lexeme, literal),
            None => write!(f, "{} {}", self.kind.name(), self.lexeme),
        }
    }
}
