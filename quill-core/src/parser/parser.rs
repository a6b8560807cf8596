use crate::{
    environment::prelude::Value,
    lexer::prelude::{lex, LexicalError, Token, TokenKind},
    utils::prelude::SrcSpan,
};
use super::error::{parse_error, ParseError, ParseErrorType};
use super::ast::{Expr, Stmt};

/// Statements recovered from a token stream plus every syntax error seen.
/// When `errors` is non-empty the statements must not be evaluated.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Parsed {
    pub statements: Vec<Stmt>,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

type ParseResult<T> = Result<T, ParseError>;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    loop_depth: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|token| token.is(TokenKind::Eof)) {
            let (line, end) = tokens.last()
                .map(|token| (token.line, token.location.end))
                .unwrap_or((1, 0));

            tokens.push(Token::new(TokenKind::Eof, "", line, SrcSpan::from(end, end)));
        }

        Self {
            tokens,
            current: 0,
            loop_depth: 0,
            errors: vec![],
        }
    }

    pub fn parse(mut self) -> Parsed {
        let mut statements = vec![];

        while !self.is_at_end() {
            let start = self.current;

            match self.declaration() {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    log::trace!("syntax error on line {}, synchronizing", err.line);

                    self.errors.push(err);
                    self.synchronize(start);
                }
            }
        }

        log::debug!(
            "parsed {} statement(s) with {} error(s)",
            statements.len(),
            self.errors.len()
        );

        Parsed {
            statements,
            errors: self.errors,
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn is_at_end(&self) -> bool {
        self.peek().is(TokenKind::Eof)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    pub fn step(&mut self) -> Token {
        let token = self.peek().clone();

        if !self.is_at_end() {
            self.current += 1;
        }

        token
    }

    fn matches(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.peek().kind) {
            Some(self.step())
        } else {
            None
        }
    }

    pub fn expect_one(&mut self, kind: TokenKind, after: &'static str) -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.step());
        }

        let found = self.peek().describe();

        parse_error(self.peek(), ParseErrorType::ExpectedToken { expected: kind, after, found })
    }

    pub fn expect_ident(&mut self) -> ParseResult<Token> {
        if self.check(TokenKind::Ident) {
            return Ok(self.step());
        }

        let found = self.peek().describe();

        parse_error(self.peek(), ParseErrorType::ExpectedIdent { found })
    }

    // Discards tokens up to a `;`, a closing `}` or the start of the next
    // declaration. Always consumes at least one token when the failed
    // declaration consumed none.
    fn synchronize(&mut self, start: usize) {
        if self.current != start && self.at_boundary() {
            return;
        }

        self.step();

        while !self.is_at_end() {
            if self.previous().is(TokenKind::Semicolon) || self.at_boundary() {
                return;
            }

            self.step();
        }
    }

    fn at_boundary(&self) -> bool {
        self.peek().kind.starts_declaration() || self.check(TokenKind::RBrace)
    }

    // declaration -> var <identifier> [= <expression>] ; | <statement>
    fn declaration(&mut self) -> ParseResult<Stmt> {
        if self.matches(&[TokenKind::Var]).is_some() {
            self.var_declaration()
        } else {
            self.statement()
        }
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.expect_ident()?;

        let initializer = match self.matches(&[TokenKind::Assign]) {
            Some(_) => Some(self.expression()?),
            None => None,
        };

        self.expect_one(TokenKind::Semicolon, "after variable declaration")?;

        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        match self.peek().kind {
            TokenKind::Print => {
                let keyword = self.step();
                let expression = self.expression()?;
                self.expect_one(TokenKind::Semicolon, "after value")?;

                Ok(Stmt::Print { keyword, expression })
            },
            TokenKind::LBrace => {
                self.step();

                Ok(Stmt::Block(self.block()?))
            },
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::For => self.for_statement(),
            TokenKind::Break | TokenKind::Continue => self.loop_control(),
            _ => self.expression_statement(),
        }
    }

    // block -> { {<declaration>} }
    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = vec![];

        // errors are recovered here so the rest of the block keeps its
        // loop depth and the closing `}` still matches
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let start = self.current;

            match self.declaration() {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    log::trace!("syntax error on line {} inside block, synchronizing", err.line);

                    self.errors.push(err);
                    self.synchronize(start);
                }
            }
        }

        self.expect_one(TokenKind::RBrace, "after block")?;

        Ok(statements)
    }

    // if -> if ( <expression> ) <statement> [else <statement>]
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.step();
        self.expect_one(TokenKind::LParen, "after 'if'")?;
        let condition = self.expression()?;
        self.expect_one(TokenKind::RParen, "after if condition")?;

        let then_branch = Box::new(self.statement()?);

        let else_branch = match self.matches(&[TokenKind::Else]) {
            Some(_) => Some(Box::new(self.statement()?)),
            None => None,
        };

        Ok(Stmt::If { condition, then_branch, else_branch })
    }

    // while -> while ( <expression> ) <statement>
    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.step();
        self.expect_one(TokenKind::LParen, "after 'while'")?;
        let condition = self.expression()?;
        self.expect_one(TokenKind::RParen, "after while condition")?;

        let body = Box::new(self.loop_body()?);

        Ok(Stmt::While { condition, body })
    }

    // for -> for ( (<var> | <expression_stmt> | ;) [<expression>] ; [<expression>] ) <statement>
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.step();
        self.expect_one(TokenKind::LParen, "after 'for'")?;

        let initializer = if self.matches(&[TokenKind::Semicolon]).is_some() {
            None
        } else if self.matches(&[TokenKind::Var]).is_some() {
            Some(Box::new(self.var_declaration()?))
        } else {
            Some(Box::new(self.expression_statement()?))
        };

        let condition = match self.check(TokenKind::Semicolon) {
            true => None,
            false => Some(self.expression()?),
        };
        self.expect_one(TokenKind::Semicolon, "after loop condition")?;

        let increment = match self.check(TokenKind::RParen) {
            true => None,
            false => Some(self.expression()?),
        };
        self.expect_one(TokenKind::RParen, "after for clauses")?;

        let body = Box::new(self.loop_body()?);

        Ok(Stmt::For { initializer, condition, increment, body })
    }

    fn loop_body(&mut self) -> ParseResult<Stmt> {
        self.loop_depth += 1;
        let body = self.statement();
        self.loop_depth -= 1;

        body
    }

    // Reported without unwinding: the statement itself is well formed.
    fn loop_control(&mut self) -> ParseResult<Stmt> {
        let keyword = self.step();

        if self.loop_depth == 0 {
            self.errors.push(ParseError::at(
                &keyword,
                ParseErrorType::OutsideLoop { keyword: keyword.kind }
            ));
        }

        match keyword.kind {
            TokenKind::Break => {
                self.expect_one(TokenKind::Semicolon, "after 'break'")?;
                Ok(Stmt::Break)
            },
            _ => {
                self.expect_one(TokenKind::Semicolon, "after 'continue'")?;
                Ok(Stmt::Continue)
            }
        }
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expression = self.expression()?;
        self.expect_one(TokenKind::Semicolon, "after expression")?;

        Ok(Stmt::Expression(expression))
    }

    pub fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    // assignment -> <conditional> [= <assignment>]
    fn assignment(&mut self) -> ParseResult<Expr> {
        let target = self.conditional()?;

        let Some(equals) = self.matches(&[TokenKind::Assign]) else {
            return Ok(target);
        };

        let value = self.assignment()?;

        match target {
            Expr::Var(name) => Ok(Expr::Assign { name, value: Box::new(value) }),
            _ => parse_error(&equals, ParseErrorType::InvalidLValue),
        }
    }

    // conditional -> if ( <expression> ) <expression> else <expression> | <logic_or>
    fn conditional(&mut self) -> ParseResult<Expr> {
        if self.matches(&[TokenKind::If]).is_none() {
            return self.logic_or();
        }

        self.expect_one(TokenKind::LParen, "after 'if'")?;
        let condition = self.expression()?;
        self.expect_one(TokenKind::RParen, "after if condition")?;

        let then_branch = self.expression()?;
        self.expect_one(TokenKind::Else, "in if-expression")?;
        let else_branch = self.expression()?;

        Ok(Expr::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn logic_or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.logic_and()?;

        while let Some(operator) = self.matches(&[TokenKind::Or]) {
            let right = self.logic_and()?;
            expr = Expr::logical(operator, expr, right);
        }

        Ok(expr)
    }

    fn logic_and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while let Some(operator) = self.matches(&[TokenKind::And]) {
            let right = self.equality()?;
            expr = Expr::logical(operator, expr, right);
        }

        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        self.left_associative(&[TokenKind::EqualEqual, TokenKind::BangEqual], Self::comparison)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        self.left_associative(
            &[TokenKind::Less, TokenKind::Greater, TokenKind::LessEqual, TokenKind::GreaterEqual],
            Self::term
        )
    }

    fn term(&mut self) -> ParseResult<Expr> {
        self.left_associative(&[TokenKind::Plus, TokenKind::Minus], Self::factor)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        self.left_associative(&[TokenKind::Star, TokenKind::Slash, TokenKind::Percent], Self::power)
    }

    fn left_associative(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<Expr>
    ) -> ParseResult<Expr> {
        let mut expr = operand(self)?;

        while let Some(operator) = self.matches(operators) {
            let right = operand(self)?;
            expr = Expr::binary(operator, expr, right);
        }

        Ok(expr)
    }

    // power -> <unary> [** <power>]
    fn power(&mut self) -> ParseResult<Expr> {
        let base = self.unary()?;

        match self.matches(&[TokenKind::StarStar]) {
            Some(operator) => {
                let exponent = self.power()?;
                Ok(Expr::binary(operator, base, exponent))
            },
            None => Ok(base),
        }
    }

    // unary -> (! | -) <unary> | <prefix>
    fn unary(&mut self) -> ParseResult<Expr> {
        match self.matches(&[TokenKind::Bang, TokenKind::Minus]) {
            Some(operator) => {
                let operand = self.unary()?;
                Ok(Expr::unary(operator, operand, false))
            },
            None => self.prefix(),
        }
    }

    // prefix -> (++ | --) <primary> | <postfix>
    fn prefix(&mut self) -> ParseResult<Expr> {
        match self.matches(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) {
            Some(operator) => {
                let operand = self.primary()?;
                increment_target(&operator, &operand)?;

                Ok(Expr::unary(operator, operand, false))
            },
            None => self.postfix(),
        }
    }

    // postfix -> <primary> [++ | --]
    fn postfix(&mut self) -> ParseResult<Expr> {
        let operand = self.primary()?;

        match self.matches(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) {
            Some(operator) => {
                increment_target(&operator, &operand)?;

                Ok(Expr::unary(operator, operand, true))
            },
            None => Ok(operand),
        }
    }

    // primary -> true | false | <number> | <string> | <identifier> | ( <expression> )
    fn primary(&mut self) -> ParseResult<Expr> {
        match self.peek().kind {
            TokenKind::True
            | TokenKind::False
            | TokenKind::Number
            | TokenKind::String => {
                let token = self.step();

                Ok(Expr::Literal(literal_value(token)))
            },
            TokenKind::Ident => Ok(Expr::Var(self.step())),
            TokenKind::LParen => {
                self.step();
                let expression = self.expression()?;
                self.expect_one(TokenKind::RParen, "after expression")?;

                Ok(Expr::Grouping(Box::new(expression)))
            },
            _ => {
                let found = self.peek().describe();

                parse_error(self.peek(), ParseErrorType::ExpectedExpression { found })
            }
        }
    }
}

fn increment_target(operator: &Token, operand: &Expr) -> ParseResult<()> {
    match operand {
        Expr::Var(_) => Ok(()),
        _ => parse_error(operator, ParseErrorType::InvalidIncrementTarget),
    }
}

// Tokens from the lexer always carry their literal; hand-built ones may not.
fn literal_value(token: Token) -> Value {
    if let Some(value) = token.literal {
        return value;
    }

    match token.kind {
        TokenKind::True => Value::Boolean(true),
        TokenKind::False => Value::Boolean(false),
        TokenKind::Number => Value::Number(token.lexeme.parse().unwrap_or_default()),
        _ => Value::String(token.lexeme.trim_matches('"').to_string()),
    }
}

pub fn parse_tokens(tokens: Vec<Token>) -> Parsed {
    Parser::new(tokens).parse()
}

/// Lexes and parses `src`. Lexical errors stop the pipeline before parsing.
pub fn parse_module(src: &str) -> Result<Parsed, Vec<LexicalError>> {
    let lexed = lex(src);

    if lexed.had_error() {
        return Err(lexed.errors);
    }

    Ok(parse_tokens(lexed.tokens))
}
