use super::error::{LexicalError, LexicalErrorType};
use super::token::{Token, TokenKind};
use crate::environment::prelude::Value;
use crate::utils::prelude::SrcSpan;

pub type LexResult = std::result::Result<Token, LexicalError>;

pub fn str_to_keyword(word: &str) -> Option<TokenKind> {
	Some(match word {
		"var" => TokenKind::Var,
		"print" => TokenKind::Print,
		"true" => TokenKind::True,
		"false" => TokenKind::False,
		"and" => TokenKind::And,
		"or" => TokenKind::Or,
		"if" => TokenKind::If,
		"else" => TokenKind::Else,
		"while" => TokenKind::While,
		"for" => TokenKind::For,
		"break" => TokenKind::Break,
		"continue" => TokenKind::Continue,
		"class" => TokenKind::Class,
		"fn" => TokenKind::Fn,
		"return" => TokenKind::Return,

		_ => return None
	})
}

/// Whole-input scan result. Scanning never stops at an error, so both
/// lists may be non-empty; `tokens` always ends with `Eof`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Lexed {
	pub tokens: Vec<Token>,
	pub errors: Vec<LexicalError>,
}

impl Lexed {
	pub fn had_error(&self) -> bool {
		!self.errors.is_empty()
	}
}

pub fn lex(src: &str) -> Lexed {
	Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c))).tokenize()
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	line: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,
	finished: bool,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			line: 1,
			ch: None,
			next_ch: None,
			input,
			finished: false,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	pub fn tokenize(self) -> Lexed {
		let mut lexed = Lexed::default();

		for result in self {
			match result {
				Ok(token) => lexed.tokens.push(token),
				Err(err) => lexed.errors.push(err),
			}
		}

		lexed
	}

	pub fn next_token(&mut self) -> LexResult {
		self.skip_trivia();

		let start = self.position;
		let line = self.line;

		let ch = match self.ch {
			Some(ch) => ch,
			None => return Ok(Token::new(TokenKind::Eof, "", line, SrcSpan::from(start, start))),
		};

		match ch {
			'(' => Ok(self.eat_one_char(TokenKind::LParen)),
			')' => Ok(self.eat_one_char(TokenKind::RParen)),
			'{' => Ok(self.eat_one_char(TokenKind::LBrace)),
			'}' => Ok(self.eat_one_char(TokenKind::RBrace)),
			'[' => Ok(self.eat_one_char(TokenKind::LBracket)),
			']' => Ok(self.eat_one_char(TokenKind::RBracket)),
			',' => Ok(self.eat_one_char(TokenKind::Comma)),
			';' => Ok(self.eat_one_char(TokenKind::Semicolon)),
			'/' => Ok(self.eat_one_char(TokenKind::Slash)),
			'%' => Ok(self.eat_one_char(TokenKind::Percent)),
			'=' => Ok(self.eat_one_or_two('=', TokenKind::EqualEqual, TokenKind::Assign)),
			'!' => Ok(self.eat_one_or_two('=', TokenKind::BangEqual, TokenKind::Bang)),
			'<' => Ok(self.eat_one_or_two('=', TokenKind::LessEqual, TokenKind::Less)),
			'>' => Ok(self.eat_one_or_two('=', TokenKind::GreaterEqual, TokenKind::Greater)),
			'*' => Ok(self.eat_one_or_two('*', TokenKind::StarStar, TokenKind::Star)),
			'+' => Ok(self.eat_one_or_two('+', TokenKind::PlusPlus, TokenKind::Plus)),
			'-' => Ok(match self.next_ch {
				Some('>') => self.eat_two_chars(TokenKind::Arrow),
				_ => self.eat_one_or_two('-', TokenKind::MinusMinus, TokenKind::Minus),
			}),
			'"' => self.lex_string(),
			'0'..='9' => Ok(self.lex_number()),
			c if c.is_ascii_alphabetic() || c == '_' => Ok(self.lex_ident()),
			c => {
				let _ = self.next_char();

				Err(LexicalError {
					error: LexicalErrorType::UnrecognizedToken { tok: c },
					line,
					location: SrcSpan::from(start, self.position),
				})
			}
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		self.position = self.next_position;

		let next = self.input.next();

		self.next_position = match (next, self.next_ch) {
			(Some((pos, _)), _) => pos,
			(None, Some(last)) => self.next_position + last.len_utf8() as u32,
			(None, None) => self.next_position,
		};

		self.ch = self.next_ch;
		self.next_ch = next.map(|(_, ch)| ch);

		ch
	}

	// Whitespace, newlines and `#` line comments.
	fn skip_trivia(&mut self) {
		loop {
			match self.ch {
				Some(' ' | '\t' | '\r' | '\x0C') => {
					let _ = self.next_char();
				},
				Some('\n') => {
					self.line += 1;
					let _ = self.next_char();
				},
				Some('#') => {
					while !matches!(self.ch, Some('\n') | None) {
						let _ = self.next_char();
					}
				},
				_ => break
			}
		}
	}

	fn eat_one_char(&mut self, kind: TokenKind) -> Token {
		let start = self.position;
		let mut lexeme = String::new();
		lexeme.extend(self.next_char());

		Token::new(kind, lexeme, self.line, SrcSpan::from(start, self.position))
	}

	fn eat_two_chars(&mut self, kind: TokenKind) -> Token {
		let start = self.position;
		let mut lexeme = String::new();
		lexeme.extend(self.next_char());
		lexeme.extend(self.next_char());

		Token::new(kind, lexeme, self.line, SrcSpan::from(start, self.position))
	}

	fn eat_one_or_two(&mut self, second: char, double: TokenKind, single: TokenKind) -> Token {
		if self.next_ch == Some(second) {
			self.eat_two_chars(double)
		} else {
			self.eat_one_char(single)
		}
	}

	fn lex_ident(&mut self) -> Token {
		let start = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}
			ident.extend(self.next_char());
		}

		let location = SrcSpan::from(start, self.position);
		let kind = str_to_keyword(&ident).unwrap_or(TokenKind::Ident);

		let token = Token::new(kind, ident, self.line, location);

		match kind {
			TokenKind::True => token.with_literal(Value::Boolean(true)),
			TokenKind::False => token.with_literal(Value::Boolean(false)),
			_ => token
		}
	}

	fn lex_number(&mut self) -> Token {
		let start = self.position;
		let mut value = String::new();

		while matches!(self.ch, Some(ch) if ch.is_ascii_digit()) {
			value.extend(self.next_char());
		}

		// a fractional part needs a digit right after the dot
		if self.ch == Some('.') && matches!(self.next_ch, Some(ch) if ch.is_ascii_digit()) {
			value.extend(self.next_char());

			while matches!(self.ch, Some(ch) if ch.is_ascii_digit()) {
				value.extend(self.next_char());
			}
		}

		// digits with an optional `.digits` tail always parse
		let number = value.parse::<f64>().unwrap_or_default();
		let location = SrcSpan::from(start, self.position);

		Token::new(TokenKind::Number, value, self.line, location)
			.with_literal(Value::Number(number))
	}

	fn lex_string(&mut self) -> LexResult {
		let start = self.position;
		let start_line = self.line;

		let _ = self.next_char(); // skip opening quote

		let mut value = String::new();

		loop {
			match self.ch {
				Some('"') => break,
				Some(ch) => {
					if ch == '\n' {
						self.line += 1;
					}
					value.extend(self.next_char());
				},
				None => return Err(LexicalError {
					error: LexicalErrorType::UnterminatedString,
					line: start_line,
					location: SrcSpan::from(start, self.position),
				})
			}
		}

		let _ = self.next_char(); // skip closing quote

		let location = SrcSpan::from(start, self.position);

		Ok(Token::new(TokenKind::String, format!("\"{value}\""), start_line, location)
			.with_literal(Value::String(value)))
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if matches!(&token, Ok(token) if token.is(TokenKind::Eof)) {
			self.finished = true;
		}

		Some(token)
	}
}
