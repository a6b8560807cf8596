use pretty_assertions::assert_eq;

use crate::environment::prelude::Value;
use crate::utils::prelude::SrcSpan;

use super::prelude::{lex, Lexer, LexicalError, LexicalErrorType, TokenKind};

fn kinds(src: &str) -> Vec<TokenKind> {
    let lexed = lex(src);
    assert!(!lexed.had_error(), "unexpected lexical errors: {:?}", lexed.errors);

    lexed.tokens.iter().map(|token| token.kind).collect()
}

#[test]
fn test_numbers() -> std::result::Result<(), LexicalError> {
    let input = r#"
        10
        1.5
        0.25
        7.
    "#;

    let mut lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));

    let expected = vec![10.0, 1.5, 0.25, 7.0];

    for (idx, number) in expected.iter().enumerate() {
        let token = lexer.next_token()?;

        assert_eq!(
            token.literal,
            Some(Value::Number(*number)),
            "Next token does not match expected number at {}",
            idx
        );
    }

    // `7.` leaves the period behind as an unknown character
    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.error, LexicalErrorType::UnrecognizedToken { tok: '.' });

    Ok(())
}

#[test]
fn test_operators_are_greedy() {
    assert_eq!(
        kinds("== != <= >= ** ++ -- -> = ! < > * + - / %"),
        vec![
            TokenKind::EqualEqual,
            TokenKind::BangEqual,
            TokenKind::LessEqual,
            TokenKind::GreaterEqual,
            TokenKind::StarStar,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::Arrow,
            TokenKind::Assign,
            TokenKind::Bang,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Star,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Eof,
        ]
    );

    assert_eq!(
        kinds("a+++b"),
        vec![TokenKind::Ident, TokenKind::PlusPlus, TokenKind::Plus, TokenKind::Ident, TokenKind::Eof]
    );
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("var print true false and or if else while for break continue class fn return variable _x"),
        vec![
            TokenKind::Var,
            TokenKind::Print,
            TokenKind::True,
            TokenKind::False,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::Class,
            TokenKind::Fn,
            TokenKind::Return,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_strings_and_lines() {
    let lexed = lex("print \"hello\nworld\";\n# comment ; var\nx");

    assert!(!lexed.had_error());

    let string = &lexed.tokens[1];
    assert_eq!(string.kind, TokenKind::String);
    assert_eq!(string.literal, Some(Value::String("hello\nworld".into())));
    assert_eq!(string.lexeme, "\"hello\nworld\"");
    assert_eq!(string.line, 1);

    let semicolon = &lexed.tokens[2];
    assert_eq!(semicolon.kind, TokenKind::Semicolon);
    assert_eq!(semicolon.line, 2);

    let ident = &lexed.tokens[3];
    assert_eq!(ident.kind, TokenKind::Ident);
    assert_eq!(ident.lexeme, "x");
    assert_eq!(ident.line, 4);

    assert_eq!(lexed.tokens.len(), 5);
}

#[test]
fn test_errors_do_not_stop_scanning() {
    let lexed = lex("var a = 1 @ 2;\nprint \"open");

    assert_eq!(lexed.errors.len(), 2);
    assert_eq!(lexed.errors[0].error, LexicalErrorType::UnrecognizedToken { tok: '@' });
    assert_eq!(lexed.errors[0].line, 1);
    assert_eq!(lexed.errors[0].location, SrcSpan::from(10, 11));
    assert_eq!(lexed.errors[1].error, LexicalErrorType::UnterminatedString);
    assert_eq!(lexed.errors[1].line, 2);

    let kinds = lexed.tokens.iter().map(|token| token.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Var,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Print,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_spans_and_empty_input() {
    let lexed = lex("");
    assert_eq!(lexed.tokens.len(), 1);
    assert_eq!(lexed.tokens[0].kind, TokenKind::Eof);
    assert_eq!(lexed.tokens[0].location, SrcSpan::from(0, 0));

    let lexed = lex("ab >= \"é\"");
    assert_eq!(lexed.tokens[0].location, SrcSpan::from(0, 2));
    assert_eq!(lexed.tokens[1].location, SrcSpan::from(3, 5));
    assert_eq!(lexed.tokens[2].location, SrcSpan::from(6, 10));
    assert_eq!(lexed.tokens[3].location, SrcSpan::from(10, 10));
}
