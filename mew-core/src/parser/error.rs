use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedIdent,
    ExpectedExpression,
    ExpectedOperator,
    UnexpectedEof,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    EmptyBlock,
    MissingQuestionMark,
    MissingColon,
    MissingSemicolon,
    MissingRParen,
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl From<LexicalError> for ParseError {
    fn from(error: LexicalError) -> Self {
        Self {
            span: error.location,
            error: ParseErrorType::LexError { error },
        }
    }
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedIdent => ("Expected identifier", vec![]),
            ParseErrorType::ExpectedExpression => ("Expected expression", vec![
                "An expression starts with an identifier, a `mew` number, `-`, `~` or `(`".to_string()
            ]),
            ParseErrorType::ExpectedOperator => ("Expected operator", vec![]),
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = match token {
                    Token::Number(_) => "a Number".to_string(),
                    Token::Ident(_) => "an Identifier".to_string(),
                    Token::Eof => "the end of file".to_string(),
                    _ => format!("`{}`", token.as_literal())
                };

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            },
            ParseErrorType::UnexpectedEof => ("Unexpected end of file", vec![]),
            ParseErrorType::EmptyBlock => ("Expected at least one statement here", vec![
                "A block is one or more statements, each ending with `;`".to_string()
            ]),
            ParseErrorType::MissingQuestionMark => ("Missing `?` after condition", vec![
                "Statements are `name = expr`, `::expr`, `@count: ...` or `condition ? ...`".to_string()
            ]),
            ParseErrorType::MissingColon => ("Missing `:` after repeat count", vec![]),
            ParseErrorType::MissingSemicolon => ("Missing semicolon", vec![]),
            ParseErrorType::MissingRParen => ("Missing closing `)`", vec![]),
            ParseErrorType::LexError { error } => error.details()
        }
    }
}
