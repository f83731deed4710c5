use pretty_assertions::assert_eq;

use super::prelude::{lex, Lexer, LexicalError, LexicalErrorType, Token};

fn tokens(input: &str) -> Result<Vec<Token>, LexicalError> {
    Ok(lex(input)?
        .into_iter()
        .map(|(_, token, _)| token)
        .collect())
}

#[test]
fn test_numbers() -> Result<(), LexicalError> {
    let input = r#"
        mew
        mewmewmew
        mewmew.mewmewmew
        .mew
    "#;

    assert_eq!(tokens(input)?, vec![
        Token::Number("mew".into()),
        Token::Number("mewmewmew".into()),
        Token::Number("mewmew.mewmewmew".into()),
        Token::Number(".mew".into()),
        Token::Eof,
    ]);

    Ok(())
}

#[test]
fn test_identifiers() -> Result<(), LexicalError> {
    let input = "m mewx Mew me _mew cat9 mew_mew";

    assert_eq!(tokens(input)?, vec![
        Token::Ident("m".into()),
        Token::Ident("mewx".into()),
        Token::Ident("Mew".into()),
        Token::Ident("me".into()),
        Token::Ident("_mew".into()),
        Token::Ident("cat9".into()),
        Token::Ident("mew_mew".into()),
        Token::Eof,
    ]);

    Ok(())
}

#[test]
fn test_operators() -> Result<(), LexicalError> {
    let input = "= == != < <= > >= + - * ** / % ~ :: : @ ? ; ( )";

    assert_eq!(tokens(input)?, vec![
        Token::Assign,
        Token::Equal,
        Token::NotEqual,
        Token::LessThan,
        Token::LessThanOrEqual,
        Token::GreaterThan,
        Token::GreaterThanOrEqual,
        Token::Plus,
        Token::Minus,
        Token::Star,
        Token::Power,
        Token::Slash,
        Token::Percent,
        Token::Tilda,
        Token::Print,
        Token::Colon,
        Token::At,
        Token::Question,
        Token::Semicolon,
        Token::LParen,
        Token::RParen,
        Token::Eof,
    ]);

    Ok(())
}

#[test]
fn test_input() -> Result<(), LexicalError> {
    let input = r#"
        // a loop that counts to four
        m = mew;
        @mewmewmew: m = m + mew; ;
        ::m;
    "#;

    assert_eq!(tokens(input)?, vec![
        Token::Comment,
        Token::Ident("m".into()),
        Token::Assign,
        Token::Number("mew".into()),
        Token::Semicolon,
        Token::At,
        Token::Number("mewmewmew".into()),
        Token::Colon,
        Token::Ident("m".into()),
        Token::Assign,
        Token::Ident("m".into()),
        Token::Plus,
        Token::Number("mew".into()),
        Token::Semicolon,
        Token::Semicolon,
        Token::Print,
        Token::Ident("m".into()),
        Token::Semicolon,
        Token::Eof,
    ]);

    Ok(())
}

#[test]
fn test_if_else_markers() -> Result<(), LexicalError> {
    // `: ::` is an else followed by a print, `:::` greedily takes the print marker first
    assert_eq!(tokens("? ::mew; : ::mew;")?, vec![
        Token::Question,
        Token::Print,
        Token::Number("mew".into()),
        Token::Semicolon,
        Token::Colon,
        Token::Print,
        Token::Number("mew".into()),
        Token::Semicolon,
        Token::Eof,
    ]);

    assert_eq!(tokens(":::")?, vec![Token::Print, Token::Colon, Token::Eof]);

    Ok(())
}

#[test]
fn test_spans() -> Result<(), LexicalError> {
    let spanned = lex("x = mewmew;")?;

    assert_eq!(spanned, vec![
        (0, Token::Ident("x".into()), 1),
        (2, Token::Assign, 3),
        (4, Token::Number("mewmew".into()), 10),
        (10, Token::Semicolon, 11),
        (11, Token::Eof, 11),
    ]);

    Ok(())
}

#[test]
fn test_empty_input() -> Result<(), LexicalError> {
    assert_eq!(lex("")?, vec![(0, Token::Eof, 0)]);
    assert_eq!(lex("   \n\t")?, vec![(5, Token::Eof, 5)]);

    Ok(())
}

#[test]
fn test_invalid_input() {
    let fails = [
        ("2", LexicalErrorType::DigitLiteral { digit: '2' }),
        ("$", LexicalErrorType::UnrecognizedToken { tok: '$' }),
        ("!", LexicalErrorType::UnrecognizedToken { tok: '!' }),
        ("mew.", LexicalErrorType::MissingSyllablesAfterPeriod),
        (".", LexicalErrorType::MissingSyllablesAfterPeriod),
        ("mew.mewx", LexicalErrorType::MalformedFraction),
        ("mew.mew.mew", LexicalErrorType::MultiplePeriods),
    ];

    for (input, fail) in fails {
        match lex(input) {
            Err(err) => assert_eq!(err.error, fail, "lexing `{input}`"),
            Ok(tokens) => panic!("Expected {fail:?} for `{input}`, but got Ok({tokens:?})"),
        }
    }
}

#[test]
fn test_recovers_after_error() {
    let mut lexer = Lexer::new("$ mew".char_indices().map(|(i, c)| (i as u32, c)));

    let err = lexer.next_token().expect_err("`$` is not a token");
    assert_eq!(err.location.start, 0);
    assert_eq!(err.location.end, 1);

    assert_eq!(lexer.next_token(), Ok((2, Token::Number("mew".into()), 5)));
}
