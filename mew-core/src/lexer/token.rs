#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // <letter>{<letter>|<digit>|_}
    Ident(String),
    // mew{mew}[.mew{mew}] kept raw, decoded during evaluation
    Number(String),
    // // comment until end of line
    Comment,

    // Operations of relation group
    Equal, // ==
    NotEqual, // !=
    LessThan, // <
    LessThanOrEqual, // <=
    GreaterThan, // >
    GreaterThanOrEqual, // >=

    // Operations of addition group
    Plus, // +
    Minus, // -

    // Operations of multiplication group
    Star, // *
    Slash, // /
    Percent, // %
    Power, // **

    // Unary operation
    Tilda, // ~

    // Assignment
    Assign, // =

    // Statement markers
    Print, // ::
    At, // @
    Question, // ?

    // Other delimiters
    Colon, // :
    Semicolon, // ;
    LParen, // (
    RParen, // )

    Eof,
}

impl Token {
    pub fn is_prefix_operator(&self) -> bool {
        matches!(self, Token::Minus | Token::Tilda)
    }

    pub fn starts_expression(&self) -> bool {
        matches!(
            self,
            Token::Ident(_) | Token::Number(_) | Token::LParen
        ) || self.is_prefix_operator()
    }

    pub fn starts_statement(&self) -> bool {
        matches!(self, Token::Print | Token::At) || self.starts_expression()
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Number(value) => value.clone(),
            Token::Comment => "//".to_string(),

            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::LessThan => "<".to_string(),
            Token::LessThanOrEqual => "<=".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::GreaterThanOrEqual => ">=".to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),
            Token::Power => "**".to_string(),
            Token::Tilda => "~".to_string(),
            Token::Assign => "=".to_string(),
            Token::Print => "::".to_string(),
            Token::At => "@".to_string(),
            Token::Question => "?".to_string(),
            Token::Colon => ":".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),

            Token::Eof => "end of file".to_string(),
        }
    }
}
