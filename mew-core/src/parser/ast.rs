use std::fmt::Display;

use crate::{
    environment::prelude::Value,
    lexer::prelude::{LexResult, Token},
    numeral,
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan
};

#[derive(Debug)]
pub struct Parsed {
    pub module: Module,
    pub comments: Vec<SrcSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub program: Program
}

// program -> { <statement> ; } EOF
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Program {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let mut statements = vec![];

        loop {
            match &parser.current_token {
                Some((_, Token::Eof, _)) => break,
                None => return parse_error(ParseErrorType::UnexpectedEof, parser.eof_span()),
                Some(_) => {}
            }

            let statement = Statement::parse(parser, None)?;
            parser.expect_semicolon(statement.location().end)?;

            statements.push(statement);
        }

        let start = statements.first()
            .map(|statement| statement.location().start)
            .unwrap_or_default();

        Ok(Self {
            statements,
            location: SrcSpan { start, end: parser.last_end() }
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{statement};"))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join("\n"))
    }
}

// statement -> <print> | <repeat> | <assignment> | <conditional>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assignment(Assignment),
    Print(Print),
    Conditional(Conditional),
    Repeat(Repeat),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Statement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, token, end) = match &parser.current_token {
            Some(spanned) => spanned.clone(),
            None => return parse_error(ParseErrorType::UnexpectedEof, parser.eof_span())
        };

        let res = match token {
            Token::Print => Self::Print(Print::parse(parser, None)?),
            Token::At => Self::Repeat(Repeat::parse(parser, None)?),
            Token::Ident(_) if matches!(parser.next_token, Some((_, Token::Assign, _))) => {
                Self::Assignment(Assignment::parse(parser, None)?)
            },
            token if token.starts_expression() => Self::Conditional(Conditional::parse(parser, None)?),
            token => return parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec![
                        "`::` to print".to_string(),
                        "`@` to repeat".to_string(),
                        "an assignment".to_string(),
                        "a condition".to_string(),
                    ]
                },
                SrcSpan { start, end }
            )
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assignment(assignment) => write!(f, "{assignment}"),
            Self::Print(print) => write!(f, "{print}"),
            Self::Conditional(conditional) => write!(f, "{conditional}"),
            Self::Repeat(repeat) => write!(f, "{repeat}")
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Assignment(assignment) => assignment.location,
            Self::Print(print) => print.location,
            Self::Conditional(conditional) => conditional.location,
            Self::Repeat(repeat) => repeat.location
        }
    }
}

// block -> <statement> ; { <statement> ; }
//
// A block ends at the first token that cannot start a statement, which is
// why a conditional or a loop is closed with an extra `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Block {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let mut statements = vec![];

        while parser.current_starts_statement() {
            let statement = Statement::parse(parser, None)?;
            parser.expect_semicolon(statement.location().end)?;

            statements.push(statement);
        }

        match statements.first() {
            Some(first) => {
                let location = SrcSpan {
                    start: first.location().start,
                    end: parser.last_end()
                };

                Ok(Self { statements, location })
            },
            None => parse_error(ParseErrorType::EmptyBlock, parser.current_span())
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{statement};"))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join(" "))
    }
}

// assignment -> <identifier> = <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub identifier: Identifier,
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Assignment {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let ident = parser.expect_ident()?;
        let start = ident.0;

        parser.expect_one(Token::Assign)?;

        let value = Expression::parse(parser, None)?;
        let end = value.location().end;

        Ok(Self {
            identifier: ident.into(),
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.identifier, self.value)
    }
}

// print -> :: <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub expression: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Print {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Print)?;

        let expression = Expression::parse(parser, None)?;
        let end = expression.location().end;

        Ok(Self {
            expression,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Print {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "::{}", self.expression)
    }
}

// conditional -> <expression> ? <block> [: <block>]
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Expression,
    pub resolution: Block,
    pub alternative: Option<Block>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Conditional {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let condition = Expression::parse(parser, None)?;
        let start = condition.location().start;

        if let Err(err) = parser.expect_one(Token::Question) {
            return match err.error {
                ParseErrorType::UnexpectedEof => Err(err),
                _ => parse_error(ParseErrorType::MissingQuestionMark, err.span)
            };
        }

        let resolution = Block::parse(parser, None)?;
        let mut end = resolution.location.end;

        let alternative = match parser.current_token {
            Some((_, Token::Colon, _)) => {
                parser.step();

                let alternative = Block::parse(parser, None)?;
                end = alternative.location.end;

                Some(alternative)
            },
            _ => None
        };

        Ok(Self {
            condition,
            resolution,
            alternative,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Conditional {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.alternative {
            Some(alternative) => write!(f, "{} ? {} : {}", self.condition, self.resolution, alternative),
            None => write!(f, "{} ? {}", self.condition, self.resolution)
        }
    }
}

// repeat -> @ <expression> : <block>
#[derive(Debug, Clone, PartialEq)]
pub struct Repeat {
    pub count: Expression,
    pub block: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Repeat {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::At)?;

        let count = Expression::parse(parser, None)?;

        if let Err(err) = parser.expect_one(Token::Colon) {
            return match err.error {
                ParseErrorType::UnexpectedEof => Err(err),
                _ => parse_error(ParseErrorType::MissingColon, err.span)
            };
        }

        let block = Block::parse(parser, None)?;
        let end = block.location.end;

        Ok(Self {
            count,
            block,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Repeat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}: {}", self.count, self.block)
    }
}

// expression -> <identifier> | <number> | <prefix> | <infix> | "(" <expression> ")"
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Number(Number),
    Prefix(Prefix),
    Infix(Infix),
    Nested {
        expression: Box<Expression>,
        location: SrcSpan
    }
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, token, end) = match &parser.current_token {
            Some(spanned) => spanned.clone(),
            None => return parse_error(ParseErrorType::UnexpectedEof, parser.eof_span())
        };

        let mut expr = match token {
            Token::Ident(value) => {
                parser.step();

                Self::Identifier(Identifier::from((start, value, end)))
            },
            Token::Number(raw) => {
                parser.step();

                Self::Number(Number {
                    raw,
                    location: SrcSpan { start, end }
                })
            },
            Token::Minus | Token::Tilda => Self::Prefix(Prefix::parse(parser, None)?),
            Token::LParen => {
                parser.step();

                let expression = Box::new(Expression::parse(parser, None)?);

                let (_, end) = match parser.expect_one(Token::RParen) {
                    Ok(span) => span,
                    Err(err) => return match err.error {
                        ParseErrorType::UnexpectedEof => Err(err),
                        _ => parse_error(ParseErrorType::MissingRParen, err.span)
                    }
                };

                Self::Nested {
                    expression,
                    location: SrcSpan { start, end }
                }
            },
            _ => return parse_error(
                ParseErrorType::ExpectedExpression,
                SrcSpan { start, end }
            )
        };

        while precedence.unwrap_or(Precedence::Lowest) < parser.current_precedence() {
            expr = Self::Infix(Infix::parse(parser, expr, precedence)?);
        }

        Ok(expr)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::Nested { expression, .. } => write!(f, "({expression})")
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(ident) => ident.location,
            Self::Number(number) => number.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Infix(infix) => infix.location,
            Self::Nested { location, .. } => *location
        }
    }

    /// Returns `true` if no identifier occurs anywhere in the expression.
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Identifier(_) => false,
            Self::Number(_) => true,
            Self::Prefix(prefix) => prefix.expression.is_constant(),
            Self::Infix(infix) => infix.left.is_constant() && infix.right.is_constant(),
            Self::Nested { expression, .. } => expression.is_constant()
        }
    }
}

// identifier -> (<letter> | _) { <letter> | <digit> | _ }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

// number -> mew { mew } [ . mew { mew } ]
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    pub raw: String,
    pub location: SrcSpan
}

impl Number {
    pub fn value(&self) -> Value {
        numeral::decode(&self.raw)
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl InfixOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        Some(match token {
            Token::Plus => Self::Add,
            Token::Minus => Self::Subtract,
            Token::Star => Self::Multiply,
            Token::Slash => Self::Divide,
            Token::Percent => Self::Modulo,
            Token::Power => Self::Power,
            Token::Equal => Self::Equal,
            Token::NotEqual => Self::NotEqual,
            Token::LessThan => Self::LessThan,
            Token::LessThanOrEqual => Self::LessOrEqual,
            Token::GreaterThan => Self::GreaterThan,
            Token::GreaterThanOrEqual => Self::GreaterOrEqual,
            _ => return None
        })
    }

    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "**",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
        }
    }
}

// infix -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub left: Box<Expression>,
    pub operator: InfixOperator,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for Infix {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();

        let SrcSpan { start, .. } = left.location();

        let operator = match &parser.current_token {
            Some((start, token, end)) => match InfixOperator::from_token(token) {
                Some(operator) => operator,
                None => return parse_error(
                    ParseErrorType::ExpectedOperator,
                    SrcSpan { start: *start, end: *end }
                )
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                parser.eof_span()
            )
        };

        parser.step();

        // `**` is right associative, so its right side may hold another `**`
        let right_precedence = match operator {
            InfixOperator::Power => Precedence::Product,
            _ => precedence
        };

        let right = Expression::parse(parser, Some(right_precedence))?;

        let SrcSpan { end, .. } = right.location();

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.as_literal(), self.right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Negate,
    AbsoluteValue,
}

impl PrefixOperator {
    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::AbsoluteValue => "~",
        }
    }
}

// prefix -> (- | ~) <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: PrefixOperator,
    pub expression: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Prefix {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, operator, end) = match parser.next_token() {
            Some((start, Token::Minus, end)) => (start, PrefixOperator::Negate, end),
            Some((start, Token::Tilda, end)) => (start, PrefixOperator::AbsoluteValue, end),
            Some((start, token, end)) => return parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["`-`".to_string(), "`~`".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => return parse_error(ParseErrorType::UnexpectedEof, parser.eof_span())
        };

        // binds tighter than `*` but looser than `**`, so `-mew ** mewmew` is `-(1 ** 2)`
        let expression = match Expression::parse(parser, Some(Precedence::Product)) {
            Ok(expression) => expression,
            Err(ParseError { error: ParseErrorType::ExpectedExpression, span }) => {
                return parse_error(
                    ParseErrorType::ExpectedExpression,
                    SrcSpan { start, end }.merge(span)
                )
            },
            Err(err) => return Err(err)
        };

        let end = expression.location().end;

        Ok(Self {
            operator,
            expression: Box::new(expression),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.operator.as_literal(), self.expression)
    }
}
