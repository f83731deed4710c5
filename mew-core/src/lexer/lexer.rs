use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use std::fmt::Display;
use crate::numeral::{is_syllable_run, SEPARATOR};
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tnext_position: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.next_position, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
			next_ch: None,
            input,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
		while matches!(self.ch, Some(ch) if ch.is_whitespace()) {
			self.next_char();
		}

		let span = match self.ch {
			Some(ch) => match ch {
				'/' if self.next_ch == Some('/') => return Ok(self.lex_comment()),
				'*' if self.next_ch == Some('*') => self.eat_two_chars(Token::Power),
				':' if self.next_ch == Some(':') => self.eat_two_chars(Token::Print),
				'=' if self.next_ch == Some('=') => self.eat_two_chars(Token::Equal),
				'!' if self.next_ch == Some('=') => self.eat_two_chars(Token::NotEqual),
				'<' if self.next_ch == Some('=') => self.eat_two_chars(Token::LessThanOrEqual),
				'>' if self.next_ch == Some('=') => self.eat_two_chars(Token::GreaterThanOrEqual),
				'/' => self.eat_one_char(Token::Slash),
				'*' => self.eat_one_char(Token::Star),
				':' => self.eat_one_char(Token::Colon),
				'=' => self.eat_one_char(Token::Assign),
				'<' => self.eat_one_char(Token::LessThan),
				'>' => self.eat_one_char(Token::GreaterThan),
				'+' => self.eat_one_char(Token::Plus),
				'-' => self.eat_one_char(Token::Minus),
				'%' => self.eat_one_char(Token::Percent),
				'~' => self.eat_one_char(Token::Tilda),
				'@' => self.eat_one_char(Token::At),
				'?' => self.eat_one_char(Token::Question),
				';' => self.eat_one_char(Token::Semicolon),
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'a'..='z' | 'A'..='Z' | '_' | SEPARATOR => {
					return self.lex_word();
				},
				'0'..='9' => {
					return Err(self.unexpected_char(LexicalErrorType::DigitLiteral { digit: ch }));
				},
				c => {
					return Err(self.unexpected_char(LexicalErrorType::UnrecognizedToken { tok: c }));
				}
			},
			None => {
				self.eat_one_char(Token::Eof)
			}
		};

		Ok(span)
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += self.next_ch.map_or(0, |ch| ch.len_utf8() as u32);

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_two_chars(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	// The offending character is skipped so the next call makes progress.
	fn unexpected_char(&mut self, error: LexicalErrorType) -> LexicalError {
		let start = self.position;
		self.next_char();

		LexicalError {
			error,
			location: SrcSpan::from(start, self.position),
		}
	}

	fn take_word(&mut self) -> String {
		let mut word = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}

			word.push(ch);
			self.next_char();
		}

		word
	}

	// Words made only of `mew` syllables are numbers, everything else is an identifier.
	// A leading period means the integer run is empty (`.mew` is 0.1).
	fn lex_word(&mut self) -> LexResult {
		let start_pos = self.position;
		let mut word = self.take_word();

		if !word.is_empty() && !is_syllable_run(&word) {
			return Ok((start_pos, Token::Ident(word), self.position));
		}

		if self.ch == Some(SEPARATOR) {
			word.push(SEPARATOR);
			self.next_char();

			let fraction = self.take_word();

			if fraction.is_empty() {
				return Err(LexicalError {
					error: LexicalErrorType::MissingSyllablesAfterPeriod,
					location: SrcSpan::from(start_pos, self.position)
				});
			}

			if !is_syllable_run(&fraction) {
				return Err(LexicalError {
					error: LexicalErrorType::MalformedFraction,
					location: SrcSpan::from(start_pos, self.position)
				});
			}

			word.push_str(&fraction);

			if self.ch == Some(SEPARATOR) {
				while matches!(self.ch, Some(ch) if ch == SEPARATOR || ch.is_ascii_alphanumeric()) {
					self.next_char();
				}

				return Err(LexicalError {
					error: LexicalErrorType::MultiplePeriods,
					location: SrcSpan::from(start_pos, self.position)
				});
			}
		}

		Ok((start_pos, Token::Number(word), self.position))
	}

	fn lex_comment(&mut self) -> Spanned {
		let start_pos = self.position;

		while !matches!(self.ch, Some('\n') | None) {
			self.next_char();
		}

		(start_pos, Token::Comment, self.position)
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		let token = self.next_token();

		Some(token)
	}
}

/// Lexes a whole string, stopping after `Eof` or the first error.
pub fn lex(src: &str) -> Result<Vec<Spanned>, LexicalError> {
	let mut lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
	let mut tokens = vec![];

	loop {
		let spanned = lexer.next_token()?;
		let is_eof = spanned.1 == Token::Eof;

		tokens.push(spanned);

		if is_eof {
			return Ok(tokens);
		}
	}
}
