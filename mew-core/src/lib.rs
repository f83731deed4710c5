pub mod lexer;
pub mod parser;
pub mod numeral;
pub mod environment;
pub mod analyzer;
pub mod eval;
pub mod utils;
