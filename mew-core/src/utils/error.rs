use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::RuntimeError,
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan,
};
use super::diagnostic::Diagnostic;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("program stopped: {error}")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic<'_>> {
        match self {
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();

                let span = if error.error == ParseErrorType::UnexpectedEof {
                    SrcSpan::from(src.len() as u32, src.len() as u32)
                } else {
                    error.span
                };

                let title = match error.error {
                    ParseErrorType::LexError { .. } => "Lexical error",
                    _ => "Syntax error",
                };

                vec![Diagnostic::error(title)
                    .at(path, src, span, Some(label))
                    .notes(extra)]
            },
            Error::Runtime { path, src, error } => match error {
                RuntimeError::UndeclaredVariable { name, location } => {
                    vec![Diagnostic::error("Undeclared variable")
                        .at(path, src, *location, Some("Not assigned yet"))
                        .note(format!("Variable `{name}` is read before anything is assigned to it."))]
                },
                RuntimeError::Output { err } => {
                    vec![Diagnostic::error("Failed to write output").note(err.to_string())]
                }
            },
            Error::StdIo { err } => {
                vec![Diagnostic::error("Standard IO error").note(err.to_string())]
            }
        }
    }
}
