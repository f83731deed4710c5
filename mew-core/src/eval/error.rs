use thiserror::Error;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("undeclared variable `{name}`")]
    UndeclaredVariable {
        name: String,
        location: SrcSpan
    },
    #[error("failed to write output: {err}")]
    Output {
        err: std::io::ErrorKind
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        Self::Output { err: err.kind() }
    }
}
