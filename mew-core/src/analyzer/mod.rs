pub mod error;
pub mod analyzer;

pub mod prelude {
    pub use super::{
        analyzer::*,
        error::*,
        Analyzed
    };
}

use std::{io::BufReader, path::PathBuf, rc::Rc};

use utf8_chars::BufReadCharsExt;

use crate::{
    analyzer::prelude::ModuleAnalyzer,
    parser::prelude::{parse_module, parse_module_from_stream, Module, Parsed},
    utils::prelude::{Error, ModuleWarningEmitter, WarningEmitter, WarningEmitterIO}
};

/// A parsed module together with the source it came from.
#[derive(Debug, Clone)]
pub struct Analyzed {
    pub path: PathBuf,
    pub src: String,
    pub module: Module,
}

/// Parses and analyzes source that is already in memory.
pub fn analyze_source(
    path: PathBuf,
    src: String,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<Analyzed, Error> {
    match parse_module(&src) {
        Ok(parsed) => Ok(finish(path, src, parsed, warnings)),
        Err(error) => Err(Error::Parse { path, src, error })
    }
}

pub fn analyze(
    path: PathBuf,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<Analyzed, Error> {
    let src = std::fs::read_to_string(&path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    analyze_source(path, src, warnings)
}

/// Same as [`analyze`], but lexes the file while it is being read.
#[tracing::instrument(level = "debug", skip(warnings))]
pub fn analyze_from_stream(
    path: PathBuf,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<Analyzed, Error> {
    let file = std::fs::File::open(&path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut io_error = None;
    let mut reader = BufReader::new(file);

    let stream = reader.chars()
        .map_while(|c| match c {
            Ok(c) => {
                src.push(c);
                Some(c)
            },
            Err(err) => {
                io_error = Some(err.kind());
                None
            }
        });

    let parsed = parse_module_from_stream(stream);

    if let Some(err) = io_error {
        return Err(Error::StdIo { err });
    }

    match parsed {
        Ok(parsed) => Ok(finish(path, src, parsed, warnings)),
        Err(error) => {
            // A syntax error can stop the lexer early, the diagnostic still needs the rest
            for c in reader.chars() {
                src.push(c.map_err(|err| Error::StdIo { err: err.kind() })?);
            }

            Err(Error::Parse { path, src, error })
        }
    }
}

fn finish(
    path: PathBuf,
    src: String,
    parsed: Parsed,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Analyzed {
    let warnings = ModuleWarningEmitter::new(
        path.clone(),
        src.clone(),
        WarningEmitter::new(warnings)
    );

    ModuleAnalyzer::analyze(&parsed.module, &warnings);

    Analyzed { path, src, module: parsed.module }
}
