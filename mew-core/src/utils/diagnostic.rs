use std::path::Path;

use codespan_reporting::{
    diagnostic::{Diagnostic as CodespanDiagnostic, Label, Severity},
    files::SimpleFiles,
    term::{self, Config},
};
use termcolor::Buffer;

use super::src_span::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Severity::Error,
            Level::Warning => Severity::Warning,
        }
    }
}

/// The one place in a source file a diagnostic points at.
#[derive(Debug, Clone)]
pub struct Location<'a> {
    pub src: &'a str,
    pub path: &'a Path,
    pub span: SrcSpan,
    pub label: Option<String>,
}

/// A renderable error or warning: a title, optional notes and at most one
/// underlined span.
#[derive(Debug, Clone)]
pub struct Diagnostic<'a> {
    pub title: String,
    pub notes: Vec<String>,
    pub level: Level,
    pub location: Option<Location<'a>>,
}

impl<'a> Diagnostic<'a> {
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Level::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(Level::Warning, title)
    }

    fn new(level: Level, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            notes: vec![],
            level,
            location: None,
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn notes(mut self, notes: impl IntoIterator<Item = String>) -> Self {
        self.notes.extend(notes);
        self
    }

    /// Points the diagnostic at `span` inside `src`. Spans running past the
    /// end of the source are pulled back inside it.
    pub fn at(mut self, path: &'a Path, src: &'a str, span: SrcSpan, label: Option<&str>) -> Self {
        self.location = Some(Location {
            src,
            path,
            span: span.clamp_to(src.len() as u32),
            label: label.map(String::from),
        });
        self
    }

    pub fn write(&self, buf: &mut Buffer) {
        let mut files = SimpleFiles::new();

        let labels = match &self.location {
            Some(location) => {
                let file_id = files.add(location.path.to_string_lossy(), location.src);
                let range = (location.span.start as usize)..(location.span.end as usize);

                let label = Label::primary(file_id, range);

                vec![match &location.label {
                    Some(text) => label.with_message(text),
                    None => label,
                }]
            },
            None => vec![],
        };

        let diagnostic = CodespanDiagnostic::new(self.level.into())
            .with_message(&self.title)
            .with_labels(labels)
            .with_notes(self.notes.clone());

        term::emit(buf, &Config::default(), &files, &diagnostic)
            .expect("write_diagnostic");
    }
}
