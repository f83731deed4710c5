use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use crate::{
    analyzer::prelude::Warning as AnalyzerWarning,
    eval::RuntimeError,
    parser::prelude::parse_module,
    utils::prelude::{Diagnostic, Error, Level, SrcSpan, Warning}
};

#[test]
fn test_clamp_to() {
    assert_eq!(SrcSpan::from(2, 5).clamp_to(10), SrcSpan::from(2, 5));
    assert_eq!(SrcSpan::from(2, 15).clamp_to(10), SrcSpan::from(2, 10));
    assert_eq!(SrcSpan::from(12, 15).clamp_to(10), SrcSpan::from(10, 10));
}

#[test]
fn test_runtime_error_span_outside_source() {
    let err = Error::Runtime {
        path: PathBuf::from("cat.mew"),
        src: "::y;".into(),
        error: RuntimeError::UndeclaredVariable {
            name: "y".into(),
            location: SrcSpan::from(40, 41),
        },
    };

    let diagnostics = err.to_diagnostics();
    assert_eq!(diagnostics.len(), 1);

    let location = diagnostics[0].location.as_ref().expect("points into the source");
    assert_eq!(location.span, SrcSpan::from(4, 4));

    let rendered = err.pretty_string();
    assert!(rendered.contains("error: Undeclared variable"));
    assert!(rendered.contains("Variable `y` is read before anything is assigned to it."));
}

#[test]
fn test_runtime_error_underlines_the_name() {
    let src = "// café\n::mew;\n::y;\n";
    let err = Error::Runtime {
        path: PathBuf::from("cat.mew"),
        src: src.into(),
        error: RuntimeError::UndeclaredVariable {
            name: "y".into(),
            location: SrcSpan::from(18, 19),
        },
    };

    let diagnostics = err.to_diagnostics();
    let location = diagnostics[0].location.as_ref().expect("points into the source");

    assert_eq!(&src[location.span.start as usize..location.span.end as usize], "y");
    assert_eq!(location.label.as_deref(), Some("Not assigned yet"));
    assert!(err.pretty_string().contains("cat.mew:3:3"));
}

#[test]
fn test_parse_error_at_end_of_file() {
    let src = "::(mew";
    let error = parse_module(src).expect_err("unclosed paren");

    let err = Error::Parse { path: PathBuf::from("cat.mew"), src: src.into(), error };
    let diagnostics = err.to_diagnostics();
    let location = diagnostics[0].location.as_ref().expect("points into the source");

    assert!(location.span.end as usize <= src.len());
    assert!(err.pretty_string().contains("Syntax error"));
}

#[test]
fn test_io_error_has_no_location() {
    let err = Error::StdIo { err: std::io::ErrorKind::NotFound };
    let diagnostics = err.to_diagnostics();

    assert!(diagnostics[0].location.is_none());
    assert_eq!(diagnostics[0].notes, vec![std::io::ErrorKind::NotFound.to_string()]);
    assert!(err.pretty_string().starts_with("error: Standard IO error"));
}

#[test]
fn test_warning_diagnostic() {
    let warning = Warning::Analysis {
        path: PathBuf::from("cat.mew"),
        src: "@mew - mew: ::mew; ;".into(),
        warning: AnalyzerWarning::UnreachableLoopBody { location: SrcSpan::from(12, 18) },
    };

    let diagnostic = warning.to_diagnostic();

    assert_eq!(diagnostic.level, Level::Warning);
    assert_eq!(diagnostic.title, "Unreachable loop body");
    assert!(warning.pretty_string().contains("This never runs"));
}

#[test]
fn test_diagnostic_builder() {
    let diagnostic = Diagnostic::error("Oops")
        .at(Path::new("cat.mew"), "mew", SrcSpan::from(0, 3), None)
        .note("first")
        .notes(vec!["second".to_string()]);

    assert_eq!(diagnostic.level, Level::Error);
    assert_eq!(diagnostic.notes, vec!["first".to_string(), "second".to_string()]);

    let mut buf = termcolor::Buffer::no_color();
    diagnostic.write(&mut buf);
    let rendered = String::from_utf8(buf.into_inner()).expect("utf8 output");

    assert!(rendered.contains("cat.mew:1:1"));
    assert!(rendered.contains("= first"));
    assert!(rendered.contains("= second"));
}
