mod cli;
mod repl;

use std::{
    io::{BufWriter, ErrorKind, Write},
    path::PathBuf,
    process::ExitCode,
    rc::Rc,
    sync::Once,
    time::Instant,
};

use clap::Parser;
use cli::{emit_error, print_banner, print_finished, print_missing_file, print_parsing, print_running};
use mew_core::{
    analyzer::{analyze_from_stream, Analyzed},
    environment::prelude::Environment,
    eval::run,
    lexer::prelude::lex,
    utils::prelude::{Error, Warning, WarningEmitterIO}
};

/// Program in Cats' Language!
#[derive(Parser)]
#[command(name = "mewmew", version, about)]
struct Cli {
    /// Path of source file
    path: Option<PathBuf>,
    /// Print the token stream instead of running
    #[arg(long, default_value_t = false)]
    tokens: bool,
    /// Print the parsed program instead of running
    #[arg(long, default_value_t = false)]
    print_ast: bool,
    /// Print the syntax tree in its debug form, implies --print-ast
    #[arg(long, default_value_t = false)]
    debug_ast: bool,
    /// Report each stage on stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
    /// Start an interactive session, after running PATH if given
    #[arg(short = 'i', long, default_value_t = false)]
    repl: bool,
}

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Stdout belongs to the program, so logs go to stderr and only when asked for
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let mut env = Environment::new();

    let status = match &cli.path {
        None if cli.repl => ExitCode::SUCCESS,
        None => {
            print_banner();
            return ExitCode::SUCCESS;
        },
        Some(path) if cli.tokens => print_tokens(path.clone()),
        Some(path) => execute(path.clone(), &cli, &mut env),
    };

    if !cli.repl {
        return status;
    }

    match repl::start(&mut env) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            emit_error(&Error::StdIo { err: err.kind() });
            ExitCode::FAILURE
        }
    }
}

fn parse(path: PathBuf) -> Result<Option<Analyzed>, Error> {
    let warning_emitter = Rc::new(ConsoleWarningEmitter);

    match analyze_from_stream(path.clone(), warning_emitter) {
        Ok(analyzed) => Ok(Some(analyzed)),
        Err(Error::StdIo { err }) if err != ErrorKind::InvalidData => {
            tracing::debug!(?err, "cannot open source");
            print_missing_file(&path);
            Ok(None)
        },
        Err(err) => Err(err),
    }
}

fn execute(path: PathBuf, cli: &Cli, env: &mut Environment) -> ExitCode {
    if cli.verbose {
        print_parsing(&path);
    }

    let start = Instant::now();

    let analyzed = match parse(path.clone()) {
        Ok(Some(analyzed)) => analyzed,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            emit_error(&err);
            return ExitCode::FAILURE;
        }
    };

    if cli.print_ast || cli.debug_ast {
        if cli.debug_ast {
            println!("{:#?}", analyzed.module.program);
        } else {
            println!("{}", analyzed.module.program);
        }

        return ExitCode::SUCCESS;
    }

    if cli.verbose {
        print_running(&path);
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = run(&analyzed, env, &mut out);

    // Values printed before a fault still come out, and before the diagnostic
    let _ = out.flush();

    match result {
        Ok(()) => {
            if cli.verbose {
                print_finished(Instant::now() - start);
            }

            ExitCode::SUCCESS
        },
        Err(err) => {
            emit_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn print_tokens(path: PathBuf) -> ExitCode {
    let src = match std::fs::read_to_string(&path) {
        Ok(src) => src,
        Err(err) if err.kind() != ErrorKind::InvalidData => {
            print_missing_file(&path);
            return ExitCode::SUCCESS;
        },
        Err(err) => {
            emit_error(&Error::StdIo { err: err.kind() });
            return ExitCode::FAILURE;
        }
    };

    match lex(&src) {
        Ok(tokens) => {
            for (start, token, end) in tokens {
                println!("{:>10} {token:?}", format!("{start}..{end}"));
            }

            ExitCode::SUCCESS
        },
        Err(error) => {
            emit_error(&Error::Parse { path, src, error: error.into() });
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleWarningEmitter;

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        let buffer_writer = crate::cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        warning.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing warning to stderr");
    }
}
