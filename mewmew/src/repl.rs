use std::{io::Write, path::PathBuf, rc::Rc};

use mew_core::{
	analyzer::analyze_source,
	environment::prelude::Environment,
	eval::run,
	utils::prelude::NullWarningEmitterIO
};

use crate::cli::emit_error;

const PROMPT: &str = "mew> ";

/// Reads one line at a time and runs it against `env`.
///
/// Errors are rendered and the session goes on. Returns on `.exit` or end of input.
pub fn start(env: &mut Environment) -> std::io::Result<()> {
	let stdin = std::io::stdin();
	// A single line rarely reads what it assigns, so warnings would only be noise here
	let warnings = Rc::new(NullWarningEmitterIO);
	let mut line = 0;

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			println!();
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.trim() {
			"" => {},
			".exit" => return Ok(()),
			".vars" => {
				for (name, value) in env.variables() {
					println!("{name} = {value}");
				}
			},
			_ => {
				line += 1;
				tracing::debug!(line, "repl input");

				let path = PathBuf::from(format!("<repl:{line}>"));
				let result = analyze_source(path, input.clone(), warnings.clone())
					.and_then(|analyzed| run(&analyzed, env, &mut std::io::stdout()));

				if let Err(err) = result {
					emit_error(&err);
				}
			}
		}
	}
}
