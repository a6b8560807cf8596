use std::{io::Write, path::Path};

use quill_core::{driver::run_source, eval::prelude::Interpreter};

const PROMPT: &str = ">>> ";

/// Prints the prompt and reads one line without its line break.
/// `None` on end of input or `.exit`.
pub(crate) fn prompt_line() -> std::io::Result<Option<String>> {
	print!("{PROMPT}");
	std::io::stdout().flush()?;

	let mut input = String::new();

	if std::io::stdin().read_line(&mut input)? == 0 {
		println!();
		return Ok(None);
	}

	if let Some('\n') = input.chars().next_back() {
		input.pop();
	}
	if let Some('\r') = input.chars().next_back() {
		input.pop();
	}

	match input.as_str() {
		".exit" => Ok(None),
		_ => Ok(Some(input)),
	}
}

pub fn start() -> i32 {
	if let Err(err) = ctrlc::set_handler(|| {
		println!();
		std::process::exit(130);
	}) {
		log::warn!("could not install Ctrl-C handler: {err}");
	}

	let mut interpreter = Interpreter::stdout();

	loop {
		let line = match prompt_line() {
			Ok(Some(line)) => line,
			Ok(None) => return 0,
			Err(err) => {
				println!("Error: {err}");
				return 74;
			}
		};

		if line.trim().is_empty() {
			continue;
		}

		// lex and parse errors are reported and the prompt continues,
		// a runtime error ends the session
		if let Err(err) = run_source(&mut interpreter, Path::new("<repl>"), &line) {
			err.plain_lines().iter().for_each(|line| println!("{line}"));

			if matches!(err, quill_core::utils::prelude::Error::Runtime { .. }) {
				return err.exit_code();
			}
		}
	}
}
