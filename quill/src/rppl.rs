use quill_core::parser::prelude::parse_module;

use crate::repl::prompt_line;

pub fn start() -> std::io::Result<()> {
	while let Some(input) = prompt_line()? {
		if input.is_empty() {
			continue;
		}

		let parsed = match parse_module(&input) {
			Ok(parsed) => parsed,
			Err(errors) => {
				for err in errors {
					println!("Lexical error: {}", err.details().0);
				}
				continue;
			}
		};

		for statement in &parsed.statements {
			println!("{statement}");
		}

		for err in &parsed.errors {
			let (message, messages) = err.details();

			println!("Parse error: {message}.");
			if !messages.is_empty() {
				println!("\t{}", messages.join(";\n\t"));
			}
		}
	}

	Ok(())
}
