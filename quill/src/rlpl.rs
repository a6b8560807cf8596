use quill_core::lexer::prelude::lex;

use crate::repl::prompt_line;

pub fn start() -> std::io::Result<()> {
	while let Some(input) = prompt_line()? {
		if input.is_empty() {
			continue;
		}

		let lexed = lex(&input);

		for token in &lexed.tokens {
			println!("{token}");
		}

		for err in &lexed.errors {
			let (message, hints) = err.details();

			println!("[at {}] Lexical Error: {message}", err.location);
			if !hints.is_empty() {
				println!("{}", hints.join("\n"));
			}
		}
	}

	Ok(())
}
