mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use quill_core::{
    driver::{ast_lines, read_source, run_file},
    eval::prelude::Interpreter,
};

#[derive(Parser)]
#[command(name = "quill", version, about = "Tree-walking interpreter for the Quill language")]
struct Cli {
    /// Log verbosity: -v for debug, -vv for trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Runs a source file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Also render rich diagnostics to stderr
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Starts the interactive prompt (default)
    Repl,
    /// Prints the syntax tree of every statement
    Ast {
        /// Path of source file
        path: PathBuf,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    if let Err(err) = simple_logger::SimpleLogger::new().with_level(level).init() {
        eprintln!("failed to set up logging: {err}");
    }

    let code = match cli.command.unwrap_or(Command::Repl) {
        Command::Run { path, pretty } => run(path, pretty),
        Command::Repl => repl::start(),
        Command::Ast { path } => ast(path),
        Command::Rlpl => rlpl::start().map_or(74, |_| 0),
        Command::Rppl => rppl::start().map_or(74, |_| 0),
    };

    std::process::exit(code);
}

fn run(path: PathBuf, pretty: bool) -> i32 {
    cli::print_running(&path.display().to_string());
    let start = std::time::Instant::now();

    let mut interpreter = Interpreter::stdout();

    let code = match run_file(&mut interpreter, &path) {
        Ok(()) => 0,
        Err(err) => {
            cli::report(&err, pretty);
            err.exit_code()
        }
    };

    cli::print_finished(start.elapsed());

    code
}

fn ast(path: PathBuf) -> i32 {
    let lines = read_source(&path).and_then(|src| ast_lines(&path, &src));

    match lines {
        Ok(lines) => {
            lines.iter().for_each(|line| println!("{line}"));
            0
        },
        Err(err) => {
            cli::report(&err, false);
            err.exit_code()
        }
    }
}
