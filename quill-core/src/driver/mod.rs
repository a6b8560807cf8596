#[cfg(test)]
mod tests;

use std::{io::Write, path::Path};

use utf8_chars::BufReadCharsExt;

use crate::{
    eval::prelude::Interpreter,
    parser::prelude::{parse_module, Stmt},
    utils::prelude::Error,
};

/// Reads the whole file as a UTF-8 character stream.
pub fn read_source(path: &Path) -> Result<String, Error> {
    let file = std::fs::File::open(path)?;
    let file_size = file.metadata()?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);

    for ch in reader.chars() {
        src.push(ch?);
    }

    log::debug!("read {} bytes from {}", src.len(), path.display());

    Ok(src)
}

/// Lexes and parses `src`; any lexical or syntax error aborts with every
/// fault collected so far.
pub fn parse_source(path: &Path, src: &str) -> Result<Vec<Stmt>, Error> {
    let parsed = parse_module(src).map_err(|errors| Error::Lex {
        path: path.to_path_buf(),
        src: src.to_string(),
        errors,
    })?;

    if parsed.had_error() {
        return Err(Error::Parse {
            path: path.to_path_buf(),
            src: src.to_string(),
            errors: parsed.errors,
        });
    }

    Ok(parsed.statements)
}

/// Runs `src` on an existing interpreter, so globals from earlier calls stay visible.
pub fn run_source<W: Write>(
    interpreter: &mut Interpreter<W>,
    path: &Path,
    src: &str
) -> Result<(), Error> {
    let statements = parse_source(path, src)?;
    log::debug!("parsed {} statements", statements.len());

    interpreter.interpret(&statements).map_err(|error| Error::Runtime {
        path: path.to_path_buf(),
        src: src.to_string(),
        error,
    })?;

    // a failed flush has no statement to blame
    Ok(interpreter.flush()?)
}

pub fn run_file<W: Write>(interpreter: &mut Interpreter<W>, path: &Path) -> Result<(), Error> {
    let src = read_source(path)?;

    run_source(interpreter, path, &src)
}

/// Debug string of every top-level statement.
pub fn ast_lines(path: &Path, src: &str) -> Result<Vec<String>, Error> {
    Ok(parse_source(path, src)?
        .iter()
        .map(ToString::to_string)
        .collect())
}
