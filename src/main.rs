use std::fs;
use std::io::{self, BufRead, Write};
use std::process::exit;

use anyhow::{Context, Result};
use loxide::interpreter::{Interpreter, Mode};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => run_prompt(),
        [path] => run_file(path),
        _ => {
            eprintln!("Usage: loxide [script]");
            exit(64);
        }
    }
}

fn run_file(path: &str) -> Result<()> {
    let source = fs::read_to_string(path).with_context(|| format!("Reading {path}"))?;

    let mut interpreter = Interpreter::new(io::stdout(), io::stderr());
    interpreter.run(&source, Mode::Script);

    if interpreter.had_error() {
        exit(65);
    }
    if interpreter.had_runtime_error() {
        exit(70);
    }
    Ok(())
}

fn run_prompt() -> Result<()> {
    let mut interpreter = Interpreter::new(io::stdout(), io::stderr());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().context("Flushing prompt")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Reading prompt input")?;
        if read == 0 {
            return Ok(());
        }

        interpreter.run(&line, Mode::Interactive);
        // One bad input must not poison the rest of the session.
        interpreter.clear_flags();
    }
}
