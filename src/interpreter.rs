//! Driver for the lex → parse → evaluate pipeline.
//!
//! [`Interpreter`] owns the output sink, the shared [`Reporter`], and the
//! global environment, which survives across `run` calls so interactive
//! inputs accumulate state. Each run re-checks the reporter's sticky flags
//! between stages: evaluation never starts on input that failed to lex or
//! parse, and a runtime error halts the rest of the current input.

use std::io::Write;

use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::report::Reporter;
use crate::token::{Token, TokenKind};

mod env;
pub mod error;
mod runtime;
pub mod value;

use env::Environment;
pub use error::RuntimeError;
use runtime::Evaluator;
pub use value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Whole-program execution; flags decide the process exit code.
    Script,
    /// One REPL input. When the input does not end with `;` it is treated as
    /// a single expression and its value is printed.
    Interactive,
}

pub struct Interpreter<Out: Write, Err: Write> {
    output: Out,
    reporter: Reporter<Err>,
    environment: Environment,
}

impl<Out: Write, Err: Write> Interpreter<Out, Err> {
    pub fn new(output: Out, error_sink: Err) -> Self {
        Self {
            output,
            reporter: Reporter::new(error_sink),
            environment: Environment::new(),
        }
    }

    pub fn run(&mut self, source: &str, mode: Mode) {
        self.reporter.begin_run(source);
        let tokens = Lexer::new(source, &mut self.reporter).scan_tokens();

        let bare_expression = mode == Mode::Interactive && !ends_with_semicolon(&tokens);
        let mut parser = Parser::new(tokens, &mut self.reporter);

        if bare_expression {
            let expr = parser.parse_expression();
            if self.reporter.had_error() {
                return;
            }
            let Some(expr) = expr else { return };
            let mut evaluator = Evaluator::new(&mut self.output, &mut self.environment);
            match evaluator.evaluate(&expr) {
                Ok(value) => {
                    if let Err(error) = writeln!(self.output, "{value}") {
                        self.report_runtime(&RuntimeError::from(error));
                    }
                }
                Err(error) => self.report_runtime(&error),
            }
        } else {
            let statements = parser.parse();
            if self.reporter.had_error() {
                return;
            }
            let mut evaluator = Evaluator::new(&mut self.output, &mut self.environment);
            if let Err(error) = evaluator.interpret(&statements) {
                self.report_runtime(&error);
            }
        }
    }

    pub fn had_error(&self) -> bool {
        self.reporter.had_error()
    }

    pub fn had_runtime_error(&self) -> bool {
        self.reporter.had_runtime_error()
    }

    /// Reset the sticky flags between interactive inputs so one failure does
    /// not disable the rest of the session.
    pub fn clear_flags(&mut self) {
        self.reporter.clear_flags();
    }

    fn report_runtime(&mut self, error: &RuntimeError) {
        self.reporter.runtime_error(error.span(), &error.to_string());
    }
}

fn ends_with_semicolon(tokens: &[Token]) -> bool {
    tokens
        .iter()
        .rev()
        .find(|token| token.kind != TokenKind::Eof)
        .is_none_or(|token| token.kind == TokenKind::Semicolon)
}
