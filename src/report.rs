//! Positioned diagnostics and the sticky error flags shared by every stage.
//!
//! The lexer, parser, and evaluator all funnel their errors through one
//! [`Reporter`]. The reporter owns the diagnostic sink and the per-run flags
//! the driver consults: a compile error gates evaluation, a runtime error
//! decides the script-mode exit code.

use std::io::Write;

use crate::token::{Span, Token, TokenKind};

pub struct Reporter<W: Write> {
    sink: W,
    lines: Vec<String>,
    had_error: bool,
    had_runtime_error: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            lines: Vec::new(),
            had_error: false,
            had_runtime_error: false,
        }
    }

    /// Capture the source of the run about to start so diagnostics can quote
    /// the offending line. Flags are left alone; they stay sticky for the
    /// whole run and are cleared explicitly between interactive inputs.
    pub fn begin_run(&mut self, source: &str) {
        self.lines = source.lines().map(str::to_string).collect();
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    pub fn clear_flags(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    /// Lexical error: no lexeme to point at beyond the position itself.
    pub fn scan_error(&mut self, span: Span, message: &str) {
        self.report(span, "", message);
        self.had_error = true;
    }

    /// Parse error at `token`.
    pub fn parse_error(&mut self, token: &Token, message: &str) {
        let location = if token.kind == TokenKind::Eof {
            " at end".to_string()
        } else {
            format!(" at '{}'", token.lexeme)
        };
        self.report(token.span, &location, message);
        self.had_error = true;
    }

    /// Runtime error, positioned when the failing operation has a source
    /// token (I/O failures do not).
    pub fn runtime_error(&mut self, span: Option<Span>, message: &str) {
        match span {
            Some(span) => {
                let _ = writeln!(
                    self.sink,
                    "[line {}, column {}] Error: {}",
                    span.line, span.column, message
                );
                self.quote_line(span);
            }
            None => {
                let _ = writeln!(self.sink, "Error: {message}");
            }
        }
        self.had_runtime_error = true;
    }

    fn report(&mut self, span: Span, location: &str, message: &str) {
        let _ = writeln!(self.sink, "[line {}] Error{}: {}", span.line, location, message);
        self.quote_line(span);
    }

    /// Echo the offending line with a caret under the position's column.
    fn quote_line(&mut self, span: Span) {
        let line = self.lines.get(span.line).map(String::as_str).unwrap_or("");
        let _ = writeln!(self.sink, "{line}");
        let _ = writeln!(self.sink, "{}^", " ".repeat(span.column.saturating_sub(1)));
    }
}
