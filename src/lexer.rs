//! Lexical analysis: source text to token stream.
//!
//! Single pass over the raw bytes with UTF-8-aware stepping; the character
//! classes that matter (operators, keywords, identifier characters) are all
//! ASCII. The lexer never fails fatally: malformed input is reported through
//! the shared [`Reporter`] and scanning continues so later errors surface in
//! the same run. The returned stream always ends with an `Eof` token.

use std::io::Write;

use crate::report::Reporter;
use crate::token::{Span, Token, TokenKind};

enum StepOutcome {
    Emit(Token),
    Skip,
    End,
}

pub struct Lexer<'a, W: Write> {
    source: &'a str,
    reporter: &'a mut Reporter<W>,
    pos: usize,
    // Position of the next unconsumed character: 0-based line, 1-based column.
    line: usize,
    column: usize,
}

impl<'a, W: Write> Lexer<'a, W> {
    pub fn new(source: &'a str, reporter: &'a mut Reporter<W>) -> Self {
        Self {
            source,
            reporter,
            pos: 0,
            line: 0,
            column: 1,
        }
    }

    pub fn scan_tokens(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            match self.step() {
                StepOutcome::Emit(token) => tokens.push(token),
                StepOutcome::Skip => {}
                StepOutcome::End => break,
            }
        }
        tokens.push(Token::eof(Span {
            line: self.line,
            column: self.column,
        }));
        tokens
    }

    fn step(&mut self) -> StepOutcome {
        let span = self.current_span();
        let start = self.pos;
        let Some(ch) = self.consume_char() else {
            return StepOutcome::End;
        };

        let kind = match ch {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,
            '!' => self.one_or_two('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.one_or_two('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.one_or_two('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.one_or_two('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '/' => {
                if self.consume_if('/') {
                    // Line comment: runs to the newline, which stays in the
                    // stream of input so line accounting happens in one place.
                    while matches!(self.peek_char(), Some(c) if c != '\n') {
                        self.consume_char();
                    }
                    return StepOutcome::Skip;
                }
                TokenKind::Slash
            }
            ' ' | '\r' | '\t' | '\n' => return StepOutcome::Skip,
            '"' => return self.read_string(start, span),
            c if c.is_ascii_digit() => return self.read_number(start, span),
            c if c == '_' || c.is_ascii_alphabetic() => return self.read_identifier(start, span),
            _ => {
                self.reporter.scan_error(span, "Unexpected character.");
                return StepOutcome::Skip;
            }
        };

        StepOutcome::Emit(Token::new(kind, &self.source[start..self.pos], span))
    }

    fn one_or_two(&mut self, second: char, two: TokenKind, one: TokenKind) -> TokenKind {
        if self.consume_if(second) { two } else { one }
    }

    fn read_string(&mut self, start: usize, span: Span) -> StepOutcome {
        loop {
            match self.consume_char() {
                Some('"') => break,
                Some(_) => {}
                None => {
                    self.reporter.scan_error(span, "Unterminated string.");
                    return StepOutcome::Skip;
                }
            }
        }
        let decoded = self.source[start + 1..self.pos - 1].to_string();
        StepOutcome::Emit(Token::new(
            TokenKind::String(decoded),
            &self.source[start..self.pos],
            span,
        ))
    }

    fn read_number(&mut self, start: usize, span: Span) -> StepOutcome {
        let mut seen_dot = false;
        loop {
            match self.peek_char() {
                Some(c) if c.is_ascii_digit() => {
                    self.consume_char();
                }
                Some('.') => {
                    if seen_dot {
                        // Abandon the token; the offending dot is left for the
                        // next step, where it lexes as Dot.
                        self.reporter
                            .scan_error(self.current_span(), "Multiple decimal points.");
                        return StepOutcome::Skip;
                    }
                    seen_dot = true;
                    self.consume_char();
                }
                _ => break,
            }
        }

        let lexeme = &self.source[start..self.pos];
        match lexeme.parse::<f64>() {
            Ok(value) => StepOutcome::Emit(Token::new(TokenKind::Number(value), lexeme, span)),
            Err(_) => {
                self.reporter.scan_error(span, "Unable to parse number literal.");
                StepOutcome::Skip
            }
        }
    }

    fn read_identifier(&mut self, start: usize, span: Span) -> StepOutcome {
        while matches!(self.peek_char(), Some(c) if c == '_' || c.is_ascii_alphanumeric()) {
            self.consume_char();
        }
        let lexeme = &self.source[start..self.pos];
        let kind = keyword(lexeme).unwrap_or(TokenKind::Identifier);
        StepOutcome::Emit(Token::new(kind, lexeme, span))
    }

    fn current_span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn consume_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn consume_if(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.consume_char();
            true
        } else {
            false
        }
    }
}

fn keyword(ident: &str) -> Option<TokenKind> {
    let kind = match ident {
        "and" => TokenKind::And,
        "class" => TokenKind::Class,
        "else" => TokenKind::Else,
        "false" => TokenKind::False,
        "for" => TokenKind::For,
        "fun" => TokenKind::Fun,
        "if" => TokenKind::If,
        "nil" => TokenKind::Nil,
        "or" => TokenKind::Or,
        "print" => TokenKind::Print,
        "return" => TokenKind::Return,
        "super" => TokenKind::Super,
        "this" => TokenKind::This,
        "true" => TokenKind::True,
        "var" => TokenKind::Var,
        "while" => TokenKind::While,
        "break" => TokenKind::Break,
        "continue" => TokenKind::Continue,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn scan(source: &str) -> (Vec<Token>, String, bool) {
        let mut raw = Vec::new();
        let mut reporter = Reporter::new(&mut raw);
        reporter.begin_run(source);
        let tokens = Lexer::new(source, &mut reporter).scan_tokens();
        let had_error = reporter.had_error();
        (
            tokens,
            String::from_utf8(raw).expect("diagnostics should be UTF-8"),
            had_error,
        )
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, _, had_error) = scan(source);
        assert!(!had_error, "unexpected lex error for {source:?}");
        tokens.into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn scans_punctuation_and_operators() {
        assert_eq!(
            kinds("(){},.-+;*/ ! != = == > >= < <="),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Minus,
                TokenKind::Plus,
                TokenKind::Semicolon,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn scans_keywords_and_identifiers() {
        assert_eq!(
            kinds("var foo _bar baz42 while break continue"),
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::While,
                TokenKind::Break,
                TokenKind::Continue,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn scans_number_literals() {
        assert_eq!(
            kinds("1 42 2.5 0.125"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Number(42.0),
                TokenKind::Number(2.5),
                TokenKind::Number(0.125),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn scans_string_literal_with_embedded_newline() {
        let (tokens, _, had_error) = scan("\"hello\nworld\"");
        assert!(!had_error);
        assert_eq!(tokens[0].kind, TokenKind::String("hello\nworld".to_string()));
        assert_eq!(tokens[0].lexeme, "\"hello\nworld\"");
        // The Eof token lands on the line after the embedded newline.
        assert_eq!(tokens[1].span.line, 1);
    }

    #[test]
    fn skips_comments_and_whitespace() {
        let source = indoc! {"
            // leading comment
            var x = 1; // trailing comment
        "};
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Number(1.0),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn records_token_positions() {
        let (tokens, _, _) = scan("var x\n  = 1;");
        assert_eq!(tokens[0].span, Span { line: 0, column: 1 });
        assert_eq!(tokens[1].span, Span { line: 0, column: 5 });
        assert_eq!(tokens[2].span, Span { line: 1, column: 3 });
        assert_eq!(tokens[3].span, Span { line: 1, column: 5 });
    }

    #[test]
    fn eof_column_is_one_past_final_character() {
        let (tokens, _, _) = scan("ab");
        let eof = tokens.last().expect("stream always ends with Eof");
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.span, Span { line: 0, column: 3 });
    }

    #[test]
    fn lexemes_reconstruct_the_source() {
        let source = "var answer = (6 * 7) >= 42; // truth";
        let (tokens, _, had_error) = scan(source);
        assert!(!had_error);
        let rebuilt: String = tokens.iter().map(|token| token.lexeme.as_str()).collect();
        let expected: String = source[..source.find("//").expect("comment present")]
            .split_whitespace()
            .collect();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn errors_on_unexpected_character_and_continues() {
        let (tokens, diagnostics, had_error) = scan("var @ x;");
        assert!(had_error);
        assert!(diagnostics.contains("Unexpected character."));
        // Scanning continued past the bad character.
        assert_eq!(
            tokens.iter().map(|t| &t.kind).collect::<Vec<_>>(),
            vec![
                &TokenKind::Var,
                &TokenKind::Identifier,
                &TokenKind::Semicolon,
                &TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn errors_on_unterminated_string() {
        let (tokens, diagnostics, had_error) = scan("\"abc");
        assert!(had_error);
        assert!(diagnostics.contains("Unterminated string."));
        assert_eq!(tokens.len(), 1); // just Eof
    }

    #[test]
    fn errors_on_multiple_decimal_points() {
        let (tokens, diagnostics, had_error) = scan("1.2.3;");
        assert!(had_error);
        assert!(diagnostics.contains("Multiple decimal points."));
        // The abandoned number's second dot resumes scanning as Dot.
        assert_eq!(tokens[0].kind, TokenKind::Dot);
        assert_eq!(tokens[1].kind, TokenKind::Number(3.0));
    }

    #[test]
    fn trailing_dot_is_part_of_the_number() {
        assert_eq!(
            kinds("1."),
            vec![TokenKind::Number(1.0), TokenKind::Eof]
        );
    }
}
