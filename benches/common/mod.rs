#![allow(dead_code)]
use std::fs;

use loxide::ast::Stmt;
use loxide::lexer::Lexer;
use loxide::parser::Parser;
use loxide::report::Reporter;
use loxide::token::Token;

pub const WORKLOADS: [(&str, &str); 2] = [
    ("loop", "tests/programs/loop_bench/program.lox"),
    ("arithmetic", "tests/programs/arithmetic/program.lox"),
];

pub fn load_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {path}: {err}"))
}

pub fn tokenize(source: &str) -> Vec<Token> {
    let mut reporter = Reporter::new(Vec::new());
    reporter.begin_run(source);
    let tokens = Lexer::new(source, &mut reporter).scan_tokens();
    assert!(!reporter.had_error(), "benchmark source must lex cleanly");
    tokens
}

pub fn parse(source: &str) -> Vec<Stmt> {
    let mut reporter = Reporter::new(Vec::new());
    reporter.begin_run(source);
    let tokens = Lexer::new(source, &mut reporter).scan_tokens();
    let statements = Parser::new(tokens, &mut reporter).parse();
    assert!(!reporter.had_error(), "benchmark source must parse cleanly");
    statements
}
