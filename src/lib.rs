#![allow(clippy::module_inception)]

use std::{
    io::{BufRead, Write},
    rc::Rc,
};

use tracing::debug;

use crate::{
    ast::ast::Program,
    compiler::compiler::compile,
    errors::errors::{CompileError, Error, ErrorTip, RuntimeError},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{diagnostics::Diagnostic, type_checker::type_check},
    vm::vm::Vm,
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;
pub mod vm;

extern crate regex;

/// A location in a source file: byte offset, 1-based line and file name.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(offset: u32, line: u32, file: Rc<String>) -> Self {
        Position { offset, line, file }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs the type checker and returns its diagnostics in source order.
pub fn analyze(program: &Program) -> Vec<Diagnostic> {
    type_check(program).diagnostics
}

/// Type checks `program` and, when it is clean, compiles it to instruction text.
pub fn compile_program(program: &Program) -> Result<String, Vec<Diagnostic>> {
    let diagnostics = analyze(program);
    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    Ok(compile(program).render())
}

/// The whole front end: source text to instruction text.
pub fn compile_source(source: &str, file: &str) -> Result<String, CompileError> {
    let file = Rc::new(file.to_string());
    let tokens = tokenize(source.to_string(), Some(file.to_string()))?;
    let program = parse(tokens, file)?;

    let text = compile_program(&program).map_err(CompileError::Diagnostics)?;
    debug!(bytes = text.len(), "compiled source");
    Ok(text)
}

/// Parses and executes an instruction stream against the given input and output.
pub fn run_instructions<R: BufRead, W: Write>(
    text: &str,
    input: &mut R,
    output: &mut W,
) -> Result<(), RuntimeError> {
    Vm::from_text(text)?.run_with_io(input, output)
}

/// Finds the line containing byte `position` of `source`.
///
/// Returns the 1-based line number, the line text and the offset of
/// `position` within the line. A position at the very end of the source
/// maps to the end of the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        last = (line_number, line.to_string(), line.len());
        start = end;
        line_number += 1;
    }

    Some(last)
}

pub fn format_syntax_error(error: &Error, source: &str) -> String {
    /*
        Error: message
        -> final.sl
           |
        20 | x = 3 # 4;
           | ------^
    */

    let position = error.get_position();
    let mut text = String::new();

    if let ErrorTip::None = error.get_tip() {
        text.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        text.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    text.push_str(&format!("-> {}\n", position.file));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.offset) else {
        text.push_str(&format!("line {}\n", position.line));
        return text;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    text.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    text.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    text.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    text
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}
