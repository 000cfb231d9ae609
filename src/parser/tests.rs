//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable declarations and I/O statements
//! - Expressions and operator precedence
//! - Control flow statements
//! - Syntax errors

use std::rc::Rc;

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::BinaryOperator,
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.sl".to_string())).unwrap();
    parse(tokens, Rc::new("test.sl".to_string()))
}

/// Parses a single expression statement and returns its expression.
fn parse_expression(source: &str) -> Expr {
    let program = parse_source(source).unwrap();
    match program.body.into_iter().next() {
        Some(Stmt::Expression(stmt)) => stmt.expression,
        other => panic!("expected an expression statement, found {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_source("float a, b;").unwrap();

    match &program.body[0] {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.var_type, Type::Float);
            assert_eq!(decl.identifiers, vec!["a".to_string(), "b".to_string()]);
        }
        other => panic!("expected a declaration, found {:?}", other),
    }
}

#[test]
fn test_parse_all_declaration_types() {
    let program = parse_source("int a; float b; bool c; string d;").unwrap();
    let types: Vec<Type> = program
        .iter()
        .map(|stmt| match stmt {
            Stmt::VarDecl(decl) => decl.var_type,
            _ => Type::Void,
        })
        .collect();

    assert_eq!(types, vec![Type::Int, Type::Float, Type::Bool, Type::String]);
}

#[test]
fn test_parse_read_and_write() {
    let program = parse_source("read a, b; write a, \"x\", 1 + 2;").unwrap();

    match &program.body[0] {
        Stmt::Read(read) => assert_eq!(read.identifiers, vec!["a".to_string(), "b".to_string()]),
        other => panic!("expected read, found {:?}", other),
    }
    match &program.body[1] {
        Stmt::Write(write) => assert_eq!(write.expressions.len(), 3),
        other => panic!("expected write, found {:?}", other),
    }
}

#[test]
fn test_parse_empty_statement_and_block() {
    let program = parse_source("; { ; x; }").unwrap();

    assert!(matches!(program.body[0], Stmt::Empty(_)));
    match &program.body[1] {
        Stmt::Block(block) => assert_eq!(block.body.len(), 2),
        other => panic!("expected block, found {:?}", other),
    }
}

#[test]
fn test_parse_if_else_statement() {
    let program = parse_source("if (a < 1) write 1; else { write 2; }").unwrap();

    match &program.body[0] {
        Stmt::If(if_stmt) => {
            assert_eq!(if_stmt.condition.to_string(), "a<1");
            assert!(matches!(*if_stmt.then_body, Stmt::Write(_)));
            assert!(matches!(if_stmt.else_body.as_deref(), Some(Stmt::Block(_))));
        }
        other => panic!("expected if, found {:?}", other),
    }
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    let program = parse_source("if (a) if (b) write 1; else write 2;").unwrap();

    match &program.body[0] {
        Stmt::If(outer) => {
            assert!(outer.else_body.is_none());
            match outer.then_body.as_ref() {
                Stmt::If(inner) => assert!(inner.else_body.is_some()),
                other => panic!("expected nested if, found {:?}", other),
            }
        }
        other => panic!("expected if, found {:?}", other),
    }
}

#[test]
fn test_parse_while_loop() {
    let program = parse_source("while (x < 10) { x = x + 1; }").unwrap();
    assert!(matches!(program.body[0], Stmt::While(_)));
}

#[test]
fn test_parse_for_loop() {
    let program = parse_source("for (i = 0; i < 3; i = i + 1) write i;").unwrap();

    match &program.body[0] {
        Stmt::For(for_stmt) => {
            assert_eq!(for_stmt.init.to_string(), "i=0");
            assert_eq!(for_stmt.condition.to_string(), "i<3");
            assert_eq!(for_stmt.step.to_string(), "i=i+1");
        }
        other => panic!("expected for, found {:?}", other),
    }
}

#[test]
fn test_operator_precedence() {
    match parse_expression("1 + 2 * 3;") {
        Expr::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Add);
            assert!(matches!(*binary.right, Expr::Binary(_)));
        }
        other => panic!("expected binary, found {:?}", other),
    }

    match parse_expression("a || b && c == d < e;") {
        Expr::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Or);
            assert_eq!(binary.right.to_string(), "b&&c==d<e");
        }
        other => panic!("expected binary, found {:?}", other),
    }
}

#[test]
fn test_binary_operators_are_left_associative() {
    match parse_expression("1 - 2 - 3;") {
        Expr::Binary(binary) => {
            assert_eq!(binary.left.to_string(), "1-2");
            assert_eq!(binary.right.to_string(), "3");
        }
        other => panic!("expected binary, found {:?}", other),
    }
}

#[test]
fn test_concat_shares_additive_precedence() {
    match parse_expression("\"a\" . \"b\" . \"c\";") {
        Expr::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Concat);
            assert_eq!(binary.left.to_string(), "\"a\".\"b\"");
        }
        other => panic!("expected binary, found {:?}", other),
    }
}

#[test]
fn test_assignment_is_right_associative() {
    match parse_expression("a = b = 1 + 2;") {
        Expr::Assignment(assignment) => {
            assert_eq!(assignment.assignee, "a");
            assert_eq!(assignment.value.to_string(), "b=1+2");
        }
        other => panic!("expected assignment, found {:?}", other),
    }
}

#[test]
fn test_ternary_is_right_associative() {
    match parse_expression("a ? 1 : b ? 2 : 3;") {
        Expr::Ternary(ternary) => {
            assert_eq!(ternary.condition.to_string(), "a");
            assert_eq!(ternary.else_expr.to_string(), "b?2:3");
        }
        other => panic!("expected ternary, found {:?}", other),
    }

    assert_eq!(parse_expression("x = c ? 1 : 2;").to_string(), "x=c?1:2");
}

#[test]
fn test_prefix_operators_bind_tightly() {
    match parse_expression("-a * b;") {
        Expr::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Multiply);
            assert!(matches!(*binary.left, Expr::Prefix(_)));
        }
        other => panic!("expected binary, found {:?}", other),
    }
    assert_eq!(parse_expression("!(a && b);").to_string(), "!(a&&b)");
}

#[test]
fn test_literals() {
    assert!(matches!(parse_expression("42;"), Expr::Integer(ref integer) if integer.value == 42));
    assert!(matches!(parse_expression("2.5;"), Expr::Float(ref float) if float.value == 2.5));
    assert!(matches!(parse_expression("true;"), Expr::Boolean(ref boolean) if boolean.value));
    assert!(matches!(parse_expression("\"hi\";"), Expr::String(ref string) if string.value == "hi"));
}

#[test]
fn test_statement_lines() {
    let program = parse_source("int a;\n\nwrite a;\n  a = 1;").unwrap();
    let lines: Vec<u32> = program.iter().map(|stmt| stmt.line()).collect();
    assert_eq!(lines, vec![1, 3, 4]);
}

#[test]
fn test_missing_semicolon_is_an_error() {
    let error = parse_source("int a\nwrite a;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_invalid_assignment_target() {
    let error = parse_source("1 = 2;").unwrap_err();
    assert_eq!(
        *error.get_error_impl(),
        ErrorImpl::InvalidAssignmentTarget { target: "1".to_string() }
    );
}

#[test]
fn test_integer_overflow_is_an_error() {
    let error = parse_source("write 3000000000;").unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_unclosed_block_is_an_error() {
    let error = parse_source("{ write 1;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_declaration_requires_identifier() {
    let error = parse_source("int 5;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}
