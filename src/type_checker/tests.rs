//! Unit tests for the type checker module.
//!
//! Covers declarations, undeclared variables, every operator rule and the
//! statement level condition checks.

use std::rc::Rc;

use crate::{
    ast::{
        ast::{Expr, Stmt},
        types::Type,
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
};

use super::{
    diagnostics::DiagnosticKind,
    type_checker::{type_check, type_check_expr, TypeChecker},
};

fn check(source: &str) -> TypeChecker {
    let tokens = tokenize(source.to_string(), Some("test.sl".to_string())).unwrap();
    let program = parse(tokens, Rc::new("test.sl".to_string())).unwrap();
    type_check(&program)
}

fn kinds(type_checker: &TypeChecker) -> Vec<DiagnosticKind> {
    type_checker.diagnostics.iter().map(|d| d.kind).collect()
}

/// Types the expression of the last statement, which must be an expression statement.
fn type_of_last(source: &str) -> (Type, TypeChecker) {
    let tokens = tokenize(source.to_string(), None).unwrap();
    let program = parse(tokens, Rc::new("shell".to_string())).unwrap();
    let mut type_checker = TypeChecker::new();

    let (last, rest) = program.body.split_last().unwrap();
    for stmt in rest {
        super::type_checker::type_check_stmt(&mut type_checker, stmt);
    }
    let ty = match last {
        Stmt::Expression(stmt) => type_check_expr(&mut type_checker, &stmt.expression),
        _ => panic!("last statement is not an expression"),
    };
    (ty, type_checker)
}

#[test]
fn test_valid_program_has_no_diagnostics() {
    let type_checker = check(
        "int a, b; float f; string s; bool t;
         a = 1; b = a * 2 % 3; f = a / 2.0; s = \"x\" . \"y\";
         t = a < f && !(b == 2) || s != \"z\";
         if (t) write a; else { write f, s; }
         while (a < 10) a = a + 1;
         for (a = 0; a < 3; a = a + 1) read b;",
    );
    assert!(type_checker.diagnostics.is_empty(), "{:?}", type_checker.diagnostics);
}

#[test]
fn test_double_declaration_keeps_first_type() {
    let type_checker = check("int x;\nfloat x;");
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::VariableAlreadyDeclared]);
    assert_eq!(type_checker.diagnostics[0].line, 2);
    assert_eq!(type_checker.diagnostics[0].source, "x");
    assert_eq!(type_checker.fetch_variable_type("x"), Some(Type::Int));
}

#[test]
fn test_double_declaration_in_one_statement() {
    let type_checker = check("bool b, b;");
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::VariableAlreadyDeclared]);
    assert_eq!(type_checker.fetch_variable_type("b"), Some(Type::Bool));
}

#[test]
fn test_undeclared_variable_reference() {
    let (ty, type_checker) = type_of_last("y + 1;");
    assert_eq!(ty, Type::Int);
    assert_eq!(kinds(&type_checker), vec![
        DiagnosticKind::VariableNotDeclared,
        DiagnosticKind::AdditiveOperands,
    ]);
    assert_eq!(type_checker.diagnostics[0].to_string(), "line 1 - Variable was not declared - y");
}

#[test]
fn test_undeclared_variable_is_reported_once() {
    let type_checker = check("write y;");
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::VariableNotDeclared]);
}

#[test]
fn test_assignment_to_undeclared_is_void() {
    let (ty, type_checker) = type_of_last("z = 1;");
    assert_eq!(ty, Type::Void);
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::VariableNotDeclared]);
    assert_eq!(type_checker.diagnostics[0].source, "z");
}

#[test]
fn test_int_assigned_to_float_keeps_int_type() {
    let (ty, type_checker) = type_of_last("float y; y = 1;");
    assert_eq!(ty, Type::Int);
    assert!(type_checker.diagnostics.is_empty());
}

#[test]
fn test_assignment_mismatch() {
    let (ty, type_checker) = type_of_last("int x;\nx = 1.5;");
    assert_eq!(ty, Type::Float);
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::AssignmentTypeMismatch]);
    assert_eq!(
        type_checker.diagnostics[0].to_string(),
        "line 2 - Variable type does not match the assigned value type - x=1.5"
    );
}

#[test]
fn test_float_assigned_to_int_is_rejected() {
    let type_checker = check("int x; float f; x = f;");
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::AssignmentTypeMismatch]);
}

#[test]
fn test_additive_types() {
    assert_eq!(type_of_last("1 + 2;").0, Type::Int);
    assert_eq!(type_of_last("1.0 - 2.0;").0, Type::Float);
    assert_eq!(type_of_last("1 + 2.5;").0, Type::Float);
    assert_eq!(type_of_last("2.5 - 1;").0, Type::Float);

    let (ty, type_checker) = type_of_last("1 + true;");
    assert_eq!(ty, Type::Bool);
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::AdditiveOperands]);
    assert_eq!(type_checker.diagnostics[0].source, "1+true");
}

#[test]
fn test_concatenation_requires_strings() {
    assert_eq!(type_of_last("\"a\" . \"b\";").0, Type::String);

    let (ty, type_checker) = type_of_last("\"a\" . 1;");
    assert_eq!(ty, Type::String);
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::ConcatenationOperands]);
}

#[test]
fn test_multiplicative_types() {
    assert_eq!(type_of_last("2 * 3;").0, Type::Int);
    assert_eq!(type_of_last("2 / 3.0;").0, Type::Float);
    assert_eq!(type_of_last("7 % 3;").0, Type::Int);

    let (ty, type_checker) = type_of_last("7.0 % 3;");
    assert_eq!(ty, Type::Int);
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::ModuloOperands]);

    let (ty, type_checker) = type_of_last("2 * \"s\";");
    assert_eq!(ty, Type::String);
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::MultiplicativeOperands]);
}

#[test]
fn test_comparison_and_equality() {
    assert_eq!(type_of_last("1 < 2.0;").0, Type::Bool);
    assert_eq!(type_of_last("\"a\" == \"b\";").0, Type::Bool);
    assert_eq!(type_of_last("1 != 1.0;").0, Type::Bool);

    let (ty, type_checker) = type_of_last("\"a\" > \"b\";");
    assert_eq!(ty, Type::Bool);
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::ComparisonOperands]);

    let (_, type_checker) = type_of_last("true == false;");
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::EqualityOperands]);
}

#[test]
fn test_logical_operators() {
    assert_eq!(type_of_last("true && false || true;").0, Type::Bool);

    let (_, type_checker) = type_of_last("1 && true;");
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::AndOperands]);

    let (_, type_checker) = type_of_last("true || \"s\";");
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::OrOperands]);
}

#[test]
fn test_prefix_operators() {
    assert_eq!(type_of_last("!true;").0, Type::Bool);
    assert_eq!(type_of_last("-1;").0, Type::Int);
    assert_eq!(type_of_last("-1.5;").0, Type::Float);

    let (ty, type_checker) = type_of_last("!1;");
    assert_eq!(ty, Type::Bool);
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::NegationOperand]);
    assert_eq!(type_checker.diagnostics[0].source, "1");

    let (ty, type_checker) = type_of_last("-\"s\";");
    assert_eq!(ty, Type::String);
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::UnaryMinusOperand]);
}

#[test]
fn test_ternary_types() {
    assert_eq!(type_of_last("true ? 1 : 2;").0, Type::Int);
    assert_eq!(type_of_last("true ? 1 : 2.0;").0, Type::Float);
    assert_eq!(type_of_last("false ? 1.5 : 2;").0, Type::Float);

    let (ty, type_checker) = type_of_last("1 ? 1 : 2;");
    assert_eq!(ty, Type::Int);
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::TernaryCondition]);

    let (ty, type_checker) = type_of_last("true ? \"a\" : 2;");
    assert_eq!(ty, Type::String);
    assert_eq!(kinds(&type_checker), vec![DiagnosticKind::TernaryBranches]);
}

#[test]
fn test_ternary_branches_are_checked_before_condition_is_reported() {
    let type_checker = check("int a;\na = b ? c : 1;");
    let reported: Vec<(DiagnosticKind, &str)> = type_checker
        .diagnostics
        .iter()
        .take(3)
        .map(|d| (d.kind, d.source.as_str()))
        .collect();

    assert_eq!(reported, vec![
        (DiagnosticKind::VariableNotDeclared, "b"),
        (DiagnosticKind::VariableNotDeclared, "c"),
        (DiagnosticKind::TernaryCondition, "b"),
    ]);
}

#[test]
fn test_float_literals_are_quoted_as_written() {
    let type_checker = check("int i;\ni = 1.10;\nwrite !0.0000001;");
    let sources: Vec<&str> = type_checker.diagnostics.iter().map(|d| d.source.as_str()).collect();
    assert_eq!(sources, vec!["i=1.10", "0.0000001"]);
}

#[test]
fn test_conditions_must_be_bool() {
    let type_checker = check("int i;\nif (i) ;\nwhile (1.5) ;\nfor (i = 0; i; i = i + 1) ;");
    assert_eq!(kinds(&type_checker), vec![
        DiagnosticKind::ConditionNotBool,
        DiagnosticKind::ConditionNotBool,
        DiagnosticKind::ConditionNotBool,
    ]);
    let lines: Vec<u32> = type_checker.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![2, 3, 4]);
    assert_eq!(type_checker.diagnostics[2].source, "i");
}

#[test]
fn test_diagnostics_are_collected_in_order() {
    let type_checker = check("int x;\nx = \"s\";\nwrite q;\nint x;");
    assert_eq!(kinds(&type_checker), vec![
        DiagnosticKind::AssignmentTypeMismatch,
        DiagnosticKind::VariableNotDeclared,
        DiagnosticKind::VariableAlreadyDeclared,
    ]);
}

#[test]
fn test_grouping_is_transparent() {
    let (ty, _) = type_of_last("(1 + 2.0);");
    assert_eq!(ty, Type::Float);

    let tokens = tokenize("((a));".to_string(), None).unwrap();
    let program = parse(tokens, Rc::new("shell".to_string())).unwrap();
    match &program.body[0] {
        Stmt::Expression(stmt) => assert!(matches!(stmt.expression, Expr::Grouping(_))),
        _ => panic!("expected an expression statement"),
    }
}
