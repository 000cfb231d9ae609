use std::collections::HashMap;

use tracing::debug;

use crate::ast::{
    ast::{Expr, Program, Stmt},
    types::Type,
};

use super::{
    diagnostics::{Diagnostic, DiagnosticKind},
    rules::{self, Mismatch},
};

/// State of a single analysis pass: the global symbol table and every
/// diagnostic found so far, in traversal order.
#[derive(Debug, Default)]
pub struct TypeChecker {
    pub variables: HashMap<String, Type>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker::default()
    }

    /// Registers `name` unless it is already known; the first declared type is kept.
    pub fn declare_variable(&mut self, name: &str, variable_type: Type) -> bool {
        if self.variables.contains_key(name) {
            false
        } else {
            self.variables.insert(name.to_string(), variable_type);
            true
        }
    }

    pub fn fetch_variable_type(&self, name: &str) -> Option<Type> {
        self.variables.get(name).copied()
    }

    pub fn report(&mut self, line: u32, kind: DiagnosticKind, source: impl Into<String>) {
        let diagnostic = Diagnostic::new(line, kind, source);
        debug!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Unwraps a rule result, reporting the mismatch against `expr`.
    fn check_rule(&mut self, result: Result<Type, Mismatch>, line: u32, source: String) -> Type {
        match result {
            Ok(ty) => ty,
            Err(mismatch) => {
                self.report(line, mismatch.kind, source);
                mismatch.fallback
            }
        }
    }

    fn check_condition(&mut self, line: u32, condition: &Expr) {
        if type_check_expr(self, condition) != Type::Bool {
            self.report(line, DiagnosticKind::ConditionNotBool, condition.to_string());
        }
    }
}

/// Type checks the whole program and returns the final checker state.
pub fn type_check(program: &Program) -> TypeChecker {
    let mut type_checker = TypeChecker::new();

    for stmt in program.iter() {
        type_check_stmt(&mut type_checker, stmt);
    }

    debug!(
        variables = type_checker.variables.len(),
        diagnostics = type_checker.diagnostics.len(),
        "type checking finished"
    );
    type_checker
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: &Stmt) {
    match stmt {
        Stmt::Empty(_) => {}
        Stmt::VarDecl(decl) => {
            for name in &decl.identifiers {
                if !type_checker.declare_variable(name, decl.var_type) {
                    type_checker.report(stmt.line(), DiagnosticKind::VariableAlreadyDeclared, name.clone());
                }
            }
        }
        Stmt::Expression(expr_stmt) => {
            type_check_expr(type_checker, &expr_stmt.expression);
        }
        Stmt::Read(read) => {
            for name in &read.identifiers {
                if type_checker.fetch_variable_type(name).is_none() {
                    type_checker.report(stmt.line(), DiagnosticKind::VariableNotDeclared, name.clone());
                }
            }
        }
        Stmt::Write(write) => {
            for expr in &write.expressions {
                type_check_expr(type_checker, expr);
            }
        }
        Stmt::Block(block) => {
            for inner in block.iter() {
                type_check_stmt(type_checker, inner);
            }
        }
        Stmt::If(if_stmt) => {
            type_checker.check_condition(stmt.line(), &if_stmt.condition);
            type_check_stmt(type_checker, &if_stmt.then_body);
            if let Some(else_body) = &if_stmt.else_body {
                type_check_stmt(type_checker, else_body);
            }
        }
        Stmt::While(while_stmt) => {
            type_checker.check_condition(stmt.line(), &while_stmt.condition);
            type_check_stmt(type_checker, &while_stmt.body);
        }
        Stmt::For(for_stmt) => {
            type_check_expr(type_checker, &for_stmt.init);
            type_checker.check_condition(stmt.line(), &for_stmt.condition);
            type_check_expr(type_checker, &for_stmt.step);
            type_check_stmt(type_checker, &for_stmt.body);
        }
    }
}

pub fn type_check_expr(type_checker: &mut TypeChecker, expr: &Expr) -> Type {
    match expr {
        Expr::Integer(_) => Type::Int,
        Expr::Float(_) => Type::Float,
        Expr::Boolean(_) => Type::Bool,
        Expr::String(_) => Type::String,
        Expr::Symbol(symbol) => match type_checker.fetch_variable_type(&symbol.value) {
            Some(ty) => ty,
            None => {
                type_checker.report(expr.line(), DiagnosticKind::VariableNotDeclared, symbol.value.clone());
                Type::Void
            }
        },
        Expr::Assignment(assignment) => {
            let declared = type_checker.fetch_variable_type(&assignment.assignee);
            if declared.is_none() {
                type_checker.report(
                    expr.line(),
                    DiagnosticKind::VariableNotDeclared,
                    assignment.assignee.clone(),
                );
            }

            let value_type = type_check_expr(type_checker, &assignment.value);

            match declared {
                Some(declared) => type_checker.check_rule(
                    rules::assignment_result(declared, value_type),
                    expr.line(),
                    expr.to_string(),
                ),
                None => Type::Void,
            }
        }
        Expr::Prefix(prefix) => {
            let operand = type_check_expr(type_checker, &prefix.right_expr);
            type_checker.check_rule(
                rules::prefix_result(prefix.operator, operand),
                expr.line(),
                prefix.right_expr.to_string(),
            )
        }
        Expr::Binary(binary) => {
            let left = type_check_expr(type_checker, &binary.left);
            let right = type_check_expr(type_checker, &binary.right);
            type_checker.check_rule(
                rules::binary_result(binary.operator, left, right),
                expr.line(),
                expr.to_string(),
            )
        }
        Expr::Ternary(ternary) => {
            let condition_type = type_check_expr(type_checker, &ternary.condition);
            let then_type = type_check_expr(type_checker, &ternary.then_expr);
            let else_type = type_check_expr(type_checker, &ternary.else_expr);

            if condition_type != Type::Bool {
                type_checker.report(
                    expr.line(),
                    DiagnosticKind::TernaryCondition,
                    ternary.condition.to_string(),
                );
            }
            type_checker.check_rule(
                rules::ternary_result(then_type, else_type),
                expr.line(),
                expr.to_string(),
            )
        }
        Expr::Grouping(grouping) => type_check_expr(type_checker, &grouping.expression),
    }
}
