use std::slice::Iter;

use crate::Span;

use super::{
    ast::{Expr, Stmt},
    types::Type,
};

/// A lone `;`.
#[derive(Debug, Clone)]
pub struct EmptyStmt {
    pub span: Span,
}

/// `int a, b, c;`
#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub var_type: Type,
    pub identifiers: Vec<String>,
    pub span: Span,
}

/// An expression evaluated for its side effects; its value is discarded.
#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// `read a, b;`
#[derive(Debug, Clone)]
pub struct ReadStmt {
    pub identifiers: Vec<String>,
    pub span: Span,
}

/// `write e1, e2;` prints all values on one line.
#[derive(Debug, Clone)]
pub struct WriteStmt {
    pub expressions: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Box<Stmt>,
    pub else_body: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}

/// `for (init; condition; step) body`
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub init: Expr,
    pub condition: Expr,
    pub step: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}
