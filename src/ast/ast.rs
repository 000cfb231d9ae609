use crate::Span;

use super::{
    expressions::{
        AssignmentExpr, BinaryExpr, BooleanExpr, FloatExpr, GroupingExpr, IntegerExpr, PrefixExpr,
        StringExpr, SymbolExpr, TernaryExpr,
    },
    statements::{
        BlockStmt, EmptyStmt, ExpressionStmt, ForStmt, IfStmt, ReadStmt, VarDeclStmt, WhileStmt,
        WriteStmt,
    },
};

/// Statement
///
/// The closed set of statement kinds. Both the type checker and the code
/// generator match on it exhaustively.
#[derive(Debug, Clone)]
pub enum Stmt {
    Empty(EmptyStmt),
    VarDecl(VarDeclStmt),
    Expression(ExpressionStmt),
    Read(ReadStmt),
    Write(WriteStmt),
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Empty(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Read(stmt) => &stmt.span,
            Stmt::Write(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
        }
    }

    /// Line of the first token of the statement.
    pub fn line(&self) -> u32 {
        self.get_span().start.line
    }
}

/// Expression
///
/// The closed set of expression kinds.
#[derive(Debug, Clone)]
pub enum Expr {
    Integer(IntegerExpr),
    Float(FloatExpr),
    Boolean(BooleanExpr),
    String(StringExpr),
    Symbol(SymbolExpr),
    Assignment(AssignmentExpr),
    Prefix(PrefixExpr),
    Binary(BinaryExpr),
    Ternary(TernaryExpr),
    Grouping(GroupingExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Integer(expr) => &expr.span,
            Expr::Float(expr) => &expr.span,
            Expr::Boolean(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Assignment(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Ternary(expr) => &expr.span,
            Expr::Grouping(expr) => &expr.span,
        }
    }

    /// Line of the first token of the expression.
    pub fn line(&self) -> u32 {
        self.get_span().start.line
    }
}

/// The root of a parsed source file.
#[derive(Debug, Clone)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.body.iter()
    }
}
