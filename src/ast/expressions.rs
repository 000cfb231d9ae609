use std::fmt::Display;

use crate::Span;

use super::ast::Expr;

#[derive(Debug, Clone)]
pub struct IntegerExpr {
    pub value: i32,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FloatExpr {
    pub value: f32,
    /// The literal as written, used when quoting source text.
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

/// A reference to a variable by name.
#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

/// `name = value`; evaluates to the freshly stored value.
#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub assignee: String,
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    /// Arithmetic negation, `-x`
    Minus,
    /// Logical negation, `!x`
    Not,
}

#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub operator: PrefixOperator,
    pub right_expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Concat,
    Less,
    Greater,
    Equal,
    NotEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Concat => ".",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
    pub span: Span,
}

/// `condition ? then_expr : else_expr`
#[derive(Debug, Clone)]
pub struct TernaryExpr {
    pub condition: Box<Expr>,
    pub then_expr: Box<Expr>,
    pub else_expr: Box<Expr>,
    pub span: Span,
}

/// A parenthesized expression, kept so diagnostics can quote the source faithfully.
#[derive(Debug, Clone)]
pub struct GroupingExpr {
    pub expression: Box<Expr>,
    pub span: Span,
}

/// Renders the expression as its tokens joined without whitespace.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Integer(integer) => write!(f, "{}", integer.value),
            Expr::Float(float) => write!(f, "{}", float.text),
            Expr::Boolean(boolean) => write!(f, "{}", boolean.value),
            Expr::String(string) => write!(f, "\"{}\"", string.value),
            Expr::Symbol(symbol) => write!(f, "{}", symbol.value),
            Expr::Assignment(assignment) => {
                write!(f, "{}={}", assignment.assignee, assignment.value)
            }
            Expr::Prefix(prefix) => match prefix.operator {
                PrefixOperator::Minus => write!(f, "-{}", prefix.right_expr),
                PrefixOperator::Not => write!(f, "!{}", prefix.right_expr),
            },
            Expr::Binary(binary) => write!(
                f,
                "{}{}{}",
                binary.left,
                binary.operator.symbol(),
                binary.right
            ),
            Expr::Ternary(ternary) => write!(
                f,
                "{}?{}:{}",
                ternary.condition, ternary.then_expr, ternary.else_expr
            ),
            Expr::Grouping(grouping) => write!(f, "({})", grouping.expression),
        }
    }
}
