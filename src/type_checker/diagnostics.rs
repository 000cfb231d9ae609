use std::fmt::Display;

use thiserror::Error;

/// What went wrong in a diagnostic; the `Display` text is the human readable message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("Variable was already declared")]
    VariableAlreadyDeclared,
    #[error("Variable was not declared")]
    VariableNotDeclared,
    #[error("Variable type does not match the assigned value type")]
    AssignmentTypeMismatch,
    #[error("Condition must be of type bool")]
    ConditionNotBool,
    #[error("Concatenation can be applied only to strings")]
    ConcatenationOperands,
    #[error("Plus and minus can be applied only to int or float")]
    AdditiveOperands,
    #[error("Modulo can be applied only to int")]
    ModuloOperands,
    #[error("Multiply and divide can be applied only to int or float")]
    MultiplicativeOperands,
    #[error("Comparison can be applied only to int or float")]
    ComparisonOperands,
    #[error("Equality can be applied only to int, float or string")]
    EqualityOperands,
    #[error("AND can be applied only to bool")]
    AndOperands,
    #[error("OR can be applied only to bool")]
    OrOperands,
    #[error("Negation can be applied only to bool")]
    NegationOperand,
    #[error("Unary minus can be applied only to int or float")]
    UnaryMinusOperand,
    #[error("Ternary condition must be of type bool")]
    TernaryCondition,
    #[error("Ternary branches must have the same type")]
    TernaryBranches,
}

/// A non-fatal finding of the type checker.
///
/// Renders as `line <n> - <message> - <offending source text>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: u32,
    pub kind: DiagnosticKind,
    pub source: String,
}

impl Diagnostic {
    pub fn new(line: u32, kind: DiagnosticKind, source: impl Into<String>) -> Self {
        Diagnostic {
            line,
            kind,
            source: source.into(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} - {} - {}", self.line, self.kind, self.source)
    }
}
