//! Coercion rules shared by the type checker and the code generator.
//!
//! Every function returns the result type of a construct given the types of
//! its parts. A rejected combination yields a `Mismatch` naming the
//! diagnostic to report and the fallback type to keep checking with.

use crate::ast::{
    expressions::{BinaryOperator, PrefixOperator},
    types::Type,
};

use super::diagnostics::DiagnosticKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub kind: DiagnosticKind,
    pub fallback: Type,
}

impl Mismatch {
    fn new(kind: DiagnosticKind, fallback: Type) -> Self {
        Mismatch { kind, fallback }
    }
}

/// Whether a mixed int/float operand pair is widened to float for this operator.
pub fn widens(operator: BinaryOperator) -> bool {
    matches!(
        operator,
        BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide
            | BinaryOperator::Less
            | BinaryOperator::Greater
            | BinaryOperator::Equal
            | BinaryOperator::NotEqual
    )
}

/// Int with Int stays Int, Float with Float stays Float, any int/float mix is Float.
fn numeric_result(left: Type, right: Type) -> Option<Type> {
    match (left, right) {
        (Type::Int, Type::Int) => Some(Type::Int),
        (Type::Float, Type::Float) => Some(Type::Float),
        (Type::Int, Type::Float) | (Type::Float, Type::Int) => Some(Type::Float),
        _ => None,
    }
}

pub fn binary_result(operator: BinaryOperator, left: Type, right: Type) -> Result<Type, Mismatch> {
    match operator {
        BinaryOperator::Concat => {
            if left == Type::String && right == Type::String {
                Ok(Type::String)
            } else {
                Err(Mismatch::new(DiagnosticKind::ConcatenationOperands, Type::String))
            }
        }
        BinaryOperator::Add | BinaryOperator::Subtract => numeric_result(left, right)
            .ok_or(Mismatch::new(DiagnosticKind::AdditiveOperands, right)),
        BinaryOperator::Modulo => {
            if left == Type::Int && right == Type::Int {
                Ok(Type::Int)
            } else {
                Err(Mismatch::new(DiagnosticKind::ModuloOperands, Type::Int))
            }
        }
        BinaryOperator::Multiply | BinaryOperator::Divide => numeric_result(left, right)
            .ok_or(Mismatch::new(DiagnosticKind::MultiplicativeOperands, right)),
        BinaryOperator::Less | BinaryOperator::Greater => {
            if left.is_numeric() && right.is_numeric() {
                Ok(Type::Bool)
            } else {
                Err(Mismatch::new(DiagnosticKind::ComparisonOperands, Type::Bool))
            }
        }
        BinaryOperator::Equal | BinaryOperator::NotEqual => {
            let comparable = |ty: Type| matches!(ty, Type::Int | Type::Float | Type::String);
            if comparable(left) && comparable(right) {
                Ok(Type::Bool)
            } else {
                Err(Mismatch::new(DiagnosticKind::EqualityOperands, Type::Bool))
            }
        }
        BinaryOperator::And => logical_result(left, right, DiagnosticKind::AndOperands),
        BinaryOperator::Or => logical_result(left, right, DiagnosticKind::OrOperands),
    }
}

fn logical_result(left: Type, right: Type, kind: DiagnosticKind) -> Result<Type, Mismatch> {
    if left == Type::Bool && right == Type::Bool {
        Ok(Type::Bool)
    } else {
        Err(Mismatch::new(kind, Type::Bool))
    }
}

pub fn prefix_result(operator: PrefixOperator, operand: Type) -> Result<Type, Mismatch> {
    match operator {
        PrefixOperator::Not => {
            if operand == Type::Bool {
                Ok(Type::Bool)
            } else {
                Err(Mismatch::new(DiagnosticKind::NegationOperand, Type::Bool))
            }
        }
        PrefixOperator::Minus => {
            if operand.is_numeric() {
                Ok(operand)
            } else {
                Err(Mismatch::new(DiagnosticKind::UnaryMinusOperand, operand))
            }
        }
    }
}

/// Result type of `cond ? then : else` from its branch types.
pub fn ternary_result(then_type: Type, else_type: Type) -> Result<Type, Mismatch> {
    if then_type == else_type {
        return Ok(then_type);
    }
    match (then_type, else_type) {
        (Type::Int, Type::Float) | (Type::Float, Type::Int) => Ok(Type::Float),
        _ => Err(Mismatch::new(DiagnosticKind::TernaryBranches, then_type)),
    }
}

/// Result type of storing a `value` typed expression into a `declared` variable.
///
/// An int stored into a float variable is accepted; the expression keeps its
/// own type here since the widening only happens in the emitted code.
pub fn assignment_result(declared: Type, value: Type) -> Result<Type, Mismatch> {
    if declared == value || (declared == Type::Float && value == Type::Int) {
        Ok(value)
    } else {
        Err(Mismatch::new(DiagnosticKind::AssignmentTypeMismatch, value))
    }
}

/// Whether storing a `value` typed expression into `declared` storage needs an `itof`.
pub fn assignment_widens(declared: Type, value: Type) -> bool {
    declared == Type::Float && value == Type::Int
}
