use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, BinaryOperator, PrefixOperator, TernaryExpr},
        types::Type,
    },
    type_checker::rules,
    vm::{instruction::Instruction, value::Value},
};

use super::compiler::{tag_of, Compiler};

/// Emits the code of an expression and returns its static type.
///
/// The value of every expression is left on top of the stack.
pub fn gen_expression(compiler: &mut Compiler, expr: &Expr) -> Type {
    match expr {
        Expr::Integer(integer) => {
            compiler.emit(Instruction::Push(Value::Int(integer.value)));
            Type::Int
        }
        Expr::Float(float) => {
            compiler.emit(Instruction::Push(Value::Float(float.value)));
            Type::Float
        }
        Expr::Boolean(boolean) => {
            compiler.emit(Instruction::Push(Value::Bool(boolean.value)));
            Type::Bool
        }
        Expr::String(string) => {
            compiler.emit(Instruction::Push(Value::String(string.value.clone())));
            Type::String
        }
        Expr::Symbol(symbol) => {
            compiler.emit(Instruction::Load(symbol.value.clone()));
            compiler.variable_type(&symbol.value)
        }
        Expr::Assignment(assignment) => {
            let value_type = gen_expression(compiler, &assignment.value);
            let storage_type = compiler.variable_type(&assignment.assignee);

            // The value left on the stack is the stored one, so a widened
            // assignment evaluates to a float.
            let result_type = if rules::assignment_widens(storage_type, value_type) {
                compiler.emit(Instruction::Itof);
                storage_type
            } else {
                value_type
            };

            compiler.emit(Instruction::Save(assignment.assignee.clone()));
            compiler.emit(Instruction::Load(assignment.assignee.clone()));
            result_type
        }
        Expr::Prefix(prefix) => {
            let operand = gen_expression(compiler, &prefix.right_expr);
            compiler.emit(match prefix.operator {
                PrefixOperator::Not => Instruction::Not,
                PrefixOperator::Minus => Instruction::UMinus,
            });
            rules::prefix_result(prefix.operator, operand).unwrap_or_else(|mismatch| mismatch.fallback)
        }
        Expr::Binary(binary) => gen_binary_expression(compiler, binary),
        Expr::Ternary(ternary) => gen_ternary_expression(compiler, ternary),
        Expr::Grouping(grouping) => gen_expression(compiler, &grouping.expression),
    }
}

fn gen_binary_expression(compiler: &mut Compiler, binary: &BinaryExpr) -> Type {
    let left = gen_expression(compiler, &binary.left);
    let left_end = compiler.position();
    let right = gen_expression(compiler, &binary.right);

    // Widen the int side of a mixed pair; the left side is patched in
    // after the fact since its partner's type is only known now.
    let mut operand_type = left;
    if rules::widens(binary.operator) {
        match (left, right) {
            (Type::Int, Type::Float) => {
                compiler.emit_at(left_end, Instruction::Itof);
                operand_type = Type::Float;
            }
            (Type::Float, Type::Int) => compiler.emit(Instruction::Itof),
            _ => {}
        }
    }

    let tag = tag_of(operand_type);
    match binary.operator {
        BinaryOperator::Add => compiler.emit(Instruction::Add),
        BinaryOperator::Subtract => compiler.emit(Instruction::Sub),
        BinaryOperator::Multiply => compiler.emit(Instruction::Mul),
        BinaryOperator::Divide => compiler.emit(Instruction::Div),
        BinaryOperator::Modulo => compiler.emit(Instruction::Mod),
        BinaryOperator::Concat => compiler.emit(Instruction::Concat),
        BinaryOperator::Less => compiler.emit(Instruction::Lt(tag)),
        BinaryOperator::Greater => compiler.emit(Instruction::Gt(tag)),
        BinaryOperator::Equal => compiler.emit(Instruction::Eq(tag)),
        BinaryOperator::NotEqual => {
            compiler.emit(Instruction::Eq(tag));
            compiler.emit(Instruction::Not);
        }
        BinaryOperator::And => compiler.emit(Instruction::And),
        BinaryOperator::Or => compiler.emit(Instruction::Or),
    }

    rules::binary_result(binary.operator, left, right).unwrap_or_else(|mismatch| mismatch.fallback)
}

/// `cond ? a : b` compiles like an if/else whose branches leave a value.
fn gen_ternary_expression(compiler: &mut Compiler, ternary: &TernaryExpr) -> Type {
    gen_expression(compiler, &ternary.condition);

    let false_label = compiler.new_label();
    let end_label = compiler.new_label();

    compiler.emit(Instruction::FJmp(false_label));
    let then_type = gen_expression(compiler, &ternary.then_expr);
    let then_end = compiler.position();
    compiler.emit(Instruction::Jmp(end_label));

    compiler.emit(Instruction::Label(false_label));
    let else_type = gen_expression(compiler, &ternary.else_expr);

    let result_type = rules::ternary_result(then_type, else_type).unwrap_or_else(|mismatch| mismatch.fallback);
    if result_type == Type::Float {
        if else_type == Type::Int {
            compiler.emit(Instruction::Itof);
        }
        if then_type == Type::Int {
            compiler.emit_at(then_end, Instruction::Itof);
        }
    }

    compiler.emit(Instruction::Label(end_label));
    result_type
}
