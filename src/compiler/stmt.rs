use crate::{
    ast::ast::{Expr, Stmt},
    vm::instruction::Instruction,
};

use super::{
    compiler::{tag_of, Compiler},
    expr::gen_expression,
};

pub fn gen_statement(compiler: &mut Compiler, statement: &Stmt) {
    match statement {
        Stmt::Empty(_) => {}
        Stmt::VarDecl(decl) => {
            for name in &decl.identifiers {
                if let Some(zero) = decl.var_type.zero_value() {
                    compiler.emit(Instruction::Push(zero));
                }
                compiler.emit(Instruction::Save(name.clone()));
                compiler.declare_variable(name, decl.var_type);
            }
        }
        Stmt::Expression(expr_stmt) => gen_discarded(compiler, &expr_stmt.expression),
        Stmt::Read(read) => {
            for name in &read.identifiers {
                let tag = tag_of(compiler.variable_type(name));
                compiler.emit(Instruction::Read(tag));
                compiler.emit(Instruction::Save(name.clone()));
            }
        }
        Stmt::Write(write) => {
            for expr in &write.expressions {
                gen_expression(compiler, expr);
            }
            compiler.emit(Instruction::Print(write.expressions.len()));
        }
        Stmt::Block(block) => {
            for inner in block.iter() {
                gen_statement(compiler, inner);
            }
        }
        Stmt::If(if_stmt) => {
            gen_expression(compiler, &if_stmt.condition);

            let false_label = compiler.new_label();
            let end_label = compiler.new_label();

            compiler.emit(Instruction::FJmp(false_label));
            gen_statement(compiler, &if_stmt.then_body);
            compiler.emit(Instruction::Jmp(end_label));

            compiler.emit(Instruction::Label(false_label));
            if let Some(else_body) = &if_stmt.else_body {
                gen_statement(compiler, else_body);
            }
            compiler.emit(Instruction::Label(end_label));
        }
        Stmt::While(while_stmt) => {
            let top_label = compiler.new_label();
            let end_label = compiler.new_label();

            compiler.emit(Instruction::Label(top_label));
            gen_expression(compiler, &while_stmt.condition);
            compiler.emit(Instruction::FJmp(end_label));

            gen_statement(compiler, &while_stmt.body);
            compiler.emit(Instruction::Jmp(top_label));
            compiler.emit(Instruction::Label(end_label));
        }
        Stmt::For(for_stmt) => {
            gen_discarded(compiler, &for_stmt.init);

            let top_label = compiler.new_label();
            let end_label = compiler.new_label();

            compiler.emit(Instruction::Label(top_label));
            gen_expression(compiler, &for_stmt.condition);
            compiler.emit(Instruction::FJmp(end_label));

            gen_statement(compiler, &for_stmt.body);
            gen_discarded(compiler, &for_stmt.step);
            compiler.emit(Instruction::Jmp(top_label));
            compiler.emit(Instruction::Label(end_label));
        }
    }
}

/// Evaluates an expression for its side effects only.
fn gen_discarded(compiler: &mut Compiler, expr: &Expr) {
    gen_expression(compiler, expr);
    compiler.emit(Instruction::Pop);
}
