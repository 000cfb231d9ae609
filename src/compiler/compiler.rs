//! Main compiler module.
//!
//! This module contains the core Compiler structure that drives the
//! translation of a checked program into stack machine instructions. It
//! tracks variable storage types and allocates jump labels.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::{ast::Program, types::Type},
    vm::{
        instruction::{render_instructions, Instruction},
        value::TypeTag,
    },
};

use super::stmt::gen_statement;

/// The state of one compilation.
///
/// Code generation assumes the program passed type checking and never
/// fails; it recomputes expression types with the shared coercion rules
/// as it emits.
#[derive(Debug, Default)]
pub struct Compiler {
    /// Storage type of every declared variable; the first declaration wins
    pub variables: HashMap<String, Type>,
    /// Next label id, shared by every construct in the program
    pub label_counter: u64,
    /// Instructions emitted so far
    pub instructions: Vec<Instruction>,
}

impl Compiler {
    pub fn new() -> Self {
        Compiler::default()
    }

    pub fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Inserts an instruction at `index`, shifting everything emitted after it.
    ///
    /// Jumps refer to label ids rather than positions, so already emitted
    /// control flow stays valid.
    pub fn emit_at(&mut self, index: usize, instruction: Instruction) {
        self.instructions.insert(index, instruction);
    }

    /// Current end of the instruction buffer, for a later `emit_at`.
    pub fn position(&self) -> usize {
        self.instructions.len()
    }

    /// Allocates the next unused label id.
    pub fn new_label(&mut self) -> u64 {
        let label = self.label_counter;
        self.label_counter += 1;
        label
    }

    pub fn declare_variable(&mut self, name: &str, variable_type: Type) {
        self.variables.entry(name.to_string()).or_insert(variable_type);
    }

    /// Storage type of `name`, or `Void` when it was never declared.
    pub fn variable_type(&self, name: &str) -> Type {
        self.variables.get(name).copied().unwrap_or(Type::Void)
    }

    /// Renders the emitted instructions as newline delimited text.
    pub fn render(&self) -> String {
        render_instructions(&self.instructions)
    }
}

/// Runtime tag for a static type.
///
/// `Void` only shows up for programs the type checker rejected; it is
/// given the Int tag.
pub fn tag_of(ty: Type) -> TypeTag {
    ty.tag().unwrap_or(TypeTag::Int)
}

/// Compiles a whole program into its instruction sequence.
///
/// # Arguments
///
/// * `program` - A program that produced no type checking diagnostics
///
/// # Returns
///
/// The compiler after generation, holding the instructions and the
/// variable storage types.
pub fn compile(program: &Program) -> Compiler {
    let mut compiler = Compiler::new();

    for stmt in program.iter() {
        gen_statement(&mut compiler, stmt);
    }

    debug!(
        instructions = compiler.instructions.len(),
        labels = compiler.label_counter,
        "code generation finished"
    );
    compiler
}
