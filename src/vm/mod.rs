//! Stack virtual machine module.
//!
//! Holds the runtime value model, the textual instruction set with its
//! parser and renderer, and the interpreter that executes it.

pub mod instruction;
pub mod value;
pub mod vm;
