//! Code generation module for the compiler.
//!
//! This module turns a checked `Program` into stack machine instructions.
//! It handles:
//!
//! - Expressions, with `itof` widening on the int side of mixed operands
//! - Declarations, assignments and I/O statements
//! - Conditionals, loops and ternaries through synthetic jump labels

pub mod compiler;
pub mod expr;
pub mod stmt;

#[cfg(test)]
mod tests;
