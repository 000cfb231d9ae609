//! Type checking and semantic analysis module.
//!
//! This module walks the AST once, depth first, and assigns a static type to
//! every expression while:
//!
//! - Maintaining the single global symbol table
//! - Detecting double declarations and uses of undeclared variables
//! - Applying the numeric coercion rules shared with the code generator
//!
//! Problems never abort the pass. Each one is recorded as a `Diagnostic`
//! and checking continues with a fallback type.

pub mod diagnostics;
pub mod rules;
pub mod type_checker;

#[cfg(test)]
mod tests;
