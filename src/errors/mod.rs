//! Error types for the toolchain.
//!
//! This module defines the fatal errors of the pipeline:
//!
//! - Syntax errors raised by the lexer and parser, with source positions
//! - Runtime faults raised by the virtual machine, with instruction lines
//! - Tips and names used when rendering syntax errors
//!
//! Static type errors are not fatal and live with the type checker as diagnostics.

pub mod errors;
