//! Static types of the language.

use std::fmt::Display;

use crate::vm::value::{TypeTag, Value};

/// The static type of an expression or a declared variable.
///
/// `Void` is the error sentinel given to expressions that could not be typed,
/// such as a reference to an undeclared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Bool,
    String,
    Void,
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    /// The runtime tag matching this type. `Void` has no runtime representation.
    pub fn tag(&self) -> Option<TypeTag> {
        match self {
            Type::Int => Some(TypeTag::Int),
            Type::Float => Some(TypeTag::Float),
            Type::Bool => Some(TypeTag::Bool),
            Type::String => Some(TypeTag::String),
            Type::Void => None,
        }
    }

    /// The value a freshly declared variable of this type holds.
    pub fn zero_value(&self) -> Option<Value> {
        match self {
            Type::Int => Some(Value::Int(0)),
            Type::Float => Some(Value::Float(0.0)),
            Type::Bool => Some(Value::Bool(false)),
            Type::String => Some(Value::String(String::new())),
            Type::Void => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Bool => write!(f, "bool"),
            Type::String => write!(f, "string"),
            Type::Void => write!(f, "void"),
        }
    }
}
