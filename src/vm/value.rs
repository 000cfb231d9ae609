use std::fmt::Display;

/// One-letter runtime type marker carried by `push`, `read`, `gt`, `lt` and `eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Int,
    Float,
    String,
    Bool,
}

impl TypeTag {
    pub fn from_letter(letter: &str) -> Option<TypeTag> {
        match letter {
            "I" => Some(TypeTag::Int),
            "F" => Some(TypeTag::Float),
            "S" => Some(TypeTag::String),
            "B" => Some(TypeTag::Bool),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            TypeTag::Int => 'I',
            TypeTag::Float => 'F',
            TypeTag::String => 'S',
            TypeTag::Bool => 'B',
        }
    }

    /// Parses a textual value according to the tag.
    ///
    /// Used by both `push` operands and `read` input lines. Returns `None`
    /// when the text is not a valid value of this type.
    pub fn parse_value(&self, text: &str) -> Option<Value> {
        match self {
            TypeTag::Int => text.trim().parse::<i32>().ok().map(Value::Int),
            TypeTag::Float => text.trim().parse::<f32>().ok().map(Value::Float),
            TypeTag::String => Some(Value::String(text.to_string())),
            TypeTag::Bool => {
                let text = text.trim();
                if text.eq_ignore_ascii_case("true") {
                    Some(Value::Bool(true))
                } else if text.eq_ignore_ascii_case("false") {
                    Some(Value::Bool(false))
                } else {
                    None
                }
            }
        }
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A runtime scalar living on the operand stack or in the variable store.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
    Bool(bool),
    String(String),
}

impl Value {
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Bool(_) => TypeTag::Bool,
            Value::String(_) => TypeTag::String,
        }
    }

    /// Renders the value as a `push` operand that `TypeTag::parse_value` reads back.
    pub fn literal(&self) -> String {
        match self {
            Value::Int(value) => value.to_string(),
            // `{:?}` keeps a fractional part on whole numbers (`0.0`, not `0`)
            Value::Float(value) => format!("{:?}", value),
            Value::Bool(value) => value.to_string(),
            Value::String(value) => format!("\"{}\"", value),
        }
    }
}

/// Output formatting used by `print`.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", format_float(*value)),
            Value::Bool(value) => write!(f, "{}", if *value { "true" } else { "false" }),
            Value::String(value) => write!(f, "{}", value),
        }
    }
}

const MAX_FRACTION_DIGITS: usize = 12;

/// Shortest text that reads back as `value`, capped at twelve fractional
/// digits, always with at least one fractional digit.
fn format_float(value: f32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let mut text = value.to_string();
    match text.find('.') {
        None => text.push_str(".0"),
        Some(dot) if text.len() - dot - 1 > MAX_FRACTION_DIGITS => {
            text = format!("{:.*}", MAX_FRACTION_DIGITS, value);
            while text.ends_with('0') && !text.ends_with(".0") {
                text.pop();
            }
        }
        Some(_) => {}
    }
    if text == "-0.0" {
        text.remove(0);
    }
    text
}
