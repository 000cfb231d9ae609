use std::fmt::Display;

use crate::errors::errors::RuntimeError;

use super::value::{TypeTag, Value};

/// One stack machine instruction, rendered as one line of the stream text.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    UMinus,
    Concat,
    And,
    Or,
    Gt(TypeTag),
    Lt(TypeTag),
    Eq(TypeTag),
    Not,
    Itof,
    Push(Value),
    Pop,
    Load(String),
    Save(String),
    Label(u64),
    Jmp(u64),
    FJmp(u64),
    Print(usize),
    Read(TypeTag),
}

impl Instruction {
    pub fn opcode(&self) -> &'static str {
        match self {
            Instruction::Add => "add",
            Instruction::Sub => "sub",
            Instruction::Mul => "mul",
            Instruction::Div => "div",
            Instruction::Mod => "mod",
            Instruction::UMinus => "uminus",
            Instruction::Concat => "concat",
            Instruction::And => "and",
            Instruction::Or => "or",
            Instruction::Gt(_) => "gt",
            Instruction::Lt(_) => "lt",
            Instruction::Eq(_) => "eq",
            Instruction::Not => "not",
            Instruction::Itof => "itof",
            Instruction::Push(_) => "push",
            Instruction::Pop => "pop",
            Instruction::Load(_) => "load",
            Instruction::Save(_) => "save",
            Instruction::Label(_) => "label",
            Instruction::Jmp(_) => "jmp",
            Instruction::FJmp(_) => "fjmp",
            Instruction::Print(_) => "print",
            Instruction::Read(_) => "read",
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Gt(tag) | Instruction::Lt(tag) | Instruction::Eq(tag) | Instruction::Read(tag) => {
                write!(f, "{} {}", self.opcode(), tag)
            }
            Instruction::Push(value) => write!(f, "push {} {}", value.tag(), value.literal()),
            Instruction::Load(name) | Instruction::Save(name) => write!(f, "{} {}", self.opcode(), name),
            Instruction::Label(id) | Instruction::Jmp(id) | Instruction::FJmp(id) => {
                write!(f, "{} {}", self.opcode(), id)
            }
            Instruction::Print(count) => write!(f, "print {}", count),
            _ => write!(f, "{}", self.opcode()),
        }
    }
}

/// Renders instructions as newline delimited text, one instruction per line.
pub fn render_instructions(instructions: &[Instruction]) -> String {
    let mut text = String::new();
    for instruction in instructions {
        text.push_str(&instruction.to_string());
        text.push('\n');
    }
    text
}

/// Parses a whole instruction stream. Blank lines are skipped; every parsed
/// instruction is paired with its 1-based line number in `text`.
pub fn parse_instructions(text: &str) -> Result<Vec<(usize, Instruction)>, RuntimeError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| Ok((index + 1, parse_instruction(line, index + 1)?)))
        .collect()
}

pub fn parse_instruction(text: &str, line: usize) -> Result<Instruction, RuntimeError> {
    let mut parts = text.split_whitespace();
    let opcode = parts.next().unwrap_or_default();
    let operands: Vec<&str> = parts.collect();

    let malformed = || RuntimeError::MalformedInstruction {
        line,
        opcode: opcode.to_string(),
        text: text.trim().to_string(),
    };

    let no_operands = |instruction: Instruction| {
        if operands.is_empty() {
            Ok(instruction)
        } else {
            Err(malformed())
        }
    };

    let single = || match operands.as_slice() {
        [operand] => Ok(*operand),
        _ => Err(malformed()),
    };

    let tag = || single().and_then(|letter| TypeTag::from_letter(letter).ok_or_else(malformed));
    let id = || single().and_then(|id| id.parse::<u64>().map_err(|_| malformed()));

    match opcode {
        "add" => no_operands(Instruction::Add),
        "sub" => no_operands(Instruction::Sub),
        "mul" => no_operands(Instruction::Mul),
        "div" => no_operands(Instruction::Div),
        "mod" => no_operands(Instruction::Mod),
        "uminus" => no_operands(Instruction::UMinus),
        "concat" => no_operands(Instruction::Concat),
        "and" => no_operands(Instruction::And),
        "or" => no_operands(Instruction::Or),
        "not" => no_operands(Instruction::Not),
        "itof" => no_operands(Instruction::Itof),
        "pop" => no_operands(Instruction::Pop),
        "gt" => Ok(Instruction::Gt(tag()?)),
        "lt" => Ok(Instruction::Lt(tag()?)),
        "eq" => Ok(Instruction::Eq(tag()?)),
        "read" => Ok(Instruction::Read(tag()?)),
        "load" => Ok(Instruction::Load(single()?.to_string())),
        "save" => Ok(Instruction::Save(single()?.to_string())),
        "label" => Ok(Instruction::Label(id()?)),
        "jmp" => Ok(Instruction::Jmp(id()?)),
        "fjmp" => Ok(Instruction::FJmp(id()?)),
        "print" => Ok(Instruction::Print(
            single()?.parse::<usize>().map_err(|_| malformed())?,
        )),
        "push" => parse_push(text, &operands, line).ok_or_else(malformed)?,
        _ => Err(RuntimeError::UnknownOpcode {
            line,
            opcode: opcode.to_string(),
        }),
    }
}

/// `push <tag> <value>`. A string value is the text between the first two
/// double quotes of the line, so it may contain spaces.
fn parse_push(text: &str, operands: &[&str], line: usize) -> Option<Result<Instruction, RuntimeError>> {
    let tag = TypeTag::from_letter(operands.first()?)?;

    let raw = match tag {
        TypeTag::String => {
            let open = text.find('"')?;
            let close = text[open + 1..].find('"')? + open + 1;
            return Some(Ok(Instruction::Push(Value::String(text[open + 1..close].to_string()))));
        }
        _ => match operands {
            [_, value] => *value,
            _ => return None,
        },
    };

    Some(
        tag.parse_value(raw)
            .map(Instruction::Push)
            .ok_or_else(|| RuntimeError::InvalidValue {
                line,
                opcode: "push",
                tag,
                value: raw.to_string(),
            }),
    )
}
