use std::{
    collections::HashMap,
    io::{self, BufRead, Write},
};

use tracing::{debug, trace, warn};

use crate::errors::errors::RuntimeError;

use super::{
    instruction::{parse_instructions, Instruction},
    value::{TypeTag, Value},
};

/// Equality tolerance for floats.
pub const FLOAT_EPSILON: f32 = 0.1;

/// A stack interpreter for the textual instruction set.
///
/// Labels are resolved lazily: a `label` records its index when executed,
/// and a jump to a label not yet recorded scans forward for it.
pub struct Vm {
    stack: Vec<Value>,
    memory: HashMap<String, Value>,
    labels: HashMap<u64, usize>,
    instructions: Vec<Instruction>,
    lines: Vec<usize>,
    ip: usize,
}

impl Vm {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        let lines = (1..=instructions.len()).collect();
        Vm::with_lines(instructions, lines)
    }

    /// Parses an instruction stream; errors point at the offending text line.
    pub fn from_text(text: &str) -> Result<Self, RuntimeError> {
        let (lines, instructions): (Vec<usize>, Vec<Instruction>) =
            parse_instructions(text)?.into_iter().unzip();
        Ok(Vm::with_lines(instructions, lines))
    }

    fn with_lines(instructions: Vec<Instruction>, lines: Vec<usize>) -> Self {
        Vm {
            stack: Vec::new(),
            memory: HashMap::new(),
            labels: HashMap::new(),
            instructions,
            lines,
            ip: 0,
        }
    }

    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.memory.get(name)
    }

    /// Runs against the process stdin and stdout.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with_io(&mut stdin.lock(), &mut stdout.lock())
    }

    pub fn run_with_io<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<(), RuntimeError> {
        debug!(instructions = self.instructions.len(), "starting execution");

        while self.ip < self.instructions.len() {
            let instruction = self.instructions[self.ip].clone();
            trace!(ip = self.ip, depth = self.stack.len(), "{}", instruction);
            self.ip += 1;
            self.execute(instruction, input, output)?;
        }

        debug!(variables = self.memory.len(), "execution finished");
        Ok(())
    }

    /// Line of the instruction currently executing.
    fn line(&self) -> usize {
        self.lines.get(self.ip.saturating_sub(1)).copied().unwrap_or(0)
    }

    fn pop(&mut self, opcode: &'static str) -> Result<Value, RuntimeError> {
        let line = self.line();
        self.stack.pop().ok_or(RuntimeError::StackUnderflow { line, opcode })
    }

    /// Pops right then left, returning them in source order.
    fn pop_operands(&mut self, opcode: &'static str) -> Result<(Value, Value), RuntimeError> {
        let right = self.pop(opcode)?;
        let left = self.pop(opcode)?;
        Ok((left, right))
    }

    fn mismatch(&self, opcode: &'static str, operands: &[&Value]) -> RuntimeError {
        RuntimeError::OperandMismatch {
            line: self.line(),
            opcode,
            operands: operands
                .iter()
                .map(|value| value.tag().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Index of the `label <id>` instruction, from the table or by scanning forward.
    fn find_label(&self, id: u64) -> Option<usize> {
        if let Some(index) = self.labels.get(&id) {
            return Some(*index);
        }

        self.instructions[self.ip..]
            .iter()
            .position(|instruction| *instruction == Instruction::Label(id))
            .map(|offset| self.ip + offset)
    }

    fn jump(&mut self, id: u64) {
        match self.find_label(id) {
            Some(index) => self.ip = index,
            None => warn!(line = self.line(), label = id, "jump target not found, falling through"),
        }
    }

    fn execute<R: BufRead, W: Write>(
        &mut self,
        instruction: Instruction,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), RuntimeError> {
        let opcode = instruction.opcode();

        match instruction {
            Instruction::Add | Instruction::Sub | Instruction::Mul => {
                let (left, right) = self.pop_operands(opcode)?;
                let result = match (&left, &right) {
                    (Value::Int(l), Value::Int(r)) => Value::Int(match instruction {
                        Instruction::Add => l.wrapping_add(*r),
                        Instruction::Sub => l.wrapping_sub(*r),
                        _ => l.wrapping_mul(*r),
                    }),
                    (Value::Float(l), Value::Float(r)) => Value::Float(match instruction {
                        Instruction::Add => l + r,
                        Instruction::Sub => l - r,
                        _ => l * r,
                    }),
                    _ => return Err(self.mismatch(opcode, &[&left, &right])),
                };
                self.stack.push(result);
            }
            Instruction::Div | Instruction::Mod => {
                let (left, right) = self.pop_operands(opcode)?;
                let result = match (&left, &right) {
                    (Value::Int(_), Value::Int(0)) => {
                        return Err(RuntimeError::DivisionByZero { line: self.line(), opcode })
                    }
                    (Value::Int(l), Value::Int(r)) => Value::Int(if instruction == Instruction::Div {
                        l.wrapping_div(*r)
                    } else {
                        l.wrapping_rem(*r)
                    }),
                    (Value::Float(l), Value::Float(r)) if instruction == Instruction::Div => Value::Float(l / r),
                    _ => return Err(self.mismatch(opcode, &[&left, &right])),
                };
                self.stack.push(result);
            }
            Instruction::UMinus => {
                let value = self.pop(opcode)?;
                let result = match value {
                    Value::Int(value) => Value::Int(value.wrapping_neg()),
                    Value::Float(value) => Value::Float(-value),
                    _ => return Err(self.mismatch(opcode, &[&value])),
                };
                self.stack.push(result);
            }
            Instruction::Concat => {
                let (left, right) = self.pop_operands(opcode)?;
                match (left, right) {
                    (Value::String(mut l), Value::String(r)) => {
                        l.push_str(&r);
                        self.stack.push(Value::String(l));
                    }
                    (left, right) => return Err(self.mismatch(opcode, &[&left, &right])),
                }
            }
            Instruction::And | Instruction::Or => {
                let (left, right) = self.pop_operands(opcode)?;
                let result = match (&left, &right) {
                    (Value::Bool(l), Value::Bool(r)) => {
                        if instruction == Instruction::And {
                            *l && *r
                        } else {
                            *l || *r
                        }
                    }
                    _ => return Err(self.mismatch(opcode, &[&left, &right])),
                };
                self.stack.push(Value::Bool(result));
            }
            Instruction::Gt(_) | Instruction::Lt(_) => {
                let (left, right) = self.pop_operands(opcode)?;
                let greater = matches!(instruction, Instruction::Gt(_));
                let result = match (&left, &right) {
                    (Value::Int(l), Value::Int(r)) => if greater { l > r } else { l < r },
                    (Value::Float(l), Value::Float(r)) => if greater { l > r } else { l < r },
                    _ => return Err(self.mismatch(opcode, &[&left, &right])),
                };
                self.stack.push(Value::Bool(result));
            }
            Instruction::Eq(_) => {
                let (left, right) = self.pop_operands(opcode)?;
                let result = match (&left, &right) {
                    (Value::Float(l), Value::Float(r)) => (l - r).abs() < FLOAT_EPSILON,
                    (l, r) => l == r,
                };
                self.stack.push(Value::Bool(result));
            }
            Instruction::Not => match self.pop(opcode)? {
                Value::Bool(value) => self.stack.push(Value::Bool(!value)),
                value => return Err(self.mismatch(opcode, &[&value])),
            },
            Instruction::Itof => match self.pop(opcode)? {
                Value::Int(value) => self.stack.push(Value::Float(value as f32)),
                Value::Float(value) => self.stack.push(Value::Float(value)),
                value => return Err(self.mismatch(opcode, &[&value])),
            },
            Instruction::Push(value) => self.stack.push(value),
            Instruction::Pop => {
                self.pop(opcode)?;
            }
            Instruction::Load(name) => {
                let value = self.memory.get(&name).cloned().ok_or_else(|| RuntimeError::UndefinedVariable {
                    line: self.line(),
                    name: name.clone(),
                })?;
                self.stack.push(value);
            }
            Instruction::Save(name) => {
                let value = self.pop(opcode)?;
                self.memory.insert(name, value);
            }
            Instruction::Label(id) => {
                self.labels.insert(id, self.ip - 1);
            }
            Instruction::Jmp(id) => self.jump(id),
            Instruction::FJmp(id) => match self.pop(opcode)? {
                Value::Bool(true) => {}
                Value::Bool(false) => self.jump(id),
                value => return Err(self.mismatch(opcode, &[&value])),
            },
            Instruction::Print(count) => self.print(count, output)?,
            Instruction::Read(tag) => {
                output.flush().map_err(|e| self.io_error(opcode, e))?;
                let value = self.read(tag, input)?;
                self.stack.push(value);
            }
        }

        Ok(())
    }

    fn io_error(&self, opcode: &'static str, error: io::Error) -> RuntimeError {
        RuntimeError::Io {
            line: self.line(),
            opcode,
            message: error.to_string(),
        }
    }

    fn print<W: Write>(&mut self, count: usize, output: &mut W) -> Result<(), RuntimeError> {
        if self.stack.len() < count {
            return Err(RuntimeError::StackUnderflow { line: self.line(), opcode: "print" });
        }

        let values = self.stack.split_off(self.stack.len() - count);
        let mut text = String::new();
        for value in &values {
            text.push_str(&value.to_string());
        }

        writeln!(output, "{}", text).map_err(|e| self.io_error("print", e))?;
        output.flush().map_err(|e| self.io_error("print", e))
    }

    fn read<R: BufRead>(&self, tag: TypeTag, input: &mut R) -> Result<Value, RuntimeError> {
        let mut line = String::new();
        let bytes = input.read_line(&mut line).map_err(|e| self.io_error("read", e))?;
        if bytes == 0 {
            return Err(RuntimeError::EndOfInput { line: self.line() });
        }

        let text = line.strip_suffix('\n').unwrap_or(&line);
        let text = text.strip_suffix('\r').unwrap_or(text);

        tag.parse_value(text).ok_or_else(|| RuntimeError::InvalidValue {
            line: self.line(),
            opcode: "read",
            tag,
            value: text.to_string(),
        })
    }
}
