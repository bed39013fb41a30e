// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::io::{BufRead, Write};

use log::{debug, info};

use crate::instruction::{Instruction, Label};
use crate::state::{Heap, OperandStack};

/// Number of heap cells an executor owns unless told otherwise.
pub const DEFAULT_HEAP_SIZE: usize = 512;

// ===================================================================
// Runtime Error
// ===================================================================

/// Errors which can arise while a program is executing.  None of
/// these are recoverable from within the language; each one
/// terminates the run.
#[derive(Debug)]
pub enum RuntimeError {
    /// A jump or call targeted a label which no mark in the program
    /// binds.
    UnboundLabel(Label),
    /// An operation needed more items than the operand stack (or the
    /// return-address stack) holds.
    StackUnderflow,
    /// A heap access used an address which is negative or beyond the
    /// last cell.
    BadHeapAddress(i64),
    /// Division or modulo by zero.
    DivisionByZero,
    /// A copy or slide was given a negative count.
    NegativeArgument(i64),
    /// An output value is not a valid character code point.
    BadCodepoint(i64),
    /// A number read from input did not parse as a signed decimal
    /// integer.
    MalformedNumber(String),
    /// End of input was reached while a read was required.
    OutOfInput,
    /// The instruction pointer advanced past the last token without
    /// reaching ENDPROGRAM.
    RanOffEnd,
    /// The underlying input or output stream failed.
    Io(io::Error),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeError::UnboundLabel(label) => {
                write!(f, "jump to unbound label \"{label}\"")
            }
            RuntimeError::StackUnderflow => write!(f, "stack underflow"),
            RuntimeError::BadHeapAddress(address) => {
                write!(f, "heap address {address} out of range")
            }
            RuntimeError::DivisionByZero => write!(f, "division by zero"),
            RuntimeError::NegativeArgument(n) => {
                write!(f, "negative argument {n}")
            }
            RuntimeError::BadCodepoint(n) => {
                write!(f, "{n} is not a character code point")
            }
            RuntimeError::MalformedNumber(text) => {
                write!(f, "malformed number on input: \"{text}\"")
            }
            RuntimeError::OutOfInput => write!(f, "end of input"),
            RuntimeError::RanOffEnd => write!(f, "program ran off end"),
            RuntimeError::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

// ===================================================================
// Label Resolution
// ===================================================================

/// Sweep a program and bind every marked label to its token index.
/// The sweep covers the whole program so that forward references
/// succeed.  A label marked more than once keeps its last binding.
pub fn resolve_labels(program: &[Instruction]) -> HashMap<Label, usize> {
    let mut labels = HashMap::new();
    for (index, insn) in program.iter().enumerate() {
        if let Instruction::MARK(label) = insn {
            debug!("marking token #{index} with label \"{label}\"");
            labels.insert(label.clone(), index);
        }
    }
    labels
}

// ===================================================================
// Input Buffer
// ===================================================================

/// A line-at-a-time buffer over standard input (or any reader).  The
/// executor pulls characters from here one by one, refilling by
/// reading a line whenever the buffer runs dry.  Line terminators are
/// stripped on refill and never handed to the program.
struct InputBuffer<R> {
    reader: R,
    line: Vec<char>,
    cursor: usize,
}

impl<R: BufRead> InputBuffer<R> {
    fn new(reader: R) -> Self {
        InputBuffer {
            reader,
            line: Vec::new(),
            cursor: 0,
        }
    }

    /// The next character of input.  Empty lines are skipped.
    fn next_char(&mut self) -> Result<char, RuntimeError> {
        while self.cursor >= self.line.len() {
            self.refill()?;
        }
        let c = self.line[self.cursor];
        self.cursor += 1;
        Ok(c)
    }

    /// The remainder of the current line, consuming all of it.  When
    /// the buffer is exhausted a fresh line is read first.
    fn rest_of_line(&mut self) -> Result<String, RuntimeError> {
        while self.cursor >= self.line.len() {
            self.refill()?;
        }
        let rest = self.line[self.cursor..].iter().collect();
        self.cursor = self.line.len();
        Ok(rest)
    }

    fn refill(&mut self) -> Result<(), RuntimeError> {
        let mut buffer = String::new();
        let count = self.reader.read_line(&mut buffer).map_err(RuntimeError::Io)?;
        if count == 0 {
            return Err(RuntimeError::OutOfInput);
        }
        while buffer.ends_with('\n') || buffer.ends_with('\r') {
            buffer.pop();
        }
        self.line = buffer.chars().collect();
        self.cursor = 0;
        Ok(())
    }
}

// ===================================================================
// Executor
// ===================================================================

/// The virtual machine.  An executor owns all of its mutable state:
/// the operand stack, the heap, the return-address stack and the
/// input buffer.  Nothing is shared, so independent executors may run
/// side by side provided the caller keeps their streams apart.
pub struct Executor<R, W> {
    program: Vec<Instruction>,
    labels: HashMap<Label, usize>,
    ip: usize,
    stack: OperandStack,
    heap: Heap,
    return_addrs: Vec<usize>,
    input: InputBuffer<R>,
    output: W,
}

impl<R: BufRead, W: Write> Executor<R, W> {
    /// Construct an executor over a program with the default heap
    /// size, reading from `input` and writing to `output`.
    pub fn new(program: Vec<Instruction>, input: R, output: W) -> Self {
        Self::with_heap_size(program, DEFAULT_HEAP_SIZE, input, output)
    }

    /// Construct an executor with an explicit heap size.  Labels are
    /// resolved up front so that forward jumps work.
    pub fn with_heap_size(
        program: Vec<Instruction>,
        heap_size: usize,
        input: R,
        output: W,
    ) -> Self {
        let labels = resolve_labels(&program);
        Executor {
            program,
            labels,
            ip: 0,
            stack: OperandStack::new(),
            heap: Heap::new(heap_size),
            return_addrs: Vec::new(),
            input: InputBuffer::new(input),
            output,
        }
    }

    /// The operand stack, as left by the last run.
    pub fn stack(&self) -> &OperandStack {
        &self.stack
    }

    /// The heap, as left by the last run.
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Run the fetch/execute cycle to completion.  Returns `Ok` only
    /// when the program reaches ENDPROGRAM; every fault and the case
    /// of running off the end of the program come back as an error.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        debug!("executing ...");
        loop {
            let insn = match self.program.get(self.ip) {
                Some(insn) => insn.clone(),
                None => return Err(RuntimeError::RanOffEnd),
            };
            debug!("#{:04} {} stack={}", self.ip, insn, self.stack);
            //
            match insn {
                Instruction::PUSH(n) => self.stack.push(n),
                Instruction::DUPLICATE => {
                    let top = self.peek(0)?;
                    self.stack.push(top);
                }
                Instruction::COPY(n) => {
                    let item = self.peek(index_arg(n)?)?;
                    self.stack.push(item);
                }
                Instruction::SWAP => {
                    let b = self.pop()?;
                    let a = self.pop()?;
                    self.stack.push(b);
                    self.stack.push(a);
                }
                Instruction::DISCARD => {
                    self.pop()?;
                }
                Instruction::SLIDE(n) => {
                    let top = self.pop()?;
                    for _ in 0..index_arg(n)? {
                        let slid = self.pop()?;
                        debug!("slid {slid} off the stack");
                    }
                    self.stack.push(top);
                }
                Instruction::ADD => self.binary(|a, b| Ok(a.wrapping_add(b)))?,
                Instruction::SUB => self.binary(|a, b| Ok(a.wrapping_sub(b)))?,
                Instruction::MULT => self.binary(|a, b| Ok(a.wrapping_mul(b)))?,
                Instruction::DIV => self.binary(floor_div)?,
                Instruction::MOD => self.binary(floor_mod)?,
                Instruction::STORE => {
                    let value = self.pop()?;
                    let address = self.pop()?;
                    self.heap
                        .store(address, value)
                        .ok_or(RuntimeError::BadHeapAddress(address))?;
                    debug!("stored {value} at heap address {address}");
                }
                Instruction::RETRIEVE => {
                    let address = self.pop()?;
                    let value = self
                        .heap
                        .load(address)
                        .ok_or(RuntimeError::BadHeapAddress(address))?;
                    self.stack.push(value);
                }
                Instruction::MARK(_) => {
                    // Already bound during resolution.
                }
                Instruction::CALL(label) => {
                    self.return_addrs.push(self.ip + 1);
                    self.ip = self.target(&label)?;
                    continue;
                }
                Instruction::JUMP(label) => {
                    self.ip = self.target(&label)?;
                    continue;
                }
                Instruction::JUMPZERO(label) => {
                    if self.pop()? == 0 {
                        self.ip = self.target(&label)?;
                        continue;
                    }
                }
                Instruction::JUMPNEG(label) => {
                    if self.pop()? < 0 {
                        self.ip = self.target(&label)?;
                        continue;
                    }
                }
                Instruction::RETURN => {
                    let addr = self.return_addrs.pop().ok_or(RuntimeError::StackUnderflow)?;
                    self.ip = addr;
                    continue;
                }
                Instruction::ENDPROGRAM => {
                    info!("program completed successfully");
                    return Ok(());
                }
                Instruction::OUTCH => {
                    let n = self.pop()?;
                    let c = u32::try_from(n)
                        .ok()
                        .and_then(char::from_u32)
                        .ok_or(RuntimeError::BadCodepoint(n))?;
                    write!(self.output, "{c}").map_err(RuntimeError::Io)?;
                    self.output.flush().map_err(RuntimeError::Io)?;
                }
                Instruction::OUTNUM => {
                    let n = self.pop()?;
                    write!(self.output, "{n}").map_err(RuntimeError::Io)?;
                    self.output.flush().map_err(RuntimeError::Io)?;
                }
                Instruction::INCH => {
                    let address = self.pop()?;
                    let c = self.input.next_char()?;
                    self.heap
                        .store(address, c as i64)
                        .ok_or(RuntimeError::BadHeapAddress(address))?;
                    debug!("read character {c:?} into heap address {address}");
                }
                Instruction::INNUM => {
                    let address = self.pop()?;
                    // One token is parsed; the rest of the line is
                    // consumed and discarded with it.
                    let text = self.input.rest_of_line()?;
                    let token = text.split_whitespace().next().unwrap_or("");
                    let value: i64 = token
                        .parse()
                        .map_err(|_| RuntimeError::MalformedNumber(token.to_string()))?;
                    self.heap
                        .store(address, value)
                        .ok_or(RuntimeError::BadHeapAddress(address))?;
                    debug!("read number {value} into heap address {address}");
                }
            }
            //
            self.ip += 1;
        }
    }

    /// Pop the top of the operand stack, faulting when it is empty.
    fn pop(&mut self) -> Result<i64, RuntimeError> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow)
    }

    /// Read the item `n` below the top without removing it.
    fn peek(&self, n: usize) -> Result<i64, RuntimeError> {
        self.stack.peek(n).ok_or(RuntimeError::StackUnderflow)
    }

    /// Pop two operands and push the result of `op` applied to them.
    /// The deeper operand is the left-hand side.
    fn binary<F>(&mut self, op: F) -> Result<(), RuntimeError>
    where
        F: FnOnce(i64, i64) -> Result<i64, RuntimeError>,
    {
        let b = self.pop()?;
        let a = self.pop()?;
        self.stack.push(op(a, b)?);
        Ok(())
    }

    /// The token index a label resolves to.  Unbound labels fault
    /// here, at the moment the jump is attempted.
    fn target(&self, label: &Label) -> Result<usize, RuntimeError> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| RuntimeError::UnboundLabel(label.clone()))
    }
}

/// Check a copy or slide count, which must be nonnegative.
fn index_arg(n: i64) -> Result<usize, RuntimeError> {
    usize::try_from(n).map_err(|_| RuntimeError::NegativeArgument(n))
}

/// Floored division: the quotient rounds towards negative infinity,
/// so `(-7) / 2` gives `-4`.  The built-in operator truncates
/// instead.
fn floor_div(a: i64, b: i64) -> Result<i64, RuntimeError> {
    if b == 0 {
        return Err(RuntimeError::DivisionByZero);
    }
    let q = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && (a < 0) != (b < 0) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Floored modulo: the remainder takes the sign of the divisor, so
/// `(-7) mod 2` gives `1`.
fn floor_mod(a: i64, b: i64) -> Result<i64, RuntimeError> {
    if b == 0 {
        return Err(RuntimeError::DivisionByZero);
    }
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}
