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
use std::fmt;

use log::debug;

use crate::instruction::{ArgKind, Instruction, Label, Opcode, OPCODES};
use crate::lexer;

/// How many significant characters of context a syntax diagnostic
/// carries.
const CONTEXT_LEN: usize = 25;

// ===================================================================
// Syntax Error
// ===================================================================

/// Errors which can arise when tokenizing a Whitespace program.  All
/// offsets count significant characters (space, tab, line feed) from
/// the start of the filtered stream, and the context is a letter dump
/// of the stream from the offending position.
#[derive(Debug, PartialEq, Eq)]
pub enum SyntaxError {
    /// No instruction prefix matches at the given position.
    UnknownOperation { offset: usize, context: String },
    /// A number began with a line feed where its sign was expected.
    BadNumberSign { offset: usize, context: String },
    /// The stream ended inside a number, before its terminating line
    /// feed.
    UnterminatedNumber { offset: usize },
    /// The stream ended inside a label, before its terminating line
    /// feed.
    UnterminatedLabel { offset: usize },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyntaxError::UnknownOperation { offset, context } => {
                write!(f, "unknown operation at offset {offset}: {context}")
            }
            SyntaxError::BadNumberSign { offset, context } => {
                write!(f, "bad number sign at offset {offset}: {context}")
            }
            SyntaxError::UnterminatedNumber { offset } => {
                write!(f, "unterminated number at offset {offset}")
            }
            SyntaxError::UnterminatedLabel { offset } => {
                write!(f, "unterminated label at offset {offset}")
            }
        }
    }
}

impl std::error::Error for SyntaxError {}

// ===================================================================
// Parser
// ===================================================================

/// Tokenize a raw Whitespace source into its instruction sequence.
/// Comment characters are filtered out first, so they may appear
/// anywhere in the input.
pub fn parse(source: &str) -> Result<Vec<Instruction>, SyntaxError> {
    Parser::new(source).parse()
}

/// A tokenizer for the filtered character stream.  The stream is held
/// in letter form (`S`/`T`/`L`) so that prefixes, labels and
/// diagnostics all read the same way.
pub struct Parser {
    chars: Vec<char>,
    index: usize,
}

impl Parser {
    /// Construct a parser from raw source.  Anything which is not
    /// space, tab or line feed is dropped here.
    pub fn new(source: &str) -> Self {
        let chars = lexer::unwhite(&lexer::filter(source), usize::MAX)
            .chars()
            .collect();
        Self { chars, index: 0 }
    }

    /// Tokenize the entire stream, left to right.  Each instruction
    /// is a greedy prefix match followed (for some operations) by a
    /// number or label argument.
    pub fn parse(mut self) -> Result<Vec<Instruction>, SyntaxError> {
        let mut program = Vec::new();
        //
        while self.index < self.chars.len() {
            debug!("tokenizing at {}", self.context());
            program.push(self.parse_instruction()?);
        }
        //
        Ok(program)
    }

    /// Decode a single instruction at the current position.
    fn parse_instruction(&mut self) -> Result<Instruction, SyntaxError> {
        let opcode = match self.match_prefix() {
            Some(op) => op,
            None => {
                return Err(SyntaxError::UnknownOperation {
                    offset: self.index,
                    context: self.context(),
                });
            }
        };
        // Decode the argument (if any)
        let insn = match opcode.arg_kind() {
            ArgKind::None => Instruction::nullary(opcode),
            ArgKind::Number => Instruction::with_number(opcode, self.parse_number()?),
            ArgKind::Label => Instruction::with_label(opcode, self.parse_label()?),
        };
        debug!("decoded {} {}", opcode.prefix(), insn);
        Ok(insn)
    }

    /// Try every prefix in table order, advancing past the first one
    /// which matches.  At most one can match since the prefixes form
    /// a prefix code.
    fn match_prefix(&mut self) -> Option<Opcode> {
        for &opcode in OPCODES {
            if self.matches(opcode.prefix()) {
                self.index += opcode.prefix().len();
                return Some(opcode);
            }
        }
        None
    }

    /// Whether the stream continues with the given letters.
    fn matches(&self, prefix: &str) -> bool {
        prefix
            .chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.index + i) == Some(&c))
    }

    /// Decode a signed number: a sign character (`S` non-negative,
    /// `T` negative), then magnitude digits most significant first
    /// (`S` zero, `T` one), then the terminating `L`.  An empty
    /// magnitude denotes zero.
    fn parse_number(&mut self) -> Result<i64, SyntaxError> {
        let sign = match self.chars.get(self.index) {
            Some('S') => 1,
            Some('T') => -1,
            Some(_) => {
                return Err(SyntaxError::BadNumberSign {
                    offset: self.index,
                    context: self.context(),
                });
            }
            None => return Err(SyntaxError::UnterminatedNumber { offset: self.index }),
        };
        self.index += 1;
        //
        let mut magnitude: i64 = 0;
        loop {
            match self.chars.get(self.index) {
                Some('L') => break,
                Some('T') => magnitude = (magnitude << 1) | 1,
                Some('S') => magnitude <<= 1,
                Some(_) => unreachable!(),
                None => return Err(SyntaxError::UnterminatedNumber { offset: self.index }),
            }
            self.index += 1;
        }
        // Step past the terminator
        self.index += 1;
        Ok(magnitude.wrapping_mul(sign))
    }

    /// Decode a label: any run of `S`/`T` characters (possibly
    /// empty) up to the terminating `L`.
    fn parse_label(&mut self) -> Result<Label, SyntaxError> {
        let start = self.index;
        while let Some(&c) = self.chars.get(self.index) {
            if c == 'L' {
                let text: String = self.chars[start..self.index].iter().collect();
                self.index += 1;
                // Only S and T can occur here after filtering.
                return Ok(Label::parse(&text).unwrap());
            }
            self.index += 1;
        }
        Err(SyntaxError::UnterminatedLabel { offset: start })
    }

    /// A short letter dump of the stream from the current position,
    /// for diagnostics.
    fn context(&self) -> String {
        self.chars
            .iter()
            .skip(self.index)
            .take(CONTEXT_LEN)
            .collect()
    }
}
