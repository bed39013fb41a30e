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

// Responsible for code generation.
mod codegen;
// Responsible for parsing mnemonic source.
mod parser;

pub use codegen::assemble;
pub use parser::parse;

use std::fmt;

// ===================================================================
// Errors
// ===================================================================

/// Errors which can arise when parsing mnemonic assembly source.
/// Each carries the 1-based line number it was found on.
#[derive(Debug, PartialEq, Eq)]
pub enum AsmError {
    /// An unknown mnemonic was encountered.
    InvalidInstruction(usize, String),
    /// A mnemonic that requires an operand (e.g. `PUSH`) had none.
    ExpectedOperand(usize),
    /// An operand was present but did not parse: a non-decimal
    /// number, or a label containing characters other than `S` and
    /// `T`.
    InvalidOperand(usize, String),
    /// An operand was given to a mnemonic that takes none.
    UnexpectedOperand(usize, String),
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AsmError::InvalidInstruction(line, mnemonic) => {
                write!(f, "line {line}: unknown mnemonic \"{mnemonic}\"")
            }
            AsmError::ExpectedOperand(line) => {
                write!(f, "line {line}: expected an operand")
            }
            AsmError::InvalidOperand(line, text) => {
                write!(f, "line {line}: invalid operand \"{text}\"")
            }
            AsmError::UnexpectedOperand(line, text) => {
                write!(f, "line {line}: unexpected operand \"{text}\"")
            }
        }
    }
}

impl std::error::Error for AsmError {}
