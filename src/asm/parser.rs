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
use super::AsmError;
use crate::instruction::{ArgKind, Instruction, Label, Opcode};

/// Parse mnemonic assembly source into an instruction sequence.  The
/// source carries one instruction per line as `MNEMONIC [ARG]`;
/// blank and whitespace-only lines are skipped.  Numeric operands are
/// signed decimal, label operands are literal `S`/`T` sequences (an
/// absent label operand denotes the empty label).
pub fn parse(source: &str) -> Result<Vec<Instruction>, AsmError> {
    let mut program = Vec::new();
    //
    for (index, line) in source.lines().enumerate() {
        let number = index + 1;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        program.push(parse_line(number, text)?);
    }
    //
    Ok(program)
}

/// Parse a single nonempty line.
fn parse_line(number: usize, text: &str) -> Result<Instruction, AsmError> {
    // Split the mnemonic from whatever operand follows it.
    let (mnemonic, operand) = match text.split_once(char::is_whitespace) {
        Some((mnemonic, rest)) => (mnemonic, rest.trim()),
        None => (text, ""),
    };
    let opcode = Opcode::from_mnemonic(mnemonic)
        .ok_or_else(|| AsmError::InvalidInstruction(number, mnemonic.to_string()))?;
    //
    match opcode.arg_kind() {
        ArgKind::None => {
            if !operand.is_empty() {
                return Err(AsmError::UnexpectedOperand(number, operand.to_string()));
            }
            Ok(Instruction::nullary(opcode))
        }
        ArgKind::Number => {
            if operand.is_empty() {
                return Err(AsmError::ExpectedOperand(number));
            }
            let n = operand
                .parse()
                .map_err(|_| AsmError::InvalidOperand(number, operand.to_string()))?;
            Ok(Instruction::with_number(opcode, n))
        }
        ArgKind::Label => {
            let label = Label::parse(operand)
                .ok_or_else(|| AsmError::InvalidOperand(number, operand.to_string()))?;
            Ok(Instruction::with_label(opcode, label))
        }
    }
}
