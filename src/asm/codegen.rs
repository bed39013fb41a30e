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
use crate::instruction::{Instruction, Label};
use crate::lexer::{LINEFEED, SPACE, TAB};

/// Generate the Whitespace character stream for an instruction
/// sequence.  Each instruction contributes its prefix followed by
/// its encoded argument, if it takes one.  Tokenizing the result
/// gives back exactly the input sequence.
pub fn assemble(program: &[Instruction]) -> String {
    let mut code = String::new();
    for insn in program {
        encode(insn, &mut code);
    }
    code
}

fn encode(insn: &Instruction, code: &mut String) {
    push_letters(insn.opcode().prefix(), code);
    match insn {
        Instruction::PUSH(n) | Instruction::COPY(n) | Instruction::SLIDE(n) => {
            encode_number(*n, code)
        }
        Instruction::MARK(label)
        | Instruction::CALL(label)
        | Instruction::JUMP(label)
        | Instruction::JUMPZERO(label)
        | Instruction::JUMPNEG(label) => encode_label(label, code),
        _ => {}
    }
}

/// Encode a signed number: sign character (space for non-negative,
/// tab for negative), magnitude bits most significant first with no
/// leading zeros, then the terminating line feed.  Zero gets an
/// empty magnitude.
fn encode_number(n: i64, code: &mut String) {
    code.push(if n < 0 { TAB } else { SPACE });
    let magnitude = n.unsigned_abs();
    if magnitude != 0 {
        let bits = 64 - magnitude.leading_zeros();
        for i in (0..bits).rev() {
            code.push(if (magnitude >> i) & 1 == 1 { TAB } else { SPACE });
        }
    }
    code.push(LINEFEED);
}

/// Encode a label: its letters followed by the terminating line feed.
fn encode_label(label: &Label, code: &mut String) {
    push_letters(label.as_str(), code);
    code.push(LINEFEED);
}

fn push_letters(letters: &str, code: &mut String) {
    for c in letters.chars() {
        code.push(match c {
            'S' => SPACE,
            'T' => TAB,
            'L' => LINEFEED,
            // Prefixes and labels only ever contain these letters.
            _ => unreachable!(),
        });
    }
}
