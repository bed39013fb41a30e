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

// ===================================================================
// Label
// ===================================================================

/// A label names a location within a Whitespace program.  On the wire
/// a label is an arbitrary (possibly empty) sequence of space and tab
/// characters terminated by a line feed.  Internally it is kept in a
/// readable form as a string over the letters `S` (space) and `T`
/// (tab), and two labels are equal exactly when their letter
/// sequences are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Construct a label from its letter form.  This returns `None`
    /// if any character other than `S` or `T` is present.
    pub fn parse(text: &str) -> Option<Label> {
        if text.chars().all(|c| c == 'S' || c == 'T') {
            Some(Label(text.to_string()))
        } else {
            None
        }
    }

    /// The empty label.  This is a perfectly valid label in its own
    /// right.
    pub fn empty() -> Label {
        Label(String::new())
    }

    /// View this label as its letter form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===================================================================
// Opcode
// ===================================================================

/// The kind of argument (if any) which follows an instruction prefix
/// in the character stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgKind {
    /// No argument at all.
    None,
    /// A signed number in binary notation.
    Number,
    /// A label terminated by a line feed.
    Label,
}

/// An operation identifier.  This separates the fixed aspects of an
/// instruction (its prefix, its mnemonic, what kind of argument it
/// takes) from any argument it carries, which is useful for both
/// directions of translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    PUSH,
    DUPLICATE,
    COPY,
    SWAP,
    DISCARD,
    SLIDE,
    ADD,
    SUB,
    MULT,
    DIV,
    MOD,
    STORE,
    RETRIEVE,
    MARK,
    CALL,
    JUMP,
    JUMPZERO,
    JUMPNEG,
    RETURN,
    ENDPROGRAM,
    OUTCH,
    OUTNUM,
    INCH,
    INNUM,
}

/// Every opcode in the order the tokenizer tries them.  Since the
/// prefixes form a prefix code, at most one entry can match at any
/// position in the stream.
pub const OPCODES: &[Opcode] = &[
    Opcode::PUSH,
    Opcode::DUPLICATE,
    Opcode::COPY,
    Opcode::SWAP,
    Opcode::DISCARD,
    Opcode::SLIDE,
    Opcode::ADD,
    Opcode::SUB,
    Opcode::MULT,
    Opcode::DIV,
    Opcode::MOD,
    Opcode::STORE,
    Opcode::RETRIEVE,
    Opcode::MARK,
    Opcode::CALL,
    Opcode::JUMP,
    Opcode::JUMPZERO,
    Opcode::JUMPNEG,
    Opcode::RETURN,
    Opcode::ENDPROGRAM,
    Opcode::OUTCH,
    Opcode::OUTNUM,
    Opcode::INCH,
    Opcode::INNUM,
];

impl Opcode {
    /// The prefix identifying this operation, written in letter form
    /// (`S` = space, `T` = tab, `L` = line feed).
    pub fn prefix(self) -> &'static str {
        match self {
            Opcode::PUSH => "SS",
            Opcode::DUPLICATE => "SLS",
            Opcode::COPY => "STS",
            Opcode::SWAP => "SLT",
            Opcode::DISCARD => "SLL",
            Opcode::SLIDE => "STL",
            Opcode::ADD => "TSSS",
            Opcode::SUB => "TSST",
            Opcode::MULT => "TSSL",
            Opcode::DIV => "TSTS",
            Opcode::MOD => "TSTT",
            Opcode::STORE => "TTS",
            Opcode::RETRIEVE => "TTT",
            Opcode::MARK => "LSS",
            Opcode::CALL => "LST",
            Opcode::JUMP => "LSL",
            Opcode::JUMPZERO => "LTS",
            Opcode::JUMPNEG => "LTT",
            Opcode::RETURN => "LTL",
            Opcode::ENDPROGRAM => "LLL",
            Opcode::OUTCH => "TLSS",
            Opcode::OUTNUM => "TLST",
            Opcode::INCH => "TLTS",
            Opcode::INNUM => "TLTT",
        }
    }

    /// The textual mnemonic for this operation, as used in assembly
    /// source and program listings.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::PUSH => "PUSH",
            Opcode::DUPLICATE => "DUPLICATE",
            Opcode::COPY => "COPY",
            Opcode::SWAP => "SWAP",
            Opcode::DISCARD => "DISCARD",
            Opcode::SLIDE => "SLIDE",
            Opcode::ADD => "ADD",
            Opcode::SUB => "SUB",
            Opcode::MULT => "MULT",
            Opcode::DIV => "DIV",
            Opcode::MOD => "MOD",
            Opcode::STORE => "STORE",
            Opcode::RETRIEVE => "RETRIEVE",
            Opcode::MARK => "MARK",
            Opcode::CALL => "CALL",
            Opcode::JUMP => "JUMP",
            Opcode::JUMPZERO => "JUMPZERO",
            Opcode::JUMPNEG => "JUMPNEG",
            Opcode::RETURN => "RETURN",
            Opcode::ENDPROGRAM => "ENDPROGRAM",
            Opcode::OUTCH => "OUTCH",
            Opcode::OUTNUM => "OUTNUM",
            Opcode::INCH => "INCH",
            Opcode::INNUM => "INNUM",
        }
    }

    /// Look up an opcode from its mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        OPCODES.iter().copied().find(|op| op.mnemonic() == mnemonic)
    }

    /// What kind of argument follows this operation's prefix.
    pub fn arg_kind(self) -> ArgKind {
        match self {
            Opcode::PUSH | Opcode::COPY | Opcode::SLIDE => ArgKind::Number,
            Opcode::MARK | Opcode::CALL | Opcode::JUMP | Opcode::JUMPZERO | Opcode::JUMPNEG => {
                ArgKind::Label
            }
            _ => ArgKind::None,
        }
    }
}

// ===================================================================
// Instruction
// ===================================================================

/// A single decoded Whitespace instruction.  Instructions carry
/// either no payload, a signed number, or a label.  The token index
/// of an instruction within its program acts as the instruction
/// address for control flow.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// Push a number onto the operand stack.
    PUSH(i64),
    /// Push a copy of the top of the operand stack.
    DUPLICATE,
    /// Push a copy of the item `n` positions below the top (`0` being
    /// the top itself).
    COPY(i64),
    /// Exchange the top two items of the operand stack.
    SWAP,
    /// Pop the top item and throw it away.
    DISCARD,
    /// Pop the top item, discard the next `n` items, then push the
    /// saved top back.
    SLIDE(i64),
    /// Pop `b` then `a`; push `a + b`.
    ADD,
    /// Pop `b` then `a`; push `a - b`.
    SUB,
    /// Pop `b` then `a`; push `a * b`.
    MULT,
    /// Pop `b` then `a`; push the quotient of `a / b` rounded towards
    /// negative infinity.
    DIV,
    /// Pop `b` then `a`; push `a mod b` where the remainder takes the
    /// sign of the divisor.
    MOD,
    /// Pop a value then an address; write the value to that heap
    /// address.
    STORE,
    /// Pop an address; push the value at that heap address.
    RETRIEVE,
    /// Bind a label to this instruction's address.  Executing a mark
    /// has no effect.
    MARK(Label),
    /// Push the next instruction's address on the return stack and
    /// jump to the label.
    CALL(Label),
    /// Jump unconditionally to the label.
    JUMP(Label),
    /// Pop the top item; jump to the label if it is zero.
    JUMPZERO(Label),
    /// Pop the top item; jump to the label if it is negative.
    JUMPNEG(Label),
    /// Pop the return stack and jump to the popped address.
    RETURN,
    /// Halt successfully, whatever the remaining machine state.
    ENDPROGRAM,
    /// Pop a number and write the character with that code point.
    OUTCH,
    /// Pop a number and write its decimal representation.
    OUTNUM,
    /// Pop an address, read one character, store its code point at
    /// that heap address.
    INCH,
    /// Pop an address, read one number, store it at that heap
    /// address.
    INNUM,
}

impl Instruction {
    /// The opcode of this instruction.
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::PUSH(_) => Opcode::PUSH,
            Instruction::DUPLICATE => Opcode::DUPLICATE,
            Instruction::COPY(_) => Opcode::COPY,
            Instruction::SWAP => Opcode::SWAP,
            Instruction::DISCARD => Opcode::DISCARD,
            Instruction::SLIDE(_) => Opcode::SLIDE,
            Instruction::ADD => Opcode::ADD,
            Instruction::SUB => Opcode::SUB,
            Instruction::MULT => Opcode::MULT,
            Instruction::DIV => Opcode::DIV,
            Instruction::MOD => Opcode::MOD,
            Instruction::STORE => Opcode::STORE,
            Instruction::RETRIEVE => Opcode::RETRIEVE,
            Instruction::MARK(_) => Opcode::MARK,
            Instruction::CALL(_) => Opcode::CALL,
            Instruction::JUMP(_) => Opcode::JUMP,
            Instruction::JUMPZERO(_) => Opcode::JUMPZERO,
            Instruction::JUMPNEG(_) => Opcode::JUMPNEG,
            Instruction::RETURN => Opcode::RETURN,
            Instruction::ENDPROGRAM => Opcode::ENDPROGRAM,
            Instruction::OUTCH => Opcode::OUTCH,
            Instruction::OUTNUM => Opcode::OUTNUM,
            Instruction::INCH => Opcode::INCH,
            Instruction::INNUM => Opcode::INNUM,
        }
    }

    /// Get the branch target label associated with this instruction
    /// (if there is one).  Marks are included since they name their
    /// own location.
    pub fn target(&self) -> Option<&Label> {
        match self {
            Instruction::MARK(lab)
            | Instruction::CALL(lab)
            | Instruction::JUMP(lab)
            | Instruction::JUMPZERO(lab)
            | Instruction::JUMPNEG(lab) => Some(lab),
            _ => None,
        }
    }

    /// Construct the argument-free instruction for a given opcode.
    pub(crate) fn nullary(opcode: Opcode) -> Instruction {
        match opcode {
            Opcode::DUPLICATE => Instruction::DUPLICATE,
            Opcode::SWAP => Instruction::SWAP,
            Opcode::DISCARD => Instruction::DISCARD,
            Opcode::ADD => Instruction::ADD,
            Opcode::SUB => Instruction::SUB,
            Opcode::MULT => Instruction::MULT,
            Opcode::DIV => Instruction::DIV,
            Opcode::MOD => Instruction::MOD,
            Opcode::STORE => Instruction::STORE,
            Opcode::RETRIEVE => Instruction::RETRIEVE,
            Opcode::RETURN => Instruction::RETURN,
            Opcode::ENDPROGRAM => Instruction::ENDPROGRAM,
            Opcode::OUTCH => Instruction::OUTCH,
            Opcode::OUTNUM => Instruction::OUTNUM,
            Opcode::INCH => Instruction::INCH,
            Opcode::INNUM => Instruction::INNUM,
            // Callers check the argument kind first.
            _ => unreachable!(),
        }
    }

    /// Construct the instruction for an opcode taking a numeric
    /// argument.
    pub(crate) fn with_number(opcode: Opcode, n: i64) -> Instruction {
        match opcode {
            Opcode::PUSH => Instruction::PUSH(n),
            Opcode::COPY => Instruction::COPY(n),
            Opcode::SLIDE => Instruction::SLIDE(n),
            _ => unreachable!(),
        }
    }

    /// Construct the instruction for an opcode taking a label
    /// argument.
    pub(crate) fn with_label(opcode: Opcode, label: Label) -> Instruction {
        match opcode {
            Opcode::MARK => Instruction::MARK(label),
            Opcode::CALL => Instruction::CALL(label),
            Opcode::JUMP => Instruction::JUMP(label),
            Opcode::JUMPZERO => Instruction::JUMPZERO(label),
            Opcode::JUMPNEG => Instruction::JUMPNEG(label),
            _ => unreachable!(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instruction::PUSH(n) | Instruction::COPY(n) | Instruction::SLIDE(n) => {
                write!(f, "{} {}", self.opcode().mnemonic(), n)
            }
            Instruction::MARK(lab)
            | Instruction::CALL(lab)
            | Instruction::JUMP(lab)
            | Instruction::JUMPZERO(lab)
            | Instruction::JUMPNEG(lab) => {
                if lab.as_str().is_empty() {
                    write!(f, "{}", self.opcode().mnemonic())
                } else {
                    write!(f, "{} {}", self.opcode().mnemonic(), lab)
                }
            }
            _ => write!(f, "{}", self.opcode().mnemonic()),
        }
    }
}
