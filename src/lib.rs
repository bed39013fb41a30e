/// The mnemonic assembly language: parsing one-instruction-per-line
/// source and generating conforming Whitespace programs from it.
pub mod asm;
/// The virtual machine: label resolution, the fetch/execute cycle,
/// the runtime fault taxonomy and line-buffered input.
pub mod executor;
/// The instruction set itself: opcodes, their prefixes and
/// mnemonics, labels, and the decoded instruction type.
pub mod instruction;
/// Filtering raw source down to its significant characters, plus the
/// readable letter form used by diagnostics.
pub mod lexer;
/// The tokenizer for the three-character prefix code, including
/// number and label decoding.
pub mod parser;
/// The embedded self-test program.
pub mod selftest;
/// The mutable machine state: operand stack and heap.
pub mod state;
