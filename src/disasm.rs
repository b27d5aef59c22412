//! Renders a [`Program`] as human-readable text, one line per instruction.
//!
//! Purely diagnostic, read-only, no control-flow effect — the Rust analogue
//! of original_source's `show.c`, adapted to `std::fmt::Display` impls on
//! the opcode enums rather than a family of `show*` functions writing
//! straight to `stdout`.

use std::fmt::Write as _;

use crate::instruction::{Command, Param};
use crate::program::Program;
use crate::Word;

/// Formats a single instruction as `<category>: <opcode-mnemonic>[: <parameter>]`.
pub fn format_instruction(instruction: &crate::instruction::Instruction) -> String {
    let mut line = String::new();
    let _ = write!(line, "{:<15}: ", instruction.imp);

    let mnemonic = match instruction.command {
        Command::Stack(op) => op.to_string(),
        Command::Operation(op) => op.to_string(),
        Command::Heap(op) => op.to_string(),
        Command::Flow(op) => op.to_string(),
        Command::Io(op) => op.to_string(),
    };
    let _ = write!(line, "{:<20}", mnemonic);

    match &instruction.param {
        Param::Number(n) => {
            let _ = write!(line, ": {}", format_number(*n));
        }
        Param::Label(key) => {
            let _ = write!(line, ": {}", key);
        }
        Param::None => {}
    }

    line
}

fn format_number(n: Word) -> String {
    format!("0x{:08x}( {} )", n, n)
}

/// Renders the whole program, one line per instruction, in textual order.
pub fn disassemble(program: &Program) -> String {
    let mut out = String::new();
    for instruction in program.iter() {
        out.push_str(&format_instruction(instruction));
        out.push('\n');
    }
    out
}
