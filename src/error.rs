//! Runtime error taxonomy for the executor.
//!
//! Hand-rolled `Display`/`std::error::Error` impls, no `thiserror` or other
//! error-derive crate.

use std::fmt;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Pop or peek on an empty stack; `NCopy`/`NSlide` with out-of-range `n`.
    StackUnderflow,
    /// Read from a heap address never written.
    UnassignedHeap { address: i64 },
    /// `÷` or `mod` with a right operand of zero.
    DivisionByZero,
    /// Jump or call to a label with no definition.
    UnresolvedLabel,
    /// Allocation failure (surfaced for parity with the original's explicit
    /// out-of-memory checks; not expected to occur under a `Vec`-backed
    /// implementation, but kept as a real variant rather than an `unwrap`).
    OutOfMemory,
    /// An instruction carries a command/param combination the executor does
    /// not know how to run. Unreachable for any program produced by
    /// `wsfront`, but kept as a real variant rather than a panic so a
    /// malformed hand-built `Program` fails loudly instead of silently.
    IllegalOpcode,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::StackUnderflow => write!(f, "do not have value in stack"),
            Error::UnassignedHeap { address } => {
                write!(f, "do not have allocation in heap at address {}", address)
            }
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::UnresolvedLabel => write!(f, "do not have instruction at label"),
            Error::OutOfMemory => write!(f, "out of memory error"),
            Error::IllegalOpcode => write!(f, "execute: illegal opcode"),
        }
    }
}

impl std::error::Error for Error {}
