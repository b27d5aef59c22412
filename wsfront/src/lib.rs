//! Normalizes, tokenizes and links whitespace-alphabet source into a
//! [`wsvm::Program`] ready for disassembly or execution.

pub mod error;
pub mod linker;
pub mod normalizer;
pub mod tokenizer;

pub use error::Error;
pub use normalizer::Normalizer;

use wsvm::Program;

/// Normalizes `source`, tokenizes it and links the result, in one call.
/// The common entry point `wsi` and tests use; the three stages remain
/// independently callable for anyone who wants to inspect intermediate
/// state (e.g. the raw instruction list before linking).
pub fn build_program(source: &[u8]) -> Result<Program, Error> {
    let mut normalizer = Normalizer::new();
    normalizer.append(source);
    let buffer = normalizer.finalize();

    let mut instructions = tokenizer::tokenize(&buffer)?;
    let labels = linker::link(&mut instructions)?;
    Ok(Program::new(instructions, labels))
}
