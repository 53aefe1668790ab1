//! Error types for the dviminer DVI decoding library.

use thiserror::Error;

/// Primary error type for DVI decoding operations.
///
/// Every fatal decode condition reports the byte offset at which it was
/// detected, and the triggering opcode where one exists. A fatal error
/// aborts the decode of the current file; there is no partial-success mode.
#[derive(Error, Debug)]
pub enum DviError {
    #[error("read of {wanted} byte(s) at offset {offset} runs past end of buffer ({remaining} left)")]
    OutOfBounds {
        offset: usize,
        wanted: usize,
        remaining: usize,
    },

    #[error("pop (opcode {opcode}) at offset {offset} with no matching push")]
    StackUnderflow { opcode: u8, offset: usize },

    #[error(
        "invalid scale at offset {offset}: numerator {num}, denominator {den} (both must be > 0)"
    )]
    InvalidScale { offset: usize, num: u32, den: u32 },

    #[error("font {id} already defined (redefinition via opcode {opcode} at offset {offset})")]
    DuplicateFontDefinition { id: i32, opcode: u8, offset: usize },

    #[error("font {id} selected before definition (opcode {opcode} at offset {offset})")]
    UndefinedFont { id: i32, opcode: u8, offset: usize },

    #[error("opcode {opcode} at offset {offset} not allowed in {phase} phase")]
    SequenceViolation {
        opcode: u8,
        offset: usize,
        phase: &'static str,
    },

    #[error("undefined opcode {opcode} at offset {offset}")]
    UndefinedOpcode { opcode: u8, offset: usize },

    #[error("stream ends at offset {offset} while still in {phase} phase")]
    UnexpectedEnd { offset: usize, phase: &'static str },

    #[error("malformed metrics file: {0}")]
    BadMetrics(String),

    #[error("metrics file not found for font: {0}")]
    MetricsNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for DviError.
pub type Result<T> = std::result::Result<T, DviError>;
