//! The opcode interpreter.

pub mod interpreter;

pub use interpreter::{Decoded, Interpreter};
