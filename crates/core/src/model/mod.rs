//! Decoder state and output types.

pub mod command;
pub mod fonts;
pub mod registers;
pub mod scale;

pub use command::{Command, Warning};
pub use fonts::{FontDefinition, FontTable};
pub use registers::{DviStack, RegisterState};
pub use scale::DocumentScale;
