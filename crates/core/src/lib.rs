//! dviminer - a DVI (device independent) stream inspection library.
//!
//! Decodes the opcode stream a TeX-style compositor writes into a
//! replayable log of structured typesetting commands: page boundaries,
//! cursor motion, character placement, rule drawing, font definition and
//! selection, and embedded specials. No rendering and no output
//! generation; consumers are tooling that inspects or debugs DVI files.

pub mod error;
pub mod font;
pub mod interp;
pub mod model;
pub mod parser;

pub use error::{DviError, Result};
pub use font::metrics::{FilesystemResolver, FontMetricsProvider};
pub use font::tfm::TfmFile;
pub use interp::interpreter::{Decoded, Interpreter};
pub use model::command::{Command, Warning};
pub use model::fonts::{FontDefinition, FontTable};
pub use model::registers::{DviStack, RegisterState};
pub use model::scale::DocumentScale;
pub use parser::cursor::Cursor;
