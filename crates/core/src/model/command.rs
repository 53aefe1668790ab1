//! Decoded command and warning types.

use super::fonts::FontDefinition;
use super::scale::DocumentScale;

/// One decoded DVI command, in stream order.
///
/// The command log is the decoder's only output: immutable once produced,
/// replayable by whatever inspection layer sits above the core. Motion
/// variants carry the delta actually applied, so a width-0 spacing opcode
/// that reuses a stored amount logs that amount.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Typeset character `code` and advance `h` by its width. Covers both
    /// the inline opcodes 0..=127 and the explicit-operand forms.
    SetChar { code: u32 },
    /// Typeset character `code` without moving.
    PutChar { code: u32 },
    /// Rule of `height` x `width` with bottom-left corner at (h, v),
    /// advancing `h` by `width`.
    SetRule { height: i32, width: i32 },
    /// Rule that leaves `h` unchanged.
    PutRule { height: i32, width: i32 },
    /// No operation.
    Nop,
    /// Begin page, carrying the ten page-identifying count values.
    Bop { counters: [i32; 10] },
    /// End page.
    Eop,
    /// Save the register file on the stack.
    Push,
    /// Restore the register file from the stack.
    Pop,
    /// Move right by an explicit signed distance.
    Right { delta: i32 },
    /// Move right by spacing register w.
    MoveW { delta: i32 },
    /// Move right by spacing register x.
    MoveX { delta: i32 },
    /// Move down by an explicit signed distance.
    Down { delta: i32 },
    /// Move down by spacing register y.
    MoveY { delta: i32 },
    /// Move down by spacing register z.
    MoveZ { delta: i32 },
    /// Select a previously defined font.
    SelectFont { id: i32 },
    /// Define a font.
    DefineFont(FontDefinition),
    /// Opaque vendor payload, passed through uninterpreted.
    Special { data: Vec<u8> },
    /// Document preamble. Must be the first command in the stream.
    Preamble {
        format: u8,
        scale: DocumentScale,
        comment: String,
    },
    /// Document postamble with the page statistics summary.
    Postamble {
        /// Byte offset of the final begin-page command.
        last_page: i32,
        scale: DocumentScale,
        /// Height plus depth of the tallest page.
        tallest: i32,
        /// Width of the widest page.
        widest: i32,
        /// Maximum push depth reached anywhere in the document.
        max_depth: u16,
        /// Total page count.
        pages: u16,
    },
    /// Post-postamble; everything after it is fill bytes.
    PostPostamble {
        /// Byte offset of the postamble command.
        postamble: i32,
        format: u8,
    },
}

/// Non-fatal conditions collected during a decode.
///
/// Warnings never abort the decode; they are surfaced alongside the
/// complete command log.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The stack was not empty at an end-page.
    UnbalancedStack {
        /// 1-based page number.
        page: usize,
        depth: usize,
        offset: usize,
    },
    /// The postamble's scale fields disagree with the preamble's.
    ScaleMismatch {
        preamble: DocumentScale,
        postamble: DocumentScale,
        offset: usize,
    },
    /// A defined font's metrics resource could not be resolved.
    MetricsNotFound { id: i32, font: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnbalancedStack {
                page,
                depth,
                offset,
            } => write!(
                f,
                "stack not empty at end of page {page} ({depth} frame(s) left, offset {offset})"
            ),
            Warning::ScaleMismatch {
                preamble,
                postamble,
                offset,
            } => write!(
                f,
                "postamble scale {}/{}/{} disagrees with preamble {}/{}/{} (offset {offset})",
                postamble.num,
                postamble.den,
                postamble.mag,
                preamble.num,
                preamble.den,
                preamble.mag
            ),
            Warning::MetricsNotFound { id, font } => {
                write!(f, "no metrics file found for font {id} ({font})")
            }
        }
    }
}
