//! TFM (TeX font metric) file reader.
//!
//! A TFM file is twelve 16-bit section lengths, a header, one bit-packed
//! char-info record per character, and the width/height/depth/italic
//! lookup tables those records index into. Dimensions are fix_word values:
//! signed 32-bit fixed point with 20 fraction bits, in multiples of the
//! font's design size.

use crate::error::{DviError, Result};
use crate::parser::cursor::Cursor;

/// Convert a raw fix_word to a float (design-size multiples).
fn fix_word(raw: i32) -> f64 {
    raw as f64 / f64::from(1 << 20)
}

/// Decode a BCPL string: one length byte followed by that many characters.
fn bcpl_string(bytes: &[u8]) -> String {
    let len = usize::from(bytes[0]).min(bytes.len() - 1);
    String::from_utf8_lossy(&bytes[1..1 + len]).into_owned()
}

/// One bit-packed char-info record.
///
/// The subfields are indices into the secondary dimension tables, not
/// dimensions themselves. Layout per 32-bit word: width index (8 bits),
/// height index (4), depth index (4), italic index (6), tag (2),
/// remainder (8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharInfo {
    pub width_index: u8,
    pub height_index: u8,
    pub depth_index: u8,
    pub italic_index: u8,
    /// 0 = plain, 1 = lig/kern program, 2 = char list, 3 = extensible.
    pub tag: u8,
    pub remainder: u8,
}

impl CharInfo {
    /// Unpack one record from its four bytes.
    pub fn unpack(word: [u8; 4]) -> Self {
        Self {
            width_index: word[0],
            height_index: word[1] >> 4,
            depth_index: word[1] & 0x0f,
            italic_index: word[2] >> 2,
            tag: word[2] & 0x03,
            remainder: word[3],
        }
    }

    /// True when the character exists in the font. Index 0 of the width
    /// table is reserved to mean "no such character".
    pub fn exists(&self) -> bool {
        self.width_index != 0
    }
}

/// A parsed TFM file: header identification plus per-character dimensions.
#[derive(Debug)]
pub struct TfmFile {
    /// Checksum, matched against the one in a DVI font definition.
    pub checksum: u32,
    /// Design size in points.
    pub design_size: f64,
    /// Coding scheme identification, e.g. "TeX text".
    pub coding_scheme: String,
    /// Font family, e.g. "CMR".
    pub family: String,
    first_char: u16,
    char_info: Vec<CharInfo>,
    widths: Vec<f64>,
    heights: Vec<f64>,
    depths: Vec<f64>,
    italics: Vec<f64>,
}

impl TfmFile {
    /// Parse a complete TFM file from memory.
    pub fn parse(data: &[u8]) -> Result<TfmFile> {
        let mut cursor = Cursor::new(data);

        let lf = cursor.read_u16()? as usize;
        let lh = cursor.read_u16()? as usize;
        let bc = cursor.read_u16()?;
        let ec = cursor.read_u16()?;
        let nw = cursor.read_u16()? as usize;
        let nh = cursor.read_u16()? as usize;
        let nd = cursor.read_u16()? as usize;
        let ni = cursor.read_u16()? as usize;
        let nl = cursor.read_u16()? as usize;
        let nk = cursor.read_u16()? as usize;
        let ne = cursor.read_u16()? as usize;
        let np = cursor.read_u16()? as usize;

        if ec > 255 || bc > ec + 1 {
            return Err(DviError::BadMetrics(format!(
                "bad character range {bc}..{ec}"
            )));
        }
        let chars = (ec + 1 - bc) as usize;
        let words = 6 + lh + chars + nw + nh + nd + ni + nl + nk + ne + np;
        if words != lf || lf * 4 != data.len() {
            return Err(DviError::BadMetrics(format!(
                "section lengths sum to {words} words, file declares {lf} for {} bytes",
                data.len()
            )));
        }
        if lh < 2 {
            return Err(DviError::BadMetrics(format!("header of {lh} words")));
        }

        let checksum = cursor.read_u32()?;
        let design_size = fix_word(cursor.read_i32()?);
        let mut remaining_header = lh - 2;
        let mut coding_scheme = String::new();
        let mut family = String::new();
        if remaining_header >= 10 {
            coding_scheme = bcpl_string(cursor.read_bytes(40)?);
            remaining_header -= 10;
        }
        if remaining_header >= 5 {
            family = bcpl_string(cursor.read_bytes(20)?);
            remaining_header -= 5;
        }
        cursor.read_bytes(remaining_header * 4)?;

        let mut char_info = Vec::with_capacity(chars);
        for _ in 0..chars {
            let bytes = cursor.read_bytes(4)?;
            char_info.push(CharInfo::unpack([bytes[0], bytes[1], bytes[2], bytes[3]]));
        }

        let mut read_table = |n: usize| -> Result<Vec<f64>> {
            let mut table = Vec::with_capacity(n);
            for _ in 0..n {
                table.push(fix_word(cursor.read_i32()?));
            }
            Ok(table)
        };
        let widths = read_table(nw)?;
        let heights = read_table(nh)?;
        let depths = read_table(nd)?;
        let italics = read_table(ni)?;

        Ok(TfmFile {
            checksum,
            design_size,
            coding_scheme,
            family,
            first_char: bc,
            char_info,
            widths,
            heights,
            depths,
            italics,
        })
    }

    /// The char-info record for `code`, if the font covers it.
    pub fn char_info(&self, code: u16) -> Option<&CharInfo> {
        let index = code.checked_sub(self.first_char)? as usize;
        self.char_info.get(index).filter(|info| info.exists())
    }

    /// Character width in design-size multiples.
    pub fn width(&self, code: u16) -> Option<f64> {
        let info = self.char_info(code)?;
        self.widths.get(info.width_index as usize).copied()
    }

    /// Character height in design-size multiples.
    pub fn height(&self, code: u16) -> Option<f64> {
        let info = self.char_info(code)?;
        self.heights.get(info.height_index as usize).copied()
    }

    /// Character depth in design-size multiples.
    pub fn depth(&self, code: u16) -> Option<f64> {
        let info = self.char_info(code)?;
        self.depths.get(info.depth_index as usize).copied()
    }

    /// Italic correction in design-size multiples.
    pub fn italic(&self, code: u16) -> Option<f64> {
        let info = self.char_info(code)?;
        self.italics.get(info.italic_index as usize).copied()
    }
}
