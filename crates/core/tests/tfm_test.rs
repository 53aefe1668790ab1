//! Tests for the TFM metrics file reader.

use dviminer_core::error::DviError;
use dviminer_core::font::tfm::{CharInfo, TfmFile};

/// Build a minimal TFM file covering characters 'a' and 'b'.
///
/// Header carries only checksum and design size (lh = 2). Section sizes:
/// nw = 3, nh = 2, nd = 1, ni = 1, everything else empty, so
/// lf = 6 + 2 + 2 + 3 + 2 + 1 + 1 = 17 words.
fn minimal_tfm() -> Vec<u8> {
    let mut data = Vec::new();
    for halfword in [17u16, 2, 97, 98, 3, 2, 1, 1, 0, 0, 0, 0] {
        data.extend_from_slice(&halfword.to_be_bytes());
    }
    data.extend_from_slice(&0x1234_5678u32.to_be_bytes()); // checksum
    data.extend_from_slice(&(10i32 << 20).to_be_bytes()); // design size 10pt

    // char_info: 'a' -> width 1, height 1; 'b' -> width 2
    data.extend_from_slice(&[1, 0x10, 0, 0]);
    data.extend_from_slice(&[2, 0x00, 0, 0]);

    // widths [0.0, 0.5, 0.25], heights [0.0, 0.75], depths [0.0], italics [0.0]
    for fix in [0i32, 1 << 19, 1 << 18, 0, 3 << 18, 0, 0] {
        data.extend_from_slice(&fix.to_be_bytes());
    }
    data
}

#[test]
fn test_char_info_bit_unpacking() {
    let info = CharInfo::unpack([0xab, 0xcd, 0xef, 0x12]);
    assert_eq!(info.width_index, 0xab);
    assert_eq!(info.height_index, 0x0c);
    assert_eq!(info.depth_index, 0x0d);
    assert_eq!(info.italic_index, 0x3b);
    assert_eq!(info.tag, 3);
    assert_eq!(info.remainder, 0x12);
}

#[test]
fn test_header_fields() {
    let tfm = TfmFile::parse(&minimal_tfm()).expect("minimal TFM must parse");
    assert_eq!(tfm.checksum, 0x1234_5678);
    assert!((tfm.design_size - 10.0).abs() < 1e-9);
    assert!(tfm.coding_scheme.is_empty(), "short header has no scheme");
    assert!(tfm.family.is_empty());
}

#[test]
fn test_dimension_lookup() {
    let tfm = TfmFile::parse(&minimal_tfm()).expect("minimal TFM must parse");

    assert_eq!(tfm.width(b'a' as u16), Some(0.5));
    assert_eq!(tfm.width(b'b' as u16), Some(0.25));
    assert_eq!(tfm.height(b'a' as u16), Some(0.75));
    assert_eq!(tfm.height(b'b' as u16), Some(0.0));
    assert_eq!(tfm.depth(b'a' as u16), Some(0.0));
}

#[test]
fn test_characters_outside_range() {
    let tfm = TfmFile::parse(&minimal_tfm()).expect("minimal TFM must parse");
    assert!(tfm.char_info(96).is_none(), "below first char");
    assert!(tfm.char_info(99).is_none(), "above last char");
    assert!(tfm.width(0).is_none());
}

#[test]
fn test_length_mismatch_is_rejected() {
    let mut data = minimal_tfm();
    data.extend_from_slice(&[0, 0, 0, 0]); // trailing garbage word
    assert!(matches!(
        TfmFile::parse(&data),
        Err(DviError::BadMetrics(_))
    ));
}

#[test]
fn test_bad_character_range_is_rejected() {
    let mut data = minimal_tfm();
    // bc = 200, ec = 98: bc > ec + 1
    data[4..6].copy_from_slice(&200u16.to_be_bytes());
    assert!(matches!(
        TfmFile::parse(&data),
        Err(DviError::BadMetrics(_))
    ));
}

#[test]
fn test_truncated_file_is_out_of_bounds() {
    let data = minimal_tfm();
    // Keep the section table intact but drop the final table word.
    let truncated = &data[..data.len() - 4];
    assert!(matches!(
        TfmFile::parse(truncated),
        Err(DviError::BadMetrics(_) | DviError::OutOfBounds { .. })
    ));
}
