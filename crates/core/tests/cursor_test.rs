//! Tests for bounded big-endian cursor reads.

use dviminer_core::error::DviError;
use dviminer_core::parser::Cursor;

#[test]
fn test_unsigned_reads_advance() {
    let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a];
    let mut cursor = Cursor::new(&data);

    assert_eq!(cursor.read_uint(1).unwrap(), 0x01);
    assert_eq!(cursor.read_uint(2).unwrap(), 0x0203);
    assert_eq!(cursor.read_uint(3).unwrap(), 0x040506);
    assert_eq!(cursor.read_uint(4).unwrap(), 0x0708090a);
    assert_eq!(cursor.tell(), 10);
    assert!(cursor.at_end());
}

#[test]
fn test_signed_reads_sign_extend() {
    // The high bit of each value is set, so every width must sign-extend.
    let data = [0xff, 0xff, 0x9c, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xff, 0x9c];
    let mut cursor = Cursor::new(&data);

    assert_eq!(cursor.read_int(1).unwrap(), -1);
    assert_eq!(cursor.read_int(2).unwrap(), -100);
    assert_eq!(cursor.read_int(3).unwrap(), -2);
    assert_eq!(cursor.read_int(4).unwrap(), -100);
}

#[test]
fn test_positive_signed_reads() {
    let data = [0x64, 0x00, 0x64, 0x00, 0x00, 0x00, 0x64];
    let mut cursor = Cursor::new(&data);

    assert_eq!(cursor.read_int(1).unwrap(), 100);
    assert_eq!(cursor.read_int(2).unwrap(), 100);
    assert_eq!(cursor.read_int(4).unwrap(), 100);
}

#[test]
fn test_read_bytes_and_remaining() {
    let data = b"dvi stream";
    let mut cursor = Cursor::new(data);

    assert_eq!(cursor.remaining(), 10);
    assert_eq!(cursor.read_bytes(3).unwrap(), b"dvi");
    assert_eq!(cursor.remaining(), 7);
    assert_eq!(cursor.read_bytes(7).unwrap(), b" stream");
    assert_eq!(cursor.remaining(), 0);
}

#[test]
fn test_out_of_bounds_reports_exact_position() {
    let data = [0x00, 0x01, 0x02];
    let mut cursor = Cursor::new(&data);
    cursor.read_bytes(2).unwrap();

    // 4-byte read at offset 2 with 1 byte left must fail without advancing.
    let err = cursor.read_uint(4).unwrap_err();
    match err {
        DviError::OutOfBounds {
            offset,
            wanted,
            remaining,
        } => {
            assert_eq!(offset, 2);
            assert_eq!(wanted, 4);
            assert_eq!(remaining, 1);
        }
        other => panic!("expected OutOfBounds, got {other:?}"),
    }
    assert_eq!(cursor.tell(), 2, "failed read must not advance the cursor");
}

#[test]
fn test_read_on_empty_buffer() {
    let mut cursor = Cursor::new(&[]);
    assert!(cursor.at_end());
    assert!(matches!(
        cursor.read_u8(),
        Err(DviError::OutOfBounds {
            offset: 0,
            wanted: 1,
            remaining: 0
        })
    ));
}

#[test]
fn test_skip_to_end_counts_fill() {
    let data = [223u8; 7];
    let mut cursor = Cursor::new(&data);
    cursor.read_bytes(3).unwrap();
    assert_eq!(cursor.skip_to_end(), 4);
    assert!(cursor.at_end());
    assert_eq!(cursor.skip_to_end(), 0);
}
