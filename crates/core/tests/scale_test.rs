//! Tests for document scale conversion.

use dviminer_core::DocumentScale;

/// The conventional scale of a document at true design size: units are
/// scaled points (2^-16 pt) and magnification is 1000.
const TRUE_SIZE: DocumentScale = DocumentScale {
    num: 25_400_000,
    den: 473_628_672,
    mag: 1000,
};

#[test]
fn test_validity() {
    assert!(TRUE_SIZE.is_valid());
    assert!(
        !DocumentScale {
            num: 0,
            ..TRUE_SIZE
        }
        .is_valid()
    );
    assert!(
        !DocumentScale {
            den: 0,
            ..TRUE_SIZE
        }
        .is_valid()
    );
}

#[test]
fn test_unit_factor_matches_formula() {
    let expected = (25_400_000.0 / (1000.0 * 473_628_672.0)) * 0.035_277_778;
    assert!((TRUE_SIZE.unit_factor() - expected).abs() < 1e-15);
    assert!(TRUE_SIZE.unit_factor() > 0.0);
}

#[test]
fn test_magnification_scales_inversely() {
    let doubled = DocumentScale {
        mag: 2000,
        ..TRUE_SIZE
    };
    let ratio = TRUE_SIZE.unit_factor() / doubled.unit_factor();
    assert!((ratio - 2.0).abs() < 1e-12);
}

#[test]
fn test_to_physical_is_linear() {
    let one = TRUE_SIZE.to_physical(1);
    let thousand = TRUE_SIZE.to_physical(1000);
    assert!((thousand - 1000.0 * one).abs() < 1e-9);
    assert_eq!(TRUE_SIZE.to_physical(0), 0.0);
    assert!(TRUE_SIZE.to_physical(-100) < 0.0);
}

#[test]
fn test_pixels_per_unit_at_300dpi() {
    // conv = (num / 254000) * (resolution / den) * (mag / 1000)
    let expected = (25_400_000.0 / 254_000.0) * (300.0 / 473_628_672.0);
    assert!((TRUE_SIZE.pixels_per_unit(300.0) - expected).abs() < 1e-15);
}
