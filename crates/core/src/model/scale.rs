//! Document-wide scale factors established by the preamble.

/// The three scale factors a DVI preamble carries, fixed for the whole
/// document: 7227 DVI-standard units equal 254 centimeters at 1000
/// magnification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentScale {
    /// Numerator of the unit fraction.
    pub num: u32,
    /// Denominator of the unit fraction.
    pub den: u32,
    /// Magnification, in thousandths (1000 = no magnification).
    pub mag: u32,
}

/// Points per centimeter.
const CM_TO_PT: f64 = 0.035_277_778;

impl DocumentScale {
    /// True when both numerator and denominator are positive. A preamble
    /// violating this is malformed.
    pub fn is_valid(&self) -> bool {
        self.num > 0 && self.den > 0
    }

    /// Conversion factor from raw DVI units to printer's points.
    ///
    /// The decoder itself works in raw integer units; this factor is for
    /// consumers that want physical measurements.
    pub fn unit_factor(&self) -> f64 {
        (self.num as f64 / (self.mag as f64 * self.den as f64)) * CM_TO_PT
    }

    /// Convert a raw DVI distance to printer's points.
    pub fn to_physical(&self, distance: i32) -> f64 {
        distance as f64 * self.unit_factor()
    }

    /// Pixels per DVI unit at the given device resolution in pixels per
    /// inch, magnification applied.
    pub fn pixels_per_unit(&self, resolution: f64) -> f64 {
        (self.num as f64 / 254_000.0) * (resolution / self.den as f64) * (self.mag as f64 / 1000.0)
    }
}
