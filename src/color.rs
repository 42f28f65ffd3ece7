// ============================================================================
// COLOR — RGBA channels with clamped channel-wise arithmetic
// ============================================================================

/// An RGBA color with `f64` channels nominally in `[0, 1]`.
///
/// Channel values may transiently leave `[0, 1]` — convolution accumulators
/// and oversaturation depend on this — but alpha is clamped back to `[0, 1]`
/// after every arithmetic operation regardless. Callers clamp the remaining
/// channels explicitly (see [`Color::clamp`]) before a value is stored in a
/// buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color { r, g, b, a }
    }

    /// Channel-wise sum. Alpha is clamped, the other channels are left hot.
    pub fn add(self, other: Color) -> Color {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
            a: (self.a + other.a).clamp(0.0, 1.0),
        }
    }

    /// Channel-wise difference.
    pub fn subtract(self, other: Color) -> Color {
        Color {
            r: self.r - other.r,
            g: self.g - other.g,
            b: self.b - other.b,
            a: (self.a - other.a).clamp(0.0, 1.0),
        }
    }

    /// Channel-wise product.
    pub fn multiply(self, other: Color) -> Color {
        Color {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
            a: (self.a * other.a).clamp(0.0, 1.0),
        }
    }

    /// Channel-wise quotient.
    pub fn divide(self, other: Color) -> Color {
        Color {
            r: self.r / other.r,
            g: self.g / other.g,
            b: self.b / other.b,
            a: (self.a / other.a).clamp(0.0, 1.0),
        }
    }

    /// Every channel multiplied by `scale`.
    pub fn scale(self, scale: f64) -> Color {
        Color {
            r: self.r * scale,
            g: self.g * scale,
            b: self.b * scale,
            a: (self.a * scale).clamp(0.0, 1.0),
        }
    }

    /// Channel-wise minimum of the two colors.
    pub fn min(self, other: Color) -> Color {
        Color {
            r: self.r.min(other.r),
            g: self.g.min(other.g),
            b: self.b.min(other.b),
            a: self.a.min(other.a).clamp(0.0, 1.0),
        }
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1).
    pub fn lerp(self, other: Color, t: f64) -> Color {
        Color {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t).clamp(0.0, 1.0),
        }
    }

    /// Every channel clamped to `[min, max]`.
    pub fn clamp(self, min: f64, max: f64) -> Color {
        Color {
            r: self.r.clamp(min, max),
            g: self.g.clamp(min, max),
            b: self.b.clamp(min, max),
            a: self.a.clamp(min, max),
        }
    }

    /// Perceived brightness, BT.709 weights.
    pub fn luminance(self) -> f64 {
        self.r * 0.2126 + self.g * 0.7152 + self.b * 0.0722
    }

    /// Threshold equality: true when no channel differs by more than
    /// `threshold`. Buffer colors go through float arithmetic constantly, so
    /// exact comparison is never what callers want.
    pub fn approx_eq(self, other: Color, threshold: f64) -> bool {
        (self.r - other.r).abs() <= threshold
            && (self.g - other.g).abs() <= threshold
            && (self.b - other.b).abs() <= threshold
            && (self.a - other.a).abs() <= threshold
    }
}

/// Scalar linear interpolation from `x` (t = 0) to `y` (t = 1).
pub fn lerp(x: f64, y: f64, t: f64) -> f64 {
    (1.0 - t) * x + t * y
}
