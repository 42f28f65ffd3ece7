// ============================================================================
// IMAGE FILTERS — pointwise color adjustments and kernel convolution
// ============================================================================

use rayon::prelude::*;

use crate::canvas::PixelBuffer;
use crate::color::Color;
use crate::kernel::Kernel;

/// A filter plus its parameters. Pointwise variants rewrite each pixel
/// independently in a single in-place pass; convolution variants synthesize a
/// [`Kernel`] and convolve it over an untouched copy of the buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Filter {
    /// 0 → grayscale, 1 → unchanged, above 1 → oversaturated extrapolation.
    Saturation { scale: f64 },
    /// Independent multiplier per RGB channel.
    Channels { r: f64, g: f64, b: f64 },
    Invert,
    /// Brightness offset in [-1, 1] plus the standard 0–255-domain contrast
    /// correction.
    BrightnessContrast { brightness: f64, contrast: f64 },
    /// Quantize each channel to `bins` evenly spaced levels (`bins` ≥ 2).
    Posterize { bins: u32 },
    /// Luminance above `cutoff` → white, else black; alpha forced opaque.
    Threshold { cutoff: f64 },
    GaussianBlur { radius: u32 },
    /// `angle` in radians.
    MotionBlur { radius: u32, angle: f64 },
    Sharpen { radius: u32 },
    EdgeDetect,
}

impl Filter {
    pub fn label(&self) -> &'static str {
        match self {
            Filter::Saturation { .. } => "Saturation",
            Filter::Channels { .. } => "Channels",
            Filter::Invert => "Invert",
            Filter::BrightnessContrast { .. } => "Brightness/Contrast",
            Filter::Posterize { .. } => "Posterize",
            Filter::Threshold { .. } => "Threshold",
            Filter::GaussianBlur { .. } => "Gaussian Blur",
            Filter::MotionBlur { .. } => "Motion Blur",
            Filter::Sharpen { .. } => "Sharpen",
            Filter::EdgeDetect => "Edge Detect",
        }
    }

    pub fn is_convolution(&self) -> bool {
        matches!(
            self,
            Filter::GaussianBlur { .. }
                | Filter::MotionBlur { .. }
                | Filter::Sharpen { .. }
                | Filter::EdgeDetect
        )
    }

    /// Apply the filter to `buffer`. Synchronous: by the time this returns
    /// the whole buffer has been rewritten, even for the internally parallel
    /// convolution path.
    pub fn apply(&self, buffer: &mut PixelBuffer) {
        match *self {
            Filter::Saturation { scale } => {
                apply_pointwise(buffer, |c| saturation_pixel(c, scale));
            }
            Filter::Channels { r, g, b } => {
                apply_pointwise(buffer, |c| c.multiply(Color::new(r, g, b, 1.0)));
            }
            Filter::Invert => {
                apply_pointwise(buffer, |c| Color::new(1.0 - c.r, 1.0 - c.g, 1.0 - c.b, c.a));
            }
            Filter::BrightnessContrast { brightness, contrast } => {
                apply_pointwise(buffer, |c| brightness_contrast_pixel(c, brightness, contrast));
            }
            Filter::Posterize { bins } => {
                apply_pointwise(buffer, |c| posterize_pixel(c, bins));
            }
            Filter::Threshold { cutoff } => {
                apply_pointwise(buffer, |c| threshold_pixel(c, cutoff));
            }
            Filter::GaussianBlur { radius } => {
                convolve(buffer, &Kernel::gaussian_blur(radius));
            }
            Filter::MotionBlur { radius, angle } => {
                convolve(buffer, &Kernel::motion_blur(radius, angle));
            }
            Filter::Sharpen { radius } => {
                convolve(buffer, &Kernel::sharpen(radius));
            }
            Filter::EdgeDetect => {
                convolve(buffer, &Kernel::edge_detect());
            }
        }
    }
}

// ---------------------------------------------------------------------------
//  Pointwise filters
// ---------------------------------------------------------------------------

/// Single in-place pass; every written pixel is clamped to `[0, 1]`.
fn apply_pointwise(buffer: &mut PixelBuffer, f: impl Fn(Color) -> Color) {
    for pixel in buffer.pixels_mut() {
        *pixel = f(*pixel).clamp(0.0, 1.0);
    }
}

fn saturation_pixel(color: Color, scale: f64) -> Color {
    let lum = color.luminance();
    let desaturated = Color::new(lum, lum, lum, color.a);
    desaturated.lerp(color, scale)
}

fn brightness_contrast_pixel(color: Color, brightness: f64, contrast: f64) -> Color {
    let brightened = color
        .add(Color::new(brightness, brightness, brightness, 0.0))
        .clamp(0.0, 1.0);

    // standard contrast correction factor, computed in the 0–255 domain
    let c = 255.0 * contrast;
    let f = (259.0 * (c + 255.0)) / (255.0 * (259.0 - c));
    let adjust = |v: f64| (f * (v * 255.0 - 128.0) + 128.0).clamp(0.0, 255.0) / 255.0;

    Color::new(
        adjust(brightened.r),
        adjust(brightened.g),
        adjust(brightened.b),
        color.a,
    )
}

fn posterize_pixel(color: Color, bins: u32) -> Color {
    debug_assert!(bins >= 2);
    let steps = (bins - 1) as f64;
    Color::new(
        (color.r * steps).round() / steps,
        (color.g * steps).round() / steps,
        (color.b * steps).round() / steps,
        color.a,
    )
}

fn threshold_pixel(color: Color, cutoff: f64) -> Color {
    let v = if color.luminance() > cutoff { 1.0 } else { 0.0 };
    Color::new(v, v, v, 1.0)
}

// ---------------------------------------------------------------------------
//  Convolution
// ---------------------------------------------------------------------------

/// Convolve `kernel` over the buffer with clamp-to-edge sampling.
///
/// Reads go through a deep copy taken before the pass: convolution at a later
/// pixel must never see already-updated neighbor values. Output rows are
/// disjoint, so they are rewritten in parallel; `par_chunks_mut` joins every
/// worker before returning, so the caller always observes a fully written
/// buffer.
fn convolve(buffer: &mut PixelBuffer, kernel: &Kernel) {
    let source = buffer.clone();
    let width = source.width();
    let height = source.height();
    let radius = kernel.radius() as i64;
    let edge = kernel.edge_length();

    buffer
        .pixels_mut()
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as i64;
            for x in 0..width as i64 {
                let mut accum = Color::new(0.0, 0.0, 0.0, 1.0);
                for v in 0..edge {
                    for u in 0..edge {
                        let sx = (x + u as i64 - radius).clamp(0, width as i64 - 1);
                        let sy = (y + v as i64 - radius).clamp(0, height as i64 - 1);
                        let sample = source.get(sx as u32, sy as u32);
                        accum = accum.add(sample.scale(kernel.get(u, v)));
                    }
                }
                row[x as usize] = accum.clamp(0.0, 1.0);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn gradient_buffer() -> PixelBuffer {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill(Color::WHITE);
        for y in 0..4 {
            for x in 0..4 {
                let t = (y * 4 + x) as f64 / 15.0;
                buf.set(x, y, Color::new(t, 1.0 - t, t * t, 1.0));
            }
        }
        buf
    }

    fn assert_buffers_close(a: &PixelBuffer, b: &PixelBuffer, eps: f64) {
        for (pa, pb) in a.pixels().iter().zip(b.pixels()) {
            assert!(pa.approx_eq(*pb, eps), "{pa:?} != {pb:?}");
        }
    }

    #[test]
    fn saturation_zero_is_grayscale() {
        let mut buf = gradient_buffer();
        Filter::Saturation { scale: 0.0 }.apply(&mut buf);
        for y in 0..4 {
            for x in 0..4 {
                let c = buf.get(x, y);
                assert!((c.r - c.g).abs() < EPS && (c.g - c.b).abs() < EPS);
            }
        }
    }

    #[test]
    fn saturation_one_is_identity() {
        let mut buf = gradient_buffer();
        let before = buf.clone();
        Filter::Saturation { scale: 1.0 }.apply(&mut buf);
        assert_buffers_close(&before, &buf, EPS);
    }

    #[test]
    fn channels_scales_independently() {
        let mut buf = PixelBuffer::new(1, 1);
        buf.fill(Color::new(0.5, 0.5, 0.5, 1.0));
        Filter::Channels { r: 2.0, g: 1.0, b: 0.5 }.apply(&mut buf);
        let c = buf.get(0, 0);
        assert_eq!(c.r, 1.0); // clamped from 1.0
        assert_eq!(c.g, 0.5);
        assert_eq!(c.b, 0.25);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn invert_is_self_inverse() {
        let mut buf = gradient_buffer();
        let before = buf.clone();
        Filter::Invert.apply(&mut buf);
        Filter::Invert.apply(&mut buf);
        assert_buffers_close(&before, &buf, 1e-6);
    }

    #[test]
    fn brightness_only_shifts_channels() {
        let mut buf = PixelBuffer::new(1, 1);
        buf.fill(Color::new(0.25, 0.25, 0.25, 1.0));
        Filter::BrightnessContrast { brightness: 0.25, contrast: 0.0 }.apply(&mut buf);
        let c = buf.get(0, 0);
        assert!((c.r - 0.5).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn full_contrast_pushes_away_from_midpoint() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.fill(Color::new(0.25, 0.25, 0.25, 1.0));
        buf.set(1, 0, Color::new(0.75, 0.75, 0.75, 1.0));
        Filter::BrightnessContrast { brightness: 0.0, contrast: 1.0 }.apply(&mut buf);
        assert!(buf.get(0, 0).r < 0.25);
        assert!(buf.get(1, 0).r > 0.75);
    }

    #[test]
    fn posterize_two_bins_is_pure_binary() {
        let mut buf = gradient_buffer();
        Filter::Posterize { bins: 2 }.apply(&mut buf);
        for pixel in buf.pixels() {
            for v in [pixel.r, pixel.g, pixel.b] {
                assert!(v == 0.0 || v == 1.0, "got {v}");
            }
        }
    }

    #[test]
    fn threshold_splits_on_luminance() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.fill(Color::new(0.9, 0.9, 0.9, 0.5));
        buf.set(1, 0, Color::new(0.1, 0.1, 0.1, 0.5));
        Filter::Threshold { cutoff: 0.5 }.apply(&mut buf);
        assert_eq!(buf.get(0, 0), Color::WHITE);
        assert_eq!(buf.get(1, 0), Color::BLACK);
    }

    #[test]
    fn radius_zero_blur_is_identity_on_opaque_buffers() {
        let mut buf = gradient_buffer();
        let before = buf.clone();
        Filter::GaussianBlur { radius: 0 }.apply(&mut buf);
        assert_buffers_close(&before, &buf, EPS);
    }

    #[test]
    fn blur_of_uniform_buffer_is_unchanged() {
        let mut buf = PixelBuffer::new(6, 6);
        buf.fill(Color::new(0.3, 0.6, 0.9, 1.0));
        let before = buf.clone();
        Filter::GaussianBlur { radius: 2 }.apply(&mut buf);
        assert_buffers_close(&before, &buf, 1e-6);
    }

    #[test]
    fn blur_averages_neighbors() {
        let mut buf = PixelBuffer::new(5, 5);
        buf.fill(Color::BLACK);
        buf.set(2, 2, Color::WHITE);
        Filter::GaussianBlur { radius: 1 }.apply(&mut buf);
        let center = buf.get(2, 2);
        let neighbor = buf.get(1, 2);
        assert!(center.r < 1.0 && center.r > 0.0);
        assert!(neighbor.r > 0.0 && neighbor.r < center.r);
    }

    #[test]
    fn edge_detect_zeroes_flat_regions() {
        let mut buf = PixelBuffer::new(6, 6);
        buf.fill(Color::new(0.5, 0.5, 0.5, 1.0));
        Filter::EdgeDetect.apply(&mut buf);
        // kernel sums to zero: uniform regions go black
        for pixel in buf.pixels() {
            assert!(pixel.r.abs() < 1e-6);
            assert_eq!(pixel.a, 1.0);
        }
    }

    #[test]
    fn edge_detect_highlights_boundaries() {
        let mut buf = PixelBuffer::new(6, 6);
        buf.fill(Color::BLACK);
        for y in 0..6 {
            for x in 3..6 {
                buf.set(x, y, Color::WHITE);
            }
        }
        Filter::EdgeDetect.apply(&mut buf);
        assert!(buf.get(3, 3).r > 0.5); // boundary column lights up
        assert!(buf.get(5, 3).r < 1e-6); // interior stays dark
    }

    #[test]
    fn sharpen_exaggerates_contrast_at_edges() {
        // mid-gray step edge so the overshoot is visible inside [0, 1]
        let mut buf = PixelBuffer::new(8, 1);
        for x in 0..8 {
            let v = if x < 4 { 0.25 } else { 0.75 };
            buf.set(x, 0, Color::new(v, v, v, 1.0));
        }
        Filter::Sharpen { radius: 1 }.apply(&mut buf);
        assert!(buf.get(3, 0).r < 0.25); // dark side undershoots
        assert!(buf.get(4, 0).r > 0.75); // bright side overshoots
    }

    #[test]
    fn motion_blur_smears_along_the_line_only() {
        let mut buf = PixelBuffer::new(7, 7);
        buf.fill(Color::BLACK);
        buf.set(3, 3, Color::WHITE);
        Filter::MotionBlur { radius: 2, angle: 0.0 }.apply(&mut buf);
        assert!(buf.get(1, 3).r > 0.0);
        assert!(buf.get(5, 3).r > 0.0);
        assert!(buf.get(3, 1).r < 1e-9);
    }

    #[test]
    fn convolution_forces_opaque_alpha() {
        let mut buf = PixelBuffer::new(3, 3);
        buf.fill(Color::new(0.5, 0.5, 0.5, 0.25));
        Filter::GaussianBlur { radius: 1 }.apply(&mut buf);
        for pixel in buf.pixels() {
            assert_eq!(pixel.a, 1.0);
        }
    }
}
