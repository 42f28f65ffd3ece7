// ============================================================================
// IMAGE I/O — 8-bit RGBA conversion and file decode/encode
// ============================================================================
//
// The engine works in float channels; the outside world speaks 8-bit RGBA.
// Decode divides each byte by 255, encode multiplies by 255 and truncates
// (byte-store semantics — floor, not round). File framing is handled by the
// `image` crate; the raw-slice conversions below are also the interchange
// format for hosts that bring their own codec.

use std::path::Path;

use image::RgbaImage;

use crate::canvas::PixelBuffer;
use crate::color::Color;

/// Build a buffer from row-major 8-bit RGBA samples. `data` must hold exactly
/// `width * height * 4` bytes.
///
/// The background color of a decoded buffer is opaque white.
pub fn from_rgba8(data: &[u8], width: u32, height: u32) -> PixelBuffer {
    debug_assert_eq!(data.len(), (width * height * 4) as usize);
    let mut buffer = PixelBuffer::new(width, height);
    buffer.fill(Color::WHITE);
    for y in 0..height {
        for x in 0..width {
            let offset = ((y * width + x) * 4) as usize;
            let color = Color::new(
                data[offset] as f64 / 255.0,
                data[offset + 1] as f64 / 255.0,
                data[offset + 2] as f64 / 255.0,
                data[offset + 3] as f64 / 255.0,
            );
            buffer.set(x, y, color.clamp(0.0, 1.0));
        }
    }
    buffer
}

/// Flatten a buffer to row-major 8-bit RGBA samples.
pub fn to_rgba8(buffer: &PixelBuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(buffer.pixels().len() * 4);
    for pixel in buffer.pixels() {
        out.push((pixel.r * 255.0) as u8);
        out.push((pixel.g * 255.0) as u8);
        out.push((pixel.b * 255.0) as u8);
        out.push((pixel.a * 255.0) as u8);
    }
    out
}

/// Decode an image file into a buffer. Any format the `image` crate
/// recognizes by content works; the result is always converted to RGBA.
pub fn load_image(path: &Path) -> Result<PixelBuffer, String> {
    let decoded = image::open(path)
        .map_err(|e| format!("could not decode '{}': {}", path.display(), e))?;
    let rgba = decoded.to_rgba8();
    Ok(from_rgba8(rgba.as_raw(), rgba.width(), rgba.height()))
}

/// Encode a buffer to `path`, format chosen from the extension.
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> Result<(), String> {
    let data = to_rgba8(buffer);
    let img = RgbaImage::from_raw(buffer.width(), buffer.height(), data)
        .ok_or_else(|| "pixel data does not match buffer dimensions".to_string())?;
    img.save(path)
        .map_err(|e| format!("could not write '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba8_divides_by_255() {
        let data = [0u8, 51, 102, 255, 255, 204, 153, 0];
        let buf = from_rgba8(&data, 2, 1);
        let a = buf.get(0, 0);
        assert!((a.r - 0.0).abs() < 1e-9);
        assert!((a.g - 0.2).abs() < 1e-9);
        assert!((a.b - 0.4).abs() < 1e-9);
        assert_eq!(a.a, 1.0);
        assert_eq!(buf.background(), Color::WHITE);
    }

    #[test]
    fn to_rgba8_truncates() {
        let mut buf = PixelBuffer::new(1, 1);
        // 0.999 * 255 = 254.745 → stored as 254, not rounded to 255
        buf.set(0, 0, Color::new(0.999, 1.0, 0.0, 1.0));
        assert_eq!(to_rgba8(&buf), vec![254, 255, 0, 255]);
    }

    #[test]
    fn byte_round_trip_is_lossless() {
        let data: Vec<u8> = (0..=255).flat_map(|v| [v, 255 - v, v / 2, 255]).collect();
        let buf = from_rgba8(&data, 16, 16);
        assert_eq!(to_rgba8(&buf), data);
    }
}
