// ============================================================================
// PIXEL BUFFER — the raster store every edit operates on
// ============================================================================

use crate::color::Color;

/// A dense, row-major grid of RGBA float pixels plus the canvas background
/// color (the last color passed to a full [`PixelBuffer::fill`]).
///
/// `get`/`set` are direct indexed accesses with no bounds checking beyond a
/// debug assertion: the tool, fill and filter paths validate coordinates
/// before entering their per-pixel loops, and the accessors stay branch-free
/// for them. Out-of-range coordinates are a caller bug.
///
/// Cloning deep-copies the pixel array and carries the background color, so a
/// clone is a fully independent snapshot — the history stacks rely on this.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    background: Color,
    data: Vec<Color>,
}

impl PixelBuffer {
    /// Create a `width` × `height` buffer. Both dimensions must be positive.
    /// Pixels start transparent black; callers normally `fill` immediately.
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0);
        PixelBuffer {
            width,
            height,
            background: Color::TRANSPARENT,
            data: vec![Color::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The canvas background color, as recorded by the last full `fill`.
    /// The eraser blends toward this.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Set every pixel to `color` and record it as the background.
    pub fn fill(&mut self, color: Color) {
        self.data.fill(color);
        self.background = color;
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        debug_assert!(x < self.width && y < self.height);
        self.data[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        debug_assert!(x < self.width && y < self.height);
        self.data[(y * self.width + x) as usize] = color;
    }

    /// Whether a signed coordinate pair lands inside the buffer. The tool and
    /// stroke paths work in signed space (mask offsets go negative near the
    /// edges) and call this before touching a pixel.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height
    }

    /// Row-major pixel slice, for render hand-off to a host presenter.
    pub fn pixels(&self) -> &[Color] {
        &self.data
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_exactly() {
        let mut buf = PixelBuffer::new(4, 3);
        let c = Color::new(0.1, 0.2, 0.3, 0.4);
        buf.set(3, 2, c);
        assert_eq!(buf.get(3, 2), c);
        assert_eq!(buf.get(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn fill_records_background() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.fill(Color::RED);
        assert_eq!(buf.background(), Color::RED);
        assert_eq!(buf.get(1, 1), Color::RED);
    }

    #[test]
    fn set_does_not_touch_background() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.fill(Color::BLACK);
        buf.set(0, 0, Color::WHITE);
        assert_eq!(buf.background(), Color::BLACK);
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let mut original = PixelBuffer::new(3, 3);
        original.fill(Color::WHITE);
        let mut copy = original.clone();
        copy.set(1, 1, Color::BLACK);
        copy.fill(Color::RED);
        assert_eq!(original.get(1, 1), Color::WHITE);
        assert_eq!(original.background(), Color::WHITE);
    }

    #[test]
    fn contains_rejects_out_of_range() {
        let buf = PixelBuffer::new(4, 4);
        assert!(buf.contains(0, 0));
        assert!(buf.contains(3, 3));
        assert!(!buf.contains(-1, 0));
        assert!(!buf.contains(0, 4));
        assert!(!buf.contains(4, 0));
    }
}
