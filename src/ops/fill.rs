// ============================================================================
// FLOOD FILL — tolerant scanline span fill
// ============================================================================

use crate::canvas::PixelBuffer;
use crate::color::Color;

/// Per-channel tolerance for "same color" during a fill. Deliberately loose:
/// anti-aliased fringes and soft gradients get swallowed into the fill, which
/// reads as painterly rather than leaving single-pixel halos.
pub const MATCH_TOLERANCE: f64 = 0.05;

/// Replace the four-connected region of `target`-colored pixels around
/// `(x, y)` with `replacement`, in place.
///
/// Works span-by-span with an explicit queue of pending scan seeds rather
/// than recursion, so a fill covering the whole buffer uses constant stack.
/// Each popped seed fills the contiguous run on its own row, then the rows
/// above and below that run are scanned for matching sub-runs, one new seed
/// per run.
///
/// No-op early-outs: seed out of bounds, `target` already within tolerance of
/// `replacement` (a fill onto itself would otherwise re-match forever), or
/// the seed pixel not matching `target`.
pub fn flood_fill(
    buffer: &mut PixelBuffer,
    x: i32,
    y: i32,
    target: Color,
    replacement: Color,
) {
    if !buffer.contains(x, y) {
        return;
    }
    if target.approx_eq(replacement, MATCH_TOLERANCE) {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if !matches(buffer, x, y, target) {
        return;
    }

    let width = buffer.width();
    let height = buffer.height();
    let mut pending: Vec<(u32, u32)> = vec![(x, y)];

    while let Some((seed_x, seed_y)) = pending.pop() {
        // A prior span may have already consumed this run.
        if !matches(buffer, seed_x, seed_y, target) {
            continue;
        }

        // Grow the span to the full contiguous run on this row.
        let mut left = seed_x;
        while left > 0 && matches(buffer, left - 1, seed_y, target) {
            left -= 1;
        }
        let mut right = seed_x;
        while right + 1 < width && matches(buffer, right + 1, seed_y, target) {
            right += 1;
        }
        for px in left..=right {
            buffer.set(px, seed_y, replacement);
        }

        // Seed every matching sub-run adjacent to the span, one row up and
        // one row down.
        let above = seed_y.checked_sub(1);
        let below = if seed_y + 1 < height { Some(seed_y + 1) } else { None };
        for row in [above, below].into_iter().flatten() {
            let mut px = left;
            while px <= right {
                if matches(buffer, px, row, target) {
                    pending.push((px, row));
                    while px <= right && matches(buffer, px, row, target) {
                        px += 1;
                    }
                } else {
                    px += 1;
                }
            }
        }
    }
}

fn matches(buffer: &PixelBuffer, x: u32, y: u32, target: Color) -> bool {
    buffer.get(x, y).approx_eq(target, MATCH_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };

    /// 8×8 white buffer with a red 4×4 square in the top-left corner.
    fn red_square_buffer() -> PixelBuffer {
        let mut buf = PixelBuffer::new(8, 8);
        buf.fill(Color::WHITE);
        for y in 0..4 {
            for x in 0..4 {
                buf.set(x, y, Color::RED);
            }
        }
        buf
    }

    #[test]
    fn fills_exactly_the_connected_region() {
        let mut buf = red_square_buffer();
        flood_fill(&mut buf, 1, 1, Color::RED, BLUE);
        for y in 0..8 {
            for x in 0..8 {
                let expected = if x < 4 && y < 4 { BLUE } else { Color::WHITE };
                assert_eq!(buf.get(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn out_of_bounds_seed_is_a_no_op() {
        let mut buf = red_square_buffer();
        let before = buf.clone();
        flood_fill(&mut buf, -1, 2, Color::RED, BLUE);
        flood_fill(&mut buf, 2, 8, Color::RED, BLUE);
        assert_eq!(buf.pixels(), before.pixels());
    }

    #[test]
    fn target_equals_replacement_is_a_no_op() {
        let mut buf = red_square_buffer();
        let before = buf.clone();
        flood_fill(&mut buf, 1, 1, Color::RED, Color::RED);
        assert_eq!(buf.pixels(), before.pixels());
    }

    #[test]
    fn seed_not_matching_target_is_a_no_op() {
        let mut buf = red_square_buffer();
        let before = buf.clone();
        flood_fill(&mut buf, 6, 6, Color::RED, BLUE);
        assert_eq!(buf.pixels(), before.pixels());
    }

    #[test]
    fn fill_does_not_leak_through_diagonal_gaps() {
        // Two red regions touching only at a corner: four-connected fill must
        // not cross.
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill(Color::WHITE);
        buf.set(0, 0, Color::RED);
        buf.set(1, 1, Color::RED);
        flood_fill(&mut buf, 0, 0, Color::RED, BLUE);
        assert_eq!(buf.get(0, 0), BLUE);
        assert_eq!(buf.get(1, 1), Color::RED);
    }

    #[test]
    fn fills_a_concave_region() {
        // U-shape: left column, bottom row, right column of a 5×5 ring.
        let mut buf = PixelBuffer::new(5, 5);
        buf.fill(Color::WHITE);
        for y in 0..5 {
            buf.set(0, y, Color::RED);
            buf.set(4, y, Color::RED);
        }
        for x in 0..5 {
            buf.set(x, 4, Color::RED);
        }
        flood_fill(&mut buf, 0, 0, Color::RED, BLUE);
        for y in 0..5 {
            assert_eq!(buf.get(0, y), BLUE);
            assert_eq!(buf.get(4, y), BLUE);
        }
        for x in 0..5 {
            assert_eq!(buf.get(x, 4), BLUE);
        }
        assert_eq!(buf.get(2, 2), Color::WHITE);
    }

    #[test]
    fn tolerance_swallows_near_matches() {
        let mut buf = PixelBuffer::new(3, 1);
        buf.fill(Color::WHITE);
        buf.set(1, 0, Color::new(0.97, 0.97, 0.97, 1.0));
        flood_fill(&mut buf, 0, 0, Color::WHITE, BLUE);
        assert_eq!(buf.get(1, 0), BLUE);
        assert_eq!(buf.get(2, 0), BLUE);
    }
}
