// ============================================================================
// TOOLS — parametric mask rasterizer for the drawing tools
// ============================================================================

use crate::canvas::PixelBuffer;
use crate::color::Color;
use crate::ops::fill::flood_fill;

/// Per-application coverage for the spray can. Each stamp deposits only this
/// fraction of the mask weight, so density builds up across repeated
/// stationary applications. Fixed design constant, not exposed.
const SPRAY_COVERAGE: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Pencil,
    Brush,
    Marker,
    SprayCan,
    FloodFill,
    Eraser,
}

impl ToolKind {
    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Brush => "Brush",
            ToolKind::Marker => "Marker",
            ToolKind::SprayCan => "Spray Can",
            ToolKind::FloodFill => "Flood Fill",
            ToolKind::Eraser => "Eraser",
        }
    }

    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Pencil,
            ToolKind::Brush,
            ToolKind::Marker,
            ToolKind::SprayCan,
            ToolKind::FloodFill,
            ToolKind::Eraser,
        ]
    }
}

/// The active drawing tool: a kind, a radius, a color, and the weight mask
/// derived from them.
///
/// The mask is a square grid with edge `2·radius + 1` (same shape as a
/// convolution kernel) giving the blend weight at each offset from the
/// application point. It is recomputed by every kind or radius change, so it
/// is always consistent with the parameters by the time `apply` runs.
pub struct Tool {
    kind: ToolKind,
    radius: u32,
    color: Color,
    mask: Vec<f64>,

    /// Re-apply on a host timer while the pointer is held still (marker and
    /// spray can build up coverage this way).
    apply_when_stationary: bool,
    /// Apply only once per press; drag interpolation is skipped entirely.
    is_stamp: bool,
    /// Fraction of the distance between two drag samples that receives tool
    /// application: 1.0 paints every intermediate point, lower values skip
    /// points to simulate texture.
    fill_rate: f64,
}

impl Default for Tool {
    fn default() -> Self {
        Tool::new(ToolKind::Pencil, 5, Color::RED)
    }
}

impl Tool {
    pub fn new(kind: ToolKind, radius: u32, color: Color) -> Self {
        let mut tool = Tool {
            kind,
            radius,
            color,
            mask: Vec::new(),
            apply_when_stationary: false,
            is_stamp: false,
            fill_rate: 1.0,
        };
        tool.reset_parameters();
        tool.update_mask();
        tool
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn apply_when_stationary(&self) -> bool {
        self.apply_when_stationary
    }

    pub fn is_stamp(&self) -> bool {
        self.is_stamp
    }

    pub fn fill_rate(&self) -> f64 {
        self.fill_rate
    }

    /// The derived weight mask, row-major, edge `2·radius + 1`.
    pub fn mask(&self) -> &[f64] {
        &self.mask
    }

    pub fn set_kind(&mut self, kind: ToolKind) {
        self.kind = kind;
        self.reset_parameters();
        self.update_mask();
    }

    pub fn set_radius(&mut self, radius: u32) {
        self.radius = radius;
        self.update_mask();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Restore the behavior flags to the kind's defaults.
    fn reset_parameters(&mut self) {
        self.apply_when_stationary = false;
        self.fill_rate = 1.0;
        self.is_stamp = false;

        match self.kind {
            ToolKind::Marker => {
                self.apply_when_stationary = true;
                self.fill_rate = 0.85;
            }
            ToolKind::SprayCan => {
                self.apply_when_stationary = true;
                self.fill_rate = 0.375;
            }
            ToolKind::FloodFill => {
                self.is_stamp = true;
            }
            ToolKind::Pencil | ToolKind::Brush | ToolKind::Eraser => {}
        }
    }

    /// Rebuild the weight mask from the current kind and radius.
    fn update_mask(&mut self) {
        let radius = self.radius as f64;
        let edge = 2 * self.radius + 1;
        self.mask = vec![0.0; (edge * edge) as usize];

        for y in 0..edge {
            for x in 0..edge {
                let dx = x as f64 - radius;
                let dy = y as f64 - radius;
                let distance = (dx * dx + dy * dy).sqrt();
                // radius 0 defines the normalized distance as 0 so the
                // falloff tools still paint their single center pixel
                let normalized = if radius == 0.0 { 0.0 } else { distance / radius };

                let weight = match self.kind {
                    // hard binary disc
                    ToolKind::Pencil | ToolKind::Eraser => {
                        if distance <= radius { 1.0 } else { 0.0 }
                    }
                    // soft linear radial falloff
                    ToolKind::Brush | ToolKind::SprayCan => {
                        1.0 - normalized.clamp(0.0, 1.0)
                    }
                    // chisel tip: a vertical band across the middle half
                    ToolKind::Marker => {
                        let fraction = x as f64 / edge as f64;
                        if (0.25..=0.75).contains(&fraction) { 1.0 } else { 0.0 }
                    }
                    // sentinel; apply() dispatches to flood fill instead of
                    // iterating the mask
                    ToolKind::FloodFill => 1.0,
                };
                self.mask[(y * edge + x) as usize] = weight;
            }
        }
    }

    /// Stamp the tool onto `buffer` centered at `(x, y)`, blending every
    /// positive-weight mask cell that lands in bounds according to the tool's
    /// semantics. The flood-fill tool ignores the mask and fills from the
    /// application point instead.
    pub fn apply(&self, buffer: &mut PixelBuffer, x: i32, y: i32) {
        if self.kind == ToolKind::FloodFill {
            if buffer.contains(x, y) {
                let target = buffer.get(x as u32, y as u32);
                flood_fill(buffer, x, y, target, self.color);
            }
            return;
        }

        let radius = self.radius as i32;
        let edge = 2 * radius + 1;

        for j in 0..edge {
            for i in 0..edge {
                let weight = self.mask[(j * edge + i) as usize];
                if weight <= 0.0 {
                    continue;
                }
                let px = x + (i - radius);
                let py = y + (j - radius);
                if !buffer.contains(px, py) {
                    continue;
                }
                let (px, py) = (px as u32, py as u32);
                let current = buffer.get(px, py);

                let blended = match self.kind {
                    ToolKind::Pencil | ToolKind::Brush => {
                        current.lerp(self.color, weight)
                    }
                    // blend toward the channel-wise darker color: overlapping
                    // marker strokes accumulate ink instead of flattening
                    ToolKind::Marker => {
                        current.lerp(current.min(self.color), weight)
                    }
                    ToolKind::SprayCan => {
                        current.lerp(self.color, weight * SPRAY_COVERAGE)
                    }
                    ToolKind::Eraser => {
                        current.lerp(buffer.background(), weight)
                    }
                    ToolKind::FloodFill => unreachable!("dispatched above"),
                };
                buffer.set(px, py, blended);
            }
        }
    }
}
