// ============================================================================
// EDITOR — sequences strokes and filters against the snapshot history
// ============================================================================

use std::path::Path;

use crate::canvas::PixelBuffer;
use crate::color::{self, Color};
use crate::components::history::SnapshotHistory;
use crate::components::tools::{Tool, ToolKind};
use crate::io;
use crate::log_info;
use crate::ops::filters::Filter;

/// An editing session: the live pixel buffer (owned by the history stacks),
/// the active tool, and the operation sequencing that keeps undo snapshots
/// consistent.
///
/// All entry points run on the caller's thread; only filter convolution fans
/// out internally, and it has fully joined before control returns. The
/// history is never touched concurrently with a running filter.
pub struct Editor {
    history: SnapshotHistory,
    tool: Tool,
}

impl Editor {
    /// A fresh session over a solid-color canvas.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut buffer = PixelBuffer::new(width, height);
        buffer.fill(background);
        Self::from_buffer(buffer)
    }

    /// Wrap an already-built buffer (e.g. a decoded image) in a session.
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Editor {
            history: SnapshotHistory::new(buffer),
            tool: Tool::default(),
        }
    }

    /// Decode an image file into a fresh session. On decode failure no
    /// session is created.
    pub fn open(path: &Path) -> Result<Self, String> {
        io::load_image(path).map(Self::from_buffer)
    }

    /// Encode the current buffer (top of the undo stack) to `path`.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        io::save_image(self.buffer(), path)
    }

    /// The live buffer, for rendering hand-off.
    pub fn buffer(&self) -> &PixelBuffer {
        self.history.current()
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    // -- tool configuration surface ------------------------------------
    // Each change recomputes the mask before the next apply.

    pub fn set_tool_kind(&mut self, kind: ToolKind) {
        self.tool.set_kind(kind);
    }

    pub fn set_tool_radius(&mut self, radius: u32) {
        self.tool.set_radius(radius);
    }

    pub fn set_tool_color(&mut self, color: Color) {
        self.tool.set_color(color);
    }

    // -- history -------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        log_info!("undo");
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        log_info!("redo");
        self.history.redo()
    }

    // -- stroke lifecycle ----------------------------------------------

    /// Pointer press: snapshot history, then apply the tool once if the
    /// press is in bounds.
    pub fn stroke_start(&mut self, x: i32, y: i32) {
        self.history.checkpoint();
        if self.history.current().contains(x, y) {
            self.tool.apply(self.history.current_mut(), x, y);
        }
    }

    /// Timer-driven re-application while the pointer is held still. Only
    /// meaningful for tools with `apply_when_stationary`; no new snapshot.
    pub fn stroke_hold(&mut self, x: i32, y: i32) {
        if self.history.current().contains(x, y) {
            self.tool.apply(self.history.current_mut(), x, y);
        }
    }

    /// Drag sample: apply the tool along the segment from the previous
    /// sample, stepping by the tool's fill rate. Stamp tools skip drags
    /// entirely. No new snapshot — the whole stroke is one edit.
    pub fn stroke_move(&mut self, x: i32, y: i32, prev_x: i32, prev_y: i32) {
        if self.tool.is_stamp() {
            return;
        }

        let dx = (x - prev_x) as f64;
        let dy = (y - prev_y) as f64;
        let distance = (dx * dx + dy * dy).sqrt() as i32;
        // fill rate 1.0 → step 1 (every unit of distance), rate → 0 → step
        // approaches the full distance (endpoints only)
        let step = ((1.0 - self.tool.fill_rate()) * (distance - 1) as f64 + 1.0) as i32;
        let step = step.max(1);

        let mut i = 0;
        while i < distance {
            let t = i as f64 / distance as f64;
            let px = color::lerp(prev_x as f64, x as f64, t) as i32;
            let py = color::lerp(prev_y as f64, y as f64, t) as i32;
            if self.history.current().contains(px, py) {
                self.tool.apply(self.history.current_mut(), px, py);
            }
            i += step;
        }
    }

    /// Pointer release: one final application at the release point
    /// (non-stamp tools only).
    pub fn stroke_end(&mut self, x: i32, y: i32) {
        if self.tool.is_stamp() {
            return;
        }
        if self.history.current().contains(x, y) {
            self.tool.apply(self.history.current_mut(), x, y);
        }
    }

    // -- filters -------------------------------------------------------

    /// Apply a filter as a single atomic edit: one snapshot, then the whole
    /// buffer is rewritten before this returns.
    pub fn apply_filter(&mut self, filter: &Filter) {
        log_info!("apply filter: {}", filter.label());
        self.history.checkpoint();
        filter.apply(self.history.current_mut());
    }
}
