//! Pigment — a raster image editing engine.
//!
//! The engine keeps every canvas as a float-channel RGBA buffer and exposes
//! the operations a paint program needs on top of it: brush-style tools,
//! pointwise and convolution filters, scanline flood fill, and a bounded
//! snapshot undo/redo history. [`Editor`] ties these together into a session
//! with a stroke lifecycle; hosts that only need the primitives can use the
//! component modules directly.
//!
//! The crate also ships a headless CLI binary (`pigment`) for batch
//! filtering; see [`cli`].

pub mod canvas;
pub mod cli;
pub mod color;
pub mod components;
pub mod editor;
pub mod io;
pub mod kernel;
pub mod logger;
pub mod ops;

pub use canvas::PixelBuffer;
pub use color::Color;
pub use components::history::{SnapshotHistory, MAX_HISTORY_STATES};
pub use components::tools::{Tool, ToolKind};
pub use editor::Editor;
pub use kernel::Kernel;
pub use ops::fill::flood_fill;
pub use ops::filters::Filter;
