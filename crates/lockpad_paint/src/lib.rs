//! Lockpad Paint
//!
//! Turns gesture lock [`Frame`](lockpad_core::Frame)s into an ordered list
//! of 2D paint commands, similar to an HTML canvas display list. A platform
//! backend replays the commands; tests inspect them directly.

pub mod context;
pub mod painter;
pub mod path;

pub use context::{PaintCommand, PaintContext, StrokeStyle};
pub use painter::{AverageGlyphWidth, FramePainter, PaintStyle, TextMetrics};
pub use path::{Path, PathBuilder, PathCommand};
