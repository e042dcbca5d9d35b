//! Frame painter
//!
//! Paints a [`Frame`] in a fixed order: clear, cells, title, lines. Every
//! frame starts a fresh display list, so painting the same frame twice
//! yields the same commands.

use lockpad_core::{CellMark, Frame, Point, Renderer, TitleAnchor};

use crate::context::{PaintCommand, PaintContext};
use crate::path::Path;

/// Cosmetic parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintStyle {
    /// Stroke width of cell outlines
    pub outline_width: f32,
    /// Radius of the dot in a selected cell, as a fraction of the cell radius
    pub dot_ratio: f32,
    /// Stroke width of the connecting lines
    pub line_width: f32,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            outline_width: 1.0,
            dot_ratio: 0.5,
            line_width: 5.0,
        }
    }
}

/// Text measurement used to center the title
pub trait TextMetrics {
    fn measure(&self, text: &str, font_size: f32) -> f32;
}

/// Estimates width from per-character advances: half an em for ASCII,
/// a full em for everything else (CJK glyphs are square)
#[derive(Clone, Copy, Debug, Default)]
pub struct AverageGlyphWidth;

impl TextMetrics for AverageGlyphWidth {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|c| if c.is_ascii() { 0.5 } else { 1.0 })
            .sum::<f32>()
            * font_size
    }
}

/// Renderer that records each frame as paint commands
pub struct FramePainter<M = AverageGlyphWidth> {
    style: PaintStyle,
    metrics: M,
    context: PaintContext,
    frames_painted: u64,
}

impl FramePainter<AverageGlyphWidth> {
    pub fn new() -> Self {
        Self::with_metrics(PaintStyle::default(), AverageGlyphWidth)
    }
}

impl Default for FramePainter<AverageGlyphWidth> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TextMetrics> FramePainter<M> {
    pub fn with_metrics(style: PaintStyle, metrics: M) -> Self {
        Self {
            style,
            metrics,
            context: PaintContext::new(),
            frames_painted: 0,
        }
    }

    pub fn style(&self) -> &PaintStyle {
        &self.style
    }

    /// Commands of the most recently painted frame
    pub fn commands(&self) -> &[PaintCommand] {
        self.context.commands()
    }

    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        self.context.take_commands()
    }

    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    /// Paint `frame` into a fresh display list
    pub fn paint(&mut self, frame: &Frame) {
        self.context.take_commands();
        let ctx = &mut self.context;

        ctx.clear(frame.surface);

        for cell in &frame.cells {
            match cell.mark {
                CellMark::Outline => {
                    ctx.stroke_circle(
                        cell.center,
                        cell.radius,
                        frame.normal_color,
                        self.style.outline_width,
                    );
                }
                CellMark::Selected => {
                    ctx.stroke_circle(
                        cell.center,
                        cell.radius,
                        frame.accent,
                        self.style.outline_width,
                    );
                    ctx.fill_circle(cell.center, cell.radius * self.style.dot_ratio, frame.accent);
                }
            }
        }

        let title = &frame.title;
        let x = match title.anchor {
            TitleAnchor::Left(x) => x,
            TitleAnchor::Centered => {
                let width = self.metrics.measure(&title.text, title.font_size);
                ((frame.surface.width - width) / 2.0).floor()
            }
        };
        ctx.draw_text(
            title.text.clone(),
            Point::new(x, title.baseline_y),
            title.font_size,
            title.color,
            title.max_width,
        );

        if frame.segments().next().is_some() {
            let points = frame.trace.iter().copied().chain(frame.live_point);
            ctx.stroke_path(Path::polyline(points), frame.accent, self.style.line_width);
        }

        self.frames_painted += 1;
        tracing::trace!(
            "FramePainter::paint - {} commands for {:?} frame",
            self.context.commands().len(),
            frame.phase
        );
    }
}

impl<M: TextMetrics> Renderer for FramePainter<M> {
    fn draw_frame(&mut self, frame: &Frame) {
        self.paint(frame);
    }
}
