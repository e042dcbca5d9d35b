//! Paint context - the recorded drawing API

use lockpad_core::{Color, Point, Size};

use crate::path::Path;

/// Stroke style
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

/// A paint command for the backend
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    /// Clear the whole surface to transparent
    Clear { size: Size },
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Point,
        radius: f32,
        style: StrokeStyle,
    },
    StrokePath { path: Path, style: StrokeStyle },
    DrawText {
        text: String,
        position: Point,
        size: f32,
        color: Color,
        /// Backends compress the text horizontally to fit
        max_width: f32,
    },
}

/// Records paint commands in call order
#[derive(Debug, Default)]
pub struct PaintContext {
    commands: Vec<PaintCommand>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self, size: Size) {
        self.commands.push(PaintCommand::Clear { size });
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(PaintCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, width: f32) {
        self.commands.push(PaintCommand::StrokeCircle {
            center,
            radius,
            style: StrokeStyle { color, width },
        });
    }

    pub fn stroke_path(&mut self, path: Path, color: Color, width: f32) {
        if path.is_empty() {
            return;
        }
        self.commands.push(PaintCommand::StrokePath {
            path,
            style: StrokeStyle { color, width },
        });
    }

    pub fn draw_text(
        &mut self,
        text: impl Into<String>,
        position: Point,
        size: f32,
        color: Color,
        max_width: f32,
    ) {
        self.commands.push(PaintCommand::DrawText {
            text: text.into(),
            position,
            size,
            color,
            max_width,
        });
    }
}
