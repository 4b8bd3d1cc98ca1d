//! Drawing surface recording text and line operations for one page.

use serde::Serialize;

use super::metrics;

/// Standard fonts available to the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript base font name.
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }
}

/// A single drawing operation, in points with the origin at the bottom left.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        text: String,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
    },
}

/// A laid out page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text operations in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, f32, f32)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
            DrawOp::Line { .. } => None,
        })
    }

    /// Find the first text operation equal to `needle`.
    pub fn find_text(&self, needle: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }
}

/// Records drawing operations with a current font, in the manner of a
/// PDF graphics state.
#[derive(Debug)]
pub struct Canvas {
    width: f32,
    height: f32,
    font: Font,
    size: f32,
    ops: Vec<DrawOp>,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            font: Font::Helvetica,
            size: 12.0,
            ops: Vec::new(),
        }
    }

    pub fn set_font(&mut self, font: Font, size: f32) {
        self.font = font;
        self.size = size;
    }

    /// Width of `text` in the current font.
    pub fn string_width(&self, text: &str) -> f32 {
        metrics::string_width(text, self.font, self.size)
    }

    pub fn draw_string(&mut self, x: f32, y: f32, text: impl Into<String>) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            font: self.font,
            size: self.size,
            text: text.into(),
        });
    }

    /// Draw `text` horizontally centred on `x`.
    pub fn draw_centred_string(&mut self, x: f32, y: f32, text: impl Into<String>) {
        let text = text.into();
        let left = x - self.string_width(&text) / 2.0;
        self.draw_string(left, y, text);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.ops.push(DrawOp::Line {
            from: (x1, y1),
            to: (x2, y2),
        });
    }

    pub fn finish(self) -> Page {
        Page {
            width: self.width,
            height: self.height,
            ops: self.ops,
        }
    }
}
