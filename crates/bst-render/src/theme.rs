//! Colours and fonts shared by every painter (Vello and Canvas2D).

use bst_core::DrawNode;

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSS colour string for Canvas2D (`#RRGGBB` or `rgba(...)`).
    pub fn css(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

/// Everything a painter needs besides positions.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Rgba,
    pub node: Rgba,
    pub highlighted: Rgba,
    pub deleted: Rgba,
    pub border: Rgba,
    pub data: Rgba,
    pub stats: Rgba,
    pub found: Rgba,
    pub line_width: f64,
    pub data_font: &'static str,
    pub stat_font: &'static str,
    /// Baseline nudge so key labels sit in the middle of the circle.
    pub text_offset: f64,
}

impl Theme {
    /// Dark canvas, green nodes.
    pub fn dark() -> Self {
        Self {
            background: Rgba::rgb(0x1C, 0x1C, 0x1E),
            node: Rgba::rgb(0x00, 0x80, 0x00),
            highlighted: Rgba::rgb(0x00, 0x00, 0xFF),
            deleted: Rgba::rgb(0xFF, 0x00, 0x00),
            border: Rgba::rgb(0xFF, 0xFF, 0xFF),
            data: Rgba::rgb(0xFF, 0xFF, 0xFF),
            stats: Rgba::rgb(0xFF, 0xA5, 0x00),
            found: Rgba::rgb(0x00, 0xFF, 0x00),
            line_width: 2.5,
            data_font: "12px Arial",
            stat_font: "bold 15px Arial",
            text_offset: 5.0,
        }
    }

    /// Fill colour for a node; a deletion mark wins over a highlight.
    pub fn node_fill(&self, node: &DrawNode) -> Rgba {
        if node.deleted {
            self.deleted
        } else if node.highlighted {
            self.highlighted
        } else {
            self.node
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
