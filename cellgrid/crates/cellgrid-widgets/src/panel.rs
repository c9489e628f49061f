//! Bordered container widget.

use std::any::Any;

use cellgrid_buffer::{draw, BorderStyle, Grid, OpenSides};
use cellgrid_core::Rect;

use crate::widget::{RenderContext, Widget};

/// A container that draws a border and renders its children inside it.
///
/// Children are positioned relative to the cell just inside the top-left
/// corner and clipped to the interior. Open sides turn the adjoining corners
/// into junctions, so adjacent panels can share an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    /// Glyph set for the border.
    pub border: BorderStyle,
    /// Sides that merge with a neighboring shape.
    pub open: OpenSides,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new(BorderStyle::DoubleLine)
    }
}

impl Panel {
    /// Creates a closed panel.
    pub fn new(border: BorderStyle) -> Self {
        Self {
            border,
            open: OpenSides::empty(),
        }
    }

    /// Sets the open sides.
    pub fn with_open(mut self, open: OpenSides) -> Self {
        self.open = open;
        self
    }
}

impl Widget for Panel {
    fn type_name(&self) -> &'static str {
        "Panel"
    }

    fn render(&self, ctx: &RenderContext<'_>, grid: &mut Grid, rect: Rect) {
        let frame = Rect::from_parts(rect.position, ctx.bounds().size.abs().min(rect.size));
        draw::draw_border(
            grid,
            frame,
            &ctx.text_style(),
            &self.border.chars(),
            self.open,
        );
        ctx.render_children(grid, rect, 1);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
