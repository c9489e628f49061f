//! Multi-line text widget.

use std::any::Any;

use cellgrid_buffer::{draw, Cell, Grid};
use cellgrid_core::Rect;

use crate::widget::{RenderContext, Widget};

/// Content of a [`TextBlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain lines drawn in the node's colors.
    Lines(Vec<String>),
    /// Pre-colored cell lines.
    Cells(Vec<Vec<Cell>>),
}

impl Default for Content {
    fn default() -> Self {
        Self::Lines(Vec::new())
    }
}

/// Several lines of aligned text.
///
/// The node's alignment picks which lines land on which rows, then aligns
/// each line horizontally on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    /// What to draw.
    pub content: Content,
}

impl TextBlock {
    /// Creates a block of plain lines.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            content: Content::Lines(lines.into_iter().map(Into::into).collect()),
        }
    }

    /// Creates a block of pre-colored cell lines.
    pub fn from_cells(lines: Vec<Vec<Cell>>) -> Self {
        Self {
            content: Content::Cells(lines),
        }
    }

    /// Splits `text` on newlines.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }
}

impl Widget for TextBlock {
    fn type_name(&self) -> &'static str {
        "TextBlock"
    }

    fn render(&self, ctx: &RenderContext<'_>, grid: &mut Grid, rect: Rect) {
        let style = ctx.text_style();
        match &self.content {
            Content::Lines(lines) => {
                draw::draw_text_lines(grid, rect, &style, ctx.alignment(), lines);
            }
            Content::Cells(lines) => {
                draw::draw_cell_lines(grid, rect, &style, ctx.alignment(), lines);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
