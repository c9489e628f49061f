//! Single-line text widget.

use std::any::Any;

use cellgrid_buffer::draw::{self, Highlight};
use cellgrid_buffer::Grid;
use cellgrid_core::Rect;

use crate::widget::{RenderContext, Widget};

/// One line of aligned text.
///
/// An empty label shows its hint, if any, in the hint colors. A selection
/// range is drawn on the first row in the selection colors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    /// The text to display.
    pub text: String,
    /// Text shown in hint colors while `text` is empty.
    pub hint: Option<String>,
    /// Selected column range `(start, len)`, relative to the label.
    pub selection: Option<(i32, i32)>,
}

impl Label {
    /// Creates a label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hint: None,
            selection: None,
        }
    }

    /// Sets the hint text.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Sets the selected column range.
    pub fn with_selection(mut self, start: i32, len: i32) -> Self {
        self.selection = Some((start, len));
        self
    }
}

impl Widget for Label {
    fn type_name(&self) -> &'static str {
        "Label"
    }

    fn render(&self, ctx: &RenderContext<'_>, grid: &mut Grid, rect: Rect) {
        let alignment = ctx.alignment();
        if let (true, Some(hint)) = (self.text.is_empty(), &self.hint) {
            draw::draw_text(grid, rect, &ctx.hint_style(), alignment, hint);
            return;
        }
        match self.selection {
            Some((start, len)) => {
                let palette = ctx.palette();
                let highlight = Highlight {
                    start,
                    len,
                    fg: palette.selection_foreground,
                    bg: palette.selection_background,
                };
                draw::draw_highlighted_text(
                    grid,
                    rect,
                    &ctx.text_style(),
                    alignment,
                    &self.text,
                    &highlight,
                );
            }
            None => draw::draw_text(grid, rect, &ctx.text_style(), alignment, &self.text),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
