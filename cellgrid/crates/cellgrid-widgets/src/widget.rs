//! Core widget trait and the contexts passed to it.
//!
//! A widget only knows how to draw itself into a clipped rectangle and how
//! to react to a key. Geometry, colors, visibility and children live on the
//! node that owns the widget inside a [`WidgetTree`](crate::WidgetTree);
//! the contexts below hand the resolved values to the widget.

use std::any::Any;

use cellgrid_buffer::draw::TextStyle;
use cellgrid_buffer::Grid;
use cellgrid_core::{Color, ColorChannel, Palette, Rect, TextAlignment};
use cellgrid_input::KeyEvent;

use crate::tree::{NodeId, WidgetTree};

/// The capability interface every widget implements.
///
/// The frame engine and container widgets depend only on this trait, never
/// on concrete widget types.
pub trait Widget: Any + Send {
    /// Returns a static string identifying the widget type.
    fn type_name(&self) -> &'static str;

    /// Draws the widget into `grid`.
    ///
    /// `rect` is already clipped to the parent and to the widget's own
    /// rectangle. Containers call [`RenderContext::render_children`].
    fn render(&self, ctx: &RenderContext<'_>, grid: &mut Grid, rect: Rect);

    /// Reacts to a key event.
    ///
    /// Called after every descendant has seen the key and before the node's
    /// key observers.
    fn on_key(&mut self, ctx: &KeyContext, key: &KeyEvent) {
        let _ = (ctx, key);
    }

    /// Casts this widget to `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Casts this widget to `Any` for mutable downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Resolved node state passed to [`Widget::render`].
pub struct RenderContext<'a> {
    pub(crate) tree: &'a WidgetTree,
    pub(crate) node: NodeId,
    pub(crate) bounds: Rect,
    pub(crate) palette: Palette,
    pub(crate) alignment: TextAlignment,
    pub(crate) transparent: bool,
    pub(crate) enabled: bool,
}

impl RenderContext<'_> {
    /// Returns the node being rendered.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the node's unclipped absolute rectangle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the node's effective colors.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Returns one effective color.
    pub fn color(&self, channel: ColorChannel) -> Color {
        self.palette.get(channel)
    }

    /// Returns the node's text alignment.
    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    /// Returns whether blank cells are skipped when drawing.
    pub fn transparent(&self) -> bool {
        self.transparent
    }

    /// Returns whether the node is effectively enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns a drawing style from the foreground/background pair.
    pub fn text_style(&self) -> TextStyle {
        TextStyle::new(self.palette.foreground, self.palette.background)
            .with_transparency(self.transparent)
    }

    /// Returns a drawing style from the hint color pair.
    pub fn hint_style(&self) -> TextStyle {
        TextStyle::new(self.palette.hint_foreground, self.palette.hint_background)
            .with_transparency(self.transparent)
    }

    /// Renders every visible child of this node.
    ///
    /// Each child's rectangle is taken relative to this node's bounds moved
    /// `inset` cells inward, then clipped to `rect` and to the inset area.
    pub fn render_children(&self, grid: &mut Grid, rect: Rect, inset: i32) {
        self.tree.render_children(self.node, self.bounds, grid, rect, inset);
    }
}

/// Resolved node state passed to [`Widget::on_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyContext {
    /// The node receiving the key.
    pub node: NodeId,
    /// The node's rectangle relative to its parent.
    pub rect: Rect,
    /// Whether the node is effectively visible.
    pub visible: bool,
    /// Whether the node is effectively enabled.
    pub enabled: bool,
}

/// A widget that draws nothing itself and renders its children.
///
/// Used for the root node of a [`WidgetTree`] and for plain grouping nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Group;

impl Widget for Group {
    fn type_name(&self) -> &'static str {
        "Group"
    }

    fn render(&self, ctx: &RenderContext<'_>, grid: &mut Grid, rect: Rect) {
        ctx.render_children(grid, rect, 0);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
