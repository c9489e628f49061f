//! Widget tree management.
//!
//! [`WidgetTree`] owns every widget in a slotmap arena. Parents own their
//! children through an ordered child list; children keep a plain
//! [`NodeId`] back to their parent, used only to resolve cascading
//! attributes. The tree always has a root node standing for the terminal
//! window, and top-level widgets are children of that root.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::trace;

use cellgrid_buffer::Grid;
use cellgrid_core::{Color, ColorChannel, ColorSet, Palette, Rect, TextAlignment};
use cellgrid_input::KeyEvent;

use crate::widget::{Group, KeyContext, RenderContext, Widget};

new_key_type! {
    /// A key identifying a node in the widget tree.
    pub struct NodeId;
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors that can occur during tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The specified node was not found in the tree.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
    /// The operation would make a node its own ancestor.
    #[error("circular reference detected")]
    CircularReference,
    /// The root node cannot be removed or reparented.
    #[error("the root node cannot be removed or reparented")]
    RootImmutable,
}

/// Observer called with every key event delivered to a node.
pub type KeyObserver = Box<dyn FnMut(&KeyEvent) + Send>;

struct Node {
    widget: Box<dyn Widget>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    /// Position relative to the parent's content area, and size.
    rect: Rect,
    colors: ColorSet,
    visible: bool,
    enabled: bool,
    alignment: TextAlignment,
    transparent: bool,
    observers: Vec<KeyObserver>,
}

impl Node {
    fn new(widget: Box<dyn Widget>, parent: Option<NodeId>, rect: Rect) -> Self {
        Self {
            widget,
            parent,
            children: SmallVec::new(),
            rect,
            colors: ColorSet::new(),
            visible: true,
            enabled: true,
            alignment: TextAlignment::default(),
            transparent: false,
            observers: Vec::new(),
        }
    }
}

/// A tree of widgets with cascading colors, visibility and enabled state.
///
/// # Examples
///
/// ```
/// use cellgrid_core::{Color, ColorChannel, Rect};
/// use cellgrid_widgets::{Label, WidgetTree};
///
/// let mut tree = WidgetTree::new();
/// let root = tree.root();
/// let label = tree.add_child_at(root, Rect::new(0, 0, 10, 1), Label::new("hello")).unwrap();
///
/// tree.colors_mut(root).unwrap().set(ColorChannel::Foreground, Color::Yellow);
/// assert_eq!(tree.effective_color(label, ColorChannel::Foreground), Color::Yellow);
/// ```
pub struct WidgetTree {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    /// Global default colors, used where no ancestor overrides a channel.
    defaults: Palette,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl WidgetTree {
    /// Creates a tree holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(Palette::DEFAULT)
    }

    /// Creates a tree whose colors fall back to `defaults`.
    #[must_use]
    pub fn with_defaults(defaults: Palette) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(Box::new(Group), None, Rect::ZERO));
        Self {
            nodes,
            root,
            defaults,
        }
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the global default colors.
    #[must_use]
    pub fn defaults(&self) -> &Palette {
        &self.defaults
    }

    /// Replaces the global default colors.
    pub fn set_defaults(&mut self, defaults: Palette) {
        self.defaults = defaults;
    }

    /// Returns the number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if only the root node exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Returns true if `node` is in the tree.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Adds `widget` as the last (topmost) child of `parent`.
    pub fn add_child<W: Widget>(&mut self, parent: NodeId, widget: W) -> TreeResult<NodeId> {
        self.add_child_at(parent, Rect::ZERO, widget)
    }

    /// Adds `widget` as the last child of `parent` with the given rectangle.
    pub fn add_child_at<W: Widget>(
        &mut self,
        parent: NodeId,
        rect: Rect,
        widget: W,
    ) -> TreeResult<NodeId> {
        self.add_boxed(parent, rect, Box::new(widget))
    }

    /// Adds an already boxed widget as the last child of `parent`.
    pub fn add_boxed(
        &mut self,
        parent: NodeId,
        rect: Rect,
        widget: Box<dyn Widget>,
    ) -> TreeResult<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::NodeNotFound(parent));
        }
        let kind = widget.type_name();
        let id = self.nodes.insert(Node::new(widget, Some(parent), rect));
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(id);
        }
        trace!(node = ?id, ?parent, kind, "added widget");
        Ok(id)
    }

    /// Removes `node` and its whole subtree.
    pub fn remove_child(&mut self, node: NodeId) -> TreeResult<()> {
        if node == self.root {
            return Err(TreeError::RootImmutable);
        }
        let parent = self.node(node)?.parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != node);
        }

        let mut to_remove = vec![node];
        let mut i = 0;
        while i < to_remove.len() {
            if let Some(current) = self.nodes.get(to_remove[i]) {
                to_remove.extend(current.children.iter().copied());
            }
            i += 1;
        }
        for id in to_remove.iter().rev() {
            self.nodes.remove(*id);
        }
        trace!(?node, removed = to_remove.len(), "removed subtree");
        Ok(())
    }

    /// Moves `node` to the end of `new_parent`'s children.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> TreeResult<()> {
        if node == self.root {
            return Err(TreeError::RootImmutable);
        }
        self.node(node)?;
        self.node(new_parent)?;
        if self.is_ancestor_or_self(node, new_parent) {
            return Err(TreeError::CircularReference);
        }
        if let Some(old) = self.nodes[node].parent {
            if let Some(old) = self.nodes.get_mut(old) {
                old.children.retain(|c| *c != node);
            }
        }
        self.nodes[new_parent].children.push(node);
        self.nodes[node].parent = Some(new_parent);
        Ok(())
    }

    /// Moves `node` to the end of its parent's child list, making it the
    /// topmost sibling.
    pub fn bring_to_front(&mut self, node: NodeId) -> TreeResult<()> {
        let parent = self.node(node)?.parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != node);
            parent.children.push(node);
        }
        Ok(())
    }

    /// Returns true if `ancestor` is `node` or one of its ancestors.
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Returns the children of `node`, bottom to top.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node).map_or(&[], |n| n.children.as_slice())
    }

    /// Returns the parent of `node`.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    fn node(&self, node: NodeId) -> TreeResult<&Node> {
        self.nodes.get(node).ok_or(TreeError::NodeNotFound(node))
    }

    fn node_mut(&mut self, node: NodeId) -> TreeResult<&mut Node> {
        self.nodes.get_mut(node).ok_or(TreeError::NodeNotFound(node))
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Returns the rectangle of `node`, relative to its parent.
    #[must_use]
    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(node).map(|n| n.rect)
    }

    /// Sets the rectangle of `node`, relative to its parent.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) -> TreeResult<()> {
        self.node_mut(node)?.rect = rect;
        Ok(())
    }

    /// Returns the color overrides of `node`.
    #[must_use]
    pub fn colors(&self, node: NodeId) -> Option<&ColorSet> {
        self.nodes.get(node).map(|n| &n.colors)
    }

    /// Returns the color overrides of `node` for editing.
    pub fn colors_mut(&mut self, node: NodeId) -> Option<&mut ColorSet> {
        self.nodes.get_mut(node).map(|n| &mut n.colors)
    }

    /// Returns the own visibility flag of `node`.
    #[must_use]
    pub fn visible(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.visible)
    }

    /// Sets the own visibility flag of `node`.
    pub fn set_visible(&mut self, node: NodeId, visible: bool) -> TreeResult<()> {
        self.node_mut(node)?.visible = visible;
        Ok(())
    }

    /// Returns the own enabled flag of `node`.
    #[must_use]
    pub fn enabled(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.enabled)
    }

    /// Sets the own enabled flag of `node`.
    pub fn set_enabled(&mut self, node: NodeId, enabled: bool) -> TreeResult<()> {
        self.node_mut(node)?.enabled = enabled;
        Ok(())
    }

    /// Returns the text alignment of `node`.
    #[must_use]
    pub fn alignment(&self, node: NodeId) -> Option<TextAlignment> {
        self.nodes.get(node).map(|n| n.alignment)
    }

    /// Sets the text alignment of `node`.
    pub fn set_alignment(&mut self, node: NodeId, alignment: TextAlignment) -> TreeResult<()> {
        self.node_mut(node)?.alignment = alignment;
        Ok(())
    }

    /// Returns whether `node` skips blank cells when drawing.
    #[must_use]
    pub fn transparent(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.transparent)
    }

    /// Sets whether `node` skips blank cells when drawing.
    pub fn set_transparent(&mut self, node: NodeId, transparent: bool) -> TreeResult<()> {
        self.node_mut(node)?.transparent = transparent;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cascading attributes
    // ------------------------------------------------------------------

    /// Returns the nearest override of `channel` on `node` or its
    /// ancestors, else the global default.
    #[must_use]
    pub fn effective_color(&self, node: NodeId, channel: ColorChannel) -> Color {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.nodes.get(id) else {
                break;
            };
            if let Some(color) = n.colors.get(channel) {
                return color;
            }
            current = n.parent;
        }
        self.defaults.get(channel)
    }

    /// Returns all six effective colors of `node`.
    #[must_use]
    pub fn effective_colors(&self, node: NodeId) -> Palette {
        let mut palette = self.defaults;
        for channel in ColorChannel::ALL {
            palette.set(channel, self.effective_color(node, channel));
        }
        palette
    }

    /// Returns true if `node` and every ancestor are visible.
    #[must_use]
    pub fn effective_visible(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        let mut seen = false;
        while let Some(id) = current {
            let Some(n) = self.nodes.get(id) else {
                return false;
            };
            if !n.visible {
                return false;
            }
            seen = true;
            current = n.parent;
        }
        seen
    }

    /// Returns true if `node` and every ancestor are both visible and
    /// enabled.
    #[must_use]
    pub fn effective_enabled(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        let mut seen = false;
        while let Some(id) = current {
            let Some(n) = self.nodes.get(id) else {
                return false;
            };
            if !n.visible || !n.enabled {
                return false;
            }
            seen = true;
            current = n.parent;
        }
        seen
    }

    // ------------------------------------------------------------------
    // Typed access
    // ------------------------------------------------------------------

    /// Returns the widget of `node` if it has type `T`.
    #[must_use]
    pub fn widget<T: Widget>(&self, node: NodeId) -> Option<&T> {
        self.nodes
            .get(node)
            .and_then(|n| n.widget.as_any().downcast_ref::<T>())
    }

    /// Returns the widget of `node` for editing if it has type `T`.
    pub fn widget_mut<T: Widget>(&mut self, node: NodeId) -> Option<&mut T> {
        self.nodes
            .get_mut(node)
            .and_then(|n| n.widget.as_any_mut().downcast_mut::<T>())
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Renders the whole tree into `grid`, with the root covering `window`.
    pub fn render(&self, grid: &mut Grid, window: Rect) {
        if !self.effective_visible(self.root) {
            return;
        }
        let clipped = grid.bounds().intersect(window);
        self.render_node(self.root, grid, clipped, window.normalized());
    }

    fn render_node(&self, id: NodeId, grid: &mut Grid, rect: Rect, bounds: Rect) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let ctx = RenderContext {
            tree: self,
            node: id,
            bounds,
            palette: self.effective_colors(id),
            alignment: node.alignment,
            transparent: node.transparent,
            enabled: self.effective_enabled(id),
        };
        node.widget.render(&ctx, grid, rect);
    }

    pub(crate) fn render_children(
        &self,
        parent: NodeId,
        bounds: Rect,
        grid: &mut Grid,
        rect: Rect,
        inset: i32,
    ) {
        let inner = bounds.inset(inset);
        let area = rect.intersect(inner);
        if area.is_empty() {
            return;
        }
        for &child in self.children(parent) {
            let Some(node) = self.nodes.get(child) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            let child_bounds =
                Rect::from_parts(inner.position + node.rect.position, node.rect.size).normalized();
            let clipped = area.intersect(child_bounds);
            if clipped.is_empty() {
                continue;
            }
            self.render_node(child, grid, clipped, child_bounds);
        }
    }

    // ------------------------------------------------------------------
    // Key dispatch
    // ------------------------------------------------------------------

    /// Subscribes `observer` to every key delivered to `node`.
    pub fn on_key<F>(&mut self, node: NodeId, observer: F) -> TreeResult<()>
    where
        F: FnMut(&KeyEvent) + Send + 'static,
    {
        self.node_mut(node)?.observers.push(Box::new(observer));
        Ok(())
    }

    /// Delivers `key` to every node.
    ///
    /// Children are visited topmost first (reverse insertion order), depth
    /// first, before their parent's widget handler, and the parent's
    /// observers run last. Every node sees the key; there is no consumption.
    pub fn dispatch_key(&mut self, key: &KeyEvent) {
        self.dispatch_node(self.root, key);
    }

    fn dispatch_node(&mut self, id: NodeId, key: &KeyEvent) {
        let children = match self.nodes.get(id) {
            Some(node) => node.children.clone(),
            None => return,
        };
        for child in children.iter().rev() {
            self.dispatch_node(*child, key);
        }

        let ctx = KeyContext {
            node: id,
            rect: self.nodes[id].rect,
            visible: self.effective_visible(id),
            enabled: self.effective_enabled(id),
        };
        let node = &mut self.nodes[id];
        node.widget.on_key(&ctx, key);
        for observer in &mut node.observers {
            observer(key);
        }
    }
}
