//! Widget tree for `cellgrid`.
//!
//! This crate provides the composition layer between the drawing primitives
//! and the frame engine:
//!
//! - [`Widget`] - The capability interface: `render` and `on_key`
//! - [`WidgetTree`] - Slotmap arena of nodes with cascading colors,
//!   visibility and enabled state, plus depth-first key dispatch
//! - [`Panel`], [`Label`], [`TextBlock`] - Small widgets built only on the
//!   drawing primitives and the tree contract
//!
//! # Example
//!
//! ```
//! use cellgrid_buffer::{BorderStyle, Cell, Grid};
//! use cellgrid_core::Rect;
//! use cellgrid_widgets::{Label, Panel, WidgetTree};
//!
//! let mut tree = WidgetTree::new();
//! let panel = tree
//!     .add_child_at(tree.root(), Rect::new(0, 0, 7, 3), Panel::new(BorderStyle::Line))
//!     .unwrap();
//! tree.add_child_at(panel, Rect::new(0, 0, 5, 1), Label::new("hello")).unwrap();
//!
//! let mut grid = Grid::try_new(7, 3, Cell::EMPTY).unwrap();
//! tree.render(&mut grid, Rect::sized(7, 3));
//! assert_eq!(grid.to_lines()[1], "│hello│");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

mod label;
mod panel;
mod text_block;
mod tree;
mod widget;

pub use label::Label;
pub use panel::Panel;
pub use text_block::{Content, TextBlock};
pub use tree::{KeyObserver, NodeId, TreeError, TreeResult, WidgetTree};
pub use widget::{Group, KeyContext, RenderContext, Widget};
