//! Cellgrid: a character-grid terminal UI engine.
//!
//! This crate re-exports the member crates:
//! - [`core`]: points, rectangles, the console color set and palettes
//! - [`buffer`]: cells, grids, drawing primitives and the diffing double buffer
//! - [`input`]: key events and non-blocking key sources
//! - [`widgets`]: the widget tree, cascading attributes and key dispatch
//! - [`terminal`]: terminal backends, the frame engine and the application loop
//!
//! # Example
//!
//! ```
//! use cellgrid::prelude::*;
//! use cellgrid::terminal::RecordingBackend;
//!
//! let mut tree = WidgetTree::new();
//! let root = tree.root();
//! let panel = tree
//!     .add_child_at(root, Rect::new(0, 0, 8, 3), Panel::new(BorderStyle::Line))
//!     .unwrap();
//! tree.add_child_at(panel, Rect::new(0, 0, 6, 1), Label::new("cells"))
//!     .unwrap();
//!
//! let mut engine = FrameEngine::new(RecordingBackend::new(8, 3), EngineConfig::default()).unwrap();
//! engine.frame(&mut tree).unwrap();
//! assert_eq!(engine.backend().screen_lines()[1], "│cells │");
//! ```

pub use cellgrid_buffer as buffer;
pub use cellgrid_core as core;
pub use cellgrid_input as input;
pub use cellgrid_terminal as terminal;
pub use cellgrid_widgets as widgets;

/// Commonly used types.
pub mod prelude {
    pub use cellgrid_buffer::{BorderStyle, Cell, Grid, OpenSides, RunPolicy};
    pub use cellgrid_core::{
        Color, ColorChannel, ColorSet, Palette, Point, Rect, TextAlignment,
    };
    pub use cellgrid_input::{InputSource, KeyCode, KeyEvent, KeyModifiers};
    pub use cellgrid_terminal::{Application, EngineConfig, FrameEngine, FrameStats};
    pub use cellgrid_widgets::{Label, NodeId, Panel, TextBlock, Widget, WidgetTree};
}
