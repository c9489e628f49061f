//! Terminal output for `cellgrid`.
//!
//! This crate turns a widget tree into terminal writes:
//! - [`TerminalBackend`] trait for the device operations the engine needs
//! - [`CrosstermBackend`] implementation using crossterm
//! - [`RecordingBackend`] in-memory fake that records every call
//! - [`FrameEngine`] for double-buffered, diffed and coalesced frames
//! - [`EngineConfig`] for palette, parallelism, run policy and frame rates
//! - [`Application`] for the poll, frame and pace loop
//!
//! # Example
//!
//! ```
//! use cellgrid_core::Rect;
//! use cellgrid_terminal::{EngineConfig, FrameEngine, RecordingBackend};
//! use cellgrid_widgets::{Label, WidgetTree};
//!
//! let mut tree = WidgetTree::new();
//! let root = tree.root();
//! tree.add_child_at(root, Rect::new(0, 0, 5, 1), Label::new("hi")).unwrap();
//!
//! let mut engine = FrameEngine::new(RecordingBackend::new(5, 1), EngineConfig::default()).unwrap();
//! let stats = engine.frame(&mut tree).unwrap();
//! assert_eq!(stats.runs, 1);
//! assert_eq!(engine.backend().screen_lines(), vec!["hi   ".to_string()]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]

mod application;
mod backend;
mod config;
mod engine;
mod pacer;
mod recording;

pub use application::{AppState, Application, ApplicationBuilder};
pub use backend::{CrosstermBackend, TerminalBackend};
pub use config::EngineConfig;
pub use engine::{FrameEngine, FrameStats, ResizeObserver};
pub use pacer::FramePacer;
pub use recording::{RecordingBackend, TerminalOp};

/// Re-export core types for convenience.
pub use cellgrid_core::{Color, Error, Palette, Point, Rect, Result};
