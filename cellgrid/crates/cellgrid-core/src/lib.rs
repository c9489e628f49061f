//! Core types for `cellgrid`.
//!
//! This crate provides the leaf building blocks shared by every other crate:
//!
//! - [`geometry`]: integer points and rectangles with clipping math
//! - [`color`]: the fixed 16-color console palette
//! - [`style`]: color channels, optional overrides and resolved palettes
//! - [`alignment`]: the nine text anchors
//! - [`error`]: error types for the engine
//!
//! # Examples
//!
//! ```
//! use cellgrid_core::geometry::{Point, Rect};
//!
//! let screen = Rect::sized(80, 24);
//! let widget = Rect::new(70, 20, 20, 10);
//!
//! // Every write is clipped to the overlap
//! let clip = screen.intersect(widget);
//! assert_eq!(clip, Rect::new(70, 20, 10, 4));
//! assert!(clip.contains(Point::new(79, 23)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]

pub mod alignment;
pub mod color;
pub mod error;
pub mod geometry;
pub mod style;

// Re-export commonly used types at the crate root for convenience
pub use alignment::{HAlign, TextAlignment, VAlign};
pub use color::Color;
pub use error::{ColorParseError, Error, Result};
pub use geometry::{Point, Rect};
pub use style::{ColorChannel, ColorSet, Palette};
