//! Cell grids, drawing primitives and frame diffing for `cellgrid`.
//!
//! This crate provides everything between a widget's `render` call and the
//! terminal writes of a frame:
//!
//! - [`Cell`] - One character position with two colors
//! - [`Grid`] - A row-major 2D array of cells
//! - [`draw`] - Clipped, anchored drawing primitives (text, cells, borders)
//! - [`DoubleBuffer`] - Front (desired) and back (written) grids
//! - [`diff`] - Change detection and run coalescing
//!
//! # Architecture
//!
//! Each frame works as follows:
//!
//! 1. **Compose into front**: clear the front grid and draw widgets into it
//!    with the functions in [`draw`].
//!
//! 2. **Diff**: [`DoubleBuffer::diff`] scans front against back (row-parallel
//!    for large grids) and returns the changed positions.
//!
//! 3. **Coalesce**: [`diff::coalesce`] sorts the positions and merges them
//!    into same-colored [`Run`]s.
//!
//! 4. **Commit**: after a run reaches the terminal,
//!    [`DoubleBuffer::commit_run`] copies it into the back grid.
//!
//! # Examples
//!
//! ```
//! use cellgrid_buffer::draw::{self, TextStyle};
//! use cellgrid_buffer::{diff, Cell, DoubleBuffer, Parallelism, RunPolicy};
//! use cellgrid_core::{Point, Rect, TextAlignment};
//!
//! let mut db = DoubleBuffer::new(3, 1, Cell::EMPTY, Parallelism::SEQUENTIAL).unwrap();
//! draw::draw_text(db.front_mut(), Rect::sized(3, 1), &TextStyle::default(), TextAlignment::TopLeft, "AB");
//!
//! let runs = diff::coalesce(db.front(), db.diff(), RunPolicy::RowBounded);
//! assert_eq!(runs.len(), 1);
//! assert_eq!(runs[0].start, Point::new(0, 0));
//! assert_eq!(runs[0].text, "AB");
//! ```

mod cell;
mod double_buffer;
mod grid;
mod parallel;

pub mod border;
pub mod diff;
pub mod draw;

pub use border::{BorderChars, BorderStyle, OpenSides};
pub use cell::Cell;
pub use diff::{Run, RunPolicy};
pub use double_buffer::DoubleBuffer;
pub use grid::Grid;
pub use parallel::Parallelism;
