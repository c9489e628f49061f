//! # `cellgrid` Input
//!
//! Keyboard events and non-blocking key sources.
//!
//! - **Keyboard**: [`KeyEvent`] pairs a [`KeyCode`] with [`KeyModifiers`] and
//!   converts from crossterm key events.
//! - **Sources**: [`InputSource`] yields at most one key per call and never
//!   blocks. [`CrosstermInput`] reads the terminal, [`QueueInput`] replays a
//!   fixed sequence.
//!
//! ## Example
//!
//! ```
//! use cellgrid_input::{InputSource, KeyCode, KeyEvent, QueueInput};
//!
//! let mut input: QueueInput = [KeyEvent::char('q')].into_iter().collect();
//! let key = input.poll_key().unwrap().unwrap();
//! assert_eq!(key.code, KeyCode::Char('q'));
//! assert!(input.poll_key().unwrap().is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

pub mod keyboard;
pub mod source;

pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use source::{CrosstermInput, InputSource, QueueInput};
