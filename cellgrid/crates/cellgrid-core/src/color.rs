//! The fixed console color palette.
//!
//! Every cell carries two [`Color`] values. The set is the 16-entry console
//! enumeration; the widget tree's color resolution and the terminal backends
//! agree on this ordering.
//!
//! # Examples
//!
//! ```
//! use cellgrid_core::color::Color;
//!
//! let cyan: Color = "dark_cyan".parse().unwrap();
//! assert_eq!(cyan, Color::DarkCyan);
//! assert_eq!(cyan.to_string(), "DarkCyan");
//! assert_eq!(Color::from_index(cyan.index()), Some(cyan));
//! ```

use crate::error::ColorParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the 16 named console colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    /// Black
    Black,
    /// Dark blue
    DarkBlue,
    /// Dark green
    DarkGreen,
    /// Dark cyan
    DarkCyan,
    /// Dark red
    DarkRed,
    /// Dark magenta
    DarkMagenta,
    /// Dark yellow
    DarkYellow,
    /// Gray
    Gray,
    /// Dark gray
    DarkGray,
    /// Blue
    Blue,
    /// Green
    Green,
    /// Cyan
    Cyan,
    /// Red
    Red,
    /// Magenta
    Magenta,
    /// Yellow
    Yellow,
    /// White
    White,
}

impl Color {
    /// All colors in palette order.
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkCyan,
        Self::DarkRed,
        Self::DarkMagenta,
        Self::DarkYellow,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Cyan,
        Self::Red,
        Self::Magenta,
        Self::Yellow,
        Self::White,
    ];

    /// Returns the palette index (0-15).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the color at the given palette index.
    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Returns the canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::DarkBlue => "DarkBlue",
            Self::DarkGreen => "DarkGreen",
            Self::DarkCyan => "DarkCyan",
            Self::DarkRed => "DarkRed",
            Self::DarkMagenta => "DarkMagenta",
            Self::DarkYellow => "DarkYellow",
            Self::Gray => "Gray",
            Self::DarkGray => "DarkGray",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Cyan => "Cyan",
            Self::Red => "Red",
            Self::Magenta => "Magenta",
            Self::Yellow => "Yellow",
            Self::White => "White",
        }
    }

    /// Looks up a color by name.
    ///
    /// Matching ignores case, `_`, `-` and spaces, and accepts the British
    /// spelling "grey".
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "black" => Some(Self::Black),
            "darkblue" => Some(Self::DarkBlue),
            "darkgreen" => Some(Self::DarkGreen),
            "darkcyan" => Some(Self::DarkCyan),
            "darkred" => Some(Self::DarkRed),
            "darkmagenta" => Some(Self::DarkMagenta),
            "darkyellow" => Some(Self::DarkYellow),
            "gray" | "grey" => Some(Self::Gray),
            "darkgray" | "darkgrey" => Some(Self::DarkGray),
            "blue" => Some(Self::Blue),
            "green" => Some(Self::Green),
            "cyan" => Some(Self::Cyan),
            "red" => Some(Self::Red),
            "magenta" => Some(Self::Magenta),
            "yellow" => Some(Self::Yellow),
            "white" => Some(Self::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ColorParseError::EmptyInput);
        }
        Self::from_name(trimmed).ok_or_else(|| ColorParseError::UnknownColor(trimmed.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
