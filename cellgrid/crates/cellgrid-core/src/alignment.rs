//! Text anchoring within a rectangle.

use serde::{Deserialize, Serialize};

/// Horizontal part of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HAlign {
    /// Flush with the left edge.
    Left,
    /// Centered, rounding toward the left.
    Center,
    /// Flush with the right edge.
    Right,
}

/// Vertical part of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VAlign {
    /// First row.
    Top,
    /// Middle row, rounding toward the top.
    Center,
    /// Last row.
    Bottom,
}

/// One of the nine anchors `{Top, Center, Bottom} x {Left, Center, Right}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextAlignment {
    /// Top row, left edge.
    #[default]
    TopLeft,
    /// Top row, centered.
    Top,
    /// Top row, right edge.
    TopRight,
    /// Middle row, left edge.
    Left,
    /// Middle row, centered.
    Center,
    /// Middle row, right edge.
    Right,
    /// Bottom row, left edge.
    BottomLeft,
    /// Bottom row, centered.
    Bottom,
    /// Bottom row, right edge.
    BottomRight,
}

impl TextAlignment {
    /// Combines a horizontal and vertical anchor.
    pub const fn from_parts(horizontal: HAlign, vertical: VAlign) -> Self {
        match (vertical, horizontal) {
            (VAlign::Top, HAlign::Left) => Self::TopLeft,
            (VAlign::Top, HAlign::Center) => Self::Top,
            (VAlign::Top, HAlign::Right) => Self::TopRight,
            (VAlign::Center, HAlign::Left) => Self::Left,
            (VAlign::Center, HAlign::Center) => Self::Center,
            (VAlign::Center, HAlign::Right) => Self::Right,
            (VAlign::Bottom, HAlign::Left) => Self::BottomLeft,
            (VAlign::Bottom, HAlign::Center) => Self::Bottom,
            (VAlign::Bottom, HAlign::Right) => Self::BottomRight,
        }
    }

    /// Returns the horizontal component.
    pub const fn horizontal(self) -> HAlign {
        match self {
            Self::TopLeft | Self::Left | Self::BottomLeft => HAlign::Left,
            Self::Top | Self::Center | Self::Bottom => HAlign::Center,
            Self::TopRight | Self::Right | Self::BottomRight => HAlign::Right,
        }
    }

    /// Returns the vertical component.
    pub const fn vertical(self) -> VAlign {
        match self {
            Self::TopLeft | Self::Top | Self::TopRight => VAlign::Top,
            Self::Left | Self::Center | Self::Right => VAlign::Center,
            Self::BottomLeft | Self::Bottom | Self::BottomRight => VAlign::Bottom,
        }
    }
}

impl HAlign {
    /// Maps a column inside a span of `width` cells to an index into content
    /// of `len` items. The result may fall outside `0..len`.
    #[inline]
    pub const fn source_index(self, column: i32, width: i32, len: i32) -> i32 {
        match self {
            Self::Left => column,
            Self::Center => column - (width - len) / 2,
            Self::Right => column - (width - len),
        }
    }
}

impl VAlign {
    /// Returns the single row used by one-line content in a span of `height` rows.
    #[inline]
    pub const fn active_row(self, height: i32) -> i32 {
        match self {
            Self::Top => 0,
            Self::Center => height / 2,
            Self::Bottom => height - 1,
        }
    }

    /// Maps a row inside a span of `height` rows to an index into `count` lines.
    #[inline]
    pub const fn source_index(self, row: i32, height: i32, count: i32) -> i32 {
        match self {
            Self::Top => row,
            Self::Center => row - (height - count) / 2,
            Self::Bottom => row - (height - count),
        }
    }
}
