//! Color channels, optional overrides and resolved palettes.
//!
//! A widget node stores a [`ColorSet`] where every channel may be unset.
//! Resolution walks toward the root and finally falls back to a [`Palette`],
//! which always carries a concrete color for every channel.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// One of the six color roles a node can override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorChannel {
    /// Text color.
    Foreground,
    /// Fill color.
    Background,
    /// Text color for hint content.
    HintForeground,
    /// Fill color for hint content.
    HintBackground,
    /// Text color for selected content.
    SelectionForeground,
    /// Fill color for selected content.
    SelectionBackground,
}

impl ColorChannel {
    /// All channels in storage order.
    pub const ALL: [Self; 6] = [
        Self::Foreground,
        Self::Background,
        Self::HintForeground,
        Self::HintBackground,
        Self::SelectionForeground,
        Self::SelectionBackground,
    ];

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }
}

/// Six optional color overrides. `None` means "inherit".
///
/// # Examples
///
/// ```
/// use cellgrid_core::{Color, ColorChannel, ColorSet, Palette};
///
/// let mut set = ColorSet::new();
/// set.set(ColorChannel::Foreground, Color::Yellow);
///
/// let resolved = set.resolve(&Palette::default());
/// assert_eq!(resolved.foreground, Color::Yellow);
/// assert_eq!(resolved.background, Color::Black);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorSet {
    slots: [Option<Color>; 6],
}

impl ColorSet {
    /// Creates a set with every channel unset.
    #[inline]
    pub const fn new() -> Self {
        Self { slots: [None; 6] }
    }

    /// Returns the override for a channel.
    #[inline]
    pub fn get(&self, channel: ColorChannel) -> Option<Color> {
        self.slots[channel.slot()]
    }

    /// Sets the override for a channel.
    #[inline]
    pub fn set(&mut self, channel: ColorChannel, color: Color) {
        self.slots[channel.slot()] = Some(color);
    }

    /// Clears the override for a channel.
    #[inline]
    pub fn clear(&mut self, channel: ColorChannel) {
        self.slots[channel.slot()] = None;
    }

    /// Builder-style variant of [`ColorSet::set`].
    #[inline]
    pub fn with(mut self, channel: ColorChannel, color: Color) -> Self {
        self.set(channel, color);
        self
    }

    /// Returns whether no channel is overridden.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Fills unset channels from `fallback`.
    pub fn resolve(&self, fallback: &Palette) -> Palette {
        let mut out = *fallback;
        for channel in ColorChannel::ALL {
            if let Some(color) = self.get(channel) {
                out.set(channel, color);
            }
        }
        out
    }
}

/// A fully resolved set of six colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Text color.
    pub foreground: Color,
    /// Fill color.
    pub background: Color,
    /// Hint text color.
    pub hint_foreground: Color,
    /// Hint fill color.
    pub hint_background: Color,
    /// Selection text color.
    pub selection_foreground: Color,
    /// Selection fill color.
    pub selection_background: Color,
}

impl Palette {
    /// The global default colors.
    pub const DEFAULT: Self = Self {
        foreground: Color::White,
        background: Color::Black,
        hint_foreground: Color::Gray,
        hint_background: Color::Black,
        selection_foreground: Color::Black,
        selection_background: Color::White,
    };

    /// Returns the color for a channel.
    pub const fn get(&self, channel: ColorChannel) -> Color {
        match channel {
            ColorChannel::Foreground => self.foreground,
            ColorChannel::Background => self.background,
            ColorChannel::HintForeground => self.hint_foreground,
            ColorChannel::HintBackground => self.hint_background,
            ColorChannel::SelectionForeground => self.selection_foreground,
            ColorChannel::SelectionBackground => self.selection_background,
        }
    }

    /// Replaces the color for a channel.
    pub fn set(&mut self, channel: ColorChannel, color: Color) {
        let slot = match channel {
            ColorChannel::Foreground => &mut self.foreground,
            ColorChannel::Background => &mut self.background,
            ColorChannel::HintForeground => &mut self.hint_foreground,
            ColorChannel::HintBackground => &mut self.hint_background,
            ColorChannel::SelectionForeground => &mut self.selection_foreground,
            ColorChannel::SelectionBackground => &mut self.selection_background,
        };
        *slot = color;
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}
