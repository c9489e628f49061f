//! Terminal cell representation.
//!
//! A [`Cell`] is the visible state of one character position: a character
//! and two palette colors. Cells are plain values and have no identity.

use cellgrid_core::{Color, Palette};

/// A single cell in a grid.
///
/// Equality and ordering compare `character`, then `fg`, then `bg`.
///
/// Control characters (newline included) are stored as a space so that
/// every cell occupies exactly one terminal column.
///
/// # Examples
///
/// ```
/// use cellgrid_buffer::Cell;
/// use cellgrid_core::Color;
///
/// let cell = Cell::new('A', Color::Yellow, Color::DarkBlue);
/// assert!(Cell::EMPTY < cell);
/// assert_eq!(cell.with_char(' ').fg, Color::Yellow);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// The character displayed in this cell.
    pub character: char,

    /// Foreground (text) color.
    pub fg: Color,

    /// Background color.
    pub bg: Color,
}

impl Cell {
    /// A space in the global default colors.
    pub const EMPTY: Self = Self::blank(&Palette::DEFAULT);

    /// Creates a cell.
    #[inline]
    pub const fn new(character: char, fg: Color, bg: Color) -> Self {
        Self {
            character: printable(character),
            fg,
            bg,
        }
    }

    /// Creates a space using the foreground and background of `palette`.
    #[inline]
    pub const fn blank(palette: &Palette) -> Self {
        Self::new(' ', palette.foreground, palette.background)
    }

    /// Returns whether this cell shows no glyph.
    #[inline]
    pub const fn is_blank(&self) -> bool {
        self.character == ' '
    }

    /// Returns this cell with a different character.
    #[inline]
    #[must_use]
    pub const fn with_char(mut self, character: char) -> Self {
        self.character = printable(character);
        self
    }

    /// Returns this cell with a control character replaced by a space.
    #[inline]
    #[must_use]
    pub const fn sanitized(self) -> Self {
        self.with_char(self.character)
    }

    /// Returns this cell with a different foreground.
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Returns this cell with a different background.
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    /// Returns whether both cells use the same color pair.
    #[inline]
    pub fn same_colors(&self, other: &Self) -> bool {
        self.fg == other.fg && self.bg == other.bg
    }
}

/// Maps C0, DEL and C1 control characters to a space.
const fn printable(character: char) -> char {
    match character {
        '\u{0}'..='\u{1f}' | '\u{7f}'..='\u{9f}' => ' ',
        _ => character,
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell() {
        assert_eq!(Cell::EMPTY.character, ' ');
        assert_eq!(Cell::EMPTY.fg, Color::White);
        assert_eq!(Cell::EMPTY.bg, Color::Black);
        assert_eq!(Cell::default(), Cell::EMPTY);
        assert!(Cell::EMPTY.is_blank());
    }

    #[test]
    fn test_lexicographic_order() {
        let a = Cell::new('a', Color::White, Color::Black);
        let b = Cell::new('b', Color::Black, Color::Black);
        assert!(a < b);

        let dark = Cell::new('a', Color::DarkRed, Color::White);
        let light = Cell::new('a', Color::Red, Color::Black);
        assert!(dark < light);

        let bg_low = Cell::new('a', Color::Red, Color::Black);
        let bg_high = Cell::new('a', Color::Red, Color::Blue);
        assert!(bg_low < bg_high);
    }

    #[test]
    fn test_blank_from_palette() {
        let palette = Palette {
            background: Color::DarkBlue,
            ..Palette::DEFAULT
        };
        let cell = Cell::blank(&palette);
        assert_eq!(cell, Cell::new(' ', Color::White, Color::DarkBlue));
        assert_ne!(cell, Cell::EMPTY);
    }

    #[test]
    fn test_control_characters_become_spaces() {
        for ch in ['\n', '\r', '\t', '\u{1b}', '\u{7f}', '\u{85}'] {
            assert!(ch.is_control());
            assert_eq!(Cell::new(ch, Color::White, Color::Black).character, ' ');
            assert_eq!(Cell::EMPTY.with_char('x').with_char(ch).character, ' ');
        }
        let raw = Cell {
            character: '\n',
            fg: Color::Red,
            bg: Color::Black,
        };
        assert_eq!(raw.sanitized(), Cell::new(' ', Color::Red, Color::Black));
        assert_eq!(Cell::new('é', Color::White, Color::Black).character, 'é');
    }

    #[test]
    fn test_same_colors() {
        let a = Cell::new('x', Color::Green, Color::Black);
        assert!(a.same_colors(&a.with_char('y')));
        assert!(!a.same_colors(&a.with_bg(Color::Gray)));
    }
}
