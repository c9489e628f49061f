//! Border glyph sets and open-side merging.

use bitflags::bitflags;

/// Border style variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    /// Solid block border.
    /// ```text
    /// ▀▀▀▀▀
    /// █   █
    /// ▄▄▄▄▄
    /// ```
    Block,
    /// Single-line border using box-drawing characters.
    /// ```text
    /// ┌───┐
    /// │   │
    /// └───┘
    /// ```
    #[default]
    Line,
    /// Double-line border using box-drawing characters.
    /// ```text
    /// ╔═══╗
    /// ║   ║
    /// ╚═══╝
    /// ```
    DoubleLine,
    /// Custom border with user-defined characters.
    Custom(BorderChars),
}

impl BorderStyle {
    /// Returns the glyph set for this style.
    pub fn chars(&self) -> BorderChars {
        match self {
            Self::Block => BorderChars::BLOCK,
            Self::Line => BorderChars::LINE,
            Self::DoubleLine => BorderChars::DOUBLE_LINE,
            Self::Custom(chars) => *chars,
        }
    }
}

/// The 13 glyphs of a border: four edges, four corners, four T-junctions
/// and a cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    /// Top edge.
    pub top: char,
    /// Bottom edge.
    pub bottom: char,
    /// Left edge.
    pub left: char,
    /// Right edge.
    pub right: char,
    /// Top-left corner.
    pub top_left: char,
    /// Top-right corner.
    pub top_right: char,
    /// Bottom-left corner.
    pub bottom_left: char,
    /// Bottom-right corner.
    pub bottom_right: char,
    /// Junction on the left edge, open to the right (`├`).
    pub left_tee: char,
    /// Junction on the right edge, open to the left (`┤`).
    pub right_tee: char,
    /// Junction on the top edge, open downward (`┬`).
    pub top_tee: char,
    /// Junction on the bottom edge, open upward (`┴`).
    pub bottom_tee: char,
    /// Four-way junction.
    pub cross: char,
}

impl BorderChars {
    /// Solid block characters.
    pub const BLOCK: Self = Self::new([
        '▀', '▄', '█', '█', '█', '█', '█', '█', '█', '█', '█', '█', '█',
    ]);

    /// Single-line box-drawing characters.
    pub const LINE: Self = Self::new([
        '─', '─', '│', '│', '┌', '┐', '└', '┘', '├', '┤', '┬', '┴', '┼',
    ]);

    /// Double-line box-drawing characters.
    pub const DOUBLE_LINE: Self = Self::new([
        '═', '═', '║', '║', '╔', '╗', '╚', '╝', '╠', '╣', '╦', '╩', '╬',
    ]);

    /// Creates a glyph set from 13 characters in field order.
    ///
    /// ```text
    /// top bottom left right
    /// top_left top_right bottom_left bottom_right
    /// left_tee right_tee top_tee bottom_tee
    /// cross
    /// ```
    pub const fn new(glyphs: [char; 13]) -> Self {
        Self {
            top: glyphs[0],
            bottom: glyphs[1],
            left: glyphs[2],
            right: glyphs[3],
            top_left: glyphs[4],
            top_right: glyphs[5],
            bottom_left: glyphs[6],
            bottom_right: glyphs[7],
            left_tee: glyphs[8],
            right_tee: glyphs[9],
            top_tee: glyphs[10],
            bottom_tee: glyphs[11],
            cross: glyphs[12],
        }
    }

    /// Selects the glyph for offset `(x, y)` inside a `width` x `height`
    /// border. Interior cells yield a space.
    ///
    /// A corner whose vertical neighbor side is open becomes the tee of its
    /// own column, a corner whose horizontal neighbor side is open becomes
    /// the tee of its own row, and both open gives the cross.
    pub const fn glyph(&self, x: i32, y: i32, width: i32, height: i32, open: OpenSides) -> char {
        let first_col = x <= 0;
        let last_col = x + 1 >= width;
        let first_row = y <= 0;
        let last_row = y + 1 >= height;
        let top = open.contains(OpenSides::TOP);
        let bottom = open.contains(OpenSides::BOTTOM);
        let left = open.contains(OpenSides::LEFT);
        let right = open.contains(OpenSides::RIGHT);

        if first_col {
            if first_row {
                self.corner(top, left, self.left_tee, self.top_tee, self.top_left)
            } else if last_row {
                self.corner(bottom, left, self.left_tee, self.bottom_tee, self.bottom_left)
            } else {
                self.left
            }
        } else if last_col {
            if first_row {
                self.corner(top, right, self.right_tee, self.top_tee, self.top_right)
            } else if last_row {
                self.corner(bottom, right, self.right_tee, self.bottom_tee, self.bottom_right)
            } else {
                self.right
            }
        } else if first_row {
            self.top
        } else if last_row {
            self.bottom
        } else {
            ' '
        }
    }

    const fn corner(
        &self,
        vertical_open: bool,
        horizontal_open: bool,
        column_tee: char,
        row_tee: char,
        corner: char,
    ) -> char {
        match (vertical_open, horizontal_open) {
            (true, true) => self.cross,
            (true, false) => column_tee,
            (false, true) => row_tee,
            (false, false) => corner,
        }
    }
}

impl Default for BorderChars {
    fn default() -> Self {
        Self::LINE
    }
}

bitflags! {
    /// Border sides that merge with an adjoining shape.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OpenSides: u8 {
        /// Top edge is open.
        const TOP = 0b0001;
        /// Bottom edge is open.
        const BOTTOM = 0b0010;
        /// Left edge is open.
        const LEFT = 0b0100;
        /// Right edge is open.
        const RIGHT = 0b1000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const L: BorderChars = BorderChars::LINE;

    #[test]
    fn test_closed_corners() {
        let open = OpenSides::empty();
        assert_eq!(L.glyph(0, 0, 4, 3, open), '┌');
        assert_eq!(L.glyph(3, 0, 4, 3, open), '┐');
        assert_eq!(L.glyph(0, 2, 4, 3, open), '└');
        assert_eq!(L.glyph(3, 2, 4, 3, open), '┘');
    }

    #[test]
    fn test_edges_and_interior() {
        let open = OpenSides::all();
        assert_eq!(L.glyph(1, 0, 4, 3, open), '─');
        assert_eq!(L.glyph(1, 2, 4, 3, open), '─');
        assert_eq!(L.glyph(0, 1, 4, 3, open), '│');
        assert_eq!(L.glyph(3, 1, 4, 3, open), '│');
        assert_eq!(L.glyph(1, 1, 4, 3, open), ' ');
    }

    #[test]
    fn test_top_left_open_variants() {
        assert_eq!(L.glyph(0, 0, 4, 3, OpenSides::TOP | OpenSides::LEFT), '┼');
        assert_eq!(L.glyph(0, 0, 4, 3, OpenSides::TOP), '├');
        assert_eq!(L.glyph(0, 0, 4, 3, OpenSides::LEFT), '┬');
        assert_eq!(L.glyph(0, 0, 4, 3, OpenSides::BOTTOM | OpenSides::RIGHT), '┌');
    }

    #[test]
    fn test_other_corners_open() {
        assert_eq!(L.glyph(3, 0, 4, 3, OpenSides::TOP), '┤');
        assert_eq!(L.glyph(3, 0, 4, 3, OpenSides::RIGHT), '┬');
        assert_eq!(L.glyph(0, 2, 4, 3, OpenSides::BOTTOM), '├');
        assert_eq!(L.glyph(0, 2, 4, 3, OpenSides::LEFT), '┴');
        assert_eq!(L.glyph(3, 2, 4, 3, OpenSides::BOTTOM | OpenSides::RIGHT), '┼');
    }

    #[test]
    fn test_single_row_uses_top_corners() {
        assert_eq!(L.glyph(0, 0, 3, 1, OpenSides::empty()), '┌');
        assert_eq!(L.glyph(1, 0, 3, 1, OpenSides::empty()), '─');
    }

    #[test]
    fn test_style_presets() {
        assert_eq!(BorderStyle::DoubleLine.chars().cross, '╬');
        assert_eq!(BorderStyle::Block.chars().top, '▀');
        assert_eq!(BorderStyle::default().chars(), BorderChars::LINE);
        let custom = BorderChars::new(['*'; 13]);
        assert_eq!(BorderStyle::Custom(custom).chars().bottom_tee, '*');
    }
}
