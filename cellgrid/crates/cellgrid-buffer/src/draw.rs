//! Drawing primitives.
//!
//! Every primitive takes a destination rectangle, normalizes it, clips it to
//! the grid and then computes each visible cell from its offset relative to
//! the destination's top-left corner. Content that does not reach a cell
//! (off the active row, outside the string) renders as a blank cell in the
//! base colors, or leaves the grid untouched when the style is transparent.
//!
//! Rows are independent, so large regions are painted row-parallel according
//! to the grid's [`Parallelism`](crate::Parallelism).
//!
//! # Examples
//!
//! ```
//! use cellgrid_buffer::draw::{self, TextStyle};
//! use cellgrid_buffer::{Cell, Grid};
//! use cellgrid_core::{Color, Rect, TextAlignment};
//!
//! let mut grid = Grid::try_new(10, 1, Cell::EMPTY).unwrap();
//! let style = TextStyle::new(Color::White, Color::Black);
//! draw::draw_text(&mut grid, Rect::sized(10, 1), &style, TextAlignment::Right, "HI");
//! assert_eq!(grid.to_lines(), vec!["        HI"]);
//! ```

use cellgrid_core::{Color, Palette, Point, Rect, TextAlignment};

use crate::border::{BorderChars, OpenSides};
use crate::{Cell, Grid};

/// Base colors and transparency for a drawing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Text color.
    pub fg: Color,
    /// Fill color.
    pub bg: Color,
    /// Skip blank cells instead of writing them.
    pub transparent: bool,
}

impl TextStyle {
    /// Creates an opaque style.
    #[inline]
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            transparent: false,
        }
    }

    /// Creates an opaque style from a palette's foreground and background.
    #[inline]
    pub const fn from_palette(palette: &Palette) -> Self {
        Self::new(palette.foreground, palette.background)
    }

    /// Sets transparency.
    #[inline]
    pub const fn with_transparency(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    #[inline]
    const fn cell(&self, character: char) -> Cell {
        Cell::new(character, self.fg, self.bg)
    }

    #[inline]
    const fn blank(&self) -> Cell {
        self.cell(' ')
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::DEFAULT)
    }
}

/// A highlighted column range for [`draw_highlighted_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    /// First highlighted column, relative to the destination.
    pub start: i32,
    /// Number of highlighted columns.
    pub len: i32,
    /// Highlight text color.
    pub fg: Color,
    /// Highlight fill color.
    pub bg: Color,
}

impl Highlight {
    #[inline]
    fn covers(&self, column: i32) -> bool {
        column >= self.start && column < self.start.saturating_add(self.len)
    }
}

#[inline]
fn len_i32(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

#[inline]
fn lookup<T: Copy>(items: &[T], index: i32) -> Option<T> {
    usize::try_from(index).ok().and_then(|i| items.get(i).copied())
}

/// Writes `source(dx, dy)` into every visible cell of `rect`, where
/// `(dx, dy)` is the offset from the normalized rectangle's top-left corner.
fn paint<F>(grid: &mut Grid, rect: Rect, transparent: bool, source: F)
where
    F: Fn(i32, i32) -> Cell + Sync,
{
    let dest = rect.normalized();
    let clip = grid.bounds().intersect(dest);
    if clip.is_empty() {
        return;
    }
    let Point { x: left, .. } = clip.top_left();
    let Point { x: right, .. } = clip.bottom_right();
    let origin = dest.position;
    grid.for_each_row_in(clip, |y, row| {
        let dy = y - origin.y;
        for x in left..right {
            let cell = source(x - origin.x, dy).sanitized();
            if transparent && cell.is_blank() {
                continue;
            }
            row[x as usize] = cell;
        }
    });
}

/// Fills `rect` with `cell`.
///
/// A blank `cell` is still written; fills are never transparent.
pub fn fill(grid: &mut Grid, rect: Rect, cell: Cell) {
    paint(grid, rect, false, |_, _| cell);
}

/// Draws one line of text anchored inside `rect`.
///
/// The text occupies the single active row of the vertical anchor and is
/// positioned horizontally by the horizontal anchor. Text wider than the
/// rectangle is cropped on the side(s) opposite the anchor.
pub fn draw_text(
    grid: &mut Grid,
    rect: Rect,
    style: &TextStyle,
    alignment: TextAlignment,
    text: &str,
) {
    let chars: Vec<char> = text.chars().collect();
    let dest = rect.normalized();
    let (width, len) = (dest.width(), len_i32(chars.len()));
    let horizontal = alignment.horizontal();
    let active = alignment.vertical().active_row(dest.height());
    let style = *style;
    paint(grid, dest, style.transparent, |dx, dy| {
        if dy != active {
            return style.blank();
        }
        lookup(&chars, horizontal.source_index(dx, width, len))
            .map_or(style.blank(), |c| style.cell(c))
    });
}

/// Draws several lines of text anchored inside `rect`.
///
/// Lines are selected per row by the vertical anchor, then each line is
/// aligned horizontally on its own.
pub fn draw_text_lines<S: AsRef<str>>(
    grid: &mut Grid,
    rect: Rect,
    style: &TextStyle,
    alignment: TextAlignment,
    lines: &[S],
) {
    let lines: Vec<Vec<char>> = lines.iter().map(|l| l.as_ref().chars().collect()).collect();
    let style = *style;
    draw_rows(grid, rect, style, alignment, &lines, |c| style.cell(c));
}

/// Draws one line of text with a highlighted column range.
///
/// Only the first row of `rect` is touched. Columns inside the highlight use
/// the highlight colors, including blank columns.
///
/// The vertical part of `alignment` is ignored. With a `Center` or bottom
/// anchor and a taller `rect`, the text still lands on the first row and the
/// rows below keep their previous contents instead of being blanked.
pub fn draw_highlighted_text(
    grid: &mut Grid,
    rect: Rect,
    style: &TextStyle,
    alignment: TextAlignment,
    text: &str,
    highlight: &Highlight,
) {
    let chars: Vec<char> = text.chars().collect();
    let dest = rect.normalized();
    let dest = Rect::from_parts(dest.position, Point::new(dest.width(), dest.height().min(1)));
    let (width, len) = (dest.width(), len_i32(chars.len()));
    let horizontal = alignment.horizontal();
    let style = *style;
    let marked = TextStyle {
        fg: highlight.fg,
        bg: highlight.bg,
        ..style
    };
    let highlight = *highlight;
    paint(grid, dest, style.transparent, |dx, _| {
        let colors = if highlight.covers(dx) { marked } else { style };
        lookup(&chars, horizontal.source_index(dx, width, len))
            .map_or(colors.blank(), |c| colors.cell(c))
    });
}

/// Draws a pre-colored cell sequence anchored inside `rect`.
///
/// Positions the sequence does not reach use the blank cell of `style`.
pub fn draw_cells(
    grid: &mut Grid,
    rect: Rect,
    style: &TextStyle,
    alignment: TextAlignment,
    cells: &[Cell],
) {
    let dest = rect.normalized();
    let (width, len) = (dest.width(), len_i32(cells.len()));
    let horizontal = alignment.horizontal();
    let active = alignment.vertical().active_row(dest.height());
    let blank = style.blank();
    paint(grid, dest, style.transparent, |dx, dy| {
        if dy != active {
            return blank;
        }
        lookup(cells, horizontal.source_index(dx, width, len)).unwrap_or(blank)
    });
}

/// Draws several pre-colored cell lines anchored inside `rect`.
pub fn draw_cell_lines<L: AsRef<[Cell]>>(
    grid: &mut Grid,
    rect: Rect,
    style: &TextStyle,
    alignment: TextAlignment,
    lines: &[L],
) {
    let lines: Vec<&[Cell]> = lines.iter().map(|l| l.as_ref()).collect();
    draw_rows(grid, rect, *style, alignment, &lines, |c| c);
}

fn draw_rows<T, L, F>(
    grid: &mut Grid,
    rect: Rect,
    style: TextStyle,
    alignment: TextAlignment,
    lines: &[L],
    to_cell: F,
) where
    T: Copy,
    L: AsRef<[T]> + Sync,
    F: Fn(T) -> Cell + Sync,
{
    let dest = rect.normalized();
    let (width, height) = (dest.width(), dest.height());
    let count = len_i32(lines.len());
    let horizontal = alignment.horizontal();
    let vertical = alignment.vertical();
    paint(grid, dest, style.transparent, |dx, dy| {
        let line: Option<&[T]> = usize::try_from(vertical.source_index(dy, height, count))
            .ok()
            .and_then(|i| lines.get(i))
            .map(|l| l.as_ref());
        let Some(line) = line else {
            return style.blank();
        };
        lookup(line, horizontal.source_index(dx, width, len_i32(line.len())))
            .map_or(style.blank(), &to_cell)
    });
}

/// Draws a border around the edge of `rect`.
///
/// Corners adjoining an open side become junction glyphs. Interior cells are
/// blank, so a transparent border leaves the inside of `rect` untouched.
pub fn draw_border(
    grid: &mut Grid,
    rect: Rect,
    style: &TextStyle,
    border: &BorderChars,
    open: OpenSides,
) {
    let dest = rect.normalized();
    let (width, height) = (dest.width(), dest.height());
    let style = *style;
    let border = *border;
    paint(grid, dest, style.transparent, |dx, dy| {
        style.cell(border.glyph(dx, dy, width, height, open))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parallelism;
    use pretty_assertions::assert_eq;

    fn grid(width: i32, height: i32) -> Grid {
        Grid::try_new(width, height, Cell::EMPTY).unwrap()
    }

    fn plain() -> TextStyle {
        TextStyle::new(Color::White, Color::Black)
    }

    fn dotted(width: i32, height: i32) -> Grid {
        Grid::try_new(width, height, Cell::new('.', Color::Gray, Color::Black)).unwrap()
    }

    mod fill_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_fill_region() {
            let mut g = dotted(5, 3);
            fill(&mut g, Rect::new(1, 1, 3, 5), Cell::new('#', Color::Red, Color::Black));
            assert_eq!(g.to_lines(), vec![".....", ".###.", ".###."]);
        }

        #[test]
        fn test_fill_negative_size_normalizes() {
            let mut g = dotted(4, 2);
            fill(&mut g, Rect::new(4, 2, -2, -1), Cell::EMPTY.with_char('x'));
            assert_eq!(g.to_lines(), vec!["....", "..xx"]);
        }

        #[test]
        fn test_fill_outside_is_noop() {
            let mut g = dotted(3, 3);
            let before = g.clone();
            fill(&mut g, Rect::new(-5, -5, 5, 5), Cell::EMPTY);
            fill(&mut g, Rect::new(3, 0, 2, 2), Cell::EMPTY);
            assert_eq!(g, before);
        }
    }

    mod text_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_horizontal_anchors() {
            for (alignment, expected) in [
                (TextAlignment::TopLeft, "HI        "),
                (TextAlignment::Top, "    HI    "),
                (TextAlignment::TopRight, "        HI"),
            ] {
                let mut g = grid(10, 1);
                draw_text(&mut g, Rect::sized(10, 1), &plain(), alignment, "HI");
                assert_eq!(g.to_lines(), vec![expected], "{alignment:?}");
            }
        }

        #[test]
        fn test_h_columns() {
            let col_of_h = |alignment| {
                let mut g = grid(10, 1);
                draw_text(&mut g, Rect::sized(10, 1), &plain(), alignment, "HI");
                g.cells().iter().position(|c| c.character == 'H')
            };
            assert_eq!(col_of_h(TextAlignment::Left), Some(0));
            assert_eq!(col_of_h(TextAlignment::Right), Some(8));
            assert_eq!(col_of_h(TextAlignment::Center), Some(4));
        }

        #[test]
        fn test_vertical_anchors() {
            let rows_for = |alignment| {
                let mut g = dotted(3, 5);
                draw_text(&mut g, Rect::sized(3, 5), &plain(), alignment, "ab");
                g.to_lines()
            };
            assert_eq!(rows_for(TextAlignment::TopLeft), vec!["ab ", "   ", "   ", "   ", "   "]);
            assert_eq!(rows_for(TextAlignment::Left), vec!["   ", "   ", "ab ", "   ", "   "]);
            assert_eq!(rows_for(TextAlignment::BottomRight), vec!["   ", "   ", "   ", "   ", " ab"]);
        }

        #[test]
        fn test_offset_destination() {
            let mut g = dotted(6, 2);
            draw_text(&mut g, Rect::new(2, 1, 3, 1), &plain(), TextAlignment::TopLeft, "xyz!");
            assert_eq!(g.to_lines(), vec!["......", "..xyz."]);
        }

        #[test]
        fn test_crop_when_clipped_by_grid() {
            // anchoring is relative to the destination, not the visible part
            let mut g = grid(4, 1);
            draw_text(&mut g, Rect::new(-2, 0, 6, 1), &plain(), TextAlignment::TopLeft, "abcdef");
            assert_eq!(g.to_lines(), vec!["cdef"]);
        }

        #[test]
        fn test_center_longer_than_width() {
            let mut g = grid(3, 1);
            draw_text(&mut g, Rect::sized(3, 1), &plain(), TextAlignment::Center, "abcdef");
            assert_eq!(g.to_lines(), vec!["bcd"]);
        }

        #[test]
        fn test_colors_applied() {
            let mut g = grid(3, 1);
            let style = TextStyle::new(Color::Yellow, Color::DarkBlue);
            draw_text(&mut g, Rect::sized(3, 1), &style, TextAlignment::TopLeft, "a");
            assert_eq!(g.cells()[0], Cell::new('a', Color::Yellow, Color::DarkBlue));
            assert_eq!(g.cells()[2], Cell::new(' ', Color::Yellow, Color::DarkBlue));
        }

        #[test]
        fn test_transparent_text_skips_blanks() {
            let mut g = dotted(5, 2);
            let style = plain().with_transparency(true);
            draw_text(&mut g, Rect::sized(5, 2), &style, TextAlignment::Top, "a b");
            assert_eq!(g.to_lines(), vec![".a.b.", "....."]);
        }

        #[test]
        fn test_empty_text() {
            let mut g = dotted(3, 1);
            draw_text(&mut g, Rect::sized(3, 1), &plain(), TextAlignment::Center, "");
            assert_eq!(g.to_lines(), vec!["   "]);
        }
    }

    mod lines_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_lines_top_left() {
            let mut g = dotted(4, 3);
            draw_text_lines(&mut g, Rect::sized(4, 3), &plain(), TextAlignment::TopLeft, &["ab", "cde"]);
            assert_eq!(g.to_lines(), vec!["ab  ", "cde ", "    "]);
        }

        #[test]
        fn test_lines_bottom_right() {
            let mut g = dotted(4, 3);
            draw_text_lines(&mut g, Rect::sized(4, 3), &plain(), TextAlignment::BottomRight, &["ab", "cde"]);
            assert_eq!(g.to_lines(), vec!["    ", "  ab", " cde"]);
        }

        #[test]
        fn test_lines_centered() {
            let mut g = grid(5, 5);
            let lines = vec!["x".to_string(), "yyy".to_string()];
            draw_text_lines(&mut g, Rect::sized(5, 5), &plain(), TextAlignment::Center, &lines);
            assert_eq!(g.to_lines(), vec!["     ", "  x  ", " yyy ", "     ", "     "]);
        }

        #[test]
        fn test_more_lines_than_rows() {
            let mut g = grid(1, 2);
            draw_text_lines(&mut g, Rect::sized(1, 2), &plain(), TextAlignment::BottomLeft, &["a", "b", "c"]);
            assert_eq!(g.to_lines(), vec!["b", "c"]);
        }
    }

    mod highlight_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        fn mark() -> Highlight {
            Highlight {
                start: 1,
                len: 2,
                fg: Color::Black,
                bg: Color::White,
            }
        }

        #[test]
        fn test_highlight_range_colors() {
            let mut g = grid(5, 1);
            draw_highlighted_text(&mut g, Rect::sized(5, 1), &plain(), TextAlignment::TopLeft, "abc", &mark());
            let cells = g.cells();
            assert_eq!(cells[0], Cell::new('a', Color::White, Color::Black));
            assert_eq!(cells[1], Cell::new('b', Color::Black, Color::White));
            assert_eq!(cells[2], Cell::new('c', Color::Black, Color::White));
            assert_eq!(cells[3], Cell::new(' ', Color::White, Color::Black));
        }

        #[test]
        fn test_highlight_blank_cells_use_highlight_colors() {
            let mut g = grid(4, 1);
            let h = Highlight { start: 3, len: 1, ..mark() };
            draw_highlighted_text(&mut g, Rect::sized(4, 1), &plain(), TextAlignment::TopLeft, "ab", &h);
            assert_eq!(g.cells()[3], Cell::new(' ', Color::Black, Color::White));
        }

        #[test]
        fn test_highlight_only_first_row() {
            let mut g = dotted(3, 3);
            draw_highlighted_text(&mut g, Rect::sized(3, 3), &plain(), TextAlignment::Center, "x", &mark());
            assert_eq!(g.to_lines(), vec![" x ", "...", "..."]);
        }
    }

    mod cells_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        fn colored(s: &str, fg: Color) -> Vec<Cell> {
            s.chars().map(|c| Cell::new(c, fg, Color::Black)).collect()
        }

        #[test]
        fn test_cells_keep_their_colors() {
            let mut g = grid(4, 1);
            let src = colored("ab", Color::Green);
            draw_cells(&mut g, Rect::sized(4, 1), &plain(), TextAlignment::TopRight, &src);
            assert_eq!(g.cells()[2], src[0]);
            assert_eq!(g.cells()[3], src[1]);
            assert_eq!(g.cells()[0], Cell::EMPTY);
        }

        #[test]
        fn test_cells_transparent() {
            let mut g = dotted(4, 2);
            let src = colored("a b", Color::Green);
            let style = plain().with_transparency(true);
            draw_cells(&mut g, Rect::sized(4, 2), &style, TextAlignment::BottomLeft, &src);
            assert_eq!(g.to_lines(), vec!["....", "a.b."]);
        }

        #[test]
        fn test_cell_lines() {
            let mut g = dotted(3, 3);
            let lines = vec![colored("ab", Color::Red), Vec::new(), colored("c", Color::Blue)];
            draw_cell_lines(&mut g, Rect::sized(3, 3), &plain(), TextAlignment::TopRight, &lines);
            assert_eq!(g.to_lines(), vec![" ab", "   ", "  c"]);
            assert_eq!(g.cells()[8].fg, Color::Blue);
        }

        #[test]
        fn test_cell_lines_centered_vertically() {
            let mut g = grid(2, 4);
            let lines = vec![colored("xy", Color::Red)];
            draw_cell_lines(&mut g, Rect::sized(2, 4), &plain(), TextAlignment::Left, &lines);
            assert_eq!(g.to_lines(), vec!["  ", "xy", "  ", "  "]);
        }
    }

    mod border_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_closed_border() {
            let mut g = grid(4, 3);
            draw_border(&mut g, Rect::sized(4, 3), &plain(), &BorderChars::LINE, OpenSides::empty());
            assert_eq!(g.to_lines(), vec!["┌──┐", "│  │", "└──┘"]);
        }

        #[test]
        fn test_open_top_left_glyphs() {
            let corner = |open| {
                let mut g = grid(3, 3);
                draw_border(&mut g, Rect::sized(3, 3), &plain(), &BorderChars::LINE, open);
                g.cells()[0].character
            };
            assert_eq!(corner(OpenSides::TOP | OpenSides::LEFT), '┼');
            assert_eq!(corner(OpenSides::TOP), '├');
            assert_eq!(corner(OpenSides::empty()), '┌');
        }

        #[test]
        fn test_transparent_border_keeps_interior() {
            let mut g = dotted(4, 4);
            let style = plain().with_transparency(true);
            draw_border(&mut g, Rect::sized(4, 4), &style, &BorderChars::DOUBLE_LINE, OpenSides::empty());
            assert_eq!(g.to_lines(), vec!["╔══╗", "║..║", "║..║", "╚══╝"]);
        }

        #[test]
        fn test_opaque_border_clears_interior() {
            let mut g = dotted(3, 3);
            draw_border(&mut g, Rect::sized(3, 3), &plain(), &BorderChars::LINE, OpenSides::empty());
            assert_eq!(g.to_lines()[1], "│ │");
        }

        #[test]
        fn test_clipped_border_keeps_shape() {
            let mut g = grid(3, 2);
            draw_border(&mut g, Rect::new(-1, 0, 4, 3), &plain(), &BorderChars::LINE, OpenSides::empty());
            assert_eq!(g.to_lines(), vec!["──┐", "  │"]);
        }
    }

    #[test]
    fn test_parallel_painting_matches_sequential() {
        let mut seq = grid(37, 23);
        let mut par = grid(37, 23);
        par.set_parallelism(Parallelism {
            threshold: 0,
            workers: 4,
        });
        for g in [&mut seq, &mut par] {
            draw_border(g, Rect::new(1, 1, 30, 20), &plain(), &BorderChars::LINE, OpenSides::RIGHT);
            draw_text_lines(g, Rect::new(2, 2, 28, 18), &plain(), TextAlignment::Center, &["one", "two", "three"]);
            fill(g, Rect::new(20, 0, 5, 23), Cell::new('%', Color::Cyan, Color::DarkCyan));
        }
        assert_eq!(seq, par);
    }
}
