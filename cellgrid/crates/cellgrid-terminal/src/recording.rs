//! In-memory terminal backend.
//!
//! [`RecordingBackend`] records every device call and keeps a simulated
//! screen, so tests can assert both the exact write sequence and what a
//! real terminal would show. Failures can be injected for size queries and
//! for writes at chosen positions.

use cellgrid_buffer::Cell;
use cellgrid_core::{Color, Error, Point, Result};

use crate::backend::TerminalBackend;

/// One recorded device call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalOp {
    /// Cursor moved.
    MoveCursor(u16, u16),
    /// Foreground color set.
    SetForeground(Color),
    /// Background color set.
    SetBackground(Color),
    /// Text written at the cursor.
    Write(String),
    /// Screen cleared.
    Clear,
    /// Output flushed.
    Flush,
    /// Colors reset.
    ResetStyle,
    /// Cursor hidden.
    HideCursor,
    /// Cursor shown.
    ShowCursor,
    /// Alternate screen entered.
    EnterAlternateScreen,
    /// Alternate screen left.
    LeaveAlternateScreen,
    /// Raw mode entered.
    EnterRawMode,
    /// Raw mode left.
    ExitRawMode,
}

/// A fake terminal for tests.
///
/// Writes auto-wrap at the last column like a real terminal. Moving the
/// cursor outside the screen fails, as does writing while the cursor sits
/// on a position registered with [`fail_writes_at`](Self::fail_writes_at).
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    width: u16,
    height: u16,
    screen: Vec<Cell>,
    cursor: Point,
    fg: Color,
    bg: Color,
    ops: Vec<TerminalOp>,
    fail_size: bool,
    failing_writes: Vec<Point>,
}

impl RecordingBackend {
    /// Creates a fake terminal of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            screen: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
            cursor: Point::ZERO,
            fg: Color::White,
            bg: Color::Black,
            ops: Vec::new(),
            fail_size: false,
            failing_writes: Vec::new(),
        }
    }

    /// Resizes the screen. The contents are reset to blank.
    pub fn set_size(&mut self, width: u16, height: u16) {
        *self = Self {
            ops: std::mem::take(&mut self.ops),
            failing_writes: std::mem::take(&mut self.failing_writes),
            fail_size: self.fail_size,
            ..Self::new(width, height)
        };
    }

    /// Makes subsequent size queries fail.
    pub fn fail_size(&mut self, fail: bool) {
        self.fail_size = fail;
    }

    /// Makes writes starting at `position` fail.
    pub fn fail_writes_at(&mut self, position: Point) {
        self.failing_writes.push(position);
    }

    /// Removes all injected write failures.
    pub fn clear_failures(&mut self) {
        self.failing_writes.clear();
        self.fail_size = false;
    }

    /// Returns every recorded call.
    pub fn ops(&self) -> &[TerminalOp] {
        &self.ops
    }

    /// Returns and forgets the recorded calls.
    pub fn take_ops(&mut self) -> Vec<TerminalOp> {
        std::mem::take(&mut self.ops)
    }

    /// Returns the text of every recorded write, in order.
    pub fn writes(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                TerminalOp::Write(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns the simulated cell at `position`.
    pub fn cell(&self, position: Point) -> Option<Cell> {
        self.index_of(position).map(|i| self.screen[i])
    }

    /// Returns the characters of each simulated screen row.
    pub fn screen_lines(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); usize::from(self.height)];
        }
        self.screen
            .chunks(usize::from(self.width))
            .map(|row| row.iter().map(|c| c.character).collect())
            .collect()
    }

    /// Returns the simulated cursor position.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    fn index_of(&self, position: Point) -> Option<usize> {
        let (width, height) = (i32::from(self.width), i32::from(self.height));
        if position.x < 0 || position.y < 0 || position.x >= width || position.y >= height {
            return None;
        }
        Some((position.y * width + position.x) as usize)
    }
}

impl TerminalBackend for RecordingBackend {
    fn size(&self) -> Result<(u16, u16)> {
        if self.fail_size {
            return Err(Error::Terminal("size query failed".to_string()));
        }
        Ok((self.width, self.height))
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.ops.push(TerminalOp::MoveCursor(x, y));
        let target = Point::new(i32::from(x), i32::from(y));
        if self.index_of(target).is_none() {
            return Err(Error::Terminal(format!(
                "cursor ({x}, {y}) outside {}x{} screen",
                self.width, self.height
            )));
        }
        self.cursor = target;
        Ok(())
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        self.ops.push(TerminalOp::SetForeground(color));
        self.fg = color;
        Ok(())
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        self.ops.push(TerminalOp::SetBackground(color));
        self.bg = color;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.ops.push(TerminalOp::Write(s.to_string()));
        if self.failing_writes.contains(&self.cursor) {
            return Err(Error::Terminal(format!(
                "injected write failure at ({}, {})",
                self.cursor.x, self.cursor.y
            )));
        }
        let width = i32::from(self.width);
        for ch in s.chars() {
            if let Some(i) = self.index_of(self.cursor) {
                self.screen[i] = Cell::new(ch, self.fg, self.bg);
            }
            self.cursor.x += 1;
            if self.cursor.x >= width {
                self.cursor = Point::new(0, self.cursor.y + 1);
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.ops.push(TerminalOp::Clear);
        let blank = Cell::new(' ', self.fg, self.bg);
        self.screen.fill(blank);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.ops.push(TerminalOp::Flush);
        Ok(())
    }

    fn reset_style(&mut self) -> Result<()> {
        self.ops.push(TerminalOp::ResetStyle);
        self.fg = Color::White;
        self.bg = Color::Black;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.ops.push(TerminalOp::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.ops.push(TerminalOp::ShowCursor);
        Ok(())
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.ops.push(TerminalOp::EnterAlternateScreen);
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.ops.push(TerminalOp::LeaveAlternateScreen);
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        self.ops.push(TerminalOp::EnterRawMode);
        Ok(())
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        self.ops.push(TerminalOp::ExitRawMode);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_updates_screen_and_wraps() {
        let mut term = RecordingBackend::new(3, 2);
        term.move_cursor(1, 0).unwrap();
        term.set_foreground(Color::Red).unwrap();
        term.write_str("abc").unwrap();
        assert_eq!(term.screen_lines(), vec![" ab".to_string(), "c  ".to_string()]);
        assert_eq!(term.cursor(), Point::new(1, 1));
        assert_eq!(
            term.cell(Point::new(1, 0)),
            Some(Cell::new('a', Color::Red, Color::Black))
        );
    }

    #[test]
    fn test_move_outside_fails() {
        let mut term = RecordingBackend::new(2, 2);
        assert!(term.move_cursor(2, 0).is_err());
        assert_eq!(term.ops(), &[TerminalOp::MoveCursor(2, 0)]);
    }

    #[test]
    fn test_injected_failures() {
        let mut term = RecordingBackend::new(4, 1);
        term.fail_writes_at(Point::new(2, 0));
        term.fail_size(true);
        assert!(term.size().is_err());

        term.move_cursor(2, 0).unwrap();
        assert!(term.write_str("x").is_err());
        assert_eq!(term.screen_lines(), vec!["    ".to_string()]);

        term.clear_failures();
        assert_eq!(term.size().unwrap(), (4, 1));
        term.write_str("x").unwrap();
        assert_eq!(term.writes(), vec!["x", "x"]);
    }

    #[test]
    fn test_set_size_keeps_log() {
        let mut term = RecordingBackend::new(1, 1);
        term.clear().unwrap();
        term.set_size(3, 2);
        assert_eq!(term.size().unwrap(), (3, 2));
        assert_eq!(term.screen_lines().len(), 2);
        assert_eq!(term.take_ops(), vec![TerminalOp::Clear]);
        assert!(term.ops().is_empty());
    }
}
