//! Terminal backend abstraction and crossterm implementation.

use cellgrid_core::{Color, Error, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color as CrosstermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Stdout, Write};

/// The device operations the frame engine needs.
///
/// Cursor position and colors are global device state, so every call goes
/// through one handle owned by the engine. Tests substitute
/// [`RecordingBackend`](crate::RecordingBackend).
pub trait TerminalBackend {
    /// Gets the current terminal size (columns, rows).
    fn size(&self) -> Result<(u16, u16)>;

    /// Moves the cursor to the specified position (0-based).
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    /// Sets the foreground color.
    fn set_foreground(&mut self, color: Color) -> Result<()>;

    /// Sets the background color.
    fn set_background(&mut self, color: Color) -> Result<()>;

    /// Writes a string at the current cursor position.
    fn write_str(&mut self, s: &str) -> Result<()>;

    /// Clears the entire screen with the current background color.
    fn clear(&mut self) -> Result<()>;

    /// Flushes any buffered output to the terminal.
    fn flush(&mut self) -> Result<()>;

    /// Resets colors to the terminal defaults.
    fn reset_style(&mut self) -> Result<()>;

    /// Hides the terminal cursor.
    fn hide_cursor(&mut self) -> Result<()>;

    /// Shows the terminal cursor.
    fn show_cursor(&mut self) -> Result<()>;

    /// Enters the alternate screen buffer.
    fn enter_alternate_screen(&mut self) -> Result<()>;

    /// Leaves the alternate screen buffer.
    fn leave_alternate_screen(&mut self) -> Result<()>;

    /// Enters raw mode for the terminal.
    fn enter_raw_mode(&mut self) -> Result<()>;

    /// Exits raw mode, restoring normal terminal behavior.
    fn exit_raw_mode(&mut self) -> Result<()>;
}

/// Crossterm-based terminal backend writing to stdout.
pub struct CrosstermBackend {
    stdout: Stdout,
    in_raw_mode: bool,
    in_alternate_screen: bool,
    cursor_hidden: bool,
}

impl CrosstermBackend {
    /// Creates a new crossterm backend.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            in_raw_mode: false,
            in_alternate_screen: false,
            cursor_hidden: false,
        }
    }

    /// Converts a palette color to crossterm's named ANSI colors.
    #[inline]
    pub fn to_crossterm_color(color: Color) -> CrosstermColor {
        match color {
            Color::Black => CrosstermColor::Black,
            Color::DarkBlue => CrosstermColor::DarkBlue,
            Color::DarkGreen => CrosstermColor::DarkGreen,
            Color::DarkCyan => CrosstermColor::DarkCyan,
            Color::DarkRed => CrosstermColor::DarkRed,
            Color::DarkMagenta => CrosstermColor::DarkMagenta,
            Color::DarkYellow => CrosstermColor::DarkYellow,
            Color::Gray => CrosstermColor::Grey,
            Color::DarkGray => CrosstermColor::DarkGrey,
            Color::Blue => CrosstermColor::Blue,
            Color::Green => CrosstermColor::Green,
            Color::Cyan => CrosstermColor::Cyan,
            Color::Red => CrosstermColor::Red,
            Color::Magenta => CrosstermColor::Magenta,
            Color::Yellow => CrosstermColor::Yellow,
            Color::White => CrosstermColor::White,
        }
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalBackend for CrosstermBackend {
    fn size(&self) -> Result<(u16, u16)> {
        size().map_err(Error::Io)
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.stdout, MoveTo(x, y)).map_err(Error::Io)
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        queue!(
            self.stdout,
            SetForegroundColor(Self::to_crossterm_color(color))
        )
        .map_err(Error::Io)
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        queue!(
            self.stdout,
            SetBackgroundColor(Self::to_crossterm_color(color))
        )
        .map_err(Error::Io)
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(self.stdout, Print(s)).map_err(Error::Io)
    }

    fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, Clear(ClearType::All)).map_err(Error::Io)
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().map_err(Error::Io)
    }

    fn reset_style(&mut self) -> Result<()> {
        queue!(self.stdout, ResetColor).map_err(Error::Io)
    }

    fn hide_cursor(&mut self) -> Result<()> {
        if !self.cursor_hidden {
            execute!(self.stdout, Hide).map_err(Error::Io)?;
            self.cursor_hidden = true;
        }
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        if self.cursor_hidden {
            execute!(self.stdout, Show).map_err(Error::Io)?;
            self.cursor_hidden = false;
        }
        Ok(())
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        if !self.in_alternate_screen {
            execute!(self.stdout, EnterAlternateScreen).map_err(Error::Io)?;
            self.in_alternate_screen = true;
        }
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        if self.in_alternate_screen {
            execute!(self.stdout, LeaveAlternateScreen).map_err(Error::Io)?;
            self.in_alternate_screen = false;
        }
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        if !self.in_raw_mode {
            enable_raw_mode().map_err(Error::Io)?;
            self.in_raw_mode = true;
        }
        Ok(())
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        if self.in_raw_mode {
            disable_raw_mode().map_err(Error::Io)?;
            self.in_raw_mode = false;
        }
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        // Best-effort cleanup on drop
        let _ = self.reset_style();
        let _ = self.show_cursor();
        let _ = self.leave_alternate_screen();
        let _ = self.exit_raw_mode();
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion() {
        assert_eq!(
            CrosstermBackend::to_crossterm_color(Color::Gray),
            CrosstermColor::Grey
        );
        assert_eq!(
            CrosstermBackend::to_crossterm_color(Color::DarkGray),
            CrosstermColor::DarkGrey
        );
        assert_eq!(
            CrosstermBackend::to_crossterm_color(Color::DarkYellow),
            CrosstermColor::DarkYellow
        );
    }

    #[test]
    fn test_conversion_is_injective() {
        let mut seen: Vec<CrosstermColor> = Vec::new();
        for color in Color::ALL {
            let converted = CrosstermBackend::to_crossterm_color(color);
            assert!(!seen.contains(&converted), "{color} collides");
            seen.push(converted);
        }
    }
}
