//! Keyboard event types.
//!
//! Key events are delivered to widgets at most once per frame. Only presses
//! and repeats are represented; releases are dropped by the input sources.

use bitflags::bitflags;
use crossterm::event as ct;
use std::fmt;

/// Identifies the key of a [`KeyEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key that produces a character.
    Char(char),
    /// Enter or Return.
    Enter,
    /// Tab. Shift+Tab arrives as `Tab` with [`KeyModifiers::SHIFT`].
    Tab,
    /// Backspace.
    Backspace,
    /// Escape.
    Esc,
    /// Delete.
    Delete,
    /// Insert.
    Insert,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Function key `F1` to `F24`.
    F(u8),
    /// A key the terminal reported that has no variant here.
    Other,
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Char(' ') => "space",
            Self::Char(c) => return write!(f, "{c}"),
            Self::F(n) => return write!(f, "f{n}"),
            Self::Enter => "enter",
            Self::Tab => "tab",
            Self::Backspace => "backspace",
            Self::Esc => "esc",
            Self::Delete => "delete",
            Self::Insert => "insert",
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
            Self::Home => "home",
            Self::End => "end",
            Self::PageUp => "pageup",
            Self::PageDown => "pagedown",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

bitflags! {
    /// Shift, Control and Alt state of a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// No modifiers pressed.
        const NONE = 0;
        /// Shift.
        const SHIFT = 1;
        /// Control.
        const CONTROL = 1 << 1;
        /// Alt or Option.
        const ALT = 1 << 2;
    }
}

/// Display prefixes, in display order.
const MODIFIER_PREFIXES: [(KeyModifiers, &str); 3] = [
    (KeyModifiers::CONTROL, "ctrl-"),
    (KeyModifiers::ALT, "alt-"),
    (KeyModifiers::SHIFT, "shift-"),
];

impl From<ct::KeyModifiers> for KeyModifiers {
    fn from(mods: ct::KeyModifiers) -> Self {
        [
            (ct::KeyModifiers::SHIFT, Self::SHIFT),
            (ct::KeyModifiers::CONTROL, Self::CONTROL),
            (ct::KeyModifiers::ALT, Self::ALT),
        ]
        .into_iter()
        .filter(|(theirs, _)| mods.contains(*theirs))
        .fold(Self::NONE, |acc, (_, ours)| acc | ours)
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers held during the press.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Creates a key event.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Creates an unmodified character press.
    #[must_use]
    pub const fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    /// Creates an unmodified press of `code`.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Returns the printable character this press produces, if any.
    ///
    /// Control combinations and non-character keys yield `None`.
    #[must_use]
    pub fn character(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.ctrl() && !c.is_control() => Some(c),
            _ => None,
        }
    }

    /// Returns true if Control is held.
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Returns true if Alt is held.
    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    /// Returns true if Shift is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }
}

/// Formats as `ctrl-alt-shift-<key>`, omitting modifiers that are not held.
impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, prefix) in MODIFIER_PREFIXES {
            if self.modifiers.contains(flag) {
                f.write_str(prefix)?;
            }
        }
        write!(f, "{}", self.code)
    }
}

impl From<ct::KeyEvent> for KeyEvent {
    fn from(event: ct::KeyEvent) -> Self {
        let mut modifiers = KeyModifiers::from(event.modifiers);
        let code = match event.code {
            ct::KeyCode::Char(c) => KeyCode::Char(c),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::BackTab => {
                modifiers |= KeyModifiers::SHIFT;
                KeyCode::Tab
            }
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Esc => KeyCode::Esc,
            ct::KeyCode::Delete => KeyCode::Delete,
            ct::KeyCode::Insert => KeyCode::Insert,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::PageUp => KeyCode::PageUp,
            ct::KeyCode::PageDown => KeyCode::PageDown,
            ct::KeyCode::F(n) => KeyCode::F(n),
            _ => KeyCode::Other,
        };
        Self { code, modifiers }
    }
}
