//! Decoded key events.

/// A key event from the terminal, independent of the byte protocol
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A regular character.
    Char(char),
    /// Control key combination (Ctrl+char).
    Ctrl(char),
    /// Escape key.
    Escape,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Unknown/unrecognized key sequence.
    Unknown,
}

impl Key {
    /// Create a key from a single-byte input unit.
    ///
    /// Both CR and LF are Enter: raw mode leaves input CR translation
    /// alone, and console input delivers a bare CR.
    pub fn from_byte(b: u8) -> Self {
        match b {
            0 => Key::Ctrl('@'),
            b'\t' => Key::Tab,
            b'\n' | b'\r' => Key::Enter,
            1..=26 => Key::Ctrl((b'a' + b - 1) as char),
            27 => Key::Escape,
            28 => Key::Ctrl('\\'),
            29 => Key::Ctrl(']'),
            30 => Key::Ctrl('^'),
            31 => Key::Ctrl('_'),
            127 => Key::Backspace,
            b if b.is_ascii() => Key::Char(b as char),
            _ => Key::Unknown,
        }
    }

    /// True for `q` and the interrupt character, the two keys that end
    /// every interactive loop.
    pub fn is_quit(&self) -> bool {
        matches!(self, Key::Char('q') | Key::Ctrl('c'))
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Ctrl(c) => write!(f, "^{}", c.to_ascii_uppercase()),
            Key::Escape => write!(f, "<Esc>"),
            Key::Backspace => write!(f, "<BS>"),
            Key::Delete => write!(f, "<Del>"),
            Key::Insert => write!(f, "<Insert>"),
            Key::Enter => write!(f, "<Enter>"),
            Key::Tab => write!(f, "<Tab>"),
            Key::Up => write!(f, "<Up>"),
            Key::Down => write!(f, "<Down>"),
            Key::Left => write!(f, "<Left>"),
            Key::Right => write!(f, "<Right>"),
            Key::Home => write!(f, "<Home>"),
            Key::End => write!(f, "<End>"),
            Key::PageUp => write!(f, "<PageUp>"),
            Key::PageDown => write!(f, "<PageDown>"),
            Key::Unknown => write!(f, "<Unknown>"),
        }
    }
}
