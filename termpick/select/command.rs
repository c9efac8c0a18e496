//! Selector commands.

use crate::input::Key;

/// Logical commands understood by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectCommand {
    Up,
    Down,
    Home,
    End,
    PrevPage,
    NextPage,
    /// Flip the item under the cursor.
    Toggle,
    /// Select everything on the page, or clear it if all are selected.
    ToggleAll,
    Commit,
    Quit,
    Unrecognized,
}

impl From<Key> for SelectCommand {
    fn from(key: Key) -> Self {
        if key.is_quit() {
            return SelectCommand::Quit;
        }
        match key {
            Key::Up | Key::Char('k') => SelectCommand::Up,
            Key::Down | Key::Char('j') => SelectCommand::Down,
            Key::Home | Key::Char('g') => SelectCommand::Home,
            Key::End | Key::Char('G') => SelectCommand::End,
            Key::Left | Key::PageUp | Key::Char('h') => SelectCommand::PrevPage,
            Key::Right | Key::PageDown | Key::Char('l') => SelectCommand::NextPage,
            Key::Char(' ') => SelectCommand::Toggle,
            Key::Char('a') => SelectCommand::ToggleAll,
            Key::Enter => SelectCommand::Commit,
            _ => SelectCommand::Unrecognized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(SelectCommand::from(Key::Up), SelectCommand::Up);
        assert_eq!(SelectCommand::from(Key::Char('j')), SelectCommand::Down);
        assert_eq!(SelectCommand::from(Key::Right), SelectCommand::NextPage);
        assert_eq!(SelectCommand::from(Key::Char(' ')), SelectCommand::Toggle);
        assert_eq!(SelectCommand::from(Key::Char('a')), SelectCommand::ToggleAll);
        assert_eq!(SelectCommand::from(Key::Enter), SelectCommand::Commit);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(SelectCommand::from(Key::Char('q')), SelectCommand::Quit);
        assert_eq!(SelectCommand::from(Key::Ctrl('c')), SelectCommand::Quit);
    }

    #[test]
    fn test_unknown_is_unrecognized() {
        assert_eq!(SelectCommand::from(Key::Unknown), SelectCommand::Unrecognized);
        assert_eq!(SelectCommand::from(Key::Escape), SelectCommand::Unrecognized);
        assert_eq!(SelectCommand::from(Key::Char('z')), SelectCommand::Unrecognized);
    }
}
