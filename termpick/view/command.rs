//! Viewport commands.

use crate::input::Key;

/// Logical commands understood by the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    LineUp,
    LineDown,
    HalfPageUp,
    HalfPageDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Quit,
    Unrecognized,
}

impl From<Key> for ScrollCommand {
    fn from(key: Key) -> Self {
        if key.is_quit() {
            return ScrollCommand::Quit;
        }
        match key {
            Key::Up | Key::Char('k') | Key::Ctrl('p') => ScrollCommand::LineUp,
            Key::Down | Key::Enter | Key::Char('j') | Key::Ctrl('n') => ScrollCommand::LineDown,
            Key::Char('u') | Key::Ctrl('u') => ScrollCommand::HalfPageUp,
            Key::Char('d') | Key::Ctrl('d') => ScrollCommand::HalfPageDown,
            Key::PageUp | Key::Char('b') | Key::Ctrl('b') => ScrollCommand::PageUp,
            Key::PageDown | Key::Char(' ') | Key::Char('f') | Key::Ctrl('f') => {
                ScrollCommand::PageDown
            }
            Key::Home | Key::Char('g') | Key::Char('<') => ScrollCommand::Top,
            Key::End | Key::Char('G') | Key::Char('>') => ScrollCommand::Bottom,
            _ => ScrollCommand::Unrecognized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(ScrollCommand::from(Key::Down), ScrollCommand::LineDown);
        assert_eq!(ScrollCommand::from(Key::Enter), ScrollCommand::LineDown);
        assert_eq!(ScrollCommand::from(Key::Char('k')), ScrollCommand::LineUp);
        assert_eq!(ScrollCommand::from(Key::Ctrl('d')), ScrollCommand::HalfPageDown);
        assert_eq!(ScrollCommand::from(Key::Char('u')), ScrollCommand::HalfPageUp);
        assert_eq!(ScrollCommand::from(Key::Char(' ')), ScrollCommand::PageDown);
        assert_eq!(ScrollCommand::from(Key::PageUp), ScrollCommand::PageUp);
        assert_eq!(ScrollCommand::from(Key::Char('g')), ScrollCommand::Top);
        assert_eq!(ScrollCommand::from(Key::End), ScrollCommand::Bottom);
    }

    #[test]
    fn test_quit_and_unknown() {
        assert_eq!(ScrollCommand::from(Key::Char('q')), ScrollCommand::Quit);
        assert_eq!(ScrollCommand::from(Key::Ctrl('c')), ScrollCommand::Quit);
        assert_eq!(ScrollCommand::from(Key::Unknown), ScrollCommand::Unrecognized);
        assert_eq!(ScrollCommand::from(Key::Left), ScrollCommand::Unrecognized);
    }
}
