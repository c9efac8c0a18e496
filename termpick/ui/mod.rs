//! User interface module.
//!
//! This module provides terminal output, size queries and raw mode.

mod raw;
mod terminal;

pub use raw::RawMode;
pub use terminal::{is_terminal, open_tty, Terminal, TerminalSize};

#[cfg(test)]
pub(crate) use terminal::open_pty;
