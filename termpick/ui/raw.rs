//! Raw terminal mode as a guard value.

use crate::error::Result;
use std::os::unix::io::RawFd;
use termios::{tcsetattr, Termios, ECHO, ICANON, ISIG, TCSAFLUSH, TCSANOW, VMIN, VTIME};

/// Raw mode on one terminal descriptor.
///
/// While the guard lives, input is delivered byte by byte without echo
/// and the interrupt character arrives as data instead of a signal.
/// The previous attributes come back when the guard is released or
/// dropped, whichever happens first, and only once.
#[derive(Debug)]
pub struct RawMode {
    fd: RawFd,
    /// Attributes to restore; `None` once restored or when inactive.
    original: Option<Termios>,
}

impl RawMode {
    /// Switch `fd` into raw mode.
    ///
    /// If the switch fails after the current attributes were captured,
    /// they are written back before the error is returned.
    pub fn enable(fd: RawFd) -> Result<Self> {
        let original = Termios::from_fd(fd)?;
        let mut raw = original;

        // Local flags: disable ECHO, ICANON (canonical mode), ISIG (signals)
        raw.c_lflag &= !(ECHO | ICANON | ISIG);

        // Control characters: read returns after 1 byte, no timeout
        raw.c_cc[VMIN] = 1;
        raw.c_cc[VTIME] = 0;

        if let Err(e) = tcsetattr(fd, TCSAFLUSH, &raw) {
            let _ = tcsetattr(fd, TCSANOW, &original);
            return Err(e.into());
        }

        log::debug!("raw mode enabled on fd {}", fd);
        Ok(Self {
            fd,
            original: Some(original),
        })
    }

    /// A guard that holds nothing, for non-interactive runs.
    pub fn inactive() -> Self {
        Self {
            fd: -1,
            original: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.original.is_some()
    }

    /// Restore the captured attributes, reporting failure.
    pub fn release(mut self) -> Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> Result<()> {
        if let Some(original) = self.original.take() {
            tcsetattr(self.fd, TCSANOW, &original)?;
            log::debug!("raw mode released on fd {}", self.fd);
        }
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::warn!("failed to restore terminal mode: {}", e);
        }
    }
}
