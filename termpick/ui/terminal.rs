//! Terminal output surface: size queries and control sequences.

use std::fs::{File, OpenOptions};
use std::io::{self, Stdout, Write};
use std::os::unix::io::RawFd;

/// Terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    /// Number of rows.
    pub rows: u16,
    /// Number of columns.
    pub cols: u16,
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}

impl TerminalSize {
    /// Minimum terminal dimensions (safety bounds).
    const MIN_ROWS: u16 = 2;
    const MIN_COLS: u16 = 10;
    /// Maximum terminal dimensions (safety bounds against malformed values).
    const MAX_ROWS: u16 = 1000;
    const MAX_COLS: u16 = 1000;

    /// Query the current size of the terminal on standard output.
    ///
    /// Falls back to `LINES`/`COLUMNS` and then to 24x80.
    pub fn query() -> Self {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        let ret = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

        if ret == 0 && ws.ws_row != 0 && ws.ws_col != 0 {
            return Self {
                rows: ws.ws_row.clamp(Self::MIN_ROWS, Self::MAX_ROWS),
                cols: ws.ws_col.clamp(Self::MIN_COLS, Self::MAX_COLS),
            };
        }

        let from_env = |name: &str| std::env::var(name).ok().and_then(|v| v.parse::<u16>().ok());
        let default = Self::default();
        Self {
            rows: from_env("LINES")
                .unwrap_or(default.rows)
                .clamp(Self::MIN_ROWS, Self::MAX_ROWS),
            cols: from_env("COLUMNS")
                .unwrap_or(default.cols)
                .clamp(Self::MIN_COLS, Self::MAX_COLS),
        }
    }
}

/// Whether `fd` refers to a terminal.
pub fn is_terminal(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Open the controlling terminal for key input.
///
/// Keys come from the terminal itself rather than standard input, so
/// items can be piped in while the user still drives the screen.
pub fn open_tty() -> io::Result<File> {
    OpenOptions::new().read(true).write(true).open("/dev/tty")
}

/// Open a pseudo-terminal pair: `(master, slave)`.
#[cfg(test)]
pub(crate) fn open_pty() -> io::Result<(File, File)> {
    use std::os::unix::io::FromRawFd;

    let mut master: libc::c_int = -1;
    let mut slave: libc::c_int = -1;
    let ret = unsafe {
        libc::openpty(
            &mut master,
            &mut slave,
            std::ptr::null_mut(),
            std::ptr::null(),
            std::ptr::null(),
        )
    };
    if ret != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(unsafe { (File::from_raw_fd(master), File::from_raw_fd(slave)) })
}

/// Output side of the terminal.
///
/// All drawing goes through this type. It does not flush on its own;
/// renderers flush once per frame.
pub struct Terminal<W: Write = Stdout> {
    out: W,
    /// Size reported instead of querying the device.
    fixed_size: Option<TerminalSize>,
    interactive: bool,
}

impl Terminal<Stdout> {
    /// Terminal on standard output; interactive when stdout is a tty.
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            fixed_size: None,
            interactive: is_terminal(libc::STDOUT_FILENO),
        }
    }
}

impl<W: Write> Terminal<W> {
    /// Create a terminal over an arbitrary writer with a fixed size.
    /// Nothing here touches a real device.
    pub fn headless(out: W, size: TerminalSize, interactive: bool) -> Self {
        Self {
            out,
            fixed_size: Some(size),
            interactive,
        }
    }

    /// Whether output goes to a real terminal.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Current size, queried fresh on every call.
    pub fn size(&self) -> TerminalSize {
        self.fixed_size.unwrap_or_else(TerminalSize::query)
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Move the cursor up `n` rows (no-op for 0).
    pub fn cursor_up(&mut self, n: usize) -> io::Result<()> {
        if n > 0 {
            write!(self.out, "\x1b[{}A", n)?;
        }
        Ok(())
    }

    /// Move the cursor down `n` rows (no-op for 0).
    pub fn cursor_down(&mut self, n: usize) -> io::Result<()> {
        if n > 0 {
            write!(self.out, "\x1b[{}B", n)?;
        }
        Ok(())
    }

    /// Erase the current row and return to its first column.
    pub fn clear_line(&mut self) -> io::Result<()> {
        self.out.write_all(b"\r\x1b[2K")
    }

    /// Clear the screen and home the cursor.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x1b[2J\x1b[H")
    }

    pub fn enter_alternate_screen(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x1b[?1049h")
    }

    pub fn leave_alternate_screen(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x1b[?1049l")
    }

    /// Erase the current row and write `text` on it, leaving the cursor
    /// at the start of the next row.
    pub fn write_row(&mut self, text: &str) -> io::Result<()> {
        self.clear_line()?;
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(b"\x1b[m\r\n")
    }
}

impl<W: Write> Write for Terminal<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headless() -> Terminal<Vec<u8>> {
        Terminal::headless(Vec::new(), TerminalSize::default(), true)
    }

    #[test]
    fn test_terminal_size_default() {
        let size = TerminalSize::default();
        assert_eq!(size.rows, 24);
        assert_eq!(size.cols, 80);
    }

    #[test]
    fn test_headless_size_is_fixed() {
        let size = TerminalSize { rows: 5, cols: 20 };
        let term = Terminal::headless(Vec::new(), size, false);
        assert_eq!(term.size(), size);
        assert!(!term.is_interactive());
    }

    #[test]
    fn test_cursor_moves() {
        let mut term = headless();
        term.cursor_up(3).unwrap();
        term.cursor_up(0).unwrap();
        term.cursor_down(2).unwrap();
        assert_eq!(term.get_ref().as_slice(), b"\x1b[3A\x1b[2B");
    }

    #[test]
    fn test_write_row() {
        let mut term = headless();
        term.write_row("abc").unwrap();
        assert_eq!(term.into_inner(), b"\r\x1b[2Kabc\x1b[m\r\n".to_vec());
    }

    #[test]
    fn test_clear_screen() {
        let mut term = headless();
        term.clear_screen().unwrap();
        assert_eq!(term.get_ref().as_slice(), b"\x1b[2J\x1b[H");
    }
}
