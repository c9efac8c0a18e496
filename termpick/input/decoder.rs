//! Byte protocol decoders.
//!
//! Terminals disagree on how navigation keys are encoded. Each decoder
//! here turns one protocol into the shared [`Key`] set, so nothing above
//! this module ever looks at raw bytes.

use super::key::Key;
use crate::error::{Error, Result};
use std::io::Read;

/// Most bytes read after `ESC [` while looking for the final byte.
const MAX_CSI_LEN: usize = 32;

/// Source of decoded key events.
pub trait KeyDecoder {
    /// Block until one key is available and return it.
    fn read_key(&mut self) -> Result<Key>;
}

/// Byte protocol spoken by the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyProtocol {
    /// VT100/xterm escape sequences.
    Ansi,
    /// Windows console: `0x00`/`0xE0` prefix plus a scan code.
    Console,
}

impl KeyProtocol {
    /// Protocol of the platform this binary was built for.
    pub fn native() -> Self {
        if cfg!(windows) {
            KeyProtocol::Console
        } else {
            KeyProtocol::Ansi
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KeyProtocol::Ansi => "ansi",
            KeyProtocol::Console => "console",
        }
    }

    /// Build a decoder for this protocol over `input`.
    pub fn decoder<'a, R: Read + 'a>(self, input: R) -> Box<dyn KeyDecoder + 'a> {
        match self {
            KeyProtocol::Ansi => Box::new(AnsiDecoder::new(input)),
            KeyProtocol::Console => Box::new(ConsoleDecoder::new(input)),
        }
    }
}

impl std::str::FromStr for KeyProtocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ansi" | "vt100" | "xterm" => Ok(KeyProtocol::Ansi),
            "console" | "windows" => Ok(KeyProtocol::Console),
            _ => Err(Error::InvalidOption(format!("keys={}", s))),
        }
    }
}

/// Buffered byte source shared by the decoders.
struct ByteReader<R> {
    input: R,
    /// Buffer for reading bytes.
    buffer: [u8; 32],
    /// Number of bytes in buffer.
    len: usize,
    /// Current position in buffer.
    pos: usize,
}

impl<R: Read> ByteReader<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            buffer: [0; 32],
            len: 0,
            pos: 0,
        }
    }

    fn read_byte(&mut self) -> Result<u8> {
        if self.pos >= self.len {
            self.pos = 0;
            self.len = self.input.read(&mut self.buffer)?;
            if self.len == 0 {
                return Err(Error::InputClosed);
            }
        }

        let b = self.buffer[self.pos];
        self.pos += 1;
        Ok(b)
    }

    /// Whether bytes from the last read are still waiting.
    ///
    /// A terminal delivers an escape sequence in one write, so bytes
    /// that arrived together with ESC belong to it; a lone ESC is the
    /// Escape key.
    fn has_pending(&self) -> bool {
        self.pos < self.len
    }
}

/// Decoder for VT100/xterm style input.
pub struct AnsiDecoder<R> {
    bytes: ByteReader<R>,
}

impl<R: Read> AnsiDecoder<R> {
    pub fn new(input: R) -> Self {
        Self {
            bytes: ByteReader::new(input),
        }
    }

    /// Parse an escape sequence.
    fn parse_escape_sequence(&mut self) -> Result<Key> {
        match self.bytes.read_byte()? {
            b'[' => self.parse_csi_sequence(),
            b'O' => self.parse_ss3_sequence(),
            // Alt+key or unknown; the byte is consumed either way.
            _ => Ok(Key::Unknown),
        }
    }

    /// Parse CSI (Control Sequence Introducer) sequences: ESC [
    ///
    /// Bytes are consumed through the final byte (`0x40..=0x7E`) even when
    /// the sequence is not recognized, up to `MAX_CSI_LEN` bytes.
    fn parse_csi_sequence(&mut self) -> Result<Key> {
        let mut first: Option<u16> = None;
        let mut in_first = true;
        // Private markers such as `<` or `?` introduce sequences that are
        // not keys (mouse reports, mode replies).
        let mut private = false;

        for _ in 0..MAX_CSI_LEN {
            let b = self.bytes.read_byte()?;
            match b {
                b'0'..=b'9' => {
                    if in_first {
                        let digit = u16::from(b - b'0');
                        first = Some(first.unwrap_or(0).saturating_mul(10).saturating_add(digit));
                    }
                }
                b';' | b':' => in_first = false,
                // Other parameter and intermediate bytes.
                0x20..=0x2f | 0x3c..=0x3f => private = true,
                0x40..=0x7e if private => return Ok(Key::Unknown),
                b'~' => return Ok(Self::csi_number_to_key(first)),
                b'A' => return Ok(Key::Up),
                b'B' => return Ok(Key::Down),
                b'C' => return Ok(Key::Right),
                b'D' => return Ok(Key::Left),
                b'H' => return Ok(Key::Home),
                b'F' => return Ok(Key::End),
                0x40..=0x7e => return Ok(Key::Unknown),
                // Not part of a CSI sequence at all.
                _ => return Ok(Key::Unknown),
            }
        }

        log::trace!("CSI sequence longer than {} bytes", MAX_CSI_LEN);
        Ok(Key::Unknown)
    }

    /// Convert the leading CSI number of an `ESC [ n ~` sequence to a key.
    fn csi_number_to_key(num: Option<u16>) -> Key {
        match num {
            Some(1) | Some(7) => Key::Home,
            Some(2) => Key::Insert,
            Some(3) => Key::Delete,
            Some(4) | Some(8) => Key::End,
            Some(5) => Key::PageUp,
            Some(6) => Key::PageDown,
            _ => Key::Unknown,
        }
    }

    /// Parse SS3 sequences: ESC O
    fn parse_ss3_sequence(&mut self) -> Result<Key> {
        Ok(match self.bytes.read_byte()? {
            b'A' => Key::Up,
            b'B' => Key::Down,
            b'C' => Key::Right,
            b'D' => Key::Left,
            b'H' => Key::Home,
            b'F' => Key::End,
            _ => Key::Unknown,
        })
    }

    /// Parse multi-byte UTF-8 sequence.
    fn parse_utf8(&mut self, first: u8) -> Result<Key> {
        let mut bytes = [first, 0, 0, 0];
        let len = match first {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Ok(Key::Unknown),
        };

        for byte in bytes.iter_mut().take(len).skip(1) {
            *byte = self.bytes.read_byte()?;
        }

        Ok(std::str::from_utf8(&bytes[..len])
            .ok()
            .and_then(|s| s.chars().next())
            .map_or(Key::Unknown, Key::Char))
    }
}

impl<R: Read> KeyDecoder for AnsiDecoder<R> {
    fn read_key(&mut self) -> Result<Key> {
        let b = self.bytes.read_byte()?;

        let key = if b == 27 {
            if self.bytes.has_pending() {
                self.parse_escape_sequence()?
            } else {
                Key::Escape
            }
        } else if b & 0x80 != 0 {
            self.parse_utf8(b)?
        } else {
            Key::from_byte(b)
        };

        log::trace!("ansi key: {:#04x} -> {}", b, key);
        Ok(key)
    }
}

/// Decoder for Windows console input (`getch` style).
pub struct ConsoleDecoder<R> {
    bytes: ByteReader<R>,
}

impl<R: Read> ConsoleDecoder<R> {
    pub fn new(input: R) -> Self {
        Self {
            bytes: ByteReader::new(input),
        }
    }

    fn scan_code_to_key(code: u8) -> Key {
        match code {
            b'H' => Key::Up,
            b'P' => Key::Down,
            b'K' => Key::Left,
            b'M' => Key::Right,
            b'G' => Key::Home,
            b'O' => Key::End,
            b'I' => Key::PageUp,
            b'Q' => Key::PageDown,
            b'R' => Key::Insert,
            b'S' => Key::Delete,
            _ => Key::Unknown,
        }
    }
}

impl<R: Read> KeyDecoder for ConsoleDecoder<R> {
    fn read_key(&mut self) -> Result<Key> {
        let b = self.bytes.read_byte()?;

        let key = match b {
            0x00 | 0xe0 => Self::scan_code_to_key(self.bytes.read_byte()?),
            b => Key::from_byte(b),
        };

        log::trace!("console key: {:#04x} -> {}", b, key);
        Ok(key)
    }
}
