//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Raw input session on the controlling terminal.

use crate::error::{Error, Result};
use crate::input::{KeyDecoder, KeyProtocol};
use crate::ui::{open_tty, RawMode};
use std::fs::File;
use std::io::{Read, Write};
use std::os::unix::io::AsRawFd;

/// Longest reply accepted from a terminal query.
const MAX_REPLY: usize = 256;

/// Exclusive raw-mode session on `/dev/tty`.
///
/// Field order matters: the mode guard drops before the descriptor
/// closes, so the terminal is restored through a still-open handle.
pub struct Session {
    raw: RawMode,
    tty: File,
    protocol: KeyProtocol,
}

impl Session {
    /// Open the controlling terminal and switch it to raw mode.
    pub fn acquire(protocol: KeyProtocol) -> Result<Self> {
        Self::on_tty(open_tty()?, protocol)
    }

    /// Switch an already open terminal to raw mode.
    pub fn on_tty(tty: File, protocol: KeyProtocol) -> Result<Self> {
        let raw = RawMode::enable(tty.as_raw_fd())?;
        Ok(Self { raw, tty, protocol })
    }

    /// Run `body` inside a session on the controlling terminal.
    pub fn scoped<T, F>(protocol: KeyProtocol, body: F) -> Result<T>
    where
        F: FnOnce(&mut dyn KeyDecoder) -> Result<T>,
    {
        Self::scoped_on(open_tty()?, protocol, body)
    }

    /// Run `body` inside a session on `tty`.
    ///
    /// The terminal mode is restored however `body` ends: normal return,
    /// an error, or a panic unwinding through here. A restore failure is
    /// reported only when `body` itself succeeded.
    pub fn scoped_on<T, F>(tty: File, protocol: KeyProtocol, body: F) -> Result<T>
    where
        F: FnOnce(&mut dyn KeyDecoder) -> Result<T>,
    {
        let session = Self::on_tty(tty, protocol)?;
        let result = {
            let mut keys = session.keys();
            body(keys.as_mut())
        };
        match result {
            Ok(value) => {
                session.release()?;
                Ok(value)
            }
            Err(e) => Err(e),
        }
    }

    /// Key decoder reading from the session's terminal.
    pub fn keys(&self) -> Box<dyn KeyDecoder + '_> {
        self.protocol.decoder(&self.tty)
    }

    /// Write `request` to the terminal and collect its reply up to and
    /// including the `end` byte.
    pub fn query(&mut self, request: &str, end: u8) -> Result<String> {
        self.tty.write_all(request.as_bytes())?;
        self.tty.flush()?;

        let mut reply = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            if self.tty.read(&mut byte)? == 0 {
                return Err(Error::InputClosed);
            }
            reply.push(byte[0]);
            if byte[0] == end {
                break;
            }
            if reply.len() >= MAX_REPLY {
                return Err(Error::QueryReply(String::from_utf8_lossy(&reply).into_owned()));
            }
        }

        Ok(String::from_utf8_lossy(&reply).into_owned())
    }

    /// Restore the terminal, reporting failure.
    pub fn release(self) -> Result<()> {
        let Session { raw, .. } = self;
        raw.release()
    }
}
