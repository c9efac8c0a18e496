//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Display and input options.
//!
//! Options use the vi `:set` syntax: `name`, `noname`, `name=value` and
//! `name?`. They can come from `-o` arguments or from the `TERMPICK_OPTS`
//! environment variable.

use crate::error::{Error, Result};
use crate::input::KeyProtocol;
use crate::ui::is_terminal;
use std::ffi::OsString;

/// Environment variable holding space-separated options.
pub const OPTS_VAR: &str = "TERMPICK_OPTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Show the key help row above the selector (help).
    pub help: bool,
    /// Emit color and attribute codes (color).
    pub color: bool,
    /// Draw the pager on the alternate screen (altscreen/as).
    pub altscreen: bool,
    /// Byte protocol of the key input (keys).
    pub keys: KeyProtocol,
    /// Marker appended to cut-off labels (ellipsis).
    pub ellipsis: String,
    /// Items per selector page; 0 fits the terminal (pagesize/ps).
    pub pagesize: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            help: true,
            color: true,
            altscreen: true,
            keys: KeyProtocol::native(),
            ellipsis: "...".to_string(),
            pagesize: 0,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults adjusted for standard output, `NO_COLOR` and
    /// `TERMPICK_OPTS`.
    pub fn from_env() -> Result<Self> {
        Self::from_parts(
            is_terminal(libc::STDOUT_FILENO),
            std::env::var_os("NO_COLOR"),
            std::env::var(OPTS_VAR).ok(),
        )
    }

    /// Color starts off when output is not a terminal or `no_color` is
    /// non-empty; `opts` may still turn it back on.
    fn from_parts(
        output_is_terminal: bool,
        no_color: Option<OsString>,
        opts: Option<String>,
    ) -> Result<Self> {
        let mut options = Self::default();
        if !output_is_terminal || no_color.is_some_and(|v| !v.is_empty()) {
            options.color = false;
        }
        if let Some(list) = opts {
            for arg in list.split_whitespace() {
                options.set(arg)?;
            }
        }
        Ok(options)
    }

    /// Parse and apply one option argument. Queries return the answer.
    pub fn set(&mut self, arg: &str) -> Result<Option<String>> {
        let arg = arg.trim();

        if let Some(name) = arg.strip_suffix('?') {
            return self.query(name.trim()).map(Some);
        }

        if let Some((name, value)) = arg.split_once('=') {
            self.set_value(name.trim(), value)?;
            return Ok(None);
        }

        if let Some(name) = arg.strip_prefix("no") {
            if self.set_bool(name, false).is_ok() {
                return Ok(None);
            }
        }

        self.set_bool(arg, true)?;
        Ok(None)
    }

    /// Apply several option arguments in order, collecting query answers.
    pub fn apply_all<I, S>(&mut self, args: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut answers = Vec::new();
        for arg in args {
            if let Some(answer) = self.set(arg.as_ref())? {
                answers.push(answer);
            }
        }
        Ok(answers)
    }

    fn set_bool(&mut self, name: &str, value: bool) -> Result<()> {
        match name {
            "help" => self.help = value,
            "color" => self.color = value,
            "altscreen" | "as" => self.altscreen = value,
            _ => return Err(Error::InvalidOption(name.to_string())),
        }
        Ok(())
    }

    fn set_value(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "keys" => self.keys = value.trim().parse()?,
            "ellipsis" => self.ellipsis = value.to_string(),
            "pagesize" | "ps" => {
                self.pagesize = value
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidOption(format!("{}={}", name, value)))?;
            }
            _ => return Err(Error::InvalidOption(name.to_string())),
        }
        Ok(())
    }

    fn query(&self, name: &str) -> Result<String> {
        let flag = |on: bool, label: &str| format!("{}{}", if on { "" } else { "no" }, label);
        Ok(match name {
            "help" => flag(self.help, "help"),
            "color" => flag(self.color, "color"),
            "altscreen" | "as" => flag(self.altscreen, "altscreen"),
            "keys" => format!("keys={}", self.keys.name()),
            "ellipsis" => format!("ellipsis={}", self.ellipsis),
            "pagesize" | "ps" => format!("pagesize={}", self.pagesize),
            _ => return Err(Error::InvalidOption(name.to_string())),
        })
    }
}
