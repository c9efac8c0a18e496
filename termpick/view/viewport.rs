//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Scrolling window over a lazily produced sequence of lines.

use super::command::ScrollCommand;
use crate::config::Options;
use crate::error::Result;
use crate::input::KeyDecoder;
use crate::style::RESET;
use crate::ui::Terminal;
use crate::width;
use std::io::Write;

/// Produces the lines shown after the source runs dry. It receives the
/// number of lines the source produced.
pub type EndMarker = Box<dyn FnOnce(usize) -> Vec<String>>;

/// Where the viewport stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// The source may still produce lines.
    Streaming,
    /// The source is drained; the buffer is final.
    Exhausted,
    /// The user quit.
    Closed,
}

/// Viewport over an iterator of pre-rendered lines.
///
/// Lines are pulled only when the window needs them and are never
/// dropped, so scrolling back never touches the source again.
pub struct Viewport<I> {
    source: I,
    end_marker: Option<EndMarker>,
    /// Every line produced so far, end marker included once appended.
    lines: Vec<String>,
    /// Lines that came from the source.
    pulled: usize,
    /// First visible line.
    begin: usize,
    exhausted: bool,
    closed: bool,
    options: Options,
}

impl<I> Viewport<I>
where
    I: Iterator<Item = String>,
{
    pub fn new(source: I) -> Self {
        Self {
            source,
            end_marker: None,
            lines: Vec::new(),
            pulled: 0,
            begin: 0,
            exhausted: false,
            closed: false,
            options: Options::default(),
        }
    }

    pub fn with_end_marker<F>(mut self, marker: F) -> Self
    where
        F: FnOnce(usize) -> Vec<String> + 'static,
    {
        self.end_marker = Some(Box::new(marker));
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Lines buffered so far.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn state(&self) -> ViewState {
        if self.closed {
            ViewState::Closed
        } else if self.exhausted {
            ViewState::Exhausted
        } else {
            ViewState::Streaming
        }
    }

    /// Pull one line. At the end of the source the marker is appended
    /// and `false` is returned from then on.
    fn pull(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        match self.source.next() {
            Some(line) => {
                self.lines.push(line);
                self.pulled += 1;
                true
            }
            None => {
                self.exhausted = true;
                if let Some(marker) = self.end_marker.take() {
                    self.lines.extend(marker(self.pulled));
                }
                log::debug!("source exhausted after {} lines", self.pulled);
                false
            }
        }
    }

    /// Buffer at least `count` lines, or everything there is.
    fn fill(&mut self, count: usize) {
        while self.lines.len() < count && self.pull() {}
    }

    fn drain(&mut self) {
        while self.pull() {}
    }

    fn half(height: usize) -> usize {
        (height / 2).max(1)
    }

    /// Furthest `begin` once the source is drained.
    fn bottom_limit(&self, height: usize) -> usize {
        self.lines.len().saturating_sub(Self::half(height))
    }

    fn scroll_down(&mut self, n: usize, height: usize) {
        let mut target = self.begin + n;
        self.fill(target + height);
        if self.exhausted {
            target = target.min(self.bottom_limit(height).max(self.begin));
        }
        self.begin = target;
    }

    /// Apply one command for a window `height` rows tall.
    pub fn apply(&mut self, cmd: ScrollCommand, height: usize) -> ViewState {
        if self.closed {
            return ViewState::Closed;
        }
        let height = height.max(1);

        match cmd {
            ScrollCommand::LineDown => self.scroll_down(1, height),
            ScrollCommand::HalfPageDown => self.scroll_down(Self::half(height), height),
            ScrollCommand::PageDown => self.scroll_down(height, height),
            ScrollCommand::LineUp => self.begin = self.begin.saturating_sub(1),
            ScrollCommand::HalfPageUp => {
                self.begin = self.begin.saturating_sub(Self::half(height))
            }
            ScrollCommand::PageUp => self.begin = self.begin.saturating_sub(height),
            ScrollCommand::Top => self.begin = 0,
            ScrollCommand::Bottom => {
                self.drain();
                self.begin = self.bottom_limit(height);
            }
            ScrollCommand::Quit => self.closed = true,
            ScrollCommand::Unrecognized => log::trace!("ignoring unrecognized key"),
        }
        self.state()
    }

    /// The lines in a window of `height` rows, pulling as needed.
    pub fn visible(&mut self, height: usize) -> &[String] {
        self.fill(self.begin + height);
        let start = self.begin.min(self.lines.len());
        let end = (self.begin + height).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Draw the window over the whole screen.
    ///
    /// Each row is erased and rewritten in place from the home position;
    /// rows past the content are left blank. Long lines are cut at the
    /// screen edge.
    pub fn render<W: Write>(&mut self, term: &mut Terminal<W>) -> Result<()> {
        let size = term.size();
        let height = size.rows as usize;
        let cols = size.cols as usize;

        let rows: Vec<String> = self
            .visible(height)
            .iter()
            .map(|line| width::truncate(line, cols))
            .collect();

        term.write_all(b"\x1b[H")?;
        for i in 0..height {
            term.write_all(b"\x1b[2K")?;
            if let Some(row) = rows.get(i) {
                term.write_all(row.as_bytes())?;
                term.write_all(RESET.as_bytes())?;
            }
            if i + 1 < height {
                term.write_all(b"\r\n")?;
            }
        }
        term.flush()?;
        Ok(())
    }

    fn view_loop<W: Write>(
        &mut self,
        keys: &mut dyn KeyDecoder,
        term: &mut Terminal<W>,
    ) -> Result<()> {
        loop {
            self.render(term)?;
            let key = keys.read_key()?;
            let height = term.size().rows as usize;
            if self.apply(ScrollCommand::from(key), height) == ViewState::Closed {
                return Ok(());
            }
        }
    }

    /// Interactive loop: redraw, read a key, apply it, until quit.
    pub fn run<W: Write>(mut self, keys: &mut dyn KeyDecoder, term: &mut Terminal<W>) -> Result<()> {
        if self.options.altscreen {
            term.enter_alternate_screen()?;
        }
        term.clear_screen()?;

        let result = self.view_loop(keys, term);

        if self.options.altscreen {
            term.leave_alternate_screen()?;
        } else {
            term.clear_screen()?;
        }
        term.flush()?;
        log::debug!("viewport closed at line {} of {}", self.begin, self.lines.len());
        result
    }

    /// Non-interactive output: every line, unclipped, in order.
    ///
    /// Lines not yet buffered are streamed straight from the source.
    pub fn write_all_to<W: Write>(self, out: &mut W) -> Result<()> {
        let Viewport {
            source,
            end_marker,
            lines,
            mut pulled,
            exhausted,
            ..
        } = self;

        for line in &lines {
            writeln!(out, "{}", line)?;
        }
        if !exhausted {
            for line in source {
                writeln!(out, "{}", line)?;
                pulled += 1;
            }
            if let Some(marker) = end_marker {
                for line in marker(pulled) {
                    writeln!(out, "{}", line)?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}
