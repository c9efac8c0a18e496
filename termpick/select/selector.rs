//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Multi-page checkbox selector.

use super::command::SelectCommand;
use super::page::{Page, Pager};
use crate::config::Options;
use crate::error::Result;
use crate::input::KeyDecoder;
use crate::style::{self, Color, Layer};
use crate::ui::{Terminal, TerminalSize};
use crate::width;
use gettextrs::gettext;
use std::collections::BTreeMap;
use std::io::Write;

/// Default selection masks by page number.
pub type Defaults = BTreeMap<usize, Vec<bool>>;

/// Where the selector stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectState {
    Browsing,
    Committed,
    Aborted,
}

/// `(item, selected)` pairs of every visited page, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    pairs: Vec<(T, bool)>,
}

impl<T> Selection<T> {
    pub fn pairs(&self) -> &[(T, bool)] {
        &self.pairs
    }

    pub fn mask(&self) -> Vec<bool> {
        self.pairs.iter().map(|(_, s)| *s).collect()
    }

    pub fn count(&self) -> usize {
        self.pairs.iter().filter(|(_, s)| *s).count()
    }

    /// The selected items, in item order.
    pub fn into_selected(self) -> Vec<T> {
        self.pairs
            .into_iter()
            .filter_map(|(item, s)| s.then_some(item))
            .collect()
    }
}

/// How a selection session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Committed(Selection<T>),
    /// The user asked to quit. Deciding whether that ends the process
    /// is up to the caller.
    Aborted,
}

/// Items per page that keep a whole frame on a terminal of `size`.
///
/// Every row of a frame ends with a newline, so the cursor needs a row of
/// its own below the frame. Room is also kept for the help row, when
/// shown, and for the page footer.
pub fn page_capacity(size: TerminalSize, options: &Options) -> usize {
    let chrome = usize::from(options.help) + 2;
    (size.rows as usize).saturating_sub(chrome).max(1)
}

/// Selector state machine over a [`Pager`].
pub struct Selector<P: Pager, L> {
    pager: P,
    label: L,
    max_page: usize,
    /// Materialized pages; each page number is flipped at most once.
    pages: BTreeMap<usize, Page<P::Item>>,
    /// Masks not yet applied; removed when their page materializes.
    defaults: Defaults,
    has_defaults: bool,
    current: usize,
    cursor: usize,
    state: SelectState,
    /// Rows written by the last redraw.
    drawn_rows: usize,
    options: Options,
}

impl<P, L> Selector<P, L>
where
    P: Pager,
    L: Fn(&P::Item) -> String,
{
    pub fn new(pager: P, label: L) -> Self {
        let max_page = pager.max_page().max(1);
        Self {
            pager,
            label,
            max_page,
            pages: BTreeMap::new(),
            defaults: Defaults::new(),
            has_defaults: false,
            current: 1,
            cursor: 0,
            state: SelectState::Browsing,
            drawn_rows: 0,
            options: Options::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.has_defaults = !defaults.is_empty();
        self.defaults = defaults;
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> SelectState {
        self.state
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_page(&self) -> usize {
        self.max_page
    }

    /// Page numbers materialized so far.
    pub fn visited(&self) -> Vec<usize> {
        self.pages.keys().copied().collect()
    }

    /// The current page, materializing it if needed.
    pub fn page(&mut self) -> Result<&Page<P::Item>> {
        self.open(self.current)?;
        Ok(&self.pages[&self.current])
    }

    /// Materialize page `number` once and apply its default mask once.
    fn open(&mut self, number: usize) -> Result<()> {
        if self.pages.contains_key(&number) {
            return Ok(());
        }

        let mut page = Page::new(self.pager.flip(number)?);
        if let Some(mask) = self.defaults.remove(&number) {
            page.set_selection(number, mask)?;
        }
        log::debug!("materialized page {} with {} items", number, page.len());
        self.pages.insert(number, page);
        Ok(())
    }

    /// Switch to `number` if it is a valid page.
    fn go_to(&mut self, number: usize) -> Result<()> {
        if number < 1 || number > self.max_page {
            return Ok(());
        }
        self.open(number)?;
        self.current = number;
        self.cursor = 0;
        Ok(())
    }

    /// Apply one command and return the resulting state.
    pub fn handle(&mut self, cmd: SelectCommand) -> Result<SelectState> {
        if self.state != SelectState::Browsing {
            return Ok(self.state);
        }
        self.open(self.current)?;
        let len = self.pages[&self.current].len();

        match cmd {
            SelectCommand::Up if len > 0 => self.cursor = (self.cursor + len - 1) % len,
            SelectCommand::Down if len > 0 => self.cursor = (self.cursor + 1) % len,
            SelectCommand::Home => self.cursor = 0,
            SelectCommand::End => self.cursor = len.saturating_sub(1),
            SelectCommand::PrevPage => self.go_to(self.current - 1)?,
            SelectCommand::NextPage => self.go_to(self.current + 1)?,
            SelectCommand::Toggle => {
                if let Some(page) = self.pages.get_mut(&self.current) {
                    page.toggle(self.cursor);
                }
            }
            SelectCommand::ToggleAll => {
                if let Some(page) = self.pages.get_mut(&self.current) {
                    page.toggle_all();
                }
            }
            SelectCommand::Commit => self.state = SelectState::Committed,
            SelectCommand::Quit => self.state = SelectState::Aborted,
            SelectCommand::Up | SelectCommand::Down => {}
            SelectCommand::Unrecognized => log::trace!("ignoring unrecognized key"),
        }
        Ok(self.state)
    }

    /// Merge the visited pages into the result.
    pub fn finish(self) -> Selection<P::Item> {
        let pairs = self
            .pages
            .into_values()
            .flat_map(Page::into_pairs)
            .collect();
        Selection { pairs }
    }

    /// Result without user interaction: every page is flipped, and every
    /// item is selected unless defaults were given, in which case the
    /// defaults stand as they are.
    pub fn non_interactive(mut self) -> Result<Selection<P::Item>> {
        for number in 1..=self.max_page {
            self.open(number)?;
            if !self.has_defaults {
                if let Some(page) = self.pages.get_mut(&number) {
                    page.fill(true);
                }
            }
        }
        Ok(self.finish())
    }

    fn help_row(&self) -> String {
        let text = if self.max_page > 1 {
            gettext("{ space: toggle, 'a': all, left/right: page, enter: done, 'q': quit }")
        } else {
            gettext("{ space: toggle, 'a': all, enter: done, 'q': quit }")
        };
        let yellow = style::color(Color::Yellow, Layer::BrightForeground);
        style::paint(&text, &[&yellow], self.options.color)
    }

    /// Text of every row for the current page, fitted to `cols`.
    fn rows(&self, cols: usize) -> Vec<String> {
        let budget = cols.saturating_sub(3);
        let page = &self.pages[&self.current];
        let mut rows = Vec::with_capacity(page.len() + 2);

        if self.options.help {
            rows.push(width::truncate(&self.help_row(), budget));
        }

        for (i, item) in page.items().iter().enumerate() {
            let marker = if i == self.cursor { '>' } else { ' ' };
            let check = if page.is_selected(i) { "[x]" } else { "[ ]" };
            let label = (self.label)(item).replace(['\n', '\r'], " ");
            let row = format!("{}{} {}", marker, check, label);
            rows.push(width::fit(&row, budget, &self.options.ellipsis));
        }

        if self.max_page > 1 {
            let footer = format!("{} {}/{}", gettext("page"), self.current, self.max_page);
            rows.push(style::paint(&footer, &[style::DIM], self.options.color));
        }

        rows
    }

    /// Redraw the current page over the previous frame.
    pub fn render<W: Write>(&mut self, term: &mut Terminal<W>) -> Result<()> {
        self.open(self.current)?;
        let cols = term.size().cols as usize;
        let rows = self.rows(cols);

        term.cursor_up(self.drawn_rows)?;
        for row in &rows {
            term.write_row(row)?;
        }

        // A shorter page leaves rows of the previous one behind.
        if rows.len() < self.drawn_rows {
            let extra = self.drawn_rows - rows.len();
            for _ in 0..extra {
                term.clear_line()?;
                term.write_all(b"\r\n")?;
            }
            term.cursor_up(extra)?;
        }

        self.drawn_rows = rows.len();
        term.flush()?;
        Ok(())
    }

    /// Interactive loop: redraw, read a key, apply it, until the user
    /// commits or quits.
    pub fn run<W: Write>(
        mut self,
        keys: &mut dyn KeyDecoder,
        term: &mut Terminal<W>,
    ) -> Result<Outcome<P::Item>> {
        loop {
            self.render(term)?;
            let key = keys.read_key()?;
            match self.handle(SelectCommand::from(key))? {
                SelectState::Browsing => {}
                SelectState::Committed => {
                    log::debug!("selection committed");
                    return Ok(Outcome::Committed(self.finish()));
                }
                SelectState::Aborted => {
                    log::debug!("selection aborted");
                    return Ok(Outcome::Aborted);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::input::AnsiDecoder;
    use crate::select::page::{ChunkPager, FnPager, SinglePager};
    use proptest::prelude::{prop_assert_eq, TestCaseError};
    use proptest::test_runner::{Config, TestRunner};
    use test_log::test;

    fn headless() -> Terminal<Vec<u8>> {
        Terminal::headless(Vec::new(), TerminalSize::default(), true)
    }

    fn label(s: &&str) -> String {
        s.to_string()
    }

    fn run_keys<P>(selector: Selector<P, fn(&P::Item) -> String>, input: &[u8]) -> Outcome<P::Item>
    where
        P: Pager,
    {
        let mut keys = AnsiDecoder::new(input);
        let mut term = headless();
        selector.run(&mut keys, &mut term).unwrap()
    }

    #[test]
    fn test_space_down_space_enter() {
        let selector = Selector::new(SinglePager::new(vec!["a", "b", "c"]), label as fn(&&str) -> String);
        match run_keys(selector, b" \x1b[B \r") {
            Outcome::Committed(sel) => assert_eq!(sel.into_selected(), vec!["a", "b"]),
            Outcome::Aborted => panic!("expected commit"),
        }
    }

    #[test]
    fn test_quit_aborts() {
        let selector = Selector::new(SinglePager::new(vec!["a"]), label as fn(&&str) -> String);
        assert_eq!(run_keys(selector, b" q"), Outcome::Aborted);

        let selector = Selector::new(SinglePager::new(vec!["a"]), label as fn(&&str) -> String);
        assert_eq!(run_keys(selector, b"\x03"), Outcome::Aborted);
    }

    #[test]
    fn test_unknown_sequence_is_ignored() {
        let selector = Selector::new(SinglePager::new(vec!["a", "b"]), label as fn(&&str) -> String);
        match run_keys(selector, b"\x1bq\x1b[Z \r") {
            Outcome::Committed(sel) => assert_eq!(sel.mask(), vec![true, false]),
            Outcome::Aborted => panic!("escape sequence leaked a quit"),
        }
    }

    #[test]
    fn test_input_closed_is_an_error() {
        let selector = Selector::new(SinglePager::new(vec!["a"]), label);
        let mut keys = AnsiDecoder::new(&b" "[..]);
        let mut term = headless();
        assert!(matches!(
            selector.run(&mut keys, &mut term),
            Err(Error::InputClosed)
        ));
    }

    #[test]
    fn test_cursor_wraps() {
        let mut selector = Selector::new(SinglePager::new(vec!["a", "b", "c"]), label);
        for _ in 0..3 {
            selector.handle(SelectCommand::Down).unwrap();
        }
        assert_eq!(selector.cursor(), 0);
        selector.handle(SelectCommand::Up).unwrap();
        assert_eq!(selector.cursor(), 2);
        selector.handle(SelectCommand::Home).unwrap();
        assert_eq!(selector.cursor(), 0);
        selector.handle(SelectCommand::End).unwrap();
        assert_eq!(selector.cursor(), 2);
    }

    #[test]
    fn test_page_bounds_are_no_ops() {
        let mut selector = Selector::new(ChunkPager::new(vec!["a", "b", "c"], 2), label);
        selector.handle(SelectCommand::PrevPage).unwrap();
        assert_eq!(selector.current_page(), 1);
        selector.handle(SelectCommand::NextPage).unwrap();
        selector.handle(SelectCommand::NextPage).unwrap();
        assert_eq!(selector.current_page(), 2);
        assert_eq!(selector.page().unwrap().items(), &["c"]);
    }

    #[test]
    fn test_unvisited_pages_are_not_returned() {
        let mut defaults = Defaults::new();
        defaults.insert(1, vec![true, false]);
        defaults.insert(2, vec![true, true]);
        let mut selector =
            Selector::new(ChunkPager::new(vec!["a", "b", "c", "d"], 2), label).with_defaults(defaults);

        assert_eq!(selector.handle(SelectCommand::Commit).unwrap(), SelectState::Committed);
        let sel = selector.finish();
        assert_eq!(sel.pairs(), &[("a", true), ("b", false)]);
    }

    #[test]
    fn test_page_state_survives_navigation() {
        let mut defaults = Defaults::new();
        defaults.insert(2, vec![true, false]);
        let mut selector =
            Selector::new(ChunkPager::new(vec!["a", "b", "c", "d"], 2), label).with_defaults(defaults);

        selector.handle(SelectCommand::NextPage).unwrap();
        selector.handle(SelectCommand::Toggle).unwrap(); // clears the default on "c"
        selector.handle(SelectCommand::PrevPage).unwrap();
        selector.handle(SelectCommand::End).unwrap();
        selector.handle(SelectCommand::Toggle).unwrap();
        selector.handle(SelectCommand::NextPage).unwrap();
        assert_eq!(selector.page().unwrap().selected(), &[false, false]);

        selector.handle(SelectCommand::Commit).unwrap();
        assert_eq!(selector.finish().into_selected(), vec!["b"]);
    }

    #[test]
    fn test_pages_flip_once() {
        let mut calls = Vec::new();
        {
            let pager = FnPager::new(2, |n| {
                calls.push(n);
                Ok(vec![n])
            });
            let mut selector = Selector::new(pager, |n: &usize| n.to_string());
            for cmd in [
                SelectCommand::NextPage,
                SelectCommand::PrevPage,
                SelectCommand::NextPage,
                SelectCommand::Commit,
            ] {
                selector.handle(cmd).unwrap();
            }
            assert_eq!(selector.visited(), vec![1, 2]);
        }
        assert_eq!(calls, vec![1, 2]);
    }

    #[test]
    fn test_short_default_mask_fails_fast() {
        let mut defaults = Defaults::new();
        defaults.insert(1, vec![true]);
        let mut selector =
            Selector::new(SinglePager::new(vec!["a", "b"]), label).with_defaults(defaults);
        assert!(matches!(
            selector.handle(SelectCommand::Down),
            Err(Error::SelectionLength { page: 1, .. })
        ));
    }

    #[test]
    fn test_toggle_all_pairs() {
        let mut selector = Selector::new(SinglePager::new(vec!["a", "b", "c"]), label);
        selector.handle(SelectCommand::Toggle).unwrap();
        selector.handle(SelectCommand::ToggleAll).unwrap();
        assert!(selector.page().unwrap().is_all_selected());
        selector.handle(SelectCommand::ToggleAll).unwrap();
        assert_eq!(selector.page().unwrap().selected(), &[false, false, false]);
    }

    #[test]
    fn test_non_interactive_selects_everything() {
        let selector = Selector::new(SinglePager::new(vec!["x", "y"]), label);
        let sel = selector.non_interactive().unwrap();
        assert_eq!(sel.into_selected(), vec!["x", "y"]);

        let selector = Selector::new(ChunkPager::new(vec!["x", "y", "z"], 2), label);
        assert_eq!(selector.non_interactive().unwrap().count(), 3);
    }

    #[test]
    fn test_non_interactive_keeps_defaults() {
        let mut defaults = Defaults::new();
        defaults.insert(1, vec![false, true]);
        let selector =
            Selector::new(ChunkPager::new(vec!["x", "y", "z"], 2), label).with_defaults(defaults);
        let sel = selector.non_interactive().unwrap();
        assert_eq!(sel.mask(), vec![false, true, false]);
    }

    #[test]
    fn test_render_rows() {
        let options = Options {
            color: false,
            ..Options::default()
        };
        let mut selector =
            Selector::new(SinglePager::new(vec!["a", "b"]), label).with_options(options);
        let mut term = headless();
        selector.handle(SelectCommand::Toggle).unwrap();
        selector.render(&mut term).unwrap();

        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.contains(">[x] a"));
        assert!(out.contains(" [ ] b"));
        assert!(!out.contains("\x1b[3A"));
    }

    #[test]
    fn test_redraw_moves_back_over_previous_frame() {
        let options = Options {
            help: false,
            ..Options::default()
        };
        let mut selector = Selector::new(SinglePager::new(vec!["a", "b", "c"]), label)
            .with_options(options);
        let mut term = headless();
        selector.render(&mut term).unwrap();
        let first = term.get_ref().len();
        selector.render(&mut term).unwrap();

        let second = &term.get_ref()[first..];
        assert!(second.starts_with(b"\x1b[3A"));
    }

    #[test]
    fn test_redraw_clears_rows_of_taller_page() {
        let options = Options {
            help: false,
            color: false,
            ..Options::default()
        };
        let mut selector = Selector::new(ChunkPager::new(vec!["a", "b", "c"], 2), label)
            .with_options(options);
        let mut term = headless();
        selector.render(&mut term).unwrap(); // 2 items + footer
        selector.handle(SelectCommand::NextPage).unwrap();
        let first = term.get_ref().len();
        selector.render(&mut term).unwrap(); // 1 item + footer

        let second = String::from_utf8(term.get_ref()[first..].to_vec()).unwrap();
        assert!(second.starts_with("\x1b[3A"));
        assert!(second.contains("page 2/2"));
        assert!(second.ends_with("\r\x1b[2K\r\n\x1b[1A"));
    }

    #[test]
    fn test_default_sized_frame_stays_on_screen() {
        for (rows, help) in [(24, true), (24, false), (10, true), (4, true)] {
            let size = TerminalSize { rows, cols: 80 };
            let options = Options {
                help,
                ..Options::default()
            };
            let per_page = page_capacity(size, &options);
            let items: Vec<usize> = (0..per_page * 3).collect();
            let mut selector = Selector::new(ChunkPager::new(items, per_page), |i: &usize| {
                i.to_string()
            })
            .with_options(options);
            let mut term = Terminal::headless(Vec::new(), size, true);
            selector.render(&mut term).unwrap();

            // The cursor ends one line below the last newline.
            let newlines = term.get_ref().windows(2).filter(|w| *w == b"\r\n").count();
            assert!(
                newlines < rows as usize,
                "frame of {} rows does not fit {} screen lines",
                newlines,
                rows
            );
            let first = term.get_ref().len();
            selector.render(&mut term).unwrap();
            let up = format!("\x1b[{}A", newlines);
            assert!(term.get_ref()[first..].starts_with(up.as_bytes()));
        }
    }

    #[test]
    fn test_render_fits_wide_labels() {
        let options = Options {
            help: false,
            ..Options::default()
        };
        let size = TerminalSize { rows: 10, cols: 13 };
        let mut term = Terminal::headless(Vec::new(), size, true);
        let mut selector =
            Selector::new(SinglePager::new(vec!["日本語のテキスト"]), label).with_options(options);
        selector.render(&mut term).unwrap();

        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.contains(">[ ] 日..."));
    }

    #[test]
    fn test_toggle_parity() {
        let mut runner = TestRunner::new(Config {
            cases: 64,
            ..Config::default()
        });
        let strategy = (
            1usize..12,
            proptest::collection::vec(0usize..12, 0..40),
        );
        runner
            .run(&strategy, |(n, toggles)| {
                let items: Vec<usize> = (0..n).collect();
                let mut selector = Selector::new(SinglePager::new(items), |i: &usize| i.to_string());
                let mut counts = vec![0usize; n];
                for t in toggles {
                    let index = t % n;
                    counts[index] += 1;
                    selector.handle(SelectCommand::Home).map_err(|e| TestCaseError::fail(e.to_string()))?;
                    for _ in 0..index {
                        selector.handle(SelectCommand::Down).map_err(|e| TestCaseError::fail(e.to_string()))?;
                    }
                    selector.handle(SelectCommand::Toggle).map_err(|e| TestCaseError::fail(e.to_string()))?;
                }
                selector.handle(SelectCommand::Commit).map_err(|e| TestCaseError::fail(e.to_string()))?;
                let odd = counts.iter().filter(|&&c| c % 2 == 1).count();
                prop_assert_eq!(selector.finish().count(), odd);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_toggle_all_twice() {
        let mut runner = TestRunner::new(Config {
            cases: 64,
            ..Config::default()
        });
        runner
            .run(&proptest::collection::vec(proptest::bool::ANY, 1..16), |mask| {
                let uniform_true = mask.iter().all(|&s| s);
                let mut page = Page::new(vec![(); mask.len()]);
                page.set_selection(1, mask.clone())
                    .map_err(|e| TestCaseError::fail(e.to_string()))?;
                page.toggle_all();
                page.toggle_all();
                prop_assert_eq!(page.selected().to_vec(), vec![uniform_true; mask.len()]);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_down_count_times_returns_home() {
        let mut runner = TestRunner::new(Config {
            cases: 32,
            ..Config::default()
        });
        runner
            .run(&(1usize..50), |n| {
                let mut selector =
                    Selector::new(SinglePager::new((0..n).collect::<Vec<_>>()), |i: &usize| i.to_string());
                for _ in 0..n {
                    selector.handle(SelectCommand::Down).map_err(|e| TestCaseError::fail(e.to_string()))?;
                }
                prop_assert_eq!(selector.cursor(), 0);
                Ok(())
            })
            .unwrap();
    }
}
