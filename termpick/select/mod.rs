//! Item selection.
//!
//! [`select_items`] and [`select_pages`] run a complete session on the
//! process terminal. [`Selector`] is the state machine underneath, usable
//! with any key source and output.

mod command;
mod page;
mod selector;

pub use command::SelectCommand;
pub use page::{ChunkPager, FnPager, Page, Pager, SinglePager};
pub use selector::{page_capacity, Defaults, Outcome, SelectState, Selection, Selector};

use crate::config::Options;
use crate::error::Result;
use crate::session::Session;
use crate::ui::Terminal;

/// Select from a flat list shown as a single page.
///
/// `default`, if given, is the initial mask and must match `items` in
/// length.
///
/// The page is drawn whole, so it should hold no more than
/// [`page_capacity`] items for the current terminal. Longer lists belong
/// in [`select_pages`] with a [`ChunkPager`] of that size.
pub fn select_items<T, L>(
    items: Vec<T>,
    label: L,
    default: Option<Vec<bool>>,
    options: &Options,
) -> Result<Outcome<T>>
where
    L: Fn(&T) -> String,
{
    let mut defaults = Defaults::new();
    if let Some(mask) = default {
        defaults.insert(1, mask);
    }
    select_pages(SinglePager::new(items), label, defaults, options)
}

/// Select from a paged source.
///
/// When standard output is not a terminal no session is opened and the
/// non-interactive result is returned as committed.
pub fn select_pages<P, L>(
    pager: P,
    label: L,
    defaults: Defaults,
    options: &Options,
) -> Result<Outcome<P::Item>>
where
    P: Pager,
    L: Fn(&P::Item) -> String,
{
    let mut term = Terminal::stdout();
    let selector = Selector::new(pager, label)
        .with_defaults(defaults)
        .with_options(options.clone());

    if !term.is_interactive() {
        log::debug!("output is not a terminal, selecting without interaction");
        return selector.non_interactive().map(Outcome::Committed);
    }

    Session::scoped(options.keys, |keys| selector.run(keys, &mut term))
}
