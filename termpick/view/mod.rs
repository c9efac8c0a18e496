//! Scrolling viewer for long or endless output.

mod command;
mod viewport;

pub use command::ScrollCommand;
pub use viewport::{EndMarker, ViewState, Viewport};

use crate::config::Options;
use crate::error::Result;
use crate::session::Session;
use crate::ui::Terminal;

/// Show `lines` in a viewport on the process terminal.
///
/// When standard output is not a terminal every line is written through
/// unclipped, followed by the end marker if one is given.
pub fn page_lines<I>(lines: I, end_marker: Option<EndMarker>, options: &Options) -> Result<()>
where
    I: Iterator<Item = String>,
{
    let mut term = Terminal::stdout();
    let mut view = Viewport::new(lines).with_options(options.clone());
    if let Some(marker) = end_marker {
        view = view.with_end_marker(marker);
    }

    if !term.is_interactive() {
        log::debug!("output is not a terminal, writing lines through");
        return view.write_all_to(&mut term);
    }

    Session::scoped(options.keys, |keys| view.run(keys, &mut term))
}
