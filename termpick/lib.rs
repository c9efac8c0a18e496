//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Terminal selection and paging toolkit.
//!
//! - [`select`]: multi-page checkbox selector returning the chosen items.
//! - [`view`]: scrolling viewer over a lazily produced line sequence.
//!
//! Both run inside a raw-mode [`session::Session`] on the controlling
//! terminal and fall back to plain output when standard output is not a
//! terminal.

pub mod config;
pub mod error;
pub mod input;
pub mod select;
pub mod session;
pub mod sixel;
pub mod source;
pub mod style;
pub mod ui;
pub mod view;
pub mod width;

pub use config::Options;
pub use error::{Error, Result};
pub use select::{select_items, select_pages, Outcome, Selection};
pub use view::page_lines;

/// Text domain for message translation.
pub const PROJECT_NAME: &str = "termpick";

/// Exit status of a selection the user quit.
pub const EXIT_ABORTED: i32 = 130;
