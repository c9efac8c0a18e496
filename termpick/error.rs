//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Error types shared by the selector, the viewport and the terminal layer.

use std::io;

/// Result type alias for termpick operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Terminal or stream I/O failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The key input stream reached end of file.
    #[error("input stream closed")]
    InputClosed,
    /// A default selection mask does not line up with its page.
    #[error("default selection for page {page} has {mask} entries but the page has {items} items")]
    SelectionLength {
        page: usize,
        mask: usize,
        items: usize,
    },
    /// Unknown option name or unparsable option value.
    #[error("invalid option: {0}")]
    InvalidOption(String),
    /// The terminal answered a query with something unexpected.
    #[error("unexpected reply to terminal query: {0:?}")]
    QueryReply(String),
    /// Pixel data does not match the raster dimensions.
    #[error("raster needs {expected} bytes of pixel data, got {actual}")]
    RasterSize { expected: usize, actual: usize },
}
