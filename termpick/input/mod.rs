//! Input handling module.
//!
//! This module provides key event types and decoders that turn raw
//! terminal bytes into them.

mod decoder;
mod key;

pub use decoder::{AnsiDecoder, ConsoleDecoder, KeyDecoder, KeyProtocol};
pub use key::Key;
