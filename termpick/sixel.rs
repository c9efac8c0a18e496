//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Inline images: capability probing, raster description and sizing.
//!
//! Encoding is left to an [`ImageSink`]; this module only decides whether
//! and how big an image gets drawn.

use crate::error::{Error, Result};
use crate::session::Session;
use crate::ui::Terminal;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;

/// Primary device attributes request.
pub const DA_REQUEST: &str = "\x1b[c";

/// Attribute number a terminal reports for sixel graphics.
const SIXEL_ATTRIBUTE: &str = "4";

/// `ESC [ ? attrs c`
static DA_REPLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[\?([0-9;]*)c").expect("reply pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba8888,
    Rgb888,
    /// One palette index per pixel.
    Pal8,
    Gray8,
    /// One bit per pixel, rows padded to a whole byte.
    Gray1,
}

impl PixelFormat {
    /// Bytes needed for one row of `width` pixels.
    pub fn row_bytes(self, width: u32) -> usize {
        let width = width as usize;
        match self {
            PixelFormat::Rgba8888 => width * 4,
            PixelFormat::Rgb888 => width * 3,
            PixelFormat::Pal8 | PixelFormat::Gray8 => width,
            PixelFormat::Gray1 => width.div_ceil(8),
        }
    }
}

/// Decoded image ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: Vec<u8>,
    /// RGB entries, used only by [`PixelFormat::Pal8`].
    pub palette: Vec<[u8; 3]>,
}

impl Raster {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = format.row_bytes(width) * height as usize;
        if data.len() != expected {
            return Err(Error::RasterSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
            palette: Vec::new(),
        })
    }

    pub fn with_palette(mut self, palette: Vec<[u8; 3]>) -> Self {
        self.palette = palette;
        self
    }

    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }
}

/// Pixel dimensions. In a bound, 0 means unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Encodes rasters onto a byte stream.
pub trait ImageSink {
    fn encode(&mut self, raster: &Raster, out: &mut dyn Write) -> Result<()>;
}

/// Draw `raster` through `sink`. Returns whether anything was written;
/// nothing is when the output is not a terminal.
pub fn render_image<S, W>(sink: &mut S, raster: &Raster, term: &mut Terminal<W>) -> Result<bool>
where
    S: ImageSink + ?Sized,
    W: Write,
{
    if !term.is_interactive() {
        log::debug!("output is not a terminal, skipping image");
        return Ok(false);
    }
    sink.encode(raster, term)?;
    term.flush()?;
    Ok(true)
}

/// Whether a device attributes reply advertises sixel graphics.
pub fn supports_sixel(reply: &str) -> bool {
    DA_REPLY
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .is_some_and(|attrs| attrs.as_str().split(';').any(|a| a == SIXEL_ATTRIBUTE))
}

/// Ask the terminal for its primary device attributes.
pub fn query_device_attributes(session: &mut Session) -> Result<String> {
    let reply = session.query(DA_REQUEST, b'c')?;
    log::debug!("device attributes reply: {:?}", reply);
    if !DA_REPLY.is_match(&reply) {
        return Err(Error::QueryReply(reply));
    }
    Ok(reply)
}

fn scale(size: ImageSize, bound: ImageSize) -> f64 {
    let axis = |have: u32, max: u32| {
        if max == 0 {
            1.0
        } else {
            f64::from(max) / f64::from(have)
        }
    };
    axis(size.width, bound.width).min(axis(size.height, bound.height))
}

fn resize(size: ImageSize, ratio: f64) -> ImageSize {
    ImageSize {
        width: (f64::from(size.width) * ratio) as u32,
        height: (f64::from(size.height) * ratio) as u32,
    }
}

/// Scale `size` up or down, keeping its aspect, to just fit `bound`.
pub fn fit(size: ImageSize, bound: ImageSize) -> ImageSize {
    if size.width == 0 || size.height == 0 {
        return size;
    }
    resize(size, scale(size, bound))
}

/// Like [`fit`] but never enlarges.
pub fn limit(size: ImageSize, bound: ImageSize) -> ImageSize {
    if size.width == 0 || size.height == 0 {
        return size;
    }
    let ratio = scale(size, bound);
    if ratio < 1.0 {
        resize(size, ratio)
    } else {
        size
    }
}
