//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! SGR color and attribute codes.

/// Reset all attributes.
pub const RESET: &str = "\x1b[m";

pub const BOLD: &str = "1";
pub const DIM: &str = "2";

/// The eight basic terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

/// Where a color applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Foreground,
    Background,
    BrightForeground,
    BrightBackground,
}

impl Layer {
    fn base(self) -> u8 {
        match self {
            Layer::Foreground => 30,
            Layer::Background => 40,
            Layer::BrightForeground => 90,
            Layer::BrightBackground => 100,
        }
    }
}

/// SGR parameter for a basic color.
pub fn color(c: Color, layer: Layer) -> String {
    (layer.base() + c as u8).to_string()
}

/// SGR parameter for a 24-bit color.
pub fn rgb(r: u8, g: u8, b: u8, layer: Layer) -> String {
    let kind = match layer {
        Layer::Background | Layer::BrightBackground => 48,
        Layer::Foreground | Layer::BrightForeground => 38,
    };
    format!("{};2;{};{};{}", kind, r, g, b)
}

/// Wrap `s` in the given SGR codes followed by a reset.
///
/// With `enabled` false the text is returned untouched, which is what
/// non-terminal output wants.
pub fn paint(s: &str, codes: &[&str], enabled: bool) -> String {
    if !enabled || codes.is_empty() {
        return s.to_string();
    }
    format!("\x1b[{}m{}{}", codes.join(";"), s, RESET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_codes() {
        assert_eq!(color(Color::Yellow, Layer::BrightForeground), "93");
        assert_eq!(color(Color::Red, Layer::Background), "41");
        assert_eq!(rgb(1, 2, 3, Layer::Background), "48;2;1;2;3");
    }

    #[test]
    fn test_paint() {
        let fg = color(Color::Green, Layer::Foreground);
        assert_eq!(paint("ok", &[&fg, BOLD], true), "\x1b[32;1mok\x1b[m");
        assert_eq!(paint("ok", &[&fg], false), "ok");
    }
}
