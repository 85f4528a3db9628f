//! Terminal color escapes.
//!
//! Colors are resolved once into a [`Palette`] value and handed to whatever
//! renders text. Nothing reads a global switch.

use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

/// How color output is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Parse a mode name (`auto`, `always`, `never`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" | "on" | "1" => Some(Self::Always),
            "never" | "off" | "0" => Some(Self::Never),
            _ => None,
        }
    }

    /// Resolve into a concrete palette.
    pub fn resolve(self) -> Palette {
        let enabled = match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
        };
        Palette::new(enabled)
    }
}

/// ANSI escape set. All fields are empty strings when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub red: &'static str,
    pub green: &'static str,
    pub blue: &'static str,
    pub cyan: &'static str,
    pub yellow: &'static str,
    pub magenta: &'static str,
    pub gray: &'static str,
    pub white: &'static str,
    pub bold: &'static str,
    pub end: &'static str,
}

impl Palette {
    /// Palette with every escape empty.
    pub const PLAIN: Self = Self {
        red: "",
        green: "",
        blue: "",
        cyan: "",
        yellow: "",
        magenta: "",
        gray: "",
        white: "",
        bold: "",
        end: "",
    };

    /// Bright ANSI palette.
    pub const ANSI: Self = Self {
        red: "\x1b[91m",
        green: "\x1b[92m",
        blue: "\x1b[94m",
        cyan: "\x1b[96m",
        yellow: "\x1b[93m",
        magenta: "\x1b[95m",
        gray: "\x1b[90m",
        white: "\x1b[97m",
        bold: "\x1b[1m",
        end: "\x1b[0m",
    };

    #[inline]
    pub const fn new(enabled: bool) -> Self {
        if enabled { Self::ANSI } else { Self::PLAIN }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        !self.end.is_empty()
    }

    /// Wrap `text` in `color` followed by the reset escape.
    pub fn paint(&self, color: &str, text: impl std::fmt::Display) -> String {
        format!("{}{}{}", color, text, self.end)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::PLAIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_palette_is_empty() {
        let p = ColorMode::Never.resolve();
        assert!(!p.is_enabled());
        assert_eq!(p.paint(p.red, "x"), "x");
    }

    #[test]
    fn test_ansi_paint() {
        let p = ColorMode::Always.resolve();
        assert_eq!(p.paint(p.red, "err"), "\x1b[91merr\x1b[0m");
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(ColorMode::parse("Never"), Some(ColorMode::Never));
        assert_eq!(ColorMode::parse(" always "), Some(ColorMode::Always));
        assert_eq!(ColorMode::parse("sometimes"), None);
    }
}
