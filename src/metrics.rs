//! Text measurement for the layout engine
//!
//! The layout engine never inspects a rendered surface; it asks a
//! [`TextMeasurer`] for the intrinsic size of each label. Hosts with real
//! font metrics implement the trait themselves; [`GlyphMetrics`] is the
//! bundled fixed-advance approximation, loadable from a TOML file so the
//! numbers can be tuned per target font without recompiling.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::types::Extent;
use crate::parser::ast::TerminalStyle;

/// Measurement collaborator consumed by the layout engine
pub trait TextMeasurer {
    /// Intrinsic size of `text` rendered in the given terminal style
    fn measure(&self, text: &str, style: TerminalStyle) -> Extent;
}

/// Errors that can occur when loading metrics files
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Failed to read metrics file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse metrics TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Fixed-advance text metrics
///
/// Approximates a monospace rendering: width is per-character advance times
/// character count, height is one line. Special terminals (the `?…?`
/// convention) usually render in a different face, so they get their own
/// advance.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMetrics {
    pub char_width: f64,
    pub special_char_width: f64,
    pub line_height: f64,
}

/// TOML structure for deserializing metrics files
#[derive(Deserialize)]
struct TomlMetrics {
    text: TomlText,
}

#[derive(Deserialize)]
struct TomlText {
    char_width: f64,
    line_height: f64,
    special_char_width: Option<f64>,
}

impl GlyphMetrics {
    /// Load metrics from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, MetricsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load metrics from a TOML string
    ///
    /// ```toml
    /// [text]
    /// char_width = 7.0
    /// line_height = 14.0
    /// special_char_width = 6.5   # optional, defaults to char_width
    /// ```
    pub fn from_str(content: &str) -> Result<Self, MetricsError> {
        let parsed: TomlMetrics = toml::from_str(content)?;
        Ok(GlyphMetrics {
            char_width: parsed.text.char_width,
            special_char_width: parsed
                .text
                .special_char_width
                .unwrap_or(parsed.text.char_width),
            line_height: parsed.text.line_height,
        })
    }
}

impl Default for GlyphMetrics {
    /// 7px per character and a 14px line, a serviceable estimate for a
    /// 14px sans-serif label
    fn default() -> Self {
        Self {
            char_width: 7.0,
            special_char_width: 7.0,
            line_height: 14.0,
        }
    }
}

impl TextMeasurer for GlyphMetrics {
    fn measure(&self, text: &str, style: TerminalStyle) -> Extent {
        let advance = match style {
            TerminalStyle::Normal => self.char_width,
            TerminalStyle::Special => self.special_char_width,
        };
        Extent::new(text.chars().count() as f64 * advance, self.line_height)
    }
}
