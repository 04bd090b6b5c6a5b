//! EBNF railroad diagram core
//!
//! This library parses grammars written in Extended Backus–Naur Form and
//! lays every rule out as a railroad diagram: an abstract geometry tree of
//! boxes, rails, branch lines and arrows. It does not render anything —
//! hosts supply text measurement through [`TextMeasurer`] and consume the
//! geometry through a [`DiagramSink`] (or as a plain `Vec`).
//!
//! # Example
//!
//! ```rust
//! use ebnf_railroad::{diagrams, GlyphMetrics};
//!
//! let diagrams = diagrams(
//!     "expr = term , ( '+' | '-' ) , term;",
//!     &GlyphMetrics::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(diagrams.len(), 1);
//! assert_eq!(diagrams[0].name, "expr");
//! assert!(diagrams[0].geometry.width > 0.0);
//! ```

pub mod diagram;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod parser;

pub use diagram::{assemble, diagrams, Diagram, DiagramSink};
pub use error::ParseError;
pub use layout::{Extent, Geometry, LayoutConfig, LayoutError};
pub use metrics::{GlyphMetrics, TextMeasurer};
pub use parser::{parse, parse_statement, Grammar, Node, Statement, TerminalStyle};

use thiserror::Error;

/// Errors that can occur during the assemble pipeline
#[derive(Debug, Error)]
pub enum DiagramError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl From<Vec<ParseError>> for DiagramError {
    fn from(errors: Vec<ParseError>) -> Self {
        DiagramError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
