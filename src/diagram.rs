//! Diagram assembler
//!
//! Drives the parse → layout pipeline over a whole grammar and hands each
//! finished diagram to a [`DiagramSink`]. Rendering the geometry to an
//! actual surface is the sink's business, not this crate's.

use serde::Serialize;

use crate::layout::{self, Geometry, LayoutConfig};
use crate::metrics::TextMeasurer;
use crate::parser;
use crate::DiagramError;

/// One finished diagram, ready for a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    /// Rule name, the left-hand side of the statement
    pub name: String,
    /// Canonical literal rule body, whitespace-free
    pub rule_text: String,
    /// Abstract geometry of the rule's railroad diagram
    pub geometry: Geometry,
}

/// Rendering collaborator: receives diagrams one by one, in source order
pub trait DiagramSink {
    fn emit(&mut self, diagram: Diagram);
}

/// Collecting sink, handy for hosts that want the diagrams as a batch
impl DiagramSink for Vec<Diagram> {
    fn emit(&mut self, diagram: Diagram) {
        self.push(diagram);
    }
}

/// Assemble every statement of `source` into a diagram
///
/// Statements are processed strictly in source order: parse one, lay it
/// out, emit it, advance. The first failure aborts the remainder of the
/// grammar, but diagrams already handed to the sink stay emitted.
/// Returns the number of diagrams emitted. Whitespace-only input is not
/// an error; it simply produces nothing.
pub fn assemble(
    source: &str,
    measurer: &dyn TextMeasurer,
    config: &LayoutConfig,
    sink: &mut dyn DiagramSink,
) -> Result<usize, DiagramError> {
    let mut emitted = 0;
    let mut offset = 0;
    while !source[offset..].trim_start().is_empty() {
        let (stmt, consumed) = parser::parse_statement(&source[offset..]).map_err(|errs| {
            DiagramError::Parse(errs.into_iter().map(|e| e.shifted(offset)).collect())
        })?;
        let geometry = layout::compute(&stmt.rule, measurer, config)?;
        sink.emit(Diagram {
            name: stmt.name,
            rule_text: stmt.rule_text,
            geometry,
        });
        emitted += 1;
        offset += consumed;
    }
    Ok(emitted)
}

/// Assemble with the default layout configuration, collecting into a `Vec`
pub fn diagrams(source: &str, measurer: &dyn TextMeasurer) -> Result<Vec<Diagram>, DiagramError> {
    let mut collected = Vec::new();
    assemble(source, measurer, &LayoutConfig::default(), &mut collected)?;
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::GlyphMetrics;

    #[test]
    fn test_one_diagram_per_statement_in_order() {
        let source = "A = x; B = y; C = z;";
        let diagrams = diagrams(source, &GlyphMetrics::default()).expect("should assemble");
        let names: Vec<_> = diagrams.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_missing_semicolon_emits_nothing() {
        let result = diagrams(r#"S = "a" | "b""#, &GlyphMetrics::default());
        assert!(matches!(result, Err(DiagramError::Parse(_))));
    }

    #[test]
    fn test_error_preserves_prior_emissions() {
        // The hand-off happens statement by statement, so the first rule
        // reaches the sink before the second one fails.
        let mut sink: Vec<Diagram> = Vec::new();
        let result = assemble(
            "A = x; B = ;",
            &GlyphMetrics::default(),
            &LayoutConfig::default(),
            &mut sink,
        );
        assert!(result.is_err());
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].name, "A");
    }

    #[test]
    fn test_whitespace_only_input_yields_zero() {
        let mut sink: Vec<Diagram> = Vec::new();
        let count = assemble(
            " \n\t ",
            &GlyphMetrics::default(),
            &LayoutConfig::default(),
            &mut sink,
        )
        .expect("should succeed");
        assert_eq!(count, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_diagram_carries_rule_text_and_geometry() {
        let diagrams = diagrams(r#"S = "a", "b";"#, &GlyphMetrics::default()).expect("assemble");
        assert_eq!(diagrams.len(), 1);
        assert_eq!(diagrams[0].rule_text, r#""a","b""#);
        assert!(diagrams[0].geometry.width > 0.0);
    }
}
