//! Error types for the layout engine

use thiserror::Error;

/// Errors that can occur during layout computation
///
/// These are structural violations of the rule tree, not syntax problems;
/// the parser never produces trees that trip them, but trees built by hand
/// can.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A choice or loop stack with fewer than two stacked elements
    #[error("stack requires at least one alternative beyond the first (got {rows} row(s))")]
    DegenerateStack { rows: usize },
}

impl LayoutError {
    pub fn degenerate(rows: usize) -> Self {
        Self::DegenerateStack { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_stack_display() {
        let err = LayoutError::degenerate(1);
        assert!(err
            .to_string()
            .contains("at least one alternative beyond the first"));
    }
}
