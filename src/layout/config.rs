//! Configuration for the layout engine

/// Spacing constants for the box model
///
/// Defaults reproduce the classic railroad proportions: 10px lead rails,
/// a 20px branch margin per side of a stack, and a 10px gap between
/// stacked rows.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Horizontal rail attached to each side of a text box
    pub rail_span: f64,

    /// Width reserved on each side of a stack for the vertical branch rails
    pub branch_margin: f64,

    /// Horizontal run of the angled stubs joining rows to a branch rail
    pub stub_run: f64,

    /// Vertical gap between consecutive rows of a stack
    pub row_gap: f64,

    /// Core height of the empty placeholder box
    pub empty_core: f64,

    /// Padding around the empty placeholder box
    pub empty_padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rail_span: 10.0,
            branch_margin: 20.0,
            stub_run: 10.0,
            row_gap: 10.0,
            empty_core: 20.0,
            empty_padding: 5.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rail span attached to text boxes
    pub fn with_rail_span(mut self, span: f64) -> Self {
        self.rail_span = span;
        self
    }

    /// Set the per-side branch margin of stacks
    pub fn with_branch_margin(mut self, margin: f64) -> Self {
        self.branch_margin = margin;
        self
    }

    /// Set the vertical gap between stacked rows
    pub fn with_row_gap(mut self, gap: f64) -> Self {
        self.row_gap = gap;
        self
    }
}
