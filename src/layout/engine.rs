//! Recursive box-model layout
//!
//! Turns a rule tree into a geometry tree in one pure pass. Each node is
//! sized bottom-up from the measurer's text extents, then children are
//! positioned relative to their parent:
//!
//! - sequences run left to right, with every child dropped onto the
//!   deepest sibling baseline so the entry/exit rails form one line;
//! - choices and loops stack their rows vertically and share a single
//!   routine, differing only in which branch carries the direction arrow.
//!
//! Repetition sugar never reaches this module: the parser desugars `?`,
//! `+` and `*` into choice/loop combinations beforehand, so there is no
//! separate "optional" or "repeat" code path here.

use crate::layout::config::LayoutConfig;
use crate::layout::error::LayoutError;
use crate::layout::types::{Child, Connector, Content, Extent, Geometry, Point, Side, StackKind};
use crate::metrics::TextMeasurer;
use crate::parser::ast::{Node, TerminalStyle};

/// Lay out a rule tree, producing a fresh geometry tree
///
/// Pure function of the tree, the measurer and the configuration; the
/// input tree is not modified and no geometry is shared between calls.
pub fn compute(
    node: &Node,
    measurer: &dyn TextMeasurer,
    config: &LayoutConfig,
) -> Result<Geometry, LayoutError> {
    match node {
        Node::Terminal { text, style } => Ok(text_box(
            measurer.measure(text, *style),
            Content::Terminal {
                text: text.clone(),
                style: *style,
            },
            config,
        )),
        Node::NonTerminal(name) => Ok(text_box(
            measurer.measure(name, TerminalStyle::Normal),
            Content::NonTerminal { name: name.clone() },
            config,
        )),
        Node::Empty => Ok(empty_box(config)),
        Node::Sequence(children) => sequence(children, measurer, config),
        Node::Choice(children) => {
            let rows: Vec<&Node> = children.iter().collect();
            stack(&rows, StackKind::Choice, measurer, config)
        }
        Node::Loop { body, back } => {
            // A loop is a two-row stack: the body on top, the back path
            // underneath.
            stack(&[&**body, &**back], StackKind::Loop, measurer, config)
        }
    }
}

/// Rail–box–rail for terminals and non-terminals
fn text_box(extent: Extent, content: Content, config: &LayoutConfig) -> Geometry {
    let width = extent.width + 2.0 * config.rail_span;
    let height = extent.height;
    let baseline = height / 2.0;
    Geometry {
        width,
        height,
        baseline,
        content,
        children: vec![],
        connectors: vec![
            Connector::HRail {
                from: Point::new(0.0, baseline),
                length: config.rail_span,
            },
            Connector::HRail {
                from: Point::new(width - config.rail_span, baseline),
                length: config.rail_span,
            },
        ],
    }
}

/// The zero-content placeholder: a short run of plain rail
fn empty_box(config: &LayoutConfig) -> Geometry {
    let width = 2.0 * config.empty_padding;
    let height = config.empty_core + 2.0 * config.empty_padding;
    let baseline = height / 2.0;
    Geometry {
        width,
        height,
        baseline,
        content: Content::Empty,
        children: vec![],
        connectors: vec![Connector::HRail {
            from: Point::new(0.0, baseline),
            length: width,
        }],
    }
}

fn sequence(
    children: &[Node],
    measurer: &dyn TextMeasurer,
    config: &LayoutConfig,
) -> Result<Geometry, LayoutError> {
    let laid: Vec<Geometry> = children
        .iter()
        .map(|c| compute(c, measurer, config))
        .collect::<Result<_, _>>()?;

    // Align every child's rail on the deepest baseline; shifting is
    // vertical only, so the width is the plain sum.
    let baseline = laid.iter().map(|g| g.baseline).fold(0.0_f64, f64::max);

    let mut placed = Vec::with_capacity(laid.len());
    let mut x = 0.0;
    let mut height = 0.0_f64;
    for geometry in laid {
        let dy = baseline - geometry.baseline;
        height = height.max(dy + geometry.height);
        let dx = x;
        x += geometry.width;
        placed.push(Child { dx, dy, geometry });
    }

    Ok(Geometry {
        width: x,
        height,
        baseline,
        content: Content::Sequence,
        children: placed,
        connectors: vec![],
    })
}

/// Shared vertical-stack layout for choices and loops
fn stack(
    rows: &[&Node],
    kind: StackKind,
    measurer: &dyn TextMeasurer,
    config: &LayoutConfig,
) -> Result<Geometry, LayoutError> {
    if rows.len() < 2 {
        return Err(LayoutError::degenerate(rows.len()));
    }

    let laid: Vec<Geometry> = rows
        .iter()
        .map(|c| compute(c, measurer, config))
        .collect::<Result<_, _>>()?;

    let max_row_width = laid.iter().map(|g| g.width).fold(0.0_f64, f64::max);
    let width = max_row_width + 2.0 * config.branch_margin;
    // The entry/exit rail passes through the top row.
    let baseline = laid[0].baseline;

    let mut children: Vec<Child> = Vec::with_capacity(laid.len());
    let mut rail_ys = Vec::with_capacity(laid.len());
    let mut y = 0.0;
    for (i, geometry) in laid.into_iter().enumerate() {
        if i > 0 {
            y += config.row_gap;
        }
        let dx = (width - geometry.width) / 2.0;
        rail_ys.push(y + geometry.baseline);
        let row_height = geometry.height;
        children.push(Child {
            dx,
            dy: y,
            geometry,
        });
        y += row_height;
    }
    let height = y;

    let left_x = config.rail_span;
    let right_x = width - config.rail_span;
    let branch_bottom = rail_ys[rail_ys.len() - 1];

    let mut connectors = Vec::new();

    // Entry and exit rails join the node edges to the centered top row.
    let top_left = children[0].dx;
    let top_right = children[0].dx + children[0].geometry.width;
    connectors.push(Connector::HRail {
        from: Point::new(0.0, baseline),
        length: top_left,
    });
    connectors.push(Connector::HRail {
        from: Point::new(top_right, baseline),
        length: width - top_right,
    });

    // One branch rail per side, spanning from the top row's rail down to
    // the bottom row's entry point.
    connectors.push(Connector::VRail {
        from: Point::new(left_x, baseline),
        length: branch_bottom - baseline,
    });
    connectors.push(Connector::VRail {
        from: Point::new(right_x, baseline),
        length: branch_bottom - baseline,
    });

    // Each row below the first hooks onto both branches with an angled
    // stub; on the right the row's box is additionally bridged to the
    // branch with a horizontal rail.
    for (child, &rail_y) in children.iter().zip(rail_ys.iter()).skip(1) {
        connectors.push(Connector::Stub {
            from: Point::new(left_x, rail_y),
            side: Side::Left,
        });
        connectors.push(Connector::Stub {
            from: Point::new(right_x, rail_y),
            side: Side::Right,
        });
        let row_right = child.dx + child.geometry.width;
        connectors.push(Connector::HRail {
            from: Point::new(row_right, rail_y),
            length: (right_x - config.stub_run) - row_right,
        });
    }

    // Loops return flow on the left branch; choices skip ahead on the
    // right one.
    let arrow_side = match kind {
        StackKind::Loop => Side::Left,
        StackKind::Choice => Side::Right,
    };
    let arrow_x = match arrow_side {
        Side::Left => left_x,
        Side::Right => right_x,
    };
    connectors.push(Connector::Arrow {
        at: Point::new(arrow_x, baseline + config.row_gap),
        side: arrow_side,
    });

    Ok(Geometry {
        width,
        height,
        baseline,
        content: Content::Stack { kind },
        children,
        connectors,
    })
}
