//! Core types for the layout engine

use serde::Serialize;

use crate::parser::ast::TerminalStyle;

/// A 2D point in the local coordinate system of a geometry node
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Intrinsic size of a rendered text label, as reported by a measurer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// What a geometry node represents, mirroring the rule tree shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Content {
    Terminal { text: String, style: TerminalStyle },
    NonTerminal { name: String },
    Empty,
    Sequence,
    Stack { kind: StackKind },
}

/// The two rule shapes that render as a vertical stack
///
/// They share one layout algorithm; the kind only decides which branch
/// carries the direction arrow (flow returns on a loop, flow skips ahead
/// on a choice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StackKind {
    Choice,
    Loop,
}

/// Left or right vertical branch of a stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Left,
    Right,
}

/// A rail or decoration primitive, in node-local coordinates
///
/// Renderers draw these as-is; the layout engine guarantees that rails
/// meet boxes and each other on the shared baselines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Connector {
    /// Horizontal rail starting at `from`, extending `length` to the right
    HRail { from: Point, length: f64 },
    /// Vertical branch rail starting at `from`, extending `length` downward
    VRail { from: Point, length: f64 },
    /// Angled stub joining a row's rail to a branch rail; `from` is the
    /// attachment point on the branch, the run is `LayoutConfig::stub_run`
    Stub { from: Point, side: Side },
    /// Upward-pointing arrow decoration on the given branch
    Arrow { at: Point, side: Side },
}

/// A positioned child of a geometry node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Child {
    /// Horizontal offset within the parent
    pub dx: f64,
    /// Vertical offset within the parent
    pub dy: f64,
    pub geometry: Geometry,
}

/// Abstract geometry of one laid-out rule tree node
///
/// Invariants: `width, height >= 0` and `0 <= baseline <= height`. The
/// baseline is the vertical offset of the horizontal rail entering and
/// leaving the node; siblings are aligned on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    pub baseline: f64,
    pub content: Content,
    pub children: Vec<Child>,
    pub connectors: Vec<Connector>,
}

impl Geometry {
    /// Count the angled stubs on one branch of this node
    pub fn stub_count(&self, side: Side) -> usize {
        self.connectors
            .iter()
            .filter(|c| matches!(c, Connector::Stub { side: s, .. } if *s == side))
            .count()
    }

    /// Find the arrow decoration, if this node carries one
    pub fn arrow(&self) -> Option<(Point, Side)> {
        self.connectors.iter().find_map(|c| match c {
            Connector::Arrow { at, side } => Some((*at, *side)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stubbed(connectors: Vec<Connector>) -> Geometry {
        Geometry {
            width: 100.0,
            height: 60.0,
            baseline: 15.0,
            content: Content::Stack {
                kind: StackKind::Choice,
            },
            children: vec![],
            connectors,
        }
    }

    #[test]
    fn test_stub_count_per_side() {
        let geom = stubbed(vec![
            Connector::Stub {
                from: Point::new(10.0, 40.0),
                side: Side::Left,
            },
            Connector::Stub {
                from: Point::new(90.0, 40.0),
                side: Side::Right,
            },
            Connector::Stub {
                from: Point::new(10.0, 70.0),
                side: Side::Left,
            },
        ]);
        assert_eq!(geom.stub_count(Side::Left), 2);
        assert_eq!(geom.stub_count(Side::Right), 1);
    }

    #[test]
    fn test_arrow_lookup() {
        let geom = stubbed(vec![Connector::Arrow {
            at: Point::new(10.0, 25.0),
            side: Side::Left,
        }]);
        assert_eq!(geom.arrow(), Some((Point::new(10.0, 25.0), Side::Left)));
        assert_eq!(stubbed(vec![]).arrow(), None);
    }
}
