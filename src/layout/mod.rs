//! Layout engine for computing diagram geometry
//!
//! This module takes a parsed rule tree and computes sizes, baselines and
//! relative positions, producing a renderer-agnostic [`Geometry`] tree.

pub mod config;
pub mod engine;
pub mod error;
pub mod types;

pub use config::LayoutConfig;
pub use engine::compute;
pub use error::LayoutError;
pub use types::*;
