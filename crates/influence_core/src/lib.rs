//! Influence Diagram Core
//!
//! Layout and sequencing for causal-chain diagrams used in physics
//! explainers (spring-mass-damper, Euler integration):
//!
//! - **Chain**: labeled nodes stacked along one axis, joined by arrows that
//!   point from cause to effect
//! - **Feedback routes**: orthogonal L-shaped arrows that loop around the chain
//! - **Relabel plans**: word-to-symbol label swaps addressed by position
//! - **Side branches** and **reveal order** for progressive drawing
//!
//! Drawing, typesetting and timing belong to the rendering layer.
//!
//! # Example
//!
//! ```rust
//! use influence_core::{CorridorAxis, DiagramBuilder};
//!
//! let builder = DiagramBuilder::default();
//! let mut chain = builder
//!     .build_chain(&["Force", "Acceleration", "Velocity", "Position"])
//!     .unwrap();
//! chain.insert_head("Spring Stuff").unwrap();
//!
//! let route = chain
//!     .compute_feedback_route(4, 0, 1.3, CorridorAxis::Horizontal)
//!     .unwrap();
//! assert!(route.is_axis_aligned());
//!
//! let plan = chain
//!     .word_to_symbol_transition(&[r"\Delta x", "F", "a", "v", "x"])
//!     .unwrap();
//! chain.apply_relabels(&plan).unwrap();
//! assert_eq!(chain.labels(), [r"\Delta x", "F", "a", "v", "x"]);
//! ```

pub mod branch;
pub mod chain;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod route;
pub mod sequence;
pub mod style;
pub mod transition;

pub use branch::SideBranch;
pub use chain::{
    Chain, Connector, ConnectorId, ConnectorKind, DiagramBuilder, Node, NodeId, Route,
};
pub use error::{DiagramError, Result};
pub use geometry::{Axis, Point, Rect, Side, Size, Vec2};
pub use layout::{LayoutConfig, Orientation};
pub use route::{CorridorAxis, FeedbackRoute};
pub use sequence::RevealStep;
pub use style::{Color, ConnectorStyle};
pub use transition::{Relabel, SymbolStyle};
