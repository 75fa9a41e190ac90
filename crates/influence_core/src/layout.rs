//! Chain layout parameters
//!
//! Defaults reproduce the proportions of the spring influence diagram: 1.3
//! unit arrows between labels, 0.25 buffer on each end, and a 0.3 stand-off
//! for routes that leave the chain.

use serde::{Deserialize, Serialize};

use crate::error::{DiagramError, Result};
use crate::geometry::{Axis, Point, Rect, Side, Size};

/// Direction in which successive chain nodes are placed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Node 0 at the top, later nodes below it
    #[default]
    TopToBottom,
    /// Node 0 at the left, later nodes to its right
    LeftToRight,
}

impl Orientation {
    /// Axis the chain grows along
    pub fn axis(self) -> Axis {
        match self {
            Orientation::TopToBottom => Axis::Y,
            Orientation::LeftToRight => Axis::X,
        }
    }

    /// Side of a node that faces the next (higher-index) node
    pub fn trailing_side(self) -> Side {
        match self {
            Orientation::TopToBottom => Side::Bottom,
            Orientation::LeftToRight => Side::Right,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Centre of node 0
    pub origin: Point,
    pub orientation: Orientation,
    /// Uniform bounding box of every node
    pub node_size: Size,
    /// Length of the arrow drawn between adjacent nodes
    pub connector_length: f32,
    /// Gap between an arrow end and the node it touches
    pub buff: f32,
    /// Clearance kept between a route and a node edge
    pub stand_off: f32,
    /// How far branch attach points move toward the chain
    pub branch_inset: f32,
    /// Gap between branch arrows and the branch bounds
    pub branch_clearance: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            orientation: Orientation::TopToBottom,
            node_size: Size::new(3.0, 0.5),
            connector_length: 1.3,
            buff: 0.25,
            stand_off: 0.3,
            branch_inset: 0.3,
            branch_clearance: 0.1,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        let invalid = |what: &str| Err(DiagramError::InvalidInput(what.to_string()));

        if !self.origin.is_finite() {
            return invalid("origin must be finite");
        }
        let positive = [
            ("node width", self.node_size.width),
            ("node height", self.node_size.height),
            ("connector length", self.connector_length),
            ("stand-off", self.stand_off),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return invalid(&format!("{name} must be positive, got {value}"));
            }
        }
        let non_negative = [
            ("buff", self.buff),
            ("branch inset", self.branch_inset),
            ("branch clearance", self.branch_clearance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(&format!("{name} must be non-negative, got {value}"));
            }
        }
        Ok(())
    }

    /// Distance between the centres of adjacent nodes
    pub fn pitch(&self) -> f32 {
        self.node_size.along(self.orientation.axis()) + 2.0 * self.buff + self.connector_length
    }

    /// Centre of the node at `index`
    pub fn node_center(&self, index: usize) -> Point {
        let step = self.pitch() * index as f32;
        match self.orientation {
            Orientation::TopToBottom => self.origin.offset(0.0, -step),
            Orientation::LeftToRight => self.origin.offset(step, 0.0),
        }
    }

    pub fn node_bounds(&self, index: usize) -> Rect {
        Rect::from_center(self.node_center(index), self.node_size)
    }
}
