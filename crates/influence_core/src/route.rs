//! Feedback routing
//!
//! A feedback connector leaves a downstream node sideways, runs along a
//! corridor beside the chain, and re-enters an upstream node from the same
//! side. Every segment is axis-aligned; the corner is built by taking one
//! axis from the corridor point and the other from the target edge.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chain::{Chain, ConnectorId, NodeId};
use crate::error::{DiagramError, Result};
use crate::geometry::{Point, Rect, Side};

/// Axis along which a feedback route first travels away from the chain
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorridorAxis {
    /// Leave through the left edges
    #[default]
    Horizontal,
    /// Leave through the bottom edges
    Vertical,
}

impl CorridorAxis {
    pub fn side(self) -> Side {
        match self {
            CorridorAxis::Horizontal => Side::Left,
            CorridorAxis::Vertical => Side::Bottom,
        }
    }
}

/// Four-point L-route computed on demand
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FeedbackRoute {
    pub from: NodeId,
    pub to: NodeId,
    pub side: Side,
    pub points: [Point; 4],
}

impl FeedbackRoute {
    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[3]
    }

    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Each segment changes at most one coordinate
    pub fn is_axis_aligned(&self) -> bool {
        self.segments().all(|(a, b)| a.x == b.x || a.y == b.y)
    }
}

/// Corner points of a route leaving `from` and entering `to` through `side`
pub(crate) fn l_route(
    stand_off: f32,
    from: Rect,
    to: Rect,
    lateral_offset: f32,
    side: Side,
) -> [Point; 4] {
    let normal = side.outward();
    let axis = side.axis();
    let target_edge = to.edge(side);

    let start = from.edge(side) + normal * stand_off;
    let corridor = start + normal * lateral_offset;
    let corner = corridor.only(axis) + target_edge.only(axis.cross());
    let end = target_edge + normal * stand_off;

    [start, corridor, corner, end]
}

impl Chain {
    /// Route from node `from_index` back to node `to_index` along the given
    /// corridor.
    pub fn compute_feedback_route(
        &self,
        from_index: usize,
        to_index: usize,
        lateral_offset: f32,
        corridor: CorridorAxis,
    ) -> Result<FeedbackRoute> {
        self.feedback_route_on(from_index, to_index, lateral_offset, corridor.side())
    }

    /// Same as [`Chain::compute_feedback_route`] with an explicit exit side
    pub fn feedback_route_on(
        &self,
        from_index: usize,
        to_index: usize,
        lateral_offset: f32,
        side: Side,
    ) -> Result<FeedbackRoute> {
        let (from, to) = self.check_feedback(from_index, to_index, lateral_offset, side)?;
        let points = l_route(
            self.config().stand_off,
            self.bounds_of(from),
            self.bounds_of(to),
            lateral_offset,
            side,
        );
        Ok(FeedbackRoute {
            from,
            to,
            side,
            points,
        })
    }

    /// Compute a feedback route and keep it as a connector. The route is
    /// recomputed whenever the chain is laid out again.
    pub fn attach_feedback(
        &mut self,
        from_index: usize,
        to_index: usize,
        lateral_offset: f32,
        corridor: CorridorAxis,
    ) -> Result<ConnectorId> {
        self.attach_feedback_on(from_index, to_index, lateral_offset, corridor.side())
    }

    pub fn attach_feedback_on(
        &mut self,
        from_index: usize,
        to_index: usize,
        lateral_offset: f32,
        side: Side,
    ) -> Result<ConnectorId> {
        let (from, to) = self.check_feedback(from_index, to_index, lateral_offset, side)?;
        let id = self.add_feedback(from, to, lateral_offset, side);
        debug!(from_index, to_index, ?side, "attached feedback connector");
        Ok(id)
    }

    fn check_feedback(
        &self,
        from_index: usize,
        to_index: usize,
        lateral_offset: f32,
        side: Side,
    ) -> Result<(NodeId, NodeId)> {
        let from = self.id_at(from_index)?;
        let to = self.id_at(to_index)?;
        if from_index == to_index {
            return Err(DiagramError::SameIndex(from_index));
        }
        if !(lateral_offset.is_finite() && lateral_offset >= 0.0) {
            return Err(DiagramError::InvalidInput(format!(
                "lateral offset must be finite and non-negative, got {lateral_offset}"
            )));
        }
        if side.axis() == self.config().orientation.axis() {
            return Err(DiagramError::InvalidInput(format!(
                "corridor through the {side:?} side runs along the chain"
            )));
        }
        Ok((from, to))
    }
}
