//! Side branches
//!
//! An aside placed next to the chain, fed by one chain node and feeding
//! another (the damping term beside the spring chain). The branch is not
//! part of the chain and never changes its invariants.

use serde::Serialize;
use tracing::debug;

use crate::chain::{Chain, NodeId, Route};
use crate::error::{DiagramError, Result};
use crate::geometry::{Point, Rect, Side};
use crate::style::ConnectorStyle;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SideBranch {
    pub label: String,
    pub side: Side,
    pub bounds: Rect,
    /// Chain node the inbound arrow starts at
    pub source: NodeId,
    /// Chain node the outbound arrow ends at
    pub target: NodeId,
    pub inbound: Route,
    pub outbound: Route,
    pub style: ConnectorStyle,
}

impl Chain {
    /// Place a branch `distance` units beside the midpoint of two nodes,
    /// linked from node `from_index` and back into node `to_index`.
    pub fn side_branch(
        &self,
        label: impl Into<String>,
        from_index: usize,
        to_index: usize,
        distance: f32,
        side: Side,
    ) -> Result<SideBranch> {
        let source = self.id_at(from_index)?;
        let target = self.id_at(to_index)?;
        if from_index == to_index {
            return Err(DiagramError::SameIndex(from_index));
        }

        let config = self.config();
        let chain_axis = config.orientation.axis();
        if side.axis() == chain_axis {
            return Err(DiagramError::InvalidInput(format!(
                "branch on the {side:?} side would sit on the chain"
            )));
        }
        let min_distance = config.node_size.along(side.axis());
        if !(distance.is_finite() && distance > min_distance) {
            return Err(DiagramError::InvalidInput(format!(
                "branch distance must exceed {min_distance}, got {distance}"
            )));
        }

        let (from, to) = (self.bounds_of(source), self.bounds_of(target));

        let normal = side.outward();
        let anchor = from.center().midpoint(to.center());
        let bounds = Rect::from_center(anchor + normal * distance, config.node_size);

        // Lower index sits on the leading side of the chain direction.
        let trailing = config.orientation.trailing_side();
        let (in_face, out_face) = if from_index < to_index {
            (trailing.opposite(), trailing)
        } else {
            (trailing, trailing.opposite())
        };

        let attach = |face: Side| -> Point {
            bounds.edge(face)
                + side.opposite().outward() * config.branch_inset
                + face.outward() * config.branch_clearance
        };

        let mut inbound = Route::new();
        inbound.push(from.edge(side) + normal * config.buff);
        inbound.push(attach(in_face));

        let mut outbound = Route::new();
        outbound.push(attach(out_face));
        outbound.push(to.edge(side) + normal * config.buff);

        let label = label.into();
        debug!(%label, from_index, to_index, ?side, "placed side branch");

        Ok(SideBranch {
            label,
            side,
            bounds,
            source,
            target,
            inbound,
            outbound,
            style: ConnectorStyle::accent(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::DiagramBuilder;

    fn chain() -> Chain {
        let mut c = DiagramBuilder::default()
            .build_chain(&["Force", "Acceleration", "Velocity", "Position"])
            .unwrap();
        c.insert_head("Spring Displacement").unwrap();
        c
    }

    #[test]
    fn branch_sits_beside_middle_node() {
        let c = chain();
        let b = c.side_branch("Spring Damping", 0, 2, 4.0, Side::Right).unwrap();

        let middle = c.node(1).unwrap().position();
        assert!((b.bounds.center().x - (middle.x + 4.0)).abs() < 1e-5);
        assert!((b.bounds.center().y - middle.y).abs() < 1e-5);
        for node in c.nodes() {
            assert!(b.bounds.min_x() > node.bounds().max_x());
        }
    }

    #[test]
    fn arrows_enter_top_and_leave_bottom() {
        let c = chain();
        let b = c.side_branch("Spring Damping", 0, 2, 4.0, Side::Right).unwrap();
        let cfg = c.config();

        assert_eq!(b.inbound.len(), 2);
        assert_eq!(b.outbound.len(), 2);

        let right0 = c.node(0).unwrap().bounds().edge(Side::Right);
        assert!((b.inbound[0].x - (right0.x + cfg.buff)).abs() < 1e-5);
        assert!(b.inbound[1].y > b.bounds.max_y());
        assert!(b.inbound[1].x < b.bounds.center().x);

        assert!(b.outbound[0].y < b.bounds.min_y());
        let right2 = c.node(2).unwrap().bounds().edge(Side::Right);
        assert!((b.outbound[1].y - right2.y).abs() < 1e-5);
    }

    #[test]
    fn reversed_branch_swaps_faces() {
        let c = chain();
        let b = c.side_branch("aside", 3, 1, 4.0, Side::Left).unwrap();
        assert!(b.inbound[1].y < b.bounds.min_y());
        assert!(b.outbound[0].y > b.bounds.max_y());
        assert!(b.inbound[1].x > b.bounds.center().x);
    }

    #[test]
    fn branch_validates_inputs() {
        let c = chain();
        assert_eq!(
            c.side_branch("x", 0, 7, 4.0, Side::Right),
            Err(DiagramError::IndexOutOfRange { index: 7, len: 5 })
        );
        assert_eq!(
            c.side_branch("x", 1, 1, 4.0, Side::Right),
            Err(DiagramError::SameIndex(1))
        );
        assert!(matches!(
            c.side_branch("x", 0, 2, 1.0, Side::Right),
            Err(DiagramError::InvalidInput(_))
        ));
        assert!(matches!(
            c.side_branch("x", 0, 2, 4.0, Side::Top),
            Err(DiagramError::InvalidInput(_))
        ));
    }
}
