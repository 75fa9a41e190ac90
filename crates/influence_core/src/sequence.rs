//! Reveal ordering
//!
//! The order in which a renderer should draw the diagram: the head label,
//! then for every further node the arrow that joins it to the node above
//! followed by its label, and finally the feedback arrows. Timing is left to
//! the caller.

use serde::Serialize;

use crate::chain::{Chain, ConnectorId, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RevealStep {
    Node(NodeId),
    Connector(ConnectorId),
}

impl Chain {
    pub fn reveal_sequence(&self) -> Vec<RevealStep> {
        let mut steps = Vec::with_capacity(self.connectors().count() + self.len());
        let mut nodes = self.nodes();
        if let Some(head) = nodes.next() {
            steps.push(RevealStep::Node(head.id()));
        }
        for (link, node) in self.chain_connectors().zip(nodes) {
            steps.push(RevealStep::Connector(link.id()));
            steps.push(RevealStep::Node(node.id()));
        }
        steps.extend(self.feedback_connectors().map(|c| RevealStep::Connector(c.id())));
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::DiagramBuilder;
    use crate::route::CorridorAxis;

    #[test]
    fn connectors_precede_the_node_they_lead_into() {
        let mut c = DiagramBuilder::default()
            .build_chain(&["Force", "Acceleration", "Velocity"])
            .unwrap();
        let feedback = c
            .attach_feedback(2, 0, 1.0, CorridorAxis::Horizontal)
            .unwrap();

        let steps = c.reveal_sequence();
        let node = |i: usize| RevealStep::Node(c.node(i).unwrap().id());
        let link = |i: usize| RevealStep::Connector(c.chain_connector(i).unwrap().id());

        assert_eq!(
            steps,
            vec![
                node(0),
                link(0),
                node(1),
                link(1),
                node(2),
                RevealStep::Connector(feedback),
            ]
        );
    }

    #[test]
    fn single_node_reveals_alone() {
        let c = DiagramBuilder::default().build_chain(&["Force"]).unwrap();
        assert_eq!(c.reveal_sequence(), vec![RevealStep::Node(c.node(0).unwrap().id())]);
    }
}
