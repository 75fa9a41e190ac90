//! Ordered chain of labeled nodes
//!
//! Node 0 is the topmost (most recently inserted) element. Adjacent nodes are
//! joined by a connector that points from the upstream node `i + 1` to the
//! downstream node `i`. Feedback connectors add routes without adding nodes,
//! so `nodes == connectors - feedback + 1` always holds.
//!
//! Nodes and connectors are addressed by slotmap keys that stay valid across
//! head insertion, so a renderer can keep animating the same object after the
//! chain has grown above it.

use rustc_hash::FxHashSet;
use serde::Serialize;
use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

use crate::error::{DiagramError, Result};
use crate::geometry::{Point, Rect, Side};
use crate::layout::LayoutConfig;
use crate::route::l_route;
use crate::style::ConnectorStyle;

new_key_type! {
    /// Stable identity of a chain node
    pub struct NodeId;
    /// Stable identity of a connector
    pub struct ConnectorId;
}

/// Waypoints of a connector; never more than four
pub type Route = SmallVec<[Point; 4]>;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    label: String,
    index: usize,
    bounds: Rect,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Position in the chain, 0 = topmost
    pub fn index(&self) -> usize {
        self.index
    }

    /// Centre of the node
    pub fn position(&self) -> Point {
        self.bounds.center()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectorKind {
    /// Joins two adjacent nodes
    Chain,
    /// Out-of-band L-route around the chain
    Feedback { lateral_offset: f32, side: Side },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    id: ConnectorId,
    kind: ConnectorKind,
    from: NodeId,
    to: NodeId,
    style: ConnectorStyle,
    route: Route,
}

impl Connector {
    pub fn id(&self) -> ConnectorId {
        self.id
    }

    pub fn kind(&self) -> ConnectorKind {
        self.kind
    }

    pub fn is_feedback(&self) -> bool {
        matches!(self.kind, ConnectorKind::Feedback { .. })
    }

    /// Node the arrow starts at
    pub fn from(&self) -> NodeId {
        self.from
    }

    /// Node the arrow points into
    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn style(&self) -> ConnectorStyle {
        self.style
    }

    pub fn route(&self) -> &[Point] {
        &self.route
    }
}

/// Builds chains from a shared layout
#[derive(Clone, Debug, Default)]
pub struct DiagramBuilder {
    config: LayoutConfig,
}

impl DiagramBuilder {
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Build a chain from labels listed top to bottom.
    ///
    /// The first label is the most downstream effect and ends up at index 0;
    /// every later label is the cause of the one before it.
    pub fn build_chain<S: AsRef<str>>(&self, labels: &[S]) -> Result<Chain> {
        if labels.is_empty() {
            return Err(DiagramError::InvalidInput(
                "chain requires at least one label".to_string(),
            ));
        }

        let mut seen = FxHashSet::default();
        for label in labels {
            let label = label.as_ref();
            check_label(label)?;
            if !seen.insert(label) {
                return Err(duplicate(label));
            }
        }

        let mut chain = Chain::empty(self.config.clone());
        for label in labels.iter().rev() {
            chain.push_head(label.as_ref().to_string());
        }
        chain.layout();

        debug!(len = chain.len(), "built chain");
        Ok(chain)
    }
}

#[derive(Clone, Debug)]
pub struct Chain {
    config: LayoutConfig,
    nodes: SlotMap<NodeId, Node>,
    order: Vec<NodeId>,
    connectors: SlotMap<ConnectorId, Connector>,
    /// Connector ids in creation order
    connector_order: Vec<ConnectorId>,
}

impl Chain {
    fn empty(config: LayoutConfig) -> Self {
        Self {
            config,
            nodes: SlotMap::with_key(),
            order: Vec::new(),
            connectors: SlotMap::with_key(),
            connector_order: Vec::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false for a chain obtained from [`DiagramBuilder::build_chain`]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.order.get(index).and_then(|id| self.nodes.get(*id))
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(id).map(|n| n.index)
    }

    /// Nodes from top (index 0) to bottom
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().filter_map(move |id| self.nodes.get(*id))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.nodes().map(Node::label).collect()
    }

    pub fn head(&self) -> Option<&Node> {
        self.node(0)
    }

    pub fn tail(&self) -> Option<&Node> {
        self.order.len().checked_sub(1).and_then(|i| self.node(i))
    }

    pub fn connector(&self, id: ConnectorId) -> Option<&Connector> {
        self.connectors.get(id)
    }

    /// All connectors in creation order
    pub fn connectors(&self) -> impl Iterator<Item = &Connector> + '_ {
        self.connector_order
            .iter()
            .filter_map(move |id| self.connectors.get(*id))
    }

    /// Connector joining node `index` and node `index + 1`
    pub fn chain_connector(&self, index: usize) -> Option<&Connector> {
        let downstream = *self.order.get(index)?;
        let upstream = *self.order.get(index + 1)?;
        self.connectors()
            .find(|c| !c.is_feedback() && c.from == upstream && c.to == downstream)
    }

    /// Chain connectors from top to bottom
    pub fn chain_connectors(&self) -> impl Iterator<Item = &Connector> + '_ {
        (0..self.len().saturating_sub(1)).filter_map(move |i| self.chain_connector(i))
    }

    /// Feedback connectors in attachment order
    pub fn feedback_connectors(&self) -> impl Iterator<Item = &Connector> + '_ {
        self.connectors().filter(|c| c.is_feedback())
    }

    /// Prepend a node; it takes index 0 and everything else moves down one
    /// pitch, keeping its id.
    pub fn insert_head(&mut self, label: impl Into<String>) -> Result<NodeId> {
        let label = label.into();
        check_label(&label)?;
        if self.nodes.values().any(|n| n.label == label) {
            return Err(duplicate(&label));
        }

        let id = self.push_head(label);
        self.layout();

        debug!(len = self.len(), label = %self.nodes[id].label, "inserted head node");
        Ok(id)
    }

    /// Replace the label at `index` without moving the node
    pub fn relabel(&mut self, index: usize, new_label: impl Into<String>) -> Result<()> {
        let id = self.id_at(index)?;
        let new_label = new_label.into();
        let node = &mut self.nodes[id];
        if node.label != new_label {
            trace!(index, from = %node.label, to = %new_label, "relabel");
            node.label = new_label;
        }
        Ok(())
    }

    /// Move the whole chain, feedback routes included
    pub fn translate(&mut self, dx: f32, dy: f32) -> Result<()> {
        if !(dx.is_finite() && dy.is_finite()) {
            return Err(DiagramError::InvalidInput(format!(
                "translation must be finite, got ({dx}, {dy})"
            )));
        }
        self.config.origin = self.config.origin.offset(dx, dy);
        self.layout();
        Ok(())
    }

    pub(crate) fn id_at(&self, index: usize) -> Result<NodeId> {
        self.order
            .get(index)
            .copied()
            .ok_or(DiagramError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    pub(crate) fn bounds_of(&self, id: NodeId) -> Rect {
        self.nodes.get(id).map(Node::bounds).unwrap_or(Rect::ZERO)
    }

    pub(crate) fn add_feedback(
        &mut self,
        from: NodeId,
        to: NodeId,
        lateral_offset: f32,
        side: Side,
    ) -> ConnectorId {
        let id = self.connectors.insert_with_key(|id| Connector {
            id,
            kind: ConnectorKind::Feedback {
                lateral_offset,
                side,
            },
            from,
            to,
            style: ConnectorStyle::accent(),
            route: Route::new(),
        });
        self.connector_order.push(id);
        self.layout();
        id
    }

    /// Insert at the front without recomputing geometry
    fn push_head(&mut self, label: String) -> NodeId {
        let id = self.nodes.insert_with_key(|id| Node {
            id,
            label,
            index: 0,
            bounds: Rect::ZERO,
        });
        self.order.insert(0, id);

        if let Some(&below) = self.order.get(1) {
            let cid = self.connectors.insert_with_key(|cid| Connector {
                id: cid,
                kind: ConnectorKind::Chain,
                from: below,
                to: id,
                style: ConnectorStyle::default(),
                route: Route::new(),
            });
            self.connector_order.push(cid);
        }
        id
    }

    /// Recompute node indices, bounds, chain styles and every connector route.
    /// Chain arrows darken from the top of the chain down.
    fn layout(&mut self) {
        for (index, id) in self.order.iter().enumerate() {
            let node = &mut self.nodes[*id];
            node.index = index;
            node.bounds = self.config.node_bounds(index);
        }

        let trailing = self.config.orientation.trailing_side();
        let leading = trailing.opposite();
        let (buff, stand_off) = (self.config.buff, self.config.stand_off);

        for connector in self.connectors.values_mut() {
            let from = self.nodes[connector.from].bounds;
            let to = self.nodes[connector.to].bounds;
            connector.route = match connector.kind {
                ConnectorKind::Chain => {
                    connector.style = ConnectorStyle::gradient(self.nodes[connector.to].index);
                    smallvec![
                        from.edge(leading) + leading.outward() * buff,
                        to.edge(trailing) + trailing.outward() * buff,
                    ]
                }
                ConnectorKind::Feedback {
                    lateral_offset,
                    side,
                } => SmallVec::from_buf(l_route(stand_off, from, to, lateral_offset, side)),
            };
        }
    }
}

fn check_label(label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(DiagramError::InvalidInput("labels must not be blank".to_string()));
    }
    Ok(())
}

fn duplicate(label: &str) -> DiagramError {
    DiagramError::InvalidInput(format!("duplicate label {label:?}"))
}
