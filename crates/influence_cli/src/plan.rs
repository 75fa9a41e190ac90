//! Scene plan assembly
//!
//! Runs a diagram description through the core API in caller order (build,
//! heads, relabels, feedback, symbol transition, branch) and flattens the
//! result into index-addressed records a renderer can consume as JSON.

use anyhow::{Context, Result};
use influence_core::{
    Chain, ConnectorKind, ConnectorStyle, DiagramBuilder, LayoutConfig, Point, Rect,
    RevealStep, Side, SymbolStyle,
};
use serde::Serialize;
use tracing::info;

use crate::config::DiagramConfig;

#[derive(Debug, Serialize)]
pub struct ScenePlan {
    pub name: String,
    pub layout: LayoutConfig,
    /// Nodes as laid out, before the symbol transition
    pub nodes: Vec<NodePlan>,
    pub connectors: Vec<ConnectorPlan>,
    /// Word-to-symbol relabels, in index order
    pub relabels: Vec<RelabelPlan>,
    /// Labels after every relabel has been applied
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchPlan>,
    pub reveal: Vec<RevealPlan>,
}

#[derive(Debug, Serialize)]
pub struct NodePlan {
    pub index: usize,
    pub label: String,
    pub center: Point,
    pub bounds: Rect,
}

#[derive(Debug, Serialize)]
pub struct ConnectorPlan {
    #[serde(flatten)]
    pub kind: ConnectorKind,
    pub from: usize,
    pub to: usize,
    pub route: Vec<Point>,
    pub style: ConnectorStyle,
}

#[derive(Debug, Serialize)]
pub struct RelabelPlan {
    pub index: usize,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct BranchPlan {
    pub label: String,
    pub side: Side,
    pub bounds: Rect,
    pub from: usize,
    pub to: usize,
    pub inbound: Vec<Point>,
    pub outbound: Vec<Point>,
    pub style: ConnectorStyle,
}

/// A reveal step addressed by position in `nodes` / `connectors`
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum RevealPlan {
    Node(usize),
    Connector(usize),
}

impl ScenePlan {
    pub fn build(config: &DiagramConfig) -> Result<Self> {
        let builder =
            DiagramBuilder::new(config.layout.clone()).context("Invalid [layout] section")?;

        let mut chain = builder
            .build_chain(&config.diagram.labels)
            .context("Failed to build chain from [diagram] labels")?;

        for head in &config.diagram.heads {
            chain
                .insert_head(head.as_str())
                .with_context(|| format!("Failed to insert head {head:?}"))?;
        }

        for rl in &config.relabel {
            chain
                .relabel(rl.index, rl.label.as_str())
                .with_context(|| format!("Failed to relabel node {}", rl.index))?;
        }

        for fb in &config.feedback {
            let side = fb.side.unwrap_or_else(|| fb.corridor.side());
            chain
                .attach_feedback_on(fb.from, fb.to, fb.lateral_offset, side)
                .with_context(|| format!("Failed to route feedback {} -> {}", fb.from, fb.to))?;
        }

        let nodes = node_plans(&chain);
        let connectors = connector_plans(&chain);

        let mut relabels = Vec::new();
        if let Some(symbols) = &config.symbols {
            let style = if symbols.keep_subject {
                SymbolStyle::KeepSubject {
                    separator: symbols.separator.clone(),
                }
            } else {
                SymbolStyle::Replace
            };
            let plan = chain
                .symbol_transition_with(&symbols.targets, &style)
                .context("Invalid [symbols] targets")?;
            chain.apply_relabels(&plan)?;
            relabels = plan
                .into_iter()
                .map(|r| RelabelPlan {
                    index: r.index,
                    from: r.from,
                    to: r.to,
                })
                .collect();
        }

        let branch = match &config.branch {
            Some(b) => {
                let branch = chain
                    .side_branch(b.label.as_str(), b.from, b.to, b.distance, b.side)
                    .context("Invalid [branch] section")?;
                Some(BranchPlan {
                    label: branch.label,
                    side: branch.side,
                    bounds: branch.bounds,
                    from: b.from,
                    to: b.to,
                    inbound: branch.inbound.to_vec(),
                    outbound: branch.outbound.to_vec(),
                    style: branch.style,
                })
            }
            None => None,
        };

        let reveal = reveal_plans(&chain);
        let labels = chain.labels().into_iter().map(str::to_string).collect();

        info!(
            name = %config.diagram.name,
            nodes = nodes.len(),
            connectors = connectors.len(),
            "planned scene"
        );

        Ok(Self {
            name: config.diagram.name.clone(),
            layout: chain.config().clone(),
            nodes,
            connectors,
            relabels,
            labels,
            branch,
            reveal,
        })
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.context("Failed to serialize scene plan")
    }
}

fn node_plans(chain: &Chain) -> Vec<NodePlan> {
    chain
        .nodes()
        .map(|n| NodePlan {
            index: n.index(),
            label: n.label().to_string(),
            center: n.position(),
            bounds: n.bounds(),
        })
        .collect()
}

fn connector_plans(chain: &Chain) -> Vec<ConnectorPlan> {
    chain
        .connectors()
        .filter_map(|c| {
            Some(ConnectorPlan {
                kind: c.kind(),
                from: chain.index_of(c.from())?,
                to: chain.index_of(c.to())?,
                route: c.route().to_vec(),
                style: c.style(),
            })
        })
        .collect()
}

fn reveal_plans(chain: &Chain) -> Vec<RevealPlan> {
    let connector_ids: Vec<_> = chain.connectors().map(|c| c.id()).collect();
    chain
        .reveal_sequence()
        .into_iter()
        .filter_map(|step| match step {
            RevealStep::Node(id) => chain.index_of(id).map(RevealPlan::Node),
            RevealStep::Connector(id) => connector_ids
                .iter()
                .position(|c| *c == id)
                .map(RevealPlan::Connector),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_plan_has_full_diagram() {
        let plan = ScenePlan::build(&DiagramConfig::sample("spring")).unwrap();

        assert_eq!(plan.nodes.len(), 5);
        assert_eq!(plan.nodes[0].label, "Spring Displacement");
        assert_eq!(plan.nodes[1].label, "Node Force");

        // Four chain arrows plus one feedback arrow.
        assert_eq!(plan.connectors.len(), 5);
        let feedback: Vec<_> = plan
            .connectors
            .iter()
            .filter(|c| matches!(c.kind, ConnectorKind::Feedback { .. }))
            .collect();
        assert_eq!(feedback.len(), 1);
        assert_eq!((feedback[0].from, feedback[0].to), (4, 0));
        assert_eq!(feedback[0].route.len(), 4);

        assert_eq!(plan.labels[0], r"Spring \Delta x");
        assert_eq!(plan.labels[4], r"Node \vec{x}");
        assert_eq!(plan.relabels.len(), 5);
        assert!(plan.branch.is_some());

        assert_eq!(plan.reveal.len(), 10);
        assert_eq!(plan.reveal[0], RevealPlan::Node(0));
        assert_eq!(plan.reveal[2], RevealPlan::Node(1));
    }

    #[test]
    fn reveal_indices_point_into_connector_list() {
        let plan = ScenePlan::build(&DiagramConfig::sample("spring")).unwrap();
        for step in &plan.reveal {
            match step {
                RevealPlan::Node(i) => assert!(*i < plan.nodes.len()),
                RevealPlan::Connector(i) => assert!(*i < plan.connectors.len()),
            }
        }
        let last = plan.reveal.last().unwrap();
        match last {
            RevealPlan::Connector(i) => {
                assert!(matches!(plan.connectors[*i].kind, ConnectorKind::Feedback { .. }))
            }
            other => panic!("expected feedback last, got {other:?}"),
        }
    }

    #[test]
    fn errors_name_the_failing_section() {
        let mut cfg = DiagramConfig::sample("broken");
        cfg.feedback[0].to = 4;
        let err = ScenePlan::build(&cfg).unwrap_err();
        assert!(format!("{err:#}").contains("feedback 4 -> 4"));

        let mut cfg = DiagramConfig::sample("broken");
        if let Some(symbols) = cfg.symbols.as_mut() {
            symbols.targets.pop();
        }
        let err = ScenePlan::build(&cfg).unwrap_err();
        assert!(format!("{err:#}").contains("[symbols]"));
    }

    #[test]
    fn json_output_is_tagged() {
        let plan = ScenePlan::build(&DiagramConfig::sample("spring")).unwrap();
        let json = plan.to_json(false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "spring");
        assert_eq!(value["connectors"][0]["kind"], "chain");
        assert_eq!(value["connectors"][4]["kind"], "feedback");
        assert_eq!(value["connectors"][4]["side"], "left");
        assert_eq!(value["reveal"][0]["kind"], "node");
        assert_eq!(value["reveal"][0]["index"], 0);
    }
}
