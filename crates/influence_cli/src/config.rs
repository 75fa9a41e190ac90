//! Diagram description file handling

use anyhow::{Context, Result};
use influence_core::{CorridorAxis, LayoutConfig, Side};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "diagram.toml";

/// Top-level diagram description (diagram.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct DiagramConfig {
    pub diagram: DiagramSection,
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Label rewrites applied after the heads are inserted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relabel: Vec<RelabelConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feedback: Vec<FeedbackConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols: Option<SymbolsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchConfig>,
}

/// Chain contents
#[derive(Debug, Deserialize, Serialize)]
pub struct DiagramSection {
    pub name: String,
    /// Labels listed top to bottom
    pub labels: Vec<String>,
    /// Labels inserted above the chain, in insertion order
    #[serde(default)]
    pub heads: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RelabelConfig {
    pub index: usize,
    pub label: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FeedbackConfig {
    pub from: usize,
    pub to: usize,
    #[serde(default = "default_lateral_offset")]
    pub lateral_offset: f32,
    #[serde(default)]
    pub corridor: CorridorAxis,
    /// Overrides the side implied by `corridor`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
}

fn default_lateral_offset() -> f32 {
    1.3
}

/// Word-to-symbol transition, one target per node top to bottom
#[derive(Debug, Deserialize, Serialize)]
pub struct SymbolsConfig {
    pub targets: Vec<String>,
    /// Keep each label's leading word in front of its symbol
    #[serde(default)]
    pub keep_subject: bool,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    " ".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BranchConfig {
    pub label: String,
    pub from: usize,
    pub to: usize,
    #[serde(default = "default_branch_distance")]
    pub distance: f32,
    #[serde(default = "default_branch_side")]
    pub side: Side,
}

fn default_branch_distance() -> f32 {
    4.0
}

fn default_branch_side() -> Side {
    Side::Right
}

impl DiagramConfig {
    /// Load a description from a file, or from `diagram.toml` inside a
    /// directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found at {}. Run `influence init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DiagramConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// The spring influence diagram
    pub fn sample(name: &str) -> Self {
        let labels = ["Force", "Acceleration", "Velocity", "Position"]
            .iter()
            .map(|l| format!("Node {l}"))
            .collect();

        Self {
            diagram: DiagramSection {
                name: name.to_string(),
                labels,
                heads: vec!["Spring Stuff".to_string()],
            },
            layout: LayoutConfig::default(),
            relabel: vec![RelabelConfig {
                index: 0,
                label: "Spring Displacement".to_string(),
            }],
            feedback: vec![FeedbackConfig {
                from: 4,
                to: 0,
                lateral_offset: default_lateral_offset(),
                corridor: CorridorAxis::Horizontal,
                side: None,
            }],
            symbols: Some(SymbolsConfig {
                targets: [r"\Delta x", r"\vec{F}", r"\vec{a}", r"\vec{v}", r"\vec{x}"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                keep_subject: true,
                separator: default_separator(),
            }),
            branch: Some(BranchConfig {
                label: "Spring Damping".to_string(),
                from: 0,
                to: 2,
                distance: default_branch_distance(),
                side: default_branch_side(),
            }),
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize diagram")
    }
}
