//! Word-to-symbol relabeling
//!
//! Descriptive labels ("Node Force") are swapped for terse symbols once the
//! diagram has been explained. Targets are given in the chain's top-to-bottom
//! order, the same order the labels were enumerated in, and the plan is
//! applied by position rather than by matching label text.

use serde::Serialize;
use tracing::debug;

use crate::chain::{Chain, NodeId};
use crate::error::{DiagramError, Result};

/// One relabel operation of a plan
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Relabel {
    pub index: usize,
    pub node: NodeId,
    pub from: String,
    pub to: String,
}

/// How a symbol becomes the node's new label
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SymbolStyle {
    /// The symbol replaces the whole label
    #[default]
    Replace,
    /// Keep the label's leading word, then the separator, then the symbol
    KeepSubject { separator: String },
}

impl SymbolStyle {
    pub fn compose(&self, old: &str, symbol: &str) -> String {
        match self {
            SymbolStyle::Replace => symbol.to_string(),
            SymbolStyle::KeepSubject { separator } => {
                let subject = leading_word(old, separator);
                if subject.is_empty() {
                    symbol.to_string()
                } else {
                    format!("{subject}{separator}{symbol}")
                }
            }
        }
    }
}

/// Text before the first separator; whitespace when the separator is empty
pub fn leading_word<'a>(label: &'a str, separator: &str) -> &'a str {
    let word = if separator.is_empty() {
        label.split_whitespace().next()
    } else {
        label.split(separator).next()
    };
    word.unwrap_or_default().trim()
}

impl Chain {
    /// Plan replacing every label with the matching target
    pub fn word_to_symbol_transition<S: AsRef<str>>(&self, targets: &[S]) -> Result<Vec<Relabel>> {
        self.symbol_transition_with(targets, &SymbolStyle::Replace)
    }

    pub fn symbol_transition_with<S: AsRef<str>>(
        &self,
        targets: &[S],
        style: &SymbolStyle,
    ) -> Result<Vec<Relabel>> {
        if targets.len() != self.len() {
            return Err(DiagramError::LengthMismatch {
                expected: self.len(),
                actual: targets.len(),
            });
        }

        let plan = self
            .nodes()
            .zip(targets)
            .map(|(node, target)| Relabel {
                index: node.index(),
                node: node.id(),
                from: node.label().to_string(),
                to: style.compose(node.label(), target.as_ref()),
            })
            .collect();
        Ok(plan)
    }

    /// Apply a plan. Every entry is checked against the current chain before
    /// any label is written.
    pub fn apply_relabels(&mut self, plan: &[Relabel]) -> Result<()> {
        for step in plan {
            let id = self.id_at(step.index)?;
            if id != step.node {
                return Err(DiagramError::InvalidInput(format!(
                    "relabel plan is stale: index {} no longer holds the planned node",
                    step.index
                )));
            }
        }
        for step in plan {
            self.relabel(step.index, step.to.clone())?;
        }
        debug!(steps = plan.len(), "applied relabel plan");
        Ok(())
    }
}
