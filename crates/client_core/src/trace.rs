//! Relationship graph for the selected case and its radial layout.
//!
//! Positions are percentages of the canvas: the root sits at the centre and
//! leaves are spread evenly on a ring of fixed percentage distance, starting at
//! angle zero and proceeding in arrival order.

use std::f64::consts::TAU;

use shared::{
    domain::{CaseScope, NodeId, NodeKind},
    protocol::{TraceLink, TraceNode},
};
use tracing::warn;

pub const CENTER_PCT: f64 = 50.0;
pub const RING_PCT: f64 = 35.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
}

impl From<TraceNode> for GraphNode {
    fn from(value: TraceNode) -> Self {
        Self {
            id: value.id,
            label: value.label,
            kind: value.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodePlacement {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    pub x_pct: f64,
    pub y_pct: f64,
    /// Radians from the positive x axis; `None` for the root.
    pub angle: Option<f64>,
}

#[derive(Debug, Default)]
pub struct TraceGraph {
    scope: Option<CaseScope>,
    nodes: Vec<GraphNode>,
    links: Vec<TraceLink>,
}

impl TraceGraph {
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[TraceLink] {
        &self.links
    }

    pub fn scope(&self) -> Option<&CaseScope> {
        self.scope.as_ref()
    }

    pub fn replace(&mut self, scope: CaseScope, nodes: Vec<GraphNode>, links: Vec<TraceLink>) {
        self.scope = Some(scope);
        self.nodes = nodes;
        self.links = links;
    }

    pub fn layout(&self) -> Vec<NodePlacement> {
        radial_layout(&self.nodes)
    }
}

/// The first `root` node is centred; every other node is a leaf on the ring.
pub fn radial_layout(nodes: &[GraphNode]) -> Vec<NodePlacement> {
    let root_idx = nodes.iter().position(|node| node.kind == NodeKind::Root);
    let leaf_count = nodes.len() - usize::from(root_idx.is_some());

    let mut placements = Vec::with_capacity(nodes.len());
    let mut leaf_idx = 0usize;
    for (idx, node) in nodes.iter().enumerate() {
        if Some(idx) == root_idx {
            placements.push(NodePlacement {
                id: node.id.clone(),
                label: node.label.clone(),
                kind: NodeKind::Root,
                x_pct: CENTER_PCT,
                y_pct: CENTER_PCT,
                angle: None,
            });
            continue;
        }

        if node.kind == NodeKind::Root {
            warn!(node = %node.id, "trace graph has more than one root; placing extra root on the ring");
        }
        let angle = leaf_angle(leaf_idx, leaf_count);
        placements.push(NodePlacement {
            id: node.id.clone(),
            label: node.label.clone(),
            kind: NodeKind::Leaf,
            x_pct: CENTER_PCT + RING_PCT * angle.cos(),
            y_pct: CENTER_PCT + RING_PCT * angle.sin(),
            angle: Some(angle),
        });
        leaf_idx += 1;
    }
    placements
}

pub fn leaf_angle(index: usize, leaf_count: usize) -> f64 {
    if leaf_count == 0 {
        return 0.0;
    }
    (index as f64 / leaf_count as f64) * TAU
}

#[cfg(test)]
#[path = "tests/trace_tests.rs"]
mod tests;
