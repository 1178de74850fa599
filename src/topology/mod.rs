//! Immutable network topology: typed nodes and their parent→child supports edges.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

pub mod builder;
/// Raw IETF network-topology document types.
pub mod description;

pub use builder::TopologyBuilder;
pub use description::NetworkDescription;

/// Node-id prefix identifying a Radio Unit.
pub const RU_PREFIX: &str = "O-RAN-RU";
/// Node-id prefix identifying a Distributed Unit.
pub const DU_PREFIX: &str = "O-RAN-DU";
/// Node-id prefix identifying a Centralized Unit.
pub const CU_PREFIX: &str = "O-RAN-CU";

/// Tier of a radio access network node, lowest (RU) to highest (CU).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeType {
    #[serde(rename = "RU")]
    Ru,
    #[serde(rename = "DU")]
    Du,
    #[serde(rename = "CU")]
    Cu,
}

impl NodeType {
    /// All tiers, bottom-up.
    pub const ALL: [NodeType; 3] = [NodeType::Ru, NodeType::Du, NodeType::Cu];

    /// Classifies a node id by its prefix. Returns `None` for ids outside the
    /// three known tiers.
    pub fn from_node_id(node_id: &str) -> Option<Self> {
        if node_id.starts_with(RU_PREFIX) {
            Some(Self::Ru)
        } else if node_id.starts_with(DU_PREFIX) {
            Some(Self::Du)
        } else if node_id.starts_with(CU_PREFIX) {
            Some(Self::Cu)
        } else {
            None
        }
    }

    /// The tier this tier supports, if any.
    pub fn child(self) -> Option<Self> {
        match self {
            Self::Ru => None,
            Self::Du => Some(Self::Ru),
            Self::Cu => Some(Self::Du),
        }
    }

    /// Short upper-case label (`"RU"`, `"DU"`, `"CU"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ru => "RU",
            Self::Du => "DU",
            Self::Cu => "CU",
        }
    }

    /// Parses a tier label, case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "RU" => Some(Self::Ru),
            "DU" => Some(Self::Du),
            "CU" => Some(Self::Cu),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered node and the ids of the nodes one tier below that it serves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkNode {
    pub id: String,
    /// `None` for ids that match no tier prefix; such nodes never appear in
    /// tier outputs.
    #[serde(rename = "type")]
    pub node_type: Option<NodeType>,
    pub supports: BTreeSet<String>,
}

impl NetworkNode {
    pub(crate) fn new(id: String, node_type: Option<NodeType>) -> Self {
        Self {
            id,
            node_type,
            supports: BTreeSet::new(),
        }
    }
}

/// Read-only node registry built once by [`TopologyBuilder`].
///
/// Nodes are kept in registration order, which is the column order of every
/// per-tier output table.
#[derive(Debug, Clone, Default)]
pub struct TopologyModel {
    nodes: Vec<NetworkNode>,
    index: HashMap<String, usize>,
}

impl TopologyModel {
    pub(crate) fn from_parts(nodes: Vec<NetworkNode>, index: HashMap<String, usize>) -> Self {
        Self { nodes, index }
    }

    /// Looks up a node by id.
    pub fn get(&self, node_id: &str) -> Option<&NetworkNode> {
        self.index.get(node_id).map(|&i| &self.nodes[i])
    }

    /// Returns the tier of a node, or `None` if it is unregistered or untyped.
    pub fn node_type(&self, node_id: &str) -> Option<NodeType> {
        self.get(node_id).and_then(|n| n.node_type)
    }

    /// All registered nodes, including untyped ones, in registration order.
    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    /// Nodes of one tier, in registration order.
    pub fn nodes_of(&self, tier: NodeType) -> impl Iterator<Item = &NetworkNode> {
        self.nodes
            .iter()
            .filter(move |n| n.node_type == Some(tier))
    }

    /// Ids of the nodes of one tier, in registration order.
    pub fn ids_of(&self, tier: NodeType) -> Vec<String> {
        self.nodes_of(tier).map(|n| n.id.clone()).collect()
    }

    /// Ids of the nodes that list `child_id` in their supports set.
    pub fn parents_of(&self, child_id: &str) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.supports.contains(child_id))
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Indented supports tree: every CU with its DUs and their RUs, followed by
/// DUs and RUs that no node supports.
impl fmt::Display for TopologyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cu in self.nodes_of(NodeType::Cu) {
            writeln!(f, "{}", cu.id)?;
            for du_id in &cu.supports {
                writeln!(f, "  {du_id}")?;
                if let Some(du) = self.get(du_id) {
                    for ru_id in &du.supports {
                        writeln!(f, "    {ru_id}")?;
                    }
                }
            }
        }
        for tier in [NodeType::Du, NodeType::Ru] {
            for node in self.nodes_of(tier).filter(|n| self.parents_of(&n.id).is_empty()) {
                writeln!(f, "{} (unattached)", node.id)?;
            }
        }
        Ok(())
    }
}
