//! Two-phase construction of a [`TopologyModel`] from raw node and link records.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::description::{LinkRecord, NetworkDescription, NodeRecord};
use super::{NetworkNode, NodeType, TopologyModel};
use crate::error::{Result, TwinError};

/// Collects raw node and link records and resolves them into a
/// [`TopologyModel`].
///
/// All nodes are registered before any link is resolved, so link order and
/// network order never change the result. Link direction in the raw records
/// is ignored: a (DU, RU) or (CU, DU) pair is always recorded under the
/// higher-tier node.
///
/// # Examples
///
/// ```
/// use ran_energy_twin::topology::{NodeType, TopologyBuilder};
///
/// let topo = TopologyBuilder::new()
///     .node("O-RAN-DU-1")
///     .node("O-RAN-RU-1")
///     .link("O-RAN-RU-1", "O-RAN-DU-1")
///     .build();
///
/// let du = topo.get("O-RAN-DU-1").unwrap();
/// assert_eq!(du.node_type, Some(NodeType::Du));
/// assert!(du.supports.contains("O-RAN-RU-1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TopologyBuilder {
    nodes: Vec<NodeRecord>,
    links: Vec<LinkRecord>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a topology from a parsed description.
    ///
    /// # Errors
    ///
    /// Returns a config error if the description has no network entries.
    pub fn from_description(desc: &NetworkDescription) -> Result<TopologyModel> {
        let networks = desc.network_entries();
        if networks.is_empty() {
            return Err(TwinError::config("topology", "no networks found"));
        }

        let mut builder = Self::new();
        for network in networks {
            builder.nodes.extend(network.node.iter().cloned());
            builder.links.extend(network.links.iter().cloned());
        }
        let model = builder.build();
        info!(
            networks = networks.len(),
            nodes = model.len(),
            ru = model.nodes_of(NodeType::Ru).count(),
            du = model.nodes_of(NodeType::Du).count(),
            cu = model.nodes_of(NodeType::Cu).count(),
            "topology built"
        );
        Ok(model)
    }

    /// Adds a node record.
    pub fn node(mut self, node_id: impl Into<String>) -> Self {
        self.nodes.push(NodeRecord::new(node_id));
        self
    }

    /// Adds a link record; direction does not matter.
    pub fn link(mut self, source: impl Into<String>, dest: impl Into<String>) -> Self {
        self.links.push(LinkRecord::new(source, dest));
        self
    }

    /// Registers every node, then resolves every link.
    pub fn build(self) -> TopologyModel {
        let (mut nodes, index) = register_nodes(&self.nodes);
        resolve_links(&self.links, &mut nodes, &index);
        TopologyModel::from_parts(nodes, index)
    }
}

fn register_nodes(records: &[NodeRecord]) -> (Vec<NetworkNode>, HashMap<String, usize>) {
    let mut nodes = Vec::with_capacity(records.len());
    let mut index = HashMap::with_capacity(records.len());

    for record in records {
        let id = record.node_id.as_str();
        if id.is_empty() {
            warn!("skipping node record without node-id");
            continue;
        }
        if index.contains_key(id) {
            // Classification is a pure function of the id, so a repeat can
            // only ever restate the type already recorded.
            debug!(node = id, "duplicate node record ignored");
            continue;
        }

        let node_type = NodeType::from_node_id(id);
        if node_type.is_none() {
            debug!(node = id, hint = ?record.type_hint, "node matches no tier prefix");
        }
        index.insert(id.to_string(), nodes.len());
        nodes.push(NetworkNode::new(id.to_string(), node_type));
    }

    (nodes, index)
}

fn resolve_links(links: &[LinkRecord], nodes: &mut [NetworkNode], index: &HashMap<String, usize>) {
    // child id -> first parent seen, for the single-parent check
    let mut parent_of: HashMap<&str, &str> = HashMap::new();

    for link in links {
        let source = link.source.source_node.as_str();
        let dest = link.destination.dest_node.as_str();
        if source.is_empty() || dest.is_empty() {
            debug!(source, dest, "skipping link with missing endpoint");
            continue;
        }

        let (Some(&si), Some(&di)) = (index.get(source), index.get(dest)) else {
            warn!(source, dest, "link references an unregistered node; dropped");
            continue;
        };

        let (Some(st), Some(dt)) = (nodes[si].node_type, nodes[di].node_type) else {
            debug!(source, dest, "link involves an untyped node; dropped");
            continue;
        };

        let Some((parent, child)) = orient((source, st), (dest, dt)) else {
            debug!(source, dest, %st, %dt, "link between unrelated tiers; dropped");
            continue;
        };

        match parent_of.get(child) {
            Some(&existing) if existing != parent => {
                warn!(child, existing, parent, "node is supported by more than one parent");
            }
            Some(_) => {}
            None => {
                parent_of.insert(child, parent);
            }
        }

        let pi = index[parent];
        nodes[pi].supports.insert(child.to_string());
    }
}

/// Orders a typed link as `(parent, child)` when it joins adjacent tiers.
fn orient<'a>(a: (&'a str, NodeType), b: (&'a str, NodeType)) -> Option<(&'a str, &'a str)> {
    match (a.1, b.1) {
        (NodeType::Du, NodeType::Ru) | (NodeType::Cu, NodeType::Du) => Some((a.0, b.0)),
        (NodeType::Ru, NodeType::Du) | (NodeType::Du, NodeType::Cu) => Some((b.0, a.0)),
        _ => None,
    }
}
