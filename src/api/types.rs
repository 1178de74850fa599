//! API response and query types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::series::{TableRow, TierTable};
use crate::topology::{NetworkNode, NodeType};

/// Registered nodes with per-tier counts.
#[derive(Debug, Serialize)]
pub struct TopologyResponse {
    pub ru_count: usize,
    pub du_count: usize,
    pub cu_count: usize,
    /// Every registered node in registration order, with its supports set.
    pub nodes: Vec<NetworkNode>,
}

impl TopologyResponse {
    pub fn from_nodes(nodes: &[NetworkNode]) -> Self {
        let count = |tier| nodes.iter().filter(|n| n.node_type == Some(tier)).count();
        Self {
            ru_count: count(NodeType::Ru),
            du_count: count(NodeType::Du),
            cu_count: count(NodeType::Cu),
            nodes: nodes.to_vec(),
        }
    }
}

/// One tier table, optionally restricted to a time range.
#[derive(Debug, Serialize)]
pub struct TierTableResponse<'a> {
    pub tier: NodeType,
    pub node_ids: &'a [String],
    pub rows: Vec<&'a TableRow>,
}

impl<'a> TierTableResponse<'a> {
    pub fn new(
        tier: NodeType,
        table: &'a TierTable,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            tier,
            node_ids: table.node_ids(),
            rows: table.rows_between(from, to).collect(),
        }
    }
}

/// Optional inclusive time range, as RFC 3339 or naive UTC timestamps.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
