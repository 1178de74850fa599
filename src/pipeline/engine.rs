//! Per-timestamp orchestration of aggregation, power, and network totals.

use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use crate::error::Result;
use crate::series::{TierTable, UtilizationSample, UtilizationSeries, ensure_aligned, round2};
use crate::topology::{NetworkNode, NodeType, TopologyModel};

use super::aggregate::aggregate;
use super::network::{network_power_w, tier_power_w};
use super::power::PowerModel;
use super::types::{NetworkPowerRow, NodeReading, PipelineOutput, StepResult};

/// Drives the RU → DU → CU → network pass for every timestamp of an RU
/// utilization series.
///
/// Holds the topology by shared reference; each step depends only on the
/// topology and that step's RU sample, so steps never influence each other.
pub struct PipelineOrchestrator<'a> {
    topology: &'a TopologyModel,
    power: PowerModel,
    ru_nodes: Vec<&'a NetworkNode>,
    du_nodes: Vec<&'a NetworkNode>,
    cu_nodes: Vec<&'a NetworkNode>,
}

impl<'a> PipelineOrchestrator<'a> {
    pub fn new(topology: &'a TopologyModel, power: PowerModel) -> Self {
        Self {
            topology,
            power,
            ru_nodes: topology.nodes_of(NodeType::Ru).collect(),
            du_nodes: topology.nodes_of(NodeType::Du).collect(),
            cu_nodes: topology.nodes_of(NodeType::Cu).collect(),
        }
    }

    pub fn topology(&self) -> &TopologyModel {
        self.topology
    }

    pub fn power_model(&self) -> &PowerModel {
        &self.power
    }

    /// Executes one pass for a single RU sample.
    ///
    /// RU nodes without a value in the sample are left out of the RU tier;
    /// their DU parents average over the RUs that are present.
    pub fn step(&self, sample: &UtilizationSample) -> StepResult {
        // 1. RU readings from the sample; power and DU aggregation see the
        // unrounded input
        let ru: Vec<NodeReading> = self
            .ru_nodes
            .iter()
            .filter_map(|n| {
                sample.values.get(&n.id).map(|&u| NodeReading {
                    node_id: n.id.clone(),
                    utilization: round2(u),
                    power_w: self.power.power_w(NodeType::Ru, u, 0),
                })
            })
            .collect();

        // 2. DU from RU, 3. CU from DU
        let du = self.aggregate_tier(NodeType::Du, &self.du_nodes, &sample.values);
        let du_values: HashMap<String, f64> = du
            .iter()
            .map(|r| (r.node_id.clone(), r.utilization))
            .collect();
        let cu = self.aggregate_tier(NodeType::Cu, &self.cu_nodes, &du_values);

        // 4. Tier sums and network total
        let ru_w = tier_power_w(&ru);
        let du_w = tier_power_w(&du);
        let cu_w = tier_power_w(&cu);

        StepResult {
            timestamp: sample.timestamp,
            network: NetworkPowerRow {
                timestamp: sample.timestamp,
                ru_w,
                du_w,
                cu_w,
                total_w: network_power_w(ru_w, du_w, cu_w),
            },
            ru,
            du,
            cu,
        }
    }

    fn aggregate_tier(
        &self,
        tier: NodeType,
        nodes: &[&NetworkNode],
        child_values: &HashMap<String, f64>,
    ) -> Vec<NodeReading> {
        nodes
            .iter()
            .map(|n| {
                let utilization = aggregate(&n.supports, child_values);
                NodeReading {
                    node_id: n.id.clone(),
                    utilization,
                    power_w: self.power.power_w(tier, utilization, n.supports.len()),
                }
            })
            .collect()
    }

    /// Runs every timestamp of `ru` in order.
    ///
    /// # Errors
    ///
    /// Returns a format error if any RU value lies outside `[0, 1]`.
    pub fn run(&self, ru: &UtilizationSeries) -> Result<PipelineOutput> {
        self.run_with(ru, |_| {})
    }

    /// Like [`run`](Self::run), handing every step to `observe` as it is
    /// produced.
    ///
    /// # Errors
    ///
    /// Returns a format error if any RU value lies outside `[0, 1]`.
    pub fn run_with(
        &self,
        ru: &UtilizationSeries,
        mut observe: impl FnMut(&StepResult),
    ) -> Result<PipelineOutput> {
        ru.ensure_unit_range()?;
        self.report_lookup_gaps(ru);

        let columns: HashSet<&str> = ru.node_ids().iter().map(String::as_str).collect();
        let ru_ids = self
            .ru_nodes
            .iter()
            .filter(|n| columns.contains(n.id.as_str()))
            .map(|n| n.id.clone())
            .collect();
        let mut output = PipelineOutput::with_columns(
            ru_ids,
            self.topology.ids_of(NodeType::Du),
            self.topology.ids_of(NodeType::Cu),
        );

        for sample in ru.samples() {
            let step = self.step(&sample);
            output.push_step(&step)?;
            observe(&step);
        }

        info!(
            timestamps = output.len(),
            ru = output.utilization.ru.node_ids().len(),
            du = self.du_nodes.len(),
            cu = self.cu_nodes.len(),
            "pipeline run complete"
        );
        Ok(output)
    }

    /// Runs `ru` after checking that every other supplied input covers
    /// exactly the same timestamps.
    ///
    /// # Errors
    ///
    /// Returns a format error naming the first timestamp missing from the RU
    /// series or from one of `others`.
    pub fn run_aligned(
        &self,
        ru: &UtilizationSeries,
        others: &[(&str, &TierTable)],
    ) -> Result<PipelineOutput> {
        check_aligned(ru, others)?;
        self.run(ru)
    }

    /// Logs, once per run, the supports entries and series columns that
    /// cannot be matched.
    fn report_lookup_gaps(&self, ru: &UtilizationSeries) {
        let columns: HashSet<&str> = ru.node_ids().iter().map(String::as_str).collect();

        for du in &self.du_nodes {
            for child in du.supports.iter().filter(|c| !columns.contains(c.as_str())) {
                warn!(du = %du.id, ru = %child, "supported RU has no utilization column; skipped");
            }
        }
        for id in ru.node_ids() {
            if self.topology.node_type(id) != Some(NodeType::Ru) {
                warn!(column = %id, "utilization column is not an RU of the topology; ignored");
            }
        }
    }
}

/// Checks that every labelled table covers exactly the timestamps of `ru`.
///
/// # Errors
///
/// Returns a format error naming the first timestamp missing on either side.
pub fn check_aligned(ru: &UtilizationSeries, others: &[(&str, &TierTable)]) -> Result<()> {
    for (label, table) in others {
        ensure_aligned("RU utilization", ru, label, table)?;
    }
    Ok(())
}
