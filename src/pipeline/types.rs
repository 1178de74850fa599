//! Per-timestamp step records and whole-run output tables.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::series::{TierTable, format_timestamp};
use crate::topology::NodeType;

/// Utilization and power of one node at one timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReading {
    pub node_id: String,
    /// Load fraction, rounded to two decimals for aggregated tiers.
    pub utilization: f64,
    /// Power in watts, rounded to two decimals.
    pub power_w: f64,
}

/// Per-tier power sums and network total at one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkPowerRow {
    pub timestamp: DateTime<Utc>,
    pub ru_w: f64,
    pub du_w: f64,
    pub cu_w: f64,
    pub total_w: f64,
}

/// Complete record of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub timestamp: DateTime<Utc>,
    pub ru: Vec<NodeReading>,
    pub du: Vec<NodeReading>,
    pub cu: Vec<NodeReading>,
    pub network: NetworkPowerRow,
}

impl StepResult {
    pub fn tier(&self, tier: NodeType) -> &[NodeReading] {
        match tier {
            NodeType::Ru => &self.ru,
            NodeType::Du => &self.du,
            NodeType::Cu => &self.cu,
        }
    }
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = &self.network;
        write!(
            f,
            "{} | RU={:>9.2} W ({})  DU={:>9.2} W ({})  CU={:>9.2} W ({}) | total={:>10.2} W",
            format_timestamp(&self.timestamp),
            n.ru_w,
            self.ru.len(),
            n.du_w,
            self.du.len(),
            n.cu_w,
            self.cu.len(),
            n.total_w,
        )
    }
}

/// One table per tier, sharing the same timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TierTables {
    pub ru: TierTable,
    pub du: TierTable,
    pub cu: TierTable,
}

impl TierTables {
    pub fn new(ru_ids: Vec<String>, du_ids: Vec<String>, cu_ids: Vec<String>) -> Self {
        Self {
            ru: TierTable::new(ru_ids),
            du: TierTable::new(du_ids),
            cu: TierTable::new(cu_ids),
        }
    }

    pub fn get(&self, tier: NodeType) -> &TierTable {
        match tier {
            NodeType::Ru => &self.ru,
            NodeType::Du => &self.du,
            NodeType::Cu => &self.cu,
        }
    }

    fn get_mut(&mut self, tier: NodeType) -> &mut TierTable {
        match tier {
            NodeType::Ru => &mut self.ru,
            NodeType::Du => &mut self.du,
            NodeType::Cu => &mut self.cu,
        }
    }
}

/// Everything a pipeline run produces, handed to CSV writers, the API and
/// the chart viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub utilization: TierTables,
    pub power: TierTables,
    pub network: Vec<NetworkPowerRow>,
}

impl PipelineOutput {
    /// Creates an empty output with fixed per-tier columns.
    pub fn with_columns(ru_ids: Vec<String>, du_ids: Vec<String>, cu_ids: Vec<String>) -> Self {
        Self {
            utilization: TierTables::new(ru_ids.clone(), du_ids.clone(), cu_ids.clone()),
            power: TierTables::new(ru_ids, du_ids, cu_ids),
            network: Vec::new(),
        }
    }

    /// Appends one step as a row of every table.
    ///
    /// # Errors
    ///
    /// Returns a format error if the step's readings do not match the columns.
    pub fn push_step(&mut self, step: &StepResult) -> Result<()> {
        for tier in NodeType::ALL {
            let readings = step.tier(tier);
            self.utilization
                .get_mut(tier)
                .push_row(step.timestamp, readings.iter().map(|r| r.utilization).collect())?;
            self.power
                .get_mut(tier)
                .push_row(step.timestamp, readings.iter().map(|r| r.power_w).collect())?;
        }
        self.network.push(step.network);
        Ok(())
    }

    /// Network total power per timestamp.
    pub fn total_power(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.network.iter().map(|r| (r.timestamp, r.total_w))
    }

    /// Number of timestamps covered.
    pub fn len(&self) -> usize {
        self.network.len()
    }

    pub fn is_empty(&self) -> bool {
        self.network.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn reading(id: &str, u: f64, p: f64) -> NodeReading {
        NodeReading {
            node_id: id.to_string(),
            utilization: u,
            power_w: p,
        }
    }

    fn make_step() -> StepResult {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        StepResult {
            timestamp,
            ru: vec![reading("RU1", 0.2, 240.0), reading("RU2", 0.6, 320.0)],
            du: vec![reading("DU1", 0.4, 320.0)],
            cu: vec![reading("CU1", 0.4, 240.0)],
            network: NetworkPowerRow {
                timestamp,
                ru_w: 560.0,
                du_w: 320.0,
                cu_w: 240.0,
                total_w: 1120.0,
            },
        }
    }

    #[test]
    fn push_step_fills_every_table() {
        let mut out = PipelineOutput::with_columns(
            vec!["RU1".into(), "RU2".into()],
            vec!["DU1".into()],
            vec!["CU1".into()],
        );
        out.push_step(&make_step()).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out.utilization.ru.rows()[0].values, vec![0.2, 0.6]);
        assert_eq!(out.power.du.rows()[0].values, vec![320.0]);
        assert_eq!(out.total_power().next().map(|(_, w)| w), Some(1120.0));
    }

    #[test]
    fn push_step_rejects_column_mismatch() {
        let mut out = PipelineOutput::with_columns(vec!["RU1".into()], vec![], vec![]);
        assert!(out.push_step(&make_step()).is_err());
    }

    #[test]
    fn step_display_does_not_panic() {
        let s = format!("{}", make_step());
        assert!(s.contains("total="));
    }
}
