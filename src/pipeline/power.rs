//! Linear per-tier power models.

use serde::{Deserialize, Serialize};

use crate::series::round2;
use crate::topology::NodeType;

/// Coefficients of `P = p0 + k1 * utilization + k2 * children`.
///
/// `k2` only applies to tiers whose power depends on how many nodes they
/// support (DU in the default model); it is `None` elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierPowerParams {
    /// Idle power (W).
    pub p0: f64,
    /// Load-proportional coefficient (W per unit utilization).
    pub k1: f64,
    /// Per-supported-node coefficient (W per child).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k2: Option<f64>,
}

impl TierPowerParams {
    pub const fn new(p0: f64, k1: f64) -> Self {
        Self { p0, k1, k2: None }
    }

    pub const fn with_child_term(p0: f64, k1: f64, k2: f64) -> Self {
        Self {
            p0,
            k1,
            k2: Some(k2),
        }
    }

    /// Power in watts for one node, rounded to two decimals.
    ///
    /// # Arguments
    ///
    /// * `utilization` - Load fraction in `[0, 1]`
    /// * `children` - Size of the node's supports set
    pub fn power_w(&self, utilization: f64, children: usize) -> f64 {
        let child_term = self.k2.map_or(0.0, |k2| k2 * children as f64);
        round2(self.p0 + self.k1 * utilization + child_term)
    }
}

/// Power parameters for all three tiers.
///
/// # Examples
///
/// ```
/// use ran_energy_twin::pipeline::power::PowerModel;
/// use ran_energy_twin::topology::NodeType;
///
/// let model = PowerModel::default();
/// assert_eq!(model.power_w(NodeType::Du, 0.4, 2), 320.0);
/// assert_eq!(model.power_w(NodeType::Cu, 0.4, 1), 240.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PowerModel {
    pub ru: TierPowerParams,
    pub du: TierPowerParams,
    pub cu: TierPowerParams,
}

impl Default for PowerModel {
    fn default() -> Self {
        Self {
            ru: TierPowerParams::new(200.0, 200.0),
            du: TierPowerParams::with_child_term(200.0, 200.0, 20.0),
            cu: TierPowerParams::new(200.0, 100.0),
        }
    }
}

impl PowerModel {
    pub fn params(&self, tier: NodeType) -> &TierPowerParams {
        match tier {
            NodeType::Ru => &self.ru,
            NodeType::Du => &self.du,
            NodeType::Cu => &self.cu,
        }
    }

    /// Power in watts of one node of `tier`.
    pub fn power_w(&self, tier: NodeType, utilization: f64, children: usize) -> f64 {
        self.params(tier).power_w(utilization, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ru_power_is_linear_in_utilization() {
        let m = PowerModel::default();
        assert_eq!(m.power_w(NodeType::Ru, 0.0, 0), 200.0);
        assert_eq!(m.power_w(NodeType::Ru, 0.2, 0), 240.0);
        assert_eq!(m.power_w(NodeType::Ru, 1.0, 0), 400.0);
    }

    #[test]
    fn du_power_counts_children() {
        let m = PowerModel::default();
        assert_eq!(m.power_w(NodeType::Du, 0.4, 2), 320.0);
        assert_eq!(m.power_w(NodeType::Du, 0.4, 0), 280.0);
    }

    #[test]
    fn child_count_ignored_without_k2() {
        let m = PowerModel::default();
        assert_eq!(
            m.power_w(NodeType::Cu, 0.4, 1),
            m.power_w(NodeType::Cu, 0.4, 50)
        );
        assert_eq!(m.power_w(NodeType::Cu, 0.4, 1), 240.0);
    }

    #[test]
    fn output_rounded_to_two_decimals() {
        let p = TierPowerParams::new(0.0, 1.0 / 3.0);
        assert_eq!(p.power_w(1.0, 0), 0.33);
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let m = PowerModel::default();
        let a = m.power_w(NodeType::Du, 0.37, 5);
        let b = m.power_w(NodeType::Du, 0.37, 5);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
