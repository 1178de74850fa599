//! Network-wide power summation.

use crate::error::Result;
use crate::series::{TierTable, ensure_aligned, round2};

use super::types::{NetworkPowerRow, NodeReading};

/// Sums node powers, rounded to two decimals.
pub fn tier_power_w(readings: &[NodeReading]) -> f64 {
    round2(readings.iter().map(|r| r.power_w).sum())
}

/// Network total from per-tier sums, rounded to two decimals.
///
/// Pure summation; no tier is weighted.
pub fn network_power_w(ru_w: f64, du_w: f64, cu_w: f64) -> f64 {
    round2(ru_w + du_w + cu_w)
}

/// Builds the network summary from three externally produced per-tier power
/// tables.
///
/// # Errors
///
/// Returns a format error if the three tables do not cover the same
/// timestamps in the same order.
pub fn summarize_power_tables(
    ru: &TierTable,
    du: &TierTable,
    cu: &TierTable,
) -> Result<Vec<NetworkPowerRow>> {
    ensure_aligned("RU power", ru, "DU power", du)?;
    ensure_aligned("RU power", ru, "CU power", cu)?;

    Ok(ru
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let ru_w = ru.row_sum(i);
            let du_w = du.row_sum(i);
            let cu_w = cu.row_sum(i);
            NetworkPowerRow {
                timestamp: row.timestamp,
                ru_w,
                du_w,
                cu_w,
                total_w: network_power_w(ru_w, du_w, cu_w),
            }
        })
        .collect())
}
