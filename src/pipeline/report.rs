//! Post-hoc summary statistics over a finished run.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::series::{format_timestamp, round2};

use super::types::NetworkPowerRow;

/// Aggregate figures derived from the network power series.
///
/// Computed from the finished rows so the report always agrees with the
/// exported tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkReport {
    /// Number of timestamps in the run.
    pub samples: usize,
    /// Mean network power (W).
    pub mean_total_w: f64,
    /// Highest network power (W).
    pub peak_total_w: f64,
    /// First timestamp at which the peak occurred.
    pub peak_at: Option<DateTime<Utc>>,
    /// Lowest network power (W).
    pub min_total_w: f64,
    /// Mean RU tier power (W).
    pub mean_ru_w: f64,
    /// Mean DU tier power (W).
    pub mean_du_w: f64,
    /// Mean CU tier power (W).
    pub mean_cu_w: f64,
}

impl NetworkReport {
    pub fn from_rows(rows: &[NetworkPowerRow]) -> Self {
        if rows.is_empty() {
            return Self {
                samples: 0,
                mean_total_w: 0.0,
                peak_total_w: 0.0,
                peak_at: None,
                min_total_w: 0.0,
                mean_ru_w: 0.0,
                mean_du_w: 0.0,
                mean_cu_w: 0.0,
            };
        }

        let n = rows.len() as f64;
        let mut sum = [0.0_f64; 4];
        let mut peak = rows[0];
        let mut min_total = f64::INFINITY;

        for r in rows {
            sum[0] += r.ru_w;
            sum[1] += r.du_w;
            sum[2] += r.cu_w;
            sum[3] += r.total_w;
            if r.total_w > peak.total_w {
                peak = *r;
            }
            min_total = min_total.min(r.total_w);
        }

        Self {
            samples: rows.len(),
            mean_total_w: round2(sum[3] / n),
            peak_total_w: peak.total_w,
            peak_at: Some(peak.timestamp),
            min_total_w: min_total,
            mean_ru_w: round2(sum[0] / n),
            mean_du_w: round2(sum[1] / n),
            mean_cu_w: round2(sum[2] / n),
        }
    }
}

impl fmt::Display for NetworkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Network Power Report ---")?;
        writeln!(f, "Timestamps:        {}", self.samples)?;
        writeln!(f, "Mean total power:  {:.2} W", self.mean_total_w)?;
        match self.peak_at {
            Some(at) => writeln!(
                f,
                "Peak total power:  {:.2} W at {}",
                self.peak_total_w,
                format_timestamp(&at)
            )?,
            None => writeln!(f, "Peak total power:  {:.2} W", self.peak_total_w)?,
        }
        writeln!(f, "Min total power:   {:.2} W", self.min_total_w)?;
        write!(
            f,
            "Mean tier power:   RU {:.2} W | DU {:.2} W | CU {:.2} W",
            self.mean_ru_w, self.mean_du_w, self.mean_cu_w
        )
    }
}
