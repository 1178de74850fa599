//! Timestamped per-tier tables: utilization inputs and utilization/power outputs.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{Result, TwinError};

/// Naive timestamp layouts accepted in addition to RFC 3339. Naive values are
/// taken to be UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// One table row: a timestamp and one value per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub timestamp: DateTime<Utc>,
    pub values: Vec<f64>,
}

/// A timestamp and the value of every node sampled at it.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilizationSample {
    pub timestamp: DateTime<Utc>,
    pub values: HashMap<String, f64>,
}

/// Timestamp-ordered table with one column per node of a tier.
///
/// Used both for utilization (values in `[0, 1]`) and power (watts). Column
/// order is fixed at construction and every row carries exactly one value per
/// column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TierTable {
    node_ids: Vec<String>,
    rows: Vec<TableRow>,
}

/// Utilization input for one tier.
pub type UtilizationSeries = TierTable;

impl TierTable {
    pub fn new(node_ids: Vec<String>) -> Self {
        Self {
            node_ids,
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns a format error if `values` does not have one entry per column.
    pub fn push_row(&mut self, timestamp: DateTime<Utc>, values: Vec<f64>) -> Result<()> {
        if values.len() != self.node_ids.len() {
            return Err(TwinError::format(format!(
                "row at {}: expected {} values, got {}",
                format_timestamp(&timestamp),
                self.node_ids.len(),
                values.len()
            )));
        }
        self.rows.push(TableRow { timestamp, values });
        Ok(())
    }

    pub fn node_ids(&self) -> &[String] {
        &self.node_ids
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row timestamps in table order.
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.rows.iter().map(|r| r.timestamp)
    }

    /// Returns the row at `timestamp`, if present.
    pub fn row_at(&self, timestamp: &DateTime<Utc>) -> Option<&TableRow> {
        self.rows.iter().find(|r| &r.timestamp == timestamp)
    }

    /// Keyed view of row `i`.
    pub fn sample(&self, i: usize) -> Option<UtilizationSample> {
        self.rows.get(i).map(|row| self.keyed(row))
    }

    /// Keyed views of every row, in table order.
    pub fn samples(&self) -> impl Iterator<Item = UtilizationSample> + '_ {
        self.rows.iter().map(|row| self.keyed(row))
    }

    fn keyed(&self, row: &TableRow) -> UtilizationSample {
        UtilizationSample {
            timestamp: row.timestamp,
            values: self
                .node_ids
                .iter()
                .cloned()
                .zip(row.values.iter().copied())
                .collect(),
        }
    }

    /// All values of one column in row order.
    pub fn column(&self, node_id: &str) -> Option<Vec<f64>> {
        let c = self.node_ids.iter().position(|id| id == node_id)?;
        Some(self.rows.iter().map(|r| r.values[c]).collect())
    }

    /// Sum of row `i` rounded to two decimals.
    pub fn row_sum(&self, i: usize) -> f64 {
        self.rows
            .get(i)
            .map_or(0.0, |r| round2(r.values.iter().sum()))
    }

    /// Rows whose timestamps fall in `[from, to]` (either bound optional).
    pub fn rows_between(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(move |r| {
            from.is_none_or(|f| r.timestamp >= f) && to.is_none_or(|t| r.timestamp <= t)
        })
    }

    /// Checks that every value is a utilization fraction.
    ///
    /// # Errors
    ///
    /// Returns a format error naming the first value outside `[0, 1]`.
    pub fn ensure_unit_range(&self) -> Result<()> {
        for row in &self.rows {
            for (id, v) in self.node_ids.iter().zip(&row.values) {
                if !(0.0..=1.0).contains(v) {
                    return Err(TwinError::format(format!(
                        "utilization of {id} at {} is {v}, expected a value in [0, 1]",
                        format_timestamp(&row.timestamp)
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Checks that `other` covers exactly the timestamps of `reference`, in the
/// same order.
///
/// # Errors
///
/// Returns a format error naming the first timestamp missing from either side.
pub fn ensure_aligned(
    reference_label: &str,
    reference: &TierTable,
    other_label: &str,
    other: &TierTable,
) -> Result<()> {
    let mut ours = reference.timestamps();
    let mut theirs = other.timestamps();
    loop {
        match (ours.next(), theirs.next()) {
            (None, None) => return Ok(()),
            (Some(a), Some(b)) if a == b => {}
            (Some(a), Some(_)) | (Some(a), None) => {
                return Err(TwinError::format(format!(
                    "{other_label} has no row for {}, present in {reference_label}",
                    format_timestamp(&a)
                )));
            }
            (None, Some(b)) => {
                return Err(TwinError::format(format!(
                    "{reference_label} has no row for {}, present in {other_label}",
                    format_timestamp(&b)
                )));
            }
        }
    }
}

/// Parses an ISO-8601 timestamp. Values without an offset are read as UTC.
///
/// # Errors
///
/// Returns a format error if no accepted layout matches.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TwinError::format(format!("unparseable timestamp \"{s}\"")))
}

/// Formats a timestamp as RFC 3339 with an explicit `+00:00` offset.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Rounds to two decimal places.
///
/// Rounding is applied to the exact binary value, so a tie such as `0.125`
/// goes to the even digit (`0.12`) and `0.285`, stored just below the tie,
/// goes down.
pub fn round2(x: f64) -> f64 {
    format!("{x:.2}").parse().unwrap_or(x)
}
