//! CSV export for tier tables, total-power series and the network summary.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::Result;
use crate::pipeline::{NetworkPowerRow, PipelineOutput};
use crate::series::{TierTable, format_timestamp};
use crate::topology::NodeType;

/// First header column of every table.
const TIMESTAMP_COLUMN: &str = "Timestamp";

/// Header of a total-power series.
const TOTAL_POWER_HEADER: &str = "Timestamp,Total Power Consumption (W)";

/// Header of the network summary.
const NETWORK_SUMMARY_HEADER: &str = "Timestamp,RU Power,DU Power,CU Power,Total Power";

/// Network summary file name inside the output directory.
pub const NETWORK_SUMMARY_FILE: &str = "aggregated_power_consumption.csv";

/// Network total-power series file name inside the output directory.
pub const TOTAL_POWER_FILE: &str = "total_power_consumption.csv";

/// Per-tier utilization file name, e.g. `du_utilization_data.csv`.
pub fn utilization_file(tier: NodeType) -> String {
    format!("{}_utilization_data.csv", tier.as_str().to_lowercase())
}

/// Per-tier power file name, e.g. `du_power_consumption.csv`.
pub fn power_file(tier: NodeType) -> String {
    format!("{}_power_consumption.csv", tier.as_str().to_lowercase())
}

/// Per-tier total power file name, e.g. `du_total_power_consumption.csv`.
pub fn total_power_file(tier: NodeType) -> String {
    format!("{}_total_power_consumption.csv", tier.as_str().to_lowercase())
}

/// Writes a tier table (`Timestamp,<node id>...`) with two decimals.
///
/// # Errors
///
/// Returns a CSV or I/O error if writing fails.
pub fn write_tier_table(table: &TierTable, writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(
        std::iter::once(TIMESTAMP_COLUMN).chain(table.node_ids().iter().map(String::as_str)),
    )?;

    for row in table.rows() {
        let mut record = Vec::with_capacity(row.values.len() + 1);
        record.push(format_timestamp(&row.timestamp));
        record.extend(row.values.iter().map(|v| format!("{v:.2}")));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a `Timestamp,Total Power Consumption (W)` series.
///
/// # Errors
///
/// Returns a CSV or I/O error if writing fails.
pub fn write_total_power(
    series: impl IntoIterator<Item = (DateTime<Utc>, f64)>,
    writer: impl Write,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(TOTAL_POWER_HEADER.split(','))?;
    for (timestamp, watts) in series {
        wtr.write_record(&[format_timestamp(&timestamp), format!("{watts:.2}")])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the `Timestamp,RU Power,DU Power,CU Power,Total Power` summary.
///
/// # Errors
///
/// Returns a CSV or I/O error if writing fails.
pub fn write_network_summary(rows: &[NetworkPowerRow], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(NETWORK_SUMMARY_HEADER.split(','))?;
    for r in rows {
        wtr.write_record(&[
            format_timestamp(&r.timestamp),
            format!("{:.2}", r.ru_w),
            format!("{:.2}", r.du_w),
            format!("{:.2}", r.cu_w),
            format!("{:.2}", r.total_w),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a tier table to a file.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_tier_table(table: &TierTable, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_tier_table(table, io::BufWriter::new(file))
}

/// Writes the network summary to a file.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_network_summary(rows: &[NetworkPowerRow], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_network_summary(rows, io::BufWriter::new(file))
}

/// Writes every table of a run into `dir`, creating it if needed.
///
/// Per tier: utilization, power and total power. Then the network total-power
/// series and the network summary. Returns the written paths in write order.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be written.
pub fn export_run(output: &PipelineOutput, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(3 * NodeType::ALL.len() + 2);

    for tier in NodeType::ALL {
        let path = dir.join(utilization_file(tier));
        export_tier_table(output.utilization.get(tier), &path)?;
        written.push(path);

        let power = output.power.get(tier);
        let path = dir.join(power_file(tier));
        export_tier_table(power, &path)?;
        written.push(path);

        let path = dir.join(total_power_file(tier));
        let totals = (0..power.len()).map(|i| (power.rows()[i].timestamp, power.row_sum(i)));
        write_total_power(totals, io::BufWriter::new(File::create(&path)?))?;
        written.push(path);
    }

    let path = dir.join(TOTAL_POWER_FILE);
    write_total_power(output.total_power(), io::BufWriter::new(File::create(&path)?))?;
    written.push(path);

    let path = dir.join(NETWORK_SUMMARY_FILE);
    export_network_summary(&output.network, &path)?;
    written.push(path);

    info!(dir = %dir.display(), files = written.len(), "run tables written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::io::import::read_tier_table;

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    fn make_table(rows: u32) -> TierTable {
        let mut t = TierTable::new(vec!["O-RAN-DU-1".into(), "O-RAN-DU-2".into()]);
        for h in 0..rows {
            t.push_row(ts(h), vec![320.0, 200.5]).unwrap();
        }
        t
    }

    fn to_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn tier_table_header_lists_node_ids() {
        let mut buf = Vec::new();
        write_tier_table(&make_table(1), &mut buf).unwrap();
        let out = to_string(buf);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Timestamp,O-RAN-DU-1,O-RAN-DU-2"));
        assert_eq!(lines.next(), Some("2024-01-01T00:00:00+00:00,320.00,200.50"));
    }

    #[test]
    fn row_count_matches_timestamps() {
        let mut buf = Vec::new();
        write_tier_table(&make_table(24), &mut buf).unwrap();
        // 1 header + 24 data rows
        assert_eq!(to_string(buf).lines().count(), 25);
    }

    #[test]
    fn total_power_header() {
        let mut buf = Vec::new();
        write_total_power([(ts(0), 1120.0)], &mut buf).unwrap();
        let out = to_string(buf);
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec![
                "Timestamp,Total Power Consumption (W)",
                "2024-01-01T00:00:00+00:00,1120.00"
            ]
        );
    }

    #[test]
    fn network_summary_header() {
        let rows = [NetworkPowerRow {
            timestamp: ts(0),
            ru_w: 560.0,
            du_w: 320.0,
            cu_w: 240.0,
            total_w: 1120.0,
        }];
        let mut buf = Vec::new();
        write_network_summary(&rows, &mut buf).unwrap();
        let out = to_string(buf);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "Timestamp,RU Power,DU Power,CU Power,Total Power");
        assert_eq!(lines[1], "2024-01-01T00:00:00+00:00,560.00,320.00,240.00,1120.00");
    }

    #[test]
    fn deterministic_output() {
        let table = make_table(5);
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_tier_table(&table, &mut buf1).unwrap();
        write_tier_table(&table, &mut buf2).unwrap();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn round_trip_through_reader() {
        let table = make_table(3);
        let mut buf = Vec::new();
        write_tier_table(&table, &mut buf).unwrap();
        let back = read_tier_table(buf.as_slice()).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn file_names_are_lowercase_per_tier() {
        assert_eq!(utilization_file(NodeType::Ru), "ru_utilization_data.csv");
        assert_eq!(power_file(NodeType::Cu), "cu_power_consumption.csv");
        assert_eq!(total_power_file(NodeType::Du), "du_total_power_consumption.csv");
    }
}
