//! CSV import of per-tier tables.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Result, TwinError};
use crate::series::{TierTable, parse_timestamp};

/// Reads a tier table from a CSV file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened, or a format error if
/// its content is malformed (see [`read_tier_table`]).
pub fn read_tier_table_file(path: &Path) -> Result<TierTable> {
    let file = File::open(path)?;
    read_tier_table(io::BufReader::new(file)).map_err(|e| match e {
        TwinError::Format(msg) => TwinError::format(format!("{}: {msg}", path.display())),
        other => other,
    })
}

fn at_line(line: usize, err: TwinError) -> TwinError {
    match err {
        TwinError::Format(msg) => TwinError::format(format!("line {line}: {msg}")),
        other => other,
    }
}

/// Reads a tier table (`Timestamp,<node id>...`) from any reader.
///
/// The first column holds ISO-8601 timestamps; every other column is one
/// node. Blank lines are skipped.
///
/// # Errors
///
/// Returns a format error for a missing or duplicated header column, a row
/// with the wrong number of fields, or an unparseable timestamp or value.
pub fn read_tier_table(reader: impl Read) -> Result<TierTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(TwinError::format("missing header row"));
    }

    let node_ids: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    let mut seen = HashSet::new();
    for id in &node_ids {
        if id.is_empty() {
            return Err(TwinError::format("empty node id in header"));
        }
        if !seen.insert(id.as_str()) {
            return Err(TwinError::format(format!("duplicate column \"{id}\"")));
        }
    }

    let width = headers.len();
    let mut table = TierTable::new(node_ids);
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        // header is line 1
        let line = i + 2;
        if record.len() != width {
            return Err(TwinError::format(format!(
                "line {line}: expected {width} fields, got {}",
                record.len()
            )));
        }

        let timestamp = parse_timestamp(&record[0]).map_err(|e| at_line(line, e))?;
        let values = record
            .iter()
            .skip(1)
            .map(|field| {
                field.parse::<f64>().map_err(|_| {
                    TwinError::format(format!("line {line}: unparseable value \"{field}\""))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        table.push_row(timestamp, values)?;
    }
    Ok(table)
}
