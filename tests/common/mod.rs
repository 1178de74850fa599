//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use ran_energy_twin::topology::{NetworkDescription, TopologyBuilder, TopologyModel};
use ran_energy_twin::{TierTable, UtilizationSeries};

/// CU1 → {DU1}, DU1 → {RU1, RU2}, with a reversed and a duplicated link.
pub const REFERENCE_TOPOLOGY_JSON: &str = r#"{
  "ietf-network:networks": {
    "network": [{
      "node": [
        {"node-id": "O-RAN-CU-1"},
        {"node-id": "O-RAN-DU-1"},
        {"node-id": "O-RAN-RU-1"},
        {"node-id": "O-RAN-RU-2"}
      ],
      "ietf-network-topology:link": [
        {"source": {"source-node": "O-RAN-CU-1"}, "destination": {"dest-node": "O-RAN-DU-1"}},
        {"source": {"source-node": "O-RAN-DU-1"}, "destination": {"dest-node": "O-RAN-RU-1"}},
        {"source": {"source-node": "O-RAN-RU-2"}, "destination": {"dest-node": "O-RAN-DU-1"}},
        {"source": {"source-node": "O-RAN-DU-1"}, "destination": {"dest-node": "O-RAN-RU-1"}}
      ]
    }]
  }
}"#;

/// Hour `h` of 2024-01-01, UTC.
pub fn ts(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
}

pub fn reference_topology() -> TopologyModel {
    let desc = NetworkDescription::from_json_str(REFERENCE_TOPOLOGY_JSON).unwrap();
    TopologyBuilder::from_description(&desc).unwrap()
}

/// RU1 = 0.2, RU2 = 0.6 at hour 0.
pub fn reference_series() -> UtilizationSeries {
    series(&[(0, [0.2, 0.6])])
}

/// RU1/RU2 utilization rows keyed by hour.
pub fn series(rows: &[(u32, [f64; 2])]) -> UtilizationSeries {
    let mut table = TierTable::new(vec!["O-RAN-RU-1".into(), "O-RAN-RU-2".into()]);
    for (h, values) in rows {
        table.push_row(ts(*h), values.to_vec()).unwrap();
    }
    table
}

/// Files shipped with the crate under `data/`.
pub fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ran-energy-twin-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
