//! CSV round trips through files and the network summary of exported tables.

mod common;

use ran_energy_twin::TwinError;
use ran_energy_twin::io::export::{NETWORK_SUMMARY_FILE, power_file, total_power_file};
use ran_energy_twin::io::{export_run, read_tier_table_file};
use ran_energy_twin::pipeline::network::summarize_power_tables;
use ran_energy_twin::pipeline::{PipelineOrchestrator, PowerModel};
use ran_energy_twin::topology::NodeType;

#[test]
fn shipped_utilization_csv_runs() {
    let topo = common::reference_topology();
    let ru = read_tier_table_file(&common::data_file("reference_ru_utilization.csv")).unwrap();
    let out = PipelineOrchestrator::new(&topo, PowerModel::default())
        .run(&ru)
        .unwrap();

    let totals: Vec<f64> = out.total_power().map(|(_, w)| w).collect();
    assert_eq!(totals, vec![1120.0, 1190.0]);
}

#[test]
fn exported_tables_read_back_and_summarize() {
    let topo = common::reference_topology();
    let ru = common::series(&[(0, [0.2, 0.6]), (1, [0.5, 0.5]), (2, [0.0, 1.0])]);
    let out = PipelineOrchestrator::new(&topo, PowerModel::default())
        .run(&ru)
        .unwrap();

    let dir = common::scratch_dir("export");
    let written = export_run(&out, &dir).unwrap();
    // 3 tables per tier + network total + network summary
    assert_eq!(written.len(), 11);
    assert!(written.iter().all(|p| p.exists()));

    let read = |name: String| read_tier_table_file(&dir.join(name)).unwrap();
    let ru_w = read(power_file(NodeType::Ru));
    let du_w = read(power_file(NodeType::Du));
    let cu_w = read(power_file(NodeType::Cu));
    assert_eq!(&ru_w, out.power.get(NodeType::Ru));

    let summary = summarize_power_tables(&ru_w, &du_w, &cu_w).unwrap();
    assert_eq!(summary, out.network);

    let totals = read(total_power_file(NodeType::Du));
    assert_eq!(totals.node_ids(), ["Total Power Consumption (W)"]);
    assert_eq!(totals.rows()[0].values, vec![320.0]);

    let total = read(ran_energy_twin::io::export::TOTAL_POWER_FILE.to_string());
    assert_eq!(
        total.column("Total Power Consumption (W)"),
        Some(vec![1120.0, 1190.0, 1190.0])
    );

    let network = std::fs::read_to_string(dir.join(NETWORK_SUMMARY_FILE)).unwrap();
    assert_eq!(
        network.lines().next(),
        Some("Timestamp,RU Power,DU Power,CU Power,Total Power")
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn summarize_rejects_misaligned_tables() {
    let ru = common::series(&[(0, [0.2, 0.6]), (1, [0.5, 0.5])]);
    let du = common::series(&[(0, [0.2, 0.6])]);
    let err = summarize_power_tables(&ru, &du, &ru);
    assert!(matches!(err, Err(TwinError::Format(_))));
}

#[test]
fn malformed_file_error_names_path() {
    let dir = common::scratch_dir("malformed");
    let path = dir.join("bad.csv");
    std::fs::write(&path, "Timestamp,O-RAN-RU-1\n2024-01-01T00:00:00,abc\n").unwrap();

    let err = read_tier_table_file(&path);
    assert!(matches!(err, Err(TwinError::Format(ref m)) if m.contains("bad.csv")));

    let _ = std::fs::remove_dir_all(&dir);
}
