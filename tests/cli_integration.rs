//! Runs the binary against the shipped reference data.

mod common;

use std::process::Command;

fn twin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ran-energy-twin"))
}

#[test]
fn run_subcommand_writes_tables_and_report() {
    let dir = common::scratch_dir("cli-run");
    let output = twin()
        .arg("run")
        .arg(common::data_file("reference_topology.json"))
        .arg("--utilization")
        .arg(common::data_file("reference_ru_utilization.csv"))
        .arg("--output-dir")
        .arg(&dir)
        .output()
        .expect("ran-energy-twin process should run");

    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--- Network Power Report ---"));
    assert!(stdout.contains("Peak total power:  1190.00 W"));
    assert!(dir.join("aggregated_power_consumption.csv").exists());
    assert!(dir.join("du_utilization_data.csv").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn topology_subcommand_prints_tree() {
    let output = twin()
        .arg("topology")
        .arg(common::data_file("reference_topology.json"))
        .output()
        .expect("ran-energy-twin process should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["O-RAN-CU-1", "  O-RAN-DU-1", "    O-RAN-RU-1", "    O-RAN-RU-2"]
    );
}

#[test]
fn generate_is_reproducible_for_a_seed() {
    let dir = common::scratch_dir("cli-generate");
    let generate = |name: &str| {
        let path = dir.join(name);
        let output = twin()
            .arg("generate")
            .arg(common::data_file("reference_topology.json"))
            .args(["--config", "scenarios/baseline.toml", "--seed", "7", "--out"])
            .arg(&path)
            .current_dir(env!("CARGO_MANIFEST_DIR"))
            .output()
            .expect("ran-energy-twin process should run");
        assert!(
            output.status.success(),
            "generate failed: stderr={}",
            String::from_utf8_lossy(&output.stderr)
        );
        std::fs::read_to_string(path).unwrap_or_default()
    };

    let a = generate("a.csv");
    let b = generate("b.csv");
    assert_eq!(a, b);
    // header + 24 rows
    assert_eq!(a.lines().count(), 25);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_topology_fails() {
    let output = twin()
        .args(["topology", "/nonexistent/topology.json"])
        .output()
        .expect("ran-energy-twin process should run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("topology"));
}
