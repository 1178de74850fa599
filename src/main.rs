//! Digital twin entry point: CLI wiring and config-driven pipeline runs.

mod cli;

use std::fs;
use std::path::Path;
use std::process;

use clap::Parser;
use tracing::info;

use ran_energy_twin::config::TwinConfig;
use ran_energy_twin::io::export::{
    NETWORK_SUMMARY_FILE, export_network_summary, export_run, export_tier_table, utilization_file,
};
use ran_energy_twin::io::read_tier_table_file;
use ran_energy_twin::pipeline::network::summarize_power_tables;
use ran_energy_twin::pipeline::{NetworkReport, PipelineOrchestrator, check_aligned};
use ran_energy_twin::topology::{NetworkDescription, NodeType, TopologyBuilder, TopologyModel};
use ran_energy_twin::{Result, TwinError, UtilizationSeries};

use cli::{Cli, Command, RunArgs};

fn load_topology(path: &Path) -> Result<TopologyModel> {
    let desc = NetworkDescription::from_json_file(path)?;
    TopologyBuilder::from_description(&desc)
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Synthetic RU utilization for every RU of `topology`.
fn generate_series(
    config: &TwinConfig,
    topology: &TopologyModel,
    intervals: usize,
) -> Result<UtilizationSeries> {
    let ru_ids = topology.ids_of(NodeType::Ru);
    if ru_ids.is_empty() {
        return Err(TwinError::config("topology", "no RU nodes to generate utilization for"));
    }
    let g = &config.generator;
    g.build()
        .generate(&ru_ids, g.start_or_today(), intervals, g.interval_minutes)
}

fn run(config: &TwinConfig, args: RunArgs) -> Result<()> {
    let topology = load_topology(&args.topology)?;

    let ru = match &args.utilization {
        Some(path) => read_tier_table_file(path)?,
        None => generate_series(config, &topology, config.generator.intervals)?,
    };

    let mut others = Vec::new();
    if let Some(path) = &args.du_utilization {
        others.push(("DU utilization", read_tier_table_file(path)?));
    }
    if let Some(path) = &args.cu_utilization {
        others.push(("CU utilization", read_tier_table_file(path)?));
    }
    let labelled: Vec<_> = others.iter().map(|(label, t)| (*label, t)).collect();
    check_aligned(&ru, &labelled)?;

    let pipeline = PipelineOrchestrator::new(&topology, config.power.clone());
    let quiet = args.quiet;
    let output = pipeline.run_with(&ru, |step| {
        if !quiet {
            println!("{step}");
        }
    })?;

    println!("\n{}", NetworkReport::from_rows(&output.network));

    let dir = args.output_dir.as_deref().unwrap_or(config.output.dir.as_path());
    let written = export_run(&output, dir)?;
    eprintln!("{} tables written to {}", written.len(), dir.display());

    #[cfg(feature = "tui")]
    if args.tui {
        ran_energy_twin::tui::run(output.clone())?;
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(ran_energy_twin::api::AppState::new(&topology, output));
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(ran_energy_twin::api::serve(state, addr))?;
    }

    Ok(())
}

fn dispatch(config: &TwinConfig, command: Command) -> Result<()> {
    match command {
        Command::Topology { topology, json } => {
            let topology = load_topology(&topology)?;
            if json {
                println!("{}", serde_json::to_string_pretty(topology.nodes())?);
            } else {
                print!("{topology}");
            }
        }
        Command::Generate {
            topology,
            out,
            intervals,
        } => {
            let topology = load_topology(&topology)?;
            let intervals = intervals.unwrap_or(config.generator.intervals);
            if intervals == 0 {
                return Err(TwinError::config("intervals", "must be > 0"));
            }
            let series = generate_series(config, &topology, intervals)?;
            let path = out.unwrap_or_else(|| config.output.dir.join(utilization_file(NodeType::Ru)));
            create_parent_dir(&path)?;
            export_tier_table(&series, &path)?;
            info!(rows = series.len(), columns = series.node_ids().len(), "utilization generated");
            eprintln!("RU utilization written to {}", path.display());
        }
        Command::Run(args) => run(config, args)?,
        Command::Summarize { ru, du, cu, out } => {
            let rows = summarize_power_tables(
                &read_tier_table_file(&ru)?,
                &read_tier_table_file(&du)?,
                &read_tier_table_file(&cu)?,
            )?;
            println!("{}", NetworkReport::from_rows(&rows));
            let path = out.unwrap_or_else(|| config.output.dir.join(NETWORK_SUMMARY_FILE));
            create_parent_dir(&path)?;
            export_network_summary(&rows, &path)?;
            eprintln!("Network summary written to {}", path.display());
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();

    // --config takes priority, then --preset, then baseline default
    let loaded = if let Some(ref path) = cli.config {
        TwinConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        TwinConfig::from_preset(name)
    } else {
        Ok(TwinConfig::baseline())
    };
    let mut config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Some(seed) = cli.seed {
        config.generator.seed = seed;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    if let Err(e) = dispatch(&config, cli.command) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
