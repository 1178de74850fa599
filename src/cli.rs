//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "ran-energy-twin",
    version,
    about = "Energy-consumption digital twin of an O-RAN radio access network"
)]
pub struct Cli {
    /// Load configuration from a TOML file
    #[arg(long, global = true, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Use a built-in preset (baseline, low_idle)
    #[arg(long, global = true)]
    pub preset: Option<String>,

    /// Override the generator seed
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the supports tree of a topology
    Topology {
        /// Topology description (IETF network JSON)
        topology: PathBuf,

        /// Print the registered nodes as JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// Write a synthetic RU utilization CSV for a topology
    Generate {
        /// Topology description (IETF network JSON)
        topology: PathBuf,

        /// Output CSV; defaults to the RU utilization file in the output dir
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Number of samples (overrides the config)
        #[arg(long)]
        intervals: Option<usize>,
    },

    /// Propagate RU utilization through the topology and write every table
    ///
    /// DU and CU utilization are always derived from the RU series. Files given
    /// with --du-utilization or --cu-utilization only have their timestamps
    /// checked against the RU series; their values are ignored.
    Run(RunArgs),

    /// Sum three per-tier power CSVs into the network summary
    Summarize {
        #[arg(long)]
        ru: PathBuf,

        #[arg(long)]
        du: PathBuf,

        #[arg(long)]
        cu: PathBuf,

        /// Output CSV; defaults to the summary file in the output dir
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Topology description (IETF network JSON)
    pub topology: PathBuf,

    /// RU utilization CSV; synthetic utilization is generated when omitted
    #[arg(long)]
    pub utilization: Option<PathBuf>,

    /// DU utilization CSV checked for timestamp alignment; values are ignored
    #[arg(long, requires = "utilization")]
    pub du_utilization: Option<PathBuf>,

    /// CU utilization CSV checked for timestamp alignment; values are ignored
    #[arg(long, requires = "utilization")]
    pub cu_utilization: Option<PathBuf>,

    /// Directory receiving the output tables (overrides the config)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Do not print per-timestamp lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Start the REST API after the run
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Open the chart viewer after the run
    #[cfg(feature = "tui")]
    #[arg(long)]
    pub tui: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn run_with_defaults() {
        let cli = Cli::try_parse_from(["ran-energy-twin", "run", "topo.json"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.topology, PathBuf::from("topo.json"));
        assert!(args.utilization.is_none());
        assert!(!args.quiet);
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ran-energy-twin",
            "generate",
            "topo.json",
            "--seed",
            "7",
            "--preset",
            "low_idle",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.preset.as_deref(), Some("low_idle"));
    }

    #[test]
    fn config_and_preset_conflict() {
        let res = Cli::try_parse_from([
            "ran-energy-twin",
            "--config",
            "twin.toml",
            "--preset",
            "baseline",
            "topology",
            "topo.json",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn du_utilization_requires_ru_utilization() {
        let res = Cli::try_parse_from([
            "ran-energy-twin",
            "run",
            "topo.json",
            "--du-utilization",
            "du.csv",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn run_help_says_tier_files_are_only_aligned() {
        let mut cmd = Cli::command();
        let run = cmd
            .find_subcommand_mut("run")
            .expect("run subcommand exists");
        let help = run.render_long_help().to_string();
        assert!(help.contains("their values are ignored"));
        assert!(help.contains("DU utilization CSV checked for timestamp alignment"));
    }

    #[test]
    fn summarize_requires_all_tiers() {
        let res = Cli::try_parse_from(["ran-energy-twin", "summarize", "--ru", "ru.csv"]);
        assert!(res.is_err());
    }
}
