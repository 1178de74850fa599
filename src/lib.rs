//! Energy-consumption digital twin of an O-RAN radio access network.
//!
//! A topology of Radio, Distributed and Centralized Units is loaded from an
//! IETF network description; RU utilization is propagated up the supports
//! tree and converted to power per node, per tier and network-wide.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod io;
/// Tier aggregation, power model and per-timestamp orchestration.
pub mod pipeline;
pub mod series;
pub mod topology;
#[cfg(feature = "tui")]
pub mod tui;

pub use error::{ConfigError, Result, TwinError};
pub use pipeline::{PipelineOrchestrator, PipelineOutput, PowerModel};
pub use series::{TierTable, UtilizationSeries};
pub use topology::{NetworkNode, NodeType, TopologyBuilder, TopologyModel};
