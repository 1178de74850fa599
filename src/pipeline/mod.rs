/// Parent-tier utilization from child-tier utilization.
pub mod aggregate;
pub mod engine;
/// Network-wide power summation.
pub mod network;
pub mod power;
pub mod report;
pub mod types;

pub use engine::{PipelineOrchestrator, check_aligned};
pub use power::{PowerModel, TierPowerParams};
pub use report::NetworkReport;
pub use types::{NetworkPowerRow, NodeReading, PipelineOutput, StepResult, TierTables};
