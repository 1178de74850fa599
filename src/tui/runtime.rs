//! Replay state for the chart viewer.

use std::time::Instant;

use crate::pipeline::{NetworkPowerRow, PipelineOutput};
use crate::series::{TierTable, format_timestamp};
use crate::topology::NodeType;

/// Tick interval options in milliseconds (slowest → fastest).
const SPEED_LEVELS_MS: [u64; 6] = [500, 250, 100, 50, 20, 5];

/// Default speed index (100 ms).
const DEFAULT_SPEED_IDX: usize = 2;

/// What the chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// One line per node of a tier.
    Tier(NodeType),
    /// Per-tier power sums and network total.
    Network,
}

/// Which table of a tier is charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Utilization,
    Power,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Self::Utilization => "utilization",
            Self::Power => "power (W)",
        }
    }
}

/// TUI application state.
///
/// Replays a finished run one timestamp per tick so the charts grow the way
/// the series was recorded.
pub struct App {
    output: PipelineOutput,
    /// Number of timestamps revealed so far.
    pub cursor: usize,
    pub view: View,
    pub metric: Metric,
    /// Whether the replay is paused.
    pub paused: bool,
    /// Current index into `SPEED_LEVELS_MS`.
    pub speed_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last replay tick was executed.
    pub last_tick: Instant,
}

impl App {
    pub fn new(output: PipelineOutput) -> Self {
        Self {
            output,
            cursor: 0,
            view: View::Network,
            metric: Metric::Power,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
            quit: false,
            last_tick: Instant::now(),
        }
    }

    /// Reveals one more timestamp if not finished.
    pub fn tick(&mut self) {
        if !self.is_finished() {
            self.cursor += 1;
        }
    }

    /// Total timestamps in the run.
    pub fn total(&self) -> usize {
        self.output.len()
    }

    /// Returns `true` when every timestamp has been revealed.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.total()
    }

    /// Toggles pause/resume.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Increases replay speed (shorter tick interval).
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_LEVELS_MS.len() {
            self.speed_idx += 1;
        }
    }

    /// Decreases replay speed (longer tick interval).
    pub fn speed_down(&mut self) {
        self.speed_idx = self.speed_idx.saturating_sub(1);
    }

    /// Returns the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        SPEED_LEVELS_MS[self.speed_idx]
    }

    pub fn show(&mut self, view: View) {
        self.view = view;
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    /// Reveals everything at once.
    pub fn skip_to_end(&mut self) {
        self.cursor = self.total();
    }

    /// Restarts the replay from the first timestamp.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.paused = false;
    }

    /// The table backing the current tier view, if any.
    pub fn table(&self) -> Option<&TierTable> {
        match self.view {
            View::Tier(tier) => Some(match self.metric {
                Metric::Utilization => self.output.utilization.get(tier),
                Metric::Power => self.output.power.get(tier),
            }),
            View::Network => None,
        }
    }

    /// Chart series for the current view: a name and `(index, value)` points
    /// for every revealed timestamp.
    pub fn series(&self) -> Vec<(String, Vec<(f64, f64)>)> {
        let shown = self.cursor.min(self.total());
        match self.table() {
            Some(table) => table
                .node_ids()
                .iter()
                .enumerate()
                .map(|(c, id)| {
                    let points: Vec<(f64, f64)> = table.rows()[..shown]
                        .iter()
                        .enumerate()
                        .map(|(i, row)| (i as f64, row.values[c]))
                        .collect();
                    (id.clone(), points)
                })
                .collect(),
            None => {
                let rows = &self.output.network[..shown];
                let line = |name: &str, pick: fn(&NetworkPowerRow) -> f64| {
                    let points: Vec<(f64, f64)> = rows
                        .iter()
                        .enumerate()
                        .map(|(i, r)| (i as f64, pick(r)))
                        .collect();
                    (name.to_string(), points)
                };
                vec![
                    line("Total", |r| r.total_w),
                    line("RU", |r| r.ru_w),
                    line("DU", |r| r.du_w),
                    line("CU", |r| r.cu_w),
                ]
            }
        }
    }

    /// Label and value pairs at the latest revealed timestamp.
    pub fn latest(&self) -> Option<(String, Vec<(String, f64)>)> {
        let i = self.cursor.checked_sub(1)?;
        let row = self.output.network.get(i)?;
        let stamp = format_timestamp(&row.timestamp);
        let values = match self.table() {
            Some(table) => table
                .node_ids()
                .iter()
                .cloned()
                .zip(table.rows().get(i)?.values.iter().copied())
                .collect(),
            None => vec![
                ("RU".to_string(), row.ru_w),
                ("DU".to_string(), row.du_w),
                ("CU".to_string(), row.cu_w),
                ("Total".to_string(), row.total_w),
            ],
        };
        Some((stamp, values))
    }

    /// Title of the current view.
    pub fn title(&self) -> String {
        match self.view {
            View::Tier(tier) => format!(" {tier} {} ", self.metric.label()),
            View::Network => " Network power (W) ".to_string(),
        }
    }
}
