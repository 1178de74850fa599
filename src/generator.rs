use chrono::{DateTime, TimeDelta, Timelike, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::Result;
use crate::series::{TierTable, UtilizationSeries, round2};

/// Mean RU utilization for each hour of the day, midnight first.
pub const HOURLY_BASELINE: [f64; 24] = [
    0.25, 0.22, 0.15, 0.12, 0.11, 0.14, 0.22, 0.36, 0.48, 0.58, 0.63, 0.67, 0.76, 0.87, 0.9, 0.84,
    0.73, 0.65, 0.52, 0.46, 0.37, 0.35, 0.33, 0.29,
];

/// A synthetic RU utilization generator following a daily load profile.
///
/// Each value is the baseline for the sample's hour plus uniform noise of
/// width `noise_amplitude` centred on zero, clamped to `[0, 1]` and rounded
/// to two decimals.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use ran_energy_twin::generator::{HOURLY_BASELINE, UtilizationGenerator};
///
/// let mut generator = UtilizationGenerator::new(HOURLY_BASELINE.to_vec(), 0.7, 42);
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let ids = vec!["O-RAN-RU-1".to_string(), "O-RAN-RU-2".to_string()];
///
/// let series = generator.generate(&ids, start, 24, 60).unwrap();
/// assert_eq!(series.len(), 24);
/// ```
#[derive(Debug, Clone)]
pub struct UtilizationGenerator {
    /// Baseline utilization per hour of day
    baseline: Vec<f64>,

    /// Full width of the uniform noise band
    pub noise_amplitude: f64,

    /// Random number generator for noise generation
    rng: StdRng,
}

impl UtilizationGenerator {
    /// Creates a generator.
    ///
    /// # Arguments
    ///
    /// * `baseline` - Utilization per hour of day; indexed modulo its length
    /// * `noise_amplitude` - Width of the uniform noise band
    /// * `seed` - Random seed for reproducible series
    pub fn new(baseline: Vec<f64>, noise_amplitude: f64, seed: u64) -> Self {
        let baseline = if baseline.is_empty() {
            HOURLY_BASELINE.to_vec()
        } else {
            baseline
        };
        Self {
            baseline,
            noise_amplitude,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws one utilization value for the given hour of day.
    pub fn utilization(&mut self, hour: usize) -> f64 {
        let base = self.baseline[hour % self.baseline.len()];
        let noise = (0.5 - self.rng.random::<f64>()) * self.noise_amplitude;
        round2((base + noise).clamp(0.0, 1.0))
    }

    /// Generates `intervals` rows for `ru_ids`, `interval_minutes` apart,
    /// starting at `start`.
    ///
    /// # Errors
    ///
    /// Propagates table construction errors; none occur for consistent input.
    pub fn generate(
        &mut self,
        ru_ids: &[String],
        start: DateTime<Utc>,
        intervals: usize,
        interval_minutes: u32,
    ) -> Result<UtilizationSeries> {
        let mut series = TierTable::new(ru_ids.to_vec());
        let step = TimeDelta::minutes(i64::from(interval_minutes));

        let mut timestamp = start;
        for _ in 0..intervals {
            let hour = timestamp.hour() as usize;
            let values = ru_ids.iter().map(|_| self.utilization(hour)).collect();
            series.push_row(timestamp, values)?;
            timestamp += step;
        }
        Ok(series)
    }
}
