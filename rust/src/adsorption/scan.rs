//! Parameter scan over domain lengths.
//!
//! For each length, runs `n_replicas` independent replicas in parallel and
//! reduces their deposited counts to a `ScanPoint`. Points are handed to a
//! sink as soon as they are ready so partial results survive an aborted scan.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::engine::{
    simulate_replicas_parallel, validate_length, validate_probability, DepositionConfig,
};
use crate::error::{Result, RsaError};
use crate::stats::ReplicaStats;

/// Upper bound on the number of lengths `ScanConfig::lengths_range` builds.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Configuration for a scan over domain lengths.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Domain lengths to scan, in order.
    pub lengths: Vec<f64>,
    /// Monte Carlo replicas per length.
    pub n_replicas: usize,
    /// Probability of a `+-` oriented dipole.
    pub p_plus_minus: f64,
    /// Round cap per replica.
    pub max_rounds: u32,
    /// Base RNG seed.
    pub seed: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let deposition = DepositionConfig::default();
        Self {
            lengths: (1..=10).map(|i| i as f64 * 10.0).collect(),
            n_replicas: 100,
            p_plus_minus: deposition.p_plus_minus,
            max_rounds: deposition.max_rounds,
            seed: 0,
        }
    }
}

impl ScanConfig {
    /// Evenly spaced lengths in `[start, stop)`.
    ///
    /// Empty when `stop <= start`. Rejects non-finite bounds, a non-positive
    /// step, and grids longer than `MAX_GRID_POINTS`.
    pub fn lengths_range(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
        if !start.is_finite() {
            return Err(RsaError::invalid("start", start, "must be finite"));
        }
        if !stop.is_finite() {
            return Err(RsaError::invalid("stop", stop, "must be finite"));
        }
        if !(step > 0.0) || !step.is_finite() {
            return Err(RsaError::invalid("step", step, "must be positive and finite"));
        }
        if stop <= start {
            return Ok(Vec::new());
        }

        let n = ((stop - start) / step).ceil();
        if !n.is_finite() || n > MAX_GRID_POINTS as f64 {
            return Err(RsaError::invalid("step", step, "grid has too many points"));
        }
        let n = n as usize;
        Ok((0..n).map(|i| start + i as f64 * step).collect())
    }

    /// Load a scan configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn deposition(&self) -> DepositionConfig {
        DepositionConfig::new(self.p_plus_minus, self.max_rounds)
    }

    /// Check the arguments shared by every length.
    pub fn validate(&self) -> Result<()> {
        validate_probability(self.p_plus_minus)?;
        if self.n_replicas == 0 {
            return Err(RsaError::invalid("n_replicas", 0, "need at least one replica"));
        }
        Ok(())
    }

    /// Seed of the first replica for the length at `index`.
    ///
    /// Each length gets a disjoint block of `n_replicas` seeds.
    fn block_seed(&self, index: usize) -> u64 {
        self.seed
            .wrapping_add((index as u64).wrapping_mul(self.n_replicas as u64))
    }
}

/// Statistics for one scanned length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanPoint {
    pub length: f64,
    pub mean: f64,
    pub variance: f64,
    pub coverage_std: f64,
}

impl ScanPoint {
    pub fn new(length: f64, stats: ReplicaStats) -> Self {
        Self {
            length,
            mean: stats.mean,
            variance: stats.variance,
            coverage_std: stats.coverage_std,
        }
    }
}

/// A length that was not simulated because its arguments were invalid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkippedLength {
    pub length: f64,
    pub reason: String,
}

impl std::fmt::Display for SkippedLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "length {} skipped: {}", self.length, self.reason)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub points: Vec<ScanPoint>,
    pub skipped: Vec<SkippedLength>,
}

/// Simulate and summarise a single length.
pub fn scan_length(
    config: &DepositionConfig,
    length: f64,
    n_replicas: usize,
    seed: u64,
) -> Result<ScanPoint> {
    let counts = simulate_replicas_parallel(config, length, n_replicas, seed)?;
    let stats = ReplicaStats::from_counts(&counts, length)?;
    debug!(length, seed, mean_coverage = stats.mean_coverage(length), "replicas reduced");
    Ok(ScanPoint::new(length, stats))
}

/// Run a full scan, passing each finished point to `sink`.
///
/// Invalid scan-wide arguments abort before any replica runs. An invalid
/// individual length is logged and recorded as skipped. Errors returned by
/// the sink abort the scan.
pub fn run_scan<F>(config: &ScanConfig, mut sink: F) -> Result<ScanReport>
where
    F: FnMut(&ScanPoint) -> Result<()>,
{
    config.validate()?;
    let deposition = config.deposition();
    let mut report = ScanReport::default();

    for (index, &length) in config.lengths.iter().enumerate() {
        if let Err(err) = validate_length(length) {
            warn!(length, error = %err, "skipping length");
            report.skipped.push(SkippedLength {
                length,
                reason: err.to_string(),
            });
            continue;
        }

        let seed = config.block_seed(index);
        let point = scan_length(&deposition, length, config.n_replicas, seed)?;
        info!(
            length,
            mean = point.mean,
            variance = point.variance,
            coverage_std = point.coverage_std,
            "scanned length"
        );

        sink(&point)?;
        report.points.push(point);
    }

    Ok(report)
}
