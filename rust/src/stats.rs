//! Summary statistics over replica deposition counts.
//!
//! All moments are population moments (divisor `N`).

use serde::{Deserialize, Serialize};

use crate::error::{Result, RsaError};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplicaStats {
    /// Mean deposited count.
    pub mean: f64,
    /// Population variance of the deposited count.
    pub variance: f64,
    /// Population standard deviation of `count / length`.
    pub coverage_std: f64,
}

impl ReplicaStats {
    /// Compute statistics for the counts of one scanned length.
    ///
    /// # Arguments
    /// * `counts` - Deposited count per replica
    /// * `length` - Domain length the replicas were run on
    pub fn from_counts(counts: &[u64], length: f64) -> Result<Self> {
        if counts.is_empty() {
            return Err(RsaError::invalid("counts", "[]", "need at least one replica"));
        }

        let values: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        let (mean, variance) = mean_variance(&values);

        let coverage_std = if length > 0.0 {
            let coverage: Vec<f64> = values.iter().map(|&v| v / length).collect();
            mean_variance(&coverage).1.sqrt()
        } else {
            0.0
        };

        Ok(Self {
            mean,
            variance,
            coverage_std,
        })
    }

    /// Mean coverage fraction for the given length.
    pub fn mean_coverage(&self, length: f64) -> f64 {
        if length > 0.0 {
            self.mean / length
        } else {
            0.0
        }
    }
}

fn mean_variance(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_counts() {
        let stats = ReplicaStats::from_counts(&[4, 4, 4], 8.0).unwrap();
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.coverage_std, 0.0);
        assert_eq!(stats.mean_coverage(8.0), 0.5);
    }

    #[test]
    fn test_population_moments() {
        // mean = 5, squared deviations = 9 + 1 + 1 + 9 = 20, var = 20 / 4
        let stats = ReplicaStats::from_counts(&[2, 4, 6, 8], 10.0).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.variance - 5.0).abs() < 1e-12);
        // std of n / 10 = sqrt(5) / 10
        assert!((stats.coverage_std - 5.0_f64.sqrt() / 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_length_coverage() {
        let stats = ReplicaStats::from_counts(&[0, 0], 0.0).unwrap();
        assert_eq!(stats.coverage_std, 0.0);
        assert_eq!(stats.mean_coverage(0.0), 0.0);
    }

    #[test]
    fn test_empty_counts_rejected() {
        assert!(ReplicaStats::from_counts(&[], 3.0).is_err());
    }
}
