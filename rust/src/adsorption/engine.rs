//! Round-based deposition engine with parallel replica support.
//!
//! Simulates random sequential adsorption of unit dipoles:
//! - State = (Partition, round index)
//! - Each round deposits at most one dipole per gap
//! - Stops when a round changes nothing (jammed) or the round cap is hit
//!
//! The deposited count is recovered from the final gap count alone, since
//! every deposition replaces one gap with two.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, trace};

use super::partition::Partition;
use crate::error::{Result, RsaError};

/// Configuration shared by every replica of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct DepositionConfig {
    /// Probability that a deposited dipole is oriented `+-`.
    pub p_plus_minus: f64,
    /// Maximum number of rounds before giving up on jamming.
    pub max_rounds: u32,
}

impl Default for DepositionConfig {
    fn default() -> Self {
        Self {
            p_plus_minus: 0.5,
            max_rounds: 10_000,
        }
    }
}

impl DepositionConfig {
    pub fn new(p_plus_minus: f64, max_rounds: u32) -> Self {
        Self {
            p_plus_minus,
            max_rounds,
        }
    }

    /// Check the orientation probability lies in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        validate_probability(self.p_plus_minus)
    }
}

/// Reject NaN, infinite and negative lengths.
pub fn validate_length(initial_length: f64) -> Result<()> {
    if !initial_length.is_finite() {
        return Err(RsaError::invalid(
            "initial_length",
            initial_length,
            "must be finite",
        ));
    }
    if initial_length < 0.0 {
        return Err(RsaError::invalid(
            "initial_length",
            initial_length,
            "must be non-negative",
        ));
    }
    Ok(())
}

pub(crate) fn validate_probability(p_plus_minus: f64) -> Result<()> {
    // NaN fails the range check as well.
    if !(0.0..=1.0).contains(&p_plus_minus) {
        return Err(RsaError::invalid(
            "p_plus_minus",
            p_plus_minus,
            "must lie in [0, 1]",
        ));
    }
    Ok(())
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// A round produced no deposition.
    Jammed,
    /// `max_rounds` rounds were executed without jamming.
    RoundLimit,
}

impl Termination {
    pub fn as_key(&self) -> &'static str {
        match self {
            Termination::Jammed => "jammed",
            Termination::RoundLimit => "round_limit",
        }
    }
}

/// Result of a single replica.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    /// Number of dipoles deposited.
    pub deposited: u64,
    /// Number of rounds executed, including the round that detected jamming.
    pub rounds: u32,
    pub termination: Termination,
    /// Partition at the terminal state.
    pub partition: Partition,
}

/// Single-replica deposition simulator.
#[derive(Clone, Debug)]
pub struct DepositionSimulator {
    config: DepositionConfig,
}

impl DepositionSimulator {
    /// Create a simulator, rejecting an out-of-range probability.
    pub fn new(config: DepositionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run one replica and return its full outcome.
    pub fn simulate<R>(&self, initial_length: f64, rng: &mut R) -> Result<RunOutcome>
    where
        R: Rng + ?Sized,
    {
        self.run_observed(initial_length, rng, |_, _| {})
    }

    /// Run one replica, calling `observer(round, &partition)` after each round.
    pub fn run_observed<R, F>(
        &self,
        initial_length: f64,
        rng: &mut R,
        observer: F,
    ) -> Result<RunOutcome>
    where
        R: Rng + ?Sized,
        F: FnMut(u32, &Partition),
    {
        validate_length(initial_length)?;
        Ok(self.deposit(initial_length, rng, observer))
    }

    /// Number of dipoles deposited in one replica.
    pub fn count<R: Rng + ?Sized>(&self, initial_length: f64, rng: &mut R) -> Result<u64> {
        Ok(self.simulate(initial_length, rng)?.deposited)
    }

    /// Round loop. `initial_length` must already be validated.
    fn deposit<R, F>(&self, initial_length: f64, rng: &mut R, mut observer: F) -> RunOutcome
    where
        R: Rng + ?Sized,
        F: FnMut(u32, &Partition),
    {
        let mut partition = Partition::new(initial_length);
        let mut rounds = 0;
        let mut termination = Termination::RoundLimit;

        while rounds < self.config.max_rounds {
            let next = partition.step(self.config.p_plus_minus, rng);
            rounds += 1;

            let jammed = next.len() == partition.len();
            partition = next;
            trace!(round = rounds, gaps = partition.len(), "deposition round");
            observer(rounds, &partition);

            if jammed {
                termination = Termination::Jammed;
                break;
            }
        }

        let deposited = partition.deposited() as u64;
        debug!(
            initial_length,
            deposited,
            rounds,
            termination = termination.as_key(),
            "replica finished"
        );

        RunOutcome {
            deposited,
            rounds,
            termination,
            partition,
        }
    }
}

/// Run one replica and return the number of deposited dipoles.
///
/// `max_rounds = 0` executes nothing and returns `0`. All arguments are
/// validated before any partition is built.
pub fn run<R: Rng + ?Sized>(
    initial_length: f64,
    p_plus_minus: f64,
    max_rounds: u32,
    rng: &mut R,
) -> Result<u64> {
    DepositionSimulator::new(DepositionConfig::new(p_plus_minus, max_rounds))?
        .count(initial_length, rng)
}

/// Simulate many independent replicas in parallel.
///
/// Replica `i` is seeded with `seed + i`, so the returned counts do not
/// depend on how rayon schedules the work.
///
/// # Arguments
/// * `config` - Orientation probability and round cap
/// * `initial_length` - Domain length shared by all replicas
/// * `n_replicas` - Number of replicas
/// * `seed` - Base RNG seed
///
/// # Returns
/// * Deposited count per replica, in replica order
pub fn simulate_replicas_parallel(
    config: &DepositionConfig,
    initial_length: f64,
    n_replicas: usize,
    seed: u64,
) -> Result<Vec<u64>> {
    validate_length(initial_length)?;
    let simulator = DepositionSimulator::new(config.clone())?;

    let counts: Vec<u64> = (0..n_replicas)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            simulator.deposit(initial_length, &mut rng, |_, _| {}).deposited
        })
        .collect();
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    /// Counts draws while delegating to a seeded generator.
    struct CountingRng {
        inner: StdRng,
        draws: u64,
    }

    impl CountingRng {
        fn new(seed: u64) -> Self {
            Self {
                inner: StdRng::seed_from_u64(seed),
                draws: 0,
            }
        }
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.draws += 1;
            self.inner.fill_bytes(dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.draws += 1;
            self.inner.try_fill_bytes(dest)
        }
    }

    #[test]
    fn test_unit_length_deposits_once() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(run(1.0, 1.0, 10, &mut rng).unwrap(), 1);
    }

    #[test]
    fn test_short_domain_deposits_nothing() {
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(run(0.5, 0.3, 10, &mut rng).unwrap(), 0);
            assert_eq!(run(0.0, 0.7, 10, &mut rng).unwrap(), 0);
        }
    }

    #[test]
    fn test_forced_orientation_length_three() {
        let sim = DepositionSimulator::new(DepositionConfig::new(1.0, 100)).unwrap();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = sim.simulate(3.0, &mut rng).unwrap();
            assert_eq!(outcome.deposited, 3);
            assert_eq!(outcome.rounds, 3);
            assert_eq!(outcome.termination, Termination::Jammed);
        }
    }

    #[test]
    fn test_zero_rounds_returns_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let sim = DepositionSimulator::new(DepositionConfig::new(0.5, 0)).unwrap();
        let outcome = sim.simulate(50.0, &mut rng).unwrap();
        assert_eq!(outcome.deposited, 0);
        assert_eq!(outcome.rounds, 0);
        assert_eq!(outcome.termination, Termination::RoundLimit);
    }

    #[test]
    fn test_round_limit() {
        let mut rng = StdRng::seed_from_u64(3);
        let sim = DepositionSimulator::new(DepositionConfig::new(0.5, 1)).unwrap();
        let outcome = sim.simulate(100.0, &mut rng).unwrap();
        assert_eq!(outcome.deposited, 1);
        assert_eq!(outcome.termination, Termination::RoundLimit);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(run(-1.0, 0.5, 10, &mut rng).unwrap_err().is_invalid_argument());
        assert!(run(f64::NAN, 0.5, 10, &mut rng).is_err());
        assert!(run(f64::INFINITY, 0.5, 10, &mut rng).is_err());
        assert!(run(5.0, 1.5, 10, &mut rng).is_err());
        assert!(run(5.0, -0.1, 10, &mut rng).is_err());
        assert!(run(5.0, f64::NAN, 10, &mut rng).is_err());
        // Validation precedes the round cap check.
        assert!(run(-1.0, 0.5, 0, &mut rng).is_err());
    }

    #[test]
    fn test_rejected_length_draws_nothing() {
        let sim = DepositionSimulator::new(DepositionConfig::new(0.5, 100)).unwrap();
        let mut rng = CountingRng::new(2);
        let mut rounds_seen = 0;
        let result = sim.run_observed(-3.0, &mut rng, |_, _| rounds_seen += 1);
        assert!(result.unwrap_err().is_invalid_argument());
        assert_eq!(rng.draws, 0);
        assert_eq!(rounds_seen, 0);
    }

    #[test]
    fn test_parallel_matches_checked_path() {
        let config = DepositionConfig::new(0.3, 500);
        let counts = simulate_replicas_parallel(&config, 12.5, 6, 100).unwrap();
        for (i, &count) in counts.iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(100 + i as u64);
            assert_eq!(count, run(12.5, 0.3, 500, &mut rng).unwrap());
        }
    }

    #[test]
    fn test_draws_only_for_open_gaps() {
        let sim = DepositionSimulator::new(DepositionConfig::new(0.4, 1000)).unwrap();
        let mut rng = CountingRng::new(11);
        let mut expected = 0u64;
        let mut previous = Partition::new(40.0);

        let outcome = sim
            .run_observed(40.0, &mut rng, |_, partition| {
                expected += previous.open_gaps() as u64;
                previous = partition.clone();
            })
            .unwrap();

        assert_eq!(outcome.termination, Termination::Jammed);
        assert_eq!(rng.draws, expected);
    }

    #[test]
    fn test_extra_rounds_do_not_change_count() {
        let config = DepositionConfig::new(0.5, 10_000);
        let sim = DepositionSimulator::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let outcome = sim.simulate(60.0, &mut rng).unwrap();
        assert_eq!(outcome.termination, Termination::Jammed);

        let mut partition = outcome.partition.clone();
        for _ in 0..20 {
            partition = partition.step(0.5, &mut rng);
        }
        assert_eq!(partition.len(), outcome.partition.len());
    }

    #[test]
    fn test_parallel_replicas_are_reproducible() {
        let config = DepositionConfig::new(0.5, 1000);
        let a = simulate_replicas_parallel(&config, 30.0, 16, 42).unwrap();
        let b = simulate_replicas_parallel(&config, 30.0, 16, 42).unwrap();
        assert_eq!(a.len(), 16);
        assert_eq!(a, b);

        // Replica i matches a sequential run seeded with seed + i.
        let sim = DepositionSimulator::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(42 + 3);
        assert_eq!(a[3], sim.count(30.0, &mut rng).unwrap());
    }

    #[test]
    fn test_parallel_rejects_invalid_length() {
        let config = DepositionConfig::default();
        assert!(simulate_replicas_parallel(&config, -2.0, 4, 0).is_err());
    }
}
