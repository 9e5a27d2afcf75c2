//! Python bindings for the deposition engine and length scans.

use numpy::PyArray1;
use pyo3::exceptions::{PyIOError, PyUserWarning, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use pyo3::wrap_pyfunction;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::adsorption::{self, DepositionConfig, ScanConfig};
use crate::error::RsaError;

impl From<RsaError> for PyErr {
    fn from(err: RsaError) -> PyErr {
        match err {
            RsaError::InvalidArgument { .. } => PyValueError::new_err(err.to_string()),
            RsaError::Io(_) | RsaError::Serde(_) => PyIOError::new_err(err.to_string()),
        }
    }
}

/// Run a single replica and return the number of deposited dipoles.
///
/// # Arguments
/// * `initial_length` - Domain length (>= 0)
/// * `p_plus_minus` - Probability of a `+-` oriented dipole
/// * `max_rounds` - Round cap
/// * `seed` - RNG seed
#[pyfunction]
#[pyo3(signature = (initial_length, p_plus_minus=0.5, max_rounds=10_000, seed=0))]
fn simulate_deposition(
    initial_length: f64,
    p_plus_minus: f64,
    max_rounds: u32,
    seed: u64,
) -> PyResult<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(adsorption::run(initial_length, p_plus_minus, max_rounds, &mut rng)?)
}

/// Run replicas in parallel and return their deposited counts.
///
/// Replica `i` is seeded with `seed + i`.
#[pyfunction]
#[pyo3(signature = (initial_length, n_replicas, p_plus_minus=0.5, max_rounds=10_000, seed=0))]
fn simulate_replicas<'py>(
    py: Python<'py>,
    initial_length: f64,
    n_replicas: usize,
    p_plus_minus: f64,
    max_rounds: u32,
    seed: u64,
) -> PyResult<&'py PyArray1<u64>> {
    let config = DepositionConfig::new(p_plus_minus, max_rounds);
    let counts = py.allow_threads(|| {
        adsorption::simulate_replicas_parallel(&config, initial_length, n_replicas, seed)
    })?;
    Ok(PyArray1::from_vec(py, counts))
}

/// Scan domain lengths and return one dict per simulated length.
///
/// Lengths rejected as invalid are skipped; each one raises a `UserWarning`.
///
/// # Returns
/// * Tuple `(points, skipped)`: dicts with keys `length`, `mean`, `variance`,
///   `coverage_std`, and dicts with keys `length`, `reason`
#[pyfunction]
#[pyo3(signature = (lengths, n_replicas, p_plus_minus=0.5, max_rounds=10_000, seed=0))]
fn scan_lengths(
    py: Python<'_>,
    lengths: Vec<f64>,
    n_replicas: usize,
    p_plus_minus: f64,
    max_rounds: u32,
    seed: u64,
) -> PyResult<(Vec<PyObject>, Vec<PyObject>)> {
    let config = ScanConfig {
        lengths,
        n_replicas,
        p_plus_minus,
        max_rounds,
        seed,
    };
    let report = py.allow_threads(|| adsorption::run_scan(&config, |_| Ok(())))?;

    let points = report
        .points
        .iter()
        .map(|point| {
            let dict = PyDict::new(py);
            dict.set_item("length", point.length)?;
            dict.set_item("mean", point.mean)?;
            dict.set_item("variance", point.variance)?;
            dict.set_item("coverage_std", point.coverage_std)?;
            Ok(dict.into())
        })
        .collect::<PyResult<Vec<PyObject>>>()?;

    let skipped = report
        .skipped
        .iter()
        .map(|entry| {
            PyErr::warn(py, py.get_type::<PyUserWarning>(), &entry.to_string(), 1)?;
            let dict = PyDict::new(py);
            dict.set_item("length", entry.length)?;
            dict.set_item("reason", &entry.reason)?;
            Ok(dict.into())
        })
        .collect::<PyResult<Vec<PyObject>>>()?;

    Ok((points, skipped))
}

/// Python module definition
#[pymodule]
fn dipole_rsa(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(simulate_deposition, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_replicas, m)?)?;
    m.add_function(wrap_pyfunction!(scan_lengths, m)?)?;
    Ok(())
}
