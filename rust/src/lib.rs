//! Random sequential adsorption (RSA) of unit dipoles on a finite interval.
//!
//! The engine deposits polarised unit segments round by round until the
//! line jams, and reports how many fit. Replica scans, statistics and
//! snapshot persistence sit on top of that single-replica core.

pub mod adsorption;
pub mod error;
pub mod snapshot;
pub mod stats;

#[cfg(feature = "python")]
mod bindings;

pub use adsorption::{
    run, run_scan, simulate_replicas_parallel, DepositionConfig, DepositionSimulator, Gap,
    Orientation, Partition, Polarity, RunOutcome, ScanConfig, ScanPoint, ScanReport, Termination,
};
pub use error::{Result, RsaError};
pub use snapshot::{write_csv, ScanSnapshot, SnapshotWriter};
pub use stats::ReplicaStats;
