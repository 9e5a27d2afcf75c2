//! Random sequential adsorption of polarised dipoles on a line.
//!
//! This module provides:
//! - Polarity / Orientation: boundary and dipole tags
//! - Gap: immutable free interval with the deposition split table
//! - Partition: ordered gap sequence and the per-round update
//! - DepositionSimulator: single-replica engine with jamming detection
//! - run_scan: parallel replica scan over domain lengths

pub mod polarity;
pub mod gap;
pub mod partition;
pub mod engine;
pub mod scan;

pub use polarity::{Orientation, Polarity};
pub use gap::{Gap, DIPOLE_LENGTH};
pub use partition::Partition;
pub use engine::{
    DepositionConfig,
    DepositionSimulator,
    RunOutcome,
    Termination,
    run,
    simulate_replicas_parallel,
    validate_length,
};
pub use scan::{run_scan, scan_length, ScanConfig, ScanPoint, ScanReport, SkippedLength};
