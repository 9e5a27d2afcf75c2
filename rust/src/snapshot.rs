//! Incremental persistence of scan results.
//!
//! After every scanned length the whole snapshot (configuration plus all
//! points so far) is rewritten, so the file on disk always holds a complete,
//! parseable result for the lengths finished up to that moment.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adsorption::{ScanConfig, ScanPoint};
use crate::error::Result;

/// On-disk snapshot contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanSnapshot {
    pub config: ScanConfig,
    pub points: Vec<ScanPoint>,
}

impl ScanSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Rewrites a JSON snapshot each time a point is recorded.
pub struct SnapshotWriter {
    path: PathBuf,
    snapshot: ScanSnapshot,
}

impl SnapshotWriter {
    pub fn new(path: impl Into<PathBuf>, config: ScanConfig) -> Self {
        Self {
            path: path.into(),
            snapshot: ScanSnapshot {
                config,
                points: Vec::new(),
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn points(&self) -> &[ScanPoint] {
        &self.snapshot.points
    }

    /// Append a point and persist the updated snapshot.
    pub fn record(&mut self, point: &ScanPoint) -> Result<()> {
        self.snapshot.points.push(*point);
        self.flush()
    }

    /// Write the snapshot via a sibling temp file and rename it into place.
    pub fn flush(&self) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut w = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut w, &self.snapshot)?;
            w.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Write scan points as CSV.
pub fn write_csv(path: &Path, points: &[ScanPoint]) -> Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    writeln!(w, "length,mean,variance,coverage_std")?;
    for p in points {
        writeln!(w, "{},{},{},{}", p.length, p.mean, p.variance, p.coverage_std)?;
    }

    w.flush()?;
    Ok(())
}
