//! # Dipole RSA length scan
//!
//! Runs Monte Carlo replicas of the deposition engine over a grid of domain
//! lengths and keeps a JSON snapshot of the statistics up to date after
//! every length.
//!
//! ## Usage
//!
//! ```text
//! dipole-scan --start 10 --stop 200 --step 10 --replicas 500 --output scan.json
//! dipole-scan --config scan_config.json --output scan.json --csv scan.csv
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dipole_rsa::{run_scan, write_csv, ScanConfig, SnapshotWriter};

#[derive(Debug, Parser)]
#[command(name = "dipole-scan", about = "Scan dipole RSA jamming counts over domain lengths")]
struct Args {
    /// JSON scan configuration; overrides the grid and replica flags.
    #[arg(long)]
    config: Option<PathBuf>,

    /// First domain length of the grid.
    #[arg(long, default_value_t = 10.0)]
    start: f64,

    /// End of the grid (exclusive).
    #[arg(long, default_value_t = 110.0)]
    stop: f64,

    /// Grid spacing.
    #[arg(long, default_value_t = 10.0)]
    step: f64,

    /// Replicas per length.
    #[arg(long, default_value_t = 100)]
    replicas: usize,

    /// Probability of a `+-` oriented dipole.
    #[arg(long, default_value_t = 0.5)]
    p_plus_minus: f64,

    /// Round cap per replica.
    #[arg(long, default_value_t = 10_000)]
    max_rounds: u32,

    /// Base RNG seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Snapshot file, rewritten after every length.
    #[arg(long, default_value = "dipole_scan.json")]
    output: PathBuf,

    /// Optional CSV export of the finished scan.
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl Args {
    fn scan_config(&self) -> dipole_rsa::Result<ScanConfig> {
        match &self.config {
            Some(path) => ScanConfig::from_json_file(path),
            None => Ok(ScanConfig {
                lengths: ScanConfig::lengths_range(self.start, self.stop, self.step)?,
                n_replicas: self.replicas,
                p_plus_minus: self.p_plus_minus,
                max_rounds: self.max_rounds,
                seed: self.seed,
            }),
        }
    }
}

fn run(args: &Args) -> dipole_rsa::Result<()> {
    let config = args.scan_config()?;
    tracing::info!(
        lengths = config.lengths.len(),
        replicas = config.n_replicas,
        p_plus_minus = config.p_plus_minus,
        output = %args.output.display(),
        "starting scan"
    );

    let mut writer = SnapshotWriter::new(&args.output, config.clone());
    let report = run_scan(&config, |point| writer.record(point))?;

    tracing::info!(snapshot = %writer.path().display(), "snapshot up to date");
    if let Some(csv) = &args.csv {
        write_csv(csv, writer.points())?;
    }

    tracing::info!(
        points = report.points.len(),
        skipped = report.skipped.len(),
        "scan finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dipole_rsa=info,dipole_scan=info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "scan failed");
            ExitCode::FAILURE
        }
    }
}
