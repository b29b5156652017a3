//! Output Writer
//!
//! Writes run results as pretty-printed JSON under one directory:
//!
//! - `history.json` - sampled mean offer / threshold per generation
//! - `snapshots/<snapshot_id>.json` - per-agent strategies at a generation
//! - `stats.json` - end-of-run summary

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use ultimatum_events::{History, PopulationSnapshot};

use super::stats::SimulationStats;

/// Errors that can occur during output operations.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes result files into an output directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    /// Creates the output directory and its `snapshots/` subdirectory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, OutputError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(output_dir.join("snapshots"))?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn history_path(&self) -> PathBuf {
        self.output_dir.join("history.json")
    }

    pub fn snapshot_path(&self, snapshot_id: &str) -> PathBuf {
        self.output_dir
            .join("snapshots")
            .join(format!("{}.json", snapshot_id))
    }

    pub fn stats_path(&self) -> PathBuf {
        self.output_dir.join("stats.json")
    }

    pub fn write_history(&self, history: &History) -> Result<PathBuf, OutputError> {
        let path = self.history_path();
        write_json(&path, history)?;
        Ok(path)
    }

    pub fn write_snapshot(&self, snapshot: &PopulationSnapshot) -> Result<PathBuf, OutputError> {
        let path = self.snapshot_path(&snapshot.snapshot_id);
        write_json(&path, snapshot)?;
        Ok(path)
    }

    pub fn write_stats(&self, stats: &SimulationStats) -> Result<PathBuf, OutputError> {
        let path = self.stats_path();
        write_json(&path, stats)?;
        Ok(path)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
