//! Result sinks.

use crate::types::Snapshot;
use crate::ResultsResult;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub trait ResultSink {
    fn accept(&mut self, snapshot: &Snapshot) -> ResultsResult<()>;

    fn accept_all(&mut self, snapshots: &[Snapshot]) -> ResultsResult<()> {
        for snapshot in snapshots {
            self.accept(snapshot)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub snapshots: Vec<Snapshot>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultSink for MemorySink {
    fn accept(&mut self, snapshot: &Snapshot) -> ResultsResult<()> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }
}

/// Appends one JSON object per line.
pub struct JsonLinesSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    /// Create or truncate `path`.
    pub fn create(path: &Path) -> ResultsResult<Self> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn append(path: &Path) -> ResultsResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&mut self) -> ResultsResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl ResultSink for JsonLinesSink {
    fn accept(&mut self, snapshot: &Snapshot) -> ResultsResult<()> {
        let line = serde_json::to_string(snapshot)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl Drop for JsonLinesSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Read back a JSON-lines file; blank lines are skipped.
pub fn load_snapshots(path: &Path) -> ResultsResult<Vec<Snapshot>> {
    let content = fs::read_to_string(path)?;
    let mut snapshots = Vec::new();
    for line in content.lines() {
        if !line.trim().is_empty() {
            snapshots.push(serde_json::from_str(line)?);
        }
    }
    Ok(snapshots)
}
