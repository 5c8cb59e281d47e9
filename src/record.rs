//! Lock snapshot persistence.
//!
//! Every lock produces a [`LockRecord`]; a sink decides where it goes.
//! The JSON recorder writes one file per turn into a per-session
//! directory. Sink failures are reported to the caller and never stop
//! the game loop.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::core::LockRecord;

/// Destination for lock snapshots.
pub trait LockSink {
    fn record(&mut self, record: &LockRecord) -> Result<()>;
}

/// Writes each record as `turn_<N>.json` inside a session directory.
pub struct JsonDirRecorder {
    dir: PathBuf,
}

impl JsonDirRecorder {
    /// Record into `dir`, creating it if needed.
    pub fn create(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .map_err(|e| anyhow!("recorder: create {} failed: {}", dir.display(), e))?;
        Ok(Self { dir })
    }

    /// Create a fresh `session_<unix seconds>` directory under `root`.
    pub fn create_session(root: &Path) -> Result<Self> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self::create(root.join(format!("session_{}", stamp)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, turn: u32) -> PathBuf {
        self.dir.join(format!("turn_{}.json", turn))
    }
}

impl LockSink for JsonDirRecorder {
    fn record(&mut self, record: &LockRecord) -> Result<()> {
        let path = self.path_for(record.turn);
        let file = File::create(&path)
            .map_err(|e| anyhow!("recorder: create {} failed: {}", path.display(), e))?;
        serde_json::to_writer(file, record)
            .map_err(|e| anyhow!("recorder: write {} failed: {}", path.display(), e))?;
        Ok(())
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct VecSink {
    pub records: Vec<LockRecord>,
}

impl LockSink for VecSink {
    fn record(&mut self, record: &LockRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
