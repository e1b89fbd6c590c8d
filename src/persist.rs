use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::engine::{HistoryEntry, SimulationEngine};
use crate::grid::BoundaryPolicy;

/// A saved run: engine configuration plus the full retained history,
/// keyed by creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Seconds since the Unix epoch at capture time.
    pub saved_at: u64,
    pub rows: usize,
    pub cols: usize,
    pub policy: BoundaryPolicy,
    pub max_history: usize,
    pub entries: Vec<HistoryEntry>,
}

impl RunRecord {
    /// Snapshot the engine's current history and configuration.
    pub fn capture(engine: &SimulationEngine) -> Self {
        let (rows, cols) = engine.dimensions();
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self {
            saved_at,
            rows,
            cols,
            policy: engine.boundary_policy(),
            max_history: engine.max_history(),
            entries: engine.history().to_vec(),
        }
    }

    /// Rebuild an engine from the record, cursor at the last entry, ready
    /// to be scrubbed backward or advanced past its old frontier.
    pub fn restore(&self) -> SimulationEngine {
        SimulationEngine::from_history(
            self.rows,
            self.cols,
            self.policy,
            self.max_history,
            self.entries.clone(),
        )
    }
}

/// JSON-file store of saved runs, newest last.
pub struct RunStore {
    path: PathBuf,
    records: Vec<RunRecord>,
}

impl RunStore {
    /// Open the store at `path`, loading existing records. A missing file
    /// is an empty store; a corrupt one is logged and treated as empty.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let records = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(records) => records,
                Err(e) => {
                    log::warn!("ignoring corrupt run store {}: {e}", path.display());
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        log::info!("loaded {} saved run(s) from {}", records.len(), path.display());
        Self { path, records }
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    /// Append a record and write the store back to disk.
    pub fn add(&mut self, record: RunRecord) -> std::io::Result<()> {
        self.records.push(record);
        self.save()
    }

    fn save(&self) -> std::io::Result<()> {
        let raw = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, raw)
    }
}
