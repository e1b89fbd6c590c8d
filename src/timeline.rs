use crate::engine::HistoryEntry;
use crate::error::EngineError;

/// Read-only projection of the engine history for charting and scrubbing.
///
/// Borrows the entry slice; it is built on demand and never outlives the
/// engine borrow it came from, so it can never go stale.
pub struct TimelineIndex<'a> {
    entries: &'a [HistoryEntry],
}

impl<'a> TimelineIndex<'a> {
    pub fn new(entries: &'a [HistoryEntry]) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live-cell counts per retained generation, oldest first.
    pub fn live_counts(&self) -> impl Iterator<Item = usize> + 'a {
        self.entries.iter().map(|e| e.live_count)
    }

    /// Population at a given history index.
    pub fn summary_at(&self, index: usize) -> Result<usize, EngineError> {
        self.entries
            .get(index)
            .map(|e| e.live_count)
            .ok_or(EngineError::IndexOutOfRange {
                index,
                length: self.entries.len(),
            })
    }

    /// (generation, population) points ready to hand to a plotting widget.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.entries
            .iter()
            .map(|e| [e.generation as f64, e.live_count as f64])
            .collect()
    }
}
