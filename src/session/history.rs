use std::path::{Path, PathBuf};

use crate::image_pipeline::{BatchState, ConversionResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

/// Files converted during this process. Nothing is persisted.
#[derive(Debug, Default)]
pub struct ConversionHistory {
    entries: Vec<HistoryEntry>,
}

impl ConversionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every successful conversion of `state`, in batch order.
    pub fn record(&mut self, state: &BatchState) {
        for result in state.results() {
            if let ConversionResult::Success { input_path, output_path } = result {
                self.entries.push(HistoryEntry {
                    input_path: input_path.clone(),
                    output_path: output_path.clone(),
                });
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.output_path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
