//! Batch data types

use std::path::{Path, PathBuf};

use crate::image_pipeline::common::error::FailureKind;
use crate::image_pipeline::encode::TargetFormat;

/// One file to convert, fixed at batch start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    input_path: PathBuf,
    target_format: TargetFormat,
}

impl ConversionRequest {
    pub fn new(input_path: impl Into<PathBuf>, target_format: TargetFormat) -> Self {
        Self {
            input_path: input_path.into(),
            target_format,
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn target_format(&self) -> TargetFormat {
        self.target_format
    }
}

/// Outcome of converting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    Success {
        input_path: PathBuf,
        output_path: PathBuf,
    },
    Failure {
        input_path: PathBuf,
        kind: FailureKind,
        message: String,
    },
}

impl ConversionResult {
    pub fn input_path(&self) -> &Path {
        match self {
            ConversionResult::Success { input_path, .. }
            | ConversionResult::Failure { input_path, .. } => input_path,
        }
    }

    pub fn output_path(&self) -> Option<&Path> {
        match self {
            ConversionResult::Success { output_path, .. } => Some(output_path),
            ConversionResult::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ConversionResult::Success { .. })
    }
}

/// Progress and results of one batch run.
///
/// Only [`BatchOrchestrator`](super::BatchOrchestrator) mutates it. At most one
/// `Failure` is ever recorded and it is always the last result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchState {
    total: usize,
    completed: usize,
    results: Vec<ConversionResult>,
    cancelled: bool,
}

impl BatchState {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            results: Vec::with_capacity(total),
            cancelled: false,
        }
    }

    pub(crate) fn record_success(&mut self, input_path: &Path, output_path: PathBuf) {
        self.results.push(ConversionResult::Success {
            input_path: input_path.to_path_buf(),
            output_path,
        });
        self.completed += 1;
    }

    pub(crate) fn record_failure(&mut self, input_path: &Path, kind: FailureKind, message: String) {
        self.results.push(ConversionResult::Failure {
            input_path: input_path.to_path_buf(),
            kind,
            message,
        });
    }

    pub(crate) fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn results(&self) -> &[ConversionResult] {
        &self.results
    }

    pub fn failure(&self) -> Option<&ConversionResult> {
        self.results.last().filter(|r| !r.is_success())
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Path> {
        self.results.iter().filter_map(ConversionResult::output_path)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_terminal(&self) -> bool {
        self.completed == self.total || self.cancelled || self.failure().is_some()
    }

    /// Every input converted.
    pub fn is_success(&self) -> bool {
        self.completed == self.total && !self.cancelled && self.failure().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        let mut state = BatchState::new(2);
        assert!(!state.is_terminal());

        state.record_success(Path::new("a.heic"), PathBuf::from("a.jpg"));
        assert_eq!(state.completed(), 1);
        assert!(!state.is_terminal());

        state.record_failure(Path::new("b.heic"), FailureKind::Decode, "bad".into());
        assert_eq!(state.completed(), 1);
        assert!(state.is_terminal());
        assert!(!state.is_success());
        assert_eq!(state.failure().map(ConversionResult::input_path), Some(Path::new("b.heic")));
        assert_eq!(state.outputs().collect::<Vec<_>>(), vec![Path::new("a.jpg")]);
    }

    #[test]
    fn test_empty_state_is_terminal() {
        let state = BatchState::new(0);
        assert!(state.is_terminal());
        assert!(state.is_success());
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_request_accessors() {
        let request = ConversionRequest::new("x.HEIC", TargetFormat::Gif);
        assert_eq!(request.input_path(), Path::new("x.HEIC"));
        assert_eq!(request.target_format(), TargetFormat::Gif);
    }
}
