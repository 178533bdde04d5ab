//! Side channels written by the batch orchestrator

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::image_pipeline::common::error::FailureKind;

/// Items converted so far out of the batch size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Progress: {} / {}", self.completed, self.total)
    }
}

/// User-facing notices. Every run ends with exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchNotice {
    NoInput,
    Completed {
        total: usize,
        outputs: Vec<PathBuf>,
    },
    /// `outputs` holds what was written before the failing item.
    Failed {
        input_path: PathBuf,
        kind: FailureKind,
        message: String,
        outputs: Vec<PathBuf>,
    },
    Cancelled {
        completed: usize,
        total: usize,
        outputs: Vec<PathBuf>,
    },
}

impl BatchNotice {
    /// Files written during the run this notice ends.
    pub fn outputs(&self) -> &[PathBuf] {
        match self {
            BatchNotice::NoInput => &[],
            BatchNotice::Completed { outputs, .. }
            | BatchNotice::Failed { outputs, .. }
            | BatchNotice::Cancelled { outputs, .. } => outputs,
        }
    }
}

impl fmt::Display for BatchNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchNotice::NoInput => f.write_str("No files selected"),
            BatchNotice::Completed { total, .. } => write!(f, "Done! Converted {} file(s)", total),
            BatchNotice::Failed { input_path, message, .. } => {
                write!(f, "Failed: {} -> {}", input_path.display(), message)
            }
            BatchNotice::Cancelled { completed, total, .. } => {
                write!(f, "Cancelled after {} / {}", completed, total)
            }
        }
    }
}

/// Receives a progress update after each converted item.
///
/// Errors are logged by the orchestrator and otherwise ignored.
pub trait ProgressSink {
    fn report(&mut self, progress: Progress) -> anyhow::Result<()>;
}

impl<F> ProgressSink for F
where
    F: FnMut(Progress) -> anyhow::Result<()>,
{
    fn report(&mut self, progress: Progress) -> anyhow::Result<()> {
        self(progress)
    }
}

/// Receives the terminal notice of a run.
///
/// Errors are logged by the orchestrator and otherwise ignored.
pub trait NoticeSink {
    fn notify(&mut self, notice: &BatchNotice) -> anyhow::Result<()>;
}

impl<F> NoticeSink for F
where
    F: FnMut(&BatchNotice) -> anyhow::Result<()>,
{
    fn notify(&mut self, notice: &BatchNotice) -> anyhow::Result<()> {
        self(notice)
    }
}

/// Cooperative stop signal, checked between items.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
