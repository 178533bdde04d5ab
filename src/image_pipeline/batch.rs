//! Batch conversion module
//!
//! Runs the conversion service over an ordered list of files, one at a time,
//! stopping at the first failure.

mod events;
mod orchestrator;
pub mod types;


pub use events::{BatchNotice, CancelFlag, NoticeSink, Progress, ProgressSink};
pub use orchestrator::BatchOrchestrator;
pub use types::{BatchState, ConversionRequest, ConversionResult};
