//! Session-level glue around the pipeline
//!
//! File selection, the in-memory conversion history, opening results with the
//! host's default viewer and the terminal front end.

pub mod history;
pub mod opener;
pub mod selection;
pub mod terminal;

pub use history::{ConversionHistory, HistoryEntry};
pub use opener::{FileOpener, OpenError, SystemOpener};
pub use selection::{ArgsSelector, FileSelector, PromptSelector, SelectedFile};
pub use terminal::{InteractiveSession, TerminalReporter};
