//! Terminal front end: progress bar, notices and the interactive menu

use std::io::Write;
use std::path::{Path, PathBuf};

use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::image_pipeline::{
    BatchNotice, BatchOrchestrator, BatchState, ImageConverter, NoticeSink, Progress, ProgressSink,
    TargetFormat,
};
use crate::session::{ConversionHistory, FileOpener, FileSelector, SelectedFile};

/// Progress half of a [`TerminalReporter`].
pub struct BarProgress {
    bar: ProgressBar,
}

impl ProgressSink for BarProgress {
    fn report(&mut self, progress: Progress) -> anyhow::Result<()> {
        self.bar.set_position(progress.completed as u64);
        self.bar.set_message(progress.to_string());
        Ok(())
    }
}

/// Notice half of a [`TerminalReporter`]: one line per notice on `out`.
pub struct NoticePrinter<W: Write> {
    bar: ProgressBar,
    out: W,
}

impl<W: Write> NoticeSink for NoticePrinter<W> {
    fn notify(&mut self, notice: &BatchNotice) -> anyhow::Result<()> {
        match notice {
            BatchNotice::Completed { .. } => self.bar.finish(),
            BatchNotice::Failed { .. } | BatchNotice::Cancelled { .. } => self.bar.abandon(),
            BatchNotice::NoInput => self.bar.finish_and_clear(),
        }
        // Earlier successes stay reachable even when the run stopped early.
        for output in notice.outputs() {
            writeln!(self.out, "Converted: {}", output.display())?;
        }
        writeln!(self.out, "{}", notice)?;
        Ok(())
    }
}

/// Renders batch progress as a bar and notices as lines on `out`.
pub struct TerminalReporter<W: Write> {
    pub progress: BarProgress,
    pub notices: NoticePrinter<W>,
}

impl<W: Write> TerminalReporter<W> {
    pub fn new(total: usize, out: W) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(Progress { completed: 0, total }.to_string());
        Self::with_bar(bar, out)
    }

    /// No bar drawn; notices still go to `out`.
    pub fn hidden(out: W) -> Self {
        Self::with_bar(ProgressBar::hidden(), out)
    }

    fn with_bar(bar: ProgressBar, out: W) -> Self {
        Self {
            progress: BarProgress { bar: bar.clone() },
            notices: NoticePrinter { bar, out },
        }
    }

    pub fn run<C: ImageConverter, P: AsRef<Path>>(
        &mut self,
        orchestrator: &BatchOrchestrator<C>,
        input_paths: &[P],
        format_name: &str,
    ) -> BatchState {
        orchestrator.run_named(input_paths, format_name, &mut self.progress, &mut self.notices)
    }

    pub fn into_inner(self) -> W {
        self.notices.out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Pick,
    Format,
    Convert,
    Open,
    ClearHistory,
    Quit,
}

const MENU: [MenuAction; 6] = [
    MenuAction::Pick,
    MenuAction::Format,
    MenuAction::Convert,
    MenuAction::Open,
    MenuAction::ClearHistory,
    MenuAction::Quit,
];

/// Menu-driven session: pick files, choose a format, convert, reopen results.
///
/// Selection and format are plain fields handed to the orchestrator on each
/// convert; the history only lives as long as the session.
pub struct InteractiveSession<C: ImageConverter, S: FileSelector, O: FileOpener> {
    orchestrator: BatchOrchestrator<C>,
    selector: S,
    opener: O,
    selected: Vec<SelectedFile>,
    format: TargetFormat,
    history: ConversionHistory,
}

impl<C: ImageConverter, S: FileSelector, O: FileOpener> InteractiveSession<C, S, O> {
    pub fn new(orchestrator: BatchOrchestrator<C>, selector: S, opener: O, format: TargetFormat) -> Self {
        Self {
            orchestrator,
            selector,
            opener,
            selected: Vec::new(),
            format,
            history: ConversionHistory::new(),
        }
    }

    pub fn selected(&self) -> &[SelectedFile] {
        &self.selected
    }

    pub fn format(&self) -> TargetFormat {
        self.format
    }

    pub fn set_format(&mut self, format: TargetFormat) {
        self.format = format;
    }

    pub fn history(&self) -> &ConversionHistory {
        &self.history
    }

    /// Replaces the selection. Returns how many files were picked.
    pub fn pick_files(&mut self, out: &mut dyn Write) -> anyhow::Result<usize> {
        let picked = self.selector.select()?;
        if picked.is_empty() {
            writeln!(out, "Cancelled")?;
            return Ok(0);
        }
        for file in &picked {
            writeln!(out, "{}", file.display_name)?;
        }
        info!(count = picked.len(), "Files selected");
        self.selected = picked;
        Ok(self.selected.len())
    }

    pub fn convert<W: Write>(&mut self, reporter: &mut TerminalReporter<W>) -> BatchState {
        let paths: Vec<PathBuf> = self.selected.iter().map(|f| f.path.clone()).collect();
        let state = self.orchestrator.run(&paths, self.format, &mut reporter.progress, &mut reporter.notices);
        self.history.record(&state);
        state
    }

    /// Opens a history entry. Failures are reported, never fatal.
    pub fn open_entry(&self, index: usize, out: &mut dyn Write) -> anyhow::Result<bool> {
        let Some(entry) = self.history.get(index) else {
            writeln!(out, "No converted file #{}", index + 1)?;
            return Ok(false);
        };
        match self.opener.open(&entry.output_path) {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!("Could not open {}: {}", entry.output_path.display(), e);
                writeln!(out, "Could not open {}: {}", entry.output_path.display(), e)?;
                Ok(false)
            }
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Runs the menu until the user quits.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut stdout = std::io::stdout();
        loop {
            let labels: Vec<String> = MENU.iter().map(|action| self.label(*action)).collect();
            let choice = Select::new()
                .with_prompt("HEIC converter")
                .items(&labels)
                .default(0)
                .interact()?;

            match MENU[choice] {
                MenuAction::Pick => {
                    self.pick_files(&mut stdout)?;
                }
                MenuAction::Format => self.choose_format()?,
                MenuAction::Convert => {
                    let mut reporter = TerminalReporter::new(self.selected.len(), std::io::stdout());
                    self.convert(&mut reporter);
                }
                MenuAction::Open => self.choose_and_open(&mut stdout)?,
                MenuAction::ClearHistory => {
                    self.clear_history();
                    writeln!(stdout, "History cleared")?;
                }
                MenuAction::Quit => return Ok(()),
            }
        }
    }

    fn label(&self, action: MenuAction) -> String {
        match action {
            MenuAction::Pick => match self.selected.len() {
                0 => "Pick HEIC files (none selected)".to_string(),
                n => format!("Pick HEIC files ({} selected)", n),
            },
            MenuAction::Format => format!("Target format: {}", self.format),
            MenuAction::Convert => "Convert".to_string(),
            MenuAction::Open => format!("Open converted file ({} in history)", self.history.len()),
            MenuAction::ClearHistory => "Clear history".to_string(),
            MenuAction::Quit => "Quit".to_string(),
        }
    }

    fn choose_format(&mut self) -> anyhow::Result<()> {
        let current = TargetFormat::ALL
            .iter()
            .position(|f| *f == self.format)
            .unwrap_or(0);
        let choice = Select::new()
            .with_prompt("Convert to")
            .items(&TargetFormat::ALL)
            .default(current)
            .interact()?;
        self.format = TargetFormat::ALL[choice];
        Ok(())
    }

    fn choose_and_open(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        if self.history.is_empty() {
            writeln!(out, "Nothing converted yet")?;
            return Ok(());
        }
        let labels: Vec<String> = self
            .history
            .outputs()
            .map(|p| p.display().to_string())
            .collect();
        let choice = Select::new()
            .with_prompt("Open")
            .items(&labels)
            .default(labels.len() - 1)
            .interact()?;
        self.open_entry(choice, out)?;
        Ok(())
    }
}
