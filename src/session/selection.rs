//! Choosing which files go into a batch

use std::path::{Path, PathBuf};

use dialoguer::Input;
use tracing::warn;

/// A file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub display_name: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let path = std::path::absolute(path)?;
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { display_name, path })
    }
}

/// Supplies the ordered list of files for the next batch.
///
/// An empty list means the user cancelled; it is not an error.
pub trait FileSelector {
    fn select(&mut self) -> anyhow::Result<Vec<SelectedFile>>;
}

pub fn is_heic_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("heic") || ext.eq_ignore_ascii_case("heif"))
}

fn keep_heic(paths: impl IntoIterator<Item = PathBuf>) -> anyhow::Result<Vec<SelectedFile>> {
    let mut selected = Vec::new();
    for path in paths {
        if !is_heic_path(&path) {
            warn!(path = %path.display(), "Skipping file without .heic/.heif extension");
            continue;
        }
        selected.push(SelectedFile::from_path(&path)?);
    }
    Ok(selected)
}

/// Files given up front, typically on the command line.
#[derive(Debug, Clone, Default)]
pub struct ArgsSelector {
    paths: Vec<PathBuf>,
}

impl ArgsSelector {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl FileSelector for ArgsSelector {
    fn select(&mut self) -> anyhow::Result<Vec<SelectedFile>> {
        keep_heic(self.paths.iter().cloned())
    }
}

/// Asks for one path per line until an empty line.
#[derive(Debug, Clone, Default)]
pub struct PromptSelector;

impl FileSelector for PromptSelector {
    fn select(&mut self) -> anyhow::Result<Vec<SelectedFile>> {
        let mut paths = Vec::new();
        loop {
            let line: String = Input::new()
                .with_prompt("HEIC file (empty line to finish)")
                .allow_empty(true)
                .validate_with(|input: &String| -> Result<(), String> {
                    let trimmed = input.trim();
                    if trimmed.is_empty() || Path::new(trimmed).is_file() {
                        Ok(())
                    } else {
                        Err(format!("'{}' is not a file", trimmed))
                    }
                })
                .interact_text()?;

            let line = line.trim();
            if line.is_empty() {
                break;
            }
            paths.push(PathBuf::from(line));
        }
        keep_heic(paths)
    }
}
