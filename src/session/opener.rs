//! Opening converted files with the host's default handler

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum OpenError {
    #[error("File does not exist: {0}")]
    Missing(PathBuf),

    #[error("No default application opened {path}: {source}")]
    System {
        path: PathBuf,
        #[source]
        source: opener::OpenError,
    },

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status} for {path}")]
    ExitStatus {
        program: String,
        status: std::process::ExitStatus,
        path: PathBuf,
    },
}

pub trait FileOpener {
    fn open(&self, path: &Path) -> Result<(), OpenError>;
}

#[derive(Debug, Clone)]
enum Launcher {
    /// The platform's default handler, via the `opener` crate.
    Default,
    Program {
        program: String,
        leading_args: Vec<String>,
    },
}

/// Opens files with the desktop's default application, or with an explicit program.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    launcher: Launcher,
}

impl SystemOpener {
    /// Uses whatever the host registers as the default handler.
    pub fn detect() -> Self {
        Self {
            launcher: Launcher::Default,
        }
    }

    /// Runs `program [leading_args..] <path>` instead of the default handler.
    pub fn custom(program: &str, leading_args: &[&str]) -> Self {
        Self {
            launcher: Launcher::Program {
                program: program.to_string(),
                leading_args: leading_args.iter().map(|a| a.to_string()).collect(),
            },
        }
    }

    /// `--open-with` wins over the platform default.
    pub fn from_override(program: Option<&str>) -> Self {
        match program {
            Some(program) => Self::custom(program, &[]),
            None => Self::detect(),
        }
    }

    pub fn describe(&self) -> String {
        match &self.launcher {
            Launcher::Default => "system default application".to_string(),
            Launcher::Program { program, .. } => program.clone(),
        }
    }

    fn run_program(&self, program: &str, leading_args: &[String], path: &Path) -> Result<(), OpenError> {
        let status = Command::new(program)
            .args(args_for(leading_args, path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| OpenError::Launch {
                program: program.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(OpenError::ExitStatus {
                program: program.to_string(),
                status,
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }
}

fn args_for(leading_args: &[String], path: &Path) -> Vec<OsString> {
    leading_args
        .iter()
        .map(OsString::from)
        .chain(std::iter::once(path.as_os_str().to_owned()))
        .collect()
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::detect()
    }
}

impl FileOpener for SystemOpener {
    fn open(&self, path: &Path) -> Result<(), OpenError> {
        if !path.exists() {
            return Err(OpenError::Missing(path.to_path_buf()));
        }

        debug!(launcher = %self.describe(), path = %path.display(), "Opening file");

        match &self.launcher {
            Launcher::Default => opener::open(path).map_err(|source| OpenError::System {
                path: path.to_path_buf(),
                source,
            })?,
            Launcher::Program {
                program,
                leading_args,
            } => self.run_program(program, leading_args, path)?,
        }

        info!(path = %path.display(), "Opened file");
        Ok(())
    }
}
