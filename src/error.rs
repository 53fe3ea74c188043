use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can stop the program before or during a session.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error")]
    Terminal(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create log file {}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to install logger")]
    Logging(#[from] log::SetLoggerError),
}
