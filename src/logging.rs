use std::fs::File;
use std::path::Path;

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::AppError;

/// Sends log records to `path`.
///
/// The game owns the terminal, so there is no console logger; without a
/// path nothing is recorded.
pub fn init_logging(path: Option<&Path>) -> Result<(), AppError> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), file)?;
    Ok(())
}
