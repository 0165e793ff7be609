use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// ffmpeg could not be started (missing binary, bad permissions).
    #[error("failed to run ffmpeg: {0}")]
    Spawn(String),

    /// ffmpeg ran and exited unsuccessfully. `message` is its own report.
    #[error("ffmpeg exited with {status}: {message}")]
    Ffmpeg { status: ExitStatus, message: String },

    #[error("no audio codec known for output {0:?}")]
    UnsupportedFormat(String),

    #[error("ffmpeg produced an empty file at {}", .0.display())]
    EmptyOutput(PathBuf),

    #[error("path cannot be passed to ffmpeg: {}", .0.display())]
    InvalidPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
