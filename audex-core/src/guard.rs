//! Scoped ownership of the ffmpeg process and the in-progress output file.
//!
//! Both guards release their resource on drop unless the success path has
//! already done so, so early returns and panics never leak a process or
//! leave a half-written file behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::iter::FfmpegIterator;

use crate::error::{Error, Result};

/// Owns a running ffmpeg process. Dropping an unreaped child kills it.
pub struct ChildGuard {
    child: FfmpegChild,
    reaped: bool,
}

impl ChildGuard {
    pub fn new(child: FfmpegChild) -> Self {
        Self { child, reaped: false }
    }

    /// Event stream over the child's stderr. Ends when ffmpeg closes it.
    pub fn iter(&mut self) -> Result<FfmpegIterator> {
        self.child
            .iter()
            .map_err(|e| Error::Spawn(format!("failed to read ffmpeg output: {e}")))
    }

    pub fn wait(mut self) -> io::Result<ExitStatus> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(status)
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Sibling file that receives ffmpeg's output until the conversion succeeds.
///
/// The partial name keeps the target extension so ffmpeg still picks the
/// muxer from it: `dir/T8Loop.mp3` is written as `dir/.T8Loop.partial.mp3`.
#[derive(Debug)]
pub struct PartialOutput {
    partial: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl PartialOutput {
    pub fn new(target: &Path) -> Result<Self> {
        let stem = target
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::InvalidPath(target.to_path_buf()))?;
        let name = match target.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!(".{stem}.partial.{ext}"),
            None => format!(".{stem}.partial"),
        };
        Ok(Self {
            partial: target.with_file_name(name),
            target: target.to_path_buf(),
            committed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.partial
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the finished partial file over the target. Empty output is
    /// rejected and cleaned up by the drop.
    pub fn commit(mut self) -> Result<PathBuf> {
        let len = fs::metadata(&self.partial)?.len();
        if len == 0 {
            return Err(Error::EmptyOutput(self.target.clone()));
        }
        fs::rename(&self.partial, &self.target)?;
        self.committed = true;
        Ok(self.target.clone())
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        if !self.committed {
            match fs::remove_file(&self.partial) {
                Ok(()) => tracing::debug!(path = %self.partial.display(), "removed partial output"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(path = %self.partial.display(), "failed to remove partial output: {e}"),
            }
        }
    }
}
