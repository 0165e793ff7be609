use std::fs;
use std::path::Path;

use ffmpeg_sidecar::command::FfmpegCommand;

use crate::error::{Error, Result};
use crate::events::{ErrorLog, LOG_LEVEL_ARGS};
use crate::format::AudioFormat;
use crate::guard::{ChildGuard, PartialOutput};
use crate::path_str;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Encoder settings for the extracted track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    pub sample_rate: u32,
    /// Target bitrate such as `192k`; the encoder default when unset.
    pub bitrate: Option<String>,
    /// Explicit ffmpeg encoder. Overrides the one implied by the extension;
    /// ffmpeg still picks the container from the output name.
    pub codec: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bitrate: None,
            codec: None,
        }
    }
}

impl ConvertOptions {
    fn resolve_codec(&self, output: &Path) -> Result<String> {
        match &self.codec {
            Some(codec) => Ok(codec.clone()),
            None => AudioFormat::from_path(output).map(|f| f.codec().to_string()),
        }
    }

    /// Output-side ffmpeg arguments: first audio stream only, re-encoded.
    fn output_args(&self, codec: &str) -> Vec<String> {
        let mut args = vec![
            "-map".to_string(),
            "0:a:0".to_string(),
            "-vn".to_string(),
            "-c:a".to_string(),
            codec.to_string(),
            "-ar".to_string(),
            self.sample_rate.to_string(),
        ];
        if let Some(bitrate) = &self.bitrate {
            args.push("-b:a".to_string());
            args.push(bitrate.clone());
        }
        args
    }
}

/// Extract the audio track of `input` into `output`, encoded per the
/// output extension, with default settings.
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    convert_with(input, output, &ConvertOptions::default())
}

pub fn convert_with(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let codec = options.resolve_codec(output)?;
    fs::metadata(input)?;
    let partial = PartialOutput::new(output)?;

    let mut command = FfmpegCommand::new();
    command
        .hide_banner()
        .args(LOG_LEVEL_ARGS)
        .overwrite()
        .input(path_str(input)?)
        .args(options.output_args(&codec))
        .output(path_str(partial.path())?);
    tracing::debug!(
        input = %input.display(),
        output = %partial.target().display(),
        partial = %partial.path().display(),
        %codec,
        "spawning ffmpeg"
    );

    let mut child = ChildGuard::new(command.spawn().map_err(|e| Error::Spawn(e.to_string()))?);
    let mut errors = ErrorLog::default();
    for event in child.iter()? {
        errors.record(&event);
    }
    let status = child.wait()?;
    if !status.success() {
        return Err(Error::Ffmpeg { status, message: errors.message() });
    }

    let written = partial.commit()?;
    tracing::info!(output = %written.display(), "wrote audio");
    Ok(())
}
