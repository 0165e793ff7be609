use std::fs;
use std::path::Path;

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, Stream, StreamTypeSpecificData};

use crate::error::{Error, Result};
use crate::events::{ErrorLog, LOG_LEVEL_ARGS};
use crate::guard::ChildGuard;
use crate::path_str;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamKind {
    Audio,
    Video,
    Subtitle,
    Other,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StreamInfo {
    pub index: u32,
    pub kind: StreamKind,
    /// Codec name as ffmpeg prints it, e.g. `aac`, `mp3`, `pcm_s16le`.
    pub codec: String,
    pub sample_rate: Option<u32>,
    /// Channel layout, e.g. `stereo` or `mono`.
    pub channels: Option<String>,
}

impl StreamInfo {
    fn from_stream(stream: &Stream) -> Self {
        let (kind, sample_rate, channels) = match &stream.type_specific_data {
            StreamTypeSpecificData::Audio(audio) => {
                (StreamKind::Audio, Some(audio.sample_rate), Some(audio.channels.clone()))
            }
            StreamTypeSpecificData::Video(_) => (StreamKind::Video, None, None),
            _ if stream.is_subtitle() => (StreamKind::Subtitle, None, None),
            _ => (StreamKind::Other, None, None),
        };
        Self {
            index: stream.stream_index,
            kind,
            codec: stream.format.clone(),
            sample_rate,
            channels,
        }
    }
}

/// What ffmpeg reports about an input file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MediaInfo {
    /// Container duration in seconds, when ffmpeg could determine one.
    pub duration: Option<f64>,
    pub streams: Vec<StreamInfo>,
}

impl MediaInfo {
    pub fn audio_streams(&self) -> impl Iterator<Item = &StreamInfo> {
        self.streams.iter().filter(|s| s.kind == StreamKind::Audio)
    }

    pub fn has_audio(&self) -> bool {
        self.audio_streams().next().is_some()
    }

    fn apply(&mut self, event: &FfmpegEvent) -> bool {
        match event {
            FfmpegEvent::ParsedInputStream(stream) => {
                self.streams.push(StreamInfo::from_stream(stream));
                true
            }
            FfmpegEvent::ParsedDuration(d) if d.input_index == 0 => {
                self.duration = Some(d.duration);
                true
            }
            FfmpegEvent::ParsedInput(_) => true,
            _ => false,
        }
    }
}

/// Read the stream layout and duration of `path`.
///
/// Runs ffmpeg with an input and no output; ffmpeg prints the input
/// description and then exits with an error, which is expected here.
pub fn probe(path: impl AsRef<Path>) -> Result<MediaInfo> {
    let path = path.as_ref();
    fs::metadata(path)?;

    let mut command = FfmpegCommand::new();
    command.hide_banner().args(LOG_LEVEL_ARGS).input(path_str(path)?);
    let mut child = ChildGuard::new(command.spawn().map_err(|e| Error::Spawn(e.to_string()))?);

    let mut info = MediaInfo::default();
    let mut errors = ErrorLog::default();
    let mut parsed_input = false;
    for event in child.iter()? {
        parsed_input |= info.apply(&event);
        errors.record(&event);
    }
    let status = child.wait()?;

    if !parsed_input {
        return Err(Error::Ffmpeg { status, message: errors.message() });
    }
    tracing::debug!(path = %path.display(), streams = info.streams.len(), duration = ?info.duration, "probed input");
    Ok(info)
}
