use std::path::Path;

use crate::error::{Error, Result};

/// Output audio encodings, selected by the output file's extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
    Ogg,
    /// AAC in either an MP4 audio container (`.m4a`) or raw ADTS (`.aac`).
    Aac,
    Flac,
    Opus,
}

impl AudioFormat {
    /// Case-insensitive lookup; `None` for extensions with no known codec.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "wav" => Some(AudioFormat::Wav),
            "ogg" => Some(AudioFormat::Ogg),
            "m4a" | "aac" => Some(AudioFormat::Aac),
            "flac" => Some(AudioFormat::Flac),
            "opus" => Some(AudioFormat::Opus),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))
    }

    /// ffmpeg encoder name passed to `-c:a`.
    pub fn codec(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "libmp3lame",
            AudioFormat::Wav => "pcm_s16le",
            AudioFormat::Ogg => "libvorbis",
            AudioFormat::Aac => "aac",
            AudioFormat::Flac => "flac",
            AudioFormat::Opus => "libopus",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn resolves_codec_from_extension() {
        assert_eq!(AudioFormat::from_path(Path::new("T8Loop.mp3")).unwrap(), AudioFormat::Mp3);
        assert_eq!(AudioFormat::from_path(Path::new("dir/clip.WAV")).unwrap(), AudioFormat::Wav);
        assert_eq!(AudioFormat::from_path(Path::new("a.m4a")).unwrap().codec(), "aac");
        assert_eq!(AudioFormat::from_path(Path::new("a.aac")).unwrap(), AudioFormat::Aac);
        assert_eq!(AudioFormat::Mp3.codec(), "libmp3lame");
        assert_eq!(AudioFormat::Opus.codec(), "libopus");
    }

    #[test]
    fn rejects_unknown_or_missing_extension() {
        for name in ["clip.mp4", "clip.txt", "clip", ".mp3.bak"] {
            let err = AudioFormat::from_path(&PathBuf::from(name)).unwrap_err();
            assert!(matches!(err, Error::UnsupportedFormat(_)), "{name}: {err}");
        }
    }
}
