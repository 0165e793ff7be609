use std::path::PathBuf;

use anyhow::Context;
use audex_core::ConvertOptions;
use clap::Parser;
use ffmpeg_sidecar::command::ffmpeg_is_installed;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "audex-convert", about = "Extract the audio track of a video into an audio file")]
struct Cli {
    /// Input video file path
    #[arg(default_value = "T8Loop.mp4")]
    input: PathBuf,

    /// Output audio file path; its extension picks the codec (default: input with .mp3 extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output sample rate in Hz
    #[arg(long, default_value_t = audex_core::convert::DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Target bitrate, e.g. 192k (default: encoder's choice)
    #[arg(long)]
    bitrate: Option<String>,

    /// ffmpeg audio encoder, overriding the one implied by the extension
    #[arg(long)]
    codec: Option<String>,
}

impl Cli {
    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let mut p = self.input.clone();
            p.set_extension("mp3");
            p
        })
    }

    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            sample_rate: self.sample_rate,
            bitrate: self.bitrate.clone(),
            codec: self.codec.clone(),
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if !ffmpeg_is_installed() {
        anyhow::bail!("ffmpeg not found on PATH; install it to extract audio");
    }

    let output_path = cli.output_path();
    let info = audex_core::probe(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;
    for stream in info.audio_streams() {
        tracing::info!(
            index = stream.index,
            codec = %stream.codec,
            sample_rate = ?stream.sample_rate,
            channels = ?stream.channels,
            "source audio stream"
        );
    }

    tracing::info!("Extracting audio: {} -> {}", cli.input.display(), output_path.display());
    audex_core::convert_with(&cli.input, &output_path, &cli.options())
        .with_context(|| format!("failed to extract audio into {}", output_path.display()))?;
    tracing::info!("Wrote {}", output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_converts_t8loop() {
        let cli = Cli::parse_from(["audex-convert"]);
        assert_eq!(cli.input, PathBuf::from("T8Loop.mp4"));
        assert_eq!(cli.output_path(), PathBuf::from("T8Loop.mp3"));
        assert_eq!(cli.options(), ConvertOptions::default());
    }

    #[test]
    fn flags_map_onto_options() {
        let cli = Cli::parse_from([
            "audex-convert",
            "clips/intro.mkv",
            "-o",
            "out/intro.ogg",
            "--sample-rate",
            "48000",
            "--bitrate",
            "160k",
        ]);
        assert_eq!(cli.output_path(), PathBuf::from("out/intro.ogg"));
        let opts = cli.options();
        assert_eq!(opts.sample_rate, 48000);
        assert_eq!(opts.bitrate.as_deref(), Some("160k"));
        assert_eq!(opts.codec, None);
    }

    #[test]
    fn default_output_sits_beside_input() {
        let cli = Cli::parse_from(["audex-convert", "clips/intro.mkv"]);
        assert_eq!(cli.output_path(), PathBuf::from("clips/intro.mp3"));
    }
}
