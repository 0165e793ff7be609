use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};

/// Prefix every ffmpeg log line with its level so `ErrorLog` can sort them.
pub const LOG_LEVEL_ARGS: [&str; 2] = ["-loglevel", "level+info"];

/// Forwards ffmpeg's log lines to `tracing` and keeps the error lines, so a
/// failed run can be reported with ffmpeg's own words.
#[derive(Debug, Default)]
pub struct ErrorLog {
    lines: Vec<String>,
}

impl ErrorLog {
    pub fn record(&mut self, event: &FfmpegEvent) {
        match event {
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, msg) => {
                tracing::error!("[ffmpeg] {msg}");
                self.lines.push(msg.trim().to_string());
            }
            FfmpegEvent::Log(LogLevel::Warning, msg) => tracing::warn!("[ffmpeg] {msg}"),
            FfmpegEvent::Log(_, msg) => tracing::trace!("[ffmpeg] {msg}"),
            FfmpegEvent::Error(msg) => {
                tracing::error!("[ffmpeg] {msg}");
                self.lines.push(msg.trim().to_string());
            }
            _ => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn message(&self) -> String {
        if self.lines.is_empty() {
            "no error output".to_string()
        } else {
            self.lines.join("; ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_error_lines() {
        let mut log = ErrorLog::default();
        log.record(&FfmpegEvent::Log(LogLevel::Info, "Input #0, mov,mp4".into()));
        log.record(&FfmpegEvent::Log(LogLevel::Warning, "deprecated pixel format".into()));
        assert!(log.is_empty());
        assert_eq!(log.message(), "no error output");

        log.record(&FfmpegEvent::Log(
            LogLevel::Error,
            "Stream map '0:a:0' matches no streams.\n".into(),
        ));
        log.record(&FfmpegEvent::Error("Conversion failed!".into()));
        assert_eq!(
            log.message(),
            "Stream map '0:a:0' matches no streams.; Conversion failed!"
        );
    }
}
