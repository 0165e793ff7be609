pub mod convert;
pub mod error;
pub mod events;
pub mod format;
pub mod guard;
pub mod probe;

use std::path::Path;

pub use convert::{convert, convert_with, ConvertOptions};
pub use error::{Error, Result};
pub use format::AudioFormat;
pub use probe::{probe, MediaInfo, StreamInfo, StreamKind};

/// ffmpeg takes its paths as UTF-8 arguments.
pub(crate) fn path_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| Error::InvalidPath(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_paths_pass_through() {
        assert_eq!(path_str(Path::new("clips/T8Loop.mp4")).unwrap(), "clips/T8Loop.mp4");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"clip\xff.mp4"));
        assert!(matches!(path_str(path), Err(Error::InvalidPath(_))));
    }
}
