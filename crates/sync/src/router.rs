//! Extension-based attachment classification

use std::fmt;
use std::path::Path;

/// Attachment category a file is delivered under
///
/// Classification is by lower-cased extension; anything unrecognized,
/// including files with no extension, falls back to [`FileCategory::Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Audio,
    Photo,
    Video,
    Document,
}

impl FileCategory {
    /// Classify a path by its extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());

        match ext.as_deref() {
            Some("mp3" | "wav" | "ogg" | "m4a" | "flac" | "aac" | "opus") => Self::Audio,
            Some("jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp") => Self::Photo,
            Some("mp4" | "avi" | "mov" | "mkv" | "webm" | "flv" | "wmv") => Self::Video,
            _ => Self::Document,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Document => "document",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_extensions() {
        for ext in ["mp3", "wav", "ogg", "m4a", "flac", "aac", "opus"] {
            let path = format!("/data/track.{ext}");
            assert_eq!(FileCategory::from_path(Path::new(&path)), FileCategory::Audio);
        }
    }

    #[test]
    fn test_photo_extensions() {
        for ext in ["jpg", "jpeg", "png", "gif", "webp", "bmp"] {
            let path = format!("/data/shot.{ext}");
            assert_eq!(FileCategory::from_path(Path::new(&path)), FileCategory::Photo);
        }
    }

    #[test]
    fn test_video_extensions() {
        for ext in ["mp4", "avi", "mov", "mkv", "webm", "flv", "wmv"] {
            let path = format!("/data/clip.{ext}");
            assert_eq!(FileCategory::from_path(Path::new(&path)), FileCategory::Video);
        }
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(
            FileCategory::from_path(Path::new("/data/TRACK.MP3")),
            FileCategory::Audio
        );
        assert_eq!(
            FileCategory::from_path(Path::new("/data/Shot.Png")),
            FileCategory::Photo
        );
    }

    #[test]
    fn test_everything_else_is_a_document() {
        assert_eq!(
            FileCategory::from_path(Path::new("/data/a.txt")),
            FileCategory::Document
        );
        assert_eq!(
            FileCategory::from_path(Path::new("/data/archive.tar.gz")),
            FileCategory::Document
        );
        assert_eq!(
            FileCategory::from_path(Path::new("/data/README")),
            FileCategory::Document
        );
    }
}
