//! Media uploads for project cards.
//!
//! Files are copied into the media directory under a timestamped, sanitized
//! name and addressed by their public path `/projects/<filename>`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::projects::{MediaType, ProjectPatch};

/// Public URL prefix for stored media.
pub const PUBLIC_PREFIX: &str = "/projects";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Location on disk.
    pub path: PathBuf,
    /// Path the site serves the file from.
    pub public_path: String,
    pub media_type: MediaType,
}

impl StoredMedia {
    /// Patch pointing a project's media at this file.
    pub fn project_patch(&self) -> ProjectPatch {
        ProjectPatch {
            media_path: Some(self.public_path.clone()),
            media_type: Some(self.media_type),
            ..ProjectPatch::default()
        }
    }
}

/// Lower-cases the name and replaces everything outside `[a-z0-9.]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Guesses the media type from the file extension.
pub fn media_type_for(name: &str) -> MediaType {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("mp4" | "webm" | "mov" | "ogv") => MediaType::Video,
        _ => MediaType::Image,
    }
}

/// Writes `bytes` into `media_dir` as `<timestamp_ms>_<sanitized name>`.
///
/// # Errors
/// Returns an error if the name is empty or the file cannot be written.
pub fn store_media(
    media_dir: &Path,
    original_name: &str,
    bytes: &[u8],
    timestamp_ms: i64,
) -> Result<StoredMedia> {
    if original_name.trim().is_empty() {
        anyhow::bail!("No file found");
    }

    let filename = format!("{timestamp_ms}_{}", sanitize_file_name(original_name));
    fs::create_dir_all(media_dir)
        .with_context(|| format!("Failed to create directory {}", media_dir.display()))?;
    let path = media_dir.join(&filename);
    fs::write(&path, bytes).with_context(|| format!("Error saving file {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "media stored");

    Ok(StoredMedia {
        path,
        public_path: format!("{PUBLIC_PREFIX}/{filename}"),
        media_type: media_type_for(original_name),
    })
}

/// Copies a local file into the media directory, stamped with the current time.
///
/// # Errors
/// Returns an error if the source cannot be read or the copy cannot be written.
pub fn import_file(media_dir: &Path, source: &Path) -> Result<StoredMedia> {
    let bytes =
        fs::read(source).with_context(|| format!("Failed to read {}", source.display()))?;
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    store_media(
        media_dir,
        name,
        &bytes,
        chrono::Utc::now().timestamp_millis(),
    )
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("My Shot (1).PNG"), "my_shot__1_.png");
        assert_eq!(sanitize_file_name("demo-video.mp4"), "demo_video.mp4");
        assert_eq!(sanitize_file_name("café.jpg"), "caf_.jpg");
    }

    #[test]
    fn test_store_media_writes_and_returns_public_path() {
        let dir = tempdir().unwrap();
        let media_dir = dir.path().join("projects");

        let stored = store_media(&media_dir, "Hero Shot.JPG", b"jpeg", 1_700_000_000_000).unwrap();

        assert_eq!(stored.public_path, "/projects/1700000000000_hero_shot.jpg");
        assert_eq!(stored.media_type, MediaType::Image);
        assert_eq!(fs::read(&stored.path).unwrap(), b"jpeg");
    }

    #[test]
    fn test_store_media_rejects_empty_name() {
        let dir = tempdir().unwrap();
        let err = store_media(dir.path(), "  ", b"x", 1).unwrap_err();
        assert_eq!(err.to_string(), "No file found");
    }

    #[test]
    fn test_media_type_from_extension() {
        assert_eq!(media_type_for("clip.MP4"), MediaType::Video);
        assert_eq!(media_type_for("shot.webp"), MediaType::Image);
        assert_eq!(media_type_for("noext"), MediaType::Image);
    }

    #[test]
    fn test_project_patch_sets_media_fields() {
        let stored = StoredMedia {
            path: PathBuf::from("/data/projects/1_clip.mp4"),
            public_path: "/projects/1_clip.mp4".to_string(),
            media_type: MediaType::Video,
        };
        let patch = stored.project_patch();
        assert_eq!(patch.media_path.as_deref(), Some("/projects/1_clip.mp4"));
        assert_eq!(patch.media_type, Some(MediaType::Video));
        assert_eq!(patch.name, None);
    }

    #[test]
    fn test_import_file_copies_source() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("demo.webm");
        fs::write(&source, b"video").unwrap();

        let stored = import_file(&dir.path().join("media"), &source).unwrap();
        assert!(stored.public_path.starts_with("/projects/"));
        assert!(stored.public_path.ends_with("_demo.webm"));
        assert_eq!(stored.media_type, MediaType::Video);
    }
}
