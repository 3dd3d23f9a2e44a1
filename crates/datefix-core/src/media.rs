use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FixError, Result};

/// How a file's timestamps are rewritten once copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    /// EXIF datetime tags are rewritten inside the file.
    Image,
    /// Filesystem timestamps are set on the file.
    Video,
}

impl FromStr for MediaKind {
    type Err = FixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(FixError::UnknownKind(other.to_string())),
        }
    }
}

/// Lowercase extension -> handler kind.
///
/// The defaults reproduce the upstream routing, including `webp` going to
/// the filesystem-timestamp path even though webp is an image container.
/// Override with `webp=image` to correct that, or add extensions the same
/// way.
#[derive(Debug, Clone)]
pub struct ExtensionMap {
    map: HashMap<String, MediaKind>,
}

impl Default for ExtensionMap {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert("jpeg".to_string(), MediaKind::Image);
        map.insert("jpg".to_string(), MediaKind::Image);
        map.insert("mp4".to_string(), MediaKind::Video);
        map.insert("webp".to_string(), MediaKind::Video);
        Self { map }
    }
}

impl ExtensionMap {
    /// The default map with user overrides (`"ext=image"` / `"ext=video"`)
    /// applied in order.
    pub fn with_overrides(overrides: &[String]) -> Result<Self> {
        let mut this = Self::default();
        for spec in overrides {
            this.apply_override(spec)?;
        }
        Ok(this)
    }

    pub fn apply_override(&mut self, spec: &str) -> Result<()> {
        let (ext, kind) = spec
            .split_once('=')
            .ok_or_else(|| FixError::BadMapping(spec.to_string()))?;
        let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        if ext.is_empty() {
            return Err(FixError::BadMapping(spec.to_string()));
        }
        self.map.insert(ext, kind.parse()?);
        Ok(())
    }

    pub fn kind_for(&self, extension: &str) -> Option<MediaKind> {
        self.map.get(extension).copied()
    }
}

/// One media file scheduled for processing. Derived purely from the input
/// path and the configured roots; nothing persists across runs.
#[derive(Debug, Clone)]
pub struct MediaItem {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sidecar: PathBuf,
    pub extension: String,
    pub kind: MediaKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dispatch() {
        let map = ExtensionMap::default();
        assert_eq!(map.kind_for("jpg"), Some(MediaKind::Image));
        assert_eq!(map.kind_for("jpeg"), Some(MediaKind::Image));
        assert_eq!(map.kind_for("mp4"), Some(MediaKind::Video));
        // Upstream quirk, preserved by default.
        assert_eq!(map.kind_for("webp"), Some(MediaKind::Video));
        assert_eq!(map.kind_for("png"), None);
        assert_eq!(map.kind_for("json"), None);
    }

    #[test]
    fn test_overrides() {
        let map = ExtensionMap::with_overrides(&[
            "webp=image".to_string(),
            ".MOV=video".to_string(),
        ])
        .unwrap();
        assert_eq!(map.kind_for("webp"), Some(MediaKind::Image));
        assert_eq!(map.kind_for("mov"), Some(MediaKind::Video));
    }

    #[test]
    fn test_bad_override_specs() {
        let mut map = ExtensionMap::default();
        assert!(matches!(
            map.apply_override("webp"),
            Err(FixError::BadMapping(_))
        ));
        assert!(matches!(
            map.apply_override("=image"),
            Err(FixError::BadMapping(_))
        ));
        assert!(matches!(
            map.apply_override("webp=audio"),
            Err(FixError::UnknownKind(_))
        ));
    }
}
