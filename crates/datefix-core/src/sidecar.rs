use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};
use serde::Deserialize;

use crate::error::{FixError, Result};

/// Expected sidecar location for a media file: the complete file name with
/// `.json` appended, so `photo.jpg` -> `photo.jpg.json`. Names with several
/// dots keep every segment: `a.b.jpg` -> `a.b.jpg.json`.
pub fn sidecar_path(media: &Path) -> PathBuf {
    let mut name = media.as_os_str().to_os_string();
    name.push(".json");
    PathBuf::from(name)
}

/// The subset of a Takeout sidecar this tool consumes. All three keys must
/// be present or deserialization fails for that file.
#[derive(Debug, Clone, Deserialize)]
pub struct SidecarTimes {
    #[serde(rename = "creationTime")]
    creation_time: EpochField,
    #[serde(rename = "photoTakenTime")]
    photo_taken_time: EpochField,
    #[serde(rename = "photoLastModifiedTime")]
    photo_last_modified_time: EpochField,
}

#[derive(Debug, Clone, Deserialize)]
struct EpochField {
    timestamp: Epoch,
}

/// Takeout usually writes timestamps as decimal strings; some exports use
/// plain JSON numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Epoch {
    Text(String),
    Number(i64),
}

impl EpochField {
    fn seconds(&self, field: &'static str) -> Result<i64> {
        match &self.timestamp {
            Epoch::Number(n) => Ok(*n),
            Epoch::Text(s) => s.trim().parse::<i64>().map_err(|_| FixError::BadTimestamp {
                field,
                value: s.clone(),
            }),
        }
    }
}

impl SidecarTimes {
    /// Read and parse the sidecar at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FixError::MissingSidecar(path.to_path_buf())
            } else {
                FixError::SidecarRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        serde_json::from_slice(&bytes).map_err(|e| FixError::SidecarJson {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn created(&self) -> Result<i64> {
        self.creation_time.seconds("creationTime.timestamp")
    }

    pub fn taken(&self) -> Result<i64> {
        self.photo_taken_time.seconds("photoTakenTime.timestamp")
    }

    pub fn modified(&self) -> Result<i64> {
        self.photo_last_modified_time
            .seconds("photoLastModifiedTime.timestamp")
    }

    /// `creationTime` rendered as a local EXIF datetime string.
    pub fn created_exif(&self) -> Result<String> {
        exif_datetime(self.created()?, "creationTime.timestamp")
    }

    /// `photoTakenTime` rendered as a local EXIF datetime string.
    pub fn taken_exif(&self) -> Result<String> {
        exif_datetime(self.taken()?, "photoTakenTime.timestamp")
    }

    /// `photoLastModifiedTime` rendered as a local EXIF datetime string.
    pub fn modified_exif(&self) -> Result<String> {
        exif_datetime(self.modified()?, "photoLastModifiedTime.timestamp")
    }
}

/// Convert a UTC epoch to the local-time EXIF form `YYYY:MM:DD HH:MM:SS`.
fn exif_datetime(epoch: i64, field: &'static str) -> Result<String> {
    let utc = DateTime::from_timestamp(epoch, 0).ok_or(FixError::BadTimestamp {
        field,
        value: epoch.to_string(),
    })?;
    Ok(format_exif(&utc.with_timezone(&Local).naive_local()))
}

fn format_exif(dt: &NaiveDateTime) -> String {
    dt.format("%Y:%m:%d %H:%M:%S").to_string()
}
