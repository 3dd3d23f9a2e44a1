use std::path::PathBuf;
use thiserror::Error;

/// Per-file failure reasons. Each is terminal for its file and recoverable
/// for the run: the already-copied output keeps its original metadata.
#[derive(Error, Debug)]
pub enum FixError {
    #[error("sidecar not found: {0}")]
    MissingSidecar(PathBuf),

    #[error("unreadable sidecar {path}: {source}")]
    SidecarRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed sidecar {path}: {source}")]
    SidecarJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("bad timestamp in {field}: {value:?}")]
    BadTimestamp { field: &'static str, value: String },

    #[error("EXIF write failed: {0}")]
    ExifWrite(String),

    #[error("unknown media kind {0:?} (expected \"image\" or \"video\")")]
    UnknownKind(String),

    #[error("bad extension mapping {0:?} (expected EXT=image or EXT=video)")]
    BadMapping(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FixError>;
