pub mod error;
pub mod exif;
pub mod media;
pub mod scan;
pub mod sidecar;
pub mod writer;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::FixError;
use crate::media::{ExtensionMap, MediaItem, MediaKind};

/// Sidecars are expected next to media files and never warned about.
const SIDECAR_EXTENSION: &str = "json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessOptions {
    /// Directory of album folders.
    pub input: PathBuf,
    /// Mirrored output directory.
    pub output: PathBuf,
    /// Delete an existing output tree before processing.
    pub clean: bool,
    /// Extension mapping overrides, `"ext=image"` / `"ext=video"`.
    #[serde(default)]
    pub extension_overrides: Vec<String>,
}

/// One recorded per-file failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Files that had a handler for their extension.
    pub total_media: u64,
    /// Copied with timestamps rewritten.
    pub fixed: u64,
    /// Copied, but the metadata step failed; the copy keeps its original
    /// metadata.
    pub copied_only: u64,
    /// Files whose copy itself failed.
    pub copy_failed: u64,
    /// Files with no handler for their extension.
    pub skipped: u64,
    pub handled_extensions: BTreeSet<String>,
    /// Observed but unhandled extensions (the sidecar extension excluded).
    pub unhandled_extensions: BTreeSet<String>,
    pub failures: Vec<FileFailure>,
}

/// Type alias for progress callback
pub type ProgressCallback = dyn Fn(&str, u64, u64, &str) + Send + Sync;

/// Throttled progress reporter. Emits at most every 200ms, always on
/// completion.
pub struct ThrottledProgress<'a> {
    inner: &'a ProgressCallback,
    last_emit: std::sync::Mutex<Instant>,
}

impl<'a> ThrottledProgress<'a> {
    pub fn new(inner: &'a ProgressCallback) -> Self {
        Self {
            inner,
            last_emit: std::sync::Mutex::new(Instant::now() - std::time::Duration::from_secs(1)),
        }
    }

    pub fn report(&self, stage: &str, current: u64, total: u64, message: &str) {
        let is_done = current + 1 >= total;
        if !is_done {
            let mut last = self.last_emit.lock().unwrap();
            if last.elapsed().as_millis() < 200 {
                return;
            }
            *last = Instant::now();
        }
        (self.inner)(stage, current, total, message);
    }
}

/// Run the full pipeline with progress reporting: clean the output tree,
/// scan album folders, then copy each media file and rewrite its
/// timestamps from the sidecar. Per-file failures are recorded in the
/// result; failures outside per-file processing abort the run.
pub fn process(
    options: &ProcessOptions,
    progress_callback: &ProgressCallback,
) -> anyhow::Result<ProcessResult> {
    let tp = ThrottledProgress::new(progress_callback);

    let map = ExtensionMap::with_overrides(&options.extension_overrides)?;

    if options.clean {
        writer::clear_output(&options.output).with_context(|| {
            format!("cannot clear output directory {}", options.output.display())
        })?;
    }

    // Stage 1: Scan album folders
    let scanned = scan::scan_albums(&options.input, &options.output, &map)?;
    let total = scanned.items.len() as u64;
    tp.report("scan", total, total, "album folders scanned");

    let unhandled_extensions: BTreeSet<String> = scanned
        .all_extensions
        .iter()
        .filter(|e| {
            !scanned.handled_extensions.contains(*e) && e.as_str() != SIDECAR_EXTENSION
        })
        .cloned()
        .collect();

    let mut result = ProcessResult {
        total_media: total,
        skipped: scanned.skipped,
        handled_extensions: scanned.handled_extensions,
        unhandled_extensions,
        ..Default::default()
    };

    // Stage 2: Copy and rewrite timestamps, one file at a time
    for (i, item) in scanned.items.iter().enumerate() {
        tp.report("fix", i as u64, total, &item.input.display().to_string());
        log::debug!("{} -> {}", item.input.display(), item.output.display());

        if let Err(e) = writer::copy_media(&item.input, &item.output) {
            log::error!("{}: {}", item.input.display(), e);
            result.copy_failed += 1;
            result.failures.push(FileFailure {
                path: item.input.clone(),
                reason: e.to_string(),
            });
            continue;
        }

        match apply_metadata(item) {
            Ok(()) => result.fixed += 1,
            Err(e) => {
                log::error!("{}: {}", item.input.display(), e);
                result.copied_only += 1;
                result.failures.push(FileFailure {
                    path: item.input.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    tp.report("fix", total, total, "timestamps rewritten");

    Ok(result)
}

/// Load the sidecar and rewrite the copied file's timestamps by kind.
fn apply_metadata(item: &MediaItem) -> std::result::Result<(), FixError> {
    let times = sidecar::SidecarTimes::load(&item.sidecar)?;

    match item.kind {
        MediaKind::Image => {
            if log::log_enabled!(log::Level::Debug) {
                for (tag, value) in exif::current_datetimes(&item.output) {
                    log::debug!("{}: current {} = {}", item.output.display(), tag, value);
                }
            }
            exif::write_datetimes(&item.output, &times)
        }
        MediaKind::Video => writer::apply_file_times(&item.output, &times),
    }
}
