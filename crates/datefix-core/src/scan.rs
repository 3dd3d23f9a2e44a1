use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::media::{ExtensionMap, MediaItem};
use crate::sidecar;

/// Everything the scan stage learned about the input tree.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Files with a handler, in stable traversal order.
    pub items: Vec<MediaItem>,
    /// Every extension observed (lowercased), handled or not.
    pub all_extensions: BTreeSet<String>,
    /// Extensions that were dispatched to a handler.
    pub handled_extensions: BTreeSet<String>,
    /// Files without a handler (unknown extension, or none at all).
    pub skipped: u64,
}

/// Walk the immediate album folders of `input_root` and dispatch each file
/// through `map`. Nested directories and stray files at the root level are
/// skipped. Failure to list a directory aborts the scan.
pub fn scan_albums(
    input_root: &Path,
    output_root: &Path,
    map: &ExtensionMap,
) -> anyhow::Result<ScanResult> {
    let mut result = ScanResult::default();

    let mut albums = fs::read_dir(input_root)
        .with_context(|| format!("cannot list input directory {}", input_root.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    albums.sort_by_key(|e| e.file_name());

    for album in albums {
        let album_path = album.path();
        if !album.file_type()?.is_dir() {
            log::debug!("skipping non-directory entry {}", album_path.display());
            continue;
        }

        let mut entries = fs::read_dir(&album_path)
            .with_context(|| format!("cannot list album folder {}", album_path.display()))?
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            if !entry.file_type()?.is_file() {
                log::debug!("skipping nested directory {}", path.display());
                continue;
            }

            let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
                log::debug!("no extension on {}", path.display());
                result.skipped += 1;
                continue;
            };
            let extension = extension.to_ascii_lowercase();
            result.all_extensions.insert(extension.clone());

            let Some(kind) = map.kind_for(&extension) else {
                result.skipped += 1;
                continue;
            };
            result.handled_extensions.insert(extension.clone());

            let output = mirror_path(input_root, output_root, &path);
            result.items.push(MediaItem {
                sidecar: sidecar::sidecar_path(&path),
                input: path,
                output,
                extension,
                kind,
            });
        }
    }

    Ok(result)
}

/// Substitute the input-root prefix of `file` with the output root.
pub fn mirror_path(input_root: &Path, output_root: &Path, file: &Path) -> PathBuf {
    match file.strip_prefix(input_root) {
        Ok(rel) => output_root.join(rel),
        Err(_) => output_root.join(file.file_name().unwrap_or_default()),
    }
}
