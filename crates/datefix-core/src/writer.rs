use std::fs;
use std::path::Path;

use filetime::FileTime;

use crate::error::Result;
use crate::sidecar::SidecarTimes;

/// Remove an existing output tree. Destructive runs call this before
/// anything is copied.
pub fn clear_output(dir: &Path) -> std::io::Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    Ok(())
}

/// Copy `src` to `dest`, creating parent directories as needed.
pub fn copy_media(src: &Path, dest: &Path) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(fs::copy(src, dest)?)
}

/// Set the copied file's modification and access times to
/// `photoLastModifiedTime`. Creation time has no portable setter and is
/// left to the filesystem.
pub fn apply_file_times(path: &Path, times: &SidecarTimes) -> Result<()> {
    let modified = FileTime::from_unix_time(times.modified()?, 0);
    filetime::set_file_times(path, modified, modified)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_copy_creates_parents() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.bin");
        fs::write(&src, b"payload").unwrap();

        let dest = dir.path().join("out/trip/src.bin");
        copy_media(&src, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"payload");
    }

    #[test]
    fn test_clear_output_missing_dir_is_fine() {
        let dir = tempdir().unwrap();
        clear_output(&dir.path().join("never-created")).unwrap();
    }

    #[test]
    fn test_apply_file_times() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("clip.mp4");
        fs::write(&file, b"x").unwrap();

        let times: SidecarTimes = serde_json::from_str(
            r#"{
                "creationTime": {"timestamp": "1609459200"},
                "photoTakenTime": {"timestamp": "1609459200"},
                "photoLastModifiedTime": {"timestamp": "1612137600"}
            }"#,
        )
        .unwrap();

        apply_file_times(&file, &times).unwrap();

        let meta = fs::metadata(&file).unwrap();
        let mtime = FileTime::from_last_modification_time(&meta);
        assert_eq!(mtime.unix_seconds(), 1612137600);
    }
}
