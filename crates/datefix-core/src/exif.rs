use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{In, Tag};
use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata;

use crate::error::{FixError, Result};
use crate::sidecar::SidecarTimes;

/// Current EXIF datetime tags of `path`, for logging before the rewrite.
/// Unreadable containers simply yield nothing.
pub fn current_datetimes(path: &Path) -> Vec<(Tag, String)> {
    let Ok(file) = File::open(path) else {
        return Vec::new();
    };
    let Ok(reader) = exif::Reader::new().read_from_container(&mut BufReader::new(file)) else {
        return Vec::new();
    };

    [Tag::DateTime, Tag::DateTimeOriginal, Tag::DateTimeDigitized]
        .into_iter()
        .filter_map(|tag| {
            reader
                .get_field(tag, In::PRIMARY)
                .map(|field| (tag, field.display_value().to_string()))
        })
        .collect()
}

/// Overwrite the three EXIF datetime tags in the copied file:
/// `DateTime` <- photoLastModifiedTime, `DateTimeOriginal` <- photoTakenTime,
/// `DateTimeDigitized` <- creationTime. The file bytes are rewritten in
/// place; a file without a parseable EXIF segment gets a fresh one.
pub fn write_datetimes(path: &Path, times: &SidecarTimes) -> Result<()> {
    let mut metadata = Metadata::new_from_path(path).unwrap_or_else(|_| Metadata::new());

    metadata.set_tag(ExifTag::ModifyDate(times.modified_exif()?));
    metadata.set_tag(ExifTag::DateTimeOriginal(times.taken_exif()?));
    metadata.set_tag(ExifTag::CreateDate(times.created_exif()?));

    metadata
        .write_to_file(path)
        .map_err(|e| FixError::ExifWrite(e.to_string()))
}
