use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::constants::DATE_FORMAT;
use crate::exif_parser::{get_datetime_from_exif, read_exif};
use crate::image_processing::{image_dimensions, SourceFormat};
use crate::utils::file_name_lossy;

/// One manifest entry per processed image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub size: u64, // bytes
    pub format: String,
    pub date: String, // "YYYY:MM:DD HH:MM:SS"
    #[serde(rename = "videoSrc", default, skip_serializing_if = "Option::is_none")]
    pub video_src: Option<String>,
}

/// Formats a filesystem timestamp the way EXIF stores capture dates, in local time
pub fn format_system_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(DATE_FORMAT).to_string()
}

/// Reads dimensions, size, format and capture date of one image.
///
/// The date comes from EXIF (`DateTimeOriginal`, `DateTimeDigitized`,
/// `DateTime`, first non-empty wins) or else from the file's mtime.
pub fn extract_metadata(path: &Path) -> Result<ImageRecord> {
    let format = SourceFormat::sniff(path)?;
    let (width, height) = image_dimensions(path, format)?;

    let file_meta = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?;

    let exif_date = match read_exif(path) {
        Ok(Some(exif)) => get_datetime_from_exif(&exif),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!("EXIF read failed for {}: {}", path.display(), e);
            None
        }
    };

    let date = match exif_date {
        Some(date) => date,
        None => format_system_time(
            file_meta
                .modified()
                .with_context(|| format!("No modification time for {}", path.display()))?,
        ),
    };

    Ok(ImageRecord {
        filename: file_name_lossy(path),
        width,
        height,
        size: file_meta.len(),
        format: format.name().to_string(),
        date,
        video_src: None,
    })
}

/// [`extract_metadata`] that logs the failure and yields `None`
pub fn read_image_record(path: &Path) -> Option<ImageRecord> {
    match extract_metadata(path) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::error!("Error reading metadata for {}: {:#}", file_name_lossy(path), e);
            None
        }
    }
}
