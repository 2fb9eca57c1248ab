//! Live Photo pairing: a still image and a short video sharing a file stem,
//! e.g. `IMG_0001.heic` + `IMG_0001.mov`.
//!
//! The video is never processed on its own; it is only referenced from the
//! image's manifest record.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::constants::SUPPORTED_VIDEOS;

/// First existing `<stem>.<ext>` in `source_dir` for the video extensions in
/// declaration order. Each extension is tried lower-case, then upper-case.
/// The stem is matched byte for byte, so non UTF-8 names pair too.
pub fn find_companion_video(source_dir: &Path, base_name: &OsStr) -> Option<PathBuf> {
    SUPPORTED_VIDEOS
        .iter()
        .flat_map(|ext| [ext.to_string(), ext.to_uppercase()])
        .map(|ext| {
            let mut name = OsString::from(base_name);
            name.push(".");
            name.push(ext);
            source_dir.join(name)
        })
        .find(|candidate| candidate.is_file())
}

/// Root-relative URL of a companion video served from `public_url`.
/// `None` when the file name is not valid UTF-8.
pub fn video_url(public_url: &str, video_path: &Path) -> Option<String> {
    let name = video_path.file_name()?.to_str()?;
    Some(format!("{}/{}", public_url.trim_end_matches('/'), name))
}
