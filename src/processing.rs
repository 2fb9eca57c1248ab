use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::constants::{SUPPORTED_IMAGES, SUPPORTED_VIDEOS};
use crate::error::PhotowallError;
use crate::image_processing::{generate_thumbnails, load_image};
use crate::live_photo::{find_companion_video, video_url};
use crate::metadata::{read_image_record, ImageRecord};
use crate::settings::Settings;
use crate::utils::{ensure_directory_exists, file_name_lossy, file_stem_lossy, list_files_sorted, lowercase_extension};

/// How a source file is treated during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    /// Only consumed as a Live Photo companion
    Video,
    Ignored,
}

pub fn classify(path: &Path) -> FileKind {
    let ext = lowercase_extension(path);
    if SUPPORTED_IMAGES.contains(&ext.as_str()) {
        FileKind::Image
    } else if SUPPORTED_VIDEOS.contains(&ext.as_str()) {
        FileKind::Video
    } else {
        FileKind::Ignored
    }
}

/// Counts reported after a photo wall run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total_files: usize,
    pub images: usize,
    pub records: usize,
    pub live_photos: usize,
    pub thumbnail_failures: usize,
    pub manifest_path: PathBuf,
}

/// Scans the origin folder once, writes thumbnails for every image and
/// replaces the JSON manifest.
pub fn process_photowall(settings: &Settings) -> Result<RunSummary, PhotowallError> {
    let source_dir = settings.source_dir();
    let thumbnails_dir = settings.thumbnails_dir();
    let manifest_path = settings.manifest_path();

    println!("🔍 Scanning {}...", source_dir.display());
    if !source_dir.is_dir() {
        return Err(PhotowallError::SourceDirNotFound(source_dir));
    }

    let files = list_files_sorted(&source_dir);
    let total_files = files.len();
    let mut summary = RunSummary {
        total_files,
        manifest_path: manifest_path.clone(),
        ..Default::default()
    };
    let mut records: Vec<ImageRecord> = Vec::new();

    for (idx, path) in files.iter().enumerate() {
        match classify(path) {
            FileKind::Image => {}
            FileKind::Video | FileKind::Ignored => continue,
        }

        let name = file_name_lossy(path);
        println!("[{}/{}] Processing Image: {}", idx + 1, total_files, name);
        summary.images += 1;

        let Some(mut record) = read_image_record(path) else {
            continue;
        };

        let base_name = file_stem_lossy(path);
        let companion = path
            .file_stem()
            .and_then(|stem| find_companion_video(&source_dir, stem));
        if let Some(video_path) = companion {
            match video_url(&settings.public_url, &video_path) {
                Some(url) => {
                    println!("  Found Live Photo video: {}", file_name_lossy(&video_path));
                    record.video_src = Some(url);
                    summary.live_photos += 1;
                }
                None => tracing::warn!(
                    "Skipping Live Photo video {} for {}: file name is not valid UTF-8",
                    video_path.display(),
                    name
                ),
            }
        }
        records.push(record);

        let thumbnails = load_image(path)
            .and_then(|img| generate_thumbnails(&img, &base_name, &thumbnails_dir));
        if let Err(e) = thumbnails {
            tracing::error!("Error generating thumbnails for {}: {:#}", name, e);
            summary.thumbnail_failures += 1;
        }
    }

    write_manifest(&manifest_path, &records)?;
    summary.records = records.len();

    println!(
        "\n✅ Saved metadata for {} images to {}",
        records.len(),
        manifest_path.display()
    );
    if summary.thumbnail_failures > 0 {
        println!("   ⚠️  Thumbnails failed for {} image(s)", summary.thumbnail_failures);
    }

    Ok(summary)
}

/// Pretty JSON array, UTF-8, non-ASCII left unescaped. Replaces any existing file.
pub fn write_manifest(path: &Path, records: &[ImageRecord]) -> Result<(), PhotowallError> {
    let io_err = |source| PhotowallError::ManifestWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory_exists(parent).map_err(io_err)?;
    }

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_lowercase_extension() {
        assert_eq!(classify(Path::new("IMG_0001.HEIC")), FileKind::Image);
        assert_eq!(classify(Path::new("a.jpeg")), FileKind::Image);
        assert_eq!(classify(Path::new("a.WebP")), FileKind::Image);
        assert_eq!(classify(Path::new("IMG_0001.MOV")), FileKind::Video);
        assert_eq!(classify(Path::new("clip.webm")), FileKind::Video);
        assert_eq!(classify(Path::new(".DS_Store")), FileKind::Ignored);
        assert_eq!(classify(Path::new("notes.txt")), FileKind::Ignored);
    }

    #[test]
    fn manifest_keeps_non_ascii_and_indents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("images-metadata.json");
        let records = vec![ImageRecord {
            filename: "夏天.jpg".to_string(),
            width: 10,
            height: 20,
            size: 300,
            format: "JPEG".to_string(),
            date: "2025:07:01 08:00:00".to_string(),
            video_src: None,
        }];

        write_manifest(&path, &records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("夏天.jpg"));
        assert!(text.starts_with("[\n  {\n    \"filename\""));
        let parsed: Vec<ImageRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn empty_manifest_is_an_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("images-metadata.json");
        std::fs::write(&path, "stale contents").unwrap();

        write_manifest(&path, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
