use anyhow::{bail, Context, Result};
use image::ImageFormat;
use std::path::{Path, PathBuf};

use crate::constants::HEIC_EXTENSION;
use crate::image_processing::load_image;
use crate::utils::{file_name_lossy, list_files_sorted, lowercase_extension};

/// Outcome of one converter run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub converted: usize,
    pub failed: usize,
}

/// Decodes one HEIC file, writes `<stem>.png` next to it and removes the source.
pub fn convert_heic_to_png(heic_path: &Path) -> Result<PathBuf> {
    let png_path = heic_path.with_extension("png");

    let image = load_image(heic_path)?;
    image
        .save_with_format(&png_path, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", png_path.display()))?;

    std::fs::remove_file(heic_path)
        .with_context(|| format!("Failed to remove original HEIC file {}", heic_path.display()))?;

    Ok(png_path)
}

/// Converts every `.heic` file directly inside `directory` (any case) to PNG.
///
/// Per-file failures are logged and leave the original in place.
pub fn convert_directory(directory: &Path) -> Result<ConversionSummary> {
    if !directory.is_dir() {
        bail!("Directory {} does not exist", directory.display());
    }

    let mut summary = ConversionSummary::default();

    for heic_path in list_files_sorted(directory)
        .into_iter()
        .filter(|p| lowercase_extension(p) == HEIC_EXTENSION)
    {
        let filename = file_name_lossy(&heic_path);
        println!("Converting {} to PNG...", filename);

        match convert_heic_to_png(&heic_path) {
            Ok(png_path) => {
                println!("Saved {}", png_path.display());
                summary.converted += 1;
            }
            Err(e) => {
                tracing::error!("Failed to convert {}: {:#}", filename, e);
                summary.failed += 1;
            }
        }
    }

    println!("Conversion complete.");
    Ok(summary)
}
