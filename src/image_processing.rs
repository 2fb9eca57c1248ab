use anyhow::{anyhow, bail, Context, Result};

use crate::constants::*;
use crate::utils::ensure_directory_exists;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

// ISO-BMFF major brands produced by HEIF/HEIC encoders
const HEIF_BRANDS: &[&[u8; 4]] = &[b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"mif1", b"msf1"];

/// Container formats the processor can read, detected from file content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    WebP,
    Heif,
}

impl SourceFormat {
    /// Detects the format from the first bytes of the file
    pub fn sniff(path: &Path) -> Result<Self> {
        let mut header = Vec::with_capacity(32);
        File::open(path)?.take(32).read_to_end(&mut header)?;
        Self::from_header(&header)
            .ok_or_else(|| anyhow!("Unrecognised image format: {}", path.display()))
    }

    pub fn from_header(header: &[u8]) -> Option<Self> {
        if header.len() >= 12
            && &header[4..8] == b"ftyp"
            && HEIF_BRANDS.iter().any(|brand| &header[8..12] == brand.as_slice())
        {
            return Some(SourceFormat::Heif);
        }

        match image::guess_format(header).ok()? {
            ImageFormat::Jpeg => Some(SourceFormat::Jpeg),
            ImageFormat::Png => Some(SourceFormat::Png),
            ImageFormat::WebP => Some(SourceFormat::WebP),
            _ => None,
        }
    }

    /// Upper-case name written to the manifest
    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Jpeg => "JPEG",
            SourceFormat::Png => "PNG",
            SourceFormat::WebP => "WEBP",
            SourceFormat::Heif => "HEIF",
        }
    }

    fn image_format(&self) -> Option<ImageFormat> {
        match self {
            SourceFormat::Jpeg => Some(ImageFormat::Jpeg),
            SourceFormat::Png => Some(ImageFormat::Png),
            SourceFormat::WebP => Some(ImageFormat::WebP),
            SourceFormat::Heif => None,
        }
    }
}

// libheif only accepts UTF-8 file names
fn heif_path(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow!("Non UTF-8 path: {}", path.display()))
}

/// Width and height from the header, without decoding pixels
pub fn image_dimensions(path: &Path, format: SourceFormat) -> Result<(u32, u32)> {
    match format.image_format() {
        Some(image_format) => {
            let reader = ImageReader::with_format(BufReader::new(File::open(path)?), image_format);
            reader
                .into_dimensions()
                .with_context(|| format!("Failed to read image header: {}", path.display()))
        }
        None => {
            let ctx = HeifContext::read_from_file(heif_path(path)?)
                .map_err(|e| anyhow!("Failed to read HEIF context: {}", e))?;
            let handle = ctx
                .primary_image_handle()
                .map_err(|e| anyhow!("Failed to get primary image handle: {}", e))?;
            Ok((handle.width(), handle.height()))
        }
    }
}

fn decode_heif(path: &Path) -> Result<DynamicImage> {
    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_file(heif_path(path)?)
        .map_err(|e| anyhow!("Failed to read HEIF context: {}", e))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| anyhow!("Failed to get primary image handle: {}", e))?;

    let has_alpha = handle.has_alpha_channel();
    let (chroma, channels) = if has_alpha {
        (RgbChroma::Rgba, 4)
    } else {
        (RgbChroma::Rgb, 3)
    };

    let image = lib_heif
        .decode(&handle, ColorSpace::Rgb(chroma), None)
        .map_err(|e| anyhow!("Failed to decode HEIF image: {}", e))?;
    let planes = image.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| anyhow!("Decoded HEIF image has no interleaved plane"))?;

    let width = plane.width as u32;
    let height = plane.height as u32;
    let row_len = width as usize * channels;
    let stride = plane.stride as usize;

    // Rows may be padded past `row_len`
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in plane.data.chunks(stride).take(height as usize) {
        pixels.extend_from_slice(&row[..row_len]);
    }

    let decoded = if has_alpha {
        image::RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8)
    } else {
        RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8)
    };
    decoded.ok_or_else(|| anyhow!("HEIF pixel buffer does not match {}x{}", width, height))
}

/// Decodes an image by content: HEIF through libheif, everything else through `image`
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let format = SourceFormat::sniff(path)?;
    match format.image_format() {
        Some(image_format) => {
            let reader = ImageReader::with_format(BufReader::new(File::open(path)?), image_format);
            reader
                .decode()
                .with_context(|| format!("Failed to decode image: {}", path.display()))
        }
        None => decode_heif(path)
            .with_context(|| format!("Failed to decode HEIF image: {}", path.display())),
    }
}

/// Thumbnail size classes, in processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailTier {
    Tiny,
    Medium,
    Full,
}

impl ThumbnailTier {
    pub const ALL: [ThumbnailTier; 3] = [ThumbnailTier::Tiny, ThumbnailTier::Medium, ThumbnailTier::Full];

    /// Target height in pixels
    pub fn height(&self) -> u32 {
        match self {
            ThumbnailTier::Tiny => TINY_HEIGHT,
            ThumbnailTier::Medium => MEDIUM_HEIGHT,
            ThumbnailTier::Full => FULL_HEIGHT,
        }
    }

    /// Output folder name
    pub fn name(&self) -> &'static str {
        match self {
            ThumbnailTier::Tiny => "tiny",
            ThumbnailTier::Medium => "medium",
            ThumbnailTier::Full => "full",
        }
    }

    pub fn quality(&self) -> i32 {
        match self {
            ThumbnailTier::Tiny => TINY_QUALITY,
            ThumbnailTier::Medium | ThumbnailTier::Full => DEFAULT_QUALITY,
        }
    }
}

pub fn thumbnail_path(thumbnails_dir: &Path, tier: ThumbnailTier, base_name: &str) -> PathBuf {
    thumbnails_dir.join(tier.name()).join(format!("{}.jpg", base_name))
}

/// Downscales to the tier height preserving aspect ratio; never upscales.
pub fn scale_for_tier(img: &RgbImage, tier: ThumbnailTier) -> Cow<'_, RgbImage> {
    let (width, height) = img.dimensions();
    let target_height = tier.height();
    if height <= target_height {
        return Cow::Borrowed(img);
    }

    let new_width = ((width as u64 * target_height as u64) / height as u64).max(1) as u32;
    Cow::Owned(image::imageops::resize(img, new_width, target_height, FilterType::Lanczos3))
}

/// Encodes RGB pixels as an optimized 4:2:0 JPEG
pub fn encode_jpeg(img: &RgbImage, quality: i32) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();

    let mut compressor = turbojpeg::Compressor::new()?;
    compressor.set_quality(quality)?;
    compressor.set_subsamp(turbojpeg::Subsamp::Sub2x2)?;
    compressor.set_optimize(true)?;

    let image = turbojpeg::Image {
        pixels: img.as_raw().as_slice(),
        width: width as usize,
        pitch: width as usize * 3,
        height: height as usize,
        format: turbojpeg::PixelFormat::RGB,
    };
    compressor
        .compress_to_vec(image)
        .with_context(|| "Failed to compress image with turbojpeg")
}

/// Writes `<thumbnails_dir>/<tier>/<base_name>.jpg` for every tier.
/// Stops at the first failing tier.
pub fn generate_thumbnails(img: &DynamicImage, base_name: &str, thumbnails_dir: &Path) -> Result<Vec<PathBuf>> {
    if img.width() == 0 || img.height() == 0 {
        bail!("Image has no pixels");
    }

    // JPEG has no alpha or palette; flatten once for all tiers
    let rgb = img.to_rgb8();
    let mut written = Vec::with_capacity(ThumbnailTier::ALL.len());

    for tier in ThumbnailTier::ALL {
        let output_folder = thumbnails_dir.join(tier.name());
        ensure_directory_exists(&output_folder)
            .with_context(|| format!("Failed to create {}", output_folder.display()))?;

        let scaled = scale_for_tier(&rgb, tier);
        let jpeg = encode_jpeg(&scaled, tier.quality())?;

        let output_path = thumbnail_path(thumbnails_dir, tier, base_name);
        std::fs::write(&output_path, jpeg)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        tracing::debug!(
            "{} thumbnail {}x{} -> {}",
            tier.name(),
            scaled.width(),
            scaled.height(),
            output_path.display()
        );
        written.push(output_path);
    }

    Ok(written)
}
