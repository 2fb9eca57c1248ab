// Directory layout under the photo wall base directory
pub const ORIGIN_DIR_NAME: &str = "origin";
pub const THUMBNAILS_DIR_NAME: &str = "thumbnails";
pub const MANIFEST_FILE_NAME: &str = "images-metadata.json";

// Default locations, relative to the working directory
pub const DEFAULT_BASE_DIR: &str = "public/photowall";
pub const DEFAULT_HEIC_DIR: &str = "public/images/2025-summary";
pub const DEFAULT_PUBLIC_URL: &str = "/photowall/origin";

pub const SETTINGS_FILE_NAME: &str = "photowall.ini";

// Thumbnail target heights in pixels
pub const TINY_HEIGHT: u32 = 50;
pub const MEDIUM_HEIGHT: u32 = 400;
pub const FULL_HEIGHT: u32 = 2560;

// JPEG quality per tier
pub const TINY_QUALITY: i32 = 60;
pub const DEFAULT_QUALITY: i32 = 85;

// Lower-case extensions, without the dot
pub const SUPPORTED_IMAGES: &[&str] = &["jpg", "jpeg", "png", "webp", "heic", "heif"];
// Lookup order for Live Photo companions
pub const SUPPORTED_VIDEOS: &[&str] = &["mov", "mp4", "webm"];

pub const HEIC_EXTENSION: &str = "heic";

// Exif timestamp layout, also used for the mtime fallback
pub const DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
