//! Batch pre-processing for a static photo wall.
//!
//! Two independent jobs share this crate: the photo wall processor
//! ([`processing::process_photowall`]) and the HEIC-to-PNG converter
//! ([`heic_converter::convert_directory`]).

pub mod constants;
pub mod error;
pub mod exif_parser;
pub mod heic_converter;
pub mod image_processing;
pub mod live_photo;
pub mod metadata;
pub mod processing;
pub mod settings;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use error::PhotowallError;
pub use metadata::ImageRecord;
pub use processing::{process_photowall, RunSummary};
pub use settings::Settings;
