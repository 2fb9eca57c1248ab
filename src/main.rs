use anyhow::Result;
use std::process::ExitCode;

use photowall_processor::{process_photowall, PhotowallError, Settings};

fn main() -> Result<ExitCode> {
    photowall_processor::utils::init_logging();

    let settings = Settings::load()?;
    tracing::debug!("settings: {:?}", settings);

    match process_photowall(&settings) {
        Ok(summary) => {
            tracing::info!(
                "{} files scanned, {} images, {} records, {} Live Photos",
                summary.total_files,
                summary.images,
                summary.records,
                summary.live_photos
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ PhotowallError::SourceDirNotFound(_)) => {
            println!("❌ {}", e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
