use anyhow::Result;
use std::process::ExitCode;

use photowall_processor::heic_converter::convert_directory;
use photowall_processor::Settings;

fn main() -> Result<ExitCode> {
    photowall_processor::utils::init_logging();

    let settings = Settings::load()?;
    match convert_directory(&settings.heic_dir) {
        Ok(summary) => {
            if summary.failed > 0 {
                tracing::warn!("{} file(s) could not be converted", summary.failed);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("❌ {:#}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
