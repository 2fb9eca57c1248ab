use anyhow::Result;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads the EXIF block of any container kamadak-exif understands
/// (JPEG, HEIF, PNG, WebP, TIFF).
///
/// `Ok(None)` means the file has no EXIF block. Partially broken blocks
/// still yield whatever fields could be parsed.
pub fn read_exif(path: &Path) -> Result<Option<exif::Exif>> {
    let file = File::open(path)?;
    let mut buf_reader = BufReader::new(file);
    let mut exif_reader = exif::Reader::new();
    exif_reader.continue_on_error(true); // Tolerate non-standard EXIF structures

    match exif_reader.read_from_container(&mut buf_reader) {
        Ok(exif) => Ok(Some(exif)),
        Err(exif::Error::PartialResult(partial)) => {
            let (exif, errors) = partial.into_inner();
            tracing::debug!(
                "partial EXIF in {}: {} field error(s) ignored",
                path.display(),
                errors.len()
            );
            Ok(Some(exif))
        }
        Err(exif::Error::NotFound(_)) | Err(exif::Error::InvalidFormat(_)) => Ok(None),
        Err(e) => {
            tracing::debug!("unreadable EXIF in {}: {}", path.display(), e);
            Ok(None)
        }
    }
}
