use exif::{In, Tag, Value};

/// Capture timestamp tags, most specific first
pub const DATE_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

/// Returns the first non-empty timestamp among [`DATE_TAGS`].
///
/// The value is passed through as stored (normally `YYYY:MM:DD HH:MM:SS`);
/// only trailing NUL padding is stripped. Blank text still counts as a value.
pub fn get_datetime_from_exif(exif: &exif::Exif) -> Option<String> {
    DATE_TAGS.iter().find_map(|&tag| {
        let field = exif.get_field(tag, In::PRIMARY)?;
        let Value::Ascii(ref vec) = field.value else {
            return None;
        };
        let raw = vec.first()?;
        let text = String::from_utf8_lossy(raw);
        let text = text.trim_end_matches('\0');
        (!text.is_empty()).then(|| text.to_string())
    })
}
