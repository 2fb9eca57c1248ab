pub mod generic;
pub mod reader;

pub use generic::{get_datetime_from_exif, DATE_TAGS};
pub use reader::read_exif;
