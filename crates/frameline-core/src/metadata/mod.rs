use crate::model::DeviceIdentity;
use std::path::Path;

mod exif_reader;
pub mod maker_note;

pub use exif_reader::ExifExtractor;

/// Extensions read with the maker-note strategy. Everything else eligible
/// goes through the standard strategy.
pub const MAKER_NOTE_EXTENSIONS: &[&str] = &[".raw", ".nef", ".cr2", ".arw", ".dng", ".tiff"];

/// Best-effort device identity for one file.
///
/// Implementations never fail: unreadable or absent metadata yields
/// [`DeviceIdentity::unknown`] and is logged.
pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> DeviceIdentity;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Embedded tag dictionary: `Model` and `BodySerialNumber`.
    Standard,
    /// Raw tag stream with vendor maker-note overrides.
    MakerNote,
}

impl Strategy {
    /// `extension` is expected lower-cased with its leading dot.
    pub fn for_extension(extension: &str) -> Self {
        if MAKER_NOTE_EXTENSIONS.contains(&extension) {
            Strategy::MakerNote
        } else {
            Strategy::Standard
        }
    }
}

/// Lossy text of an EXIF ASCII value with NULs and surrounding whitespace
/// trimmed. Empty values count as absent.
pub(crate) fn decode_ascii(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    let trimmed = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
