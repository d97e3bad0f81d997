use super::{decode_ascii, maker_note, MetadataExtractor, Strategy};
use crate::model::{lowercase_extension, DeviceIdentity};
use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, error, trace};

/// Production extractor backed by `kamadak-exif`.
///
/// Holds no state; one instance is shared by every worker of a scan.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifExtractor;

impl ExifExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Identity plus the strategy that produced it. Used by `inspect`.
    pub fn extract_with_strategy(&self, path: &Path) -> (DeviceIdentity, Strategy) {
        let extension = lowercase_extension(path);
        let strategy = Strategy::for_extension(&extension);

        let exif = match read_exif(path) {
            Ok(exif) => exif,
            Err(err) => {
                log_read_error(path, &err);
                return (DeviceIdentity::unknown(), strategy);
            }
        };

        let identity = match strategy {
            Strategy::Standard => standard_identity(&exif),
            Strategy::MakerNote => maker_note_identity(&exif),
        };
        trace!("{}: {} via {:?}", path.display(), identity, strategy);
        (identity, strategy)
    }
}

impl MetadataExtractor for ExifExtractor {
    fn extract(&self, path: &Path) -> DeviceIdentity {
        self.extract_with_strategy(path).0
    }
}

fn read_exif(path: &Path) -> Result<Exif, exif::Error> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    Reader::new().read_from_container(&mut reader)
}

fn log_read_error(path: &Path, err: &exif::Error) {
    match err {
        exif::Error::NotFound(_) | exif::Error::NotSupported(_) | exif::Error::BlankValue(_) => {
            debug!("No EXIF data in {}: {}", path.display(), err);
        }
        _ => {
            error!("Error reading EXIF data from {}: {}", path.display(), err);
        }
    }
}

fn standard_identity(exif: &Exif) -> DeviceIdentity {
    DeviceIdentity::from_parts(
        ascii_field(exif, Tag::Model),
        ascii_field(exif, Tag::BodySerialNumber),
    )
}

/// Sony bodies keep the serial in their maker note. When the make is Sony
/// that tag is the only serial source; the generic tag is ignored.
fn maker_note_identity(exif: &Exif) -> DeviceIdentity {
    let model = ascii_field(exif, Tag::Model);
    let is_sony = ascii_field(exif, Tag::Make)
        .map(|make| make.to_ascii_lowercase().contains("sony"))
        .unwrap_or(false);

    let serial = if is_sony {
        sony_maker_note_serial(exif)
    } else {
        ascii_field(exif, Tag::BodySerialNumber)
    };

    DeviceIdentity::from_parts(model, serial)
}

fn sony_maker_note_serial(exif: &Exif) -> Option<String> {
    let field = exif.get_field(Tag::MakerNote, In::PRIMARY)?;
    match field.value {
        Value::Undefined(_, offset) => {
            maker_note::sony_serial(exif.buf(), offset as usize, exif.little_endian())
        }
        _ => None,
    }
}

fn ascii_field(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match field.value {
        Value::Ascii(ref values) => values.iter().find_map(|v| decode_ascii(v)),
        _ => None,
    }
}
