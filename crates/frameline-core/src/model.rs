use std::fmt;
use std::path::Path;

pub const UNKNOWN_MODEL: &str = "Unknown Model";
pub const UNKNOWN_SERIAL: &str = "Unknown Serial Number";

/// Lower-cased extension with its leading dot, or `""` when there is none.
pub fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// The (model, serial number) pair identifying a physical capture device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceIdentity {
    pub model: String,
    pub serial_number: String,
}

impl DeviceIdentity {
    pub fn new(model: impl Into<String>, serial_number: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            serial_number: serial_number.into(),
        }
    }

    /// Sentinel identity used whenever metadata cannot be read.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_MODEL, UNKNOWN_SERIAL)
    }

    /// Builds an identity from optional tag values, substituting sentinels.
    pub fn from_parts(model: Option<String>, serial_number: Option<String>) -> Self {
        Self {
            model: model.unwrap_or_else(|| UNKNOWN_MODEL.to_string()),
            serial_number: serial_number.unwrap_or_else(|| UNKNOWN_SERIAL.to_string()),
        }
    }

    /// True only when both model and serial are sentinels.
    pub fn is_unknown(&self) -> bool {
        self.model == UNKNOWN_MODEL && self.serial_number == UNKNOWN_SERIAL
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.model, self.serial_number)
    }
}

/// One entry per eligible file found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Base name, extension included.
    pub file_name: String,
    /// Lower-cased, leading dot included.
    pub extension: String,
    pub device: DeviceIdentity,
}

impl FileRecord {
    pub fn group_key(&self) -> DeviceGroupKey {
        DeviceGroupKey {
            device: self.device.clone(),
            extension: self.extension.clone(),
        }
    }
}

/// Files share a group iff model, serial and extension are all equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceGroupKey {
    pub device: DeviceIdentity,
    pub extension: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_extension() {
        assert_eq!(lowercase_extension(Path::new("/a/IMG_0001.JPG")), ".jpg");
        assert_eq!(lowercase_extension(Path::new("DSC0001.ArW")), ".arw");
        assert_eq!(lowercase_extension(Path::new("README")), "");
    }

    #[test]
    fn test_unknown_identity() {
        assert!(DeviceIdentity::unknown().is_unknown());
        assert!(DeviceIdentity::from_parts(None, None).is_unknown());
        assert!(!DeviceIdentity::from_parts(Some("ILCE-7M3".into()), None).is_unknown());
        assert!(!DeviceIdentity::from_parts(None, Some("12345".into())).is_unknown());
    }

    #[test]
    fn test_group_key_includes_extension() {
        let jpg = FileRecord {
            file_name: "DSC00001.JPG".into(),
            extension: ".jpg".into(),
            device: DeviceIdentity::new("ILCE-7M3", "1"),
        };
        let arw = FileRecord {
            file_name: "DSC00001.ARW".into(),
            extension: ".arw".into(),
            device: DeviceIdentity::new("ILCE-7M3", "1"),
        };
        assert_ne!(jpg.group_key(), arw.group_key());
    }
}
