use crate::error::SequenceError;
use regex::Regex;

lazy_static::lazy_static! {
    static ref SEQUENCE_RE: Regex =
        Regex::new(r"(\d+)\.\w+$").expect("sequence pattern is valid");
    static ref PREFIX_RE: Regex = Regex::new(r"^(\D+)").expect("prefix pattern is valid");
}

/// Frame number from the digit run immediately before the extension.
///
/// `IMG_0143.ARW` → `143`. Names without such a run, or whose run does not fit
/// in a `u64`, are malformed.
pub fn parse_sequence_number(file_name: &str) -> Result<u64, SequenceError> {
    SEQUENCE_RE
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .ok_or_else(|| SequenceError::MalformedFileName {
            file_name: file_name.to_string(),
        })
}

/// Everything before the first digit. Cosmetic only, never used for grouping.
pub fn file_prefix(file_name: &str) -> Option<&str> {
    PREFIX_RE
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sequence_number() {
        assert_eq!(parse_sequence_number("IMG_0143.ARW"), Ok(143));
        assert_eq!(parse_sequence_number("DSC00001.jpg"), Ok(1));
        assert_eq!(parse_sequence_number("0007.nef"), Ok(7));
        assert_eq!(parse_sequence_number("shoot2_IMG_0099.CR2"), Ok(99));
    }

    #[test]
    fn test_parse_sequence_number_malformed() {
        for name in ["IMG_.JPG", "IMG_0001", "0001_edit.jpg", "cover.png"] {
            assert_eq!(
                parse_sequence_number(name),
                Err(SequenceError::MalformedFileName {
                    file_name: name.to_string()
                }),
                "expected {} to be malformed",
                name
            );
        }
    }

    #[test]
    fn test_parse_sequence_number_overflow() {
        assert!(parse_sequence_number("IMG_99999999999999999999999.JPG").is_err());
    }

    #[test]
    fn test_file_prefix() {
        assert_eq!(file_prefix("IMG_0001.JPG"), Some("IMG_"));
        assert_eq!(file_prefix("DSC05057.ARW"), Some("DSC"));
        assert_eq!(file_prefix("0001.JPG"), None);
    }
}
