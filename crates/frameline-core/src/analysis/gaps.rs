use super::group::DeviceGroup;
use crate::error::SequenceError;
use crate::model::FileRecord;
use crate::sequence::parse_sequence_number;

/// Inclusive span of absent frame numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingRange {
    pub start: u64,
    pub end: u64,
}

impl MissingRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Number of frames in the span.
    pub fn count(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Expand ranges into the ascending list of missing numbers.
pub fn missing_numbers(ranges: &[MissingRange]) -> Vec<u64> {
    ranges.iter().flat_map(|r| r.start..=r.end).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapAnalysis {
    /// Ascending by sequence number. Ties keep their input order.
    pub sorted: Vec<FileRecord>,
    /// Gaps strictly between the first and last present, ascending and
    /// never adjacent to one another.
    pub missing: Vec<MissingRange>,
}

impl GapAnalysis {
    pub fn missing_numbers(&self) -> Vec<u64> {
        missing_numbers(&self.missing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    SinglePhoto(String),
    Sequence {
        first: String,
        last: String,
        missing: Vec<MissingRange>,
    },
}

impl GroupOutcome {
    pub fn has_gaps(&self) -> bool {
        matches!(self, GroupOutcome::Sequence { missing, .. } if !missing.is_empty())
    }
}

/// Sort `files` by frame number and collect the spans absent between
/// neighbours.
///
/// One malformed name aborts the whole group. Duplicate frame numbers sort
/// next to each other and produce no gap and no diagnostic.
pub fn detect_gaps(files: &[FileRecord]) -> Result<GapAnalysis, SequenceError> {
    let mut keyed = files
        .iter()
        .map(|f| parse_sequence_number(&f.file_name).map(|n| (n, f.clone())))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by_key(|(n, _)| *n);

    let mut missing = Vec::new();
    for pair in keyed.windows(2) {
        let (current, next) = (pair[0].0, pair[1].0);
        // current < u64::MAX whenever the difference exceeds one
        if next.saturating_sub(current) > 1 {
            missing.push(MissingRange::new(current + 1, next - 1));
        }
    }

    Ok(GapAnalysis {
        sorted: keyed.into_iter().map(|(_, f)| f).collect(),
        missing,
    })
}

/// Continuity outcome for one group. Single-file groups skip gap detection.
pub fn analyze_group(group: &DeviceGroup) -> Result<GroupOutcome, SequenceError> {
    if let [only] = group.files.as_slice() {
        return Ok(GroupOutcome::SinglePhoto(only.file_name.clone()));
    }

    let analysis = detect_gaps(&group.files)?;
    let first = analysis
        .sorted
        .first()
        .map(|f| f.file_name.clone())
        .unwrap_or_default();
    let last = analysis
        .sorted
        .last()
        .map(|f| f.file_name.clone())
        .unwrap_or_default();

    Ok(GroupOutcome::Sequence {
        first,
        last,
        missing: analysis.missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::group::group_records;
    use crate::model::DeviceIdentity;

    fn files(names: &[&str]) -> Vec<FileRecord> {
        names
            .iter()
            .map(|name| FileRecord {
                file_name: name.to_string(),
                extension: ".jpg".to_string(),
                device: DeviceIdentity::unknown(),
            })
            .collect()
    }

    #[test]
    fn test_detect_gaps() {
        let group = files(&[
            "IMG_0009.JPG",
            "IMG_0001.JPG",
            "IMG_0005.JPG",
            "IMG_0002.JPG",
            "IMG_0006.JPG",
            "IMG_0003.JPG",
        ]);
        let analysis = detect_gaps(&group).unwrap();
        assert_eq!(analysis.missing_numbers(), vec![4, 7, 8]);
        assert_eq!(
            analysis.missing,
            vec![MissingRange::new(4, 4), MissingRange::new(7, 8)]
        );
        assert_eq!(analysis.sorted.first().unwrap().file_name, "IMG_0001.JPG");
        assert_eq!(analysis.sorted.last().unwrap().file_name, "IMG_0009.JPG");
    }

    #[test]
    fn test_detect_gaps_contiguous_and_duplicates() {
        let analysis =
            detect_gaps(&files(&["A_0002.JPG", "A_0001.JPG", "B_0002.JPG", "A_0003.JPG"]))
                .unwrap();
        assert!(analysis.missing.is_empty());
        assert_eq!(analysis.sorted.len(), 4);
    }

    #[test]
    fn test_detect_gaps_malformed_aborts_group() {
        let err = detect_gaps(&files(&["IMG_0001.JPG", "cover.JPG"])).unwrap_err();
        assert_eq!(
            err,
            SequenceError::MalformedFileName {
                file_name: "cover.JPG".to_string()
            }
        );
    }

    #[test]
    fn test_analyze_group_single_photo_skips_parsing() {
        // a malformed name would fail gap detection, so this proves it is skipped
        let groups = group_records(files(&["cover.JPG"]));
        assert_eq!(
            analyze_group(&groups[0]),
            Ok(GroupOutcome::SinglePhoto("cover.JPG".to_string()))
        );
    }

    #[test]
    fn test_analyze_group_sequence() {
        let groups = group_records(files(&["IMG_0003.JPG", "IMG_0001.JPG"]));
        let outcome = analyze_group(&groups[0]).unwrap();
        assert!(outcome.has_gaps());
        assert_eq!(
            outcome,
            GroupOutcome::Sequence {
                first: "IMG_0001.JPG".to_string(),
                last: "IMG_0003.JPG".to_string(),
                missing: vec![MissingRange::new(2, 2)],
            }
        );
    }

    #[test]
    fn test_detect_gaps_at_u64_max() {
        let max = u64::MAX;
        let names = [
            format!("A{}.jpg", max),
            format!("B{}.jpg", max),
            format!("C{}.jpg", max - 2),
        ];
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let analysis = detect_gaps(&files(&refs)).unwrap();
        assert_eq!(analysis.missing, vec![MissingRange::new(max - 1, max - 1)]);
        assert_eq!(analysis.sorted.len(), 3);
    }

    #[test]
    fn test_detect_gaps_wide_jump_stays_compact() {
        let analysis = detect_gaps(&files(&[
            "PXL_20240312_091500456.jpg",
            "PXL_20240312_143000123.jpg",
        ]))
        .unwrap();
        assert_eq!(
            analysis.missing,
            vec![MissingRange::new(91500457, 143000122)]
        );
        assert_eq!(analysis.missing[0].count(), 51499666);
    }
}
