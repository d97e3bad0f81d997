use crate::analysis::{GroupOutcome, MissingRange};
use crate::error::SequenceError;
use crate::model::{DeviceGroupKey, DeviceIdentity};

pub const NO_IMAGE_FILES: &str = "No image files found.";

/// Continuity result for one device group, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub key: DeviceGroupKey,
    pub file_count: usize,
    pub outcome: Result<GroupOutcome, SequenceError>,
}

impl GroupReport {
    /// Gaps found, or the group could not be ordered at all.
    pub fn is_incomplete(&self) -> bool {
        match &self.outcome {
            Ok(outcome) => outcome.has_gaps(),
            Err(_) => true,
        }
    }

    pub fn render(&self) -> Vec<String> {
        render_group(&self.key.device, &self.outcome)
    }
}

/// Compress ascending missing numbers into `", "`-joined tokens.
///
/// Numbers are zero-padded to four digits. A run of one renders as `0004`, a
/// run of two as two separate tokens `0007, 0008`, and a longer run as
/// `0010-0012`.
pub fn format_missing(missing: &[u64]) -> String {
    let mut ranges: Vec<MissingRange> = Vec::new();
    for &number in missing {
        if let Some(run) = ranges.last_mut() {
            if run.end.checked_add(1) == Some(number) {
                run.end = number;
                continue;
            }
        }
        ranges.push(MissingRange::new(number, number));
    }
    format_ranges(&ranges)
}

/// Same rendering as [`format_missing`] for already-compressed spans.
pub fn format_ranges(ranges: &[MissingRange]) -> String {
    if ranges.is_empty() {
        return "none".to_string();
    }

    let mut tokens = Vec::new();
    for range in ranges {
        push_run(&mut tokens, range.start, range.end);
    }
    tokens.join(", ")
}

fn push_run(tokens: &mut Vec<String>, start: u64, end: u64) {
    if end == start {
        tokens.push(format!("{:04}", start));
    } else if end - start == 1 {
        tokens.push(format!("{:04}", start));
        tokens.push(format!("{:04}", end));
    } else {
        tokens.push(format!("{:04}-{:04}", start, end));
    }
}

fn sequence_line(first: &str, last: &str, missing: &[MissingRange]) -> String {
    if missing.is_empty() {
        format!(
            "First checked file: {} --> last checked file: {} ==== no files missing",
            first, last
        )
    } else {
        format!(
            "First checked file: {} --> last checked file: {} ==== missing files: {}",
            first,
            last,
            format_ranges(missing)
        )
    }
}

/// Report lines for one group.
///
/// Known devices get a header line with the detail indented by one space.
/// Unknown devices get the detail line alone.
pub fn render_group(
    device: &DeviceIdentity,
    outcome: &Result<GroupOutcome, SequenceError>,
) -> Vec<String> {
    if device.is_unknown() {
        let line = match outcome {
            Ok(GroupOutcome::SinglePhoto(file)) => {
                format!("Only one photo available named {}", file)
            }
            Ok(GroupOutcome::Sequence {
                first,
                last,
                missing,
            }) => sequence_line(first, last, missing),
            Err(err) => format!("Could not order files: {}", err),
        };
        return vec![line];
    }

    let header = format!(
        "Checking files from device \"{}\" with serial number \"{}\":",
        device.model, device.serial_number
    );
    let detail = match outcome {
        Ok(GroupOutcome::SinglePhoto(file)) => {
            format!(" only one photo available named {}", file)
        }
        Ok(GroupOutcome::Sequence {
            first,
            last,
            missing,
        }) => format!(" {}", sequence_line(first, last, missing)),
        Err(err) => format!(" Could not order files: {}", err),
    };
    vec![header, detail]
}

/// Full multi-line report. An empty slice means no eligible files.
pub fn render_report(groups: &[GroupReport]) -> String {
    if groups.is_empty() {
        return NO_IMAGE_FILES.to_string();
    }
    groups
        .iter()
        .flat_map(GroupReport::render)
        .collect::<Vec<_>>()
        .join("\n")
}
