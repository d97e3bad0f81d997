pub mod gaps;
pub mod group;

pub use gaps::{
    analyze_group, detect_gaps, missing_numbers, GapAnalysis, GroupOutcome, MissingRange,
};
pub use group::{group_records, sort_groups, DeviceGroup};
