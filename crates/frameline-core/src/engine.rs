use crate::analysis::{self, analyze_group};
use crate::config::AppConfig;
use crate::error::Error;
use crate::metadata::{ExifExtractor, MetadataExtractor};
use crate::progress::ProgressReporter;
use crate::report::{self, GroupReport};
use crate::scanner;
use rayon::ThreadPoolBuilder;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Runs the continuity check: scan, group, detect gaps, report.
///
/// Holds only configuration and the injected extractor; every `check` call is
/// independent of the previous one.
pub struct ContinuityChecker {
    config: AppConfig,
    extractor: Arc<dyn MetadataExtractor>,
}

#[derive(Debug, Clone)]
pub struct ContinuityReport {
    pub total_files: usize,
    pub groups: Vec<GroupReport>,
    pub scan_duration: Duration,
}

impl ContinuityReport {
    pub fn render(&self) -> String {
        report::render_report(&self.groups)
    }

    /// True when any group is missing frames or could not be ordered.
    pub fn has_gaps(&self) -> bool {
        self.groups.iter().any(GroupReport::is_incomplete)
    }
}

impl ContinuityChecker {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            extractor: Arc::new(ExifExtractor::new()),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn MetadataExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Check one directory (non-recursive).
    ///
    /// Only a failure to enumerate `dir` or to start the worker pool is an
    /// error; unreadable metadata and unorderable groups are part of the report.
    pub fn check(
        &self,
        dir: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<ContinuityReport, Error> {
        info!("Checking files in directory: {}", dir.display());
        let files = scanner::list_eligible_files(dir)?;
        let total_files = files.len();

        if files.is_empty() {
            info!("No image files found in {}", dir.display());
            return Ok(ContinuityReport {
                total_files: 0,
                groups: Vec::new(),
                scan_duration: Duration::ZERO,
            });
        }

        let threads = self.config.effective_worker_threads().min(total_files);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("frameline-extract-{}", i))
            .build()?;

        reporter.on_scan_start(total_files);
        let scan_start = Instant::now();
        let records = scanner::scan_files(&files, self.extractor.as_ref(), reporter, &pool);
        let scan_duration = scan_start.elapsed();
        reporter.on_scan_complete(records.len(), scan_duration.as_secs_f64());
        debug!(
            "Extracted metadata for {} files in {:.2}s on {} threads",
            records.len(),
            scan_duration.as_secs_f64(),
            threads,
        );

        let mut groups = analysis::group_records(records);
        if self.config.sort_groups {
            analysis::sort_groups(&mut groups);
        }

        let groups = groups
            .iter()
            .map(|group| {
                let outcome = analyze_group(group);
                match &outcome {
                    Ok(o) => debug!(
                        "{}: {} files, gaps: {}",
                        group.label(),
                        group.files.len(),
                        o.has_gaps()
                    ),
                    Err(err) => warn!("{}: {}", group.label(), err),
                }
                GroupReport {
                    key: group.key.clone(),
                    file_count: group.files.len(),
                    outcome,
                }
            })
            .collect();

        Ok(ContinuityReport {
            total_files,
            groups,
            scan_duration,
        })
    }
}
