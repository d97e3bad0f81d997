pub mod walk;

pub use walk::{is_image_file, list_eligible_files, IMAGE_EXTENSIONS};

use crate::metadata::MetadataExtractor;
use crate::model::{lowercase_extension, DeviceIdentity, FileRecord};
use crate::progress::{percent_complete, ProgressReporter};
use rayon::prelude::*;
use rayon::ThreadPool;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Mutex;
use tracing::error;

struct ScanState {
    completed: usize,
    records: Vec<FileRecord>,
}

/// Extracts device identity for every path on `pool`, one task per file.
///
/// Records are appended in completion order. Each completion fires
/// `on_status` then `on_progress` while holding the state lock, so the
/// reporter sees one file at a time and progress never goes backwards.
/// A panicking extractor is contained to its file, which gets sentinels.
pub fn scan_files(
    files: &[impl AsRef<Path> + Sync],
    extractor: &dyn MetadataExtractor,
    reporter: &dyn ProgressReporter,
    pool: &ThreadPool,
) -> Vec<FileRecord> {
    let total = files.len();
    let state = Mutex::new(ScanState {
        completed: 0,
        records: Vec::with_capacity(total),
    });

    pool.install(|| {
        files.par_iter().for_each(|path| {
            let record = extract_record(path.as_ref(), extractor);

            let mut guard = match state.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.completed += 1;
            reporter.on_status(&record.file_name);
            reporter.on_progress(percent_complete(guard.completed, total));
            guard.records.push(record);
        });
    });

    match state.into_inner() {
        Ok(state) => state.records,
        Err(poisoned) => poisoned.into_inner().records,
    }
}

fn extract_record(path: &Path, extractor: &dyn MetadataExtractor) -> FileRecord {
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = lowercase_extension(path);

    let device = match panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(path))) {
        Ok(device) => device,
        Err(_) => {
            error!("Metadata extraction panicked for {}", path.display());
            DeviceIdentity::unknown()
        }
    };

    FileRecord {
        file_name,
        extension,
        device,
    }
}
