use crate::error::Error;
use crate::model::lowercase_extension;
use std::path::{Path, PathBuf};
use tracing::error;
use walkdir::WalkDir;

/// Extensions (lower-cased, leading dot) eligible for a continuity check.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".bmp", ".tiff", ".raw", ".nef", ".cr2", ".arw", ".dng", ".heif",
];

pub fn is_image_file(path: &Path) -> bool {
    IMAGE_EXTENSIONS.contains(&lowercase_extension(path).as_str())
}

/// Immediate (non-recursive) regular files of `dir` with an image extension,
/// sorted by file name. Symlinks count by what they point at.
///
/// Failing to open `dir` itself is fatal. Entries that vanish, cannot be
/// stat'ed, or are dangling links are logged and skipped.
pub fn list_eligible_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory loop detected"));
                return Err(Error::ReadDir {
                    path: dir.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                error!("Error reading entry in directory {}: {}", dir.display(), err);
                continue;
            }
        };

        if entry.file_type().is_file() && is_image_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
