use super::Outcome;
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

/// Result of measuring a directory tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Sum of the sizes of every reachable regular file
    pub bytes: u64,

    /// Entries that could not be read
    pub skipped: u64,

    pub outcome: Outcome,
}

/// Calculate total size of a directory recursively.
///
/// Symlinks are not followed and only regular files count. Unreadable
/// entries are skipped and the walk keeps going, so this never fails: a
/// missing or unreadable root reports zero bytes with [`Outcome::Failed`].
pub fn compute_folder_size(dir: &Path) -> ScanReport {
    let mut bytes = 0u64;
    let mut skipped = 0u64;
    let mut root_failed = false;

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if err.depth() == 0 {
                    root_failed = true;
                } else {
                    skipped += 1;
                }
                debug!("size scan skipped entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => bytes = bytes.saturating_add(metadata.len()),
            Err(err) => {
                skipped += 1;
                debug!("size scan skipped {}: {}", entry.path().display(), err);
            }
        }
    }

    ScanReport {
        bytes,
        skipped,
        outcome: Outcome::from_walk(root_failed, skipped),
    }
}

/// Byte total of [`compute_folder_size`].
pub fn folder_size(dir: &Path) -> u64 {
    compute_folder_size(dir).bytes
}
