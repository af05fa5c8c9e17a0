use crate::scanner::Outcome;
use crate::utils::format_size;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Running totals of a cleaning pass
///
/// Only top-level files are tallied; a removed directory adds nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Total bytes freed
    pub bytes_freed: u64,

    /// Number of files removed
    pub files_deleted: u64,
}

impl Tally {
    fn record_file(&mut self, size: u64) {
        self.bytes_freed = self.bytes_freed.saturating_add(size);
        self.files_deleted += 1;
    }
}

/// Result of a cleaning operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub tally: Tally,

    /// Entries that could not be inspected or removed
    pub skipped: u64,

    pub outcome: Outcome,
}

impl CleanReport {
    /// Returns a human-readable size string
    pub fn size_freed_human(&self) -> String {
        format_size(self.tally.bytes_freed)
    }
}

/// What happened to one top-level entry
#[derive(Debug, PartialEq, Eq)]
enum Removed {
    /// A regular file of this many bytes
    File(u64),
    Directory,
    /// Symlink or special file; not tallied
    Other,
}

/// Empty `dir` by removing each of its direct children.
///
/// Subdirectories go in one recursive removal; regular files have their
/// size recorded and are then deleted. Symlinks and special files are
/// removed without being tallied. A failing entry is skipped and its
/// siblings are still processed. If `dir` cannot be listed the pass ends
/// with [`Outcome::Failed`] and an empty tally.
pub fn clean(dir: &Path) -> CleanReport {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("cannot list {}: {}", dir.display(), err);
            return CleanReport {
                tally: Tally::default(),
                skipped: 0,
                outcome: Outcome::Failed,
            };
        }
    };

    let report = sweep(entries.map(|entry| entry.map(|entry| entry.path())));

    debug!(
        "cleaned {}: {} files, {} bytes, {} skipped",
        dir.display(),
        report.tally.files_deleted,
        report.tally.bytes_freed,
        report.skipped
    );

    report
}

/// Remove every listed path, counting failures instead of stopping.
fn sweep<I>(entries: I) -> CleanReport
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut tally = Tally::default();
    let mut skipped = 0u64;

    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                skipped += 1;
                debug!("skipped unreadable entry: {}", err);
                continue;
            }
        };

        match remove_path(&path) {
            Ok(Removed::File(size)) => tally.record_file(size),
            Ok(Removed::Directory | Removed::Other) => {}
            Err(err) => {
                skipped += 1;
                debug!("failed to remove {}: {}", path.display(), err);
            }
        }
    }

    CleanReport {
        tally,
        skipped,
        outcome: Outcome::from_walk(false, skipped),
    }
}

fn remove_path(path: &Path) -> io::Result<Removed> {
    // symlink_metadata does not follow links, so a link to a directory
    // is removed as a plain entry and its target is left alone.
    let metadata = fs::symlink_metadata(path)?;
    let file_type = metadata.file_type();

    if file_type.is_dir() {
        fs::remove_dir_all(path)?;
        return Ok(Removed::Directory);
    }

    fs::remove_file(path)?;
    if file_type.is_file() {
        Ok(Removed::File(metadata.len()))
    } else {
        Ok(Removed::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_only_top_level_files_are_tallied() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("top.tmp"), vec![0u8; 42]).unwrap();
        let nested = root.join("nested");
        fs::create_dir(&nested).unwrap();
        for i in 0..3 {
            fs::write(nested.join(format!("inner{}.tmp", i)), vec![1u8; 500]).unwrap();
        }

        let report = clean(root);

        assert_eq!(report.tally.files_deleted, 1);
        assert_eq!(report.tally.bytes_freed, 42);
        assert_eq!(report.outcome, Outcome::Complete);
        assert_eq!(fs::read_dir(root).unwrap().count(), 0);
    }

    #[test]
    fn test_second_clean_is_empty() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a"), "aaaa").unwrap();
        fs::write(temp.path().join("b"), "bb").unwrap();

        let first = clean(temp.path());
        let second = clean(temp.path());

        assert_eq!(first.tally.files_deleted, 2);
        assert_eq!(first.tally.bytes_freed, 6);
        assert_eq!(second.tally, Tally::default());
        assert_eq!(second.skipped, 0);
        assert_eq!(second.outcome, Outcome::Complete);
    }

    #[test]
    fn test_missing_directory_fails_without_tally() {
        let temp = TempDir::new().unwrap();

        let report = clean(&temp.path().join("gone"));

        assert_eq!(report.tally, Tally::default());
        assert_eq!(report.outcome, Outcome::Failed);
    }

    #[test]
    fn test_size_freed_human() {
        let report = CleanReport {
            tally: Tally {
                bytes_freed: 3 * 1024 * 1024,
                files_deleted: 7,
            },
            skipped: 0,
            outcome: Outcome::Complete,
        };

        assert_eq!(report.size_freed_human(), "3.00 MB");
    }

    #[test]
    fn test_failed_entry_does_not_stop_siblings() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("one.tmp"), "1").unwrap();
        fs::write(root.join("two.tmp"), "22").unwrap();
        let nested = root.join("cache");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("blob"), "blob").unwrap();

        // An entry that vanished between listing and removal
        let entries = vec![
            Ok(root.join("one.tmp")),
            Ok(root.join("already-gone.tmp")),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Ok(nested.clone()),
            Ok(root.join("two.tmp")),
        ];

        let report = sweep(entries);

        assert_eq!(report.tally.files_deleted, 2);
        assert_eq!(report.tally.bytes_freed, 3);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.outcome, Outcome::Partial { skipped: 2 });
        assert_eq!(fs::read_dir(root).unwrap().count(), 0);
    }

    #[test]
    fn test_remove_path_missing_entry_is_an_error() {
        let temp = TempDir::new().unwrap();

        let err = remove_path(&temp.path().join("missing")).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_removed_but_not_tallied() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        let outside = temp.path().join("outside");
        fs::create_dir(&root).unwrap();
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("big.bin"), vec![0u8; 4096]).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("dir-link")).unwrap();
        std::os::unix::fs::symlink(outside.join("big.bin"), root.join("file-link")).unwrap();
        fs::write(root.join("real.tmp"), vec![0u8; 7]).unwrap();

        let report = clean(&root);

        assert_eq!(report.tally.files_deleted, 1);
        assert_eq!(report.tally.bytes_freed, 7);
        assert_eq!(report.outcome, Outcome::Complete);
        assert!(outside.join("big.bin").exists());
        assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_unremovable_directory_does_not_stop_siblings() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("one.tmp"), "1").unwrap();
        fs::write(root.join("two.tmp"), "22").unwrap();
        let stuck = root.join("stuck");
        fs::create_dir(&stuck).unwrap();
        fs::write(stuck.join("held.tmp"), "held").unwrap();
        fs::set_permissions(&stuck, fs::Permissions::from_mode(0o555)).unwrap();

        if fs::write(stuck.join("write-check"), "").is_ok() {
            fs::set_permissions(&stuck, fs::Permissions::from_mode(0o755)).unwrap();
            eprintln!("skipping test_unremovable_directory_does_not_stop_siblings: running with privileges");
            return;
        }

        let report = clean(root);
        fs::set_permissions(&stuck, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(report.tally.files_deleted, 2);
        assert_eq!(report.tally.bytes_freed, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.outcome, Outcome::Partial { skipped: 1 });
        assert!(stuck.join("held.tmp").exists());
        assert!(!root.join("one.tmp").exists());
        assert!(!root.join("two.tmp").exists());
    }
}
