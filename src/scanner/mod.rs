mod size_calculator;

pub use size_calculator::{compute_folder_size, folder_size, ScanReport};

/// How completely a walk over the filesystem went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every entry was visited.
    Complete,

    /// The root was readable but some entries were skipped.
    Partial { skipped: u64 },

    /// The root itself could not be read.
    Failed,
}

impl Outcome {
    /// Classify a finished walk.
    pub fn from_walk(root_failed: bool, skipped: u64) -> Self {
        if root_failed {
            Self::Failed
        } else if skipped > 0 {
            Self::Partial { skipped }
        } else {
            Self::Complete
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}
