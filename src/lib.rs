pub mod cleaner;
pub mod cli;
pub mod config;
pub mod host;
pub mod report;
pub mod scanner;
pub mod utils;

// Re-export commonly used types
pub use cleaner::{clean, CleanReport, Tally};
pub use config::Config;
pub use report::{Reporter, Theme};
pub use scanner::{compute_folder_size, folder_size, Outcome, ScanReport};
pub use utils::format_size;
