mod theme;

pub use theme::{Style, Theme, ThemeName};

use crate::cleaner::CleanReport;
use crate::host::SystemInfo;
use crate::scanner::Outcome;
use crate::utils::format_size;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

const BANNER_RULE: &str = "****************************************";
const BANNER_TITLE: &str = "*           SYSTEM INFORMATION         *";

pub const CLEAN_PROMPT: &str = "Do you want to clean the Temp folder? (y/n): ";

/// Writes the user-facing report to an output and an error stream.
pub struct Reporter<W: Write, E: Write> {
    out: W,
    err: E,
    theme: Theme,
}

impl<W: Write, E: Write> Reporter<W, E> {
    pub fn new(out: W, err: E, theme: Theme) -> Self {
        Self { out, err, theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Consume the reporter and hand back both streams
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    pub fn banner(&mut self, info: &SystemInfo) -> Result<()> {
        let frame = [BANNER_RULE, BANNER_TITLE, BANNER_RULE];
        for line in frame {
            writeln!(self.out, "{}", self.theme.banner.paint(line))?;
        }
        for (label, value) in [
            ("OS: ", &info.os),
            ("User: ", &info.user),
            ("CPU: ", &info.cpu),
            ("GPU: ", &info.gpu),
            ("RAM: ", &info.ram),
        ] {
            writeln!(self.out, "{}{}", self.theme.label.paint(label), value)?;
        }
        Ok(())
    }

    pub fn target(&mut self, path: &Path) -> Result<()> {
        writeln!(
            self.out,
            "\n{}{}",
            self.theme.path.paint("Temp Folder: "),
            path.display()
        )?;
        Ok(())
    }

    pub fn missing_target(&mut self) -> Result<()> {
        writeln!(
            self.err,
            "{}",
            self.theme.error.paint("Error: Temp folder not found!")
        )?;
        Ok(())
    }

    pub fn current_size(&mut self, bytes: u64) -> Result<()> {
        let line = format!("Current Temp Folder Size: {}", format_size(bytes));
        writeln!(self.out, "{}", self.theme.success.paint(&line))?;
        Ok(())
    }

    pub fn prompt(&mut self) -> Result<()> {
        write!(self.out, "\n{}", CLEAN_PROMPT)?;
        self.out.flush().context("Failed to flush prompt")?;
        Ok(())
    }

    pub fn canceled(&mut self) -> Result<()> {
        writeln!(self.out, "{}", self.theme.error.paint("Operation canceled."))?;
        Ok(())
    }

    pub fn clean_summary(&mut self, report: &CleanReport) -> Result<()> {
        let count = format!("{} files deleted.", report.tally.files_deleted);
        writeln!(self.out, "\n{}", self.theme.info.paint(&count))?;

        let freed = format!("Freed Space: {}", report.size_freed_human());
        writeln!(self.out, "{}", self.theme.success.paint(&freed))?;

        match report.outcome {
            Outcome::Complete => {}
            Outcome::Partial { skipped } => {
                let line = format!("Skipped: {} entries could not be removed.", skipped);
                writeln!(self.out, "{}", self.theme.error.paint(&line))?;
            }
            Outcome::Failed => {
                let line = "Skipped: the Temp folder could not be listed.";
                writeln!(self.out, "{}", self.theme.error.paint(line))?;
            }
        }
        Ok(())
    }

    pub fn free_space(&mut self, bytes: u64) -> Result<()> {
        writeln!(
            self.out,
            "{}{}",
            self.theme.label.paint("Free space on volume: "),
            format_size(bytes)
        )?;
        Ok(())
    }

    pub fn exit_prompt(&mut self) -> Result<()> {
        writeln!(self.out, "\n{}", self.theme.banner.paint("Press Enter to Exit."))?;
        self.out.flush().context("Failed to flush exit prompt")?;
        Ok(())
    }
}
