use crate::cleaner::{clean, CleanReport};
use crate::host::{self, SystemInfo};
use crate::report::{Reporter, Theme};
use crate::scanner::{compute_folder_size, ScanReport};
use crate::Config;
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use log::{debug, warn};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "temp-cleaner")]
#[command(version, about = "Shows basic machine information and empties your temp folder", long_about = None)]
pub struct Cli {
    /// Directory to clean instead of the user's temp folder
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Config file path (without a value, the default config location)
    #[arg(short, long, num_args = 0..=1, value_name = "FILE")]
    pub config: Option<Option<PathBuf>>,

    /// Write a default config file and exit (defaults to the config location)
    #[arg(long, num_args = 0..=1, value_name = "FILE")]
    pub init_config: Option<Option<PathBuf>>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Do not clear the screen on start
    #[arg(long)]
    pub no_clear: bool,

    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_pause: bool,

    /// Verbose output (logs every entry that could not be removed)
    #[arg(short, long)]
    pub verbose: bool,
}

/// How an interactive session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The target directory does not exist; nothing was scanned or removed
    MissingTarget,

    /// The user declined; nothing was removed
    Canceled { scan: ScanReport },

    Cleaned { scan: ScanReport, clean: CleanReport },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if let Some(path) = &self.init_config {
            let path = path.clone().unwrap_or_else(Config::default_path);
            init_config(&path)?;
            println!("{} {}", "Config file created:".green().bold(), path.display());
            return Ok(());
        }

        let config = load_config(self.config.as_ref())?;

        init_logging(self.verbose || config.verbose);

        let theme = if self.no_color {
            Theme::plain()
        } else {
            Theme::from_name(config.theme)
        };
        colored::control::set_override(theme.is_styled());

        if config.clear_screen && !self.no_clear {
            if let Err(err) = clear_screen() {
                debug!("could not clear screen: {:#}", err);
            }
        }

        let target = self
            .path
            .clone()
            .or_else(|| config.target.clone())
            .unwrap_or_else(host::temp_dir);
        debug!("target directory: {}", target.display());

        let mut input = io::stdin().lock();
        let mut reporter = Reporter::new(io::stdout(), io::stderr(), theme);
        let pause = config.pause_on_exit && !self.no_pause;

        let outcome = run_interactive(
            &target,
            &SystemInfo::collect(),
            &mut input,
            &mut reporter,
            pause,
        );
        debug!("session finished: {:?}", outcome);

        Ok(())
    }
}

/// `--config` absent: defaults. `--config` alone: the default location if
/// it exists. `--config FILE`: that file, which must exist.
fn load_config(arg: Option<&Option<PathBuf>>) -> Result<Config> {
    match arg {
        None => Ok(Config::default()),
        Some(None) => Config::load_or_default(Config::default_path()),
        Some(Some(path)) => Config::load(path),
    }
}

fn init_config(path: &Path) -> Result<()> {
    Config::ensure_parent_dir(path)?;
    Config::default().save(path)
}

/// Banner, session and exit prompt.
///
/// Output failures are logged and never abort the run; a session that
/// could not be reported returns `None`.
pub fn run_interactive<R, W, E>(
    target: &Path,
    info: &SystemInfo,
    input: &mut R,
    reporter: &mut Reporter<W, E>,
    pause: bool,
) -> Option<SessionOutcome>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    if let Err(err) = reporter.banner(info) {
        debug!("failed to write banner: {:#}", err);
    }

    let outcome = match run_session(target, input, reporter) {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            debug!("session aborted: {:#}", err);
            None
        }
    };

    if pause {
        if let Err(err) = reporter.exit_prompt() {
            debug!("failed to write exit prompt: {:#}", err);
        }
        wait_for_enter(input);
    }

    outcome
}

/// Measure `target`, ask for confirmation and empty it.
///
/// Only a `y` or `Y` answer leads to any deletion.
pub fn run_session<R, W, E>(
    target: &Path,
    input: &mut R,
    reporter: &mut Reporter<W, E>,
) -> Result<SessionOutcome>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    reporter.target(target)?;

    if !target.is_dir() {
        warn!("target directory {} does not exist", target.display());
        reporter.missing_target()?;
        return Ok(SessionOutcome::MissingTarget);
    }

    let scan = compute_folder_size(target);
    debug!(
        "scanned {}: {} bytes, {} skipped",
        target.display(),
        scan.bytes,
        scan.skipped
    );
    reporter.current_size(scan.bytes)?;

    reporter.prompt()?;
    if !is_confirmed(read_choice(input)) {
        reporter.canceled()?;
        return Ok(SessionOutcome::Canceled { scan });
    }

    let report = clean(target);
    reporter.clean_summary(&report)?;
    if let Some(free) = host::available_space(target) {
        reporter.free_space(free)?;
    }

    Ok(SessionOutcome::Cleaned {
        scan,
        clean: report,
    })
}

/// First non-whitespace character of the answer, skipping blank lines.
fn read_choice<R: BufRead>(input: &mut R) -> Option<char> {
    loop {
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => return None,
            Ok(_) => {
                if let Some(choice) = line.chars().find(|c| !c.is_whitespace()) {
                    return Some(choice);
                }
            }
            Err(err) => {
                debug!("failed to read answer: {}", err);
                return None;
            }
        }
    }
}

fn is_confirmed(choice: Option<char>) -> bool {
    matches!(choice, Some('y' | 'Y'))
}

fn wait_for_enter<R: BufRead>(input: &mut R) {
    let mut line = String::new();
    if let Err(err) = input.read_line(&mut line) {
        debug!("failed to read exit confirmation: {}", err);
    }
}

fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)).context("Failed to clear terminal")?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}
