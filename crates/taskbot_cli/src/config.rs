//! Command-line and environment configuration.
//!
//! # Responsibility
//! - Parse flags (with environment fallbacks) for the data file and logging.
//! - Resolve defaults under the platform data directory.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "taskbot";
const DATA_FILE_NAME: &str = "tasks.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Parser, Debug)]
#[command(
    name = "taskbot",
    version,
    about = "A text-command personal task tracker"
)]
pub struct Cli {
    /// SQLite file holding the task list
    #[arg(long, env = "TASKBOT_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, env = "TASKBOT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// One of trace|debug|info|warn|error
    #[arg(long, env = "TASKBOT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Disable file logging
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Always absolute.
    pub dir: PathBuf,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub log: Option<LogConfig>,
}

impl Config {
    pub fn resolve(cli: Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        Ok(Self::resolve_in(cli, &default_app_dir(), &cwd))
    }

    fn resolve_in(cli: Cli, app_dir: &Path, cwd: &Path) -> Self {
        let data_file = cli
            .data_file
            .unwrap_or_else(|| app_dir.join(DATA_FILE_NAME));

        let log = (!cli.no_log).then(|| {
            let dir = cli.log_dir.unwrap_or_else(|| app_dir.join(LOG_DIR_NAME));
            LogConfig {
                level: cli
                    .log_level
                    .unwrap_or_else(|| taskbot_core::default_log_level().to_string()),
                dir: if dir.is_absolute() { dir } else { cwd.join(dir) },
            }
        });

        Self { data_file, log }
    }
}

fn default_app_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::{Cli, Config};
    use clap::Parser;
    use std::path::Path;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("taskbot").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_live_under_app_dir() {
        let cli = Cli {
            data_file: None,
            log_dir: None,
            log_level: None,
            no_log: false,
        };
        let config = Config::resolve_in(cli, Path::new("/data/taskbot"), Path::new("/work"));

        assert_eq!(config.data_file, Path::new("/data/taskbot/tasks.sqlite3"));
        let log = config.log.unwrap();
        assert_eq!(log.dir, Path::new("/data/taskbot/logs"));
        assert_eq!(log.level, taskbot_core::default_log_level());
    }

    #[test]
    fn relative_log_dir_is_resolved_against_cwd() {
        let cli = parse(&["--log-dir", "logs", "--log-level", "warn"]);
        let config = Config::resolve_in(cli, Path::new("/data/taskbot"), Path::new("/work"));

        let log = config.log.unwrap();
        assert_eq!(log.dir, Path::new("/work/logs"));
        assert_eq!(log.level, "warn");
    }

    #[test]
    fn no_log_disables_logging() {
        let cli = parse(&["--no-log", "--data-file", "/tmp/t.sqlite3"]);
        let config = Config::resolve_in(cli, Path::new("/data/taskbot"), Path::new("/work"));

        assert!(config.log.is_none());
        assert_eq!(config.data_file, Path::new("/tmp/t.sqlite3"));
    }
}
