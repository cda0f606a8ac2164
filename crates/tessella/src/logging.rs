//! File logging. The terminal belongs to the UI, so logs never go to stdout.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::{WrapErr, eyre};
use tessella_config::Config;
use tracing_subscriber::EnvFilter;

/// Environment variable naming a log file when the config has none.
pub const LOG_FILE_ENV: &str = "TESSELLA_LOG";

/// Environment variable holding a tracing filter directive.
pub const LOG_FILTER_ENV: &str = "TESSELLA_LOG_FILTER";

/// Where logs should go, if anywhere.
pub fn log_path(config: &Config) -> Option<PathBuf> {
    config
        .log_file
        .clone()
        .or_else(|| std::env::var_os(LOG_FILE_ENV).map(PathBuf::from))
}

/// Install the global subscriber. Does nothing when no log file is configured.
pub fn init(config: &Config) -> color_eyre::Result<()> {
    let Some(path) = log_path(config) else {
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_log_file_wins() {
        let config = Config {
            log_file: Some(PathBuf::from("/tmp/tessella.log")),
            ..Config::default()
        };
        assert_eq!(log_path(&config), Some(PathBuf::from("/tmp/tessella.log")));
    }
}
