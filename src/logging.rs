use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{Config, Mode};
use crate::error::{Error, Result};

/// Installs the global subscriber.
///
/// Interactive mode owns the terminal, so it only logs when a log file is
/// configured. Returns whether a subscriber was installed.
pub fn init(config: &Config) -> Result<bool> {
    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| Error::Logging(format!("bad filter {:?}: {e}", config.log_level)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match (&config.log_file, config.mode) {
        (Some(path), _) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, Mode::Interactive) => return Ok(false),
        (None, _) => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| Error::Logging(e.to_string()))?;
    Ok(true)
}
