use std::str::FromStr;

use tracing::{debug, Level};

use crate::config::Config;
use crate::error::{TreeError, TreeResult};

pub fn parse_level(level: &str) -> TreeResult<Level> {
    Level::from_str(level.trim()).map_err(|_| TreeError::InvalidLogLevel(level.to_string()))
}

/// Installs a global fmt subscriber at the configured level.
///
/// Only the first call installs anything; later calls return `Ok(())` and
/// leave the existing subscriber in place.
pub fn init(config: &Config) -> TreeResult<()> {
    let level = parse_level(&config.log_level)?;
    if let Err(err) = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
    {
        debug!(%err, "subscriber already installed, keeping it");
    }
    Ok(())
}
