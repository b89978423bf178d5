use crate::error::CliResult;
use hal_format::{load_config, HalSettings};
use std::path::Path;
use tracing::debug;

/// Settings from `--config`, or defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> CliResult<HalSettings> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => {
            debug!("no settings file given, using defaults");
            Ok(HalSettings::default())
        }
    }
}
