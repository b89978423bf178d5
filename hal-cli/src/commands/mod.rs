pub mod parse;
pub mod relation;
pub mod render;

use crate::error::CliResult;
use hal_format::{HalSettings, StrategyRegistry};
use std::sync::Arc;

/// Strategies for the media types the CLI understands, built from settings.
pub(crate) fn registry(settings: &HalSettings) -> CliResult<StrategyRegistry> {
    let mapper = Arc::new(settings.build_mapper()?);
    Ok(StrategyRegistry::with_defaults(mapper))
}
