use crate::commands::registry;
use crate::description::ResourceDescription;
use crate::error::CliResult;
use crate::input::{read_json, InputSource};
use crate::output::format_json;
use hal_format::HalSettings;
use tracing::info;

pub fn run(
    settings: &HalSettings,
    source: &InputSource,
    media_type: &str,
    pretty: bool,
) -> CliResult<()> {
    println!("{}", render(settings, source, media_type, pretty)?);
    Ok(())
}

pub fn render(
    settings: &HalSettings,
    source: &InputSource,
    media_type: &str,
    pretty: bool,
) -> CliResult<String> {
    let resource = ResourceDescription::from_json(read_json(source)?)?.into_resource()?;
    let strategy = registry(settings)?.resolve(media_type)?;
    info!(media_type = strategy.media_type(), "rendering resource");
    let document = strategy.write(&resource)?;
    Ok(format_json(&document, pretty))
}
