use crate::error::{CliError, CliResult};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Where the input document comes from.
pub enum InputSource {
    /// From a file on disk.
    File(PathBuf),
    /// From stdin (piped).
    Stdin,
}

/// Resolve the input source: positional file, else piped stdin.
pub fn resolve_input(file: Option<&Path>) -> CliResult<InputSource> {
    if let Some(f) = file {
        return Ok(InputSource::File(f.to_path_buf()));
    }
    if !io::stdin().is_terminal() {
        return Ok(InputSource::Stdin);
    }
    Err(CliError::Usage(format!(
        "no input provided\n  {} pass a file or pipe a document via stdin",
        colored::Colorize::bold(colored::Colorize::cyan("help:"))
    )))
}

/// Read content from the resolved input source.
pub fn read_input(source: &InputSource) -> CliResult<String> {
    match source {
        InputSource::File(path) => std::fs::read_to_string(path)
            .map_err(|e| CliError::Input(format!("failed to read {}: {e}", path.display()))),
        InputSource::Stdin => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Read and parse a JSON document from the resolved input source.
pub fn read_json(source: &InputSource) -> CliResult<serde_json::Value> {
    let text = read_input(source)?;
    if text.trim().is_empty() {
        return Err(CliError::Input("input is empty".to_string()));
    }
    Ok(serde_json::from_str(&text)?)
}
