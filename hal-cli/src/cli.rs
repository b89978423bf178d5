use clap::{Parser, Subcommand};
use hal_vocab::media_types;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hal", about = "Render and parse HAL documents", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a settings file (TOML, or JSON with a .json extension)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Indent JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a resource description as a HAL document
    Render {
        /// Resource description file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Media type to render as
        #[arg(long, default_value = media_types::HAL_JSON)]
        media_type: String,
    },

    /// Parse a HAL document into flat links and embedded resources
    Parse {
        /// HAL document file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Media type of the document
        #[arg(long, default_value = media_types::HAL_JSON)]
        media_type: String,
    },

    /// Show how links of a relation are rendered
    Relation {
        /// Link relation, e.g. `orders` or `acme:orders`
        rel: String,
    },
}
