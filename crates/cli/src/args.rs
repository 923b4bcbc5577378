//! Contains [Args], which are parsed command-line flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Parsed command line arguments.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "retro-engine",
    about = "Manage the Retro Engine node's assets and run its compiled records."
)]
pub struct Args {
    /// The settings file. It's created with default settings if it doesn't
    /// exist.
    #[arg(long, default_value = "retro_engine.json")]
    pub config: PathBuf,

    /// Use this assets directory instead of the one in the settings file.
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,

    #[cfg(debug_assertions)]
    /// Disable debug logging. This option only exists if `debug_assertions` are
    /// enabled.
    #[arg(long, global = true)]
    pub no_debug_logging: bool,

    #[cfg(debug_assertions)]
    /// Enable debug error log panics. This option only exists if
    /// `debug_assertions` are enabled.
    #[arg(long, global = true, conflicts_with = "no_debug_logging")]
    pub debug_error_log_panics: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the asset directory layout (one ROM directory per system, BIOS
    /// and core directories).
    Init,

    /// Print the option catalog (the node's hidden `all_options` value).
    Catalog {
        /// Pretty print the JSON.
        #[arg(long)]
        pretty: bool,
    },

    /// Print the node's input and output definition as JSON.
    Definition,

    /// Run a compiled record and write its screen capture as a PNG.
    Run {
        /// A JSON file holding either a single node record or a whole compiled
        /// prompt.
        record: PathBuf,

        /// Which node of a prompt to run. Defaults to the first Retro Engine
        /// node.
        #[arg(long)]
        node: Option<String>,

        /// Where to write the screen capture.
        #[arg(long, short, default_value = "screen_capture.png")]
        output: PathBuf,
    },
}
