use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Why a session could not be started from the node's current values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Please select a valid ROM file for {category}.")]
    InvalidRom { category: String, value: String },

    #[error("Emulator core issue for {category}: {value}. Ensure cores are downloaded.")]
    InvalidCore { category: String, value: String },

    #[error("No core found for {category}. Cannot start emulation.")]
    NoCore { category: String },

    #[error("Please select a valid BIOS file for {category}.")]
    InvalidBios { category: String, value: String },

    #[error("Invalid emulator size {width}x{height} for {category}.")]
    InvalidDimensions {
        category: String,
        width: i64,
        height: i64,
    },
}

/// The option catalog blob could not be read.
#[derive(Error, Debug)]
#[error("Failed to parse the option catalog: {0}")]
pub struct CatalogParseError(#[from] pub serde_json::Error);

/// Why a frame could not be captured from the running session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Emulator iframe not found or not loaded.")]
    NoSession,

    #[error("Timeout ({}ms) waiting for screenshot data.", timeout.as_millis())]
    Timeout { timeout: Duration },

    #[error("Invalid data received from iframe: {received}")]
    InvalidPayload { received: String },

    #[error("The emulator session went away before answering.")]
    SessionGone,

    #[error("Failed to send the capture request: {0}")]
    SendFailed(String),

    #[error("Screen data widget not found.")]
    MissingFrameControl,
}

/// Something went wrong on disk while working with the asset library.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("IO error at {0}: {1}")]
    IoError(PathBuf, #[source] std::io::Error),
}
