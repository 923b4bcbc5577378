//! Parsing and building of `data:` URLs, the string encoding captured frames
//! travel in (from the emulator's canvas, through the host's prompt, into the
//! backend).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;

/// Prefixes a captured frame payload may start with.
pub const CAPTURE_PAYLOAD_PREFIXES: [&str; 2] = ["data:image", RAW_RGB_PREFIX];

/// The prefix of a raw (unencoded, packed RGB) pixel payload.
pub const RAW_RGB_PREFIX: &str = "data:application/octet-stream";

/// Whether `payload` looks like a captured frame (a non-empty data URL with an
/// image or raw pixel media type).
pub fn is_capture_payload(payload: &str) -> bool {
    CAPTURE_PAYLOAD_PREFIXES
        .iter()
        .any(|prefix| payload.starts_with(prefix))
}

/// A borrowed, split-up `data:` URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    header: &'a str,
    payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Split `url` into its header (everything before the first `,`) and its
    /// payload.
    pub fn parse(url: &'a str) -> Result<Self, DataUrlError> {
        let (header, payload) = url.split_once(',').ok_or(DataUrlError::MissingSeparator)?;
        Ok(Self { header, payload })
    }

    /// Everything before the first `,`, e.g. `data:image/png;base64`.
    pub fn header(&self) -> &'a str {
        self.header
    }

    /// The media type, e.g. `image/png`. Empty if the header is not a `data:`
    /// header.
    pub fn media_type(&self) -> &'a str {
        self.header
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or_default()
    }

    /// Whether the header says the payload is an image.
    pub fn is_image(&self) -> bool {
        self.header.starts_with("data:image/")
    }

    /// Whether the header says the payload is raw packed RGB pixels.
    pub fn is_raw_rgb(&self) -> bool {
        self.header.starts_with(RAW_RGB_PREFIX)
    }

    /// Base64 decode the payload.
    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        BASE64.decode(self.payload.trim()).map_err(Into::into)
    }
}

/// Encode `bytes` as a base64 `data:` URL with the given media type.
///
/// # Example
///
/// ```
/// use media::frame::data_url;
///
/// assert_eq!(data_url::encode("image/png", b"hi"), "data:image/png;base64,aGk=");
/// ```
pub fn encode(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{media_type};base64,{}", BASE64.encode(bytes))
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataUrlError {
    #[error("Invalid Base64 data format; missing comma separator.")]
    MissingSeparator,
    #[error("Invalid Base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}
