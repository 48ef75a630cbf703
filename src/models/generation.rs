use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GenerationError, Result};

/// Media-type marker prepended to the base64 payload so the image can be
/// rendered inline without touching disk.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// The fixed set of output sizes the endpoint accepts. Images are always
/// square; the selector drives both dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Square256,
    Square512,
    Square768,
    Square1024,
}

impl ImageSize {
    pub const ALL: [ImageSize; 4] = [
        ImageSize::Square256,
        ImageSize::Square512,
        ImageSize::Square768,
        ImageSize::Square1024,
    ];

    pub fn pixels(self) -> u32 {
        match self {
            ImageSize::Square256 => 256,
            ImageSize::Square512 => 512,
            ImageSize::Square768 => 768,
            ImageSize::Square1024 => 1024,
        }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        ImageSize::Square512
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

impl FromStr for ImageSize {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "256" => Ok(ImageSize::Square256),
            "512" => Ok(ImageSize::Square512),
            "768" => Ok(ImageSize::Square768),
            "1024" => Ok(ImageSize::Square1024),
            other => Err(GenerationError::Config(format!(
                "Unsupported image size: {}",
                other
            ))),
        }
    }
}

/// Provider selection for a generation request.
///
/// `Auto` means "let the endpoint pick" and maps to an absent `provider`
/// field on the wire; it is never transmitted as a literal value. Any
/// named provider is sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderChoice {
    Auto,
    Named(String),
}

impl ProviderChoice {
    pub fn stability() -> Self {
        ProviderChoice::Named("stability".to_string())
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, ProviderChoice::Auto)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ProviderChoice::Auto => None,
            ProviderChoice::Named(name) => Some(name),
        }
    }

    /// The single place where `Auto` becomes field-absence on the wire.
    pub fn into_field(self) -> Option<String> {
        match self {
            ProviderChoice::Auto => None,
            ProviderChoice::Named(name) => Some(name),
        }
    }
}

impl Default for ProviderChoice {
    fn default() -> Self {
        ProviderChoice::Auto
    }
}

impl fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderChoice::Auto => write!(f, "auto"),
            ProviderChoice::Named(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for ProviderChoice {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("auto") {
            Ok(ProviderChoice::Auto)
        } else {
            Ok(ProviderChoice::Named(name.to_string()))
        }
    }
}

/// Wire payload for `POST /api/generate`. Width and height are accepted
/// independently by the endpoint even though the builder always derives
/// both from one [`ImageSize`].
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// Success body from the endpoint. `note` is advisory text attached to a
/// successful result (e.g. a demo image was substituted); it is not an
/// error.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    pub image_b64: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// A generated image in directly displayable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    data_uri: String,
}

impl GeneratedImage {
    pub fn from_base64(image_b64: &str) -> Self {
        GeneratedImage {
            data_uri: format!("{}{}", PNG_DATA_URI_PREFIX, image_b64),
        }
    }

    /// Inline-renderable `data:` URI.
    pub fn as_data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Decoded PNG bytes, for saving the image to disk.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let payload = &self.data_uri[PNG_DATA_URI_PREFIX.len()..];
        STANDARD
            .decode(payload)
            .map_err(|e| GenerationError::Decoding(e.to_string()))
    }
}
