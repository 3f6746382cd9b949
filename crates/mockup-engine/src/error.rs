use thiserror::Error;

pub const MISSING_DESCRIPTION: &str = "Please provide a wallpaper description or upload a file.";
pub const INVALID_API_KEY: &str = "API key is invalid or not set. Please check your setup.";
pub const MISSING_IMAGE_DATA: &str =
    "Image generation failed. One or more responses did not contain image data.";
pub const UNKNOWN_FAILURE: &str = "An unknown error occurred during mockup generation.";

/// The single human-readable failure a mockup run reports to its caller.
#[derive(Debug, Error)]
pub enum MockupError {
    #[error("{0}")]
    Validation(String),

    #[error("Unsupported reference image: {0}")]
    UnsupportedReference(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Generation(String),

    #[error("An unknown error occurred during mockup generation.")]
    Unknown(#[source] anyhow::Error),
}

impl MockupError {
    pub fn missing_description() -> Self {
        Self::Validation(MISSING_DESCRIPTION.to_string())
    }

    pub fn invalid_credentials() -> Self {
        Self::Configuration(INVALID_API_KEY.to_string())
    }

    pub fn missing_image_data() -> Self {
        Self::Generation(MISSING_IMAGE_DATA.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::UnsupportedReference(_) => "validation",
            Self::Configuration(_) => "configuration",
            Self::Generation(_) => "generation",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<anyhow::Error> for MockupError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<MockupError>() {
            Ok(known) => known,
            Err(other) => Self::Unknown(other),
        }
    }
}
