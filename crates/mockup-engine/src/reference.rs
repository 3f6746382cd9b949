use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};

use crate::error::MockupError;

pub const ACCEPTED_MEDIA_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// User-supplied pattern image sent ahead of the prompt as style context.
#[derive(Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub name: String,
}

impl std::fmt::Debug for ReferenceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceImage")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl ReferenceImage {
    pub fn new(
        bytes: Vec<u8>,
        media_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, MockupError> {
        let media_type = media_type.into().trim().to_ascii_lowercase();
        let name = name.into();
        let media_type = match media_type.as_str() {
            "image/jpg" => "image/jpeg".to_string(),
            _ => media_type,
        };
        if !ACCEPTED_MEDIA_TYPES.contains(&media_type.as_str()) {
            return Err(MockupError::UnsupportedReference(format!(
                "{name} has media type '{media_type}'; expected PNG, JPEG or WEBP"
            )));
        }
        if bytes.is_empty() {
            return Err(MockupError::UnsupportedReference(format!("{name} is empty")));
        }
        Ok(Self {
            bytes,
            media_type,
            name,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, MockupError> {
        let name = path
            .file_name()
            .and_then(|value| value.to_str())
            .unwrap_or("reference")
            .to_string();
        let Some(media_type) = media_type_for_path(path) else {
            return Err(MockupError::UnsupportedReference(format!(
                "{name}: expected a .png, .jpg, .jpeg or .webp file"
            )));
        };
        let bytes = fs::read(path).map_err(|err| {
            MockupError::Validation(format!("failed reading {}: {err}", path.display()))
        })?;
        Self::new(bytes, media_type, name)
    }

    pub fn to_inline_part(&self) -> Value {
        json!({
            "inlineData": {
                "mimeType": self.media_type,
                "data": BASE64.encode(&self.bytes),
            }
        })
    }
}

pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
