use std::thread;
use std::time::Duration;

use anyhow::Context;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::MockupError;
use crate::reference::ReferenceImage;
use crate::settings::GeminiSettings;

/// Candidates requested per submission so the caller can pick one.
pub const PARALLEL_GENERATIONS: usize = 2;

/// Used when the service omits the media type of an inline image.
pub const DEFAULT_IMAGE_MEDIA_TYPE: &str = "image/jpeg";

/// A generated image as returned by the service, still base64-encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub media_type: String,
    pub data: String,
}

impl std::fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRef")
            .field("media_type", &self.media_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl ImageRef {
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }

    pub fn decode(&self) -> anyhow::Result<Vec<u8>> {
        BASE64
            .decode(self.data.as_bytes())
            .context("image base64 decode failed")
    }

    pub fn extension(&self) -> &'static str {
        match self.media_type.to_ascii_lowercase().as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
    }
}

/// One outbound `generateContent` call.
#[derive(Debug, Clone, Copy)]
pub struct TransportCall<'a> {
    pub endpoint: &'a str,
    pub api_key: &'a str,
    pub payload: &'a Value,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("credential rejected ({status}): {body}")]
    Credential { status: u16, body: String },

    #[error("request failed ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response payload: {0}")]
    InvalidPayload(String),
}

impl TransportError {
    pub fn is_credential(&self) -> bool {
        matches!(self, Self::Credential { .. })
    }
}

pub trait ImageTransport: Send + Sync {
    fn generate_content(&self, call: &TransportCall<'_>) -> Result<Value, TransportError>;
}

/// The reference image, when present, goes before the prompt text.
pub fn build_payload(prompt: &str, reference: Option<&ReferenceImage>) -> Value {
    let mut parts = Vec::with_capacity(2);
    if let Some(reference) = reference {
        parts.push(reference.to_inline_part());
    }
    parts.push(json!({ "text": prompt }));
    json!({
        "contents": [{
            "role": "user",
            "parts": parts,
        }],
        "generationConfig": {
            "responseModalities": ["IMAGE"],
        },
    })
}

pub fn extract_first_image(response: &Value) -> Option<ImageRef> {
    let candidates = response.get("candidates")?.as_array()?;
    candidates
        .iter()
        .filter_map(|candidate| candidate.get("content")?.get("parts")?.as_array())
        .flatten()
        .find_map(|part| {
            let inline = part.get("inlineData").or_else(|| part.get("inline_data"))?;
            let data = inline.get("data").and_then(Value::as_str)?.trim();
            if data.is_empty() {
                return None;
            }
            let media_type = inline
                .get("mimeType")
                .or_else(|| inline.get("mime_type"))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(DEFAULT_IMAGE_MEDIA_TYPE);
            Some(ImageRef {
                media_type: media_type.to_string(),
                data: data.to_string(),
            })
        })
}

pub struct GenerationClient {
    settings: GeminiSettings,
    transport: Box<dyn ImageTransport>,
}

impl GenerationClient {
    pub fn new<T: ImageTransport + 'static>(settings: GeminiSettings, transport: T) -> Self {
        Self {
            settings,
            transport: Box::new(transport),
        }
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    /// Issues [`PARALLEL_GENERATIONS`] identical requests concurrently and
    /// returns one image per request, or a single error if any request fails.
    pub fn generate(
        &self,
        prompt: &str,
        reference: Option<&ReferenceImage>,
    ) -> Result<Vec<ImageRef>, MockupError> {
        let Some(api_key) = self
            .settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
        else {
            warn!("no API key configured; generation skipped");
            return Err(MockupError::invalid_credentials());
        };

        let payload = build_payload(prompt, reference);
        let endpoint = self.settings.endpoint();
        let call = TransportCall {
            endpoint: &endpoint,
            api_key,
            payload: &payload,
            timeout: self.settings.request_timeout,
        };
        info!(
            model = %self.settings.model,
            branches = PARALLEL_GENERATIONS,
            has_reference = reference.is_some(),
            "requesting mockup images"
        );

        let transport = self.transport.as_ref();
        let outcomes = thread::scope(|scope| {
            let handles = (0..PARALLEL_GENERATIONS)
                .map(|branch| {
                    scope.spawn(move || {
                        debug!(branch, "generation branch started");
                        transport.generate_content(&call)
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(TransportError::InvalidPayload(
                            "generation branch panicked".to_string(),
                        ))
                    })
                })
                .collect::<Vec<_>>()
        });

        collect_images(outcomes)
    }
}

fn collect_images(
    outcomes: Vec<Result<Value, TransportError>>,
) -> Result<Vec<ImageRef>, MockupError> {
    if let Some(err) = outcomes
        .iter()
        .filter_map(|outcome| outcome.as_ref().err())
        .find(|err| err.is_credential())
    {
        warn!(error = %err, "service rejected the API key");
        return Err(MockupError::invalid_credentials());
    }

    let mut images = Vec::with_capacity(outcomes.len());
    for (branch, outcome) in outcomes.into_iter().enumerate() {
        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                warn!(branch, error = %err, "generation branch failed");
                return Err(MockupError::Generation(format!(
                    "Image generation failed: {err}"
                )));
            }
        };
        let Some(image) = extract_first_image(&response) else {
            warn!(branch, "response did not contain image data");
            return Err(MockupError::missing_image_data());
        };
        if let Err(err) = image.decode() {
            warn!(branch, error = %err, "response image data is not valid base64");
            return Err(MockupError::missing_image_data());
        }
        images.push(image);
    }
    Ok(images)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use serde_json::{json, Value};

    use super::{ImageTransport, TransportCall, TransportError};

    pub(crate) fn image_response(media_type: Option<&str>, data: &str) -> Value {
        let mut inline = json!({ "data": data });
        if let Some(media_type) = media_type {
            inline["mimeType"] = json!(media_type);
        }
        json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": inline }] }
            }]
        })
    }

    /// Replays scripted outcomes in call order and records every payload.
    #[derive(Clone, Default)]
    pub(crate) struct ScriptedTransport {
        pub(crate) calls: Arc<AtomicUsize>,
        pub(crate) payloads: Arc<Mutex<Vec<Value>>>,
        script: Arc<Mutex<Vec<Result<Value, TransportError>>>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new(script: Vec<Result<Value, TransportError>>) -> Self {
            Self {
                script: Arc::new(Mutex::new(script)),
                ..Self::default()
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ImageTransport for ScriptedTransport {
        fn generate_content(&self, call: &TransportCall<'_>) -> Result<Value, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payloads
                .lock()
                .expect("payload lock")
                .push(call.payload.clone());
            let mut script = self.script.lock().expect("script lock");
            if script.is_empty() {
                return Err(TransportError::InvalidPayload("script exhausted".to_string()));
            }
            script.remove(0)
        }
    }
}
