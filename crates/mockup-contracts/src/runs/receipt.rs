use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::events::now_utc_iso;
use crate::mockup::{MockupConfiguration, RoomCategory, SubjectCategory};

pub const RECEIPT_SCHEMA_VERSION: u64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRequest {
    pub description: String,
    pub room: RoomCategory,
    pub subject: SubjectCategory,
    pub has_reference_image: bool,
    pub reference_image_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptArtifact {
    pub index: usize,
    pub path: PathBuf,
    pub media_type: String,
    pub bytes: u64,
}

/// Everything needed to explain how one run's images were produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReceipt {
    pub schema_version: u64,
    pub run_id: String,
    pub created_at: String,
    pub request: ReceiptRequest,
    pub model: String,
    pub prompt: String,
    pub prompt_sha256: String,
    pub configuration: MockupConfiguration,
    #[serde(default)]
    pub provider_request: Value,
    #[serde(default)]
    pub artifacts: Vec<ReceiptArtifact>,
}

impl RunReceipt {
    pub fn new(
        run_id: impl Into<String>,
        request: ReceiptRequest,
        model: impl Into<String>,
        prompt: impl Into<String>,
        configuration: MockupConfiguration,
    ) -> Self {
        let prompt = prompt.into();
        Self {
            schema_version: RECEIPT_SCHEMA_VERSION,
            run_id: run_id.into(),
            created_at: now_utc_iso(),
            request,
            model: model.into(),
            prompt_sha256: prompt_fingerprint(&prompt),
            prompt,
            configuration,
            provider_request: Value::Null,
            artifacts: Vec::new(),
        }
    }

    /// Stores the outbound payload with inline image data stripped.
    pub fn with_provider_request(mut self, payload: &Value) -> Self {
        self.provider_request = sanitize_payload(payload);
        self
    }
}

pub fn prompt_fingerprint(prompt: &str) -> String {
    hex::encode(Sha256::digest(prompt.as_bytes()))
}

pub fn write_receipt(path: &Path, receipt: &RunReceipt) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(receipt)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

pub fn load_receipt(path: &Path) -> anyhow::Result<RunReceipt> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid receipt {}", path.display()))
}

fn sanitize_payload(value: &Value) -> Value {
    match value {
        Value::Array(rows) => Value::Array(rows.iter().map(sanitize_payload).collect()),
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, row) in map {
                if key.eq_ignore_ascii_case("data") && row.is_string() {
                    out.insert(key.clone(), Value::String("<omitted>".to_string()));
                    continue;
                }
                out.insert(key.clone(), sanitize_payload(row));
            }
            Value::Object(out)
        }
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::mockup::build;

    fn sample_receipt() -> RunReceipt {
        let request = ReceiptRequest {
            description: "sage stripes".to_string(),
            room: RoomCategory::Bedroom,
            subject: SubjectCategory::Woman,
            has_reference_image: true,
            reference_image_name: Some("stripes.png".to_string()),
        };
        RunReceipt::new(
            "run-123",
            request,
            "gemini-2.5-flash-image",
            "A bedroom prompt",
            build(RoomCategory::Bedroom, SubjectCategory::Woman),
        )
    }

    #[test]
    fn receipt_round_trips_through_disk() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("run/receipt.json");
        let mut receipt = sample_receipt();
        receipt.artifacts.push(ReceiptArtifact {
            index: 0,
            path: temp.path().join("run/artifact-0.png"),
            media_type: "image/png".to_string(),
            bytes: 3,
        });
        write_receipt(&path, &receipt)?;

        let loaded = load_receipt(&path)?;
        assert_eq!(loaded, receipt);

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(raw["schema_version"], json!(RECEIPT_SCHEMA_VERSION));
        assert_eq!(raw["request"]["room"], json!("bedroom"));
        assert_eq!(raw["configuration"]["room"]["type"], json!("BEDROOM"));
        Ok(())
    }

    #[test]
    fn provider_request_omits_inline_image_bytes() {
        let payload = json!({
            "contents": [{
                "parts": [
                    {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}},
                    {"text": "prompt"}
                ]
            }]
        });
        let receipt = sample_receipt().with_provider_request(&payload);
        let part = &receipt.provider_request["contents"][0]["parts"][0]["inlineData"];
        assert_eq!(part["data"], json!("<omitted>"));
        assert_eq!(part["mimeType"], json!("image/png"));
        assert_eq!(
            receipt.provider_request["contents"][0]["parts"][1]["text"],
            json!("prompt")
        );
    }

    #[test]
    fn fingerprint_is_stable_hex_sha256() {
        let fingerprint = prompt_fingerprint("abc");
        assert_eq!(
            fingerprint,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(sample_receipt().prompt_sha256, prompt_fingerprint("A bedroom prompt"));
    }
}
