use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use mockup_contracts::events::{
    EventPayload, EventWriter, ARTIFACT_CREATED, GENERATION_FAILED, GENERATION_REQUESTED,
    PROMPT_COMPILED, RUN_FINISHED, RUN_STARTED,
};
use mockup_contracts::mockup::{self, MockupConfiguration, RoomCategory, SubjectCategory};
use mockup_contracts::prompt;
use mockup_contracts::runs::{
    prompt_fingerprint, write_receipt, ReceiptArtifact, ReceiptRequest, RunReceipt,
};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

pub mod client;
pub mod error;
pub mod gemini;
pub mod reference;
pub mod settings;

pub use client::{GenerationClient, ImageRef, ImageTransport, PARALLEL_GENERATIONS};
pub use error::MockupError;
pub use gemini::GeminiTransport;
pub use reference::ReferenceImage;
pub use settings::GeminiSettings;

/// One form submission.
#[derive(Debug, Clone)]
pub struct MockupRequest {
    pub description: String,
    pub room: RoomCategory,
    pub subject: SubjectCategory,
    pub reference: Option<ReferenceImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedMockup {
    pub description: String,
    pub configuration: MockupConfiguration,
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct MockupArtifact {
    pub index: usize,
    pub path: PathBuf,
    pub image: ImageRef,
}

#[derive(Debug, Clone)]
pub struct MockupOutcome {
    pub run_id: String,
    pub prompt: String,
    pub artifacts: Vec<MockupArtifact>,
    pub receipt_path: PathBuf,
}

impl MockupOutcome {
    pub fn data_uris(&self) -> Vec<String> {
        self.artifacts
            .iter()
            .map(|artifact| artifact.image.to_data_uri())
            .collect()
    }
}

/// Validates the submission and renders its prompt without touching the network.
///
/// A blank description is only accepted alongside a reference image, in which
/// case it is replaced by a description naming the file.
pub fn prepare(request: &MockupRequest) -> Result<PreparedMockup, MockupError> {
    let description = match (request.description.trim(), request.reference.as_ref()) {
        ("", Some(reference)) => prompt::default_description_for_file(&reference.name),
        ("", None) => return Err(MockupError::missing_description()),
        (text, _) => text.to_string(),
    };
    let configuration = mockup::build(request.room, request.subject);
    let prompt = prompt::compile(&configuration, &description, request.reference.is_some());
    Ok(PreparedMockup {
        description,
        configuration,
        prompt,
    })
}

pub struct MockupEngine {
    run_dir: PathBuf,
    run_id: String,
    events: EventWriter,
    client: GenerationClient,
    artifact_count: usize,
    batches: usize,
}

impl MockupEngine {
    pub fn new(
        run_dir: impl Into<PathBuf>,
        events_path: impl Into<PathBuf>,
        client: GenerationClient,
    ) -> anyhow::Result<Self> {
        let run_dir = run_dir.into();
        fs::create_dir_all(&run_dir)
            .with_context(|| format!("failed to create {}", run_dir.display()))?;
        let run_id = run_dir
            .file_name()
            .and_then(|value| value.to_str())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("run-{}", uuid::Uuid::new_v4()));
        let events = EventWriter::new(events_path.into(), run_id.clone());

        events.emit(
            RUN_STARTED,
            map_object(json!({
                "out_dir": run_dir.to_string_lossy(),
                "model": client.settings().model,
            })),
        )?;

        Ok(Self {
            run_dir,
            run_id,
            events,
            client,
            artifact_count: 0,
            batches: 0,
        })
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn event_writer(&self) -> EventWriter {
        self.events.clone()
    }

    pub fn generate(&mut self, request: &MockupRequest) -> Result<MockupOutcome, MockupError> {
        match self.generate_inner(request) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "mockup generation failed");
                let payload = map_object(json!({
                    "kind": err.kind(),
                    "message": err.to_string(),
                }));
                if let Err(emit_err) = self.events.emit(GENERATION_FAILED, payload) {
                    warn!(error = %emit_err, "failed to record generation_failed event");
                }
                Err(err)
            }
        }
    }

    fn generate_inner(&mut self, request: &MockupRequest) -> Result<MockupOutcome, MockupError> {
        let prepared = prepare(request)?;
        let prompt_sha256 = prompt_fingerprint(&prepared.prompt);
        self.events.emit(
            PROMPT_COMPILED,
            map_object(json!({
                "room": request.room.id(),
                "subject": request.subject.id(),
                "has_reference_image": request.reference.is_some(),
                "prompt_sha256": prompt_sha256,
                "prompt_chars": prepared.prompt.chars().count(),
            })),
        )?;

        let settings = self.client.settings();
        self.events.emit(
            GENERATION_REQUESTED,
            map_object(json!({
                "model": settings.model,
                "endpoint": settings.endpoint(),
                "branches": PARALLEL_GENERATIONS,
            })),
        )?;

        let images = self
            .client
            .generate(&prepared.prompt, request.reference.as_ref())?;

        let decoded = images
            .into_iter()
            .map(|image| {
                let bytes = image
                    .decode()
                    .map_err(|_| MockupError::missing_image_data())?;
                Ok((image, bytes))
            })
            .collect::<Result<Vec<_>, MockupError>>()?;

        // Unique per generate call on this engine.
        let batch = format!("{}-{:02}", Utc::now().timestamp_millis(), self.batches);
        self.batches += 1;
        let mut artifacts = Vec::with_capacity(decoded.len());
        for (index, (image, bytes)) in decoded.into_iter().enumerate() {
            let path = self
                .run_dir
                .join(format!("artifact-{}-{:02}.{}", batch, index, image.extension()));
            fs::write(&path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = bytes.len(), "mockup image saved");
            artifacts.push((MockupArtifact { index, path, image }, bytes.len() as u64));
        }

        let mut receipt = RunReceipt::new(
            self.run_id.clone(),
            ReceiptRequest {
                description: prepared.description.clone(),
                room: request.room,
                subject: request.subject,
                has_reference_image: request.reference.is_some(),
                reference_image_name: request.reference.as_ref().map(|r| r.name.clone()),
            },
            self.client.settings().model.clone(),
            prepared.prompt.clone(),
            prepared.configuration,
        )
        .with_provider_request(&client::build_payload(
            &prepared.prompt,
            request.reference.as_ref(),
        ));
        receipt.artifacts = artifacts
            .iter()
            .map(|(artifact, bytes)| ReceiptArtifact {
                index: artifact.index,
                path: artifact.path.clone(),
                media_type: artifact.image.media_type.clone(),
                bytes: *bytes,
            })
            .collect();
        let receipt_path = self.run_dir.join(format!("receipt-{batch}.json"));
        write_receipt(&receipt_path, &receipt)?;

        for (artifact, bytes) in &artifacts {
            self.events.emit(
                ARTIFACT_CREATED,
                map_object(json!({
                    "index": artifact.index,
                    "image_path": artifact.path.to_string_lossy(),
                    "media_type": artifact.image.media_type,
                    "bytes": bytes,
                    "receipt_path": receipt_path.to_string_lossy(),
                })),
            )?;
        }
        self.artifact_count += artifacts.len();

        Ok(MockupOutcome {
            run_id: self.run_id.clone(),
            prompt: prepared.prompt,
            artifacts: artifacts.into_iter().map(|(artifact, _)| artifact).collect(),
            receipt_path,
        })
    }

    pub fn finish(&mut self) -> anyhow::Result<()> {
        self.events.emit(
            RUN_FINISHED,
            map_object(json!({
                "total_artifacts": self.artifact_count,
            })),
        )?;
        Ok(())
    }
}

fn map_object(value: Value) -> EventPayload {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::client::testing::{image_response, ScriptedTransport};
    use super::client::TransportError;
    use super::*;

    const STRIPES: &str = "thin gold vertical stripes on sage green";

    fn bedroom_request(description: &str) -> MockupRequest {
        MockupRequest {
            description: description.to_string(),
            room: RoomCategory::Bedroom,
            subject: SubjectCategory::Woman,
            reference: None,
        }
    }

    fn engine(run_dir: &Path, transport: ScriptedTransport) -> anyhow::Result<MockupEngine> {
        let client =
            GenerationClient::new(GeminiSettings::default().with_api_key("test-key"), transport);
        MockupEngine::new(run_dir, run_dir.join("events.jsonl"), client)
    }

    #[test]
    fn bedroom_stripes_scenario_produces_two_images() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let run_dir = temp.path().join("run-bedroom");
        let transport = ScriptedTransport::new(vec![
            Ok(image_response(Some("image/png"), "aGVsbG8=")),
            Ok(image_response(None, "d29ybGQ=")),
        ]);
        let mut engine = engine(&run_dir, transport.clone())?;

        let outcome = engine.generate(&bedroom_request(STRIPES))?;
        engine.finish()?;

        assert!(outcome.prompt.contains("BEDROOM"));
        assert!(outcome.prompt.contains("Wall behind the bed headboard."));
        assert!(outcome.prompt.contains("Young American woman"));
        assert!(outcome.prompt.contains(STRIPES));
        assert_eq!(transport.call_count(), 2);

        let uris = outcome.data_uris();
        assert_eq!(uris.len(), 2);
        assert!(uris.iter().all(|uri| uri.starts_with("data:image/")));
        for artifact in &outcome.artifacts {
            assert!(artifact.path.exists());
        }

        let receipt = mockup_contracts::runs::load_receipt(&outcome.receipt_path)?;
        assert_eq!(receipt.run_id, "run-bedroom");
        assert_eq!(receipt.artifacts.len(), 2);
        assert_eq!(receipt.prompt, outcome.prompt);

        let types = engine.event_writer().event_types()?;
        assert_eq!(
            types,
            vec![
                "run_started",
                "prompt_compiled",
                "generation_requested",
                "artifact_created",
                "artifact_created",
                "run_finished",
            ]
        );
        Ok(())
    }

    #[test]
    fn blank_description_is_rejected_before_any_request() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let transport = ScriptedTransport::new(Vec::new());
        let mut engine = engine(temp.path(), transport.clone())?;

        let err = engine.generate(&bedroom_request("   \n")).unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.to_string(), error::MISSING_DESCRIPTION);
        assert_eq!(transport.call_count(), 0);

        let raw = fs::read_to_string(temp.path().join("events.jsonl"))?;
        let last: Value = serde_json::from_str(raw.lines().last().unwrap_or("{}"))?;
        assert_eq!(last["type"], "generation_failed");
        assert_eq!(last["kind"], "validation");
        Ok(())
    }

    #[test]
    fn partial_failure_writes_no_artifacts() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let run_dir = temp.path().join("run");
        let transport = ScriptedTransport::new(vec![
            Ok(image_response(Some("image/png"), "aGVsbG8=")),
            Err(TransportError::InvalidPayload("truncated".to_string())),
        ]);
        let mut engine = engine(&run_dir, transport)?;

        let err = engine.generate(&bedroom_request(STRIPES)).unwrap_err();
        assert_eq!(err.kind(), "generation");
        let written = fs::read_dir(&run_dir)?
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("artifact-"))
            .count();
        assert_eq!(written, 0);
        assert_eq!(files_with_prefix(&run_dir, "receipt-")?, 0);
        Ok(())
    }

    fn files_with_prefix(dir: &Path, prefix: &str) -> anyhow::Result<usize> {
        Ok(fs::read_dir(dir)?
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
            .count())
    }

    #[test]
    fn undecodable_image_writes_nothing_to_disk() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let run_dir = temp.path().join("run");
        let transport = ScriptedTransport::new(vec![
            Ok(image_response(Some("image/png"), "aGVsbG8=")),
            Ok(image_response(Some("image/png"), "!!not base64!!")),
        ]);
        let mut engine = engine(&run_dir, transport)?;

        let err = engine.generate(&bedroom_request(STRIPES)).unwrap_err();
        assert_eq!(err.kind(), "generation");
        assert_eq!(err.to_string(), error::MISSING_IMAGE_DATA);
        assert_eq!(files_with_prefix(&run_dir, "artifact-")?, 0);
        assert_eq!(files_with_prefix(&run_dir, "receipt-")?, 0);
        Ok(())
    }

    #[test]
    fn repeated_generate_keeps_every_receipt() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let run_dir = temp.path().join("run");
        let transport = ScriptedTransport::new(vec![
            Ok(image_response(Some("image/png"), "aGVsbG8=")),
            Ok(image_response(Some("image/png"), "aGVsbG8=")),
            Ok(image_response(Some("image/png"), "d29ybGQ=")),
            Ok(image_response(Some("image/png"), "d29ybGQ=")),
        ]);
        let mut engine = engine(&run_dir, transport)?;

        let first = engine.generate(&bedroom_request(STRIPES))?;
        let second = engine.generate(&bedroom_request("navy damask"))?;

        assert_ne!(first.receipt_path, second.receipt_path);
        assert_eq!(files_with_prefix(&run_dir, "receipt-")?, 2);
        assert_eq!(files_with_prefix(&run_dir, "artifact-")?, 4);
        let earlier = mockup_contracts::runs::load_receipt(&first.receipt_path)?;
        assert_eq!(earlier.prompt, first.prompt);
        assert!(earlier.prompt.contains(STRIPES));
        Ok(())
    }

    #[test]
    fn reference_only_submission_uses_file_description() -> anyhow::Result<()> {
        let mut request = bedroom_request("");
        request.reference = Some(ReferenceImage::new(b"png".to_vec(), "image/png", "palms.png")?);

        let prepared = prepare(&request)?;
        assert_eq!(
            prepared.description,
            "Custom pattern from uploaded file: palms.png"
        );
        assert!(prepared.prompt.contains("provided in the input image"));
        assert!(!prepared.prompt.contains("palms.png"));
        Ok(())
    }

    #[test]
    fn receipt_omits_reference_bytes() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let transport = ScriptedTransport::new(vec![
            Ok(image_response(Some("image/png"), "aGVsbG8=")),
            Ok(image_response(Some("image/png"), "aGVsbG8=")),
        ]);
        let mut engine = engine(temp.path(), transport)?;
        let mut request = bedroom_request(STRIPES);
        request.reference = Some(ReferenceImage::new(b"png".to_vec(), "image/png", "p.png")?);

        let outcome = engine.generate(&request)?;
        let raw: Value = serde_json::from_str(&fs::read_to_string(&outcome.receipt_path)?)?;
        assert_eq!(
            raw["provider_request"]["contents"][0]["parts"][0]["inlineData"]["data"],
            "<omitted>"
        );
        assert_eq!(raw["request"]["reference_image_name"], "p.png");
        Ok(())
    }
}
