use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mockup_contracts::mockup::{self, RoomCategory, SubjectCategory};
use mockup_contracts::models::ModelSelector;
use mockup_engine::{
    prepare, GeminiSettings, GeminiTransport, GenerationClient, MockupEngine, MockupError,
    MockupRequest, ReferenceImage,
};
use serde_json::{json, Value};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "mockup",
    version,
    about = "Photorealistic wallpaper room mockups"
)]
struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the room and subject choices.
    Options,
    /// Print the resolved scene configuration.
    Config(SceneArgs),
    /// Print the compiled prompt without calling the image service.
    Prompt(PromptArgs),
    /// Generate two mockup candidates.
    Generate(GenerateArgs),
}

#[derive(Debug, Parser)]
struct SceneArgs {
    #[arg(long, default_value = "living_room")]
    room: RoomCategory,
    #[arg(long, default_value = "woman")]
    subject: SubjectCategory,
}

#[derive(Debug, Parser)]
struct PromptArgs {
    #[arg(long, default_value = "")]
    description: String,
    #[command(flatten)]
    scene: SceneArgs,
    #[arg(long, help = "Pattern image (PNG, JPEG or WEBP)")]
    reference: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    #[command(flatten)]
    prompt: PromptArgs,
    #[arg(long)]
    out: PathBuf,
    #[arg(long)]
    events: Option<PathBuf>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long, help = "Also print each image as a data URI")]
    data_uris: bool,
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mockup_cli=info,mockup_engine=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("mockup error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Options => run_options(cli.json),
        Command::Config(args) => run_config(args),
        Command::Prompt(args) => run_prompt(args, cli.json),
        Command::Generate(args) => run_generate(args, cli.json),
    }
}

fn run_options(as_json: bool) -> Result<i32> {
    if as_json {
        let rooms = RoomCategory::ALL
            .iter()
            .map(|room| json!({ "id": room.id(), "label": room.label() }))
            .collect::<Vec<Value>>();
        let subjects = SubjectCategory::ALL
            .iter()
            .map(|subject| json!({ "id": subject.id(), "label": subject.label() }))
            .collect::<Vec<Value>>();
        print_json(&json!({ "rooms": rooms, "subjects": subjects }))?;
        return Ok(0);
    }
    println!("Rooms:");
    for room in RoomCategory::ALL {
        println!("  {:<14} {}", room.id(), room.label());
    }
    println!("Subjects:");
    for subject in SubjectCategory::ALL {
        println!("  {:<14} {}", subject.id(), subject.label());
    }
    Ok(0)
}

fn run_config(args: SceneArgs) -> Result<i32> {
    let configuration = mockup::build(args.room, args.subject);
    print_json(&serde_json::to_value(configuration)?)?;
    Ok(0)
}

fn load_request(args: &PromptArgs) -> Result<MockupRequest, MockupError> {
    let reference = args
        .reference
        .as_deref()
        .map(ReferenceImage::from_path)
        .transpose()?;
    Ok(MockupRequest {
        description: args.description.clone(),
        room: args.scene.room,
        subject: args.scene.subject,
        reference,
    })
}

fn run_prompt(args: PromptArgs, as_json: bool) -> Result<i32> {
    let prepared = match load_request(&args).and_then(|request| prepare(&request)) {
        Ok(prepared) => prepared,
        Err(err) => return report_failure(&err, as_json),
    };
    if as_json {
        print_json(&json!({
            "description": prepared.description,
            "prompt": prepared.prompt,
        }))?;
    } else {
        println!("{}", prepared.prompt);
    }
    Ok(0)
}

fn run_generate(args: GenerateArgs, as_json: bool) -> Result<i32> {
    let request = match load_request(&args.prompt) {
        Ok(request) => request,
        Err(err) => return report_failure(&err, as_json),
    };

    let mut settings = GeminiSettings::from_env();
    let requested = args.model.as_deref().or(Some(settings.model.as_str()));
    let selection = ModelSelector::new(None)
        .select(requested, "image")
        .map_err(anyhow::Error::msg)?;
    if let (Some(reason), Some(_)) = (&selection.fallback_reason, &selection.requested) {
        warn!(reason = %reason, model = %selection.model.name, "image model fallback");
    }
    settings = settings.with_model(selection.model.name);

    let events_path = args
        .events
        .clone()
        .unwrap_or_else(|| args.out.join("events.jsonl"));
    let client = GenerationClient::new(settings, GeminiTransport::new());
    let mut engine = MockupEngine::new(&args.out, &events_path, client)
        .with_context(|| format!("failed to start run in {}", args.out.display()))?;

    let outcome = engine.generate(&request);
    engine.finish()?;
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => return report_failure(&err, as_json),
    };

    if as_json {
        let artifacts = outcome
            .artifacts
            .iter()
            .map(|artifact| {
                let mut row = json!({
                    "index": artifact.index,
                    "path": artifact.path.to_string_lossy(),
                    "media_type": artifact.image.media_type,
                });
                if args.data_uris {
                    row["data_uri"] = json!(artifact.image.to_data_uri());
                }
                row
            })
            .collect::<Vec<Value>>();
        print_json(&json!({
            "run_id": outcome.run_id,
            "receipt": outcome.receipt_path.to_string_lossy(),
            "artifacts": artifacts,
        }))?;
        return Ok(0);
    }

    for artifact in &outcome.artifacts {
        println!("{}", artifact.path.display());
        if args.data_uris {
            println!("{}", artifact.image.to_data_uri());
        }
    }
    println!("Receipt: {}", outcome.receipt_path.display());
    Ok(0)
}

fn report_failure(err: &MockupError, as_json: bool) -> Result<i32> {
    if as_json {
        print_json(&json!({ "error": err.to_string(), "kind": err.kind() }))?;
    } else {
        eprintln!("{err}");
    }
    Ok(1)
}

fn print_json(value: &Value) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
