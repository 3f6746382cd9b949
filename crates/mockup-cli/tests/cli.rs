use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn mockup() -> Command {
    let mut cmd = Command::cargo_bin("mockup").expect("mockup binary");
    cmd.env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("GOOGLE_API_KEY")
        .env("RUST_LOG", "off");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("valid json output")
}

#[test]
fn options_lists_every_room_and_subject() {
    let parsed = stdout_json(mockup().args(["--json", "options"]));
    assert_eq!(parsed["rooms"].as_array().map(Vec::len), Some(3));
    assert_eq!(parsed["subjects"].as_array().map(Vec::len), Some(6));
    assert_eq!(parsed["rooms"][2]["label"], "Home Office");
}

#[test]
fn config_resolves_room_and_subject() {
    let parsed = stdout_json(mockup().args(["config", "--room", "home_office", "--subject", "child"]));
    assert_eq!(parsed["room"]["type"], "HOME OFFICE");
    assert_eq!(parsed["room"]["hero_wall"]["position"], "Main wall behind the desk.");
    assert!(parsed["subject"]["activity"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Playing with wooden toys"));
}

#[test]
fn prompt_embeds_description_for_bedroom_woman() {
    mockup()
        .args([
            "prompt",
            "--description",
            "thin gold vertical stripes on sage green",
            "--room",
            "bedroom",
            "--subject",
            "woman",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("BEDROOM"))
        .stdout(predicate::str::contains("Wall behind the bed headboard."))
        .stdout(predicate::str::contains("thin gold vertical stripes on sage green"));
}

#[test]
fn prompt_rejects_blank_description() {
    mockup()
        .args(["prompt", "--description", "   "])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Please provide a wallpaper description or upload a file.",
        ));
}

#[test]
fn prompt_rejects_unsupported_reference_type() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = temp.path().join("pattern.gif");
    std::fs::write(&path, b"GIF89a").expect("write gif");
    let parsed = {
        let out = mockup()
            .args(["--json", "prompt", "--reference"])
            .arg(&path)
            .assert()
            .code(1)
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice::<Value>(&out).expect("valid json output")
    };
    assert_eq!(parsed["kind"], "validation");
}

#[test]
fn unknown_room_is_a_usage_error() {
    mockup()
        .args(["config", "--room", "kitchen"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown room 'kitchen'"));
}

#[test]
fn generate_without_key_fails_with_setup_message() {
    let temp = tempfile::tempdir().expect("temp dir");
    let out_dir = temp.path().join("run");
    mockup()
        .current_dir(temp.path())
        .args(["generate", "--description", "palm leaves", "--out"])
        .arg(&out_dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "API key is invalid or not set. Please check your setup.",
        ));

    let events = std::fs::read_to_string(out_dir.join("events.jsonl")).expect("events written");
    assert!(events.contains("\"generation_failed\""));
    assert!(events.contains("\"run_finished\""));
}
