//! End-to-end tests for the `flashcards` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn flashcards() -> Command {
    #[allow(clippy::expect_used)]
    let mut cmd = Command::cargo_bin("flashcards").expect("binary built");
    cmd.env_remove("HF_API_TOKEN")
        .env_remove("FLASHCARDS_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_sanitize_from_stdin() {
    flashcards()
        .arg("sanitize")
        .write_stdin(r#"Here are your cards: [{"question":"Q1","answer":"A1"] Hope that helps!"#)
        .assert()
        .success()
        .stdout(r#"[{"question":"Q1","answer":"A1"}]"#.to_string() + "\n");
}

#[test]
fn test_sanitize_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let raw = dir.path().join("raw.txt");
    fs::write(&raw, "no list here").expect("write");

    flashcards()
        .arg("sanitize")
        .arg(&raw)
        .assert()
        .success()
        .stdout("no list here\n");
}

#[test]
fn test_export_deck_to_quizlet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let deck = dir.path().join("deck.json");
    fs::write(
        &deck,
        r#"[{"question":"Q1\nLine2","answer":"A1"},{"question":"Q2","answer":"A2"}]"#,
    )
    .expect("write");

    flashcards()
        .arg("export")
        .arg(&deck)
        .args(["--format", "quizlet"])
        .assert()
        .success()
        .stdout("Q1 Line2\tA1\n\nQ2\tA2\n");
}

#[test]
fn test_export_deck_to_csv_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let deck = dir.path().join("deck.json");
    let out = dir.path().join("cards.csv");
    fs::write(&deck, r#"[{"question":"Capital of Peru?","answer":"Lima"}]"#).expect("write");

    flashcards()
        .arg("export")
        .arg(&deck)
        .args(["-f", "csv", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved to:"));

    let csv = fs::read_to_string(&out).expect("read output");
    assert_eq!(csv, "question,answer\nCapital of Peru?,Lima\n");
}

#[test]
fn test_generate_requires_token() {
    flashcards()
        .args(["generate", "--text", "Some notes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HF_API_TOKEN not set"));
}

#[test]
fn test_generate_rejects_empty_input() {
    flashcards()
        .env("HF_API_TOKEN", "hf_test")
        .args(["generate", "--text", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please provide some text to generate flashcards from",
        ));
}

#[test]
fn test_generate_rejects_unsupported_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let slides = dir.path().join("slides.pptx");
    fs::write(&slides, "binary").expect("write");

    flashcards()
        .env("HF_API_TOKEN", "hf_test")
        .arg("generate")
        .arg(&slides)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_from_text_file_against_mock_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "generated_text": "[{\"question\":\"What is Ohm's law?\",\"answer\":\"V = IR\"}]"
        }])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let notes = dir.path().join("physics.txt");
    fs::write(&notes, "Voltage equals current times resistance.").expect("write");

    flashcards()
        .env("HF_API_TOKEN", "hf_test")
        .arg("generate")
        .arg(&notes)
        .args(["--subject", "physics", "--format", "quizlet", "--api-url"])
        .arg(format!("{}/generate", server.uri()))
        .assert()
        .success()
        .stdout("What is Ohm's law?\tV = IR\n");
}
