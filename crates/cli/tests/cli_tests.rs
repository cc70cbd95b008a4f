//! CLI integration tests
use axum::Json;
use axum::Router;
use axum::routing::post;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("overview");
    cmd.env_remove("GOOGLE_API_KEY")
        .env_remove("OVERVIEW_GEMINI_BASE_URL")
        .env("XDG_CONFIG_HOME", "/nonexistent/overview-test-config");
    cmd
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

/// Starts a stand-in for the Gemini endpoint on a background runtime.
fn fake_gemini() -> (tokio::runtime::Runtime, String) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let base = runtime.block_on(async {
        let app = Router::new().route(
            "/v1beta/models/{target}",
            post(|| async {
                Json(serde_json::json!({
                    "candidates": [{"content": {"parts": [{"text": "Score: 8/10. Tighten the intro."}]}}],
                    "usageMetadata": {"promptTokenCount": 20, "candidatesTokenCount": 7, "totalTokenCount": 27}
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    });
    (runtime, base)
}

#[test]
fn test_cli_fetch_file_input() {
    cmd()
        .args(["fetch", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Feed your starter twice a day for a week before baking."))
        .stdout(predicate::str::contains("Recipes").not());
}

#[test]
fn test_cli_fetch_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("article.html")).unwrap();
    cmd()
        .args(["fetch", "-"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sourdough bread relies"));
}

#[test]
fn test_cli_fetch_json() {
    cmd()
        .args(["fetch", "--json", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("\"paragraphs\": 4"))
        .stdout(predicate::str::contains("How to Bake Sourdough Bread"));
}

#[test]
fn test_cli_fetch_without_paragraphs_warns() {
    cmd()
        .args(["fetch", &get_fixture_path("no_paragraphs.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("No paragraph text"));
}

#[test]
fn test_cli_fetch_invalid_file() {
    cmd().args(["fetch", "nonexistent.html"]).assert().failure();
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", "fetch", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Overview"))
        .stderr(predicate::str::contains("Paragraphs:"));
}

#[test]
fn test_cli_models() {
    cmd()
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-1.0-pro"))
        .stdout(predicate::str::contains("gemini-1.5-flash-latest"));
}

#[test]
fn test_cli_criteria_builtin_and_file() {
    cmd()
        .arg("criteria")
        .assert()
        .success()
        .stdout(predicate::str::contains("clarity"))
        .stdout(predicate::str::contains("trust-signals"));

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("criteria.json");
    std::fs::write(
        &path,
        r#"[{"id": "tone", "name": "Tone", "template": "Rate the tone:\n{user_content}"}]"#,
    )
    .unwrap();

    cmd()
        .args(["criteria", "--criteria", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("tone"))
        .stdout(predicate::str::contains("clarity").not());
}

#[test]
fn test_cli_criteria_file_with_bad_template() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("criteria.json");
    std::fs::write(&path, r#"[{"id": "tone", "name": "Tone", "template": "no slot here"}]"#).unwrap();

    cmd()
        .args(["criteria", "--criteria", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load criteria"));
}

#[test]
fn test_cli_guide() {
    cmd()
        .arg("guide")
        .assert()
        .success()
        .stdout(predicate::str::contains("When Might an AI Overview Appear?"))
        .stdout(predicate::str::contains("Does it comply with Google's content policies?"));
}

#[test]
fn test_cli_assess() {
    cmd()
        .args(["assess", "--topic", "sourdough starter", "--when", "1,2,3,4", "--content", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("An AI Overview for 'sourdough starter' seems plausible"))
        .stdout(predicate::str::contains("might need significant improvement"));
}

#[test]
fn test_cli_assess_requires_topic() {
    cmd().args(["assess", "--topic", "  "]).assert().code(2);
}

#[test]
fn test_cli_assess_unknown_question() {
    cmd()
        .args(["assess", "--topic", "x", "--content", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Question 6 does not exist"));
}

#[test]
fn test_cli_analyze_without_key_warns() {
    cmd()
        .args(["analyze", "--text", "Some page text"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Google AI not configured"));
}

#[test]
fn test_cli_analyze_requires_source() {
    cmd().args(["analyze", "--api-key", "key"]).assert().failure();
}

#[test]
fn test_cli_analyze_sources_are_exclusive() {
    cmd()
        .args(["analyze", "--text", "a", "--topic", "b"])
        .assert()
        .failure();
}

#[test]
fn test_cli_analyze_unknown_criterion() {
    cmd()
        .args(["analyze", "--topic", "bread", "--api-key", "key", "-c", "readability"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown analysis criterion: readability"));
}

#[test]
fn test_cli_analyze_with_fake_backend() {
    let (_runtime, base) = fake_gemini();

    cmd()
        .args(["analyze", "--html", &get_fixture_path("article.html"), "-c", "clarity"])
        .env("GOOGLE_API_KEY", "test-key")
        .env("OVERVIEW_GEMINI_BASE_URL", &base)
        .assert()
        .success()
        .stdout(predicate::str::contains("Clarity & Conciseness Analysis"))
        .stdout(predicate::str::contains("Score: 8/10. Tighten the intro."));
}

#[test]
fn test_cli_analyze_json_output() {
    let (_runtime, base) = fake_gemini();

    let output = cmd()
        .args(["analyze", "--topic", "sourdough", "--json", "--api-key", "test-key"])
        .env("OVERVIEW_GEMINI_BASE_URL", &base)
        .output()
        .unwrap();

    assert!(output.status.success());
    let analyses: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = analyses.as_array().unwrap().iter().filter_map(|a| a["criterion"].as_str()).collect();
    assert_eq!(ids, vec!["clarity", "trust-signals"]);
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("overview"));
}

fn long_flags(script: &str) -> std::collections::BTreeSet<String> {
    script
        .split(|c: char| c.is_whitespace() || c == '"' || c == '\'')
        .filter(|token| token.starts_with("--") && token.len() > 2)
        .map(str::to_string)
        .collect()
}

#[test]
fn test_build_time_completions_match_cli() {
    let generated = std::fs::read_to_string(concat!(env!("OUT_DIR"), "/completions/overview.bash")).unwrap();
    let output = cmd().args(["completions", "bash"]).output().unwrap();
    let runtime = String::from_utf8(output.stdout).unwrap();

    let generated_flags = long_flags(&generated);
    let runtime_flags = long_flags(&runtime);
    assert!(generated_flags.contains("--api-key"));
    assert!(!generated.contains("--api_key"));
    let unknown: Vec<_> = generated_flags.difference(&runtime_flags).collect();
    assert!(unknown.is_empty(), "flags the CLI does not accept: {unknown:?}");
}

#[test]
fn test_cli_assess_accepts_comma_separated_numbers() {
    cmd()
        .args(["assess", "--topic", "bread", "--when", "1,2", "--when", "3,4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("An AI Overview for 'bread' seems plausible"));
}
