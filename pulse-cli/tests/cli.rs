//! End-to-end runs of `pulse` commands against a mock backend.

use std::path::Path;

use pulse_cli::{CliError, Invocation, parse_args, run};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Parse `line` with a config file in `dir` and the mock server as backend.
fn invocation(server: &MockServer, dir: &Path, line: &str) -> Invocation {
    let config = dir.join("pulse.json");
    std::fs::write(
        &config,
        json!({
            "timeout_secs": 5,
            "preferences_path": dir.join("prefs.json"),
        })
        .to_string(),
    )
    .expect("write config");
    let mut args = vec![
        "--config".to_string(),
        config.display().to_string(),
        "--base-url".to_string(),
        format!("{}/api", server.uri()),
    ];
    args.extend(line.split_whitespace().map(str::to_string));
    parse_args(args).expect("valid command line")
}

async fn run_line(server: &MockServer, dir: &Path, line: &str) -> Result<String, CliError> {
    let out = run(invocation(server, dir, line), Vec::new()).await?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

#[tokio::test]
async fn activities_are_searched_locally() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    Mock::given(method("GET"))
        .and(path("/api/v1/monitoring/activities"))
        .and(query_param("platform", "github"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1, "member_id": 3, "social_profile_id": 9, "platform": "github",
                "title": "Released v2.0", "created_at": "2024-03-09T08:30:00"
            },
            {
                "id": 2, "member_id": 4, "social_profile_id": 8, "platform": "github",
                "title": "Opened an issue", "created_at": "2024-03-09T09:00:00",
                "member": {
                    "id": 4, "name": "Grace", "email": "grace@example.com",
                    "created_at": "2024-01-01T00:00:00"
                }
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_line(&server, dir.path(), "activities --platform github --search release")
        .await
        .expect("command succeeds");
    assert_eq!(output, "2024-03-09 08:30\tgithub\tmember 3\tReleased v2.0\n");
}

#[tokio::test]
async fn streamed_generate_prints_text() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let body = [
        json!({"type": "start", "message": "starting"}),
        json!({"type": "content_chunk", "language": "english", "content": "All "}),
        json!({"type": "content_chunk", "language": "english", "content": "quiet."}),
        json!({"type": "complete", "summary": {"id": 12, "title": "Daily"}}),
    ]
    .iter()
    .map(|e| format!("data: {e}\n\n"))
    .collect::<String>();
    Mock::given(method("POST"))
        .and(path("/api/v1/monitoring/generate-daily-summary-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_line(&server, dir.path(), "generate daily --date 2024-03-09 --stream")
        .await
        .expect("command succeeds");
    assert_eq!(output, "== english ==\nAll quiet.\n");
}

#[tokio::test]
async fn streamed_generate_failure_exits_with_reason() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    Mock::given(method("POST"))
        .and(path("/api/v1/monitoring/generate-weekly-summary-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "data: {\"type\":\"error\",\"message\":\"no activities this week\"}\n\n",
            "text/event-stream",
        ))
        .mount(&server)
        .await;

    let err = run_line(&server, dir.path(), "generate weekly --stream")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "summary generation failed: no activities this week"
    );
}

/// Stdout that has been closed.
struct ClosedPipe;

impl std::io::Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn streamed_failure_reason_wins_over_closed_stdout() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    Mock::given(method("POST"))
        .and(path("/api/v1/monitoring/generate-daily-summary-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            concat!(
                "data: {\"type\":\"content_chunk\",\"language\":\"english\",\"content\":\"Half\"}\n\n",
                "data: {\"type\":\"error\",\"message\":\"quota exceeded\"}\n\n",
            ),
            "text/event-stream",
        ))
        .mount(&server)
        .await;

    let err = run(invocation(&server, dir.path(), "generate daily --stream"), ClosedPipe)
        .await
        .err()
        .expect("generation fails");
    assert!(matches!(err, CliError::GenerationFailed(ref reason) if reason == "quota exceeded"));
}

#[tokio::test]
async fn streamed_success_reports_closed_stdout() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    Mock::given(method("POST"))
        .and(path("/api/v1/monitoring/generate-daily-summary-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            concat!(
                "data: {\"type\":\"content_chunk\",\"language\":\"english\",\"content\":\"All quiet.\"}\n\n",
                "data: {\"type\":\"complete\",\"summary\":{\"id\":12,\"title\":\"Daily\"}}\n\n",
            ),
            "text/event-stream",
        ))
        .mount(&server)
        .await;

    let err = run(invocation(&server, dir.path(), "generate daily --stream"), ClosedPipe)
        .await
        .err()
        .expect("output error surfaces");
    assert!(matches!(err, CliError::Io(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
}

#[tokio::test]
async fn export_writes_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    Mock::given(method("GET"))
        .and(path("/api/v1/export/members/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("id,name\n1,Ada\n", "text/csv"))
        .mount(&server)
        .await;

    let target = dir.path().join("members.csv");
    let line = format!("export members csv --out {}", target.display());
    let output = run_line(&server, dir.path(), &line)
        .await
        .expect("command succeeds");
    assert!(output.starts_with("wrote 14 bytes to "));
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "id,name\n1,Ada\n");
}

#[tokio::test]
async fn dark_mode_persists_without_backend() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    assert_eq!(
        run_line(&server, dir.path(), "dark-mode").await.unwrap(),
        "dark mode: off\n"
    );
    assert_eq!(
        run_line(&server, dir.path(), "dark-mode toggle").await.unwrap(),
        "dark mode: on\n"
    );
    assert_eq!(
        run_line(&server, dir.path(), "dark-mode").await.unwrap(),
        "dark mode: on\n"
    );
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn backend_errors_propagate() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/users/me/github-status"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})))
        .mount(&server)
        .await;

    let err = run_line(&server, dir.path(), "github-status").await.unwrap_err();
    assert!(matches!(err, CliError::Client(_)));
    assert_eq!(err.to_string(), "unauthorized: Not authenticated");
}

#[tokio::test]
async fn help_needs_no_config() {
    let out = run(parse_args(Vec::new()).unwrap(), Vec::new()).await.unwrap();
    assert!(String::from_utf8(out).unwrap().starts_with("usage: pulse"));
}
