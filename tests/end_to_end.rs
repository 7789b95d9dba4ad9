//! Dashboard flows through the umbrella crate, against a mock backend.
//!
//! 1. **Refresh after generation**: stream a summary while watching the
//!    session, then reload the list the way the dashboard does.
//! 2. **Handler swap**: the same generator drives a callback handler and
//!    then an assembler; restarting silences the first one.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pulse::prelude::*;
use pulse::pulse_types::{SummaryLanguage, SummaryQuery};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PulseClient {
    PulseClient::new(ClientConfig::default())
        .expect("client builds")
        .base_url(format!("{}/api", server.uri()))
}

fn summary(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Weekly summary {id}"),
        "content": "本周：两次发布",
        "content_en": "This week: two releases",
        "summary_type": "weekly",
        "created_at": "2024-03-10T18:00:00Z"
    })
}

fn sse(envelopes: &[serde_json::Value]) -> String {
    envelopes.iter().map(|e| format!("data: {e}\r\n\r\n")).collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Refresh after generation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn generation_then_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/monitoring/generate-weekly-summary-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            sse(&[
                json!({"type": "start", "message": "starting weekly summary"}),
                json!({"type": "progress", "progress": 140, "message": "overshoot"}),
                json!({"type": "heartbeat"}),
                json!({"type": "content_start", "language": "chinese"}),
                json!({"type": "content_chunk", "language": "chinese", "content": "本周：两次发布"}),
                json!({"type": "content_end", "language": "chinese"}),
                json!({"type": "content_chunk", "language": "english", "content": "This week: two releases"}),
                json!({"type": "complete", "summary": summary(21)}),
            ]),
            "text/event-stream",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/summaries/"))
        .and(query_param("language", "english"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([summary(21), summary(20)])))
        .expect(1)
        .mount(&server)
        .await;

    let generator = SummaryGenerator::new(client_for(&server));
    let assembler = SummaryAssembler::new();
    let mut snapshots = assembler.subscribe();
    let handle = generator
        .start(SummaryKind::weekly(None), assembler)
        .expect("started");

    let mut highest = 0;
    let terminal = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let session = snapshots.borrow_and_update();
                highest = highest.max(session.progress);
                if let Some(terminal) = &session.terminal {
                    break terminal.clone();
                }
            }
            if snapshots.changed().await.is_err() {
                break snapshots.borrow().terminal.clone().expect("settled");
            }
        }
    })
    .await
    .expect("generation settles");
    assert!(matches!(terminal, Terminal::Completed(ref s) if s.id == 21));
    assert!(highest <= 100);

    let (outcome, assembler) = handle.join().await.expect("joined");
    assert_eq!(outcome, IngestOutcome::Completed);
    assert_eq!(assembler.text(CHINESE), Some("本周：两次发布"));
    assert_eq!(assembler.text(ENGLISH), Some("This week: two releases"));
    assert_eq!(assembler.progress(), 0);
    assert!(assembler.message().is_empty());

    let list = generator
        .client()
        .summaries(&SummaryQuery {
            language: Some(SummaryLanguage::English),
            ..SummaryQuery::default()
        })
        .await
        .expect("summaries");
    assert_eq!(list.first().map(|s| s.id), Some(21));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Handler swap
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn restart_swaps_handlers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/monitoring/generate-daily-summary-stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(sse(&[json!({"type": "complete", "summary": summary(1)})]), "text/event-stream")
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/monitoring/generate-weekly-summary-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            sse(&[
                json!({"type": "content_chunk", "language": "english", "content": "fresh"}),
                json!({"type": "complete", "summary": summary(2)}),
            ]),
            "text/event-stream",
        ))
        .mount(&server)
        .await;

    let heard = Arc::new(Mutex::new(Vec::<String>::new()));
    let log = Arc::clone(&heard);
    let callbacks = CallbackHandler::<Summary>::new()
        .progress(move |envelope| log.lock().unwrap().push(envelope.kind().to_string()))
        .error(|message| panic!("cancelled generation reported an error: {message}"));

    let generator = SummaryGenerator::new(client_for(&server));
    let first = generator
        .start(SummaryKind::daily(None), callbacks)
        .expect("started");
    assert!(matches!(
        generator.start(SummaryKind::weekly(None), SummaryAssembler::new()),
        Err(GenerationError::AlreadyActive)
    ));

    let second = generator
        .restart(SummaryKind::weekly(None), SummaryAssembler::new())
        .await
        .expect("restarted");
    let (outcome, assembler) = second.join().await.expect("joined");
    assert_eq!(outcome, IngestOutcome::Completed);
    assert_eq!(assembler.text(ENGLISH), Some("fresh"));

    let (first_outcome, _) = first.join().await.expect("joined");
    assert_eq!(first_outcome, IngestOutcome::Cancelled);
    assert!(heard.lock().unwrap().is_empty());
}
