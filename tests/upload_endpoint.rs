use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use docproc_uploader::{
    Config, FileHandle, HttpProcessor, KeyValues, Phase, WorkflowState,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// What the mock endpoint saw: (field name, file name or text value) per part.
type SeenFields = Arc<Mutex<Vec<(String, String)>>>;

#[derive(Clone)]
struct ServerState {
    calls: Arc<AtomicUsize>,
    seen: SeenFields,
    status: StatusCode,
    reply: Value,
    delay: Duration,
}

async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    state.calls.fetch_add(1, Ordering::SeqCst);

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let label = match file_name {
            Some(file_name) => file_name,
            None => field.text().await.unwrap(),
        };
        state.seen.lock().unwrap().push((name, label));
    }

    tokio::time::sleep(state.delay).await;
    (state.status, Json(state.reply.clone()))
}

struct MockEndpoint {
    url: String,
    calls: Arc<AtomicUsize>,
    seen: SeenFields,
}

async fn spawn_endpoint(status: StatusCode, reply: Value, delay: Duration) -> MockEndpoint {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen: SeenFields = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        calls: calls.clone(),
        seen: seen.clone(),
        status,
        reply,
        delay,
    };

    let app = Router::new()
        .route("/api/upload", post(upload))
        .with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockEndpoint {
        url: format!("http://{addr}/api/upload"),
        calls,
        seen,
    }
}

fn form(document_type: &str, names: &[&str]) -> WorkflowState {
    let mut state = WorkflowState::new();
    state.set_document_type(document_type);
    state.set_files(
        names
            .iter()
            .map(|name| FileHandle::in_memory(*name, b"fake image".to_vec()))
            .collect(),
    );
    state
}

fn processor_for(endpoint: &MockEndpoint, timeout: Duration) -> HttpProcessor {
    let config = Config::default()
        .with_endpoint(endpoint.url.clone())
        .with_timeout(timeout);
    HttpProcessor::new(&config)
}

#[tokio::test]
async fn successful_upload_renders_results() {
    let endpoint = spawn_endpoint(
        StatusCode::OK,
        json!({
            "success": true,
            "files": [{
                "fileName": "a.png",
                "extractedText": "Total: $50",
                "prompt": "Extract total",
                "promptCreated": true,
                "keyValues": {"total": "50"}
            }]
        }),
        Duration::ZERO,
    )
    .await;
    let processor = processor_for(&endpoint, Duration::from_secs(10));
    let mut state = form("Invoice", &["a.png"]);

    assert_eq!(state.submit(&processor).await, Ok(Phase::Succeeded));

    let results = state.results().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].file_name, "a.png");
    assert!(results[0].prompt_created);
    assert_eq!(
        results[0].key_values,
        KeyValues::Structured(json!({"total": "50"}))
    );
    assert_eq!(endpoint.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn multipart_body_keeps_file_order_and_trims_type() {
    let endpoint = spawn_endpoint(
        StatusCode::OK,
        json!({"success": true, "files": []}),
        Duration::ZERO,
    )
    .await;
    let processor = processor_for(&endpoint, Duration::from_secs(10));
    let mut state = form("  Contract ", &["b.tif", "a.png", "b.tif", "notes.pdf"]);

    assert_eq!(state.submit(&processor).await, Ok(Phase::Succeeded));

    let seen = endpoint.seen.lock().unwrap().clone();
    let expected: Vec<(String, String)> = [
        ("files", "b.tif"),
        ("files", "a.png"),
        ("files", "b.tif"),
        ("files", "notes.pdf"),
        ("documentType", "Contract"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn server_error_is_surfaced() {
    let endpoint = spawn_endpoint(
        StatusCode::OK,
        json!({"success": false, "error": "OCR engine unavailable"}),
        Duration::ZERO,
    )
    .await;
    let processor = processor_for(&endpoint, Duration::from_secs(10));
    let mut state = form("Invoice", &["a.png"]);

    assert_eq!(state.submit(&processor).await, Ok(Phase::Failed));
    assert_eq!(state.last_error(), Some("OCR engine unavailable"));
    assert!(state.results().is_none());
}

#[tokio::test]
async fn error_body_on_http_failure_is_preferred() {
    let endpoint = spawn_endpoint(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "OpenAI quota exceeded"}),
        Duration::ZERO,
    )
    .await;
    let processor = processor_for(&endpoint, Duration::from_secs(10));
    let mut state = form("Invoice", &["a.png"]);

    assert_eq!(state.submit(&processor).await, Ok(Phase::Failed));
    assert_eq!(state.last_error(), Some("OpenAI quota exceeded"));
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let endpoint = spawn_endpoint(
        StatusCode::OK,
        json!({"success": true, "files": []}),
        Duration::from_secs(5),
    )
    .await;
    let processor = processor_for(&endpoint, Duration::from_millis(200));
    let mut state = form("Invoice", &["a.png"]);

    assert_eq!(state.submit(&processor).await, Ok(Phase::Failed));
    assert_eq!(state.last_error(), Some("timeout of 200ms exceeded"));
    assert!(state.results().is_none());
    assert_eq!(endpoint.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unreachable_endpoint_reports_transport_failure() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = Config::default()
        .with_endpoint(format!("http://{addr}/api/upload"))
        .with_timeout(Duration::from_secs(5));
    let processor = HttpProcessor::new(&config);
    let mut state = form("Invoice", &["a.png"]);

    assert_eq!(state.submit(&processor).await, Ok(Phase::Failed));
    let message = state.last_error().unwrap();
    assert!(!message.is_empty());
    assert_ne!(message, "Upload failed");
}

#[tokio::test]
async fn invalid_form_never_reaches_the_endpoint() {
    let endpoint = spawn_endpoint(
        StatusCode::OK,
        json!({"success": true, "files": []}),
        Duration::ZERO,
    )
    .await;
    let processor = processor_for(&endpoint, Duration::from_secs(10));

    let mut state = form("", &["a.png"]);
    assert!(state.submit(&processor).await.is_err());
    assert_eq!(state.last_error(), Some("Please enter a Document Type."));

    let mut state = form("Invoice", &[]);
    assert!(state.submit(&processor).await.is_err());
    assert_eq!(state.last_error(), Some("Please select at least one file."));

    assert_eq!(endpoint.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn each_submit_is_exactly_one_request() {
    let endpoint = spawn_endpoint(
        StatusCode::OK,
        json!({"success": true, "files": []}),
        Duration::ZERO,
    )
    .await;
    let processor = processor_for(&endpoint, Duration::from_secs(10));
    let mut state = form("Invoice", &["a.png", "b.png"]);

    state.submit(&processor).await.unwrap();
    state.submit(&processor).await.unwrap();

    assert_eq!(endpoint.calls.load(Ordering::SeqCst), 2);
}
