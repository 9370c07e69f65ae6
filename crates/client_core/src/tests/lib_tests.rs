use super::*;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    Router,
};
use shared::{catalog, error::ErrorCode, protocol::Candidate};
use std::sync::Mutex;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct SeenRequest {
    path: String,
    api_key: Option<String>,
    body: serde_json::Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

async fn handle_generate(
    State(state): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let seen = SeenRequest {
        path: uri.path().to_string(),
        api_key: headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
    };
    state.seen.lock().expect("seen lock").push(seen);
    (state.status, state.reply.clone())
}

async fn spawn_stub_server(
    status: StatusCode,
    reply: serde_json::Value,
) -> anyhow::Result<(String, Arc<Mutex<Vec<SeenRequest>>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        reply: reply.to_string(),
        seen: Arc::clone(&seen),
    };
    let app = Router::new().fallback(handle_generate).with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), seen))
}

fn client_for(server_url: &str, api_key: Option<&str>) -> GeminiClient {
    let settings = Settings {
        api_key: api_key.map(str::to_string),
        model: "test-model".into(),
        api_base_url: server_url.to_string(),
        ..Settings::default()
    };
    GeminiClient::new(&settings).expect("client")
}

fn image_reply(data: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [
                    { "text": "Here is your map." },
                    { "inlineData": { "mimeType": "image/png", "data": data } },
                    { "inlineData": { "mimeType": "image/jpeg", "data": "AAAA" } }
                ]
            }
        }]
    })
}

#[tokio::test]
async fn request_map_posts_prompt_and_decodes_first_inline_image() {
    let payload = b"\x89PNG fake map bytes";
    let (server_url, seen) =
        spawn_stub_server(StatusCode::OK, image_reply(&STANDARD.encode(payload)))
            .await
            .expect("spawn server");
    let client = client_for(&server_url, Some("test-key"));
    let style = catalog::find("blueprint").expect("style");

    let map = client
        .request_map("  Montreal ", style)
        .await
        .expect("map generated");

    assert_eq!(map.city_name, "Montreal");
    assert_eq!(map.style.id, "blueprint");
    assert_eq!(map.image.mime_type, "image/png");
    assert_eq!(&*map.image.bytes, payload);
    assert!(map.image.data_url().starts_with("data:image/png;base64,"));

    let seen = seen.lock().expect("seen lock");
    assert_eq!(seen.len(), 1);
    let request = &seen[0];
    assert_eq!(request.path, "/v1beta/models/test-model:generateContent");
    assert_eq!(request.api_key.as_deref(), Some("test-key"));
    let prompt = request.body["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt text");
    assert_eq!(prompt, compose_map_prompt("Montreal", style));
    assert_eq!(
        request.body["generationConfig"]["imageConfig"]["aspectRatio"],
        "1:1"
    );
}

#[tokio::test]
async fn http_error_surfaces_remote_message_as_transport_error() {
    let (server_url, _seen) = spawn_stub_server(
        StatusCode::FORBIDDEN,
        serde_json::json!({
            "error": { "code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED" }
        }),
    )
    .await
    .expect("spawn server");
    let client = client_for(&server_url, Some("bad-key"));

    let err = client
        .request_map("Oslo", catalog::default_style())
        .await
        .expect_err("forbidden");

    assert_eq!(
        err,
        MapError::Transport {
            status: Some(403),
            message: "API key not valid.".into()
        }
    );
    assert_eq!(err.code(), ErrorCode::Transport);
}

#[tokio::test]
async fn empty_candidates_report_block_reason() {
    let (server_url, _seen) = spawn_stub_server(
        StatusCode::OK,
        serde_json::json!({ "candidates": [], "promptFeedback": { "blockReason": "SAFETY" } }),
    )
    .await
    .expect("spawn server");
    let client = client_for(&server_url, Some("test-key"));

    let err = client
        .request_map("Oslo", catalog::default_style())
        .await
        .expect_err("no candidate");
    assert_eq!(
        err,
        MapError::NoCandidate {
            block_reason: Some("SAFETY".into())
        }
    );
    assert_eq!(err.code(), ErrorCode::RemoteEmpty);
}

#[tokio::test]
async fn text_only_candidate_is_no_image_part() {
    let (server_url, _seen) = spawn_stub_server(
        StatusCode::OK,
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot draw that." }] } }]
        }),
    )
    .await
    .expect("spawn server");
    let client = client_for(&server_url, Some("test-key"));

    let err = client
        .request_map("Oslo", catalog::default_style())
        .await
        .expect_err("no image");
    assert_eq!(err, MapError::NoImagePart);
}

#[tokio::test]
async fn missing_api_key_fails_before_any_request() {
    let (server_url, seen) = spawn_stub_server(StatusCode::OK, image_reply("AAAA"))
        .await
        .expect("spawn server");
    let client = client_for(&server_url, None);

    let err = client
        .request_map("Oslo", catalog::default_style())
        .await
        .expect_err("no key");
    assert_eq!(err.code(), ErrorCode::Transport);
    assert!(seen.lock().expect("seen lock").is_empty());
}

#[tokio::test]
async fn blank_api_key_counts_as_missing() {
    let (server_url, seen) = spawn_stub_server(StatusCode::OK, image_reply("AAAA"))
        .await
        .expect("spawn server");
    let client = client_for(&server_url, Some("   "));

    let err = client
        .request_map("Oslo", catalog::default_style())
        .await
        .expect_err("blank key");
    assert_eq!(err.code(), ErrorCode::Transport);
    assert!(seen.lock().expect("seen lock").is_empty());
}

#[tokio::test]
async fn blank_city_is_rejected_locally() {
    let (server_url, seen) = spawn_stub_server(StatusCode::OK, image_reply("AAAA"))
        .await
        .expect("spawn server");
    let client = client_for(&server_url, Some("test-key"));

    let err = client
        .request_map("  ", catalog::default_style())
        .await
        .expect_err("blank");
    assert_eq!(err, MapError::Validation);
    assert!(seen.lock().expect("seen lock").is_empty());
}

#[tokio::test]
async fn session_over_real_client_keeps_previous_map_on_failure() {
    let (ok_url, _) = spawn_stub_server(StatusCode::OK, image_reply(&STANDARD.encode(b"tokyo")))
        .await
        .expect("spawn ok server");
    let (bad_url, _) = spawn_stub_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        serde_json::json!({ "error": { "message": "backend exploded" } }),
    )
    .await
    .expect("spawn failing server");

    let mut session = MapSession::new();
    let tokyo = session
        .generate(&client_for(&ok_url, Some("k")), "Tokyo", catalog::default_style())
        .await
        .expect("tokyo");
    let err = session
        .generate(&client_for(&bad_url, Some("k")), "Paris", catalog::default_style())
        .await
        .expect_err("paris");

    assert_eq!(err.user_message(), "backend exploded");
    assert_eq!(session.current().map(|m| m.id), Some(tokyo.id));
}

#[test]
fn extract_image_defaults_mime_and_rejects_bad_base64() {
    let response = |data: &str, mime: Option<&str>| GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(shared::protocol::Content {
                role: None,
                parts: vec![shared::protocol::Part {
                    text: None,
                    inline_data: Some(shared::protocol::InlineData {
                        mime_type: mime.map(str::to_string),
                        data: data.to_string(),
                    }),
                }],
            }),
            finish_reason: None,
        }],
        prompt_feedback: None,
    };

    let image = extract_image(response("AQID", None)).expect("decoded");
    assert_eq!(image.mime_type, DEFAULT_IMAGE_MIME);
    assert_eq!(&*image.bytes, &[1, 2, 3]);

    let err = extract_image(response("@@not-base64@@", Some("image/png"))).expect_err("bad");
    assert_eq!(err.remote_empty_kind(), Some(RemoteEmptyKind::UndecodableImage));

    let err = extract_image(GenerateContentResponse::default()).expect_err("empty");
    assert_eq!(err, MapError::NoCandidate { block_reason: None });
}

#[test]
fn remote_failure_falls_back_to_raw_body_or_status() {
    assert_eq!(
        remote_failure(502, "Bad Gateway"),
        MapError::Transport {
            status: Some(502),
            message: "Bad Gateway".into()
        }
    );
    assert_eq!(
        remote_failure(500, ""),
        MapError::Transport {
            status: Some(500),
            message: "remote service returned HTTP 500".into()
        }
    );
}

#[test]
fn user_messages_follow_error_kind() {
    assert_eq!(MapError::Validation.user_message(), error::BLANK_CITY_MESSAGE);
    assert_eq!(
        MapError::transport("").user_message(),
        error::FALLBACK_ERROR_MESSAGE
    );
    assert_eq!(
        MapError::NoCandidate { block_reason: None }.user_message(),
        "No response from AI."
    );
}
