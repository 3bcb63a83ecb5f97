use super::helpers::{serve, tiny_jpeg_data_uri};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
};
use gatehouse::{
    application::extract_fields::use_case::{ExtractFieldsUseCase, extract_license_plate},
    domain::extraction::{ExtractionError, ExtractionOutcome, LicensePlateExtraction},
    infrastructure::inference::gemini_client::GeminiClient,
};
use serde_json::{Value, json};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

#[derive(Clone)]
struct FakeGemini {
    reply: (StatusCode, Value),
    seen: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

async fn generate_content(
    State(fake): State<FakeGemini>,
    Path(model_call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    fake.seen
        .lock()
        .expect("fake lock poisoned")
        .push((model_call, key, body));
    (fake.reply.0, Json(fake.reply.1.clone()))
}

async fn start_fake(reply: (StatusCode, Value)) -> (String, FakeGemini) {
    let fake = FakeGemini {
        reply,
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/v1beta/models/{model_call}", post(generate_content))
        .with_state(fake.clone());
    let addr = serve(app).await;
    (format!("http://{}", addr), fake)
}

fn client(base_url: String) -> Arc<GeminiClient> {
    Arc::new(
        GeminiClient::new(
            "secret-key".into(),
            "gemini-2.0-flash".into(),
            base_url,
            Duration::from_secs(5),
        )
        .expect("failed to build gemini client"),
    )
}

fn candidate(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn sends_one_structured_request_and_parses_fields() {
    let (base_url, fake) = start_fake((
        StatusCode::OK,
        candidate("{\"licensePlate\":\"PBX-4521\",\"confidence\":0.81}"),
    ))
    .await;
    let use_case = ExtractFieldsUseCase::new(client(base_url));
    let photo = tiny_jpeg_data_uri();

    let fields = use_case
        .execute::<LicensePlateExtraction>(&photo)
        .await
        .expect("extraction failed");
    assert_eq!(
        fields,
        LicensePlateExtraction {
            license_plate: "PBX-4521".into(),
            confidence: 0.81,
        }
    );

    let seen = fake.seen.lock().expect("fake lock poisoned");
    assert_eq!(seen.len(), 1);
    let (model_call, key, body) = &seen[0];
    assert_eq!(model_call, "gemini-2.0-flash:generateContent");
    assert_eq!(key.as_deref(), Some("secret-key"));

    let parts = &body["contents"][0]["parts"];
    assert!(
        parts[0]["text"]
            .as_str()
            .unwrap_or_default()
            .contains("vehicle license plates")
    );
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(
        format!(
            "data:image/jpeg;base64,{}",
            parts[1]["inlineData"]["data"].as_str().unwrap_or_default()
        ),
        photo
    );
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(
        body["generationConfig"]["responseSchema"]["properties"]["licensePlate"]["type"],
        "STRING"
    );
}

#[tokio::test]
async fn upstream_error_status_is_an_inference_failure() {
    let (base_url, fake) = start_fake((
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "error": { "code": 503, "message": "The model is overloaded." } }),
    ))
    .await;
    let use_case = ExtractFieldsUseCase::new(client(base_url));

    let result = use_case
        .execute::<LicensePlateExtraction>(&tiny_jpeg_data_uri())
        .await;
    assert!(matches!(result, Err(ExtractionError::Inference(_))));
    assert_eq!(fake.seen.lock().expect("fake lock poisoned").len(), 1);
}

#[tokio::test]
async fn non_json_model_text_fails_the_call() {
    let (base_url, _fake) = start_fake((
        StatusCode::OK,
        candidate("The plate reads ABC-123."),
    ))
    .await;
    let use_case = ExtractFieldsUseCase::new(client(base_url));

    assert_eq!(
        extract_license_plate(&use_case, &tiny_jpeg_data_uri()).await,
        ExtractionOutcome::failed("Failed to extract license plate.")
    );
}
