// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /analyze (happy paths + validation)
// - POST /peer-feedback (aggregation payload + validation)

use axum::{
    body::{to_bytes, Body},
    http::Request,
    Router,
};
use http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt as _; // for `oneshot`

use feedback_sentiment_service::api::AppState;
use feedback_sentiment_service::config::AppConfig;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Build the same Router the binary uses, on the default lexicon provider.
fn test_router() -> Router {
    feedback_sentiment_service::router(AppState::new(&AppConfig::default()))
}

async fn post_json(router: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build request");
    let resp = router.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), BODY_LIMIT).await.expect("body");
    assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), "ok");
}

#[tokio::test]
async fn analyze_positive_feedback() {
    let (status, body) = post_json(
        test_router(),
        "/analyze",
        json!({ "text": "O serviço foi ótimo e eficiente!" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], json!("POSITIVE"));
    assert!(body["score"].as_f64().unwrap() >= 0.5);
    assert_eq!(body["provider"], json!("lexicon"));
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn analyze_contrastive_feedback_is_mixed_with_reason() {
    let (status, body) = post_json(
        test_router(),
        "/analyze",
        json!({ "text": "O atendimento foi excelente, mas o tempo de espera poderia melhorar." }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], json!("MIXED"));
    assert_eq!(body["reason"], json!("tempo de espera"));
    assert_eq!(body["improvementArea"], json!("tempo de espera"));
    assert!(body["improvement"]
        .as_str()
        .unwrap()
        .starts_with("Reduzir tempo de resposta"));
}

#[tokio::test]
async fn analyze_rejects_short_text() {
    let (status, body) = post_json(test_router(), "/analyze", json!({ "text": "oi" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn peer_feedback_reports_strengths_and_improvements() {
    let text =
        "O design do componente ficou excelente. A entrega teve problemas. Entrega atrasada de novo.";
    let (status, body) = post_json(
        test_router(),
        "/peer-feedback",
        json!({ "subjectId": "pedro", "text": text }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subjectId"], json!("pedro"));
    assert_eq!(body["sentiment"], json!("MIXED"));

    let strengths = body["strengths"].as_array().unwrap();
    assert_eq!(strengths.len(), 1);
    assert_eq!(strengths[0]["aspect"], json!("arquitetura"));
    assert_eq!(
        strengths[0]["evidence"],
        json!("O design do componente ficou excelente.")
    );

    let improvements = body["improvements"].as_array().unwrap();
    assert_eq!(improvements.len(), 1);
    assert_eq!(improvements[0]["aspect"], json!("entrega"));
    assert!(improvements[0]["evidence"].as_str().is_some());
    assert!(improvements[0]["suggestion"].as_str().is_some());

    // No "geral" bucket once real aspects exist.
    let aspects: Vec<&str> = body["aspects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["aspect"].as_str().unwrap())
        .collect();
    assert_eq!(aspects, vec!["arquitetura", "entrega"]);
}

#[tokio::test]
async fn peer_feedback_rejects_blank_subject() {
    let (status, _) = post_json(
        test_router(),
        "/peer-feedback",
        json!({ "subjectId": "  ", "text": "Comentário longo o suficiente." }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn peer_feedback_rejects_oversized_text() {
    let (status, _) = post_json(
        test_router(),
        "/peer-feedback",
        json!({ "subjectId": "pedro", "text": "x".repeat(3001) }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
