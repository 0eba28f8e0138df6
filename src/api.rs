//! HTTP surface: router, shared state, request validation, response DTOs.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::advisor;
use crate::aggregate::{AspectScore, Improvement, Strength};
use crate::ai::{build_classifier, DynClassifier};
use crate::config::AppConfig;
use crate::peer::PeerAnalyzer;
use crate::sentiment::PolarityLabel;

const TEXT_MIN: usize = 5;
const ANALYZE_TEXT_MAX: usize = 2000;
const PEER_TEXT_MAX: usize = 3000;

#[derive(Clone)]
pub struct AppState {
    classifier: DynClassifier,
    peer: Arc<PeerAnalyzer>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let classifier = build_classifier(config);
        let peer = Arc::new(PeerAnalyzer::new(classifier.clone()));
        Self { classifier, peer }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/peer-feedback", post(peer_feedback))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub text: String,
    /// Origin of the feedback (sector, team, support channel); informational.
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub sentiment: PolarityLabel,
    pub score: f64,
    pub summary: String,
    pub reason: String,
    pub provider: String,
    pub improvement_area: String,
    pub improvement: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerFeedbackRequest {
    pub subject_id: String,
    #[serde(default)]
    pub evaluator_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    /// Optional 1..5 rating; informational.
    #[serde(default)]
    pub rating: Option<u8>,
    pub text: String,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerFeedbackResponse {
    pub subject_id: String,
    pub sentiment: PolarityLabel,
    pub score: f64,
    pub summary: String,
    pub strengths: Vec<Strength>,
    pub improvements: Vec<Improvement>,
    pub aspects: Vec<AspectScore>,
    pub provider: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn bad_request(msg: String) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError { error: msg }))
}

fn validate_text(text: &str, max: usize) -> Result<(), (StatusCode, Json<ApiError>)> {
    let len = text.trim().chars().count();
    if len < TEXT_MIN || len > max {
        return Err(bad_request(format!(
            "O texto deve ter entre {TEXT_MIN} e {max} caracteres."
        )));
    }
    Ok(())
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<FeedbackRequest>,
) -> ApiResult<FeedbackResponse> {
    validate_text(&body.text, ANALYZE_TEXT_MAX)?;

    let result = state.classifier.classify(&body.text).await;
    let improvement_area = advisor::normalize_area(&result.reason);
    let improvement = advisor::suggest(result.label, &result.reason, &body.text);

    Ok(Json(FeedbackResponse {
        sentiment: result.label,
        score: result.score,
        summary: result.summary,
        reason: result.reason,
        provider: state.classifier.provider_name(),
        improvement_area,
        improvement,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

async fn peer_feedback(
    State(state): State<AppState>,
    Json(body): Json<PeerFeedbackRequest>,
) -> ApiResult<PeerFeedbackResponse> {
    if body.subject_id.trim().is_empty() {
        return Err(bad_request(
            "O campo 'subjectId' não pode estar vazio.".to_string(),
        ));
    }
    validate_text(&body.text, PEER_TEXT_MAX)?;

    let analysis = state.peer.analyze(&body.text).await;

    Ok(Json(PeerFeedbackResponse {
        subject_id: body.subject_id,
        sentiment: analysis.overall.label,
        score: analysis.overall.score,
        summary: analysis.overall.summary,
        strengths: analysis.aggregation.strengths,
        improvements: analysis.aggregation.improvements,
        aspects: analysis.aggregation.aspects,
        provider: state.peer.provider_name(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}
