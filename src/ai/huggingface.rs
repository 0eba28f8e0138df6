//! Hosted-model adapter for the HuggingFace inference API.
//!
//! Sends sentence batches to the configured model, picks the best label per
//! sentence, and averages per-label scores into an overall verdict. Any
//! failure — missing token, exhausted retries, malformed payload — degrades
//! to the neutral fallback; errors never escape this module.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::config::AppConfig;
use crate::reason;
use crate::sentences::{split_sentences, MAX_SENTENCES};
use crate::sentiment::{clamp01, PolarityLabel, SentenceJudgment, SentimentResult};

use super::{fallback_result, BoxFuture, Classifier, DetailedResult};

/// Averages at or above these mark a strong signal; both strong -> MIXED.
const POS_STRONG: f64 = 0.55;
const NEG_STRONG: f64 = 0.55;

const MAX_ATTEMPTS: u32 = 4;
const RETRY_BASE_MS: u64 = 350;

pub struct HuggingFaceClassifier {
    http: reqwest::Client,
    token: String,
    model: String,
}

impl HuggingFaceClassifier {
    pub fn new(config: &AppConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("feedback-sentiment-service/0.1")
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(config.hf_timeout_secs))
            .build()
            .expect("reqwest client");
        Self {
            http,
            token: config.hf_token.clone(),
            model: config.hf_model.clone(),
        }
    }

    /// Best (label, score) per input sentence, or `None` on any failure.
    async fn best_per_sentence(&self, sentences: &[String]) -> Option<Vec<(PolarityLabel, f64)>> {
        #[derive(Serialize)]
        struct Payload<'a> {
            inputs: &'a [String],
        }

        let url = format!(
            "https://api-inference.huggingface.co/models/{}",
            self.model
        );

        let mut attempts = 0u32;
        let resp = loop {
            attempts += 1;
            let sent = self
                .http
                .post(&url)
                .bearer_auth(&self.token)
                .json(&Payload { inputs: sentences })
                .send()
                .await;
            match sent {
                Ok(r) if r.status().is_success() => break r,
                Ok(r) if attempts < MAX_ATTEMPTS
                    && matches!(r.status().as_u16(), 429 | 503) =>
                {
                    // Model loading or rate limited; linear backoff.
                    tokio::time::sleep(Duration::from_millis(RETRY_BASE_MS * attempts as u64))
                        .await;
                }
                Ok(r) => {
                    warn!(status = %r.status(), model = %self.model, "huggingface request failed");
                    return None;
                }
                Err(e) => {
                    warn!(error = %e, model = %self.model, "huggingface request error");
                    return None;
                }
            }
        };

        let root: Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "huggingface response was not json");
                return None;
            }
        };
        parse_best(&root)
    }

    fn overall_result(&self, best: &[(PolarityLabel, f64)], text: &str) -> SentimentResult {
        let (label, score, summary) = overall_from(best);
        SentimentResult {
            label,
            score: clamp01(score),
            summary: summary.to_string(),
            reason: reason::extract(text),
        }
    }
}

impl Classifier for HuggingFaceClassifier {
    fn classify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, SentimentResult> {
        Box::pin(async move {
            if self.token.is_empty() {
                return fallback_result("Token HuggingFace ausente; resultado neutro.");
            }
            let sentences = non_empty_sentences(text);
            match self.best_per_sentence(&sentences).await {
                Some(best) if !best.is_empty() => self.overall_result(&best, text),
                _ => fallback_result("Falha na API HuggingFace; resultado neutro."),
            }
        })
    }

    fn supports_detailed(&self) -> bool {
        true
    }

    fn classify_detailed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, DetailedResult> {
        Box::pin(async move {
            if self.token.is_empty() {
                return DetailedResult {
                    overall: fallback_result("Token HuggingFace ausente; resultado neutro."),
                    per_sentence: Vec::new(),
                };
            }
            let sentences = non_empty_sentences(text);
            match self.best_per_sentence(&sentences).await {
                Some(best) if !best.is_empty() => {
                    let overall = self.overall_result(&best, text);
                    let per_sentence = best
                        .iter()
                        .zip(&sentences)
                        .map(|((label, score), sentence)| SentenceJudgment {
                            sentence: sentence.clone(),
                            label: *label,
                            score: *score,
                        })
                        .collect();
                    DetailedResult {
                        overall,
                        per_sentence,
                    }
                }
                _ => DetailedResult {
                    overall: fallback_result("Falha na API HuggingFace; resultado neutro."),
                    per_sentence: Vec::new(),
                },
            }
        })
    }

    fn provider_name(&self) -> String {
        format!("HuggingFace: {}", self.model)
    }
}

fn non_empty_sentences(text: &str) -> Vec<String> {
    let mut sentences = split_sentences(text, MAX_SENTENCES);
    if sentences.is_empty() {
        sentences.push(String::new());
    }
    sentences
}

/// Response is either `[[{label,score}..]..]` (batch) or `[{label,score}..]`.
fn parse_best(root: &Value) -> Option<Vec<(PolarityLabel, f64)>> {
    let arr = root.as_array()?;
    if arr.is_empty() {
        return None;
    }
    if arr[0].is_array() {
        Some(arr.iter().map(extract_best).collect())
    } else {
        Some(vec![extract_best(root)])
    }
}

fn extract_best(scores: &Value) -> (PolarityLabel, f64) {
    let mut best = (PolarityLabel::Neutral, 0.0);
    if let Some(items) = scores.as_array() {
        for item in items {
            let label = item.get("label").and_then(Value::as_str).unwrap_or("");
            let score = item.get("score").and_then(Value::as_f64).unwrap_or(0.0);
            if !label.is_empty() && score > best.1 {
                best = (map_label(label), score);
            }
        }
    }
    best
}

fn map_label(raw: &str) -> PolarityLabel {
    match raw.to_ascii_uppercase().trim() {
        "POSITIVE" | "LABEL_2" | "5 STARS" | "4 STARS" => PolarityLabel::Positive,
        "NEGATIVE" | "LABEL_0" | "1 STAR" | "2 STARS" => PolarityLabel::Negative,
        _ => PolarityLabel::Neutral,
    }
}

fn overall_from(best: &[(PolarityLabel, f64)]) -> (PolarityLabel, f64, &'static str) {
    let n = best.len().max(1) as f64;
    let (mut pos, mut neg, mut neu) = (0.0, 0.0, 0.0);
    for (label, score) in best {
        match label {
            PolarityLabel::Positive => pos += score,
            PolarityLabel::Negative => neg += score,
            _ => neu += score,
        }
    }
    let (pos_avg, neg_avg, neu_avg) = (pos / n, neg / n, neu / n);

    if pos_avg >= POS_STRONG && neg_avg >= NEG_STRONG {
        (
            PolarityLabel::Mixed,
            pos_avg.max(neg_avg),
            "Sinais positivos e negativos relevantes em diferentes partes do texto.",
        )
    } else if pos_avg >= neg_avg && pos_avg >= neu_avg {
        (
            PolarityLabel::Positive,
            pos_avg,
            "Avaliação positiva predominante.",
        )
    } else if neg_avg >= pos_avg && neg_avg >= neu_avg {
        (
            PolarityLabel::Negative,
            neg_avg,
            "Avaliação negativa predominante.",
        )
    } else {
        (
            PolarityLabel::Neutral,
            neu_avg,
            "Sem polaridade clara; avaliação neutra.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_model_label_aliases() {
        assert_eq!(map_label("LABEL_2"), PolarityLabel::Positive);
        assert_eq!(map_label("label_0"), PolarityLabel::Negative);
        assert_eq!(map_label("3 stars"), PolarityLabel::Neutral);
        assert_eq!(map_label("whatever"), PolarityLabel::Neutral);
    }

    #[test]
    fn parses_single_and_batch_shapes() {
        let single: Value = serde_json::json!([
            {"label": "POSITIVE", "score": 0.9},
            {"label": "NEGATIVE", "score": 0.1}
        ]);
        let best = parse_best(&single).unwrap();
        assert_eq!(best, vec![(PolarityLabel::Positive, 0.9)]);

        let batch: Value = serde_json::json!([
            [{"label": "NEGATIVE", "score": 0.8}],
            [{"label": "LABEL_2", "score": 0.7}]
        ]);
        let best = parse_best(&batch).unwrap();
        assert_eq!(
            best,
            vec![(PolarityLabel::Negative, 0.8), (PolarityLabel::Positive, 0.7)]
        );
    }

    #[test]
    fn malformed_payload_yields_none() {
        assert!(parse_best(&serde_json::json!({"error": "loading"})).is_none());
        assert!(parse_best(&serde_json::json!([])).is_none());
    }

    #[test]
    fn overall_label_follows_dominant_average() {
        let best = vec![
            (PolarityLabel::Positive, 0.8),
            (PolarityLabel::Negative, 0.9),
        ];
        // pos_avg 0.40 < neg_avg 0.45 -> dominant negative.
        let (label, score, _) = overall_from(&best);
        assert_eq!(label, PolarityLabel::Negative);
        assert!((score - 0.45).abs() < 1e-9);

        let best = vec![
            (PolarityLabel::Neutral, 0.9),
            (PolarityLabel::Neutral, 0.7),
            (PolarityLabel::Positive, 0.3),
        ];
        let (label, _, _) = overall_from(&best);
        assert_eq!(label, PolarityLabel::Neutral);
    }

    #[tokio::test]
    async fn missing_token_degrades_to_neutral_without_network() {
        let cfg = AppConfig {
            provider: crate::config::Provider::HuggingFace,
            ..AppConfig::default()
        };
        let c = HuggingFaceClassifier::new(&cfg);
        let r = c.classify("O serviço foi ótimo!").await;
        assert_eq!(r.label, PolarityLabel::Neutral);
        assert_eq!(r.score, 0.0);
        assert_eq!(r.reason, "geral");

        let det = c.classify_detailed("O serviço foi ótimo!").await;
        assert!(det.per_sentence.is_empty());
        assert_eq!(det.overall.label, PolarityLabel::Neutral);
    }
}
