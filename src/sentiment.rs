//! Core result types shared by the classifiers and the peer-feedback pipeline.
//!
//! Everything here is a plain value object: constructed per request, never
//! mutated afterwards, safe to move across tasks.

use serde::{Deserialize, Serialize};

/// Polarity of an analyzed text span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolarityLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

/// Result of analyzing one text span (whole document or single sentence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: PolarityLabel,
    /// Confidence/strength in [0, 1], rounded to 2 decimals.
    pub score: f64,
    /// Short fixed summary keyed by label.
    pub summary: String,
    /// Canonical aspect behind the polarity, or "geral".
    pub reason: String,
}

/// Per-sentence verdict used by the peer-feedback aggregation.
/// Ordering follows the original sentence order; first match wins on ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceJudgment {
    pub sentence: String,
    pub label: PolarityLabel,
    pub score: f64,
}

pub(crate) fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
