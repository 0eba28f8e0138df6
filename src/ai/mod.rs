//! Classifier abstraction: the local lexicon scorer and the hosted-model
//! adapter are interchangeable behind this trait.
//!
//! Implementations are total — a failing adapter degrades to the same
//! NEUTRAL/zero-score shape used for blank input, so downstream aggregation
//! never special-cases "classifier unavailable".

pub mod huggingface;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::config::{AppConfig, Provider};
use crate::lexicon;
use crate::reason;
use crate::sentiment::{PolarityLabel, SentenceJudgment, SentimentResult};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Overall result plus optional per-sentence judgments.
#[derive(Debug, Clone)]
pub struct DetailedResult {
    pub overall: SentimentResult,
    pub per_sentence: Vec<SentenceJudgment>,
}

pub trait Classifier: Send + Sync {
    /// Classify a whole document. Never fails; adapters degrade to
    /// `fallback_result`.
    fn classify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, SentimentResult>;

    /// Whether `classify_detailed` produces real per-sentence judgments.
    /// Callers probe this once at construction, not per call.
    fn supports_detailed(&self) -> bool {
        false
    }

    /// Detailed classification; the default is overall-only.
    fn classify_detailed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, DetailedResult> {
        Box::pin(async move {
            DetailedResult {
                overall: self.classify(text).await,
                per_sentence: Vec::new(),
            }
        })
    }

    /// Provider identification for diagnostics and response payloads.
    fn provider_name(&self) -> String;
}

pub type DynClassifier = Arc<dyn Classifier>;

/// Uniform "classifier unavailable" shape: NEUTRAL, zero score, "geral".
pub fn fallback_result(summary: &str) -> SentimentResult {
    SentimentResult {
        label: PolarityLabel::Neutral,
        score: 0.0,
        summary: summary.to_string(),
        reason: reason::FALLBACK_REASON.to_string(),
    }
}

/// Local rule-based classifier; pure computation behind the async trait.
pub struct LexiconClassifier;

impl Classifier for LexiconClassifier {
    fn classify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, SentimentResult> {
        let result = lexicon::score(text);
        Box::pin(async move { result })
    }

    fn provider_name(&self) -> String {
        "lexicon".to_string()
    }
}

/// Build the configured classifier.
pub fn build_classifier(config: &AppConfig) -> DynClassifier {
    match config.provider {
        Provider::HuggingFace => Arc::new(huggingface::HuggingFaceClassifier::new(config)),
        Provider::Lexicon => Arc::new(LexiconClassifier),
    }
}

/// Split-and-classify helper for classifiers without detailed support.
pub async fn classify_sentences(
    classifier: &dyn Classifier,
    sentences: &[String],
) -> Vec<SentenceJudgment> {
    let mut out = Vec::with_capacity(sentences.len());
    for s in sentences {
        let r = classifier.classify(s).await;
        out.push(SentenceJudgment {
            sentence: s.clone(),
            label: r.label,
            score: r.score,
        });
    }
    out
}
