//! Peer-feedback pipeline: per-sentence judgments feeding the aggregator.
//!
//! Detailed-capable classifiers produce judgments in one call; for the rest
//! the pipeline splits the text itself and classifies sentence by sentence.
//! The capability is probed once, when the analyzer is built.

use crate::aggregate::{aggregate_with, AggregatorParams, Aggregation};
use crate::ai::{classify_sentences, DynClassifier};
use crate::sentences::{split_sentences, MAX_SENTENCES};
use crate::sentiment::{SentenceJudgment, SentimentResult};

pub struct PeerAnalysis {
    pub overall: SentimentResult,
    pub judgments: Vec<SentenceJudgment>,
    pub aggregation: Aggregation,
}

pub struct PeerAnalyzer {
    classifier: DynClassifier,
    detailed: bool,
    params: AggregatorParams,
}

impl PeerAnalyzer {
    pub fn new(classifier: DynClassifier) -> Self {
        let detailed = classifier.supports_detailed();
        Self {
            classifier,
            detailed,
            params: AggregatorParams::default(),
        }
    }

    pub fn with_params(classifier: DynClassifier, params: AggregatorParams) -> Self {
        let detailed = classifier.supports_detailed();
        Self {
            classifier,
            detailed,
            params,
        }
    }

    pub async fn analyze(&self, text: &str) -> PeerAnalysis {
        let (overall, judgments) = if self.detailed {
            let det = self.classifier.classify_detailed(text).await;
            (det.overall, det.per_sentence)
        } else {
            let sentences = split_sentences(text, MAX_SENTENCES);
            let judgments = classify_sentences(self.classifier.as_ref(), &sentences).await;
            let overall = self.classifier.classify(text).await;
            (overall, judgments)
        };

        let aggregation = aggregate_with(&self.params, &judgments, &overall, text);
        PeerAnalysis {
            overall,
            judgments,
            aggregation,
        }
    }

    pub fn provider_name(&self) -> String {
        self.classifier.provider_name()
    }
}
