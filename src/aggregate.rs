//! Evidence aggregation: buckets per-sentence judgments by canonical aspect,
//! ranks aspects by accumulated negativity, and selects bounded strength and
//! improvement lists with supporting evidence sentences.

use serde::Serialize;
use std::cmp::Ordering;

use crate::advisor;
use crate::aspect::{canonical_aspect, FALLBACK_ASPECT};
use crate::sentiment::{round2, PolarityLabel, SentenceJudgment, SentimentResult};

/// Thresholds and caps for strength/improvement selection.
#[derive(Debug, Clone, Copy)]
pub struct AggregatorParams {
    /// Minimum positive sentence score to record a strength.
    pub strength_min: f64,
    /// Minimum accumulated negative score for an aspect to surface.
    pub improve_min: f64,
    pub max_strengths: usize,
    pub max_improvements: usize,
}

impl Default for AggregatorParams {
    fn default() -> Self {
        Self {
            strength_min: 0.75,
            improve_min: 0.35,
            max_strengths: 3,
            max_improvements: 3,
        }
    }
}

/// Accumulated positive/negative mass for one canonical aspect.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AspectScore {
    pub aspect: String,
    pub positive: f64,
    pub negative: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Strength {
    pub aspect: String,
    pub evidence: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Improvement {
    pub aspect: String,
    pub suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Aggregation {
    pub strengths: Vec<Strength>,
    pub improvements: Vec<Improvement>,
    pub aspects: Vec<AspectScore>,
}

struct Bucket {
    aspect: String,
    positive: f64,
    negative: f64,
    /// Strongest negative sentence seen for this aspect, kept as evidence.
    best_neg: Option<(String, f64)>,
}

/// Aggregate with the default thresholds.
pub fn aggregate(
    judgments: &[SentenceJudgment],
    overall: &SentimentResult,
    full_text: &str,
) -> Aggregation {
    aggregate_with(&AggregatorParams::default(), judgments, overall, full_text)
}

pub fn aggregate_with(
    params: &AggregatorParams,
    judgments: &[SentenceJudgment],
    overall: &SentimentResult,
    full_text: &str,
) -> Aggregation {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut strengths: Vec<Strength> = Vec::new();

    for j in judgments {
        let aspect = canonical_aspect(&j.sentence);
        let idx = match buckets.iter().position(|b| b.aspect == aspect) {
            Some(i) => i,
            None => {
                buckets.push(Bucket {
                    aspect: aspect.clone(),
                    positive: 0.0,
                    negative: 0.0,
                    best_neg: None,
                });
                buckets.len() - 1
            }
        };
        match j.label {
            PolarityLabel::Positive => {
                buckets[idx].positive += j.score;
                if j.score >= params.strength_min && strengths.len() < params.max_strengths {
                    // First-seen order governs; strengths are never re-ranked.
                    strengths.push(Strength {
                        aspect,
                        evidence: j.sentence.clone(),
                    });
                }
            }
            PolarityLabel::Negative => {
                buckets[idx].negative += j.score;
                let replace = buckets[idx]
                    .best_neg
                    .as_ref()
                    .map_or(true, |(_, s)| j.score > *s);
                if replace {
                    buckets[idx].best_neg = Some((j.sentence.clone(), j.score));
                }
            }
            PolarityLabel::Neutral | PolarityLabel::Mixed => {}
        }
    }

    // "geral" is a fallback, not an aspect: seed it only when no real aspect
    // was resolved, and drop it otherwise.
    if buckets.iter().all(|b| b.aspect == FALLBACK_ASPECT) {
        buckets.clear();
        buckets.push(Bucket {
            aspect: FALLBACK_ASPECT.to_string(),
            positive: overall.score.max(0.0),
            negative: 0.0,
            best_neg: None,
        });
    } else {
        buckets.retain(|b| b.aspect != FALLBACK_ASPECT);
    }

    // Rank by accumulated negativity; the stable sort keeps first-seen order
    // for equal accumulators.
    let mut ranked: Vec<&Bucket> = buckets.iter().collect();
    ranked.sort_by(|a, b| {
        b.negative
            .partial_cmp(&a.negative)
            .unwrap_or(Ordering::Equal)
    });

    let mut improvements: Vec<Improvement> = Vec::new();
    for b in ranked {
        if improvements.len() >= params.max_improvements {
            break;
        }
        if b.negative >= params.improve_min {
            improvements.push(Improvement {
                aspect: b.aspect.clone(),
                suggestion: advisor::suggest(PolarityLabel::Negative, &b.aspect, full_text),
                evidence: b.best_neg.as_ref().map(|(s, _)| s.clone()),
            });
        }
    }

    let aspects = buckets
        .iter()
        .map(|b| AspectScore {
            aspect: b.aspect.clone(),
            positive: round2(b.positive),
            negative: round2(b.negative),
        })
        .collect();

    Aggregation {
        strengths,
        improvements,
        aspects,
    }
}
