//! Lexicon scorer: phrase- and token-level polarity counting with negation
//! and contrast handling.
//!
//! The vocabulary lives in `lexicon.json` (embedded at compile time) and is
//! split into single-word entries, matched token by token with a negator
//! look-back window, and multi-word phrases, matched as whole-word regexes
//! and weighted double. A contrast connective anywhere in the text shrinks
//! both raw counts, pulling ambiguous text toward MIXED.
//!
//! Pure computation, no I/O. This is the main unit-test target of the crate.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;

use crate::normalize::{normalize, tokenize};
use crate::reason;
use crate::sentiment::{clamp01, round2, PolarityLabel, SentimentResult};

/// Negator look-back window, in tokens.
const NEGATOR_WINDOW: usize = 3;
/// Phrase hits weigh double single-token hits.
const PHRASE_WEIGHT: f64 = 2.0;
/// Shrink factor applied to both counts when a contrast connective is present.
const CONTRAST_SHRINK: f64 = 0.85;

#[derive(Deserialize)]
struct LexiconFile {
    positive: Vec<String>,
    positive_phrases: Vec<String>,
    negative: Vec<String>,
    negative_phrases: Vec<String>,
}

struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    positive_phrases: Vec<Regex>,
    negative_phrases: Vec<Regex>,
}

static LEXICON: Lazy<Lexicon> = Lazy::new(|| {
    let raw = include_str!("../lexicon.json");
    let file: LexiconFile = serde_json::from_str(raw).expect("valid polarity lexicon");
    Lexicon {
        positive: file.positive.into_iter().collect(),
        negative: file.negative.into_iter().collect(),
        positive_phrases: compile_phrases(&file.positive_phrases),
        negative_phrases: compile_phrases(&file.negative_phrases),
    }
});

static CONTRAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(mas|porem|contudo|entretanto|no entanto|todavia)\b").expect("contrast regex")
});

fn compile_phrases(phrases: &[String]) -> Vec<Regex> {
    phrases
        .iter()
        .map(|p| {
            Regex::new(&format!(r"\b{}\b", regex::escape(p))).expect("phrase regex")
        })
        .collect()
}

fn is_negator(tok: &str) -> bool {
    matches!(tok, "nao" | "sem" | "nunca" | "jamais")
}

fn count_phrases(norm: &str, phrases: &[Regex]) -> usize {
    phrases.iter().map(|re| re.find_iter(norm).count()).sum()
}

fn summary_for(label: PolarityLabel) -> &'static str {
    match label {
        PolarityLabel::Positive => "Avaliação positiva.",
        PolarityLabel::Negative => "Avaliação negativa.",
        PolarityLabel::Mixed => "Elogios e críticas no mesmo texto.",
        PolarityLabel::Neutral => "Sem polaridade aparente.",
    }
}

/// Score a text span into a `SentimentResult`. Total: blank input yields
/// NEUTRAL with score 0.0 and reason "geral".
pub fn score(text: &str) -> SentimentResult {
    let norm = normalize(text);
    if norm.is_empty() {
        return SentimentResult {
            label: PolarityLabel::Neutral,
            score: 0.0,
            summary: summary_for(PolarityLabel::Neutral).to_string(),
            reason: reason::FALLBACK_REASON.to_string(),
        };
    }

    let phrase_pos = count_phrases(&norm, &LEXICON.positive_phrases);
    let phrase_neg = count_phrases(&norm, &LEXICON.negative_phrases);

    // Token scan with negation: a negator within the look-back window flips
    // the token's polarity contribution.
    let tokens: Vec<&str> = tokenize(&norm).collect();
    let mut token_pos = 0usize;
    let mut token_neg = 0usize;
    for i in 0..tokens.len() {
        let negated = (1..=NEGATOR_WINDOW).any(|k| i >= k && is_negator(tokens[i - k]));
        if LEXICON.positive.contains(tokens[i]) {
            if negated {
                token_neg += 1;
            } else {
                token_pos += 1;
            }
        } else if LEXICON.negative.contains(tokens[i]) {
            if negated {
                token_pos += 1;
            } else {
                token_neg += 1;
            }
        }
    }

    let mut pos_raw = phrase_pos as f64 * PHRASE_WEIGHT + token_pos as f64;
    let mut neg_raw = phrase_neg as f64 * PHRASE_WEIGHT + token_neg as f64;

    if CONTRAST.is_match(&norm) {
        pos_raw *= CONTRAST_SHRINK;
        neg_raw *= CONTRAST_SHRINK;
    }

    let (label, raw) = if pos_raw > 0.0 && neg_raw > 0.0 {
        (PolarityLabel::Mixed, (pos_raw - neg_raw) / (pos_raw + neg_raw))
    } else if pos_raw > neg_raw {
        (PolarityLabel::Positive, 0.45 + (pos_raw * 0.12).min(0.55))
    } else if neg_raw > pos_raw {
        (PolarityLabel::Negative, -0.45 - (neg_raw * 0.12).min(0.55))
    } else {
        (PolarityLabel::Neutral, 0.0)
    };

    SentimentResult {
        label,
        score: round2(clamp01((raw + 1.0) / 2.0)),
        summary: summary_for(label).to_string(),
        reason: reason::extract(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text_scores_above_half() {
        let r = score("O serviço foi ótimo e eficiente!");
        assert_eq!(r.label, PolarityLabel::Positive);
        assert!(r.score >= 0.5, "expected >= 0.5, got {}", r.score);
    }

    #[test]
    fn score_stays_in_unit_interval() {
        for text in [
            "",
            "texto qualquer sem polaridade",
            "excelente otimo perfeito adorei amei gostei recomendo",
            "pessimo horrivel ruim quebrado falhou erro problema",
            "bom, mas ruim",
        ] {
            let r = score(text);
            assert!((0.0..=1.0).contains(&r.score), "{text:?} -> {}", r.score);
        }
    }

    #[test]
    fn blank_input_is_neutral_zero_geral() {
        for text in ["", "   ", "\t\n"] {
            let r = score(text);
            assert_eq!(r.label, PolarityLabel::Neutral);
            assert_eq!(r.score, 0.0);
            assert_eq!(r.reason, "geral");
        }
    }

    #[test]
    fn negator_within_window_flips_polarity() {
        let r = score("o atendimento não foi bom");
        assert_ne!(r.label, PolarityLabel::Positive);
        assert_eq!(r.label, PolarityLabel::Negative);
    }

    #[test]
    fn negated_phrase_stays_negative() {
        let r = score("não recomendo");
        assert_eq!(r.label, PolarityLabel::Negative);
    }

    #[test]
    fn contrast_with_both_polarities_yields_mixed() {
        let r = score("O atendimento foi excelente, mas o tempo de espera poderia melhorar.");
        assert_eq!(r.label, PolarityLabel::Mixed);
        assert_eq!(r.score, 0.5);
        assert_eq!(r.reason, "tempo de espera");
    }

    #[test]
    fn phrases_weigh_double() {
        // "muito bom" counts as a phrase (x2) plus the "bom" token.
        let r = score("muito bom");
        assert_eq!(r.label, PolarityLabel::Positive);
        assert!(r.score > 0.8, "got {}", r.score);
    }

    #[test]
    fn unmatched_text_is_neutral_midpoint() {
        let r = score("texto qualquer sem vocabulario conhecido");
        assert_eq!(r.label, PolarityLabel::Neutral);
        assert_eq!(r.score, 0.5);
    }
}
