//! Shared reason extraction: locates the causal/contrastive tail of a
//! sentence and resolves it to a canonical reason.
//!
//! One component serves both the lexicon scorer and the hosted-model adapter.
//! Connective classes are tried in fixed priority order (contrast, causal,
//! cause-prefix); the synonym table is ordered longest-key-first; the
//! candidate fallback picks the earliest occurrence by string position, with
//! candidate-list order breaking ties.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize;

pub const FALLBACK_REASON: &str = "geral";

/// (connective pattern, tail cap in chars), in priority order.
static CONNECTIVES: Lazy<[(Regex, usize); 3]> = Lazy::new(|| {
    [
        (
            Regex::new(r"\b(mas|porem|no entanto|todavia|contudo|entretanto)\b")
                .expect("contrast connective regex"),
            100,
        ),
        (
            Regex::new(r"\b(porque|pois|que)\b").expect("causal connective regex"),
            100,
        ),
        (
            Regex::new(r"\b(por causa de|devido a)\b").expect("cause-prefix connective regex"),
            80,
        ),
    ]
});

/// Surface form -> canonical reason, longest key first.
const SYNONYMS: &[(&str, &str)] = &[
    ("demorado", "tempo de espera"),
    ("lentidao", "performance"),
    ("instavel", "instabilidade"),
    ("demora", "tempo de espera"),
    ("travou", "falha"),
    ("travar", "falha"),
    ("barato", "preco"),
    ("lento", "lentidao"),
    ("queda", "instabilidade"),
    ("preco", "preco"),
    ("caro", "preco"),
    ("bug", "erro"),
    ("ui", "usabilidade"),
    ("ux", "usabilidade"),
];

/// Canonical reason vocabulary; list order breaks position ties.
const CANDIDATES: &[&str] = &[
    "tempo de espera",
    "fila",
    "atraso",
    "atendimento",
    "suporte",
    "qualidade",
    "performance",
    "lentidao",
    "estabilidade",
    "instabilidade",
    "erro",
    "falha",
    "comunicacao",
    "usabilidade",
    "preco",
    "documentacao",
    "entrega",
    "disponibilidade",
];

/// Extract the dominant reason behind a text's polarity, or "geral".
pub fn extract(text: &str) -> String {
    let norm = normalize(text);
    if norm.is_empty() {
        return FALLBACK_REASON.to_string();
    }

    // The tail after a connective usually carries the reason; fall back to
    // the whole text when the tail resolves to nothing.
    if let Some(tail) = connective_tail(&norm) {
        if !tail.is_empty() {
            if let Some(found) = resolve(&tail) {
                return found;
            }
        }
    }
    resolve(&norm).unwrap_or_else(|| FALLBACK_REASON.to_string())
}

fn connective_tail(norm: &str) -> Option<String> {
    for (re, cap) in CONNECTIVES.iter() {
        if let Some(m) = re.find(norm) {
            let tail: String = norm[m.end()..].chars().take(*cap).collect();
            return Some(tail.trim().to_string());
        }
    }
    None
}

fn resolve(s: &str) -> Option<String> {
    for (key, canonical) in SYNONYMS {
        if s.contains(key) {
            return Some((*canonical).to_string());
        }
    }
    let mut best: Option<(usize, &str)> = None;
    for c in CANDIDATES {
        if let Some(i) = s.find(c) {
            if best.map_or(true, |(bi, _)| i < bi) {
                best = Some((i, c));
            }
        }
    }
    best.map(|(_, c)| (*c).to_string())
}
