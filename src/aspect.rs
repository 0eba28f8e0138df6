//! Canonical aspect resolution for peer feedback.
//!
//! A single ordered table of (surface form, canonical aspect) pairs. An entry
//! matches when its key occurs as a substring of the normalized text; the
//! first matching entry wins. Keys are ordered longest-first (declaration
//! order breaks length ties) so specific surface forms like "prazo" take
//! precedence over short embedded ones like "pr".

use crate::normalize::normalize;

pub const FALLBACK_ASPECT: &str = "geral";

const SYNONYMS: &[(&str, &str)] = &[
    ("projeto de componentes", "arquitetura"),
    ("qualidade de codigo", "qualidade"),
    ("tempo de resposta", "velocidade/tempo de resposta"),
    ("documentacao", "documentação"),
    ("investigacao", "debugging"),
    ("proatividade", "proatividade"),
    ("alinhamento", "comunicação"),
    ("arquitetura", "arquitetura"),
    ("colaboracao", "colaboração"),
    ("comunicacao", "comunicação"),
    ("performance", "performance"),
    ("pareamento", "colaboração"),
    ("requisitos", "entendimento de requisitos"),
    ("velocidade", "velocidade/tempo de resposta"),
    ("lideranca", "liderança"),
    ("ownership", "ownership"),
    ("qualidade", "qualidade"),
    ("mentoria", "mentoria"),
    ("entrega", "entrega"),
    ("negocio", "entendimento de requisitos"),
    ("design", "arquitetura"),
    ("review", "velocidade/tempo de resposta"),
    ("testes", "qualidade"),
    ("debug", "debugging"),
    ("lento", "performance"),
    ("prazo", "entrega"),
    ("teste", "qualidade"),
    ("docs", "documentação"),
    ("pr", "velocidade/tempo de resposta"),
];

/// Resolve free text to a canonical aspect, or "geral" when nothing matches.
pub fn canonical_aspect(text: &str) -> String {
    let norm = normalize(text);
    if norm.is_empty() {
        return FALLBACK_ASPECT.to_string();
    }
    for (key, canonical) in SYNONYMS {
        if norm.contains(key) {
            return (*canonical).to_string();
        }
    }
    FALLBACK_ASPECT.to_string()
}
